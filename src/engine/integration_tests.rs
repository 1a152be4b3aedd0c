//! End-to-end tests for the glossary pipeline
//!
//! Real glossary, real substitution engine, a session over an in-memory or
//! file-backed store. Only the delay is replaced.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::engine::{
        ARABIC_HEADER, GlossaryTranslator, LanguageTag, NoDelay, RenderedView, SystemClock,
        TranslationRequest, ViewMode, highlight,
    };
    use crate::glossary::{Glossary, parse_supplement};
    use crate::ledger::{FileStore, MemoryStore};
    use crate::session::Session;

    fn session_with(glossary: Glossary) -> Session {
        let translator = GlossaryTranslator::new(Arc::new(glossary), Arc::new(NoDelay)).unwrap();
        Session::open(
            Arc::new(translator),
            Arc::new(SystemClock),
            Arc::new(MemoryStore::new()),
        )
        .unwrap()
    }

    fn session() -> Session {
        session_with(Glossary::builtin())
    }

    #[tokio::test]
    async fn test_patient_sentence() {
        let session = session();
        let report = session
            .translate(session.request("Patient has diabetes and fever."))
            .await
            .unwrap();

        assert!(report.result.translated_text.starts_with(ARABIC_HEADER));
        assert_eq!(report.result.body(), "المريض has السكري and حمى.");
        assert_eq!(report.result.word_count, 5);
    }

    #[tokio::test]
    async fn test_phrase_beats_its_words() {
        let session = session();
        let report = session
            .translate(session.request("History of heart disease"))
            .await
            .unwrap();
        assert!(report.result.body().contains("أمراض القلب"));
        assert!(!report.result.body().contains("disease"));
    }

    #[tokio::test]
    async fn test_paired_view_strips_header() {
        let session = session();
        session
            .translate(session.request("Chest pain. Fever and cough!"))
            .await
            .unwrap();

        let RenderedView::PairedBlock { blocks } = session.render_current(ViewMode::PairedBlock)
        else {
            panic!("expected paired blocks");
        };
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].original, "Chest pain");
        assert_eq!(blocks[0].translated, "ألم صدر");
        assert!(blocks.iter().all(|b| !b.translated.contains(ARABIC_HEADER)));
    }

    #[tokio::test]
    async fn test_word_grid_pads_shorter_side() {
        let session = session();
        session
            .translate(session.request("severe hypertension"))
            .await
            .unwrap();

        let RenderedView::WordGrid { rows } = session.render_current(ViewMode::WordGrid) else {
            panic!("expected a word grid");
        };
        // "severe hypertension" -> "severe ارتفاع ضغط الدم": two words against four.
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].original, "severe");
        assert_eq!(rows[0].translated, "severe");
        assert_eq!(rows[1].original, "hypertension");
        assert_eq!(rows[1].translated, "ارتفاع");
        assert_eq!(rows[2].original, "");
        assert_eq!(rows[3].translated, "الدم");
    }

    #[tokio::test]
    async fn test_paragraph_is_whole_body() {
        let session = session();
        session.translate(session.request("fever. cough.")).await.unwrap();
        assert_eq!(
            session.render_current(ViewMode::Paragraph),
            RenderedView::Paragraph {
                text: "حمى. سعال.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_arabic_target_has_no_header() {
        let session = session();
        let request = TranslationRequest::new(
            "fever",
            LanguageTag::parse("en").unwrap(),
            LanguageTag::parse("fr").unwrap(),
        );
        let report = session.translate(request).await.unwrap();
        assert_eq!(report.result.translated_text, "حمى");
    }

    #[tokio::test]
    async fn test_supplement_terms_are_used() {
        let extra = parse_supplement(
            r#"{ "@metadata": { "source": "ward notes" }, "symptoms": { "night sweats": "تعرق ليلي" } }"#,
        )
        .unwrap();
        let glossary = Glossary::builtin().merged_with(extra).unwrap();
        let session = session_with(glossary);

        let report = session
            .translate(session.request("Night sweats and fever"))
            .await
            .unwrap();
        assert_eq!(report.result.body(), "تعرق ليلي and حمى");
    }

    #[tokio::test]
    async fn test_ledger_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let open = || {
            let translator =
                GlossaryTranslator::new(Arc::new(Glossary::builtin()), Arc::new(NoDelay)).unwrap();
            Session::open(
                Arc::new(translator),
                Arc::new(SystemClock),
                Arc::new(FileStore::new(dir.path())),
            )
            .unwrap()
        };

        let first = open();
        first.translate(first.request("fever and cough")).await.unwrap();
        first.save_favorite().unwrap();

        let second = open();
        let history = second.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].full_original, "fever and cough");
        assert_eq!(second.favorites().len(), 1);
        assert_eq!(second.stats().total_words_translated, 3);
        assert!(dir.path().join("translationHistory.json").exists());
    }

    #[tokio::test]
    async fn test_search_in_translation() {
        let session = session();
        let report = session
            .translate(session.request("fever, then more fever"))
            .await
            .unwrap();

        let spans = highlight(report.result.body(), "حمى");
        assert_eq!(spans.iter().filter(|s| s.highlighted).count(), 2);
    }

    #[tokio::test]
    async fn test_input_starting_with_header_words_keeps_them() {
        let session = session();
        let report = session
            .translate(session.request(format!("{} fever", ARABIC_HEADER)))
            .await
            .unwrap();

        assert!(report.result.header_added);
        assert_eq!(report.result.body(), format!("{} حمى", ARABIC_HEADER));
        assert_eq!(
            session.render_current(ViewMode::Paragraph),
            RenderedView::Paragraph {
                text: "[الترجمة العربية] حمى".to_string()
            }
        );

        let RenderedView::WordGrid { rows } = session.render_current(ViewMode::WordGrid) else {
            panic!("expected a word grid");
        };
        let pairs: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.original.as_str(), r.translated.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("[الترجمة", "[الترجمة"),
                ("العربية]", "العربية]"),
                ("fever", "حمى")
            ]
        );
    }

    #[tokio::test]
    async fn test_reloaded_history_strips_only_added_header() {
        let session = session();
        let report = session
            .translate(session.request(format!("{} fever", ARABIC_HEADER)))
            .await
            .unwrap();
        session.translate(session.request("cough")).await.unwrap();

        session.load_history(report.record_id.unwrap()).unwrap();
        assert_eq!(
            session.current().unwrap().body(),
            format!("{} حمى", ARABIC_HEADER)
        );
    }
}
