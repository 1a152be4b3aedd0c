//! Session orchestration
//!
//! A `Session` ties the translator, the clock and the ledger store together. It owns
//! the current translation and the in-memory ledger, and is the only thing that
//! mutates them.
//!
//! Every ledger change is made on a staged copy, persisted, and swapped in only after
//! the store accepted it. Translations are single-flight: while one is awaiting the
//! translator, another request is rejected with [`AppError::Busy`]. The commit runs
//! after the last await, so a request that is dropped mid-flight records nothing.
//!
//! What is on display (the current result and its titled document sections) is
//! kept on an undo stack each time it is replaced.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::{
    Clock, LanguageTag, RenderedView, TermTranslator, Translation, TranslationRequest,
    TranslationResult, ViewMode, render,
};
use crate::error::{AppError, AppResult, Notification, StorageError};
use crate::host::{
    ExportFormat, ExportSink, FileSource, IngestStatus, IngestedFile, SpeechOutput, TextExtractor,
    Utterance,
};
use crate::ledger::{
    FavoriteRecord, HistoryRecord, KeyValueStore, LedgerState, Section, StatsCounters,
};

/// Title of the section holding the typed text
pub const MAIN_TEXT_TITLE: &str = "النص الرئيسي";

/// How many replaced displays `undo` can walk back through
pub const UNDO_DEPTH: usize = 20;

/// Outcome of a successful translation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationReport {
    pub result: TranslationResult,
    /// The result laid out in the request's view mode
    pub view: RenderedView,
    /// Id of the history record, `None` when it could not be persisted
    pub record_id: Option<u64>,
    pub notifications: Vec<Notification>,
}

/// One translated document: the typed text or an uploaded file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSection {
    /// `MAIN_TEXT_TITLE` or the file name
    pub title: String,
    pub result: TranslationResult,
}

/// A document section laid out for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub title: String,
    pub view: RenderedView,
}

/// Outcome of translating the typed text and every file separately
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentsReport {
    pub sections: Vec<DocumentSection>,
    pub views: Vec<SectionView>,
    /// History ids, one per section; empty when nothing could be persisted
    pub record_ids: Vec<u64>,
    pub notifications: Vec<Notification>,
}

/// Outcome of ingesting a batch of files
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    pub files: Vec<IngestedFile>,
    pub notifications: Vec<Notification>,
}

impl IngestReport {
    /// Text of every file that was read, in submission order
    pub fn contents(&self) -> impl Iterator<Item = &str> {
        self.files.iter().filter_map(|f| f.content())
    }
}

/// What is on display
#[derive(Debug, Clone, Default)]
struct Shown {
    current: Option<TranslationResult>,
    documents: Vec<DocumentSection>,
}

impl Shown {
    fn single(result: TranslationResult) -> Self {
        Self {
            documents: vec![DocumentSection {
                title: MAIN_TEXT_TITLE.to_string(),
                result: result.clone(),
            }],
            current: Some(result),
        }
    }
}

struct SessionState {
    ledger: LedgerState,
    shown: Shown,
    undo: Vec<Shown>,
    /// Elapsed minutes carried over from earlier runs
    base_elapsed: u64,
    started_at: DateTime<Local>,
}

impl SessionState {
    fn elapsed_minutes(&self, now: DateTime<Local>) -> u64 {
        let minutes = (now - self.started_at).num_minutes().max(0) as u64;
        self.base_elapsed + minutes
    }

    /// Replace what is on display, keeping the previous display for `undo`
    fn show(&mut self, shown: Shown) {
        let previous = std::mem::replace(&mut self.shown, shown);
        if previous.current.is_some() {
            if self.undo.len() == UNDO_DEPTH {
                self.undo.remove(0);
            }
            self.undo.push(previous);
        }
    }
}

pub struct Session {
    translator: Arc<dyn TermTranslator>,
    clock: Arc<dyn Clock>,
    store: Arc<dyn KeyValueStore>,
    source_language: LanguageTag,
    target_language: LanguageTag,
    in_flight: tokio::sync::Mutex<()>,
    state: Mutex<SessionState>,
}

impl Session {
    /// Open a session over `store`, loading whatever ledger it holds
    ///
    /// # Errors
    ///
    /// `AppError::Storage` when the store cannot be read at all. Unreadable values
    /// are not an error; they load as defaults.
    pub fn open(
        translator: Arc<dyn TermTranslator>,
        clock: Arc<dyn Clock>,
        store: Arc<dyn KeyValueStore>,
    ) -> AppResult<Self> {
        let now = clock.now();
        let mut ledger = LedgerState::load(store.as_ref(), now.date_naive())?;
        ledger.stats.roll_over(now.date_naive());
        let base_elapsed = ledger.stats.total_elapsed_minutes;

        tracing::debug!(
            provider = translator.provider_name(),
            history = ledger.history.len(),
            favorites = ledger.favorites.len(),
            "session opened"
        );

        Ok(Self {
            translator,
            clock,
            store,
            source_language: LanguageTag::parse("en")?,
            target_language: LanguageTag::parse("ar")?,
            in_flight: tokio::sync::Mutex::new(()),
            state: Mutex::new(SessionState {
                ledger,
                shown: Shown::default(),
                undo: Vec::new(),
                base_elapsed,
                started_at: now,
            }),
        })
    }

    /// Default languages for requests built by the session and for reloaded history
    pub fn with_languages(mut self, source: LanguageTag, target: LanguageTag) -> Self {
        self.source_language = source;
        self.target_language = target;
        self
    }

    /// A request for `text` in the session's languages
    pub fn request(&self, text: impl Into<String>) -> TranslationRequest {
        TranslationRequest::new(
            text,
            self.source_language.clone(),
            self.target_language.clone(),
        )
    }

    /// Translate `request` and record it
    ///
    /// # Errors
    ///
    /// - `AppError::UserInput` for blank text; the translator is not called
    /// - `AppError::Busy` while another translation is in flight
    /// - `AppError::Translation` when the translator fails
    ///
    /// A storage failure is not an error: the translation is returned with a warning
    /// and the ledger is left untouched.
    pub async fn translate(&self, request: TranslationRequest) -> AppResult<TranslationReport> {
        let text = request.text();
        if text.is_empty() {
            return Err(AppError::UserInput("الرجاء إدخال نص أو رفع ملف".to_string()));
        }

        let _slot = self.in_flight.try_lock().map_err(|_| AppError::Busy)?;

        tracing::info!(
            provider = self.translator.provider_name(),
            source = %request.source_language,
            target = %request.target_language,
            chars = text.chars().count(),
            "translating"
        );

        let translation = match self
            .translator
            .translate(
                text,
                request.source_language.as_str(),
                request.target_language.as_str(),
            )
            .await
        {
            Ok(translation) => translation,
            Err(e) => {
                tracing::error!(error = %e, "translation failed");
                return Err(e.into());
            }
        };

        // No awaits past this point.
        let now = self.clock.now();
        let result = build_result(&request, text, translation, now);

        let mut notifications = vec![Notification::success("تمت الترجمة بنجاح!")];
        let committed = self.commit(&[Section::History, Section::Stats], |ledger, elapsed| {
            record_result(ledger, &result, now, elapsed)
        });

        let record_id = match committed {
            Ok(id) => Some(id),
            Err(e) => {
                notifications.push(Notification::from(&AppError::Storage(e)));
                None
            }
        };

        self.lock_state().show(Shown::single(result.clone()));
        tracing::info!(words = result.word_count, record = ?record_id, "translation recorded");

        Ok(TranslationReport {
            view: render(&result, request.view_mode),
            result,
            record_id,
            notifications,
        })
    }

    /// Translate the typed text and every ingested file as separate documents
    ///
    /// Each document becomes its own titled section (`MAIN_TEXT_TITLE` for the typed
    /// text, the file name for a file) and its own history record. Failed or blank
    /// files are skipped. Either every section is translated and recorded, or none is.
    ///
    /// # Errors
    ///
    /// Same as [`Session::translate`]; `AppError::UserInput` when neither the text nor
    /// any file has content.
    pub async fn translate_documents(
        &self,
        request: TranslationRequest,
        files: &[IngestedFile],
    ) -> AppResult<DocumentsReport> {
        let mut sources: Vec<(String, &str)> = Vec::new();
        if !request.text().is_empty() {
            sources.push((MAIN_TEXT_TITLE.to_string(), request.text()));
        }
        for file in files {
            if let Some(content) = file.content().map(str::trim).filter(|c| !c.is_empty()) {
                sources.push((file.name.clone(), content));
            }
        }
        if sources.is_empty() {
            return Err(AppError::UserInput("الرجاء إدخال نص أو رفع ملف".to_string()));
        }

        let _slot = self.in_flight.try_lock().map_err(|_| AppError::Busy)?;
        tracing::info!(
            provider = self.translator.provider_name(),
            sections = sources.len(),
            "translating documents"
        );

        let mut translations = Vec::with_capacity(sources.len());
        for (title, text) in &sources {
            let translation = self
                .translator
                .translate(
                    text,
                    request.source_language.as_str(),
                    request.target_language.as_str(),
                )
                .await
                .map_err(|e| {
                    tracing::error!(section = %title, error = %e, "translation failed");
                    AppError::from(e)
                })?;
            translations.push(translation);
        }

        // No awaits past this point.
        let now = self.clock.now();
        let sections: Vec<DocumentSection> = sources
            .into_iter()
            .zip(translations)
            .map(|((title, text), translation)| DocumentSection {
                title,
                result: build_result(&request, text, translation, now),
            })
            .collect();

        let mut notifications = vec![Notification::success("تمت الترجمة العلمية بنجاح")];
        let committed = self.commit(&[Section::History, Section::Stats], |ledger, elapsed| {
            sections
                .iter()
                .map(|section| record_result(ledger, &section.result, now, elapsed))
                .collect::<Vec<_>>()
        });
        let record_ids = committed.unwrap_or_else(|e| {
            notifications.push(Notification::from(&AppError::Storage(e)));
            Vec::new()
        });

        let views = section_views(&sections, request.view_mode);
        self.lock_state().show(Shown {
            current: sections.first().map(|s| s.result.clone()),
            documents: sections.clone(),
        });
        tracing::info!(sections = sections.len(), "documents recorded");

        Ok(DocumentsReport {
            sections,
            views,
            record_ids,
            notifications,
        })
    }

    /// Restore what was on display before the last translation or reload
    ///
    /// Ledger and counters are not touched. With nothing to go back to, the display
    /// stays as it is and a warning is returned.
    pub fn undo(&self) -> Notification {
        let mut state = self.lock_state();
        match state.undo.pop() {
            Some(previous) => {
                state.shown = previous;
                Notification::success("تم التراجع")
            }
            None => Notification::warning("لا يوجد شيء للتراجع عنه"),
        }
    }

    /// The translation currently on display
    pub fn current(&self) -> Option<TranslationResult> {
        self.lock_state().shown.current.clone()
    }

    /// Re-render the current translation without translating again
    pub fn render_current(&self, mode: ViewMode) -> RenderedView {
        match &self.lock_state().shown.current {
            Some(result) => render(result, mode),
            None => RenderedView::Empty,
        }
    }

    /// Re-render every document section on display, in order
    pub fn render_documents(&self, mode: ViewMode) -> Vec<SectionView> {
        section_views(&self.lock_state().shown.documents, mode)
    }

    /// Make history record `id` the current translation
    pub fn load_history(&self, id: u64) -> AppResult<Notification> {
        let mut state = self.lock_state();
        let record = state
            .ledger
            .history
            .get(id)
            .ok_or_else(|| AppError::UserInput(format!("لا يوجد سجل بالمعرف {}", id)))?;

        let result = TranslationResult {
            original_text: record.full_original.clone(),
            translated_text: record.full_translated.clone(),
            header_added: record.header_added,
            word_count: crate::word_count(&record.full_original),
            timestamp: record.created_at,
            source_language: self.source_language.clone(),
            target_language: self.target_language.clone(),
        };
        state.show(Shown::single(result));
        Ok(Notification::success("تم تحميل الترجمة من السجل"))
    }

    /// Newest first
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.lock_state().ledger.history.list().cloned().collect()
    }

    pub fn remove_history(&self, id: u64) -> AppResult<Notification> {
        let removed = self.commit(&[Section::History], |ledger, _| ledger.history.remove(id))?;
        Ok(if removed {
            Notification::success("تم حذف العنصر")
        } else {
            Notification::info(format!("لا يوجد سجل بالمعرف {}", id))
        })
    }

    pub fn clear_history(&self) -> AppResult<Notification> {
        self.commit(&[Section::History], |ledger, _| ledger.history.clear())?;
        Ok(Notification::success("تم مسح السجل"))
    }

    /// Keep the current translation as a favorite
    pub fn save_favorite(&self) -> AppResult<(FavoriteRecord, Notification)> {
        let current = self
            .current()
            .ok_or_else(|| AppError::UserInput("لا يوجد نص للحفظ".to_string()))?;
        let now = self.clock.now();

        let record = self.commit(&[Section::Favorites], |ledger, _| {
            let record = FavoriteRecord {
                id: ledger.next_id(now),
                original: current.original_text.clone(),
                translated: current.translated_text.clone(),
                created_at: now,
            };
            ledger.favorites.add(record.clone());
            record
        })?;
        Ok((record, Notification::success("تم الحفظ في المفضلة")))
    }

    pub fn remove_favorite(&self, id: u64) -> AppResult<Notification> {
        let removed = self.commit(&[Section::Favorites], |ledger, _| ledger.favorites.remove(id))?;
        Ok(if removed {
            Notification::success("تم الحذف")
        } else {
            Notification::info(format!("لا توجد مفضلة بالمعرف {}", id))
        })
    }

    /// Newest first
    pub fn favorites(&self) -> Vec<FavoriteRecord> {
        self.lock_state().ledger.favorites.list().cloned().collect()
    }

    /// Counters as of now, with the daily rollover and elapsed time applied
    pub fn stats(&self) -> StatsCounters {
        let now = self.clock.now();
        let state = self.lock_state();
        let mut stats = state.ledger.stats.clone();
        stats.roll_over(now.date_naive());
        stats.set_elapsed(state.elapsed_minutes(now));
        stats
    }

    /// Extract text from every file in `files`
    ///
    /// Files are handled independently: one that fails is marked as failed and the
    /// rest still go through. Every submitted file counts as processed.
    pub async fn ingest(&self, files: &[FileSource], extractor: &dyn TextExtractor) -> IngestReport {
        let mut ingested = Vec::with_capacity(files.len());
        let mut notifications = Vec::new();

        for file in files {
            match extractor.extract(file).await {
                Ok(text) => {
                    tracing::debug!(file = %file.name, chars = text.chars().count(), "file ingested");
                    notifications.push(Notification::success(format!("تم رفع الملف: {}", file.name)));
                    ingested.push(IngestedFile {
                        name: file.name.clone(),
                        status: IngestStatus::Ready(text),
                    });
                }
                Err(e) => {
                    tracing::warn!(file = %e.file_name, reason = %e.reason, "file ingestion failed");
                    notifications.push(Notification::from(&AppError::Ingestion(e.clone())));
                    ingested.push(IngestedFile {
                        name: file.name.clone(),
                        status: IngestStatus::Failed(e.reason),
                    });
                }
            }
        }

        if !files.is_empty() {
            let counted = self.commit(&[Section::Stats], |ledger, elapsed| {
                ledger.stats.add_files(files.len());
                ledger.stats.set_elapsed(elapsed);
            });
            if let Err(e) = counted {
                notifications.push(Notification::from(&AppError::Storage(e)));
            }
        }

        IngestReport {
            files: ingested,
            notifications,
        }
    }

    /// Export the current translation through `sink`
    pub fn export(
        &self,
        format: ExportFormat,
        sink: &dyn ExportSink,
    ) -> AppResult<(PathBuf, Notification)> {
        let current = self
            .current()
            .ok_or_else(|| AppError::UserInput("لا يوجد نص للتصدير".to_string()))?;
        let timestamp = self.clock.now().timestamp_millis();
        let path = sink.export(format, &current.translated_text, timestamp)?;
        Ok((path, Notification::success(format.success_message())))
    }

    /// Hand the current translation to a speech engine
    pub async fn speak(&self, output: &dyn SpeechOutput) -> AppResult<Notification> {
        let current = self
            .current()
            .ok_or_else(|| AppError::UserInput("لا يوجد نص للنطق".to_string()))?;
        let utterance = Utterance::for_language(current.body(), &current.target_language);
        output.speak(&utterance).await?;
        Ok(Notification::info("جاري النطق"))
    }

    /// Apply `change` to a staged copy of the ledger, persist `sections`, then swap in
    fn commit<T>(
        &self,
        sections: &[Section],
        change: impl FnOnce(&mut LedgerState, u64) -> T,
    ) -> Result<T, StorageError> {
        let now = self.clock.now();
        let mut state = self.lock_state();

        let mut staged = state.ledger.clone();
        staged.stats.roll_over(now.date_naive());
        let out = change(&mut staged, state.elapsed_minutes(now));

        staged.save(self.store.as_ref(), sections)?;
        state.ledger = staged;
        Ok(out)
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn build_result(
    request: &TranslationRequest,
    text: &str,
    translation: Translation,
    now: DateTime<Local>,
) -> TranslationResult {
    TranslationResult {
        original_text: text.to_string(),
        translated_text: translation.text,
        header_added: translation.header_added,
        word_count: crate::word_count(text),
        timestamp: now,
        source_language: request.source_language.clone(),
        target_language: request.target_language.clone(),
    }
}

/// History record, words and daily count for one result; returns the record id
fn record_result(
    ledger: &mut LedgerState,
    result: &TranslationResult,
    now: DateTime<Local>,
    elapsed: u64,
) -> u64 {
    let id = ledger.next_id(now);
    ledger.history.record(result, id, now);
    ledger.stats.add_words(result.word_count);
    ledger.stats.record_translation(now.date_naive());
    ledger.stats.set_elapsed(elapsed);
    id
}

fn section_views(sections: &[DocumentSection], mode: ViewMode) -> Vec<SectionView> {
    sections
        .iter()
        .map(|section| SectionView {
            title: section.title.clone(),
            view: render(&section.result, mode),
        })
        .collect()
}
