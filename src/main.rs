use clap::{Arg, ArgAction, ArgMatches, Command};
use medgloss::engine::{
    Delay, FixedDelay, GlossaryTranslator, LanguageTag, NoDelay, SystemClock,
    TranslationRequest, ViewMode, highlight,
};
use medgloss::error::{AppError, AppResult, Notification, NotificationLevel};
use medgloss::glossary::{Glossary, load_supplement};
use medgloss::host::{
    ExportFormat, FileExportSink, FileSource, FsExtractor, IngestedFile, TracingSpeech,
};
use medgloss::ledger::{FileStore, to_json};
use medgloss::{Config, DocumentsReport, Session, TranslationReport};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Serialize)]
struct JsonOutput<'a, R: Serialize> {
    report: &'a R,
    files: &'a [IngestedFile],
}

fn cli() -> Command {
    let view = Arg::new("view")
        .long("view")
        .help("Layout: paired, paragraph or grid")
        .value_parser(["paired", "paragraph", "grid"])
        .default_value("paired");

    Command::new("medgloss")
        .version("0.1.0")
        .about("Medical English to Arabic glossary translation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("JSON configuration file")
                .global(true),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Directory for history, favorites and counters")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("translate")
                .about("Translate text and/or files")
                .arg(Arg::new("text").help("Text to translate").index(1))
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .help("File to include (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("separate")
                        .long("separate")
                        .help("Translate the text and each file as separate sections")
                        .action(ArgAction::SetTrue),
                )
                .arg(view.clone())
                .arg(Arg::new("source").long("source").short('s').help("Source language tag"))
                .arg(Arg::new("target").long("target").short('t').help("Target language tag"))
                .arg(
                    Arg::new("no-delay")
                        .long("no-delay")
                        .help("Skip the simulated latency")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the report and view as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("export")
                        .long("export")
                        .help("Export the translation")
                        .value_parser(["txt", "pdf", "docx", "xlsx"]),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Export directory")
                        .default_value("."),
                )
                .arg(
                    Arg::new("find")
                        .long("find")
                        .help("Highlight a term in the translation"),
                )
                .arg(
                    Arg::new("speak")
                        .long("speak")
                        .help("Hand the translation to the speech engine")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Past translations")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List records, newest first"))
                .subcommand(
                    Command::new("show")
                        .about("Render a record")
                        .arg(id_arg())
                        .arg(view),
                )
                .subcommand(Command::new("remove").about("Delete a record").arg(id_arg()))
                .subcommand(Command::new("clear").about("Delete every record")),
        )
        .subcommand(
            Command::new("favorites")
                .about("Saved translations")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List favorites"))
                .subcommand(
                    Command::new("add")
                        .about("Save a history record as a favorite")
                        .arg(id_arg()),
                )
                .subcommand(Command::new("remove").about("Delete a favorite").arg(id_arg())),
        )
        .subcommand(Command::new("stats").about("Usage counters"))
        .subcommand(
            Command::new("dictionary")
                .about("Browse or search the glossary")
                .arg(Arg::new("query").help("Search term").index(1)),
        )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .help("Record id")
        .required(true)
        .index(1)
        .value_parser(clap::value_parser!(u64))
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_notification(&Notification::from(&e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(matches: &ArgMatches) -> AppResult<()> {
    let mut config = Config::load(matches.get_one::<String>("config").map(Path::new))?;
    if let Some(dir) = matches.get_one::<String>("data-dir") {
        config.data_dir = PathBuf::from(dir);
    }
    tracing::debug!(?config, "configuration resolved");

    let glossary = load_glossary(&config)?;

    match matches.subcommand() {
        Some(("translate", sub)) => translate(sub, &config, glossary).await,
        Some(("history", sub)) => history(sub, &config, glossary),
        Some(("favorites", sub)) => favorites(sub, &config, glossary),
        Some(("stats", _)) => stats(&config, glossary),
        Some(("dictionary", sub)) => {
            dictionary(&glossary, sub.get_one::<String>("query").map(String::as_str));
            Ok(())
        }
        _ => Ok(()),
    }
}

fn load_glossary(config: &Config) -> AppResult<Arc<Glossary>> {
    let builtin = Glossary::builtin();
    let glossary = match &config.glossary_path {
        Some(path) => {
            let extra = load_supplement(path)?;
            tracing::info!(path = %path.display(), entries = extra.len(), "glossary supplement loaded");
            builtin.merged_with(extra)?
        }
        None => builtin,
    };
    Ok(Arc::new(glossary))
}

fn open_session(config: &Config, glossary: Arc<Glossary>, delay: Arc<dyn Delay>) -> AppResult<Session> {
    let (source, target) = config.languages()?;
    let translator = GlossaryTranslator::new(glossary, delay)?;
    let session = Session::open(
        Arc::new(translator),
        Arc::new(SystemClock),
        Arc::new(FileStore::new(&config.data_dir)),
    )?;
    Ok(session.with_languages(source, target))
}

fn view_mode(matches: &ArgMatches) -> ViewMode {
    matches
        .get_one::<String>("view")
        .and_then(|v| ViewMode::parse(v))
        .unwrap_or_default()
}

async fn translate(matches: &ArgMatches, config: &Config, glossary: Arc<Glossary>) -> AppResult<()> {
    let delay: Arc<dyn Delay> = if matches.get_flag("no-delay") {
        Arc::new(NoDelay)
    } else {
        Arc::new(FixedDelay::from_millis(config.delay_ms))
    };
    let session = open_session(config, glossary, delay)?;
    let json = matches.get_flag("json");

    let files: Vec<FileSource> = matches
        .get_many::<String>("file")
        .map(|paths| paths.map(FileSource::from_path).collect())
        .unwrap_or_default();
    let ingested = session.ingest(&files, &FsExtractor).await;
    if !json {
        ingested.notifications.iter().for_each(print_notification);
    }

    let source = match matches.get_one::<String>("source") {
        Some(tag) => LanguageTag::parse(tag)?,
        None => LanguageTag::parse(&config.source_language)?,
    };
    let target = match matches.get_one::<String>("target") {
        Some(tag) => LanguageTag::parse(tag)?,
        None => LanguageTag::parse(&config.target_language)?,
    };
    let text = matches.get_one::<String>("text").cloned().unwrap_or_default();
    let mode = view_mode(matches);
    let request = TranslationRequest::new(text, source, target).with_view_mode(mode);

    if !json {
        println!("🌍 {} → {}", request.source_language, request.target_language);
    }

    if matches.get_flag("separate") {
        let report = session.translate_documents(request, &ingested.files).await?;
        if json {
            print_json(&report, &ingested.files)?;
        } else {
            print_documents(&report);
        }
    } else {
        let request = request.with_attachments(ingested.contents());
        let report = session.translate(request).await?;
        if json {
            print_json(&report, &ingested.files)?;
        } else {
            print_translation(&report, matches.get_one::<String>("find"));
        }
    }

    if let Some(format) = matches.get_one::<String>("export") {
        let format = ExportFormat::parse(format)
            .ok_or_else(|| AppError::UserInput(format!("Unknown export format: {}", format)))?;
        let out = matches.get_one::<String>("out").map(PathBuf::from).unwrap_or_default();
        match session.export(format, &FileExportSink::new(out)) {
            Ok((path, note)) => {
                print_notification(&note);
                println!("📁 {}", path.display());
            }
            Err(e) => print_notification(&Notification::from(&e)),
        }
    }

    if matches.get_flag("speak") {
        match session.speak(&TracingSpeech).await {
            Ok(note) => print_notification(&note),
            Err(e) => print_notification(&Notification::from(&e)),
        }
    }

    Ok(())
}

fn print_json<R: Serialize>(report: &R, files: &[IngestedFile]) -> AppResult<()> {
    let output = JsonOutput { report, files };
    println!("{}", to_json(&output)?);
    Ok(())
}

fn print_translation(report: &TranslationReport, find: Option<&String>) {
    report.notifications.iter().for_each(print_notification);
    println!();
    print!("{}", report.view);
    println!();
    println!("📊 {} words", report.result.word_count);

    if let Some(query) = find {
        let spans = highlight(report.result.body(), query);
        let hits = spans.iter().filter(|s| s.highlighted).count();
        let marked: String = spans
            .iter()
            .map(|s| {
                if s.highlighted {
                    format!("«{}»", s.text)
                } else {
                    s.text.clone()
                }
            })
            .collect();
        println!("🔍 {} match(es) for \"{}\"", hits, query);
        println!("{}", marked);
    }
}

fn print_documents(report: &DocumentsReport) {
    report.notifications.iter().for_each(print_notification);
    for section in &report.views {
        println!();
        println!("📄 {}", section.title);
        print!("{}", section.view);
    }
    let words: usize = report.sections.iter().map(|s| s.result.word_count).sum();
    println!();
    println!("📊 {} words", words);
}

fn history(matches: &ArgMatches, config: &Config, glossary: Arc<Glossary>) -> AppResult<()> {
    let session = open_session(config, glossary, Arc::new(NoDelay))?;
    match matches.subcommand() {
        Some(("list", _)) => {
            let records = session.history();
            if records.is_empty() {
                println!("📭 No history");
            }
            for record in records {
                println!("🕒 {} [{}]", record.created_at.format("%Y-%m-%d %H:%M"), record.id);
                println!("   {}", record.original_preview);
                println!("   {}", record.translated_preview);
            }
        }
        Some(("show", sub)) => {
            let id = *sub.get_one::<u64>("id").unwrap();
            print_notification(&session.load_history(id)?);
            print!("{}", session.render_current(view_mode(sub)));
        }
        Some(("remove", sub)) => {
            let id = *sub.get_one::<u64>("id").unwrap();
            print_notification(&session.remove_history(id)?);
        }
        Some(("clear", _)) => print_notification(&session.clear_history()?),
        _ => {}
    }
    Ok(())
}

fn favorites(matches: &ArgMatches, config: &Config, glossary: Arc<Glossary>) -> AppResult<()> {
    let session = open_session(config, glossary, Arc::new(NoDelay))?;
    match matches.subcommand() {
        Some(("list", _)) => {
            let favorites = session.favorites();
            if favorites.is_empty() {
                println!("📭 No favorites");
            }
            for favorite in favorites {
                println!("⭐ {} [{}]", favorite.created_at.format("%Y-%m-%d %H:%M"), favorite.id);
                println!("   {}", favorite.original);
                println!("   {}", favorite.translated);
            }
        }
        Some(("add", sub)) => {
            let id = *sub.get_one::<u64>("id").unwrap();
            session.load_history(id)?;
            let (record, note) = session.save_favorite()?;
            print_notification(&note);
            println!("⭐ [{}]", record.id);
        }
        Some(("remove", sub)) => {
            let id = *sub.get_one::<u64>("id").unwrap();
            print_notification(&session.remove_favorite(id)?);
        }
        _ => {}
    }
    Ok(())
}

fn stats(config: &Config, glossary: Arc<Glossary>) -> AppResult<()> {
    let session = open_session(config, glossary, Arc::new(NoDelay))?;
    let stats = session.stats();
    println!("📊 Words translated:  {}", stats.total_words_translated);
    println!("📁 Files processed:   {}", stats.total_files_processed);
    println!("⏱️  Minutes in use:    {}", stats.total_elapsed_minutes);
    println!("📅 Translations today: {} ({})", stats.translations_today, stats.last_reset_date);
    Ok(())
}

fn dictionary(glossary: &Glossary, query: Option<&str>) {
    let groups = match query {
        Some(query) => glossary.search_grouped(query),
        None => glossary.by_category(),
    };
    if groups.is_empty() {
        println!("🔍 No matching terms");
        return;
    }
    for (category, entries) in groups {
        println!("📚 {} ({})", category.display_name(), entries.len());
        for entry in entries {
            println!("   {} → {}", entry.source_term, entry.target_term);
        }
        println!();
    }
}

fn print_notification(note: &Notification) {
    let icon = match note.level {
        NotificationLevel::Success => "✅",
        NotificationLevel::Info => "ℹ️",
        NotificationLevel::Warning => "⚠️",
        NotificationLevel::Error => "❌",
    };
    if note.level == NotificationLevel::Error || note.level == NotificationLevel::Warning {
        eprintln!("{} {}", icon, note.message);
    } else {
        println!("{} {}", icon, note.message);
    }
}
