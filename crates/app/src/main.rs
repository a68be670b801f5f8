use std::fmt;
use std::io::{BufRead, Write as _};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use diktant_core::model::{
    CategoryId, LetterId, SetupSelection, TrainingMode, WordSource,
};
use services::audio::{PlaybackCoordinator, RodioSink, SpeechSynthesizer};
use services::sessions::{CurrentWordView, SessionReport, TrainingLoopService};
use services::setup_service::SetupService;
use services::Clock;
use storage::repository::Storage;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidMode { raw: String },
    InvalidIdList { flag: &'static str, raw: String },
    InvalidDelay { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidMode { raw } => {
                write!(f, "invalid --mode value (ru_only, ru_to_en, en_to_ru): {raw}")
            }
            ArgsError::InvalidIdList { flag, raw } => {
                write!(f, "invalid {flag} value (expected comma-separated ids): {raw}")
            }
            ArgsError::InvalidDelay { raw } => write!(f, "invalid --delay-ms value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_id_list(flag: &'static str, raw: &str) -> Result<Vec<u64>, ArgsError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>().map_err(|_| ArgsError::InvalidIdList {
                flag,
                raw: raw.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Train,
    Categories,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "train" => Some(Self::Train),
            "categories" => Some(Self::Categories),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    mode: TrainingMode,
    categories: Vec<CategoryId>,
    letters: Vec<LetterId>,
    manual: Option<PathBuf>,
    audio: bool,
    shuffle: bool,
    delay: Duration,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- train      [options]");
    eprintln!("  cargo run -p app -- categories [--db <sqlite_url>] [--mode <mode>]");
    eprintln!();
    eprintln!("Options for train:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite://dev.sqlite3)");
    eprintln!("  --mode <mode>             ru_only | ru_to_en | en_to_ru (default: ru_only)");
    eprintln!("  --categories <ids>        Comma-separated category ids");
    eprintln!("  --letters <ids>           Comma-separated letter ids (ru_only)");
    eprintln!("  --manual <file>           Word list file instead of the catalog");
    eprintln!("  --shuffle                 Shuffle the word list at session start");
    eprintln!("  --no-audio                Skip speech synthesis and playback");
    eprintln!("  --delay-ms <n>            Pause after each answer (default: 1500)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DIKTANT_DB_URL, DIKTANT_TTS_URL, DIKTANT_AUDIO_CACHE, DIKTANT_ADVANCE_DELAY_MS");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("DIKTANT_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://dev.sqlite3".into(), normalize_sqlite_url);
        let mut mode = TrainingMode::RuOnly;
        let mut categories = Vec::new();
        let mut letters = Vec::new();
        let mut manual = None;
        let mut audio = true;
        let mut shuffle = false;
        let mut delay = std::env::var("DIKTANT_ADVANCE_DELAY_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map_or(Duration::from_millis(1500), Duration::from_millis);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--mode" => {
                    let value = require_value(args, "--mode")?;
                    mode = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidMode { raw: value.clone() })?;
                }
                "--categories" => {
                    let value = require_value(args, "--categories")?;
                    categories = parse_id_list("--categories", &value)?
                        .into_iter()
                        .map(CategoryId::new)
                        .collect();
                }
                "--letters" => {
                    let value = require_value(args, "--letters")?;
                    letters = parse_id_list("--letters", &value)?
                        .into_iter()
                        .map(LetterId::new)
                        .collect();
                }
                "--manual" => {
                    let value = require_value(args, "--manual")?;
                    manual = Some(PathBuf::from(value));
                }
                "--shuffle" => shuffle = true,
                "--no-audio" => audio = false,
                "--delay-ms" => {
                    let value = require_value(args, "--delay-ms")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDelay { raw: value.clone() })?;
                    delay = Duration::from_millis(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            mode,
            categories,
            letters,
            manual,
            audio,
            shuffle,
            delay,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn read_line(prompt: &str) -> Result<Option<String>, std::io::Error> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

async fn build_selection(
    args: &Args,
    setup: &SetupService,
) -> Result<SetupSelection, Box<dyn std::error::Error>> {
    let mut selection = SetupSelection::new();
    selection.set_mode(args.mode);

    if let Some(path) = &args.manual {
        selection.set_source(WordSource::Manual);
        selection.set_manual_text(std::fs::read_to_string(path)?);
        return Ok(selection);
    }

    let available = setup.categories_for_mode(args.mode).await?;
    for id in &args.categories {
        match available.iter().find(|c| c.id == *id) {
            Some(category) => {
                selection.select_category(category.clone());
            }
            None => {
                return Err(format!("category {id} not found for mode {}", args.mode.as_str()).into());
            }
        }
    }
    for letter in &args.letters {
        selection.select_letter(*letter);
    }

    Ok(selection)
}

async fn list_categories(
    args: &Args,
    setup: &SetupService,
) -> Result<(), Box<dyn std::error::Error>> {
    let categories = setup.categories_for_mode(args.mode).await?;
    println!("Категории ({}):", args.mode.as_str());
    for category in &categories {
        match &category.description {
            Some(description) => println!("  {}  {} — {}", category.id, category.name, description),
            None => println!("  {}  {}", category.id, category.name),
        }
    }

    if args.mode == TrainingMode::RuOnly {
        let ids: Vec<_> = categories.iter().map(|c| c.id).collect();
        let letters = setup.letters(&ids).await?;
        println!("Буквы:");
        for letter in letters {
            println!("  {}  {} ({})", letter.id, letter.letter, letter.count);
        }
    }

    Ok(())
}

async fn run_training(args: &Args, storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
    let setup = SetupService::from_storage(storage);
    let selection = build_selection(args, &setup).await?;

    let service = TrainingLoopService::new(Clock::default_clock(), storage.words.clone())
        .with_shuffle(args.shuffle);
    let mut session = service.start(&selection).await?;

    let playback = args.audio.then(|| {
        PlaybackCoordinator::new(SpeechSynthesizer::from_env(), Arc::new(RodioSink::new()))
    });

    loop {
        while !session.is_complete() {
            let view = CurrentWordView::from_session(&session)?;
            println!();
            println!("Слово {} из {}", view.current_index + 1, view.total_words);

            let (Some(word), Some(lang)) = (view.speak_word.as_deref(), view.speak_lang) else {
                break;
            };
            if session.mode() == TrainingMode::RuOnly {
                println!("(слушай внимательно)");
            } else {
                println!("Переведи: {word}");
            }

            if let Some(playback) = &playback {
                // Audio problems should not end the dictation.
                if let Err(err) = playback.speak(word, lang).await {
                    eprintln!("не удалось озвучить слово: {err}");
                }
            }

            let Some(answer) = read_line("Твой ответ: ")? else {
                println!();
                return Ok(());
            };
            if answer.trim().is_empty() {
                println!("Введи ответ.");
                continue;
            }

            let feedback = service.answer_current(&mut session, &answer)?;
            if feedback.is_correct {
                println!("Правильно!");
            } else {
                println!("Неправильно. Верный ответ: {}", feedback.correct_word);
            }
            println!(
                "Счёт: {} из {} ({:.0}%)",
                feedback.stats.correct_attempts,
                feedback.stats.total_attempts,
                feedback.stats.percentage
            );

            tokio::time::sleep(args.delay).await;
        }

        let report = SessionReport::from_session(&session)?;
        println!();
        println!("─── Результаты ───");
        println!("Оценка: {}", report.grade);
        println!(
            "Всего слов: {}, верно: {}, ошибок: {} ({:.0}%)",
            report.total_words, report.correct_count, report.errors_count, report.percentage
        );
        let incorrect = report.incorrect();
        if !incorrect.is_empty() {
            println!("Ошибки:");
            for record in incorrect {
                println!(
                    "  {} → {} (верно: {})",
                    record.heard_word, record.user_answer, record.correct_word
                );
            }
        }

        let Some(again) = read_line("Повторить диктант? (y/n): ")? else {
            return Ok(());
        };
        if !matches!(again.trim(), "y" | "Y" | "д" | "Д") {
            return Ok(());
        }
        service.restart(&mut session);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: start training when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Train,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Train,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;
    tracing::info!(db = %args.db_url, "storage ready");

    match cmd {
        Command::Train => run_training(&args, &storage).await,
        Command::Categories => {
            let setup = SetupService::from_storage(&storage);
            list_categories(&args, &setup).await
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
