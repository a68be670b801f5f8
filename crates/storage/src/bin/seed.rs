use std::fmt;

use diktant_core::model::{Category, CategoryId, CategoryKind, LetterId, WordId};
use storage::repository::{LetterRecord, Storage, WordRecord};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("DIKTANT_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  DIKTANT_DB_URL");
}

const ALPHABET: &str = "АБВГДЕЖЗИКЛМНОПРСТУФХЦЧШЩЭЮЯ";

const CLASS_WORDS: &[&str] = &[
    "арбуз", "аист", "берёза", "воробей", "вокзал", "город", "дорога", "заяц", "карандаш",
    "корова", "молоко", "мороз", "пенал", "собака", "сорока", "тетрадь", "ученик", "язык",
];

const LESSON_PAIRS: &[(&str, &str)] = &[
    ("вокзал", "station"),
    ("город", "city"),
    ("дорога", "road"),
    ("карандаш", "pencil"),
    ("молоко", "milk"),
    ("собака", "dog"),
    ("тетрадь", "notebook"),
    ("ученик", "pupil"),
];

fn letter_id_for(word: &str) -> Option<LetterId> {
    let first = word.chars().next()?.to_uppercase().next()?;
    let pos = ALPHABET.chars().position(|c| c == first)?;
    Some(LetterId::new(pos as u64 + 1))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;

    for (i, ch) in ALPHABET.chars().enumerate() {
        let order = u32::try_from(i + 1)?;
        storage
            .letters
            .upsert_letter(&LetterRecord {
                id: LetterId::new(u64::from(order)),
                letter: ch.to_string(),
                sort_order: order,
            })
            .await?;
    }

    let dictionary = Category {
        id: CategoryId::new(1),
        name: "Словарные слова, 2 класс".to_owned(),
        description: Some("Базовый словарный минимум".to_owned()),
        kind: CategoryKind::DictionaryClass,
    };
    let lesson = Category {
        id: CategoryId::new(2),
        name: "Урок 1. Школа".to_owned(),
        description: None,
        kind: CategoryKind::Lesson,
    };
    storage.categories.upsert_category(&dictionary).await?;
    storage.categories.upsert_category(&lesson).await?;

    let mut next_id: u64 = 1;
    for word in CLASS_WORDS {
        storage
            .words
            .insert_word(&WordRecord {
                id: WordId::new(next_id),
                russian: (*word).to_owned(),
                english: None,
                category_id: dictionary.id,
                letter_id: letter_id_for(word),
                difficulty: 1,
            })
            .await?;
        next_id += 1;
    }
    for (russian, english) in LESSON_PAIRS {
        storage
            .words
            .insert_word(&WordRecord {
                id: WordId::new(next_id),
                russian: (*russian).to_owned(),
                english: Some((*english).to_owned()),
                category_id: lesson.id,
                letter_id: None,
                difficulty: 1,
            })
            .await?;
        next_id += 1;
    }

    println!(
        "Seeded {} words across 2 categories into {}",
        next_id - 1,
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
