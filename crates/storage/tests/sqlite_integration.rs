use diktant_core::model::{
    Category, CategoryId, CategoryKind, LetterId, TrainingMode, WordId,
};
use storage::repository::{
    CategoryRepository, LetterRecord, LetterRepository, WordRecord, WordRepository,
};
use storage::sqlite::SqliteRepository;

fn build_category(id: u64, name: &str, kind: CategoryKind) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_owned(),
        description: None,
        kind,
    }
}

fn build_word(
    id: u64,
    russian: &str,
    english: Option<&str>,
    category: u64,
    letter: Option<u64>,
) -> WordRecord {
    WordRecord {
        id: WordId::new(id),
        russian: russian.to_owned(),
        english: english.map(str::to_owned),
        category_id: CategoryId::new(category),
        letter_id: letter.map(LetterId::new),
        difficulty: 1,
    }
}

async fn seeded_repo(url: &str) -> SqliteRepository {
    let repo = SqliteRepository::connect(url).await.expect("connect");
    repo.migrate().await.expect("migrate");

    repo.upsert_category(&build_category(1, "Словарные слова", CategoryKind::DictionaryClass))
        .await
        .unwrap();
    repo.upsert_category(&build_category(2, "Урок 1", CategoryKind::Lesson))
        .await
        .unwrap();

    repo.upsert_letter(&LetterRecord {
        id: LetterId::new(1),
        letter: "А".to_owned(),
        sort_order: 1,
    })
    .await
    .unwrap();
    repo.upsert_letter(&LetterRecord {
        id: LetterId::new(2),
        letter: "Б".to_owned(),
        sort_order: 2,
    })
    .await
    .unwrap();

    repo.insert_word(&build_word(1, "арбуз", None, 1, Some(1)))
        .await
        .unwrap();
    repo.insert_word(&build_word(2, "аист", None, 1, Some(1)))
        .await
        .unwrap();
    repo.insert_word(&build_word(3, "берёза", None, 1, Some(2)))
        .await
        .unwrap();
    repo.insert_word(&build_word(4, "вокзал", Some("station"), 2, None))
        .await
        .unwrap();
    repo.insert_word(&build_word(5, "кот", None, 2, None))
        .await
        .unwrap();

    repo
}

#[tokio::test]
async fn sqlite_lists_categories_by_kind() {
    let repo = seeded_repo("sqlite:file:memdb_categories?mode=memory&cache=shared").await;

    let classes = repo
        .list_categories(Some(CategoryKind::DictionaryClass))
        .await
        .unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "Словарные слова");

    let all = repo.list_categories(None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn sqlite_letter_counts_follow_category_filter() {
    let repo = seeded_repo("sqlite:file:memdb_letters?mode=memory&cache=shared").await;

    let letters = repo.list_letters(&[CategoryId::new(1)]).await.unwrap();
    assert_eq!(letters.len(), 2);
    assert_eq!(letters[0].letter, "А");
    assert_eq!(letters[0].count, 2);
    assert_eq!(letters[1].letter, "Б");
    assert_eq!(letters[1].count, 1);

    // Letters keep their place with a zero count when the filter excludes
    // every word.
    let empty = repo.list_letters(&[CategoryId::new(2)]).await.unwrap();
    assert_eq!(empty.len(), 2);
    assert_eq!(empty[0].count, 0);
}

#[tokio::test]
async fn sqlite_filters_and_orders_words() {
    let repo = seeded_repo("sqlite:file:memdb_words?mode=memory&cache=shared").await;

    let words = repo
        .words_by_filters(&[CategoryId::new(1)], &[LetterId::new(1)])
        .await
        .unwrap();
    assert_eq!(words.len(), 2);
    assert_eq!(words[0].russian, "аист");
    assert_eq!(words[1].russian, "арбуз");

    let all_class = repo
        .words_by_filters(&[CategoryId::new(1)], &[])
        .await
        .unwrap();
    assert_eq!(all_class.len(), 3);
}

#[tokio::test]
async fn sqlite_counts_respect_translation_requirement() {
    let repo = seeded_repo("sqlite:file:memdb_counts?mode=memory&cache=shared").await;

    let cats = [CategoryId::new(2)];
    assert_eq!(
        repo.count_words(&cats, TrainingMode::RuOnly).await.unwrap(),
        2
    );
    assert_eq!(
        repo.count_words(&cats, TrainingMode::RuToEn).await.unwrap(),
        1
    );
    assert_eq!(
        repo.count_words(&cats, TrainingMode::EnToRu).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn sqlite_rejects_duplicate_category_names() {
    let repo = seeded_repo("sqlite:file:memdb_dup_names?mode=memory&cache=shared").await;

    let dup = build_category(3, "Словарные слова", CategoryKind::DictionaryClass);
    assert!(repo.upsert_category(&dup).await.is_err());

    // Renaming the same row is still an update, not a conflict.
    let renamed = build_category(1, "Словарные слова, 2 класс", CategoryKind::DictionaryClass);
    repo.upsert_category(&renamed).await.unwrap();

    let all = repo.list_categories(None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn sqlite_upserts_replace_existing_rows() {
    let repo = seeded_repo("sqlite:file:memdb_upsert?mode=memory&cache=shared").await;

    let mut updated = build_word(5, "кот", Some("cat"), 2, None);
    updated.difficulty = 3;
    repo.insert_word(&updated).await.unwrap();

    let words = repo
        .words_by_filters(&[CategoryId::new(2)], &[])
        .await
        .unwrap();
    let cat = words.iter().find(|w| w.russian == "кот").unwrap();
    assert_eq!(cat.english.as_deref(), Some("cat"));
    assert_eq!(cat.difficulty, 3);
}
