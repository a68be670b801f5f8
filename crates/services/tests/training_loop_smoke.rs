use std::sync::Arc;

use diktant_core::model::{
    Category, CategoryId, CategoryKind, Grade, LetterId, SetupSelection, TrainingMode, WordId,
    WordSource,
};
use diktant_core::time::fixed_clock;
use services::sessions::{SessionReport, TrainingLoopService};
use services::setup_service::SetupService;
use storage::repository::{
    CategoryRepository, InMemoryRepository, LetterRecord, LetterRepository, WordRecord,
    WordRepository,
};

async fn seeded_repo() -> Arc<InMemoryRepository> {
    let repo = Arc::new(InMemoryRepository::new());

    repo.upsert_category(&Category {
        id: CategoryId::new(1),
        name: "Словарные слова".to_owned(),
        description: None,
        kind: CategoryKind::DictionaryClass,
    })
    .await
    .unwrap();

    repo.upsert_letter(&LetterRecord {
        id: LetterId::new(1),
        letter: "С".to_owned(),
        sort_order: 1,
    })
    .await
    .unwrap();

    for (id, ru) in [(1, "собака"), (2, "сорока")] {
        repo.insert_word(&WordRecord {
            id: WordId::new(id),
            russian: ru.to_owned(),
            english: None,
            category_id: CategoryId::new(1),
            letter_id: Some(LetterId::new(1)),
            difficulty: 1,
        })
        .await
        .unwrap();
    }

    repo
}

#[tokio::test]
async fn full_catalog_session_produces_a_report() {
    let repo = seeded_repo().await;
    let setup = SetupService::new(repo.clone(), repo.clone(), repo.clone());
    let service = TrainingLoopService::new(fixed_clock(), repo);

    let mut selection = SetupSelection::new();
    let categories = setup
        .categories_for_mode(TrainingMode::RuOnly)
        .await
        .unwrap();
    selection.select_category(categories[0].clone());
    selection.select_letter(LetterId::new(1));
    assert_eq!(setup.count_selected(&selection).await.unwrap(), 2);

    let mut session = service.start(&selection).await.unwrap();
    assert_eq!(session.total_words(), 2);

    while let Some(word) = session.current_word() {
        let answer = word.russian().to_owned();
        let feedback = service.answer_current(&mut session, &answer).unwrap();
        assert!(feedback.is_correct);
    }

    let report = SessionReport::from_session(&session).unwrap();
    assert_eq!(report.grade, Grade::Excellent);
    assert_eq!(report.correct_count, 2);
    assert_eq!(report.errors_count, 0);
    assert!(report.incorrect().is_empty());
}

#[tokio::test]
async fn manual_session_restart_allows_a_second_try() {
    let repo = Arc::new(InMemoryRepository::new());
    let service = TrainingLoopService::new(fixed_clock(), repo);

    let mut selection = SetupSelection::new();
    selection.set_source(WordSource::Manual);
    selection.set_manual_text("кот\nсобака");

    let mut session = service.start(&selection).await.unwrap();
    service.answer_current(&mut session, "кит").unwrap();
    service.answer_current(&mut session, "собака").unwrap();

    let report = SessionReport::from_session(&session).unwrap();
    assert_eq!(report.errors_count, 1);
    assert_eq!(report.grade, Grade::Fail);

    service.restart(&mut session);
    service.answer_current(&mut session, "кот").unwrap();
    service.answer_current(&mut session, "собака").unwrap();

    let report = SessionReport::from_session(&session).unwrap();
    assert_eq!(report.errors_count, 0);
    assert_eq!(report.grade, Grade::Excellent);
}
