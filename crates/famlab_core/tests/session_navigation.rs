use famlab_core::{
    Answer, AnswerValidationError, Category, MemoryStore, Question, QuestionKind, Response,
    ResponseId, ResponseStore, SessionError, StepOutcome, StoreError, StoreResult, Subcategory,
    Survey, SurveySession, UserId, UserProfile,
};
use uuid::Uuid;

fn question(id: &str, kind: QuestionKind, cat: &str, sub: &str, childless: bool) -> Question {
    Question {
        id: id.to_string(),
        text: format!("text for {id}"),
        kind,
        category_id: cat.to_string(),
        subcategory_id: sub.to_string(),
        show_for_childless: childless,
        show_for_parents: true,
    }
}

fn category(id: &str, sub: &str, questions: Vec<Question>) -> Category {
    Category {
        id: id.to_string(),
        name: format!("category {id}"),
        description: String::new(),
        subcategories: vec![Subcategory {
            id: sub.to_string(),
            name: format!("subcategory {sub}"),
            description: String::new(),
            questions,
        }],
    }
}

/// Three pages: four applicable questions, zero applicable questions
/// (parents-only content for a childless profile), two applicable questions.
fn navigation_survey() -> Survey {
    Survey {
        id: "s1".to_string(),
        title: "navigation survey".to_string(),
        description: String::new(),
        categories: vec![
            category(
                "cat1",
                "sub1",
                vec![
                    question("q1", QuestionKind::Expectation, "cat1", "sub1", true),
                    question("q2", QuestionKind::Reality, "cat1", "sub1", true),
                    question("q3", QuestionKind::Expectation, "cat1", "sub1", true),
                    question("q4", QuestionKind::Reality, "cat1", "sub1", true),
                ],
            ),
            category(
                "cat2",
                "sub2",
                vec![
                    question("q5", QuestionKind::Expectation, "cat2", "sub2", false),
                    question("q6", QuestionKind::Reality, "cat2", "sub2", false),
                ],
            ),
            category(
                "cat3",
                "sub3",
                vec![
                    question("q7", QuestionKind::Expectation, "cat3", "sub3", true),
                    question("q8", QuestionKind::Reality, "cat3", "sub3", true),
                ],
            ),
        ],
        is_active: true,
        created_at: 0,
        updated_at: 0,
    }
}

fn childless_session() -> SurveySession {
    SurveySession::new(navigation_survey(), Uuid::new_v4(), UserProfile::childless()).unwrap()
}

struct FailingStore;

impl ResponseStore for FailingStore {
    fn save_response(&self, _response: &Response) -> StoreResult<ResponseId> {
        Err(StoreError::InvalidData("simulated outage".to_string()))
    }

    fn list_responses(&self, _user_id: UserId) -> StoreResult<Vec<Response>> {
        Ok(Vec::new())
    }
}

#[test]
fn session_starts_at_page_one_with_no_answers() {
    let session = childless_session();
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.total_pages(), 3);
    assert_eq!(session.answer_count(), 0);
}

#[test]
fn empty_survey_is_rejected_at_construction() {
    let survey = Survey {
        id: "empty".to_string(),
        title: "empty".to_string(),
        description: String::new(),
        categories: Vec::new(),
        is_active: true,
        created_at: 0,
        updated_at: 0,
    };
    let err = SurveySession::new(survey, Uuid::new_v4(), UserProfile::childless()).unwrap_err();
    assert!(matches!(err, SessionError::EmptySurvey(id) if id == "empty"));
}

#[test]
fn half_answered_threshold_gates_forward_navigation() {
    let store = MemoryStore::new();
    let mut session = childless_session();

    // 1 of 4 answered: below the 50% threshold.
    session.record_answer("q1", 4, None).unwrap();
    assert!(!session.can_proceed());
    assert_eq!(session.go_next(&store), StepOutcome::Blocked);
    assert_eq!(session.current_page(), 1);

    // 2 of 4 answered: exactly at the threshold.
    session.record_answer("q2", 3, None).unwrap();
    assert!(session.can_proceed());
    assert_eq!(session.go_next(&store), StepOutcome::Moved { page: 2 });
}

#[test]
fn page_with_zero_applicable_questions_trivially_passes() {
    let store = MemoryStore::new();
    let mut session = childless_session();
    session.record_answer("q1", 4, None).unwrap();
    session.record_answer("q2", 3, None).unwrap();
    session.go_next(&store);

    // Page 2 is parents-only content; a childless profile sees nothing.
    assert_eq!(session.current_page(), 2);
    assert!(session.can_proceed());
    assert_eq!(session.go_next(&store), StepOutcome::Moved { page: 3 });
}

#[test]
fn final_page_requires_at_least_one_answer_anywhere() {
    let store = MemoryStore::new();
    let survey = Survey {
        categories: vec![category(
            "cat1",
            "sub1",
            vec![question("q1", QuestionKind::Expectation, "cat1", "sub1", false)],
        )],
        ..navigation_survey()
    };
    // Single page survey: page 1 is also the final page.
    let mut session = SurveySession::new(survey, Uuid::new_v4(), UserProfile::childless()).unwrap();

    assert!(!session.can_proceed());
    assert_eq!(session.go_next(&store), StepOutcome::Blocked);

    session.record_answer("q1", 5, None).unwrap();
    assert!(session.can_proceed());
    assert!(matches!(
        session.go_next(&store),
        StepOutcome::Submitted { response_id: Some(_) }
    ));
}

#[test]
fn submission_persists_resets_page_and_clears_answers() {
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();
    let mut session =
        SurveySession::new(navigation_survey(), user_id, UserProfile::childless()).unwrap();

    session.record_answer("q1", 5, None).unwrap();
    session.record_answer("q2", 2, None).unwrap();
    session.go_next(&store);
    session.go_next(&store);
    session.record_answer("q7", 4, None).unwrap();

    let outcome = session.go_next(&store);
    let StepOutcome::Submitted { response_id: Some(response_id) } = outcome else {
        panic!("expected successful submission, got {outcome:?}");
    };

    assert_eq!(session.current_page(), 1);
    assert_eq!(session.answer_count(), 0);

    let saved = store.list_responses(user_id).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, response_id);
    assert_eq!(saved[0].survey_id, "s1");
    assert_eq!(saved[0].answers.len(), 3);
    assert!(saved[0].completed_at.is_some());
}

#[test]
fn persistence_failure_still_resets_local_state() {
    let mut session = childless_session();
    session.record_answer("q1", 5, None).unwrap();
    session.record_answer("q2", 2, None).unwrap();
    session.go_next(&FailingStore);
    session.go_next(&FailingStore);
    session.record_answer("q7", 4, None).unwrap();

    let outcome = session.go_next(&FailingStore);
    assert_eq!(outcome, StepOutcome::Submitted { response_id: None });
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.answer_count(), 0);
}

#[test]
fn record_answer_upserts_with_last_write_wins() {
    let mut session = childless_session();
    session.record_answer("q1", 2, None).unwrap();
    session
        .record_answer("q1", 5, Some("changed my mind".to_string()))
        .unwrap();

    assert_eq!(session.answer_count(), 1);
    assert_eq!(session.answer_value("q1"), Some(5));
}

#[test]
fn out_of_range_ratings_are_rejected_at_entry() {
    let mut session = childless_session();
    let err = session.record_answer("q1", 0, None).unwrap_err();
    assert!(matches!(err, AnswerValidationError::ValueOutOfRange { .. }));
    let err = session.record_answer("q1", 6, None).unwrap_err();
    assert!(matches!(err, AnswerValidationError::ValueOutOfRange { .. }));
    assert_eq!(session.answer_count(), 0);
}

#[test]
fn go_previous_decrements_without_gating_and_stops_at_page_one() {
    let store = MemoryStore::new();
    let mut session = childless_session();
    assert!(!session.go_previous());

    session.record_answer("q1", 4, None).unwrap();
    session.record_answer("q2", 3, None).unwrap();
    session.go_next(&store);
    assert_eq!(session.current_page(), 2);

    assert!(session.go_previous());
    assert_eq!(session.current_page(), 1);
    assert!(!session.go_previous());
}

#[test]
fn submitted_answers_stay_in_rating_range() {
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();
    let mut session =
        SurveySession::new(navigation_survey(), user_id, UserProfile::childless()).unwrap();
    session.record_answer("q1", 1, None).unwrap();
    session.record_answer("q2", 5, None).unwrap();
    session.go_next(&store);
    session.go_next(&store);
    let _ = session.go_next(&store);

    let saved = store.list_responses(user_id).unwrap();
    assert!(saved[0]
        .answers
        .iter()
        .all(|answer| Answer::new(answer.question_id.clone(), answer.value).validate().is_ok()));
}
