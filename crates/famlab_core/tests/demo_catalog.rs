use famlab_core::catalog::{applicable_question_count, applicable_questions};
use famlab_core::demo::{
    demo_accounts, demo_survey, demo_surveys, find_demo_survey, rating_options, seed_demo_survey,
    DEMO_SURVEY_ID,
};
use famlab_core::{MemoryStore, QuestionKind, SurveyService, SurveyStore, UserProfile};

#[test]
fn demo_survey_passes_catalog_validation() {
    demo_survey().validate().unwrap();
}

#[test]
fn demo_survey_has_expected_shape() {
    let survey = demo_survey();
    assert_eq!(survey.id, DEMO_SURVEY_ID);
    assert!(survey.is_active);
    assert_eq!(survey.categories.len(), 4);
    assert_eq!(survey.total_pages(), 4);

    let subcategory_count: usize = survey
        .categories
        .iter()
        .map(|category| category.subcategories.len())
        .sum();
    assert_eq!(subcategory_count, 8);

    let question_count: usize = survey
        .categories
        .iter()
        .flat_map(|category| &category.subcategories)
        .map(|subcategory| subcategory.questions.len())
        .sum();
    assert_eq!(question_count, 34);
}

#[test]
fn every_question_comes_as_expectation_reality_pair() {
    let survey = demo_survey();
    for subcategory in survey.categories.iter().flat_map(|c| &c.subcategories) {
        for pair in subcategory.questions.chunks(2) {
            assert_eq!(pair.len(), 2);
            assert_eq!(pair[0].kind, QuestionKind::Expectation);
            assert_eq!(pair[1].kind, QuestionKind::Reality);
            assert!(pair[0].id.ends_with("_exp"));
            assert!(pair[1].id.ends_with("_real"));
        }
    }
}

#[test]
fn childcare_subcategory_is_parents_only() {
    let survey = demo_survey();
    assert_eq!(applicable_question_count(&survey, &UserProfile::parent()), 34);
    assert_eq!(applicable_question_count(&survey, &UserProfile::childless()), 28);

    let final_category = &survey.categories[3];
    let childless_ids: Vec<&str> = applicable_questions(final_category, &UserProfile::childless())
        .iter()
        .map(|question| question.id.as_str())
        .collect();
    assert!(childless_ids.iter().all(|id| !id.starts_with("q15")
        && !id.starts_with("q16")
        && !id.starts_with("q17")));

    let childcare = &final_category.subcategories[1];
    assert_eq!(childcare.name, "子ども・育児観");
    assert!(childcare.is_visible_for(&UserProfile::parent()));
    assert!(!childcare.is_visible_for(&UserProfile::childless()));
}

#[test]
fn rating_scale_covers_one_through_five() {
    let options = rating_options();
    let values: Vec<i32> = options.iter().map(|option| option.value).collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);
    assert!(options
        .iter()
        .all(|option| !option.expectation_label.is_empty() && !option.reality_label.is_empty()));
}

#[test]
fn demo_accounts_are_available() {
    let accounts = demo_accounts();
    assert_eq!(accounts.len(), 2);
    assert!(accounts
        .iter()
        .all(|account| account.email.ends_with("@family-lab.com")));
}

#[test]
fn seeding_is_idempotent() {
    let store = MemoryStore::new();
    seed_demo_survey(&store).unwrap();
    seed_demo_survey(&store).unwrap();

    assert!(store.get_survey(DEMO_SURVEY_ID).unwrap().is_some());
    assert_eq!(store.list_active_surveys().unwrap().len(), 1);
}

#[test]
fn survey_service_falls_back_to_demo_catalog_on_empty_store() {
    let store = MemoryStore::new();
    let service = SurveyService::new(&store);

    let survey = service.get(DEMO_SURVEY_ID).unwrap();
    assert_eq!(survey.id, DEMO_SURVEY_ID);

    assert!(service.get("no-such-survey").is_err());
}

#[test]
fn find_demo_survey_matches_by_id() {
    assert!(find_demo_survey(DEMO_SURVEY_ID).is_some());
    assert!(find_demo_survey("unknown").is_none());
    assert_eq!(demo_surveys().len(), 1);
}
