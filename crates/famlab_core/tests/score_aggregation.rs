use famlab_core::score::aggregate_results;
use famlab_core::{Answer, Category, Question, QuestionKind, Subcategory, Survey};

fn question(id: &str, kind: QuestionKind, category_id: &str, subcategory_id: &str) -> Question {
    Question {
        id: id.to_string(),
        text: format!("text for {id}"),
        kind,
        category_id: category_id.to_string(),
        subcategory_id: subcategory_id.to_string(),
        show_for_childless: true,
        show_for_parents: true,
    }
}

fn one_category_survey() -> Survey {
    Survey {
        id: "s1".to_string(),
        title: "test survey".to_string(),
        description: String::new(),
        categories: vec![Category {
            id: "cat1".to_string(),
            name: "communication".to_string(),
            description: String::new(),
            subcategories: vec![Subcategory {
                id: "sub1".to_string(),
                name: "sub".to_string(),
                description: String::new(),
                questions: vec![
                    question("q1", QuestionKind::Expectation, "cat1", "sub1"),
                    question("q2", QuestionKind::Reality, "cat1", "sub1"),
                ],
            }],
        }],
        is_active: true,
        created_at: 0,
        updated_at: 0,
    }
}

fn two_category_survey() -> Survey {
    let mut survey = one_category_survey();
    survey.categories.push(Category {
        id: "cat2".to_string(),
        name: "cooperation".to_string(),
        description: String::new(),
        subcategories: vec![Subcategory {
            id: "sub2".to_string(),
            name: "sub".to_string(),
            description: String::new(),
            questions: vec![
                question("q3", QuestionKind::Expectation, "cat2", "sub2"),
                question("q4", QuestionKind::Reality, "cat2", "sub2"),
            ],
        }],
    });
    survey
}

#[test]
fn output_length_and_order_match_survey_categories() {
    let survey = two_category_survey();
    let results = aggregate_results(&survey, &[Answer::new("q1", 5)]);

    assert_eq!(results.len(), survey.categories.len());
    assert_eq!(results[0].category_id, "cat1");
    assert_eq!(results[0].category_name, "communication");
    assert_eq!(results[1].category_id, "cat2");
}

#[test]
fn both_kinds_answered_produce_exact_means_and_gap() {
    let survey = one_category_survey();
    let answers = vec![Answer::new("q1", 5), Answer::new("q2", 2)];
    let results = aggregate_results(&survey, &answers);

    assert_eq!(results[0].expectation_score, 5.0);
    assert_eq!(results[0].reality_score, 2.0);
    assert_eq!(results[0].gap, 3.0);
}

#[test]
fn missing_reality_side_defaults_to_neutral_midpoint() {
    let survey = one_category_survey();
    let results = aggregate_results(&survey, &[Answer::new("q1", 4)]);

    assert_eq!(results[0].expectation_score, 4.0);
    assert_eq!(results[0].reality_score, 3.0);
    assert_eq!(results[0].gap, 1.0);
}

#[test]
fn missing_expectation_side_defaults_to_neutral_midpoint() {
    let survey = one_category_survey();
    let results = aggregate_results(&survey, &[Answer::new("q2", 1)]);

    assert_eq!(results[0].expectation_score, 3.0);
    assert_eq!(results[0].reality_score, 1.0);
    assert_eq!(results[0].gap, 2.0);
}

#[test]
fn entirely_unanswered_category_reports_zero_not_neutral() {
    let survey = two_category_survey();
    let results = aggregate_results(&survey, &[Answer::new("q1", 4)]);

    assert_eq!(results[1].expectation_score, 0.0);
    assert_eq!(results[1].reality_score, 0.0);
    assert_eq!(results[1].gap, 0.0);
}

#[test]
fn no_answers_at_all_reports_zero_for_every_category() {
    let survey = one_category_survey();
    let results = aggregate_results(&survey, &[]);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].expectation_score, 0.0);
    assert_eq!(results[0].reality_score, 0.0);
    assert_eq!(results[0].gap, 0.0);
}

#[test]
fn unknown_question_ids_are_ignored_not_fatal() {
    let survey = one_category_survey();
    let answers = vec![
        Answer::new("q1", 5),
        Answer::new("missing_question", 1),
        Answer::new("q2", 2),
    ];
    let results = aggregate_results(&survey, &answers);

    assert_eq!(results[0].expectation_score, 5.0);
    assert_eq!(results[0].reality_score, 2.0);
}

#[test]
fn gap_always_equals_absolute_score_difference() {
    let survey = one_category_survey();
    let combinations = [
        vec![Answer::new("q1", 1), Answer::new("q2", 5)],
        vec![Answer::new("q1", 5), Answer::new("q2", 1)],
        vec![Answer::new("q1", 3), Answer::new("q2", 3)],
        vec![Answer::new("q1", 2)],
        vec![Answer::new("q2", 4)],
    ];
    for answers in combinations {
        let results = aggregate_results(&survey, &answers);
        let expected = (results[0].expectation_score - results[0].reality_score).abs();
        assert!((results[0].gap - expected).abs() < 1e-9);
    }
}

#[test]
fn scores_average_multiple_answers_per_kind() {
    let mut survey = one_category_survey();
    survey.categories[0].subcategories[0]
        .questions
        .push(question("q5", QuestionKind::Expectation, "cat1", "sub1"));

    let answers = vec![Answer::new("q1", 5), Answer::new("q5", 2)];
    let results = aggregate_results(&survey, &answers);
    assert_eq!(results[0].expectation_score, 3.5);
}

#[test]
fn scoring_uses_full_declared_set_without_profile_filtering() {
    // Parents-only questions still count toward scores when answered.
    let mut survey = one_category_survey();
    survey.categories[0].subcategories[0].questions[0].show_for_childless = false;

    let results = aggregate_results(&survey, &[Answer::new("q1", 4)]);
    assert_eq!(results[0].expectation_score, 4.0);
}
