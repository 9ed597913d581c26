//! Built-in demonstration dataset.
//!
//! # Responsibility
//! - Provide the full 夫婦・家族関係診断 catalog used as the `NotFound`
//!   fallback and as seed data for fresh databases.
//! - Provide demo account records and the five-step rating scale metadata.
//!
//! # Invariants
//! - `demo_survey()` always passes `Survey::validate`.
//! - Question ids come in `<base>_exp` / `<base>_real` pairs.

use crate::model::now_epoch_ms;
use crate::model::survey::{Category, Question, QuestionKind, RatingOption, Subcategory, Survey};
use crate::repo::{StoreResult, SurveyStore};

/// Id of the built-in demonstration survey.
pub const DEMO_SURVEY_ID: &str = "1";

/// Demo login credentials surfaced on the sign-in screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub description: String,
}

/// Builds the demonstration survey catalog.
///
/// Four categories, eight subcategories, 34 questions; the 子ども・育児観
/// subcategory is visible to parents only.
pub fn demo_survey() -> Survey {
    let now = now_epoch_ms();
    Survey {
        id: DEMO_SURVEY_ID.to_string(),
        title: "夫婦・家族関係診断".to_string(),
        description: "夫婦・家族関係の現状を診断します".to_string(),
        categories: vec![
            category(
                "cat1",
                "感情・コミュニケーション",
                "感情的なつながりとコミュニケーションについて",
                vec![
                    subcategory(
                        "cat1",
                        "sub1",
                        "情緒的つながり",
                        "感情の理解と共感について",
                        vec![
                            pair(
                                "q1",
                                "パートナーに自分の気持ちを理解し、共感してもらいたい",
                                "パートナーは自分の気持ちを理解し、共感してくれていると感じる",
                            ),
                            pair(
                                "q2",
                                "パートナーに日常的に愛情を表現してもらいたい",
                                "パートナーは日常的に愛情を表現してくれている",
                            ),
                        ],
                    ),
                    subcategory(
                        "cat1",
                        "sub2",
                        "コミュニケーション",
                        "日常的な対話について",
                        vec![
                            pair(
                                "q3",
                                "お互いにオープンに話し合い、意見交換をしたい",
                                "お互いにオープンに話し合え、意見交換ができていると感じる",
                            ),
                            pair(
                                "q4",
                                "困りごとや悩みを正直に話せる雰囲気を作りたい",
                                "困りごとや悩みを正直に話せる雰囲気があると感じる",
                            ),
                        ],
                    ),
                ],
            ),
            category(
                "cat2",
                "協力・衝突解決",
                "協力体制と問題解決について",
                vec![
                    subcategory(
                        "cat2",
                        "sub3",
                        "共同性・協力体制",
                        "日常生活での協力について",
                        vec![
                            pair(
                                "q5",
                                "パートナー（家族）に家事や仕事などをしっかりサポートしてもらいたい",
                                "パートナー（家族）は家事や仕事などをしっかりサポートしてくれている",
                            ),
                            pair(
                                "q6",
                                "夫婦（家族）間で納得のいく形の役割分担をしたい",
                                "夫婦（家族）間で納得のいく形の役割分担ができている",
                            ),
                        ],
                    ),
                    subcategory(
                        "cat2",
                        "sub4",
                        "衝突・ストレス対処",
                        "衝突時の対処について",
                        vec![
                            pair(
                                "q7",
                                "衝突が起きたとき、落ち着いて話し合い解決したい",
                                "衝突が起きたとき、落ち着いて話し合い解決できている",
                            ),
                            pair(
                                "q8",
                                "相手を尊重し、過度に感情的にならずに問題を解決したい",
                                "相手を尊重し、過度に感情的にならずに問題を解決できている",
                            ),
                        ],
                    ),
                ],
            ),
            category(
                "cat3",
                "価値観・社会的つながり",
                "価値観の共有と余暇について",
                vec![
                    subcategory(
                        "cat3",
                        "sub5",
                        "価値観・将来ビジョン",
                        "将来設計と価値観について",
                        vec![
                            pair(
                                "q9",
                                "将来の生活設計について、お互いよく話し合いたい",
                                "将来の生活設計について、お互いよく話し合えている",
                            ),
                            pair(
                                "q10",
                                "大切にしたい価値観を夫婦（家族）で共有したい",
                                "大切にしたい価値観を夫婦（家族）で共有できている",
                            ),
                        ],
                    ),
                    subcategory(
                        "cat3",
                        "sub6",
                        "レジャー・余暇共有",
                        "余暇の過ごし方について",
                        vec![
                            pair(
                                "q11",
                                "夫婦（家族）で楽しめる時間や趣味を一緒に過ごしたい",
                                "夫婦（家族）で楽しめる時間や趣味を一緒に過ごせている",
                            ),
                            pair(
                                "q12",
                                "旅行や外食などの特別なイベントを十分に楽しみたい",
                                "旅行や外食などの特別なイベントを、十分に楽しめている",
                            ),
                        ],
                    ),
                ],
            ),
            category(
                "cat4",
                "親密感・子育て",
                "親密感と子育てについて",
                vec![
                    subcategory(
                        "cat4",
                        "sub7",
                        "親密感・スキンシップ",
                        "親密さの実感について",
                        vec![
                            pair(
                                "q13",
                                "望む程度のスキンシップを日常的に持ちたい",
                                "望む程度のスキンシップが日常的にあると感じる",
                            ),
                            pair(
                                "q14",
                                "性的な関係について、お互いの希望や気持ちを尊重したい",
                                "性的な関係について、お互いの希望や気持ちを尊重できている",
                            ),
                        ],
                    ),
                    subcategory(
                        "cat4",
                        "sub8",
                        "子ども・育児観",
                        "子育ての方針と協力について",
                        vec![
                            parents_only_pair(
                                "q15",
                                "しつけや教育方針について、夫婦で十分に話し合い、共通認識を持ちたい",
                                "しつけや教育方針について、夫婦で十分に話し合い、共通認識をもてている",
                            ),
                            parents_only_pair(
                                "q16",
                                "子育てにおいて困ったときは、夫婦で協力し合いたい",
                                "子育てにおいて困ったときは、夫婦で協力し合っていると感じる",
                            ),
                            parents_only_pair(
                                "q17",
                                "子どもとの時間、夫婦それぞれの時間、夫婦二人の時間をバランスよく取りたい",
                                "子どもとの時間、夫婦それぞれの時間、夫婦二人の時間をバランスよく取れている",
                            ),
                        ],
                    ),
                ],
            ),
        ],
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Returns all demonstration surveys (currently one).
pub fn demo_surveys() -> Vec<Survey> {
    vec![demo_survey()]
}

/// Looks up one demonstration survey by id.
pub fn find_demo_survey(survey_id: &str) -> Option<Survey> {
    demo_surveys()
        .into_iter()
        .find(|survey| survey.id == survey_id)
}

/// Writes the demonstration survey through a store unless already present.
pub fn seed_demo_survey(store: &impl SurveyStore) -> StoreResult<()> {
    if store.get_survey(DEMO_SURVEY_ID)?.is_none() {
        store.put_survey(&demo_survey())?;
    }
    Ok(())
}

/// Demo login accounts shown on the sign-in screen.
pub fn demo_accounts() -> Vec<DemoAccount> {
    vec![
        DemoAccount {
            email: "demo@family-lab.com".to_string(),
            password: "demo123456".to_string(),
            name: "デモユーザー".to_string(),
            description: "基本的な機能をお試しいただけるアカウントです".to_string(),
        },
        DemoAccount {
            email: "test@family-lab.com".to_string(),
            password: "test123456".to_string(),
            name: "テストユーザー".to_string(),
            description: "アンケート回答から結果表示まで体験できます".to_string(),
        },
    ]
}

/// The five-step rating scale shown next to every question.
pub fn rating_options() -> Vec<RatingOption> {
    vec![
        rating(1, "全く\nそう思わない", "全く\n感じていない"),
        rating(2, "あまり\nそう思わない", "あまり\n感じていない"),
        rating(3, "どちらとも\nいえない", "どちらとも\nいえない"),
        rating(4, "やや\nそう思う", "やや\n感じている"),
        rating(5, "非常に\nそう思う", "強く\n感じている"),
    ]
}

fn category(id: &str, name: &str, description: &str, subcategories: Vec<Subcategory>) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        subcategories,
    }
}

fn subcategory(
    category_id: &str,
    id: &str,
    name: &str,
    description: &str,
    pairs: Vec<[QuestionSeed; 2]>,
) -> Subcategory {
    let questions = pairs
        .into_iter()
        .flatten()
        .map(|seed| seed.build(category_id, id))
        .collect();
    Subcategory {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        questions,
    }
}

struct QuestionSeed {
    id: String,
    text: String,
    kind: QuestionKind,
    show_for_childless: bool,
    show_for_parents: bool,
}

impl QuestionSeed {
    fn build(self, category_id: &str, subcategory_id: &str) -> Question {
        Question {
            id: self.id,
            text: self.text,
            kind: self.kind,
            category_id: category_id.to_string(),
            subcategory_id: subcategory_id.to_string(),
            show_for_childless: self.show_for_childless,
            show_for_parents: self.show_for_parents,
        }
    }
}

fn pair(base: &str, expectation_text: &str, reality_text: &str) -> [QuestionSeed; 2] {
    seed_pair(base, expectation_text, reality_text, true, true)
}

fn parents_only_pair(base: &str, expectation_text: &str, reality_text: &str) -> [QuestionSeed; 2] {
    seed_pair(base, expectation_text, reality_text, false, true)
}

fn seed_pair(
    base: &str,
    expectation_text: &str,
    reality_text: &str,
    show_for_childless: bool,
    show_for_parents: bool,
) -> [QuestionSeed; 2] {
    [
        QuestionSeed {
            id: format!("{base}_exp"),
            text: expectation_text.to_string(),
            kind: QuestionKind::Expectation,
            show_for_childless,
            show_for_parents,
        },
        QuestionSeed {
            id: format!("{base}_real"),
            text: reality_text.to_string(),
            kind: QuestionKind::Reality,
            show_for_childless,
            show_for_parents,
        },
    ]
}

fn rating(value: i32, expectation_label: &str, reality_label: &str) -> RatingOption {
    RatingOption {
        value,
        expectation_label: expectation_label.to_string(),
        reality_label: reality_label.to_string(),
    }
}
