//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `famlab_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use famlab_core::catalog::applicable_question_count;
use famlab_core::demo::demo_survey;
use famlab_core::UserProfile;

fn main() {
    let survey = demo_survey();
    println!("famlab_core version={}", famlab_core::core_version());
    println!(
        "demo survey id={} categories={} pages={}",
        survey.id,
        survey.categories.len(),
        survey.total_pages()
    );
    println!(
        "applicable questions parent={} childless={}",
        applicable_question_count(&survey, &UserProfile::parent()),
        applicable_question_count(&survey, &UserProfile::childless())
    );
}
