//! End-to-end resolution scenarios
//!
//! Each test drives the engine only through its public operations.

use intake_domain::{Confidence, FieldRecord, RemediationChoice, ReviewState, SourceTag};
use intake_engine::{Engine, EngineError, Input};

const SCENARIO_TEXT: &str = "Build a new mobile app by Q3 2025 with a budget of $250k";

fn engine() -> Engine {
    Engine::with_defaults().unwrap()
}

#[test]
fn test_natural_language_scenario() {
    let mut engine = engine();
    let records = engine
        .resolve(Input::NaturalLanguage(SCENARIO_TEXT.to_string()))
        .unwrap();

    let goal = &records["goal"];
    assert_eq!(goal.value, "build a new mobile app");
    assert_eq!(goal.confidence, Confidence::new(0.67));
    assert_eq!(goal.provenance, SourceTag::NaturalLanguage);
    assert!(!goal.confirmed);
    assert_eq!(goal.review_state(), ReviewState::ProposedLowConfidence);

    let timeline = &records["timeline"];
    assert_eq!(timeline.value, "Q3 2025");
    assert_eq!(timeline.confidence, Confidence::new(0.78));
    assert!(timeline.confirmed);

    let budget = &records["budget"];
    assert_eq!(budget.value, "$250k");
    assert_eq!(budget.confidence, Confidence::new(0.86));
    assert!(budget.confirmed);

    assert_eq!(records["project_name"], FieldRecord::empty());
}

#[test]
fn test_structured_blank_clears_confirmed_value() {
    let mut engine = engine();
    engine
        .resolve(Input::NaturalLanguage(SCENARIO_TEXT.to_string()))
        .unwrap();
    assert!(engine.record("budget").unwrap().confirmed);

    engine.resolve(Input::form([("budget", "")])).unwrap();

    let budget = engine.record("budget").unwrap();
    assert_eq!(budget, &FieldRecord::empty());
    assert_eq!(budget.review_state(), ReviewState::Unset);
    assert_eq!(engine.record("timeline").unwrap().value, "Q3 2025");
}

#[test]
fn test_research_note_is_never_confirmed() {
    let mut engine = engine();
    engine
        .resolve(Input::Research("Expand into three new markets".to_string()))
        .unwrap();

    let goal = engine.record("goal").unwrap();
    assert_eq!(goal.value, "Expand into three new markets");
    assert_eq!(goal.confidence, Confidence::new(0.7));
    assert_eq!(goal.provenance, SourceTag::ResearchAssist);
    assert!(!goal.confirmed);
}

#[test]
fn test_research_note_above_threshold_stays_unconfirmed() {
    let config = intake_engine::EngineConfig {
        research_confidence: 0.9,
        ..Default::default()
    };
    let mut engine = Engine::new(intake_domain::FieldRegistry::intake(), config).unwrap();
    engine
        .resolve(Input::Research("Expand into three new markets".to_string()))
        .unwrap();
    assert!(!engine.record("goal").unwrap().confirmed);
}

#[test]
fn test_remediation_on_empty_field() {
    let mut engine = engine();
    let record = engine.remediate("budget", RemediationChoice::Assumed).unwrap();

    assert_eq!(record.provenance, SourceTag::MissingAssumed);
    assert!(record.value.is_empty());
    assert!(!record.confirmed);
    assert_eq!(record.remediation, Some(RemediationChoice::Assumed));
}

#[test]
fn test_merge_resets_remediation() {
    let mut engine = engine();
    engine.remediate("budget", RemediationChoice::Public).unwrap();
    engine.resolve(Input::form([("budget", "$1.2m")])).unwrap();

    let budget = engine.record("budget").unwrap();
    assert_eq!(budget.remediation, None);
    assert_eq!(budget.provenance, SourceTag::Structured);
    assert!(budget.confirmed);
}

#[test]
fn test_natural_language_leaves_unmentioned_fields() {
    let mut engine = engine();
    engine.resolve(Input::form([("goal", "Open a flagship store")])).unwrap();
    engine
        .resolve(Input::NaturalLanguage("We have $80k to spend".to_string()))
        .unwrap();

    let goal = engine.record("goal").unwrap();
    assert_eq!(goal.value, "Open a flagship store");
    assert_eq!(goal.provenance, SourceTag::Structured);
    assert_eq!(engine.record("budget").unwrap().value, "$80k");
}

#[test]
fn test_long_description_is_scanned_to_the_end() {
    let mut engine = engine();
    let text = format!("{}{}", "and so on ".repeat(1_500), "with a budget of $250k by Q3 2025");
    engine.resolve(Input::NaturalLanguage(text)).unwrap();

    assert_eq!(engine.record("budget").unwrap().value, "$250k");
    assert_eq!(engine.record("timeline").unwrap().value, "Q3 2025");
}

#[test]
fn test_last_writer_wins_across_sources() {
    let mut engine = engine();
    engine.resolve(Input::form([("goal", "Open a flagship store")])).unwrap();
    engine
        .resolve(Input::Research("Expand into three new markets".to_string()))
        .unwrap();

    let goal = engine.record("goal").unwrap();
    assert_eq!(goal.value, "Expand into three new markets");
    assert!(!goal.confirmed);
}

#[test]
fn test_review_workflow() {
    let mut engine = engine();
    engine
        .resolve(Input::NaturalLanguage(SCENARIO_TEXT.to_string()))
        .unwrap();

    engine.set_confirmed("goal", true).unwrap();
    assert_eq!(engine.record("goal").unwrap().review_state(), ReviewState::Confirmed);

    engine.set_confirmed("budget", false).unwrap();
    assert_eq!(
        engine.record("budget").unwrap().review_state(),
        ReviewState::ProposedHighConfidence
    );

    engine.edit("project_name", "Apollo").unwrap();
    let name = engine.record("project_name").unwrap();
    assert_eq!(name.provenance, SourceTag::Manual);
    assert_eq!(name.confidence, Confidence::new(0.9));
    assert!(name.confirmed);

    engine.edit("goal", "build a mobile app for iOS").unwrap();
    assert_eq!(engine.record("goal").unwrap().provenance, SourceTag::NaturalLanguage);

    assert!(matches!(
        engine.set_confirmed("unknown", true),
        Err(EngineError::UnknownField(_))
    ));
    engine.edit("timeline", "").unwrap();
    assert!(matches!(
        engine.set_confirmed("timeline", true),
        Err(EngineError::EmptyField(_))
    ));
    assert!(matches!(
        engine.remediate("goal", RemediationChoice::Manual),
        Err(EngineError::FieldNotEmpty(_))
    ));
}

#[test]
fn test_metrics_follow_operations() {
    let mut engine = engine();
    engine
        .resolve(Input::NaturalLanguage(SCENARIO_TEXT.to_string()))
        .unwrap();
    engine.resolve(Input::form([("budget", "")])).unwrap();
    engine.remediate("budget", RemediationChoice::Assumed).unwrap();
    engine.set_confirmed("goal", true).unwrap();

    let metrics = engine.metrics();
    assert_eq!(metrics.merges_accepted, 2);
    assert_eq!(metrics.merges_flagged, 1);
    assert_eq!(metrics.merges_cleared, 1);
    assert_eq!(metrics.remediations, 1);
    assert_eq!(metrics.confirmations, 1);
}
