//! Property tests for record invariants under arbitrary operation sequences

use intake_domain::{FieldRegistry, RemediationChoice, SourceTag, AUTO_CONFIRM_THRESHOLD};
use intake_engine::{Engine, Input};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Text(String),
    Form(String, String),
    Research(String),
    Edit(String, String),
    Confirm(String, bool),
    Remediate(String, RemediationChoice),
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("project_name".to_string()),
        Just("goal".to_string()),
        Just("timeline".to_string()),
        Just("budget".to_string()),
    ]
}

fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Build a new mobile app by Q3 2025 with a budget of $250k".to_string()),
        Just("Launch Project Falcon by March 2026".to_string()),
        Just("We have $80k to spend".to_string()),
        Just(String::new()),
        "[a-zA-Z$0-9 ,.]{0,40}",
    ]
}

fn choice() -> impl Strategy<Value = RemediationChoice> {
    prop_oneof![
        Just(RemediationChoice::Manual),
        Just(RemediationChoice::Public),
        Just(RemediationChoice::Assumed),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        text().prop_map(Op::Text),
        (key(), "[a-z$0-9 ]{0,12}").prop_map(|(k, v)| Op::Form(k, v)),
        text().prop_map(Op::Research),
        (key(), "[a-z$0-9 ]{0,12}").prop_map(|(k, v)| Op::Edit(k, v)),
        (key(), any::<bool>()).prop_map(|(k, c)| Op::Confirm(k, c)),
        (key(), choice()).prop_map(|(k, c)| Op::Remediate(k, c)),
    ]
}

fn run(engine: &mut Engine, op: &Op) {
    // Refusals are expected (confirming empty fields, remediating filled ones)
    let _ = match op {
        Op::Text(t) => engine.resolve(Input::NaturalLanguage(t.clone())).map(|_| ()),
        Op::Form(k, v) => engine.resolve(Input::form([(k.clone(), v.clone())])).map(|_| ()),
        Op::Research(t) => engine.resolve(Input::Research(t.clone())).map(|_| ()),
        Op::Edit(k, v) => engine.edit(k, v).map(|_| ()),
        Op::Confirm(k, c) => engine.set_confirmed(k, *c).map(|_| ()),
        Op::Remediate(k, c) => engine.remediate(k, *c).map(|_| ()),
    };
}

proptest! {
    #[test]
    fn prop_every_field_keeps_one_valid_record(ops in prop::collection::vec(op(), 0..25)) {
        let mut engine = Engine::with_defaults().unwrap();
        for op in &ops {
            run(&mut engine, op);

            let registry = FieldRegistry::intake();
            prop_assert_eq!(engine.records().len(), registry.len());
            for key in registry.keys() {
                let record = engine.record(key).unwrap();
                prop_assert!(record.check_invariants().is_ok(), "{:?}", record);
            }
        }
    }

    #[test]
    fn prop_failed_operations_change_nothing(ops in prop::collection::vec(op(), 0..25)) {
        let mut engine = Engine::with_defaults().unwrap();
        for op in &ops {
            let before = engine.records().clone();
            let failed = match op {
                Op::Confirm(k, c) => engine.set_confirmed(k, *c).is_err(),
                Op::Remediate(k, c) => engine.remediate(k, *c).is_err(),
                other => {
                    run(&mut engine, other);
                    false
                }
            };
            if failed {
                prop_assert_eq!(engine.records(), &before);
            }
        }
    }

    #[test]
    fn prop_confirmation_follows_threshold(form_value in "[a-z$0-9]{1,12}", text in text()) {
        let mut engine = Engine::with_defaults().unwrap();
        engine.resolve(Input::NaturalLanguage(text)).unwrap();
        for record in engine.records().values().filter(|r| r.provenance == SourceTag::NaturalLanguage) {
            prop_assert_eq!(record.confirmed, record.confidence.meets(AUTO_CONFIRM_THRESHOLD));
        }

        engine.resolve(Input::form([("goal", form_value)])).unwrap();
        let goal = engine.record("goal").unwrap();
        prop_assert_eq!(goal.confirmed, goal.confidence.meets(AUTO_CONFIRM_THRESHOLD));
    }

    #[test]
    fn prop_research_never_confirms(note in "[a-zA-Z ]{1,40}") {
        prop_assume!(!note.trim().is_empty());
        let mut engine = Engine::with_defaults().unwrap();
        engine.resolve(Input::Research(note.clone())).unwrap();
        let goal = engine.record("goal").unwrap();
        prop_assert!(!goal.confirmed);
        prop_assert_eq!(&goal.value, &note);
    }

    #[test]
    fn prop_resolve_is_idempotent(text in text(), form_value in "[a-z$0-9 ]{0,12}") {
        let mut engine = Engine::with_defaults().unwrap();
        let inputs = [
            Input::NaturalLanguage(text),
            Input::form([("budget", form_value)]),
        ];
        for input in inputs {
            let once = engine.resolve(input.clone()).unwrap().clone();
            let twice = engine.resolve(input).unwrap().clone();
            prop_assert_eq!(once, twice);
        }
    }
}
