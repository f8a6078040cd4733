use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tagquiz_core::{
    AnswerEntryData, AnswerSetData, LoadError, MemoryProvider, NotReady, SubmitError, TagQuizEngine,
    TagToken,
};

fn tok(value: &str) -> TagToken {
    TagToken::parse(value).unwrap()
}

fn abc_provider() -> MemoryProvider {
    let mut data = AnswerSetData::default();
    for (token, correct, feedback) in [
        ("A", true, "A is right"),
        ("B", false, "B does not belong"),
        ("C", true, "C is right"),
    ] {
        data.tag_options.push(token.to_string());
        let mut mapping = BTreeMap::new();
        mapping.insert(
            token.to_string(),
            AnswerEntryData {
                correct,
                feedback: feedback.to_string(),
            },
        );
        data.tag_answers.push(mapping);
    }
    let mut provider = MemoryProvider::default();
    provider.insert("default", data);
    provider
}

fn loaded_engine(seed: u64) -> TagQuizEngine<StdRng> {
    let mut engine = TagQuizEngine::with_rng(StdRng::seed_from_u64(seed));
    engine.load_quiz(&abc_provider(), "default").unwrap();
    engine
}

fn assert_partition(engine: &TagQuizEngine<StdRng>, universe: &[TagToken]) {
    let available = engine.available();
    let selected = engine.selected();
    assert_eq!(available.len() + selected.len(), universe.len());
    for token in universe {
        let in_available = available.contains(token);
        let in_selected = selected.contains(token);
        assert!(
            in_available != in_selected,
            "token {token} must live in exactly one pool"
        );
    }
}

#[test]
fn load_shuffles_full_universe_into_available() {
    let engine = loaded_engine(1);
    assert!(engine.is_loaded());
    assert_eq!(engine.available().len(), 3);
    assert!(engine.selected().is_empty());
    assert!(!engine.submitted());
    assert!(engine.last_result().is_none());
}

#[test]
fn moves_keep_the_partition_disjoint_and_complete() {
    let universe = [tok("A"), tok("B"), tok("C")];
    let mut engine = loaded_engine(2);
    for step in [
        ("pick", "A"),
        ("pick", "B"),
        ("drop", "A"),
        ("pick", "C"),
        ("pick", "A"),
        ("drop", "B"),
    ] {
        match step.0 {
            "pick" => engine.move_to_selected(&tok(step.1)).unwrap(),
            _ => engine.move_to_available(&tok(step.1)).unwrap(),
        }
        assert_partition(&engine, &universe);
    }
    assert_eq!(engine.selected(), &[tok("C"), tok("A")]);
}

#[test]
fn selected_order_reflects_pick_order() {
    let mut engine = loaded_engine(3);
    engine.move_to_selected(&tok("C")).unwrap();
    engine.move_to_selected(&tok("A")).unwrap();
    assert_eq!(engine.selected(), &[tok("C"), tok("A")]);
}

#[test]
fn duplicate_and_unknown_moves_are_silent_noops() {
    let mut engine = loaded_engine(4);
    engine.move_to_selected(&tok("A")).unwrap();
    let available_before = engine.available().to_vec();
    let selected_before = engine.selected().to_vec();

    engine.move_to_selected(&tok("A")).unwrap();
    engine.move_to_available(&tok("B")).unwrap();
    engine.move_to_selected(&tok("Z")).unwrap();
    engine.move_to_available(&tok("Z")).unwrap();

    assert_eq!(engine.available(), available_before.as_slice());
    assert_eq!(engine.selected(), selected_before.as_slice());
    assert!(!engine.submitted());
}

#[test]
fn submit_scores_and_locks() {
    let mut engine = loaded_engine(5);
    engine.move_to_selected(&tok("A")).unwrap();
    engine.move_to_selected(&tok("C")).unwrap();
    let result = engine.submit().unwrap().clone();
    assert!(result.all_correct);
    assert_eq!(result.per_token[&tok("A")], true);
    assert_eq!(result.per_token[&tok("C")], true);
    assert!(engine.submitted());

    // The partition is frozen while locked.
    let available_before = engine.available().to_vec();
    engine.move_to_available(&tok("A")).unwrap();
    engine.move_to_selected(&tok("B")).unwrap();
    assert_eq!(engine.available(), available_before.as_slice());
    assert_eq!(engine.selected(), &[tok("A"), tok("C")]);
}

#[test]
fn submit_with_wrong_tag_is_not_all_correct() {
    let mut engine = loaded_engine(6);
    engine.move_to_selected(&tok("A")).unwrap();
    engine.move_to_selected(&tok("B")).unwrap();
    let result = engine.submit().unwrap();
    assert_eq!(result.per_token[&tok("A")], true);
    assert_eq!(result.per_token[&tok("B")], false);
    assert!(!result.all_correct);
}

#[test]
fn submit_is_idempotent_while_locked() {
    let mut engine = loaded_engine(7);
    engine.move_to_selected(&tok("B")).unwrap();
    let first = engine.submit().unwrap().clone();
    let second = engine.submit().unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(engine.last_result(), Some(&second));
}

#[test]
fn empty_submit_is_rejected_without_locking() {
    let mut engine = loaded_engine(8);
    assert_eq!(engine.submit().unwrap_err(), SubmitError::NothingSelected);
    assert!(!engine.submitted());
    engine.move_to_selected(&tok("A")).unwrap();
    assert_eq!(engine.selected(), &[tok("A")]);
}

#[test]
fn reset_restores_the_open_partition() {
    let universe = [tok("A"), tok("B"), tok("C")];
    let mut engine = loaded_engine(9);
    engine.move_to_selected(&tok("A")).unwrap();
    engine.move_to_selected(&tok("B")).unwrap();
    engine.submit().unwrap();

    engine.reset();
    assert!(!engine.submitted());
    assert!(engine.selected().is_empty());
    assert!(engine.last_result().is_none());
    assert_eq!(engine.available().len(), 3);
    assert_partition(&engine, &universe);

    // Unlocked again: moves work.
    engine.move_to_selected(&tok("C")).unwrap();
    assert_eq!(engine.selected(), &[tok("C")]);
}

#[test]
fn reset_is_idempotent() {
    let mut engine = loaded_engine(10);
    engine.move_to_selected(&tok("A")).unwrap();
    engine.reset();
    let first: Vec<TagToken> = {
        let mut sorted = engine.available().to_vec();
        sorted.sort();
        sorted
    };
    engine.reset();
    let mut second = engine.available().to_vec();
    second.sort();
    assert_eq!(first, second);
    assert!(engine.selected().is_empty());
    assert!(!engine.submitted());
}

#[test]
fn unloaded_engine_rejects_commands() {
    let mut engine = TagQuizEngine::with_rng(StdRng::seed_from_u64(11));
    assert!(!engine.is_loaded());
    assert_eq!(engine.move_to_selected(&tok("A")), Err(NotReady));
    assert_eq!(engine.move_to_available(&tok("A")), Err(NotReady));
    assert_eq!(engine.submit().unwrap_err(), SubmitError::NotReady);
    engine.reset();
    assert!(engine.available().is_empty());
    assert!(engine.selected().is_empty());
}

#[test]
fn unknown_answer_set_leaves_engine_unloaded() {
    let mut engine = TagQuizEngine::with_rng(StdRng::seed_from_u64(12));
    let error = engine.load_quiz(&abc_provider(), "missing").unwrap_err();
    assert_eq!(error, LoadError::UnknownAnswerSet("missing".to_string()));
    assert!(!engine.is_loaded());
    assert_eq!(engine.move_to_selected(&tok("A")), Err(NotReady));
}

#[test]
fn failed_reload_keeps_the_current_quiz() {
    let mut engine = loaded_engine(13);
    engine.move_to_selected(&tok("A")).unwrap();
    let selected_before = engine.selected().to_vec();

    assert!(engine.load_quiz(&abc_provider(), "missing").is_err());
    assert!(engine.is_loaded());
    assert_eq!(engine.selected(), selected_before.as_slice());
}

#[test]
fn invalid_answer_set_is_a_load_error() {
    let mut provider = MemoryProvider::default();
    provider.insert("empty", AnswerSetData::default());
    let mut data = AnswerSetData::default();
    data.tag_options = vec!["A".to_string(), "A".to_string()];
    provider.insert("dupes", data);

    let mut engine = TagQuizEngine::with_rng(StdRng::seed_from_u64(14));
    assert!(matches!(
        engine.load_quiz(&provider, "empty"),
        Err(LoadError::Invalid(_))
    ));
    assert!(matches!(
        engine.load_quiz(&provider, "dupes"),
        Err(LoadError::Invalid(_))
    ));
    assert!(!engine.is_loaded());
}

#[test]
fn evaluation_ignores_the_order_moves_happened_in() {
    let mut forward = loaded_engine(15);
    forward.move_to_selected(&tok("A")).unwrap();
    forward.move_to_selected(&tok("B")).unwrap();
    let forward_result = forward.submit().unwrap().clone();

    let mut backward = loaded_engine(16);
    backward.move_to_selected(&tok("B")).unwrap();
    backward.move_to_selected(&tok("A")).unwrap();
    let backward_result = backward.submit().unwrap().clone();

    assert_eq!(forward_result, backward_result);
}
