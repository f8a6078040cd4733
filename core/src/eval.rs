use std::collections::BTreeMap;

use crate::answer_key::QuizSnapshot;
use crate::token::TagToken;

/// Outcome of one submission. Maps are keyed by token, so the result is
/// identical for any ordering of the selected pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    pub per_token: BTreeMap<TagToken, bool>,
    pub feedback: BTreeMap<TagToken, String>,
    /// Selected tokens with no answer entry. Scored as incorrect; kept
    /// separately so the integration layer can report the authoring gap.
    pub missing: Vec<TagToken>,
    pub all_correct: bool,
}

/// Scores the selected pool against the answer key. Pure with respect to
/// pool state; a token without an answer entry counts as incorrect rather
/// than failing the whole batch. `all_correct` requires a non-empty
/// selection even though the state machine already guards submission.
pub fn evaluate(selected: &[TagToken], snapshot: &QuizSnapshot) -> EvaluationResult {
    let mut per_token = BTreeMap::new();
    let mut feedback = BTreeMap::new();
    let mut missing = Vec::new();

    for token in selected {
        match snapshot.entry(token) {
            Some(entry) => {
                per_token.insert(token.clone(), entry.correct);
                feedback.insert(token.clone(), entry.feedback.clone());
            }
            None => {
                per_token.insert(token.clone(), false);
                if !missing.contains(token) {
                    missing.push(token.clone());
                }
            }
        }
    }
    missing.sort_unstable();

    let all_correct = !per_token.is_empty() && per_token.values().all(|correct| *correct);

    EvaluationResult {
        per_token,
        feedback,
        missing,
        all_correct,
    }
}
