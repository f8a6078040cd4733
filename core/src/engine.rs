use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::answer_key::QuizSnapshot;
use crate::eval::{evaluate, EvaluationResult};
use crate::provider::{AnswerKeyProvider, LoadError};
use crate::shuffle::shuffle;
use crate::token::TagToken;

/// State machine for one quiz widget instance. Unloaded until a
/// successful `load_quiz`; once loaded it owns the disjoint
/// available/selected partition and the submitted latch.
pub struct TagQuizEngine<R: Rng = StdRng> {
    rng: R,
    quiz: Option<LoadedQuiz>,
}

struct LoadedQuiz {
    snapshot: QuizSnapshot,
    available: Vec<TagToken>,
    selected: Vec<TagToken>,
    submitted: bool,
    result: Option<EvaluationResult>,
}

impl TagQuizEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for TagQuizEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TagQuizEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, quiz: None }
    }

    /// Fetches and validates the answer set, then replaces any current
    /// quiz with a fresh partition: the full universe shuffled into
    /// `available`, nothing selected, unlocked. On any failure the
    /// previous state is left untouched.
    pub fn load_quiz(
        &mut self,
        provider: &impl AnswerKeyProvider,
        id: &str,
    ) -> Result<(), LoadError> {
        let data = provider.answer_set(id)?;
        let snapshot = QuizSnapshot::from_data(data).map_err(LoadError::Invalid)?;
        let mut available = snapshot.universe().to_vec();
        shuffle(&mut available, &mut self.rng);
        self.quiz = Some(LoadedQuiz {
            snapshot,
            available,
            selected: Vec::new(),
            submitted: false,
            result: None,
        });
        Ok(())
    }

    /// Moves a token from the available pool to the end of the selected
    /// pool. Silently ignored when locked, already selected, or not part
    /// of the universe; duplicate UI events must not corrupt the
    /// partition.
    pub fn move_to_selected(&mut self, token: &TagToken) -> Result<(), NotReady> {
        let quiz = self.quiz.as_mut().ok_or(NotReady)?;
        if quiz.submitted || quiz.selected.contains(token) {
            return Ok(());
        }
        if let Some(index) = quiz.available.iter().position(|t| t == token) {
            let token = quiz.available.remove(index);
            quiz.selected.push(token);
        }
        Ok(())
    }

    /// Inverse of `move_to_selected`; the token is appended to the
    /// available pool.
    pub fn move_to_available(&mut self, token: &TagToken) -> Result<(), NotReady> {
        let quiz = self.quiz.as_mut().ok_or(NotReady)?;
        if quiz.submitted || quiz.available.contains(token) {
            return Ok(());
        }
        if let Some(index) = quiz.selected.iter().position(|t| t == token) {
            let token = quiz.selected.remove(index);
            quiz.available.push(token);
        }
        Ok(())
    }

    /// Locks the partition and evaluates the selected pool. An empty
    /// selection is rejected without locking. Submitting again while
    /// locked returns the cached result.
    pub fn submit(&mut self) -> Result<&EvaluationResult, SubmitError> {
        let quiz = self.quiz.as_mut().ok_or(SubmitError::NotReady)?;
        if !quiz.submitted {
            if quiz.selected.is_empty() {
                return Err(SubmitError::NothingSelected);
            }
            quiz.result = Some(evaluate(&quiz.selected, &quiz.snapshot));
            quiz.submitted = true;
        }
        match quiz.result.as_ref() {
            Some(result) => Ok(result),
            None => Err(SubmitError::NotReady),
        }
    }

    /// Returns every token to the available pool (selected tokens after
    /// the remaining available ones, then reshuffled), clears the cached
    /// result, and unlocks. Valid in any state; a no-op before a quiz is
    /// loaded.
    pub fn reset(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.available.append(&mut quiz.selected);
            shuffle(&mut quiz.available, &mut self.rng);
            quiz.submitted = false;
            quiz.result = None;
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.quiz.is_some()
    }

    pub fn available(&self) -> &[TagToken] {
        self.quiz
            .as_ref()
            .map(|quiz| quiz.available.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected(&self) -> &[TagToken] {
        self.quiz
            .as_ref()
            .map(|quiz| quiz.selected.as_slice())
            .unwrap_or(&[])
    }

    pub fn submitted(&self) -> bool {
        self.quiz.as_ref().is_some_and(|quiz| quiz.submitted)
    }

    pub fn last_result(&self) -> Option<&EvaluationResult> {
        self.quiz.as_ref().and_then(|quiz| quiz.result.as_ref())
    }

    pub fn snapshot(&self) -> Option<&QuizSnapshot> {
        self.quiz.as_ref().map(|quiz| &quiz.snapshot)
    }
}

/// A pool command arrived before a quiz was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotReady;

impl fmt::Display for NotReady {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no quiz loaded")
    }
}

impl std::error::Error for NotReady {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    NotReady,
    NothingSelected,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotReady => write!(f, "no quiz loaded"),
            SubmitError::NothingSelected => write!(f, "no tags selected"),
        }
    }
}

impl std::error::Error for SubmitError {}
