use std::fmt;

use crate::answer_key::{AnswerFileData, AnswerSetData, SnapshotError};

/// Read-only source of answer sets, keyed by answer-set identifier.
/// Implementations own transport and decoding; the engine only ever sees
/// the decoded data or a `LoadError`.
pub trait AnswerKeyProvider {
    fn answer_set(&self, id: &str) -> Result<AnswerSetData, LoadError>;
}

/// Provider over an already-decoded answers file. Backs the file provider
/// in the CLI and the test suites.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    sets: AnswerFileData,
}

impl MemoryProvider {
    pub fn new(sets: AnswerFileData) -> Self {
        Self { sets }
    }

    pub fn insert(&mut self, id: impl Into<String>, data: AnswerSetData) {
        self.sets.insert(id.into(), data);
    }

    pub fn set_ids(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn get(&self, id: &str) -> Option<&AnswerSetData> {
        self.sets.get(id)
    }
}

impl AnswerKeyProvider for MemoryProvider {
    fn answer_set(&self, id: &str) -> Result<AnswerSetData, LoadError> {
        self.sets
            .get(id)
            .cloned()
            .ok_or_else(|| LoadError::UnknownAnswerSet(id.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    UnknownAnswerSet(String),
    Io(String),
    Parse(String),
    Invalid(SnapshotError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::UnknownAnswerSet(id) => write!(f, "answer set '{id}' not found"),
            LoadError::Io(message) => write!(f, "failed to read answers: {message}"),
            LoadError::Parse(message) => write!(f, "failed to parse answers: {message}"),
            LoadError::Invalid(error) => write!(f, "invalid answer set: {error}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Invalid(error) => Some(error),
            _ => None,
        }
    }
}
