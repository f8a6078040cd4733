use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::{TagToken, TagTokenError};

/// Raw shape of one answer set as authored in the answers file:
/// `tagOptions` lists the playable pool, `tagAnswers` is a sequence of
/// single-entry maps binding a token to its correctness and feedback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSetData {
    #[serde(default)]
    pub tag_options: Vec<String>,
    #[serde(default)]
    pub tag_answers: Vec<BTreeMap<String, AnswerEntryData>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntryData {
    pub correct: bool,
    #[serde(default)]
    pub feedback: String,
}

/// Whole answers file: answer sets keyed by identifier.
pub type AnswerFileData = BTreeMap<String, AnswerSetData>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerEntry {
    pub correct: bool,
    pub feedback: String,
}

/// Immutable, validated per-quiz load: the playable token universe plus
/// the correctness key. Built once per `load_quiz` and held read-only for
/// the life of the quiz.
#[derive(Debug, Clone)]
pub struct QuizSnapshot {
    universe: Vec<TagToken>,
    key: BTreeMap<TagToken, AnswerEntry>,
}

impl QuizSnapshot {
    pub fn from_data(data: AnswerSetData) -> Result<Self, SnapshotError> {
        if data.tag_options.is_empty() {
            return Err(SnapshotError::NoOptions);
        }

        let mut universe = Vec::with_capacity(data.tag_options.len());
        for raw in &data.tag_options {
            let token = TagToken::parse(raw).map_err(|reason| SnapshotError::InvalidToken {
                value: raw.clone(),
                reason,
            })?;
            if universe.contains(&token) {
                return Err(SnapshotError::DuplicateToken(token));
            }
            universe.push(token);
        }

        let mut key = BTreeMap::new();
        for mapping in &data.tag_answers {
            for (raw, entry) in mapping {
                let token = TagToken::parse(raw).map_err(|reason| SnapshotError::InvalidToken {
                    value: raw.clone(),
                    reason,
                })?;
                // First entry wins, matching lookup order in the source data.
                key.entry(token).or_insert_with(|| AnswerEntry {
                    correct: entry.correct,
                    feedback: entry.feedback.clone(),
                });
            }
        }

        Ok(Self { universe, key })
    }

    /// Playable tokens, in authored order.
    pub fn universe(&self) -> &[TagToken] {
        &self.universe
    }

    pub fn entry(&self, token: &TagToken) -> Option<&AnswerEntry> {
        self.key.get(token)
    }

    pub fn len(&self) -> usize {
        self.universe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    NoOptions,
    InvalidToken { value: String, reason: TagTokenError },
    DuplicateToken(TagToken),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NoOptions => write!(f, "answer set has no tag options"),
            SnapshotError::InvalidToken { value, reason } => {
                write!(f, "invalid tag token {value:?}: {reason}")
            }
            SnapshotError::DuplicateToken(token) => {
                write!(f, "duplicate tag token {token:?}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
