pub mod answer_key;
pub mod engine;
pub mod eval;
pub mod provider;
pub mod shuffle;
pub mod token;

pub use answer_key::{
    AnswerEntry, AnswerEntryData, AnswerFileData, AnswerSetData, QuizSnapshot, SnapshotError,
};
pub use engine::{NotReady, SubmitError, TagQuizEngine};
pub use eval::{evaluate, EvaluationResult};
pub use provider::{AnswerKeyProvider, LoadError, MemoryProvider};
pub use shuffle::shuffle;
pub use token::{TagToken, TagTokenError};
