use std::fs;
use std::path::Path;

use tagquiz_core::{AnswerFileData, AnswerKeyProvider, AnswerSetData, LoadError, MemoryProvider};

/// File-backed answer key provider: reads and decodes the whole answers
/// file once, then serves lookups from memory.
pub struct FileProvider {
    sets: MemoryProvider,
}

impl FileProvider {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let contents = fs::read_to_string(path)
            .map_err(|err| LoadError::Io(format!("{}: {err}", path.display())))?;
        let sets: AnswerFileData = serde_json::from_str(&contents)
            .map_err(|err| LoadError::Parse(format!("{}: {err}", path.display())))?;
        Ok(Self {
            sets: MemoryProvider::new(sets),
        })
    }

    pub fn set_ids(&self) -> impl Iterator<Item = &str> {
        self.sets.set_ids()
    }

    pub fn option_count(&self, id: &str) -> Option<usize> {
        self.sets.get(id).map(|set| set.tag_options.len())
    }
}

impl AnswerKeyProvider for FileProvider {
    fn answer_set(&self, id: &str) -> Result<AnswerSetData, LoadError> {
        self.sets.answer_set(id)
    }
}
