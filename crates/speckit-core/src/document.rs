use crate::error::Result;
use crate::io;
use std::path::{Path, PathBuf};

/// The full text of a tasks file, read whole and written back whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = io::read_document(path)?;
        Ok(Self::new(path, text))
    }

    pub fn save(&self) -> Result<()> {
        io::atomic_write(&self.path, self.text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_then_save_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.md");
        std::fs::write(&path, "- [ ] T001: Start\n").unwrap();

        let mut doc = Document::load(&path).unwrap();
        doc.text.push_str("- [ ] T002: Next\n");
        doc.save().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "- [ ] T001: Start\n- [ ] T002: Next\n"
        );
    }
}
