//! Editable translation instructions.
//!
//! The instruction text is handed to the generator with every request. It
//! has no effect on diffing or review.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{RenditionError, Result};

/// Get/set access to the instruction text.
pub trait PromptStore: Send + Sync {
    /// Current instructions; empty if none were set.
    fn get(&self) -> Result<String>;

    /// Replace the instructions.
    fn set(&self, text: &str) -> Result<()>;
}

/// Instructions kept in a plain text file.
pub struct FilePrompt {
    path: PathBuf,
}

impl FilePrompt {
    /// Create a prompt backed by `path`. A missing file reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PromptStore for FilePrompt {
    fn get(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&self.path).map_err(|e| RenditionError::Io {
            path: self.path.clone(),
            source: e,
        })
    }

    fn set(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| RenditionError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }
        fs::write(&self.path, text).map_err(|e| RenditionError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Instructions kept in memory.
#[derive(Default)]
pub struct MemoryPrompt {
    text: RwLock<String>,
}

impl MemoryPrompt {
    /// Create with initial text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: RwLock::new(text.into()),
        }
    }
}

impl PromptStore for MemoryPrompt {
    fn get(&self) -> Result<String> {
        self.text
            .read()
            .map(|t| t.clone())
            .map_err(|_| RenditionError::Config("Prompt lock poisoned".to_string()))
    }

    fn set(&self, text: &str) -> Result<()> {
        let mut guard = self
            .text
            .write()
            .map_err(|_| RenditionError::Config("Prompt lock poisoned".to_string()))?;
        *guard = text.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_prompt_round_trip() {
        let prompt = MemoryPrompt::new("Be formal");
        assert_eq!(prompt.get().unwrap(), "Be formal");

        prompt.set("Be casual").unwrap();
        assert_eq!(prompt.get().unwrap(), "Be casual");
    }

    #[test]
    fn test_missing_prompt_file_is_empty() {
        let prompt = FilePrompt::new("/nonexistent/prompt.txt");
        assert_eq!(prompt.get().unwrap(), "");
    }
}
