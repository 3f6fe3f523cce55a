// Corpus helpers — reading sample documents from disk.
//
// A document file holds the title on its first line and the body after it.
// Files in a corpus directory are read in name order so runs are repeatable.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// One sample document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: PathBuf,
    pub title: String,
    pub content: String,
}

impl Document {
    /// Split file text into title (first line) and content (the rest).
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let (title, content) = text.split_once('\n').unwrap_or((text, ""));
        Self {
            path: path.into(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
        }
    }

    /// Title and content joined, for scanners that want the whole text.
    pub fn full_text(&self) -> String {
        if self.title.is_empty() {
            return self.content.clone();
        }
        format!("{}\n{}", self.title, self.content)
    }
}

/// Read a single document file.
pub fn read_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    Ok(Document::parse(path, &text))
}

/// List the regular files of a corpus directory, sorted by name.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read corpus directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
