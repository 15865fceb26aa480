use crate::{bulletin::BulletinData, document::Document};
use std::fs;
use std::path::{Path, PathBuf};

/// File the most recent payload is kept in, beside the templates.
pub const LATEST_FILE: &str = "latest.json";

const TEMPLATE_EXTENSION: &str = "json";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid template name: {0:?}")]
    InvalidTemplateName(String),
}

/// Read and parse a bulletin payload
pub fn read_bulletin(path: &Path) -> Result<BulletinData, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a built document as pretty-printed JSON
pub fn write_document(doc: &Document, path: &Path) -> Result<(), IoError> {
    write_json(path, &serde_json::to_string_pretty(doc)?)
}

/// Keep a copy of the payload as `latest.json` in `dir`
pub fn save_latest(data: &BulletinData, dir: &Path) -> Result<PathBuf, IoError> {
    let path = dir.join(LATEST_FILE);
    write_json(&path, &serde_json::to_string_pretty(data)?)?;
    Ok(path)
}

fn write_json(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Keeps only ASCII letters, digits, `_`, `-` and spaces. `None` if nothing
/// usable remains.
pub fn safe_filename(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .collect();
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Named payload templates stored as `<name>.json` in one directory.
///
/// Templates are kept as raw JSON so partially filled payloads survive a
/// round trip.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Template names, sorted. A missing directory holds no templates.
    pub fn list(&self) -> Result<Vec<String>, IoError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file()
                && let Some(ext) = path.extension()
                && ext == TEMPLATE_EXTENSION
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && stem != "latest"
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn load(&self, name: &str) -> Result<serde_json::Value, IoError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(IoError::NotFound(path));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Saves under the sanitized name, which is returned.
    pub fn save(&self, name: &str, template: &serde_json::Value) -> Result<String, IoError> {
        let path = self.path_for(name)?;
        write_json(&path, &serde_json::to_string_pretty(template)?)?;
        log::info!("saved template {}", path.display());
        Ok(path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string())
    }

    pub fn delete(&self, name: &str) -> Result<(), IoError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(IoError::NotFound(path));
        }
        fs::remove_file(&path)?;
        log::info!("deleted template {}", path.display());
        Ok(())
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, IoError> {
        let safe =
            safe_filename(name).ok_or_else(|| IoError::InvalidTemplateName(name.to_string()))?;
        Ok(self.root.join(format!("{safe}.{TEMPLATE_EXTENSION}")))
    }
}
