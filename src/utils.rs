use crate::error::{Result, ScraperError};
use crate::log_info;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn ensure_directory(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn save_markdown(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;

    log_info!("[utils] Saved markdown to {}", path.display());
    Ok(())
}

/// Every `*.md` file directly inside `dir`, sorted by path.
pub fn list_markdown_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let pattern = dir.as_ref().join("*.md");
    let pattern = pattern.to_string_lossy();

    let entries = glob::glob(&pattern)
        .map_err(|e| ScraperError::ParseError(format!("Invalid glob {}: {}", pattern, e)))?;

    let mut files: Vec<PathBuf> = entries.filter_map(|entry| entry.ok()).collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_markdown_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.md", "a.md", "notes.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let names: Vec<_> = list_markdown_files(dir.path())
            .unwrap()
            .into_iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn save_creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("page.md");
        save_markdown(&path, "# Заголовок").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "# Заголовок");
    }
}
