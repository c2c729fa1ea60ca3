//! Combines the page files of a run into one report.

use crate::error::Result;
use crate::utils::{list_markdown_files, save_markdown};
use crate::{log_error, log_info, log_warn};
use chrono::Local;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const NO_FILES: &str = "Ошибка: Markdown-файлы не найдены.\n";
const LEFTOVERS_HEADING: &str = "Пропущенные или неожидаемые файлы";

pub struct ReportBuilder {
    output_dir: PathBuf,
    title: String,
    prefix: String,
    expected: HashSet<String>,
}

impl ReportBuilder {
    /// `expected_names` are the file stems of the registered pages.
    pub fn new<I, S>(output_dir: impl Into<PathBuf>, title: &str, expected_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            output_dir: output_dir.into(),
            title: title.trim().to_string(),
            prefix: title.trim().replace(' ', "_"),
            expected: expected_names
                .into_iter()
                .map(|name| format!("{}.md", name.as_ref()))
                .collect(),
        }
    }

    /// Page files to combine, earlier reports left out.
    pub fn inputs(&self) -> Result<Vec<PathBuf>> {
        let report_marker = format!("{}_", self.prefix);
        Ok(list_markdown_files(&self.output_dir)?
            .into_iter()
            .filter(|path| !file_name(path).starts_with(&report_marker))
            .collect())
    }

    /// Writes `{prefix}_{timestamp}.md` into the output directory.
    pub fn build(&self, missing: &[PathBuf]) -> Result<PathBuf> {
        let now = Local::now();
        let path = self
            .output_dir
            .join(format!("{}_{}.md", self.prefix, now.format("%Y%m%d_%H%M%S")));

        let inputs = self.inputs()?;
        log_info!("[report] Found {} markdown files", inputs.len());

        let content = self.compose(
            &inputs,
            missing,
            &now.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        save_markdown(&path, &content)?;

        log_info!("[report] Report written to {}", path.display());
        Ok(path)
    }

    /// Report text for `inputs`, with `created` as the creation stamp.
    pub fn compose(&self, inputs: &[PathBuf], missing: &[PathBuf], created: &str) -> String {
        let mut out = format!("# {}\nДата создания: {}\n", self.title, created);

        if inputs.is_empty() {
            log_error!("[report] No markdown files in {}", self.output_dir.display());
            out.push_str(NO_FILES);
            return out;
        }

        let mut added = HashSet::new();
        for path in inputs {
            let name = file_name(path);
            match fs::read_to_string(path) {
                Ok(content) => {
                    let stem = name.strip_suffix(".md").unwrap_or(&name);
                    out.push_str(&format!("\n## {}\n{}\n---\n", stem, clean_markdown(&content)));
                    added.insert(name);
                }
                Err(e) => {
                    log_error!("[report] Failed to read {}: {}", path.display(), e);
                    out.push_str(&format!("\n## Ошибка: {}\nПричина: {}\n---\n", name, e));
                }
            }
        }

        let not_added: Vec<String> = missing
            .iter()
            .map(|path| file_name(path))
            .filter(|name| !added.contains(name))
            .collect();
        let unexpected: Vec<String> = inputs
            .iter()
            .map(|path| file_name(path))
            .filter(|name| !self.expected.contains(name))
            .collect();

        if !missing.is_empty() || !unexpected.is_empty() {
            out.push_str(&format!("\n## {}\n", LEFTOVERS_HEADING));
            for name in &not_added {
                log_error!("[report] {} was not created", name);
                out.push_str(&format!("- {}: не создан или не добавлен\n", name));
            }
            for name in &unexpected {
                log_warn!("[report] {} found but not expected", name);
                out.push_str(&format!("- {}: найден, но не ожидался\n", name));
            }
        }

        out
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Tidies a page file for the report: trailing spaces and repeated blank
/// lines go, wrapped paragraph lines are joined. A leading front matter block
/// is kept as is.
pub fn clean_markdown(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();

    let front_end = match lines.first() {
        Some(first) if first.trim_end() == "---" => lines
            .iter()
            .skip(1)
            .position(|line| line.trim_end() == "---")
            .map(|pos| pos + 2),
        _ => None,
    };
    let (front, body) = lines.split_at(front_end.unwrap_or(0));

    let mut squeezed: Vec<&str> = Vec::new();
    for line in body.iter().map(|line| line.trim_end()) {
        if line.is_empty() && squeezed.last().is_some_and(|prev| prev.is_empty()) {
            continue;
        }
        squeezed.push(line);
    }
    while squeezed.last().is_some_and(|line| line.is_empty()) {
        squeezed.pop();
    }

    let mut joined: Vec<String> = Vec::new();
    let mut in_paragraph = false;
    for line in squeezed {
        let structural = line.is_empty() || line.starts_with('#') || line.starts_with('-');
        if structural {
            joined.push(line.to_string());
            in_paragraph = false;
        } else if in_paragraph {
            if let Some(last) = joined.last_mut() {
                last.push(' ');
                last.push_str(line);
            }
        } else {
            joined.push(line.to_string());
            in_paragraph = true;
        }
    }

    front
        .iter()
        .map(|line| line.to_string())
        .chain(joined)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_wrapped_paragraphs() {
        let content = "---\ntitle: FAQ\ncategories:\n- ДПО\n---\n# FAQ\nпервая\nвторая  \n\n\n\n- пункт\nтретья\n\n";
        assert_eq!(
            clean_markdown(content),
            "---\ntitle: FAQ\ncategories:\n- ДПО\n---\n# FAQ\nпервая вторая\n\n- пункт\nтретья"
        );
    }

    #[test]
    fn content_without_front_matter() {
        assert_eq!(clean_markdown("a\nb\n# c"), "a b\n# c");
        assert_eq!(clean_markdown(""), "");
    }

    #[test]
    fn unterminated_front_matter_is_body() {
        assert_eq!(clean_markdown("---\ntitle: x\nтекст"), "---\ntitle: x текст");
    }

    #[test]
    fn empty_directory_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ReportBuilder::new(dir.path(), "Раздел 1", ["DPO_FAQ"]);
        let report = builder.compose(&[], &[], "2024-05-01 10:00:00");
        assert_eq!(
            report,
            "# Раздел 1\nДата создания: 2024-05-01 10:00:00\nОшибка: Markdown-файлы не найдены.\n"
        );
    }
}
