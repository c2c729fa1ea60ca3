use crate::error::Result;
use crate::scraper::PageMetadata;
use crate::utils::save_markdown;
use std::path::{Path, PathBuf};

pub fn link(text: &str, url: &str) -> String {
    format!("[{}]({})", text, url)
}

/// Body lines of a page file. Blank lines are dropped on push; only
/// [`MarkdownBody::separator`] adds an empty line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MarkdownBody {
    lines: Vec<String>,
}

impl MarkdownBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.lines.push(text);
        }
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.line(line);
        }
        self
    }

    pub fn heading(&mut self, level: usize, text: &str) -> &mut Self {
        if text.trim().is_empty() {
            return self;
        }
        self.line(format!("{} {}", "#".repeat(level), text.trim()))
    }

    /// `- item`
    pub fn bullet(&mut self, text: &str) -> &mut Self {
        if text.trim().is_empty() {
            return self;
        }
        self.line(format!("- {}", text))
    }

    /// `• item`
    pub fn dot(&mut self, text: &str) -> &mut Self {
        if text.trim().is_empty() {
            return self;
        }
        self.line(format!("• {}", text))
    }

    pub fn page_link(&mut self, label: &str, url: &str) -> &mut Self {
        self.line(link(label, url))
    }

    pub fn separator(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Markdown table. Pipes inside cells are escaped, multi-line cells are
    /// joined with `<br>`.
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> &mut Self {
        let header = headers.iter().map(|h| h.to_string()).collect::<Vec<_>>();
        self.line(table_row(&header));
        self.line(format!("|{}", "---|".repeat(headers.len())));
        for row in rows {
            self.line(table_row(row));
        }
        self
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }
}

fn table_row(cells: &[String]) -> String {
    let cells = cells
        .iter()
        .map(|cell| {
            cell.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join("<br>")
                .replace('|', "\\|")
        })
        .collect::<Vec<_>>();
    format!("| {} |", cells.join(" | "))
}

#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    pub front_matter: PageMetadata,
    pub body: MarkdownBody,
}

impl MarkdownDocument {
    pub fn new(front_matter: PageMetadata, body: MarkdownBody) -> Self {
        Self { front_matter, body }
    }

    pub fn render(&self) -> Result<String> {
        let yaml = self.front_matter.to_yaml()?;
        let mut out = format!("---\n{}---", yaml);
        for line in self.body.as_lines() {
            out.push('\n');
            out.push_str(line);
        }
        Ok(out)
    }

    /// Writes `{dir}/{name}.md` and returns its path.
    pub fn write_to(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        let path = dir.join(format!("{}.md", name));
        save_markdown(&path, &self.render()?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> PageMetadata {
        PageMetadata {
            title: "FAQ".into(),
            description: "Ответы".into(),
            url: "https://academydpo.org/faq".into(),
            date: "2024-05-01".into(),
            categories: vec!["FAQ".into()],
            tags: vec!["ДПО".into()],
        }
    }

    #[test]
    fn blank_lines_are_dropped_but_separators_kept() {
        let mut body = MarkdownBody::new();
        body.heading(1, "Заголовок")
            .line("   ")
            .bullet("")
            .separator()
            .dot("пункт");
        assert_eq!(body.as_lines(), &["# Заголовок", "", "• пункт"]);
    }

    #[test]
    fn renders_front_matter_then_body_without_trailing_newline() {
        let mut body = MarkdownBody::new();
        body.heading(1, "FAQ").page_link("Перейти к странице", "https://x/faq");
        let doc = MarkdownDocument::new(metadata(), body);
        let rendered = doc.render().unwrap();
        assert!(rendered.starts_with("---\ntitle: FAQ\n"));
        assert!(rendered.ends_with("tags:\n- ДПО\n---\n# FAQ\n[Перейти к странице](https://x/faq)"));
    }

    #[test]
    fn table_escapes_pipes_and_joins_lines() {
        let mut body = MarkdownBody::new();
        body.table(
            &["Условие", "Наличие"],
            &[vec!["a|b".into(), "- да\n- нет".into()]],
        );
        assert_eq!(
            body.as_lines(),
            &[
                "| Условие | Наличие |",
                "|---|---|",
                "| a\\|b | - да<br>- нет |"
            ]
        );
    }

    #[test]
    fn write_to_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = MarkdownDocument::new(metadata(), MarkdownBody::new());
        let path = doc.write_to(&dir.path().join("out"), "DPO_FAQ").unwrap();
        assert!(path.ends_with("DPO_FAQ.md"));
        assert!(std::fs::read_to_string(path).unwrap().starts_with("---\n"));
    }
}
