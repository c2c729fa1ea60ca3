use super::text::{remove_accents, summarize, NO_DESCRIPTION};
use super::Scraper;
use crate::error::Result;
use serde::Serialize;

const NO_TITLE: &str = "Без названия";

/// Texts a page summarises when it has no meta description.
pub type DescriptionSource = fn(&Scraper) -> Result<Vec<String>>;

/// YAML front matter of a page file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub url: String,
    pub date: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Clone, Copy)]
pub struct MetadataRules {
    pub categories: &'static [&'static str],
    pub tags: &'static [&'static str],
    /// Element read for the title when `<title>` is missing or blank.
    pub title_fallback: Option<&'static str>,
    pub remove_accents: bool,
    /// Texts summarised when the meta description is missing or blank.
    pub description_fallback: Option<DescriptionSource>,
    /// Drop `# * [ ]` from the summary.
    pub strip_summary: bool,
}

impl MetadataRules {
    pub const fn new(categories: &'static [&'static str], tags: &'static [&'static str]) -> Self {
        Self {
            categories,
            tags,
            title_fallback: None,
            remove_accents: false,
            description_fallback: None,
            strip_summary: true,
        }
    }

    pub const fn describe_with(mut self, fallback: DescriptionSource, strip: bool) -> Self {
        self.description_fallback = Some(fallback);
        self.strip_summary = strip;
        self
    }

    pub const fn title_fallback(mut self, css: &'static str) -> Self {
        self.title_fallback = Some(css);
        self
    }

    pub const fn without_accents(mut self) -> Self {
        self.remove_accents = true;
        self
    }

    pub fn extract(&self, page: &Scraper, url: &str, date: &str) -> Result<PageMetadata> {
        let title = self.title(page)?;
        let description = match page.meta_content("description")? {
            Some(content) => content,
            None => match self.description_fallback {
                Some(source) => summarize(&source(page)?, self.strip_summary),
                None => NO_DESCRIPTION.to_string(),
            },
        };

        Ok(PageMetadata {
            title,
            description: self.fold(description),
            url: url.to_string(),
            date: date.to_string(),
            categories: to_strings(self.categories),
            tags: to_strings(self.tags),
        })
    }

    fn title(&self, page: &Scraper) -> Result<String> {
        let mut title = page.first_text("title")?;
        if title.is_none() {
            if let Some(css) = self.title_fallback {
                title = page.first_text(css)?;
            }
        }
        Ok(self.fold(title.unwrap_or_else(|| NO_TITLE.to_string())))
    }

    fn fold(&self, text: String) -> String {
        if self.remove_accents {
            remove_accents(&text)
        } else {
            text
        }
    }
}

impl PageMetadata {
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
