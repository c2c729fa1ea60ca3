pub mod metadata;
pub mod text;

pub use metadata::{MetadataRules, PageMetadata};

use crate::error::{Result, ScraperError};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements that start a new line in rendered text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "thead", "tfoot", "tr", "ul",
];

const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// A fetched page, parsed once and queried by the page scrapers.
pub struct Scraper {
    document: Html,
}

impl Scraper {
    pub fn new(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn select_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = parse_selector(css)?;
        Ok(self.document.select(&selector).collect())
    }

    pub fn select_first(&self, css: &str) -> Result<Option<ElementRef<'_>>> {
        let selector = parse_selector(css)?;
        Ok(self.document.select(&selector).next())
    }

    /// Rendered text of the first match, `None` when missing or blank.
    pub fn first_text(&self, css: &str) -> Result<Option<String>> {
        Ok(self.select_first(css)?.and_then(element_text))
    }

    /// Rendered text of every match, blanks dropped.
    pub fn all_texts(&self, css: &str) -> Result<Vec<String>> {
        Ok(self
            .select_all(css)?
            .into_iter()
            .filter_map(element_text)
            .collect())
    }

    /// First `tag` element whose rendered text contains `needle`.
    pub fn heading_containing(&self, tag: &str, needle: &str) -> Result<Option<ElementRef<'_>>> {
        Ok(self
            .select_all(tag)?
            .into_iter()
            .find(|el| inner_text(*el).contains(needle)))
    }

    /// Fails with [`ScraperError::PageNotReady`] when the page anchor is absent.
    pub fn require(&self, css: &str) -> Result<()> {
        match self.select_first(css)? {
            Some(_) => Ok(()),
            None => Err(ScraperError::PageNotReady(css.to_string()).into()),
        }
    }

    /// Trimmed `content` of `<meta name="...">`, `None` when missing or blank.
    pub fn meta_content(&self, name: &str) -> Result<Option<String>> {
        let element = self.select_first(&format!("meta[name='{}']", name))?;
        Ok(element
            .and_then(|el| el.value().attr("content"))
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(str::to_string))
    }
}

pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::SelectorError(format!("{}: {}", css, e)).into())
}

pub fn select_in<'a>(element: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let selector = parse_selector(css)?;
    Ok(element.select(&selector).collect())
}

pub fn first_in<'a>(element: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let selector = parse_selector(css)?;
    Ok(element.select(&selector).next())
}

/// Rendered text of the first `css` match inside `element`.
pub fn text_in(element: ElementRef<'_>, css: &str) -> Result<Option<String>> {
    Ok(first_in(element, css)?.and_then(element_text))
}

pub fn tag_name<'a>(element: &ElementRef<'a>) -> &'a str {
    element.value().name()
}

pub fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

pub fn has_descendant(element: ElementRef<'_>, tag: &str) -> bool {
    element
        .descendants()
        .skip(1)
        .any(|node| matches!(node.value(), Node::Element(el) if el.name() == tag))
}

/// Element children of `element`, in document order.
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Element siblings after `element`, in document order.
pub fn following_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// Siblings after `heading` up to (not including) the next element whose tag
/// is in `stop_tags`.
pub fn section_after<'a>(heading: ElementRef<'a>, stop_tags: &[&str]) -> Vec<ElementRef<'a>> {
    following_elements(heading)
        .take_while(|el| !stop_tags.contains(&tag_name(el)))
        .collect()
}

/// First sibling after `element` with the given tag.
pub fn next_sibling_tagged<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    following_elements(element).find(|el| tag_name(el) == tag)
}

/// `href` of `element` resolved against `base`.
pub fn absolute_href(element: ElementRef<'_>, base: &str) -> Option<String> {
    let href = element.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    match Url::parse(base).and_then(|base| base.join(href)) {
        Ok(url) => Some(url.to_string()),
        Err(_) => Some(href.to_string()),
    }
}

/// Rendered text, `None` when blank.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = inner_text(element);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Text of `element` laid out the way a browser renders it: block elements and
/// `<br>` break lines, source whitespace collapses, hidden elements are skipped.
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);

    raw.split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            }
            Node::Element(el) => {
                let name = el.name();
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push('\n');
                } else if name == "td" || name == "th" {
                    out.push(' ');
                }
                collect_text(child_element, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head>
            <title> Академия ДПО </title>
            <meta name="description" content="  Курсы онлайн ">
        </head><body>
            <div class="desc">
                <h2>Первый</h2>
                <p>Строка
                   с переносом в исходнике<br>вторая строка</p>
                <ul><li>один</li><li>два</li></ul>
                <script>var x = 1;</script>
                <h2>Второй</h2>
                <p>после</p>
            </div>
            <a class="doc" href="/files/a.pdf">Документ</a>
        </body></html>
    "#;

    #[test]
    fn inner_text_breaks_on_blocks_and_br_only() {
        let page = Scraper::new(PAGE);
        let p = page.select_first("div.desc p").unwrap().unwrap();
        assert_eq!(inner_text(p), "Строка с переносом в исходнике\nвторая строка");

        let ul = page.select_first("ul").unwrap().unwrap();
        assert_eq!(inner_text(ul), "один\nдва");
    }

    #[test]
    fn inner_text_skips_scripts() {
        let page = Scraper::new(PAGE);
        let desc = page.select_first("div.desc").unwrap().unwrap();
        assert!(!inner_text(desc).contains("var x"));
    }

    #[test]
    fn section_after_stops_at_next_heading() {
        let page = Scraper::new(PAGE);
        let first = page.heading_containing("h2", "Первый").unwrap().unwrap();
        let tags: Vec<_> = section_after(first, &["h2"])
            .iter()
            .map(|el| tag_name(el))
            .collect();
        assert_eq!(tags, vec!["p", "ul", "script"]);
    }

    #[test]
    fn meta_content_is_trimmed() {
        let page = Scraper::new(PAGE);
        assert_eq!(
            page.meta_content("description").unwrap().as_deref(),
            Some("Курсы онлайн")
        );
        assert_eq!(page.meta_content("keywords").unwrap(), None);
    }

    #[test]
    fn require_reports_missing_anchor() {
        let page = Scraper::new(PAGE);
        assert!(page.require("div.desc").is_ok());
        assert!(page.require("h1.page__content-title").is_err());
    }

    #[test]
    fn absolute_href_resolves_relative_links() {
        let page = Scraper::new(PAGE);
        let link = page.select_first("a.doc").unwrap().unwrap();
        assert_eq!(
            absolute_href(link, "https://academydpo.org/dokumenty").as_deref(),
            Some("https://academydpo.org/files/a.pdf")
        );
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let page = Scraper::new(PAGE);
        assert!(page.select_all("p[").is_err());
    }
}
