//! Layouts shared by several pages.

use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::text::normalize_text;
use crate::scraper::{
    child_elements, element_text, has_class, has_descendant, inner_text, section_after, select_in,
    tag_name, text_in, Scraper,
};
use scraper::ElementRef;
use std::collections::HashSet;

pub const CONTENT: &str = "div.page__content-desc";

/// How [`content_blocks`] treats optional markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockStyle {
    /// `<em>` paragraphs become `*text*`.
    pub emphasis: bool,
    /// `div.table` children become tab separated rows.
    pub tables: bool,
}

/// Lays out the direct children of the page content block: styled paragraphs,
/// numbered and bulleted lists, and optionally accessibility tables.
pub fn content_blocks(page: &Scraper, style: BlockStyle, body: &mut MarkdownBody) -> Result<()> {
    let Some(content) = page.select_first(CONTENT)? else {
        return Ok(());
    };

    for child in child_elements(content) {
        match tag_name(&child) {
            "p" => {
                let Some(text) = element_text(child) else {
                    continue;
                };
                let strong = has_descendant(child, "strong");
                if strong && has_descendant(child, "u") {
                    body.heading(3, &text);
                } else if strong {
                    body.line(format!("**{}**", text));
                } else if style.emphasis && has_descendant(child, "em") {
                    body.line(format!("*{}*", text));
                } else {
                    body.line(text);
                }
            }
            "ol" => {
                let items: Vec<String> = select_in(child, "li")?
                    .into_iter()
                    .enumerate()
                    .filter_map(|(idx, li)| element_text(li).map(|t| format!("{}. {}", idx + 1, t)))
                    .collect();
                if !items.is_empty() {
                    body.line(items.join("\n"));
                }
            }
            "ul" => {
                let items: Vec<String> = select_in(child, "li")?
                    .into_iter()
                    .filter_map(element_text)
                    .map(|t| format!("• {}", t))
                    .collect();
                if !items.is_empty() {
                    body.line(items.join("\n"));
                }
            }
            "div" if style.tables && has_class(&child, "table") => {
                let mut rows = vec!["Условия доступной среды\tНаличие".to_string()];
                for row in select_in(child, "table tbody tr")? {
                    let title = text_in(row, "td:nth-child(1)")?;
                    let data = text_in(row, "td:nth-child(2)")?;
                    if let (Some(title), Some(data)) = (title, data) {
                        rows.push(format!("{}\t{}", title, data));
                    }
                }
                body.line(rows.join("\n"));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Text of the `<p>` elements of a table cell, one per line.
pub fn cell_paragraphs(cell: ElementRef<'_>) -> Result<String> {
    Ok(select_in(cell, "p")?
        .into_iter()
        .filter_map(element_text)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Cell paragraphs normalised into one line, `—` for an empty cell.
pub fn normalized_cell(cell: ElementRef<'_>) -> Result<String> {
    Ok(normalize_text(&cell_paragraphs(cell)?).unwrap_or_else(|| "—".to_string()))
}

/// Paragraphs of the content block that come before any `h2`/`h3` sibling.
pub fn intro_paragraphs(page: &Scraper) -> Result<Vec<ElementRef<'_>>> {
    let paragraphs = page.select_all(&format!("{} p", CONTENT))?;
    Ok(paragraphs
        .into_iter()
        .filter(|p| {
            !p.prev_siblings()
                .filter_map(ElementRef::wrap)
                .any(|el| matches!(tag_name(&el), "h2" | "h3"))
        })
        .collect())
}

/// Rendered text of the intro paragraphs, blanks dropped.
pub fn intro_texts(page: &Scraper) -> Result<Vec<String>> {
    Ok(intro_paragraphs(page)?
        .into_iter()
        .filter_map(element_text)
        .collect())
}

/// Rendered text of the content block paragraphs.
pub fn content_paragraphs(page: &Scraper) -> Result<Vec<String>> {
    page.all_texts(&format!("{} p", CONTENT))
}

/// Heading text and the siblings after it up to the next heading of the same
/// tag, for the first `tag` element containing `needle`.
pub fn titled_section<'a>(
    page: &'a Scraper,
    tag: &str,
    needle: &str,
) -> Result<Option<(String, Vec<ElementRef<'a>>)>> {
    let Some(heading) = page.heading_containing(tag, needle)? else {
        return Ok(None);
    };
    Ok(Some((inner_text(heading), section_after(heading, &[tag]))))
}

/// Paragraph texts and `• ` list items of `elements`, first occurrence only.
pub fn unique_texts(elements: &[ElementRef<'_>], with_lists: bool) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for el in elements {
        let texts = match tag_name(el) {
            "p" => element_text(*el).into_iter().collect(),
            "ul" if with_lists => select_in(*el, "li")?
                .into_iter()
                .filter_map(element_text)
                .map(|t| format!("• {}", t))
                .collect(),
            _ => Vec::new(),
        };
        for text in texts {
            if seen.insert(text.clone()) {
                out.push(text);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body><div class="page__content-desc">
            <p><strong><u>Раздел</u></strong></p>
            <p><strong>Важно</strong></p>
            <p><em>Примечание</em></p>
            <p>Обычный текст</p>
            <p>   </p>
            <ol><li>первый</li><li>второй</li></ol>
            <ul><li>пункт</li></ul>
            <div class="table"><table><tbody>
                <tr><td>Пандус</td><td>Есть</td></tr>
                <tr><td>Лифт</td><td></td></tr>
            </tbody></table></div>
            <h2>Дальше</h2>
            <p>после заголовка</p>
        </div></body></html>
    "#;

    #[test]
    fn lays_out_styled_blocks() {
        let page = Scraper::new(PAGE);
        let mut body = MarkdownBody::new();
        content_blocks(&page, BlockStyle { emphasis: true, tables: false }, &mut body).unwrap();

        assert_eq!(
            body.as_lines(),
            &[
                "### Раздел",
                "**Важно**",
                "*Примечание*",
                "Обычный текст",
                "1. первый\n2. второй",
                "• пункт",
                "после заголовка"
            ]
        );
    }

    #[test]
    fn tables_keep_complete_rows_only() {
        let page = Scraper::new(PAGE);
        let mut body = MarkdownBody::new();
        content_blocks(&page, BlockStyle { emphasis: false, tables: true }, &mut body).unwrap();

        assert!(body.as_lines().contains(&"Примечание".to_string()));
        assert!(body
            .as_lines()
            .contains(&"Условия доступной среды\tНаличие\nПандус\tЕсть".to_string()));
    }

    #[test]
    fn titled_section_stops_at_next_heading() {
        let page = Scraper::new(
            r#"<div><h2>1. Термины</h2><p>a</p><ul><li>b</li></ul><p>a</p>
               <h2>2. Положения</h2><p>c</p></div>"#,
        );
        let (title, elements) = titled_section(&page, "h2", "Термины").unwrap().unwrap();
        assert_eq!(title, "1. Термины");
        assert_eq!(unique_texts(&elements, true).unwrap(), vec!["a", "• b"]);
        assert_eq!(unique_texts(&elements, false).unwrap(), vec!["a"]);
    }

    #[test]
    fn intro_stops_at_first_heading() {
        let page = Scraper::new(PAGE);
        let texts = intro_texts(&page).unwrap();
        assert!(texts.contains(&"Обычный текст".to_string()));
        assert!(!texts.contains(&"после заголовка".to_string()));
    }
}
