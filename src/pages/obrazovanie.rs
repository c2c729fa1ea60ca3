use super::blocks::CONTENT;
use super::{title_header, PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{
    absolute_href, element_text, first_in, inner_text, select_in, text_in, MetadataRules,
    PageMetadata, Scraper,
};
use scraper::ElementRef;

pub struct Obrazovanie;

/// Column of the programmes table holding the document link.
const LINK_COLUMN: usize = 4;
const RESEARCH_MARKER: &str = "НАУЧНО-ИССЛЕДОВАТЕЛЬСКАЯ ДЕЯТЕЛЬНОСТЬ";

fn first_paragraph(page: &Scraper) -> Result<Vec<String>> {
    Ok(page
        .first_text(&format!("{} > p", CONTENT))?
        .into_iter()
        .collect())
}

/// `text (href)` for the first link matching `css` inside `element`.
fn inline_link(element: ElementRef<'_>, css: &str, base: &str) -> Result<Option<(String, String)>> {
    let Some(a) = first_in(element, css)? else {
        return Ok(None);
    };
    let text = inner_text(a);
    let href = absolute_href(a, base).unwrap_or_default();
    Ok(Some((text.clone(), format!("{} ({})", text, href))))
}

/// First paragraph of a cell on one line; empty when the cell has none.
fn cell_text(cell: ElementRef<'_>) -> Result<String> {
    Ok(text_in(cell, "p")?
        .map(|text| text.lines().collect::<Vec<_>>().join(" "))
        .unwrap_or_default())
}

fn table_rows(table: ElementRef<'_>, link_column: Option<usize>, base: &str) -> Result<Vec<String>> {
    let mut rows = Vec::new();
    for row in select_in(table, "table > tbody > tr")? {
        let mut cells = Vec::new();
        for (idx, cell) in select_in(row, "td")?.into_iter().enumerate() {
            let linked = match link_column {
                Some(column) if column == idx => inline_link(cell, "p > a", base)?,
                _ => None,
            };
            match linked {
                Some((_, text)) => cells.push(text),
                None => cells.push(cell_text(cell)?),
            }
        }
        rows.push(cells.join(" | "));
    }
    Ok(rows)
}

impl SitePage for Obrazovanie {
    fn name(&self) -> &'static str {
        "DPO_obrazovanie"
    }

    fn path(&self) -> &'static str {
        "/obrazovanie"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Образование", "Научная деятельность"],
            &["ДПО", "образовательные программы", "научные исследования"],
        )
        .title_fallback(DEFAULT_ANCHOR)
        .describe_with(first_paragraph, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, DEFAULT_ANCHOR, ctx, PAGE_LINK_LABEL, body)?;

        let paragraphs = page.select_all(&format!("{} > p", CONTENT))?;
        let tables = page.select_all(&format!("{} > div.table", CONTENT))?;

        let intro: Vec<String> = paragraphs.iter().take(2).filter_map(|p| element_text(*p)).collect();
        if !intro.is_empty() {
            body.heading(2, "Описание").lines(intro);
        }

        if let Some(table) = tables.first() {
            let rows = table_rows(*table, Some(LINK_COLUMN), &ctx.url)?;
            if !rows.is_empty() {
                body.heading(2, "Образовательные программы").lines(rows);
            }
        }

        let mut after_table = Vec::new();
        for p in paragraphs.iter().skip(2).take(3) {
            let mut text = inner_text(*p);
            if text.contains("Положение") {
                if let Some((label, linked)) = inline_link(*p, "a", &ctx.url)? {
                    if !label.is_empty() {
                        text = text.replace(&label, &linked);
                    }
                }
            }
            after_table.push(text);
        }
        if !after_table.is_empty() {
            body.heading(2, "Описание").lines(after_table);
        }

        if let Some(research) = paragraphs
            .iter()
            .find(|p| inner_text(**p).contains(RESEARCH_MARKER))
        {
            body.heading(2, &inner_text(*research));
        }

        if let Some(table) = tables.get(1) {
            let rows = table_rows(*table, None, &ctx.url)?;
            if !rows.is_empty() {
                body.heading(2, "Научно-исследовательская деятельность").lines(rows);
            }
        }

        Ok(())
    }
}
