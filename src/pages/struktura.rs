use super::blocks::{intro_texts, normalized_cell, CONTENT};
use super::{title_header, PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{select_in, MetadataRules, PageMetadata, Scraper};

pub struct Struktura;

const EMPTY_CELL: &str = "—";

/// Table rows as `cell | cell`, rows with nothing but empty cells dropped.
fn structure_rows(page: &Scraper) -> Result<Vec<String>> {
    let mut rows = Vec::new();
    for row in page.select_all(&format!("{} > div.table > table > tbody > tr", CONTENT))? {
        let cells = select_in(row, "td")?
            .into_iter()
            .map(normalized_cell)
            .collect::<Result<Vec<_>>>()?;
        if cells.iter().any(|cell| cell != EMPTY_CELL) {
            rows.push(cells.join(" | "));
        }
    }
    Ok(rows)
}

impl SitePage for Struktura {
    fn name(&self) -> &'static str {
        "DPO_struktura-i-organy-upravleniya"
    }

    fn path(&self) -> &'static str {
        "/struktura-i-organy-upravleniya"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Образование", "Управление"],
            &["ДПО", "структура", "органы управления"],
        )
        .describe_with(intro_texts, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, DEFAULT_ANCHOR, ctx, PAGE_LINK_LABEL, body)?;

        let rows = structure_rows(page)?;
        if !rows.is_empty() {
            body.heading(2, "Структура и органы управления").lines(rows);
        }
        Ok(())
    }
}
