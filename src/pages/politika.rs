use super::blocks::{titled_section, unique_texts, CONTENT};
use super::{title_header, PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{element_text, MetadataRules, PageMetadata, Scraper};

pub struct Politika;

const SECTIONS: &[&str] = &[
    "1. Определение терминов",
    "2. Общие положения",
    "3. Предмет политики конфиденциальности",
    "4. Цели сбора персональной информации пользователя",
    "5. Способы и сроки обработки персональной информации",
    "6. Права и обязанности сторон",
    "7. Ответственность сторон",
    "8. Разрешение споров",
    "9. Дополнительные условия",
];

fn intro(page: &Scraper) -> Result<Vec<String>> {
    Ok(page
        .first_text(&format!("{} > p:first-child", CONTENT))?
        .into_iter()
        .collect())
}

/// The two paragraphs before the last one; the last is the signature line.
fn footer(page: &Scraper) -> Result<Vec<String>> {
    let paragraphs = page.select_all(&format!("{} > p", CONTENT))?;
    let end = paragraphs.len().saturating_sub(1);
    let start = paragraphs.len().saturating_sub(3);
    Ok(paragraphs[start..end]
        .iter()
        .filter_map(|p| element_text(*p))
        .collect())
}

impl SitePage for Politika {
    fn name(&self) -> &'static str {
        "DPO_politika-konfidentsialnosti-personalnyh-dannyh"
    }

    fn path(&self) -> &'static str {
        "/politika-konfidentsialnosti-personalnyh-dannyh"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Политика конфиденциальности", "Образование"],
            &["ДПО", "конфиденциальность", "персональные данные", "политика"],
        )
        .title_fallback(DEFAULT_ANCHOR)
        .describe_with(intro, false)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, DEFAULT_ANCHOR, ctx, PAGE_LINK_LABEL, body)?;
        body.lines(intro(page)?);

        for needle in SECTIONS {
            let Some((title, elements)) = titled_section(page, "h2", needle)? else {
                continue;
            };
            body.heading(2, &title);
            body.lines(unique_texts(&elements, false)?);
        }

        body.lines(footer(page)?);
        Ok(())
    }
}
