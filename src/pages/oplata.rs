use super::blocks::CONTENT;
use super::{title_header, PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::text::split_bullets;
use crate::scraper::{
    element_text, inner_text, section_after, tag_name, MetadataRules, PageMetadata, Scraper,
};

pub struct Oplata;

fn first_paragraph(page: &Scraper) -> Result<Vec<String>> {
    Ok(page
        .first_text(&format!("{} > p", CONTENT))?
        .into_iter()
        .collect())
}

impl SitePage for Oplata {
    fn name(&self) -> &'static str {
        "DPO_oplata-obrazovatelnyh-uslug"
    }

    fn path(&self) -> &'static str {
        "/oplata-obrazovatelnyh-uslug"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Оплата образовательных услуг", "Образование"],
            &["ДПО", "оплата обучения", "дистанционное обучение"],
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

        for heading in page.select_all("h2")? {
            body.heading(2, &inner_text(heading));
            for el in section_after(heading, &["h2"]) {
                let Some(text) = element_text(el) else {
                    continue;
                };
                match tag_name(&el) {
                    "h3" => {
                        body.heading(3, &text);
                    }
                    "p" => {
                        body.lines(split_bullets(&text));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}
