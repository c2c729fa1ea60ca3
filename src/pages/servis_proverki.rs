use super::{title_header, PageContext, SitePage, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{
    child_elements, element_text, has_class, next_sibling_tagged, select_in, tag_name,
    MetadataRules, PageMetadata, Scraper,
};

pub struct ServisProverki;

const ANCHOR: &str = "h1.valid_doc__title";
const DESC: &str = "div.valid_doc__desc";
const GOALS_MARKER: &str = "Целями создания Федерального реестра являются";

fn first_paragraph(page: &Scraper) -> Result<Vec<String>> {
    Ok(page
        .first_text(&format!("{} > p", DESC))?
        .into_iter()
        .collect())
}

impl SitePage for ServisProverki {
    fn name(&self) -> &'static str {
        "DPO_servis-proverki-dokumentov"
    }

    fn path(&self) -> &'static str {
        "/servis-proverki-dokumentov"
    }

    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Сервис проверки документов", "Образование"],
            &["ДПО", "проверка документов", "реестр", "образовательные услуги"],
        )
        .title_fallback(ANCHOR)
        .describe_with(first_paragraph, false)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, ANCHOR, ctx, PAGE_LINK_LABEL, body)?;

        let Some(desc) = page.select_first(DESC)? else {
            return Ok(());
        };

        let mut after_heading = false;
        for child in child_elements(desc) {
            match tag_name(&child) {
                "h1" if !after_heading && has_class(&child, "wp-block-heading") => {
                    after_heading = true;
                    if let Some(text) = element_text(child) {
                        body.heading(2, &text);
                    }
                }
                "p" => {
                    let Some(text) = element_text(child) else {
                        continue;
                    };
                    if !(after_heading && text.contains(GOALS_MARKER)) {
                        body.line(text);
                        continue;
                    }
                    let mut block = vec![text];
                    if let Some(list) = next_sibling_tagged(child, "ul") {
                        block.extend(
                            select_in(list, "li")?
                                .into_iter()
                                .filter_map(element_text)
                                .map(|item| format!("- {}", item)),
                        );
                    }
                    body.line(block.join("\n"));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
