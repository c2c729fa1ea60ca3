use super::{title_header, PageContext, SitePage, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{MetadataRules, PageMetadata, Scraper};

pub struct Mba;

const ANCHOR: &str = "h1.category__title";
const SKIPPED_DETAIL: &str = "Объем программы";

fn description(page: &Scraper) -> Result<Vec<String>> {
    page.all_texts("div.category__info-body > p")
}

impl SitePage for Mba {
    fn name(&self) -> &'static str {
        "DPO_master-of-business-administration-mba"
    }

    fn path(&self) -> &'static str {
        "/master-of-business-administration-mba"
    }

    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(&["MBA", "Образование"], &["ДПО", "MBA", "дистанционное обучение"])
            .describe_with(description, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, ANCHOR, ctx, PAGE_LINK_LABEL, body)?;

        let features = page.all_texts("ul > li")?;
        if !features.is_empty() {
            body.heading(2, "Особенности");
            for feature in &features {
                body.dot(feature);
            }
        }

        let paragraphs = description(page)?;
        if !paragraphs.is_empty() {
            body.heading(2, "Описание").lines(paragraphs);
        }

        if let Some(subtitle) = page.first_text("h2.category__title")? {
            body.heading(2, &subtitle);
        }

        let titles = page.all_texts("h3.category_info__item-title")?;
        let texts = page.all_texts("div.category_info__item-desc > p")?;
        let details: Vec<String> = titles
            .iter()
            .zip(&texts)
            .filter(|(title, _)| title.as_str() != SKIPPED_DETAIL)
            .map(|(title, text)| format!("### {}\n{}", title, text))
            .collect();
        if !details.is_empty() {
            body.heading(2, "Детали курса").lines(details);
        }

        let faq_title = page.first_text("div.faq_block_title")?;
        let faq_text = page.first_text("div.faq_block_text")?;
        if let (Some(title), Some(text)) = (faq_title, faq_text) {
            body.heading(2, "FAQ").line(format!("• {}:\n{}", title, text));
        }

        Ok(())
    }
}
