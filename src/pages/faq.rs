use super::{title_header, PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{
    element_text, following_elements, has_class, inner_text, select_in, tag_name, text_in,
    MetadataRules, PageMetadata, Scraper,
};

pub struct Faq;

fn answers(page: &Scraper) -> Result<Vec<String>> {
    page.all_texts("div.page_faq__item-desc p, div.page_faq__item-desc li")
}

impl SitePage for Faq {
    fn name(&self) -> &'static str {
        "DPO_FAQ"
    }

    fn path(&self) -> &'static str {
        "/faq"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["FAQ", "Образование"],
            &["ДПО", "вопросы и ответы", "дистанционное обучение"],
        )
        .describe_with(answers, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, DEFAULT_ANCHOR, ctx, PAGE_LINK_LABEL, body)?;

        for item in page.select_all("h2.page_faq__item-title")? {
            let mut title = inner_text(item);
            if let Some(toggle) = text_in(item, "div.page_faq__item-toggle")? {
                title = title.replace(&toggle, "");
            }
            body.heading(2, title.trim());

            let answer = following_elements(item)
                .find(|el| tag_name(el) == "div" && has_class(el, "page_faq__item-desc"));
            let Some(answer) = answer else {
                continue;
            };
            for el in select_in(answer, "p, li")? {
                let Some(text) = element_text(el) else {
                    continue;
                };
                if tag_name(&el) == "li" {
                    body.dot(&text);
                } else {
                    body.line(text);
                }
            }
        }

        Ok(())
    }
}
