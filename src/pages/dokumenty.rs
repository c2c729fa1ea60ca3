use super::{title_header, PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::{link, MarkdownBody};
use crate::scraper::{
    absolute_href, first_in, inner_text, MetadataRules, PageMetadata, Scraper,
};

pub struct Dokumenty;

fn document_names(page: &Scraper) -> Result<Vec<String>> {
    page.all_texts("a.file_link")
}

impl SitePage for Dokumenty {
    fn name(&self) -> &'static str {
        "DPO_dokumenty"
    }

    fn path(&self) -> &'static str {
        "/dokumenty"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Документы", "Образование"],
            &["ДПО", "документы", "дистанционное обучение"],
        )
        .describe_with(document_names, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, DEFAULT_ANCHOR, ctx, PAGE_LINK_LABEL, body)?;

        let mut images = Vec::new();
        for anchor in page.select_all("a[href*='.jpg']")? {
            let Some(img) = first_in(anchor, "img")? else {
                continue;
            };
            let Some(href) = absolute_href(anchor, &ctx.url) else {
                continue;
            };
            let alt = img.value().attr("alt").unwrap_or_default().trim();
            images.push(link(alt, &href));
        }
        if !images.is_empty() {
            body.heading(2, "Изображения");
            for image in &images {
                body.bullet(image);
            }
        }

        let mut documents = Vec::new();
        for anchor in page.select_all("a.file_link")? {
            if let Some(href) = absolute_href(anchor, &ctx.url) {
                documents.push(link(&inner_text(anchor), &href));
            }
        }
        if !documents.is_empty() {
            body.heading(2, "Список документов");
            for document in &documents {
                body.bullet(document);
            }
        }

        Ok(())
    }
}
