use super::{PageContext, SitePage};
use crate::error::Result;
use crate::markdown::{link, MarkdownBody};
use crate::scraper::text::remove_accents;
use crate::scraper::{absolute_href, element_text, MetadataRules, PageMetadata, Scraper};

pub struct PedagogicheskijSostav;

const ANCHOR: &str = "article.page__content h1.page__content-title";
const DOCUMENT_LINK: &str = "article.page__content div.page__content-desc a";

fn first_paragraph(page: &Scraper) -> Result<Vec<String>> {
    Ok(page
        .first_text("article.page__content div.page__content-desc > p")?
        .into_iter()
        .collect())
}

impl SitePage for PedagogicheskijSostav {
    fn name(&self) -> &'static str {
        "DPO_pedagogicheskij-sostav"
    }

    fn path(&self) -> &'static str {
        "/pedagogicheskij-sostav"
    }

    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Педагогический состав", "Образование"],
            &["ДПО", "преподаватели", "образовательные услуги"],
        )
        .title_fallback(ANCHOR)
        .without_accents()
        .describe_with(first_paragraph, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        if let Some(title) = page.first_text(ANCHOR)? {
            body.heading(1, &remove_accents(&title))
                .page_link("Ссылка на страницу", &ctx.url);
        }

        // The staff list itself is a PDF; it is linked rather than parsed.
        if let Some(a) = page.select_first(DOCUMENT_LINK)? {
            if let Some(href) = absolute_href(a, &ctx.url) {
                let label = element_text(a)
                    .map(|text| remove_accents(&text))
                    .unwrap_or_else(|| href.clone());
                body.line(link(&label, &href));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_the_staff_document() {
        let page = Scraper::new(
            r#"<article class="page__content">
                <h1 class="page__content-title">Педагоги́ческий соста́в</h1>
                <div class="page__content-desc">
                    <p><a href="/wp-content/uploads/staff.pdf">Список преподавателей</a></p>
                </div></article>"#,
        );
        let ctx = PageContext {
            url: "https://academydpo.org/pedagogicheskij-sostav".into(),
            date: "2024-05-01".into(),
        };
        let metadata = PedagogicheskijSostav
            .metadata_rules()
            .extract(&page, &ctx.url, &ctx.date)
            .unwrap();
        let mut body = MarkdownBody::new();
        PedagogicheskijSostav
            .write_body(&page, &ctx, &metadata, &mut body)
            .unwrap();

        assert_eq!(
            body.as_lines(),
            &[
                "# Педагогический состав",
                "[Ссылка на страницу](https://academydpo.org/pedagogicheskij-sostav)",
                "[Список преподавателей](https://academydpo.org/wp-content/uploads/staff.pdf)",
            ]
        );
        assert_eq!(metadata.title, "Педагогический состав");
    }
}
