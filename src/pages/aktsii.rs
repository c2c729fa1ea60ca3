use super::{title_header, PageContext, SitePage};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::text::clean_lines;
use crate::scraper::{
    element_text, following_elements, has_class, inner_text, select_in, tag_name, MetadataRules,
    PageMetadata, Scraper,
};
use scraper::ElementRef;

pub struct Aktsii;

const ANCHOR: &str = "h1.stock__title";

fn intro(page: &Scraper) -> Result<Vec<String>> {
    let Some(first) = page.select_first("div.stock__desc")? else {
        return Ok(Vec::new());
    };
    Ok(select_in(first, "p")?
        .into_iter()
        .filter_map(element_text)
        .collect())
}

/// First sibling after `title` that is a `div` with `class`.
fn block_after<'a>(title: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    following_elements(title).find(|el| tag_name(el) == "div" && has_class(el, class))
}

impl SitePage for Aktsii {
    fn name(&self) -> &'static str {
        "DPO_aktsii"
    }

    fn path(&self) -> &'static str {
        "/aktsii"
    }

    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Акции", "Образование"],
            &["ДПО", "дистанционное обучение", "акции"],
        )
        .describe_with(intro, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, ANCHOR, ctx, "Открыть страницу", body)?;
        body.lines(intro(page)?);

        for title in page.select_all("h2.stock__block-title")? {
            body.heading(2, &inner_text(title));

            if let Some(info) = block_after(title, "stock__block-info") {
                let parts = select_in(info, "div.stock__block-cat, div.stock__block-text")?;
                body.lines(parts.into_iter().filter_map(element_text));
            }

            // Collapsed on the live page, present in the markup.
            if let Some(desc) = block_after(title, "stock__block-desc") {
                for p in select_in(desc, "p")? {
                    body.lines(clean_lines(&inner_text(p)));
                }
            }
        }

        if let Some(last) = page.select_all("div.stock__desc")?.pop() {
            for p in select_in(last, "p")? {
                body.lines(clean_lines(&inner_text(p)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_blocks_and_closing_notes() {
        let page = Scraper::new(
            r#"<h1 class="stock__title">Акции</h1>
            <div class="stock__desc"><p>Скидки для слушателей.</p></div>
            <div class="stock__list">
                <h2 class="stock__block-title">Скидка 20%</h2>
                <div class="stock__block-info">
                    <div class="stock__block-cat">Для студентов</div>
                    <div class="stock__block-text">При оплате курса</div>
                </div>
                <div class="stock__block-desc"><p>Условие первое<br>Условие второе</p></div>
                <h2 class="stock__block-title">Рассрочка</h2>
                <div class="stock__block-info"><div class="stock__block-text">На 12 месяцев</div></div>
            </div>
            <div class="stock__desc"><p>Акции не суммируются.</p></div>"#,
        );
        let ctx = PageContext {
            url: "https://academydpo.org/aktsii".into(),
            date: "2024-05-01".into(),
        };
        let metadata = Aktsii
            .metadata_rules()
            .extract(&page, &ctx.url, &ctx.date)
            .unwrap();
        let mut body = MarkdownBody::new();
        Aktsii.write_body(&page, &ctx, &metadata, &mut body).unwrap();

        assert_eq!(
            body.as_lines(),
            &[
                "# Акции",
                "[Открыть страницу](https://academydpo.org/aktsii)",
                "Скидки для слушателей.",
                "## Скидка 20%",
                "Для студентов",
                "При оплате курса",
                "Условие первое",
                "Условие второе",
                "## Рассрочка",
                "На 12 месяцев",
                "Акции не суммируются.",
            ]
        );
    }
}
