use super::blocks::{titled_section, unique_texts, CONTENT};
use super::{title_header, PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{MetadataRules, PageMetadata, Scraper};

pub struct Onas;

const CONSULTING_TEASER: &str = "Академия также оказывает широкий спектр консалтинговых услуг";

const SECTIONS: &[&str] = &[
    "Консалтинговые услуги",
    "Виды обучения",
    "Курсы профессиональной переподготовки в Академии ДПО",
    "Курсы повышения квалификации в Академии ДПО",
    "Стоимость курсов",
];

fn intro(page: &Scraper) -> Result<Vec<String>> {
    Ok(page
        .first_text(&format!("{} > p", CONTENT))?
        .into_iter()
        .collect())
}

impl SitePage for Onas {
    fn name(&self) -> &'static str {
        "DPO_onas"
    }

    fn path(&self) -> &'static str {
        "/o-nas"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["О нас", "Образование"],
            &[
                "ДПО",
                "консалтинговые услуги",
                "виды обучения",
                "профессиональная переподготовка",
                "повышение квалификации",
            ],
        )
        .title_fallback(DEFAULT_ANCHOR)
        .describe_with(intro, true)
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

        let programmes = page
            .all_texts("div.wp-block-group-is-layout-flow p")?
            .into_iter()
            .filter(|text| !text.contains(CONSULTING_TEASER));
        body.lines(programmes);

        for needle in SECTIONS {
            let Some((title, elements)) = titled_section(page, "h2", needle)? else {
                continue;
            };
            body.heading(2, &title);
            body.lines(unique_texts(&elements, true)?);
        }

        Ok(())
    }
}
