use super::blocks::{content_blocks, content_paragraphs, BlockStyle};
use super::{PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{MetadataRules, PageMetadata, Scraper};

const PATH: &str = "/materialno-tehnicheskoe-obespechenie-i-osnashhennost-obrazovatelnogo-protsessa";
const DOSTUPNAYA_SREDA_PATH: &str =
    "/materialno-tehnicheskoe-obespechenie-i-osnashhennost-obrazovatelnogo-protsessa-dostupnaya-sreda";
const DEFAULT_TITLE: &str = "Материально-техническое обеспечение";

/// Facilities page.
pub struct Materialno;

/// Accessibility companion of the facilities page, rendered with its tables.
pub struct MaterialnoDostupnayaSreda;

fn write_blocks(
    page: &Scraper,
    ctx: &PageContext,
    style: BlockStyle,
    body: &mut MarkdownBody,
) -> Result<()> {
    let title = page
        .first_text(DEFAULT_ANCHOR)?
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    body.heading(1, &title).page_link(PAGE_LINK_LABEL, &ctx.url);
    content_blocks(page, style, body)
}

impl SitePage for Materialno {
    fn name(&self) -> &'static str {
        "DPO_materialno-tehnicheskoe-obespechenie-i-osnashhennost-obrazovatelnogo-protsessa"
    }

    fn path(&self) -> &'static str {
        PATH
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Материально-техническое обеспечение", "Образование"],
            &["ДПО", "материально-техническое обеспечение", "дистанционное обучение"],
        )
        .describe_with(content_paragraphs, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        let style = BlockStyle {
            emphasis: true,
            tables: false,
        };
        write_blocks(page, ctx, style, body)
    }
}

impl SitePage for MaterialnoDostupnayaSreda {
    fn name(&self) -> &'static str {
        "DPO_materialno-tehnicheskoe-obespechenie-i-osnashhennost-obrazovatelnogo-protsessa-dostupnaya-sreda"
    }

    fn path(&self) -> &'static str {
        DOSTUPNAYA_SREDA_PATH
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Доступная среда", "Образование"],
            &["ДПО", "доступная среда", "дистанционное обучение"],
        )
        .describe_with(content_paragraphs, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        let style = BlockStyle {
            emphasis: false,
            tables: true,
        };
        write_blocks(page, ctx, style, body)
    }
}
