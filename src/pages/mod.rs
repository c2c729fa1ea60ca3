//! One module per site page. Each page knows where it lives, which element
//! proves it loaded, how its front matter is built and how its body is laid
//! out; [`scrape_page`] ties those together.

pub mod blocks;

mod aktsii;
mod dokumenty;
mod dostupnaya_sreda;
mod faq;
mod glavnaya;
mod kontakty;
mod materialno;
mod matertehnich;
mod mba;
mod obrazovanie;
mod onas;
mod oplata;
mod pedagogicheskij_sostav;
mod politika;
mod rukovodstvo;
mod servis_proverki;
mod sotrudnichestvo;
mod struktura;
mod vakantnye;

use crate::error::Result;
use crate::markdown::{MarkdownBody, MarkdownDocument};
use crate::scraper::{MetadataRules, PageMetadata, Scraper};

pub const DEFAULT_ANCHOR: &str = "h1.page__content-title";
pub const PAGE_LINK_LABEL: &str = "Перейти к странице";

/// Where the page was fetched from and when.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub url: String,
    pub date: String,
}

pub trait SitePage: Send + Sync {
    /// File stem of the page output, e.g. `DPO_FAQ`.
    fn name(&self) -> &'static str;

    /// Path on the site, joined onto the configured base URL.
    fn path(&self) -> &'static str;

    /// Selector that must match before the page is scraped.
    fn anchor(&self) -> &'static str {
        DEFAULT_ANCHOR
    }

    fn metadata_rules(&self) -> MetadataRules;

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()>;
}

/// Parses `html` and lays it out as a page file.
pub fn scrape_page(page: &dyn SitePage, html: &str, ctx: &PageContext) -> Result<MarkdownDocument> {
    let document = Scraper::new(html);
    document.require(page.anchor())?;

    let metadata = page
        .metadata_rules()
        .extract(&document, &ctx.url, &ctx.date)?;

    let mut body = MarkdownBody::new();
    page.write_body(&document, ctx, &metadata, &mut body)?;

    Ok(MarkdownDocument::new(metadata, body))
}

/// Every page, in run order.
pub fn all_pages() -> Vec<&'static dyn SitePage> {
    vec![
        &aktsii::Aktsii,
        &dokumenty::Dokumenty,
        &dostupnaya_sreda::DostupnayaSreda,
        &faq::Faq,
        &glavnaya::Glavnaya,
        &kontakty::Kontakty,
        &mba::Mba,
        &materialno::Materialno,
        &materialno::MaterialnoDostupnayaSreda,
        &matertehnich::Matertehnich,
        &obrazovanie::Obrazovanie,
        &onas::Onas,
        &oplata::Oplata,
        &pedagogicheskij_sostav::PedagogicheskijSostav,
        &politika::Politika,
        &rukovodstvo::Rukovodstvo,
        &servis_proverki::ServisProverki,
        &sotrudnichestvo::Sotrudnichestvo,
        &struktura::Struktura,
        &vakantnye::Vakantnye,
        &vakantnye::VakantnyeSections,
    ]
}

pub fn find_page(name: &str) -> Option<&'static dyn SitePage> {
    all_pages().into_iter().find(|page| page.name() == name)
}

/// `# {title}` followed by the page link, skipped when the title is blank.
pub(crate) fn title_header(
    page: &Scraper,
    css: &str,
    ctx: &PageContext,
    label: &str,
    body: &mut MarkdownBody,
) -> Result<()> {
    if let Some(title) = page.first_text(css)? {
        body.heading(1, &title).page_link(label, &ctx.url);
    }
    Ok(())
}
