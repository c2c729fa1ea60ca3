use super::{title_header, PageContext, SitePage, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::{link, MarkdownBody};
use crate::scraper::{
    absolute_href, first_in, has_class, inner_text, parse_selector, section_after, text_in,
    MetadataRules, PageMetadata, Scraper,
};
use scraper::ElementRef;
use std::collections::HashSet;

pub struct Sotrudnichestvo;

const ANCHOR: &str = "h1";
const INTRO: &str = "h1 + p";
const ADVANTAGES: &str = "Преимущества сотрудничества";
const CONDITIONS: &str = "Сотрудничество на выгодных для вас условиях";
const STEPS: &str = "Станьте нашим партнером за 3 простых шага";
const CONTACT_PHRASE: &str = "связаться с нами";

fn intro(page: &Scraper) -> Result<Vec<String>> {
    Ok(page.first_text(INTRO)?.into_iter().collect())
}

/// Elements matching `css` among the siblings after `heading` and their
/// descendants, up to the next `h2`.
fn section_items<'a>(heading: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let selector = parse_selector(css)?;
    let mut items = Vec::new();
    for sibling in section_after(heading, &["h2"]) {
        if selector.matches(&sibling) {
            items.push(sibling);
        }
        items.extend(sibling.select(&selector));
    }
    Ok(items)
}

/// `name: span. p b price`, or `None` when the card lacks one of its parts.
fn condition_line(item: ElementRef<'_>) -> Result<Option<String>> {
    let parts = (
        text_in(item, "div.name")?,
        text_in(item, "span")?,
        text_in(item, "p")?,
        text_in(item, "b")?,
        text_in(item, "div.price")?,
    );
    let (Some(name), Some(span), Some(paragraph), Some(bold), Some(price)) = parts else {
        return Ok(None);
    };
    Ok(Some(format!(
        "{}: {}. {} {} {}",
        name.trim_end_matches(','),
        span,
        paragraph,
        bold,
        price
    )))
}

fn step_description(desc: ElementRef<'_>, base: &str) -> Result<String> {
    let text = inner_text(desc);
    if !text.contains(CONTACT_PHRASE) {
        return Ok(text);
    }
    let Some(a) = first_in(desc, "a")? else {
        return Ok(text);
    };
    let label = inner_text(a);
    match absolute_href(a, base) {
        Some(href) if !label.is_empty() => Ok(text.replace(&label, &link(&label, &href))),
        _ => Ok(text),
    }
}

/// `name: desc` per step. A step is closed by the next name; the last one is
/// kept only when it has a description.
fn steps(heading: ElementRef<'_>, base: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut current: Option<(String, String)> = None;

    for el in section_items(heading, "div.name, div.desc")? {
        if has_class(&el, "name") {
            if let Some((name, desc)) = current.take() {
                lines.push(format!("{}: {}", name, desc));
            }
            current = Some((inner_text(el), String::new()));
        } else if let Some((_, desc)) = current.as_mut() {
            *desc = step_description(el, base)?;
        }
    }

    if let Some((name, desc)) = current {
        if !desc.is_empty() {
            lines.push(format!("{}: {}", name, desc));
        }
    }
    Ok(lines)
}

impl SitePage for Sotrudnichestvo {
    fn name(&self) -> &'static str {
        "DPO_sotrudnichestvo"
    }

    fn path(&self) -> &'static str {
        "/sotrudnichestvo"
    }

    fn anchor(&self) -> &'static str {
        ANCHOR
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Сотрудничество", "Образование"],
            &["ДПО", "партнерство", "образовательные услуги", "бизнес"],
        )
        .title_fallback(ANCHOR)
        .describe_with(intro, false)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, ANCHOR, ctx, PAGE_LINK_LABEL, body)?;
        body.lines(intro(page)?);

        let mut advantages = Vec::new();
        for item in page.select_all("div.preim_block > div.item")? {
            if let (Some(name), Some(desc)) = (text_in(item, "div.name")?, text_in(item, "div.desc")?)
            {
                advantages.push(format!("{}: {}", name.trim_end_matches(','), desc));
            }
        }
        if !advantages.is_empty() {
            body.heading(2, ADVANTAGES);
            for line in &advantages {
                body.bullet(line);
            }
        }

        if let Some(heading) = page.heading_containing("h2", CONDITIONS)? {
            body.heading(2, &inner_text(heading));
            let mut seen = HashSet::new();
            for item in section_items(heading, "div.item")? {
                if let Some(line) = condition_line(item)? {
                    if seen.insert(line.clone()) {
                        body.bullet(&line);
                    }
                }
            }
        }

        if let Some(heading) = page.heading_containing("h2", STEPS)? {
            body.heading(2, &inner_text(heading));
            for line in steps(heading, &ctx.url)? {
                body.bullet(&line);
            }
        }

        Ok(())
    }
}
