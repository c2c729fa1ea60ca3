use super::blocks::{intro_paragraphs, CONTENT};
use super::{title_header, PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::{link, MarkdownBody};
use crate::scraper::text::normalize_text;
use crate::scraper::{
    absolute_href, child_elements, first_in, inner_text, next_sibling_tagged, section_after,
    tag_name, MetadataRules, PageMetadata, Scraper,
};
use scraper::ElementRef;

const PATH: &str = "/vakantnye-mesta-dlya-priema-perevoda";
const CATEGORIES: &[&str] = &["Образование", "Прием и перевод"];
const TAGS: &[&str] = &["ДПО", "вакантные места", "прием", "перевод"];
const FIELDS_MARKER: &str = "таких сфер деятельности, как";

/// Vacancies page laid out by its own headings.
pub struct Vakantnye;

/// Same page split into three fixed sections.
pub struct VakantnyeSections;

fn normalized(element: ElementRef<'_>) -> Option<String> {
    normalize_text(&inner_text(element))
}

/// Normalised `<li>` children of a list.
fn list_items(list: ElementRef<'_>) -> Vec<String> {
    child_elements(list)
        .filter(|el| tag_name(el) == "li")
        .filter_map(normalized)
        .collect()
}

fn intro(page: &Scraper) -> Result<Vec<String>> {
    Ok(intro_paragraphs(page)?
        .into_iter()
        .filter_map(normalized)
        .collect())
}

fn all_paragraphs(page: &Scraper) -> Result<Vec<String>> {
    page.all_texts(&format!("{} > p", CONTENT))
}

impl SitePage for Vakantnye {
    fn name(&self) -> &'static str {
        "DPO_vakantnye-mesta-dlya-priema-perevoda"
    }

    fn path(&self) -> &'static str {
        PATH
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(CATEGORIES, TAGS).describe_with(intro, true)
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

        let headings = page.select_all(&format!("{c} h2, {c} h3", c = CONTENT))?;
        for heading in headings {
            let mut content = Vec::new();
            for el in section_after(heading, &["h2", "h3"]) {
                match tag_name(&el) {
                    "p" => content.extend(normalized(el)),
                    "ul" => content.extend(list_items(el).into_iter().map(|t| format!("• {}", t))),
                    _ => {}
                }
            }
            if content.is_empty() {
                continue;
            }
            let level = if tag_name(&heading) == "h2" { 2 } else { 3 };
            body.heading(level, &inner_text(heading)).lines(content);
        }

        Ok(())
    }
}

/// `- [item](href)` or `- item` for each entry of the fields-of-activity list.
fn activity_fields(list: ElementRef<'_>, base: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    for li in child_elements(list).filter(|el| tag_name(el) == "li") {
        let Some(text) = normalize_text(inner_text(li).trim_end_matches(';')) else {
            continue;
        };
        let href = first_in(li, "a")?.and_then(|a| absolute_href(a, base));
        fields.push(match href {
            Some(href) => format!("- {}", link(&text, &href)),
            None => format!("- {}", text),
        });
    }
    Ok(fields)
}

/// Normalised direct paragraphs; the first one introducing the fields of
/// activity carries the list that follows it.
fn section_paragraphs(page: &Scraper, base: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let mut list_done = false;
    for p in page.select_all(&format!("{} > p", CONTENT))? {
        let Some(mut text) = normalized(p) else {
            continue;
        };
        if !list_done && text.contains(FIELDS_MARKER) {
            if let Some(list) = next_sibling_tagged(p, "ul") {
                let fields = activity_fields(list, base)?;
                text = std::iter::once(text).chain(fields).collect::<Vec<_>>().join("\n");
                list_done = true;
            }
        }
        out.push(text);
    }
    Ok(out)
}

impl SitePage for VakantnyeSections {
    fn name(&self) -> &'static str {
        "DPO_vakantnye-mesta-dlya-priema-perevoda1"
    }

    fn path(&self) -> &'static str {
        PATH
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(CATEGORIES, TAGS).describe_with(all_paragraphs, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, DEFAULT_ANCHOR, ctx, PAGE_LINK_LABEL, body)?;

        if let Some(subtitle) = page.first_text(&format!("{} > h3", CONTENT))? {
            body.heading(2, &subtitle);
        }

        let paragraphs = section_paragraphs(page, &ctx.url)?;
        let titles: Vec<String> = page
            .select_all(&format!("{} > h2", CONTENT))?
            .into_iter()
            .filter_map(normalized)
            .collect();

        body.lines(paragraphs.iter().take(2).cloned());

        if let Some(title) = titles.first() {
            body.heading(2, title);
            body.lines(paragraphs.iter().skip(2).take(3).cloned());
        }

        if let Some(title) = titles.get(1) {
            body.heading(2, title);
            body.lines(paragraphs.iter().skip(5).cloned());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <h1 class="page__content-title">Вакантные места</h1>
        <div class="page__content-desc">
            <h3>Вакантные места для приёма</h3>
            <p>Обучение ведётся для таких сфер деятельности, как:</p>
            <ul>
                <li><a href="/kursy/med">медицина</a>;</li>
                <li>педагогика;</li>
            </ul>
            <p>Мест   достаточно.</p>
            <h2>Приём</h2>
            <p>Первый</p><p>Второй</p><p>Третий</p>
            <h2>Перевод</h2>
            <p>Четвёртый</p>
            <ul><li>пункт</li></ul>
        </div>"#;

    fn ctx() -> PageContext {
        PageContext {
            url: "https://academydpo.org/vakantnye-mesta-dlya-priema-perevoda".into(),
            date: "2024-05-01".into(),
        }
    }

    fn render(page: &dyn SitePage) -> Vec<String> {
        let scraper = Scraper::new(PAGE);
        let metadata = page
            .metadata_rules()
            .extract(&scraper, &ctx().url, &ctx().date)
            .unwrap();
        let mut body = MarkdownBody::new();
        page.write_body(&scraper, &ctx(), &metadata, &mut body).unwrap();
        body.as_lines()[2..].to_vec()
    }

    #[test]
    fn headings_follow_the_page() {
        assert_eq!(
            render(&Vakantnye),
            vec![
                "### Вакантные места для приёма",
                "Обучение ведётся для таких сфер деятельности, как:",
                "• медицина;",
                "• педагогика;",
                "Мест достаточно.",
                "## Приём",
                "Первый",
                "Второй",
                "Третий",
                "## Перевод",
                "Четвёртый",
                "• пункт",
            ]
        );
    }

    #[test]
    fn fixed_sections_inline_the_fields_list() {
        assert_eq!(
            render(&VakantnyeSections),
            vec![
                "## Вакантные места для приёма",
                "Обучение ведётся для таких сфер деятельности, как:\n\
                 - [медицина](https://academydpo.org/kursy/med)\n\
                 - педагогика",
                "Мест достаточно.",
                "## Приём",
                "Первый",
                "Второй",
                "Третий",
                "## Перевод",
                "Четвёртый",
            ]
        );
    }
}
