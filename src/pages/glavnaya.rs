use super::{PageContext, SitePage};
use crate::error::Result;
use crate::markdown::{link, MarkdownBody};
use crate::scraper::{
    absolute_href, child_elements, element_text, next_sibling_tagged, tag_name, MetadataRules,
    PageMetadata, Scraper,
};
use scraper::ElementRef;

pub struct Glavnaya;

#[derive(Debug, Default, Clone, PartialEq)]
struct Section {
    title: String,
    text: String,
}

fn description_texts(page: &Scraper) -> Result<Vec<String>> {
    page.all_texts("section.desc_page div.desc_page-text p")
}

/// Pairs titles with texts. A single title with at least `spread_from` texts
/// heads the first text only; otherwise the lists are zipped.
fn pair_sections(titles: Vec<String>, texts: Vec<String>, spread_from: usize) -> Vec<Section> {
    if titles.len() == 1 && texts.len() >= spread_from {
        return texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Section {
                title: if i == 0 { titles[0].clone() } else { String::new() },
                text,
            })
            .collect();
    }

    let count = titles.len().max(texts.len());
    let mut titles = titles.into_iter();
    let mut texts = texts.into_iter();
    (0..count)
        .map(|_| Section {
            title: titles.next().unwrap_or_default(),
            text: texts.next().unwrap_or_default(),
        })
        .collect()
}

/// Headings open a section, paragraphs fill the last one when it has no text yet.
fn home_description(page: &Scraper, sections: &mut Vec<Section>) -> Result<()> {
    for el in page.select_all("section.home_desc > *")? {
        let Some(text) = element_text(el) else {
            continue;
        };
        match tag_name(&el) {
            "h2" | "h3" => sections.push(Section {
                title: text,
                text: String::new(),
            }),
            "p" | "li" => match sections.last_mut() {
                Some(last) if last.text.is_empty() => last.text = text,
                _ => sections.push(Section {
                    title: String::new(),
                    text,
                }),
            },
            _ => {}
        }
    }
    Ok(())
}

/// `li` items of the first list after the `tag` element containing `trigger`.
fn list_after<'a>(page: &'a Scraper, tag: &str, trigger: &str) -> Result<Vec<ElementRef<'a>>> {
    let Some(anchor) = page.heading_containing(tag, trigger)? else {
        return Ok(Vec::new());
    };
    let Some(list) = next_sibling_tagged(anchor, "ul") else {
        return Ok(Vec::new());
    };
    Ok(child_elements(list).filter(|el| tag_name(el) == "li").collect())
}

fn plain_list(page: &Scraper, tag: &str, trigger: &str) -> Result<Vec<String>> {
    Ok(list_after(page, tag, trigger)?
        .into_iter()
        .filter_map(element_text)
        .collect())
}

fn link_list(page: &Scraper, trigger: &str, base: &str) -> Result<Vec<String>> {
    let mut links = Vec::new();
    for li in list_after(page, "p", trigger)? {
        for a in child_elements(li).filter(|el| tag_name(el) == "a") {
            if let Some(text) = element_text(a) {
                let href = absolute_href(a, base).unwrap_or_default();
                links.push(link(&text, &href));
            }
        }
    }
    Ok(links)
}

fn write_list(body: &mut MarkdownBody, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    body.heading(2, heading);
    for item in items {
        body.bullet(item);
    }
}

impl SitePage for Glavnaya {
    fn name(&self) -> &'static str {
        "DPO_glavnaya"
    }

    fn path(&self) -> &'static str {
        "/"
    }

    fn anchor(&self) -> &'static str {
        "body"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Главная страница", "Образование"],
            &["ДПО", "дистанционное обучение", "курсы"],
        )
        .describe_with(description_texts, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        body.line(format!("# Страница: {}", ctx.url))
            .page_link("Открыть страницу", &ctx.url)
            .line("=".repeat(80));

        let mut sections = pair_sections(
            page.all_texts("section.desc_page h2.desc_page-title")?,
            description_texts(page)?,
            2,
        );
        sections.extend(pair_sections(
            page.all_texts("h2.info_block__images-title span")?,
            page.all_texts("div.info_block-desc p")?,
            1,
        ));
        home_description(page, &mut sections)?;

        for section in &sections {
            body.heading(2, &section.title);
            body.line(section.text.as_str());
        }

        let mut links = Vec::new();
        for a in page.select_all("a.info_block__list-link")? {
            if let Some(text) = element_text(a) {
                links.push(link(&text, &absolute_href(a, &ctx.url).unwrap_or_default()));
            }
        }
        write_list(body, "Ссылки", &links);

        write_list(
            body,
            "Особенности обучения",
            &plain_list(page, "p", "Такое обучение имеет свои особенности:")?,
        );
        write_list(
            body,
            "Формы обучения",
            &plain_list(
                page,
                "h3",
                "В нашей академии дистанционное обучение проводится в разных формах:",
            )?,
        );
        write_list(
            body,
            "Медицинское образование",
            &link_list(page, "Дистанционное обучение для руководящего состава", &ctx.url)?,
        );
        write_list(
            body,
            "Строительные курсы",
            &link_list(
                page,
                "Курсы на базе средне-специального или высшего образования",
                &ctx.url,
            )?,
        );
        write_list(
            body,
            "Специальные курсы",
            &link_list(
                page,
                "Курсы специальной переподготовки на базе среднего и/или высшего образования",
                &ctx.url,
            )?,
        );

        Ok(())
    }
}
