use super::blocks::CONTENT;
use super::{PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{
    child_elements, element_text, select_in, tag_name, MetadataRules, PageMetadata, Scraper,
};

pub struct Matertehnich;

#[derive(Debug, Default)]
struct Section {
    title: Option<String>,
    content: Vec<String>,
}

impl Section {
    /// Paragraphs continue the previous one when it ends a sentence.
    fn push_paragraph(&mut self, text: String) {
        match self.content.last_mut() {
            Some(last) if last.ends_with('.') => {
                last.push(' ');
                last.push_str(&text);
            }
            _ => self.content.push(text),
        }
    }
}

fn first_paragraph(page: &Scraper) -> Result<Vec<String>> {
    Ok(page
        .first_text(".page__content-desc p")?
        .into_iter()
        .collect())
}

fn sections(page: &Scraper) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();
    let Some(content) = page.select_first(CONTENT)? else {
        return Ok(sections);
    };

    for el in child_elements(content) {
        let Some(text) = element_text(el) else {
            continue;
        };
        match tag_name(&el) {
            "h2" => sections.push(Section {
                title: Some(text),
                content: Vec::new(),
            }),
            "ul" => {
                if sections.is_empty() {
                    sections.push(Section::default());
                }
                let Some(section) = sections.last_mut() else {
                    continue;
                };
                for li in select_in(el, "li")? {
                    let Some(item) = element_text(li) else {
                        continue;
                    };
                    for line in item.trim_end_matches(';').lines() {
                        let line = line.trim_matches(|c: char| c == '•' || c == ' ');
                        if !line.is_empty() {
                            section.content.push(format!("• {}", line));
                        }
                    }
                }
            }
            "p" | "div" => {
                if sections.is_empty() {
                    sections.push(Section::default());
                }
                if let Some(section) = sections.last_mut() {
                    section.push_paragraph(text);
                }
            }
            _ => {}
        }
    }

    Ok(sections)
}

impl SitePage for Matertehnich {
    fn name(&self) -> &'static str {
        "DPO_matertehnichobespechenieiosnashhennost"
    }

    fn path(&self) -> &'static str {
        "/materialno-tehnicheskoe-obespechenie-i-osnashhennost"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Материально-техническое обеспечение", "Образование"],
            &["ДПО", "материально-техническое обеспечение", "дистанционное обучение"],
        )
        .title_fallback(DEFAULT_ANCHOR)
        .describe_with(first_paragraph, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        body.heading(1, &metadata.title)
            .page_link(PAGE_LINK_LABEL, &ctx.url);

        let sections = sections(page)?;
        let last = sections.len().saturating_sub(1);
        for (idx, section) in sections.into_iter().enumerate() {
            if let Some(title) = &section.title {
                body.heading(2, title);
            }
            body.lines(section.content);
            if idx != last {
                body.separator();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_end_merges_next_paragraph() {
        let mut section = Section::default();
        section.push_paragraph("Первый.".into());
        section.push_paragraph("Второй".into());
        section.push_paragraph("Третий".into());
        assert_eq!(section.content, vec!["Первый. Второй", "Третий"]);
    }

    #[test]
    fn lists_drop_trailing_semicolons() {
        let page = Scraper::new(
            r#"<div class="page__content-desc">
                <p>Вступление</p>
                <h2>Оборудование</h2>
                <ul><li>Компьютеры;</li><li>Проекторы;</li></ul>
            </div>"#,
        );
        let sections = sections(&page).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, None);
        assert_eq!(sections[1].content, vec!["• Компьютеры", "• Проекторы"]);
    }
}
