use super::blocks::CONTENT;
use super::{title_header, PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{MetadataRules, PageMetadata, Scraper};

pub struct Rukovodstvo;

const ROLES: &[&str] = &["Генеральный директор:", "Заведующий учебной частью"];

/// Markers of the per-person fields, in output order. A paragraph fills the
/// first field whose markers it contains.
const FIELDS: &[&[&str]] = &[
    &["Уровень образования:"],
    &["Общий стаж работы:"],
    &["Стаж работы в должности:"],
    &["Окончил:", "Окончил (а):"],
    &["Дополнительное профессиональное образование:"],
    &["Контактный телефон:"],
    &["Электронная почта:"],
];

#[derive(Debug)]
struct Person {
    title: String,
    fields: Vec<Option<String>>,
}

impl Person {
    fn new(title: String) -> Self {
        Self {
            title,
            fields: vec![None; FIELDS.len()],
        }
    }

    fn absorb(&mut self, text: &str) {
        if let Some(slot) = FIELDS
            .iter()
            .position(|markers| markers.iter().any(|m| text.contains(m)))
        {
            self.fields[slot] = Some(text.to_string());
        }
    }
}

fn people(paragraphs: Vec<String>) -> Vec<Person> {
    let mut people: Vec<Person> = Vec::new();
    for text in paragraphs {
        if ROLES.iter().any(|role| text.starts_with(role)) {
            people.push(Person::new(text));
        } else if let Some(person) = people.last_mut() {
            person.absorb(&text);
        }
    }
    people
}

fn paragraphs(page: &Scraper) -> Result<Vec<String>> {
    page.all_texts(&format!("{} > p", CONTENT))
}

fn first_paragraph(page: &Scraper) -> Result<Vec<String>> {
    Ok(paragraphs(page)?.into_iter().take(1).collect())
}

impl SitePage for Rukovodstvo {
    fn name(&self) -> &'static str {
        "DPO_rukovodstvo-i-pedagogicheskij-sostav"
    }

    fn path(&self) -> &'static str {
        "/rukovodstvo-i-pedagogicheskij-sostav"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Руководство", "Педагогический состав", "Образование"],
            &["ДПО", "руководство", "преподаватели", "администрация"],
        )
        .title_fallback(DEFAULT_ANCHOR)
        .describe_with(first_paragraph, false)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, DEFAULT_ANCHOR, ctx, PAGE_LINK_LABEL, body)?;

        if let Some(subtitle) = page.first_text(&format!("{} > u", CONTENT))? {
            body.heading(2, &subtitle);
        }

        for person in people(paragraphs(page)?) {
            body.heading(2, &person.title);
            for field in person.fields.iter().flatten() {
                body.bullet(field);
            }
        }

        Ok(())
    }
}
