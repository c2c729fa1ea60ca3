use super::{PageContext, SitePage, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::{text_in, MetadataRules, PageMetadata, Scraper};

pub struct Kontakty;

const ROWS: &str = "table.recvisit_table tbody tr";

fn activity(page: &Scraper) -> Result<Vec<String>> {
    Ok(page.first_text("b")?.into_iter().collect())
}

impl SitePage for Kontakty {
    fn name(&self) -> &'static str {
        "DPO_kontakty"
    }

    fn path(&self) -> &'static str {
        "/kontakty"
    }

    fn anchor(&self) -> &'static str {
        ROWS
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Контакты", "Образование"],
            &["ДПО", "контакты", "дистанционное обучение"],
        )
        .describe_with(activity, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        body.heading(1, "Контакты").page_link(PAGE_LINK_LABEL, &ctx.url);

        if let Some(position) = page.first_text("div.contact_block__position")? {
            body.heading(2, &position);
        }
        if let Some(address) = page.first_text("div.contact_block__name")? {
            body.line(address);
        }
        if let Some(activity) = page.first_text("b")? {
            body.line(format!("**{}**", activity));
        }

        let mut details = Vec::new();
        for row in page.select_all(ROWS)? {
            let title = text_in(row, "td:nth-child(1)")?;
            let data = text_in(row, "td:nth-child(2)")?;
            if let (Some(title), Some(data)) = (title, data) {
                details.push(format!("### {}\n{}", title, data));
            }
        }
        if !details.is_empty() {
            body.heading(2, "Реквизиты").lines(details);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_office_and_requisites() {
        let page = Scraper::new(
            r#"<div class="contact_block">
                <div class="contact_block__position">Главный офис</div>
                <div class="contact_block__name">Москва, ул. Примерная, 1</div>
                <p><b>Образовательная деятельность</b></p>
            </div>
            <table class="recvisit_table"><tbody>
                <tr><td>ИНН</td><td>7700000000</td></tr>
                <tr><td>КПП</td><td></td></tr>
            </tbody></table>"#,
        );
        let ctx = PageContext {
            url: "https://academydpo.org/kontakty".into(),
            date: "2024-05-01".into(),
        };
        let metadata = Kontakty
            .metadata_rules()
            .extract(&page, &ctx.url, &ctx.date)
            .unwrap();
        let mut body = MarkdownBody::new();
        Kontakty.write_body(&page, &ctx, &metadata, &mut body).unwrap();

        assert_eq!(
            body.as_lines(),
            &[
                "# Контакты",
                "[Перейти к странице](https://academydpo.org/kontakty)",
                "## Главный офис",
                "Москва, ул. Примерная, 1",
                "**Образовательная деятельность**",
                "## Реквизиты",
                "### ИНН\n7700000000",
            ]
        );
    }
}
