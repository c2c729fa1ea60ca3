use super::{title_header, PageContext, SitePage, DEFAULT_ANCHOR, PAGE_LINK_LABEL};
use crate::error::Result;
use crate::markdown::MarkdownBody;
use crate::scraper::text::clean_lines;
use crate::scraper::{
    element_text, inner_text, select_in, MetadataRules, PageMetadata, Scraper,
};

pub struct DostupnayaSreda;

const ROWS: &str = "div.page__content-desc > div.table > table > tbody > tr";

/// Table rows after the header row.
fn row_texts(page: &Scraper) -> Result<Vec<String>> {
    Ok(page
        .select_all(ROWS)?
        .into_iter()
        .skip(1)
        .filter_map(element_text)
        .collect())
}

impl SitePage for DostupnayaSreda {
    fn name(&self) -> &'static str {
        "DPO_dostupnaya-sreda-v-ooo-akademiya-dpo"
    }

    fn path(&self) -> &'static str {
        "/dostupnaya-sreda-v-ooo-akademiya-dpo"
    }

    fn metadata_rules(&self) -> MetadataRules {
        MetadataRules::new(
            &["Доступная среда", "Образование"],
            &["ДПО", "доступная среда", "дистанционное обучение"],
        )
        .describe_with(row_texts, true)
    }

    fn write_body(
        &self,
        page: &Scraper,
        ctx: &PageContext,
        _metadata: &PageMetadata,
        body: &mut MarkdownBody,
    ) -> Result<()> {
        title_header(page, DEFAULT_ANCHOR, ctx, PAGE_LINK_LABEL, body)?;

        let mut rows = Vec::new();
        for row in page.select_all(ROWS)?.into_iter().skip(1) {
            let cells = select_in(row, "td")?;
            let [condition, availability] = cells.as_slice() else {
                continue;
            };

            let lines = clean_lines(&inner_text(*availability));
            let availability = if lines.len() > 1 {
                lines
                    .iter()
                    .map(|line| format!("- {}", line))
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                lines.join("")
            };
            rows.push(vec![inner_text(*condition), availability]);
        }

        if !rows.is_empty() {
            body.heading(2, "Условия доступной среды");
            body.table(&["Условия доступной среды", "Наличие"], &rows);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_accessibility_table() {
        let page = Scraper::new(
            r#"<h1 class="page__content-title">Доступная среда</h1>
            <div class="page__content-desc"><div class="table"><table><tbody>
                <tr><td>Условие</td><td>Наличие</td></tr>
                <tr><td>Пандус</td><td>Есть</td></tr>
                <tr><td>Оборудование</td><td><p>Лупа</p><p>Наушники</p></td></tr>
                <tr><td>Только одна ячейка</td></tr>
            </tbody></table></div></div>"#,
        );
        let ctx = PageContext {
            url: "https://academydpo.org/dostupnaya-sreda-v-ooo-akademiya-dpo".into(),
            date: "2024-05-01".into(),
        };
        let metadata = DostupnayaSreda
            .metadata_rules()
            .extract(&page, &ctx.url, &ctx.date)
            .unwrap();
        let mut body = MarkdownBody::new();
        DostupnayaSreda
            .write_body(&page, &ctx, &metadata, &mut body)
            .unwrap();

        assert_eq!(
            body.as_lines(),
            &[
                "# Доступная среда",
                "[Перейти к странице](https://academydpo.org/dostupnaya-sreda-v-ooo-akademiya-dpo)",
                "## Условия доступной среды",
                "| Условия доступной среды | Наличие |",
                "|---|---|",
                "| Пандус | Есть |",
                "| Оборудование | - Лупа<br>- Наушники |",
            ]
        );
    }
}
