use academy_scraper::config::Config;
use academy_scraper::pages::find_page;
use academy_scraper::runner::Runner;
use httpmock::prelude::*;
use std::fs;

const FAQ_HTML: &str = r#"<html><head><title>FAQ</title></head><body>
    <h1 class="page__content-title">Вопросы и ответы</h1>
    <h2 class="page_faq__item-title">Как поступить?</h2>
    <div class="page_faq__item-desc"><p>Оставьте заявку.</p></div>
</body></html>"#;

fn config(base_url: String, output_dir: &std::path::Path) -> Config {
    Config {
        base_url,
        output_dir: output_dir.to_string_lossy().into_owned(),
        chrome_impersonation: false,
        max_retries: 2,
        retry_delay: 1,
        request_timeout: 5,
        page_timeout: 30,
        ..Config::default()
    }
}

#[tokio::test]
async fn writes_pages_and_records_failures() {
    let server = MockServer::start_async().await;
    let faq = server
        .mock_async(|when, then| {
            when.method(GET).path("/faq");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(FAQ_HTML);
        })
        .await;
    let kontakty = server
        .mock_async(|when, then| {
            when.method(GET).path("/kontakty");
            then.status(404);
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let runner = Runner::new(config(server.base_url(), dir.path())).unwrap();
    let pages = [
        find_page("DPO_FAQ").unwrap(),
        find_page("DPO_kontakty").unwrap(),
    ];

    let summary = runner.run(&pages).await;

    assert_eq!(summary.succeeded, vec!["DPO_FAQ".to_string()]);
    assert_eq!(summary.missing, vec![dir.path().join("DPO_kontakty.md")]);

    let written = fs::read_to_string(dir.path().join("DPO_FAQ.md")).unwrap();
    assert!(written.starts_with("---\ntitle: FAQ\n"));
    assert!(written.contains(&format!("url: {}/faq\n", server.base_url())));
    assert!(written.ends_with("## Как поступить?\nОставьте заявку."));

    faq.assert_async().await;
    // 404 is not retried
    kontakty.assert_hits_async(1).await;
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start_async().await;
    let failing = server
        .mock_async(|when, then| {
            when.method(GET).path("/faq");
            then.status(503);
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let runner = Runner::new(config(server.base_url(), dir.path())).unwrap();
    let summary = runner.run(&[find_page("DPO_FAQ").unwrap()]).await;

    assert!(summary.succeeded.is_empty());
    assert_eq!(summary.missing.len(), 1);
    failing.assert_hits_async(2).await;
    assert!(!dir.path().join("DPO_FAQ.md").exists());
}

#[tokio::test]
async fn page_without_anchor_is_missing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/faq");
            then.status(200).body("<html><body><p>Технические работы</p></body></html>");
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let runner = Runner::new(config(server.base_url(), dir.path())).unwrap();
    let summary = runner.run(&[find_page("DPO_FAQ").unwrap()]).await;

    assert_eq!(summary.missing, vec![dir.path().join("DPO_FAQ.md")]);
}

#[tokio::test]
async fn slow_page_times_out_as_missing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/faq");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .delay(std::time::Duration::from_secs(3))
                .body(FAQ_HTML);
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        max_retries: 1,
        page_timeout: 1,
        ..config(server.base_url(), dir.path())
    };
    let runner = Runner::new(config).unwrap();
    let summary = runner.run(&[find_page("DPO_FAQ").unwrap()]).await;

    assert!(summary.succeeded.is_empty());
    assert_eq!(summary.missing, vec![dir.path().join("DPO_FAQ.md")]);
    assert!(!dir.path().join("DPO_FAQ.md").exists());
}
