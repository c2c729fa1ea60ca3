use academy_scraper::report::ReportBuilder;
use std::fs;

const FAQ: &str = "---\ntitle: FAQ\ndescription: Ответы\n---\n# Вопросы\n[Перейти к странице](https://academydpo.org/faq)\nтекст\n\n\n- пункт";

#[test]
fn combines_page_files_into_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("DPO_FAQ.md"), FAQ).unwrap();
    fs::write(dir.path().join("notes.md"), "заметки").unwrap();
    fs::write(dir.path().join("Раздел_1_20240101_000000.md"), "# old report").unwrap();

    let builder = ReportBuilder::new(dir.path(), "Раздел 1", ["DPO_FAQ", "DPO_kontakty"]);
    let missing = vec![dir.path().join("DPO_kontakty.md")];
    let path = builder.build(&missing).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("Раздел_1_"));
    assert!(name.ends_with(".md"));

    let report = fs::read_to_string(&path).unwrap();
    assert!(report.starts_with("# Раздел 1\nДата создания: "));
    assert!(report.contains(
        "\n## DPO_FAQ\n---\ntitle: FAQ\ndescription: Ответы\n---\n# Вопросы\n\
         [Перейти к странице](https://academydpo.org/faq) текст\n\n- пункт\n---\n"
    ));
    assert!(report.contains("\n## notes\nзаметки\n---\n"));
    assert!(!report.contains("old report"));
    assert!(report.ends_with(
        "\n## Пропущенные или неожидаемые файлы\n\
         - DPO_kontakty.md: не создан или не добавлен\n\
         - notes.md: найден, но не ожидался\n"
    ));
}

#[test]
fn report_without_leftovers_has_no_trailer() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("DPO_FAQ.md"), FAQ).unwrap();

    let builder = ReportBuilder::new(dir.path(), "Раздел 1", ["DPO_FAQ"]);
    let inputs = builder.inputs().unwrap();
    let report = builder.compose(&inputs, &[], "2024-05-01 12:00:00");

    assert!(report.starts_with("# Раздел 1\nДата создания: 2024-05-01 12:00:00\n\n## DPO_FAQ\n"));
    assert!(report.ends_with("- пункт\n---\n"));
    assert!(!report.contains("Пропущенные"));
}

#[test]
fn empty_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let builder = ReportBuilder::new(dir.path(), "Раздел 1", ["DPO_FAQ"]);
    let path = builder.build(&[]).unwrap();

    let report = fs::read_to_string(path).unwrap();
    assert!(report.ends_with("\nОшибка: Markdown-файлы не найдены.\n"));
}
