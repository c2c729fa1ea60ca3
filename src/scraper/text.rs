use regex::Regex;
use std::sync::LazyLock;

/// Description used when a page has neither a meta description nor text to
/// summarise.
pub const NO_DESCRIPTION: &str = "Описание отсутствует";

const SUMMARY_CHARS: usize = 160;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").expect("valid regex"));
static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[#*\[\]]").expect("valid regex"));
static DOUBLE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Collapses whitespace and puts a single space after every comma.
pub fn normalize_text(text: &str) -> Option<String> {
    let collapsed = WHITESPACE.replace_all(text.trim(), " ");
    let normalized = COMMA.replace_all(&collapsed, ", ");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

/// Non-empty lines of `text`, each with its whitespace collapsed.
pub fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| WHITESPACE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}

/// Short description built from page text: the first 160 characters followed
/// by an ellipsis.
pub fn summarize<S: AsRef<str>>(texts: &[S], strip: bool) -> String {
    let joined = texts
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let joined = if strip { strip_markup(&joined) } else { joined };
    let joined = joined.trim();

    if joined.is_empty() {
        return NO_DESCRIPTION.to_string();
    }

    let head: String = joined.chars().take(SUMMARY_CHARS).collect();
    format!("{}...", head.trim())
}

/// Drops combining acute accents and folds `ё` into `е`.
pub fn remove_accents(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\u{0301}')
        .map(|c| match c {
            'ё' => 'е',
            'Ё' => 'Е',
            other => other,
        })
        .collect()
}

/// Splits a paragraph into lines on double spaces and `•` markers; line
/// breaks count as plain spaces. Bulleted pieces come back as `• item`
/// without a trailing `;`.
pub fn split_bullets(text: &str) -> Vec<String> {
    let flat = text.replace('\n', " ");
    let mut out = Vec::new();
    for chunk in DOUBLE_SPACE.split(&flat) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        if !chunk.contains('•') {
            out.push(chunk.to_string());
            continue;
        }
        for item in chunk.split('•') {
            let item = item.trim().trim_end_matches(';').trim_end();
            if !item.is_empty() {
                out.push(format!("• {}", item));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_fixes_commas_and_spaces() {
        assert_eq!(
            normalize_text("  один ,два\n  три  ").as_deref(),
            Some("один, два три")
        );
        assert_eq!(normalize_text(" \n "), None);
    }

    #[test]
    fn summary_counts_characters_not_bytes() {
        let long = "я".repeat(200);
        let summary = summarize(&[long], false);
        assert_eq!(summary.chars().count(), SUMMARY_CHARS + 3);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn summary_strips_markup_when_asked() {
        assert_eq!(summarize(&["# [Курсы] *ДПО*"], true), "Курсы ДПО...");
        assert_eq!(summarize(&["# Курсы"], false), "# Курсы...");
    }

    #[test]
    fn empty_summary_falls_back() {
        let empty: [&str; 0] = [];
        assert_eq!(summarize(&empty, true), NO_DESCRIPTION);
        assert_eq!(summarize(&["  ", "#"], true), NO_DESCRIPTION);
    }

    #[test]
    fn accents_are_removed() {
        assert_eq!(remove_accents("Ёлкин Пётр Ива\u{0301}нович"), "Елкин Петр Иванович");
    }

    #[test]
    fn bullets_are_split_and_trimmed() {
        let lines = split_bullets("Способы оплаты:  • картой;• наличными;\nпо счёту;");
        assert_eq!(
            lines,
            vec!["Способы оплаты:", "• картой", "• наличными; по счёту"]
        );
        assert_eq!(split_bullets("Первая\nвторая"), vec!["Первая вторая"]);
    }

    #[test]
    fn clean_lines_drops_blanks() {
        assert_eq!(clean_lines(" a   b \n\n c "), vec!["a b", "c"]);
    }
}
