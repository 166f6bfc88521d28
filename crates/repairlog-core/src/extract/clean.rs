//! Body cleaning shared by equipment extraction and timeline previews.
//!
//! Both paths must drop exactly the same lines, otherwise a device shown in a
//! preview could be missing from the inventory (or the other way round).

use std::sync::LazyLock;

use regex::Regex;

static BARE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{10,}$").expect("valid bare phone pattern"));
static LONG_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S{80,}$").expect("valid long url pattern"));
static REPLY_HEADER_EN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^On \d+/\d+/\d+").expect("valid reply header pattern"));
static REPLY_HEADER_FR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Le \d+/\d+/\d+").expect("valid reply header pattern"));
static BARE_STAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+ \w+\.? \d{4} \d+:\d+").expect("valid stamp pattern"));

const CALL_LOG_MARKERS: [&str; 2] = ["{\"Called\"", "{&quot;Called"];

/// What to do with one raw body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFilter {
    Keep,
    /// Drop this line, keep reading.
    Discard,
    /// Quoted reply or signature: ignore this line and everything after it.
    Stop,
}

/// Decide whether a raw line belongs to the note's own content.
pub fn filter_line(line: &str) -> LineFilter {
    let stripped = line.trim();

    if stripped.is_empty()
        || stripped.starts_with('>')
        || CALL_LOG_MARKERS.iter().any(|marker| stripped.starts_with(marker))
        || BARE_PHONE.is_match(stripped)
        || LONG_URL.is_match(stripped)
    {
        return LineFilter::Discard;
    }

    if REPLY_HEADER_EN.is_match(stripped)
        || REPLY_HEADER_FR.is_match(stripped)
        || BARE_STAMP.is_match(stripped)
        // "-- " trims to the same delimiter
        || stripped == "--"
    {
        return LineFilter::Stop;
    }

    LineFilter::Keep
}

/// Lines of `body` that survive cleaning, with their indentation intact.
pub fn clean_lines(body: &str) -> impl Iterator<Item = &str> {
    body.lines()
        .map(|line| (line, filter_line(line)))
        .take_while(|(_, verdict)| *verdict != LineFilter::Stop)
        .filter_map(|(line, verdict)| (verdict == LineFilter::Keep).then_some(line))
}

/// Cleaned body for display, at most `max_lines` lines.
pub fn clean_body(body: &str, max_lines: usize) -> String {
    clean_lines(body)
        .take(max_lines)
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quoted_and_log_lines_are_discarded() {
        let body = "> old reply\n{\"Called\": \"+33100000000\"}\n+33612345678\nkeep me";
        assert_eq!(clean_lines(body).collect::<Vec<_>>(), vec!["keep me"]);
    }

    #[test]
    fn reply_header_stops_processing() {
        let body = "first\nOn 10/01/2026 at 10:00, Someone wrote:\nquoted device";
        assert_eq!(clean_lines(body).collect::<Vec<_>>(), vec!["first"]);

        let body = "first\nLe 10/01/2026 a 10:00, Quelqu'un a ecrit :\nsecond";
        assert_eq!(clean_lines(body).collect::<Vec<_>>(), vec!["first"]);

        let body = "first\n10 janv. 2026 10:02\nsecond";
        assert_eq!(clean_lines(body).collect::<Vec<_>>(), vec!["first"]);
    }

    #[test]
    fn signature_delimiter_ends_the_note() {
        let body = "iPhone 12\n-- \nGeekadomicile\nImac de demo";
        assert_eq!(clean_lines(body).collect::<Vec<_>>(), vec!["iPhone 12"]);
    }

    #[test]
    fn indentation_is_preserved() {
        let body = "Imprimante\n\tbourrage\n      detail";
        assert_eq!(
            clean_lines(body).collect::<Vec<_>>(),
            vec!["Imprimante", "\tbourrage", "      detail"]
        );
    }

    #[test]
    fn clean_body_caps_lines_and_drops_long_urls() {
        let url = format!("https://example.com/{}", "a".repeat(90));
        let body = format!("one  \n{url}\ntwo\nthree");
        assert_eq!(clean_body(&body, 2), "one\ntwo");
    }
}
