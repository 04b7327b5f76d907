use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::parser::dom::{self, CATTITLE, GENSMALL, TD_GENSMALL};

static NAME_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;\n\r]+").unwrap());

const PLACEHOLDER: &str = "Member";

fn section_header<'a>(doc: &'a Html, label: &str) -> Option<ElementRef<'a>> {
    doc.select(&CATTITLE)
        .find(|el| dom::single_string(*el) == Some(label))
}

/// Names listed in the row under the "Attending" header. Order and duplicates
/// are kept as found.
pub fn attending(doc: &Html) -> Vec<String> {
    let Some(header) = section_header(doc, "Attending") else {
        return Vec::new();
    };
    if dom::ancestor(header, "table").is_none() {
        return Vec::new();
    }
    let Some(members_row) = dom::ancestor(header, "tr")
        .and_then(|row| dom::next_sibling_where(row, |s| s.value().name() == "tr"))
    else {
        return Vec::new();
    };

    members_row
        .select(&TD_GENSMALL)
        .flat_map(|cell| split_names(&dom::text(cell)))
        .collect()
}

fn split_names(raw: &str) -> Vec<String> {
    NAME_SPLIT_RE
        .split(raw)
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != PLACEHOLDER)
        .map(str::to_string)
        .collect()
}

/// Free text beside the "Next Meeting" header.
pub fn next_meeting(doc: &Html) -> String {
    section_header(doc, "Next Meeting")
        .and_then(|header| dom::next_sibling_where(header, |s| GENSMALL.matches(s)))
        .map(dom::text)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Html {
        Html::parse_document(&std::fs::read_to_string("tests/fixtures/agenda.html").unwrap())
    }

    #[test]
    fn fixture_attendees() {
        let names = attending(&fixture());
        assert_eq!(
            names,
            ["Kari Nordmann", "Ola Hansen", "Ingrid Berg", "Per Olsen", "Ingrid Berg", "Guest One"]
        );
        assert!(!names.iter().any(|n| n == "Member"));
    }

    #[test]
    fn fixture_next_meeting() {
        assert_eq!(next_meeting(&fixture()), "Tuesday 16th September 2025 - Humour night");
    }

    #[test]
    fn split_drops_blanks_and_placeholder() {
        assert_eq!(
            split_names("Member; Anne,,\r\n Bo ;Member , member"),
            ["Anne", "Bo", "member"]
        );
        assert!(split_names(" ,;\n").is_empty());
    }

    #[test]
    fn header_outside_table_is_ignored() {
        let doc = Html::parse_document(
            r#"<div><span class="cattitle">Attending</span></div><table><tr><td class="gensmall">A</td></tr></table>"#,
        );
        assert!(attending(&doc).is_empty());
    }

    #[test]
    fn header_without_following_row() {
        let doc = Html::parse_document(
            r#"<table><tr><td><span class="cattitle">Attending</span></td></tr></table>"#,
        );
        assert!(attending(&doc).is_empty());
    }

    #[test]
    fn missing_next_meeting_is_empty() {
        let doc = Html::parse_document(r#"<span class="cattitle">Next Meeting</span><b>soon</b>"#);
        assert_eq!(next_meeting(&doc), "");
        assert_eq!(next_meeting(&Html::parse_document("<p></p>")), "");
    }
}
