use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use tracing::warn;

use crate::model::MeetingInfo;
use crate::parser::dates;
use crate::parser::dom::{self, BOLD, GENSMALL, MAINTITLE, POSTBODY};

static DISTRICT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"District \d+").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\s+\d+\w*\s+\w+\s+\d{4}")
        .unwrap()
});
static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());

const WORD_OF_THE_DAY: &str = "Word of the Day";
const VENUE: &str = "Venue ";

pub fn extract(doc: &Html) -> MeetingInfo {
    let mut info = MeetingInfo {
        club_name: doc.select(&MAINTITLE).next().map(dom::text).unwrap_or_default(),
        ..Default::default()
    };

    read_district_line(doc, &mut info);
    read_date_and_word(doc, &mut info);

    info.meeting_time = doc
        .select(&BOLD)
        .find(|b| dom::single_string(*b).is_some_and(|s| CLOCK_RE.is_match(s)))
        .map(dom::text)
        .unwrap_or_default();

    info.venue = doc
        .select(&POSTBODY)
        .map(|span| span.text().collect::<String>())
        .find(|t| t.contains(VENUE))
        .map(|t| t.trim().replace(VENUE, "").trim().to_string())
        .unwrap_or_default();

    info.schedule = doc
        .select(&GENSMALL)
        .find(|s| dom::single_string(*s).is_some_and(|t| t.trim_start().starts_with("Every")))
        .map(dom::text)
        .unwrap_or_default();

    info
}

/// "District 95, Division E, Area 42, Club Number 1234567". All four or nothing.
fn read_district_line(doc: &Html, info: &mut MeetingInfo) {
    let Some(line) = doc
        .select(&GENSMALL)
        .find(|s| dom::single_string(*s).is_some_and(|t| DISTRICT_RE.is_match(t)))
        .map(dom::text)
    else {
        return;
    };

    let parts: Vec<&str> = line.split(", ").collect();
    if parts.len() < 4 {
        return;
    }
    info.district = parts[0].replace("District ", "");
    info.division = parts[1].replace("Division ", "");
    info.area = parts[2].replace("Area ", "");
    info.club_number = parts[3].replace("Club Number ", "");
}

/// Walks postbody spans until the first one carrying a meeting date. The word of
/// the day is taken from the last span up to that point that mentions it.
fn read_date_and_word(doc: &Html, info: &mut MeetingInfo) {
    for span in doc.select(&POSTBODY) {
        let raw: String = span.text().collect();

        if let Some(word) = word_of_the_day(&raw) {
            info.word_of_the_day = word;
        }

        if let Some(m) = DATE_RE.find(raw.trim()) {
            info.meeting_date = m.as_str().to_string();
            info.next_meeting_date = match dates::next_week(&info.meeting_date) {
                Ok(next) => next,
                Err(e) => {
                    warn!("next meeting date for '{}': {}", info.meeting_date, e);
                    e.to_string()
                }
            };
            break;
        }
    }
}

/// Text trailing the phrase, provided it runs to the end on a single line.
fn word_of_the_day(text: &str) -> Option<String> {
    text.match_indices(WORD_OF_THE_DAY).find_map(|(i, phrase)| {
        let rest = &text[i + phrase.len()..];
        let line = rest.strip_suffix('\n').unwrap_or(rest);
        (!line.contains('\n')).then(|| line.trim().to_string())
    })
}
