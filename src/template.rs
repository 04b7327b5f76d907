use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::{RowKind, ToastmastersMeeting};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{[A-Za-z0-9_]+\}\}").unwrap());

const NA: &str = "N/A";
/// Speakers beyond this many have no slot in the template.
const TEMPLATE_SPEAKERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTiming {
    pub presenter: String,
    pub min_time: String,
    pub max_time: String,
}

fn or_na(s: &str) -> String {
    if s.is_empty() {
        NA.to_string()
    } else {
        s.to_string()
    }
}

/// Role name reduced to ASCII letters and digits, usable inside a token.
pub fn role_key(role: &str) -> String {
    role.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Presenter and green/red timing per role. A role seen twice keeps its last row.
pub fn roles(meeting: &ToastmastersMeeting) -> BTreeMap<String, RoleTiming> {
    meeting
        .agenda_items
        .iter()
        .filter(|t| !t.role.is_empty() && t.kind() != RowKind::Break)
        .map(|t| {
            (
                role_key(&t.role),
                RoleTiming {
                    presenter: or_na(&t.presenter),
                    min_time: or_na(&t.duration_green),
                    max_time: or_na(&t.duration_red),
                },
            )
        })
        .collect()
}

pub fn replacements(meeting: &ToastmastersMeeting) -> BTreeMap<String, String> {
    let info = &meeting.meeting_info;
    let mut map = BTreeMap::new();
    let mut put = |key: String, value: String| {
        map.insert(format!("{{{{{}}}}}", key), value);
    };

    put("meeting_date".into(), or_na(&info.meeting_date));
    put("next_meeting_date".into(), or_na(&info.next_meeting_date));
    put("word_of_the_day".into(), or_na(&info.word_of_the_day));
    put("meeting_theme".into(), or_na(&info.meeting_theme));
    put("club_name".into(), or_na(&info.club_name));
    put("meeting_time".into(), or_na(&info.meeting_time));
    put("venue".into(), or_na(&info.venue));

    for (key, role) in roles(meeting) {
        put(format!("{}_Presenter", key), role.presenter);
        put(format!("{}_Min", key), role.min_time);
        put(format!("{}_Max", key), role.max_time);
    }

    for (i, s) in meeting.speakers.iter().take(TEMPLATE_SPEAKERS).enumerate() {
        let n = i + 1;
        put(format!("Speaker{}_Name", n), or_na(&s.name));
        put(format!("Speaker{}_Project", n), or_na(&s.project));
        put(format!("Speaker{}_Title", n), or_na(&s.title));
        put(format!("Speaker{}_Description", n), or_na(&s.description));
        put(format!("Speaker{}_Min", n), or_na(&s.duration_green));
        put(format!("Speaker{}_Max", n), or_na(&s.duration_red));
    }

    map
}

pub fn render_text(template: &str, replacements: &BTreeMap<String, String>) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |text, (token, value)| text.replace(token.as_str(), value))
}

/// Tokens still present after rendering, in order of appearance.
pub fn unresolved_tokens(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Fill every token in a text template and write the result to `output`.
pub fn render_file(template: &Path, output: &Path, meeting: &ToastmastersMeeting) -> Result<()> {
    let source = fs::read_to_string(template).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::TemplateNotFound(template.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let rendered = render_text(&source, &replacements(meeting));
    for token in unresolved_tokens(&rendered) {
        warn!("no value for {} in {}", token, template.display());
    }

    fs::write(output, rendered)?;
    info!("presentation written to {}", output.display());
    Ok(())
}
