use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::model::{RowKind, ToastmastersMeeting, TBA};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleInfo {
    pub presenter: String,
}

/// The meeting as written to `agenda.json`, with a flat role lookup for slide decks.
#[derive(Debug, Serialize)]
pub struct AgendaExport<'a> {
    #[serde(flatten)]
    pub meeting: &'a ToastmastersMeeting,
    pub structured_roles: BTreeMap<String, RoleInfo>,
}

/// Assigned non-speaker roles, keyed by the role with whitespace removed.
pub fn structured_roles(meeting: &ToastmastersMeeting) -> BTreeMap<String, RoleInfo> {
    meeting
        .agenda_items
        .iter()
        .filter(|t| !t.role.is_empty() && !t.presenter.is_empty())
        .filter(|t| !t.presenter.eq_ignore_ascii_case(TBA))
        .filter(|t| t.kind() == RowKind::Other)
        .map(|t| {
            let key: String = t.role.chars().filter(|c| !c.is_whitespace()).collect();
            (key, RoleInfo { presenter: t.presenter.clone() })
        })
        .collect()
}

pub fn to_json(meeting: &ToastmastersMeeting) -> Result<String> {
    let export = AgendaExport {
        meeting,
        structured_roles: structured_roles(meeting),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn write_json(meeting: &ToastmastersMeeting, path: &Path) -> Result<()> {
    fs::write(path, to_json(meeting)?)?;
    info!("agenda written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Extractor, Layout};

    fn fixture() -> ToastmastersMeeting {
        let html = std::fs::read_to_string("tests/fixtures/agenda.html").unwrap();
        Extractor::new(&Layout::default()).unwrap().extract(&html)
    }

    #[test]
    fn structured_roles_only_assigned_non_speakers() {
        let roles = structured_roles(&fixture());
        let keys: Vec<&str> = roles.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "Evaluator1",
                "GeneralEvaluator",
                "SergeantatArms",
                "TableTopicsEvaluator",
                "TableTopicsMaster",
                "ToastmasteroftheEvening",
            ]
        );
        assert_eq!(roles["TableTopicsMaster"].presenter, "Sofie Dahl");
    }

    #[test]
    fn json_shape() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&fixture()).unwrap()).unwrap();
        assert_eq!(json["meeting_info"]["club_name"], "Oslo Toastmasters");
        assert_eq!(json["agenda_items"].as_array().unwrap().len(), 11);
        assert_eq!(json["speakers"][0]["project"], "Level 2: Project Name");
        assert_eq!(json["attending_members"][5], "Guest One");
        assert_eq!(json["next_meeting"], "Tuesday 16th September 2025 - Humour night");
        assert_eq!(json["structured_roles"]["Evaluator1"]["presenter"], "Lars Moe");
    }
}
