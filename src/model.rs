use serde::Serialize;

/// Placeholder project when no detail row (or no detail text) exists.
pub const TBA: &str = "TBA";
/// Project sentinel for a detail row that carries free text but no Pathways line.
pub const NO_PATHWAYS: &str = "N/A (No Pathways Info)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeetingInfo {
    pub club_name: String,
    pub district: String,
    pub division: String,
    pub area: String,
    pub club_number: String,
    pub meeting_date: String,
    pub next_meeting_date: String,
    pub meeting_time: String,
    pub venue: String,
    pub schedule: String,
    pub word_of_the_day: String,
    pub meeting_theme: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub time: String,
    pub role: String,
    pub presenter: String,
    pub event: String,
    pub duration_green: String,
    pub duration_amber: String,
    pub duration_red: String,
}

impl TimeSlot {
    pub fn kind(&self) -> RowKind {
        RowKind::of(&self.role)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Speaker {
    pub position: String,
    pub name: String,
    pub project: String,
    pub title: String,
    pub description: String,
    pub time: String,
    pub duration_green: String,
    pub duration_amber: String,
    pub duration_red: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToastmastersMeeting {
    pub meeting_info: MeetingInfo,
    pub agenda_items: Vec<TimeSlot>,
    pub speakers: Vec<Speaker>,
    pub attending_members: Vec<String>,
    pub next_meeting: String,
}

impl ToastmastersMeeting {
    /// Blank themes are stored as "N/A".
    pub fn set_theme(&mut self, theme: &str) {
        let theme = theme.trim();
        self.meeting_info.meeting_theme = if theme.is_empty() {
            "N/A".to_string()
        } else {
            theme.to_string()
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Speaker,
    Break,
    Other,
}

impl RowKind {
    pub fn of(role: &str) -> Self {
        match role {
            r if r.contains("Speaker") => RowKind::Speaker,
            "Break" => RowKind::Break,
            _ => RowKind::Other,
        }
    }
}
