pub mod agenda;
pub mod attendees;
pub mod meeting;
pub mod speaker;

use scraper::Html;

use super::Extractor;
use crate::model::ToastmastersMeeting;

pub fn extract_all(doc: &Html, ex: &Extractor) -> ToastmastersMeeting {
    let meeting_info = meeting::extract(doc);
    let (agenda_items, speakers) = agenda::extract(doc, ex);
    let attending_members = attendees::attending(doc);
    let next_meeting = attendees::next_meeting(doc);

    ToastmastersMeeting {
        meeting_info,
        agenda_items,
        speakers,
        attending_members,
        next_meeting,
    }
}

// ── Tests ──
