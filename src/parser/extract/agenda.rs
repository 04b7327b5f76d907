use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

use super::speaker;
use crate::model::{RowKind, Speaker, TimeSlot, TBA};
use crate::parser::dom::{self, GEN, GENSMALL, TD, TR};
use crate::parser::Extractor;

static LEADING_TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2}").unwrap());

const MIN_CELLS: usize = 5;

/// Walk the agenda table with an explicit cursor. A speaker row consumes its
/// detail row, so the cursor can jump past spacer rows in one step.
pub fn extract(doc: &Html, ex: &Extractor) -> (Vec<TimeSlot>, Vec<Speaker>) {
    let mut items: Vec<TimeSlot> = Vec::new();
    let mut speakers: Vec<Speaker> = Vec::new();

    let Some(table) = doc.select(&ex.agenda_table).next() else {
        debug!("no agenda table in document");
        return (items, speakers);
    };
    let rows: Vec<ElementRef> = table.select(&TR).collect();

    let mut i = 0;
    while i < rows.len() {
        let cells: Vec<ElementRef> = rows[i].select(&TD).collect();
        if cells.len() < MIN_CELLS {
            i += 1;
            continue;
        }

        let slot = read_slot(&cells, items.last());
        let kind = slot.kind();
        items.push(slot);

        if let (RowKind::Speaker, Some(slot)) = (kind, items.last()) {
            let detail_idx = speaker::find_detail_row(&rows, i, ex);
            let detail = speaker::read_detail(detail_idx.map(|d| rows[d]), ex);
            speakers.push(speaker::build(slot, detail));
            if let Some(d) = detail_idx {
                debug!("{}: detail row {} consumed", slot.role, d);
                i = d;
            }
        }
        i += 1;
    }

    (items, speakers)
}

fn read_slot(cells: &[ElementRef], previous: Option<&TimeSlot>) -> TimeSlot {
    let time = cells[0]
        .select(&GENSMALL)
        .next()
        .map(dom::text)
        .filter(|t| LEADING_TIME_RE.is_match(t))
        .or_else(|| previous.map(|p| p.time.clone()))
        .unwrap_or_else(|| TBA.to_string());

    let durations = dom::first_text(cells[4], &GENSMALL);
    let mut marks = durations.split_whitespace().map(str::to_string);

    TimeSlot {
        time,
        role: dom::first_text(cells[1], &GEN),
        presenter: dom::first_text(cells[2], &GEN),
        event: dom::first_text(cells[3], &GENSMALL),
        duration_green: marks.next().unwrap_or_default(),
        duration_amber: marks.next().unwrap_or_default(),
        duration_red: marks.next().unwrap_or_default(),
    }
}
