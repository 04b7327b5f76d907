pub mod dates;
pub mod dom;
pub mod extract;

use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::ToastmastersMeeting;

/// Structural attributes that identify the agenda table and a speaker's detail
/// cell. Neither carries a usable id or class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub table_border: String,
    pub table_cellpadding: String,
    pub table_cellspacing: String,
    pub detail_colspan: String,
    pub detail_align: String,
    /// Element inside the detail cell that holds the project text.
    pub detail_text: String,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            table_border: "0".into(),
            table_cellpadding: "1".into(),
            table_cellspacing: "2".into(),
            detail_colspan: "3".into(),
            detail_align: "left".into(),
            detail_text: r#"span.gensmall[valign="top"]"#.into(),
        }
    }
}

/// Compiled layout. Holds no mutable state, so one instance can be shared
/// across threads and reused for any number of documents.
#[derive(Debug)]
pub struct Extractor {
    pub(crate) agenda_table: Selector,
    pub(crate) detail_cell: Selector,
    pub(crate) detail_text: Selector,
}

impl Extractor {
    pub fn new(layout: &Layout) -> Result<Self> {
        let agenda_table = format!(
            r#"table[border="{}"][cellpadding="{}"][cellspacing="{}"]"#,
            layout.table_border, layout.table_cellpadding, layout.table_cellspacing
        );
        let detail_cell = format!(
            r#"td[colspan="{}"][align="{}"]"#,
            layout.detail_colspan, layout.detail_align
        );
        Ok(Extractor {
            agenda_table: compile(&agenda_table)?,
            detail_cell: compile(&detail_cell)?,
            detail_text: compile(&layout.detail_text)?,
        })
    }

    /// Best-effort extraction. Missing fields come back empty or as a sentinel.
    pub fn extract(&self, html: &str) -> ToastmastersMeeting {
        let doc = Html::parse_document(html);
        let meeting = extract::extract_all(&doc, self);
        debug!(
            "extracted {} agenda rows, {} speakers, {} attendees",
            meeting.agenda_items.len(),
            meeting.speakers.len(),
            meeting.attending_members.len()
        );
        meeting
    }
}

fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Layout(format!("{}: {:?}", css, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_table_signature() {
        let layout = Layout {
            table_cellpadding: "4".into(),
            ..Layout::default()
        };
        let ex = Extractor::new(&layout).unwrap();
        let html = r#"<table border="0" cellpadding="4" cellspacing="2"><tr>
            <td><span class="gensmall">9:00</span></td><td><span class="gen">Timer</span></td>
            <td><span class="gen">Bo</span></td><td></td><td></td></tr></table>"#;
        let m = ex.extract(html);
        assert_eq!(m.agenda_items.len(), 1);
        assert_eq!(m.agenda_items[0].time, "9:00");

        let default = Extractor::new(&Layout::default()).unwrap();
        assert!(default.extract(html).agenda_items.is_empty());
    }

    #[test]
    fn broken_signature_is_layout_error() {
        let layout = Layout {
            detail_text: "span[".into(),
            ..Layout::default()
        };
        assert!(matches!(Extractor::new(&layout), Err(Error::Layout(_))));
    }
}
