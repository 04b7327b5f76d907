use scraper::ElementRef;

use crate::model::{Speaker, TimeSlot, NO_PATHWAYS, TBA};
use crate::parser::dom::{self, ITALIC};
use crate::parser::Extractor;

/// Project line and description recovered from a speaker's detail row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub project: String,
    pub description: String,
}

impl Detail {
    fn tba() -> Self {
        Detail {
            project: TBA.to_string(),
            description: String::new(),
        }
    }
}

/// Scan every row after `current` (spacer rows included) for the first one that
/// holds a detail cell. Returns its index so the caller can move the cursor there.
pub fn find_detail_row(rows: &[ElementRef], current: usize, ex: &Extractor) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(current + 1)
        .find(|(_, row)| row.select(&ex.detail_cell).next().is_some())
        .map(|(i, _)| i)
}

pub fn read_detail(row: Option<ElementRef>, ex: &Extractor) -> Detail {
    let Some(span) = row
        .and_then(|r| r.select(&ex.detail_cell).next())
        .and_then(|cell| cell.select(&ex.detail_text).next())
    else {
        return Detail::tba();
    };

    // Pathways line: "<project> - <description>" in italics
    if let Some(italic) = span.select(&ITALIC).next() {
        let line = dom::text(italic);
        return match line.split_once(" - ") {
            Some((project, rest)) => Detail {
                project: project.trim().to_string(),
                description: rest.trim().to_string(),
            },
            None => Detail {
                project: line,
                description: String::new(),
            },
        };
    }

    let fragments: Vec<&str> = span.text().map(str::trim).filter(|s| !s.is_empty()).collect();
    if fragments.is_empty() {
        return Detail::tba();
    }
    Detail {
        project: NO_PATHWAYS.to_string(),
        description: fragments.join(" "),
    }
}

pub fn build(slot: &TimeSlot, detail: Detail) -> Speaker {
    Speaker {
        position: slot.role.clone(),
        name: slot.presenter.clone(),
        project: detail.project,
        title: slot.event.clone(),
        description: detail.description,
        time: slot.time.clone(),
        duration_green: slot.duration_green.clone(),
        duration_amber: slot.duration_amber.clone(),
        duration_red: slot.duration_red.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dom::TR;
    use crate::parser::Layout;
    use scraper::Html;

    fn extractor() -> Extractor {
        Extractor::new(&Layout::default()).unwrap()
    }

    fn table(rows: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><table border="0" cellpadding="1" cellspacing="2">{}</table></body></html>"#,
            rows
        ))
    }

    const SPEAKER_ROW: &str = r#"<tr><td><span class="gensmall">18:10</span></td><td><span class="gen">Speaker 1</span></td><td><span class="gen">Ingrid</span></td><td><span class="gensmall">Title</span></td><td><span class="gensmall">5:00 6:00 7:00</span></td></tr>"#;

    fn detail_row(inner: &str) -> String {
        format!(
            r#"<tr><td></td><td colspan="3" align="left"><span class="gensmall" valign="top">{}</span></td></tr>"#,
            inner
        )
    }

    #[test]
    fn lookahead_skips_filler_rows() {
        let html = format!(
            "{}<tr><td colspan=\"5\">&nbsp;</td></tr><tr><td></td></tr>{}",
            SPEAKER_ROW,
            detail_row("<i>Level 2: Project Name - Learn the ropes</i>")
        );
        let doc = table(&html);
        let ex = extractor();
        let rows: Vec<ElementRef> = doc.select(&TR).collect();

        let idx = find_detail_row(&rows, 0, &ex);
        assert_eq!(idx, Some(3));

        let detail = read_detail(idx.map(|i| rows[i]), &ex);
        assert_eq!(detail.project, "Level 2: Project Name");
        assert_eq!(detail.description, "Learn the ropes");
    }

    #[test]
    fn italic_without_separator_is_all_project() {
        let doc = table(&format!("{}{}", SPEAKER_ROW, detail_row("<i>Ice Breaker</i>")));
        let ex = extractor();
        let rows: Vec<ElementRef> = doc.select(&TR).collect();
        let detail = read_detail(Some(rows[1]), &ex);
        assert_eq!(detail.project, "Ice Breaker");
        assert_eq!(detail.description, "");
    }

    #[test]
    fn description_keeps_later_separators() {
        let doc = table(&detail_row("<i>Level 3 - Persuasive Speaking - Part A</i>"));
        let ex = extractor();
        let rows: Vec<ElementRef> = doc.select(&TR).collect();
        let detail = read_detail(Some(rows[0]), &ex);
        assert_eq!(detail.project, "Level 3");
        assert_eq!(detail.description, "Persuasive Speaking - Part A");
    }

    #[test]
    fn plain_text_detail_has_no_pathways() {
        let doc = table(&detail_row("Custom speech<br>\n  about tooling  "));
        let ex = extractor();
        let rows: Vec<ElementRef> = doc.select(&TR).collect();
        let detail = read_detail(Some(rows[0]), &ex);
        assert_eq!(detail.project, NO_PATHWAYS);
        assert_eq!(detail.description, "Custom speech about tooling");
    }

    #[test]
    fn empty_or_missing_detail_is_tba() {
        let doc = table(&detail_row("  "));
        let ex = extractor();
        let rows: Vec<ElementRef> = doc.select(&TR).collect();
        assert_eq!(read_detail(Some(rows[0]), &ex), Detail::tba());
        assert_eq!(read_detail(None, &ex), Detail::tba());
    }

    #[test]
    fn no_detail_row_after_speaker() {
        let doc = table(SPEAKER_ROW);
        let ex = extractor();
        let rows: Vec<ElementRef> = doc.select(&TR).collect();
        assert_eq!(find_detail_row(&rows, 0, &ex), None);
    }

    #[test]
    fn speaker_copies_timing_from_slot() {
        let slot = TimeSlot {
            time: "18:10".into(),
            role: "Speaker 2".into(),
            presenter: "Per".into(),
            event: "Why Rust".into(),
            duration_green: "5:00".into(),
            duration_amber: "6:00".into(),
            duration_red: "7:00".into(),
        };
        let s = build(&slot, Detail::tba());
        assert_eq!(s.position, slot.role);
        assert_eq!(s.name, slot.presenter);
        assert_eq!(s.title, slot.event);
        assert_eq!(
            (&s.time, &s.duration_green, &s.duration_amber, &s.duration_red),
            (&slot.time, &slot.duration_green, &slot.duration_amber, &slot.duration_red)
        );
    }
}
