//! src/view/console.rs
//! ============================================================
//! Plain-text rendering of a [`RenderSnapshot`] for the line
//! console. Pure string assembly; the snapshot already carries
//! everything a renderer needs, so there is no state access here.

use std::fmt::Write;

use crate::model::app_state::{NotificationLevel, RegionState};
use crate::view::pager::{PagerControl, PagerSlot};
use crate::view::snapshots::{MainSnapshot, RenderSnapshot, format_updated_at};

/// Render one snapshot as a screenful of text.
pub fn render(snap: &RenderSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", snap.title);
    let _ = writeln!(out, "{}", snap.subtitle);

    if let Some(n) = &snap.notification {
        let tag = match n.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
            NotificationLevel::Info => "info",
        };
        let _ = writeln!(out, "[{tag}] {}", n.message);
    }

    if let Some(pending) = &snap.pending_delete {
        let _ = writeln!(out, "\n!! {}: {} (yes/no)", pending.title, pending.message);
        return out;
    }

    let _ = writeln!(out, "\n-- Categories --");
    match &snap.sidebar.region {
        RegionState::Loading => {
            let _ = writeln!(out, "  loading...");
        }
        RegionState::Failed(msg) => {
            let _ = writeln!(out, "  {msg}");
        }
        RegionState::Ready => {
            for cat in &snap.sidebar.categories {
                let _ = writeln!(out, "  [{}] {}", cat.category_id, cat.category_name);
                for file in &cat.files {
                    let _ = writeln!(out, "      ({}) {}", file.file_id, file.file_name);
                }
            }
        }
    }

    let _ = writeln!(out);
    match &snap.main {
        MainSnapshot::Loading => {
            let _ = writeln!(out, "loading...");
        }
        MainSnapshot::Failed(msg) => {
            let _ = writeln!(out, "{msg}");
        }
        MainSnapshot::HomeGrid(cards) => {
            if cards.is_empty() {
                let _ = writeln!(out, "No files yet.");
            }
            for card in cards {
                let _ = writeln!(
                    out,
                    "  ({}) {}  [{}]",
                    card.file_id, card.file_name, card.category_name
                );
            }
        }
        MainSnapshot::Entries(entries) => {
            if entries.is_empty() {
                let _ = writeln!(out, "No entries found.");
            }
            for e in entries {
                let _ = writeln!(out, "  #{} Q: {}", e.text_id, e.question);
                let _ = writeln!(out, "     A: {}", e.answer);
                let stamp = format_updated_at(e.updated_at);
                if stamp.is_empty() {
                    let _ = writeln!(out, "     -- {}", e.text_author);
                } else {
                    let _ = writeln!(out, "     -- {}, {}", e.text_author, stamp);
                }
            }
        }
    }

    if let Some(stats) = &snap.stats {
        let _ = writeln!(out, "\n{} entries, page {}", stats.total, stats.page);
    }
    if let Some(pager) = &snap.pager {
        let _ = writeln!(out, "{}", render_pager(pager));
    }

    out
}

fn render_pager(pager: &PagerControl) -> String {
    let mut out = String::new();
    out.push_str(if pager.prev_enabled { "<prev " } else { "----- " });
    for slot in &pager.slots {
        match slot {
            PagerSlot::Page { number, active: true } => {
                let _ = write!(out, "[{number}] ");
            }
            PagerSlot::Page { number, active: false } => {
                let _ = write!(out, "{number} ");
            }
            PagerSlot::Ellipsis => out.push_str("... "),
        }
    }
    out.push_str(if pager.next_enabled { "next>" } else { "-----" });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::pager::PagerControl;

    #[test]
    fn pager_line_marks_active_page_and_edges() {
        let ctl = PagerControl::build(120, 6, 10).unwrap();
        assert_eq!(render_pager(&ctl), "<prev 1 ... 4 5 [6] 7 8 ... 12 next>");

        let ctl = PagerControl::build(30, 1, 10).unwrap();
        assert_eq!(render_pager(&ctl), "----- [1] 2 3 next>");
    }
}
