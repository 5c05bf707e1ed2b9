//! src/controller/router.rs
//! ============================================================================
//! # Query Router
//!
//! Decides which of the three retrieval strategies serves the current
//! selection/query combination, and builds the client-side result sets.
//! file-browse and file-search are pure functions over the per-file buffer;
//! global-search is issued by the event loop and only assembled here.
//!
//! file-search always filters the *unmodified* full buffer, never a
//! previously filtered subset, so changing the query can never compound
//! stale filtering.

use crate::api::types::TextEntry;
use crate::model::nav::NavState;
use crate::model::result_set::{QueryMode, ResultSet};
use crate::view::pager::paginate;

/// Route the current state to a retrieval strategy. `None` means the home
/// grid is shown and no entry retrieval runs.
pub fn route(nav: &NavState, query: &str) -> Option<QueryMode> {
    let has_query = !query.trim().is_empty();
    match (nav.selected_file(), has_query) {
        (Some(_), false) => Some(QueryMode::FileBrowse),
        (Some(_), true) => Some(QueryMode::FileSearch),
        (None, true) => Some(QueryMode::GlobalSearch),
        (None, false) => None,
    }
}

/// Case-insensitive substring filter over question OR answer.
pub fn filter_texts(texts: &[TextEntry], query: &str) -> Vec<TextEntry> {
    let needle = query.trim().to_lowercase();
    texts
        .iter()
        .filter(|t| {
            t.question.to_lowercase().contains(&needle)
                || t.answer.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// file-browse: slice the full buffer.
pub fn browse_page(texts: &[TextEntry], page: u64, page_size: usize) -> ResultSet {
    let win = paginate(texts.len(), page, page_size);
    ResultSet {
        items: texts[win.window_start..win.window_end].to_vec(),
        total: texts.len(),
        page: win.clamped_page,
        page_size,
        mode: QueryMode::FileBrowse,
        query: String::new(),
    }
}

/// file-search: filter the full buffer, then slice the filtered list.
pub fn search_page(texts: &[TextEntry], query: &str, page: u64, page_size: usize) -> ResultSet {
    let filtered = filter_texts(texts, query);
    let win = paginate(filtered.len(), page, page_size);
    ResultSet {
        items: filtered[win.window_start..win.window_end].to_vec(),
        total: filtered.len(),
        page: win.clamped_page,
        page_size,
        mode: QueryMode::FileSearch,
        query: query.trim().to_string(),
    }
}

/// global-search: items and total come from the server and are trusted
/// verbatim; only the page number is normalized for display.
pub fn global_page(
    items: Vec<TextEntry>,
    total: usize,
    query: &str,
    page: u64,
    page_size: usize,
) -> ResultSet {
    let win = paginate(total, page, page_size);
    ResultSet {
        items,
        total,
        page: win.clamped_page,
        page_size,
        mode: QueryMode::GlobalSearch,
        query: query.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, question: &str, answer: &str) -> TextEntry {
        TextEntry {
            text_id: id.into(),
            question: question.into(),
            answer: answer.into(),
            text_author: "author".into(),
            updated_at: None,
        }
    }

    fn buffer() -> Vec<TextEntry> {
        (0..23)
            .map(|i| entry(&format!("t{i}"), &format!("question {i}"), "plain"))
            .collect()
    }

    #[test]
    fn routes_by_selection_and_query() {
        let home = NavState::Home;
        let file = NavState::FileSelected {
            file_id: 1,
            file_name: "F".into(),
        };
        assert_eq!(route(&home, ""), None);
        assert_eq!(route(&home, "  "), None);
        assert_eq!(route(&home, "q"), Some(QueryMode::GlobalSearch));
        assert_eq!(route(&file, ""), Some(QueryMode::FileBrowse));
        assert_eq!(route(&file, "q"), Some(QueryMode::FileSearch));
    }

    #[test]
    fn browse_pages_concatenate_to_full_buffer() {
        let texts = buffer();
        let mut collected = Vec::new();
        for page in 1..=3 {
            let rs = browse_page(&texts, page, 10);
            assert_eq!(rs.total, 23);
            assert_eq!(
                rs.items.len(),
                usize::min(10, 23 - (page as usize - 1) * 10)
            );
            collected.extend(rs.items);
        }
        assert_eq!(collected, texts);
    }

    #[test]
    fn browse_clamps_out_of_range_pages() {
        let texts = buffer();
        assert_eq!(browse_page(&texts, 0, 10).page, 1);
        assert_eq!(browse_page(&texts, 99, 10).page, 3);
    }

    #[test]
    fn filter_matches_question_or_answer_case_insensitive() {
        let texts = vec![
            entry("a", "How to Restart?", "use systemctl"),
            entry("b", "irrelevant", "mention RESTART here"),
            entry("c", "nothing", "nothing"),
        ];
        let hits = filter_texts(&texts, "restart");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text_id, "a");
        assert_eq!(hits[1].text_id, "b");
    }

    #[test]
    fn refilter_is_independent_of_prior_filtering() {
        let texts = vec![
            entry("1", "alpha", "x"),
            entry("2", "ab", "x"),
            entry("3", "beta", "x"),
        ];
        let direct = search_page(&texts, "a", 1, 10);
        let narrowed = search_page(&texts, "ab", 1, 10);
        let widened_again = search_page(&texts, "a", 1, 10);
        assert_eq!(narrowed.total, 1);
        assert_eq!(direct, widened_again);
        assert_eq!(direct.total, 3);
    }

    #[test]
    fn search_page_slices_filtered_list() {
        let texts: Vec<TextEntry> = (0..15)
            .map(|i| entry(&format!("t{i}"), &format!("match {i}"), ""))
            .collect();
        let rs = search_page(&texts, "match", 2, 10);
        assert_eq!(rs.total, 15);
        assert_eq!(rs.items.len(), 5);
        assert_eq!(rs.page, 2);
        assert_eq!(rs.mode, QueryMode::FileSearch);
        assert_eq!(rs.query, "match");
    }

    #[test]
    fn global_page_trusts_server_total() {
        let rs = global_page(vec![entry("x", "q", "a")], 137, "foo", 3, 10);
        assert_eq!(rs.total, 137);
        assert_eq!(rs.items.len(), 1);
        assert_eq!(rs.page, 3);
        assert_eq!(rs.mode, QueryMode::GlobalSearch);
    }
}
