//! src/model/hierarchy.rs
//! ============================================================================
//! # HierarchyCache: Categories → Files, Rebuilt Wholesale
//!
//! The single source of truth for category/file names and membership. The
//! cache is never patched incrementally: every reload replaces the whole
//! `Vec<Category>` atomically, so a render can never observe a partial
//! update. Both server encodings are normalized here and nowhere else.

use crate::api::types::{CategoriesPayload, Category, CategoryRow, FileRef};

/// A file annotated with its parent category name, for the home grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCard {
    pub file_id: u64,
    pub file_name: String,
    pub category_name: String,
}

/// In-memory categories → files mapping.
#[derive(Debug, Clone, Default)]
pub struct HierarchyCache {
    categories: Vec<Category>,
}

impl HierarchyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire cache with a freshly normalized payload.
    pub fn replace_all(&mut self, payload: CategoriesPayload) {
        self.categories = normalize(payload);
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every file across all categories, annotated with its parent category
    /// name, in cache order.
    pub fn all_files(&self) -> Vec<FileCard> {
        self.categories
            .iter()
            .flat_map(|cat| {
                cat.files.iter().map(|f| FileCard {
                    file_id: f.file_id,
                    file_name: f.file_name.clone(),
                    category_name: cat.category_name.clone(),
                })
            })
            .collect()
    }

    pub fn category_name(&self, category_id: u64) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.category_id == category_id)
            .map(|c| c.category_name.as_str())
    }

    pub fn file_name(&self, file_id: u64) -> Option<&str> {
        self.categories
            .iter()
            .flat_map(|c| c.files.iter())
            .find(|f| f.file_id == file_id)
            .map(|f| f.file_name.as_str())
    }

    /// Whether `category_id` currently owns `file_id`. Used to force the
    /// selection home before a cascading category delete.
    pub fn category_owns_file(&self, category_id: u64, file_id: u64) -> bool {
        self.categories
            .iter()
            .find(|c| c.category_id == category_id)
            .is_some_and(|c| c.files.iter().any(|f| f.file_id == file_id))
    }
}

/// Normalize either wire encoding into the canonical nested shape.
///
/// Flat rows are grouped by `category_id` preserving first-seen order; rows
/// without a file id contribute the category only.
pub fn normalize(payload: CategoriesPayload) -> Vec<Category> {
    match payload {
        CategoriesPayload::Nested(cats) => cats
            .into_iter()
            .map(|c| Category {
                category_id: c.category_id,
                category_name: c.category_name,
                files: c.files,
            })
            .collect(),
        CategoriesPayload::Flat(rows) => group_rows(rows),
    }
}

fn group_rows(rows: Vec<CategoryRow>) -> Vec<Category> {
    let mut out: Vec<Category> = Vec::new();
    for row in rows {
        let cat = match out.iter_mut().find(|c| c.category_id == row.category_id) {
            Some(existing) => existing,
            None => {
                out.push(Category {
                    category_id: row.category_id,
                    category_name: row.category_name.clone(),
                    files: Vec::new(),
                });
                out.last_mut().expect("just pushed")
            }
        };
        if let (Some(file_id), Some(file_name)) = (row.file_id, row.file_name) {
            cat.files.push(FileRef { file_id, file_name });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::NestedCategory;

    fn flat(rows: Vec<CategoryRow>) -> CategoriesPayload {
        CategoriesPayload::Flat(rows)
    }

    fn row(
        category_id: u64,
        category_name: &str,
        file: Option<(u64, &str)>,
    ) -> CategoryRow {
        CategoryRow {
            category_id,
            category_name: category_name.to_string(),
            file_id: file.map(|(id, _)| id),
            file_name: file.map(|(_, name)| name.to_string()),
        }
    }

    #[test]
    fn flat_rows_group_by_category() {
        let cats = normalize(flat(vec![
            row(1, "X", None),
            row(1, "X", Some((9, "F"))),
        ]));
        assert_eq!(
            cats,
            vec![Category {
                category_id: 1,
                category_name: "X".into(),
                files: vec![FileRef {
                    file_id: 9,
                    file_name: "F".into()
                }],
            }]
        );
    }

    #[test]
    fn flat_grouping_preserves_first_seen_order() {
        let cats = normalize(flat(vec![
            row(2, "B", Some((20, "b1"))),
            row(1, "A", Some((10, "a1"))),
            row(2, "B", Some((21, "b2"))),
        ]));
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].category_id, 2);
        assert_eq!(cats[0].files.len(), 2);
        assert_eq!(cats[1].category_id, 1);
    }

    #[test]
    fn empty_category_has_no_files() {
        let cats = normalize(flat(vec![row(3, "Empty", None)]));
        assert_eq!(cats.len(), 1);
        assert!(cats[0].files.is_empty());
    }

    #[test]
    fn nested_passes_through() {
        let cats = normalize(CategoriesPayload::Nested(vec![NestedCategory {
            category_id: 7,
            category_name: "Ops".into(),
            files: vec![],
        }]));
        assert_eq!(cats[0].category_id, 7);
        assert!(cats[0].files.is_empty());
    }

    #[test]
    fn all_files_annotates_category_names() {
        let mut cache = HierarchyCache::new();
        cache.replace_all(flat(vec![
            row(1, "X", Some((9, "F"))),
            row(2, "Y", Some((10, "G"))),
        ]));
        let cards = cache.all_files();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].category_name, "X");
        assert_eq!(cards[1].file_name, "G");
    }

    #[test]
    fn ownership_lookup() {
        let mut cache = HierarchyCache::new();
        cache.replace_all(flat(vec![row(1, "X", Some((9, "F")))]));
        assert!(cache.category_owns_file(1, 9));
        assert!(!cache.category_owns_file(1, 10));
        assert!(!cache.category_owns_file(2, 9));
        assert_eq!(cache.file_name(9), Some("F"));
        assert_eq!(cache.category_name(1), Some("X"));
    }
}
