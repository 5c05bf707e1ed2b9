//! src/api/types.rs
//! ============================================================================
//! # Wire Types for the Knowledge-Base REST Collaborator
//!
//! Serde models for everything that crosses the HTTP boundary. The one
//! interesting shape is [`CategoriesPayload`]: the server may answer
//! `GET /categories` with either a nested encoding (each category carries a
//! `files` array) or a flat encoding (one row per category/file pair). The
//! union is resolved here and normalized in `model::hierarchy`; neither wire
//! shape leaks past the cache boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file reference inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub file_id: u64,
    pub file_name: String,
}

/// Canonical nested category shape, the only one the rest of the app sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: u64,
    pub category_name: String,
    #[serde(default)]
    pub files: Vec<FileRef>,
}

/// One row of the flat `GET /categories` encoding. `file_id`/`file_name`
/// are absent when the category has no files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRow {
    pub category_id: u64,
    pub category_name: String,
    #[serde(default)]
    pub file_id: Option<u64>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// The two possible server encodings for `GET /categories`.
///
/// `deny_unknown_fields` on the nested variant is load-bearing: a flat row
/// carrying `file_id` must fail the nested parse so the untagged decode
/// falls through to `Flat`. A flat payload whose rows all lack file columns
/// decodes as `Nested` with empty `files`, which is semantically identical.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoriesPayload {
    Nested(Vec<NestedCategory>),
    Flat(Vec<CategoryRow>),
}

/// Nested wire shape, strict about unknown fields (see [`CategoriesPayload`]).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NestedCategory {
    pub category_id: u64,
    pub category_name: String,
    #[serde(default)]
    pub files: Vec<FileRef>,
}

/// A question/answer entry. `text_id` is an opaque server-issued string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntry {
    pub text_id: String,
    pub question: String,
    pub answer: String,
    pub text_author: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response body of `GET /files/{id}/texts`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileTexts {
    #[serde(default)]
    pub texts: Vec<TextEntry>,
}

/// Response body of `GET /texts/search`. `total_texts` is the server-side
/// total across all pages and is trusted verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub texts: Vec<TextEntry>,
    #[serde(default)]
    pub total_texts: usize,
}

/// Fields of a text entry the user can edit; shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextDraft {
    pub question: String,
    pub answer: String,
    pub text_author: String,
}

// --- request bodies ---------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CreateCategoryBody<'a> {
    pub category_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UpdateCategoryBody<'a> {
    pub category_id: u64,
    pub category_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateFileBody<'a> {
    pub file_name: &'a str,
    pub category_id: u64,
}

#[derive(Debug, Serialize)]
pub struct UpdateTextBody<'a> {
    pub text_id: &'a str,
    #[serde(flatten)]
    pub draft: &'a TextDraft,
}

#[derive(Debug, Serialize)]
pub struct DeleteTextsBody<'a> {
    pub text_ids: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_payload_decodes_as_nested() {
        let json = r#"[
            {"category_id": 1, "category_name": "X",
             "files": [{"file_id": 9, "file_name": "F"}]},
            {"category_id": 2, "category_name": "Y"}
        ]"#;
        let payload: CategoriesPayload = serde_json::from_str(json).unwrap();
        match payload {
            CategoriesPayload::Nested(cats) => {
                assert_eq!(cats.len(), 2);
                assert_eq!(cats[0].files.len(), 1);
                assert!(cats[1].files.is_empty());
            }
            CategoriesPayload::Flat(_) => panic!("expected nested decode"),
        }
    }

    #[test]
    fn flat_payload_with_file_columns_decodes_as_flat() {
        let json = r#"[
            {"category_id": 1, "category_name": "X"},
            {"category_id": 1, "category_name": "X", "file_id": 9, "file_name": "F"}
        ]"#;
        let payload: CategoriesPayload = serde_json::from_str(json).unwrap();
        match payload {
            CategoriesPayload::Flat(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].file_id, None);
                assert_eq!(rows[1].file_id, Some(9));
            }
            CategoriesPayload::Nested(_) => panic!("expected flat decode"),
        }
    }

    #[test]
    fn text_entry_tolerates_missing_timestamp() {
        let json = r#"{"text_id": "abc123", "question": "q?", "answer": "a.",
                       "text_author": "maria"}"#;
        let entry: TextEntry = serde_json::from_str(json).unwrap();
        assert!(entry.updated_at.is_none());
    }
}
