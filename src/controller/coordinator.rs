//! src/controller/coordinator.rs
//! ============================================================================
//! # CRUD Mutation Coordinator
//!
//! One uniform contract for every create/update/delete: validate before any
//! request is issued, execute exactly one endpoint call, and describe which
//! reload restores consistency afterwards. Nothing is applied optimistically,
//! so re-invoking after a failure is always safe.
//!
//! Deletes never execute directly: `pending_delete_for` builds the
//! confirmation step whose message states the cascading consequence.

use crate::api::client::KnowledgeBaseApi;
use crate::api::types::TextDraft;
use crate::controller::commands::DeleteTarget;
use crate::error::AppError;
use crate::model::app_state::PendingDelete;
use crate::model::hierarchy::HierarchyCache;

/// Every mutation the console can issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateCategory { name: String },
    RenameCategory { category_id: u64, name: String },
    DeleteCategory { category_id: u64 },
    CreateFile { category_id: u64, name: String },
    DeleteFile { file_id: u64 },
    CreateText { file_id: u64, draft: TextDraft },
    UpdateText { text_id: String, draft: TextDraft },
    DeleteTexts { text_ids: Vec<String> },
}

/// Which reload restores UI consistency after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPlan {
    /// Category/file mutations: full hierarchy cache reload.
    Hierarchy,
    /// Text mutations: reload the selected file's entry buffer.
    FileTexts,
}

impl Mutation {
    pub fn refresh_plan(&self) -> RefreshPlan {
        match self {
            Mutation::CreateCategory { .. }
            | Mutation::RenameCategory { .. }
            | Mutation::DeleteCategory { .. }
            | Mutation::CreateFile { .. }
            | Mutation::DeleteFile { .. } => RefreshPlan::Hierarchy,
            Mutation::CreateText { .. }
            | Mutation::UpdateText { .. }
            | Mutation::DeleteTexts { .. } => RefreshPlan::FileTexts,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Mutation::CreateCategory { .. } => "Category created",
            Mutation::RenameCategory { .. } => "Category updated",
            Mutation::DeleteCategory { .. } => "Category deleted",
            Mutation::CreateFile { .. } => "File created",
            Mutation::DeleteFile { .. } => "File deleted",
            Mutation::CreateText { .. } => "Entry created",
            Mutation::UpdateText { .. } => "Entry updated",
            Mutation::DeleteTexts { .. } => "Entry deleted",
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Client-side validation, run before any request is issued. A failure here
/// touches neither network nor cache state.
pub fn validate(mutation: &Mutation) -> Result<(), AppError> {
    match mutation {
        Mutation::CreateCategory { name } | Mutation::RenameCategory { name, .. } => {
            require("category name", name)
        }
        Mutation::CreateFile { name, .. } => require("file name", name),
        Mutation::CreateText { draft, .. } | Mutation::UpdateText { draft, .. } => {
            require("question", &draft.question)?;
            require("answer", &draft.answer)?;
            require("author", &draft.text_author)
        }
        Mutation::DeleteTexts { text_ids } => {
            if text_ids.is_empty() {
                Err(AppError::validation("no entries selected"))
            } else {
                Ok(())
            }
        }
        Mutation::DeleteCategory { .. } | Mutation::DeleteFile { .. } => Ok(()),
    }
}

/// Build the confirmation step for a delete target. The message names the
/// entity and states what the cascade removes.
pub fn pending_delete_for(target: &DeleteTarget, hierarchy: &HierarchyCache) -> PendingDelete {
    match target {
        DeleteTarget::Category { category_id } => {
            let name = hierarchy
                .category_name(*category_id)
                .unwrap_or("this category");
            PendingDelete {
                title: "Delete Category".into(),
                message: format!("This will delete \"{name}\" and all its files."),
                mutation: Mutation::DeleteCategory {
                    category_id: *category_id,
                },
            }
        }
        DeleteTarget::File { file_id } => {
            let name = hierarchy.file_name(*file_id).unwrap_or("this file");
            PendingDelete {
                title: "Delete File".into(),
                message: format!("This will delete \"{name}\" and all its Q&A entries."),
                mutation: Mutation::DeleteFile { file_id: *file_id },
            }
        }
        DeleteTarget::Text { text_id } => {
            let short: String = text_id.chars().take(8).collect();
            PendingDelete {
                title: "Delete Entry".into(),
                message: format!("Are you sure you want to delete Q&A entry #{short}...?"),
                mutation: Mutation::DeleteTexts {
                    text_ids: vec![text_id.clone()],
                },
            }
        }
    }
}

/// Issue the single endpoint call for a mutation. Validation is assumed to
/// have passed already.
pub async fn execute<A: KnowledgeBaseApi>(api: &A, mutation: &Mutation) -> Result<(), AppError> {
    match mutation {
        Mutation::CreateCategory { name } => api.create_category(name.trim()).await,
        Mutation::RenameCategory { category_id, name } => {
            api.rename_category(*category_id, name.trim()).await
        }
        Mutation::DeleteCategory { category_id } => api.delete_category(*category_id).await,
        Mutation::CreateFile { category_id, name } => {
            api.create_file(name.trim(), *category_id).await
        }
        Mutation::DeleteFile { file_id } => api.delete_file(*file_id).await,
        Mutation::CreateText { file_id, draft } => api.create_text(*file_id, draft).await,
        Mutation::UpdateText { text_id, draft } => api.update_text(text_id, draft).await,
        Mutation::DeleteTexts { text_ids } => api.delete_texts(text_ids).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{CategoriesPayload, CategoryRow};

    fn draft(question: &str, answer: &str, author: &str) -> TextDraft {
        TextDraft {
            question: question.into(),
            answer: answer.into(),
            text_author: author.into(),
        }
    }

    #[test]
    fn empty_answer_fails_validation() {
        let m = Mutation::CreateText {
            file_id: 9,
            draft: draft("why?", "  ", "maria"),
        };
        let err = validate(&m).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("answer"));
    }

    #[test]
    fn empty_rename_fails_validation() {
        let m = Mutation::RenameCategory {
            category_id: 1,
            name: "".into(),
        };
        assert!(validate(&m).is_err());
    }

    #[test]
    fn complete_draft_passes_validation() {
        let m = Mutation::UpdateText {
            text_id: "t1".into(),
            draft: draft("q", "a", "author"),
        };
        assert!(validate(&m).is_ok());
    }

    #[test]
    fn refresh_plans_split_by_entity() {
        assert_eq!(
            Mutation::DeleteCategory { category_id: 1 }.refresh_plan(),
            RefreshPlan::Hierarchy
        );
        assert_eq!(
            Mutation::DeleteTexts {
                text_ids: vec!["a".into()]
            }
            .refresh_plan(),
            RefreshPlan::FileTexts
        );
    }

    #[test]
    fn delete_confirmation_states_cascade() {
        let mut hierarchy = HierarchyCache::new();
        hierarchy.replace_all(CategoriesPayload::Flat(vec![CategoryRow {
            category_id: 1,
            category_name: "Billing".into(),
            file_id: Some(9),
            file_name: Some("Refunds".into()),
        }]));

        let pending =
            pending_delete_for(&DeleteTarget::Category { category_id: 1 }, &hierarchy);
        assert_eq!(pending.title, "Delete Category");
        assert!(pending.message.contains("Billing"));
        assert!(pending.message.contains("all its files"));

        let pending = pending_delete_for(&DeleteTarget::File { file_id: 9 }, &hierarchy);
        assert!(pending.message.contains("Refunds"));
        assert!(pending.message.contains("Q&A entries"));

        let pending = pending_delete_for(
            &DeleteTarget::Text {
                text_id: "abcdefgh1234".into(),
            },
            &hierarchy,
        );
        assert!(pending.message.contains("#abcdefgh..."));
    }
}
