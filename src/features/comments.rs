//! Comment section of a single post.
//!
//! Fetch and add always reconcile with the server: adding a comment
//! re-fetches the whole list instead of inserting locally. Delete and edit
//! are applied to the local list as soon as the call is issued and are
//! rolled back if that call fails. Switching to another post forgets every
//! pending call, so late replies for the old post are ignored.

use crate::features::{Phase, RequestIds, TextField};
use crate::messages::{ApiCall, ApiOutcome, CallError, NetworkCommand};
use crate::models::Comment;

pub const LOAD_FAILED: &str = "Failed to load comments";
pub const ADD_FAILED: &str = "Failed to add comment";
pub const DELETE_FAILED: &str = "Failed to delete comment";
pub const UPDATE_FAILED: &str = "Failed to update comment";

/// Comment being rewritten in place
#[derive(Clone, Debug, PartialEq)]
pub struct CommentEdit {
    pub comment_id: i64,
    pub field: TextField,
}

/// What to undo if a local mutation is refused by the server
#[derive(Clone, Debug, PartialEq)]
enum Rollback {
    /// `order` is the list's id order just before the comment was removed
    Delete { order: Vec<i64>, comment: Comment },
    Edit { comment_id: i64, previous: String },
}

#[derive(Clone, Debug, Default)]
pub struct CommentSection {
    post_id: Option<i64>,
    pub comments: Vec<Comment>,
    pub draft: TextField,
    pub error: Option<String>,
    pub selected: usize,
    pub editing: Option<CommentEdit>,
    fetch_id: Option<u64>,
    add_id: Option<u64>,
    mutations: Vec<(u64, Rollback)>,
}

impl CommentSection {
    pub fn post_id(&self) -> Option<i64> {
        self.post_id
    }

    pub fn phase(&self) -> Phase {
        if self.fetch_id.is_some() || self.add_id.is_some() {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    /// Whether `id` belongs to a call this section is waiting for
    pub fn owns(&self, id: u64) -> bool {
        self.fetch_id == Some(id)
            || self.add_id == Some(id)
            || self.mutations.iter().any(|(m, _)| *m == id)
    }

    /// Show the comments of `post_id`, fetching them.
    ///
    /// A different post starts from a clean slate; the same post keeps its
    /// list until the fresh one arrives.
    pub fn mount(&mut self, post_id: i64, ids: &mut RequestIds) -> NetworkCommand {
        if self.post_id != Some(post_id) {
            *self = CommentSection {
                post_id: Some(post_id),
                ..CommentSection::default()
            };
        }
        self.fetch(post_id, ids)
    }

    /// Drop the post and every pending call
    pub fn unmount(&mut self) {
        *self = CommentSection::default();
    }

    pub fn refresh(&mut self, ids: &mut RequestIds) -> Option<NetworkCommand> {
        let post_id = self.post_id?;
        Some(self.fetch(post_id, ids))
    }

    fn fetch(&mut self, post_id: i64, ids: &mut RequestIds) -> NetworkCommand {
        let id = ids.next();
        self.fetch_id = Some(id);
        NetworkCommand::execute(id, ApiCall::GetComments(post_id))
    }

    pub fn can_submit(&self) -> bool {
        self.post_id.is_some() && self.add_id.is_none() && !self.draft.is_blank()
    }

    /// Post the draft as a new comment
    pub fn submit(&mut self, ids: &mut RequestIds) -> Option<NetworkCommand> {
        if !self.can_submit() {
            return None;
        }
        let post_id = self.post_id?;
        let id = ids.next();
        self.add_id = Some(id);
        self.error = None;
        Some(NetworkCommand::execute(
            id,
            ApiCall::AddComment {
                post_id,
                text: self.draft.value().to_string(),
            },
        ))
    }

    pub fn selected_comment(&self) -> Option<&Comment> {
        self.comments.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.comments.is_empty() {
            self.selected = (self.selected + 1) % self.comments.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.comments.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.comments.len() - 1);
        }
    }

    pub fn delete_selected(&mut self, ids: &mut RequestIds) -> Option<NetworkCommand> {
        let comment_id = self.selected_comment()?.id;
        self.delete(comment_id, ids)
    }

    /// Remove a comment locally and ask the server to delete it
    pub fn delete(&mut self, comment_id: i64, ids: &mut RequestIds) -> Option<NetworkCommand> {
        let post_id = self.post_id?;
        let index = self.comments.iter().position(|c| c.id == comment_id)?;
        let order = self.comments.iter().map(|c| c.id).collect();
        let comment = self.comments.remove(index);

        if self.editing.as_ref().map(|e| e.comment_id) == Some(comment_id) {
            self.editing = None;
        }
        self.clamp_selection();

        let id = ids.next();
        self.mutations.push((id, Rollback::Delete { order, comment }));
        Some(NetworkCommand::execute(
            id,
            ApiCall::DeleteComment { post_id, comment_id },
        ))
    }

    /// Open the selected comment for editing
    pub fn begin_edit(&mut self) -> bool {
        match self.selected_comment() {
            Some(comment) => {
                self.editing = Some(CommentEdit {
                    comment_id: comment.id,
                    field: TextField::with_value(comment.content.clone()),
                });
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn save_edit(&mut self, ids: &mut RequestIds) -> Option<NetworkCommand> {
        let edit = self.editing.as_ref()?;
        if edit.field.is_blank() {
            return None;
        }
        let (comment_id, content) = (edit.comment_id, edit.field.value().to_string());
        self.editing = None;
        self.edit(comment_id, content, ids)
    }

    /// Rewrite a comment's text locally and on the server
    pub fn edit(
        &mut self,
        comment_id: i64,
        content: String,
        ids: &mut RequestIds,
    ) -> Option<NetworkCommand> {
        let post_id = self.post_id?;
        let comment = self.comments.iter_mut().find(|c| c.id == comment_id)?;
        let previous = std::mem::replace(&mut comment.content, content.clone());

        let id = ids.next();
        self.mutations.push((id, Rollback::Edit { comment_id, previous }));
        Some(NetworkCommand::execute(
            id,
            ApiCall::UpdateComment {
                post_id,
                comment_id,
                content,
            },
        ))
    }

    /// Apply the reply to call `id`. May return a follow-up call.
    pub fn apply(
        &mut self,
        id: u64,
        result: Result<ApiOutcome, CallError>,
        ids: &mut RequestIds,
    ) -> Option<NetworkCommand> {
        if self.fetch_id == Some(id) {
            self.fetch_id = None;
            match result {
                Ok(ApiOutcome::Comments(comments)) => {
                    self.comments = comments;
                    self.clamp_selection();
                }
                Ok(other) => {
                    tracing::warn!(id, ?other, "Unexpected reply to comment fetch");
                    self.error = Some(LOAD_FAILED.to_string());
                }
                Err(e) => {
                    tracing::debug!(id, error = %e.message, "Comment fetch failed");
                    self.error = Some(LOAD_FAILED.to_string());
                }
            }
            return None;
        }

        if self.add_id == Some(id) {
            self.add_id = None;
            return match result {
                Ok(_) => {
                    self.draft.clear();
                    self.refresh(ids)
                }
                Err(_) => {
                    self.error = Some(ADD_FAILED.to_string());
                    None
                }
            };
        }

        if let Some(pos) = self.mutations.iter().position(|(m, _)| *m == id) {
            let (_, rollback) = self.mutations.remove(pos);
            if result.is_err() {
                self.roll_back(rollback);
            }
        }
        None
    }

    fn roll_back(&mut self, rollback: Rollback) {
        match rollback {
            Rollback::Delete { order, comment } => {
                if !self.comments.iter().any(|c| c.id == comment.id) {
                    let index = self.restore_index(&order, comment.id);
                    self.comments.insert(index, comment);
                }
                self.error = Some(DELETE_FAILED.to_string());
            }
            Rollback::Edit { comment_id, previous } => {
                if let Some(comment) = self.comments.iter_mut().find(|c| c.id == comment_id) {
                    comment.content = previous;
                }
                self.error = Some(UPDATE_FAILED.to_string());
            }
        }
    }

    /// Where `comment_id` sat relative to the comments still present.
    ///
    /// Anchors on the nearest surviving successor from `order`, then the
    /// nearest surviving predecessor, so rollbacks landing in any order
    /// rebuild the original sequence.
    fn restore_index(&self, order: &[i64], comment_id: i64) -> usize {
        let Some(at) = order.iter().position(|&id| id == comment_id) else {
            return self.comments.len();
        };
        let position_of = |id: i64| self.comments.iter().position(|c| c.id == id);

        if let Some(index) = order[at + 1..].iter().find_map(|&id| position_of(id)) {
            return index;
        }
        order[..at]
            .iter()
            .rev()
            .find_map(|&id| position_of(id))
            .map_or(0, |index| index + 1)
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.comments.len() {
            self.selected = self.comments.len().saturating_sub(1);
        }
    }
}
