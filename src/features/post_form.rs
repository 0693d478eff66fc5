//! Create/edit form for a post

use std::path::PathBuf;

use crate::features::{Phase, RequestIds, TextField};
use crate::messages::{ApiCall, ApiOutcome, CallError, NetworkCommand};
use crate::models::{NewPost, Post, PostChanges};

pub const SAVE_FAILED: &str = "Failed to save post. Please try again.";

#[derive(Clone, Debug, PartialEq)]
pub enum PostFormMode {
    Create,
    Edit(Post),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PostFormField {
    #[default]
    Description,
    Image,
}

/// Result of applying a reply to the form
#[derive(Clone, Debug, PartialEq)]
pub enum FormOutcome {
    /// Saved; the caller should close the form and refresh its list
    Saved(Post),
    /// Failed; the form stays open with the draft intact
    Failed,
}

#[derive(Clone, Debug)]
pub struct PostForm {
    pub mode: PostFormMode,
    pub description: TextField,
    /// Path of the image to upload (create mode only)
    pub image_path: TextField,
    pub focus: PostFormField,
    pub error: Option<String>,
    pending: Option<u64>,
}

impl PostForm {
    pub fn create() -> Self {
        PostForm {
            mode: PostFormMode::Create,
            description: TextField::default(),
            image_path: TextField::default(),
            focus: PostFormField::Description,
            error: None,
            pending: None,
        }
    }

    /// Edit form pre-filled with the post's description
    pub fn edit(post: Post) -> Self {
        PostForm {
            description: TextField::with_value(post.description.clone()),
            mode: PostFormMode::Edit(post),
            ..PostForm::create()
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, PostFormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Post"
        } else {
            "Create New Post"
        }
    }

    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    pub fn owns(&self, id: u64) -> bool {
        self.pending == Some(id)
    }

    /// Id of the save still in flight
    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    /// The selected image, if any
    pub fn image(&self) -> Option<PathBuf> {
        let path = self.image_path.value().trim();
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }

    /// Field currently receiving keystrokes
    pub fn focused_field_mut(&mut self) -> &mut TextField {
        match self.focus {
            PostFormField::Image if !self.is_edit() => &mut self.image_path,
            _ => &mut self.description,
        }
    }

    /// Move focus; edit mode has no image field
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            PostFormField::Description if !self.is_edit() => PostFormField::Image,
            _ => PostFormField::Description,
        };
    }

    pub fn can_submit(&self) -> bool {
        if self.pending.is_some() || self.description.is_blank() {
            return false;
        }
        match self.mode {
            PostFormMode::Create => self.image().is_some(),
            PostFormMode::Edit(_) => true,
        }
    }

    pub fn submit(&mut self, ids: &mut RequestIds) -> Option<NetworkCommand> {
        if !self.can_submit() {
            return None;
        }

        let description = self.description.value().to_string();
        let call = match &self.mode {
            PostFormMode::Create => ApiCall::CreatePost(NewPost {
                description,
                image: self.image()?,
            }),
            PostFormMode::Edit(post) => ApiCall::UpdatePost {
                id: post.id,
                changes: PostChanges {
                    description: Some(description),
                },
            },
        };

        let id = ids.next();
        self.pending = Some(id);
        self.error = None;
        Some(NetworkCommand::execute(id, call))
    }

    pub fn apply(&mut self, id: u64, result: Result<ApiOutcome, CallError>) -> Option<FormOutcome> {
        if self.pending != Some(id) {
            return None;
        }
        self.pending = None;

        match result {
            Ok(ApiOutcome::Post(post)) => Some(FormOutcome::Saved(post)),
            Ok(other) => {
                tracing::warn!(id, ?other, "Unexpected reply to post save");
                self.error = Some(SAVE_FAILED.to_string());
                Some(FormOutcome::Failed)
            }
            Err(e) => {
                tracing::debug!(id, error = %e.message, "Post save failed");
                self.error = Some(SAVE_FAILED.to_string());
                Some(FormOutcome::Failed)
            }
        }
    }
}
