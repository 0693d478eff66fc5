//! One post with its comment section

use crate::features::{CommentSection, Phase, RequestIds};
use crate::messages::{ApiCall, ApiOutcome, CallError, NetworkCommand};
use crate::models::Post;

pub const NOT_FOUND: &str = "Post not found";
pub const LOAD_FAILED: &str = "Failed to load post";

#[derive(Clone, Debug, Default)]
pub struct PostDetail {
    pub post: Option<Post>,
    pub error: Option<String>,
    pub comments: CommentSection,
    fetch_id: Option<u64>,
}

impl PostDetail {
    /// Open `post_id`, showing `preview` until the fresh copy arrives
    pub fn open(
        &mut self,
        post_id: i64,
        preview: Option<Post>,
        ids: &mut RequestIds,
    ) -> Vec<NetworkCommand> {
        self.post = preview.filter(|p| p.id == post_id);
        self.error = None;

        let id = ids.next();
        self.fetch_id = Some(id);
        vec![
            NetworkCommand::execute(id, ApiCall::GetPost(post_id)),
            self.comments.mount(post_id, ids),
        ]
    }

    pub fn close(&mut self) {
        *self = PostDetail::default();
    }

    pub fn post_id(&self) -> Option<i64> {
        self.comments.post_id()
    }

    pub fn phase(&self) -> Phase {
        if self.fetch_id.is_some() {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    pub fn owns(&self, id: u64) -> bool {
        self.fetch_id == Some(id) || self.comments.owns(id)
    }

    pub fn apply(
        &mut self,
        id: u64,
        result: Result<ApiOutcome, CallError>,
        ids: &mut RequestIds,
    ) -> Option<NetworkCommand> {
        if self.fetch_id != Some(id) {
            return self.comments.apply(id, result, ids);
        }

        self.fetch_id = None;
        match result {
            Ok(ApiOutcome::Post(post)) => {
                self.post = Some(post);
                self.error = None;
            }
            Ok(other) => {
                tracing::warn!(id, ?other, "Unexpected reply to post fetch");
                self.error = Some(LOAD_FAILED.to_string());
            }
            Err(e) if e.is_not_found() => {
                self.post = None;
                self.error = Some(NOT_FOUND.to_string());
            }
            Err(_) => self.error = Some(LOAD_FAILED.to_string()),
        }
        None
    }

    /// Swap in an edited copy of the open post
    pub fn replace_post(&mut self, post: Post) {
        if self.post_id() == Some(post.id) {
            self.post = Some(post);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64) -> Post {
        Post {
            id,
            description: "desc".into(),
            image_url: None,
            author_id: None,
            author: None,
            created_at: None,
        }
    }

    fn id_of(cmd: &NetworkCommand) -> u64 {
        match cmd {
            NetworkCommand::Execute { id, .. } => *id,
            NetworkCommand::Shutdown => panic!("not an execute command"),
        }
    }

    #[test]
    fn test_open_fetches_post_and_comments() {
        let mut ids = RequestIds::default();
        let mut detail = PostDetail::default();
        let cmds = detail.open(5, Some(post(5)), &mut ids);

        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[0], NetworkCommand::Execute { call: ApiCall::GetPost(5), .. }));
        assert!(matches!(cmds[1], NetworkCommand::Execute { call: ApiCall::GetComments(5), .. }));
        assert_eq!(detail.post.as_ref().map(|p| p.id), Some(5));
        assert_eq!(detail.post_id(), Some(5));
    }

    #[test]
    fn test_preview_for_another_post_is_dropped() {
        let mut ids = RequestIds::default();
        let mut detail = PostDetail::default();
        detail.open(5, Some(post(6)), &mut ids);
        assert!(detail.post.is_none());
    }

    #[test]
    fn test_not_found() {
        let mut ids = RequestIds::default();
        let mut detail = PostDetail::default();
        let cmds = detail.open(99, None, &mut ids);

        detail.apply(
            id_of(&cmds[0]),
            Err(CallError {
                message: "Server returned 404: Not Found".into(),
                status: Some(404),
            }),
            &mut ids,
        );
        assert_eq!(detail.error.as_deref(), Some(NOT_FOUND));
        assert_eq!(detail.phase(), Phase::Idle);
    }

    #[test]
    fn test_any_error_status_reads_as_not_found() {
        let mut ids = RequestIds::default();
        let mut detail = PostDetail::default();
        let cmds = detail.open(5, Some(post(5)), &mut ids);

        detail.apply(
            id_of(&cmds[0]),
            Err(CallError {
                message: "Server returned 500: boom".into(),
                status: Some(500),
            }),
            &mut ids,
        );
        assert!(detail.post.is_none());
        assert_eq!(detail.error.as_deref(), Some(NOT_FOUND));
    }

    #[test]
    fn test_transport_failure_is_load_failed() {
        let mut ids = RequestIds::default();
        let mut detail = PostDetail::default();
        let cmds = detail.open(5, None, &mut ids);

        detail.apply(
            id_of(&cmds[0]),
            Err(CallError {
                message: "Request timed out".into(),
                status: None,
            }),
            &mut ids,
        );
        assert_eq!(detail.error.as_deref(), Some(LOAD_FAILED));
    }

    #[test]
    fn test_comment_replies_are_routed_to_section() {
        let mut ids = RequestIds::default();
        let mut detail = PostDetail::default();
        let cmds = detail.open(5, None, &mut ids);
        assert!(detail.owns(id_of(&cmds[1])));

        detail.apply(id_of(&cmds[1]), Ok(ApiOutcome::Comments(vec![])), &mut ids);
        assert!(!detail.owns(id_of(&cmds[1])));
        assert_eq!(detail.comments.phase(), Phase::Idle);
    }
}
