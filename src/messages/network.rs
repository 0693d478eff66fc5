//! Network messages - communication between App and Network layers

use crate::models::{Comment, Credentials, NewPost, Post, PostChanges, PostPage, Session};

/// One remote operation, as requested by the App layer
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Login(Credentials),
    Register(Credentials),
    ListPosts { page: u32, limit: u32 },
    ListMyPosts { page: u32, limit: u32 },
    GetPost(i64),
    CreatePost(NewPost),
    UpdatePost { id: i64, changes: PostChanges },
    DeletePost(i64),
    GetComments(i64),
    AddComment { post_id: i64, text: String },
    UpdateComment { post_id: i64, comment_id: i64, content: String },
    DeleteComment { post_id: i64, comment_id: i64 },
}

impl ApiCall {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ApiCall::Login(_) => "login",
            ApiCall::Register(_) => "register",
            ApiCall::ListPosts { .. } => "list_posts",
            ApiCall::ListMyPosts { .. } => "list_my_posts",
            ApiCall::GetPost(_) => "get_post",
            ApiCall::CreatePost(_) => "create_post",
            ApiCall::UpdatePost { .. } => "update_post",
            ApiCall::DeletePost(_) => "delete_post",
            ApiCall::GetComments(_) => "get_comments",
            ApiCall::AddComment { .. } => "add_comment",
            ApiCall::UpdateComment { .. } => "update_comment",
            ApiCall::DeleteComment { .. } => "delete_comment",
        }
    }
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Run one API call; the reply carries the same id
    Execute { id: u64, call: ApiCall },
    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    pub fn execute(id: u64, call: ApiCall) -> Self {
        NetworkCommand::Execute { id, call }
    }
}

/// Successful result of an [`ApiCall`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    Session(Session),
    Posts(PostPage),
    Post(Post),
    Comments(Vec<Comment>),
    Comment(Comment),
    Deleted,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    Completed {
        id: u64,
        outcome: ApiOutcome,
        time_ms: u64,
    },
    Failed {
        id: u64,
        message: String,
        status: Option<u16>,
        time_ms: u64,
    },
}

/// What a feature sees of a failed call
#[derive(Debug, Clone, PartialEq)]
pub struct CallError {
    pub message: String,
    pub status: Option<u16>,
}

impl CallError {
    /// The server answered with a non-2xx status
    pub fn is_not_found(&self) -> bool {
        self.status.is_some()
    }
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }

    pub fn into_result(self) -> Result<ApiOutcome, CallError> {
        match self {
            NetworkResponse::Completed { outcome, .. } => Ok(outcome),
            NetworkResponse::Failed { message, status, .. } => Err(CallError { message, status }),
        }
    }
}
