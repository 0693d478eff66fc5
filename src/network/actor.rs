//! Network actor - runs API calls in the Tokio async runtime

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::api::ExhibitApi;
use crate::error::ApiError;
use crate::messages::{ApiCall, ApiOutcome, NetworkCommand, NetworkResponse};

/// Network actor that executes API calls.
///
/// Calls are independent: nothing is cancelled or deduplicated here. The
/// App layer drops replies it no longer cares about.
pub struct NetworkActor {
    api: Arc<ExhibitApi>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(api: ExhibitApi, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            api: Arc::new(api),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { id, call }) => {
                            let api = Arc::clone(&self.api);
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, call = call.name(), "Executing call");
                                let response = execute(&api, id, call).await;
                                tracing::info!(id, ok = matches!(response, NetworkResponse::Completed { .. }), "Call completed");
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Run one call and package the outcome with its timing
pub async fn execute(api: &ExhibitApi, id: u64, call: ApiCall) -> NetworkResponse {
    let start = Instant::now();
    let result = dispatch(api, call).await;
    let time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(outcome) => NetworkResponse::Completed { id, outcome, time_ms },
        Err(e) => NetworkResponse::Failed {
            id,
            message: e.to_string(),
            status: e.status(),
            time_ms,
        },
    }
}

async fn dispatch(api: &ExhibitApi, call: ApiCall) -> Result<ApiOutcome, ApiError> {
    let outcome = match call {
        ApiCall::Login(credentials) => ApiOutcome::Session(api.login(&credentials).await?),
        ApiCall::Register(credentials) => ApiOutcome::Session(api.register(&credentials).await?),
        ApiCall::ListPosts { page, limit } => ApiOutcome::Posts(api.list_posts(page, limit).await?),
        ApiCall::ListMyPosts { page, limit } => {
            ApiOutcome::Posts(api.list_my_posts(page, limit).await?)
        }
        ApiCall::GetPost(id) => ApiOutcome::Post(api.get_post(id).await?),
        ApiCall::CreatePost(post) => ApiOutcome::Post(api.create_post(&post).await?),
        ApiCall::UpdatePost { id, changes } => ApiOutcome::Post(api.update_post(id, &changes).await?),
        ApiCall::DeletePost(id) => {
            api.delete_post(id).await?;
            ApiOutcome::Deleted
        }
        ApiCall::GetComments(post_id) => ApiOutcome::Comments(api.get_comments(post_id).await?),
        ApiCall::AddComment { post_id, text } => {
            ApiOutcome::Comment(api.add_comment(post_id, &text).await?)
        }
        ApiCall::UpdateComment { post_id, comment_id, content } => {
            ApiOutcome::Comment(api.update_comment(post_id, comment_id, &content).await?)
        }
        ApiCall::DeleteComment { post_id, comment_id } => {
            api.delete_comment(post_id, comment_id).await?;
            ApiOutcome::Deleted
        }
    };
    Ok(outcome)
}
