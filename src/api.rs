//! Data-access layer: one async method per remote operation.
//!
//! Every method logs its failure once and hands the error back unchanged.
//! Nothing is cached; listings always hit the server.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::json;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    AuthBody, Comment, Credentials, NewPost, Post, PostChanges, PostPage, PostPageBody, Session,
};
use crate::network::client::{create_client, read_empty, read_json, HttpClient};
use crate::network::endpoints::Endpoint;
use crate::storage::SessionStore;

/// Typed access to the Exhibit API
#[derive(Clone, Debug)]
pub struct ExhibitApi {
    public: HttpClient,
    authed: HttpClient,
}

impl ExhibitApi {
    pub fn new(public: HttpClient, authed: HttpClient) -> Self {
        ExhibitApi { public, authed }
    }

    /// Build both clients from configuration, sharing one connection pool
    pub fn from_config(config: &Config, sessions: SessionStore) -> Self {
        let http = create_client(config.timeout_secs);
        ExhibitApi {
            public: HttpClient::anonymous(http.clone(), config.api_url.clone()),
            authed: HttpClient::authenticated(http, config.api_url.clone(), sessions),
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let result = async {
            let response = self
                .public
                .request(Method::POST, Endpoint::Login)
                .json(credentials)
                .send()
                .await?;
            read_json::<AuthBody>(response).await.map(Session::from)
        }
        .await;
        logged("login", result)
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<Session> {
        let result = async {
            let response = self
                .public
                .request(Method::POST, Endpoint::Register)
                .json(credentials)
                .send()
                .await?;
            read_json::<AuthBody>(response).await.map(Session::from)
        }
        .await;
        logged("register", result)
    }

    /// All posts, one page at a time
    pub async fn list_posts(&self, page: u32, limit: u32) -> Result<PostPage> {
        let result = async {
            let response = self
                .public
                .request(Method::GET, Endpoint::ListPosts { page, limit })
                .send()
                .await?;
            read_json::<PostPageBody>(response).await.map(PostPage::from)
        }
        .await;
        logged("list_posts", result)
    }

    /// Posts authored by the logged-in user
    pub async fn list_my_posts(&self, page: u32, limit: u32) -> Result<PostPage> {
        let result = async {
            let response = self
                .authed
                .request(Method::GET, Endpoint::ListMyPosts { page, limit })
                .send()
                .await?;
            read_json::<PostPageBody>(response).await.map(PostPage::from)
        }
        .await;
        logged("list_my_posts", result)
    }

    pub async fn get_post(&self, id: i64) -> Result<Post> {
        let result = async {
            let response = self.public.request(Method::GET, Endpoint::Post(id)).send().await?;
            read_json(response).await
        }
        .await;
        logged("get_post", result)
    }

    /// Upload a new post as `multipart/form-data` (description + image)
    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let result = async {
            let form = multipart_form(post).await?;
            let response = self
                .authed
                .request(Method::POST, Endpoint::CreatePost)
                .multipart(form)
                .send()
                .await?;
            read_json(response).await
        }
        .await;
        logged("create_post", result)
    }

    pub async fn update_post(&self, id: i64, changes: &PostChanges) -> Result<Post> {
        let result = async {
            let response = self
                .authed
                .request(Method::PUT, Endpoint::Post(id))
                .json(changes)
                .send()
                .await?;
            read_json(response).await
        }
        .await;
        logged("update_post", result)
    }

    pub async fn delete_post(&self, id: i64) -> Result<()> {
        let result = async {
            let response = self.authed.request(Method::DELETE, Endpoint::Post(id)).send().await?;
            read_empty(response).await
        }
        .await;
        logged("delete_post", result)
    }

    pub async fn get_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        tracing::debug!(post_id, "Fetching comments");
        let result = async {
            let response = self
                .public
                .request(Method::GET, Endpoint::Comments(post_id))
                .send()
                .await?;
            read_json(response).await
        }
        .await;
        logged("get_comments", result)
    }

    pub async fn add_comment(&self, post_id: i64, text: &str) -> Result<Comment> {
        tracing::debug!(post_id, "Adding comment");
        let result = async {
            let response = self
                .authed
                .request(Method::POST, Endpoint::Comments(post_id))
                .json(&json!({ "text": text }))
                .send()
                .await?;
            read_json(response).await
        }
        .await;
        logged("add_comment", result)
    }

    pub async fn update_comment(&self, post_id: i64, comment_id: i64, content: &str) -> Result<Comment> {
        let result = async {
            let response = self
                .authed
                .request(Method::PUT, Endpoint::Comment { post_id, comment_id })
                .json(&json!({ "content": content }))
                .send()
                .await?;
            read_json(response).await
        }
        .await;
        logged("update_comment", result)
    }

    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<()> {
        let result = async {
            let response = self
                .authed
                .request(Method::DELETE, Endpoint::Comment { post_id, comment_id })
                .send()
                .await?;
            read_empty(response).await
        }
        .await;
        logged("delete_comment", result)
    }
}

/// Log a failed operation once, then pass the result through untouched
fn logged<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        tracing::error!(operation, error = %e, status = ?e.status(), "API call failed");
    }
    result
}

async fn multipart_form(post: &NewPost) -> Result<Form> {
    let bytes = tokio::fs::read(&post.image)
        .await
        .map_err(|source| ApiError::Image {
            path: post.image.clone(),
            source,
        })?;

    let file_name = post
        .image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    let image = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(image_mime(&post.image))?;

    Ok(Form::new()
        .text("description", post.description.clone())
        .part("image", image))
}

/// MIME type guessed from the file extension
pub fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
