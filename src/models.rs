use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An authenticated user as returned by the API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Bearer token plus the identity it belongs to
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// An exhibit post
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "imageUrl", alias = "image")]
    pub image_url: Option<String>,
    #[serde(default, alias = "authorId", alias = "userId", alias = "user_id")]
    pub author_id: Option<i64>,
    #[serde(default, alias = "user")]
    pub author: Option<User>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Id of the author, from either the flat field or the embedded user
    pub fn author_ref(&self) -> Option<i64> {
        self.author_id.or_else(|| self.author.as_ref().map(|a| a.id))
    }

    /// Whether `user` may edit or delete this post.
    ///
    /// Posts without author information are treated as editable; the
    /// server rejects the call if they are not.
    pub fn is_owned_by(&self, user: &User) -> bool {
        match self.author_ref() {
            Some(author) => author == user.id,
            None => true,
        }
    }

    /// Name to show next to the post
    pub fn author_label(&self) -> String {
        match (&self.author, self.author_id) {
            (Some(author), _) => author.username.clone(),
            (None, Some(id)) => format!("user #{}", id),
            (None, None) => String::from("unknown"),
        }
    }
}

/// A comment, always scoped to one post
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default, alias = "postId", alias = "exhibitId", alias = "exhibit_id")]
    pub post_id: Option<i64>,
    #[serde(default, alias = "text")]
    pub content: String,
    #[serde(default, alias = "authorId", alias = "userId", alias = "user_id")]
    pub author_id: Option<i64>,
    #[serde(default, alias = "user")]
    pub author: Option<User>,
}

impl Comment {
    pub fn author_label(&self) -> String {
        match (&self.author, self.author_id) {
            (Some(author), _) => author.username.clone(),
            (None, Some(id)) => format!("user #{}", id),
            (None, None) => String::from("anonymous"),
        }
    }
}

/// One page of posts
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: usize,
}

/// Listing body as sent by the API: `{ data: Post[], total?: int }`
#[derive(Debug, Deserialize)]
pub struct PostPageBody {
    #[serde(default)]
    pub data: Option<Vec<Post>>,
    #[serde(default)]
    pub total: Option<usize>,
}

impl From<PostPageBody> for PostPage {
    fn from(body: PostPageBody) -> Self {
        let posts = body.data.unwrap_or_default();
        // A missing or zero count falls back to what was actually returned
        let total = body.total.filter(|t| *t > 0).unwrap_or(posts.len());
        PostPage { posts, total }
    }
}

/// Payload for creating a post: a description and exactly one image file
#[derive(Clone, Debug, PartialEq)]
pub struct NewPost {
    pub description: String,
    pub image: PathBuf,
}

/// Partial update of a post; only present fields are sent
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PostChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Username/password pair for login and registration
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body returned by the login and register endpoints
#[derive(Debug, Deserialize)]
pub struct AuthBody {
    #[serde(alias = "access_token", alias = "accessToken")]
    pub token: String,
    pub user: User,
}

impl From<AuthBody> for Session {
    fn from(body: AuthBody) -> Self {
        Session {
            token: body.token,
            user: body.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: i64) -> User {
        User {
            id,
            username: format!("user{}", id),
        }
    }

    #[test]
    fn test_page_total_from_body() {
        let body: PostPageBody = serde_json::from_value(json!({
            "data": [{"id": 1, "description": "a"}, {"id": 2, "description": "b"}],
            "total": 2
        }))
        .unwrap();
        let page = PostPage::from(body);
        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_page_total_falls_back_to_len() {
        let body: PostPageBody =
            serde_json::from_value(json!({"data": [{"id": 1, "description": "a"}]})).unwrap();
        assert_eq!(PostPage::from(body).total, 1);

        let body: PostPageBody = serde_json::from_value(json!({
            "data": [{"id": 1}, {"id": 2}, {"id": 3}],
            "total": 0
        }))
        .unwrap();
        assert_eq!(PostPage::from(body).total, 3);
    }

    #[test]
    fn test_page_without_data_is_empty() {
        let body: PostPageBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(PostPage::from(body), PostPage::default());
    }

    #[test]
    fn test_post_accepts_camel_case() {
        let post: Post = serde_json::from_value(json!({
            "id": 7,
            "description": "sunset",
            "imageUrl": "/uploads/7.png",
            "userId": 3,
            "createdAt": "2024-05-01T10:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(post.image_url.as_deref(), Some("/uploads/7.png"));
        assert_eq!(post.author_id, Some(3));
        assert!(post.created_at.is_some());
    }

    #[test]
    fn test_post_ownership() {
        let mut post: Post = serde_json::from_value(json!({"id": 1, "description": "x"})).unwrap();
        assert!(post.is_owned_by(&user(1)));

        post.author = Some(user(2));
        assert!(post.is_owned_by(&user(2)));
        assert!(!post.is_owned_by(&user(1)));

        post.author_id = Some(1);
        assert!(post.is_owned_by(&user(1)));
    }

    #[test]
    fn test_comment_text_alias() {
        let comment: Comment =
            serde_json::from_value(json!({"id": 4, "postId": 5, "text": "nice"})).unwrap();
        assert_eq!(comment.content, "nice");
        assert_eq!(comment.post_id, Some(5));
    }

    #[test]
    fn test_changes_skip_absent_fields() {
        let empty = serde_json::to_value(PostChanges::default()).unwrap();
        assert_eq!(empty, json!({}));

        let changes = PostChanges {
            description: Some("new".into()),
        };
        assert_eq!(serde_json::to_value(changes).unwrap(), json!({"description": "new"}));
    }

    #[test]
    fn test_auth_body_access_token_alias() {
        let body: AuthBody = serde_json::from_value(json!({
            "access_token": "abc",
            "user": {"id": 1, "username": "ana"}
        }))
        .unwrap();
        let session = Session::from(body);
        assert_eq!(session.token, "abc");
        assert_eq!(session.user.username, "ana");
    }
}
