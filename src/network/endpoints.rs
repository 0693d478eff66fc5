//! Endpoint resolver - maps each logical operation to its URL

/// Every remote operation the client knows about, with its path parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    ListPosts { page: u32, limit: u32 },
    ListMyPosts { page: u32, limit: u32 },
    Post(i64),
    CreatePost,
    Comments(i64),
    Comment { post_id: i64, comment_id: i64 },
}

impl Endpoint {
    /// Path relative to the API base, including the query string
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => String::from("/auth/login"),
            Endpoint::Register => String::from("/auth/register"),
            Endpoint::ListPosts { page, limit } => {
                format!("/exhibits?page={}&limit={}", page, limit)
            }
            Endpoint::ListMyPosts { page, limit } => {
                format!("/my-exhibits?page={}&limit={}", page, limit)
            }
            Endpoint::Post(id) => format!("/exhibits/{}", id),
            Endpoint::CreatePost => String::from("/exhibits"),
            Endpoint::Comments(post_id) => format!("/exhibits/{}/comments", post_id),
            Endpoint::Comment { post_id, comment_id } => {
                format!("/exhibits/{}/comments/{}", post_id, comment_id)
            }
        }
    }

    /// Absolute URL against `base`, joined with exactly one slash
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}
