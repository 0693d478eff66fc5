//! Paged list of posts: everyone's, or only the current user's

use crate::constants::DEFAULT_PAGE;
use crate::features::{Phase, RequestIds};
use crate::messages::{ApiCall, ApiOutcome, CallError, NetworkCommand};
use crate::models::{Post, User};

pub const LOAD_FAILED: &str = "Failed to load posts";
pub const DELETE_FAILED: &str = "Failed to delete post";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Feed {
    #[default]
    All,
    Mine,
}

impl Feed {
    pub fn title(&self) -> &'static str {
        match self {
            Feed::All => "All Posts",
            Feed::Mine => "My Posts",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PostList {
    pub feed: Feed,
    pub page: u32,
    pub limit: u32,
    pub posts: Vec<Post>,
    pub total: usize,
    pub selected: usize,
    pub error: Option<String>,
    fetch_id: Option<u64>,
    /// In-flight deletes: (request id, post id)
    deletes: Vec<(u64, i64)>,
}

impl PostList {
    pub fn new(limit: u32) -> Self {
        PostList {
            feed: Feed::All,
            page: DEFAULT_PAGE,
            limit: limit.max(1),
            posts: Vec::new(),
            total: 0,
            selected: 0,
            error: None,
            fetch_id: None,
            deletes: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.fetch_id.is_some() {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    pub fn owns(&self, id: u64) -> bool {
        self.fetch_id == Some(id) || self.deletes.iter().any(|(r, _)| *r == id)
    }

    /// Switch to `feed`, starting over at the first page when it changes
    pub fn show(&mut self, feed: Feed, ids: &mut RequestIds) -> NetworkCommand {
        if self.feed != feed {
            self.feed = feed;
            self.page = DEFAULT_PAGE;
            self.posts.clear();
            self.total = 0;
            self.selected = 0;
            self.deletes.clear();
        }
        self.refresh(ids)
    }

    /// Re-fetch the current page
    pub fn refresh(&mut self, ids: &mut RequestIds) -> NetworkCommand {
        let id = ids.next();
        self.fetch_id = Some(id);
        let (page, limit) = (self.page, self.limit);
        let call = match self.feed {
            Feed::All => ApiCall::ListPosts { page, limit },
            Feed::Mine => ApiCall::ListMyPosts { page, limit },
        };
        NetworkCommand::execute(id, call)
    }

    pub fn page_count(&self) -> u32 {
        let limit = self.limit.max(1) as usize;
        ((self.total + limit - 1) / limit).max(1) as u32
    }

    pub fn has_next_page(&self) -> bool {
        (self.page as usize) * (self.limit as usize) < self.total
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > DEFAULT_PAGE
    }

    pub fn next_page(&mut self, ids: &mut RequestIds) -> Option<NetworkCommand> {
        if !self.has_next_page() {
            return None;
        }
        self.page += 1;
        self.selected = 0;
        Some(self.refresh(ids))
    }

    pub fn prev_page(&mut self, ids: &mut RequestIds) -> Option<NetworkCommand> {
        if !self.has_prev_page() {
            return None;
        }
        self.page -= 1;
        self.selected = 0;
        Some(self.refresh(ids))
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.posts.is_empty() {
            self.selected = (self.selected + 1) % self.posts.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.posts.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.posts.len() - 1);
        }
    }

    /// Ask the server to delete the selected post, if `user` wrote it
    pub fn delete_selected(&mut self, user: &User, ids: &mut RequestIds) -> Option<NetworkCommand> {
        let post = self.selected_post()?;
        if !post.is_owned_by(user) {
            return None;
        }
        let post_id = post.id;
        let id = ids.next();
        self.deletes.push((id, post_id));
        Some(NetworkCommand::execute(id, ApiCall::DeletePost(post_id)))
    }

    pub fn apply(&mut self, id: u64, result: Result<ApiOutcome, CallError>) {
        if self.fetch_id == Some(id) {
            self.fetch_id = None;
            match result {
                Ok(ApiOutcome::Posts(page)) => {
                    self.posts = page.posts;
                    self.total = page.total;
                    self.error = None;
                    self.clamp_selection();
                }
                Ok(other) => {
                    tracing::warn!(id, ?other, "Unexpected reply to post listing");
                    self.error = Some(LOAD_FAILED.to_string());
                }
                Err(_) => self.error = Some(LOAD_FAILED.to_string()),
            }
            return;
        }

        if let Some(pos) = self.deletes.iter().position(|(r, _)| *r == id) {
            let (_, post_id) = self.deletes.remove(pos);
            match result {
                Ok(_) => {
                    let before = self.posts.len();
                    self.posts.retain(|p| p.id != post_id);
                    if self.posts.len() < before {
                        self.total = self.total.saturating_sub(1);
                    }
                    self.clamp_selection();
                }
                Err(_) => self.error = Some(DELETE_FAILED.to_string()),
            }
        }
    }

    /// Replace a post in place after it was edited
    pub fn replace(&mut self, post: Post) {
        if let Some(existing) = self.posts.iter_mut().find(|p| p.id == post.id) {
            *existing = post;
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.posts.len() {
            self.selected = self.posts.len().saturating_sub(1);
        }
    }
}
