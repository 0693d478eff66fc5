//! Feature state machines.
//!
//! Each feature is plain data plus transitions. A transition that needs the
//! network returns a [`NetworkCommand`](crate::messages::NetworkCommand); the reply comes back through the
//! feature's `apply` with the same request id. Nothing here does I/O, so
//! every flow is testable without a server.

pub mod comments;
pub mod login;
pub mod nav;
pub mod post_detail;
pub mod post_form;
pub mod post_list;
pub mod register;
pub mod text_field;

pub use comments::CommentSection;
pub use login::LoginForm;
pub use nav::{MenuAction, MenuItem, NavTarget};
pub use post_detail::PostDetail;
pub use post_form::{PostForm, PostFormMode};
pub use post_list::{Feed, PostList};
pub use register::RegisterForm;
pub use text_field::TextField;

/// Monotonic source of request ids
#[derive(Clone, Debug)]
pub struct RequestIds {
    next: u64,
}

impl Default for RequestIds {
    fn default() -> Self {
        RequestIds { next: 1 }
    }
}

impl RequestIds {
    pub fn next(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Whether a feature has a call in flight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
}
