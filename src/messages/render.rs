//! Render state - data structure sent from App layer to UI for rendering

use crate::constants::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
use crate::features::{LoginForm, MenuItem, PostDetail, PostForm, PostList, RegisterForm};
use crate::messages::ui_events::{InputMode, View};
use crate::models::User;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub view: View,
    pub input_mode: InputMode,
    pub show_help: bool,
    /// One-line notice for the status bar
    pub status: Option<String>,
    pub api_url: String,

    // Control bar
    pub menu: Vec<MenuItem>,
    pub user: Option<User>,
    pub auth_loading: bool,
    pub auth_error: Option<String>,

    // Views
    pub posts: PostList,
    pub detail: PostDetail,
    pub post_form: Option<PostForm>,
    pub login: LoginForm,
    pub register: RegisterForm,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            view: View::Posts,
            input_mode: InputMode::Normal,
            show_help: false,
            status: None,
            api_url: String::from(DEFAULT_API_URL),
            menu: crate::features::nav::menu(None),
            user: None,
            auth_loading: false,
            auth_error: None,
            posts: PostList::new(DEFAULT_PAGE_SIZE),
            detail: PostDetail::default(),
            post_form: None,
            login: LoginForm::default(),
            register: RegisterForm::default(),
        }
    }
}
