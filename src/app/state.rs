//! App state - pure data structure with no I/O logic

use crate::auth::AuthStore;
use crate::config::Config;
use crate::features::{nav, LoginForm, PostDetail, PostForm, PostList, RegisterForm, RequestIds, TextField};
use crate::messages::ui_events::{InputMode, View};
use crate::messages::RenderState;

/// Main application state - pure data, no I/O
pub struct AppState {
    // Navigation
    pub view: View,
    /// Where Back leads from the detail view or a form
    pub return_view: View,
    pub input_mode: InputMode,

    // Global auth slice
    pub auth: AuthStore,

    // Views
    pub posts: PostList,
    pub detail: PostDetail,
    pub post_form: Option<PostForm>,
    pub login: LoginForm,
    pub register: RegisterForm,

    // Popups and notices
    pub show_help: bool,
    pub status: Option<String>,

    pub api_url: String,
    pub(crate) ids: RequestIds,
    /// Saves still in flight from a form that was closed
    pub(crate) detached_saves: Vec<u64>,
}

impl AppState {
    pub fn new(config: &Config, auth: AuthStore) -> Self {
        AppState {
            view: View::Posts,
            return_view: View::Posts,
            input_mode: InputMode::Normal,
            auth,
            posts: PostList::new(config.page_size),
            detail: PostDetail::default(),
            post_form: None,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            show_help: false,
            status: None,
            api_url: config.api_url.clone(),
            ids: RequestIds::default(),
            detached_saves: Vec::new(),
        }
    }

    /// Text field receiving keystrokes in the current view
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.view {
            View::Login => Some(self.login.focused_field_mut()),
            View::Register => Some(self.register.focused_field_mut()),
            View::PostForm => self.post_form.as_mut().map(|f| f.focused_field_mut()),
            View::Detail => {
                let comments = &mut self.detail.comments;
                match comments.editing.as_mut() {
                    Some(edit) => Some(&mut edit.field),
                    None => Some(&mut comments.draft),
                }
            }
            View::Posts => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let auth = self.auth.state();
        RenderState {
            view: self.view,
            input_mode: self.input_mode,
            show_help: self.show_help,
            status: self.status.clone(),
            api_url: self.api_url.clone(),
            menu: nav::menu(auth.user.as_ref()),
            user: auth.user.clone(),
            auth_loading: auth.loading,
            auth_error: auth.error.clone(),
            posts: self.posts.clone(),
            detail: self.detail.clone(),
            post_form: self.post_form.clone(),
            login: self.login.clone(),
            register: self.register.clone(),
        }
    }
}
