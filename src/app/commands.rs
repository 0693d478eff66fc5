//! Command handlers - business logic for processing UI events
//!
//! Handlers that need the network return the commands to send; the actor
//! forwards them to the network layer.

use crate::app::AppState;
use crate::auth::AuthAction;
use crate::features::nav::{self, MenuAction, NavTarget};
use crate::features::post_form::{FormOutcome, SAVE_FAILED};
use crate::features::{Feed, PostForm, RegisterForm};
use crate::messages::ui_events::{InputMode, View};
use crate::messages::{ApiOutcome, CallError, NetworkCommand, NetworkResponse};
use crate::models::Post;

pub const LOGIN_REQUIRED: &str = "Log in first";
pub const ALREADY_LOGGED_IN: &str = "Already logged in";
pub const NOT_YOUR_POST: &str = "You can only change your own posts";
const UNEXPECTED_AUTH_REPLY: &str = "Unexpected response from server";

impl AppState {
    /// Commands to send once the actors are running
    pub fn start(&mut self) -> Vec<NetworkCommand> {
        vec![self.posts.show(Feed::All, &mut self.ids)]
    }

    // ========================
    // Navigation
    // ========================

    /// Switch views. Login and Register clear the auth error on the way in
    /// and on the way out.
    fn set_view(&mut self, view: View) {
        if self.view == view {
            return;
        }
        let auth_form = |v: View| matches!(v, View::Login | View::Register);
        if auth_form(self.view) || auth_form(view) {
            self.auth.dispatch(AuthAction::ClearError);
        }
        self.view = view;
        self.input_mode = InputMode::Normal;
    }

    pub fn menu_key(&mut self, key: char) -> Vec<NetworkCommand> {
        match nav::action_for_key(self.auth.user(), key) {
            Some(action) => self.menu_action(action),
            None => {
                self.status = Some(if self.auth.user().is_some() {
                    ALREADY_LOGGED_IN.to_string()
                } else {
                    LOGIN_REQUIRED.to_string()
                });
                Vec::new()
            }
        }
    }

    pub fn menu_action(&mut self, action: MenuAction) -> Vec<NetworkCommand> {
        if !nav::allows(self.auth.user(), action) {
            tracing::debug!(?action, "Menu action not available");
            return Vec::new();
        }
        match action {
            MenuAction::Logout => {
                self.logout();
                Vec::new()
            }
            MenuAction::Go(target) => self.navigate(target),
        }
    }

    fn navigate(&mut self, target: NavTarget) -> Vec<NetworkCommand> {
        match target {
            NavTarget::AllPosts => self.show_feed(Feed::All),
            NavTarget::MyPosts => self.show_feed(Feed::Mine),
            NavTarget::NewPost => {
                self.open_post_form(PostForm::create());
                Vec::new()
            }
            NavTarget::Login => {
                self.set_view(View::Login);
                Vec::new()
            }
            NavTarget::Register => {
                self.set_view(View::Register);
                Vec::new()
            }
        }
    }

    fn show_feed(&mut self, feed: Feed) -> Vec<NetworkCommand> {
        self.detail.close();
        self.close_post_form();
        self.set_view(View::Posts);
        vec![self.posts.show(feed, &mut self.ids)]
    }

    fn open_post_form(&mut self, form: PostForm) {
        if !self.view.is_form() {
            self.return_view = self.view;
        }
        self.close_post_form();
        self.post_form = Some(form);
        self.set_view(View::PostForm);
    }

    /// Drop the form, remembering a save it left in flight
    fn close_post_form(&mut self) {
        if let Some(id) = self.post_form.take().and_then(|form| form.pending()) {
            self.detached_saves.push(id);
        }
    }

    pub fn logout(&mut self) {
        self.auth.dispatch(AuthAction::Logout);
        self.close_post_form();
        self.login.reset();
        self.set_view(View::Login);
        self.status = Some("Logged out".to_string());
    }

    pub fn back(&mut self) {
        match self.view {
            View::Detail => {
                self.detail.close();
                self.set_view(View::Posts);
            }
            View::PostForm => {
                self.close_post_form();
                let view = self.return_view;
                self.set_view(view);
            }
            View::Login | View::Register => self.set_view(View::Posts),
            View::Posts => {}
        }
    }

    // ========================
    // Lists
    // ========================

    pub fn select_next(&mut self) {
        match self.view {
            View::Posts => self.posts.select_next(),
            View::Detail => self.detail.comments.select_next(),
            _ => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.view {
            View::Posts => self.posts.select_prev(),
            View::Detail => self.detail.comments.select_prev(),
            _ => {}
        }
    }

    pub fn next_page(&mut self) -> Vec<NetworkCommand> {
        self.posts.next_page(&mut self.ids).into_iter().collect()
    }

    pub fn prev_page(&mut self) -> Vec<NetworkCommand> {
        self.posts.prev_page(&mut self.ids).into_iter().collect()
    }

    /// Open the selected post in the detail view
    pub fn open_selected(&mut self) -> Vec<NetworkCommand> {
        let post = match self.posts.selected_post() {
            Some(post) => post.clone(),
            None => return Vec::new(),
        };
        self.return_view = View::Posts;
        let commands = self.detail.open(post.id, Some(post), &mut self.ids);
        self.set_view(View::Detail);
        commands
    }

    pub fn refresh(&mut self) -> Vec<NetworkCommand> {
        match self.view {
            View::Posts => vec![self.posts.refresh(&mut self.ids)],
            View::Detail => match self.detail.post_id() {
                Some(post_id) => {
                    let preview = self.detail.post.clone();
                    self.detail.open(post_id, preview, &mut self.ids)
                }
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Delete the selected post (own posts only) or comment
    pub fn delete_selected(&mut self) -> Vec<NetworkCommand> {
        match self.view {
            View::Posts => {
                let user = match self.auth.user() {
                    Some(user) => user.clone(),
                    None => {
                        self.status = Some(LOGIN_REQUIRED.to_string());
                        return Vec::new();
                    }
                };
                match self.posts.delete_selected(&user, &mut self.ids) {
                    Some(cmd) => vec![cmd],
                    None => {
                        if self.posts.selected_post().is_some() {
                            self.status = Some(NOT_YOUR_POST.to_string());
                        }
                        Vec::new()
                    }
                }
            }
            View::Detail => self
                .detail
                .comments
                .delete_selected(&mut self.ids)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Edit the selected post, or the selected comment in place
    pub fn edit_selected(&mut self) {
        match self.view {
            View::Posts => {
                if let Some(post) = self.posts.selected_post().cloned() {
                    self.edit_post(post);
                }
            }
            View::Detail => {
                if self.detail.comments.begin_edit() {
                    self.input_mode = InputMode::Editing;
                }
            }
            _ => {}
        }
    }

    /// Edit the post open in the detail view
    pub fn edit_open_post(&mut self) {
        if self.view != View::Detail {
            return;
        }
        if let Some(post) = self.detail.post.clone() {
            self.edit_post(post);
        }
    }

    fn edit_post(&mut self, post: Post) {
        match self.auth.user().map(|user| post.is_owned_by(user)) {
            None => self.status = Some(LOGIN_REQUIRED.to_string()),
            Some(false) => self.status = Some(NOT_YOUR_POST.to_string()),
            Some(true) => self.open_post_form(PostForm::edit(post)),
        }
    }

    pub fn write_comment(&mut self) {
        if self.view == View::Detail && self.detail.post_id().is_some() {
            self.detail.comments.cancel_edit();
            self.input_mode = InputMode::Editing;
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.focused_field_mut().is_some() {
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        if self.view == View::Detail {
            self.detail.comments.cancel_edit();
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            field.insert(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.backspace();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.right();
        }
    }

    pub fn next_field(&mut self) {
        match self.view {
            View::Login => self.login.next_field(),
            View::Register => self.register.next_field(),
            View::PostForm => {
                if let Some(form) = self.post_form.as_mut() {
                    form.next_field();
                }
            }
            _ => {}
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        match self.view {
            View::Login => self.login.toggle_password_visibility(),
            View::Register => self.register.toggle_password_visibility(),
            _ => {}
        }
    }

    /// Submit whatever the current view is editing
    pub fn submit(&mut self) -> Vec<NetworkCommand> {
        let ids = &mut self.ids;
        let cmd = match self.view {
            View::Login => {
                let cmd = self.login.submit(ids);
                if cmd.is_some() {
                    self.auth.dispatch(AuthAction::Pending);
                }
                cmd
            }
            View::Register => {
                let cmd = self.register.submit(ids);
                if cmd.is_some() {
                    self.auth.dispatch(AuthAction::Pending);
                }
                cmd
            }
            View::PostForm => self.post_form.as_mut().and_then(|form| form.submit(ids)),
            View::Detail => {
                let comments = &mut self.detail.comments;
                if comments.editing.is_some() {
                    comments.save_edit(ids)
                } else {
                    comments.submit(ids)
                }
            }
            View::Posts => None,
        };

        if cmd.is_some() {
            self.input_mode = InputMode::Normal;
        }
        cmd.into_iter().collect()
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Network responses
    // ========================

    /// Route a reply to whichever feature is waiting for it.
    ///
    /// Returns follow-up commands, such as the refetch after a comment is
    /// added or a post is saved.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        let id = response.id();
        if let NetworkResponse::Failed { message, status, time_ms, .. } = &response {
            tracing::warn!(id, ?status, elapsed_ms = *time_ms, %message, "Call failed");
        }
        let result = response.into_result();

        if self.login.settle(id) || self.register.settle(id) {
            return self.finish_auth(result);
        }
        if self.post_form.as_ref().map_or(false, |form| form.owns(id)) {
            return self.finish_post_form(id, result);
        }
        if let Some(pos) = self.detached_saves.iter().position(|&save| save == id) {
            self.detached_saves.remove(pos);
            return self.finish_detached_save(result);
        }
        if self.posts.owns(id) {
            self.posts.apply(id, result);
            return Vec::new();
        }
        if self.detail.owns(id) {
            return self.detail.apply(id, result, &mut self.ids).into_iter().collect();
        }

        tracing::debug!(id, "Discarding stale response");
        Vec::new()
    }

    fn finish_auth(&mut self, result: Result<ApiOutcome, CallError>) -> Vec<NetworkCommand> {
        match result {
            Ok(ApiOutcome::Session(session)) => {
                tracing::info!(user = %session.user.username, "Logged in");
                self.status = Some(format!("Welcome, {}", session.user.username));
                self.auth.dispatch(AuthAction::Fulfilled(session));
                self.login.reset();
                self.register = RegisterForm::default();
                self.navigate(NavTarget::AllPosts)
            }
            Ok(other) => {
                tracing::warn!(?other, "Unexpected reply to login");
                self.auth
                    .dispatch(AuthAction::Rejected(UNEXPECTED_AUTH_REPLY.to_string()));
                Vec::new()
            }
            Err(e) => {
                self.auth.dispatch(AuthAction::Rejected(e.message));
                Vec::new()
            }
        }
    }

    fn finish_post_form(
        &mut self,
        id: u64,
        result: Result<ApiOutcome, CallError>,
    ) -> Vec<NetworkCommand> {
        let outcome = match self.post_form.as_mut() {
            Some(form) => form.apply(id, result),
            None => None,
        };
        match outcome {
            Some(FormOutcome::Saved(post)) => {
                tracing::info!(post_id = post.id, "Post saved");
                self.post_form = None;
                self.status = Some("Post saved".to_string());
                self.detail.replace_post(post.clone());
                self.posts.replace(post);

                let view = self.return_view;
                self.set_view(view);
                // The parent list re-fetches
                vec![self.posts.refresh(&mut self.ids)]
            }
            Some(FormOutcome::Failed) | None => Vec::new(),
        }
    }

    /// A save whose form was closed before the reply came back
    fn finish_detached_save(
        &mut self,
        result: Result<ApiOutcome, CallError>,
    ) -> Vec<NetworkCommand> {
        match result {
            Ok(ApiOutcome::Post(post)) => {
                tracing::info!(post_id = post.id, "Post saved after its form closed");
                self.status = Some("Post saved".to_string());
                self.detail.replace_post(post.clone());
                self.posts.replace(post);
                vec![self.posts.refresh(&mut self.ids)]
            }
            Ok(other) => {
                tracing::warn!(?other, "Unexpected reply to post save");
                self.status = Some(SAVE_FAILED.to_string());
                Vec::new()
            }
            Err(e) => {
                tracing::debug!(error = %e.message, "Post save failed after its form closed");
                self.status = Some(SAVE_FAILED.to_string());
                Vec::new()
            }
        }
    }
}
