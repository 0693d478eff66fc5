//! App-level flows driven with synthetic network replies

use tempfile::{tempdir, TempDir};

use exhibit_tui::app::commands::{LOGIN_REQUIRED, NOT_YOUR_POST};
use exhibit_tui::app::AppState;
use exhibit_tui::auth::AuthStore;
use exhibit_tui::config::Config;
use exhibit_tui::features::Phase;
use exhibit_tui::messages::ui_events::{InputMode, View};
use exhibit_tui::messages::{ApiCall, ApiOutcome, NetworkCommand, NetworkResponse};
use exhibit_tui::models::{Comment, Post, PostPage, Session, User};
use exhibit_tui::storage::SessionStore;

fn mira() -> User {
    User {
        id: 7,
        username: "mira".into(),
    }
}

fn post(id: i64, author: i64) -> Post {
    Post {
        id,
        description: format!("post {}", id),
        image_url: None,
        author_id: Some(author),
        author: None,
        created_at: None,
    }
}

fn comment(id: i64, post_id: i64, content: &str) -> Comment {
    Comment {
        id,
        post_id: Some(post_id),
        content: content.into(),
        author_id: Some(7),
        author: None,
    }
}

fn app(logged_in: bool) -> (AppState, SessionStore, TempDir) {
    let dir = tempdir().unwrap();
    let sessions = SessionStore::new(dir.path());
    if logged_in {
        sessions
            .save(&Session {
                token: "tok".into(),
                user: mira(),
            })
            .unwrap();
    }
    let state = AppState::new(&Config::default(), AuthStore::restore(sessions.clone()));
    (state, sessions, dir)
}

fn id_of(cmd: &NetworkCommand) -> u64 {
    match cmd {
        NetworkCommand::Execute { id, .. } => *id,
        NetworkCommand::Shutdown => panic!("not an execute command"),
    }
}

fn call_of(cmd: &NetworkCommand) -> &ApiCall {
    match cmd {
        NetworkCommand::Execute { call, .. } => call,
        NetworkCommand::Shutdown => panic!("not an execute command"),
    }
}

fn ok(cmd: &NetworkCommand, outcome: ApiOutcome) -> NetworkResponse {
    NetworkResponse::Completed {
        id: id_of(cmd),
        outcome,
        time_ms: 3,
    }
}

fn failed(cmd: &NetworkCommand, status: u16, message: &str) -> NetworkResponse {
    NetworkResponse::Failed {
        id: id_of(cmd),
        message: message.into(),
        status: Some(status),
        time_ms: 3,
    }
}

fn type_text(state: &mut AppState, text: &str) {
    state.start_editing();
    for c in text.chars() {
        state.enter_char(c);
    }
    state.stop_editing();
}

/// App with the first page loaded
fn with_posts(logged_in: bool, posts: Vec<Post>) -> (AppState, SessionStore, TempDir) {
    let (mut state, sessions, dir) = app(logged_in);
    let start = state.start();
    let total = posts.len();
    state.handle_response(ok(&start[0], ApiOutcome::Posts(PostPage { posts, total })));
    (state, sessions, dir)
}

#[test]
fn test_start_loads_first_page() {
    let (mut state, _, _dir) = app(false);
    let cmds = state.start();
    assert_eq!(cmds.len(), 1);
    assert_eq!(call_of(&cmds[0]), &ApiCall::ListPosts { page: 1, limit: 10 });
    assert_eq!(state.posts.phase(), Phase::Loading);

    state.handle_response(ok(
        &cmds[0],
        ApiOutcome::Posts(PostPage {
            posts: vec![post(1, 7)],
            total: 1,
        }),
    ));
    assert_eq!(state.posts.posts.len(), 1);
    assert_eq!(state.to_render_state().posts.total, 1);
}

#[test]
fn test_register_flow() {
    let (mut state, sessions, _dir) = app(false);
    assert!(state.menu_key('r').is_empty());
    assert_eq!(state.view, View::Register);

    // Too short: nothing is sent
    type_text(&mut state, "ab");
    assert!(state.submit().is_empty());
    assert!(state.register.errors.username.is_some());
    assert!(!state.auth.state().loading);

    type_text(&mut state, "c");
    state.next_field();
    type_text(&mut state, "hunter22");
    let cmds = state.submit();
    assert_eq!(cmds.len(), 1);
    assert!(matches!(call_of(&cmds[0]), ApiCall::Register(c) if c.username == "abc"));
    assert!(state.auth.state().loading);

    let follow_up = state.handle_response(ok(
        &cmds[0],
        ApiOutcome::Session(Session {
            token: "fresh".into(),
            user: User {
                id: 9,
                username: "abc".into(),
            },
        }),
    ));
    assert_eq!(state.view, View::Posts);
    assert_eq!(state.auth.user().map(|u| u.id), Some(9));
    assert!(!state.auth.state().loading);
    assert_eq!(sessions.token().as_deref(), Some("fresh"));
    assert!(matches!(call_of(&follow_up[0]), ApiCall::ListPosts { .. }));
}

#[test]
fn test_register_failure_shows_error_until_unmount() {
    let (mut state, _, _dir) = app(false);
    state.menu_key('r');
    type_text(&mut state, "mira");
    state.next_field();
    type_text(&mut state, "hunter22");
    let cmds = state.submit();

    state.handle_response(failed(&cmds[0], 409, "Server returned 409: Username taken"));
    assert_eq!(state.view, View::Register);
    assert!(state.auth.user().is_none());
    assert_eq!(
        state.to_render_state().auth_error.as_deref(),
        Some("Server returned 409: Username taken")
    );

    state.back();
    assert_eq!(state.auth.state().error, None);
}

#[test]
fn test_login_rejection_and_success() {
    let (mut state, _, _dir) = app(false);
    state.menu_key('l');
    assert_eq!(state.view, View::Login);

    assert!(state.submit().is_empty());
    assert!(state.login.username_error.is_some());

    type_text(&mut state, "mira");
    state.next_field();
    type_text(&mut state, "wrong");
    let cmds = state.submit();
    state.handle_response(failed(&cmds[0], 401, "Server returned 401: Invalid credentials"));
    assert!(state.auth.state().error.is_some());
    assert_eq!(state.view, View::Login);

    let cmds = state.submit();
    assert!(state.auth.state().error.is_none());
    state.handle_response(ok(
        &cmds[0],
        ApiOutcome::Session(Session {
            token: "tok".into(),
            user: mira(),
        }),
    ));
    assert_eq!(state.view, View::Posts);
    assert_eq!(state.login.username.value(), "");
}

#[test]
fn test_menu_refuses_targets_not_on_it() {
    let (mut state, _, _dir) = app(false);
    assert!(state.menu_key('2').is_empty());
    assert_eq!(state.view, View::Posts);
    assert_eq!(state.status.as_deref(), Some(LOGIN_REQUIRED));

    assert!(state.menu_key('3').is_empty());
    assert!(state.post_form.is_none());

    let (mut state, _, _dir) = app(true);
    assert!(state.menu_key('l').is_empty());
    assert_eq!(state.view, View::Posts);
    let cmds = state.menu_key('2');
    assert_eq!(call_of(&cmds[0]), &ApiCall::ListMyPosts { page: 1, limit: 10 });
}

#[test]
fn test_logout_clears_session_and_goes_to_login() {
    let (mut state, sessions, _dir) = app(true);
    assert!(state.auth.user().is_some());

    state.menu_key('o');
    assert_eq!(state.view, View::Login);
    assert!(state.auth.user().is_none());
    assert_eq!(sessions.token(), None);
    let labels: Vec<_> = state.to_render_state().menu.iter().map(|m| m.label).collect();
    assert_eq!(labels, vec!["All Posts", "Login", "Register"]);
}

#[test]
fn test_comment_add_triggers_refetch() {
    let (mut state, _, _dir) = with_posts(true, vec![post(5, 7)]);
    let open = state.open_selected();
    assert_eq!(state.view, View::Detail);
    assert_eq!(call_of(&open[0]), &ApiCall::GetPost(5));
    assert_eq!(call_of(&open[1]), &ApiCall::GetComments(5));

    state.handle_response(ok(&open[0], ApiOutcome::Post(post(5, 7))));
    state.handle_response(ok(&open[1], ApiOutcome::Comments(vec![comment(1, 5, "first")])));

    state.write_comment();
    assert_eq!(state.input_mode, InputMode::Editing);
    for c in "nice".chars() {
        state.enter_char(c);
    }
    let add = state.submit();
    assert_eq!(
        call_of(&add[0]),
        &ApiCall::AddComment {
            post_id: 5,
            text: "nice".into()
        }
    );
    assert_eq!(state.input_mode, InputMode::Normal);

    let refetch = state.handle_response(ok(&add[0], ApiOutcome::Comment(comment(2, 5, "nice"))));
    assert_eq!(call_of(&refetch[0]), &ApiCall::GetComments(5));
    assert_eq!(state.detail.comments.draft.value(), "");

    state.handle_response(ok(
        &refetch[0],
        ApiOutcome::Comments(vec![comment(1, 5, "first"), comment(2, 5, "nice")]),
    ));
    assert_eq!(state.detail.comments.comments.len(), 2);
}

#[test]
fn test_comment_edit_rolls_back_on_failure() {
    let (mut state, _, _dir) = with_posts(true, vec![post(5, 7)]);
    let open = state.open_selected();
    state.handle_response(ok(&open[1], ApiOutcome::Comments(vec![comment(1, 5, "old")])));

    state.edit_selected();
    assert_eq!(state.input_mode, InputMode::Editing);
    state.enter_char('!');
    let cmds = state.submit();
    assert_eq!(state.detail.comments.comments[0].content, "old!");

    state.handle_response(failed(&cmds[0], 500, "boom"));
    assert_eq!(state.detail.comments.comments[0].content, "old");
    assert!(state.detail.comments.error.is_some());
}

#[test]
fn test_stale_comments_for_previous_post_are_dropped() {
    let (mut state, _, _dir) = with_posts(false, vec![post(1, 7), post(2, 7)]);
    let first = state.open_selected();
    state.back();

    state.select_next();
    let second = state.open_selected();
    assert_eq!(state.detail.post_id(), Some(2));

    // Late reply for post 1
    let follow_up = state.handle_response(ok(
        &first[1],
        ApiOutcome::Comments(vec![comment(10, 1, "wrong post")]),
    ));
    assert!(follow_up.is_empty());
    assert!(state.detail.comments.comments.is_empty());

    state.handle_response(ok(&second[1], ApiOutcome::Comments(vec![comment(20, 2, "right")])));
    assert_eq!(state.detail.comments.comments[0].id, 20);
}

#[test]
fn test_missing_post_shows_not_found() {
    let (mut state, _, _dir) = with_posts(false, vec![post(5, 7)]);
    let open = state.open_selected();
    state.handle_response(failed(&open[0], 404, "Server returned 404: Not Found"));
    assert_eq!(state.detail.error.as_deref(), Some("Post not found"));
}

#[test]
fn test_delete_post_requires_ownership() {
    let (mut state, _, _dir) = with_posts(true, vec![post(1, 8), post(2, 7)]);

    assert!(state.delete_selected().is_empty());
    assert_eq!(state.status.as_deref(), Some(NOT_YOUR_POST));

    state.select_next();
    let cmds = state.delete_selected();
    assert_eq!(call_of(&cmds[0]), &ApiCall::DeletePost(2));
    state.handle_response(ok(&cmds[0], ApiOutcome::Deleted));
    assert_eq!(state.posts.posts.len(), 1);
    assert_eq!(state.posts.total, 1);
}

#[test]
fn test_create_post_closes_form_and_refreshes_list() {
    let (mut state, _, _dir) = with_posts(true, vec![]);
    state.menu_key('3');
    assert_eq!(state.view, View::PostForm);

    type_text(&mut state, "a sunset");
    state.next_field();
    type_text(&mut state, "/tmp/sunset.png");
    let cmds = state.submit();
    assert!(matches!(call_of(&cmds[0]), ApiCall::CreatePost(p) if p.description == "a sunset"));

    let refresh = state.handle_response(ok(&cmds[0], ApiOutcome::Post(post(3, 7))));
    assert!(state.post_form.is_none());
    assert_eq!(state.view, View::Posts);
    assert!(matches!(call_of(&refresh[0]), ApiCall::ListPosts { .. }));
}

#[test]
fn test_save_finishing_after_form_closed_still_refreshes_list() {
    let (mut state, _, _dir) = with_posts(true, vec![post(4, 7)]);
    state.edit_selected();
    let cmds = state.submit();
    assert!(matches!(call_of(&cmds[0]), ApiCall::UpdatePost { id: 4, .. }));

    state.back();
    assert!(state.post_form.is_none());
    assert_eq!(state.view, View::Posts);

    let refresh = state.handle_response(ok(&cmds[0], ApiOutcome::Post(post(4, 7))));
    assert_eq!(refresh.len(), 1);
    assert!(matches!(call_of(&refresh[0]), ApiCall::ListPosts { .. }));
    assert_eq!(state.status.as_deref(), Some("Post saved"));
}

#[test]
fn test_failed_save_keeps_form_open() {
    let (mut state, _, _dir) = with_posts(true, vec![post(4, 7)]);
    state.edit_selected();
    assert_eq!(state.view, View::PostForm);

    let cmds = state.submit();
    assert!(matches!(call_of(&cmds[0]), ApiCall::UpdatePost { id: 4, .. }));
    let follow_up = state.handle_response(failed(&cmds[0], 500, "boom"));
    assert!(follow_up.is_empty());
    assert_eq!(state.view, View::PostForm);
    let form = state.post_form.as_ref().unwrap();
    assert_eq!(form.error.as_deref(), Some("Failed to save post. Please try again."));
    assert_eq!(form.description.value(), "post 4");
}

#[test]
fn test_unknown_reply_is_discarded() {
    let (mut state, _, _dir) = app(false);
    let follow_up = state.handle_response(NetworkResponse::Completed {
        id: 999,
        outcome: ApiOutcome::Deleted,
        time_ms: 0,
    });
    assert!(follow_up.is_empty());
    assert!(state.posts.posts.is_empty());
}
