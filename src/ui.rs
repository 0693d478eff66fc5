//! Terminal rendering. Reads a [`RenderState`] and draws it; never mutates.

use ratatui::{prelude::*, widgets::*};

use crate::constants::{APP_NAME, APP_VERSION};
use crate::features::post_form::PostFormField;
use crate::features::register::CredentialField;
use crate::features::{Feed, Phase, PostForm, TextField};
use crate::messages::ui_events::{InputMode, View};
use crate::messages::RenderState;
use crate::models::{Comment, Post};

/// Draw one frame
pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Control bar
            Constraint::Min(0),    // Active view
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_control_bar(f, state, chunks[0]);

    match state.view {
        View::Posts => draw_posts(f, state, chunks[1]),
        View::Detail => draw_detail(f, state, chunks[1]),
        View::PostForm => draw_post_form(f, state, chunks[1]),
        View::Login => draw_login(f, state, chunks[1]),
        View::Register => draw_register(f, state, chunks[1]),
    }

    draw_status_bar(f, state, chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

/// Menu label matching the current view, if any
fn active_label(state: &RenderState) -> Option<&'static str> {
    match state.view {
        View::Posts => Some(state.posts.feed.title()),
        View::PostForm => match &state.post_form {
            Some(form) if !form.is_edit() => Some("New Post"),
            _ => None,
        },
        View::Login => Some("Login"),
        View::Register => Some("Register"),
        View::Detail => None,
    }
}

fn draw_control_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let active = active_label(state);

    let mut spans = vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::raw(" "),
    ];
    for item in &state.menu {
        let style = if Some(item.label) == active {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {}:{} ", item.key, item.label), style));
    }

    let who = match &state.user {
        Some(user) => Span::styled(format!("@{} ", user.username), Style::default().fg(Color::Green)),
        None => Span::styled("not logged in ", Style::default().fg(Color::DarkGray)),
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(who.width() as u16)])
        .split(area);

    f.render_widget(Paragraph::new(Line::from(spans)), halves[0]);
    f.render_widget(Paragraph::new(Line::from(who)), halves[1]);
}

// ============================================================================
// Posts
// ============================================================================

fn post_line(post: &Post) -> Line<'static> {
    let description = post.description.lines().next().unwrap_or("").to_string();
    let mut spans = vec![
        Span::styled(format!("#{:<5}", post.id), Style::default().fg(Color::DarkGray)),
        Span::raw(description),
        Span::styled(format!("  by {}", post.author_label()), Style::default().fg(Color::Cyan)),
    ];
    if let Some(created) = post.created_at {
        spans.push(Span::styled(
            format!("  {}", created.format("%Y-%m-%d")),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn draw_posts(f: &mut Frame, state: &RenderState, area: Rect) {
    let list = &state.posts;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let loading = if list.phase() == Phase::Loading { " [...]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ({}){} ", list.feed.title(), list.total, loading));

    if list.posts.is_empty() {
        let empty = match (list.phase(), list.feed) {
            (Phase::Loading, _) => "Loading...",
            (Phase::Idle, Feed::All) => "No posts yet.",
            (Phase::Idle, Feed::Mine) => "You have not posted anything yet. Press 3 to create a post.",
        };
        let paragraph = Paragraph::new(empty)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, chunks[0]);
    } else {
        let items: Vec<ListItem> = list.posts.iter().map(|p| ListItem::new(post_line(p))).collect();
        let widget = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow).bold())
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(list.selected));
        f.render_stateful_widget(widget, chunks[0], &mut list_state);
    }

    let footer = match &list.error {
        Some(error) => Line::from(Span::styled(format!(" {}", error), Style::default().fg(Color::Red))),
        None => {
            let prev = if list.has_prev_page() { "← " } else { "  " };
            let next = if list.has_next_page() { " →" } else { "" };
            Line::from(Span::styled(
                format!(" {}Page {} of {}{}", prev, list.page, list.page_count(), next),
                Style::default().fg(Color::DarkGray),
            ))
        }
    };
    f.render_widget(Paragraph::new(footer), chunks[1]);
}

// ============================================================================
// Post detail and comments
// ============================================================================

fn draw_detail(f: &mut Frame, state: &RenderState, area: Rect) {
    let detail = &state.detail;

    let post = match &detail.post {
        Some(post) => post,
        None => {
            let (text, style) = match &detail.error {
                Some(error) => (error.as_str(), Style::default().fg(Color::Red)),
                None => ("Loading...", Style::default().fg(Color::DarkGray)),
            };
            let paragraph = Paragraph::new(text)
                .style(style)
                .block(Block::default().borders(Borders::ALL).title(" Post "));
            f.render_widget(paragraph, area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Post
            Constraint::Min(3),    // Comments
            Constraint::Length(3), // Comment input
        ])
        .split(area);

    draw_post_card(f, state, post, chunks[0]);
    draw_comments(f, state, chunks[1]);
    draw_comment_input(f, state, chunks[2]);
}

fn draw_post_card(f: &mut Frame, state: &RenderState, post: &Post, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        post.description.clone(),
        Style::default().bold(),
    ))];
    if let Some(image) = &post.image_url {
        lines.push(Line::from(vec![
            Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
            Span::raw(image.clone()),
        ]));
    }
    let mut byline = vec![Span::styled(
        format!("by {}", post.author_label()),
        Style::default().fg(Color::Cyan),
    )];
    if let Some(created) = post.created_at {
        byline.push(Span::styled(
            format!("  {}", created.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(byline));
    if let Some(error) = &state.detail.error {
        lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))));
    }

    let loading = if state.detail.phase() == Phase::Loading { " [...]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Post #{}{} ", post.id, loading));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn comment_line(comment: &Comment) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", comment.author_label()), Style::default().fg(Color::Cyan)),
        Span::raw(comment.content.clone()),
    ])
}

fn draw_comments(f: &mut Frame, state: &RenderState, area: Rect) {
    let section = &state.detail.comments;
    let loading = if section.phase() == Phase::Loading { " [...]" } else { "" };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Comments ({}){} ", section.comments.len(), loading));
    if let Some(error) = &section.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Red),
        )));
    }

    if section.comments.is_empty() {
        let paragraph = Paragraph::new("No comments yet. Press i to write one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = section
        .comments
        .iter()
        .map(|c| ListItem::new(comment_line(c)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(section.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_comment_input(f: &mut Frame, state: &RenderState, area: Rect) {
    let section = &state.detail.comments;
    let editing = state.input_mode == InputMode::Editing;

    let (title, field) = match &section.editing {
        Some(edit) => (" Edit comment (Enter: save, Esc: cancel) ", &edit.field),
        None if section.phase() == Phase::Loading => (" Add a comment [...] ", &section.draft),
        None => (" Add a comment (i: write, Enter: post) ", &section.draft),
    };
    draw_field(f, area, title, field, false, editing, editing, None);
}

// ============================================================================
// Forms
// ============================================================================

/// Draw a single-line input, placing the terminal cursor when it is being edited
#[allow(clippy::too_many_arguments)]
fn draw_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    field: &TextField,
    masked: bool,
    focused: bool,
    editing: bool,
    error: Option<&str>,
) {
    let border_style = if focused && editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string());
    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Red),
        )));
    }

    let content = if masked {
        field.masked()
    } else {
        field.value().to_string()
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if focused && editing {
        let cursor_x = cursor_x(area, field.cursor_column());
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

/// Column of the cursor inside a bordered field, kept within its borders
fn cursor_x(area: Rect, column: usize) -> u16 {
    let column = u16::try_from(column).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(1).saturating_add(column).min(max_x)
}

/// Centered form area with a fixed height
fn form_area(area: Rect, height: u16) -> Rect {
    let width = area.width.min(70);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn form_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title))
}

fn draw_post_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let form: &PostForm = match &state.post_form {
        Some(form) => form,
        None => return,
    };
    let editing = state.input_mode == InputMode::Editing;

    let outer = form_area(area, if form.is_edit() { 8 } else { 11 });
    let block = form_block(form.title());
    let inner = block.inner(outer);
    f.render_widget(Clear, outer);
    f.render_widget(block, outer);

    let mut constraints = vec![Constraint::Length(3)];
    if !form.is_edit() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    draw_field(
        f,
        rows[0],
        " Description ",
        &form.description,
        false,
        form.focus == PostFormField::Description,
        editing,
        None,
    );
    if !form.is_edit() {
        draw_field(
            f,
            rows[1],
            " Image file path ",
            &form.image_path,
            false,
            form.focus == PostFormField::Image,
            editing,
            None,
        );
    }

    let footer = if form.phase() == Phase::Loading {
        Line::from(Span::styled("Saving...", Style::default().fg(Color::Yellow)))
    } else if let Some(error) = &form.error {
        Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
    } else if !form.can_submit() {
        Line::from(Span::styled(
            if form.is_edit() {
                "A description is required"
            } else {
                "A description and an image are required"
            },
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled("s: save", Style::default().fg(Color::Green)))
    };
    f.render_widget(Paragraph::new(footer), rows[rows.len() - 1]);
}

/// Username and password rows shared by the login and register forms
#[allow(clippy::too_many_arguments)]
fn draw_credentials(
    f: &mut Frame,
    state: &RenderState,
    area: Rect,
    title: &str,
    username: &TextField,
    password: &TextField,
    show_password: bool,
    focus: CredentialField,
    errors: (Option<&str>, Option<&str>),
    busy_text: &str,
) {
    let editing = state.input_mode == InputMode::Editing;

    let outer = form_area(area, 11);
    let block = form_block(title);
    let inner = block.inner(outer);
    f.render_widget(Clear, outer);
    f.render_widget(block, outer);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    draw_field(
        f,
        rows[0],
        " Username ",
        username,
        false,
        focus == CredentialField::Username,
        editing,
        errors.0,
    );
    let password_title = if show_password {
        " Password (v: hide) "
    } else {
        " Password (v: show) "
    };
    draw_field(
        f,
        rows[1],
        password_title,
        password,
        !show_password,
        focus == CredentialField::Password,
        editing,
        errors.1,
    );

    let footer = if state.auth_loading {
        Line::from(Span::styled(busy_text.to_string(), Style::default().fg(Color::Yellow)))
    } else if let Some(error) = &state.auth_error {
        Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
    } else {
        Line::from(Span::styled("s: submit", Style::default().fg(Color::Green)))
    };
    f.render_widget(Paragraph::new(footer), rows[2]);
}

fn draw_login(f: &mut Frame, state: &RenderState, area: Rect) {
    let form = &state.login;
    draw_credentials(
        f,
        state,
        area,
        "Login",
        &form.username,
        &form.password,
        form.show_password,
        form.focus,
        (form.username_error.as_deref(), form.password_error.as_deref()),
        "Logging in...",
    );
}

fn draw_register(f: &mut Frame, state: &RenderState, area: Rect) {
    let form = &state.register;
    draw_credentials(
        f,
        state,
        area,
        "Register",
        &form.username,
        &form.password,
        form.show_password,
        form.focus,
        (form.errors.username.as_deref(), form.errors.password.as_deref()),
        "Registering...",
    );
}

// ============================================================================
// Status bar and help
// ============================================================================

fn key_hints(state: &RenderState) -> &'static str {
    if state.input_mode == InputMode::Editing {
        return " Esc:stop editing | Enter:submit | Tab:next field ";
    }
    match state.view {
        View::Posts => " ↑/↓:select | ←/→:page | Enter:open | u:edit | d:delete | g:refresh | ?:help | q:quit ",
        View::Detail => " ↑/↓:select | i:comment | u:edit | d:delete | p:edit post | Esc:back | ?:help ",
        View::PostForm => " Tab:next field | e:edit | s:save | Esc:cancel ",
        View::Login | View::Register => " Tab:next field | e:edit | v:show password | s:submit | Esc:back ",
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let left = match &state.status {
        Some(status) => Span::styled(format!(" {} ", status), Style::default().fg(Color::Yellow)),
        None => Span::styled(key_hints(state), Style::default().fg(Color::DarkGray)),
    };
    let right = Span::styled(format!("{} ", state.api_url), Style::default().fg(Color::DarkGray));

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right.width() as u16)])
        .split(area);
    f.render_widget(Paragraph::new(Line::from(left)), halves[0]);
    f.render_widget(Paragraph::new(Line::from(right)), halves[1]);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = format!(
        r#"
 {} {} - Keyboard Shortcuts

 MENU
   1                  All posts
   2 / 3              My posts / New post (logged in)
   l / r              Login / Register (logged out)
   o                  Logout

 POSTS
   ↑ / ↓              Select post
   ← / →              Previous / next page
   Enter              Open post and comments
   u / d              Edit / delete your post
   g                  Refresh

 POST
   i                  Write a comment
   u / d              Edit / delete selected comment
   p                  Edit this post
   Esc                Back to the list

 FORMS
   Tab                Next field
   e / Enter          Edit field
   s                  Submit
   v                  Show or hide password

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#,
        APP_NAME, APP_VERSION
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
