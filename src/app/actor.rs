//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let initial = self.state.start();
        self.send_all(initial);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let follow_up = self.state.handle_response(response);
                    self.send_all(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send_all(&self, commands: Vec<NetworkCommand>) {
        for cmd in commands {
            if self.network_tx.send(cmd).is_err() {
                tracing::warn!("Network actor is gone; dropping command");
                break;
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        // Notices last until the next key press
        self.state.status = None;

        let commands = match event {
            // Navigation
            UiEvent::MenuKey(key) => self.state.menu_key(key),
            UiEvent::Back => {
                self.state.back();
                Vec::new()
            }

            // Lists
            UiEvent::SelectNext => {
                self.state.select_next();
                Vec::new()
            }
            UiEvent::SelectPrev => {
                self.state.select_prev();
                Vec::new()
            }
            UiEvent::NextPage => self.state.next_page(),
            UiEvent::PrevPage => self.state.prev_page(),
            UiEvent::Open => self.state.open_selected(),
            UiEvent::Refresh => self.state.refresh(),
            UiEvent::Delete => self.state.delete_selected(),
            UiEvent::Edit => {
                self.state.edit_selected();
                Vec::new()
            }
            UiEvent::EditPost => {
                self.state.edit_open_post();
                Vec::new()
            }
            UiEvent::WriteComment => {
                self.state.write_comment();
                Vec::new()
            }

            // Input editing
            UiEvent::StartEditing => {
                self.state.start_editing();
                Vec::new()
            }
            UiEvent::StopEditing => {
                self.state.stop_editing();
                Vec::new()
            }
            UiEvent::CharInput(c) => {
                self.state.enter_char(c);
                Vec::new()
            }
            UiEvent::Backspace => {
                self.state.delete_char();
                Vec::new()
            }
            UiEvent::CursorLeft => {
                self.state.move_cursor_left();
                Vec::new()
            }
            UiEvent::CursorRight => {
                self.state.move_cursor_right();
                Vec::new()
            }
            UiEvent::NextField => {
                self.state.next_field();
                Vec::new()
            }
            UiEvent::Submit => self.state.submit(),
            UiEvent::TogglePasswordVisibility => {
                self.state.toggle_password_visibility();
                Vec::new()
            }

            // Popups
            UiEvent::ToggleHelp => {
                self.state.toggle_help();
                Vec::new()
            }
            UiEvent::CloseHelp => {
                self.state.close_help();
                Vec::new()
            }

            // System
            UiEvent::Quit => return true,
        };

        self.send_all(commands);
        false
    }
}
