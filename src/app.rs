use crossterm::event::{KeyCode, KeyModifiers};
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::panel::PanelMarkup;
use crate::protocol::{Command, InboundMessage, OutboundMessage};

/// What the output region currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputRegion {
    #[default]
    Empty,
    /// Interpreted as HTML.
    Markup(String),
    /// Shown verbatim.
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Prompt,
    Button(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub created_at: Instant,
}

#[derive(Debug)]
pub struct App {
    pub markup: PanelMarkup,
    pub should_quit: bool,
    pub exit_pending: bool,
    pub show_help: bool,
    pub prompt: String,
    pub focus: Focus,
    pub output: OutputRegion,
    pub scroll_offset: usize,
    pub notifications: Vec<Notification>,
    pub notification_ttl: Duration,
    pub service_online: Option<bool>,
    pub last_action: Option<Command>,
}

impl App {
    pub const fn new(markup: PanelMarkup, notification_ttl: Duration) -> Self {
        Self {
            markup,
            should_quit: false,
            exit_pending: false,
            show_help: false,
            prompt: String::new(),
            focus: Focus::Prompt,
            output: OutputRegion::Empty,
            scroll_offset: 0,
            notifications: Vec::new(),
            notification_ttl,
            service_online: None,
            last_action: None,
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub const fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub const fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub const fn scroll_to_bottom(&mut self) {
        // Clamped by the renderer
        self.scroll_offset = usize::MAX;
    }

    pub fn focus_next(&mut self) {
        let buttons = self.markup.buttons.len();
        self.focus = match self.focus {
            Focus::Prompt if buttons > 0 => Focus::Button(0),
            Focus::Button(i) if i + 1 < buttons => Focus::Button(i + 1),
            _ => Focus::Prompt,
        };
    }

    pub fn focus_previous(&mut self) {
        let buttons = self.markup.buttons.len();
        self.focus = match self.focus {
            Focus::Prompt if buttons > 0 => Focus::Button(buttons - 1),
            Focus::Button(i) if i > 0 => Focus::Button(i - 1),
            _ => Focus::Prompt,
        };
    }

    /// Press a button: builds the view -> controller message with the prompt as typed.
    pub fn click(&mut self, index: usize) -> Option<InboundMessage> {
        let command = self.markup.button_command(index)?;
        self.last_action = Some(command);
        Some(InboundMessage::new(command.as_str(), self.prompt.clone()))
    }

    /// Route a controller message by its tag. Unknown tags and undecodable
    /// messages leave the output untouched.
    pub fn apply_view_message(&mut self, message: Value) {
        let message = match serde_json::from_value::<OutboundMessage>(message) {
            Ok(message) => message,
            Err(err) => {
                tracing::debug!(error = %err, "ignoring undecodable view message");
                return;
            }
        };

        self.output = match message {
            OutboundMessage::ShowExplanation { explanation } => {
                OutputRegion::Markup(explanation.unwrap_or_default())
            }
            OutboundMessage::ShowGeneratedCode { code } | OutboundMessage::ShowDebuggedCode { code } => {
                OutputRegion::Text(code.unwrap_or_default())
            }
            OutboundMessage::ShowRunOutput { output } => OutputRegion::Text(output.unwrap_or_default()),
            OutboundMessage::Unrecognized => return,
        };
        self.scroll_to_top();
    }

    pub fn notify_error(&mut self, message: String) {
        self.notifications.push(Notification {
            message,
            created_at: Instant::now(),
        });
    }

    pub fn prune_notifications(&mut self, now: Instant) {
        let ttl = self.notification_ttl;
        self.notifications
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
    }

    pub fn dismiss_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Apply a key press. Returns a message when a button was pressed.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Option<InboundMessage> {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        if self.show_help {
            if key == KeyCode::Esc || (ctrl && key == KeyCode::Char('h')) {
                self.show_help = false;
            }
            return None;
        }

        match key {
            KeyCode::Char('c') if ctrl => {
                if self.exit_pending {
                    self.quit();
                } else {
                    self.exit_pending = true;
                }
                return None;
            }
            KeyCode::Esc if self.exit_pending => {
                self.exit_pending = false;
                return None;
            }
            _ if self.exit_pending => {
                // Any other key cancels pending exit
                self.exit_pending = false;
            }
            _ => {}
        }

        match key {
            KeyCode::Char('q') if ctrl => self.quit(),
            KeyCode::Char('h') if ctrl => self.toggle_help(),
            KeyCode::Char('e') if ctrl => return self.click(0),
            KeyCode::Char('g') if ctrl => return self.click(1),
            KeyCode::Char('d') if ctrl => return self.click(2),
            KeyCode::Char('r') if ctrl => return self.click(3),
            KeyCode::Esc => self.dismiss_notifications(),
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_previous(),

            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(10),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),

            KeyCode::Enter => match self.focus {
                Focus::Button(index) => return self.click(index),
                Focus::Prompt => self.prompt.push('\n'),
            },
            KeyCode::Backspace => {
                self.prompt.pop();
            }
            KeyCode::Char(c) if !ctrl => {
                self.focus = Focus::Prompt;
                self.prompt.push(c);
            }
            _ => {}
        }
        None
    }
}
