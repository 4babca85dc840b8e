// Host-side view object and message sinks

use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::PanelMarkup;
use crate::events::AppEvent;
use crate::protocol::InboundMessage;

pub type MessageHandler = Arc<dyn Fn(InboundMessage) + Send + Sync>;

/// Controller -> view delivery and the host's error notification facility.
#[cfg_attr(test, mockall::automock)]
pub trait ViewSink: Send + Sync {
    /// Returns false when the view is gone.
    fn post_message(&self, message: Value) -> bool;

    fn show_error_message(&self, message: String);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub enable_scripts: bool,
    pub local_resource_roots: Vec<PathBuf>,
}

impl ViewOptions {
    /// Whether `path` may be loaded by the view.
    pub fn permits(&self, path: &Path) -> bool {
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return false;
        }
        self.local_resource_roots
            .iter()
            .any(|root| path.starts_with(root))
    }
}

pub struct WebviewView {
    pub options: ViewOptions,
    pub markup: Option<PanelMarkup>,
    handler: Option<MessageHandler>,
    sink: Arc<dyn ViewSink>,
}

impl WebviewView {
    pub fn new(sink: Arc<dyn ViewSink>) -> Self {
        Self {
            options: ViewOptions::default(),
            markup: None,
            handler: None,
            sink,
        }
    }

    pub fn sink(&self) -> Arc<dyn ViewSink> {
        Arc::clone(&self.sink)
    }

    pub fn on_did_receive_message(&mut self, handler: MessageHandler) {
        self.handler = Some(handler);
    }

    /// Hand a user action to the installed handler.
    pub fn deliver(&self, message: InboundMessage) -> bool {
        if !self.options.enable_scripts {
            tracing::debug!(command = %message.command, "scripting disabled, dropping view message");
            return false;
        }
        match &self.handler {
            Some(handler) => {
                handler(message);
                true
            }
            None => false,
        }
    }
}

/// [`ViewSink`] feeding the terminal event loop.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl ChannelSink {
    pub const fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl ViewSink for ChannelSink {
    fn post_message(&self, message: Value) -> bool {
        self.tx.send(AppEvent::ViewMessage(message)).is_ok()
    }

    fn show_error_message(&self, message: String) {
        tracing::error!("{message}");
        let _ = self.tx.send(AppEvent::ErrorNotification(message));
    }
}
