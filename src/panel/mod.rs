// Prompt dispatch panel

mod markup;
mod webview;

pub use markup::PanelMarkup;
pub use webview::{ChannelSink, ViewOptions, ViewSink, WebviewView};

#[cfg(test)]
pub use webview::MockViewSink;

use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::AssistClient;
use crate::config;
use crate::error::PanelError;
use crate::host::ViewProvider;
use crate::protocol::{Command, InboundMessage, OutboundMessage};

pub struct Dispatcher {
    client: AssistClient,
    sink: Arc<dyn ViewSink>,
}

impl Dispatcher {
    pub fn new(client: AssistClient, sink: Arc<dyn ViewSink>) -> Self {
        Self { client, sink }
    }

    /// Run one request/response cycle for `message`.
    pub async fn dispatch(&self, message: &InboundMessage) -> Result<OutboundMessage, PanelError> {
        let command: Command = message.command.parse()?;
        let route = command.route();

        let reply = self
            .client
            .post(route.endpoint, &route.request_body(&message.prompt))
            .await?;

        if reply.get(route.response_field).is_none() {
            tracing::warn!(
                field = route.response_field,
                "assist service reply is missing the expected field"
            );
        }

        Ok(command.reply_message(&reply))
    }

    /// Spawn a fault-isolated dispatch. Failures end in one error
    /// notification and never reach the caller.
    ///
    /// Replies carry no request id, so overlapping actions of the same
    /// command are last-response-wins.
    pub fn handle_message(self: &Arc<Self>, message: InboundMessage) -> JoinHandle<()> {
        let this = Arc::clone(self);
        let span = tracing::info_span!(
            "dispatch",
            id = %Uuid::new_v4(),
            command = %message.command
        );

        tokio::spawn(
            async move {
                match this.dispatch(&message).await {
                    Ok(reply) => match serde_json::to_value(&reply) {
                        Ok(value) => {
                            if !this.sink.post_message(value) {
                                tracing::debug!("view closed before the reply arrived");
                            }
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "failed to encode view message");
                        }
                    },
                    Err(err) => this.sink.show_error_message(err.notification()),
                }
            }
            .instrument(span),
        )
    }
}

/// View provider registered by the activation shim.
pub struct PromptPanel {
    resource_root: PathBuf,
    client: AssistClient,
    dispatcher: Option<Arc<Dispatcher>>,
}

impl PromptPanel {
    pub const fn new(resource_root: PathBuf, client: AssistClient) -> Self {
        Self {
            resource_root,
            client,
            dispatcher: None,
        }
    }
}

impl ViewProvider for PromptPanel {
    fn resolve_webview_view(&mut self, view: &mut WebviewView) -> Result<(), PanelError> {
        if self.dispatcher.is_some() {
            return Err(PanelError::AlreadyInitialized);
        }

        view.options = ViewOptions {
            enable_scripts: true,
            local_resource_roots: vec![self.resource_root.clone()],
        };

        let style_path = self.resource_root.join("media").join("style.toml");
        let theme = config::load_theme(&style_path, &view.options);
        view.markup = Some(PanelMarkup::render(&theme));

        let dispatcher = Arc::new(Dispatcher::new(self.client.clone(), view.sink()));
        let handler = Arc::clone(&dispatcher);
        view.on_did_receive_message(Arc::new(move |message| {
            handler.handle_message(message);
        }));
        self.dispatcher = Some(dispatcher);

        tracing::info!(root = %self.resource_root.display(), "prompt panel initialized");
        Ok(())
    }

    fn dispose(&mut self) {
        if self.dispatcher.take().is_some() {
            tracing::info!("prompt panel disposed");
        }
    }
}

#[cfg(test)]
impl PromptPanel {
    pub const fn is_initialized(&self) -> bool {
        self.dispatcher.is_some()
    }
}
