// Host view registry and activation

use std::collections::HashMap;
use std::path::PathBuf;

use crate::api::AssistClient;
use crate::error::{HostError, PanelError};
use crate::panel::{PromptPanel, WebviewView};

/// Well-known id the panel is registered under.
pub const VIEW_ID: &str = "planto-sidebar";

/// Capability interface the registry drives.
pub trait ViewProvider: Send {
    fn resolve_webview_view(&mut self, view: &mut WebviewView) -> Result<(), PanelError>;

    fn dispose(&mut self) {}
}

/// Handle returned by [`ViewRegistry::register`], used to unregister.
#[derive(Debug, PartialEq, Eq)]
pub struct Registration {
    view_id: String,
}

#[derive(Default)]
pub struct ViewRegistry {
    providers: HashMap<String, Box<dyn ViewProvider>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        view_id: &str,
        provider: Box<dyn ViewProvider>,
    ) -> Result<Registration, HostError> {
        if self.providers.contains_key(view_id) {
            return Err(HostError::DuplicateView(view_id.to_string()));
        }
        self.providers.insert(view_id.to_string(), provider);
        tracing::debug!(view_id, "view provider registered");

        Ok(Registration {
            view_id: view_id.to_string(),
        })
    }

    pub fn resolve(&mut self, view_id: &str, view: &mut WebviewView) -> Result<(), HostError> {
        let provider = self
            .providers
            .get_mut(view_id)
            .ok_or_else(|| HostError::UnknownView(view_id.to_string()))?;

        provider.resolve_webview_view(view)?;
        Ok(())
    }

    pub fn unregister(&mut self, registration: Registration) {
        if let Some(mut provider) = self.providers.remove(&registration.view_id) {
            provider.dispose();
            tracing::debug!(view_id = %registration.view_id, "view provider unregistered");
        }
    }
}

/// What the host hands to [`activate`].
pub struct ExtensionContext {
    pub extension_root: PathBuf,
    pub subscriptions: Vec<Registration>,
}

impl ExtensionContext {
    pub const fn new(extension_root: PathBuf) -> Self {
        Self {
            extension_root,
            subscriptions: Vec::new(),
        }
    }

    /// Host shutdown: release every recorded registration.
    pub fn dispose(&mut self, registry: &mut ViewRegistry) {
        for registration in self.subscriptions.drain(..) {
            registry.unregister(registration);
        }
    }
}

pub fn activate(
    context: &mut ExtensionContext,
    registry: &mut ViewRegistry,
    client: AssistClient,
) -> Result<(), HostError> {
    let panel = PromptPanel::new(context.extension_root.clone(), client);
    let registration = registry.register(VIEW_ID, Box::new(panel))?;
    context.subscriptions.push(registration);

    tracing::info!(view_id = VIEW_ID, "planto activated");
    Ok(())
}

pub const fn deactivate() {}

#[cfg(test)]
impl Registration {
    pub fn view_id(&self) -> &str {
        &self.view_id
    }
}

#[cfg(test)]
impl ViewRegistry {
    pub fn contains(&self, view_id: &str) -> bool {
        self.providers.contains_key(view_id)
    }
}
