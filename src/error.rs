use thiserror::Error;

/// Failures of one panel dispatch cycle, plus panel lifecycle misuse.
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Request to the assist service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Assist service sent an unreadable response from {endpoint}: {source}")]
    Service {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Panel view is already initialized")]
    AlreadyInitialized,
}

impl PanelError {
    /// Text shown in the host's error notification.
    pub fn notification(&self) -> String {
        format!("Error: {self}")
    }
}

/// Host registry failures.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("A view provider is already registered for '{0}'")]
    DuplicateView(String),

    #[error("No view provider is registered for '{0}'")]
    UnknownView(String),

    #[error("Failed to resolve view: {0}")]
    Resolve(#[from] PanelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_notification_carries_literal() {
        let err = PanelError::UnknownCommand("foo".to_string());
        assert_eq!(err.notification(), "Error: Unknown command: foo");
    }

    #[test]
    fn test_service_error_names_endpoint() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = PanelError::Service {
            endpoint: "/run-code",
            source,
        };
        let message = err.notification();
        assert!(message.starts_with("Error: "));
        assert!(message.contains("/run-code"));
    }

    #[test]
    fn test_host_error_wraps_panel_error() {
        let err = HostError::from(PanelError::AlreadyInitialized);
        assert!(err.to_string().contains("already initialized"));
    }
}
