// Event types for async communication

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A message posted by the panel controller to the view
    ViewMessage(serde_json::Value),
    /// Text for the host's error notification
    ErrorNotification(String),
    /// Result of the startup health probe
    ServiceStatus(bool),
}
