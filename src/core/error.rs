use thiserror::Error;

pub type Result<T> = std::result::Result<T, BindingError>;

/// Configuration and programming errors raised while binding commands or
/// resolving views. None of them are transient; they are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("no binding provider can handle targets of type {target_type}")]
    NoProviderFound { target_type: &'static str },

    #[error("{}", no_bindable_event_message(.target_type, .event.as_deref()))]
    NoBindableEventFound {
        target_type: &'static str,
        event: Option<String>,
    },

    #[error("no view registered for {view_model_type} (contract: {})", .contract.as_deref().unwrap_or("<none>"))]
    NoViewRegistered {
        view_model_type: &'static str,
        contract: Option<String>,
    },

    #[error("resolved content {type_name} does not accept a view model")]
    NotAView { type_name: &'static str },
}

fn no_bindable_event_message(target_type: &str, event: Option<&str>) -> String {
    match event {
        Some(event) => format!("{target_type} has no event named {event}"),
        None => format!(
            "couldn't find a default event to bind to on {target_type}, specify an event explicitly"
        ),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
