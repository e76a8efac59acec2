use serde_json::Value;
use thiserror::Error;

/// Errors surfaced to the host. The configuration kinds carry the index of the
/// offending input item so the host can pin a failure to a row; `Api` carries
/// whatever structured payload the backend returned alongside a non-2xx status.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("The resource \"{resource}\" is not known! (item {item_index})")]
    UnknownResource { resource: String, item_index: usize },

    #[error("The operation \"{operation}\" is not known! (item {item_index})")]
    UnknownOperation { operation: String, item_index: usize },

    #[error("Invalid JSON body for item {item_index}: {source}")]
    BadJsonBody {
        item_index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid properties block for item {item_index}: {reason}")]
    BadProperties { item_index: usize, reason: String },

    #[error("Fractal Forge API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
        payload: Option<Value>,
    },
}

impl ConnectorError {
    /// Index of the input item that produced this error, when the error is
    /// local to a single item.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            ConnectorError::UnknownResource { item_index, .. }
            | ConnectorError::UnknownOperation { item_index, .. }
            | ConnectorError::BadJsonBody { item_index, .. }
            | ConnectorError::BadProperties { item_index, .. } => Some(*item_index),
            ConnectorError::Api { .. } => None,
        }
    }

    /// True for errors caused by the node's own parameters rather than the
    /// backend or the network.
    pub fn is_config(&self) -> bool {
        !matches!(self, ConnectorError::Api { .. })
    }
}
