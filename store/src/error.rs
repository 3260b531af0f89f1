/// Errors originating from the persistence layer.
///
/// `Unavailable` carries the backend's own message. Callers should treat it
/// as opaque diagnostic text, not match on its content.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Key {key} holds a value of the wrong type")]
    WrongType { key: String },
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("An unknown error occurred: {0}")]
    Other(anyhow::Error),
}
