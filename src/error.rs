use thiserror::Error;

/// Problems with user-supplied form input, surfaced as notices
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter an API key.")]
    MissingApiKey,

    #[error("Please enter and save an API key first.")]
    ApiKeyNotSet,

    #[error("Please enter a topic for the song.")]
    MissingTopic,
}
