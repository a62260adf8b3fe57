use thiserror::Error;

/// Errors raised by the word list, the model and configuration loading.
///
/// `NotAWord` is the only variant the controller recovers from; anything
/// surfacing at startup is fatal.
#[derive(Debug, Error)]
pub enum WordyError {
    #[error("'{0}' is not in the word list")]
    NotAWord(String),

    #[error("word '{word}' has length {actual}, expected {expected}")]
    WrongWordSize {
        word: String,
        expected: usize,
        actual: usize,
    },

    #[error("no words of length {word_size} found in {source_name}")]
    EmptyWordList {
        word_size: usize,
        source_name: String,
    },

    #[error("keyboard layout label '{0}' is not a letter, ENTER or BACK")]
    InvalidKeyLabel(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("failed to parse settings file {path}: {source}")]
    SettingsParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, WordyError>;
