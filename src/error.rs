use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("word corpus is empty")]
    EmptyCorpus,

    #[error("no bundled word list named `{0}`")]
    UnknownLanguage(String),

    #[error("word list is not valid utf-8: {0}")]
    InvalidCorpus(String),

    #[error("json failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
