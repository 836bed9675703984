use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid hashtag: '{0}'")]
    InvalidHashtag(String),
    #[error("invalid attribute '{attribute}' in column spec '{spec}'")]
    InvalidAttribute { spec: String, attribute: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
