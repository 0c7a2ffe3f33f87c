use aws_sdk_mturk::error::{DisplayErrorContext, SdkError};

#[derive(Debug, thiserror::Error)]
pub enum MturkError {
    #[error("MTurk API error: {0}")]
    Api(String),

    #[error("MTurk response missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid qualification requirement: {0}")]
    InvalidQualification(String),
}

/// Flatten an operation-specific SDK error into [`MturkError::Api`],
/// keeping the service error context in the message.
pub(crate) fn api_err<E, R>(err: SdkError<E, R>) -> MturkError
where
    SdkError<E, R>: std::error::Error,
{
    MturkError::Api(DisplayErrorContext(err).to_string())
}
