#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Answer parse error: {0}")]
    AnswerParse(String),

    #[error("HIT log error: {0}")]
    HitLog(#[from] std::io::Error),
}
