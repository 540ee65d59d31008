pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("discipline document JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no analyzed file with id {id}")]
    NotFound { id: String },

    #[error("none of the requested files were found: {ids:?}")]
    NoneFound { ids: Vec<String> },
}
