use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read `{source_name}`: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("`{source_name}` returned HTTP {status}")]
    UpstreamStatus { source_name: String, status: u16 },

    #[error("`{source_name}` is malformed: {reason}")]
    Malformed { source_name: String, reason: String },
}
