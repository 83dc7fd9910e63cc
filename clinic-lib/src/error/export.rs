//! Export errors

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Export was requested with an empty selection.
    #[error("select items before exporting")]
    NothingSelected,

    #[error("unknown export format '{0}' (expected csv or json)")]
    UnknownFormat(String),

    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}
