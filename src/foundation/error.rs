/// Convenience result type used across panelwright.
pub type PanelwrightResult<T> = Result<T, PanelwrightError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Convention warnings from the shot-progression validator are values, not
/// errors; they never appear here.
#[derive(thiserror::Error, Debug)]
pub enum PanelwrightError {
    /// Invalid user-provided panel data (bad enumeration label, dangling
    /// `connects_to`, duplicate panel ids).
    #[error("validation error: {0}")]
    Validation(String),

    /// Structural failures of the sequence itself: empty story, duplicate
    /// or non-increasing `sequence` values.
    #[error("sequencing error: {0}")]
    Sequencing(String),

    /// A composition field the directive generator depends on is unset,
    /// i.e. the panel never passed enrichment.
    #[error("panel \"{panel_id}\": missing enriched field `{field}`")]
    MissingField {
        /// Id of the offending panel.
        panel_id: String,
        /// Name of the unset field.
        field: &'static str,
    },

    /// Errors when serializing or deserializing panel data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanelwrightError {
    /// Build a [`PanelwrightError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PanelwrightError::Sequencing`] value.
    pub fn sequencing(msg: impl Into<String>) -> Self {
        Self::Sequencing(msg.into())
    }

    /// Build a [`PanelwrightError::MissingField`] value.
    pub fn missing_field(panel_id: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            panel_id: panel_id.into(),
            field,
        }
    }

    /// Build a [`PanelwrightError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
