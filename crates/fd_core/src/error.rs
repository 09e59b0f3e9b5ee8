use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("empty trajectory")]
    EmptyTrajectory,

    #[error("ragged frame {frame}: {found} columns, expected {expected}")]
    RaggedFrame { frame: usize, expected: usize, found: usize },

    #[error("template '{name}' has {found} points, minimum is {minimum}")]
    TemplateTooSmall { name: String, found: usize, minimum: usize },

    #[error("duplicate template name: {name}")]
    DuplicateTemplate { name: String },

    #[error("invalid phase window: start {start}s is not before end {end}s")]
    InvalidPhaseWindow { start: f32, end: f32 },

    #[error("template library format error: {0}")]
    TemplateFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DetectionError>;
