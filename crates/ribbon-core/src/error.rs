use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid field config: {0}")]
    InvalidConfig(String),

    /// The host could not provide a drawing context; mounting is aborted.
    #[error("render surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("event host rejected subscription: {0}")]
    Host(String),

    #[error("frame scheduler refused a frame: {0}")]
    Scheduler(String),
}

pub type FieldResult<T> = Result<T, FieldError>;
