//! Errors

pub type RasterResult<T> = Result<T, RasterError>;

#[derive(thiserror::Error,Debug)]
pub enum RasterError {
    /// A configuration value was rejected before any rendering
    #[error("configuration error: {0}")]
    Config(String),

    /// Geometry the stroke sequence cannot handle
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A stroke transformer produced something other than paths or contours
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Numeric computation did not produce a usable value
    #[error("numerical non-convergence: {0}")]
    NonConvergence(String),

    #[error("worker pool error: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl RasterError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn non_convergence(msg: impl Into<String>) -> Self {
        Self::NonConvergence(msg.into())
    }

    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }

    /// True for errors caused by the caller handing in bad values
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidArgument(_) | Self::InvalidOperation(_)
        )
    }
}
