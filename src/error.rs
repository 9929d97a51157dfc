use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Error parsing response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// The three stages of a transfer run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Scrape,
    Forward,
    Verify,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Scrape => "scrape",
            Step::Forward => "forward",
            Step::Verify => "verify",
        };
        f.write_str(name)
    }
}

/// An error tagged with the step that produced it.
#[derive(Debug, thiserror::Error)]
#[error("{step} step failed: {error}")]
pub struct StepFailure {
    pub step: Step,
    #[source]
    pub error: AppError,
}

impl StepFailure {
    pub fn new(step: Step, error: AppError) -> Self {
        Self { step, error }
    }
}

/// Attaches a [`Step`] to the error side of a [`Result`].
pub trait AtStep<T> {
    fn at(self, step: Step) -> std::result::Result<T, StepFailure>;
}

impl<T> AtStep<T> for Result<T> {
    fn at(self, step: Step) -> std::result::Result<T, StepFailure> {
        self.map_err(|error| StepFailure::new(step, error))
    }
}
