use thiserror::Error;

use bytering::RingError;

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("ring error: {0}")]
    Ring(#[from] RingError),

    #[error("invalid scenario configuration: {0}")]
    InvalidConfig(&'static str),
}
