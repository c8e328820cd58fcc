//! Classification of library errors into stable, serializable codes.
//!
//! Reports carry a [`Failure`] per comparison instead of aborting, so every
//! error the engine can raise maps to exactly one [`ErrorCode`].

use xrr_metric::XrrError;
use xrr_summary::SummaryError;
use xrr_types::{ErrorCode, Failure};

/// Errors that can be reported as a [`Failure`].
pub trait Classify: std::fmt::Display {
    fn error_code(&self) -> ErrorCode;

    fn to_failure(&self) -> Failure {
        Failure::new(self.error_code(), self.to_string())
    }
}

impl Classify for XrrError {
    fn error_code(&self) -> ErrorCode {
        match self {
            XrrError::NoOverlappingItems => ErrorCode::NoOverlappingItems,
            XrrError::NoExpectedDisagreement => ErrorCode::NoExpectedDisagreement,
            XrrError::NonFinite { .. } => ErrorCode::NonFiniteScore,
            XrrError::Distance(_) => ErrorCode::InvalidDistanceDomain,
        }
    }
}

impl Classify for SummaryError {
    fn error_code(&self) -> ErrorCode {
        match self {
            SummaryError::EmptyItem { .. } => ErrorCode::DataIntegrity,
        }
    }
}
