//! Error types for the kinematics library.

use core::fmt;

/// Errors that can occur in kinematic calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Returned when a wheelbase is provided that is not positive.
    InvalidWheelbase(&'static str),
    /// Returned when an integration is requested over a negative or non-finite duration.
    InvalidTimeDelta(&'static str),
    /// Returned when the sampling step of an integration is not positive.
    InvalidSampleStep(&'static str),
    /// Returned when an integration would need more substeps than the given limit.
    TooManySubsteps(usize),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidWheelbase(msg) => write!(f, "Invalid wheelbase: {}", msg),
            KinematicsError::InvalidTimeDelta(msg) => write!(f, "Invalid time delta: {}", msg),
            KinematicsError::InvalidSampleStep(msg) => write!(f, "Invalid sample step: {}", msg),
            KinematicsError::TooManySubsteps(limit) => {
                write!(f, "Integration needs more than {} substeps", limit)
            }
        }
    }
}

impl core::error::Error for KinematicsError {}
