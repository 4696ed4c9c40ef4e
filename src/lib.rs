// Library exports for zoro
// The binary and the integration tests both go through these modules.

pub mod config;
pub mod error;
pub mod runner;
pub mod spinner;

pub use error::{Result, SpinnerError};
pub use spinner::{Display, Spinner, SpinnerOption};
