//! Service Module
//!
//! The submission flow: template resolution, run submission and the
//! dispatch entry points that sequence them.

pub mod dispatch;
pub mod error;
pub mod resolver;
pub mod submitter;

pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use submitter::SubmissionReport;
