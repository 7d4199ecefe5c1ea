//! Library components of the `docnorm` command-line runner.

pub mod logging;
pub mod pipeline;
pub mod summary;
