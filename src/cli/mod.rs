//! Command line interface for fbget

pub mod args;
pub mod output;

pub use args::Args;
