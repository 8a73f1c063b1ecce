//! Utility functions for fbget

pub mod url;

pub use self::url::*;
