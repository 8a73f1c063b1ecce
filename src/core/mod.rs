//! Core functionality for fbget

pub mod descriptor;
pub mod session;

pub use descriptor::*;
pub use session::*;
