//! URL resolution into media descriptors

pub mod provider;
pub mod resolver;

pub use provider::*;
pub use resolver::*;
