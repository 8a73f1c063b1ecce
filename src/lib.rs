//! # fbget - Media Link Resolver and Downloader
//!
//! Resolves a submitted media page link into a set of quality/format
//! variants, lets the caller pick one, and triggers the download — all
//! sequenced by a guarded session state machine.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fbget::core::{SessionController, VariantTag};
//! use fbget::dispatch::{DownloadDispatcher, HttpTransferAgent};
//! use fbget::notify::NotificationCenter;
//! use fbget::resolve::{PlaceholderResolver, StaticResourceProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = SessionController::new(
//!         PlaceholderResolver::new(StaticResourceProvider),
//!         DownloadDispatcher::new(HttpTransferAgent::new()).with_source_tag("facebook"),
//!         NotificationCenter::new(),
//!     );
//!
//!     session.analyze("https://www.facebook.com/watch/?v=123").await;
//!     session.select_variant(VariantTag::Hd).await;
//!     session.download().await;
//! }
//! ```

pub mod cli;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod notify;
pub mod resolve;
pub mod server;
pub mod utils;

// Re-export main types
pub use crate::core::{MediaDescriptor, Phase, SessionController, SessionState, VariantTag};
pub use crate::dispatch::{CompletionRecord, DownloadDispatcher, HttpTransferAgent, TransferAgent};
pub use crate::error::FbgetError;
pub use crate::notify::{Notification, NotificationCenter, Severity};
pub use crate::resolve::{PlaceholderResolver, Resolver, StaticResourceProvider};

/// Result type alias for fbget operations
pub type Result<T> = std::result::Result<T, FbgetError>;
