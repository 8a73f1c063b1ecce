//! Session controller state machine
//!
//! Sequences the workflow from raw input URL to completed download:
//! `Idle -> Resolving -> Resolved -> Downloading -> Completed`, with `Failed`
//! as the landing state for resolution errors. The controller is the sole
//! owner of the session state, applies one transition at a time, and converts
//! every failure into an error notification instead of letting it escape.

use crate::core::descriptor::{MediaDescriptor, VariantTag};
use crate::dispatch::{CompletionRecord, DownloadDispatcher, TransferAgent};
use crate::error::FbgetError;
use crate::notify::{NotificationCenter, Severity};
use crate::resolve::Resolver;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Workflow phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Resolving,
    Resolved,
    Downloading,
    Completed,
    Failed,
}

/// Complete state of one user session.
///
/// Replaced wholesale on each transition; never partially mutated by two
/// callers at once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub phase: Phase,
    pub descriptor: Option<MediaDescriptor>,
    pub selected_variant: Option<VariantTag>,
    pub last_download: Option<CompletionRecord>,
}

/// Client-side controller driving the resolve-and-download workflow.
///
/// Overlapping `analyze`/`download` calls are rejected rather than queued, so
/// at most one resolution and one download are ever in flight. Any front end
/// (CLI, HTTP client, test harness) can call the operations; user-visible
/// outcomes are published through the notification center.
pub struct SessionController<R: Resolver, A: TransferAgent> {
    state: Mutex<SessionState>,
    resolver: R,
    dispatcher: DownloadDispatcher<A>,
    notifier: NotificationCenter,
}

impl<R: Resolver, A: TransferAgent> SessionController<R, A> {
    pub fn new(
        resolver: R,
        dispatcher: DownloadDispatcher<A>,
        notifier: NotificationCenter,
    ) -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
            resolver,
            dispatcher,
            notifier,
        }
    }

    /// Snapshot of the current session state
    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// The notification center this session publishes to
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifier
    }

    /// Resolve a submitted link into a media descriptor.
    ///
    /// Guarded: no resolution or download may be in flight, and the URL must
    /// be non-blank. On success the session moves to `Resolved` with a fresh
    /// descriptor and cleared selection; on resolver failure it moves to
    /// `Failed` (re-enterable, `analyze` and `reset` both accepted there).
    pub async fn analyze(&self, url: &str) -> Phase {
        {
            let mut state = self.state.lock().await;

            match state.phase {
                Phase::Idle | Phase::Failed => {}
                Phase::Resolving => {
                    self.reject(FbgetError::GuardViolation(
                        "Analysis already in progress".to_string(),
                    ));
                    return state.phase;
                }
                Phase::Downloading => {
                    self.reject(FbgetError::GuardViolation(
                        "Cannot analyze while a download is in progress".to_string(),
                    ));
                    return state.phase;
                }
                Phase::Resolved | Phase::Completed => {
                    self.reject(FbgetError::GuardViolation(
                        "Reset the session before analyzing a new link".to_string(),
                    ));
                    return state.phase;
                }
            }

            if url.trim().is_empty() {
                self.reject(FbgetError::InvalidInput(
                    "Please paste a media link first".to_string(),
                ));
                return state.phase;
            }

            info!("Analyzing {}", url.trim());
            state.phase = Phase::Resolving;
        }

        // Lock released while the resolver may suspend; a concurrent call
        // observes `Resolving` and is rejected above.
        let outcome = self.resolver.resolve(url).await;

        let mut state = self.state.lock().await;
        match outcome.and_then(|d| d.validate().map(|_| d)) {
            Ok(descriptor) => {
                debug!("Resolved descriptor {}", descriptor.id);
                *state = SessionState {
                    phase: Phase::Resolved,
                    descriptor: Some(descriptor),
                    selected_variant: None,
                    last_download: None,
                };
                self.notifier
                    .notify("Video analyzed successfully!", Severity::Success);
            }
            Err(e) => {
                warn!("Resolution failed: {}", e);
                *state = SessionState {
                    phase: Phase::Failed,
                    ..SessionState::default()
                };
                self.notifier.notify(e.to_string(), Severity::Error);
            }
        }
        state.phase
    }

    /// Choose one of the resolved variants.
    ///
    /// A tag the descriptor does not offer is a no-op that emits an error
    /// notification; the previous selection stays in place.
    pub async fn select_variant(&self, tag: VariantTag) -> Phase {
        let mut state = self.state.lock().await;

        let Some(descriptor) = state.descriptor.as_ref() else {
            self.reject(FbgetError::GuardViolation(
                "Analyze a video before selecting a format".to_string(),
            ));
            return state.phase;
        };

        if state.phase != Phase::Resolved {
            self.reject(FbgetError::GuardViolation(format!(
                "Cannot change format in the current step ({:?})",
                state.phase
            )));
            return state.phase;
        }

        if !descriptor.has_variant(tag) {
            self.reject(FbgetError::GuardViolation(format!(
                "Format '{}' is not available for this video",
                tag
            )));
            return state.phase;
        }

        state.selected_variant = Some(tag);
        info!("Variant {} selected", tag);
        self.notifier.notify(
            format!("Format {} selected", tag.quality_label()),
            Severity::Info,
        );
        state.phase
    }

    /// Download the selected variant.
    ///
    /// Guarded: requires a descriptor, a selection, and no download already
    /// in flight. Allowed from `Completed` to repeat the stored variant. On
    /// dispatch failure the session returns to `Resolved` with the selection
    /// retained.
    pub async fn download(&self) -> Phase {
        let (descriptor, tag) = {
            let mut state = self.state.lock().await;

            match state.phase {
                Phase::Resolved | Phase::Completed => {}
                Phase::Downloading => {
                    self.reject(FbgetError::GuardViolation(
                        "A download is already in progress".to_string(),
                    ));
                    return state.phase;
                }
                _ => {
                    self.reject(FbgetError::GuardViolation(
                        "Analyze a video before downloading".to_string(),
                    ));
                    return state.phase;
                }
            }

            let (Some(descriptor), Some(tag)) =
                (state.descriptor.clone(), state.selected_variant)
            else {
                self.reject(FbgetError::GuardViolation(
                    "Select a format before downloading".to_string(),
                ));
                return state.phase;
            };

            state.phase = Phase::Downloading;
            (descriptor, tag)
        };

        let outcome = self.dispatcher.dispatch(&descriptor, tag).await;

        let mut state = self.state.lock().await;
        match outcome {
            Ok(record) => {
                info!("Download started: {}", record.filename);
                state.phase = Phase::Completed;
                state.last_download = Some(record);
                self.notifier.notify("Download started!", Severity::Success);
            }
            Err(e) => {
                warn!("Dispatch failed: {}", e);
                // Selection retained so the user can simply retry.
                state.phase = Phase::Resolved;
                self.notifier.notify(e.to_string(), Severity::Error);
            }
        }
        state.phase
    }

    /// Discard the descriptor, selection and completion record and return to
    /// `Idle`. Rejected while a resolution or download is pending, since
    /// in-flight work cannot be cancelled.
    pub async fn reset(&self) -> Phase {
        let mut state = self.state.lock().await;

        if matches!(state.phase, Phase::Resolving | Phase::Downloading) {
            self.reject(FbgetError::GuardViolation(
                "Cannot reset while an operation is in progress".to_string(),
            ));
            return state.phase;
        }

        *state = SessionState::default();
        info!("Session reset");
        self.notifier
            .notify("Ready for a new video!", Severity::Info);
        state.phase
    }

    fn reject(&self, err: FbgetError) {
        warn!("Rejected action: {}", err);
        self.notifier.notify(err.to_string(), Severity::Error);
    }
}
