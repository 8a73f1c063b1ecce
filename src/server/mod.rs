//! HTTP surface for thin clients
//!
//! Exposes the resolve-and-download contract over JSON: a client posts a
//! media page link, picks a quality from the returned descriptor and asks for
//! a download URL plus filename. Every response carries the
//! `{success, data | error}` envelope; failures use a 4xx status, which
//! clients treat the same as `success:false`.

use crate::core::descriptor::{MediaDescriptor, VariantTag};
use crate::dispatch::{build_filename, DEFAULT_SOURCE_TAG};
use crate::error::FbgetError;
use crate::resolve::Resolver;
use crate::utils::source_tag_of;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    resolver: Arc<dyn Resolver>,
    source_tag: String,
}

impl AppState {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolver,
            source_tag: DEFAULT_SOURCE_TAG.to_string(),
        }
    }

    /// Set the fallback tag for filenames when the link's host yields none
    pub fn with_source_tag(mut self, tag: impl Into<String>) -> Self {
        self.source_tag = tag.into();
        self
    }
}

/// JSON envelope shared by all endpoints
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(error: impl ToString) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub video_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub video_url: String,
    pub quality: String,
    /// Accepted for wire compatibility; the variant determines the format.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPayload {
    pub download_url: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct HealthPayload {
    pub status: &'static str,
    pub message: &'static str,
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/download", post(download))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve the API on the given port
pub async fn serve(state: AppState, port: u16) -> Result<(), FbgetError> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> (StatusCode, Json<Envelope<MediaDescriptor>>) {
    match state.resolver.resolve(&request.video_url).await {
        Ok(descriptor) => {
            info!("Analyzed {} -> {}", request.video_url, descriptor.id);
            (StatusCode::OK, Json(Envelope::ok(descriptor)))
        }
        Err(e) => {
            warn!("Analyze failed for '{}': {}", request.video_url, e);
            (StatusCode::BAD_REQUEST, Json(Envelope::err(e)))
        }
    }
}

async fn download(
    State(state): State<AppState>,
    Json(request): Json<DownloadRequest>,
) -> (StatusCode, Json<Envelope<DownloadPayload>>) {
    let tag = match VariantTag::from_str(&request.quality) {
        Ok(tag) => tag,
        Err(e) => {
            warn!("Download rejected, bad quality '{}'", request.quality);
            return (StatusCode::BAD_REQUEST, Json(Envelope::err(e)));
        }
    };

    let descriptor = match state.resolver.resolve(&request.video_url).await {
        Ok(descriptor) => descriptor,
        Err(e) => {
            warn!("Download failed for '{}': {}", request.video_url, e);
            return (StatusCode::BAD_REQUEST, Json(Envelope::err(e)));
        }
    };

    let Some(locator) = descriptor.locator(tag) else {
        let e = FbgetError::UnresolvedLocator(tag);
        return (StatusCode::BAD_REQUEST, Json(Envelope::err(e)));
    };

    let source = source_tag_of(&descriptor.source_url).unwrap_or_else(|| state.source_tag.clone());
    let payload = DownloadPayload {
        download_url: locator.to_string(),
        filename: build_filename(&source, &descriptor, tag),
    };
    info!("Prepared download {}", payload.filename);
    (StatusCode::OK, Json(Envelope::ok(payload)))
}

async fn health() -> Json<HealthPayload> {
    Json(HealthPayload {
        status: "OK",
        message: "Server running",
    })
}
