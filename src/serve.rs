//! HTTP serving: locale middleware, static pages, and the contact endpoint.
//!
//! `serve` hosts the generated site with the same locale discipline the
//! generator bakes into it: every page URL carries an explicit locale
//! prefix, and the middleware guarantees it. The decision itself is a pure
//! function over the request path ([`decide_path`]) so the policy is unit
//! tested without a running server:
//!
//! - `/tr/...`, `/en/...` — pass through unchanged.
//! - `/api/...`, internal prefixes, and any path whose final segment has a
//!   file extension — pass through (these are not pages).
//! - Everything else, `/` included, redirects to the same path prefixed
//!   with the default locale. An unrecognized prefix like `/fr/...` is not
//!   an error; it falls through to the default-locale rewrite and earns a
//!   not-found only if nothing matches downstream.
//!
//! Requests share nothing mutable: the config and the HTTP client live in an
//! `Arc`'d read-only state, and each request is handled independently on the
//! runtime. The only suspension point is the relay's outbound provider call.

use crate::config::SiteConfig;
use crate::locale::{split_locale_prefix, Locale};
use crate::relay::{self, ContactRequest, ProviderReceipt, RelayError};
use axum::{
    extract::{Request, State},
    http::{header, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

struct AppState {
    config: SiteConfig,
    dist_dir: PathBuf,
    http: reqwest::Client,
}

/// Serve the generated site at `config.server.bind` until shutdown.
pub async fn serve(config: SiteConfig, dist_dir: PathBuf) -> Result<(), ServeError> {
    let bind = config.server.bind.clone();
    let state = Arc::new(AppState {
        config,
        dist_dir,
        http: reqwest::Client::new(),
    });

    let app = Router::new()
        .route("/api/contact", post(contact))
        .fallback(static_page)
        .layer(middleware::from_fn(localize_path))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind.as_str()).await?;
    tracing::info!(addr = %bind, "serving site");
    axum::serve(listener, app).await?;
    Ok(())
}

// ============================================================================
// Locale middleware
// ============================================================================

/// What the middleware does with a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathDecision {
    /// Already locale-prefixed, or excluded from localization.
    Pass,
    /// Page path without a locale: send the client to the prefixed URL.
    Redirect(String),
}

/// Pure locale-prefix policy for one inbound path.
pub fn decide_path(path: &str) -> PathDecision {
    if split_locale_prefix(path).is_some() {
        return PathDecision::Pass;
    }
    // Not pages: API routes, internal prefixes, and anything with a file
    // extension (assets resolve at their canonical un-prefixed paths).
    if path == "/api" || path.starts_with("/api/") || path.starts_with("/_") {
        return PathDecision::Pass;
    }
    if last_segment_has_extension(path) {
        return PathDecision::Pass;
    }
    PathDecision::Redirect(format!("/{}{}", Locale::DEFAULT, path))
}

fn last_segment_has_extension(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'))
}

async fn localize_path(req: Request, next: Next) -> Response {
    match decide_path(req.uri().path()) {
        PathDecision::Pass => next.run(req).await,
        PathDecision::Redirect(target) => {
            tracing::debug!(from = %req.uri().path(), to = %target, "locale redirect");
            Redirect::temporary(&target).into_response()
        }
    }
}

// ============================================================================
// Static pages
// ============================================================================

async fn static_page(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let Some(rel) = sanitize_rel_path(uri.path()) else {
        return not_found(&state, uri.path()).await;
    };

    let mut file = state.dist_dir.join(&rel);
    if !last_segment_has_extension(uri.path()) {
        file.push("index.html");
    }

    match tokio::fs::read(&file).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, content_type(&file))],
            bytes,
        )
            .into_response(),
        Err(_) => not_found(&state, uri.path()).await,
    }
}

/// Serve the locale's 404 page (locale taken from the path prefix, default
/// otherwise), falling back to plain text if the site was built without one.
async fn not_found(state: &AppState, path: &str) -> Response {
    let locale = split_locale_prefix(path)
        .map(|(locale, _)| locale)
        .unwrap_or(Locale::DEFAULT);
    let page = state.dist_dir.join(locale.as_str()).join("404.html");
    match tokio::fs::read(&page).await {
        Ok(bytes) => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            bytes,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

/// Normalize a request path into a safe path relative to the dist root.
/// Rejects anything that would escape it.
fn sanitize_rel_path(path: &str) -> Option<PathBuf> {
    let mut rel = PathBuf::new();
    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => rel.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(rel)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Contact endpoint
// ============================================================================

async fn contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequest>,
) -> Response {
    match handle_contact(&state, req).await {
        Ok(receipt) => success_response(&receipt),
        Err(err) => error_response(err),
    }
}

async fn handle_contact(
    state: &AppState,
    req: ContactRequest,
) -> Result<ProviderReceipt, RelayError> {
    req.validate()?;
    let api_key = relay::api_key(&state.config.contact)?;
    let email = relay::build_email(&state.config.contact, &state.config.site.name, &req);
    let receipt = relay::send(&state.http, &state.config.contact, &api_key, &email).await?;
    tracing::info!(id = %receipt.id, "contact form relayed");
    Ok(receipt)
}

fn success_response(receipt: &ProviderReceipt) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Email sent successfully",
            "id": receipt.id,
        })),
    )
        .into_response()
}

/// Map the relay taxonomy to responses. `Display` is the client-facing
/// message; internal detail goes to the log only.
fn error_response(err: RelayError) -> Response {
    let status = match &err {
        RelayError::Validation(_) => StatusCode::BAD_REQUEST,
        RelayError::Configuration { detail } => {
            tracing::error!(detail = %detail, "contact relay not configured");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        RelayError::Upstream { detail } => {
            tracing::error!(detail = %detail, "email provider call failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
