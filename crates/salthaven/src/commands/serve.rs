//! Serve command: a small web view of notes from this day in past years.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::{Local, NaiveDate};
use salthaven_notes::{collect_documents, scan, DateMatcher, ScanError};

use super::config::{load_config, DEFAULT_BIND, DEFAULT_PORT};
use super::{resolve_folder, CommandContext, CommandError, Result};
use crate::output::html::render_page;

/// Options for the serve command.
#[derive(Debug)]
pub struct ServeOptions {
    /// Folder from the command line or `SALTHAVEN_FOLDER`.
    pub folder: Option<PathBuf>,
    /// Port from `--port`.
    pub port: Option<u16>,
    /// Address from `--bind`.
    pub bind: Option<String>,
}

/// Shared state for request handlers.
pub struct AppState {
    /// Notes folder scanned on every request.
    pub root: PathBuf,
    /// Log skipped notes.
    pub verbose: bool,
}

/// Executes the serve command. Runs until interrupted.
///
/// # Errors
///
/// Returns an error if the folder does not exist, the config file is
/// invalid, or the address cannot be bound.
pub async fn execute(ctx: &CommandContext, opts: &ServeOptions) -> Result<()> {
    let config = load_config()?;
    let folder = resolve_folder(opts.folder.as_deref(), &config);
    check_folder(&folder)?;

    let port = opts.port.or(config.serve.port).unwrap_or(DEFAULT_PORT);
    let bind = opts
        .bind
        .clone()
        .or_else(|| config.serve.bind.clone())
        .unwrap_or_else(|| DEFAULT_BIND.to_string());
    let addr = format!("{bind}:{port}");

    let state = Arc::new(AppState {
        root: folder.clone(),
        verbose: ctx.verbose,
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CommandError::Server(format!("failed to bind {addr}: {e}")))?;

    log::info!("listening on http://{}", addr);
    if !ctx.quiet {
        println!("Starting server on http://{addr}");
        println!("Serving notes from: {}", folder.display());
        println!("Press Ctrl+C to stop");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CommandError::Server(e.to_string()))
}

/// Builds the HTTP routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .with_state(state)
}

fn check_folder(folder: &Path) -> Result<()> {
    match fs::metadata(folder) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ScanError::RootNotFound {
            path: folder.to_path_buf(),
        }
        .into()),
        Err(source) => Err(ScanError::RootUnreadable {
            path: folder.to_path_buf(),
            source,
        }
        .into()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}

// GET /
async fn index(State(state): State<Arc<AppState>>) -> Response {
    let today = Local::now().date_naive();
    let rendered = tokio::task::spawn_blocking(move || render_index(&state, today)).await;

    match rendered {
        Ok(Ok(page)) => Html(page).into_response(),
        Ok(Err(e)) => {
            log::error!("scan failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error scanning folder: {e}"),
            )
                .into_response()
        }
        Err(e) => {
            log::error!("render task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error rendering page".to_string(),
            )
                .into_response()
        }
    }
}

// GET /health
async fn health() -> &'static str {
    "ok"
}

/// Scans for notes matching `today` in any year and renders the page.
fn render_index(state: &AppState, today: NaiveDate) -> std::result::Result<String, ScanError> {
    let report = scan(&state.root, DateMatcher::SameMonthDay, today, state.verbose)?;
    let (documents, skipped) = collect_documents(&report.matches, state.verbose);

    for diagnostic in report.diagnostics.iter().chain(&skipped) {
        log::warn!("{}", diagnostic);
    }
    log::debug!("rendering {} notes for {}", documents.len(), today);

    Ok(render_page(&state.root, today, &documents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn write_note(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn state(root: &Path) -> AppState {
        AppState {
            root: root.to_path_buf(),
            verbose: false,
        }
    }

    #[test]
    fn test_render_index_sorts_newest_first() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "old.md", "---\ndate: 2019-03-05\ntitle: Old\n---\nolder\n");
        write_note(dir.path(), "new.md", "---\ndate: 2023-03-05\n---\n# New\nnewer\n");
        write_note(dir.path(), "other.md", "---\ndate: 2023-04-01\n---\nnot today\n");

        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let page = render_index(&state(dir.path()), today).unwrap();

        assert!(page.contains("2 entries found"));
        let new = page.find(">New</a>").unwrap();
        let old = page.find(">Old</a>").unwrap();
        assert!(new < old);
        assert!(!page.contains("not today"));
    }

    #[test]
    fn test_render_index_empty() {
        let dir = TempDir::new().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let page = render_index(&state(dir.path()), today).unwrap();
        assert!(page.contains("No notes found for this day"));
    }

    #[test]
    fn test_render_index_missing_root() {
        let dir = TempDir::new().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let result = render_index(&state(&dir.path().join("gone")), today);
        assert!(matches!(result, Err(ScanError::RootNotFound { .. })));
    }

    #[test]
    fn test_check_folder() {
        let dir = TempDir::new().unwrap();
        assert!(check_folder(dir.path()).is_ok());
        assert!(matches!(
            check_folder(&dir.path().join("gone")),
            Err(CommandError::Scan(ScanError::RootNotFound { .. }))
        ));
    }

    async fn get_path(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    async fn spawn_server(root: &Path) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::new(state(root)));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_http_routes() {
        let dir = TempDir::new().unwrap();
        let addr = spawn_server(dir.path()).await;

        let health = get_path(addr, "/health").await;
        assert!(health.starts_with("HTTP/1.1 200"));
        assert!(health.ends_with("ok"));

        let index = get_path(addr, "/").await;
        assert!(index.starts_with("HTTP/1.1 200"));
        assert!(index.contains("text/html"));
        assert!(index.contains("On This Day"));
    }

    #[tokio::test]
    async fn test_http_scan_failure_is_500() {
        let dir = TempDir::new().unwrap();
        let addr = spawn_server(&dir.path().join("gone")).await;

        let response = get_path(addr, "/").await;
        assert!(response.starts_with("HTTP/1.1 500"));
        assert!(response.contains("Error scanning folder"));
    }
}
