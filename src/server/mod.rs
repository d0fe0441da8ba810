//! Preview server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebouncedEvent};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Site;

const LIVE_RELOAD_ROUTE: &str = "/__livereload";

/// Appended before `</body>` of every served page when live reload is on
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(function () {
  var ws = new WebSocket('ws://' + location.host + '/__livereload');
  ws.onmessage = function (msg) {
    if (msg.data === 'reload') {
      location.reload();
    }
  };
  ws.onclose = function () {
    setTimeout(function () { location.reload(); }, 1000);
  };
})();
</script>
"#;

struct ServerState {
    public_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Serve the output directory until interrupted
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        public_dir: site.public_dir.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app = Router::new()
        .route(LIVE_RELOAD_ROUTE, get(livereload_handler))
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    tracing::info!("Serving {:?} at {}", site.public_dir, url);
    if watch {
        tracing::info!("Live reload enabled");
    }

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let site = site.clone();
        // The debouncer delivers on a std channel, so the loop gets its own thread
        std::thread::spawn(move || {
            if let Err(e) = watch_and_rebuild(&site, reload_tx) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Rebuild on content, static or config changes and notify browsers
fn watch_and_rebuild(site: &Site, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for dir in [&site.source_dir, &site.static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }
    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<&DebouncedEvent> =
                    events.iter().filter(|e| is_relevant(&e.path)).collect();
                if changed.is_empty() {
                    continue;
                }
                for event in &changed {
                    tracing::info!("Changed: {:?}", event.path);
                }

                match crate::commands::generate::rebuild(site) {
                    Ok(()) => {
                        let _ = reload_tx.send(());
                    }
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Editor swap files and VCS noise do not trigger rebuilds
fn is_relevant(path: &Path) -> bool {
    let s = path.to_string_lossy();
    !s.contains(".git") && !s.contains(".DS_Store") && !s.ends_with('~') && !s.ends_with(".swp")
}

async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| livereload_socket(socket, reload_rx))
}

async fn livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    loop {
        tokio::select! {
            result = reload_rx.recv() => match result {
                Ok(()) => {
                    if socket.send(Message::Text("reload".to_string())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            msg = socket.recv() => match msg {
                Some(Ok(Message::Ping(data))) => {
                    if socket.send(Message::Pong(data)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                _ => {}
            },
        }
    }
}

/// Pages get the reload script injected; unknown routes get `404.html`
async fn page_handler(State(state): State<Arc<ServerState>>, request: Request<Body>) -> Response {
    match resolve_page(&state.public_dir, request.uri().path()) {
        Some(page) => {
            if !state.live_reload {
                return serve_static(&state.public_dir, request).await;
            }
            match tokio::fs::read_to_string(&page).await {
                Ok(html) => Html(inject_live_reload(&html, true)).into_response(),
                Err(_) => not_found(&state).await,
            }
        }
        None if request.uri().path().ends_with('/') || !has_extension(request.uri().path()) => {
            not_found(&state).await
        }
        None => serve_static(&state.public_dir, request).await,
    }
}

async fn serve_static(public_dir: &Path, request: Request<Body>) -> Response {
    let mut service = ServeDir::new(public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

async fn not_found(state: &ServerState) -> Response {
    match tokio::fs::read_to_string(state.public_dir.join("404.html")).await {
        Ok(html) => (
            StatusCode::NOT_FOUND,
            Html(inject_live_reload(&html, state.live_reload)),
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// The HTML file a request path maps to, if one exists
fn resolve_page(public_dir: &Path, uri_path: &str) -> Option<PathBuf> {
    let clean = uri_path.trim_start_matches('/');
    if clean.split('/').any(|segment| segment == "..") {
        return None;
    }

    let candidate = public_dir.join(clean);
    let page = if candidate.is_dir() {
        candidate.join("index.html")
    } else if has_extension(clean) {
        candidate
    } else {
        public_dir.join(format!("{}.html", clean.trim_end_matches('/')))
    };

    let is_html = page.extension().map(|e| e == "html").unwrap_or(false);
    (is_html && page.is_file()).then_some(page)
}

fn has_extension(path: &str) -> bool {
    Path::new(path).extension().is_some()
}

fn inject_live_reload(html: &str, enabled: bool) -> String {
    if !enabled {
        return html.to_string();
    }
    match html.rfind("</body>") {
        Some(pos) => format!("{}{}{}", &html[..pos], LIVE_RELOAD_SCRIPT, &html[pos..]),
        None => format!("{}{}", html, LIVE_RELOAD_SCRIPT),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_page() {
        let dir = TempDir::new().unwrap();
        let public = dir.path();
        fs::create_dir_all(public.join("blog/post")).unwrap();
        fs::write(public.join("index.html"), "home").unwrap();
        fs::write(public.join("blog/post/index.html"), "post").unwrap();
        fs::write(public.join("404.html"), "missing").unwrap();
        fs::write(public.join("logo.svg"), "<svg/>").unwrap();

        assert_eq!(resolve_page(public, "/"), Some(public.join("index.html")));
        assert_eq!(
            resolve_page(public, "/blog/post/"),
            Some(public.join("blog/post/index.html"))
        );
        assert_eq!(
            resolve_page(public, "/blog/post"),
            Some(public.join("blog/post/index.html"))
        );
        assert_eq!(resolve_page(public, "/404"), Some(public.join("404.html")));
        assert_eq!(resolve_page(public, "/logo.svg"), None);
        assert_eq!(resolve_page(public, "/nope/"), None);
        assert_eq!(resolve_page(public, "/../secret"), None);
    }

    #[test]
    fn test_inject_live_reload() {
        let html = "<html><body><p>x</p></body></html>";
        let injected = inject_live_reload(html, true);
        assert!(injected.contains("__livereload"));
        assert!(injected.ends_with("</body></html>"));
        assert_eq!(inject_live_reload(html, false), html);
    }

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("content/post/index.md")));
        assert!(!is_relevant(Path::new("content/.git/HEAD")));
        assert!(!is_relevant(Path::new("content/post/index.md~")));
    }
}
