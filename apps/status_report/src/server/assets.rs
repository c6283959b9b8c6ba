//! Static files of the wasm bundle.

use moj_router::Reply;
use std::path::{Component, Path, PathBuf};

pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Resolve `relative` under `root`, refusing anything that could leave it.
pub fn resolve(root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);

    if relative
        .components()
        .any(|part| !matches!(part, Component::Normal(_)))
    {
        return None;
    }

    Some(root.join(relative))
}

pub async fn serve(root: &Path, relative: &str) -> Reply {
    let Some(path) = resolve(root, relative) else {
        return Reply::not_found();
    };

    match tokio::fs::read(&path).await {
        Ok(content) => Reply::new(200, content_type(&path), content),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Reply::not_found(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read static file");
            Reply::new(500, "text/plain; charset=utf-8", "Error reading file")
        }
    }
}
