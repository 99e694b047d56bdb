//! Static file serving from the root directory.
//!
//! HTML files get the reload script injected; directories resolve to their
//! `index.html` or fall back to a generated listing; everything else is
//! delegated to `tower_http`'s `ServeFile`.

use crate::dev::inject::{inject_reload_script, is_html_file};
use crate::dev::SharedState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::io;
use std::path::{Component, Path, PathBuf};
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Characters escaped in listing hrefs.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/');

/// Serve any request not matched by a livedev route.
pub async fn handle_request(State(state): State<SharedState>, request: Request) -> Response {
    let uri_path = request.uri().path().to_string();

    let Some(path) = resolve_path(state.root(), &uri_path) else {
        return not_found(&uri_path);
    };

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(_) if uri_path == "/favicon.ico" => return StatusCode::NO_CONTENT.into_response(),
        Err(_) => return not_found(&uri_path),
    };

    if metadata.is_dir() {
        if !uri_path.ends_with('/') {
            let mut location = format!("{}/", uri_path);
            if let Some(query) = request.uri().query() {
                location.push('?');
                location.push_str(query);
            }
            return Redirect::permanent(&location).into_response();
        }

        let index = path.join("index.html");
        if tokio::fs::metadata(&index)
            .await
            .is_ok_and(|m| m.is_file())
        {
            return serve_html(&index).await;
        }

        return match render_listing(&path, &uri_path).await {
            Ok(html) => html_response(html),
            Err(err) => io_error_response(&uri_path, &err),
        };
    }

    let is_html = path
        .file_name()
        .is_some_and(|name| is_html_file(&name.to_string_lossy()));
    if is_html {
        return serve_html(&path).await;
    }

    let mut response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    };
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

/// Map a request path onto the root directory.
///
/// Returns `None` for paths that are not valid UTF-8 after decoding or that
/// try to leave the root.
pub fn resolve_path(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(uri_path).decode_utf8().ok()?;
    let mut resolved = root.to_path_buf();

    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(resolved)
}

/// Read an HTML file and inject the reload script.
async fn serve_html(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(content) => {
            let html = String::from_utf8_lossy(&content);
            html_response(inject_reload_script(&html))
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Failed to read file");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response()
        }
    }
}

/// Build an HTML listing of a directory.
async fn render_listing(dir: &Path, uri_path: &str) -> io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        entries.push((name, is_dir));
    }
    entries.sort();

    let title = escape_html(&percent_decode_str(uri_path).decode_utf8_lossy());
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Index of {title}</title></head>\n<body>\n<h1>Index of {title}</h1>\n<pre>\n"
    );

    for (name, is_dir) in &entries {
        let suffix = if *is_dir { "/" } else { "" };
        html.push_str(&format!(
            "<a href=\"{}{suffix}\">{}{suffix}</a>\n",
            utf8_percent_encode(name, PATH_SEGMENT),
            escape_html(name),
        ));
    }

    html.push_str("</pre>\n</body>\n</html>\n");
    Ok(html)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn html_response(html: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        html,
    )
        .into_response()
}

fn not_found(uri_path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from(format!("File not found: {}", uri_path)),
    )
        .into_response()
}

fn io_error_response(uri_path: &str, err: &io::Error) -> Response {
    if err.kind() == io::ErrorKind::NotFound {
        return not_found(uri_path);
    }
    tracing::warn!(path = uri_path, error = %err, "Failed to list directory");
    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list directory").into_response()
}
