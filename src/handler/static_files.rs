//! Static file serving module
//!
//! Maps a request path onto the document root and loads the file.

use crate::config::AppState;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, Uri};
use percent_encoding::percent_decode_str;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Outcome of mapping a request path onto the document root
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    File(PathBuf),
    /// Directory requested without a trailing slash; value is the new location
    Redirect(String),
    NotFound,
}

/// Serve a GET or HEAD request from the document root
pub async fn serve(uri: &Uri, is_head: bool, state: &AppState) -> Response<Full<Bytes>> {
    match resolve(state.root(), uri, state.index_files()) {
        Resolution::File(path) => serve_file(&path, is_head).await,
        Resolution::Redirect(location) => http::build_redirect_response(&location),
        Resolution::NotFound => http::build_404_response(),
    }
}

async fn serve_file(path: &Path, is_head: bool) -> Response<Full<Bytes>> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return http::build_500_response();
        }
    };

    let last_modified = fs::metadata(path).await.and_then(|m| m.modified()).ok();

    http::build_file_response(
        Bytes::from(content),
        mime::content_type_for(path),
        last_modified,
        is_head,
    )
}

/// Resolve `uri` below `root` (which must already be canonical)
///
/// The query string is ignored and the path is percent-decoded. Any `..`
/// segment, or a target whose canonical path leaves `root`, is `NotFound`.
pub fn resolve(root: &Path, uri: &Uri, index_files: &[String]) -> Resolution {
    let raw_path = uri.path();
    let Ok(decoded) = percent_decode_str(raw_path).decode_utf8() else {
        return Resolution::NotFound;
    };

    let mut file_path = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Resolution::NotFound,
            s if s.contains('\\') || s.contains('\0') => return Resolution::NotFound,
            s => file_path.push(s),
        }
    }

    if file_path.is_dir() {
        if !raw_path.ends_with('/') {
            // A leading `//` would make the location protocol-relative
            let path = raw_path.trim_start_matches('/');
            let location = match uri.query() {
                Some(q) => format!("/{path}/?{q}"),
                None => format!("/{path}/"),
            };
            return Resolution::Redirect(location);
        }
        match index_files
            .iter()
            .map(|name| file_path.join(name))
            .find(|candidate| candidate.is_file())
        {
            Some(index) => file_path = index,
            None => return Resolution::NotFound,
        }
    } else if raw_path.ends_with('/') {
        // `/page.html/` names a directory that does not exist
        return Resolution::NotFound;
    }

    // File not found is common (404), no need to log
    let Ok(canonical) = file_path.canonicalize() else {
        return Resolution::NotFound;
    };
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {raw_path} -> {}",
            canonical.display()
        ));
        return Resolution::NotFound;
    }
    if !canonical.is_file() {
        return Resolution::NotFound;
    }

    Resolution::File(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn index_files() -> Vec<String> {
        vec!["index.html".to_string(), "index.htm".to_string()]
    }

    fn site() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("index.html"), "<h1>home</h1>").unwrap();
        fs::create_dir(root.join("docs")).unwrap();
        fs::write(root.join("docs/index.htm"), "docs").unwrap();
        fs::create_dir(root.join("empty")).unwrap();
        fs::write(root.join("my file.txt"), "spaced").unwrap();
        (dir, root)
    }

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn test_resolve_existing_file_ignores_query() {
        let (_dir, root) = site();
        assert_eq!(
            resolve(&root, &uri("/index.html?cache=bust"), &index_files()),
            Resolution::File(root.join("index.html"))
        );
    }

    #[test]
    fn test_resolve_percent_encoded_name() {
        let (_dir, root) = site();
        assert_eq!(
            resolve(&root, &uri("/my%20file.txt"), &index_files()),
            Resolution::File(root.join("my file.txt"))
        );
    }

    #[test]
    fn test_resolve_directory_index() {
        let (_dir, root) = site();
        assert_eq!(
            resolve(&root, &uri("/"), &index_files()),
            Resolution::File(root.join("index.html"))
        );
        assert_eq!(
            resolve(&root, &uri("/docs/"), &index_files()),
            Resolution::File(root.join("docs/index.htm"))
        );
        assert_eq!(
            resolve(&root, &uri("/empty/"), &index_files()),
            Resolution::NotFound
        );
    }

    #[test]
    fn test_resolve_directory_without_slash_redirects() {
        let (_dir, root) = site();
        assert_eq!(
            resolve(&root, &uri("/docs?x=1"), &index_files()),
            Resolution::Redirect("/docs/?x=1".to_string())
        );
    }

    #[test]
    fn test_resolve_missing_and_escaping_paths() {
        let (_dir, root) = site();
        assert_eq!(
            resolve(&root, &uri("/missing.js"), &index_files()),
            Resolution::NotFound
        );
        assert_eq!(
            resolve(&root, &uri("/../etc/passwd"), &index_files()),
            Resolution::NotFound
        );
        assert_eq!(
            resolve(&root, &uri("/docs/%2e%2e/%2e%2e/etc/passwd"), &index_files()),
            Resolution::NotFound
        );
    }

    #[test]
    fn test_redirect_location_stays_on_this_host() {
        let (_dir, root) = site();
        fs::create_dir(root.join("evil.com")).unwrap();
        assert_eq!(
            resolve(&root, &uri("//evil.com"), &index_files()),
            Resolution::Redirect("/evil.com/".to_string())
        );
        assert_eq!(
            resolve(&root, &uri("///docs?x=1"), &index_files()),
            Resolution::Redirect("/docs/?x=1".to_string())
        );
    }

    #[test]
    fn test_trailing_slash_on_file_is_not_found() {
        let (_dir, root) = site();
        assert_eq!(
            resolve(&root, &uri("/index.html/"), &index_files()),
            Resolution::NotFound
        );
        assert_eq!(
            resolve(&root, &uri("/my%20file.txt/"), &index_files()),
            Resolution::NotFound
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_symlink_out_of_root() {
        let (_dir, root) = site();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), root.join("link.txt"))
            .unwrap();

        assert_eq!(
            resolve(&root, &uri("/link.txt"), &index_files()),
            Resolution::NotFound
        );
    }
}
