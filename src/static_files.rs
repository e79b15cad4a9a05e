use std::path::Path;
use tower_http::services::ServeDir;

/// Read-only service over the content directory, mounted at the server root.
/// A record's photo is reachable at `/<photoUrl>`.
pub fn photo_service(content_dir: impl AsRef<Path>) -> ServeDir {
    ServeDir::new(content_dir.as_ref()).append_index_html_on_directories(false)
}
