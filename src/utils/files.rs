use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Build a collision-free on-disk path for an uploaded file, keeping the
/// original name visible after a random prefix.
pub fn stored_path(upload_dir: &str, original_name: &str) -> PathBuf {
    let safe_name = sanitize_file_name(original_name);
    Path::new(upload_dir).join(format!("{}-{}", Uuid::new_v4(), safe_name))
}

/// Strip any path components a client smuggles into the file name.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        "file".to_string()
    } else {
        base.to_string()
    }
}

/// Best-effort removal of stored files. Failures are logged and never
/// propagated: a missing physical file must not block the caller.
pub async fn remove_files(paths: &[String]) {
    for path in paths {
        if let Err(err) = tokio::fs::remove_file(path).await {
            tracing::warn!("failed to remove stored file {}: {}", path, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\temp\\cv.pdf"), "cv.pdf");
        assert_eq!(sanitize_file_name("report.pdf"), "report.pdf");
    }

    #[test]
    fn sanitize_falls_back_on_empty_names() {
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name(".."), "file");
    }

    #[test]
    fn stored_paths_are_unique_per_call() {
        let a = stored_path("uploads", "cv.pdf");
        let b = stored_path("uploads", "cv.pdf");
        assert_ne!(a, b);
        assert!(a.starts_with("uploads"));
    }

    #[tokio::test]
    async fn remove_files_tolerates_missing_paths() {
        // Must not panic or error out on files that are already gone.
        remove_files(&["does-not-exist-1".to_string(), "does-not-exist-2".to_string()]).await;
    }
}
