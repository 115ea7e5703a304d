//! Post-processing of downloaded attachment bytes.
//!
//! Bytes become either an inline base64 image content item or a file written
//! under the attachment directory.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rmcp::model::Content;
use thiserror::Error;
use url::Url;

/// MIME type reported for inline images. The payload is not inspected.
pub const IMAGE_MIME_TYPE: &str = "image/png";

/// Directory attachments are saved to when none is configured.
pub const DEFAULT_ATTACHMENT_DIR: &str = "./attachments";

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("invalid attachment file name '{0}'")]
    InvalidFileName(String),

    #[error("no file name in download URL '{0}'")]
    NoFileName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Base64-encode bytes as a PNG image content item.
pub fn inline_image(bytes: &[u8]) -> Content {
    Content::image(STANDARD.encode(bytes), IMAGE_MIME_TYPE)
}

/// Final path segment of a download URL, ignoring query and fragment.
///
/// Relative URLs are accepted. The segment is returned as it appears in the
/// URL (percent-encoding is kept).
pub fn file_name_from_url(download_url: &str) -> Result<String, AttachmentError> {
    let placeholder = Url::parse("http://localhost/")
        .map_err(|_| AttachmentError::NoFileName(download_url.to_string()))?;
    let url = placeholder
        .join(download_url.trim())
        .map_err(|_| AttachmentError::NoFileName(download_url.to_string()))?;

    url.path_segments()
        .and_then(Iterator::last)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AttachmentError::NoFileName(download_url.to_string()))
}

/// Reject names that would escape the attachment directory.
pub fn validate_file_name(file_name: &str) -> Result<&str, AttachmentError> {
    let trimmed = file_name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\', '\0']);
    if invalid {
        return Err(AttachmentError::InvalidFileName(file_name.to_string()));
    }
    Ok(trimmed)
}

/// Write bytes to `<output_dir>/<file_name>` and return the absolute path.
///
/// The directory is created if missing and an existing file is overwritten.
pub async fn save_attachment(
    bytes: &[u8],
    file_name: &str,
    output_dir: &Path,
) -> Result<PathBuf, AttachmentError> {
    let file_name = validate_file_name(file_name)?;

    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;

    Ok(tokio::fs::canonicalize(&path).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_strips_query() {
        let name =
            file_name_from_url("https://host/download/attachments/123/diagram.png?version=2")
                .unwrap();
        assert_eq!(name, "diagram.png");
    }

    #[test]
    fn test_file_name_strips_fragment() {
        let name = file_name_from_url("https://host/files/report.pdf#page=3").unwrap();
        assert_eq!(name, "report.pdf");
    }

    #[test]
    fn test_file_name_from_relative_url() {
        let name =
            file_name_from_url("/download/attachments/123/design%20v2.docx?api=v2").unwrap();
        assert_eq!(name, "design%20v2.docx");
    }

    #[test]
    fn test_file_name_missing_for_directory_url() {
        let err = file_name_from_url("https://host/download/attachments/123/").unwrap_err();
        assert!(matches!(err, AttachmentError::NoFileName(_)));
    }

    #[test]
    fn test_validate_file_name() {
        assert_eq!(validate_file_name(" notes.txt ").unwrap(), "notes.txt");
        for bad in ["", "  ", ".", "..", "../etc/passwd", "a/b.png", "a\\b.png"] {
            assert!(validate_file_name(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_inline_image_is_base64_png() {
        let content = inline_image(b"not really a png");
        let image = content.raw.as_image().expect("image content");
        assert_eq!(image.mime_type, IMAGE_MIME_TYPE);
        assert_eq!(image.data, STANDARD.encode(b"not really a png"));
    }

    #[tokio::test]
    async fn test_save_attachment_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let output_dir = temp.path().join("nested").join("attachments");

        let path = save_attachment(b"hello", "hello.txt", &output_dir)
            .await
            .unwrap();

        assert!(path.is_absolute());
        assert!(path.ends_with("nested/attachments/hello.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_save_attachment_overwrites() {
        let temp = tempfile::tempdir().unwrap();

        save_attachment(b"first version", "a.bin", temp.path())
            .await
            .unwrap();
        let path = save_attachment(b"second", "a.bin", temp.path())
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_save_attachment_rejects_traversal() {
        let temp = tempfile::tempdir().unwrap();
        let err = save_attachment(b"x", "../escape.txt", temp.path())
            .await
            .unwrap_err();
        assert!(matches!(err, AttachmentError::InvalidFileName(_)));
        assert!(!temp.path().join("..").join("escape.txt").exists());
    }
}
