//! Uploaded image payloads.

use crate::core::errors::DxResult;
use std::path::Path;

/// An uploaded image: raw bytes plus the filename the caller declared.
///
/// Assets are owned by the caller for the duration of one request and are
/// never persisted by the pipeline.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAsset {
    bytes: Vec<u8>,
    filename: String,
}

impl std::fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAsset")
            .field("filename", &self.filename)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl ImageAsset {
    pub fn new(bytes: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
        }
    }

    /// Reads an image file from disk, using its file name as the declared name.
    pub fn from_path(path: impl AsRef<Path>) -> DxResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
        Ok(Self { bytes, filename })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Joins the declared filenames the way the prediction log stores them.
pub fn joined_filenames(assets: &[ImageAsset]) -> String {
    assets
        .iter()
        .map(ImageAsset::filename)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_path_uses_file_name() {
        let mut file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .unwrap();
        file.write_all(b"not really a png").unwrap();

        let asset = ImageAsset::from_path(file.path()).unwrap();
        assert_eq!(asset.len(), 16);
        assert!(asset.filename().ends_with(".png"));
    }

    #[test]
    fn test_from_path_missing_file() {
        assert!(ImageAsset::from_path("no/such/slide.png").is_err());
    }

    #[test]
    fn test_joined_filenames() {
        let assets = vec![
            ImageAsset::new(vec![1], "a.png"),
            ImageAsset::new(vec![2], "b.tif"),
        ];
        assert_eq!(joined_filenames(&assets), "a.png, b.tif");
        assert_eq!(joined_filenames(&[]), "");
    }

    #[test]
    fn test_debug_hides_payload() {
        let asset = ImageAsset::new(vec![0u8; 1024], "slide.png");
        let debug = format!("{asset:?}");
        assert!(debug.contains("1024"));
        assert!(debug.contains("slide.png"));
    }
}
