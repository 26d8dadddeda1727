use super::{ImageStore, JPEG_QUALITY, MAX_IMAGE_DIMENSION};
use crate::error::{CatalogError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// File-backed image store over one flat managed directory.
pub struct FsImageStore {
    dir: PathBuf,
    max_dimension: u32,
    quality: u8,
}

impl FsImageStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            max_dimension: MAX_IMAGE_DIMENSION,
            quality: JPEG_QUALITY,
        }
    }

    pub fn with_limits(mut self, max_dimension: u32, quality: u8) -> Self {
        self.max_dimension = max_dimension;
        self.quality = quality;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn fresh_name() -> String {
        format!("{}.jpg", Uuid::new_v4())
    }

    fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let tmp_path = self.dir.join(format!(".img-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, bytes).map_err(CatalogError::Io)?;
        fs::rename(&tmp_path, self.dir.join(name)).map_err(CatalogError::Io)?;
        Ok(())
    }

    /// Re-encode image bytes: bound the longest edge, compress as JPEG.
    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let img = image::load_from_memory(bytes)?;
        let img = if img.width() > self.max_dimension || img.height() > self.max_dimension {
            img.resize(self.max_dimension, self.max_dimension, FilterType::Lanczos3)
        } else {
            img
        };
        // JPEG has no alpha channel.
        let img = DynamicImage::ImageRgb8(img.to_rgb8());

        let mut out = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut out, self.quality);
        img.write_with_encoder(encoder)?;
        Ok(out)
    }
}

impl ImageStore for FsImageStore {
    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(CatalogError::Io)?;
        }
        Ok(())
    }

    fn save(&self, source: &Path) -> Result<String> {
        self.ensure_dir()?;

        let bytes = fs::read(source).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => CatalogError::PermissionDenied(format!(
                "Cannot read image {}",
                source.display()
            )),
            _ => CatalogError::Io(e),
        })?;

        let encoded = match self.compress(&bytes) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(source = %source.display(), %err, "image re-encode failed, storing source bytes verbatim");
                bytes
            }
        };

        let name = Self::fresh_name();
        self.write_atomic(&name, &encoded)?;
        Ok(name)
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.resolve(name);
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CatalogError::Io(e)),
        }
    }

    fn orphans(&self, live: &HashSet<String>) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(CatalogError::Io)? {
            let entry = entry.map_err(CatalogError::Io)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                // Leftover tmp files from an interrupted write count as
                // orphans too.
                if !live.contains(name) {
                    found.push(name.to_string());
                }
            }
        }
        Ok(found)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        fs::read(self.resolve(name)).map_err(CatalogError::Io)
    }

    fn write(&self, bytes: &[u8]) -> Result<String> {
        self.ensure_dir()?;
        let name = Self::fresh_name();
        self.write_atomic(&name, bytes)?;
        Ok(name)
    }
}
