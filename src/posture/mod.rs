//! Yoga posture detection placeholder.
//!
//! Uploads go through [`ImageUpload::open`], which only accepts jpg/jpeg/png
//! files; nothing else can reach [`analyze`]. The analysis itself is canned:
//! no model runs here.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::UploadError;

pub mod discover;

pub use discover::discover_image_files;

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub const ANALYZING: &str = "Analyzing posture...";
pub const PENDING_WARNING: &str =
    "Posture analysis functionality would be implemented here with proper model integration";
pub const RESULT_LINES: [&str; 4] = [
    "Posture Analysis Results:",
    "- Alignment: Good",
    "- Balance: Needs improvement",
    "- Suggested correction: Straighten your back",
];
/// Where the full real-time detector lives.
pub const DETECTOR_URL: &str = "https://urban-yogi-yoga-detection.streamlit.app/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn display_name(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
        }
    }
}

/// Classify a path by extension, case-insensitively.
pub fn accepted_format(path: &Path) -> Result<ImageFormat, UploadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        _ => Err(UploadError::UnsupportedType { ext }),
    }
}

/// An accepted image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    path: PathBuf,
    format: ImageFormat,
    byte_len: u64,
    /// `(width, height)` when the header could be read.
    dimensions: Option<(u32, u32)>,
}

impl ImageUpload {
    pub fn open(path: &Path) -> Result<Self, UploadError> {
        let format = accepted_format(path)?;
        if !path.exists() {
            return Err(UploadError::NotFound(path.to_path_buf()));
        }
        if path.is_dir() {
            return Err(UploadError::IsDirectory(path.to_path_buf()));
        }
        let bytes = fs::read(path).map_err(|e| UploadError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let dimensions = match format {
            ImageFormat::Png => png_dimensions(&bytes),
            ImageFormat::Jpeg => jpeg_dimensions(&bytes),
        };
        Ok(Self {
            path: path.to_path_buf(),
            format,
            byte_len: bytes.len() as u64,
            dimensions,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// One-line description, e.g. `pose.png (PNG, 640x480, 12.3 KiB)`.
    pub fn summary(&self) -> String {
        let dims = self
            .dimensions
            .map(|(w, h)| format!("{w}x{h}"))
            .unwrap_or_else(|| "size unknown".to_string());
        format!(
            "{} ({}, {dims}, {})",
            self.file_name(),
            self.format.display_name(),
            human_bytes(self.byte_len)
        )
    }
}

/// Result of the placeholder analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct PostureReport {
    pub image: ImageUpload,
    pub notice: &'static str,
    pub warning: &'static str,
    pub lines: [&'static str; 4],
}

/// Canned result; the image content is not inspected.
pub fn analyze(upload: &ImageUpload) -> PostureReport {
    info!(file = %upload.path().display(), "posture analysis placeholder");
    PostureReport {
        image: upload.clone(),
        notice: ANALYZING,
        warning: PENDING_WARNING,
        lines: RESULT_LINES,
    }
}

fn human_bytes(n: u64) -> String {
    if n < 1024 {
        format!("{n} B")
    } else if n < 1024 * 1024 {
        format!("{:.1} KiB", n as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", n as f64 / (1024.0 * 1024.0))
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn png_dimensions(b: &[u8]) -> Option<(u32, u32)> {
    if b.len() < 24 || b[..8] != PNG_SIGNATURE || &b[12..16] != b"IHDR" {
        return None;
    }
    let w = u32::from_be_bytes([b[16], b[17], b[18], b[19]]);
    let h = u32::from_be_bytes([b[20], b[21], b[22], b[23]]);
    Some((w, h))
}

/// Scan JPEG segments up to the first start-of-frame marker.
fn jpeg_dimensions(b: &[u8]) -> Option<(u32, u32)> {
    if b.len() < 4 || b[0] != 0xFF || b[1] != 0xD8 {
        return None;
    }
    let mut i = 2;
    while i + 4 <= b.len() {
        if b[i] != 0xFF {
            return None;
        }
        let marker = b[i + 1];
        match marker {
            // fill byte
            0xFF => {
                i += 1;
                continue;
            }
            // markers without a length field
            0x01 | 0xD0..=0xD8 => {
                i += 2;
                continue;
            }
            // end of image / start of scan before any frame header
            0xD9 | 0xDA => return None,
            _ => {}
        }

        let len = usize::from(u16::from_be_bytes([b[i + 2], b[i + 3]]));
        if len < 2 {
            return None;
        }
        let is_frame = (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_frame {
            if i + 9 > b.len() {
                return None;
            }
            let h = u16::from_be_bytes([b[i + 5], b[i + 6]]);
            let w = u16::from_be_bytes([b[i + 7], b[i + 8]]);
            return Some((u32::from(w), u32::from(h)));
        }
        i += 2 + len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header(w: u32, h: u32) -> Vec<u8> {
        let mut b = PNG_SIGNATURE.to_vec();
        b.extend_from_slice(&13u32.to_be_bytes());
        b.extend_from_slice(b"IHDR");
        b.extend_from_slice(&w.to_be_bytes());
        b.extend_from_slice(&h.to_be_bytes());
        b.extend_from_slice(&[8, 6, 0, 0, 0]);
        b
    }

    fn jpeg_header(w: u16, h: u16) -> Vec<u8> {
        let mut b = vec![0xFF, 0xD8];
        // APP0 segment with a 4-byte payload
        b.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x06, b'J', b'F', b'I', b'F']);
        // SOF0: len, precision, height, width, components
        b.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x0B, 0x08]);
        b.extend_from_slice(&h.to_be_bytes());
        b.extend_from_slice(&w.to_be_bytes());
        b.extend_from_slice(&[0x01, 0x01, 0x11, 0x00]);
        b.extend_from_slice(&[0xFF, 0xD9]);
        b
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert_eq!(accepted_format(Path::new("a/b.PNG")), Ok(ImageFormat::Png));
        assert_eq!(accepted_format(Path::new("pose.JpEg")), Ok(ImageFormat::Jpeg));
        assert_eq!(accepted_format(Path::new("pose.jpg")), Ok(ImageFormat::Jpeg));
    }

    #[test]
    fn non_images_are_rejected_before_touching_the_file() {
        // The file does not exist; the type check must fire first.
        let err = ImageUpload::open(Path::new("nowhere/notes.txt")).unwrap_err();
        assert_eq!(err, UploadError::UnsupportedType { ext: "txt".into() });
        let err = ImageUpload::open(Path::new("nowhere/README")).unwrap_err();
        assert_eq!(err, UploadError::UnsupportedType { ext: String::new() });
    }

    #[test]
    fn missing_image_is_not_found() {
        let err = ImageUpload::open(Path::new("nowhere/pose.png")).unwrap_err();
        assert!(matches!(err, UploadError::NotFound(_)));
    }

    #[test]
    fn reads_png_and_jpeg_dimensions() {
        assert_eq!(png_dimensions(&png_header(640, 480)), Some((640, 480)));
        assert_eq!(jpeg_dimensions(&jpeg_header(1024, 768)), Some((1024, 768)));
        assert_eq!(png_dimensions(b"not a png at all, really not"), None);
        assert_eq!(jpeg_dimensions(&[0xFF, 0xD8, 0xFF, 0xD9]), None);
    }

    #[test]
    fn upload_then_canned_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warrior.png");
        fs::write(&path, png_header(320, 200)).unwrap();

        let upload = ImageUpload::open(&path).unwrap();
        assert_eq!(upload.format(), ImageFormat::Png);
        assert_eq!(upload.dimensions(), Some((320, 200)));
        assert_eq!(upload.summary(), "warrior.png (PNG, 320x200, 29 B)");

        let report = analyze(&upload);
        assert_eq!(report.notice, "Analyzing posture...");
        assert_eq!(report.lines[0], "Posture Analysis Results:");
        assert_eq!(report.lines[3], "- Suggested correction: Straighten your back");
    }

    #[test]
    fn mislabelled_file_is_accepted_without_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.jpg");
        fs::write(&path, b"plain text").unwrap();
        let upload = ImageUpload::open(&path).unwrap();
        assert_eq!(upload.dimensions(), None);
        assert!(upload.summary().contains("size unknown"));
    }

    #[test]
    fn byte_sizes_are_human_readable() {
        assert_eq!(human_bytes(512), "512 B");
        assert_eq!(human_bytes(2048), "2.0 KiB");
        assert_eq!(human_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
