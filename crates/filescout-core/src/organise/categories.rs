//! Extension-based file categorisation.
//!
//! A fixed, process-wide table mapping lowercase extensions to broad
//! semantic categories. The organiser uses the category label as a folder
//! name, so labels are plain display strings.

use serde::{Serialize, Serializer};
use std::path::Path;

/// Broad file categories for grouping during organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Images,
    Documents,
    Video,
    Audio,
    Archives,
    Code,
    Models3D,
    Executables,
    Databases,
    GisData,
    Fonts,
    Ebooks,
    /// Fallback for unmapped or missing extensions.
    Other,
}

impl FileCategory {
    /// Human-readable label, also used as the destination folder name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Images => "Images",
            Self::Documents => "Documents",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Archives => "Archives",
            Self::Code => "Code",
            Self::Models3D => "3D Models",
            Self::Executables => "Executables",
            Self::Databases => "Databases",
            Self::GisData => "GIS Data",
            Self::Fonts => "Fonts",
            Self::Ebooks => "Ebooks",
            Self::Other => "Other",
        }
    }
}

impl Serialize for FileCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Categorise a file extension (without the leading dot).
///
/// Zero-heap-allocation hot path: extensions are lowercased into a
/// fixed-size stack buffer rather than allocating a `String`. Extensions
/// longer than 16 bytes are treated as `Other`.
pub fn categorise_extension(ext: &str) -> FileCategory {
    let bytes = ext.as_bytes();
    if bytes.len() > 16 {
        return FileCategory::Other;
    }

    let mut lower = [0u8; 16];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let lower_str = match std::str::from_utf8(&lower[..bytes.len()]) {
        Ok(s) => s,
        Err(_) => return FileCategory::Other,
    };

    match lower_str {
        // Images
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "tiff" | "tif" | "svg" | "webp" | "ico"
        | "heic" | "heif" | "raw" | "arw" | "cr2" | "nef" | "orf" | "rw2" | "psd" | "ai"
        | "eps" => FileCategory::Images,
        // Documents (.epub sorts here rather than with ebooks)
        "pdf" | "doc" | "docx" | "txt" | "rtf" | "odt" | "xls" | "xlsx" | "csv" | "tsv"
        | "ppt" | "pptx" | "epub" | "md" => FileCategory::Documents,
        // Video
        "mp4" | "mkv" | "avi" | "mov" | "wmv" | "flv" | "webm" | "mpeg" | "mpg" | "3gp"
        | "m4v" => FileCategory::Video,
        // Audio
        "mp3" | "wav" | "flac" | "aac" | "ogg" | "oga" | "wma" | "m4a" | "amr" | "aiff" => {
            FileCategory::Audio
        }
        // Archives
        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" | "iso" | "lz" | "zst" => {
            FileCategory::Archives
        }
        // Code (.sql sorts here rather than with databases)
        "py" | "js" | "ts" | "html" | "css" | "php" | "java" | "cpp" | "c" | "h" | "hpp"
        | "cs" | "rb" | "go" | "rs" | "kt" | "swift" | "m" | "lua" | "sql" | "xml" | "json"
        | "yaml" | "yml" => FileCategory::Code,
        // 3D models
        "obj" | "fbx" | "stl" | "dae" | "blend" | "gltf" | "glb" => FileCategory::Models3D,
        // Executables and installers
        "exe" | "msi" | "bat" | "cmd" | "sh" | "apk" | "app" | "deb" | "rpm" => {
            FileCategory::Executables
        }
        // Databases
        "db" | "sqlite" | "sqlite3" | "mdb" | "accdb" | "dbf" => FileCategory::Databases,
        // GIS / map data
        "shp" | "kml" | "kmz" | "geojson" | "gpx" => FileCategory::GisData,
        // Fonts
        "ttf" | "otf" | "woff" | "woff2" => FileCategory::Fonts,
        // Ebooks
        "mobi" | "azw3" | "fb2" => FileCategory::Ebooks,
        _ => FileCategory::Other,
    }
}

/// Categorise a path by its extension. Extensionless files are `Other`.
pub fn categorise_path(path: &Path) -> FileCategory {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(categorise_extension)
        .unwrap_or(FileCategory::Other)
}
