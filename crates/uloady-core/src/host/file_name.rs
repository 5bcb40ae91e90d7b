//! File-name transforms: what a host gets told the uploaded file is called.
//!
//! The default sends only the extension so the local name does not leak.

use std::path::Path;

/// Extension with its leading dot, whitespace-trimmed; empty when there is none.
///
/// `"photo.PNG"` → `".PNG"`, `"archive.tar.gz"` → `".gz"`, `".bashrc"` → `""`.
pub fn extension_only(name: &str) -> String {
    match Path::new(name.trim()).extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()).trim().to_string(),
        None => String::new(),
    }
}

/// Final path component, unchanged.
pub fn base_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

/// Extension prefixed with a retention code chosen by file kind,
/// e.g. `"holiday.jpg"` → `"72h.jpg"`.
pub fn duration_coded(name: &str) -> String {
    let ext = extension_only(name);
    format!("{}{}", retention_code(&ext), ext)
}

fn retention_code(ext: &str) -> &'static str {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "avif" | "bmp" | "mp4" | "webm" | "mkv"
        | "mov" | "mp3" | "ogg" | "flac" | "opus" => "72h",
        "txt" | "log" | "md" | "json" | "csv" | "diff" | "patch" => "24h",
        "zip" | "tar" | "gz" | "xz" | "zst" | "7z" | "bz2" | "iso" => "12h",
        _ => "1h",
    }
}
