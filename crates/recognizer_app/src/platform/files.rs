use std::fs;
use std::io;
use std::path::Path;

use recognizer_core::PickedFile;

/// Reads name, size and type of a file the user picked.
///
/// The path is canonicalized so preview URLs stay valid after the working
/// directory changes.
pub fn picked_file(path: &Path) -> io::Result<PickedFile> {
    let path = fs::canonicalize(path)?;
    let metadata = fs::metadata(&path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(PickedFile {
        name,
        byte_size: metadata.len(),
        mime_type: guess_mime(&path).to_string(),
        path,
    })
}

/// Video MIME type from the extension; empty when unknown.
pub fn guess_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "mpg" | "mpeg" => "video/mpeg",
        "ogv" => "video/ogg",
        "3gp" => "video/3gpp",
        _ => "",
    }
}
