//! Upload validation.
//!
//! Uploaded files are admitted by extension whitelist plus content
//! sniffing. Formats that are cheap to fingerprint (STL, G-code,
//! Blender) must match their claimed extension; formats that are not
//! (STEP, images, archives) are trusted by extension alone.

use crate::error::CoreError;

/// Extensions accepted on submitted files.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "stl", "step", "obj", "3mf", "pdf", "png", "jpg", "jpeg", "zip",
];

/// Extensions whose content we can fingerprint. A file claiming one of
/// these without the matching fingerprint is rejected.
const STRICT_CHECK_EXTENSIONS: &[&str] = &["stl", "gcode", "blend"];

/// How many header bytes [`detect_extension`] expects at most.
pub const SNIFF_HEADER_LEN: usize = 2048;

/// Identify a file format from its leading bytes and total size.
///
/// `header` holds up to the first [`SNIFF_HEADER_LEN`] bytes,
/// `file_size` the full length on disk. Returns `None` when no known
/// fingerprint matches.
pub fn detect_extension(header: &[u8], file_size: u64) -> Option<&'static str> {
    if header.starts_with(b"BLENDER") {
        return Some("blend");
    }
    if starts_with_ignore_case(header, b"solid") {
        return Some("stl");
    }
    if header.starts_with(b";") || header.starts_with(b"(") {
        return Some("gcode");
    }
    if looks_like_gcode(&header[..header.len().min(500)]) {
        return Some("gcode");
    }

    // A binary STL is an 80 byte header, a u32 triangle count and 50
    // bytes per triangle. The size must match exactly.
    if file_size >= 84 && header.len() >= 84 {
        let tri_count = u32::from_le_bytes([header[80], header[81], header[82], header[83]]);
        let expected = 84u64 + u64::from(tri_count) * 50;
        if file_size == expected {
            return Some("stl");
        }
    }

    None
}

fn starts_with_ignore_case(haystack: &[u8], prefix: &[u8]) -> bool {
    haystack.len() >= prefix.len()
        && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// True when any line starts with `G` or `M` followed by 1 to 3 digits.
fn looks_like_gcode(header: &[u8]) -> bool {
    header.split(|&b| b == b'\n').any(|line| {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.len() < 2 || (line[0] != b'G' && line[0] != b'M') {
            return false;
        }
        let digits = line[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        (1..=3).contains(&digits)
            && line
                .get(1 + digits)
                .map_or(true, |b| !b.is_ascii_digit())
    })
}

/// Reconcile a file's claimed extension with its detected format.
///
/// Returns the filename to store under, possibly with a repaired
/// extension, or an error when the file must be rejected.
pub fn resolve_upload_filename(
    filename: &str,
    detected: Option<&'static str>,
) -> Result<String, CoreError> {
    let filename = sanitize_filename(filename)?;

    let Some((_, current_ext)) = filename.rsplit_once('.') else {
        // No extension at all, repair it from the content if we can.
        return match detected {
            Some(ext) => Ok(format!("{filename}.{ext}")),
            None => Err(CoreError::Validation(format!(
                "file '{filename}' has no extension and its content is not recognized"
            ))),
        };
    };
    let current_ext = current_ext.to_ascii_lowercase();
    let is_whitelisted = ALLOWED_EXTENSIONS.contains(&current_ext.as_str());

    if let Some(detected_ext) = detected {
        if current_ext == detected_ext {
            return Ok(filename);
        }
        // A junk extension gets the detected one appended, a
        // whitelisted one that contradicts the content is spoofing.
        if !is_whitelisted {
            return Ok(format!("{filename}.{detected_ext}"));
        }
        return Err(CoreError::Validation(format!(
            "file '{filename}' claims .{current_ext} but its content is {detected_ext}"
        )));
    }

    if is_whitelisted {
        if STRICT_CHECK_EXTENSIONS.contains(&current_ext.as_str()) {
            return Err(CoreError::Validation(format!(
                "file '{filename}' claims .{current_ext} but its content does not match"
            )));
        }
        return Ok(filename);
    }

    Err(CoreError::Validation(format!(
        "file type .{current_ext} is not accepted"
    )))
}

/// Strip path components and characters that are unsafe in a stored
/// filename.
pub fn sanitize_filename(filename: &str) -> Result<String, CoreError> {
    let stem = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let cleaned: String = stem
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        return Err(CoreError::Validation(format!(
            "filename '{filename}' is empty after sanitizing"
        )));
    }
    Ok(cleaned)
}
