//! Object-store paths for user-uploaded images.
//!
//! Images live at `<entity>/<userId>/<filename>`. This module only builds and
//! validates those paths; uploading is handled by the hosted object store.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Collections that own uploaded images.
pub const IMAGE_ENTITIES: &[&str] = &["actors", "filmmakers", "movies", "posts", "venues", "users"];

/// Accepted image extensions (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Maximum filename length in characters.
pub const MAX_FILENAME_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_segment(kind: &str, segment: &str) -> Result<(), CoreError> {
    if segment.trim().is_empty() {
        return Err(CoreError::Validation(format!("{kind} must not be empty")));
    }
    if segment.contains('/') || segment.contains('\\') || segment.contains("..") {
        return Err(CoreError::Validation(format!(
            "{kind} '{segment}' must not contain path separators or '..'"
        )));
    }
    Ok(())
}

/// Validate that `entity` is a collection that owns images.
pub fn validate_entity(entity: &str) -> Result<(), CoreError> {
    if IMAGE_ENTITIES.contains(&entity) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid entity '{entity}'. Must be one of: {}",
            IMAGE_ENTITIES.join(", ")
        )))
    }
}

/// Validate a filename and its extension.
pub fn validate_filename(filename: &str) -> Result<(), CoreError> {
    validate_segment("Filename", filename)?;

    if filename.chars().count() > MAX_FILENAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Filename exceeds {MAX_FILENAME_LENGTH} characters"
        )));
    }

    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported image type '{ext}'. Must be one of: {}",
            IMAGE_EXTENSIONS.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Path building
// ---------------------------------------------------------------------------

/// Build `<entity>/<userId>/<filename>` after validating every segment.
///
/// # Examples
///
/// ```
/// use indiereel_core::storage::object_path;
///
/// assert_eq!(
///     object_path("actors", "u123", "headshot.jpg").unwrap(),
///     "actors/u123/headshot.jpg"
/// );
/// assert!(object_path("actors", "u123", "../secret.jpg").is_err());
/// ```
pub fn object_path(entity: &str, user_id: &str, filename: &str) -> Result<String, CoreError> {
    validate_entity(entity)?;
    validate_segment("User id", user_id)?;
    validate_filename(filename)?;
    Ok(format!("{entity}/{user_id}/{filename}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_path() {
        assert_eq!(
            object_path("movies", "u9", "poster.PNG").unwrap(),
            "movies/u9/poster.PNG"
        );
    }

    #[test]
    fn rejects_unknown_entity() {
        assert!(object_path("invoices", "u9", "a.png").is_err());
    }

    #[test]
    fn rejects_separators_in_user_id() {
        assert!(object_path("posts", "u9/../u8", "a.png").is_err());
        assert!(object_path("posts", "", "a.png").is_err());
    }

    #[test]
    fn rejects_bad_extensions() {
        assert!(validate_filename("script.exe").is_err());
        assert!(validate_filename("noext").is_err());
        assert!(validate_filename("still.webp").is_ok());
    }

    #[test]
    fn rejects_overlong_filename() {
        let name = format!("{}.png", "a".repeat(MAX_FILENAME_LENGTH));
        assert!(validate_filename(&name).is_err());
    }
}
