//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a site path accepted by the API.
pub const MAX_PATH_LENGTH: usize = 2048;

/// Sitemap change frequencies accepted by the sitemap protocol.
pub const CHANGE_FREQUENCIES: [&str; 7] = [
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

/// Platform identifiers used by settings, ads, sections and notifications.
pub const PLATFORMS: [&str; 4] = ["web", "android", "ios", "all"];

/// Validates that a value is a site-relative path such as `/quran/1`.
pub fn validate_site_path(path: &str) -> Result<(), ValidationError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("path_required");
        err.message = Some("Path is required".into());
        return Err(err);
    }

    if !trimmed.starts_with('/') {
        let mut err = ValidationError::new("path_format");
        err.message = Some("Path must start with '/'".into());
        return Err(err);
    }

    if trimmed.len() > MAX_PATH_LENGTH {
        let mut err = ValidationError::new("path_length");
        err.message = Some("Path must be at most 2048 characters".into());
        return Err(err);
    }

    if trimmed.contains("://") || trimmed.chars().any(char::is_whitespace) {
        let mut err = ValidationError::new("path_format");
        err.message = Some("Path must be site-relative without whitespace".into());
        return Err(err);
    }

    Ok(())
}

/// Validates a sitemap change frequency.
pub fn validate_change_frequency(value: &str) -> Result<(), ValidationError> {
    if CHANGE_FREQUENCIES.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("changefreq_invalid");
        err.message = Some(
            "Change frequency must be one of always, hourly, daily, weekly, monthly, yearly, never"
                .into(),
        );
        Err(err)
    }
}

/// Validates a platform identifier.
pub fn validate_platform(value: &str) -> Result<(), ValidationError> {
    if PLATFORMS.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("platform_invalid");
        err.message = Some("Platform must be one of web, android, ios, all".into());
        Err(err)
    }
}

/// Validates a bare host name (no scheme, no path), e.g. `example.org`.
pub fn validate_host(host: &str) -> Result<(), ValidationError> {
    let valid = !host.is_empty()
        && host.len() <= 253
        && !host.contains("://")
        && !host.contains('/')
        && !host.chars().any(char::is_whitespace);

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("host_invalid");
        err.message = Some("Host must be a bare host name such as example.org".into());
        Err(err)
    }
}

/// Ensures a path starts with exactly one leading slash.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
