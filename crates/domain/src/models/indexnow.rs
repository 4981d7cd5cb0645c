//! IndexNow submission models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Name of the settings row holding the IndexNow configuration.
pub const INDEXNOW_SETTING_NAME: &str = "indexnow";

/// IndexNow configuration as stored in the settings row.
///
/// Every field is optional in storage; a submission needs both `api_key`
/// and `host`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IndexNowSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub key_location: Option<String>,
}

/// Settings with the required fields present.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIndexNow {
    pub api_key: String,
    pub host: String,
    pub key_location: String,
}

impl IndexNowSettings {
    /// Returns the usable configuration, or `None` when key or host is blank.
    pub fn resolve(&self) -> Option<ResolvedIndexNow> {
        let api_key = non_blank(self.api_key.as_deref())?;
        let host = non_blank(self.host.as_deref())?;
        let key_location = non_blank(self.key_location.as_deref())
            .unwrap_or_else(|| format!("https://{}/{}.txt", host, api_key));
        Some(ResolvedIndexNow {
            api_key,
            host,
            key_location,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ResolvedIndexNow {
    /// Absolute URL for a site path on the configured host.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "https://{}{}",
            self.host,
            shared::validation::normalize_path(path)
        )
    }

    pub fn payload_for(&self, url: &str) -> IndexNowPayload {
        IndexNowPayload {
            host: self.host.clone(),
            key: self.api_key.clone(),
            key_location: self.key_location.clone(),
            url_list: vec![url.to_string()],
        }
    }
}

/// Body posted to the IndexNow endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexNowPayload {
    pub host: String,
    pub key: String,
    pub key_location: String,
    pub url_list: Vec<String>,
}

/// Request body of the submit function.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct IndexNowSubmitRequest {
    #[validate(length(max = 2048, message = "Path must be at most 2048 characters"))]
    pub path: Option<String>,
}

impl IndexNowSubmitRequest {
    /// The path when present and not blank.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

/// Whether the IndexNow endpoint accepted the submission.
pub fn is_accepted_status(status: u16) -> bool {
    status == 200 || status == 202
}

/// Response of a submission that reached the endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct IndexNowSubmitResponse {
    pub success: bool,
    pub status: u16,
    pub url: String,
}

/// Response when no usable configuration exists.
#[derive(Debug, Clone, Serialize)]
pub struct IndexNowSkippedResponse {
    pub success: bool,
    pub skipped: bool,
    pub reason: &'static str,
}

impl Default for IndexNowSkippedResponse {
    fn default() -> Self {
        Self {
            success: false,
            skipped: true,
            reason: "indexnow_not_configured",
        }
    }
}

/// Admin request for storing the IndexNow configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateIndexNowSettingsRequest {
    #[validate(length(min = 8, max = 128, message = "API key must be 8-128 characters"))]
    pub api_key: String,

    #[validate(custom(function = "shared::validation::validate_host"))]
    pub host: String,

    #[validate(url(message = "Key location must be a URL"))]
    pub key_location: Option<String>,
}

impl From<UpdateIndexNowSettingsRequest> for IndexNowSettings {
    fn from(r: UpdateIndexNowSettingsRequest) -> Self {
        Self {
            api_key: Some(r.api_key),
            host: Some(r.host),
            key_location: r.key_location,
        }
    }
}
