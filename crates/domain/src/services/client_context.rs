//! Client embedding detection for ad delivery.
//!
//! Works from request headers only: the `User-Agent`, the `Sec-Fetch-Dest`
//! fetch metadata header and the `X-Display-Mode` hint sent by the PWA shell.

use serde::Serialize;

lazy_static::lazy_static! {
    static ref BOT_REGEX: regex::Regex = regex::Regex::new(
        r"(?i)(bot\b|bot/|crawl|spider|slurp|bingpreview|facebookexternalhit|embedly|headlesschrome|lighthouse|pingdom|curl/|wget/|python-requests|go-http-client)"
    ).unwrap();
    static ref ANDROID_WEBVIEW_REGEX: regex::Regex =
        regex::Regex::new(r"(?i)android.*(; wv\)|version/\d+(\.\d+)* chrome/)").unwrap();
    static ref IOS_DEVICE_REGEX: regex::Regex =
        regex::Regex::new(r"(?i)(iphone|ipad|ipod).*applewebkit").unwrap();
}

/// Token the native app shells append to their WebView user agent.
pub const APP_SHELL_UA_TOKEN: &str = "DeenApp/";

/// Where the front end is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingContext {
    Browser,
    StandalonePwa,
    Iframe,
    AndroidWebView,
    IosWebView,
}

/// How ads may be served to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdDelivery {
    /// Browser loads the third-party ad script.
    Script,
    /// App shell renders ads through its native SDK.
    Native,
    /// No ads.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientContext {
    pub is_bot: bool,
    pub embedding: EmbeddingContext,
}

impl ClientContext {
    /// Classifies a client from its request headers.
    ///
    /// A missing user agent is treated as automated traffic.
    pub fn detect(
        user_agent: Option<&str>,
        sec_fetch_dest: Option<&str>,
        display_mode: Option<&str>,
    ) -> Self {
        let ua = user_agent.map(str::trim).unwrap_or("");
        let is_bot = ua.is_empty() || BOT_REGEX.is_match(ua);

        let embedding = if sec_fetch_dest
            .map(|d| d.trim().eq_ignore_ascii_case("iframe"))
            .unwrap_or(false)
        {
            EmbeddingContext::Iframe
        } else if is_android_webview(ua) {
            EmbeddingContext::AndroidWebView
        } else if is_ios_webview(ua) {
            EmbeddingContext::IosWebView
        } else if display_mode
            .map(|m| {
                matches!(
                    m.trim().to_ascii_lowercase().as_str(),
                    "standalone" | "fullscreen" | "minimal-ui"
                )
            })
            .unwrap_or(false)
        {
            EmbeddingContext::StandalonePwa
        } else {
            EmbeddingContext::Browser
        };

        Self { is_bot, embedding }
    }

    pub fn is_webview(&self) -> bool {
        matches!(
            self.embedding,
            EmbeddingContext::AndroidWebView | EmbeddingContext::IosWebView
        )
    }

    /// Delivery mode for this client given the platform's `show_ads` switch.
    pub fn ad_delivery(&self, ads_enabled: bool) -> AdDelivery {
        if !ads_enabled || self.is_bot {
            return AdDelivery::None;
        }
        match self.embedding {
            EmbeddingContext::Iframe => AdDelivery::None,
            EmbeddingContext::AndroidWebView | EmbeddingContext::IosWebView => AdDelivery::Native,
            EmbeddingContext::Browser | EmbeddingContext::StandalonePwa => AdDelivery::Script,
        }
    }
}

fn is_android_webview(ua: &str) -> bool {
    ANDROID_WEBVIEW_REGEX.is_match(ua)
        || (ua.contains(APP_SHELL_UA_TOKEN) && ua.to_ascii_lowercase().contains("android"))
}

fn is_ios_webview(ua: &str) -> bool {
    if !IOS_DEVICE_REGEX.is_match(ua) {
        return false;
    }
    // Mobile Safari and the in-app browsers of other vendors carry "Safari/".
    ua.contains(APP_SHELL_UA_TOKEN) || !ua.contains("Safari/")
}
