//! Domain models for the Deen backend.

pub mod ad;
pub mod article;
pub mod indexnow;
pub mod layout_setting;
pub mod notification;
pub mod page_section;
pub mod platform;
pub mod search_engine;
pub mod seo_index_log;
pub mod seo_page;

pub use ad::{Ad, AdType, ListAdsQuery, ListAdsResponse, SaveAdRequest};
pub use article::PublishedArticle;
pub use indexnow::{
    IndexNowPayload, IndexNowSettings, IndexNowSkippedResponse, IndexNowSubmitRequest,
    IndexNowSubmitResponse, ResolvedIndexNow, UpdateIndexNowSettingsRequest,
    INDEXNOW_SETTING_NAME,
};
pub use layout_setting::{LayoutSetting, UpdateLayoutSettingRequest};
pub use notification::{
    CreateNotificationRequest, ListNotificationsQuery, ListNotificationsResponse, Notification,
};
pub use page_section::{
    ListPageSectionsQuery, ListPageSectionsResponse, PageSection, UpsertPageSectionRequest,
};
pub use platform::Platform;
pub use search_engine::{
    EngineResult, NotifyResponse, PingOutcome, RateLimitedResponse, SearchEngine,
};
pub use seo_index_log::{
    IndexAction, ListIndexLogsQuery, ListIndexLogsResponse, NewSeoIndexLog, SeoIndexLog,
};
pub use seo_page::{ListSeoPagesResponse, SeoPage, SeoPageResponse, UpsertSeoPageRequest};
