//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod ad;
pub mod article;
pub mod layout_setting;
pub mod notification;
pub mod page_section;
pub mod seo_index_log;
pub mod seo_page;
pub mod seo_setting;

pub use ad::AdEntity;
pub use article::PublishedArticleEntity;
pub use layout_setting::LayoutSettingEntity;
pub use notification::NotificationEntity;
pub use page_section::PageSectionEntity;
pub use seo_index_log::SeoIndexLogEntity;
pub use seo_page::SeoPageEntity;
pub use seo_setting::SeoSettingEntity;
