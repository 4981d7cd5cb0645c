//! Repository implementations for database operations.

pub mod ad;
pub mod article;
pub mod layout_setting;
pub mod notification;
pub mod page_section;
pub mod seo_index_log;
pub mod seo_page;
pub mod seo_setting;

pub use ad::AdRepository;
pub use article::ArticleRepository;
pub use layout_setting::LayoutSettingRepository;
pub use notification::NotificationRepository;
pub use page_section::PageSectionRepository;
pub use seo_index_log::SeoIndexLogRepository;
pub use seo_page::SeoPageRepository;
pub use seo_setting::SeoSettingRepository;
