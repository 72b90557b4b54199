pub mod discount_service;
pub mod settings_cache;

pub use discount_service::DiscountService;
pub use settings_cache::SettingsCache;
