pub mod discount_settings;

pub use discount_settings::{DiscountSettings, UpdateDiscountSettingsRequest};
