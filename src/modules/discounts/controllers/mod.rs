pub mod discount_controller;

pub use discount_controller::configure;
