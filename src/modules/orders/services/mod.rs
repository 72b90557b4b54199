pub mod order_service;
pub mod pricing;

pub use order_service::OrderService;
