//! Distriplast Sales Management Backend Library
//!
//! Core functionality for the Distriplast order, receivables and catalog
//! management system.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::customers;
pub use modules::discounts;
pub use modules::duplicatas;
pub use modules::orders;
pub use modules::products;
