pub mod document;
pub mod error;
pub mod money;

pub use error::{AppError, Result};
