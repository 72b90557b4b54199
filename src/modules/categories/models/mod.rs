pub mod category;

pub use category::{Category, CategoryRequest, Subcategory};
