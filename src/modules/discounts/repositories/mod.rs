pub mod discount_repository;

pub use discount_repository::DiscountRepository;
