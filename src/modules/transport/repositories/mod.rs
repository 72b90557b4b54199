pub mod transport_repository;

pub use transport_repository::TransportRepository;
