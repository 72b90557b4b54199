pub mod transport_service;

pub use transport_service::TransportService;
