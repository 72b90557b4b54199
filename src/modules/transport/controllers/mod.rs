pub mod transport_controller;

pub use transport_controller::configure;
