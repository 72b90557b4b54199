pub mod duplicata_controller;

pub use duplicata_controller::configure;
