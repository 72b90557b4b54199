pub mod duplicata_repository;

pub use duplicata_repository::{DuplicataRepository, MySqlDuplicataRepository};
