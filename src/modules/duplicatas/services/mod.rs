pub mod commission;
pub mod commission_service;
pub mod duplicata_service;

pub use commission_service::{CommissionService, RecomputeFailure, RecomputeOutcome};
pub use duplicata_service::DuplicataService;
