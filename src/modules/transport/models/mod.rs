pub mod transport_company;

pub use transport_company::{TransportCompany, TransportCompanyRequest};
