pub mod identity;
pub mod request_id;

pub use identity::{Identity, Role};
pub use request_id::RequestId;
