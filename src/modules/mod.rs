pub mod categories;
pub mod customers;
pub mod discounts;
pub mod duplicatas;
pub mod orders;
pub mod products;
pub mod reports;
pub mod transport;
pub mod users;
