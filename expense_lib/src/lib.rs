pub mod categories;
pub mod currencies;
pub mod errors;
pub mod expenses;
pub mod store;
pub mod totals;
