pub mod aggregate;
pub mod discrepancy;
pub mod draft;
pub mod wizard;
