pub mod dataset;
pub mod layout;
pub mod records;
