pub mod extract;
pub mod source;
pub mod xlsx;
