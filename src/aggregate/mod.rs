pub mod category;
pub mod label;
