pub mod error;
pub mod record_loader;
