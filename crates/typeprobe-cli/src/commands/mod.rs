pub mod analyze;
pub mod resolve;
pub mod version;
