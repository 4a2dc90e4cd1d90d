pub mod errors;
pub mod volumes;
