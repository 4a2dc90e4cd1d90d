pub mod book;
pub mod errors;
pub mod fetcher;
pub mod state;
pub mod view;
