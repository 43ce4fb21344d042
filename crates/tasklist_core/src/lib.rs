pub mod capture;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod notify;
pub mod store;
