pub mod app;
pub mod config;
pub mod constants;
pub mod fault;
pub mod message;
pub mod request;
