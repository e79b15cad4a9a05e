pub mod app;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod services;
pub mod static_files;
pub mod storage;

pub use app::{create_router, AppState};
