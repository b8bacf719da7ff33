pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod matching;
pub mod models;
pub mod notify;
pub mod workers;
