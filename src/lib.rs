#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Per-user todo lists and items behind signed session tokens. It contains the"]
#![doc = "credential store, token service, authorization gate, the ownership-scoped"]
#![doc = "repository and the HTTP routes used by the main binary (`main.rs`)."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;

pub use crate::error::AppError;
