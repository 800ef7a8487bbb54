//! Storage layer
//!
//! Uses SQLite (embedded) through sqlx. The schema is created on open.

pub mod db;

pub use db::Database;
