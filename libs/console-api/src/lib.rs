//! Wire models shared with the microservice orchestration backend

pub mod models;

pub use models::*;
