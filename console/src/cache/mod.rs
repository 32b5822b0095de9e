//! In-memory caches

pub mod microservices;
