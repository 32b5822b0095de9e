//! Microservice Operator Console Library
//!
//! Client-side lifecycle and test-invocation orchestration for microservices
//! managed by a remote backend.

pub mod app;
pub mod cache;
pub mod cli;
pub mod dispatch;
pub mod editor;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod invoke;
pub mod logs;
pub mod notify;
pub mod shell;
pub mod storage;
pub mod utils;
