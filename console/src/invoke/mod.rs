//! Test invocations against running microservices

pub mod bearer;
pub mod panel;
pub mod report;
pub mod request;
