//! Lifecycle action dispatch

pub mod action;
pub mod busy;
pub mod dispatcher;
