//! Authoring and publishing

pub mod publisher;
pub mod template;
