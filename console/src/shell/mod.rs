//! Console shell

pub mod console;
pub mod state;
