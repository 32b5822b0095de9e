//! Integration tests for the console library

mod support;

mod test_cache;
mod test_dispatcher;
mod test_invocation;
