//! Integration tests for flynn CLI
//!
//! These tests spawn the actual binary or talk HTTP to a local mock server.
//! They are slower and should be run separately from unit tests.

mod end_to_end;
mod http_transport;
