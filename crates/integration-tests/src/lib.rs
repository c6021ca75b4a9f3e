//! End-to-end tests for the gateway and tool dispatcher live under
//! `tests/`; this crate has no library surface of its own.
