//! API Module - Presentation boundary
//!
//! Commands a front end (CLI, form, ...) calls. Every per-request error is
//! turned into a user-facing message here.

pub mod commands;
