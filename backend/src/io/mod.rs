//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services.
//!
//! Handlers parse path and body, call one service operation, map the
//! resulting entity to its transfer object and pick the success status.
//! Every failure is converted to the uniform error envelope in one place,
//! [`rest::error::ApiError`].

pub mod rest;

pub use rest::*;
