//! CompareBuddy API library.
//!
//! The product catalog, the car comparison catalog and user accounts
//! (password and Google sign-in) behind one JSON REST surface. The binary
//! in `main.rs` only wires configuration, telemetry and the listener around
//! [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
