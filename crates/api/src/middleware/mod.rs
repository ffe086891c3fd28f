//! HTTP middleware for the API.
//!
//! The layer order is assembled in [`crate::routes::app`].

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
