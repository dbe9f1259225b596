//! # StudioSync Core
//!
//! Domain types shared by the store, the API server and the viewer client:
//! the weekly schedule model, request payloads, the live change event and the
//! error taxonomy.

pub mod errors;
pub mod models;
