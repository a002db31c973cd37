//! msx1pq - MSX1 palette quantizer
//!
//! Batch front end for the `msx1-quantize` engine: PNG in, PNG, SCREEN2 or
//! SCREEN5 out. This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
