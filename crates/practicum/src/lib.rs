//! Practicum homework-review API client.

mod client;

pub use client::{DEFAULT_ENDPOINT, PracticumClient};
