// src/core/mod.rs

pub mod html;
pub mod vischars;
pub mod net;
pub mod sanitize;

pub use net::{Fetch, HttpFetcher};
pub use vischars::VisChars;
