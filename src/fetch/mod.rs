// src/fetch/mod.rs
// =============================================================================
// This module downloads the pages listed in the input file.
//
// Submodules:
// - http: The reqwest-based Fetcher with its retry loop
// =============================================================================

mod http;

pub use http::Fetcher;
