//! Integration tests
//!
//! - `api`: every endpoint through the full router against a canned source
//! - `upstream`: the InnerTube client against a local fake upstream

pub mod fixtures;

mod api;
