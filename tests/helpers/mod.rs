//! Test helpers module
//!
//! Builders for domain objects and a wiremock stand-in for the events backend.

#![allow(dead_code)]

pub mod test_data;
pub mod api_mock;

pub use test_data::*;
pub use api_mock::*;
