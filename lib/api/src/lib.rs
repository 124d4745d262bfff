//! # VendX API
//!
//! HTTP surface for the qualification engine: a single POST endpoint
//! that takes a software category plus capability list and returns the
//! ranked vendor shortlist, and a health probe.

pub mod rest;

pub use rest::RestApi;
