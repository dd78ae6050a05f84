//! Core pipeline and domain logic for promptpack.
//!
//! This crate ties together discovery, encoding-tolerant file reading, and
//! document writing into a single `merge` workflow.

pub mod document;
pub mod encoding;
pub mod pipeline;
pub mod reader;
