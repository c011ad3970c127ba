//! Test utilities and helpers for the namedex project.
//!
//! This crate provides synthetic name sources: sorted name lists with
//! configurable noise (blank lines, invalid leading characters, CRLF line
//! endings, mixed case), written to temporary files or kept in memory.
//!
//! # Usage
//!
//! This crate is primarily intended for use within the namedex test suite
//! and development tools.

pub mod data_gen;
