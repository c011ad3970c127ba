//! Command implementations for namedex-cmd

pub mod bucket;
pub mod generate;
pub mod index;
pub mod letters;
pub mod page;
pub mod serve;
