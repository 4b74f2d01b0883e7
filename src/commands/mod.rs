//! Command implementations for the resbundle CLI

pub mod cat;
pub mod glob;
pub mod helpers;
pub mod list;
pub mod stat;
