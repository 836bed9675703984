//! CLI library components for the HXL tools.

#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod io;
pub mod logging;
pub mod report;
