//! Transport layer for the command line

pub mod cli;
