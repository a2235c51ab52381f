//! CLI support for the `corpus` binary.

pub mod commands;
