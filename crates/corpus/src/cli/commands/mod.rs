//! Implementations of the `corpus` subcommands.

pub mod annotate;
pub mod convert;
pub mod init;
pub mod inspect;
pub mod run;
pub mod shared;
pub mod stage;
