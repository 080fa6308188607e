//! Runtime plumbing shared by the roster binaries: logging setup and
//! startup environment checks.

pub mod env;
pub mod utils;
