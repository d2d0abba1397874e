//! DNS reconnaissance engine: apex record resolution, batched brute-force
//! subdomain discovery and a rule-based classifier over the results.

pub mod aggregate;
pub mod config;
pub mod dns;
mod error;
pub mod model;
pub mod modules;
pub mod prober;
pub mod records;
pub mod scan;
pub mod scheduler;
pub mod utils;
pub mod validate;
pub mod wordlist;

pub use error::{Error, ErrorResponse, Result};
