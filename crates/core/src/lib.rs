#![forbid(unsafe_code)]

pub mod assessment;
pub mod error;
pub mod leveling;
pub mod model;
pub mod quiz;
pub mod recommendation;

pub use error::Error;
