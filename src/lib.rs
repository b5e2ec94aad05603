#![no_std]

#[cfg(test)]
extern crate std;

mod error;
mod log;

pub mod device;
pub mod interface;
pub mod params;
pub mod registers;

pub use crate::device::{As3935, DistanceEstimate};
pub use crate::error::{Error, Result};
