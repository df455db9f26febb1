//! Serial status report lines for the stick remapper.
//!
//! The firmware can mirror what it sees on the serial port so the sticks
//! can be calibrated and debugged from a host:
//!
//! ```text
//! AXES a0 a1 a2 ...   raw axis values from 0 to 1023
//! NORM n0 n1 n2 ...   normalized axis values from -100 to 100
//! BP index            button `index` was pressed
//! BR index            button `index` was released
//! ```
//!
//! - [`StatusReport`]: one report line
//! - [`Serialize`]: write a report into a buffer, `heapless::Vec`,
//!   `core::fmt::Write` or (with `embedded-io`) a serial peripheral
//! - [`parse_report`]: read a line back on the host
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`embedded-io`**: Enable `serialize_io()` for I/O peripherals
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod format;
pub mod parser;
pub mod report;
pub mod serialize;

pub use error::{ParseError, ReportError, SerializeError};
pub use parser::parse_report;
pub use report::{StatusReport, MAX_AXES};
pub use serialize::{Serialize, MAX_REPORT_SIZE};
