//! Option ROM byte-sum checksum correction.
//!
//! An image is loaded whole into a [`image::RomImage`], a
//! [`source::RegionSource`] turns command-line parameters into
//! [`region::Region`]s, and [`checksum::correct`] stores the one byte per
//! region that makes the region sum to zero mod 256.

pub mod config;
pub mod error;
pub mod logging;

pub mod checksum;
pub mod image;
pub mod patch;
pub mod region;
pub mod source;

pub use error::{Error, Result};
