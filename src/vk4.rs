//! VK4 binary decoding module
//!
//! The decoder is a set of independent random-access reads over one seekable
//! source: the fixed file header and offset table come first, then every
//! other section is located through the table. [`Vk4Container::decode`] runs
//! the whole pass and yields an immutable aggregate.

pub mod blocks;
pub mod conditions;
pub mod container;
pub mod error;
pub mod offsets;
pub mod reader;
pub mod strings;

#[cfg(test)]
pub(crate) mod fixtures;

pub use blocks::{
    Channel, ColorPixelBlock, ColorSelector, GrayPixelBlock, GraySamples, GraySelector,
};
pub use conditions::MeasurementConditions;
pub use container::{CanonicalBlock, SectionRef, SectionSet, Vk4Container};
pub use error::{Result, Vk4Error};
pub use offsets::{FileHeader, OffsetTable, SectionKind};
pub use reader::ByteReader;
pub use strings::StringData;
