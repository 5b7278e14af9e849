//! Keyence VK4 profilometry data extraction.
//!
//! The [`vk4`] module decodes the proprietary binary format into an
//! in-memory [`vk4::Vk4Container`]; the [`output`] module reshapes decoded
//! layers into CSV text or raster image files.

pub mod logger;
pub mod output;
pub mod vk4;

pub use output::{LayerSelection, OutputFormat};
pub use vk4::{SectionSet, Vk4Container};
