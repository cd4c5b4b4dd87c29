//! Export archive handling

pub mod extractor;

pub use extractor::{ArchiveExtractor, ZipExtractor};
