//! Folder and file naming
//!
//! Pure helpers that turn database values into safe path segments, plus the
//! allocator that keeps every exported path unique.

pub mod allocator;
pub mod extension;
pub mod sanitize;

pub use allocator::UniquePathAllocator;
pub use extension::{has_extension, resolve_extension, trailing_segment};
pub use sanitize::{sanitize_file_name, sanitize_folder_name};
