//! Spreadsheet I/O around the domain: the upload loader and the export
//! writer. Parsing and serialization stay here so the domain never touches
//! bytes or the filesystem.

pub mod export;
pub mod loader;
