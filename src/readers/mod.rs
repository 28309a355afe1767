//! Format readers: decode one raw file into a [`RawTable`].
//!
//! Each reader is lossless at the cell level; interpretation (timestamp
//! parsing, unit conversion) happens downstream in the normalizers.
//!
//! [`RawTable`]: crate::models::RawTable

pub mod delimited;
pub mod json_document;
pub mod spreadsheet;
pub mod xml_events;

pub use delimited::read_delimited;
pub use json_document::read_json_rows;
pub use spreadsheet::{read_spreadsheet, SheetSelect};
pub use xml_events::read_attribute_events;
