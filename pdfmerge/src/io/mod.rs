//! PDF input and output.

pub mod reader;
pub mod writer;

pub use reader::{InspectResult, LoadedPdf, PdfInfo, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
