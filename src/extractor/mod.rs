pub mod lines;

pub use lines::{LineExtractor, PortRecord, ScanRecord};
