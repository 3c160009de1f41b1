pub mod registry;
pub mod writer;

pub use registry::{ArtifactNames, FilenamesRecord};
pub use writer::ArtifactWriter;
