pub mod dom;
pub mod json;

pub use dom::Element;
pub use json::{decode, encode, ChildValue, EncodedDocument, EncodedValue};
