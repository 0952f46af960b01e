pub mod elements;

pub use elements::{ElementRecord, ElementSnapshot, ParsedElements, parse_snapshot};
