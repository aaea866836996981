// Record boundary between the document stores and the matching engine.

pub mod parser;

pub use parser::{parse_profile, parse_project, RecordError};
