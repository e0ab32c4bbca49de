//! YAML parsing and serialization helpers

pub mod parser;

pub use parser::{parse_yaml, parse_yaml_file, to_yaml_string, YamlError};
