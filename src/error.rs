
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeepsakeError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
    #[error("Unknown named argument: {name}")]
    UnknownArgument { name: String },
    #[error("Parameter {name} was supplied more than once")]
    DuplicateArgument { name: String },
    #[error("Too many positional arguments: at most {expected} accepted, {got} supplied")]
    TooManyPositional { expected: usize, got: usize },
    #[error("Identifier {name} is not a parameter of the declared signature")]
    UndeclaredIdentifier { name: String },
    #[error("Identifier {name} has no value in this call and no default")]
    UnresolvedIdentifier { name: String },
    #[error("Type conflict in group {group}: requested {requested}, kept {kept}")]
    TypeConflict {
        group: String,
        requested: &'static str,
        kept: &'static str,
    },
    #[error("Encoding error: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, KeepsakeError>;

// Helper conversions
impl From<config::ConfigError> for KeepsakeError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<serde_json::Error> for KeepsakeError {
    fn from(e: serde_json::Error) -> Self { Self::Encoding(e.to_string()) }
}
