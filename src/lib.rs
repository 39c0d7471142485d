pub mod domain;
pub mod application;
pub mod infrastructure;

// rowdelta version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Library result type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Mapping error: {0}")]
    Mapping(String),
}
