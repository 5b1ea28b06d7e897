use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Schema file missing from the build: {0}")]
    MissingSchemaFile(String),

    #[error("Schema file {0} is not valid UTF-8")]
    InvalidSchemaEncoding(String),
}

pub type Result<T> = std::result::Result<T, DbError>;
