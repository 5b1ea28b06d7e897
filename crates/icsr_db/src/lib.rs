pub mod error;
pub mod repository;
pub mod schema;

pub use error::{DbError, Result};
pub use repository::{CaseLogRow, CaseRepository, NewCaseEntry};
pub use schema::rebuild_database;
