//! `PostgreSQL` adapters for submission persistence.

mod frozen;
mod models;
mod schema;
mod submission;

pub use frozen::PostgresFrozenSubmissionStore;
pub use submission::PostgresSubmissionStore;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by submission adapters.
pub type SubmissionPgPool = Pool<ConnectionManager<PgConnection>>;
