pub mod schema;
pub mod post;
pub mod issue;
pub mod submission;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Error)]
pub enum RunMigrationsError {
    #[error("RunPendingMigrations: {message}")]
    RunPendingMigrations { message: String },
}

/// Brings the schema up to date; applied once at startup.
pub fn run_migrations(conn: &mut PgConnection) -> Result<(), RunMigrationsError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|source| RunMigrationsError::RunPendingMigrations {
            message: source.to_string(),
        })?;
    Ok(())
}
