// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations.
//!
//! SQL files under `migrations/` are compiled into the binary and applied
//! when the database is opened.

use postcraft_core::PostcraftError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against `conn`.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), PostcraftError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| PostcraftError::Storage {
            source: Box::new(e),
        })?;
    Ok(())
}
