use sea_orm::{DbErr, SqlErr};

/// Classifies constraint violations surfaced by the database driver.
pub trait DbErrExt {
    fn is_unique_violation(&self) -> bool;
    fn is_foreign_key_violation(&self) -> bool;
    /// Message of a unique violation, if this is one. Names the violated constraint on Postgres.
    fn unique_violation_message(&self) -> Option<String>;
}

impl DbErrExt for DbErr {
    fn is_unique_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }

    fn is_foreign_key_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
    }

    fn unique_violation_message(&self) -> Option<String> {
        match self.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Some(msg),
            _ => None,
        }
    }
}
