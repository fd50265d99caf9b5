//! Database error inspection

/// Unique index on `users.email`
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Name of the unique constraint a failed write ran into, if that is why
/// it failed
pub fn unique_violation(err: &anyhow::Error) -> Option<&str> {
    match err.downcast_ref::<sqlx::Error>()? {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => db_err.constraint(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct FakeDbError {
        kind: ErrorKind,
        constraint: &'static str,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("duplicate key value violates unique constraint")
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            // `ErrorKind` is neither `Copy` nor `Clone`
            match self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                ErrorKind::NotNullViolation => ErrorKind::NotNullViolation,
                ErrorKind::CheckViolation => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(kind: ErrorKind) -> anyhow::Error {
        sqlx::Error::Database(Box::new(FakeDbError {
            kind,
            constraint: USERS_EMAIL_KEY,
        }))
        .into()
    }

    #[test]
    fn test_unique_violation_reports_constraint() {
        let err = db_error(ErrorKind::UniqueViolation);
        assert_eq!(unique_violation(&err), Some(USERS_EMAIL_KEY));
    }

    #[test]
    fn test_other_database_errors_are_not_unique_violations() {
        assert_eq!(unique_violation(&db_error(ErrorKind::ForeignKeyViolation)), None);
        assert_eq!(unique_violation(&sqlx::Error::RowNotFound.into()), None);
        assert_eq!(unique_violation(&anyhow::anyhow!("connection reset")), None);
    }
}
