use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("could not connect to the database: {0}")]
    Connection(#[source] DbErr),

    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("referenced row does not exist: {0}")]
    ForeignKey(String),

    #[error("rating {rating_id} is still used by {movies} movie(s)")]
    RatingInUse { rating_id: i32, movies: u64 },

    #[error(transparent)]
    Database(DbErr),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::ForeignKey(detail),
            _ => Self::Database(err),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
