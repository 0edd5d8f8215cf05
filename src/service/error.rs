use axum::http::StatusCode;
use thiserror::Error;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Project {0} not found")]
    ProjectNotFound(i64),

    #[error("Proposal {0} not found")]
    ProposalNotFound(i64),

    #[error("Contract {0} not found")]
    ContractNotFound(i64),

    #[error("Message {0} not found")]
    MessageNotFound(i64),

    #[error("Review {0} not found")]
    ReviewNotFound(i64),

    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("User {0} does not own project {1}")]
    NotProjectOwner(i64, i64),

    #[error("User {0} is not a participant of project {1}")]
    NotParticipant(i64, i64),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("You have already submitted a proposal for this project")]
    DuplicateProposal,

    #[error("Proposal {0} has already been decided")]
    ProposalAlreadyDecided(i64),

    #[error("You have already reviewed this user for this project")]
    DuplicateReview,

    #[error("A contract already exists for project {0}")]
    ContractAlreadyExists(i64),

    #[error("Project {0} has no accepted proposal to derive a contract from")]
    NoAcceptedProposal(i64),

    #[error("Project {0} has more than one accepted proposal")]
    AmbiguousAcceptedProposal(i64),

    #[error("You cannot review yourself")]
    SelfReview,

    #[error("A message must carry content or at least one attachment")]
    EmptyMessage,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ProjectNotFound(_)
            | ServiceError::ProposalNotFound(_)
            | ServiceError::ContractNotFound(_)
            | ServiceError::MessageNotFound(_)
            | ServiceError::ReviewNotFound(_)
            | ServiceError::UserNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::NotProjectOwner(_, _)
            | ServiceError::NotParticipant(_, _)
            | ServiceError::PermissionDenied(_) => StatusCode::FORBIDDEN,

            ServiceError::DuplicateProposal
            | ServiceError::ProposalAlreadyDecided(_)
            | ServiceError::DuplicateReview
            | ServiceError::ContractAlreadyExists(_)
            | ServiceError::NoAcceptedProposal(_)
            | ServiceError::AmbiguousAcceptedProposal(_) => StatusCode::CONFLICT,

            ServiceError::SelfReview
            | ServiceError::EmptyMessage
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Translate a storage-level unique violation into the given domain
    /// conflict; anything else stays a database error.
    pub fn on_unique_violation(err: sqlx::Error, conflict: ServiceError) -> ServiceError {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return conflict;
            }
        }
        ServiceError::Database(err)
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Storage details stay server-side.
            tracing::error!("service error: {}", error);
            return HttpError::server_error("Something went wrong. Please try again later");
        }

        HttpError::new(error.to_string(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_family_maps_to_404() {
        for err in [
            ServiceError::ProjectNotFound(1),
            ServiceError::ProposalNotFound(1),
            ServiceError::ContractNotFound(1),
            ServiceError::MessageNotFound(1),
            ServiceError::ReviewNotFound(1),
            ServiceError::UserNotFound(1),
        ] {
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn conflict_family_maps_to_409() {
        for err in [
            ServiceError::DuplicateProposal,
            ServiceError::ProposalAlreadyDecided(1),
            ServiceError::DuplicateReview,
            ServiceError::ContractAlreadyExists(1),
            ServiceError::NoAcceptedProposal(1),
            ServiceError::AmbiguousAcceptedProposal(1),
        ] {
            assert_eq!(err.status_code(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn database_errors_are_not_leaked() {
        let http: HttpError = ServiceError::Database(sqlx::Error::RowNotFound).into();
        assert_eq!(http.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!http.message.contains("row"));
    }

    #[test]
    fn non_unique_errors_stay_database_errors() {
        let err = ServiceError::on_unique_violation(
            sqlx::Error::RowNotFound,
            ServiceError::DuplicateProposal,
        );
        assert!(matches!(err, ServiceError::Database(_)));
    }

    #[derive(Debug)]
    struct FakeUniqueViolation;

    impl std::fmt::Display for FakeUniqueViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "duplicate key value violates unique constraint")
        }
    }

    impl std::error::Error for FakeUniqueViolation {}

    impl sqlx::error::DatabaseError for FakeUniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn unique_violations_become_the_given_conflict() {
        let err = ServiceError::on_unique_violation(
            sqlx::Error::Database(Box::new(FakeUniqueViolation)),
            ServiceError::DuplicateReview,
        );
        assert!(matches!(err, ServiceError::DuplicateReview));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
