use crate::data::{StudentId, validation::ValidationErrors};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistryError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{}` as a number", name))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unknown store backend {:?}, expected `postgres` or `memory`", found))]
    UnknownStoreBackend { found: String },
    #[snafu(display("Invalid student details: {}", errors))]
    Validation { errors: ValidationErrors },
    #[snafu(display("Unable to find student with ID: {}", id))]
    MissingStudent { id: StudentId },
}

impl From<ValidationErrors> for RegistryError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation { errors }
    }
}

impl RegistryError {
    pub fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::UNPROCESSABLE_ENTITY; //bad input

        match self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MakeQuery { source } => match source {
                sqlx::Error::RowNotFound => NF,
                _ => ISE,
            },
            Self::MigrateError { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParseNumber { .. } => ISE,
            Self::UnknownStoreBackend { .. } => ISE,
            Self::Validation { .. } => BI,
            Self::MissingStudent { .. } => NF,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(?self, "Rejected request");
        }

        let body = html! {
            div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                strong class="font-bold" {"Registry Error "}
                span {(self.to_string())}
                br;
                a href="/students" class="underline" {"Back to all students"}
            }
        };

        (status_code, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::student::StudentField;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            RegistryError::MissingStudent { id: 7 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RegistryError::from(ValidationErrors::single(StudentField::Email, "taken"))
                .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            RegistryError::UnknownStoreBackend {
                found: "sqlite".into()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_student_names_the_id() {
        assert_eq!(
            RegistryError::MissingStudent { id: 42 }.to_string(),
            "Unable to find student with ID: 42"
        );
    }
}
