use crate::{
    data::{
        StudentId,
        student::{NewStudent, Student, StudentField},
        validation::ValidationErrors,
    },
    error::{MakeQuerySnafu, MigrateSnafu, OpenDatabaseSnafu, RegistryError, RegistryResult},
    store::StudentStore,
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use time::OffsetDateTime;

const SELECT_STUDENTS: &str = "SELECT id, first_name, last_name, email, roll_number, phone, date_of_birth, address, course, enrolled_at FROM public.students";

#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    pub async fn connect(options: PgPoolOptions, url: &str) -> RegistryResult<Self> {
        let pool = options.connect(url).await.context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;
        info!("Database migrations applied");

        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Unique-key violations become validation errors on the matching field; anything
/// else is a query error.
fn map_write_error(source: sqlx::Error) -> RegistryError {
    if let sqlx::Error::Database(db_error) = &source {
        if db_error.is_unique_violation() {
            match db_error.constraint() {
                Some("students_email_key") => {
                    return ValidationErrors::single(
                        StudentField::Email,
                        "Student with this Email already exists.",
                    )
                    .into();
                }
                Some("students_roll_number_key") => {
                    return ValidationErrors::single(
                        StudentField::RollNumber,
                        "Student with this Roll Number already exists.",
                    )
                    .into();
                }
                _ => {}
            }
        }
    }

    RegistryError::MakeQuery { source }
}

#[async_trait]
impl StudentStore for PostgresStore {
    async fn get_all(&self) -> RegistryResult<Vec<Student>> {
        sqlx::query_as::<_, Student>(&format!(
            "{SELECT_STUDENTS} ORDER BY enrolled_at DESC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn get_by_id(&self, id: StudentId) -> RegistryResult<Option<Student>> {
        sqlx::query_as::<_, Student>(&format!("{SELECT_STUDENTS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context(MakeQuerySnafu)
    }

    async fn get_by_email(&self, email: &str) -> RegistryResult<Option<Student>> {
        sqlx::query_as::<_, Student>(&format!("{SELECT_STUDENTS} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context(MakeQuerySnafu)
    }

    async fn get_by_roll_number(&self, roll_number: &str) -> RegistryResult<Option<Student>> {
        sqlx::query_as::<_, Student>(&format!("{SELECT_STUDENTS} WHERE roll_number = $1"))
            .bind(roll_number)
            .fetch_optional(&self.pool)
            .await
            .context(MakeQuerySnafu)
    }

    async fn insert(
        &self,
        to_be_added: NewStudent,
        enrolled_at: OffsetDateTime,
    ) -> RegistryResult<Student> {
        let NewStudent {
            first_name,
            last_name,
            email,
            roll_number,
            phone,
            date_of_birth,
            address,
            course,
        } = to_be_added;

        sqlx::query_as::<_, Student>(
            "INSERT INTO public.students (first_name, last_name, email, roll_number, phone, date_of_birth, address, course, enrolled_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email.as_str())
        .bind(roll_number)
        .bind(phone)
        .bind(date_of_birth)
        .bind(address)
        .bind(course)
        .bind(enrolled_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, id: StudentId, changes: NewStudent) -> RegistryResult<Option<Student>> {
        let NewStudent {
            first_name,
            last_name,
            email,
            roll_number,
            phone,
            date_of_birth,
            address,
            course,
        } = changes;

        //enrolled_at is never part of an update
        sqlx::query_as::<_, Student>(
            "UPDATE public.students SET first_name = $2, last_name = $3, email = $4, roll_number = $5, phone = $6, date_of_birth = $7, address = $8, course = $9 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(email.as_str())
        .bind(roll_number)
        .bind(phone)
        .bind(date_of_birth)
        .bind(address)
        .bind(course)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn remove(&self, id: StudentId) -> RegistryResult<bool> {
        let result = sqlx::query("DELETE FROM public.students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context(MakeQuerySnafu)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RegistryResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT count(*) FROM public.students")
            .fetch_one(&self.pool)
            .await
            .context(MakeQuerySnafu)
    }
}
