use crate::{
    data::{
        StudentId,
        student::{NewStudent, Student},
    },
    error::RegistryResult,
};
use async_trait::async_trait;
use std::fmt::Debug;
use time::OffsetDateTime;

pub mod memory;
pub mod postgres;

/// Durable home of the `students` table.
///
/// Implementations enforce both unique keys themselves: an insert or update that
/// collides on email or roll number fails with `RegistryError::Validation` naming
/// the field, whatever the caller checked beforehand.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    /// Newest enrolment first, then by ascending id.
    async fn get_all(&self) -> RegistryResult<Vec<Student>>;
    async fn get_by_id(&self, id: StudentId) -> RegistryResult<Option<Student>>;
    async fn get_by_email(&self, email: &str) -> RegistryResult<Option<Student>>;
    async fn get_by_roll_number(&self, roll_number: &str) -> RegistryResult<Option<Student>>;
    async fn insert(
        &self,
        to_be_added: NewStudent,
        enrolled_at: OffsetDateTime,
    ) -> RegistryResult<Student>;
    /// Overwrites every mutable column. `Ok(None)` when there is no such student.
    async fn update(&self, id: StudentId, changes: NewStudent) -> RegistryResult<Option<Student>>;
    /// `Ok(false)` when there was nothing to delete.
    async fn remove(&self, id: StudentId) -> RegistryResult<bool>;
    async fn count(&self) -> RegistryResult<i64>;
}
