use crate::{
    data::{
        StudentId,
        student::{NewStudent, Student, StudentField},
        validation::ValidationErrors,
    },
    error::RegistryResult,
    store::StudentStore,
};
use async_trait::async_trait;
use std::{cmp::Reverse, collections::BTreeMap};
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Process-local store, for running without Postgres and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: StudentId,
    students: BTreeMap<StudentId, Student>,
}

impl Inner {
    /// Same checks the unique constraints make in Postgres, email first.
    fn check_unique(&self, candidate: &NewStudent, except: Option<StudentId>) -> Result<(), ValidationErrors> {
        let others = || self.students.values().filter(move |s| Some(s.id) != except);

        if others().any(|s| s.email == candidate.email.as_str()) {
            return Err(ValidationErrors::single(
                StudentField::Email,
                "Student with this Email already exists.",
            ));
        }
        if others().any(|s| s.roll_number == candidate.roll_number) {
            return Err(ValidationErrors::single(
                StudentField::RollNumber,
                "Student with this Roll Number already exists.",
            ));
        }
        Ok(())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn get_all(&self) -> RegistryResult<Vec<Student>> {
        let mut all: Vec<_> = self.inner.read().await.students.values().cloned().collect();
        all.sort_by_key(|s| (Reverse(s.enrolled_at), s.id));
        Ok(all)
    }

    async fn get_by_id(&self, id: StudentId) -> RegistryResult<Option<Student>> {
        Ok(self.inner.read().await.students.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> RegistryResult<Option<Student>> {
        Ok(self
            .inner
            .read()
            .await
            .students
            .values()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn get_by_roll_number(&self, roll_number: &str) -> RegistryResult<Option<Student>> {
        Ok(self
            .inner
            .read()
            .await
            .students
            .values()
            .find(|s| s.roll_number == roll_number)
            .cloned())
    }

    async fn insert(
        &self,
        to_be_added: NewStudent,
        enrolled_at: OffsetDateTime,
    ) -> RegistryResult<Student> {
        let mut inner = self.inner.write().await;
        inner.check_unique(&to_be_added, None)?;

        inner.last_id += 1;
        let student = Student {
            id: inner.last_id,
            first_name: to_be_added.first_name,
            last_name: to_be_added.last_name,
            email: to_be_added.email.to_string(),
            roll_number: to_be_added.roll_number,
            phone: to_be_added.phone,
            date_of_birth: to_be_added.date_of_birth,
            address: to_be_added.address,
            course: to_be_added.course,
            enrolled_at,
        };
        inner.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, id: StudentId, changes: NewStudent) -> RegistryResult<Option<Student>> {
        let mut inner = self.inner.write().await;
        if !inner.students.contains_key(&id) {
            return Ok(None);
        }
        inner.check_unique(&changes, Some(id))?;

        let Some(student) = inner.students.get_mut(&id) else {
            return Ok(None);
        };
        student.first_name = changes.first_name;
        student.last_name = changes.last_name;
        student.email = changes.email.to_string();
        student.roll_number = changes.roll_number;
        student.phone = changes.phone;
        student.date_of_birth = changes.date_of_birth;
        student.address = changes.address;
        student.course = changes.course;
        Ok(Some(student.clone()))
    }

    async fn remove(&self, id: StudentId) -> RegistryResult<bool> {
        Ok(self.inner.write().await.students.remove(&id).is_some())
    }

    async fn count(&self) -> RegistryResult<i64> {
        Ok(i64::try_from(self.inner.read().await.students.len()).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::student::StudentForm, error::RegistryError};
    use time::Duration;

    fn new_student(email: &str, roll_number: &str) -> NewStudent {
        StudentForm {
            first_name: "Priya".into(),
            last_name: "Singh".into(),
            email: email.into(),
            roll_number: roll_number.into(),
            ..StudentForm::default()
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn insert_enforces_both_unique_keys() {
        let store = MemoryStore::new();
        let now = OffsetDateTime::now_utc();
        store
            .insert(new_student("priya.singh@example.com", "CSE002"), now)
            .await
            .unwrap();

        let err = store
            .insert(new_student("priya.singh@example.com", "CSE099"), now)
            .await
            .unwrap_err();
        let RegistryError::Validation { errors } = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.fields(), vec![StudentField::Email]);

        let err = store
            .insert(new_student("someone.else@example.com", "CSE002"), now)
            .await
            .unwrap_err();
        let RegistryError::Validation { errors } = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.fields(), vec![StudentField::RollNumber]);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn get_all_orders_newest_first_then_by_id() {
        let store = MemoryStore::new();
        let earlier = OffsetDateTime::now_utc() - Duration::days(1);
        let later = OffsetDateTime::now_utc();

        let a = store.insert(new_student("a@example.com", "A"), earlier).await.unwrap();
        let b = store.insert(new_student("b@example.com", "B"), later).await.unwrap();
        let c = store.insert(new_student("c@example.com", "C"), later).await.unwrap();

        let ids: Vec<_> = store.get_all().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b.id, c.id, a.id]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_removal() {
        let store = MemoryStore::new();
        let now = OffsetDateTime::now_utc();
        let first = store.insert(new_student("a@example.com", "A"), now).await.unwrap();
        assert!(store.remove(first.id).await.unwrap());
        assert!(!store.remove(first.id).await.unwrap());

        let second = store.insert(new_student("a@example.com", "A"), now).await.unwrap();
        assert_ne!(first.id, second.id);
    }
}
