//! The four student operations. Each takes the storage handle explicitly; nothing
//! here holds state between calls.

use crate::{
    data::{
        StudentId,
        student::{NewStudent, Student, StudentField, StudentForm},
        validation::ValidationErrors,
    },
    error::{MissingStudentSnafu, RegistryResult},
    store::StudentStore,
};
use snafu::OptionExt;
use time::OffsetDateTime;

pub async fn list(store: &dyn StudentStore) -> RegistryResult<Vec<Student>> {
    store.get_all().await
}

pub async fn get(store: &dyn StudentStore, id: StudentId) -> RegistryResult<Student> {
    store.get_by_id(id).await?.context(MissingStudentSnafu { id })
}

/// Validates `form` and stores it as a new student enrolled now.
pub async fn create(store: &dyn StudentStore, form: &StudentForm) -> RegistryResult<Student> {
    let to_be_added = form.validate()?;
    ensure_unique(store, &to_be_added, None).await?;

    let student = store.insert(to_be_added, OffsetDateTime::now_utc()).await?;
    info!(id = student.id, roll_number = %student.roll_number, "Registered student");
    Ok(student)
}

/// Overwrites the mutable fields of student `id`. Its id and enrolment time never change.
pub async fn update(
    store: &dyn StudentStore,
    id: StudentId,
    form: &StudentForm,
) -> RegistryResult<Student> {
    get(store, id).await?;

    let changes = form.validate()?;
    ensure_unique(store, &changes, Some(id)).await?;

    let student = store
        .update(id, changes)
        .await?
        .context(MissingStudentSnafu { id })?;
    info!(id, roll_number = %student.roll_number, "Updated student");
    Ok(student)
}

/// First half of a deletion: fetches the student to show for confirmation and
/// changes nothing.
pub async fn confirm_delete(store: &dyn StudentStore, id: StudentId) -> RegistryResult<Student> {
    get(store, id).await
}

/// Second half of a deletion, only called once the user has confirmed.
pub async fn delete(store: &dyn StudentStore, id: StudentId) -> RegistryResult<()> {
    if !store.remove(id).await? {
        return MissingStudentSnafu { id }.fail();
    }
    info!(id, "Deleted student");
    Ok(())
}

/// Email first, then roll number; the first collision ends the check. `except` is
/// the student being updated, which may keep its own values.
async fn ensure_unique(
    store: &dyn StudentStore,
    candidate: &NewStudent,
    except: Option<StudentId>,
) -> RegistryResult<()> {
    let is_other = |found: &Option<Student>| found.as_ref().is_some_and(|s| Some(s.id) != except);

    if is_other(&store.get_by_email(candidate.email.as_str()).await?) {
        return Err(ValidationErrors::single(
            StudentField::Email,
            "Student with this Email already exists.",
        )
        .into());
    }
    if is_other(&store.get_by_roll_number(&candidate.roll_number).await?) {
        return Err(ValidationErrors::single(
            StudentField::RollNumber,
            "Student with this Roll Number already exists.",
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RegistryError, store::memory::MemoryStore};

    fn form(first_name: &str, email: &str, roll_number: &str) -> StudentForm {
        StudentForm {
            first_name: first_name.into(),
            last_name: "Verma".into(),
            email: email.into(),
            roll_number: roll_number.into(),
            ..StudentForm::default()
        }
    }

    fn anjali() -> StudentForm {
        StudentForm {
            phone: "9876543215".into(),
            ..form("Anjali", "anjali.verma@example.com", "CSE006")
        }
    }

    fn invalid_fields(err: RegistryError) -> Vec<StudentField> {
        match err {
            RegistryError::Validation { errors } => errors.fields(),
            other => panic!("expected a validation error, got {other}"),
        }
    }

    #[tokio::test]
    async fn created_student_is_listed_with_todays_enrolment() {
        let store = MemoryStore::new();
        let created = create(&store, &anjali()).await.unwrap();

        let all = list(&store).await.unwrap();
        assert_eq!(all, vec![created.clone()]);
        assert_eq!(created.first_name, "Anjali");
        assert_eq!(created.phone.as_deref(), Some("9876543215"));
        assert_eq!(created.enrolled_at.date(), OffsetDateTime::now_utc().date());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_persisting() {
        let store = MemoryStore::new();
        create(&store, &anjali()).await.unwrap();

        let err = create(&store, &form("Other", "anjali.verma@example.com", "CSE099"))
            .await
            .unwrap_err();
        assert_eq!(invalid_fields(err), vec![StudentField::Email]);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_roll_number_is_rejected() {
        let store = MemoryStore::new();
        create(&store, &anjali()).await.unwrap();

        let err = create(&store, &form("Other", "other@example.com", "CSE006"))
            .await
            .unwrap_err();
        assert_eq!(invalid_fields(err), vec![StudentField::RollNumber]);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn email_collision_is_reported_before_roll_number() {
        let store = MemoryStore::new();
        create(&store, &anjali()).await.unwrap();

        let err = create(&store, &anjali()).await.unwrap_err();
        assert_eq!(invalid_fields(err), vec![StudentField::Email]);
    }

    #[tokio::test]
    async fn update_keeping_own_email_succeeds_and_keeps_enrolment() {
        let store = MemoryStore::new();
        let before = create(&store, &anjali()).await.unwrap();

        let mut changes = anjali();
        changes.course = "Computer Science".into();
        changes.phone = String::new();
        let after = update(&store, before.id, &changes).await.unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.enrolled_at, before.enrolled_at);
        assert_eq!(after.email, before.email);
        assert_eq!(after.course.as_deref(), Some("Computer Science"));
        assert_eq!(after.phone, None);
        assert_eq!(get(&store, before.id).await.unwrap(), after);
    }

    #[tokio::test]
    async fn update_onto_another_students_email_fails() {
        let store = MemoryStore::new();
        create(&store, &anjali()).await.unwrap();
        let karan = create(&store, &form("Karan", "karan.nair@example.com", "CSE007"))
            .await
            .unwrap();

        let err = update(
            &store,
            karan.id,
            &form("Karan", "anjali.verma@example.com", "CSE007"),
        )
        .await
        .unwrap_err();
        assert_eq!(invalid_fields(err), vec![StudentField::Email]);
        assert_eq!(get(&store, karan.id).await.unwrap(), karan);
    }

    #[tokio::test]
    async fn update_of_missing_student_is_not_found_even_with_bad_input() {
        let store = MemoryStore::new();
        let err = update(&store, 99, &StudentForm::default()).await.unwrap_err();
        assert!(matches!(err, RegistryError::MissingStudent { id: 99 }));
    }

    #[tokio::test]
    async fn delete_needs_an_existing_student() {
        let store = MemoryStore::new();
        assert!(matches!(
            delete(&store, 1).await.unwrap_err(),
            RegistryError::MissingStudent { id: 1 }
        ));
        assert!(matches!(
            confirm_delete(&store, 1).await.unwrap_err(),
            RegistryError::MissingStudent { id: 1 }
        ));
    }

    #[tokio::test]
    async fn confirmed_delete_removes_exactly_one() {
        let store = MemoryStore::new();
        let doomed = create(&store, &anjali()).await.unwrap();
        let karan = create(&store, &form("Karan", "karan.nair@example.com", "CSE007"))
            .await
            .unwrap();

        assert_eq!(confirm_delete(&store, doomed.id).await.unwrap(), doomed);
        assert_eq!(list(&store).await.unwrap().len(), 2);

        delete(&store, doomed.id).await.unwrap();
        let remaining = list(&store).await.unwrap();
        assert_eq!(remaining, vec![karan]);
    }
}
