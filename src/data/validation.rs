use crate::data::student::StudentField;
use std::{borrow::Cow, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: StudentField,
    pub message: Cow<'static, str>,
}

/// Field-level problems found by one stage of the validation pipeline.
///
/// Never empty when handed out as an `Err`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: StudentField, message: impl Into<Cow<'static, str>>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: StudentField, message: impl Into<Cow<'static, str>>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: StudentField) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_ref())
    }

    pub fn fields(&self) -> Vec<StudentField> {
        let mut fields: Vec<_> = self.0.iter().map(|e| e.field).collect();
        fields.dedup();
        fields
    }

    /// `Ok(())` when nothing was pushed, so a stage can end with `errors.into_result()?`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, FieldError { field, message }) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_every_field() {
        let mut errors = ValidationErrors::single(StudentField::FirstName, "This field is required.");
        errors.push(StudentField::Email, "Enter a valid email address.");

        assert_eq!(
            errors.to_string(),
            "first_name: This field is required.; email: Enter a valid email address."
        );
        assert_eq!(errors.fields(), vec![StudentField::FirstName, StudentField::Email]);
    }

    #[test]
    fn empty_errors_are_ok() {
        assert!(ValidationErrors::default().into_result().is_ok());
        assert!(
            ValidationErrors::single(StudentField::Course, "too long")
                .into_result()
                .is_err()
        );
    }
}
