use crate::data::{StudentId, validation::ValidationErrors};
use email_address::EmailAddress;
use maud::{Escaper, Render};
use serde::Deserialize;
use std::{fmt::Write, str::FromStr};
use time::{Date, OffsetDateTime, format_description::FormatItem, macros::format_description};

pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roll_number: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub address: Option<String>,
    pub course: Option<String>,
    pub enrolled_at: OffsetDateTime,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Current values, shaped like a submission, for prefilling the edit form.
    pub fn to_form(&self) -> StudentForm {
        StudentForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            roll_number: self.roll_number.clone(),
            phone: self.phone.clone().unwrap_or_default(),
            date_of_birth: self
                .date_of_birth
                .and_then(|d| d.format(DATE_FORMAT).ok())
                .unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            course: self.course.clone().unwrap_or_default(),
        }
    }
}

impl Render for Student {
    fn render_to(&self, buffer: &mut String) {
        //writing into a `String` never fails
        let _ = write!(
            Escaper::new(buffer),
            "{} {} ({})",
            self.first_name,
            self.last_name,
            self.roll_number
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    FirstName,
    LastName,
    Email,
    RollNumber,
    Phone,
    DateOfBirth,
    Address,
    Course,
}

impl StudentField {
    pub const ALL: [Self; 8] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::RollNumber,
        Self::Phone,
        Self::DateOfBirth,
        Self::Address,
        Self::Course,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::RollNumber => "roll_number",
            Self::Phone => "phone",
            Self::DateOfBirth => "date_of_birth",
            Self::Address => "address",
            Self::Course => "course",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::RollNumber => "Roll Number",
            Self::Phone => "Phone",
            Self::DateOfBirth => "Date of Birth",
            Self::Address => "Address",
            Self::Course => "Course",
        }
    }

    pub const fn is_required(self) -> bool {
        matches!(
            self,
            Self::FirstName | Self::LastName | Self::Email | Self::RollNumber
        )
    }

    /// Column width in characters, `None` for unbounded text and dates.
    pub const fn max_len(self) -> Option<usize> {
        match self {
            Self::FirstName | Self::LastName => Some(100),
            Self::Email => Some(254),
            Self::RollNumber => Some(30),
            Self::Phone => Some(15),
            Self::Course => Some(120),
            Self::DateOfBirth | Self::Address => None,
        }
    }
}

/// Raw submission from the student form. Every field defaults to empty so a
/// missing input is reported by validation rather than rejected by the extractor.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StudentForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roll_number: String,
    pub phone: String,
    pub date_of_birth: String,
    pub address: String,
    pub course: String,
}

/// A submission that passed the field-level stages of validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub roll_number: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub address: Option<String>,
    pub course: Option<String>,
}

impl StudentForm {
    pub fn value(&self, field: StudentField) -> &str {
        match field {
            StudentField::FirstName => &self.first_name,
            StudentField::LastName => &self.last_name,
            StudentField::Email => &self.email,
            StudentField::RollNumber => &self.roll_number,
            StudentField::Phone => &self.phone,
            StudentField::DateOfBirth => &self.date_of_birth,
            StudentField::Address => &self.address,
            StudentField::Course => &self.course,
        }
    }

    /// Required-field presence, then field format. Uniqueness needs the store and
    /// is checked by the registry afterwards.
    pub fn validate(&self) -> Result<NewStudent, ValidationErrors> {
        let mut missing = ValidationErrors::default();
        for field in StudentField::ALL {
            if field.is_required() && self.value(field).trim().is_empty() {
                missing.push(field, "This field is required.");
            }
        }
        missing.into_result()?;

        let mut malformed = ValidationErrors::default();
        for field in StudentField::ALL {
            if let Some(max) = field.max_len() {
                let len = self.value(field).trim().chars().count();
                if len > max {
                    malformed.push(
                        field,
                        format!("Ensure this value has at most {max} characters (it has {len})."),
                    );
                }
            }
        }

        let email = parse_email(self.email.trim());
        if email.is_none() {
            malformed.push(StudentField::Email, "Enter a valid email address.");
        }

        let date_of_birth = match self.date_of_birth.trim() {
            "" => None,
            dob => match Date::parse(dob, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    malformed.push(StudentField::DateOfBirth, "Enter a valid date (YYYY-MM-DD).");
                    None
                }
            },
        };

        malformed.into_result()?;
        let Some(email) = email else {
            return Err(ValidationErrors::single(
                StudentField::Email,
                "Enter a valid email address.",
            ));
        };

        Ok(NewStudent {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email,
            roll_number: self.roll_number.trim().to_string(),
            phone: non_empty(&self.phone),
            date_of_birth,
            address: non_empty(&self.address),
            course: non_empty(&self.course),
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Bare `local@domain.tld` addresses only: no display names, no single-label domains.
fn parse_email(s: &str) -> Option<EmailAddress> {
    if s.contains(|c: char| c.is_whitespace() || c == '<' || c == '>') {
        return None;
    }
    let email = EmailAddress::from_str(s).ok()?;
    let domain = email.domain();
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return None;
    }
    Some(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn anjali() -> StudentForm {
        StudentForm {
            first_name: "Anjali".into(),
            last_name: "Verma".into(),
            email: "anjali.verma@example.com".into(),
            roll_number: "CSE006".into(),
            phone: "9876543215".into(),
            ..StudentForm::default()
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_blanks_become_none() {
        let mut form = anjali();
        form.first_name = "  Anjali ".into();
        form.address = "   ".into();
        form.date_of_birth = "2004-07-25".into();

        let new = form.validate().expect("form should validate");
        assert_eq!(new.first_name, "Anjali");
        assert_eq!(new.email.as_str(), "anjali.verma@example.com");
        assert_eq!(new.phone.as_deref(), Some("9876543215"));
        assert_eq!(new.date_of_birth, Some(date!(2004 - 07 - 25)));
        assert_eq!(new.address, None);
        assert_eq!(new.course, None);
    }

    #[test]
    fn every_missing_required_field_is_reported() {
        let form = StudentForm {
            email: "not-even-an-email".into(),
            ..StudentForm::default()
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                StudentField::FirstName,
                StudentField::LastName,
                StudentField::RollNumber
            ]
        );
    }

    #[test]
    fn malformed_email_is_rejected_after_presence() {
        for bad in ["anjali", "anjali@", "anjali@example", "Anjali <anjali@example.com>"] {
            let mut form = anjali();
            form.email = bad.into();
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.fields(), vec![StudentField::Email], "{bad}");
        }
    }

    #[test]
    fn format_stage_reports_all_malformed_fields() {
        let mut form = anjali();
        form.roll_number = "X".repeat(31);
        form.phone = "1".repeat(16);
        form.date_of_birth = "25/07/2004".into();

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                StudentField::RollNumber,
                StudentField::Phone,
                StudentField::DateOfBirth
            ]
        );
    }

    #[test]
    fn student_round_trips_into_form() {
        let student = Student {
            id: 1,
            first_name: "Karan".into(),
            last_name: "Nair".into(),
            email: "karan.nair@example.com".into(),
            roll_number: "CSE007".into(),
            phone: None,
            date_of_birth: Some(date!(2005 - 02 - 14)),
            address: Some("147 Cedar Street, Kolkata, India".into()),
            course: None,
            enrolled_at: OffsetDateTime::UNIX_EPOCH,
        };

        let form = student.to_form();
        assert_eq!(form.date_of_birth, "2005-02-14");
        assert_eq!(form.phone, "");
        assert_eq!(student.render().0, "Karan Nair (CSE007)");
    }
}
