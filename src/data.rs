use serde::Deserialize;

pub mod student;
pub mod validation;

pub type StudentId = i32;

#[derive(Deserialize, Debug, Default)]
pub struct DeleteConfirmationForm {
    #[serde(default)]
    pub confirm: bool,
}
