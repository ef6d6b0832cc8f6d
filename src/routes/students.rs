use crate::{
    data::{
        DeleteConfirmationForm, StudentId,
        student::{Student, StudentField, StudentForm},
        validation::ValidationErrors,
    },
    error::{RegistryError, RegistryResult},
    maud_conveniences::{
        FormField, InputKind, detail_row, form_submit_button, link_button, render_table, title,
    },
    registry,
    state::RegistryState,
};
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};

pub const STUDENT_FORM_FIELDS: [FormField; 8] = [
    FormField {
        field: StudentField::FirstName,
        kind: InputKind::Text,
        placeholder: "First name",
    },
    FormField {
        field: StudentField::LastName,
        kind: InputKind::Text,
        placeholder: "Last name",
    },
    FormField {
        field: StudentField::Email,
        kind: InputKind::Email,
        placeholder: "email@example.com",
    },
    FormField {
        field: StudentField::RollNumber,
        kind: InputKind::Text,
        placeholder: "e.g. CSE001",
    },
    FormField {
        field: StudentField::Phone,
        kind: InputKind::Tel,
        placeholder: "Phone number",
    },
    FormField {
        field: StudentField::DateOfBirth,
        kind: InputKind::Date,
        placeholder: "YYYY-MM-DD",
    },
    FormField {
        field: StudentField::Address,
        kind: InputKind::TextArea,
        placeholder: "Address",
    },
    FormField {
        field: StudentField::Course,
        kind: InputKind::Text,
        placeholder: "Course name",
    },
];

const LIST_URL: &str = "/students";

fn card(markup: Markup) -> Markup {
    html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full flex flex-col space-y-4" {
            (markup)
        }
    }
}

fn student_form(
    heading: &'static str,
    action: &str,
    values: &StudentForm,
    errors: Option<&ValidationErrors>,
) -> Markup {
    card(html! {
        (title(heading))
        @if errors.is_some() {
            div role="alert" class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative" {
                strong class="font-bold" {"Please correct the errors below."}
            }
        }
        form method="post" action=(action) class="p-4" {
            @for field in &STUDENT_FORM_FIELDS {
                (field.render(values, errors))
            }
            (form_submit_button(Some("Save")))
        }
        (link_button(LIST_URL, "Cancel", "slate"))
    })
}

/// Sends the caller back to the list, or re-shows the form with the field errors.
fn form_outcome(
    state: &RegistryState,
    result: RegistryResult<Student>,
    heading: &'static str,
    action: &str,
    submitted: &StudentForm,
) -> RegistryResult<Response> {
    match result {
        Ok(_) => Ok(Redirect::to(LIST_URL).into_response()),
        Err(RegistryError::Validation { errors }) => {
            warn!(fields = ?errors.fields(), "Student form rejected");
            let page = state.render(student_form(heading, action, submitted, Some(&errors)));
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn get_students(State(state): State<RegistryState>) -> RegistryResult<Markup> {
    let students = registry::list(state.store()).await?;

    let rows: Vec<[Markup; 7]> = students
        .iter()
        .map(|student| {
            let id = student.id;
            [
                html! { (student.roll_number) },
                html! { a href={"/students/" (id)} class="text-blue-200 underline" {(student.full_name())} },
                html! { a href={"mailto:" (student.email)} class="text-blue-200 underline" {(student.email)} },
                html! { (student.phone.as_deref().unwrap_or("-")) },
                html! { (student.course.as_deref().unwrap_or("-")) },
                html! { (student.enrolled_at.date().to_string()) },
                html! {
                    div class="flex flex-row space-x-2" {
                        (link_button(&format!("/students/{id}/edit"), "Edit", "blue"))
                        (link_button(&format!("/students/{id}/delete"), "Delete", "red"))
                    }
                },
            ]
        })
        .collect();

    Ok(state.render(card(html! {
        div class="flex flex-row items-center justify-between" {
            p class="text-gray-300" {(students.len()) " registered"}
            (link_button("/students/new", "Register Student", "blue"))
        }
        @if students.is_empty() {
            (title("Students"))
            p class="text-gray-300 italic" {"No students registered yet."}
        } @else {
            (render_table(
                "Students",
                ["Roll Number", "Name", "Email", "Phone", "Course", "Enrolled", ""],
                rows,
            ))
        }
    })))
}

pub async fn get_new_student_form(State(state): State<RegistryState>) -> Markup {
    state.render(student_form(
        "Register Student",
        "/students/new",
        &StudentForm::default(),
        None,
    ))
}

pub async fn post_new_student(
    State(state): State<RegistryState>,
    Form(form): Form<StudentForm>,
) -> RegistryResult<Response> {
    let result = registry::create(state.store(), &form).await;
    form_outcome(&state, result, "Register Student", "/students/new", &form)
}

pub async fn get_student(
    State(state): State<RegistryState>,
    Path(id): Path<StudentId>,
) -> RegistryResult<Markup> {
    let student = registry::get(state.store(), id).await?;

    Ok(state.render(card(html! {
        (title(&student))
        div class="py-4" {
            (detail_row("Email", student.email.as_str()))
            (detail_row("Phone", student.phone.as_deref().unwrap_or("-")))
            (detail_row("Date of Birth", student.date_of_birth.map(|d| d.to_string()).unwrap_or_else(|| "-".into())))
            (detail_row("Address", student.address.as_deref().unwrap_or("-")))
            (detail_row("Course", student.course.as_deref().unwrap_or("-")))
            (detail_row("Enrolled", student.enrolled_at.date().to_string()))
        }
        div class="flex flex-row space-x-4" {
            (link_button(&format!("/students/{id}/edit"), "Edit", "blue"))
            (link_button(&format!("/students/{id}/delete"), "Delete", "red"))
            (link_button(LIST_URL, "Back", "slate"))
        }
    })))
}

pub async fn get_edit_student_form(
    State(state): State<RegistryState>,
    Path(id): Path<StudentId>,
) -> RegistryResult<Markup> {
    let student = registry::get(state.store(), id).await?;

    Ok(state.render(student_form(
        "Update Student",
        &format!("/students/{id}/edit"),
        &student.to_form(),
        None,
    )))
}

pub async fn post_edit_student(
    State(state): State<RegistryState>,
    Path(id): Path<StudentId>,
    Form(form): Form<StudentForm>,
) -> RegistryResult<Response> {
    let result = registry::update(state.store(), id, &form).await;
    form_outcome(
        &state,
        result,
        "Update Student",
        &format!("/students/{id}/edit"),
        &form,
    )
}

fn delete_confirmation(student: &Student, reminder: bool) -> Markup {
    let id = student.id;

    card(html! {
        (title("Delete Student"))
        @if reminder {
            div role="alert" class="bg-yellow-100 border border-yellow-400 text-yellow-800 px-4 py-3 rounded relative" {
                "Nothing was deleted. Press the button below to confirm."
            }
        }
        p class="text-gray-200" {
            "Are you sure you want to delete "
            strong {(student)}
            "? This cannot be undone."
        }
        form method="post" action={"/students/" (id) "/delete"} class="flex flex-row space-x-4" {
            input type="hidden" name="confirm" value="true";
            button type="submit" class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" {
                "Yes, delete"
            }
            (link_button(LIST_URL, "Cancel", "slate"))
        }
    })
}

pub async fn get_delete_student(
    State(state): State<RegistryState>,
    Path(id): Path<StudentId>,
) -> RegistryResult<Markup> {
    let student = registry::confirm_delete(state.store(), id).await?;
    Ok(state.render(delete_confirmation(&student, false)))
}

pub async fn post_delete_student(
    State(state): State<RegistryState>,
    Path(id): Path<StudentId>,
    Form(DeleteConfirmationForm { confirm }): Form<DeleteConfirmationForm>,
) -> RegistryResult<Response> {
    if !confirm {
        let student = registry::confirm_delete(state.store(), id).await?;
        return Ok(state.render(delete_confirmation(&student, true)).into_response());
    }

    registry::delete(state.store(), id).await?;
    Ok(Redirect::to(LIST_URL).into_response())
}
