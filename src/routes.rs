use crate::{
    routes::{
        index::get_index_route,
        students::{
            get_delete_student, get_edit_student_form, get_new_student_form, get_student,
            get_students, post_delete_student, post_edit_student, post_new_student,
        },
    },
    state::RegistryState,
};
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

/// Student forms are a few hundred bytes; anything near this is not a form.
const MAX_BODY_BYTES: usize = 64 * 1024;

pub mod index;
pub mod students;

pub fn router(state: RegistryState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/students", get(get_students))
        .route(
            "/students/new",
            get(get_new_student_form).post(post_new_student),
        )
        .route("/students/{id}", get(get_student))
        .route(
            "/students/{id}/edit",
            get(get_edit_student_form).post(post_edit_student),
        )
        .route(
            "/students/{id}/delete",
            get(get_delete_student).post(post_delete_student),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
