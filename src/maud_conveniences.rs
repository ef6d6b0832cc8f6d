use crate::data::{
    student::{StudentField, StudentForm},
    validation::ValidationErrors,
};
use maud::{Markup, Render, html};

const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
const INPUT_ERROR_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-red-500";

pub fn render_table<const N: usize>(
    overall_title: &'static str,
    titles: [&'static str; N],
    items: Vec<[Markup; N]>,
) -> Markup {
    html! {
        div class="container mx-auto" {
            (title(overall_title))
            div class="overflow-x-auto" {
                table class="min-w-full bg-gray-800 rounded shadow-md" {
                    thead class="bg-gray-700" {
                        tr {
                            @for title in titles {
                                th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                            }
                        }
                    }
                    tbody {
                        @for row in items {
                            tr {
                                @for col in row {
                                    td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Date,
    TextArea,
}

impl InputKind {
    const fn html_type(self) -> &'static str {
        match self {
            Self::Text | Self::TextArea => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Date => "date",
        }
    }
}

/// Widget settings for one student input: what to draw, not what is valid.
#[derive(Debug, Clone, Copy)]
pub struct FormField {
    pub field: StudentField,
    pub kind: InputKind,
    pub placeholder: &'static str,
}

impl FormField {
    pub fn render(&self, values: &StudentForm, errors: Option<&ValidationErrors>) -> Markup {
        let id = self.field.name();
        let value = values.value(self.field);
        let messages: Vec<&str> = errors
            .map(|e| e.for_field(self.field).collect())
            .unwrap_or_default();
        let classes = if messages.is_empty() {
            INPUT_CLASSES
        } else {
            INPUT_ERROR_CLASSES
        };
        let label = if self.field.is_required() {
            self.field.label().to_string()
        } else {
            format!("{} (optional)", self.field.label())
        };

        let element = match self.kind {
            InputKind::TextArea => html! {
                textarea id=(id) name=(id) rows="3" placeholder=(self.placeholder) class=(classes) required[self.field.is_required()] {(value)}
            },
            kind => html! {
                input type=(kind.html_type()) id=(id) name=(id) value=(value) placeholder=(self.placeholder) class=(classes) required[self.field.is_required()];
            },
        };

        html! {
            div class="mb-4" {
                label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
                (element)
                @for message in messages {
                    p class="text-red-400 text-xs italic mt-1" {(message)}
                }
            }
        }
    }
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}

pub fn link_button(href: &str, text: &str, colour: &'static str) -> Markup {
    let classes = match colour {
        "red" => "bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded",
        "blue" => "bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded",
        _ => "bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded",
    };

    html! {
        a href=(href) class=(classes) {(text)}
    }
}

pub fn detail_row(label: &'static str, value: impl Render) -> Markup {
    html! {
        p class="text-gray-200 font-semibold" {
            (label) ": "
            span class="font-medium" {(value)}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_render_under_the_input() {
        let field = FormField {
            field: StudentField::Email,
            kind: InputKind::Email,
            placeholder: "email@example.com",
        };
        let values = StudentForm {
            email: "<nope>".into(),
            ..StudentForm::default()
        };
        let errors = ValidationErrors::single(StudentField::Email, "Enter a valid email address.");

        let html = field.render(&values, Some(&errors)).into_string();
        assert!(html.contains(r#"type="email""#));
        assert!(html.contains("&lt;nope&gt;"));
        assert!(html.contains("Enter a valid email address."));
        assert!(html.contains("border-red-500"));
    }

    #[test]
    fn optional_fields_say_so() {
        let field = FormField {
            field: StudentField::Address,
            kind: InputKind::TextArea,
            placeholder: "",
        };
        let html = field.render(&StudentForm::default(), None).into_string();
        assert!(html.contains("Address (optional)"));
        assert!(html.contains("<textarea"));
        assert!(!html.contains("required"));
    }
}
