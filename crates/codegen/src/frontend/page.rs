//! One page module per component.
//!
//! Form pages get a `yup` schema built from their state fields and one
//! control per field. Display pages render their title plus whatever the
//! props allow (loading indicator, signed-in user).

use ferry_interchange::{props, ComponentSpec, MigrationIntent};

use super::next_route;
use crate::fields::{humanize, prop_type, ts_key, ts_member, FieldControl, FieldRule, STATE_OPTIONS};
use crate::template::{jsx_text, ts_string, CodeWriter};

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";

pub(super) fn page_module(component: &ComponentSpec, intent: &MigrationIntent) -> String {
    let next = next_route(intent, &component.name);
    let is_form = component.is_form();

    let mut w = CodeWriter::new();
    w.line("import React from 'react';");
    if is_form {
        w.line("import { useForm } from 'react-hook-form';");
        w.line("import { yupResolver } from '@hookform/resolvers/yup';");
        w.line("import * as yup from 'yup';");
    }
    if is_form || next.is_some() {
        w.line("import { useNavigate } from 'react-router-dom';");
    }
    w.blank();
    props_interface(&mut w, component);
    w.blank();
    if is_form {
        form_component(&mut w, component, next);
    } else {
        display_component(&mut w, component, next);
    }
    w.blank();
    w.line(format!("export default {};", component.name));
    w.finish()
}

fn props_interface(w: &mut CodeWriter, component: &ComponentSpec) {
    if component.props.is_empty() {
        w.line(format!("interface {}Props {{}}", component.name));
        return;
    }
    w.block(format!("interface {}Props {{", component.name), "}", |w| {
        for prop in &component.props {
            w.line(prop_type(prop));
        }
    });
}

/// `({ loading, user })` style destructuring of the props this page uses.
fn destructure(component: &ComponentSpec, is_form: bool) -> String {
    let mut used = Vec::new();
    if component.has_prop(props::LOADING) {
        used.push(props::LOADING.to_string());
    }
    if component.has_prop(props::USER) {
        used.push(props::USER.to_string());
    }
    if is_form && component.has_prop(props::ON_SUBMIT) {
        used.push(props::ON_SUBMIT.to_string());
    }
    if is_form && component.has_prop(props::ERRORS) {
        used.push(format!("{}: serverErrors", props::ERRORS));
    }
    if used.is_empty() {
        "()".to_string()
    } else {
        format!("({{ {} }})", used.join(", "))
    }
}

fn status_lines(w: &mut CodeWriter, component: &ComponentSpec) {
    if component.has_prop(props::LOADING) {
        w.line("{loading && <p className=\"text-gray-500 mb-4\">Loading...</p>}");
    }
    if component.has_prop(props::USER) {
        w.line("{user && <p className=\"text-gray-600 mb-4\">Signed in as {user.name ?? user.id}</p>}");
    }
}

// ── Display pages ───────────────────────────────────────────────────

fn display_component(w: &mut CodeWriter, component: &ComponentSpec, next: Option<&str>) {
    let name = &component.name;
    w.block(
        format!(
            "const {name}: React.FC<{name}Props> = {} => {{",
            destructure(component, false)
        ),
        "};",
        |w| {
            if next.is_some() {
                w.line("const navigate = useNavigate();");
                w.blank();
            }
            w.block("return (", ");", |w| {
                w.block("<div className=\"max-w-4xl mx-auto p-6\">", "</div>", |w| {
                    w.block("<div className=\"bg-white rounded-lg shadow-md\">", "</div>", |w| {
                        w.block("<div className=\"p-8 text-center\">", "</div>", |w| {
                            w.line(format!(
                                "<h1 className=\"text-3xl font-bold text-gray-900 mb-4\">{}</h1>",
                                jsx_text(&component.title)
                            ));
                            status_lines(w, component);
                            if let Some(target) = next {
                                w.block("<button", ">", |w| {
                                    w.line(format!("onClick={{() => navigate({})}}", ts_string(target)));
                                    w.line("className=\"btn btn-primary text-lg\"");
                                });
                                w.indented(|w| {
                                    w.line("Continue");
                                });
                                w.line("</button>");
                            }
                        });
                    });
                });
            });
        },
    );
}

// ── Form pages ──────────────────────────────────────────────────────

fn form_component(w: &mut CodeWriter, component: &ComponentSpec, next: Option<&str>) {
    let name = &component.name;
    let has_fields = !component.state_fields.is_empty();
    let calls_back = component.has_prop(props::ON_SUBMIT);
    let server_errors = component.has_prop(props::ERRORS);

    w.block("const validationSchema = yup.object({", "});", |w| {
        for field in &component.state_fields {
            w.line(format!(
                "{}: {},",
                ts_key(field),
                FieldRule::for_field(field).yup_schema(field)
            ));
        }
    });
    w.blank();

    w.block(
        format!(
            "const {name}: React.FC<{name}Props> = {} => {{",
            destructure(component, true)
        ),
        "};",
        |w| {
            w.line("const navigate = useNavigate();");
            w.block("const {", "} = useForm({", |w| {
                w.line("register,");
                w.line("handleSubmit,");
                if has_fields {
                    w.line("formState: { errors, isSubmitting },");
                } else {
                    w.line("formState: { isSubmitting },");
                }
            });
            w.indented(|w| {
                w.line("resolver: yupResolver(validationSchema),");
            });
            w.line("});");
            if !has_fields {
                w.line("void register;");
            }
            w.blank();

            w.block("const onSubmitForm = (data: Record<string, unknown>) => {", "};", |w| {
                if calls_back {
                    w.line("onSubmit?.(data);");
                }
                match next {
                    Some(target) => {
                        if !calls_back {
                            w.line("console.info('Form submitted:', data);");
                        }
                        w.line(format!("navigate({});", ts_string(target)));
                    }
                    None if !calls_back => {
                        w.line("console.info('Form submitted:', data);");
                    }
                    None => {}
                }
            });
            w.blank();

            w.block("return (", ");", |w| {
                w.block("<div className=\"max-w-4xl mx-auto p-6\">", "</div>", |w| {
                    w.block("<div className=\"bg-white rounded-lg shadow-md\">", "</div>", |w| {
                        w.block("<div className=\"p-6 border-b\">", "</div>", |w| {
                            w.line(format!(
                                "<h1 className=\"text-2xl font-bold text-gray-900\">{}</h1>",
                                jsx_text(&component.title)
                            ));
                        });
                        status_lines(w, component);
                        if server_errors {
                            w.block("{serverErrors && (", ")}", |w| {
                                w.block("<ul className=\"mx-6 mt-4 text-sm text-red-600\">", "</ul>", |w| {
                                    w.block(
                                        "{Object.entries(serverErrors).map(([field, message]) => (",
                                        "))}",
                                        |w| {
                                            w.line("<li key={field}>{message}</li>");
                                        },
                                    );
                                });
                            });
                        }
                        w.block(
                            "<form onSubmit={handleSubmit(onSubmitForm)} className=\"p-6\">",
                            "</form>",
                            |w| {
                                for field in &component.state_fields {
                                    w.lines(&field_jsx(field));
                                }
                                form_buttons(w);
                            },
                        );
                    });
                });
            });
        },
    );
}

fn form_buttons(w: &mut CodeWriter) {
    w.lines(
        r#"<div className="flex justify-between mt-8">
  <button
    type="button"
    onClick={() => navigate(-1)}
    className="btn btn-secondary"
  >
    Back
  </button>
  <button
    type="submit"
    disabled={isSubmitting}
    className="btn btn-primary disabled:opacity-50"
  >
    {isSubmitting ? 'Submitting...' : 'Continue'}
  </button>
</div>"#,
    );
}

/// The control for one field, wrapped with its label and error line.
fn field_jsx(field: &str) -> String {
    let label = humanize(field);
    let register = format!("{{...register({})}}", ts_string(field));
    let error = format!(
        "{{{err} && <p className=\"text-red-500 text-sm mt-1\">{{String({err}?.message)}}</p>}}",
        err = ts_member("errors", field)
    );
    let required = if FieldRule::for_field(field) == FieldRule::Boolean {
        ""
    } else {
        " *"
    };

    match FieldControl::for_field(field) {
        FieldControl::Checkbox => format!(
            r#"<div className="mb-4">
  <div className="flex items-center">
    <input
      type="checkbox"
      {register}
      className="h-4 w-4 text-blue-600 focus:ring-blue-500 border-gray-300 rounded"
    />
    <label className="ml-2 block text-sm text-gray-900">{label}</label>
  </div>
  {error}
</div>"#
        ),
        FieldControl::Select => {
            let options = if field.to_ascii_lowercase().contains("state") {
                STATE_OPTIONS
                    .iter()
                    .map(|o| format!("\n    <option value=\"{o}\">{o}</option>"))
                    .collect::<String>()
            } else {
                String::new()
            };
            format!(
                r#"<div className="mb-4">
  <label className="block text-sm font-medium text-gray-700 mb-2">{label}{required}</label>
  <select {register} className="{INPUT_CLASS}">
    <option value="">Select {label}</option>{options}
  </select>
  {error}
</div>"#
            )
        }
        FieldControl::TextArea => format!(
            r#"<div className="mb-4">
  <label className="block text-sm font-medium text-gray-700 mb-2">{label}{required}</label>
  <textarea
    {register}
    rows={{3}}
    className="{INPUT_CLASS}"
    placeholder="Enter {lower}..."
  />
  {error}
</div>"#,
            lower = label.to_lowercase()
        ),
        control => {
            let input_type = control.input_type().unwrap_or("text");
            let mask = if control == FieldControl::Masked {
                "\n    inputMode=\"numeric\"\n    autoComplete=\"off\""
            } else {
                ""
            };
            format!(
                r#"<div className="mb-4">
  <label className="block text-sm font-medium text-gray-700 mb-2">{label}{required}</label>
  <input
    type="{input_type}"
    {register}{mask}
    className="{INPUT_CLASS}"
    placeholder="Enter {lower}"
  />
  {error}
</div>"#,
                lower = label.to_lowercase()
            )
        }
    }
}
