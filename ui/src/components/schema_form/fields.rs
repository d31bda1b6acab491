//! Scalar Field Renderers
//!
//! Inputs for string, number, boolean, date and reference fields. Every edit
//! is written back through the form's path setter.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use leptos::prelude::*;
use serde_json::{Number, Value};

use super::generator::FormState;
use super::path::DocPath;
use super::reference_field::ReferenceSelect;
use super::types::*;

const INPUT_CLASS: &str =
    "w-full px-3 py-2 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";

/// `datetime-local` inputs work at minute precision without a zone
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

// ============================================================================
// Scalar Field Component
// ============================================================================

/// Renders the input matching a scalar field's type
#[component]
pub fn ScalarField(path: DocPath, field: FieldModel, form: FormState) -> impl IntoView {
    let hints = field.hints.clone();
    let required = field.required;

    match &field.descriptor {
        TypeDescriptor::Primitive(PrimitiveKind::String) if !hints.enum_values.is_empty() => view! {
            <EnumSelect path=path values=hints.enum_values form=form required=required />
        }
        .into_any(),
        TypeDescriptor::Primitive(PrimitiveKind::String) if hints.multiline => view! {
            <TextArea path=path placeholder=hints.placeholder form=form required=required />
        }
        .into_any(),
        TypeDescriptor::Primitive(PrimitiveKind::String) => view! {
            <TextInput path=path placeholder=hints.placeholder form=form required=required />
        }
        .into_any(),
        TypeDescriptor::Primitive(PrimitiveKind::Number) => view! {
            <NumberInput path=path min=hints.min max=hints.max form=form required=required />
        }
        .into_any(),
        TypeDescriptor::Primitive(PrimitiveKind::Boolean) => view! {
            <Checkbox path=path form=form />
        }
        .into_any(),
        TypeDescriptor::Primitive(PrimitiveKind::Date) => view! {
            <DateInput path=path form=form required=required />
        }
        .into_any(),
        TypeDescriptor::Reference { collection } => view! {
            <ReferenceSelect path=path collection=collection.clone() form=form required=required />
        }
        .into_any(),
        other => {
            log::warn!("No scalar input for {} field '{}'", other.type_name(), field.name);
            view! {
                <div class="text-sm text-gray-500">"Unsupported type"</div>
            }
            .into_any()
        }
    }
}

// ============================================================================
// String Inputs
// ============================================================================

#[component]
pub(super) fn TextInput(
    path: DocPath,
    placeholder: Option<String>,
    form: FormState,
    #[prop(default = false)] required: bool,
) -> impl IntoView {
    let path_for_change = path.clone();

    view! {
        <input
            type="text"
            class=INPUT_CLASS
            placeholder=placeholder.unwrap_or_default()
            required=required
            prop:value=move || string_value(form.value(&path).as_ref())
            on:input=move |ev| form.set(&path_for_change, Value::String(event_target_value(&ev)))
        />
    }
}

#[component]
fn TextArea(path: DocPath, placeholder: Option<String>, form: FormState, required: bool) -> impl IntoView {
    let path_for_change = path.clone();

    view! {
        <textarea
            rows=4
            class=INPUT_CLASS
            placeholder=placeholder.unwrap_or_default()
            required=required
            prop:value=move || string_value(form.value(&path).as_ref())
            on:input=move |ev| form.set(&path_for_change, Value::String(event_target_value(&ev)))
        />
    }
}

#[component]
fn EnumSelect(path: DocPath, values: Vec<String>, form: FormState, required: bool) -> impl IntoView {
    let path_for_change = path.clone();

    view! {
        <select
            class=format!("{} bg-yellow-50", INPUT_CLASS)
            required=required
            prop:value=move || string_value(form.value(&path).as_ref())
            on:change=move |ev| form.set(&path_for_change, Value::String(event_target_value(&ev)))
        >
            <option value="">"-- Select --"</option>
            {values.into_iter().map(|val| {
                view! { <option value=val.clone()>{val.clone()}</option> }
            }).collect_view()}
        </select>
    }
}

// ============================================================================
// Number Input
// ============================================================================

#[component]
fn NumberInput(
    path: DocPath,
    min: Option<f64>,
    max: Option<f64>,
    form: FormState,
    required: bool,
) -> impl IntoView {
    let path_for_change = path.clone();

    // Only set min/max attributes when they have values
    let min_attr = min.map(|v| v.to_string());
    let max_attr = max.map(|v| v.to_string());

    let on_input = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        match parse_number(&raw) {
            Some(n) => form.set(&path_for_change, n),
            // Keep the last valid value while the user is mid-edit
            None if !raw.trim().is_empty() => log::debug!("Ignoring non-numeric input '{}'", raw),
            None => form.set(&path_for_change, Value::Number(Number::from(0))),
        }
    };

    view! {
        <input
            type="number"
            step="any"
            min=min_attr
            max=max_attr
            required=required
            class=INPUT_CLASS
            prop:value=move || {
                match form.value(&path) {
                    Some(Value::Number(n)) => n.to_string(),
                    _ => String::new(),
                }
            }
            on:input=on_input
        />
    }
}

/// Integers stay integers; anything else numeric becomes a float
pub fn parse_number(raw: &str) -> Option<Value> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Value::Number(Number::from(n)));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

// ============================================================================
// Boolean Checkbox
// ============================================================================

#[component]
fn Checkbox(path: DocPath, form: FormState) -> impl IntoView {
    let path_for_change = path.clone();

    view! {
        <input
            type="checkbox"
            class="h-4 w-4 rounded border-gray-300 text-blue-600"
            prop:checked=move || form.value(&path).and_then(|v| v.as_bool()).unwrap_or(false)
            on:change=move |ev| form.set(&path_for_change, Value::Bool(event_target_checked(&ev)))
        />
    }
}

// ============================================================================
// Date Input
// ============================================================================

#[component]
fn DateInput(path: DocPath, form: FormState, required: bool) -> impl IntoView {
    let path_for_change = path.clone();

    let on_input = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        match from_datetime_local(&raw) {
            Some(ts) => form.set(&path_for_change, Value::String(ts)),
            None => log::warn!("Ignoring invalid date '{}'", raw),
        }
    };

    view! {
        <input
            type="datetime-local"
            class=INPUT_CLASS
            required=required
            prop:value=move || {
                form.value(&path)
                    .and_then(|v| v.as_str().and_then(to_datetime_local))
                    .unwrap_or_default()
            }
            on:input=on_input
        />
    }
}

/// Stored timestamp (RFC 3339 or plain date) to a `datetime-local` value in UTC
pub fn to_datetime_local(stored: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(stored) {
        return Some(dt.with_timezone(&Utc).format(DATETIME_LOCAL_FORMAT).to_string());
    }
    NaiveDate::parse_from_str(stored, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.format(DATETIME_LOCAL_FORMAT).to_string())
}

/// `datetime-local` value (read as UTC) to an RFC 3339 timestamp
pub fn from_datetime_local(raw: &str) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(raw, DATETIME_LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    Some(naive.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn string_value(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).map(String::from).unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
