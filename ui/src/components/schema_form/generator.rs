//! Main Schema Form Component
//!
//! Renders an editable form for a document from its schema and pushes every
//! change back to the caller.

use chrono::Utc;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use serde_json::{Map, Value};

use super::active::ActiveFields;
use super::array_field::*;
use super::defaults::initial_document;
use super::fields::*;
use super::model::derive_model;
use super::path::{get_at, remove_at, set_at, DocPath};
use super::types::*;

// ============================================================================
// Form State
// ============================================================================

/// Handle on the document being edited, shared by every nested field
#[derive(Clone, Copy)]
pub struct FormState {
    pub document: RwSignal<Value>,
    on_change: Option<Callback<Value>>,
}

impl FormState {
    pub fn new(document: RwSignal<Value>, on_change: Option<Callback<Value>>) -> Self {
        Self { document, on_change }
    }

    /// Current value at `path` (tracked)
    pub fn value(&self, path: &DocPath) -> Option<Value> {
        self.document.with(|doc| get_at(doc, path).cloned())
    }

    pub fn set(&self, path: &DocPath, value: Value) {
        let next = self.document.with_untracked(|doc| set_at(doc, path, value));
        self.commit(next);
    }

    pub fn remove(&self, path: &DocPath) {
        let next = self.document.with_untracked(|doc| remove_at(doc, path));
        self.commit(next);
    }

    /// Swap in a whole new document
    pub fn replace(&self, doc: Value) {
        self.commit(doc);
    }

    fn commit(&self, next: Value) {
        self.document.set(next.clone());
        if let Some(on_change) = self.on_change {
            on_change.run(next);
        }
    }
}

// ============================================================================
// Main Component
// ============================================================================

/// Schema Form Component
///
/// Works on a copy of `data` completed with initial values from the schema.
/// Required fields are shown from the start; optional ones are picked from
/// the field list (or all shown with `show_all`).
#[component]
pub fn SchemaForm(
    /// Document schema
    #[prop(into)]
    schema: Signal<Value>,
    /// Document to edit
    #[prop(into)]
    data: Signal<Value>,
    /// Receives the finished document
    on_submit: Callback<Value>,
    #[prop(optional)]
    on_cancel: Option<Callback<()>>,
    /// Receives every intermediate document snapshot
    #[prop(optional)]
    on_change: Option<Callback<Value>>,
    /// Show optional fields from the start
    #[prop(default = false)]
    show_all: bool,
    #[prop(default = "Save")]
    submit_label: &'static str,
) -> impl IntoView {
    let model = Memo::new(move |_| derive_model(&schema.get()));
    let document = RwSignal::new(Value::Object(Map::new()));
    let active = RwSignal::new(ActiveFields::default());
    let form = FormState::new(document, on_change);

    // Re-seed whenever the schema or the edited document changes
    Effect::new(move |_| {
        let model = model.get();
        let doc = initial_document(&model, Some(&data.get()), Utc::now());
        active.set(ActiveFields::seeded(&model, show_all).with_populated(&model, &doc));
        document.set(doc);
    });

    let (json_mode, set_json_mode) = signal(false);
    let (json_text, set_json_text) = signal(String::new());
    let (json_error, set_json_error) = signal(Option::<String>::None);
    let (form_error, set_form_error) = signal(Option::<String>::None);

    let open_json = move |_| {
        let text = document.with_untracked(|doc| serde_json::to_string_pretty(doc).unwrap_or_default());
        set_json_text.set(text);
        set_json_error.set(None);
        set_json_mode.set(true);
    };

    let on_json_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        match serde_json::from_str::<Value>(&text) {
            Ok(value) if value.is_object() => {
                set_json_error.set(None);
                form.replace(value);
            }
            Ok(_) => set_json_error.set(Some("Document must be a JSON object".to_string())),
            Err(e) => set_json_error.set(Some(e.to_string())),
        }
        set_json_text.set(text);
    };

    let on_form_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let doc = document.get_untracked();
        let missing = model.with_untracked(|m| m.missing_required(&doc));
        if missing.is_empty() {
            set_form_error.set(None);
            on_submit.run(doc);
        } else {
            // Make sure the offending fields are on screen
            active.update(|a| {
                for name in &missing {
                    if !a.is_active(name) {
                        a.toggle(name);
                    }
                }
            });
            set_form_error.set(Some(format!("Missing required fields: {}", missing.join(", "))));
        }
    };

    view! {
        <form class="schema-form space-y-3" on:submit=on_form_submit>
            <div class="flex items-center justify-end gap-2">
                <span class="text-xs text-gray-500">"View:"</span>
                <div class="inline-flex bg-gray-100 rounded-lg p-0.5">
                    <button
                        type="button"
                        class=move || toggle_class(!json_mode.get())
                        on:click=move |_| set_json_mode.set(false)
                    >
                        "Form"
                    </button>
                    <button
                        type="button"
                        class=move || toggle_class(json_mode.get())
                        on:click=open_json
                    >
                        "JSON"
                    </button>
                </div>
            </div>

            // Form view
            <div style=move || if json_mode.get() { "display: none" } else { "display: block" }>
                <FieldPicker model=model active=active />

                {move || {
                    let model = model.get();
                    let fields: Vec<FieldModel> = active.with(|a| a.visible(&model).cloned().collect());

                    if model.is_empty() {
                        view! {
                            <div class="text-sm text-gray-500 italic p-4 bg-gray-50 rounded">
                                "No schema available for this document."
                            </div>
                        }.into_any()
                    } else if fields.is_empty() {
                        view! {
                            <div class="text-sm text-gray-400 italic p-4">
                                "No fields selected."
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div class="space-y-3">
                                {fields.into_iter().map(|field| {
                                    let path = DocPath::root().push_key(&field.name);
                                    view! { <SchemaField path=path field=field form=form depth=0 /> }
                                }).collect_view()}
                            </div>
                        }.into_any()
                    }
                }}
            </div>

            // JSON view
            <div style=move || if json_mode.get() { "display: block" } else { "display: none" }>
                <textarea
                    rows=14
                    class=move || format!(
                        "w-full px-3 py-2 font-mono text-sm border rounded-md {}",
                        if json_error.get().is_some() { "border-red-300 bg-red-50" } else { "border-gray-300" }
                    )
                    prop:value=move || json_text.get()
                    on:input=on_json_input
                />
                {move || json_error.get().map(|err| view! {
                    <p class="mt-1 text-xs text-red-500">{err}</p>
                })}
            </div>

            {move || form_error.get().map(|err| view! {
                <div class="bg-red-50 border border-red-200 text-red-700 text-sm rounded p-2">{err}</div>
            })}

            <div class="flex justify-end gap-2">
                {on_cancel.map(|cancel| view! {
                    <button
                        type="button"
                        class="px-4 py-2 text-sm rounded border border-gray-300 hover:bg-gray-50"
                        on:click=move |_| cancel.run(())
                    >
                        "Cancel"
                    </button>
                })}
                <button type="submit" class="px-4 py-2 text-sm rounded bg-blue-600 text-white hover:bg-blue-700">
                    {submit_label}
                </button>
            </div>
        </form>
    }
}

fn toggle_class(selected: bool) -> String {
    format!(
        "px-2 py-1 text-xs font-medium rounded {}",
        if selected { "bg-white shadow text-gray-900" } else { "text-gray-600 hover:text-gray-900" }
    )
}

// ============================================================================
// Field Picker
// ============================================================================

/// Checkbox list toggling which fields are shown
#[component]
fn FieldPicker(model: Memo<Model>, active: RwSignal<ActiveFields>) -> impl IntoView {
    let select_all = move |_| active.update(|a| model.with_untracked(|m| a.select_all(m)));
    let select_none = move |_| active.update(|a| model.with_untracked(|m| a.select_none(m)));

    view! {
        <div class="flex flex-wrap items-center gap-3 mb-3 p-2 bg-gray-50 rounded text-sm">
            <span class="text-xs font-medium text-gray-500 uppercase">"Fields"</span>
            {move || {
                model.get().visible_fields().cloned().map(|field| {
                    let name = field.name.clone();
                    let name_for_toggle = field.name.clone();
                    view! {
                        <label class="inline-flex items-center gap-1">
                            <input
                                type="checkbox"
                                prop:checked=move || active.with(|a| a.is_active(&name))
                                on:change=move |_| active.update(|a| { a.toggle(&name_for_toggle); })
                            />
                            {field.label()}
                            {field.required.then(|| view! { <span class="text-red-500">"*"</span> })}
                        </label>
                    }
                }).collect_view()
            }}
            <button
                type="button"
                class="ml-auto text-xs text-blue-600 hover:underline disabled:text-gray-400"
                disabled=move || active.with(|a| model.with(|m| a.all_selected(m)))
                on:click=select_all
            >
                "Select all"
            </button>
            <button type="button" class="text-xs text-blue-600 hover:underline" on:click=select_none>
                "Select none"
            </button>
        </div>
    }
}

// ============================================================================
// Schema Field Component (recursive)
// ============================================================================

/// Renders one field with its label; recurses for objects and arrays
#[component]
pub fn SchemaField(path: DocPath, field: FieldModel, form: FormState, depth: usize) -> impl IntoView {
    let indent_class = if depth == 0 { "" } else { "ml-4 border-l-2 border-gray-200 pl-3" };
    let bg_class = if depth % 2 == 0 { "bg-gray-50" } else { "bg-white" };

    let body = match &field.descriptor {
        TypeDescriptor::Object(model) => view! {
            <ObjectFields path=path.clone() model=model.clone() form=form depth=depth + 1 />
        }.into_any(),
        TypeDescriptor::Array(items) => view! {
            <ArrayFieldEditor path=path.clone() items=(**items).clone() form=form depth=depth />
        }.into_any(),
        _ => view! {
            <ScalarField path=path.clone() field=field.clone() form=form />
        }.into_any(),
    };

    view! {
        <div class=format!("rounded-lg p-3 {} {}", bg_class, indent_class)>
            <div class="flex items-center gap-2 mb-2">
                <span class="text-sm font-medium text-gray-700">{field.label()}</span>
                <span class="text-xs text-gray-400">{format!("({})", field.type_name())}</span>
                {field.required.then(|| view! {
                    <span class="text-xs text-red-500 font-medium">"*"</span>
                })}
            </div>
            {body}
        </div>
    }
}
