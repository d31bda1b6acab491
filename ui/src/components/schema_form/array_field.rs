//! Array and Object Field Components
//!
//! Arrays get an item list with add/remove; objects recurse into their
//! sub-model's fields.

use chrono::Utc;
use leptos::prelude::*;

use super::defaults::initial_value;
use super::fields::ScalarField;
use super::generator::{FormState, SchemaField};
use super::path::DocPath;
use super::types::*;
use crate::components::confirm;

// ============================================================================
// Array Field Editor
// ============================================================================

/// Editor for array fields with dynamic add/remove
#[component]
pub fn ArrayFieldEditor(path: DocPath, items: FieldModel, form: FormState, depth: usize) -> impl IntoView {
    let path_for_count = path.clone();
    let item_count = Memo::new(move |_| {
        form.value(&path_for_count)
            .and_then(|v| v.as_array().map(Vec::len))
            .unwrap_or(0)
    });

    let path_for_add = path.clone();
    let items_for_add = items.clone();
    let on_add = move |_| {
        let next = path_for_add.push_index(item_count.get_untracked());
        form.set(&next, initial_value(&items_for_add, None, Utc::now()));
    };

    view! {
        <div class="border border-gray-200 rounded-lg p-3 bg-gray-50">
            <div class="flex items-center justify-between mb-2">
                <span class="text-xs text-gray-500">
                    {move || match item_count.get() {
                        1 => "1 entry".to_string(),
                        n => format!("{} entries", n),
                    }}
                </span>
                <button
                    type="button"
                    class="px-2 py-1 text-xs rounded flex items-center gap-1 text-blue-600 hover:bg-blue-50"
                    on:click=on_add
                >
                    <svg class="w-3 h-3" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4"/>
                    </svg>
                    "Add"
                </button>
            </div>

            {move || {
                let count = item_count.get();
                if count == 0 {
                    view! {
                        <p class="text-sm text-gray-400 italic px-1">"Empty list"</p>
                    }.into_any()
                } else {
                    view! {
                        <div class="space-y-2">
                            {(0..count).map(|idx| view! {
                                <ArrayItem
                                    path=path.push_index(idx)
                                    index=idx
                                    items=items.clone()
                                    form=form
                                    depth=depth
                                />
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

// ============================================================================
// Array Item
// ============================================================================

/// One array element with its remove button
#[component]
fn ArrayItem(path: DocPath, index: usize, items: FieldModel, form: FormState, depth: usize) -> impl IntoView {
    let path_for_remove = path.clone();
    let on_remove = move |_| {
        if confirm(&format!("Remove item #{}?", index + 1)) {
            form.remove(&path_for_remove);
        }
    };

    let content = match &items.descriptor {
        TypeDescriptor::Object(model) => view! {
            <ObjectFields path=path model=model.clone() form=form depth=depth + 1 />
        }.into_any(),
        TypeDescriptor::Array(inner) => view! {
            <ArrayFieldEditor path=path items=(**inner).clone() form=form depth=depth + 1 />
        }.into_any(),
        _ => view! {
            <ScalarField path=path field=items.clone() form=form />
        }.into_any(),
    };

    view! {
        <div class="border border-gray-200 rounded-lg p-2 bg-white">
            <div class="flex items-center justify-between mb-2">
                <span class="text-xs font-medium text-gray-600">
                    {format!("#{}", index + 1)}
                </span>
                <button
                    type="button"
                    title="Remove item"
                    class="text-red-500 hover:bg-red-50 p-1 rounded"
                    on:click=on_remove
                >
                    <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                    </svg>
                </button>
            </div>
            {content}
        </div>
    }
}

// ============================================================================
// Object Fields
// ============================================================================

/// Fields of a nested object; hidden fields are skipped but keep their value
#[component]
pub fn ObjectFields(path: DocPath, model: Model, form: FormState, depth: usize) -> impl IntoView {
    view! {
        <div class="space-y-2">
            {model.visible_fields().cloned().map(|field| {
                let child = path.push_key(&field.name);
                view! { <SchemaField path=child field=field form=form depth=depth /> }
            }).collect_view()}
        </div>
    }
}
