//! Reference Field Component
//!
//! Select populated with the documents of the referenced collection.

use leptos::prelude::*;
use serde_json::Value;

use super::fields::TextInput;
use super::generator::FormState;
use super::path::DocPath;
use crate::api;
use crate::types::Collection;

#[component]
pub fn ReferenceSelect(path: DocPath, collection: String, form: FormState, required: bool) -> impl IntoView {
    let Some(target) = Collection::parse(&collection) else {
        log::warn!("Unknown reference collection '{}', falling back to a text input", collection);
        return view! { <TextInput path=path placeholder=Some(format!("{} id", collection)) form=form required=required /> }
            .into_any();
    };

    let options = LocalResource::new(move || async move { api::list_documents(target).await });

    let path_for_change = path.clone();
    let selected = Memo::new(move |_| {
        form.value(&path)
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_default()
    });

    view! {
        <select
            class="w-full px-3 py-2 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
            required=required
            on:change=move |ev| form.set(&path_for_change, Value::String(event_target_value(&ev)))
        >
            <option value="" prop:selected=move || selected.with(String::is_empty)>
                {format!("-- Select {} --", target.item_noun())}
            </option>
            {move || match options.get() {
                None => view! { <option disabled=true>"Loading..."</option> }.into_any(),
                Some(Err(e)) => {
                    log::error!("Failed to load {} for reference: {}", target, e);
                    view! { <option disabled=true>"Failed to load"</option> }.into_any()
                }
                Some(Ok(docs)) => docs
                    .into_iter()
                    .filter(|doc| !doc.is_pending())
                    .map(|doc| {
                        let id = doc.id.clone();
                        let is_selected = move || selected.with(|s| *s == id);
                        view! {
                            <option value=doc.id.clone() prop:selected=is_selected>{doc.title()}</option>
                        }
                    })
                    .collect_view()
                    .into_any(),
            }}
        </select>
    }
    .into_any()
}
