//! Create/edit panel shared by the collection pages

use leptos::prelude::*;
use serde_json::{Map, Value};

use crate::api;
use crate::components::schema_form::SchemaForm;
use crate::store::DocumentStore;
use crate::types::Document;

/// What the editor panel is working on
#[derive(Clone, Debug, PartialEq)]
pub enum Editing {
    New,
    Existing(Document),
}

impl Editing {
    fn data(&self) -> Value {
        match self {
            Editing::New => Value::Object(Map::new()),
            Editing::Existing(doc) => doc.data.clone(),
        }
    }

    fn id(&self) -> Option<String> {
        match self {
            Editing::New => None,
            Editing::Existing(doc) => Some(doc.id.clone()),
        }
    }
}

/// Loads the collection schema and hands the finished document to the store
#[component]
pub fn DocumentEditor(store: DocumentStore, editing: Editing, on_close: Callback<()>) -> impl IntoView {
    let collection = store.collection;
    let schema = LocalResource::new(move || async move { api::get_schema(collection).await });

    let heading = match &editing {
        Editing::New => format!("New {}", collection.item_noun()),
        Editing::Existing(doc) => format!("Edit {}", doc.title()),
    };
    let submit_label = match &editing {
        Editing::New => "Create",
        Editing::Existing(_) => "Save",
    };

    let data = editing.data();
    let existing_id = editing.id();
    let on_submit = Callback::new(move |doc: Value| {
        match &existing_id {
            Some(id) => store.update(id.clone(), doc),
            None => store.create(doc),
        }
        on_close.run(());
    });

    view! {
        <div class="bg-white rounded-lg shadow p-6 mb-6">
            <h2 class="text-lg font-semibold text-gray-900 mb-4">{heading}</h2>
            <Suspense fallback=move || view! {
                <div class="flex items-center py-6">
                    <div class="animate-spin rounded-full h-6 w-6 border-b-2 border-blue-500"></div>
                    <span class="ml-3 text-gray-500">"Loading schema..."</span>
                </div>
            }>
                {move || schema.get().map(|result| match result {
                    Ok(schema) => view! {
                        <SchemaForm
                            schema=schema
                            data=data.clone()
                            on_submit=on_submit
                            on_cancel=on_close
                            submit_label=submit_label
                        />
                    }.into_any(),
                    Err(e) => view! {
                        <div class="bg-red-50 border border-red-200 text-red-700 rounded p-4">
                            {format!("Failed to load schema: {}", e)}
                        </div>
                    }.into_any(),
                })}
            </Suspense>
        </div>
    }
}

/// Loading and error banner for a store
#[component]
pub fn StoreStatus(store: DocumentStore) -> impl IntoView {
    view! {
        {move || store.error.get().map(|err| view! {
            <div class="bg-red-50 border border-red-200 text-red-700 rounded p-3 mb-4 flex justify-between">
                <span>{err}</span>
                <button class="text-sm underline" on:click=move |_| store.error.set(None)>"Dismiss"</button>
            </div>
        })}
        {move || store.loading.get().then(|| view! {
            <div class="text-sm text-gray-500 mb-4">"Loading..."</div>
        })}
    }
}
