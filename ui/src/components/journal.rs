use leptos::prelude::*;

use crate::components::document_editor::{DocumentEditor, Editing, StoreStatus};
use crate::components::{confirm, format_day};
use crate::store::DocumentStore;
use crate::types::{Collection, Document};

const PREVIEW_CHARS: usize = 160;

#[component]
pub fn JournalPage() -> impl IntoView {
    let store = DocumentStore::new(Collection::Journal);
    let editing = RwSignal::new(Option::<Editing>::None);
    let on_close = Callback::new(move |_| editing.set(None));

    view! {
        <div class="p-8">
            <div class="flex justify-between items-center mb-6">
                <h2 class="text-3xl font-bold">"Journal"</h2>
                <button
                    class="bg-blue-500 hover:bg-blue-600 text-white px-4 py-2 rounded flex items-center gap-2"
                    on:click=move |_| editing.set(Some(Editing::New))
                >
                    <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4"/>
                    </svg>
                    "New entry"
                </button>
            </div>

            <StoreStatus store=store />

            {move || editing.get().map(|e| view! {
                <DocumentEditor store=store editing=e on_close=on_close />
            })}

            {move || {
                let entries = newest_first(store.documents.get());
                if entries.is_empty() {
                    view! {
                        <div class="text-center py-12 bg-white rounded-lg shadow text-gray-500">
                            "No entries yet. Write your first one."
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="space-y-4">
                            {entries.into_iter().map(|entry| view! {
                                <EntryCard entry=entry store=store editing=editing />
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn EntryCard(entry: Document, store: DocumentStore, editing: RwSignal<Option<Editing>>) -> impl IntoView {
    let id = entry.id.clone();
    let title = entry.title();
    let when = entry
        .field_date("date")
        .unwrap_or(entry.created_at);
    let mood = entry.field_str("mood").filter(|m| !m.is_empty()).map(String::from);
    let body = preview(entry.field_str("body").unwrap_or_default(), PREVIEW_CHARS);
    let tags: Vec<String> = entry
        .data
        .get("tags")
        .and_then(|t| t.as_array())
        .map(|tags| tags.iter().filter_map(|t| t.as_str()).map(String::from).collect())
        .unwrap_or_default();
    let pending = entry.is_pending();

    let title_for_delete = title.clone();
    let on_delete = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        if !pending && confirm(&format!("Delete \"{}\"?", title_for_delete)) {
            store.remove(id.clone());
        }
    };

    view! {
        <div
            class=move || format!(
                "bg-white rounded-lg shadow hover:shadow-md transition-shadow p-4 cursor-pointer {}",
                if pending { "opacity-60 cursor-wait" } else { "" }
            )
            on:click=move |_| {
                // the server does not know a pending entry yet
                if !pending {
                    editing.set(Some(Editing::Existing(entry.clone())));
                }
            }
        >
            <div class="flex justify-between items-start mb-2">
                <div>
                    <h3 class="font-semibold text-gray-900">{title}</h3>
                    <span class="text-xs text-gray-500">{format_day(&when)}</span>
                </div>
                <div class="flex items-center gap-2">
                    {mood.map(|m| view! {
                        <span class="px-2 py-1 text-xs font-semibold rounded-full bg-blue-100 text-blue-800">{m}</span>
                    })}
                    <button
                        class="px-3 py-1 text-sm text-red-600 hover:bg-red-50 rounded"
                        disabled=pending
                        on:click=on_delete
                    >
                        "Delete"
                    </button>
                </div>
            </div>
            <p class="text-sm text-gray-600 whitespace-pre-line">{body}</p>
            <div class="flex flex-wrap gap-1 mt-2">
                {tags.into_iter().map(|tag| view! {
                    <span class="px-2 py-0.5 text-xs rounded bg-gray-100 text-gray-600">{format!("#{}", tag)}</span>
                }).collect_view()}
            </div>
        </div>
    }
}

/// Sort by entry date (falling back to creation time), newest first
fn newest_first(mut entries: Vec<Document>) -> Vec<Document> {
    entries.sort_by_key(|e| std::cmp::Reverse(e.field_date("date").unwrap_or(e.created_at)));
    entries
}

/// First `max` characters, cut at a word boundary when possible
fn preview(body: &str, max: usize) -> String {
    if body.chars().count() <= max {
        return body.to_string();
    }
    let cut: String = body.chars().take(max).collect();
    let trimmed = match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}...", trimmed.trim_end())
}
