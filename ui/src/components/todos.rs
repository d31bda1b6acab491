use leptos::prelude::*;

use crate::components::document_editor::{DocumentEditor, Editing, StoreStatus};
use crate::components::{confirm, format_timestamp};
use crate::store::DocumentStore;
use crate::types::{Collection, Document};

/// Done-state filter for the todo table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TodoFilter {
    #[default]
    All,
    Open,
    Done,
}

impl TodoFilter {
    pub const ALL: [TodoFilter; 3] = [TodoFilter::All, TodoFilter::Open, TodoFilter::Done];

    pub fn label(&self) -> &'static str {
        match self {
            TodoFilter::All => "All",
            TodoFilter::Open => "Open",
            TodoFilter::Done => "Done",
        }
    }

    pub fn matches(&self, todo: &Document) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Open => !todo.field_bool("done"),
            TodoFilter::Done => todo.field_bool("done"),
        }
    }
}

/// Filtered todos, keeping store order
pub fn filter_todos(todos: &[Document], filter: TodoFilter) -> Vec<Document> {
    todos.iter().filter(|t| filter.matches(t)).cloned().collect()
}

#[component]
pub fn TodosPage() -> impl IntoView {
    let store = DocumentStore::new(Collection::Todos);
    let editing = RwSignal::new(Option::<Editing>::None);
    let on_close = Callback::new(move |_| editing.set(None));
    let (filter, set_filter) = signal(TodoFilter::default());

    let open_count = Memo::new(move |_| {
        store.documents.with(|docs| docs.iter().filter(|d| TodoFilter::Open.matches(d)).count())
    });

    view! {
        <div class="p-8">
            <div class="flex justify-between items-center mb-6">
                <div>
                    <h2 class="text-3xl font-bold">"Todos"</h2>
                    <p class="text-sm text-gray-500">{move || format!("{} open", open_count.get())}</p>
                </div>
                <div class="flex items-center gap-4">
                    <div class="flex bg-gray-100 rounded-lg p-1">
                        {TodoFilter::ALL.into_iter().map(|f| view! {
                            <button
                                class=move || format!(
                                    "px-3 py-1 rounded text-sm font-medium transition-colors {}",
                                    if filter.get() == f { "bg-white shadow text-gray-900" } else { "text-gray-600 hover:text-gray-900" }
                                )
                                on:click=move |_| set_filter.set(f)
                            >
                                {f.label()}
                            </button>
                        }).collect_view()}
                    </div>
                    <button
                        class="bg-blue-500 hover:bg-blue-600 text-white px-4 py-2 rounded flex items-center gap-2"
                        on:click=move |_| editing.set(Some(Editing::New))
                    >
                        <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4"/>
                        </svg>
                        "New todo"
                    </button>
                </div>
            </div>

            <StoreStatus store=store />

            {move || editing.get().map(|e| view! {
                <DocumentEditor store=store editing=e on_close=on_close />
            })}

            {move || {
                let todos = store.documents.with(|docs| filter_todos(docs, filter.get()));
                if todos.is_empty() {
                    view! {
                        <div class="text-center py-12 bg-white rounded-lg shadow text-gray-500">
                            "Nothing here."
                        </div>
                    }.into_any()
                } else {
                    view! { <TodoTable todos=todos store=store editing=editing /> }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn TodoTable(todos: Vec<Document>, store: DocumentStore, editing: RwSignal<Option<Editing>>) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow overflow-hidden">
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Done"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Title"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Priority"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Due"</th>
                        <th class="px-6 py-3 text-right text-xs font-medium text-gray-500 uppercase tracking-wider">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    {todos.into_iter().map(|todo| {
                        let id_for_toggle = todo.id.clone();
                        let id_for_delete = todo.id.clone();
                        let title = todo.title();
                        let title_for_delete = title.clone();
                        let done = todo.field_bool("done");
                        let title_class = if done { "text-gray-400 line-through" } else { "font-medium text-gray-900" };
                        let pending = todo.is_pending();
                        let priority = todo.field_str("priority").unwrap_or("-").to_string();
                        let due = todo.field_date("due").map(|d| format_timestamp(&d)).unwrap_or_else(|| "-".to_string());

                        view! {
                            <tr class="hover:bg-gray-50">
                                <td class="px-6 py-4">
                                    <input
                                        type="checkbox"
                                        class="h-4 w-4"
                                        prop:checked=done
                                        disabled=pending
                                        on:change=move |_| store.toggle_done(id_for_toggle.clone())
                                    />
                                </td>
                                <td class="px-6 py-4">
                                    <span class=title_class>
                                        {title}
                                    </span>
                                </td>
                                <td class="px-6 py-4 whitespace-nowrap">
                                    <span class=format!("px-2 py-1 text-xs font-semibold rounded-full {}", priority_class(&priority))>
                                        {priority.clone()}
                                    </span>
                                </td>
                                <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{due}</td>
                                <td class="px-6 py-4 whitespace-nowrap text-right text-sm font-medium">
                                    <button
                                        class="text-blue-600 hover:text-blue-900 mr-3"
                                        disabled=pending
                                        on:click=move |_| editing.set(Some(Editing::Existing(todo.clone())))
                                    >
                                        "Edit"
                                    </button>
                                    <button
                                        class="text-red-600 hover:text-red-900"
                                        disabled=pending
                                        on:click=move |_| {
                                            if confirm(&format!("Delete \"{}\"?", title_for_delete)) {
                                                store.remove(id_for_delete.clone());
                                            }
                                        }
                                    >
                                        "Delete"
                                    </button>
                                </td>
                            </tr>
                        }
                    }).collect::<Vec<_>>()}
                </tbody>
            </table>
        </div>
    }
}

fn priority_class(priority: &str) -> &'static str {
    match priority {
        "high" => "bg-red-100 text-red-800",
        "medium" => "bg-yellow-100 text-yellow-800",
        "low" => "bg-green-100 text-green-800",
        _ => "bg-gray-100 text-gray-600",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn todo(id: &str, done: Option<bool>) -> Document {
        let now = Utc::now();
        let data = match done {
            Some(done) => json!({ "title": id, "done": done }),
            None => json!({ "title": id }),
        };
        Document {
            id: id.to_string(),
            collection: Collection::Todos,
            data,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_filter_todos() {
        let todos = vec![todo("a", Some(true)), todo("b", Some(false)), todo("c", None)];

        let ids = |f: TodoFilter| filter_todos(&todos, f).into_iter().map(|d| d.id).collect::<Vec<_>>();
        assert_eq!(ids(TodoFilter::All), vec!["a", "b", "c"]);
        assert_eq!(ids(TodoFilter::Open), vec!["b", "c"]);
        assert_eq!(ids(TodoFilter::Done), vec!["a"]);
    }
}
