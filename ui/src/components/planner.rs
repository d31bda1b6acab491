use chrono::NaiveDate;
use leptos::prelude::*;

use crate::components::confirm;
use crate::components::document_editor::{DocumentEditor, Editing, StoreStatus};
use crate::store::DocumentStore;
use crate::types::{Collection, Document};

/// Plans sharing a calendar day; `day` is None for plans without a valid date
#[derive(Clone, Debug, PartialEq)]
pub struct DayGroup {
    pub day: Option<NaiveDate>,
    pub plans: Vec<Document>,
}

/// Group by day ascending, ordered by start time within a day.
/// Undated plans come last.
pub fn group_by_day(plans: &[Document]) -> Vec<DayGroup> {
    let mut sorted: Vec<Document> = plans.to_vec();
    sorted.sort_by(|a, b| {
        let key = |d: &Document| {
            (
                d.field_date("day").map(|dt| dt.date_naive()).is_none(),
                d.field_date("day").map(|dt| dt.date_naive()),
                d.field_str("start").unwrap_or_default().to_string(),
            )
        };
        key(a).cmp(&key(b))
    });

    let mut groups: Vec<DayGroup> = Vec::new();
    for plan in sorted {
        let day = plan.field_date("day").map(|dt| dt.date_naive());
        match groups.last_mut() {
            Some(group) if group.day == day => group.plans.push(plan),
            _ => groups.push(DayGroup { day, plans: vec![plan] }),
        }
    }
    groups
}

/// Title of the referenced todo, if it is known
pub fn resolve_todo_title(todos: &[Document], id: &str) -> Option<String> {
    todos.iter().find(|t| t.id == id).map(Document::title)
}

#[component]
pub fn PlannerPage() -> impl IntoView {
    let store = DocumentStore::new(Collection::Planner);
    let todos = DocumentStore::new(Collection::Todos);
    let editing = RwSignal::new(Option::<Editing>::None);
    let on_close = Callback::new(move |_| editing.set(None));

    view! {
        <div class="p-8">
            <div class="flex justify-between items-center mb-6">
                <h2 class="text-3xl font-bold">"Planner"</h2>
                <button
                    class="bg-blue-500 hover:bg-blue-600 text-white px-4 py-2 rounded flex items-center gap-2"
                    on:click=move |_| editing.set(Some(Editing::New))
                >
                    <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4"/>
                    </svg>
                    "New plan"
                </button>
            </div>

            <StoreStatus store=store />

            {move || editing.get().map(|e| view! {
                <DocumentEditor store=store editing=e on_close=on_close />
            })}

            {move || {
                let groups = store.documents.with(|docs| group_by_day(docs));
                if groups.is_empty() {
                    view! {
                        <div class="text-center py-12 bg-white rounded-lg shadow text-gray-500">
                            "Nothing planned."
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="space-y-6">
                            {groups.into_iter().map(|group| view! {
                                <DaySection group=group store=store todos=todos editing=editing />
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn DaySection(
    group: DayGroup,
    store: DocumentStore,
    todos: DocumentStore,
    editing: RwSignal<Option<Editing>>,
) -> impl IntoView {
    let heading = group
        .day
        .map(|d| d.format("%A, %b %-d, %Y").to_string())
        .unwrap_or_else(|| "Unscheduled".to_string());

    view! {
        <section>
            <h3 class="text-sm font-semibold text-gray-500 uppercase tracking-wider mb-2">{heading}</h3>
            <div class="bg-white rounded-lg shadow divide-y divide-gray-100">
                {group.plans.into_iter().map(|plan| {
                    let id = plan.id.clone();
                    let pending = plan.is_pending();
                    let title = plan.title();
                    let title_for_delete = title.clone();
                    let times = match (plan.field_str("start"), plan.field_str("end")) {
                        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => format!("{} - {}", start, end),
                        (Some(start), _) if !start.is_empty() => start.to_string(),
                        _ => String::new(),
                    };
                    let todo_id = plan.field_str("todo").filter(|t| !t.is_empty()).map(String::from);
                    let linked = move || {
                        todo_id.as_ref().map(|tid| {
                            todos.documents
                                .with(|docs| resolve_todo_title(docs, tid))
                                .unwrap_or_else(|| "(missing todo)".to_string())
                        })
                    };

                    view! {
                        <div class="flex items-center justify-between p-4 hover:bg-gray-50">
                            <div class="flex items-center gap-4">
                                <span class="w-28 text-sm font-mono text-gray-500">{times}</span>
                                <div>
                                    <div class="font-medium text-gray-900">{title}</div>
                                    {move || linked().map(|t| view! {
                                        <div class="text-xs text-blue-700">{format!("Todo: {}", t)}</div>
                                    })}
                                </div>
                            </div>
                            <div class="flex gap-2">
                                <button
                                    class="px-3 py-1 text-sm text-blue-600 hover:bg-blue-50 rounded"
                                    disabled=pending
                                    on:click=move |_| editing.set(Some(Editing::Existing(plan.clone())))
                                >
                                    "Edit"
                                </button>
                                <button
                                    class="px-3 py-1 text-sm text-red-600 hover:bg-red-50 rounded"
                                    disabled=pending
                                    on:click=move |_| {
                                        if confirm(&format!("Delete \"{}\"?", title_for_delete)) {
                                            store.remove(id.clone());
                                        }
                                    }
                                >
                                    "Delete"
                                </button>
                            </div>
                        </div>
                    }
                }).collect_view()}
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn plan(id: &str, data: serde_json::Value) -> Document {
        let now = Utc::now();
        Document {
            id: id.to_string(),
            collection: Collection::Planner,
            data,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_group_by_day() {
        let plans = vec![
            plan("late", json!({ "day": "2024-05-02T00:00:00Z", "start": "15:00" })),
            plan("undated", json!({ "title": "someday" })),
            plan("early", json!({ "day": "2024-05-02T00:00:00Z", "start": "09:00" })),
            plan("first", json!({ "day": "2024-05-01T10:00:00Z" })),
        ];

        let groups = group_by_day(&plans);
        let shape: Vec<(Option<NaiveDate>, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.day, g.plans.iter().map(|p| p.id.as_str()).collect()))
            .collect();

        assert_eq!(
            shape,
            vec![
                (NaiveDate::from_ymd_opt(2024, 5, 1), vec!["first"]),
                (NaiveDate::from_ymd_opt(2024, 5, 2), vec!["early", "late"]),
                (None, vec!["undated"]),
            ]
        );
    }

    #[test]
    fn test_resolve_todo_title() {
        let todos = vec![Document {
            collection: Collection::Todos,
            ..plan("t1", json!({ "title": "Buy milk" }))
        }];
        assert_eq!(resolve_todo_title(&todos, "t1").as_deref(), Some("Buy milk"));
        assert_eq!(resolve_todo_title(&todos, "t2"), None);
    }
}
