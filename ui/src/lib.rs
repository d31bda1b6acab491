use leptos::prelude::*;

mod api;
mod components;
mod store;
mod types;

use components::journal::JournalPage;
use components::planner::PlannerPage;
use components::todos::TodosPage;
use types::Collection;

#[component]
pub fn App() -> impl IntoView {
    let (tab, set_tab) = signal(Collection::Journal);

    view! {
        <div class="flex h-screen bg-gray-100">
            // Sidebar
            <div class="w-64 bg-gray-800 text-white p-4 flex flex-col">
                <h1 class="text-2xl font-bold mb-8">"Daybook"</h1>
                <nav class="space-y-1 flex-1">
                    {Collection::ALL.into_iter().map(|c| view! {
                        <TabButton collection=c active=tab on_select=set_tab />
                    }).collect_view()}
                </nav>
                <div class="text-xs text-gray-500 mt-4">
                    "Journal, todos and planner"
                </div>
            </div>

            // Main Content
            <div class="flex-1 overflow-y-auto">
                {move || match tab.get() {
                    Collection::Journal => view! { <JournalPage /> }.into_any(),
                    Collection::Todos => view! { <TodosPage /> }.into_any(),
                    Collection::Planner => view! { <PlannerPage /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn TabButton(
    collection: Collection,
    active: ReadSignal<Collection>,
    on_select: WriteSignal<Collection>,
) -> impl IntoView {
    let label = match collection {
        Collection::Journal => "Journal",
        Collection::Todos => "Todos",
        Collection::Planner => "Planner",
    };

    view! {
        <button
            class=move || format!(
                "block w-full text-left p-2 rounded transition-colors {}",
                if active.get() == collection { "bg-gray-700" } else { "hover:bg-gray-700" }
            )
            on:click=move |_| on_select.set(collection)
        >
            {label}
        </button>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("Console logger already initialized");
    }
    leptos::mount::mount_to_body(App);
}
