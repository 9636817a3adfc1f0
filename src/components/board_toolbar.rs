//! Board Toolbar Component
//!
//! Header actions plus the search box and sort selector.

use leptos::prelude::*;
use leptos::task::spawn_local;
use task_store::SortOption;

use crate::commands;
use crate::context::use_app_context;

#[component]
pub fn BoardToolbar(
    search: RwSignal<String>,
    sort: RwSignal<SortOption>,
    #[prop(into)] on_create: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toolbar">
            <div class="toolbar-header">
                <h1>"Task Management"</h1>
                <div class="toolbar-actions">
                    <button class="primary-btn" on:click=move |_| on_create.run(())>
                        "Create Task"
                    </button>
                    <button
                        class="secondary-btn"
                        on:click=move |_| spawn_local(commands::sign_out(ctx))
                    >
                        "Sign Out"
                    </button>
                </div>
            </div>
            <div class="toolbar-filters">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search tasks..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select
                    class="sort-select"
                    prop:value=move || sort.get().as_str()
                    on:change=move |ev| sort.set(event_target_value(&ev).parse().unwrap_or_default())
                >
                    {SortOption::ALL
                        .iter()
                        .map(|option| view! {
                            <option value=option.as_str()>{option.label()}</option>
                        })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}
