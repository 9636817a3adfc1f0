//! Task Board Frontend App
//!
//! Auth gate until a session exists, then the toolbar with either the task
//! table or the create/edit form.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use task_store::{visible_tasks, SortOption, Task, TaskId, TaskInput};

use crate::commands;
use crate::components::{AuthGate, BoardToolbar, EditorMode, TaskForm, TaskTable};
use crate::context::AppContext;
use crate::storage;
use crate::store::{store_begin_loading, store_clear, store_loading, store_tasks, BoardState};

#[component]
pub fn App() -> impl IntoView {
    let board = Store::new(BoardState::new());
    let ctx = AppContext::new(board);
    provide_context(ctx);

    let search = RwSignal::new(String::new());
    let sort = RwSignal::new(SortOption::default());
    let editor = RwSignal::new(EditorMode::default());

    let visible = Memo::new(move |_| {
        let tasks = store_tasks(&board);
        search.with(|search| visible_tasks(&tasks, search, sort.get()))
    });

    // Persist the session and (re)load the board whenever it changes
    Effect::new(move |_| {
        if !ctx.auth_ready.get() {
            return;
        }
        match ctx.session.get() {
            Some(session) => {
                storage::save_session(&session);
                store_begin_loading(&board);
                spawn_local(commands::fetch_tasks(ctx));
            }
            None => {
                storage::clear_session();
                store_clear(&board);
                editor.set(EditorMode::Closed);
            }
        }
    });

    spawn_local(commands::restore_session(ctx));

    let open_create = Callback::new(move |_| editor.set(EditorMode::Creating));
    let open_edit = Callback::new(move |task: Task| editor.set(EditorMode::Editing(task)));
    let close_editor = Callback::new(move |_| editor.set(EditorMode::Closed));
    let toggle = Callback::new(move |id: TaskId| spawn_local(commands::toggle_complete(ctx, id)));

    let editor_view = move || match editor.get() {
        EditorMode::Closed => view! {
            <TaskTable
                tasks=visible
                on_edit=open_edit
                on_toggle=toggle
            />
        }
        .into_any(),
        EditorMode::Creating => {
            let on_submit = Callback::new(move |input: TaskInput| {
                spawn_local(async move {
                    if commands::create_task(ctx, input).await {
                        editor.set(EditorMode::Closed);
                    }
                });
            });
            view! { <TaskForm on_submit=on_submit on_cancel=close_editor /> }.into_any()
        }
        EditorMode::Editing(task) => {
            let id = task.id.clone();
            let on_submit = Callback::new(move |input: TaskInput| {
                let id = id.clone();
                spawn_local(async move {
                    if commands::update_task(ctx, id, input).await {
                        editor.set(EditorMode::Closed);
                    }
                });
            });
            view! { <TaskForm initial=task on_submit=on_submit on_cancel=close_editor /> }
                .into_any()
        }
    };

    view! {
        <Show
            when=move || ctx.auth_ready.get()
            fallback=|| view! { <div class="loading-screen">"Loading..."</div> }
        >
            <Show
                when=move || ctx.session.with(Option::is_some)
                fallback=|| view! { <AuthGate /> }
            >
                <main class="board">
                    <div class="board-card">
                        <BoardToolbar search=search sort=sort on_create=open_create />
                        <Show
                            when=move || !store_loading(&board)
                            fallback=|| view! { <p class="loading-screen">"Loading tasks..."</p> }
                        >
                            {editor_view}
                        </Show>
                    </div>
                </main>
            </Show>
        </Show>
    }
}
