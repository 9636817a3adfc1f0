//! Task Table Component
//!
//! Renders the filtered/sorted tasks with per-row toggle, edit and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use task_store::{Task, TaskId};

use crate::commands;
use crate::context::use_app_context;

#[component]
pub fn TaskTable(
    #[prop(into)] tasks: Signal<Vec<Task>>,
    #[prop(into)] on_edit: Callback<Task>,
    #[prop(into)] on_toggle: Callback<TaskId>,
) -> impl IntoView {
    view! {
        <Show
            when=move || tasks.with(|tasks| !tasks.is_empty())
            fallback=|| view! { <p class="empty">"No tasks found"</p> }
        >
            <div class="table-wrapper">
                <table class="task-table">
                    <thead>
                        <tr>
                            <th>"Status"</th>
                            <th>"Title"</th>
                            <th>"Deadline"</th>
                            <th>"Lists"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            tasks
                                .get()
                                .into_iter()
                                .map(|task| view! {
                                    <TaskRow
                                        task=task
                                        on_edit=on_edit
                                        on_toggle=on_toggle
                                    />
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>
        </Show>
    }
}

/// Where a row is in the delete flow
#[derive(Clone, Copy, PartialEq, Eq)]
enum DeleteState {
    Idle,
    /// Asking "Delete <title>?"
    Confirming,
    /// Request sent; the row goes away with the next fetch
    Deleting,
}

/// One table row
#[component]
fn TaskRow(
    task: Task,
    on_edit: Callback<Task>,
    on_toggle: Callback<TaskId>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (delete_state, set_delete_state) = signal(DeleteState::Idle);
    let busy = move || delete_state.get() == DeleteState::Deleting;

    let toggle_id = task.id.clone();
    let delete_id = StoredValue::new(task.id.clone());
    let status_class = if task.is_complete { "status-btn complete" } else { "status-btn" };
    let status_icon = if task.is_complete { "✔" } else { "✖" };
    let status_title = if task.is_complete { "Mark incomplete" } else { "Mark complete" };
    let deadline = task.deadline_label();
    let title = task.title.clone();
    let confirm_prompt = format!("Delete \"{}\"?", task.title);
    let lists = task.lists.clone();

    let confirm_delete = move |_| {
        set_delete_state.set(DeleteState::Deleting);
        let id = delete_id.get_value();
        spawn_local(async move {
            // On success the row is replaced by the re-fetched board
            if !commands::delete_task(ctx, id).await {
                set_delete_state.set(DeleteState::Idle);
            }
        });
    };

    view! {
        <tr class:deleting=busy>
            <td>
                <button
                    class=status_class
                    title=status_title
                    disabled=busy
                    on:click=move |_| on_toggle.run(toggle_id.clone())
                >
                    {status_icon}
                </button>
            </td>
            <td>{title}</td>
            <td class="nowrap">{deadline}</td>
            <td>
                <ul>
                    {lists
                        .into_iter()
                        .map(|item| view! { <li>{item.text}</li> })
                        .collect_view()}
                </ul>
            </td>
            <td>
                <div class="row-actions">
                    {move || match delete_state.get() {
                        DeleteState::Idle => {
                            let task = task.clone();
                            view! {
                                <button
                                    class="edit-btn"
                                    title="Edit"
                                    on:click=move |_| on_edit.run(task.clone())
                                >
                                    "✎"
                                </button>
                                <button
                                    class="delete-btn"
                                    title="Delete"
                                    on:click=move |_| set_delete_state.set(DeleteState::Confirming)
                                >
                                    "🗑"
                                </button>
                            }
                            .into_any()
                        }
                        DeleteState::Confirming => view! {
                            <span class="delete-confirm">
                                <span class="delete-confirm-text">{confirm_prompt.clone()}</span>
                                <button class="confirm-btn" title="Delete" on:click=confirm_delete>
                                    "✓"
                                </button>
                                <button
                                    class="cancel-btn"
                                    title="Keep"
                                    on:click=move |_| set_delete_state.set(DeleteState::Idle)
                                >
                                    "✗"
                                </button>
                            </span>
                        }
                        .into_any(),
                        DeleteState::Deleting => view! {
                            <span class="delete-confirm-text">"Deleting..."</span>
                        }
                        .into_any(),
                    }}
                </div>
            </td>
        </tr>
    }
}
