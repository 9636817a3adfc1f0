//! Task Form Component
//!
//! Create/edit form: title, completion, deadline and a growable list of
//! sub-items. Validation lives in `TaskDraft::submit`.

use leptos::prelude::*;
use task_store::{Task, TaskDraft, TaskInput};

#[component]
pub fn TaskForm(
    #[prop(optional)] initial: Option<Task>,
    #[prop(into)] on_submit: Callback<TaskInput>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let editing = initial.is_some();
    let draft = RwSignal::new(initial.as_ref().map(TaskDraft::from_task).unwrap_or_default());
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match draft.with_untracked(TaskDraft::submit) {
            Ok(input) => {
                set_error.set(None);
                on_submit.run(input);
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    let list_keys = move || draft.with(|d| d.lists().iter().map(|l| l.key).collect::<Vec<_>>());

    view! {
        <form class="task-form" on:submit=submit>
            <h2>{if editing { "Edit Task" } else { "Create Task" }}</h2>

            <label for="task-title">"Title"</label>
            <input
                id="task-title"
                type="text"
                prop:value=move || draft.with(|d| d.title.clone())
                on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
            />

            <label class="checkbox-row">
                <input
                    type="checkbox"
                    prop:checked=move || draft.with(|d| d.is_complete)
                    on:change=move |ev| draft.update(|d| d.is_complete = event_target_checked(&ev))
                />
                "Completed"
            </label>

            <label for="task-deadline">"Deadline"</label>
            <input
                id="task-deadline"
                type="date"
                prop:value=move || draft.with(|d| d.deadline.clone())
                on:input=move |ev| draft.update(|d| d.deadline = event_target_value(&ev))
            />

            <label>"Lists"</label>
            <For
                each=list_keys
                key=|key| *key
                children=move |key: u64| {
                    view! {
                        <div class="list-row">
                            <input
                                type="text"
                                placeholder="List item"
                                prop:value=move || draft.with(|d| d.list_text(key))
                                on:input=move |ev| {
                                    draft.update(|d| d.set_list_text(key, event_target_value(&ev)))
                                }
                            />
                            <Show when=move || draft.with(TaskDraft::can_remove_list)>
                                <button
                                    type="button"
                                    class="icon-btn remove"
                                    title="Remove item"
                                    on:click=move |_| {
                                        draft.update(|d| {
                                            d.remove_list(key);
                                        })
                                    }
                                >
                                    "−"
                                </button>
                            </Show>
                            <Show when=move || draft.with(|d| d.is_last(key))>
                                <button
                                    type="button"
                                    class="icon-btn add"
                                    title="Add item"
                                    disabled=move || !draft.with(TaskDraft::can_add_list)
                                    on:click=move |_| {
                                        draft.update(|d| {
                                            d.add_list();
                                        })
                                    }
                                >
                                    "+"
                                </button>
                            </Show>
                        </div>
                    }
                }
            />

            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}

            <div class="form-actions">
                <button type="submit" class="primary-btn">
                    {if editing { "Update Task" } else { "Create Task" }}
                </button>
                <button type="button" class="secondary-btn" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
