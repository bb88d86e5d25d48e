//! Task List Component

use leptos::prelude::*;
use taskboard_core::routes::Route;
use taskboard_core::view::TaskRow;

#[component]
pub fn TaskList(#[prop(into)] title: String, tasks: Vec<TaskRow>) -> impl IntoView {
    let count = tasks.len();

    view! {
        <h2>{format!("{} ({})", title, count)}</h2>
        {if tasks.is_empty() {
            view! { <p class="empty">"No tasks yet."</p> }.into_any()
        } else {
            view! {
                <ul class="task-list">
                    {tasks.into_iter().map(|row| view! {
                        <li class="task-item">
                            <a class="task-title" href=Route::Task(Some(row.id)).href()>{row.title}</a>
                            <span class=row.priority_class>{row.priority}</span>
                            <span class="task-status">{row.status}</span>
                            <span class="task-dates">
                                "Created: " {row.created} " · Due: " {row.due}
                            </span>
                            <span class="task-assignee">{row.assignee}</span>
                        </li>
                    }).collect_view()}
                </ul>
            }.into_any()
        }}
    }
}
