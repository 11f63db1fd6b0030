use std::collections::HashSet;

use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use tasklist_client::{EditCoordinator, Mutation, Outcome, RemoteTaskClient, TaskCollection};
use tasklist_model::{CreateTaskRequest, Task, TaskId};
use web_sys::{console, window};

#[derive(Debug, Clone)]
pub enum Msg {
    LoadTasks,
    SetNewTaskTitle(String),
    SetNewTaskDescription(String),
    CreateTask,
    ToggleTask(TaskId),
    DeleteTask(TaskId),
    BeginEdit(TaskId),
    SetDraft(TaskId, String),
    EditKey(TaskId, String),
    CommitEdit(TaskId),
    CancelEdit(TaskId),
    DismissError,
    Synced(Outcome),
}

#[derive(Debug, Clone)]
pub struct Model {
    api: RemoteTaskClient,
    tasks: TaskCollection,
    editor: EditCoordinator,
    new_task_title: String,
    new_task_description: String,
    // Rows with a write in flight; their controls are disabled until it resolves.
    pending: HashSet<TaskId>,
}

impl Model {
    pub fn new(api: RemoteTaskClient) -> Self {
        Self {
            api,
            tasks: TaskCollection::new(),
            editor: EditCoordinator::new(),
            new_task_title: String::new(),
            new_task_description: String::new(),
            pending: HashSet::new(),
        }
    }

    fn dispatch(&mut self, mutation: Mutation) -> Cmd<Msg> {
        if let Some(id) = mutation.target() {
            self.pending.insert(id.clone());
        }
        let api = self.api.clone();
        Cmd::new(async move { Msg::Synced(mutation.send(&api).await) })
    }

    fn task(&self, id: &TaskId) -> Option<Task> {
        self.tasks.get(id).cloned()
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::new(async { Msg::LoadTasks })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::LoadTasks => {
                self.tasks.begin_load();
                self.dispatch(Mutation::Load)
            }
            Msg::SetNewTaskTitle(task_title) => {
                self.new_task_title = task_title;
                Cmd::none()
            }
            Msg::SetNewTaskDescription(description) => {
                self.new_task_description = description;
                Cmd::none()
            }
            Msg::CreateTask => {
                let task_title = self.new_task_title.trim().to_string();
                if task_title.is_empty() {
                    return Cmd::none();
                }
                let input = CreateTaskRequest::new(task_title)
                    .with_description(self.new_task_description.trim());

                self.new_task_title.clear();
                self.new_task_description.clear();
                self.dispatch(Mutation::Add(input))
            }
            Msg::ToggleTask(id) => match self.task(&id) {
                Some(task) => self.dispatch(Mutation::Toggle(task)),
                None => Cmd::none(),
            },
            Msg::DeleteTask(id) => {
                let Some(task) = self.task(&id) else {
                    return Cmd::none();
                };
                let confirmed = window()
                    .and_then(|w| {
                        w.confirm_with_message(&format!("Delete \"{}\"?", task.title))
                            .ok()
                    })
                    .unwrap_or(false);
                if confirmed {
                    self.dispatch(Mutation::Remove(task))
                } else {
                    Cmd::none()
                }
            }
            Msg::BeginEdit(id) => {
                if self.pending.contains(&id) {
                    return Cmd::none();
                }
                if let Some(task) = self.task(&id) {
                    self.editor.begin_edit(&task);
                }
                Cmd::none()
            }
            Msg::SetDraft(id, value) => {
                self.editor.update_draft(&id, value);
                Cmd::none()
            }
            Msg::EditKey(id, key) => {
                let Some(task) = self.task(&id) else {
                    return Cmd::none();
                };
                match self.editor.handle_key(&task, &key) {
                    Some(updates) => self.dispatch(Mutation::Edit(task, updates)),
                    None => Cmd::none(),
                }
            }
            Msg::CommitEdit(id) => {
                let Some(task) = self.task(&id) else {
                    return Cmd::none();
                };
                match self.editor.commit_edit(&task) {
                    Some(updates) => self.dispatch(Mutation::Edit(task, updates)),
                    None => Cmd::none(),
                }
            }
            Msg::CancelEdit(id) => {
                if let Some(task) = self.task(&id) {
                    self.editor.cancel_edit(&task);
                }
                Cmd::none()
            }
            Msg::DismissError => {
                self.tasks.dismiss_error();
                Cmd::none()
            }
            Msg::Synced(outcome) => {
                if let Some(id) = outcome.target() {
                    self.pending.remove(id);
                }
                let failed = outcome.is_failure();
                if self.tasks.apply(outcome) {
                    self.editor.reconcile(&self.tasks);
                }
                if let (true, Some(error)) = (failed, self.tasks.error()) {
                    console::log_1(&format!("{error}: {}", error.source).into());
                }
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        div(
            [class("min-h-screen bg-ctp-base text-ctp-text")],
            [
                header([class("bg-ctp-mantle shadow-lg border-b border-ctp-surface0")], [
                    div([class("max-w-3xl mx-auto px-6 py-4")], [
                        h1([class("text-2xl font-bold text-ctp-text")], [text("To-Do List")]),
                    ]),
                ]),
                div([class("max-w-3xl mx-auto px-6 py-8 space-y-6")], [
                    self.view_error(),
                    self.view_create_form(),
                    if self.tasks.is_loading() {
                        div([class("text-center py-10 text-ctp-subtext0 italic")], [text("Loading tasks...")])
                    } else {
                        self.view_task_list()
                    },
                ]),
            ],
        )
    }
}

impl Model {
    fn view_error(&self) -> Node<Msg> {
        match self.tasks.error() {
            Some(error) => div(
                [class("flex items-center justify-between px-4 py-3 rounded-lg bg-ctp-red/20 text-ctp-red border border-ctp-red")],
                [
                    span([], [text(error.to_string())]),
                    button(
                        [
                            on_click(|_| Msg::DismissError),
                            r#type("button"),
                            class("text-sm font-medium hover:underline"),
                        ],
                        [text("Dismiss")],
                    ),
                ],
            ),
            None => span([], []),
        }
    }

    fn view_create_form(&self) -> Node<Msg> {
        div(
            [class("p-6 bg-ctp-surface1 rounded-lg border border-ctp-surface2")],
            [
                h2([class("text-xl font-semibold text-ctp-text mb-4 pb-2 border-b border-ctp-surface2")], [text("Add New Task")]),
                div([class("space-y-4")], [
                    input([
                        r#type("text"),
                        placeholder("Task title"),
                        value(&self.new_task_title),
                        on_input(|event| Msg::SetNewTaskTitle(event.value())),
                        class("w-full px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue"),
                    ], []),
                    input([
                        r#type("text"),
                        placeholder("Description (optional)"),
                        value(&self.new_task_description),
                        on_input(|event| Msg::SetNewTaskDescription(event.value())),
                        class("w-full px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue"),
                    ], []),
                    button([
                        on_click(|_| Msg::CreateTask),
                        class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200"),
                    ], [text("Add Task")]),
                ]),
            ],
        )
    }

    fn view_task_list(&self) -> Node<Msg> {
        if self.tasks.is_empty() {
            return p([class("text-center py-12 text-ctp-subtext0")], [text("No tasks yet. Add one above.")]);
        }
        ul(
            [class("space-y-4")],
            self.tasks.tasks().iter().map(|task| self.view_task(task)).collect::<Vec<_>>(),
        )
    }

    fn view_task(&self, task: &Task) -> Node<Msg> {
        let is_loading = self.pending.contains(&task.id);

        li(
            [
                key(task.id.to_string()),
                class(&format!(
                    "border rounded-xl p-6 bg-ctp-surface0 shadow-sm transition-all duration-300 {}",
                    if task.completed { "border-ctp-green bg-ctp-green/10" } else { "border-ctp-surface1" }
                )),
            ],
            match self.editor.draft(&task.id) {
                Some(draft) => vec![self.view_editor(task, draft)],
                None => vec![self.view_row(task, is_loading)],
            },
        )
    }

    fn view_editor(&self, task: &Task, draft: &str) -> Node<Msg> {
        let id = task.id.clone();
        div([class("flex items-center gap-2")], [
            input([
                r#type("text"),
                value(draft.to_string()),
                on_input({
                    let id = id.clone();
                    move |event| Msg::SetDraft(id.clone(), event.value())
                }),
                on_keydown({
                    let id = id.clone();
                    move |event| Msg::EditKey(id.clone(), event.key())
                }),
                class("flex-1 px-3 py-2 bg-ctp-surface1 border border-ctp-surface2 rounded-md text-ctp-text focus:outline-none focus:ring-2 focus:ring-ctp-blue"),
            ], []),
            button([
                on_click({
                    let id = id.clone();
                    move |_| Msg::CommitEdit(id.clone())
                }),
                r#type("button"),
                class("bg-ctp-green hover:bg-ctp-teal text-ctp-base font-medium px-4 py-2 rounded-md"),
            ], [text("Save")]),
            button([
                on_click(move |_| Msg::CancelEdit(id.clone())),
                r#type("button"),
                class("bg-ctp-overlay0 hover:bg-ctp-overlay1 text-ctp-text font-medium px-4 py-2 rounded-md"),
            ], [text("Cancel")]),
        ])
    }

    fn view_row(&self, task: &Task, is_loading: bool) -> Node<Msg> {
        let toggle_label = if task.completed { "Mark Incomplete" } else { "Mark Complete" };

        div([class("flex items-start gap-4")], [
            div([class("flex-1 min-w-0")], [
                h3([
                    class(&format!(
                        "text-lg font-semibold mb-1 cursor-text {}",
                        if task.completed { "line-through text-ctp-overlay1" } else { "text-ctp-text" }
                    )),
                    on_dblclick({
                        let id = task.id.clone();
                        move |_| Msg::BeginEdit(id.clone())
                    }),
                ], [
                    if is_loading {
                        text(&format!("{} (updating...)", task.title))
                    } else {
                        text(&task.title)
                    }
                ]),
                if task.description.is_empty() {
                    span([], [])
                } else {
                    p([class("text-sm text-ctp-subtext1 break-words")], [text(&task.description)])
                },
            ]),
            div([class("flex-shrink-0 flex gap-2")], [
                button([
                    on_click({
                        let id = task.id.clone();
                        move |_| Msg::ToggleTask(id.clone())
                    }),
                    r#type("button"),
                    disabled(is_loading),
                    attr("aria-label", &format!("{} as {}", task.title, if task.completed { "incomplete" } else { "complete" })),
                    class("bg-ctp-blue/20 text-ctp-blue hover:bg-ctp-blue/30 px-3 py-1 rounded-lg text-sm"),
                ], [text(toggle_label)]),
                button([
                    on_click({
                        let id = task.id.clone();
                        move |_| Msg::BeginEdit(id.clone())
                    }),
                    r#type("button"),
                    disabled(is_loading),
                    class("bg-ctp-surface1 text-ctp-text hover:bg-ctp-surface2 px-3 py-1 rounded-lg text-sm"),
                ], [text("Edit")]),
                button([
                    on_click({
                        let id = task.id.clone();
                        move |_| Msg::DeleteTask(id.clone())
                    }),
                    r#type("button"),
                    disabled(is_loading),
                    attr("aria-label", &format!("Delete {}", task.title)),
                    class("bg-ctp-red/20 text-ctp-red hover:bg-ctp-red/30 px-3 py-1 rounded-lg text-sm"),
                ], [text("Delete")]),
            ]),
        ])
    }
}

/// `TASKLIST_API_URL` at build time, otherwise the origin serving the page.
fn api_base_url() -> String {
    if let Some(url) = option_env!("TASKLIST_API_URL") {
        return url.to_string();
    }
    window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    Program::mount_to_body(Model::new(RemoteTaskClient::new(api_base_url())));
}
