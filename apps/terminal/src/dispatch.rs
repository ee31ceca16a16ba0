use std::{fmt, sync::Arc};

use client_core::TodoController;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::debug;

use crate::commands::UiCommand;

/// Returned when the new-item input is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Busy;

impl fmt::Display for Busy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("busy: wait for the pending request to finish before adding")
    }
}

/// Runs mutating commands in the background.
///
/// `add` is refused while the list is busy. The `adding` lock is taken before
/// the create task is spawned, so a second `add` read before the first task
/// shows its placeholder is refused as well.
#[derive(Clone)]
pub struct Dispatcher {
    controller: TodoController,
    adding: Arc<Mutex<()>>,
}

impl Dispatcher {
    pub fn new(controller: TodoController) -> Self {
        Self {
            controller,
            adding: Arc::new(Mutex::new(())),
        }
    }

    pub fn controller(&self) -> &TodoController {
        &self.controller
    }

    pub async fn submit(&self, command: UiCommand) -> Result<JoinHandle<()>, Busy> {
        let controller = self.controller.clone();
        if let UiCommand::Add(title) = command {
            let Ok(guard) = self.adding.clone().try_lock_owned() else {
                debug!("add refused, create already pending");
                return Err(Busy);
            };
            if controller.view().await.is_busy {
                debug!("add refused, list is busy");
                return Err(Busy);
            }
            return Ok(tokio::spawn(async move {
                controller.set_query(title.clone()).await;
                controller.create(&title).await;
                drop(guard);
            }));
        }

        Ok(tokio::spawn(async move {
            run_mutation(&controller, command).await;
        }))
    }
}

async fn run_mutation(controller: &TodoController, command: UiCommand) {
    match command {
        UiCommand::Toggle(id) => controller.toggle(id).await,
        UiCommand::ToggleAll => {
            let all_completed = controller.view().await.all_completed;
            controller.toggle_all(all_completed).await;
        }
        UiCommand::Delete(id) => controller.delete(id).await,
        UiCommand::ClearCompleted => controller.clear_completed().await,
        UiCommand::SaveEdit { id, title } => controller.edit(id, &title).await,
        _ => {}
    }
}
