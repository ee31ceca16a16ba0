use std::{sync::Arc, time::Duration};

use futures::future::join_all;
use shared::domain::{ItemId, ItemPatch, NewItem, OwnerId};
use tokio::{sync::Mutex, time::Instant};
use tracing::{debug, info, warn};

use crate::{
    config::Settings,
    filter::FilterMode,
    notification::{Notification, NotificationTimer},
    reducer::Action,
    state::{OperationKind, TodoState, TodoView},
    store::RemoteStore,
};

struct ControllerInner {
    store: Arc<dyn RemoteStore>,
    owner_id: OwnerId,
    notification_timeout: Duration,
    state: Mutex<TodoState>,
    timer: NotificationTimer,
}

#[derive(Clone)]
pub struct TodoController {
    inner: Arc<ControllerInner>,
}

impl TodoController {
    pub fn new(store: Arc<dyn RemoteStore>, settings: &Settings) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                store,
                owner_id: settings.owner_id,
                notification_timeout: settings.notification_timeout,
                state: Mutex::new(TodoState::default()),
                timer: NotificationTimer::default(),
            }),
        }
    }

    pub fn owner_id(&self) -> OwnerId {
        self.inner.owner_id
    }

    pub async fn view(&self) -> TodoView {
        self.inner.state.lock().await.view()
    }

    pub async fn state(&self) -> TodoState {
        self.inner.state.lock().await.clone()
    }

    async fn dispatch(&self, action: Action) {
        self.inner.state.lock().await.apply(action);
    }

    pub async fn load(&self) {
        match self.inner.store.list(self.inner.owner_id).await {
            Ok(items) => {
                info!(owner_id = %self.inner.owner_id, count = items.len(), "loaded items");
                self.dispatch(Action::Loaded(items)).await;
            }
            Err(error) => {
                warn!(owner_id = %self.inner.owner_id, %error, "failed to load items");
                self.handle_error(Notification::LoadFailed).await;
            }
        }
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.dispatch(Action::QueryChanged(query.into())).await;
    }

    pub async fn select_filter(&self, filter: FilterMode) {
        self.dispatch(Action::FilterSelected(filter)).await;
    }

    pub async fn start_editing(&self, id: ItemId) {
        self.dispatch(Action::EditStarted(id)).await;
    }

    /// Escape: leaves edit mode without touching any in-flight request.
    pub async fn cancel_editing(&self) {
        self.dispatch(Action::EditCancelled).await;
    }

    pub async fn create(&self, title: &str) {
        self.clear_error().await;
        let title = title.trim();
        {
            let mut state = self.inner.state.lock().await;
            let trimmed = state.query().trim().to_string();
            state.apply(Action::QueryChanged(trimmed));
        }
        if title.is_empty() {
            self.handle_error(Notification::EmptyTitle).await;
            return;
        }

        let new_item = NewItem {
            title: title.to_string(),
            owner_id: self.inner.owner_id,
            completed: false,
        };
        self.dispatch(Action::PlaceholderShown(new_item.placeholder()))
            .await;
        debug!(title, "creating item");

        match self.inner.store.create(new_item).await {
            Ok(item) => {
                let mut state = self.inner.state.lock().await;
                state.apply(Action::ItemAppended(item));
                state.apply(Action::QueryChanged(String::new()));
            }
            Err(error) => {
                warn!(%error, "failed to create item");
                self.handle_error(Notification::AddFailed).await;
            }
        }

        self.dispatch(Action::PlaceholderCleared).await;
    }

    pub async fn delete(&self, id: ItemId) {
        self.clear_error().await;
        self.dispatch(Action::OperationsStarted {
            ids: vec![id],
            kind: OperationKind::Loading,
        })
        .await;
        debug!(item_id = %id, "deleting item");

        match self.inner.store.delete(id).await {
            Ok(()) => self.dispatch(Action::ItemsRemoved(vec![id])).await,
            Err(error) => {
                warn!(item_id = %id, %error, "failed to delete item");
                self.handle_error(Notification::DeleteFailed).await;
            }
        }

        self.dispatch(Action::OperationsFinished {
            ids: vec![id],
            kind: OperationKind::Loading,
        })
        .await;
    }

    pub async fn clear_completed(&self) {
        let ids: Vec<ItemId> = {
            let mut state = self.inner.state.lock().await;
            let ids: Vec<ItemId> = state
                .items()
                .iter()
                .filter(|item| item.completed)
                .map(|item| item.id)
                .collect();
            state.apply(Action::OperationsStarted {
                ids: ids.clone(),
                kind: OperationKind::Loading,
            });
            ids
        };
        self.clear_error().await;
        debug!(count = ids.len(), "deleting completed items");

        let results = join_all(ids.iter().map(|id| self.inner.store.delete(*id))).await;
        let mut removed = Vec::new();
        let mut failed = 0usize;
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(()) => removed.push(*id),
                Err(error) => {
                    warn!(item_id = %id, %error, "failed to delete completed item");
                    failed += 1;
                }
            }
        }

        if !removed.is_empty() {
            self.dispatch(Action::ItemsRemoved(removed)).await;
        }
        if failed > 0 {
            self.handle_error(Notification::DeleteFailed).await;
        }

        self.dispatch(Action::OperationsFinished {
            ids,
            kind: OperationKind::Loading,
        })
        .await;
    }

    pub async fn toggle(&self, id: ItemId) {
        self.clear_error().await;
        let completed = {
            let mut state = self.inner.state.lock().await;
            let Some(item) = state.item(id) else {
                return;
            };
            let completed = !item.completed;
            state.apply(Action::OperationsStarted {
                ids: vec![id],
                kind: OperationKind::Loading,
            });
            completed
        };
        debug!(item_id = %id, completed, "toggling item");

        match self
            .inner
            .store
            .update(id, ItemPatch::completed(completed))
            .await
        {
            Ok(item) => self.dispatch(Action::ItemsReplaced(vec![item])).await,
            Err(error) => {
                warn!(item_id = %id, %error, "failed to toggle item");
                self.handle_error(Notification::UpdateFailed).await;
            }
        }

        self.dispatch(Action::OperationsFinished {
            ids: vec![id],
            kind: OperationKind::Loading,
        })
        .await;
    }

    /// Flips every item whose state equals `all_completed` to the opposite state.
    pub async fn toggle_all(&self, all_completed: bool) {
        let target = !all_completed;
        self.clear_error().await;
        let ids: Vec<ItemId> = {
            let mut state = self.inner.state.lock().await;
            let ids: Vec<ItemId> = state
                .items()
                .iter()
                .filter(|item| item.completed == all_completed)
                .map(|item| item.id)
                .collect();
            state.apply(Action::OperationsStarted {
                ids: ids.clone(),
                kind: OperationKind::Loading,
            });
            ids
        };
        debug!(count = ids.len(), completed = target, "toggling all items");

        let results = join_all(
            ids.iter()
                .map(|id| self.inner.store.update(*id, ItemPatch::completed(target))),
        )
        .await;
        let mut updated = Vec::new();
        let mut failed = 0usize;
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(item) => updated.push(item),
                Err(error) => {
                    warn!(item_id = %id, %error, "failed to toggle item");
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            self.handle_error(Notification::UpdateFailed).await;
        }
        if !updated.is_empty() {
            self.dispatch(Action::ItemsReplaced(updated)).await;
        }

        self.dispatch(Action::OperationsFinished {
            ids,
            kind: OperationKind::Loading,
        })
        .await;
    }

    /// Saves a title edit. An empty title deletes the item instead.
    pub async fn edit(&self, id: ItemId, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            self.delete(id).await;
            // A failed delete keeps the item in edit mode.
            let mut state = self.inner.state.lock().await;
            if state.item(id).is_none() {
                state.apply(Action::EditFinished(id));
            }
            return;
        }

        {
            let mut state = self.inner.state.lock().await;
            let Some(item) = state.item(id) else {
                return;
            };
            if item.title == title {
                state.apply(Action::EditCancelled);
                return;
            }
        }

        self.clear_error().await;
        self.dispatch(Action::OperationsStarted {
            ids: vec![id],
            kind: OperationKind::EditLoading,
        })
        .await;
        debug!(item_id = %id, title, "renaming item");

        match self.inner.store.update(id, ItemPatch::title(title)).await {
            Ok(item) => {
                let mut state = self.inner.state.lock().await;
                state.apply(Action::EditFinished(id));
                state.apply(Action::ItemsReplaced(vec![item]));
            }
            Err(error) => {
                warn!(item_id = %id, %error, "failed to rename item");
                self.handle_error(Notification::UpdateFailed).await;
            }
        }

        self.dispatch(Action::OperationsFinished {
            ids: vec![id],
            kind: OperationKind::EditLoading,
        })
        .await;
    }

    pub async fn dismiss_error(&self) {
        self.clear_error().await;
    }

    async fn clear_error(&self) {
        let mut state = self.inner.state.lock().await;
        self.inner.timer.cancel().await;
        state.apply(Action::NotificationCleared);
    }

    async fn handle_error(&self, notification: Notification) {
        let mut state = self.inner.state.lock().await;
        state.apply(Action::NotificationRaised(notification));
        let generation = state.notification_generation;

        let inner = Arc::downgrade(&self.inner);
        let deadline = Instant::now() + self.inner.notification_timeout;
        let expiry = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(inner) = inner.upgrade() {
                inner
                    .state
                    .lock()
                    .await
                    .apply(Action::NotificationExpired(generation));
            }
        });
        // Still holding the state lock so concurrent raises restart in order.
        self.inner.timer.restart(expiry).await;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
