use shared::domain::{Item, ItemId};

use crate::{
    filter::FilterMode,
    notification::Notification,
    state::{OperationKind, OperationState, TodoState},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Loaded(Vec<Item>),
    QueryChanged(String),
    FilterSelected(FilterMode),
    PlaceholderShown(Item),
    PlaceholderCleared,
    ItemAppended(Item),
    OperationsStarted {
        ids: Vec<ItemId>,
        kind: OperationKind,
    },
    /// Removes one matching entry per id; entries of other batches stay.
    OperationsFinished {
        ids: Vec<ItemId>,
        kind: OperationKind,
    },
    ItemsRemoved(Vec<ItemId>),
    ItemsReplaced(Vec<Item>),
    EditStarted(ItemId),
    /// Leaves edit mode only if `id` is still the edit target.
    EditFinished(ItemId),
    EditCancelled,
    NotificationRaised(Notification),
    NotificationCleared,
    /// Clears the notification if no newer one was raised since `generation`.
    NotificationExpired(u64),
}

impl TodoState {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Loaded(items) => self.items = items,
            Action::QueryChanged(query) => self.query = query,
            Action::FilterSelected(filter) => self.filter = filter,
            Action::PlaceholderShown(item) => self.placeholder = Some(item),
            Action::PlaceholderCleared => self.placeholder = None,
            Action::ItemAppended(item) => self.items.push(item),
            Action::OperationsStarted { ids, kind } => self
                .operations
                .extend(ids.into_iter().map(|id| OperationState { id, kind })),
            Action::OperationsFinished { ids, kind } => {
                for id in ids {
                    if let Some(index) = self
                        .operations
                        .iter()
                        .position(|operation| operation.id == id && operation.kind == kind)
                    {
                        self.operations.remove(index);
                    }
                }
            }
            Action::ItemsRemoved(ids) => self.items.retain(|item| !ids.contains(&item.id)),
            Action::ItemsReplaced(updated) => {
                for item in &mut self.items {
                    if let Some(next) = updated.iter().find(|next| next.id == item.id) {
                        *item = next.clone();
                    }
                }
            }
            Action::EditStarted(id) => self.editing = Some(id),
            Action::EditFinished(id) => {
                if self.editing == Some(id) {
                    self.editing = None;
                }
            }
            Action::EditCancelled => self.editing = None,
            Action::NotificationRaised(notification) => {
                self.notification = Some(notification);
                self.notification_generation += 1;
            }
            Action::NotificationCleared => self.notification = None,
            Action::NotificationExpired(generation) => {
                if self.notification_generation == generation {
                    self.notification = None;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
