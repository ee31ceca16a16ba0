use shared::domain::{Item, ItemId};

use crate::{
    filter::{select_visible, FilterMode},
    notification::Notification,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Loading,
    /// Title edit in flight; the edit field stays visible.
    EditLoading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationState {
    pub id: ItemId,
    pub kind: OperationKind,
}

/// Everything the controller owns. Mutated only through [`TodoState::apply`].
#[derive(Debug, Clone, Default)]
pub struct TodoState {
    pub(crate) items: Vec<Item>,
    pub(crate) filter: FilterMode,
    pub(crate) query: String,
    pub(crate) placeholder: Option<Item>,
    pub(crate) operations: Vec<OperationState>,
    pub(crate) editing: Option<ItemId>,
    pub(crate) notification: Option<Notification>,
    pub(crate) notification_generation: u64,
}

impl TodoState {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn placeholder(&self) -> Option<&Item> {
        self.placeholder.as_ref()
    }

    pub fn operations(&self) -> &[OperationState] {
        &self.operations
    }

    pub fn operation_for(&self, id: ItemId) -> Option<OperationKind> {
        self.operations
            .iter()
            .find(|operation| operation.id == id)
            .map(|operation| operation.kind)
    }

    pub fn editing(&self) -> Option<ItemId> {
        self.editing
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notification
    }

    pub fn visible_items(&self) -> Vec<Item> {
        select_visible(&self.items, self.filter)
    }

    pub fn remaining_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    /// Vacuously true for an empty list.
    pub fn all_completed(&self) -> bool {
        self.items.iter().all(|item| item.completed)
    }

    /// Vacuously true for an empty list.
    pub fn none_completed(&self) -> bool {
        self.items.iter().all(|item| !item.completed)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_adding(&self) -> bool {
        self.placeholder.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.is_adding() || !self.operations.is_empty() || self.editing.is_some()
    }

    pub fn view(&self) -> TodoView {
        TodoView {
            visible: self.visible_items(),
            placeholder: self.placeholder.clone(),
            operations: self.operations.clone(),
            editing: self.editing,
            filter: self.filter,
            query: self.query.clone(),
            notification: self.notification,
            remaining: self.remaining_count(),
            all_completed: self.all_completed(),
            none_completed: self.none_completed(),
            is_empty: self.is_empty(),
            is_adding: self.is_adding(),
            is_busy: self.is_busy(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoView {
    pub visible: Vec<Item>,
    pub placeholder: Option<Item>,
    pub operations: Vec<OperationState>,
    pub editing: Option<ItemId>,
    pub filter: FilterMode,
    pub query: String,
    pub notification: Option<Notification>,
    pub remaining: usize,
    pub all_completed: bool,
    pub none_completed: bool,
    pub is_empty: bool,
    pub is_adding: bool,
    pub is_busy: bool,
}

impl TodoView {
    pub fn operation_for(&self, id: ItemId) -> Option<OperationKind> {
        self.operations
            .iter()
            .find(|operation| operation.id == id)
            .map(|operation| operation.kind)
    }
}
