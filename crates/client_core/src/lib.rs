//! Client-side state synchronization for a remote todo list.
//!
//! [`TodoController`] owns the canonical item list and reconciles every
//! create, delete, toggle and edit with a [`RemoteStore`]. The presentation
//! layer reads [`TodoView`] snapshots and calls one controller method per
//! user action.

pub mod config;
pub mod controller;
pub mod filter;
pub mod notification;
pub mod reducer;
pub mod state;
pub mod store;

pub use config::{Settings, SettingsError};
pub use controller::TodoController;
pub use filter::{select_visible, FilterMode};
pub use notification::Notification;
pub use reducer::Action;
pub use state::{OperationKind, OperationState, TodoState, TodoView};
pub use store::{HttpRemoteStore, RemoteStore, StoreError, StoreResult};
