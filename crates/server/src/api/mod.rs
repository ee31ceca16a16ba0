use std::{collections::BTreeMap, sync::Arc};

use shared::{
    domain::{Item, ItemId, ItemPatch, NewItem, OwnerId},
    error::{ApiError, ErrorCode},
};
use tokio::sync::RwLock;

#[derive(Default)]
struct ItemTable {
    rows: BTreeMap<ItemId, Item>,
    last_id: i64,
}

/// In-memory item collection. Ids start at 1; 0 is never assigned.
#[derive(Clone, Default)]
pub struct ApiContext {
    items: Arc<RwLock<ItemTable>>,
}

impl ApiContext {
    pub async fn seed(&self, items: impl IntoIterator<Item = NewItem>) -> Vec<Item> {
        let mut created = Vec::new();
        for item in items {
            let title = item.title.clone();
            match create_item(self, item).await {
                Ok(item) => created.push(item),
                Err(error) => {
                    tracing::warn!(title = %title, reason = %error.message, "skipping invalid seed item");
                }
            }
        }
        created
    }
}

pub async fn list_items(ctx: &ApiContext, owner_id: Option<OwnerId>) -> Vec<Item> {
    ctx.items
        .read()
        .await
        .rows
        .values()
        .filter(|item| owner_id.map_or(true, |owner| item.owner_id == owner))
        .cloned()
        .collect()
}

pub async fn create_item(ctx: &ApiContext, new_item: NewItem) -> Result<Item, ApiError> {
    let title = validate_title(&new_item.title)?;

    let mut table = ctx.items.write().await;
    table.last_id += 1;
    let item = Item {
        id: ItemId(table.last_id),
        owner_id: new_item.owner_id,
        title,
        completed: new_item.completed,
    };
    table.rows.insert(item.id, item.clone());
    Ok(item)
}

pub async fn delete_item(ctx: &ApiContext, id: ItemId) -> Result<(), ApiError> {
    ctx.items
        .write()
        .await
        .rows
        .remove(&id)
        .map(|_| ())
        .ok_or_else(|| not_found(id))
}

pub async fn update_item(ctx: &ApiContext, id: ItemId, patch: ItemPatch) -> Result<Item, ApiError> {
    let patch = ItemPatch {
        title: patch.title.as_deref().map(validate_title).transpose()?,
        completed: patch.completed,
    };

    let mut table = ctx.items.write().await;
    let item = table.rows.get_mut(&id).ok_or_else(|| not_found(id))?;
    patch.apply_to(item);
    Ok(item.clone())
}

fn validate_title(title: &str) -> Result<String, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::new(ErrorCode::Validation, "title must not be empty"));
    }
    Ok(title.to_string())
}

fn not_found(id: ItemId) -> ApiError {
    ApiError::new(ErrorCode::NotFound, format!("item {id} not found"))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
