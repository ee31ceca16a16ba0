use async_trait::async_trait;
use reqwest::Client;
use shared::domain::{Item, ItemId, ItemPatch, NewItem, OwnerId};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Failure reported by a non-HTTP `RemoteStore` implementation.
    #[error("{0}")]
    Other(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list(&self, owner_id: OwnerId) -> StoreResult<Vec<Item>>;
    async fn create(&self, item: NewItem) -> StoreResult<Item>;
    async fn delete(&self, id: ItemId) -> StoreResult<()>;
    async fn update(&self, id: ItemId, patch: ItemPatch) -> StoreResult<Item>;
}

pub struct HttpRemoteStore {
    http: Client,
    base_url: Url,
}

impl HttpRemoteStore {
    pub fn new(base_url: &str) -> StoreResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> StoreResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last path segment unless it ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> StoreResult<Url> {
        Ok(self.base_url.join("items")?)
    }

    fn item_url(&self, id: ItemId) -> StoreResult<Url> {
        Ok(self.base_url.join(&format!("items/{}", id.0))?)
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list(&self, owner_id: OwnerId) -> StoreResult<Vec<Item>> {
        let items = self
            .http
            .get(self.collection_url()?)
            .query(&[("ownerId", owner_id.0)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(items)
    }

    async fn create(&self, item: NewItem) -> StoreResult<Item> {
        let created = self
            .http
            .post(self.collection_url()?)
            .json(&item)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created)
    }

    async fn delete(&self, id: ItemId) -> StoreResult<()> {
        self.http
            .delete(self.item_url(id)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update(&self, id: ItemId, patch: ItemPatch) -> StoreResult<Item> {
        let updated = self
            .http
            .patch(self.item_url(id)?)
            .json(&patch)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
