use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tokio::{net::TcpListener, sync::Mutex};

use super::*;

#[derive(Clone, Default)]
struct StubState {
    seen_owner: Arc<Mutex<Option<i64>>>,
    created: Arc<Mutex<Vec<NewItem>>>,
    patches: Arc<Mutex<Vec<(i64, ItemPatch)>>>,
}

async fn stub_list(
    State(state): State<StubState>,
    Query(query): Query<HashMap<String, i64>>,
) -> Json<Vec<Item>> {
    let owner = query.get("ownerId").copied().unwrap_or_default();
    *state.seen_owner.lock().await = Some(owner);
    Json(vec![Item {
        id: ItemId(1),
        owner_id: OwnerId(owner),
        title: "first".to_string(),
        completed: false,
    }])
}

async fn stub_create(State(state): State<StubState>, Json(item): Json<NewItem>) -> Json<Item> {
    state.created.lock().await.push(item.clone());
    Json(Item {
        id: ItemId(5),
        owner_id: item.owner_id,
        title: item.title,
        completed: item.completed,
    })
}

async fn stub_patch(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    Json(patch): Json<ItemPatch>,
) -> Result<Json<Item>, StatusCode> {
    if id == 404 {
        return Err(StatusCode::NOT_FOUND);
    }
    state.patches.lock().await.push((id, patch.clone()));
    let mut item = Item {
        id: ItemId(id),
        owner_id: OwnerId(3380),
        title: "stored".to_string(),
        completed: false,
    };
    patch.apply_to(&mut item);
    Ok(Json(item))
}

async fn stub_delete(Path(id): Path<i64>) -> StatusCode {
    if id == 500 {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn spawn_stub_server(state: StubState) -> String {
    let app = Router::new()
        .route("/api/items", get(stub_list).post(stub_create))
        .route("/api/items/:id", patch(stub_patch).delete(stub_delete))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api")
}

#[test]
fn base_url_gains_trailing_slash() {
    let store = HttpRemoteStore::new("http://localhost:8080/api").expect("store");
    assert_eq!(store.base_url().as_str(), "http://localhost:8080/api/");
    assert_eq!(
        store.item_url(ItemId(7)).expect("url").as_str(),
        "http://localhost:8080/api/items/7"
    );
}

#[test]
fn rejects_unparseable_base_url() {
    assert!(matches!(
        HttpRemoteStore::new("not a url"),
        Err(StoreError::InvalidUrl(_))
    ));
}

#[tokio::test]
async fn list_scopes_request_by_owner() {
    let state = StubState::default();
    let base = spawn_stub_server(state.clone()).await;
    let store = HttpRemoteStore::new(&base).expect("store");

    let items = store.list(OwnerId(3380)).await.expect("list");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].owner_id, OwnerId(3380));
    assert_eq!(*state.seen_owner.lock().await, Some(3380));
}

#[tokio::test]
async fn create_posts_new_item_and_returns_stored_item() {
    let state = StubState::default();
    let base = spawn_stub_server(state.clone()).await;
    let store = HttpRemoteStore::new(&base).expect("store");

    let created = store
        .create(NewItem {
            title: "Buy milk".to_string(),
            owner_id: OwnerId(3380),
            completed: false,
        })
        .await
        .expect("create");

    assert_eq!(created.id, ItemId(5));
    assert_eq!(created.title, "Buy milk");
    assert_eq!(state.created.lock().await[0].title, "Buy milk");
}

#[tokio::test]
async fn update_sends_partial_patch() {
    let state = StubState::default();
    let base = spawn_stub_server(state.clone()).await;
    let store = HttpRemoteStore::new(&base).expect("store");

    let updated = store
        .update(ItemId(3), ItemPatch::completed(true))
        .await
        .expect("update");

    assert!(updated.completed);
    assert_eq!(updated.title, "stored");
    assert_eq!(
        state.patches.lock().await.as_slice(),
        &[(3, ItemPatch::completed(true))]
    );
}

#[tokio::test]
async fn error_statuses_surface_as_store_errors() {
    let base = spawn_stub_server(StubState::default()).await;
    let store = HttpRemoteStore::new(&base).expect("store");

    assert!(store.delete(ItemId(2)).await.is_ok());
    assert!(matches!(
        store.delete(ItemId(500)).await,
        Err(StoreError::Transport(_))
    ));
    assert!(store
        .update(ItemId(404), ItemPatch::title("x"))
        .await
        .is_err());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let store = HttpRemoteStore::new(&format!("http://{addr}/")).expect("store");
    assert!(matches!(
        store.list(OwnerId(1)).await,
        Err(StoreError::Transport(_))
    ));
}
