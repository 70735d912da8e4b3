//! Contract tests for `ResourceStore` against a stateful in-memory API.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use velora_client::{ApiError, ApiResult};
use velora_core::{Entity, ListQuery, Page, PageMeta, Patch};
use velora_resource::notify::testing::RecordingNotifier;
use velora_resource::{
    InvalidationBus, Notifier, NullNotifier, ResourceApi, ResourceOp, ResourceStore,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Contact {
    id: String,
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    active: bool,
}

impl Entity for Contact {
    const RESOURCE: &'static str = "contacts";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Stateful fake backend: server-assigned ids, sparse merge on update,
/// name-substring search, page math.
#[derive(Default)]
struct FakeServer {
    records: Mutex<Vec<Value>>,
    fail_lists: AtomicBool,
}

impl FakeServer {
    fn record(&self, id: &str) -> Option<Value> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r["id"] == id)
            .cloned()
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            message: format!("HTTP 404: {id} not found"),
            server_detail: Some(format!("{id} not found")),
        }
    }
}

#[async_trait]
impl ResourceApi for FakeServer {
    async fn list(&self, _resource: &str, query: &ListQuery) -> ApiResult<Page<Value>> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "HTTP 500".to_string(),
                server_detail: None,
            });
        }
        let records = self.records.lock().unwrap();
        let matches: Vec<Value> = records
            .iter()
            .filter(|r| match &query.search {
                Some(needle) => r["name"]
                    .as_str()
                    .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase())),
                None => true,
            })
            .cloned()
            .collect();

        let page_size = query.page_size.unwrap_or(20);
        let page = query.page.unwrap_or(1).max(1);
        let total_items = matches.len() as u64;
        let total_pages = matches.len().div_ceil(page_size as usize) as u32;
        let start = ((page - 1) * page_size) as usize;
        let items = matches
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Ok(Page {
            items,
            meta: PageMeta {
                total_items,
                total_pages,
                current_page: page,
                items_per_page: page_size,
            },
        })
    }

    async fn get_one(&self, _resource: &str, id: &str) -> ApiResult<Value> {
        self.record(id).ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, _resource: &str, body: &Value) -> ApiResult<Value> {
        let mut record = body.clone();
        let id = uuid::Uuid::new_v4().to_string();
        record["id"] = json!(id);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, _resource: &str, id: &str, body: &Value) -> ApiResult<Value> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r["id"] == id)
            .ok_or_else(|| Self::not_found(id))?;
        // Sparse merge: only keys present in the body change
        for (key, value) in body.as_object().unwrap() {
            record[key.as_str()] = value.clone();
        }
        Ok(record.clone())
    }

    async fn delete(&self, _resource: &str, id: &str) -> ApiResult<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r["id"] != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

fn store_with(api: Arc<FakeServer>, notifier: Arc<dyn Notifier>) -> ResourceStore<Contact> {
    ResourceStore::new(api, notifier, InvalidationBus::new())
}

fn alpha_draft() -> Patch {
    Patch::new()
        .set("name", "Alpha")
        .unwrap()
        .set("email", "alpha@velora.health")
        .unwrap()
        .set("active", true)
        .unwrap()
}

#[tokio::test]
async fn create_then_fetch_list_includes_the_new_entity() {
    let api = Arc::new(FakeServer::default());
    let store = store_with(api, Arc::new(NullNotifier));

    let created = store.create(alpha_draft()).await.unwrap();
    assert!(!created.id().is_empty());

    let page = store.fetch_list(ListQuery::new()).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Alpha");
    assert_eq!(page.items[0].id, created.id);
}

#[tokio::test]
async fn sparse_update_leaves_absent_fields_untouched() {
    let api = Arc::new(FakeServer::default());
    let store = store_with(api, Arc::new(NullNotifier));

    let created = store.create(alpha_draft()).await.unwrap();

    // Update only the name; email must survive server-side
    let updated = store
        .update(&created.id, Patch::new().set("name", "Beta").unwrap())
        .await
        .unwrap();
    assert_eq!(updated.name, "Beta");

    let fetched = store.get_one(&created.id).await.unwrap();
    assert_eq!(fetched.name, "Beta");
    assert_eq!(fetched.email.as_deref(), Some("alpha@velora.health"));
    assert!(fetched.active);
}

#[tokio::test]
async fn explicit_false_reaches_the_server() {
    let api = Arc::new(FakeServer::default());
    let store = store_with(Arc::clone(&api), Arc::new(NullNotifier));

    let created = store.create(alpha_draft()).await.unwrap();
    store
        .update(&created.id, Patch::new().set("active", false).unwrap())
        .await
        .unwrap();

    let record = api.record(&created.id).unwrap();
    assert_eq!(record["active"], json!(false));
    assert_eq!(record["name"], json!("Alpha"));
}

#[tokio::test]
async fn remove_then_fetch_list_never_includes_the_id() {
    let api = Arc::new(FakeServer::default());
    let store = store_with(api, Arc::new(NullNotifier));

    let created = store.create(alpha_draft()).await.unwrap();
    store.remove(&created.id).await.unwrap();

    let page = store.fetch_list(ListQuery::new()).await.unwrap();
    assert!(page.items.iter().all(|c| c.id != created.id));
    assert!(page.is_empty());
}

#[tokio::test]
async fn full_lifecycle_scenario() {
    // create Alpha -> list shows it -> rename to Beta sending only the name
    // -> other fields unchanged -> delete -> list empty
    let api = Arc::new(FakeServer::default());
    let store = store_with(api, Arc::new(NullNotifier));

    let created = store
        .create(Patch::new().set("name", "Alpha").unwrap().set("active", true).unwrap())
        .await
        .unwrap();

    let page = store.fetch_list(ListQuery::new()).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Alpha");

    store
        .update(&created.id, Patch::new().set("name", "Beta").unwrap())
        .await
        .unwrap();
    let fetched = store.get_one(&created.id).await.unwrap();
    assert_eq!(fetched.name, "Beta");
    assert!(fetched.active, "field not in the patch must be unchanged");

    store.remove(&created.id).await.unwrap();
    let page = store.fetch_list(ListQuery::new()).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn failed_list_keeps_previous_items_and_next_fetch_clears_error() {
    let api = Arc::new(FakeServer::default());
    let store = store_with(Arc::clone(&api), Arc::new(NullNotifier));

    store.create(alpha_draft()).await.unwrap();
    store.fetch_list(ListQuery::new()).await.unwrap();
    assert_eq!(store.items().await.len(), 1);

    api.fail_lists.store(true, Ordering::SeqCst);
    let err = store.fetch_list(ListQuery::new()).await.unwrap_err();
    assert!(err.user_message("loading", "contacts").contains("contacts"));

    let state = store.snapshot().await;
    assert_eq!(state.items.len(), 1, "stale-but-visible beats a blank page");
    assert!(state.error.is_some());
    assert!(!state.loading);

    api.fail_lists.store(false, Ordering::SeqCst);
    store.fetch_list(ListQuery::new()).await.unwrap();
    let state = store.snapshot().await;
    assert!(state.error.is_none(), "a fresh load clears the stale error");
}

#[tokio::test]
async fn every_mutation_notifies_exactly_once() {
    let api = Arc::new(FakeServer::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let store = store_with(api, Arc::clone(&notifier) as Arc<dyn Notifier>);

    let created = store.create(alpha_draft()).await.unwrap();
    store
        .update(&created.id, Patch::new().set("name", "Beta").unwrap())
        .await
        .unwrap();
    store.remove(&created.id).await.unwrap();
    assert_eq!(notifier.successes.lock().unwrap().len(), 3);
    assert_eq!(notifier.errors.lock().unwrap().len(), 0);

    // Failure path: deleting a ghost notifies the server's detail verbatim
    store.remove("ghost").await.unwrap_err();
    let errors = notifier.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], "ghost not found");
}

#[tokio::test]
async fn successful_mutations_publish_invalidation_events() {
    let api = Arc::new(FakeServer::default());
    let store = store_with(api, Arc::new(NullNotifier));
    let mut rx = store.bus().subscribe();

    let created = store.create(alpha_draft()).await.unwrap();
    let event = rx.recv().await.unwrap();
    assert_eq!(event.resource, "contacts");
    assert_eq!(event.op, ResourceOp::Created);
    assert_eq!(event.id.as_deref(), Some(created.id.as_str()));

    store.remove(&created.id).await.unwrap();
    let event = rx.recv().await.unwrap();
    assert_eq!(event.op, ResourceOp::Deleted);
}

#[tokio::test]
async fn search_narrows_the_list() {
    let api = Arc::new(FakeServer::default());
    let store = store_with(api, Arc::new(NullNotifier));

    store.create(alpha_draft()).await.unwrap();
    store
        .create(Patch::new().set("name", "Gamma").unwrap())
        .await
        .unwrap();

    let page = store
        .fetch_list(ListQuery::new().with_search("gam"))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Gamma");
    assert_eq!(page.meta.total_items, 1);
}

#[tokio::test]
async fn empty_patch_is_rejected_before_the_network() {
    let api = Arc::new(FakeServer::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let store = store_with(api, Arc::clone(&notifier) as Arc<dyn Notifier>);

    let err = store.update("p-1", Patch::new()).await.unwrap_err();
    assert!(err.user_message("updating", "contacts").contains("Empty patch"));
    // Rejected client-side: nothing was sent, so nothing to toast about
    assert!(notifier.errors.lock().unwrap().is_empty());
}

// --- anti-flicker: last-issued fetch wins even if it resolves first ---

struct GatedApi {
    first_gate: Arc<tokio::sync::Notify>,
    calls: Mutex<u32>,
}

#[async_trait]
impl ResourceApi for GatedApi {
    async fn list(&self, _resource: &str, _query: &ListQuery) -> ApiResult<Page<Value>> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if call == 1 {
            // First request stalls until the test releases it
            self.first_gate.notified().await;
            Ok(Page {
                items: vec![json!({ "id": "stale", "name": "Stale" })],
                meta: PageMeta::default(),
            })
        } else {
            Ok(Page {
                items: vec![json!({ "id": "fresh", "name": "Fresh" })],
                meta: PageMeta::default(),
            })
        }
    }

    async fn get_one(&self, _resource: &str, _id: &str) -> ApiResult<Value> {
        unimplemented!("not used by this test")
    }

    async fn create(&self, _resource: &str, _body: &Value) -> ApiResult<Value> {
        unimplemented!("not used by this test")
    }

    async fn update(&self, _resource: &str, _id: &str, _body: &Value) -> ApiResult<Value> {
        unimplemented!("not used by this test")
    }

    async fn delete(&self, _resource: &str, _id: &str) -> ApiResult<()> {
        unimplemented!("not used by this test")
    }
}

#[tokio::test]
async fn overlapping_fetches_commit_the_last_issued_one() {
    let gate = Arc::new(tokio::sync::Notify::new());
    let api = Arc::new(GatedApi {
        first_gate: Arc::clone(&gate),
        calls: Mutex::new(0),
    });
    let store: ResourceStore<Contact> =
        ResourceStore::new(api, Arc::new(NullNotifier), InvalidationBus::new());

    // First fetch stalls on the gate
    let first = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_list(ListQuery::new().with_search("a")).await }
    });
    tokio::task::yield_now().await;

    // Second fetch resolves immediately and commits
    store
        .fetch_list(ListQuery::new().with_search("ab"))
        .await
        .unwrap();
    assert_eq!(store.items().await[0].id, "fresh");

    // Now the stale first response arrives — it must be discarded
    gate.notify_one();
    let stale_page = first.await.unwrap().unwrap();
    assert_eq!(stale_page.items[0].id, "stale", "caller still gets its page");

    let state = store.snapshot().await;
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, "fresh", "state reflects the last issued call");
    assert!(!state.loading);
}
