//! In-memory emulation of the Wunderlist lists/tasks API.
//!
//! Routes live under `/api/v1` and require the `X-Client-ID` and
//! `X-Access-Token` headers to match the configured credentials. Task
//! updates are guarded by the task's revision, like the real service.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const API_PREFIX: &str = "/api/v1";

const RESERVED_TASK_KEYS: [&str; 5] = ["id", "list_id", "title", "completed", "revision"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct List {
    pub id: u64,
    pub title: String,
    pub revision: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: u64,
    pub list_id: u64,
    pub title: String,
    pub completed: bool,
    pub revision: u64,
    /// Attributes the client sent that the server does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub name: String,
    #[serde(rename = "listId")]
    pub list_id: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub revision: u64,
    pub completed: Option<bool>,
    pub title: Option<String>,
}

#[derive(Deserialize)]
pub struct TasksQuery {
    pub list_id: u64,
    #[serde(default)]
    pub completed: bool,
}

/// Values the client must present in its authentication headers.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: String,
    pub access_token: String,
}

impl Credentials {
    pub fn new(client_id: &str, access_token: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            access_token: access_token.to_string(),
        }
    }
}

/// Lists and tasks held by the server. Ids are shared across both kinds.
#[derive(Debug, Default)]
pub struct Store {
    lists: BTreeMap<u64, List>,
    tasks: BTreeMap<u64, Task>,
    last_id: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_list(&mut self, title: &str) -> List {
        let list = List {
            id: self.next_id(),
            title: title.to_string(),
            revision: 1,
        };
        self.lists.insert(list.id, list.clone());
        list
    }

    /// Adds a task to an existing list; returns `None` for an unknown list.
    pub fn add_task(&mut self, list_id: u64, title: &str) -> Option<Task> {
        if !self.lists.contains_key(&list_id) {
            return None;
        }
        let task = Task {
            id: self.next_id(),
            list_id,
            title: title.to_string(),
            completed: false,
            revision: 1,
            extra: Map::new(),
        };
        self.tasks.insert(task.id, task.clone());
        Some(task)
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.get(&id)
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Clone)]
struct AppState {
    credentials: Arc<Credentials>,
    store: Arc<RwLock<Store>>,
}

pub fn app(credentials: Credentials, store: Store) -> Router {
    let state = AppState {
        credentials: Arc::new(credentials),
        store: Arc::new(RwLock::new(store)),
    };
    let api = Router::new()
        .route("/lists", get(list_lists))
        .route("/lists/{id}", get(get_list))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).patch(update_task))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_credentials))
        .with_state(state);
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener, credentials: Credentials, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app(credentials, store)).await
}

/// Serves on an ephemeral local port from a background thread.
///
/// Meant for blocking tests: the returned address is ready to accept
/// connections and the server lives until the process exits.
pub fn spawn(credentials: Credentials, store: Store) -> std::io::Result<SocketAddr> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = std_listener.local_addr()?;
    std_listener.set_nonblocking(true)?;

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(err) => {
                tracing::error!(%err, "failed to start mock server runtime");
                return;
            }
        };
        let served: std::io::Result<()> = rt.block_on(async {
            let listener = TcpListener::from_std(std_listener)?;
            run(listener, credentials, store).await
        });
        if let Err(err) = served {
            tracing::error!(%err, "mock server stopped");
        }
    });

    Ok(addr)
}

async fn require_credentials(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let authorized = header_value(&headers, "x-client-id") == Some(state.credentials.client_id.as_str())
        && header_value(&headers, "x-access-token") == Some(state.credentials.access_token.as_str());
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

async fn list_lists(State(state): State<AppState>) -> Json<Vec<List>> {
    let store = state.store.read().await;
    Json(store.lists.values().cloned().collect())
}

async fn get_list(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<List>, StatusCode> {
    let store = state.store.read().await;
    store.lists.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TasksQuery>,
) -> Result<Json<Vec<Task>>, StatusCode> {
    let store = state.store.read().await;
    if !store.lists.contains_key(&query.list_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let tasks = store
        .tasks
        .values()
        .filter(|task| task.list_id == query.list_id && task.completed == query.completed)
        .cloned()
        .collect();
    Ok(Json(tasks))
}

async fn get_task(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Task>, StatusCode> {
    let store = state.store.read().await;
    store.tasks.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), StatusCode> {
    let mut store = state.store.write().await;
    let mut task = store.add_task(input.list_id, &input.name).ok_or(StatusCode::NOT_FOUND)?;
    task.extra = input.extra;
    task.extra.retain(|key, _| !RESERVED_TASK_KEYS.contains(&key.as_str()));
    store.tasks.insert(task.id, task.clone());
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, StatusCode> {
    let mut store = state.store.write().await;
    let task = store.tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if task.revision != input.revision {
        return Err(StatusCode::CONFLICT);
    }
    if let Some(completed) = input.completed {
        task.completed = completed;
    }
    if let Some(title) = input.title {
        task.title = title;
    }
    task.revision += 1;
    Ok(Json(task.clone()))
}
