#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Serving a stub scheduling API with Salvo on an ephemeral port
//! - Seeding and inspecting the stub's store
//! - Building an `HttpSchedulingApi` pointed at the stub
//!
//! ## Isolation
//! Every test starts its own stub with its own store, so tests can run in
//! parallel. The server task is aborted when the `StubService` is dropped.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::NaiveDate;
use salvo::conn::{Acceptor, TcpListener};
use salvo::http::cookie::Cookie;
use salvo::http::StatusCode;
use salvo::async_trait;
use salvo::prelude::*;
use serde_json::{Value, json};

use tandem_test::component::client::HttpSchedulingApi;
use tandem_test::component::core::config::{ApiBackend, ApiConfig};

pub use tracing;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
const SESSION_COOKIE: &str = "session";

/// Everything the stub API knows. Bodies are kept as raw JSON so tests can
/// seed shapes the client would never produce itself.
#[derive(Debug, Default)]
pub struct StubStore {
    pub agents: BTreeMap<i64, Value>,
    pub next_agent_id: i64,
    pub availability: HashMap<i64, Value>,
    pub schedules: HashMap<String, Value>,
    /// Bodies received by the save endpoint, oldest first.
    pub saved: Vec<Value>,
    /// Dates received by the generate endpoint, oldest first.
    pub generated: Vec<String>,
    /// `METHOD path` of every request, oldest first.
    pub requests: Vec<String>,
    /// Artificial latency of the fetch endpoint, per requested date.
    pub delays: HashMap<String, u64>,
    /// When set, the fetch endpoint echoes this date instead of the requested one.
    pub echo_override: Option<String>,
    /// When set, every endpoint but login answers with this status.
    pub fail_with: Option<u16>,
}

#[derive(Debug, Default)]
pub struct StubState {
    store: Mutex<StubStore>,
}

impl StubState {
    /// Locks the store and recovers from poisoning.
    pub fn lock(&self) -> MutexGuard<'_, StubStore> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                self.store.clear_poison();
                poisoned.into_inner()
            }
        }
    }

    pub fn seed_agent(&self, first_name: &str, last_name: &str, active: bool) -> i64 {
        let mut store = self.lock();
        store.next_agent_id += 1;
        let agent_id = store.next_agent_id;
        store.agents.insert(
            agent_id,
            json!({
                "agent_id": agent_id,
                "first_name": first_name,
                "last_name": last_name,
                "email": format!("{}@example.com", first_name.to_lowercase()),
                "phone_number": null,
                "active_status": active,
            }),
        );
        agent_id
    }

    pub fn seed_availability(&self, agent_id: i64, body: Value) {
        self.lock().availability.insert(agent_id, body);
    }

    pub fn seed_schedule(&self, week: NaiveDate, body: Value) {
        self.lock().schedules.insert(week.to_string(), body);
    }

    pub fn delay_fetch(&self, week: NaiveDate, millis: u64) {
        self.lock().delays.insert(week.to_string(), millis);
    }

    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }
}

/// Injects the shared state and records every request.
struct StubStateHandler {
    state: Arc<StubState>,
}

#[async_trait]
impl Handler for StubStateHandler {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        _res: &mut Response,
        _ctrl: &mut FlowCtrl,
    ) {
        self.state
            .lock()
            .requests
            .push(format!("{} {}", req.method(), req.uri().path()));
        depot.inject(Arc::clone(&self.state));
    }
}

fn state(depot: &Depot) -> Arc<StubState> {
    depot
        .obtain::<Arc<StubState>>()
        .cloned()
        .expect("stub state is injected")
}

/// Shared preamble of every endpoint but login: forced failures, then the
/// session cookie. Returns `false` when a response has been written.
fn admit(req: &Request, state: &StubState, res: &mut Response) -> bool {
    if let Some(code) = state.lock().fail_with {
        res.status_code(StatusCode::from_u16(code).expect("valid status"));
        res.render(Json(json!({"error": "forced failure"})));
        return false;
    }
    if req.cookie(SESSION_COOKIE).is_none() {
        res.status_code(StatusCode::UNAUTHORIZED);
        res.render(Json(json!({"error": "login required"})));
        return false;
    }
    true
}

fn not_found(res: &mut Response, what: &str) {
    res.status_code(StatusCode::NOT_FOUND);
    res.render(Json(json!({ "error": format!("{what} not found") })));
}

fn display_name(agent: &Value) -> String {
    format!(
        "{} {}",
        agent["first_name"].as_str().unwrap_or_default(),
        agent["last_name"].as_str().unwrap_or_default()
    )
}

#[handler]
async fn login(req: &mut Request, res: &mut Response) {
    let body: Value = req.parse_json().await.unwrap_or_default();
    if body["username"] == USERNAME && body["password"] == PASSWORD {
        res.add_cookie(Cookie::build((SESSION_COOKIE, "ok")).path("/").build());
        res.render(Json(json!({"message": "Login successful"})));
    } else {
        res.status_code(StatusCode::UNAUTHORIZED);
        res.render(Json(json!({"error": "Invalid credentials"})));
    }
}

#[handler]
async fn list_agents(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = state(depot);
    if !admit(req, &state, res) {
        return;
    }
    let search = req
        .query::<String>("search")
        .unwrap_or_default()
        .to_lowercase();
    let agents: Vec<Value> = state
        .lock()
        .agents
        .values()
        .filter(|agent| display_name(agent).to_lowercase().contains(&search))
        .cloned()
        .collect();
    res.render(Json(agents));
}

#[handler]
async fn create_agent(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = state(depot);
    if !admit(req, &state, res) {
        return;
    }
    let mut body: Value = req.parse_json().await.unwrap_or_default();
    let mut store = state.lock();
    store.next_agent_id += 1;
    let agent_id = store.next_agent_id;
    body["agent_id"] = json!(agent_id);
    store.agents.insert(agent_id, body);
    res.status_code(StatusCode::CREATED);
    res.render(Json(json!({ "agent_id": agent_id })));
}

#[handler]
async fn update_agent(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = state(depot);
    if !admit(req, &state, res) {
        return;
    }
    let agent_id = req.param::<i64>("id").unwrap_or_default();
    let mut body: Value = req.parse_json().await.unwrap_or_default();
    let mut store = state.lock();
    if !store.agents.contains_key(&agent_id) {
        return not_found(res, "agent");
    }
    body["agent_id"] = json!(agent_id);
    store.agents.insert(agent_id, body);
    res.render(Json(json!({"message": "Agent updated"})));
}

#[handler]
async fn delete_agent(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = state(depot);
    if !admit(req, &state, res) {
        return;
    }
    let agent_id = req.param::<i64>("id").unwrap_or_default();
    let mut store = state.lock();
    if store.agents.remove(&agent_id).is_none() {
        return not_found(res, "agent");
    }
    store.availability.remove(&agent_id);
    res.render(Json(json!({"message": "Agent deleted"})));
}

#[handler]
async fn fetch_availability(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = state(depot);
    if !admit(req, &state, res) {
        return;
    }
    let agent_id = req.param::<i64>("id").unwrap_or_default();
    let store = state.lock();
    if !store.agents.contains_key(&agent_id) {
        return not_found(res, "agent");
    }
    let body = store.availability.get(&agent_id).cloned().unwrap_or_else(|| {
        json!({"weeklyAvailability": {"weekdays": []}, "specificDates": {}})
    });
    res.render(Json(body));
}

#[handler]
async fn save_availability(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = state(depot);
    if !admit(req, &state, res) {
        return;
    }
    let agent_id = req.param::<i64>("id").unwrap_or_default();
    let body: Value = req.parse_json().await.unwrap_or_default();
    let mut store = state.lock();
    if !store.agents.contains_key(&agent_id) {
        return not_found(res, "agent");
    }
    store.availability.insert(agent_id, body);
    res.render(Json(json!({"message": "Availability updated"})));
}

#[handler]
async fn fetch_schedule(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = state(depot);
    if !admit(req, &state, res) {
        return;
    }
    let date = req.query::<String>("date").unwrap_or_default();

    let delay = state.lock().delays.get(&date).copied();
    if let Some(millis) = delay {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    let store = state.lock();
    let mut body = store
        .schedules
        .get(&date)
        .cloned()
        .unwrap_or_else(|| json!({"details": [], "unpaired": []}));
    body["date"] = json!(store.echo_override.clone().unwrap_or(date));
    res.render(Json(body));
}

#[handler]
async fn save_schedule(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = state(depot);
    if !admit(req, &state, res) {
        return;
    }
    let body: Value = req.parse_json().await.unwrap_or_default();
    let Some(date) = body["date"].as_str().map(ToString::to_string) else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(json!({"error": "date is required"})));
        return;
    };
    let mut store = state.lock();
    store.schedules.insert(
        date,
        json!({"details": body["details"], "unpaired": body["unpaired"]}),
    );
    store.saved.push(body);
    res.render(Json(json!({"message": "Schedule saved"})));
}

/// Pairs active agents in id order; an odd one out goes unpaired.
#[handler]
async fn generate_schedule(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = state(depot);
    if !admit(req, &state, res) {
        return;
    }
    let date = req.query::<String>("date").unwrap_or_default();
    let mut store = state.lock();
    let names: Vec<String> = store
        .agents
        .values()
        .filter(|agent| agent["active_status"].as_bool().unwrap_or(false))
        .map(display_name)
        .collect();

    let mut details = Vec::new();
    let mut unpaired = Vec::new();
    for pair in names.chunks(2) {
        match pair {
            [a, b] => details.push(json!({"agent1_name": a, "agent2_name": b})),
            [a] => unpaired.push(json!({"agent_name": a})),
            _ => {}
        }
    }
    store.schedules.insert(
        date.clone(),
        json!({"details": details, "unpaired": unpaired}),
    );
    store.generated.push(date);
    res.render(Json(json!({"message": "Schedule generated"})));
}

fn routes() -> Router {
    Router::with_path("api")
        .push(Router::with_path("login").post(login))
        .push(
            Router::with_path("agents")
                .push(Router::with_path("get").get(list_agents))
                .push(Router::with_path("create").post(create_agent))
                .push(Router::with_path("update/{id}").put(update_agent))
                .push(Router::with_path("delete/{id}").delete(delete_agent))
                .push(Router::with_path("availability/update/{id}").put(save_availability))
                .push(Router::with_path("{id}/availability").get(fetch_availability)),
        )
        .push(
            Router::with_path("schedule")
                .push(Router::with_path("get").get(fetch_schedule))
                .push(Router::with_path("set").post(save_schedule))
                .push(Router::with_path("generate").post(generate_schedule)),
        )
}

/// A running stub API.
pub struct StubService {
    pub base_url: String,
    pub state: Arc<StubState>,
    server: tokio::task::JoinHandle<()>,
}

impl StubService {
    /// ## Summary
    /// Binds an ephemeral port on localhost and starts serving.
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let acceptor = TcpListener::new("127.0.0.1:0").bind().await;
        let addr = acceptor.holdings()[0]
            .local_addr
            .as_ipv4()
            .copied()
            .expect("bound to an IPv4 address");

        let router = Router::new()
            .hoop(StubStateHandler {
                state: Arc::clone(&state),
            })
            .push(routes());
        let server = tokio::spawn(async move {
            Server::new(acceptor).serve(router).await;
        });
        tracing::debug!(%addr, "Stub scheduling API listening");

        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
            backend: ApiBackend::Http,
        }
    }

    /// A fresh client without a session.
    pub fn client(&self) -> HttpSchedulingApi {
        HttpSchedulingApi::new(&self.config()).expect("client builds")
    }

    /// A client that has already logged in.
    pub async fn logged_in_client(&self) -> HttpSchedulingApi {
        use tandem_test::component::client::SchedulingApi;
        use tandem_test::component::client::wire::LoginRequest;

        let client = self.client();
        client
            .login(&LoginRequest {
                username: USERNAME.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("stub accepts the test credentials");
        client
    }
}

impl Drop for StubService {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
