use crate::assign::resolution::{AssignmentTable, Recipient};
use crate::config::Config;
use crate::roster::Roster;
use crate::utils::serialization::save_roster;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::serve;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::io::{self, ErrorKind};
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, RwLock};
use std::thread;
use tokio::{net::TcpListener, runtime::Runtime, sync::oneshot};

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Clone)]
struct AppState {
    roster: Arc<RwLock<Roster>>,
    assignments: Arc<AssignmentTable>,
    config: Arc<Config>,
}

/// Registration form plus assignment lookup, served from a background thread
/// that owns its own tokio runtime. Dropping the server shuts it down.
pub struct ExchangeServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_thread: Option<thread::JoinHandle<()>>,
    address: SocketAddr,
    finished: bool,
}

impl ExchangeServer {
    pub fn start(config: Config, roster: Roster) -> io::Result<Self> {
        let bind_addr: SocketAddr = config.listen.parse().map_err(|err| {
            io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid listen address '{}': {err}", config.listen),
            )
        })?;

        let assignments = Arc::new(AssignmentTable::resolve(roster.participants(), config.seed));
        let state = AppState {
            roster: Arc::new(RwLock::new(roster)),
            assignments,
            config: Arc::new(config),
        };
        let (server_thread, shutdown_tx, address) = spawn_server(state, bind_addr)?;

        Ok(ExchangeServer {
            shutdown_tx: Some(shutdown_tx),
            server_thread: Some(server_thread),
            address,
            finished: false,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    pub fn finish(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.shutdown_server();
        self.finished = true;
        Ok(())
    }

    pub fn wait_for_exit(&mut self, prompt: &str) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        println!("{prompt}");
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;
        self.finish()
    }

    fn shutdown_server(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server_thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ExchangeServer {
    fn drop(&mut self) {
        let _ = self.finish();
    }
}

fn spawn_server(
    state: AppState,
    bind_addr: SocketAddr,
) -> io::Result<(thread::JoinHandle<()>, oneshot::Sender<()>, SocketAddr)> {
    let (ready_tx, ready_rx) = mpsc::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = thread::spawn(move || {
        let runtime = Runtime::new().expect("failed to start tokio runtime for exchange server");
        runtime.block_on(async move {
            let app = Router::new()
                .route("/", get(index_handler))
                .route("/roster", get(roster_handler))
                .route("/assignment/:discord_id", get(assignment_handler))
                .route("/register", post(register_handler))
                .with_state(state);

            let listener = TcpListener::bind(bind_addr)
                .await
                .expect("failed to bind exchange server port");
            let addr = listener.local_addr().expect("exchange listener addr");
            let _ = ready_tx.send(addr);

            let server = serve(listener, app);
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };

            if let Err(err) = server.with_graceful_shutdown(shutdown).await {
                eprintln!("exchange server exited with error: {err}");
            }
        });
    });

    let address = ready_rx
        .recv()
        .map_err(|_| io::Error::new(ErrorKind::Other, "exchange server failed to start"))?;

    Ok((handle, shutdown_tx, address))
}

async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

#[derive(Clone, Debug, Serialize)]
struct RosterSummary {
    participants: usize,
    registration_open: bool,
    pairing_active: bool,
}

async fn roster_handler(State(state): State<AppState>) -> impl IntoResponse {
    let participants = state.roster.read().expect("roster state poisoned").len();
    Json(RosterSummary {
        participants,
        registration_open: state.config.registration_open(),
        pairing_active: state.assignments.pairing_active(),
    })
}

#[derive(Clone, Debug, Serialize)]
struct AssignmentView {
    registered: bool,
    recipient: Option<Recipient>,
}

async fn assignment_handler(
    State(state): State<AppState>,
    Path(discord_id): Path<String>,
) -> impl IntoResponse {
    match state.assignments.lookup(&discord_id) {
        Some(recipient) => Json(AssignmentView {
            registered: true,
            recipient,
        }),
        None => Json(AssignmentView {
            registered: false,
            recipient: None,
        }),
    }
}

#[derive(Clone, Debug, Deserialize)]
struct RegisterRequest {
    mc_user: String,
    discord_id: String,
    discord_user: String,
}

async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    if request.mc_user.trim().is_empty()
        || request.discord_id.trim().is_empty()
        || request.discord_user.trim().is_empty()
    {
        return (StatusCode::BAD_REQUEST, "Missing registration fields").into_response();
    }
    if !state.config.registration_open() {
        return (StatusCode::FORBIDDEN, "Registration has ended").into_response();
    }

    // append, persist, and rebuild under the roster write lock so a racing
    // registration cannot overwrite the snapshot with a stale roster
    let mut roster = state.roster.write().expect("roster state poisoned");
    if let Err(err) = roster.append(&request.mc_user, &request.discord_id, &request.discord_user) {
        return (StatusCode::CONFLICT, err.to_string()).into_response();
    }
    if let Err(err) = save_roster(&state.config.roster_path, &roster) {
        eprintln!(
            "failed to persist roster for {} - {}: {err}",
            request.discord_id, request.discord_user
        );
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save registration").into_response();
    }
    state
        .assignments
        .rebuild(roster.participants(), state.config.seed);
    println!(
        "[SecretSanta] registered {} ({})",
        request.discord_user, request.mc_user
    );
    StatusCode::CREATED.into_response()
}
