//! Single binary web server exposing the bracket engine as a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use league_bracket_web::{
    advance_round, create_bracket, round_list, standings, update_score, BracketError, Role,
    Tournament,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

/// In-memory state: tournaments by link. The outer map lock is held only to
/// resolve the handle; the per-tournament mutex is held for the whole
/// operation so round advancement and score writes never interleave on the
/// same tournament.
type AppState = Data<RwLock<HashMap<String, Arc<Mutex<Tournament>>>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    link: String,
    capacity: u32,
}

#[derive(Deserialize)]
struct RegisterPlayerBody {
    game_id: String,
    #[serde(default)]
    game_tier: String,
    #[serde(default)]
    role: Role,
}

/// Resolved caller role. A real deployment resolves this from the request's
/// identity via the authorization collaborator; here the role is supplied
/// by the (trusted) frontend.
#[derive(Deserialize)]
struct AdvanceRoundBody {
    caller_role: Role,
}

#[derive(Deserialize)]
struct UpdateScoreBody {
    player_id: Uuid,
    score: u32,
}

/// Path segment: tournament link (e.g. /api/tournaments/{link})
#[derive(Deserialize)]
struct TournamentPath {
    link: String,
}

/// Path segments: tournament link and round index.
#[derive(Deserialize)]
struct TournamentRoundPath {
    link: String,
    index: u32,
}

/// Path segments: tournament link and match group id.
#[derive(Deserialize)]
struct TournamentGroupPath {
    link: String,
    group_id: Uuid,
}

/// Map an engine error onto an HTTP response with a JSON error body.
fn error_response(e: &BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        BracketError::TournamentNotFound
        | BracketError::MatchNotFound
        | BracketError::RoundNotFound
        | BracketError::PlayerNotFound(_) => HttpResponse::NotFound().json(body),
        BracketError::InvalidAuth => HttpResponse::Forbidden().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Clone the per-tournament handle out of the shared map.
fn lookup(state: &AppState, link: &str) -> Result<Arc<Mutex<Tournament>>, HttpResponse> {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return Err(HttpResponse::InternalServerError().body("lock error")),
    };
    g.get(link)
        .cloned()
        .ok_or_else(|| error_response(&BracketError::TournamentNotFound))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-bracket-web",
    })
}

/// Create a tournament with its empty round skeleton.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let tournament = match create_bracket(body.link.trim(), body.capacity) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.contains_key(&tournament.link) {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Tournament link already in use" }));
    }
    log::info!(
        "Created tournament '{}' with capacity {}",
        tournament.link,
        tournament.capacity
    );
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(tournament.link.clone(), Arc::new(Mutex::new(tournament)));
    response
}

/// Get a tournament by link (404 if not found).
#[get("/api/tournaments/{link}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let handle = match lookup(&state, &path.link) {
        Ok(h) => h,
        Err(r) => return r,
    };
    let t = match handle.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&*t)
}

/// Register a player into the tournament pool.
#[post("/api/tournaments/{link}/players")]
async fn api_register_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterPlayerBody>,
) -> HttpResponse {
    let handle = match lookup(&state, &path.link) {
        Ok(h) => h,
        Err(r) => return r,
    };
    let mut t = match handle.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match t.register_player(body.game_id.trim(), body.game_tier.clone(), body.role) {
        Ok(player_id) => HttpResponse::Ok().json(serde_json::json!({ "player_id": player_id })),
        Err(e) => error_response(&e),
    }
}

/// Round overview: every round with its nominal size, plus the live round.
#[get("/api/tournaments/{link}/rounds")]
async fn api_round_list(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let handle = match lookup(&state, &path.link) {
        Ok(h) => h,
        Err(r) => return r,
    };
    let t = match handle.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(round_list(&t))
}

/// Advance the given round: populate round 1, or eliminate and seat the
/// survivors of a played round into the next one. Host only.
#[post("/api/tournaments/{link}/rounds/{index}/advance")]
async fn api_advance_round(
    state: AppState,
    path: Path<TournamentRoundPath>,
    body: Json<AdvanceRoundBody>,
) -> HttpResponse {
    let handle = match lookup(&state, &path.link) {
        Ok(h) => h,
        Err(r) => return r,
    };
    let mut t = match handle.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match advance_round(&mut t, path.index, body.caller_role, &mut rand::thread_rng()) {
        Ok(()) => {
            log::info!("Advanced tournament '{}' at round {}", path.link, path.index);
            HttpResponse::Ok().json(&*t)
        }
        Err(e) => error_response(&e),
    }
}

/// Ranked standings for one match group.
#[get("/api/tournaments/{link}/matches/{group_id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentGroupPath>) -> HttpResponse {
    let handle = match lookup(&state, &path.link) {
        Ok(h) => h,
        Err(r) => return r,
    };
    let t = match handle.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match standings(&t, path.group_id) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    }
}

/// Set a player's score in a group (absolute value, from the scoring input).
#[put("/api/tournaments/{link}/matches/{group_id}/score")]
async fn api_update_score(
    state: AppState,
    path: Path<TournamentGroupPath>,
    body: Json<UpdateScoreBody>,
) -> HttpResponse {
    let handle = match lookup(&state, &path.link) {
        Ok(h) => h,
        Err(r) => return r,
    };
    let mut t = match handle.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match update_score(&mut t, path.group_id, body.player_id, body.score) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(
        HashMap::<String, Arc<Mutex<Tournament>>>::new(),
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_register_player)
            .service(api_round_list)
            .service(api_advance_round)
            .service(api_standings)
            .service(api_update_score)
    })
    .bind(bind)?
    .run()
    .await
}
