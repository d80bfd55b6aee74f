use ptcgp_odds_core::{calculate_with, CalculationResult, CardCatalog, FieldError, RawForm};
use ptcgp_odds_data::{load_catalog, load_server_config, ServerConfig};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const ENV_ADDR: &str = "PTCGP_ODDS_ADDR";
const ENV_WEB_ROOT: &str = "PTCGP_ODDS_WEB_ROOT";
const ENV_ASSETS: &str = "PTCGP_ODDS_ASSETS";

fn main() {
    setup_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let state = match AppState::load(&args) {
        Ok(state) => state,
        Err(err) => {
            error!("startup failed: {err:#}");
            std::process::exit(1);
        }
    };
    let server = match Server::http(state.config.addr.as_str()) {
        Ok(server) => server,
        Err(err) => {
            error!("bind {} failed: {err}", state.config.addr);
            std::process::exit(1);
        }
    };
    info!(
        addr = %state.config.addr,
        cards = state.catalog.len(),
        "draw odds server listening"
    );
    for request in server.incoming_requests() {
        if let Err(err) = handle_request(request, &state) {
            warn!("request error: {err}");
        }
    }
}

fn setup_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

struct AppState {
    config: ServerConfig,
    catalog: CardCatalog,
}

impl AppState {
    fn load(args: &[String]) -> anyhow::Result<Self> {
        let assets = std::env::var(ENV_ASSETS)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets"));
        let mut config = load_server_config(&assets)?;
        apply_overrides(&mut config, |key| std::env::var(key).ok(), args);
        let catalog = load_catalog(&config.assets_dir)?;
        Ok(Self { config, catalog })
    }
}

/// Environment variables override the file, `--addr` overrides both.
fn apply_overrides(
    config: &mut ServerConfig,
    env: impl Fn(&str) -> Option<String>,
    args: &[String],
) {
    if let Some(addr) = env(ENV_ADDR) {
        config.addr = addr;
    }
    if let Some(root) = env(ENV_WEB_ROOT) {
        config.web_root = PathBuf::from(root);
    }
    let mut idx = 0usize;
    while idx < args.len() {
        if args[idx] == "--addr" {
            if let Some(value) = args.get(idx + 1) {
                config.addr = value.clone();
                idx += 1;
            }
        }
        idx += 1;
    }
}

#[derive(Serialize)]
struct UiCard<'a> {
    name: &'a str,
    effect_text: &'a str,
    policy: &'static str,
    affects: ptcgp_odds_core::Affects,
    uses_points: bool,
}

#[derive(Serialize)]
struct CardsResponse<'a> {
    cards: Vec<UiCard<'a>>,
}

#[derive(Debug, Serialize)]
struct CalculateResponse {
    ok: bool,
    error: Option<String>,
    errors: Vec<FieldError>,
    result: Option<CalculationResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    StaticFile {
        file: &'static str,
        content_type: &'static str,
    },
    Cards,
    Calculate,
    NotFound,
}

fn route(method: &Method, url: &str) -> Route {
    match (method, url) {
        (Method::Get, "/") => Route::StaticFile {
            file: "index.html",
            content_type: "text/html; charset=utf-8",
        },
        (Method::Get, "/app.js") => Route::StaticFile {
            file: "app.js",
            content_type: "application/javascript",
        },
        (Method::Get, "/styles.css") => Route::StaticFile {
            file: "styles.css",
            content_type: "text/css; charset=utf-8",
        },
        (Method::Get, "/api/cards") => Route::Cards,
        (Method::Post, "/api/calculate") => Route::Calculate,
        _ => Route::NotFound,
    }
}

fn handle_request(
    mut request: tiny_http::Request,
    state: &AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = request.url().to_string();
    let method = request.method().clone();
    let status = match route(&method, &url) {
        Route::StaticFile { file, content_type } => {
            let path = state.config.web_root.join(file);
            respond_with_file(request, &path, content_type)?
        }
        Route::Cards => respond_json(request, &cards_response(&state.catalog), 200)?,
        Route::Calculate => {
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body)?;
            let (response, status) = calculate_response(&state.catalog, &body);
            respond_json(request, &response, status)?
        }
        Route::NotFound => {
            request.respond(Response::empty(StatusCode(404)))?;
            404
        }
    };
    debug!(method = %method, url = %url, status, "request");
    Ok(())
}

fn cards_response(catalog: &CardCatalog) -> CardsResponse<'_> {
    CardsResponse {
        cards: catalog
            .iter()
            .map(|card| UiCard {
                name: &card.name,
                effect_text: &card.effect_text,
                policy: card.policy.id(),
                affects: card.affects,
                uses_points: card.uses_points,
            })
            .collect(),
    }
}

fn calculate_response(catalog: &CardCatalog, body: &str) -> (CalculateResponse, u16) {
    let form: RawForm = match serde_json::from_str(body) {
        Ok(form) => form,
        Err(err) => {
            warn!("bad calculate body: {err}");
            return (
                CalculateResponse {
                    ok: false,
                    error: Some(format!("invalid request body: {err}")),
                    errors: Vec::new(),
                    result: None,
                },
                400,
            );
        }
    };
    match form.parse() {
        Ok(input) => {
            let result = calculate_with(catalog, &input);
            debug!(
                card = %input.card_name,
                worth_it = result.worth_it,
                "calculated"
            );
            (
                CalculateResponse {
                    ok: true,
                    error: None,
                    errors: Vec::new(),
                    result: Some(result),
                },
                200,
            )
        }
        Err(errors) => {
            debug!(count = errors.len(), "form rejected");
            (
                CalculateResponse {
                    ok: false,
                    error: Some("Please fix the validation errors before calculating.".to_string()),
                    errors,
                    result: None,
                },
                200,
            )
        }
    }
}

fn respond_with_file(
    request: tiny_http::Request,
    path: &Path,
    content_type: &str,
) -> Result<u16, Box<dyn std::error::Error>> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(err) => {
            warn!("missing static file {}: {err}", path.display());
            request.respond(Response::empty(StatusCode(404)))?;
            return Ok(404);
        }
    };
    let header = Header::from_bytes(&b"Content-Type"[..], content_type)
        .map_err(|_| "invalid content type header")?;
    request.respond(Response::from_data(content).with_header(header))?;
    Ok(200)
}

fn respond_json<T: Serialize>(
    request: tiny_http::Request,
    response: &T,
    status: u16,
) -> Result<u16, Box<dyn std::error::Error>> {
    let body = serde_json::to_vec_pretty(response)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|_| "invalid content type header")?;
    request.respond(
        Response::from_data(body)
            .with_header(header)
            .with_status_code(StatusCode(status)),
    )?;
    Ok(status)
}
