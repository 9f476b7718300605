//! Query server for the places dataset.
//!
//! Serves type-filtered and text-searched subsets of the canonical
//! place collection over a small HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use redbud::categories::Category;
use redbud::models::Place;
use redbud::search::{filter_by_types, search};
use redbud::store::PlaceStore;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Places query server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Path to the places dataset
    #[arg(short, long, default_value = "places.json")]
    data: PathBuf,
}

/// Application state shared across handlers
struct AppState {
    store: PlaceStore,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Redbud Query Server");
    info!("Dataset: {}", args.data.display());

    let state = Arc::new(AppState {
        store: PlaceStore::new(&args.data),
    });

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/places", get(places_handler))
        .route("/v1/search", get(search_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let count = state.store.places().await.len();

    Json(HealthResponse {
        status: if count > 0 { "ok" } else { "empty" },
        places: count,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    places: usize,
}

/// Type-filtered places
async fn places_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlacesQueryParams>,
) -> Json<PlacesResponse> {
    let types = parse_types(&params.types);
    let places = filter_by_types(state.store.places().await, &types);

    Json(PlacesResponse { places })
}

/// Free-text search within type-filtered places
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQueryParams>,
) -> Json<PlacesResponse> {
    let types = parse_types(&params.types);
    let query = params.text.as_deref().unwrap_or("");
    let places = search(state.store.places().await, query, &types);

    Json(PlacesResponse { places })
}

#[derive(Deserialize)]
struct PlacesQueryParams {
    /// Place types to include (comma-separated); all types when omitted
    types: Option<String>,
}

#[derive(Deserialize)]
struct SearchQueryParams {
    /// Search text; blank behaves as a plain type filter
    text: Option<String>,
    /// Place types to include (comma-separated); all types when omitted
    types: Option<String>,
}

#[derive(Serialize)]
struct PlacesResponse {
    places: Vec<Place>,
}

/// Parse a comma-separated type list, defaulting to every canonical
/// place type.
fn parse_types(types: &Option<String>) -> Vec<String> {
    match types {
        Some(list) => list
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        None => Category::ALL
            .iter()
            .map(|c| c.place_type().to_string())
            .collect(),
    }
}
