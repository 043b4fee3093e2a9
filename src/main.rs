use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use dex_route_selector::orchestrator::QuoteService;
use dex_route_selector::types::{
    DexConfig, GasPriceUpdate, MinTradeRequest, MinTradeResponse, QuoteRequest, QuoteResponse,
    TipEstimateResponse, TipMarginUpdate,
};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

type AppState = Arc<QuoteService>;
type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

// Generate the OpenAPI schema
#[derive(OpenApi)]
#[openapi(
    paths(
        get_quotes,
        get_tip_estimate,
        get_min_trade_amount,
        update_gas_price,
        update_tip_margin,
        update_pair_data
    ),
    components(
        schemas(
            QuoteRequest,
            QuoteResponse,
            MinTradeRequest,
            MinTradeResponse,
            TipEstimateResponse,
            GasPriceUpdate,
            TipMarginUpdate
        )
    ),
    tags(
        (name = "quotes", description = "Best route for a token pair"),
        (name = "tips", description = "Block builder tip estimates")
    )
)]
struct ApiDoc;

fn bad_request(e: anyhow::Error) -> (StatusCode, String) {
    warn!(error = %e, "rejected request");
    (StatusCode::BAD_REQUEST, e.to_string())
}

#[utoipa::path(
    get,
    path = "/quotes",
    params(QuoteRequest),
    responses(
        (status = 200, description = "Best route, empty routes when none exists", body = QuoteResponse),
        (status = 400, description = "Invalid quote request")
    ),
    tag = "quotes"
)]
async fn get_quotes(
    State(service): State<AppState>,
    Query(params): Query<QuoteRequest>,
) -> ApiResult<QuoteResponse> {
    service.get_quote(params).await.map(Json).map_err(bad_request)
}

#[utoipa::path(
    get,
    path = "/tip_estimate",
    responses(
        (status = 200, description = "Tip estimate, null without a gas price", body = Option<TipEstimateResponse>)
    ),
    tag = "tips"
)]
async fn get_tip_estimate(State(service): State<AppState>) -> Json<Option<TipEstimateResponse>> {
    Json(service.get_tip_estimate().await)
}

#[utoipa::path(
    get,
    path = "/min_trade_amount",
    params(MinTradeRequest),
    responses(
        (status = 200, description = "Minimum trade amount, null when it cannot be estimated", body = Option<MinTradeResponse>),
        (status = 400, description = "Unsupported token")
    ),
    tag = "tips"
)]
async fn get_min_trade_amount(
    State(service): State<AppState>,
    Query(params): Query<MinTradeRequest>,
) -> ApiResult<Option<MinTradeResponse>> {
    service
        .get_min_trade_amount(params)
        .await
        .map(Json)
        .map_err(bad_request)
}

#[utoipa::path(
    post,
    path = "/gas_price",
    request_body = GasPriceUpdate,
    responses(
        (status = 200, description = "Recorded latest gas price"),
        (status = 400, description = "Invalid gas price")
    ),
    tag = "tips"
)]
async fn update_gas_price(
    State(service): State<AppState>,
    Json(update): Json<GasPriceUpdate>,
) -> Result<StatusCode, (StatusCode, String)> {
    service
        .set_gas_price(&update.gas_price)
        .map(|_| StatusCode::OK)
        .map_err(bad_request)
}

#[utoipa::path(
    post,
    path = "/tip_margin",
    request_body = TipMarginUpdate,
    responses(
        (status = 200, description = "Recorded user tip margin")
    ),
    tag = "tips"
)]
async fn update_tip_margin(
    State(service): State<AppState>,
    Json(update): Json<TipMarginUpdate>,
) -> StatusCode {
    service.set_tip_margin(update.tip_margin_percent);
    StatusCode::OK
}

#[utoipa::path(
    post,
    path = "/update_pair_data",
    responses(
        (status = 200, description = "Reloaded pair snapshot"),
        (status = 500, description = "Pair snapshot could not be read")
    ),
    tag = "quotes"
)]
async fn update_pair_data(State(service): State<AppState>) -> Result<StatusCode, (StatusCode, String)> {
    service.reload_pair_data().map(|_| StatusCode::OK).map_err(|e| {
        error!(error = %e, "pair snapshot reload failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = DexConfig::load_from(PathBuf::from("dex_config.toml"))?;
    init_tracing(&config.log_level);

    let service = Arc::new(QuoteService::new(config));
    if let Err(e) = service.reload_pair_data() {
        warn!(error = %e, "starting without pair data");
    }

    let openapi = ApiDoc::openapi();
    let app = Router::new()
        .route("/quotes", get(get_quotes))
        .route("/tip_estimate", get(get_tip_estimate))
        .route("/min_trade_amount", get(get_min_trade_amount))
        .route("/gas_price", post(update_gas_price))
        .route("/tip_margin", post(update_tip_margin))
        .route("/update_pair_data", post(update_pair_data))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .with_state(service.clone());

    let listener = tokio::net::TcpListener::bind(service.config.listen_addr.as_str()).await?;
    info!(addr = %listener.local_addr()?, "quote server listening, Swagger UI at /swagger-ui/");
    axum::serve(listener, app).await?;
    Ok(())
}
