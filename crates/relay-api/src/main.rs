//! cTrader 웹훅 릴레이 서버.
//!
//! 환경 변수에서 설정을 읽고 웹훅, 헬스 체크, 메트릭 엔드포인트를 제공합니다.

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{error, info, warn};

use relay_api::metrics::setup_metrics_recorder;
use relay_api::routes::{create_router, LEGACY_WEBHOOK_PATH, WEBHOOK_PATH};
use relay_api::state::AppState;
use relay_core::{init_logging, RelayConfig};
use relay_notification::TelegramSender;

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = RelayConfig::from_env()?;
    init_logging(&config.logging)?;

    info!("Starting cTrader relay server...");

    let metrics_handle = setup_metrics_recorder()?;
    info!("Prometheus metrics recorder initialized");

    let addr = config.server.socket_addr().map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. RELAY_HOST, RELAY_PORT 환경변수를 확인하세요."
        );
        e
    })?;

    if config.secrets.is_empty() {
        warn!("WEBHOOK_SECRET / WEBHOOK_SECRETS not set, every webhook will be rejected");
    }
    for (name, target) in [("zone_bot", &config.zone_target), ("cross_bot", &config.cross_target)]
    {
        if !target.is_configured() {
            warn!(
                bot = name,
                token_var = target.token_var,
                chat_var = target.chat_var,
                "Telegram target not configured"
            );
        }
    }

    let sender = Arc::new(TelegramSender::new(config.telegram_api_base.clone()));
    let state = Arc::new(AppState::new(config, sender));
    info!(
        version = %state.version,
        secrets = state.config.secrets.len(),
        zone_bot = state.config.zone_target.is_configured(),
        cross_bot = state.config.cross_target.is_configured(),
        "Application state initialized"
    );

    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let app = Router::new()
        .merge(metrics_router)
        .merge(create_router(state));

    info!(%addr, "Relay server listening");
    info!("Webhook available at http://{}{}", addr, WEBHOOK_PATH);
    info!("Legacy webhook available at http://{}{}", addr, LEGACY_WEBHOOK_PATH);
    info!("Metrics available at http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
