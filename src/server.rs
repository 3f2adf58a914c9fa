use crate::config::{parse_non_empty_string, parse_u32_with_bounds};
use crate::contact::{self, ContactError};
use crate::section::Section;
use crate::telemetry::{log_event, LogLevel};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const PORT_BOUNDS: (u32, u32) = (1, 65_535);

#[derive(Clone, Debug, PartialEq)]
struct ServerConfig {
    port: u16,
    dist_dir: PathBuf,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok();
        Self::from_values(
            var("PORT").as_deref(),
            var("PORTFOLIO_DIST_DIR").as_deref(),
            var("PORTFOLIO_LOG_LEVEL").as_deref(),
        )
    }

    fn from_values(port: Option<&str>, dist_dir: Option<&str>, log_level: Option<&str>) -> Self {
        let port = parse_u32_with_bounds(port, u32::from(DEFAULT_PORT), PORT_BOUNDS);
        Self {
            port: u16::try_from(port).unwrap_or(DEFAULT_PORT),
            dist_dir: parse_non_empty_string(dist_dir)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR)),
            log_level: parse_non_empty_string(log_level)
                .and_then(|value| LogLevel::from_str(&value.to_ascii_lowercase()))
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

#[derive(Clone)]
struct AppState {
    config: ServerConfig,
}

#[derive(Debug, Serialize)]
struct HealthPayload {
    status: &'static str,
    sections: Vec<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
struct ContactRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
struct ContactReply {
    ok: bool,
    message: String,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let port = config.port;
    let bind_address = format!("0.0.0.0:{port}");

    let index = config.dist_dir.join("index.html");
    let static_service = ServeDir::new(&config.dist_dir).not_found_service(ServeFile::new(index));

    log_event(
        config.log_level,
        LogLevel::Info,
        "server_starting",
        json!({ "port": port, "dist_dir": config.dist_dir.display().to_string() }),
    );

    let app = router(AppState { config }).fallback_service(static_service);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    println!("server listening on http://127.0.0.1:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/contact", post(receive_contact))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    let payload = HealthPayload {
        status: "ok",
        sections: Section::ALL.iter().map(|section| section.as_str()).collect(),
    };
    (StatusCode::OK, headers, Json(payload))
}

/// Validates a submission the same way the page does. Nothing is stored; only
/// field sizes are logged.
async fn receive_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> impl IntoResponse {
    match contact::validate(&request.name, &request.email, &request.message) {
        Ok(form) => {
            log_event(
                state.config.log_level,
                LogLevel::Info,
                "contact_received",
                json!({ "name_len": form.name.len(), "message_len": form.message.len() }),
            );
            (
                StatusCode::ACCEPTED,
                Json(ContactReply {
                    ok: true,
                    message: contact::SUCCESS_MESSAGE.to_string(),
                }),
            )
        }
        Err(err) => {
            log_event(
                state.config.log_level,
                LogLevel::Warn,
                "contact_rejected",
                json!({ "reason": rejection_reason(err) }),
            );
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ContactReply {
                    ok: false,
                    message: err.to_string(),
                }),
            )
        }
    }
}

fn rejection_reason(err: ContactError) -> &'static str {
    match err {
        ContactError::MissingFields => "missing_fields",
        ContactError::InvalidEmail => "invalid_email",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState {
            config: ServerConfig {
                port: DEFAULT_PORT,
                dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
                log_level: LogLevel::Warn,
            },
        }
    }

    #[test]
    fn server_config_falls_back_to_defaults() {
        let config = ServerConfig::from_values(Some("0"), Some("  "), Some("loud"));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
        assert_eq!(config.log_level, LogLevel::Info);

        let config = ServerConfig::from_values(Some("3000"), Some("public"), Some("warn"));
        assert_eq!(config.port, 3000);
        assert_eq!(config.dist_dir, PathBuf::from("public"));
        assert_eq!(config.log_level, LogLevel::Warn);

        assert_eq!(ServerConfig::from_values(Some("70000"), None, None).port, DEFAULT_PORT);
    }

    #[tokio::test]
    async fn health_lists_room_sections_and_is_not_cached() {
        let response = healthz().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );
    }

    #[tokio::test]
    async fn valid_contact_is_accepted() {
        let request = ContactRequest {
            name: "Ada".to_string(),
            email: "a@b.co".to_string(),
            message: "Bonjour".to_string(),
        };
        let response = receive_contact(State(test_state()), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn incomplete_contact_is_rejected() {
        let response = receive_contact(State(test_state()), Json(ContactRequest::default()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn rejection_reasons_are_stable() {
        assert_eq!(rejection_reason(ContactError::MissingFields), "missing_fields");
        assert_eq!(rejection_reason(ContactError::InvalidEmail), "invalid_email");
    }
}
