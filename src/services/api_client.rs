use std::time::{Duration as StdDuration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ApiErrorCode, AppError, AppResult};
use crate::models::analytics::DateRange;
use crate::models::availability::AvailabilityResponse;
use crate::models::schedule::{ClosedDate, RestaurantSchedule};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

const ENV_BASE_URL: &str = "RESERVAS_API_BASE_URL";
const ENV_HTTP_TIMEOUT: &str = "RESERVAS_HTTP_TIMEOUT_SECS";
const ENV_ACCESS_TOKEN: &str = "RESERVAS_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub http_timeout: StdDuration,
    pub access_token: Option<String>,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_timeout: StdDuration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            access_token: None,
        }
    }

    pub fn from_env() -> Self {
        let base_url = std::env::var(ENV_BASE_URL)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let http_timeout = match std::env::var(ENV_HTTP_TIMEOUT) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => StdDuration::from_secs(secs),
                _ => {
                    warn!(
                        target: "app::config",
                        value = %raw,
                        "invalid http timeout, falling back to default"
                    );
                    StdDuration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)
                }
            },
            Err(_) => StdDuration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let access_token = std::env::var(ENV_ACCESS_TOKEN)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Self {
            http_timeout,
            access_token,
            ..Self::new(base_url)
        }
    }

    pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = if token.trim().is_empty() {
            None
        } else {
            Some(token.trim().to_string())
        };
        self
    }
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Remote reservations backend. Capacity accounting happens on the server;
/// this side only reads its JSON.
#[async_trait]
pub trait ReservationsApi: Send + Sync {
    async fn availability(
        &self,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> AppResult<AvailabilityResponse>;

    async fn week_availability(
        &self,
        restaurant_id: i64,
        start_date: NaiveDate,
    ) -> AppResult<Vec<AvailabilityResponse>>;

    /// Raw weekday distribution payload, envelope untouched.
    async fn weekday_distribution(
        &self,
        restaurant_id: i64,
        range: Option<&DateRange>,
    ) -> AppResult<JsonValue>;

    /// Weekly schedule, at most one entry per day.
    async fn schedules(&self, restaurant_id: i64) -> AppResult<Vec<RestaurantSchedule>>;

    async fn closed_dates(&self, restaurant_id: i64) -> AppResult<Vec<ClosedDate>>;
}

#[derive(Clone)]
pub struct HttpReservationsClient {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpReservationsClient {
    pub fn try_new(config: &ApiClientConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Some(StdDuration::from_secs(90)))
            .build()
            .map_err(|err| AppError::other(format!("No se pudo crear el cliente HTTP: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let correlation_id = Uuid::new_v4().to_string();
        let url = format!("{}{}", self.base_url, path);

        debug!(
            target: "app::api",
            correlation_id = %correlation_id,
            url = %url,
            params = ?query,
            "sending request"
        );

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let start = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|err| map_transport_error(&err, &correlation_id))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                target: "app::api",
                correlation_id = %correlation_id,
                status = status.as_u16(),
                "backend returned a non-success status"
            );
            return Err(map_http_error(status, &correlation_id));
        }

        debug!(
            target: "app::api",
            correlation_id = %correlation_id,
            latency_ms = start.elapsed().as_millis() as u64,
            content_length = ?response.content_length(),
            "backend responded"
        );

        response.json::<T>().await.map_err(|err| {
            AppError::api(
                ApiErrorCode::InvalidResponse,
                Some(status.as_u16()),
                format!("Respuesta del servidor no válida: {err}"),
                Some(&correlation_id),
            )
        })
    }
}

#[async_trait]
impl ReservationsApi for HttpReservationsClient {
    async fn availability(
        &self,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> AppResult<AvailabilityResponse> {
        let path = format!("/api/restaurants/{restaurant_id}/availability");
        self.get_json(&path, &[("date", date.to_string())]).await
    }

    async fn week_availability(
        &self,
        restaurant_id: i64,
        start_date: NaiveDate,
    ) -> AppResult<Vec<AvailabilityResponse>> {
        let path = format!("/api/restaurants/{restaurant_id}/availability/week");
        self.get_json(&path, &[("startDate", start_date.to_string())])
            .await
    }

    async fn weekday_distribution(
        &self,
        restaurant_id: i64,
        range: Option<&DateRange>,
    ) -> AppResult<JsonValue> {
        let path = format!("/api/analytics/restaurant/{restaurant_id}/weekday");
        let query: Vec<(&str, String)> = match range {
            Some(range) => vec![
                ("startDate", range.start_date.clone()),
                ("endDate", range.end_date.clone()),
            ],
            None => Vec::new(),
        };
        self.get_json(&path, &query).await
    }

    async fn schedules(&self, restaurant_id: i64) -> AppResult<Vec<RestaurantSchedule>> {
        let path = format!("/api/restaurants/{restaurant_id}/schedules");
        self.get_json(&path, &[]).await
    }

    async fn closed_dates(&self, restaurant_id: i64) -> AppResult<Vec<ClosedDate>> {
        let path = format!("/api/restaurants/{restaurant_id}/closed-dates");
        self.get_json(&path, &[]).await
    }
}

fn map_http_error(status: StatusCode, correlation_id: &str) -> AppError {
    let code = status.as_u16();
    match status {
        StatusCode::UNAUTHORIZED => AppError::api(
            ApiErrorCode::Unauthorized,
            Some(code),
            "No tienes permisos para ver estos datos",
            Some(correlation_id),
        ),
        StatusCode::FORBIDDEN => AppError::api(
            ApiErrorCode::Forbidden,
            Some(code),
            "No tienes permisos para ver estos datos",
            Some(correlation_id),
        ),
        StatusCode::NOT_FOUND => AppError::api(
            ApiErrorCode::NotFound,
            Some(code),
            "No se encontraron datos",
            Some(correlation_id),
        ),
        status if status.is_server_error() => AppError::api(
            ApiErrorCode::ServerError,
            Some(code),
            "Error del servidor. Intenta más tarde",
            Some(correlation_id),
        ),
        _ => AppError::api(
            ApiErrorCode::UnexpectedStatus,
            Some(code),
            format!("No se pudo completar la solicitud (estado {code})"),
            Some(correlation_id),
        ),
    }
}

fn map_transport_error(err: &reqwest::Error, correlation_id: &str) -> AppError {
    if err.is_timeout() {
        AppError::api(
            ApiErrorCode::Timeout,
            None,
            "El servidor tardó demasiado en responder",
            Some(correlation_id),
        )
    } else {
        AppError::api(
            ApiErrorCode::Network,
            None,
            format!("No se pudo conectar con el servidor: {err}"),
            Some(correlation_id),
        )
    }
}

pub mod testing {
    use super::*;

    /// Expose status mapping for integration tests without widening the public API surface.
    pub fn map_http_error(status: StatusCode) -> AppError {
        super::map_http_error(status, "test-correlation-id")
    }
}
