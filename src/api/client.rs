//! API client for the reporting backend.
//!
//! This is the single entry point for all organization and report
//! operations. Every call that reaches the network updates the shared
//! server-status tracker as a side effect; read operations recover from an
//! unreachable server by serving locally generated data, so callers never
//! special-case network failure.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use rand::thread_rng;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::mock::{generate_rows, MemoryDirectory, OrganizationDirectory};
use crate::models::{
    DeleteReceipt, NewOrganization, Organization, OrganizationPatch, Period, Report, ReportMeta,
    ReportPeriod,
};
use crate::status::{ServerStatus, ServerStatusTracker};

use super::error::preview;
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Cache slot for the organization list - the only resource cached today.
const ORGANIZATIONS_KEY: &str = "organizations";

/// Timeout for the lightweight health probe.
/// Shorter than the regular request timeout so status banners react quickly.
const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Organization name reported in fallback reports when the id is unknown.
const FALLBACK_ORG_NAME: &str = "Demo Organization";

/// Shared mutable state behind the client: the cache, the status tracker and
/// the fallback directory. One context per running application instance;
/// inject the same `Arc` into every client and view that needs it.
pub struct ClientContext {
    pub cache: CacheStore<Vec<Organization>>,
    pub status: ServerStatusTracker,
    pub fallback: Box<dyn OrganizationDirectory>,
}

impl ClientContext {
    pub fn new(config: &Config) -> Self {
        Self::with_directory(config, Box::new(MemoryDirectory::new()))
    }

    /// Build a context over a custom fallback store.
    pub fn with_directory(config: &Config, fallback: Box<dyn OrganizationDirectory>) -> Self {
        Self {
            cache: CacheStore::new(config.cache_duration),
            status: ServerStatusTracker::new(),
            fallback,
        }
    }
}

/// Internal classification of a failed exchange. `Shape` is raised to the
/// caller; `Unreachable` takes the fallback path.
enum FetchError {
    Unreachable(String),
    Shape(String),
}

/// API client for the reporting backend.
/// Clone is cheap - the reqwest connection pool and the context are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    ctx: Arc<ClientContext>,
}

impl ApiClient {
    /// Build a client with its own private context.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Self::with_context(config, Arc::new(ClientContext::new(config)))
    }

    /// Build a client over an existing shared context.
    pub fn with_context(config: &Config, ctx: Arc<ClientContext>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            ctx,
        })
    }

    /// The shared cache/status/fallback state behind this client.
    pub fn context(&self) -> &ClientContext {
        &self.ctx
    }

    // ===== Organizations =====

    /// Fetch the organization list, preferring a valid cache entry.
    ///
    /// On remote failure the static fallback list is cached and returned
    /// instead - the caller only ever sees an error here for cancellation or
    /// an unusable response body. A cancelled call leaves cache and status
    /// untouched.
    pub async fn get_organizations(
        &self,
        force_refresh: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<Organization>, ApiError> {
        if !force_refresh {
            if let Some(cached) = self.ctx.cache.get(ORGANIZATIONS_KEY) {
                debug!("serving organizations from cache");
                return Ok(cached);
            }
        }

        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("organizations fetch cancelled");
                return Err(ApiError::Cancelled);
            }
            outcome = self.fetch_organization_list() => outcome,
        };

        match outcome {
            Ok(orgs) => {
                self.ctx.status.mark_available();
                self.ctx.cache.set(ORGANIZATIONS_KEY, orgs.clone());
                Ok(orgs)
            }
            Err(FetchError::Shape(detail)) => {
                self.ctx.status.mark_available();
                Err(ApiError::InvalidResponseShape(detail))
            }
            Err(FetchError::Unreachable(detail)) => {
                warn!(%detail, "organizations fetch failed, serving fallback data");
                self.ctx.status.mark_unavailable();
                let orgs = self.ctx.fallback.list();
                self.ctx.cache.set(ORGANIZATIONS_KEY, orgs.clone());
                Ok(orgs)
            }
        }
    }

    /// Fetch one organization, checking a valid cache entry first and the
    /// fallback directory on remote failure.
    pub async fn get_organization_by_id(&self, id: Uuid) -> Result<Organization, ApiError> {
        if let Some(cached) = self.ctx.cache.get(ORGANIZATIONS_KEY) {
            if let Some(org) = cached.into_iter().find(|org| org.id == id) {
                debug!(%id, "serving organization from cache");
                return Ok(org);
            }
        }

        let url = format!("{}/get/{}", self.base_url, id);
        match self.get_json::<Organization>(&url).await {
            Ok(org) => {
                self.ctx.status.mark_available();
                Ok(org)
            }
            Err(FetchError::Shape(detail)) => {
                self.ctx.status.mark_available();
                Err(ApiError::InvalidResponseShape(detail))
            }
            Err(FetchError::Unreachable(detail)) => {
                warn!(%id, %detail, "organization fetch failed, searching fallback data");
                self.ctx.status.mark_unavailable();
                self.ctx.fallback.find(id).ok_or(ApiError::NotFound(id))
            }
        }
    }

    /// Create an organization. The record is assembled client-side (id plus
    /// both timestamps) so the fallback path can commit it as-is; the server
    /// response is authoritative when the call goes through.
    pub async fn create_organization(
        &self,
        payload: NewOrganization,
    ) -> Result<Organization, ApiError> {
        let now = Utc::now();
        let record = Organization {
            id: payload.id.unwrap_or_else(Uuid::new_v4),
            name: payload.name,
            created_at: now,
            updated_at: now,
        };

        let url = format!("{}/create", self.base_url);
        match self.post_json::<Organization, _>(&url, &record).await {
            Ok(created) => {
                self.ctx.status.mark_available();
                self.ctx.cache.clear(Some(ORGANIZATIONS_KEY));
                Ok(created)
            }
            Err(FetchError::Shape(detail)) => {
                self.ctx.status.mark_available();
                Err(ApiError::InvalidResponseShape(detail))
            }
            Err(FetchError::Unreachable(detail)) => {
                warn!(id = %record.id, %detail, "create failed, committing to fallback data");
                self.ctx.status.mark_unavailable();
                self.ctx.fallback.insert(record.clone())?;
                self.ctx.cache.clear(Some(ORGANIZATIONS_KEY));
                Ok(record)
            }
        }
    }

    /// Update an organization. In fallback mode the patch is merged over the
    /// stored record; `NotFound` when the id is unknown there.
    pub async fn update_organization(
        &self,
        id: Uuid,
        patch: OrganizationPatch,
    ) -> Result<Organization, ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct UpdatePayload<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<&'a str>,
            updated_at: DateTime<Utc>,
        }

        let body = UpdatePayload {
            name: patch.name.as_deref(),
            updated_at: Utc::now(),
        };
        let url = format!("{}/update/{}", self.base_url, id);
        match self.put_json::<Organization, _>(&url, &body).await {
            Ok(updated) => {
                self.ctx.status.mark_available();
                self.ctx.cache.clear(Some(ORGANIZATIONS_KEY));
                Ok(updated)
            }
            Err(FetchError::Shape(detail)) => {
                self.ctx.status.mark_available();
                Err(ApiError::InvalidResponseShape(detail))
            }
            Err(FetchError::Unreachable(detail)) => {
                warn!(%id, %detail, "update failed, patching fallback data");
                self.ctx.status.mark_unavailable();
                let updated = self.ctx.fallback.update(id, &patch)?;
                self.ctx.cache.clear(Some(ORGANIZATIONS_KEY));
                Ok(updated)
            }
        }
    }

    /// Delete an organization. `NotFound` when the id is unknown to the
    /// fallback directory in fallback mode.
    pub async fn delete_organization(&self, id: Uuid) -> Result<DeleteReceipt, ApiError> {
        let url = format!("{}/delete/{}", self.base_url, id);
        match self.delete_json::<DeleteReceipt>(&url).await {
            Ok(receipt) => {
                self.ctx.status.mark_available();
                self.ctx.cache.clear(Some(ORGANIZATIONS_KEY));
                Ok(receipt)
            }
            Err(FetchError::Shape(detail)) => {
                self.ctx.status.mark_available();
                Err(ApiError::InvalidResponseShape(detail))
            }
            Err(FetchError::Unreachable(detail)) => {
                warn!(%id, %detail, "delete failed, removing from fallback data");
                self.ctx.status.mark_unavailable();
                self.ctx.fallback.remove(id)?;
                self.ctx.cache.clear(Some(ORGANIZATIONS_KEY));
                Ok(DeleteReceipt {
                    success: true,
                    id,
                    deleted_at: Some(Utc::now()),
                })
            }
        }
    }

    // ===== Reports =====

    /// Compute a report for the period and organization.
    ///
    /// The period is validated before any network attempt. On remote failure
    /// a synthetic report is generated locally and wrapped with the same
    /// metadata the server would attach.
    pub async fn calculate_report(
        &self,
        period: &ReportPeriod,
        organization_id: Uuid,
    ) -> Result<Report, ApiError> {
        let (start, end) = match (period.start_date, period.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(ApiError::MissingPeriod),
        };
        if end < start {
            return Err(ApiError::InvalidRange);
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct CalculateRequest {
            start_date: NaiveDate,
            end_date: NaiveDate,
            organization_id: Uuid,
        }

        let body = CalculateRequest {
            start_date: start,
            end_date: end,
            organization_id,
        };
        let url = format!("{}/calculate", self.base_url);
        match self.post_json::<Report, _>(&url, &body).await {
            Ok(report) => {
                self.ctx.status.mark_available();
                Ok(report)
            }
            Err(FetchError::Shape(detail)) => {
                self.ctx.status.mark_available();
                Err(ApiError::InvalidResponseShape(detail))
            }
            Err(FetchError::Unreachable(detail)) => {
                warn!(%organization_id, %detail, "report calculation failed, generating fallback report");
                self.ctx.status.mark_unavailable();
                Ok(self.fallback_report(start, end, organization_id))
            }
        }
    }

    fn fallback_report(&self, start: NaiveDate, end: NaiveDate, organization_id: Uuid) -> Report {
        let organization_name = self
            .ctx
            .fallback
            .find(organization_id)
            .map(|org| org.name)
            .unwrap_or_else(|| FALLBACK_ORG_NAME.to_string());

        let rows = generate_rows(start, end, organization_id, &organization_name, &mut thread_rng());
        let total_profit = rows.iter().map(|row| row.profit).sum::<f64>();
        let average_profitability = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|row| row.profitability).sum::<f64>() / rows.len() as f64
        };

        Report {
            meta: ReportMeta {
                organization_id,
                organization_name,
                period: Period {
                    start_date: start,
                    end_date: end,
                },
                generated_at: Utc::now(),
                total_records: rows.len(),
                total_profit,
                average_profitability,
            },
            data: rows,
        }
    }

    // ===== Status =====

    /// Last known reachability, as recorded by previous calls. Pure read.
    pub fn server_status(&self) -> bool {
        self.ctx.status.is_available()
    }

    /// Full tracker snapshot for status banners.
    pub fn status_snapshot(&self) -> ServerStatus {
        self.ctx.status.snapshot()
    }

    /// Probe `/health` with a short timeout and record the result.
    /// Never fails - an unreachable server resolves to `false`.
    pub async fn check_server_connection(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        let reachable = match self
            .http
            .get(&url)
            .timeout(HEALTH_PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(error) => {
                debug!(%error, "health probe failed");
                false
            }
        };

        if reachable {
            self.ctx.status.mark_available();
        } else {
            self.ctx.status.mark_unavailable();
        }
        reachable
    }

    /// Force the next organization read to bypass the cache.
    pub fn clear_organizations_cache(&self) {
        self.ctx.cache.clear(Some(ORGANIZATIONS_KEY));
    }

    // ===== Transport helpers =====

    /// The list endpoint answers either a bare array or a `{data: [...]}`
    /// wrapper depending on the backend version; accept both.
    async fn fetch_organization_list(&self) -> Result<Vec<Organization>, FetchError> {
        let url = format!("{}/get", self.base_url);
        let response = self.http.get(&url).send().await.map_err(transport_error)?;
        let response = check_status(response).await?;
        let text = response.text().await.map_err(transport_error)?;

        if let Ok(orgs) = serde_json::from_str::<Vec<Organization>>(&text) {
            return Ok(orgs);
        }

        #[derive(Deserialize)]
        struct Wrapper {
            data: Vec<Organization>,
        }

        if let Ok(wrapper) = serde_json::from_str::<Wrapper>(&text) {
            return Ok(wrapper.data);
        }

        Err(FetchError::Shape(preview(&text)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.http.get(url).send().await.map_err(transport_error)?;
        decode(check_status(response).await?).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        decode(check_status(response).await?).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        let response = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        decode(check_status(response).await?).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.http.delete(url).send().await.map_err(transport_error)?;
        decode(check_status(response).await?).await
    }
}

fn transport_error(error: reqwest::Error) -> FetchError {
    FetchError::Unreachable(error.to_string())
}

/// Any non-2xx answer is treated like an unreachable server: the caller falls
/// back to local data rather than surfacing a transport detail to the UI.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(FetchError::Unreachable(format!(
            "status {}: {}",
            status,
            preview(&body)
        )))
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let text = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&text)
        .map_err(|error| FetchError::Shape(format!("{}: {}", error, preview(&text))))
}

// ============================================================================
// Tests
// ============================================================================
