//! Typed mapping between core requests and the remote endpoints.
use std::sync::Arc;

use alertfeed_core::{
    ActivityFeed, AlertPage, ApiRequest, ApiResponse, DashboardSummary, MonitoredUrl,
    Preferences, UserId,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::gateway::{Gateway, GatewayRequest, Method};
use crate::GatewayError;

#[derive(Deserialize)]
struct UrlList {
    #[serde(default)]
    urls: Vec<MonitoredUrl>,
}

#[derive(Deserialize)]
struct UrlCreated {
    monitored_url: MonitoredUrl,
}

#[derive(Deserialize)]
struct ScrapeSummary {
    #[serde(default)]
    notifications_found: u64,
}

#[derive(Deserialize)]
struct PreferencesSaved {
    #[serde(default)]
    preferences: Option<Preferences>,
}

#[derive(Clone)]
pub struct ApiClient {
    gateway: Arc<dyn Gateway>,
    user_id: UserId,
}

impl ApiClient {
    pub fn new(gateway: Arc<dyn Gateway>, user_id: UserId) -> Self {
        Self { gateway, user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub async fn call(&self, request: &ApiRequest) -> Result<ApiResponse, GatewayError> {
        let body = self.gateway.send(self.build(request)).await?;
        decode_response(request, body)
    }

    /// Method, path, query and body for `request`, tagged with the caller.
    pub fn build(&self, request: &ApiRequest) -> GatewayRequest {
        let user = self.user_id;
        let built = match request {
            ApiRequest::Summary => {
                GatewayRequest::new(Method::Get, format!("/api/dashboard/{user}/summary"))
            }
            ApiRequest::Alerts(query) => {
                let request =
                    GatewayRequest::new(Method::Get, format!("/api/dashboard/{user}/alerts"))
                        .query("page", query.page)
                        .query("per_page", query.per_page);
                match &query.exam_category {
                    Some(category) => request.query("exam_category", category),
                    None => request,
                }
            }
            ApiRequest::Activity => {
                GatewayRequest::new(Method::Get, format!("/api/dashboard/{user}/activity"))
            }
            ApiRequest::ArchiveAlert { alert_id } => GatewayRequest::new(
                Method::Delete,
                format!("/api/dashboard/{user}/alert/{alert_id}"),
            ),
            ApiRequest::TriggerScrape { url_id } => GatewayRequest::new(
                Method::Post,
                format!("/api/dashboard/{user}/trigger-scrape/{url_id}"),
            ),
            ApiRequest::ListUrls => {
                GatewayRequest::new(Method::Get, format!("/api/preferences/{user}/urls"))
            }
            ApiRequest::AddUrl(site) => {
                GatewayRequest::new(Method::Post, format!("/api/preferences/{user}/urls")).body(
                    json!({
                        "url": site.url,
                        "website_name": site.website_name,
                        "scraper_type": site.scraper_type,
                    }),
                )
            }
            ApiRequest::RemoveUrl { url_id } => GatewayRequest::new(
                Method::Delete,
                format!("/api/preferences/{user}/urls/{url_id}"),
            ),
            ApiRequest::LoadPreferences => {
                GatewayRequest::new(Method::Get, format!("/api/preferences/{user}"))
            }
            ApiRequest::SavePreferences(preferences) => {
                GatewayRequest::new(Method::Post, format!("/api/preferences/{user}"))
                    .body(json!(preferences))
            }
        };
        built.caller(user)
    }
}

fn decode<T: DeserializeOwned>(request: &ApiRequest, body: Value) -> Result<T, GatewayError> {
    serde_json::from_value(body)
        .map_err(|err| GatewayError::Decode(format!("{}: {err}", request.label())))
}

pub fn decode_response(request: &ApiRequest, body: Value) -> Result<ApiResponse, GatewayError> {
    let response = match request {
        ApiRequest::Summary => ApiResponse::Summary(decode::<DashboardSummary>(request, body)?),
        ApiRequest::Alerts(_) => ApiResponse::Alerts(decode::<AlertPage>(request, body)?),
        ApiRequest::Activity => ApiResponse::Activity(decode::<ActivityFeed>(request, body)?),
        ApiRequest::ListUrls => ApiResponse::Urls(decode::<UrlList>(request, body)?.urls),
        ApiRequest::AddUrl(_) => {
            ApiResponse::UrlAdded(decode::<UrlCreated>(request, body)?.monitored_url)
        }
        ApiRequest::ArchiveAlert { .. } | ApiRequest::RemoveUrl { .. } => ApiResponse::Acknowledged,
        ApiRequest::TriggerScrape { .. } => ApiResponse::ScrapeCompleted {
            notifications_found: decode::<ScrapeSummary>(request, body)?.notifications_found,
        },
        ApiRequest::LoadPreferences => {
            ApiResponse::Preferences(decode::<Preferences>(request, body)?)
        }
        // The save echo is optional; an empty or message-only body still counts.
        ApiRequest::SavePreferences(_) => match body {
            Value::Object(_) => match decode::<PreferencesSaved>(request, body)?.preferences {
                Some(preferences) => ApiResponse::Preferences(preferences),
                None => ApiResponse::Acknowledged,
            },
            _ => ApiResponse::Acknowledged,
        },
    };
    Ok(response)
}
