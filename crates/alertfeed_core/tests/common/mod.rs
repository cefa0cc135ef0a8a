#![allow(dead_code)]

use std::sync::Once;

use alertfeed_core::{
    parse_date, parse_timestamp, update, Alert, AlertPage, ApiRequest, ApiResponse, AppState,
    Effect, MonitoredUrl, Msg, RemoteFailure, RequestId,
};

pub const USER: u64 = 7;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

pub fn alert(id: u64, title: &str, sent_at: Option<&str>) -> Alert {
    Alert {
        id,
        job_title: title.to_string(),
        organization: None,
        exam_category: None,
        source_url: None,
        last_date_to_apply: None,
        sent_at: sent_at.and_then(parse_timestamp),
        email_status: None,
    }
}

pub fn with_deadline(mut alert: Alert, deadline: &str) -> Alert {
    alert.last_date_to_apply = parse_date(deadline);
    alert
}

pub fn site(id: u64, url: &str, name: &str) -> MonitoredUrl {
    MonitoredUrl {
        id,
        url: url.to_string(),
        website_name: Some(name.to_string()),
        scraper_type: "html".to_string(),
        last_scraped_at: None,
        is_active: true,
    }
}

pub fn page(alerts: Vec<Alert>, total: u64, page: u32, per_page: u32) -> AlertPage {
    AlertPage {
        alerts,
        total,
        page,
        per_page: Some(per_page),
    }
}

/// Remote calls among `effects`, in order.
pub fn calls(effects: &[Effect]) -> Vec<(RequestId, ApiRequest)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Call {
                request_id,
                request,
            } => Some((*request_id, request.clone())),
            _ => None,
        })
        .collect()
}

/// Id of the first call in `effects` matching `pred`.
pub fn call_id(effects: &[Effect], pred: impl Fn(&ApiRequest) -> bool) -> RequestId {
    calls(effects)
        .into_iter()
        .find(|(_, request)| pred(request))
        .map(|(id, _)| id)
        .expect("matching call")
}

pub fn succeed(state: AppState, request_id: RequestId, response: ApiResponse) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::CallCompleted {
            request_id,
            outcome: Ok(response),
        },
    )
}

pub fn fail(state: AppState, request_id: RequestId, failure: RemoteFailure) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::CallCompleted {
            request_id,
            outcome: Err(failure),
        },
    )
}

pub fn mount(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::Mounted { user_id: USER })
}

pub fn toast_texts(state: &AppState) -> Vec<String> {
    state.toasts().toasts().iter().map(|t| t.text.clone()).collect()
}

pub fn is_alerts(request: &ApiRequest) -> bool {
    matches!(request, ApiRequest::Alerts(_))
}
