use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use alertfeed_app::platform::ui::constants::BUTTON_REMOVE_SITE;
use alertfeed_app::platform::ui::events::UiEvent;
use alertfeed_app::platform::ui::render::RenderCommand;
use alertfeed_app::platform::{Presenter, Runtime};
use alertfeed_core::DashboardSettings;
use alertfeed_engine::{ApiClient, GatewaySettings, LocalStore, ReqwestGateway};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const USER: u64 = 7;
const WAIT: Duration = Duration::from_secs(10);

#[derive(Default)]
struct Recorder {
    frames: usize,
}

impl Presenter for Recorder {
    fn present(&mut self, _commands: Vec<RenderCommand>) {
        self.frames += 1;
    }
}

fn settings(per_page: u32) -> DashboardSettings {
    DashboardSettings {
        per_page,
        toast_fade: Duration::from_secs(60),
        toast_remove: Duration::from_secs(60),
        ..DashboardSettings::default()
    }
}

fn runtime_for(base_url: String, per_page: u32, store: LocalStore) -> Runtime<Recorder> {
    let gateway = ReqwestGateway::new(GatewaySettings {
        base_url,
        ..GatewaySettings::default()
    })
    .expect("client builds");
    let client = ApiClient::new(Arc::new(gateway), USER);
    Runtime::with_client(settings(per_page), client, store, Recorder::default())
        .expect("runtime starts")
}

/// Pumps until no call is outstanding.
fn settle(runtime: &mut Runtime<Recorder>) {
    let deadline = Instant::now() + WAIT;
    while runtime.state().pending_calls() > 0 {
        assert!(Instant::now() < deadline, "calls never completed");
        runtime.pump(Duration::from_millis(100));
    }
}

fn toast_texts(runtime: &Runtime<Recorder>) -> Vec<String> {
    runtime.view().toasts.into_iter().map(|t| t.text).collect()
}

fn alerts(ids: std::ops::Range<u64>) -> Vec<Value> {
    ids.map(|id| {
        json!({
            "id": id,
            "job_title": format!("Junior Engineer {id}"),
            "organization": "SSC",
            "exam_category": "SSC",
            "last_date_to_apply": "2030-01-15",
            "sent_at": "2024-05-01T10:00:00",
            "email_status": "sent"
        })
    })
    .collect()
}

async fn mount_summary_and_activity(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/api/dashboard/{USER}/summary")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": USER, "name": "Asha Rao", "email": "asha@example.com"},
            "stats": {"total_alerts_received": 23, "alerts_this_week": 4, "monitored_urls": 0},
            "recent_alerts": []
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/dashboard/{USER}/activity")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "emails_sent": [], "scraping_runs": [], "errors_warnings": []
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn paging_through_alerts() {
    let server = MockServer::start().await;
    mount_summary_and_activity(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/preferences/{USER}/urls")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"urls": []})))
        .mount(&server)
        .await;
    for (page, ids) in [(1, 1..11), (2, 11..21)] {
        Mock::given(method("GET"))
            .and(path(format!("/api/dashboard/{USER}/alerts")))
            .and(query_param("page", page.to_string()))
            .and(query_param("per_page", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "alerts": alerts(ids),
                "total": 23,
                "page": page,
                "per_page": 10
            })))
            .mount(&server)
            .await;
    }

    let base_url = server.uri();
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path());
    let stored = store.clone();
    tokio::task::spawn_blocking(move || {
        let mut runtime = runtime_for(base_url, 10, store);
        runtime.handle_ui(UiEvent::WindowShown);
        settle(&mut runtime);

        let view = runtime.view();
        assert_eq!(view.pagination.text, "Page 1 of 3 (23 total)");
        assert!(!view.pagination.prev_enabled);
        assert!(view.pagination.next_enabled);
        assert_eq!(view.alerts.len(), 10);
        assert_eq!(view.profile.as_ref().unwrap().initials, "AR");

        runtime.handle_ui(UiEvent::KeyPressed('n'));
        settle(&mut runtime);
        let view = runtime.view();
        assert_eq!(view.pagination.text, "Page 2 of 3 (23 total)");
        assert!(view.pagination.prev_enabled);
        assert!(view.alerts.iter().any(|a| a.id == 11));
        assert!(!view.alerts.iter().any(|a| a.id == 1));
        assert!(runtime.presenter().frames > 0);
        runtime.shutdown();
    })
    .await
    .unwrap();

    let identity = stored.identity().expect("identity remembered");
    assert_eq!(identity.id, USER);
    assert_eq!(identity.name, "Asha Rao");
}

/// In-memory stand-in for the monitored URL endpoints.
#[derive(Clone, Default)]
struct FakeUrls {
    sites: Arc<Mutex<Vec<Value>>>,
}

impl Respond for FakeUrls {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut sites = self.sites.lock().unwrap();
        match request.method.as_str() {
            "GET" => ResponseTemplate::new(200).set_body_json(json!({"urls": sites.clone()})),
            "POST" => {
                let body: Value = serde_json::from_slice(&request.body).unwrap();
                let site = json!({
                    "id": 41 + sites.len() as u64,
                    "url": body["url"],
                    "website_name": body["website_name"],
                    "scraper_type": body["scraper_type"],
                    "last_scraped_at": null,
                    "is_active": true
                });
                sites.push(site.clone());
                ResponseTemplate::new(201)
                    .set_body_json(json!({"message": "URL added", "monitored_url": site}))
            }
            "DELETE" => {
                let id: u64 = request
                    .url
                    .path()
                    .rsplit('/')
                    .next()
                    .and_then(|raw| raw.parse().ok())
                    .unwrap();
                sites.retain(|site| site["id"] != id);
                ResponseTemplate::new(200).set_body_json(json!({"message": "URL removed"}))
            }
            _ => ResponseTemplate::new(405),
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn add_then_remove_a_website() {
    let server = MockServer::start().await;
    mount_summary_and_activity(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/dashboard/{USER}/alerts")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "alerts": [], "total": 0, "page": 1, "per_page": 20
        })))
        .mount(&server)
        .await;
    let fake = FakeUrls::default();
    Mock::given(path_regex(format!(r"^/api/preferences/{USER}/urls(/\d+)?$")))
        .respond_with(fake.clone())
        .mount(&server)
        .await;

    let base_url = server.uri();
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path());
    tokio::task::spawn_blocking(move || {
        let mut runtime = runtime_for(base_url, 20, store);
        runtime.handle_ui(UiEvent::WindowShown);
        settle(&mut runtime);
        assert!(runtime.view().sites.is_empty());

        runtime.handle_ui(UiEvent::AddUrlSubmitted {
            url: "https://upsc.gov.in/examinations".to_string(),
            website_name: "UPSC Official".to_string(),
        });
        settle(&mut runtime);
        let view = runtime.view();
        assert_eq!(view.sites.len(), 1);
        assert_eq!(view.sites[0].id, 41);
        assert_eq!(view.sites[0].website_name, "UPSC Official");
        assert!(toast_texts(&runtime).contains(&"URL added.".to_string()));

        runtime.handle_ui(UiEvent::ButtonClicked {
            control: BUTTON_REMOVE_SITE,
            item: Some(41),
        });
        settle(&mut runtime);
        assert!(runtime.view().sites.is_empty());
        assert!(toast_texts(&runtime).contains(&"Website removed.".to_string()));
        runtime.shutdown();
    })
    .await
    .unwrap();

    assert!(fake.sites.lock().unwrap().is_empty());
}
