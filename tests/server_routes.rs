use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use regional_dashboard::chart::ChartStyle;
use regional_dashboard::server::{AppState, router};
use regional_dashboard::{Dashboard, DashboardConfig, Dataset};
use tower::ServiceExt;

fn app() -> axum::Router {
    let dashboard = Dashboard::new(Dataset::load().unwrap(), ChartStyle::default());
    router(AppState::new(dashboard, DashboardConfig::default()))
}

async fn get(uri: &str) -> (StatusCode, String) {
    let resp = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(uri: &str) -> serde_json::Value {
    let (status, body) = get(uri).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn options_endpoint_lists_regions() {
    let v = get_json("/api/options").await;
    let regions = v["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 6);
    assert_eq!(regions[0]["name"], "Africa");
    assert_eq!(v["years"]["step"], 5);
}

#[tokio::test]
async fn views_default_to_first_region() {
    let v = get_json("/api/views").await;
    assert_eq!(v["selection"]["region"], "Africa");
    assert_eq!(v["chart"]["title"], "Africa");
    assert_eq!(v["table"]["rows"].as_array().unwrap().len(), 36);
    assert_eq!(v["summary"]["totals"][0]["label"], "Total Cars");
}

#[tokio::test]
async fn views_apply_selection_and_sort() {
    let v = get_json("/api/views?region=Asia&country=Korea%2C%20Rep.&units=euro&from=1992&to=2007&sort=value:desc").await;
    assert_eq!(v["chart"]["title"], "Asia, Korea, Rep.");
    let rows = v["table"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 4);
    let raw: Vec<f64> = rows.iter().map(|r| r["raw_value"].as_f64().unwrap()).collect();
    assert!(raw.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn page_param_limits_table_rows() {
    let all = get_json("/api/views?region=Europe").await;
    assert_eq!(all["table"]["rows"].as_array().unwrap().len(), 36);
    assert_eq!(all["page_count"], 3);
    assert!(all.get("page").is_none());

    let first = get_json("/api/views?region=Europe&sort=year").await;
    let last = get_json("/api/views?region=Europe&sort=year&page=2").await;
    let rows = last["table"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(last["page"], 2);
    assert_eq!(rows[0], first["table"]["rows"][30]);

    let past_end = get_json("/api/views?region=Europe&page=9").await;
    assert!(past_end["table"]["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_units_param_means_none() {
    let v = get_json("/api/views?region=Europe&units=").await;
    assert_eq!(v["chart"]["title"], "Select a unit");
    assert!(v["table"]["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_input_is_bad_request() {
    for uri in [
        "/api/views?region=Atlantis",
        "/api/views?region=Europe&country=Kenya",
        "/api/views?units=horses",
        "/api/views?from=2000&to=1990",
        "/api/views?sort=country",
        "/chart.svg?region=Atlantis",
    ] {
        let (status, _) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn chart_is_svg() {
    let (status, body) = get("/chart.svg?region=Europe").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<svg"));
}

#[tokio::test]
async fn page_renders_controls_cards_and_table() {
    let (status, body) = get("/?region=Europe&sort=value:desc").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Regional dashboard</title>"));
    assert!(body.contains("Total Euro"));
    assert!(body.contains("name=\"unit_cars\""));
    assert!(body.contains("<svg"));
    assert!(body.contains("page 1 of 3"));
    assert!(body.contains("value &#9660;"));
}

#[tokio::test]
async fn page_form_drops_country_of_other_region() {
    // Switching region in the form keeps the old country in the query.
    let (status, body) = get("/?form=1&region=Asia&country=Norway&unit_euro=1&from=1952&to=2007").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<option value=\"\">(all)</option>"));
    assert!(!body.contains("value=\"Norway\" selected"));
    assert!(body.contains("page 1 of 1"));
}
