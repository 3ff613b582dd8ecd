use super::*;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use finstatements_lib::ServiceConfig;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATEMENT_PATH: &str = "/api/v3/income-statement/AAPL";

fn three_years() -> Value {
    json!([
        {"date": "2020-12-31", "revenue": 600000, "netIncome": 60000,
         "grossProfit": 200000, "eps": 1.5, "operatingIncome": 100000},
        {"date": "2021-12-31", "revenue": 800000, "netIncome": 80000,
         "grossProfit": 300000, "eps": 2.0, "operatingIncome": 200000},
        {"date": "2022-12-31", "revenue": 1000000, "netIncome": 100000,
         "grossProfit": 400000, "eps": 2.5, "operatingIncome": 300000}
    ])
}

fn origins() -> Vec<HeaderValue> {
    vec![
        HeaderValue::from_static("http://127.0.0.1"),
        HeaderValue::from_static("http://localhost"),
    ]
}

fn app_for(server: &MockServer) -> Router {
    let config = ServiceConfig::new("test-key").with_base_url(&server.uri());
    router(AppState::new(StatementQueryService::new(&config)), origins())
}

async fn upstream_returning(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATEMENT_PATH))
        .and(query_param("period", "annual"))
        .and(query_param("apikey", "test-key"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn years(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|s| s["date"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn root_says_hello() {
    let server = MockServer::start().await;
    let response = get(app_for(&server), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"message": "Hello World"}));
}

#[tokio::test]
async fn cors_preflight_echoes_allowed_origin() {
    let server = MockServer::start().await;
    let response = app_for(&server)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/")
                .header(header::ORIGIN, "http://127.0.0.1")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://127.0.0.1"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn cors_ignores_unknown_origin() {
    let server = MockServer::start().await;
    let response = app_for(&server)
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "http://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn income_statements_renames_fields() {
    let server = upstream_returning(ResponseTemplate::new(200).set_body_json(json!([{
        "date": "2022-12-31",
        "revenue": 1000000,
        "netIncome": 100000,
        "grossProfit": 400000,
        "eps": 2.5,
        "operatingIncome": 300000
    }])))
    .await;

    let response = get(app_for(&server), "/statements/income").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let statement = &body[0];
    assert_eq!(statement["date"], "2022-12-31");
    assert_eq!(statement["revenue"], 1000000.0);
    assert_eq!(statement["net_income"], 100000.0);
    assert_eq!(statement["gross_profit"], 400000.0);
    assert_eq!(statement["eps"], 2.5);
    assert_eq!(statement["operating_income"], 300000.0);
}

#[tokio::test]
async fn income_statements_default_to_date_descending() {
    let server = upstream_returning(ResponseTemplate::new(200).set_body_json(three_years())).await;

    let body = body_json(get(app_for(&server), "/statements/income").await).await;
    assert_eq!(years(&body), vec!["2022-12-31", "2021-12-31", "2020-12-31"]);
}

#[tokio::test]
async fn filters_by_year_range() {
    let server = upstream_returning(ResponseTemplate::new(200).set_body_json(three_years())).await;

    let response = get(
        app_for(&server),
        "/statements/income?start_year=2021&end_year=2022",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(years(&body), vec!["2022-12-31", "2021-12-31"]);
}

#[tokio::test]
async fn filters_by_revenue_range() {
    let server = upstream_returning(ResponseTemplate::new(200).set_body_json(three_years())).await;

    let body = body_json(
        get(
            app_for(&server),
            "/statements/income?min_revenue=700000&max_revenue=900000",
        )
        .await,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["revenue"], 800000.0);
}

#[tokio::test]
async fn filters_by_min_net_income() {
    let server = upstream_returning(ResponseTemplate::new(200).set_body_json(three_years())).await;

    let body = body_json(get(app_for(&server), "/statements/income?min_net_income=90000").await).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["net_income"], 100000.0);
}

#[tokio::test]
async fn no_match_is_an_empty_list() {
    let server = upstream_returning(ResponseTemplate::new(200).set_body_json(three_years())).await;

    let response = get(app_for(&server), "/statements/income?min_revenue=2000000").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn zero_bounds_have_no_effect() {
    let server = upstream_returning(ResponseTemplate::new(200).set_body_json(three_years())).await;

    let body = body_json(
        get(
            app_for(&server),
            "/statements/income?min_revenue=0&max_net_income=0",
        )
        .await,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn sorts_by_requested_field_and_order() {
    let server = upstream_returning(ResponseTemplate::new(200).set_body_json(three_years())).await;

    let body = body_json(
        get(
            app_for(&server),
            "/statements/income?sort_by=net_income&order=asc",
        )
        .await,
    )
    .await;
    let incomes: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["net_income"].as_f64().unwrap())
        .collect();
    assert_eq!(incomes, vec![60000.0, 80000.0, 100000.0]);
}

#[tokio::test]
async fn malformed_records_are_dropped() {
    let server = upstream_returning(ResponseTemplate::new(200).set_body_json(json!([
        {"date": "2022-12-31", "revenue": 1, "netIncome": 1},
        {"date": "invalid-date", "revenue": 1, "netIncome": 1},
        {"date": "2021-12-31", "revenue": null, "netIncome": 1},
        {"date": "2020-12-31", "revenue": 1},
        "not an object"
    ])))
    .await;

    let response = get(app_for(&server), "/statements/income").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(years(&body), vec!["2022-12-31"]);
    assert_eq!(body[0]["gross_profit"], 0.0);
}

#[tokio::test]
async fn out_of_range_year_is_unprocessable() {
    let server = MockServer::start().await;

    let response = get(app_for(&server), "/statements/income?start_year=1800").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("start_year"));
}

#[tokio::test]
async fn unknown_sort_field_is_unprocessable() {
    let server = MockServer::start().await;

    let response = get(app_for(&server), "/statements/income?sort_by=eps").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["detail"].is_string());
}

#[tokio::test]
async fn non_numeric_bound_is_unprocessable() {
    let server = MockServer::start().await;

    let response = get(app_for(&server), "/statements/income?min_revenue=lots").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn upstream_error_status_is_500() {
    let server =
        upstream_returning(ResponseTemplate::new(500).set_body_string("Internal Server Error")).await;

    let response = get(app_for(&server), "/statements/income").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Failed to fetch income statements"));
}

#[tokio::test]
async fn upstream_non_list_is_500() {
    let server = upstream_returning(
        ResponseTemplate::new(200).set_body_json(json!({"Error Message": "Invalid API KEY."})),
    )
    .await;

    let response = get(app_for(&server), "/statements/income").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("expected a list"));
}

#[tokio::test]
async fn unknown_path_is_404() {
    let server = MockServer::start().await;

    let response = get(app_for(&server), "/foo/incomes/bar").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"detail": "Not Found"}));
}
