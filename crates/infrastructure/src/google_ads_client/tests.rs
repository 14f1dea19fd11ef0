use chrono::NaiveDate;
use updatemate_application::{AccountDirectory, ChangeEventQuery, ChangeLogSource};
use updatemate_core::{AppError, Credentials};
use updatemate_domain::{AccountId, DateRange};
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{GoogleAdsClient, GoogleAdsConfig};

fn client_for(base_url: &str, login_customer_id: Option<&str>) -> GoogleAdsClient {
    GoogleAdsClient::new(
        reqwest::Client::new(),
        GoogleAdsConfig {
            base_url: Url::parse(base_url).unwrap_or_else(|error| panic!("{error}")),
            api_version: "v16".to_owned(),
            developer_token: "dev-token".to_owned(),
            login_customer_id: login_customer_id
                .map(|id| AccountId::new(id).unwrap_or_else(|error| panic!("{error}"))),
            change_event_limit: 10_000,
        },
    )
}

fn credentials() -> Credentials {
    Credentials::new(
        "access-1",
        "refresh-1",
        "https://oauth2.googleapis.com/token",
        "client-1",
        Vec::new(),
        None,
    )
    .unwrap_or_else(|error| panic!("{error}"))
}

fn query(account_id: &str) -> ChangeEventQuery {
    ChangeEventQuery {
        account_id: AccountId::new(account_id).unwrap_or_else(|error| panic!("{error}")),
        range: DateRange::new(
            NaiveDate::from_ymd_opt(2026, 10, 10).unwrap_or_default(),
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap_or_default(),
        ),
    }
}

fn change_row(changed_at: &str, resource_name: &str) -> serde_json::Value {
    serde_json::json!({
        "changeEvent": {
            "resourceName": format!("customers/1234567890/changeEvents/{changed_at}"),
            "changeDateTime": changed_at,
            "changeResourceName": resource_name,
            "userEmail": "ops@example.com",
            "clientType": "GOOGLE_ADS_WEB_CLIENT",
            "changeResourceType": "CAMPAIGN"
        }
    })
}

#[tokio::test]
async fn lists_accessible_accounts_with_platform_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v16/customers:listAccessibleCustomers"))
        .and(header("authorization", "Bearer access-1"))
        .and(header("developer-token", "dev-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "resourceNames": ["customers/1234567890", "customers/555"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ids = client_for(&server.uri(), None)
        .list_accessible_accounts(&credentials())
        .await
        .unwrap_or_default();

    let ids: Vec<String> = ids.into_iter().map(String::from).collect();
    assert_eq!(ids, vec!["1234567890".to_owned(), "555".to_owned()]);
}

#[tokio::test]
async fn login_customer_id_header_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v16/customers:listAccessibleCustomers"))
        .and(header("login-customer-id", "9998887777"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let ids = client_for(&server.uri(), Some("999-888-7777"))
        .list_accessible_accounts(&credentials())
        .await;

    assert!(ids.is_ok_and(|ids| ids.is_empty()));
}

#[tokio::test]
async fn search_drains_every_batch_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v16/customers/1234567890/googleAds:searchStream"))
        .and(header("developer-token", "dev-token"))
        .and(body_string_contains(
            "change_event.change_date_time >= '2026-10-10 00:00:00'",
        ))
        .and(body_string_contains(
            "change_event.change_date_time <= '2026-10-17 23:59:59.999999'",
        ))
        .and(body_string_contains("ORDER BY change_event.change_date_time DESC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "results": [
                    change_row("2026-10-17 09:00:00.000000", "customers/1234567890/campaigns/3"),
                    change_row("2026-10-16 09:00:00.000000", "customers/1234567890/campaigns/2")
                ],
                "fieldMask": "changeEvent.resourceName,changeEvent.changeDateTime",
                "requestId": "req-1"
            },
            {
                "results": [
                    change_row("2026-10-15 09:00:00.000000", "customers/1234567890/campaigns/1")
                ],
                "fieldMask": "changeEvent.resourceName,changeEvent.changeDateTime",
                "requestId": "req-1"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let events = client_for(&server.uri(), None)
        .search_change_events(&credentials(), &query("1234567890"))
        .await
        .unwrap_or_default();

    let names: Vec<&str> = events.iter().map(|event| event.resource_name()).collect();
    assert_eq!(
        names,
        vec![
            "customers/1234567890/campaigns/3",
            "customers/1234567890/campaigns/2",
            "customers/1234567890/campaigns/1",
        ]
    );
    assert_eq!(events[0].changed_at(), "2026-10-17 09:00:00.000000");
    assert_eq!(events[0].user_email(), "ops@example.com");
    assert_eq!(events[0].client_type(), "GOOGLE_ADS_WEB_CLIENT");
    assert_eq!(events[0].resource_type(), "CAMPAIGN");
}

#[tokio::test]
async fn empty_stream_is_an_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v16/customers/1234567890/googleAds:searchStream"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let events = client_for(&server.uri(), None)
        .search_change_events(&credentials(), &query("1234567890"))
        .await;

    assert!(events.is_ok_and(|events| events.is_empty()));
}

#[tokio::test]
async fn rejected_query_reports_message_and_field_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v16/customers/42/googleAds:searchStream"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!([{
            "error": {
                "code": 400,
                "message": "Request contains an invalid argument.",
                "status": "INVALID_ARGUMENT",
                "details": [{
                    "@type": "type.googleapis.com/google.ads.googleads.v16.errors.GoogleAdsFailure",
                    "errors": [{
                        "errorCode": { "requestError": "INVALID_CUSTOMER_ID" },
                        "message": "Invalid customer ID '42'.",
                        "location": { "fieldPathElements": [{ "fieldName": "customer_id" }] }
                    }],
                    "requestId": "req-7"
                }]
            }
        }])))
        .mount(&server)
        .await;

    let result = client_for(&server.uri(), None)
        .search_change_events(&credentials(), &query("42"))
        .await;

    let Err(AppError::Upstream(rejection)) = result else {
        panic!("expected an upstream rejection");
    };
    assert_eq!(rejection.request_id.as_deref(), Some("req-7"));
    assert_eq!(rejection.errors[0].message, "Invalid customer ID '42'.");
    assert_eq!(rejection.errors[0].field_path.as_deref(), Some("customer_id"));
}

#[tokio::test]
async fn failure_inside_stream_discards_partial_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v16/customers/1234567890/googleAds:searchStream"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "results": [change_row("2026-10-17 09:00:00", "customers/1234567890/campaigns/3")] },
            { "error": { "code": 500, "message": "Internal error encountered.", "status": "INTERNAL" } }
        ])))
        .mount(&server)
        .await;

    let result = client_for(&server.uri(), None)
        .search_change_events(&credentials(), &query("1234567890"))
        .await;

    assert!(matches!(result, Err(AppError::Upstream(_))));
}

#[tokio::test]
async fn refused_token_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v16/customers:listAccessibleCustomers"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "code": 401, "message": "Request had invalid authentication credentials.", "status": "UNAUTHENTICATED" }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server.uri(), None)
        .list_accessible_accounts(&credentials())
        .await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn unreachable_platform_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|error| panic!("{error}"));
    let address = listener
        .local_addr()
        .unwrap_or_else(|error| panic!("{error}"));
    drop(listener);

    let result = client_for(&format!("http://{address}"), None)
        .search_change_events(&credentials(), &query("1234567890"))
        .await;

    assert!(matches!(result, Err(AppError::Transport(_))));
}

#[tokio::test]
async fn bare_server_error_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v16/customers/1234567890/googleAds:searchStream"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_string("<html>Service Unavailable internal host gfe-12</html>"),
        )
        .mount(&server)
        .await;

    let result = client_for(&server.uri(), None)
        .search_change_events(&credentials(), &query("1234567890"))
        .await;

    let Err(AppError::Transport(message)) = result else {
        panic!("expected a transport error");
    };
    assert!(!message.contains("gfe-12"));
}

#[tokio::test]
async fn server_error_with_platform_failure_stays_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v16/customers/1234567890/googleAds:searchStream"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!([{
            "error": {
                "code": 500,
                "message": "Internal error encountered.",
                "status": "INTERNAL",
                "details": [{
                    "errors": [{ "message": "An internal error has occurred." }],
                    "requestId": "req-500"
                }]
            }
        }])))
        .mount(&server)
        .await;

    let result = client_for(&server.uri(), None)
        .search_change_events(&credentials(), &query("1234567890"))
        .await;

    let Err(AppError::Upstream(rejection)) = result else {
        panic!("expected an upstream rejection");
    };
    assert_eq!(rejection.request_id.as_deref(), Some("req-500"));
    assert_eq!(rejection.errors[0].message, "An internal error has occurred.");
}
