use catalog_client::{CatalogClient, CatalogError};
use myticket_common::{EventId, Money, TierLabel};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_body() -> serde_json::Value {
    serde_json::json!({
        "events": [{
            "event_id": 1,
            "display_name": "Addis Jazz Night",
            "event_description": "Live jazz at Ghion",
            "poster": "https://cdn/jazz.jpg",
            "location": "Ghion Hotel, Addis Ababa",
            "event_date_time": "2025-11-02 19:30:00",
            "position": "top",
            "tickets": [
                {"ticket_type": "Regular", "price": 100},
                {"ticket_type": "VIP", "price": 250}
            ]
        }],
        "places": [{
            "place_id": 9,
            "place_name": "Unity Park",
            "place_photo": "https://cdn/unity.jpg",
            "description": "Park and zoo at the palace"
        }]
    })
}

#[tokio::test]
async fn fetch_catalog_decodes_events_and_places() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/myticket/app/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .mount(&server)
        .await;

    let client = CatalogClient::new(&format!("{}/myticket/app/", server.uri()));
    let catalog = client.fetch_catalog().await.unwrap();

    assert_eq!(catalog.events.len(), 1);
    assert_eq!(catalog.places.len(), 1);

    let event = catalog.event(&EventId::from("1")).unwrap();
    assert_eq!(event.display_name, "Addis Jazz Night");
    assert_eq!(
        event.tier(TierLabel::Regular).unwrap().price,
        Money::from_cents(10_000)
    );
}

#[tokio::test]
async fn non_2xx_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = CatalogClient::new(&server.uri());
    let err = client.fetch_catalog().await.unwrap_err();
    match err {
        CatalogError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = CatalogClient::new(&server.uri());
    let err = client.fetch_catalog().await.unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)), "got {err:?}");
}
