//! OpenWeatherMap provider against a mock HTTP server.

use fulfillment_core::{
    LookupError, WeatherConfig, WeatherProvider, provider::openweather::OpenWeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [
            { "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }
        ],
        "base": "stations",
        "main": {
            "temp": 14.22,
            "feels_like": 13.61,
            "temp_min": 12.8,
            "temp_max": 15.5,
            "pressure": 1012,
            "humidity": 77
        },
        "visibility": 10000,
        "wind": { "speed": 4.63, "deg": 240 },
        "clouds": { "all": 75 },
        "dt": 1_700_000_000,
        "sys": { "country": "GB" },
        "timezone": 0,
        "id": 2_643_743,
        "name": "London",
        "cod": 200
    })
}

fn create_test_provider(mock_server: &MockServer) -> OpenWeatherProvider {
    let config = WeatherConfig {
        base_url: format!("{}/data/2.5/weather", mock_server.uri()),
        timeout_secs: 5,
        ..Default::default()
    };
    OpenWeatherProvider::new("TEST_KEY".to_string(), &config).expect("Failed to create provider")
}

async fn setup_weather_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn current_weather_success() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_current_response()),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let report = provider
        .current_weather("london")
        .await
        .expect("lookup should succeed");

    assert_eq!(report.city_name, "London");
    assert_eq!(report.description, "broken clouds");
    assert!((report.temperature_c - 14.22).abs() < 1e-9);
    assert_eq!(report.humidity_pct, 77);
    assert!((report.wind_speed_mps - 4.63).abs() < 1e-9);
}

#[tokio::test]
async fn sends_city_key_and_metric_units() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "São Paulo"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let result = provider.current_weather("São Paulo").await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn not_found_is_a_request_failure() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(404)
            .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("Atlantis").await.unwrap_err();

    assert!(matches!(err, LookupError::Status { .. }), "got {err:?}");
    assert_eq!(
        err.user_message(),
        "Sorry, I couldn't get weather for Atlantis right now. Please try again later."
    );
}

#[tokio::test]
async fn server_error_is_a_request_failure() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(&mock_server, ResponseTemplate::new(503)).await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("Paris").await.unwrap_err();

    assert!(matches!(err, LookupError::Status { .. }), "got {err:?}");
}

#[tokio::test]
async fn unreachable_upstream_is_a_request_failure() {
    let config = WeatherConfig {
        // Port 9 (discard) is not expected to accept HTTP.
        base_url: "http://127.0.0.1:9/data/2.5/weather".to_string(),
        timeout_secs: 2,
        ..Default::default()
    };
    let provider = OpenWeatherProvider::new("TEST_KEY".into(), &config).expect("provider");

    let err = provider.current_weather("Paris").await.unwrap_err();

    assert!(matches!(err, LookupError::Request { .. }), "got {err:?}");
    assert!(!err.to_string().contains("TEST_KEY"));
}

#[tokio::test]
async fn missing_field_is_a_data_error() {
    let mock_server = MockServer::start().await;

    let mut body = sample_current_response();
    body.as_object_mut().expect("object").remove("wind");
    setup_weather_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("London").await.unwrap_err();

    assert!(matches!(err, LookupError::Data(_)), "got {err:?}");
    assert_eq!(
        err.user_message(),
        "Oops, something went wrong with the weather data. Please try again."
    );
}

#[tokio::test]
async fn empty_conditions_list_is_a_data_error() {
    let mock_server = MockServer::start().await;

    let mut body = sample_current_response();
    body["weather"] = serde_json::json!([]);
    setup_weather_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("London").await.unwrap_err();

    assert!(matches!(err, LookupError::Data(_)), "got {err:?}");
}

#[tokio::test]
async fn non_json_body_is_a_request_failure() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("Paris").await.unwrap_err();

    assert!(matches!(err, LookupError::Request { .. }), "got {err:?}");
    assert_eq!(
        err.user_message(),
        "Sorry, I couldn't get weather for Paris right now. Please try again later."
    );
}

#[tokio::test]
async fn truncated_body_is_a_request_failure() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string(r#"{"name":"Paris","main":{"#),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("Paris").await.unwrap_err();

    assert!(matches!(err, LookupError::Request { .. }), "got {err:?}");
}

#[tokio::test]
async fn mistyped_field_is_a_data_error() {
    let mock_server = MockServer::start().await;

    let mut body = sample_current_response();
    body["main"]["temp"] = serde_json::json!("warm");
    setup_weather_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("London").await.unwrap_err();

    assert!(matches!(err, LookupError::Data(_)), "got {err:?}");
}
