use std::sync::Arc;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use cinecatalog::app::{ComponentRegistry, build_router};
use cinecatalog::clients::GenerationError;
use cinecatalog::observability::Telemetry;
use cinecatalog::pipeline::{BatchSizes, SentimentPipeline, TextSource};
use cinecatalog::store::MemoryCatalogDao;
use cinecatalog::test_support::{KeywordScorer, StubGenerator};
use serde_json::{Value, json};

fn server_with(generator: StubGenerator) -> TestServer {
    server_sharing(Arc::new(generator))
}

fn server_sharing(generator: Arc<StubGenerator>) -> TestServer {
    TestServer::new(build_router(registry(generator))).expect("test server")
}

fn server_with_image_limit(max_image_bytes: usize) -> TestServer {
    let registry =
        registry(Arc::new(StubGenerator::echo())).with_max_image_bytes(max_image_bytes);
    TestServer::new(build_router(registry)).expect("test server")
}

fn registry(generator: Arc<StubGenerator>) -> ComponentRegistry {
    let telemetry = Telemetry::without_tracing().expect("telemetry");
    let text_source = TextSource::new(generator, BatchSizes::default())
        .with_metrics(telemetry.metrics());
    ComponentRegistry::from_parts(
        telemetry,
        Arc::new(MemoryCatalogDao::new()),
        text_source,
        SentimentPipeline::new(Arc::new(KeywordScorer)),
    )
}

/// JPEG magic followed by filler, `len` bytes in total.
fn jpeg(len: usize) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.resize(len, 0x5A);
    bytes
}

fn matrix_with_poster(poster: &[u8]) -> Value {
    let mut body = matrix();
    body["poster"] = json!(STANDARD.encode(poster));
    body
}

fn matrix() -> Value {
    json!({
        "title": "The Matrix",
        "imdb_link": "https://www.imdb.com/title/tt0133093/",
        "genre": "Science Fiction",
        "year": 1999
    })
}

fn keanu() -> Value {
    json!({
        "name": "Keanu Reeves",
        "gender": "Male",
        "age": 60,
        "imdb_link": "https://www.imdb.com/name/nm0000206/"
    })
}

async fn create(server: &TestServer, path: &str, body: &Value) -> i64 {
    let response = server.post(path).json(body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().expect("id")
}

#[tokio::test]
async fn movie_crud_round() {
    let server = server_with(StubGenerator::echo());
    let id = create(&server, "/movies", &matrix()).await;

    let listed = server.get("/movies").await.json::<Value>();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["title"], "The Matrix");
    assert_eq!(listed[0]["has_poster"], false);

    let mut changed = matrix();
    changed["title"] = json!("The Matrix Reloaded");
    changed["year"] = json!(2003);
    let updated = server.put(&format!("/movies/{id}")).json(&changed).await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["year"], 2003);

    server
        .delete(&format!("/movies/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete(&format!("/movies/{id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn invalid_movie_reports_every_field() {
    let server = server_with(StubGenerator::echo());

    let response = server
        .post("/movies")
        .json(&json!({"title": "  ", "genre": "Drama", "year": 1700, "imdb_link": "imdb"}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    assert_eq!(body["fields"]["title"], "is required");
    assert!(body["fields"]["year"].as_str().is_some());
    assert!(body["fields"]["imdb_link"].as_str().is_some());
    assert!(body["fields"].get("genre").is_none());
}

#[tokio::test]
async fn poster_is_stored_and_served() {
    let server = server_with(StubGenerator::echo());
    let mut body = matrix();
    // PNG signature followed by a byte of payload.
    body["poster"] = json!("iVBORw0KGgoA");
    let id = create(&server, "/movies", &body).await;

    let response = server.get(&format!("/movies/{id}/poster")).await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(
        response.as_bytes().to_vec(),
        vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00]
    );
}

#[tokio::test]
async fn missing_poster_is_not_found() {
    let server = server_with(StubGenerator::echo());
    let id = create(&server, "/movies", &matrix()).await;

    server
        .get(&format!("/movies/{id}/poster"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn invalid_base64_image_is_bad_request() {
    let server = server_with(StubGenerator::echo());
    let mut body = keanu();
    body["photo"] = json!("%%%");

    server
        .post("/actors")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn movie_details_carry_scored_reviews_and_cast() {
    let server = server_with(StubGenerator::fixed([
        "I loved this movie!",
        "Terrible, a waste of time.",
        "It was okay.",
    ]));
    let movie_id = create(&server, "/movies", &matrix()).await;
    let actor_id = create(&server, "/actors", &keanu()).await;
    server
        .post("/actor-movies")
        .json(&json!({"actor_id": actor_id, "movie_id": movie_id}))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get(&format!("/movies/{movie_id}")).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["movie"]["title"], "The Matrix");
    assert_eq!(body["actors"][0]["name"], "Keanu Reeves");
    let labels: Vec<&str> = body["reviews"]
        .as_array()
        .expect("reviews")
        .iter()
        .map(|item| item["label"].as_str().expect("label"))
        .collect();
    assert_eq!(labels, ["Positive", "Negative", "Neutral"]);
    // Keyword scores are 1/2, -2/3 and 0.
    let expected = (0.5 - 2.0 / 3.0) / 3.0;
    assert!((body["overall_score"].as_f64().expect("score") - expected).abs() < 1e-9);
    assert_eq!(body["overall_label"], "Negative");
}

#[tokio::test]
async fn actor_details_fall_back_to_error_line() {
    let server = server_with(StubGenerator::failing(GenerationError::Status {
        status: 429,
        body: "rate limited".to_string(),
    }));
    let actor_id = create(&server, "/actors", &keanu()).await;

    let response = server.get(&format!("/actors/{actor_id}")).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    let tweets = body["tweets"].as_array().expect("tweets");
    assert_eq!(tweets.len(), 1);
    assert_eq!(
        tweets[0]["text"],
        "Error generating tweets: service returned status 429: rate limited"
    );
    assert_eq!(body["overall_score"], tweets[0]["score"]);
    assert_eq!(body["movies"], json!([]));
}

#[tokio::test]
async fn details_for_unknown_record_is_not_found() {
    let generator = Arc::new(StubGenerator::echo());
    let server = server_sharing(Arc::clone(&generator));

    server.get("/movies/42").await.assert_status_not_found();
    server.get("/actors/42").await.assert_status_not_found();
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn poster_sized_upload_fits_the_default_limit() {
    let server = server_with(StubGenerator::echo());
    let poster = jpeg(1_600_000);
    let id = create(&server, "/movies", &matrix_with_poster(&poster)).await;

    let served = server.get(&format!("/movies/{id}/poster")).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().len(), poster.len());
}

#[tokio::test]
async fn image_limit_accepts_up_to_the_cap_and_rejects_beyond_it() {
    let server = server_with_image_limit(4096);

    create(&server, "/movies", &matrix_with_poster(&jpeg(4096))).await;

    let just_over = server
        .post("/movies")
        .json(&matrix_with_poster(&jpeg(4097)))
        .await;
    just_over.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(just_over.json::<Value>()["error"].as_str().unwrap().contains("poster"));

    let mut photo = keanu();
    photo["photo"] = json!(STANDARD.encode(jpeg(200_000)));
    let oversized_body = server.post("/actors").json(&photo).await;
    oversized_body.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(oversized_body.json::<Value>()["error"].is_string());

    let listed = server.get("/movies").await.json::<Value>();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn malformed_bodies_and_paths_get_json_errors() {
    let server = server_with(StubGenerator::echo());

    let truncated = server
        .post("/actor-movies")
        .bytes(Bytes::from_static(br#"{"actor_id": "#))
        .content_type("application/json")
        .await;
    truncated.assert_status(StatusCode::BAD_REQUEST);
    assert!(truncated.json::<Value>()["error"].is_string());

    let missing_field = server
        .post("/actor-movies")
        .json(&json!({"actor_id": 1}))
        .await;
    missing_field.assert_status(StatusCode::BAD_REQUEST);
    assert!(
        missing_field.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .contains("movie_id")
    );

    let bad_id = server.delete("/actor-movies/first").await;
    bad_id.assert_status(StatusCode::BAD_REQUEST);
    assert!(bad_id.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn duplicate_link_conflicts_and_unknown_ends_are_not_found() {
    let server = server_with(StubGenerator::echo());
    let movie_id = create(&server, "/movies", &matrix()).await;
    let actor_id = create(&server, "/actors", &keanu()).await;
    let link = json!({"actor_id": actor_id, "movie_id": movie_id});

    server.post("/actor-movies").json(&link).await.assert_status(StatusCode::CREATED);
    let duplicate = server.post("/actor-movies").json(&link).await;
    duplicate.assert_status(StatusCode::CONFLICT);
    assert!(duplicate.json::<Value>()["error"].as_str().is_some());

    server
        .post("/actor-movies")
        .json(&json!({"actor_id": actor_id, "movie_id": 999}))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn links_are_listed_with_names_and_removed() {
    let server = server_with(StubGenerator::echo());
    let movie_id = create(&server, "/movies", &matrix()).await;
    let actor_id = create(&server, "/actors", &keanu()).await;
    let link_id = create(
        &server,
        "/actor-movies",
        &json!({"actor_id": actor_id, "movie_id": movie_id}),
    )
    .await;

    let listed = server.get("/actor-movies").await.json::<Value>();
    assert_eq!(listed[0]["actor_name"], "Keanu Reeves");
    assert_eq!(listed[0]["movie_title"], "The Matrix");

    let options = server.get("/actor-movies/options").await.json::<Value>();
    assert_eq!(options["actors"], json!([{"id": actor_id, "name": "Keanu Reeves"}]));
    assert_eq!(options["movies"], json!([{"id": movie_id, "title": "The Matrix"}]));

    server
        .delete(&format!("/actor-movies/{link_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(server.get("/actor-movies").await.json::<Value>(), json!([]));
}

#[tokio::test]
async fn deleting_actor_drops_their_links() {
    let server = server_with(StubGenerator::echo());
    let movie_id = create(&server, "/movies", &matrix()).await;
    let actor_id = create(&server, "/actors", &keanu()).await;
    create(
        &server,
        "/actor-movies",
        &json!({"actor_id": actor_id, "movie_id": movie_id}),
    )
    .await;

    server
        .delete(&format!("/actors/{actor_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(server.get("/actor-movies").await.json::<Value>(), json!([]));
}

#[tokio::test]
async fn health_and_metrics_endpoints() {
    let server = server_with(StubGenerator::failing(GenerationError::MissingContent));
    let movie_id = create(&server, "/movies", &matrix()).await;
    server.get(&format!("/movies/{movie_id}")).await.assert_status_ok();

    server.get("/health/live").await.assert_json(&json!({"status": "live"}));
    server.get("/health/ready").await.assert_json(&json!({"status": "ready"}));

    let metrics = server.get("/metrics").await.text();
    assert!(metrics.contains("cinecatalog_details_views_total{kind=\"review\"} 1"));
    assert!(metrics.contains("cinecatalog_text_generation_failures_total{kind=\"review\"} 1"));
}
