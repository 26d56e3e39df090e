use idibon::IdibonClient;
use idibon::builders::{
    Annotation, Classification, Collection, ConfidenceThreshold, Document, Label, Subtask, Task,
    TaskScope, TuningDictionary,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IdibonClient {
    IdibonClient::builder("test-key")
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

async fn expect_call(server: &MockServer, verb: &str, route: &str, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(route))
        .and(body_json(body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn create_collection_puts_envelope() {
    let server = MockServer::start().await;
    expect_call(
        &server,
        "PUT",
        "/my%20reviews",
        json!({"collection": {"name": "my reviews", "description": "Product reviews", "is_active": true}}),
    )
    .await;

    let options = Collection::for_name("my reviews", "Product reviews")
        .unwrap()
        .set_as_active()
        .to_options()
        .unwrap();
    client_for(&server).create_collection(&options).await.unwrap();
}

#[tokio::test]
async fn update_and_delete_collection() {
    let server = MockServer::start().await;
    expect_call(&server, "POST", "/reviews", json!({"collection": {"description": "New"}})).await;
    expect_call(&server, "DELETE", "/reviews", json!({"collection": true})).await;

    let client = client_for(&server);
    client.update_collection("reviews", "New").await.unwrap();
    client.delete_collection("reviews").await.unwrap();
}

#[tokio::test]
async fn document_operations_encode_names() {
    let server = MockServer::start().await;
    expect_call(&server, "GET", "/unclear%2Fname/requires%2Fencoding", json!({})).await;
    expect_call(
        &server,
        "PUT",
        "/reviews/doc-1",
        json!({"document": {"content": "great album", "name": "doc-1"}}),
    )
    .await;
    expect_call(&server, "DELETE", "/reviews/doc-1", json!({})).await;

    let client = client_for(&server);
    client
        .fetch_document("unclear/name", "requires/encoding")
        .await
        .unwrap();
    let document = Document::for_content("great album").with_name("doc-1").to_options().unwrap();
    client.create_document("reviews", "doc-1", &document).await.unwrap();
    client.delete_document("reviews", "doc-1").await.unwrap();
}

#[tokio::test]
async fn create_documents_posts_to_bulk_path() {
    let server = MockServer::start().await;
    expect_call(
        &server,
        "POST",
        "/reviews/*",
        json!({"documents": [{"content": "one"}, {"content": "two"}]}),
    )
    .await;

    let documents = vec![
        Document::for_content("one").to_options().unwrap(),
        Document::for_content("two").to_options().unwrap(),
    ];
    client_for(&server).create_documents("reviews", &documents).await.unwrap();
}

#[tokio::test]
async fn task_lifecycle() {
    let server = MockServer::start().await;
    expect_call(
        &server,
        "PUT",
        "/reviews/sentiment",
        json!({"task": {"name": "sentiment", "description": "Overall", "scope": "document", "config": {}}}),
    )
    .await;
    expect_call(&server, "POST", "/reviews/sentiment", json!({"task": {"description": "Tone"}})).await;
    expect_call(&server, "DELETE", "/reviews/sentiment", json!({"task": true})).await;

    let client = client_for(&server);
    let task = Task::for_name("sentiment", "Overall", TaskScope::Document)
        .unwrap()
        .to_options()
        .unwrap();
    client.create_task("reviews", &task).await.unwrap();
    client
        .update_task("reviews", "sentiment", &json!({"description": "Tone"}))
        .await
        .unwrap();
    client.delete_task("reviews", "sentiment").await.unwrap();
}

#[tokio::test]
async fn label_operations() {
    let server = MockServer::start().await;
    expect_call(
        &server,
        "POST",
        "/reviews/sentiment",
        json!({"labels": [{"name": "positive", "description": "Happy"}]}),
    )
    .await;
    expect_call(&server, "DELETE", "/reviews/sentiment", json!({"label": "negative"})).await;

    let client = client_for(&server);
    let labels = Label::new()
        .add_described_label("positive", "Happy")
        .unwrap()
        .to_options()
        .unwrap();
    client.add_task_labels("reviews", "sentiment", &labels).await.unwrap();
    client.remove_task_label("reviews", "sentiment", "negative").await.unwrap();
}

#[tokio::test]
async fn task_config_operations() {
    let server = MockServer::start().await;
    expect_call(
        &server,
        "POST",
        "/music/genre",
        json!({"task": {"config": {"tuning": {"country": {"(?i)banjo": 0.9}}}}}),
    )
    .await;
    expect_call(
        &server,
        "POST",
        "/music/genre",
        json!({"task": {"config": {"confidence_thresholds": {"labels": {"pop": {"suggested": 0.4}}}}}}),
    )
    .await;
    expect_call(
        &server,
        "POST",
        "/music/genre",
        json!({"task": {"config": {"sub_tasks": {"pop": ["mood"]}}}}),
    )
    .await;

    let client = client_for(&server);
    let pattern = idibon::builders::PhrasePattern::new("banjo")
        .unwrap()
        .case_insensitive(true);
    let tuning = TuningDictionary::new()
        .add_dict("country", pattern, 0.9)
        .unwrap()
        .to_options()
        .unwrap();
    client.set_tuning_dictionary("music", "genre", &tuning).await.unwrap();

    let thresholds = ConfidenceThreshold::new()
        .add_threshold("pop", 0.4)
        .unwrap()
        .to_options()
        .unwrap();
    client
        .set_confidence_thresholds("music", "genre", &thresholds)
        .await
        .unwrap();

    let subtasks = Subtask::new().add_subtask("pop", ["mood"]).unwrap().to_options().unwrap();
    client.create_subtasks("music", "genre", &subtasks).await.unwrap();
}

#[tokio::test]
async fn annotation_operations() {
    let server = MockServer::start().await;
    expect_call(
        &server,
        "POST",
        "/music/song-1",
        json!({"annotations": [{"task": "genre", "label": "pop", "provenance": "bootstrapped"}]}),
    )
    .await;
    expect_call(&server, "DELETE", "/music/song-1", json!({"annotation": "a-123"})).await;

    let client = client_for(&server);
    let annotations = Annotation::for_label("genre", "pop")
        .unwrap()
        .bootstrapped()
        .to_options()
        .unwrap();
    client
        .create_annotations("music", "song-1", &annotations)
        .await
        .unwrap();
    client.delete_annotation("music", "song-1", "a-123").await.unwrap();
}

#[tokio::test]
async fn classification_sends_raw_options() {
    let server = MockServer::start().await;
    expect_call(&server, "GET", "/music/genre", json!({"content": "three chords and the truth"}))
        .await;

    let options = Classification::new()
        .with_content("three chords and the truth")
        .to_options()
        .unwrap();
    client_for(&server)
        .create_classification("music", "genre", &options)
        .await
        .unwrap();
}
