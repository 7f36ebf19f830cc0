use resource_query::{Client, Endpoint, Error, QueryBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Deserialize, Debug, PartialEq)]
struct Article {
    id: i64,
    title: String,
}

fn articles(server: &MockServer) -> QueryBuilder<Endpoint<Article>> {
    QueryBuilder::with_client(
        Endpoint::new(&format!("{}/articles", server.uri())),
        Client::default(),
    )
}

fn list_body() -> Value {
    json!({
        "data": [
            {"id": 1, "title": "First"},
            {"id": 2, "title": "Second"}
        ],
        "total": 2
    })
}

#[tokio::test]
async fn get_wraps_records_and_binds_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(header("accept", "application/json"))
        .and(query_param("filters[status][]", "published"))
        .and(query_param("limit", "15"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut query = articles(&server);
    query.where_("status", "published");
    let fetched = query.get().await.unwrap();

    assert_eq!(fetched.collection.len(), 2);
    assert!(fetched.collection.iter().all(|a| a.exists()));
    assert_eq!(fetched.collection.models()[1].attributes().title, "Second");
    assert_eq!(fetched.payload["total"], json!(2));

    let bound = fetched.collection.query().unwrap();
    assert_eq!(bound.to_query_string(), query.to_query_string());
    assert_eq!(fetched.collection.next_page().unwrap().current_page(), 2);
}

#[tokio::test]
async fn get_uses_state_at_issue_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut query = articles(&server);
    let first = query.get();
    query.increment_page();
    let second = query.get();

    let (first, second) = tokio::join!(first, second);
    let first = first.unwrap();
    let second = second.unwrap();
    assert!(first.collection.is_empty());
    assert_eq!(first.collection.query().unwrap().current_page(), 1);
    assert_eq!(second.collection.len(), 2);
    assert_eq!(second.collection.query().unwrap().current_page(), 2);
}

#[tokio::test]
async fn get_rejected_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"errors": {"status": ["invalid"]}})),
        )
        .mount(&server)
        .await;

    let err = articles(&server).get().await.unwrap_err();
    match err {
        Error::Rejected { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body["errors"]["status"][0], json!("invalid"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn get_server_error_with_plain_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = articles(&server).get().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Rejected { status: 500, body: Value::String(ref s) } if s == "Internal Server Error"
    ));
}

#[tokio::test]
async fn get_unhandled_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = articles(&server).get().await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 403, .. }));
}

#[tokio::test]
async fn get_without_data_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let err = articles(&server).get().await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn get_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&server)
        .await;

    let result = articles(&server).get().await;
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn update_posts_attributes_with_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/update"))
        .and(query_param("filters[id][]", "1"))
        .and(body_json(json!({"title": "Renamed"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [{"id": 1, "title": "Renamed"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut query = articles(&server);
    query.where_("id", 1);
    let fetched = query.update(json!({"title": "Renamed"})).await.unwrap();

    assert_eq!(fetched.collection.len(), 1);
    assert_eq!(
        fetched.collection.models()[0].attributes(),
        &Article {
            id: 1,
            title: "Renamed".to_string()
        }
    );
    assert!(fetched.collection.query().is_some());
}

#[tokio::test]
async fn update_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/update"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let err = articles(&server)
        .update(json!({"title": ""}))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn update_forbidden_is_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/update"))
        .respond_with(ResponseTemplate::new(403).set_body_string("no"))
        .mount(&server)
        .await;

    let err = articles(&server)
        .update(json!({"title": "x"}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 403, .. }));
}

#[tokio::test]
async fn insert_wraps_single_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/store"))
        .and(body_json(json!({"title": "New"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 9, "title": "New"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut query = articles(&server);
    query.where_("ignored", true);
    let model = query.insert(json!({"title": "New"})).await.unwrap();

    assert!(model.exists());
    assert_eq!(model.attributes().id, 9);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn insert_accepts_bare_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "title": "Bare"})))
        .mount(&server)
        .await;

    let model = articles(&server)
        .insert(json!({"title": "Bare"}))
        .await
        .unwrap();
    assert_eq!(model.attributes().title, "Bare");
}

#[tokio::test]
async fn insert_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/store"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "title required"})),
        )
        .mount(&server)
        .await;

    let err = articles(&server).insert(json!({})).await.unwrap_err();
    assert!(matches!(err, Error::Rejected { status: 422, .. }));
}

#[tokio::test]
async fn insert_forbidden_is_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/store"))
        .respond_with(ResponseTemplate::new(403).set_body_string("no"))
        .mount(&server)
        .await;

    let err = articles(&server).insert(json!({})).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 403, .. }));
}

#[tokio::test]
async fn delete_returns_deleted_records() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/delete"))
        .and(query_param("filters[status][]", "draft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut query = articles(&server);
    query.where_("status", "draft");
    let deleted = query.delete_results().await.unwrap();
    assert_eq!(deleted.len(), 2);

    let bound = deleted.query().unwrap();
    assert_eq!(bound.to_query_string(), query.to_query_string());
}

#[tokio::test]
async fn delete_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/delete"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "locked"})))
        .mount(&server)
        .await;

    let err = articles(&server).delete_results().await.unwrap_err();
    match err {
        Error::Rejected { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body, json!({"message": "locked"}));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn delete_server_error_with_plain_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/delete"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = articles(&server).delete_results().await.unwrap_err();
    match err {
        Error::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, Value::String("Internal Server Error".into()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn delete_forbidden() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/delete"))
        .respond_with(ResponseTemplate::new(403).set_body_string("no"))
        .mount(&server)
        .await;

    let err = articles(&server).delete_results().await.unwrap_err();
    assert!(matches!(err, Error::Forbidden));
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn unreachable_server_is_request_failed() {
    let query = QueryBuilder::with_client(
        Endpoint::<Value>::new("http://127.0.0.1:1/articles"),
        Client::default(),
    );
    let result = query.get().await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}
