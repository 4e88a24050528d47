//! HTTP-level tests of the generic resource operations against a mock
//! GeoNode server.

use geonode_client::{GeonodeClient, GeonodeError, ListParams, ResourceHandler};
use geonode_client::{datasets, execution, keywords, resources, users};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> GeonodeClient {
    GeonodeClient::builder()
        .base_url(format!("{}/api/v2/", server.uri()))
        .auth_basic("YWRtaW46YWRtaW4=")
        .build()
        .unwrap()
}

#[tokio::test]
async fn list_unwraps_the_plural_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/resources/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "resources": [{"pk": 1, "title": "A"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let items = ResourceHandler::new(&client, &resources::RESOURCES)
        .list(&ListParams::new())
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"pk": 1, "title": "A"})]);
}

#[tokio::test]
async fn list_with_missing_envelope_is_a_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/datasets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "layers": [{"pk": 1}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = ResourceHandler::new(&client, &datasets::DATASETS)
        .list(&ListParams::new())
        .await
        .unwrap_err();

    assert!(matches!(err, GeonodeError::Protocol { .. }), "{err}");
    assert!(err.to_string().contains("datasets"));
}

#[tokio::test]
async fn list_sends_pagination_search_and_dotted_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/datasets/"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "10"))
        .and(query_param("search", "soil"))
        .and(query_param("sort_by", "title"))
        .and(query_param("filter{owner.username}", "admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"datasets": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let params = ListParams::new()
        .page(2)
        .page_size(10)
        .search("soil")
        .ordering("title")
        .filter("owner.username", "admin");
    let items = ResourceHandler::new(&client, &datasets::DATASETS)
        .list(&params)
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn get_unwraps_the_singular_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/datasets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dataset": {"pk": 7, "title": "Roads"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let dataset = ResourceHandler::new(&client, &datasets::DATASETS)
        .get(7)
        .await
        .unwrap();
    assert_eq!(dataset, json!({"pk": 7, "title": "Roads"}));
}

#[tokio::test]
async fn get_on_missing_pk_is_not_found_carrying_the_pk() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/datasets/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = ResourceHandler::new(&client, &datasets::DATASETS)
        .get(999)
        .await
        .unwrap_err();

    assert!(err.is_not_found(), "{err}");
    assert!(err.to_string().contains("999"));
}

#[tokio::test]
async fn unauthorized_maps_to_its_own_variant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = ResourceHandler::new(&client, &users::USERS)
        .list(&ListParams::new())
        .await
        .unwrap_err();
    assert!(err.is_unauthorized(), "{err}");
}

#[tokio::test]
async fn server_error_body_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/maps/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database exploded"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = ResourceHandler::new(&client, &geonode_client::maps::MAPS)
        .list(&ListParams::new())
        .await
        .unwrap_err();

    match err {
        GeonodeError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database exploded");
        }
        other => panic!("expected Api error, got {other}"),
    }
}

#[tokio::test]
async fn patch_then_get_round_trips_the_changed_field() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v2/datasets/7/"))
        .and(body_json(json!({"title": "X"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dataset": {"pk": 7, "title": "X"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/datasets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dataset": {"pk": 7, "title": "X"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let handler = ResourceHandler::new(&client, &datasets::DATASETS);
    handler.patch(7, &json!({"title": "X"})).await.unwrap();
    let dataset = handler.get(7).await.unwrap();
    assert_eq!(dataset["title"], "X");
}

#[tokio::test]
async fn delete_treats_204_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/resources/3/delete"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    ResourceHandler::new(&client, &datasets::DATASETS)
        .delete(3)
        .await
        .unwrap();
}

#[tokio::test]
async fn batch_delete_continues_past_not_found() {
    let server = MockServer::start().await;
    for pk in [1, 3] {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/v2/resources/{pk}/delete")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/api/v2/resources/2/delete"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let outcomes = ResourceHandler::new(&client, &datasets::DATASETS)
        .delete_spec("1-3")
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].result.is_ok());
    assert!(outcomes[1].result.as_ref().unwrap_err().is_not_found());
    assert!(outcomes[2].result.is_ok());
}

#[tokio::test]
async fn users_delete_goes_through_its_own_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/users/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    ResourceHandler::new(&client, &users::USERS)
        .delete(4)
        .await
        .unwrap();
}

#[tokio::test]
async fn execution_request_is_fetched_by_string_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/executionrequest/8f2a1c9e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request": {"exec_id": "8f2a1c9e", "status": "finished"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = execution::get(&client, "8f2a1c9e").await.unwrap();
    assert_eq!(request["status"], "finished");
}

#[tokio::test]
async fn keyword_labels_are_filtered_by_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/tkeywordlabels"))
        .and(query_param("keyword", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ThesaurusKeywordLabels": [{"keyword": 7, "lang": "de", "label": "Boden"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let labels = keywords::labels_for_keyword(&client, 7).await.unwrap();
    assert_eq!(labels[0]["label"], "Boden");
}

#[tokio::test]
async fn linked_resources_requires_the_relation_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/resources/5/linked_resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "linked_to": [{"pk": 6}],
            "linked_by": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let linked = resources::linked_resources(&client, 5, &ListParams::new())
        .await
        .unwrap();
    assert_eq!(linked["linked_to"][0]["pk"], 6);
}

#[tokio::test]
async fn unlink_sends_the_targets_in_the_delete_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/resources/5/linked_resources"))
        .and(body_json(json!({"target": [6, 7]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": ["6", "7"], "error": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = resources::unlink_resources(&client, 5, &[6, 7]).await.unwrap();
    assert!(response["error"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn linking_nothing_is_invalid_input() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;
    let err = resources::link_resources(&client, 5, &[]).await.unwrap_err();
    assert!(matches!(err, GeonodeError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn metadata_follows_the_matching_link() {
    let server = MockServer::start().await;
    let metadata_url = format!("{}/catalogue/csw?format=ISO", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/v2/resources/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource": {
                "pk": 5,
                "links": [
                    {"name": "Atom", "url": "https://unused.example.com"},
                    {"name": "ISO", "url": metadata_url},
                ]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/csw"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<gmd:MD_Metadata/>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let metadata = resources::metadata(&client, 5, "ISO").await.unwrap();
    assert_eq!(metadata, "<gmd:MD_Metadata/>");
}

#[tokio::test]
async fn metadata_with_unknown_type_is_invalid_input() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/resources/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource": {"pk": 5, "links": []}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = resources::metadata(&client, 5, "ISO").await.unwrap_err();
    assert!(matches!(err, GeonodeError::InvalidInput(_)), "{err}");
}
