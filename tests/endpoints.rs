use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;
use simple_spark::{Client, MetricsQuery, VerifyDomain};

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .api_key("test-key")
        .api_host(server.base_url())
        .build()
        .unwrap()
}

#[tokio::test]
async fn account_retrieve_and_update() {
    let server = MockServer::start_async().await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/account")
                .query_param("include", "usage");
            then.status(200).json_body(json!({"results": {"customer_id": 1}}));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/v1/account")
                .json_body(json!({"company_name": "SparkPost"}));
            then.status(200)
                .json_body(json!({"results": {"message": "Account has been updated"}}));
        })
        .await;

    let client = client_for(&server);
    let account = client.account().retrieve(Some("usage")).await.unwrap();
    let updated = client
        .account()
        .update(&json!({"company_name": "SparkPost"}))
        .await
        .unwrap();

    retrieve.assert_async().await;
    update.assert_async().await;
    assert_eq!(account["customer_id"], 1);
    assert_eq!(updated["message"], "Account has been updated");
}

#[tokio::test]
async fn metrics_discoverability_keeps_links() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/metrics");
            then.status(200).json_body(json!({
                "results": {"links": []},
                "links": [{"href": "/api/v1/metrics/deliverability"}]
            }));
        })
        .await;

    let client = client_for(&server);
    let root = client.metrics().discoverability_links().await.unwrap();
    assert_eq!(root["links"][0]["href"], "/api/v1/metrics/deliverability");
}

#[tokio::test]
async fn metrics_queries_format_dates() {
    let server = MockServer::start_async().await;
    let by_domain = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/metrics/deliverability/domain")
                .query_param("from", "2024-03-01T00:00")
                .query_param("to", "2024-03-31T23:59")
                .query_param("metrics", "count_injected,count_bounce")
                .query_param("domains", "gmail.com");
            then.status(200)
                .json_body(json!({"results": [{"domain": "gmail.com", "count_injected": 10}]}));
        })
        .await;
    let time_series = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/metrics/deliverability/time-series")
                .query_param("precision", "day");
            then.status(200).json_body(json!({"results": []}));
        })
        .await;

    let client = client_for(&server);
    let query = MetricsQuery::new()
        .from(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        .to("2024-03-31T23:59")
        .metrics(["count_injected", "count_bounce"])
        .domains(["gmail.com"]);
    let rows = client
        .metrics()
        .deliverability_metrics_by_domain(query.clone())
        .await
        .unwrap();
    client
        .metrics()
        .deliverability_time_series(query.precision("day"))
        .await
        .unwrap();

    by_domain.assert_async().await;
    time_series.assert_async().await;
    assert_eq!(rows[0]["count_injected"], 10);
}

#[tokio::test]
async fn metrics_breakdowns_hit_their_paths() {
    let server = MockServer::start_async().await;
    let paths = [
        "/api/v1/metrics/deliverability",
        "/api/v1/metrics/deliverability/sending-domain",
        "/api/v1/metrics/deliverability/campaign",
        "/api/v1/metrics/deliverability/template",
        "/api/v1/metrics/deliverability/watched-domain",
    ];
    let mut mocks = Vec::new();
    for path in paths {
        mocks.push(
            server
                .mock_async(|when, then| {
                    when.method(GET).path(path);
                    then.status(200).json_body(json!({"results": []}));
                })
                .await,
        );
    }

    let client = client_for(&server);
    let metrics = client.metrics();
    let query = || MetricsQuery::new().from("2024-01-01T00:00");
    metrics.deliverability_metrics_summary(query()).await.unwrap();
    metrics
        .deliverability_metrics_by_sending_domain(query())
        .await
        .unwrap();
    metrics.deliverability_metrics_by_campaign(query()).await.unwrap();
    metrics.deliverability_metrics_by_template(query()).await.unwrap();
    metrics
        .deliverability_metrics_by_watched_domain(query())
        .await
        .unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn subaccounts_crud() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/subaccounts");
            then.status(200).json_body(json!({"results": [{"id": 123}]}));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/subaccounts")
                .json_body(json!({"name": "Sparkle Ponies"}));
            then.status(200).json_body(json!({"results": {"subaccount_id": 888}}));
        })
        .await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/subaccounts/123");
            then.status(200).json_body(json!({"results": {"id": 123}}));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/v1/subaccounts/123")
                .json_body(json!({"status": "suspended"}));
            then.status(200).json_body(json!({"results": {"message": "Successfully updated"}}));
        })
        .await;

    let client = client_for(&server);
    let subaccounts = client.subaccounts();
    subaccounts.list().await.unwrap();
    let created = subaccounts
        .create(&json!({"name": "Sparkle Ponies"}))
        .await
        .unwrap();
    subaccounts.retrieve(123).await.unwrap();
    subaccounts
        .update(123, &json!({"status": "suspended"}))
        .await
        .unwrap();

    list.assert_async().await;
    create.assert_async().await;
    retrieve.assert_async().await;
    update.assert_async().await;
    assert_eq!(created["subaccount_id"], 888);
}

#[tokio::test]
async fn inbound_domains_crud() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/inbound-domains")
                .json_body(json!({"domain": "inbound.example.com"}));
            then.status(200).json_body(json!({"results": {}}));
        })
        .await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/inbound-domains/inbound.example.com");
            then.status(200)
                .json_body(json!({"results": {"domain": "inbound.example.com"}}));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/inbound-domains/inbound.example.com");
            then.status(204);
        })
        .await;

    let client = client_for(&server);
    let domains = client.inbound_domains();
    domains.create("inbound.example.com").await.unwrap();
    let domain = domains.retrieve("inbound.example.com").await.unwrap();
    domains.delete("inbound.example.com").await.unwrap();

    create.assert_async().await;
    retrieve.assert_async().await;
    delete.assert_async().await;
    assert_eq!(domain["domain"], "inbound.example.com");
}

#[tokio::test]
async fn sending_domain_verify_sends_requested_checks() {
    let server = MockServer::start_async().await;
    let verify = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/sending-domains/example.com/verify")
                .json_body(json!({"dkim_verify": true, "spf_verify": true}));
            then.status(200)
                .json_body(json!({"results": {"dkim_status": "valid", "spf_status": "valid"}}));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/v1/sending-domains/example.com")
                .json_body(json!({"tracking_domain": "click.example.com"}));
            then.status(200).json_body(json!({"results": {}}));
        })
        .await;

    let client = client_for(&server);
    let status = client
        .sending_domains()
        .verify("example.com", &VerifyDomain::dns())
        .await
        .unwrap();
    client
        .sending_domains()
        .update("example.com", &json!({"tracking_domain": "click.example.com"}))
        .await
        .unwrap();

    verify.assert_async().await;
    update.assert_async().await;
    assert_eq!(status["dkim_status"], "valid");
}

#[tokio::test]
async fn sending_domain_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/sending-domains/missing.example.com");
            then.status(404)
                .json_body(json!({"errors": [{"message": "resource not found", "code": "1600"}]}));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .sending_domains()
        .retrieve("missing.example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, simple_spark::Error::NotFound(_)));
    assert_eq!(
        err.to_string(),
        "resource not found 404 (Error Code: 1600)"
    );
}

#[tokio::test]
async fn templates_draft_update_and_preview() {
    let server = MockServer::start_async().await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/templates/summer-sale")
                .query_param("draft", "true");
            then.status(200)
                .json_body(json!({"results": {"id": "summer-sale", "published": false}}));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/v1/templates/summer-sale")
                .query_param("update_published", "false")
                .json_body(json!({"name": "Summer Sale!"}));
            then.status(200).json_body(json!({"results": {}}));
        })
        .await;
    let preview = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/templates/summer-sale/preview")
                .query_param("draft", "false")
                .json_body(json!({"substitution_data": {"name": "Natalie", "age": 35}}));
            then.status(200)
                .json_body(json!({"results": {"subject": "Hi Natalie"}}));
        })
        .await;

    let client = client_for(&server);
    let templates = client.templates();
    let template = templates.retrieve("summer-sale", Some(true)).await.unwrap();
    templates
        .update("summer-sale", &json!({"name": "Summer Sale!"}), false)
        .await
        .unwrap();
    let rendered = templates
        .preview("summer-sale", &json!({"name": "Natalie", "age": 35}), Some(false))
        .await
        .unwrap();

    retrieve.assert_async().await;
    update.assert_async().await;
    preview.assert_async().await;
    assert_eq!(template["published"], false);
    assert_eq!(rendered["subject"], "Hi Natalie");
}

#[tokio::test]
async fn template_ids_are_escaped_in_the_path() {
    let server = MockServer::start_async().await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/templates/a%20b");
            then.status(200).json_body(json!({"results": {"id": "a b"}}));
        })
        .await;

    let client = client_for(&server);
    let template = client.templates().retrieve("a b", None).await.unwrap();

    retrieve.assert_async().await;
    assert_eq!(template["id"], "a b");
}

#[tokio::test]
async fn transmissions_create_list_and_campaign_delete() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/transmissions")
                .query_param("num_rcpt_errors", "3")
                .json_body(json!({"campaign_id": "spring"}));
            then.status(200).json_body(json!({
                "results": {"id": "11668787484950529", "total_accepted_recipients": 1}
            }));
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/transmissions")
                .query_param("campaign_id", "spring");
            then.status(200).json_body(json!({"results": []}));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/v1/transmissions")
                .query_param("campaign_id", "spring");
            then.status(204);
        })
        .await;

    let client = client_for(&server);
    let transmissions = client.transmissions();
    let sent = transmissions
        .send_message(&json!({"campaign_id": "spring"}), Some(3))
        .await
        .unwrap();
    transmissions.list(Some("spring"), None).await.unwrap();
    let deleted = transmissions.delete_campaign("spring").await.unwrap();

    create.assert_async().await;
    list.assert_async().await;
    delete.assert_async().await;
    assert_eq!(sent["id"], "11668787484950529");
    assert_eq!(deleted, json!({}));
}

#[tokio::test]
async fn event_searches_pass_params_through() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/events/message")
                .query_param("events", "delivery")
                .query_param("per_page", "10");
            then.status(200).json_body(json!({"results": [{"type": "delivery"}]}));
        })
        .await;
    let samples = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/message-events/events/samples")
                .query_param("events", "bounce");
            then.status(200).json_body(json!({"results": [{"type": "bounce"}]}));
        })
        .await;

    let client = client_for(&server);
    let found = client
        .events()
        .search([("events", "delivery"), ("per_page", "10")])
        .await
        .unwrap();
    client.message_events().samples(Some("bounce")).await.unwrap();

    search.assert_async().await;
    samples.assert_async().await;
    assert_eq!(found[0]["type"], "delivery");
}

#[tokio::test]
async fn webhooks_validate_and_batch_status() {
    let server = MockServer::start_async().await;
    let validate = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/webhooks/wh-1/validate")
                .json_body(json!({"message": {"msys": {}}}));
            then.status(200)
                .json_body(json!({"results": {"msg": "Test POST to endpoint succeeded"}}));
        })
        .await;
    let batch_status = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/webhooks/wh-1/batch-status")
                .query_param("limit", "5");
            then.status(200).json_body(json!({"results": [{"batch_id": "b1"}]}));
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/webhooks")
                .query_param("timezone", "America/New_York");
            then.status(200).json_body(json!({"results": []}));
        })
        .await;

    let client = client_for(&server);
    let webhooks = client.webhooks();
    webhooks.validate("wh-1", &json!({"msys": {}})).await.unwrap();
    let batches = webhooks.batch_status("wh-1", Some(5)).await.unwrap();
    webhooks.list(Some("America/New_York")).await.unwrap();

    validate.assert_async().await;
    batch_status.assert_async().await;
    list.assert_async().await;
    assert_eq!(batches[0]["batch_id"], "b1");
}

#[tokio::test]
async fn relay_webhooks_crud() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/relay-webhooks")
                .json_body(json!({"name": "Replies Webhook"}));
            then.status(200).json_body(json!({"results": {"id": "12013026328707075"}}));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/relay-webhooks/12013026328707075");
            then.status(200).json_body(json!({"results": {}}));
        })
        .await;

    let client = client_for(&server);
    let created = client
        .relay_webhooks()
        .create(&json!({"name": "Replies Webhook"}))
        .await
        .unwrap();
    client
        .relay_webhooks()
        .delete("12013026328707075")
        .await
        .unwrap();

    create.assert_async().await;
    delete.assert_async().await;
    assert_eq!(created["id"], "12013026328707075");
}

#[tokio::test]
async fn suppression_list_bulk_upsert_and_escaped_lookup() {
    let server = MockServer::start_async().await;
    let upsert = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/v1/suppression-list").json_body(json!({
                "recipients": [{"recipient": "rcpt_1@example.com", "type": "transactional"}]
            }));
            then.status(200).json_body(json!({
                "results": {"message": "Suppression List successfully updated"}
            }));
        })
        .await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/suppression-list/rcpt_1%40example.com");
            then.status(200)
                .json_body(json!({"results": [{"recipient": "rcpt_1@example.com"}]}));
        })
        .await;

    let client = client_for(&server);
    client
        .suppression_list()
        .create_or_update(&[json!({
            "recipient": "rcpt_1@example.com",
            "type": "transactional"
        })])
        .await
        .unwrap();
    let entries = client
        .suppression_list()
        .retrieve("rcpt_1@example.com")
        .await
        .unwrap();

    upsert.assert_async().await;
    retrieve.assert_async().await;
    assert_eq!(entries[0]["recipient"], "rcpt_1@example.com");
}

#[tokio::test]
async fn recipient_lists_create_and_retrieve() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/recipient-lists")
                .query_param("num_rcpt_errors", "2")
                .json_body(json!({"id": "unique_id_4_graduate_students_list"}));
            then.status(200).json_body(json!({
                "results": {
                    "total_accepted_recipients": 3,
                    "id": "unique_id_4_graduate_students_list"
                }
            }));
        })
        .await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/recipient-lists/unique_id_4_graduate_students_list")
                .query_param("show_recipients", "true");
            then.status(200).json_body(json!({"results": {"recipients": []}}));
        })
        .await;

    let client = client_for(&server);
    let lists = client.recipient_lists();
    let created = lists
        .create(&json!({"id": "unique_id_4_graduate_students_list"}), Some(2))
        .await
        .unwrap();
    lists
        .retrieve("unique_id_4_graduate_students_list", true)
        .await
        .unwrap();

    create.assert_async().await;
    retrieve.assert_async().await;
    assert_eq!(created["total_accepted_recipients"], 3);
}
