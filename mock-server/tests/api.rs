use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const TOKEN: &str = "Bearer test-key";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<String> {
    let boundary = "mock-boundary";
    let mut body = String::new();
    for (name, filename, content) in parts {
        body.push_str(&format!("--{boundary}\r\n"));
        match filename {
            Some(filename) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
            )),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(body)
        .unwrap()
}

async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

fn invoice_body() -> Value {
    json!({
        "voucherDate": "2024-03-15T00:00:00.000+01:00",
        "address": { "name": "Bike & Ride GmbH", "countryCode": "DE" },
        "lineItems": [{
            "type": "custom",
            "name": "Energieriegel",
            "quantity": 1,
            "unitName": "Stück",
            "unitPrice": { "currency": "EUR", "netAmount": 10.0, "taxRatePercentage": 19 }
        }],
        "totalPrice": { "currency": "EUR", "totalGrossAmount": 11.9 },
        "taxConditions": { "taxType": "net" }
    })
}

// --- authentication ---

#[tokio::test]
async fn missing_token_is_rejected_but_journaled() {
    let state = AppState::new();
    let app = router(state.clone());
    let resp = send(
        &app,
        Request::builder()
            .uri("/v1/articles")
            .body(String::new())
            .unwrap(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 401);
    assert_eq!(body["path"], "/v1/articles");

    let journal = state.journal().await;
    assert_eq!(journal.len(), 1);
    assert_eq!(journal[0].method, "GET");
    assert_eq!(journal[0].header("authorization"), None);
}

#[tokio::test]
async fn configured_key_must_match() {
    let app = router(AppState::new().with_api_key("other-key"));
    let resp = send(&app, get("/v1/profile")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let app = router(AppState::new().with_api_key("test-key"));
    let resp = send(&app, get("/v1/profile")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- generic resources ---

#[tokio::test]
async fn create_returns_action_result() {
    let state = AppState::new();
    let app = router(state.clone());
    let resp = send(
        &app,
        json_request("POST", "/v1/articles", json!({ "title": "Widget", "type": "PRODUCT" })),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let result = body_json(resp).await;
    let id = result["id"].as_str().unwrap().to_string();
    assert_eq!(result["version"], 1);
    assert!(result["resourceUri"]
        .as_str()
        .unwrap()
        .ends_with(&format!("/v1/articles/{id}")));

    let stored = state.record("articles", &id).await.unwrap();
    assert_eq!(stored["title"], "Widget");
    assert_eq!(stored["archived"], false);
}

#[tokio::test]
async fn update_checks_version() {
    let app = app();
    let created = body_json(
        send(&app, json_request("POST", "/v1/contacts", json!({ "version": 0 }))).await,
    )
    .await;
    let uri = format!("/v1/contacts/{}", created["id"].as_str().unwrap());

    let resp = send(&app, json_request("PUT", &uri, json!({ "version": 1, "note": "x" }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["version"], 2);

    let resp = send(&app, json_request("PUT", &uri, json!({ "version": 1 }))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 409);

    let fetched = body_json(send(&app, get(&uri)).await).await;
    assert_eq!(fetched["note"], "x");
    assert_eq!(fetched["version"], 2);
}

#[tokio::test]
async fn unsupported_operations_are_405() {
    let app = app();
    let resp = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/v1/contacts/c1")
            .header(http::header::AUTHORIZATION, TOKEN)
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let resp = send(&app, json_request("POST", "/v1/down-payment-invoices", json!({}))).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_paths_are_404_with_error_body() {
    let app = app();
    let resp = send(&app, get("/v1/articles/missing")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["path"], "/v1/articles/missing");

    let resp = send(&app, get("/v1/nothing-here")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_record() {
    let state = AppState::new();
    let id = state.insert("articles", json!({ "title": "Gone" })).await;
    let app = router(state.clone());
    let uri = format!("/v1/articles/{id}");

    let resp = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(&uri)
            .header(http::header::AUTHORIZATION, TOKEN)
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
    assert_eq!(send(&app, get(&uri)).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_pages_and_filters() {
    let state = AppState::new();
    for n in 0..3 {
        state
            .insert("articles", json!({ "title": format!("A{n}"), "type": "PRODUCT" }))
            .await;
    }
    state
        .insert("articles", json!({ "title": "S", "type": "SERVICE" }))
        .await;
    let app = router(state);

    let page = body_json(send(&app, get("/v1/articles?page=1&size=2&type=PRODUCT")).await).await;
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["number"], 1);
    assert_eq!(page["content"].as_array().unwrap().len(), 1);
    assert_eq!(page["last"], true);

    let resp = send(&app, get("/v1/articles?size=0")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, get("/v1/articles?page=18446744073709551615")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_json(resp).await;
    assert_eq!(page["content"].as_array().unwrap().len(), 0);
    assert_eq!(page["last"], true);
}

#[tokio::test]
async fn event_subscriptions_list_is_not_paged() {
    let app = app();
    let resp = send(
        &app,
        json_request(
            "POST",
            "/v1/event-subscriptions",
            json!({ "eventType": "invoice.created", "callbackUrl": "https://example.org/hook" }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let list = body_json(send(&app, get("/v1/event-subscriptions")).await).await;
    assert_eq!(list["content"][0]["eventType"], "invoice.created");
    assert_eq!(list["content"][0]["subscriptionId"], list["content"][0]["id"]);
    assert!(list.get("totalPages").is_none());
}

// --- sales vouchers ---

#[tokio::test]
async fn finalize_assigns_status_and_number() {
    let state = AppState::new();
    let app = router(state.clone());

    let draft = body_json(send(&app, json_request("POST", "/v1/invoices", invoice_body())).await).await;
    let draft = state
        .record("invoices", draft["id"].as_str().unwrap())
        .await
        .unwrap();
    assert_eq!(draft["voucherStatus"], "draft");
    assert!(draft["voucherNumber"].is_null());

    let open = body_json(
        send(&app, json_request("POST", "/v1/invoices?finalize=true", invoice_body())).await,
    )
    .await;
    let open = state
        .record("invoices", open["id"].as_str().unwrap())
        .await
        .unwrap();
    assert_eq!(open["voucherStatus"], "open");
    assert_eq!(open["voucherNumber"], "RE0001");
}

#[tokio::test]
async fn pursue_links_both_vouchers() {
    let state = AppState::new();
    let app = router(state.clone());
    let quotation = body_json(
        send(&app, json_request("POST", "/v1/quotations?finalize=true", invoice_body())).await,
    )
    .await;
    let quotation_id = quotation["id"].as_str().unwrap();

    let resp = send(
        &app,
        json_request(
            "POST",
            &format!("/v1/order-confirmations?precedingSalesVoucherId={quotation_id}&finalize=true"),
            invoice_body(),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let confirmation_id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let confirmation = state
        .record("order-confirmations", &confirmation_id)
        .await
        .unwrap();
    assert_eq!(confirmation["relatedVouchers"][0]["id"], quotation_id);
    assert_eq!(confirmation["relatedVouchers"][0]["voucherType"], "quotation");

    let quotation = state.record("quotations", quotation_id).await.unwrap();
    assert_eq!(quotation["relatedVouchers"][0]["id"], confirmation_id.as_str());
    assert_eq!(quotation["relatedVouchers"][0]["voucherNumber"], "AB0001");
}

#[tokio::test]
async fn unknown_preceding_voucher_is_404() {
    let app = app();
    let resp = send(
        &app,
        json_request(
            "POST",
            "/v1/credit-notes?precedingSalesVoucherId=missing",
            invoice_body(),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dunning_requires_preceding_voucher() {
    let app = app();
    let resp = send(&app, json_request("POST", "/v1/dunnings", invoice_body())).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn document_renders_then_downloads() {
    let state = AppState::new();
    let app = router(state.clone());
    let created = body_json(
        send(&app, json_request("POST", "/v1/invoices?finalize=true", invoice_body())).await,
    )
    .await;
    let uri = format!("/v1/invoices/{}/document", created["id"].as_str().unwrap());

    let rendered = body_json(send(&app, get(&uri)).await).await;
    let file_id = rendered["documentFileId"].as_str().unwrap().to_string();
    let again = body_json(send(&app, get(&uri)).await).await;
    assert_eq!(again["documentFileId"], file_id.as_str());

    let file = send(&app, get(&format!("/v1/files/{file_id}"))).await;
    assert_eq!(file.status(), StatusCode::OK);
    assert_eq!(
        file.headers()[http::header::CONTENT_TYPE],
        "application/pdf"
    );
    assert!(body_bytes(file).await.starts_with(b"%PDF"));

    let pdf = send(
        &app,
        Request::builder()
            .uri(&uri)
            .header(http::header::AUTHORIZATION, TOKEN)
            .header(http::header::ACCEPT, "application/pdf")
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(pdf.status(), StatusCode::OK);
    assert_eq!(pdf.headers()[http::header::CONTENT_TYPE], "application/pdf");
    assert!(body_bytes(pdf).await.starts_with(b"%PDF"));
}

// --- files and vouchers ---

#[tokio::test]
async fn upload_requires_voucher_type() {
    let state = AppState::new();
    let app = router(state.clone());

    let resp = send(
        &app,
        multipart_request("/v1/files", &[("file", Some("receipt.pdf"), "%PDF-1.4")]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(
        &app,
        multipart_request(
            "/v1/files",
            &[("file", Some("receipt.pdf"), "%PDF-1.4"), ("type", None, "voucher")],
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let stored = state.file(&id).await.unwrap();
    assert_eq!(stored.filename, "receipt.pdf");
    assert_eq!(stored.content, b"%PDF-1.4");
}

#[tokio::test]
async fn voucher_file_is_attached() {
    let state = AppState::new();
    let voucher_id = state
        .insert("vouchers", json!({ "type": "purchaseinvoice", "version": 1 }))
        .await;
    let app = router(state.clone());

    let resp = send(
        &app,
        multipart_request(
            &format!("/v1/vouchers/{voucher_id}/files"),
            &[("file", Some("scan.pdf"), "%PDF-1.4")],
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let file_id = body_json(resp).await["id"].clone();

    let voucher = state.record("vouchers", &voucher_id).await.unwrap();
    assert_eq!(voucher["files"], json!([{ "id": file_id }]));

    let resp = send(
        &app,
        multipart_request("/v1/vouchers/missing/files", &[("file", Some("x.pdf"), "x")]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn voucher_list_filters_by_type_and_status() {
    let app = app();
    send(&app, json_request("POST", "/v1/invoices?finalize=true", invoice_body())).await;
    send(&app, json_request("POST", "/v1/quotations", invoice_body())).await;

    let page = body_json(
        send(&app, get("/v1/voucherlist?voucherType=invoice&voucherStatus=open")).await,
    )
    .await;
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["content"][0]["voucherNumber"], "RE0001");
    assert_eq!(page["content"][0]["totalAmount"], 11.9);

    let page = body_json(
        send(&app, get("/v1/voucherlist?voucherType=invoice,quotation&voucherStatus=any")).await,
    )
    .await;
    assert_eq!(page["totalElements"], 2);
}

// --- lookups ---

#[tokio::test]
async fn lookup_lists_are_seeded() {
    let app = app();
    let countries = body_json(send(&app, get("/v1/countries")).await).await;
    assert_eq!(countries[0]["countryCode"], "DE");

    let layouts = body_json(send(&app, get("/v1/print-layouts")).await).await;
    assert_eq!(layouts[0]["default"], true);

    let profile = body_json(send(&app, get("/v1/profile")).await).await;
    assert_eq!(profile["organizationId"], mock_server::ORGANIZATION_ID);
}

#[tokio::test]
async fn payments_follow_stored_voucher() {
    let app = app();
    let created = body_json(
        send(&app, json_request("POST", "/v1/invoices?finalize=true", invoice_body())).await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let payment = body_json(send(&app, get(&format!("/v1/payments/{id}"))).await).await;
    assert_eq!(payment["openAmount"], 11.9);
    assert_eq!(payment["paymentStatus"], "openRevenue");
    assert_eq!(payment["voucherType"], "invoice");

    let resp = send(&app, get("/v1/payments/missing")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
