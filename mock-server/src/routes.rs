//! Handlers emulating the Lexware endpoints over JSON records.
//!
//! Records are stored as `serde_json::Value` so that whatever the client
//! sends comes back unchanged, plus the fields the provider manages itself
//! (`id`, `organizationId`, timestamps, `version`, voucher status/number).

use std::collections::HashMap;

use axum::extract::{MatchedPath, Multipart, Path, Query, Request, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::{AppState, JournalEntry, Store, StoredFile, ORGANIZATION_ID};

type Params = HashMap<String, String>;
type HandlerResult = Result<Response, Response>;

const DEFAULT_PAGE_SIZE: usize = 25;
const MAX_PAGE_SIZE: usize = 250;

/// A collection under `/v1` and the operations it supports.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Collection {
    pub name: &'static str,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
    pub sales: Option<SalesKind>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SalesKind {
    pub voucher_type: &'static str,
    pub number_prefix: &'static str,
    pub requires_preceding: bool,
}

const fn plain(name: &'static str, create: bool, update: bool, delete: bool) -> Collection {
    Collection {
        name,
        create,
        update,
        delete,
        sales: None,
    }
}

const fn sales(
    name: &'static str,
    voucher_type: &'static str,
    number_prefix: &'static str,
    create: bool,
    requires_preceding: bool,
) -> Collection {
    Collection {
        name,
        create,
        update: false,
        delete: false,
        sales: Some(SalesKind {
            voucher_type,
            number_prefix,
            requires_preceding,
        }),
    }
}

pub(crate) const COLLECTIONS: &[Collection] = &[
    plain("articles", true, true, true),
    plain("contacts", true, true, false),
    plain("vouchers", true, true, false),
    plain("event-subscriptions", true, false, true),
    plain("recurring-templates", false, false, false),
    sales("invoices", "invoice", "RE", true, false),
    sales("quotations", "quotation", "AG", true, false),
    sales("credit-notes", "creditnote", "GS", true, false),
    sales("delivery-notes", "deliverynote", "LS", true, false),
    sales("order-confirmations", "orderconfirmation", "AB", true, false),
    sales("dunnings", "dunning", "MA", true, true),
    sales("down-payment-invoices", "downpaymentinvoice", "AR", false, false),
];

fn collection_for(matched: &MatchedPath) -> Option<&'static Collection> {
    let name = matched.as_str().strip_prefix("/v1/")?.split('/').next()?;
    COLLECTIONS.iter().find(|collection| collection.name == name)
}

fn now() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        .to_string()
}

/// Error body in the provider's shape.
pub(crate) fn error(status: StatusCode, path: &str, message: impl Into<String>) -> Response {
    let body = json!({
        "timestamp": now(),
        "status": status.as_u16(),
        "error": status.canonical_reason().unwrap_or_default(),
        "path": path,
        "traceId": Uuid::new_v4().simple().to_string(),
        "message": message.into(),
    });
    (status, Json(body)).into_response()
}

fn not_found(path: &str) -> Response {
    error(StatusCode::NOT_FOUND, path, "Resource not found")
}

/// Journals every request, then rejects it unless it carries an accepted
/// bearer token.
pub(crate) async fn journal_and_authorize(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let entry = JournalEntry {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        headers: request
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect(),
    };
    let token = entry
        .header("authorization")
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string());
    let path = entry.path.clone();
    info!(method = %entry.method, %path, query = ?entry.query, "request");
    state.store.write().await.journal.push(entry);

    let authorized = match (token.as_deref(), state.api_key.as_deref()) {
        (Some(token), Some(expected)) => token == expected,
        (Some(token), None) => !token.is_empty(),
        (None, _) => false,
    };
    if !authorized {
        debug!(%path, "rejecting request without valid bearer token");
        return error(StatusCode::UNAUTHORIZED, &path, "Unauthorized");
    }
    next.run(request).await
}

fn page_param(params: &Params, name: &str, default: usize, path: &str) -> Result<usize, Response> {
    match params.get(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| {
            error(
                StatusCode::BAD_REQUEST,
                path,
                format!("{name} must be a non-negative integer"),
            )
        }),
    }
}

fn paging(params: &Params, path: &str) -> Result<(usize, usize), Response> {
    let page = page_param(params, "page", 0, path)?;
    let size = page_param(params, "size", DEFAULT_PAGE_SIZE, path)?;
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(error(
            StatusCode::BAD_REQUEST,
            path,
            format!("size must be between 1 and {MAX_PAGE_SIZE}"),
        ));
    }
    Ok((page, size))
}

pub(crate) fn page_of(records: Vec<Value>, page: usize, size: usize) -> Value {
    let total = records.len();
    let total_pages = total.div_ceil(size);
    let content: Vec<Value> = records
        .into_iter()
        .skip(page.saturating_mul(size))
        .take(size)
        .collect();
    let count = content.len();
    json!({
        "content": content,
        "first": page == 0,
        "last": page.saturating_add(1) >= total_pages,
        "totalPages": total_pages,
        "totalElements": total,
        "numberOfElements": count,
        "size": size,
        "number": page,
    })
}

fn field_eq(value: &Value, expected: &str) -> bool {
    match value {
        Value::String(value) => value == expected,
        Value::Null => false,
        other => other.to_string() == expected,
    }
}

fn contact_name(record: &Value) -> Option<String> {
    if let Some(name) = record["company"]["name"].as_str() {
        return Some(name.to_string());
    }
    let person = &record["person"];
    let last = person["lastName"].as_str()?;
    Some(match person["firstName"].as_str() {
        Some(first) => format!("{first} {last}"),
        None => last.to_string(),
    })
}

fn has_email(record: &Value, expected: &str) -> bool {
    record["emailAddresses"].as_object().is_some_and(|groups| {
        groups
            .values()
            .filter_map(Value::as_array)
            .flatten()
            .any(|email| email.as_str() == Some(expected))
    })
}

/// Equality on top-level fields, plus the contact filters that look into
/// nested structures.
fn matches_filters(resource: &str, record: &Value, params: &Params) -> bool {
    params
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "page" | "size"))
        .all(|(key, expected)| match (resource, key.as_str()) {
            ("contacts", role @ ("customer" | "vendor")) => {
                !record["roles"][role].is_null() == (expected == "true")
            }
            ("contacts", "name") => contact_name(record)
                .is_some_and(|name| name.to_lowercase().contains(&expected.to_lowercase())),
            ("contacts", "email") => has_email(record, expected),
            ("contacts", "number") => ["customer", "vendor"]
                .iter()
                .any(|role| field_eq(&record["roles"][*role]["number"], expected)),
            (_, key) => field_eq(&record[key], expected),
        })
}

fn action_result(headers: &HeaderMap, resource: &str, record: &Value) -> Value {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    let id = record["id"].as_str().unwrap_or_default();
    json!({
        "id": id,
        "resourceUri": format!("http://{host}/v1/{resource}/{id}"),
        "createdDate": record["createdDate"],
        "updatedDate": record["updatedDate"],
        "version": record["version"],
    })
}

fn find_sales_voucher<'s>(
    store: &'s Store,
    id: &str,
) -> Option<(&'static Collection, &'s Value)> {
    COLLECTIONS
        .iter()
        .filter(|collection| collection.sales.is_some())
        .find_map(|collection| store.find(collection.name, id).map(|record| (collection, record)))
}

fn voucher_type_of(collection: &Collection, record: &Value) -> Value {
    match collection.sales {
        Some(kind) => Value::from(kind.voucher_type),
        None => record["type"].clone(),
    }
}

pub(crate) async fn list(
    State(state): State<AppState>,
    matched: MatchedPath,
    uri: Uri,
    Query(params): Query<Params>,
) -> HandlerResult {
    let path = uri.path();
    let collection = collection_for(&matched).ok_or_else(|| not_found(path))?;
    let store = state.store.read().await;
    let records: Vec<Value> = store
        .records
        .get(collection.name)
        .into_iter()
        .flatten()
        .filter(|record| matches_filters(collection.name, record, &params))
        .cloned()
        .collect();

    if collection.name == "event-subscriptions" {
        return Ok(Json(json!({ "content": records })).into_response());
    }
    let (page, size) = paging(&params, path)?;
    Ok(Json(page_of(records, page, size)).into_response())
}

pub(crate) async fn create(
    State(state): State<AppState>,
    matched: MatchedPath,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<Params>,
    Json(body): Json<Value>,
) -> HandlerResult {
    let path = uri.path();
    let collection = collection_for(&matched).ok_or_else(|| not_found(path))?;
    if !body.is_object() {
        return Err(error(
            StatusCode::BAD_REQUEST,
            path,
            "request body must be a JSON object",
        ));
    }
    let finalize = params.get("finalize").is_some_and(|value| value == "true");
    let preceding_id = params.get("precedingSalesVoucherId");

    let mut store = state.store.write().await;
    let id = Uuid::new_v4().to_string();
    let timestamp = now();
    let mut record = body;
    record["id"] = Value::from(id.as_str());
    record["organizationId"] = Value::from(ORGANIZATION_ID);
    record["createdDate"] = Value::from(timestamp.as_str());
    record["updatedDate"] = Value::from(timestamp.as_str());
    record["version"] = Value::from(1);

    match collection.sales {
        Some(kind) => {
            if kind.requires_preceding && preceding_id.is_none() {
                return Err(error(
                    StatusCode::BAD_REQUEST,
                    path,
                    "precedingSalesVoucherId is required",
                ));
            }
            let preceding = match preceding_id {
                Some(preceding_id) => {
                    let (preceding_collection, preceding) =
                        find_sales_voucher(&store, preceding_id).ok_or_else(|| {
                            error(
                                StatusCode::NOT_FOUND,
                                path,
                                format!("preceding sales voucher {preceding_id} not found"),
                            )
                        })?;
                    Some(json!({
                        "id": preceding_id,
                        "voucherNumber": preceding["voucherNumber"],
                        "voucherType": voucher_type_of(preceding_collection, preceding),
                    }))
                }
                None => None,
            };

            record["archived"] = Value::from(false);
            record["voucherStatus"] = Value::from(if finalize { "open" } else { "draft" });
            if finalize {
                record["voucherNumber"] = Value::from(store.next_voucher_number(kind.number_prefix));
            }
            record["relatedVouchers"] = Value::Array(preceding.into_iter().collect());

            if let Some(preceding_id) = preceding_id {
                let link = json!({
                    "id": id,
                    "voucherNumber": record["voucherNumber"],
                    "voucherType": kind.voucher_type,
                });
                let preceding_resource =
                    find_sales_voucher(&store, preceding_id).map(|(collection, _)| collection.name);
                if let Some(resource) = preceding_resource {
                    if let Some(preceding) = store.find_mut(resource, preceding_id) {
                        if !preceding["relatedVouchers"].is_array() {
                            preceding["relatedVouchers"] = json!([]);
                        }
                        if let Some(related) = preceding["relatedVouchers"].as_array_mut() {
                            related.push(link);
                        }
                    }
                }
            }
        }
        None => match collection.name {
            "event-subscriptions" => record["subscriptionId"] = Value::from(id.as_str()),
            "vouchers" => {
                if record["voucherStatus"].is_null() {
                    record["voucherStatus"] = Value::from("unchecked");
                }
            }
            _ => record["archived"] = Value::from(false),
        },
    }

    debug!(resource = collection.name, %id, finalize, "created record");
    let result = action_result(&headers, collection.name, &record);
    store
        .records
        .entry(collection.name.to_string())
        .or_default()
        .push(record);
    Ok((StatusCode::CREATED, Json(result)).into_response())
}

pub(crate) async fn get_one(
    State(state): State<AppState>,
    matched: MatchedPath,
    uri: Uri,
    Path(id): Path<String>,
) -> HandlerResult {
    let path = uri.path();
    let collection = collection_for(&matched).ok_or_else(|| not_found(path))?;
    state
        .store
        .read()
        .await
        .find(collection.name, &id)
        .map(|record| Json(record.clone()).into_response())
        .ok_or_else(|| not_found(path))
}

/// Full replacement guarded by `version`; provider-managed fields survive.
pub(crate) async fn update(
    State(state): State<AppState>,
    matched: MatchedPath,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> HandlerResult {
    let path = uri.path();
    let collection = collection_for(&matched).ok_or_else(|| not_found(path))?;
    let Some(version) = body.get("version").and_then(Value::as_i64) else {
        return Err(error(StatusCode::BAD_REQUEST, path, "version is required"));
    };

    let mut store = state.store.write().await;
    let record = store
        .find_mut(collection.name, &id)
        .ok_or_else(|| not_found(path))?;
    let current = record["version"].as_i64().unwrap_or_default();
    if version != current {
        return Err(error(
            StatusCode::CONFLICT,
            path,
            format!("version {version} is stale, current version is {current}"),
        ));
    }

    let mut next = body;
    for key in [
        "id",
        "organizationId",
        "createdDate",
        "archived",
        "voucherStatus",
        "files",
    ] {
        if let Some(value) = record.get(key) {
            next[key] = value.clone();
        }
    }
    next["version"] = Value::from(current + 1);
    next["updatedDate"] = Value::from(now());
    *record = next;
    debug!(resource = collection.name, %id, version = current + 1, "updated record");
    Ok(Json(action_result(&headers, collection.name, record)).into_response())
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    matched: MatchedPath,
    uri: Uri,
    Path(id): Path<String>,
) -> HandlerResult {
    let path = uri.path();
    let collection = collection_for(&matched).ok_or_else(|| not_found(path))?;
    let mut store = state.store.write().await;
    let records = store
        .records
        .get_mut(collection.name)
        .ok_or_else(|| not_found(path))?;
    let position = records
        .iter()
        .position(|record| record["id"] == id.as_str())
        .ok_or_else(|| not_found(path))?;
    records.remove(position);
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn render_pdf(resource: &str, number: &str) -> Vec<u8> {
    format!("%PDF-1.4\n% {resource} {number}\n%%EOF\n").into_bytes()
}

/// `Accept: application/pdf` streams the document; anything else renders it
/// and answers with its `documentFileId`.
pub(crate) async fn document(
    State(state): State<AppState>,
    matched: MatchedPath,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> HandlerResult {
    let path = uri.path();
    let collection = collection_for(&matched).ok_or_else(|| not_found(path))?;
    let wants_pdf = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/pdf"));

    let mut store = state.store.write().await;
    let record = store
        .find_mut(collection.name, &id)
        .ok_or_else(|| not_found(path))?;
    let number = record["voucherNumber"].as_str().unwrap_or(&id).to_string();
    let pdf = render_pdf(collection.name, &number);
    let filename = format!("{number}.pdf");

    if wants_pdf {
        return Ok((
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            pdf,
        )
            .into_response());
    }

    let file_id = match record["files"]["documentFileId"].as_str() {
        Some(existing) => existing.to_string(),
        None => {
            let file_id = Uuid::new_v4().to_string();
            record["files"] = json!({ "documentFileId": file_id });
            file_id
        }
    };
    store.files.insert(
        file_id.clone(),
        StoredFile {
            filename,
            content_type: "application/pdf".to_string(),
            content: pdf,
        },
    );
    Ok(Json(json!({ "documentFileId": file_id })).into_response())
}

async fn read_upload(
    multipart: &mut Multipart,
    path: &str,
) -> Result<(StoredFile, Option<String>), Response> {
    let bad_request = |err: axum::extract::multipart::MultipartError| {
        error(StatusCode::BAD_REQUEST, path, err.to_string())
    };
    let mut file = None;
    let mut file_type = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let content = field.bytes().await.map_err(bad_request)?.to_vec();
                file = Some(StoredFile {
                    filename,
                    content_type,
                    content,
                });
            }
            "type" => file_type = Some(field.text().await.map_err(bad_request)?),
            _ => {}
        }
    }
    let file = file.ok_or_else(|| error(StatusCode::BAD_REQUEST, path, "missing file part"))?;
    Ok((file, file_type))
}

pub(crate) async fn upload_file(
    State(state): State<AppState>,
    uri: Uri,
    mut multipart: Multipart,
) -> HandlerResult {
    let path = uri.path();
    let (file, file_type) = read_upload(&mut multipart, path).await?;
    if file_type.as_deref() != Some("voucher") {
        return Err(error(
            StatusCode::BAD_REQUEST,
            path,
            "type must be 'voucher'",
        ));
    }
    let id = Uuid::new_v4().to_string();
    debug!(%id, filename = %file.filename, bytes = file.content.len(), "stored upload");
    state.store.write().await.files.insert(id.clone(), file);
    Ok((StatusCode::ACCEPTED, Json(json!({ "id": id }))).into_response())
}

pub(crate) async fn upload_voucher_file(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> HandlerResult {
    let path = uri.path();
    let (file, _) = read_upload(&mut multipart, path).await?;
    let file_id = Uuid::new_v4().to_string();

    let mut store = state.store.write().await;
    let voucher = store
        .find_mut("vouchers", &id)
        .ok_or_else(|| not_found(path))?;
    if !voucher["files"].is_array() {
        voucher["files"] = json!([]);
    }
    if let Some(files) = voucher["files"].as_array_mut() {
        files.push(json!({ "id": file_id }));
    }
    store.files.insert(file_id.clone(), file);
    Ok((StatusCode::ACCEPTED, Json(json!({ "id": file_id }))).into_response())
}

pub(crate) async fn download_file(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
) -> HandlerResult {
    let file = state.file(&id).await.ok_or_else(|| not_found(uri.path()))?;
    Ok(([(header::CONTENT_TYPE, file.content_type)], file.content).into_response())
}

pub(crate) async fn profile(State(state): State<AppState>) -> Json<Value> {
    Json(state.store.read().await.profile.clone())
}

pub(crate) async fn countries(State(state): State<AppState>) -> Json<Value> {
    Json(state.store.read().await.countries.clone())
}

pub(crate) async fn payment_conditions(State(state): State<AppState>) -> Json<Value> {
    Json(state.store.read().await.payment_conditions.clone())
}

pub(crate) async fn posting_categories(State(state): State<AppState>) -> Json<Value> {
    Json(state.store.read().await.posting_categories.clone())
}

pub(crate) async fn print_layouts(State(state): State<AppState>) -> Json<Value> {
    Json(state.store.read().await.print_layouts.clone())
}

fn gross_amount(record: &Value) -> f64 {
    record["totalPrice"]["totalGrossAmount"]
        .as_f64()
        .or_else(|| record["totalGrossAmount"].as_f64())
        .unwrap_or_default()
}

fn is_settled(record: &Value) -> bool {
    matches!(record["voucherStatus"].as_str(), Some("paid" | "paidoff"))
}

/// Payment state derived from the stored sales voucher or voucher.
pub(crate) async fn payment(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
) -> HandlerResult {
    let store = state.store.read().await;
    let (collection, record) = COLLECTIONS
        .iter()
        .filter(|collection| collection.sales.is_some() || collection.name == "vouchers")
        .find_map(|collection| store.find(collection.name, &id).map(|record| (collection, record)))
        .ok_or_else(|| not_found(uri.path()))?;
    let settled = is_settled(record);
    Ok(Json(json!({
        "openAmount": if settled { 0.0 } else { gross_amount(record) },
        "currency": "EUR",
        "paymentStatus": if settled { "balanced" } else { "openRevenue" },
        "voucherType": voucher_type_of(collection, record),
        "voucherId": id,
        "voucherNumber": record["voucherNumber"],
        "voucherDate": record["voucherDate"],
        "paymentItems": [],
    }))
    .into_response())
}

fn list_item(collection: &Collection, record: &Value) -> Value {
    let settled = is_settled(record);
    let gross = gross_amount(record);
    let contact_id = match &record["address"]["contactId"] {
        Value::Null => record["contactId"].clone(),
        contact_id => contact_id.clone(),
    };
    json!({
        "id": record["id"],
        "voucherType": voucher_type_of(collection, record),
        "voucherStatus": record["voucherStatus"],
        "voucherNumber": record["voucherNumber"],
        "voucherDate": record["voucherDate"],
        "createdDate": record["createdDate"],
        "updatedDate": record["updatedDate"],
        "dueDate": record["dueDate"],
        "contactId": contact_id,
        "contactName": record["address"]["name"],
        "totalAmount": gross,
        "openAmount": if settled { 0.0 } else { gross },
        "currency": "EUR",
        "archived": record["archived"].as_bool().unwrap_or_default(),
    })
}

fn date_part(value: &Value) -> Option<&str> {
    value.as_str().and_then(|value| value.get(..10))
}

fn matches_list_filters(item: &Value, params: &Params) -> bool {
    params.iter().all(|(key, expected)| {
        let expected = expected.as_str();
        match key.as_str() {
            "voucherType" | "voucherStatus" => {
                expected == "any"
                    || expected
                        .split(',')
                        .any(|wanted| field_eq(&item[key.as_str()], wanted))
            }
            "archived" | "contactId" => field_eq(&item[key.as_str()], expected),
            "voucherDateFrom" => date_part(&item["voucherDate"]).is_some_and(|d| d >= expected),
            "voucherDateTo" => date_part(&item["voucherDate"]).is_some_and(|d| d <= expected),
            "createdDateFrom" => date_part(&item["createdDate"]).is_some_and(|d| d >= expected),
            "createdDateTo" => date_part(&item["createdDate"]).is_some_and(|d| d <= expected),
            "updatedDateFrom" => date_part(&item["updatedDate"]).is_some_and(|d| d >= expected),
            "updatedDateTo" => date_part(&item["updatedDate"]).is_some_and(|d| d <= expected),
            _ => true,
        }
    })
}

pub(crate) async fn voucher_list(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<Params>,
) -> HandlerResult {
    let (page, size) = paging(&params, uri.path())?;
    let store = state.store.read().await;
    let items: Vec<Value> = COLLECTIONS
        .iter()
        .filter(|collection| collection.sales.is_some() || collection.name == "vouchers")
        .flat_map(|collection| {
            store
                .records
                .get(collection.name)
                .into_iter()
                .flatten()
                .map(move |record| list_item(collection, record))
        })
        .filter(|item| matches_list_filters(item, &params))
        .collect();
    Ok(Json(page_of(items, page, size)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_of_reports_position() {
        let records: Vec<Value> = (0..5).map(|n| json!({ "n": n })).collect();
        let page = page_of(records.clone(), 0, 2);
        assert_eq!(page["totalPages"], 3);
        assert_eq!(page["numberOfElements"], 2);
        assert_eq!(page["first"], true);
        assert_eq!(page["last"], false);

        let last = page_of(records, 2, 2);
        assert_eq!(last["content"], json!([{ "n": 4 }]));
        assert_eq!(last["last"], true);
    }

    #[test]
    fn empty_collection_is_single_last_page() {
        let page = page_of(Vec::new(), 0, 25);
        assert_eq!(page["totalPages"], 0);
        assert_eq!(page["last"], true);
    }

    #[test]
    fn page_far_past_the_end_is_empty() {
        let page = page_of(vec![json!({"id": "a"})], usize::MAX, 25);
        assert_eq!(page["content"], json!([]));
        assert_eq!(page["last"], true);
        assert_eq!(page["number"], usize::MAX);
    }

    #[test]
    fn contact_filters_look_into_roles_and_names() {
        let contact = json!({
            "roles": { "customer": { "number": 10001 } },
            "person": { "firstName": "Inge", "lastName": "Musterfrau" },
            "emailAddresses": { "business": ["inge@example.org"] }
        });
        let params = |pairs: &[(&str, &str)]| -> Params {
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        };
        assert!(matches_filters("contacts", &contact, &params(&[("customer", "true")])));
        assert!(!matches_filters("contacts", &contact, &params(&[("vendor", "true")])));
        assert!(matches_filters("contacts", &contact, &params(&[("number", "10001")])));
        assert!(matches_filters("contacts", &contact, &params(&[("name", "muster")])));
        assert!(matches_filters(
            "contacts",
            &contact,
            &params(&[("email", "inge@example.org")])
        ));
    }

    #[test]
    fn top_level_filters_compare_as_strings() {
        let article = json!({ "type": "PRODUCT", "gtin": "9783648170632" });
        let params: Params = [("type".to_string(), "PRODUCT".to_string())].into();
        assert!(matches_filters("articles", &article, &params));
        let params: Params = [("type".to_string(), "SERVICE".to_string())].into();
        assert!(!matches_filters("articles", &article, &params));
    }

    #[test]
    fn list_filters_accept_any_and_date_ranges() {
        let item = json!({
            "voucherType": "invoice",
            "voucherStatus": "open",
            "voucherDate": "2024-03-15T00:00:00.000+01:00",
        });
        let params: Params = [
            ("voucherType".to_string(), "invoice,creditnote".to_string()),
            ("voucherStatus".to_string(), "any".to_string()),
            ("voucherDateFrom".to_string(), "2024-03-01".to_string()),
            ("voucherDateTo".to_string(), "2024-03-31".to_string()),
        ]
        .into();
        assert!(matches_list_filters(&item, &params));

        let params: Params = [("voucherDateFrom".to_string(), "2024-04-01".to_string())].into();
        assert!(!matches_list_filters(&item, &params));
    }
}
