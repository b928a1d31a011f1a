use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shipdesk_ledger::DocumentFilter;
use shipdesk_office::{BackOffice, OfficeResult};
use shipdesk_types::{Record, RecordExt};

use crate::error::{ServerError, ServerResult};

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub office: BackOffice,
}

impl AppState {
    pub fn new(office: BackOffice) -> Self {
        Self { office }
    }

    /// Run a back office call on the blocking pool.
    async fn run<T, F>(&self, call: F) -> ServerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&BackOffice) -> OfficeResult<T> + Send + 'static,
    {
        let office = self.office.clone();
        tokio::task::spawn_blocking(move || call(&office))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?
            .map_err(ServerError::from)
    }
}

/// Decode a request body regardless of its content type. An empty body
/// reads as `{}`.
fn decode<T: DeserializeOwned>(body: &Bytes) -> ServerResult<T> {
    let bytes: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };
    serde_json::from_slice(bytes).map_err(|e| ServerError::BadRequest(e.to_string()))
}

fn ack(mensaje: impl Into<String>) -> Json<Value> {
    Json(json!({ "mensaje": mensaje.into() }))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": "shipdesk-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---- Packages ----

pub async fn list_packages(State(state): State<AppState>) -> ServerResult<Json<Vec<Record>>> {
    Ok(Json(state.run(|o| o.list_packages()).await?))
}

pub async fn create_package(State(state): State<AppState>, body: Bytes) -> ServerResult<Json<Value>> {
    let package: Record = decode(&body)?;
    state.run(move |o| o.create_package(package)).await?;
    Ok(ack("OK"))
}

pub async fn update_package(State(state): State<AppState>, body: Bytes) -> ServerResult<Json<Value>> {
    let package: Record = decode(&body)?;
    state.run(move |o| o.update_package(package)).await?;
    Ok(ack("OK"))
}

pub async fn delete_package(State(state): State<AppState>, body: Bytes) -> ServerResult<Json<Value>> {
    let body: Record = decode(&body)?;
    let code = body.text("codigo").to_string();
    state.run(move |o| o.delete_package(&code)).await?;
    Ok(ack("OK"))
}

// ---- Audit ----

pub async fn list_audit(State(state): State<AppState>) -> ServerResult<Json<Vec<String>>> {
    Ok(Json(state.run(|o| o.list_audit()).await?))
}

// ---- Transactions ----

pub async fn list_transactions(State(state): State<AppState>) -> ServerResult<Json<Vec<Record>>> {
    Ok(Json(state.run(|o| o.list_transactions()).await?))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<Value>> {
    let transaction: Record = decode(&body)?;
    state.run(move |o| o.create_transaction(transaction)).await?;
    Ok(ack("Transacción registrada"))
}

// ---- Documents ----

pub async fn list_documents(State(state): State<AppState>) -> ServerResult<Json<Vec<Record>>> {
    Ok(Json(state.run(|o| o.list_documents()).await?))
}

pub async fn create_document(State(state): State<AppState>, body: Bytes) -> ServerResult<Json<Value>> {
    let document: Record = decode(&body)?;
    state.run(move |o| o.create_document(document)).await?;
    Ok(ack("Factura creada"))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Record>> {
    Ok(Json(state.run(move |o| o.get_document(&id)).await?))
}

pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ServerResult<Json<Value>> {
    let document: Record = decode(&body)?;
    state.run(move |o| o.update_document(&id, document)).await?;
    Ok(ack("Factura actualizada"))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    state.run(move |o| o.delete_document(&id)).await?;
    Ok(ack("Factura eliminada"))
}

/// Body: `{"tipo": "boleta" | "factura", <customer fields>}`.
pub async fn change_document_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ServerResult<Json<Value>> {
    let extra: Record = decode(&body)?;
    let kind = extra.text("tipo").to_string();
    let document = state
        .run({
            let kind = kind.clone();
            move |o| o.change_document_type(&id, &kind, &extra)
        })
        .await?;
    Ok(Json(json!({
        "mensaje": format!("Documento cambiado a {kind}"),
        "factura": document,
    })))
}

pub async fn duplicate_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    let copy = state.run(move |o| o.duplicate_document(&id)).await?;
    Ok(Json(json!({
        "mensaje": "Factura duplicada",
        "nueva_factura": copy,
    })))
}

pub async fn search_documents(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<Vec<Record>>> {
    let filter: DocumentFilter = decode(&body)?;
    Ok(Json(state.run(move |o| o.search_documents(&filter)).await?))
}

// ---- Users & employees ----

pub async fn list_users(State(state): State<AppState>) -> ServerResult<Json<Vec<Record>>> {
    Ok(Json(state.run(|o| o.list_users()).await?))
}

pub async fn register_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<(StatusCode, Json<Value>)> {
    let user: Record = decode(&body)?;
    state.run(move |o| o.register_user(user)).await?;
    Ok((StatusCode::CREATED, ack("Usuario registrado")))
}

/// Body: `{"usuario": <login>}`.
pub async fn delete_user(State(state): State<AppState>, body: Bytes) -> ServerResult<Json<Value>> {
    let body: Record = decode(&body)?;
    let usuario = body.text("usuario").to_string();
    state.run(move |o| o.delete_user(&usuario)).await?;
    Ok(ack("Usuario eliminado"))
}

pub async fn list_employees(State(state): State<AppState>) -> ServerResult<Json<Vec<Record>>> {
    Ok(Json(state.run(|o| o.list_employees()).await?))
}

/// Body: `{"usuario": <login or email>}`. Answers the account's public
/// fields; the password check stays with the caller.
pub async fn find_account(State(state): State<AppState>, body: Bytes) -> ServerResult<Json<Record>> {
    let body: Record = decode(&body)?;
    let login = body.text("usuario").to_string();
    let account = state.run(move |o| o.find_account(&login)).await?;
    account
        .map(|account| Json(account.summary()))
        .ok_or_else(|| ServerError::NotFound("Cuenta no encontrada".to_string()))
}

pub async fn register_employee(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<(StatusCode, Json<Value>)> {
    let employee: Record = decode(&body)?;
    state.run(move |o| o.register_employee(employee)).await?;
    Ok((StatusCode::CREATED, ack("Empleado registrado")))
}
