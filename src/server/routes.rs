use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::book::{sniff_cover_mime, BookDraft};
use crate::server::AppState;
use crate::storage::CatalogStore;
use crate::{import, Error};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a catalog error onto an HTTP response. Caller mistakes are 400s;
/// everything the store itself failed on is a 500.
fn reject(err: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        Error::InvalidBook(_)
        | Error::ColumnMismatch(_)
        | Error::UnsupportedCover(_)
        | Error::Csv(_) => StatusCode::BAD_REQUEST,
        Error::Storage(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse { error: err.to_string() }))
}

fn not_found(id: i64) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse { error: format!("book {} not found", id) }),
    )
}

pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let store = CatalogStore::open(&state.database_path).map_err(reject)?;
    let books = store.list_books().map_err(reject)?;

    Ok(Json(serde_json::json!({ "books": books })))
}

pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<BookDraft>,
) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, Json<ErrorResponse>)> {
    let store = CatalogStore::open(&state.database_path).map_err(reject)?;
    let id = store.insert_book(&draft).map_err(reject)?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let store = CatalogStore::open(&state.database_path).map_err(reject)?;

    match store.get_book(id).map_err(reject)? {
        Some(book) => Ok(Json(serde_json::to_value(&book).unwrap())),
        None => Err(not_found(id)),
    }
}

pub async fn replace_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(draft): Json<BookDraft>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let store = CatalogStore::open(&state.database_path).map_err(reject)?;

    if store.update_book(id, &draft).map_err(reject)? {
        Ok(Json(serde_json::json!({ "id": id })))
    } else {
        Err(not_found(id))
    }
}

pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let store = CatalogStore::open(&state.database_path).map_err(reject)?;

    if store.delete_book(id).map_err(reject)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

pub async fn get_cover(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let store = CatalogStore::open(&state.database_path).map_err(reject)?;

    match store.get_cover(id).map_err(reject)? {
        Some(bytes) => {
            let mime = sniff_cover_mime(&bytes);
            Ok(([(header::CONTENT_TYPE, mime)], bytes))
        }
        None => Err(not_found(id)),
    }
}

pub async fn import_csv(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let rows = import::read_rows(body.as_bytes()).map_err(reject)?;

    let mut store = CatalogStore::open(&state.database_path).map_err(reject)?;
    let imported = store.append_rows(&rows).map_err(reject)?;

    Ok(Json(serde_json::json!({ "imported": imported })))
}
