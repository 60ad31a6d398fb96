//! Checklist PDI Endpoints
//!
//! Record save/list/detail plus the two-step photo upload: a presigned URL
//! from the API, then the raw bytes PUT straight to storage. Either step
//! failing surfaces as one upload error; there is no retry.

use gloo_net::http::Request;
use wasm_bindgen::JsValue;

use super::{get_json, post_json, ApiError};
use crate::config;
use crate::models::{
    ChecklistFile, ChecklistPayload, ChecklistRecord, ItemEnvelope, ListEnvelope, PhotoRef,
    PresignResponse, SaveResponse,
};

pub async fn save_checklist(payload: &ChecklistPayload) -> Result<SaveResponse, ApiError> {
    let url = format!("{}/ChecklistPDI/Guardar", config::api_base());
    post_json(&url, &[], payload).await
}

pub async fn list_checklists(
    start_date: &str,
    end_date: &str,
    branch_id: &str,
    warehouse_id: &str,
) -> Result<Vec<ChecklistRecord>, ApiError> {
    let url = format!("{}/ChecklistPDI/Listar", config::api_base());
    let envelope: ListEnvelope<ChecklistRecord> = get_json(
        &url,
        &[
            ("fechaInicio", start_date),
            ("fechaFin", end_date),
            ("idSucursal", branch_id),
            ("idAlmacen", warehouse_id),
        ],
    )
    .await?;
    Ok(envelope.into_items())
}

pub async fn checklist_by_id(id: u32) -> Result<ChecklistRecord, ApiError> {
    let url = format!("{}/ChecklistPDI/{id}", config::api_base());
    let envelope: ItemEnvelope<ChecklistRecord> = get_json(&url, &[]).await?;
    Ok(envelope.into_item())
}

/// Storage folder for a checklist's photos, keyed by stock number.
pub fn folder_for_stock(stock_number: &str) -> String {
    format!("checklist/{}", stock_number.trim())
}

pub async fn list_photos(folder: &str) -> Result<Vec<PhotoRef>, ApiError> {
    let url = format!("{}/ChecklistPDI/Archivos", config::api_base());
    let envelope: ListEnvelope<ChecklistFile> = get_json(&url, &[("folder", folder)]).await?;
    Ok(envelope
        .into_items()
        .into_iter()
        .enumerate()
        .map(|(index, file)| file.into_photo(index))
        .collect())
}

/// Upload one photo: presign, then PUT the bytes with the file's own mime
/// type. The PUT goes to storage directly and carries no bearer header.
pub async fn upload_photo(folder: &str, file: &web_sys::File) -> Result<(), ApiError> {
    let presign_url = format!("{}/ChecklistPDI/UrlSubida", config::api_base());
    let presign: PresignResponse = get_json(
        &presign_url,
        &[
            ("folder", folder),
            ("filename", &file.name()),
            ("contentType", &file.type_()),
        ],
    )
    .await?;
    if presign.url.is_empty() {
        return Err(ApiError::Decode("url de subida vacía".to_string()));
    }

    let request = Request::put(&presign.url)
        .header("Content-Type", &file.type_())
        .body(JsValue::from(file.clone()))
        .map_err(|err| ApiError::Network(err.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status { code: response.status(), message: None });
    }
    Ok(())
}
