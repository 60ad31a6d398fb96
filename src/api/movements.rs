//! Stock Movements
//!
//! Work-order checkout, inter-branch transfer and vehicle reception
//! postings. Header fields travel as query parameters with the line items
//! in the JSON body, mirroring the API contract.

use futures::future::{self, Either};
use gloo_timers::future::TimeoutFuture;

use super::{post_json, ApiError};
use crate::config;
use crate::models::{ItemEnvelope, MovementDocument, MovementLine, ReceptionDocument, ReceptionPayload};

/// Deadline for a single reception save, so a hung request cannot pin the
/// busy indicator forever
const RECEPTION_TIMEOUT_MS: u32 = 20_000;

pub async fn register_work_order_exit(
    branch_id: &str,
    warehouse_id: &str,
    work_order_id: &str,
    date: &str,
    lines: &[MovementLine],
) -> Result<MovementDocument, ApiError> {
    let url = format!("{}/Car/registroSalidaOT", config::api_base());
    let envelope: ItemEnvelope<MovementDocument> = post_json(
        &url,
        &[
            ("idsucursal", branch_id),
            ("idalmacen", warehouse_id),
            ("idordentrabajo", work_order_id),
            ("fecha", date),
        ],
        &lines,
    )
    .await?;
    Ok(envelope.into_item())
}

pub async fn register_transfer(
    branch_id: &str,
    warehouse_id: &str,
    dest_branch_id: &str,
    dest_warehouse_id: &str,
    date: &str,
    lines: &[MovementLine],
) -> Result<MovementDocument, ApiError> {
    let url = format!("{}/Car/registroTransferenciaAlmacenes", config::api_base());
    let envelope: ItemEnvelope<MovementDocument> = post_json(
        &url,
        &[
            ("idsucursal", branch_id),
            ("idalmacen", warehouse_id),
            ("idsucursaldestino", dest_branch_id),
            ("idalmacendestino", dest_warehouse_id),
            ("fecha", date),
        ],
        &lines,
    )
    .await?;
    Ok(envelope.into_item())
}

pub async fn register_reception(payload: &ReceptionPayload) -> Result<ReceptionDocument, ApiError> {
    let url = format!("{}/Car/registroIngreso", config::api_base());
    let envelope: ItemEnvelope<ReceptionDocument> = post_json(&url, &[], payload).await?;
    Ok(envelope.into_item())
}

/// Reception save raced against a 20 s deadline. The losing request is
/// dropped, not cancelled server-side; the caller keeps the vehicle in its
/// list for a retry.
pub async fn register_reception_with_timeout(
    payload: &ReceptionPayload,
) -> Result<ReceptionDocument, ApiError> {
    let save = Box::pin(register_reception(payload));
    let deadline = Box::pin(TimeoutFuture::new(RECEPTION_TIMEOUT_MS));
    match future::select(save, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(ApiError::Timeout),
    }
}
