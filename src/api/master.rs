//! Master-Data Lookups
//!
//! Branch/warehouse/brand/model/color catalogs plus entity resolution for
//! scanned identifiers. Response shapes differ per endpoint: some are
//! enveloped, some bare arrays, and the decoders tolerate both.

use super::{get_json, ApiError};
use crate::config;
use crate::models::{
    Branch, Brand, CarModel, Color, ListEnvelope, Product, Vehicle, Warehouse, WorkOrder,
};

pub async fn branches() -> Result<Vec<Branch>, ApiError> {
    let url = format!("{}/ResumeBySeller/GetSucursal", config::api_base());
    let envelope: ListEnvelope<Branch> = get_json(&url, &[]).await?;
    Ok(envelope.into_items())
}

pub async fn warehouses(branch_id: &str) -> Result<Vec<Warehouse>, ApiError> {
    let url = format!("{}/Almacen/{branch_id}", config::api_base());
    let envelope: ListEnvelope<Warehouse> = get_json(&url, &[]).await?;
    Ok(envelope.into_items())
}

pub async fn work_orders(workshop_id: &str) -> Result<Vec<WorkOrder>, ApiError> {
    let url = format!("{}/Workshop/ListarOrdenesProduccion", config::api_base());
    let envelope: ListEnvelope<WorkOrder> = get_json(&url, &[("idTaller", workshop_id)]).await?;
    Ok(envelope.into_items())
}

pub async fn brands() -> Result<Vec<Brand>, ApiError> {
    let url = format!("{}/ResumeBySeller/GetBrands", config::api_base());
    let envelope: ListEnvelope<Brand> = get_json(&url, &[]).await?;
    Ok(envelope.into_items())
}

pub async fn models_by_brand(brand_id: &str) -> Result<Vec<CarModel>, ApiError> {
    let url = format!("{}/ResumeBySeller/GetModelsByBrand", config::api_base());
    let envelope: ListEnvelope<CarModel> = get_json(&url, &[("idBrand", brand_id)]).await?;
    Ok(envelope.into_items())
}

pub async fn colors() -> Result<Vec<Color>, ApiError> {
    let url = format!("{}/ResumeBySeller/GetColors", config::api_base());
    let envelope: ListEnvelope<Color> = get_json(&url, &[]).await?;
    Ok(envelope.into_items())
}

pub async fn vehicle_by_vin(vin: &str) -> Result<Vehicle, ApiError> {
    let url = format!("{}/Car/{vin}", config::api_base());
    get_json(&url, &[]).await
}

pub async fn product_by_code(product_id: &str) -> Result<Product, ApiError> {
    let url = format!("{}/Car/product", config::api_base());
    get_json(&url, &[("idProduct", product_id)]).await
}
