//! Wire Models and Working-List Helpers
//!
//! Data structures matching the remote API. Wire field names are Spanish
//! (and vary per endpoint); struct fields stay English behind serde renames.
//! List endpoints answer either `{success, data: [...]}` or a bare array,
//! so decoding goes through untagged envelopes.

use serde::{Deserialize, Serialize};

use crate::equipment::EquipmentEntry;

// ========================
// Envelopes
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Enveloped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Enveloped { data } => data,
            ListEnvelope::Bare(items) => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ItemEnvelope<T> {
    Enveloped { data: T },
    Bare(T),
}

impl<T> ItemEnvelope<T> {
    pub fn into_item(self) -> T {
        match self {
            ItemEnvelope::Enveloped { data } => data,
            ItemEnvelope::Bare(item) => item,
        }
    }
}

// ========================
// Auth
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<SessionData>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionData {
    pub token: String,
    #[serde(rename = "usuario")]
    pub username: String,
}

// ========================
// Master data
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Branch {
    #[serde(rename = "idSucursal")]
    pub id: String,
    #[serde(rename = "descripcion")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Warehouse {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkOrder {
    #[serde(rename = "idOrdenPro")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Brand {
    #[serde(rename = "idBrand")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarModel {
    #[serde(rename = "idModel")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Color {
    #[serde(rename = "idColor")]
    pub id: String,
    pub name: String,
}

/// Vehicle resolved from a VIN via `GET /Car/{vin}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "idVehiculo", default)]
    pub id: String,
    #[serde(default)]
    pub vin: String,
    #[serde(rename = "placa", default)]
    pub plate: String,
    #[serde(rename = "marca", default)]
    pub brand: String,
    #[serde(rename = "modelo", default)]
    pub model: String,
    #[serde(default)]
    pub color: String,
}

/// Product resolved from a scanned code via `GET /Car/product`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    #[serde(rename = "idProducto", default)]
    pub id: String,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "idMedida", default)]
    pub unit: String,
}

/// Label/value projection feeding the select inputs
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogOption {
    pub label: String,
    pub value: String,
}

impl CatalogOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

// ========================
// Working-list line items
// ========================

/// Resolved vehicle line in the work-order checkout table
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleLine {
    pub vin: String,
    pub stock: String,
    pub model: String,
    pub color: String,
    pub quantity: u32,
}

/// Resolved product line in the transfer table
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLine {
    pub product_id: String,
    pub name: String,
    pub unit: String,
    pub quantity: u32,
}

/// Append `item` unless its key is already present. Answers whether the
/// list changed.
pub fn push_unique<T>(list: &mut Vec<T>, item: T, key: impl Fn(&T) -> &str) -> bool {
    if list.iter().any(|existing| key(existing) == key(&item)) {
        return false;
    }
    list.push(item);
    true
}

/// Prepend `item`, replacing any earlier entry with the same key, so a
/// rescanned identifier moves to the top instead of duplicating.
pub fn upsert_front<T>(list: &mut Vec<T>, item: T, key: impl Fn(&T) -> &str) {
    let id = key(&item).to_string();
    list.retain(|existing| key(existing) != id);
    list.insert(0, item);
}

/// Required-field gate shared by every submit handler.
pub fn all_present(fields: &[&str]) -> bool {
    fields.iter().all(|field| !field.trim().is_empty())
}

// ========================
// Movements
// ========================

/// Minimal wire shape posted for checkout and transfer lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementLine {
    #[serde(rename = "idproducto")]
    pub product_id: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovementDocument {
    #[serde(default)]
    pub documento: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceptionPayload {
    #[serde(rename = "idEmpresa")]
    pub company_id: String,
    #[serde(rename = "idVehiculo")]
    pub vehicle_id: String,
    #[serde(rename = "idSucursal")]
    pub branch_id: String,
    #[serde(rename = "idAlmacen")]
    pub warehouse_id: String,
    #[serde(rename = "fecha")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReceptionDocument {
    #[serde(rename = "tipoDoc", default)]
    pub doc_type: String,
    #[serde(default)]
    pub serie: String,
    #[serde(rename = "numeroDocumento", default)]
    pub number: String,
}

impl ReceptionDocument {
    /// `tipoDoc-serie-numeroDocumento`, skipping empty parts
    pub fn reference(&self) -> String {
        [&self.doc_type, &self.serie, &self.number]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// One summary line for a batch of reception documents.
pub fn join_references(documents: &[ReceptionDocument]) -> String {
    documents
        .iter()
        .map(ReceptionDocument::reference)
        .filter(|reference| !reference.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

// ========================
// Checklist
// ========================

/// Save payload for `POST /ChecklistPDI/Guardar`; keys are PascalCase
/// Spanish as the API defines them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistPayload {
    #[serde(rename = "Sucursal")]
    pub branch: String,
    #[serde(rename = "Almacen")]
    pub warehouse: String,
    #[serde(rename = "Marca")]
    pub brand: String,
    #[serde(rename = "Modelo")]
    pub model: String,
    #[serde(rename = "Color")]
    pub color: Option<String>,
    #[serde(rename = "Kilometraje")]
    pub odometer: String,
    #[serde(rename = "Nuevo")]
    pub is_new: bool,
    #[serde(rename = "Activo")]
    pub is_active: bool,
    #[serde(rename = "NroChasis")]
    pub chassis_number: String,
    #[serde(rename = "NroStock")]
    pub stock_number: String,
    #[serde(rename = "Equipamiento")]
    pub equipment: Vec<EquipmentEntry>,
    #[serde(rename = "Transportista")]
    pub carrier: String,
    #[serde(rename = "Conductor")]
    pub driver: String,
    #[serde(rename = "FechaLlegada")]
    pub arrival_date: Option<String>,
    #[serde(rename = "Observaciones")]
    pub observations: String,
    #[serde(rename = "NombreTecnico")]
    pub technician: String,
    #[serde(rename = "FechaRecepcion")]
    pub reception_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Checklist record as listed and detailed by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChecklistRecord {
    #[serde(rename = "idRecepcionVehiculo", default)]
    pub id: u32,
    #[serde(rename = "sucursalNombre", default)]
    pub branch_name: String,
    #[serde(rename = "almacenNombre", default)]
    pub warehouse_name: String,
    #[serde(rename = "marcaNombre", default)]
    pub brand_name: String,
    #[serde(rename = "modeloNombre", default)]
    pub model_name: String,
    #[serde(rename = "colorNombre", default)]
    pub color_name: String,
    #[serde(rename = "kilometraje", default)]
    pub odometer: String,
    #[serde(rename = "nuevo", default)]
    pub is_new: bool,
    #[serde(rename = "activo", default)]
    pub is_active: bool,
    #[serde(rename = "nroChasis", default)]
    pub chassis_number: String,
    #[serde(rename = "nroStock", default)]
    pub stock_number: String,
    #[serde(rename = "transportista", default)]
    pub carrier: String,
    #[serde(rename = "conductor", default)]
    pub driver: String,
    #[serde(rename = "fechaRecepcion", default)]
    pub reception_date: String,
    #[serde(rename = "fechaRegistro", default)]
    pub registered_at: String,
    #[serde(rename = "fechaLlegada", default)]
    pub arrival_date: String,
    #[serde(rename = "observaciones", default)]
    pub observations: String,
    #[serde(rename = "nombreTecnico", default)]
    pub technician: String,
    #[serde(rename = "detalle", default)]
    pub detail: Vec<EquipmentEntry>,
}

impl ChecklistRecord {
    /// Case-insensitive substring filter over stock/chassis/brand/model.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.stock_number, &self.chassis_number, &self.brand_name, &self.model_name]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PresignResponse {
    #[serde(default)]
    pub url: String,
}

/// Stored file as listed by `GET /ChecklistPDI/Archivos`; field names vary
/// between deployments, hence the aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChecklistFile {
    #[serde(default, alias = "id")]
    pub key: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "nombre", alias = "archivo")]
    pub name: Option<String>,
}

/// Photo reference rendered in the detail gallery
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRef {
    pub id: String,
    pub url: String,
    pub name: String,
}

impl ChecklistFile {
    pub fn into_photo(self, index: usize) -> PhotoRef {
        PhotoRef {
            id: self.key.unwrap_or_else(|| format!("foto-{index}")),
            url: self.url,
            name: self.name.unwrap_or_else(|| "Imagen".to_string()),
        }
    }
}

/// Photo staged in memory before upload
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoAttachment {
    pub id: String,
    pub name: String,
    /// data-URL preview for the thumbnail grid
    pub preview: String,
    pub file: web_sys::File,
}

// ========================
// Upload fan-in
// ========================

/// Outcome partition of a concurrent photo-upload batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSummary {
    NoPhotos,
    AllOk(usize),
    Partial { uploaded: usize, failed: usize },
    AllFailed(usize),
}

pub fn summarize_uploads<T, E>(results: &[Result<T, E>]) -> UploadSummary {
    if results.is_empty() {
        return UploadSummary::NoPhotos;
    }
    let failed = results.iter().filter(|result| result.is_err()).count();
    let uploaded = results.len() - failed;
    match (uploaded, failed) {
        (_, 0) => UploadSummary::AllOk(uploaded),
        (0, _) => UploadSummary::AllFailed(failed),
        _ => UploadSummary::Partial { uploaded, failed },
    }
}

impl UploadSummary {
    /// Toast wording per outcome, matching the save flow's messages
    pub fn detail_message(&self) -> String {
        match self {
            UploadSummary::NoPhotos => String::new(),
            UploadSummary::AllOk(count) => format!("{count} foto(s) subida(s) correctamente"),
            UploadSummary::Partial { uploaded, failed } => {
                format!("{uploaded} subidas, {failed} con error")
            }
            UploadSummary::AllFailed(_) => "No se pudieron subir las fotos".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(vin: &str) -> VehicleLine {
        VehicleLine {
            vin: vin.to_string(),
            stock: "S-1".to_string(),
            model: "M".to_string(),
            color: "ROJO".to_string(),
            quantity: 1,
        }
    }

    #[test]
    fn test_push_unique_rejects_duplicate_identifier() {
        let mut list = vec![line("VIN11111")];
        assert!(!push_unique(&mut list, line("VIN11111"), |v| &v.vin));
        assert_eq!(list.len(), 1);
        assert!(push_unique(&mut list, line("VIN22222"), |v| &v.vin));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_upsert_front_moves_rescans_to_top() {
        let mut list = vec![line("VIN11111"), line("VIN22222")];
        upsert_front(&mut list, line("VIN22222"), |v| &v.vin);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].vin, "VIN22222");
        assert_eq!(list[1].vin, "VIN11111");
    }

    #[test]
    fn test_all_present_blocks_blank_fields() {
        assert!(all_present(&["001", "A-01"]));
        assert!(!all_present(&["001", ""]));
        assert!(!all_present(&["001", "   "]));
        assert!(all_present(&[]));
    }

    #[test]
    fn test_reception_reference_skips_empty_parts() {
        let doc = ReceptionDocument {
            doc_type: "RV".to_string(),
            serie: "001".to_string(),
            number: "000123".to_string(),
        };
        assert_eq!(doc.reference(), "RV-001-000123");

        let partial = ReceptionDocument {
            doc_type: "RV".to_string(),
            serie: String::new(),
            number: "000124".to_string(),
        };
        assert_eq!(partial.reference(), "RV-000124");
    }

    #[test]
    fn test_join_references_separator() {
        let docs = vec![
            ReceptionDocument { doc_type: "RV".into(), serie: "001".into(), number: "1".into() },
            ReceptionDocument { doc_type: String::new(), serie: String::new(), number: String::new() },
            ReceptionDocument { doc_type: "RV".into(), serie: "001".into(), number: "2".into() },
        ];
        assert_eq!(join_references(&docs), "RV-001-1 | RV-001-2");
        assert_eq!(join_references(&[]), "");
    }

    #[test]
    fn test_list_envelope_accepts_both_shapes() {
        let enveloped: ListEnvelope<Branch> =
            serde_json::from_str(r#"{"success":true,"data":[{"idSucursal":"001","descripcion":"CENTRAL"}]}"#)
                .unwrap();
        assert_eq!(enveloped.into_items()[0].id, "001");

        let bare: ListEnvelope<Warehouse> =
            serde_json::from_str(r#"[{"id":"A1","nombre":"PRINCIPAL"}]"#).unwrap();
        assert_eq!(bare.into_items()[0].name, "PRINCIPAL");
    }

    #[test]
    fn test_item_envelope_accepts_both_shapes() {
        let enveloped: ItemEnvelope<MovementDocument> =
            serde_json::from_str(r#"{"success":true,"data":{"documento":"D-1"}}"#).unwrap();
        assert_eq!(enveloped.into_item().documento, "D-1");

        let bare: ItemEnvelope<MovementDocument> =
            serde_json::from_str(r#"{"documento":"D-2"}"#).unwrap();
        assert_eq!(bare.into_item().documento, "D-2");
    }

    #[test]
    fn test_movement_line_wire_names() {
        let json = serde_json::to_value(MovementLine {
            product_id: "8GGH45KL0123456".to_string(),
            quantity: 2,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"idproducto": "8GGH45KL0123456", "cantidad": 2}));
    }

    #[test]
    fn test_checklist_record_filter() {
        let record = ChecklistRecord {
            stock_number: "STK-0042".to_string(),
            chassis_number: "8GGH45KL".to_string(),
            brand_name: "Subaru".to_string(),
            model_name: "Forester".to_string(),
            ..serde_json::from_str("{}").unwrap()
        };
        assert!(record.matches(""));
        assert!(record.matches("stk-00"));
        assert!(record.matches("FORES"));
        assert!(record.matches("8ggh"));
        assert!(!record.matches("toyota"));
    }

    #[test]
    fn test_checklist_file_aliases() {
        let file: ChecklistFile =
            serde_json::from_str(r#"{"id":"k1","url":"https://x/1.jpg","archivo":"uno.jpg"}"#).unwrap();
        let photo = file.into_photo(0);
        assert_eq!(photo.id, "k1");
        assert_eq!(photo.name, "uno.jpg");

        let minimal: ChecklistFile = serde_json::from_str(r#"{"url":"https://x/2.jpg"}"#).unwrap();
        let photo = minimal.into_photo(3);
        assert_eq!(photo.id, "foto-3");
        assert_eq!(photo.name, "Imagen");
    }

    #[test]
    fn test_upload_summary_partition() {
        let ok = Ok::<(), &str>(());
        let err = Err::<(), &str>("x");

        assert_eq!(summarize_uploads(&[ok.clone(), ok.clone(), ok.clone()]), UploadSummary::AllOk(3));
        assert_eq!(
            summarize_uploads(&[ok.clone(), err.clone(), ok.clone()]),
            UploadSummary::Partial { uploaded: 2, failed: 1 }
        );
        assert_eq!(
            summarize_uploads(&[err.clone(), err.clone(), err.clone()]),
            UploadSummary::AllFailed(3)
        );
        assert_eq!(summarize_uploads::<(), &str>(&[]), UploadSummary::NoPhotos);
    }

    #[test]
    fn test_upload_summary_messages() {
        assert_eq!(UploadSummary::AllOk(3).detail_message(), "3 foto(s) subida(s) correctamente");
        assert_eq!(
            UploadSummary::Partial { uploaded: 2, failed: 1 }.detail_message(),
            "2 subidas, 1 con error"
        );
        assert_eq!(UploadSummary::AllFailed(3).detail_message(), "No se pudieron subir las fotos");
    }

    #[test]
    fn test_checklist_payload_wire_keys() {
        let payload = ChecklistPayload {
            branch: "001".into(),
            warehouse: "A1".into(),
            brand: "B1".into(),
            model: "M1".into(),
            color: None,
            odometer: "0".into(),
            is_new: true,
            is_active: false,
            chassis_number: "CH-1".into(),
            stock_number: "STK-1".into(),
            equipment: crate::equipment::payload_entries(&[]),
            carrier: String::new(),
            driver: String::new(),
            arrival_date: None,
            observations: String::new(),
            technician: String::new(),
            reception_date: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["NroChasis"], "CH-1");
        assert_eq!(json["Nuevo"], true);
        assert_eq!(json["Equipamiento"].as_array().unwrap().len(), 40);
        assert_eq!(json["Equipamiento"][0]["valor"], "NC");
        assert_eq!(json["Color"], serde_json::Value::Null);
    }
}
