//! PDI Equipment Catalog
//!
//! Fixed 40-item presence catalog for the pre-delivery inspection. Values
//! are `SI`/`NO`, with `NC` (no comprobado) as the sentinel for anything the
//! technician left unchecked; the payload always carries all 40 items.

use serde::{Deserialize, Serialize};

pub const VALUE_UNCHECKED: &str = "NC";
pub const VALUE_PRESENT: &str = "SI";
pub const VALUE_ABSENT: &str = "NO";

/// (code, description), codes `EQ001`..`EQ040`
pub const CATALOG: &[(&str, &str)] = &[
    ("EQ001", "TAPA DE PIN"),
    ("EQ002", "ANTENA"),
    ("EQ003", "LLAVES DE CONTACTO/SIMPLES"),
    ("EQ004", "LLAVES DE COMANDO"),
    ("EQ005", "RADIO FABRICA"),
    ("EQ006", "CHIP GPS"),
    ("EQ007", "MANUAL DE USO"),
    ("EQ008", "CENISERO"),
    ("EQ009", "ENCENDEDOR"),
    ("EQ010", "TAPA DE FUSIBLES"),
    ("EQ011", "TARJETA CODE"),
    ("EQ012", "CABLE AUXILIAR"),
    ("EQ013", "COBERTOR"),
    ("EQ014", "LLANTA DE REPUESTO"),
    ("EQ015", "LLAVE DE BOCA"),
    ("EQ016", "LLAVE DE RUEDA"),
    ("EQ017", "TRIANGULO DE SEGURIDAD"),
    ("EQ018", "PIN DE REMOLQUE"),
    ("EQ019", "DESARMADOR"),
    ("EQ020", "ACOPLE"),
    ("EQ021", "LLAVE ALLEN"),
    ("EQ022", "LLAVE TUBULAR"),
    ("EQ023", "EXTINTOR"),
    ("EQ024", "MARTILLO"),
    ("EQ025", "LLAVE FRANCESA"),
    ("EQ026", "LLAVE CORONA"),
    ("EQ027", "ALICATE"),
    ("EQ028", "MANIVELA"),
    ("EQ029", "COPAS DE AROS"),
    ("EQ030", "TACOS METALICOS"),
    ("EQ031", "VASOS DE AROS"),
    ("EQ032", "LLAVEROS"),
    ("EQ033", "MANUAL DE GARANTIA"),
    ("EQ034", "PISOS"),
    ("EQ035", "PORTADOCUMENTO"),
    ("EQ036", "EMBLEMA"),
    ("EQ037", "BOLSA DE SEGUROS"),
    ("EQ038", "VALVULA DE GAS"),
    ("EQ039", "GATA/PALANCA"),
    ("EQ040", "PORTA PLACAS"),
];

/// One equipment row on the wire. `descripcion` only appears on the read
/// path; the save payload carries `codigo` and `valor` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentEntry {
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub valor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

/// Wire entries for the save payload; unset slots serialize as `NC`.
/// `values` is positional over [`CATALOG`].
pub fn payload_entries(values: &[Option<String>]) -> Vec<EquipmentEntry> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(index, (code, _))| EquipmentEntry {
            codigo: (*code).to_string(),
            valor: values
                .get(index)
                .and_then(|value| value.clone())
                .unwrap_or_else(|| VALUE_UNCHECKED.to_string()),
            descripcion: None,
        })
        .collect()
}

/// Description for an equipment code. The read path answers both `EQ001`
/// and bare-numeric `1` forms depending on the endpoint.
pub fn description_for(code: &str) -> Option<&'static str> {
    let number: usize = code.trim().strip_prefix("EQ").unwrap_or(code.trim()).parse().ok()?;
    CATALOG.get(number.checked_sub(1)?).map(|(_, desc)| *desc)
}

/// Detail rows with descriptions filled in; rows without a code or value
/// are dropped, unknown codes fall back to showing the code itself.
pub fn resolve_detail(entries: &[EquipmentEntry]) -> Vec<EquipmentEntry> {
    entries
        .iter()
        .filter(|entry| !entry.codigo.is_empty() && !entry.valor.is_empty())
        .map(|entry| EquipmentEntry {
            codigo: entry.codigo.clone(),
            valor: entry.valor.clone(),
            descripcion: entry.descripcion.clone().or_else(|| {
                Some(
                    description_for(&entry.codigo)
                        .map(str::to_string)
                        .unwrap_or_else(|| entry.codigo.clone()),
                )
            }),
        })
        .collect()
}

/// Ceil split into the two display columns.
pub fn split_columns<T: Clone>(items: &[T]) -> (Vec<T>, Vec<T>) {
    let mid = (items.len() + 1) / 2;
    (items[..mid].to_vec(), items[mid..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_forty_items() {
        assert_eq!(CATALOG.len(), 40);
        assert_eq!(CATALOG[0].0, "EQ001");
        assert_eq!(CATALOG[39].0, "EQ040");
    }

    #[test]
    fn test_unset_items_serialize_as_nc() {
        let mut values = vec![None; CATALOG.len()];
        values[2] = Some(VALUE_PRESENT.to_string());

        let entries = payload_entries(&values);
        assert_eq!(entries.len(), 40);
        assert_eq!(entries[0].valor, "NC");
        assert_eq!(entries[2].valor, "SI");

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json, serde_json::json!({"codigo": "EQ001", "valor": "NC"}));
    }

    #[test]
    fn test_payload_covers_catalog_when_values_short() {
        let entries = payload_entries(&[]);
        assert_eq!(entries.len(), 40);
        assert!(entries.iter().all(|entry| entry.valor == "NC"));
    }

    #[test]
    fn test_description_accepts_both_code_forms() {
        assert_eq!(description_for("EQ007"), Some("MANUAL DE USO"));
        assert_eq!(description_for("7"), Some("MANUAL DE USO"));
        assert_eq!(description_for("EQ040"), Some("PORTA PLACAS"));
        assert_eq!(description_for("40"), Some("PORTA PLACAS"));
    }

    #[test]
    fn test_description_rejects_out_of_range() {
        assert_eq!(description_for("EQ041"), None);
        assert_eq!(description_for("0"), None);
        assert_eq!(description_for("abc"), None);
    }

    #[test]
    fn test_resolve_detail_fills_descriptions() {
        let entries = vec![
            EquipmentEntry { codigo: "2".into(), valor: "SI".into(), descripcion: None },
            EquipmentEntry { codigo: "EQ023".into(), valor: "NO".into(), descripcion: None },
            EquipmentEntry { codigo: "ZZ".into(), valor: "NC".into(), descripcion: None },
            EquipmentEntry { codigo: String::new(), valor: "SI".into(), descripcion: None },
        ];
        let resolved = resolve_detail(&entries);
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].descripcion.as_deref(), Some("ANTENA"));
        assert_eq!(resolved[1].descripcion.as_deref(), Some("EXTINTOR"));
        // unknown code keeps the code as its label
        assert_eq!(resolved[2].descripcion.as_deref(), Some("ZZ"));
    }

    #[test]
    fn test_split_columns_ceil() {
        let (left, right) = split_columns(&[1, 2, 3, 4, 5]);
        assert_eq!(left, vec![1, 2, 3]);
        assert_eq!(right, vec![4, 5]);

        let (left, right) = split_columns::<u8>(&[]);
        assert!(left.is_empty() && right.is_empty());
    }
}
