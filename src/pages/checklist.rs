//! Checklist PDI Page
//!
//! Pre-delivery inspection form: vehicle identification, the fixed 40-item
//! equipment catalog, transport data and photos. The record saves first;
//! photos then upload concurrently and report one combined outcome, so a
//! slow or failed photo never loses the inspection itself.

use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{CatalogSelect, Menu, PhotoPicker, ScannerModal};
use crate::equipment::{self, VALUE_ABSENT, VALUE_PRESENT};
use crate::models::{
    all_present, summarize_uploads, CatalogOption, ChecklistPayload, PhotoAttachment, UploadSummary,
};
use crate::store::{store_push_toast, use_app_store, ToastSeverity};

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// The backend expects a kilometraje of "0" when the field was left blank.
fn odometer_or_zero(value: String) -> String {
    let value = value.trim().to_string();
    if value.is_empty() {
        "0".to_string()
    } else {
        value
    }
}

#[component]
pub fn ChecklistPage() -> impl IntoView {
    let store = use_app_store();

    let branch = RwSignal::new(String::new());
    let warehouse = RwSignal::new(String::new());
    let brand = RwSignal::new(String::new());
    let model = RwSignal::new(String::new());
    let color = RwSignal::new(String::new());
    let odometer = RwSignal::new(String::new());
    let is_new = RwSignal::new(true);
    let is_active = RwSignal::new(true);
    let chassis_number = RwSignal::new(String::new());
    let stock_number = RwSignal::new(String::new());
    let carrier = RwSignal::new(String::new());
    let driver = RwSignal::new(String::new());
    let arrival_date = RwSignal::new(String::new());
    let observations = RwSignal::new(String::new());
    let technician = RwSignal::new(String::new());
    let reception_date = RwSignal::new(String::new());
    // positional over equipment::CATALOG; None serializes as NC
    let equipment_values = RwSignal::new(vec![None::<String>; equipment::CATALOG.len()]);
    let photos = RwSignal::new(Vec::<PhotoAttachment>::new());
    let scanner_open = RwSignal::new(false);
    let (busy, set_busy) = signal(false);

    let (branch_options, set_branch_options) = signal(Vec::<CatalogOption>::new());
    let (warehouse_options, set_warehouse_options) = signal(Vec::<CatalogOption>::new());
    let (brand_options, set_brand_options) = signal(Vec::<CatalogOption>::new());
    let (model_options, set_model_options) = signal(Vec::<CatalogOption>::new());
    let (color_options, set_color_options) = signal(Vec::<CatalogOption>::new());

    Effect::new(move |_| {
        spawn_local(async move {
            match api::branches().await {
                Ok(list) => set_branch_options.set(
                    list.into_iter().map(|b| CatalogOption::new(b.name, b.id)).collect(),
                ),
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Sucursales",
                    err.user_message("No se pudieron cargar las sucursales"),
                ),
            }
            if let Ok(list) = api::brands().await {
                set_brand_options.set(
                    list.into_iter().map(|b| CatalogOption::new(b.name, b.id)).collect(),
                );
            }
            if let Ok(list) = api::colors().await {
                set_color_options.set(
                    list.into_iter().map(|c| CatalogOption::new(c.name, c.id)).collect(),
                );
            }
        });
    });

    Effect::new(move |_| {
        let branch_id = branch.get();
        warehouse.set(String::new());
        set_warehouse_options.set(Vec::new());
        if branch_id.is_empty() {
            return;
        }
        spawn_local(async move {
            if let Ok(list) = api::warehouses(&branch_id).await {
                set_warehouse_options.set(
                    list.into_iter().map(|w| CatalogOption::new(w.name, w.id)).collect(),
                );
            }
        });
    });

    Effect::new(move |_| {
        let brand_id = brand.get();
        model.set(String::new());
        set_model_options.set(Vec::new());
        if brand_id.is_empty() {
            return;
        }
        spawn_local(async move {
            if let Ok(list) = api::models_by_brand(&brand_id).await {
                set_model_options.set(
                    list.into_iter().map(|m| CatalogOption::new(m.name, m.id)).collect(),
                );
            }
        });
    });

    // SI/NO toggle per catalog slot; tapping the active value unsets it
    let toggle = move |index: usize, value: &'static str| {
        equipment_values.update(|values| {
            if let Some(slot) = values.get_mut(index) {
                *slot = if slot.as_deref() == Some(value) {
                    None
                } else {
                    Some(value.to_string())
                };
            }
        });
    };

    let reset_form = move || {
        brand.set(String::new());
        model.set(String::new());
        color.set(String::new());
        odometer.set(String::new());
        is_new.set(true);
        is_active.set(true);
        chassis_number.set(String::new());
        stock_number.set(String::new());
        carrier.set(String::new());
        driver.set(String::new());
        arrival_date.set(String::new());
        observations.set(String::new());
        technician.set(String::new());
        reception_date.set(String::new());
        equipment_values.set(vec![None; equipment::CATALOG.len()]);
        photos.set(Vec::new());
    };

    let save = move |_| {
        let branch_id = branch.get_untracked();
        let warehouse_id = warehouse.get_untracked();
        let brand_id = brand.get_untracked();
        let model_id = model.get_untracked();
        let chassis = chassis_number.get_untracked().trim().to_string();
        let stock = stock_number.get_untracked().trim().to_string();
        if !all_present(&[&branch_id, &warehouse_id, &brand_id, &model_id, &chassis, &stock]) {
            store_push_toast(
                &store,
                ToastSeverity::Warn,
                "Campos incompletos",
                "Complete sucursal, almacén, marca, modelo, chasis y stock",
            );
            return;
        }
        let payload = ChecklistPayload {
            branch: branch_id,
            warehouse: warehouse_id,
            brand: brand_id,
            model: model_id,
            color: optional(color.get_untracked()),
            odometer: odometer_or_zero(odometer.get_untracked()),
            is_new: is_new.get_untracked(),
            is_active: is_active.get_untracked(),
            chassis_number: chassis,
            stock_number: stock.clone(),
            equipment: equipment::payload_entries(&equipment_values.get_untracked()),
            carrier: carrier.get_untracked().trim().to_string(),
            driver: driver.get_untracked().trim().to_string(),
            arrival_date: optional(arrival_date.get_untracked()),
            observations: observations.get_untracked().trim().to_string(),
            technician: technician.get_untracked().trim().to_string(),
            reception_date: optional(reception_date.get_untracked()),
        };
        let batch = photos.get_untracked();
        set_busy.set(true);
        spawn_local(async move {
            match api::save_checklist(&payload).await {
                Ok(response) => {
                    store_push_toast(
                        &store,
                        ToastSeverity::Success,
                        "Checklist guardado",
                        response
                            .message
                            .unwrap_or_else(|| "Checklist registrado correctamente".to_string()),
                    );
                    let folder = api::folder_for_stock(&stock);
                    let uploads = batch.iter().map(|photo| {
                        let folder = folder.clone();
                        let file = photo.file.clone();
                        async move { api::upload_photo(&folder, &file).await }
                    });
                    let results = join_all(uploads).await;
                    let summary = summarize_uploads(&results);
                    match &summary {
                        UploadSummary::NoPhotos => {}
                        UploadSummary::AllOk(_) => store_push_toast(
                            &store,
                            ToastSeverity::Success,
                            "Fotos subidas",
                            summary.detail_message(),
                        ),
                        UploadSummary::Partial { .. } => store_push_toast(
                            &store,
                            ToastSeverity::Warn,
                            "Subida parcial",
                            summary.detail_message(),
                        ),
                        UploadSummary::AllFailed(_) => store_push_toast(
                            &store,
                            ToastSeverity::Error,
                            "Error al subir fotos",
                            summary.detail_message(),
                        ),
                    }
                    reset_form();
                }
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Checklist",
                    err.user_message("No se pudo guardar el checklist"),
                ),
            }
            set_busy.set(false);
        });
    };

    let equipment_rows = move |range: std::ops::Range<usize>| {
        equipment::CATALOG[range.clone()]
            .iter()
            .zip(range)
            .map(|((_, description), index)| {
                view! {
                    <div class="equipment-row">
                        <span class="equipment-name">{*description}</span>
                        <button
                            type="button"
                            class=move || {
                                let active = equipment_values
                                    .with(|values| values[index].as_deref() == Some(VALUE_PRESENT));
                                if active { "eq-btn eq-yes active" } else { "eq-btn eq-yes" }
                            }
                            on:click=move |_| toggle(index, VALUE_PRESENT)
                        >
                            "SI"
                        </button>
                        <button
                            type="button"
                            class=move || {
                                let active = equipment_values
                                    .with(|values| values[index].as_deref() == Some(VALUE_ABSENT));
                                if active { "eq-btn eq-no active" } else { "eq-btn eq-no" }
                            }
                            on:click=move |_| toggle(index, VALUE_ABSENT)
                        >
                            "NO"
                        </button>
                    </div>
                }
            })
            .collect_view()
    };

    let half = (equipment::CATALOG.len() + 1) / 2;

    view! {
        <Menu title="Checklist PDI" />
        <main class="page">
            <section class="form-grid">
                <CatalogSelect
                    label="Sucursal"
                    options=branch_options
                    value=branch
                    placeholder="Seleccione sucursal"
                />
                <CatalogSelect
                    label="Almacén"
                    options=warehouse_options
                    value=warehouse
                    placeholder="Seleccione almacén"
                />
                <CatalogSelect
                    label="Marca"
                    options=brand_options
                    value=brand
                    placeholder="Seleccione marca"
                />
                <CatalogSelect
                    label="Modelo"
                    options=model_options
                    value=model
                    placeholder="Seleccione modelo"
                />
                <CatalogSelect
                    label="Color"
                    options=color_options
                    value=color
                    placeholder="(opcional)"
                />
                <label class="field">
                    <span class="field-label">"Kilometraje"</span>
                    <input
                        type="number"
                        min="0"
                        prop:value=move || odometer.get()
                        on:input=move |ev| odometer.set(event_target_value(&ev))
                    />
                </label>
                <label class="field field-check">
                    <input
                        type="checkbox"
                        prop:checked=move || is_new.get()
                        on:change=move |ev| is_new.set(event_target_checked(&ev))
                    />
                    <span>"Vehículo nuevo"</span>
                </label>
                <label class="field field-check">
                    <input
                        type="checkbox"
                        prop:checked=move || is_active.get()
                        on:change=move |ev| is_active.set(event_target_checked(&ev))
                    />
                    <span>"Activo"</span>
                </label>
            </section>

            <section class="scan-row">
                <label class="field">
                    <span class="field-label">"Nro. de chasis"</span>
                    <input
                        type="text"
                        prop:value=move || chassis_number.get()
                        on:input=move |ev| chassis_number.set(event_target_value(&ev))
                    />
                </label>
                <button on:click=move |_| scanner_open.set(true)>"Escanear"</button>
                <label class="field">
                    <span class="field-label">"Nro. de stock"</span>
                    <input
                        type="text"
                        prop:value=move || stock_number.get()
                        on:input=move |ev| stock_number.set(event_target_value(&ev))
                    />
                </label>
            </section>

            <section class="equipment-section">
                <h2>"Equipamiento"</h2>
                <div class="equipment-columns">
                    <div class="equipment-column">{equipment_rows(0..half)}</div>
                    <div class="equipment-column">{equipment_rows(half..equipment::CATALOG.len())}</div>
                </div>
            </section>

            <section class="form-grid">
                <label class="field">
                    <span class="field-label">"Transportista"</span>
                    <input
                        type="text"
                        prop:value=move || carrier.get()
                        on:input=move |ev| carrier.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Conductor"</span>
                    <input
                        type="text"
                        prop:value=move || driver.get()
                        on:input=move |ev| driver.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Fecha de llegada"</span>
                    <input
                        type="date"
                        prop:value=move || arrival_date.get()
                        on:input=move |ev| arrival_date.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Fecha de recepción"</span>
                    <input
                        type="date"
                        prop:value=move || reception_date.get()
                        on:input=move |ev| reception_date.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Nombre del técnico"</span>
                    <input
                        type="text"
                        prop:value=move || technician.get()
                        on:input=move |ev| technician.set(event_target_value(&ev))
                    />
                </label>
                <label class="field field-wide">
                    <span class="field-label">"Observaciones"</span>
                    <textarea
                        prop:value=move || observations.get()
                        on:input=move |ev| observations.set(event_target_value(&ev))
                    ></textarea>
                </label>
            </section>

            <section class="photo-section">
                <h2>"Fotos"</h2>
                <PhotoPicker photos=photos />
            </section>

            <div class="action-row">
                <button class="primary" disabled=move || busy.get() on:click=save>
                    {move || if busy.get() { "Guardando..." } else { "Guardar checklist" }}
                </button>
                <button on:click=move |_| reset_form()>"Limpiar"</button>
            </div>
        </main>

        <ScannerModal
            open=scanner_open
            on_code=move |code: String| chassis_number.set(code)
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_drops_blank_values() {
        assert_eq!(optional("  ".to_string()), None);
        assert_eq!(optional(" rojo ".to_string()), Some("rojo".to_string()));
    }

    #[test]
    fn test_odometer_defaults_to_zero_when_blank() {
        assert_eq!(odometer_or_zero(String::new()), "0");
        assert_eq!(odometer_or_zero("   ".to_string()), "0");
        assert_eq!(odometer_or_zero(" 15230 ".to_string()), "15230");
    }
}
