//! Vehicle Reception Page
//!
//! Scans incoming VINs into a working list and posts one reception per
//! vehicle. Saves run one at a time against a 20 s deadline each; vehicles
//! that fail stay in the list for a retry while the generated document
//! references accumulate in the summary line.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{CatalogSelect, Menu, ScannerModal};
use crate::config;
use crate::dates;
use crate::models::{all_present, join_references, upsert_front, CatalogOption, ReceptionPayload, Vehicle};
use crate::prefs;
use crate::store::{store_push_toast, use_app_store, ToastSeverity};

#[component]
pub fn ReceptionPage() -> impl IntoView {
    let store = use_app_store();

    let branch = RwSignal::new(prefs::saved_branch().unwrap_or_default());
    let warehouse = RwSignal::new(String::new());
    let date = RwSignal::new(dates::format_ymd(dates::today()));
    let vin_input = RwSignal::new(String::new());
    let vehicles = RwSignal::new(Vec::<Vehicle>::new());
    let document = RwSignal::new(String::new());
    let scanner_open = RwSignal::new(false);
    let (busy, set_busy) = signal(false);

    let (branch_options, set_branch_options) = signal(Vec::<CatalogOption>::new());
    let (warehouse_options, set_warehouse_options) = signal(Vec::<CatalogOption>::new());
    // last-used warehouse, applied once its branch's catalog arrives
    let pending_warehouse = StoredValue::new(prefs::saved_warehouse());

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
        });
    });

    Effect::new(move |_| {
        let branch_id = branch.get();
        warehouse.set(String::new());
        set_warehouse_options.set(Vec::new());
        if branch_id.is_empty() {
            return;
        }
        prefs::save_branch(&branch_id);
        prefs::clear_warehouse();
        spawn_local(async move {
            match api::warehouses(&branch_id).await {
                Ok(list) => {
                    let options: Vec<CatalogOption> =
                        list.into_iter().map(|w| CatalogOption::new(w.name, w.id)).collect();
                    if let Some(saved) = pending_warehouse.get_value() {
                        if options.iter().any(|option| option.value == saved) {
                            warehouse.set(saved);
                        }
                        pending_warehouse.set_value(None);
                    }
                    set_warehouse_options.set(options);
                }
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Almacenes",
                    err.user_message("No se pudieron cargar los almacenes"),
                ),
            }
        });
    });

    Effect::new(move |_| {
        let warehouse_id = warehouse.get();
        if !warehouse_id.is_empty() {
            prefs::save_warehouse(&warehouse_id);
        }
    });

    let add_vin = move |code: String, from_scanner: bool| {
        let vin = code.trim().to_string();
        if vin.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::vehicle_by_vin(&vin).await {
                Ok(vehicle) => {
                    vehicles.update(|list| upsert_front(list, vehicle, |v| &v.id));
                    vin_input.set(String::new());
                    if from_scanner {
                        scanner_open.set(false);
                    }
                }
                Err(_) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Vehículo",
                    format!("NO SE PUDO RECONOCER EL NRO DE VIN {vin} EN EL SISTEMA"),
                ),
            }
        });
    };

    let remove_vehicle = move |id: &str| {
        vehicles.update(|list| list.retain(|vehicle| vehicle.id != id));
    };

    let save = move |_| {
        let branch_id = branch.get_untracked();
        let warehouse_id = warehouse.get_untracked();
        let reception_date = date.get_untracked();
        if !all_present(&[&branch_id, &warehouse_id, &reception_date]) {
            store_push_toast(
                &store,
                ToastSeverity::Warn,
                "Campos incompletos",
                "Seleccione sucursal, almacén y fecha",
            );
            return;
        }
        let batch = vehicles.get_untracked();
        if batch.is_empty() {
            store_push_toast(&store, ToastSeverity::Warn, "Sin vehículos", "Escanee al menos un vehículo");
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            let mut documents = Vec::new();
            let mut remaining = Vec::new();
            for vehicle in batch {
                let payload = ReceptionPayload {
                    company_id: config::COMPANY_ID.to_string(),
                    vehicle_id: vehicle.id.clone(),
                    branch_id: branch_id.clone(),
                    warehouse_id: warehouse_id.clone(),
                    date: reception_date.clone(),
                };
                match api::register_reception_with_timeout(&payload).await {
                    Ok(doc) => documents.push(doc),
                    Err(err) => {
                        leptos::logging::warn!("recepción del stock {} falló: {err}", vehicle.id);
                        store_push_toast(
                            &store,
                            ToastSeverity::Error,
                            "Recepción",
                            err.user_message(&format!(
                                "No se pudo guardar el vehículo stock {}",
                                vehicle.id
                            )),
                        );
                        remaining.push(vehicle);
                    }
                }
            }
            if !documents.is_empty() {
                let references = join_references(&documents);
                document.set(references.clone());
                store_push_toast(&store, ToastSeverity::Success, "Recepción registrada", references);
            }
            vehicles.set(remaining);
            set_busy.set(false);
        });
    };

    view! {
        <Menu title="Recepción de Vehículos" />
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
                <label class="field">
                    <span class="field-label">"Fecha"</span>
                    <input
                        type="date"
                        prop:value=move || date.get()
                        on:input=move |ev| date.set(event_target_value(&ev))
                    />
                </label>
            </section>

            <section class="scan-row">
                <label class="field">
                    <span class="field-label">"VIN"</span>
                    <input
                        type="text"
                        prop:value=move || vin_input.get()
                        on:input=move |ev| vin_input.set(event_target_value(&ev))
                    />
                </label>
                <button on:click=move |_| add_vin(vin_input.get_untracked(), false)>"Agregar"</button>
                <button on:click=move |_| scanner_open.set(true)>"Escanear"</button>
            </section>

            <Show when=move || !document.get().is_empty()>
                <p class="document-line">"Documentos: " {move || document.get()}</p>
            </Show>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Stock"</th>
                        <th>"VIN"</th>
                        <th>"Placa"</th>
                        <th>"Marca"</th>
                        <th>"Modelo"</th>
                        <th>"Color"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || vehicles.get()
                        key=|vehicle| vehicle.id.clone()
                        children=move |vehicle| {
                            let id = vehicle.id.clone();
                            view! {
                                <tr>
                                    <td>{vehicle.id.clone()}</td>
                                    <td>{vehicle.vin.clone()}</td>
                                    <td>{vehicle.plate.clone()}</td>
                                    <td>{vehicle.brand.clone()}</td>
                                    <td>{vehicle.model.clone()}</td>
                                    <td>{vehicle.color.clone()}</td>
                                    <td>
                                        <button class="row-remove" on:click=move |_| remove_vehicle(&id)>
                                            "Quitar"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="action-row">
                <button class="primary" disabled=move || busy.get() on:click=save>
                    {move || if busy.get() { "Guardando..." } else { "Registrar recepción" }}
                </button>
            </div>
        </main>

        <ScannerModal
            open=scanner_open
            allow_barcodes=true
            on_code=move |code: String| add_vin(code, true)
        />
    }
}
