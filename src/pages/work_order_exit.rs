//! Work-Order Checkout Page
//!
//! Vehicles scanned or typed in by VIN accumulate in a working list and
//! leave stock in one posting against an open production work order.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{CatalogSelect, Menu, ScannerModal};
use crate::config;
use crate::dates;
use crate::models::{all_present, push_unique, CatalogOption, MovementLine, VehicleLine};
use crate::store::{store_push_toast, use_app_store, ToastSeverity};

#[component]
pub fn WorkOrderExitPage() -> impl IntoView {
    let store = use_app_store();

    let branch = RwSignal::new(String::new());
    let warehouse = RwSignal::new(String::new());
    let work_order = RwSignal::new(String::new());
    let date = RwSignal::new(dates::format_ymd(dates::today()));
    let vin_input = RwSignal::new(String::new());
    let lines = RwSignal::new(Vec::<VehicleLine>::new());
    let scanner_open = RwSignal::new(false);
    let (busy, set_busy) = signal(false);

    let (branch_options, set_branch_options) = signal(Vec::<CatalogOption>::new());
    let (warehouse_options, set_warehouse_options) = signal(Vec::<CatalogOption>::new());
    let (order_options, set_order_options) = signal(Vec::<CatalogOption>::new());

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
            match api::work_orders(config::WORKSHOP_ID).await {
                Ok(list) => set_order_options.set(
                    list.into_iter().map(|o| CatalogOption::new(o.id.clone(), o.id)).collect(),
                ),
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Órdenes de trabajo",
                    err.user_message("No se pudieron cargar las órdenes de trabajo"),
                ),
            }
        });
    });

    // warehouse catalog follows the branch
    Effect::new(move |_| {
        let branch_id = branch.get();
        warehouse.set(String::new());
        set_warehouse_options.set(Vec::new());
        if branch_id.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::warehouses(&branch_id).await {
                Ok(list) => set_warehouse_options.set(
                    list.into_iter().map(|w| CatalogOption::new(w.name, w.id)).collect(),
                ),
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Almacenes",
                    err.user_message("No se pudieron cargar los almacenes"),
                ),
            }
        });
    });

    let add_vin = move |code: String| {
        let vin = code.trim().to_string();
        if vin.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::vehicle_by_vin(&vin).await {
                Ok(vehicle) => {
                    let line = VehicleLine {
                        vin: if vehicle.vin.is_empty() { vin } else { vehicle.vin },
                        stock: vehicle.id,
                        model: vehicle.model,
                        color: vehicle.color,
                        quantity: 1,
                    };
                    let added = lines
                        .try_update(|list| push_unique(list, line, |l| &l.vin))
                        .unwrap_or(false);
                    if added {
                        vin_input.set(String::new());
                    } else {
                        store_push_toast(
                            &store,
                            ToastSeverity::Warn,
                            "Duplicado",
                            "El vehículo ya está en la lista",
                        );
                    }
                }
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Vehículo",
                    err.user_message("No se encontró el vehículo"),
                ),
            }
        });
    };

    let remove_line = move |vin: &str| {
        lines.update(|list| list.retain(|line| line.vin != vin));
    };

    let save = move |_| {
        let branch_id = branch.get_untracked();
        let warehouse_id = warehouse.get_untracked();
        let order_id = work_order.get_untracked();
        let exit_date = date.get_untracked();
        if !all_present(&[&branch_id, &warehouse_id, &order_id, &exit_date]) {
            store_push_toast(
                &store,
                ToastSeverity::Warn,
                "Campos incompletos",
                "Seleccione sucursal, almacén, orden de trabajo y fecha",
            );
            return;
        }
        let movement: Vec<MovementLine> = lines
            .get_untracked()
            .iter()
            .map(|line| MovementLine { product_id: line.stock.clone(), quantity: line.quantity })
            .collect();
        if movement.is_empty() {
            store_push_toast(&store, ToastSeverity::Warn, "Sin vehículos", "Agregue al menos un vehículo");
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            match api::register_work_order_exit(&branch_id, &warehouse_id, &order_id, &exit_date, &movement)
                .await
            {
                Ok(doc) => {
                    store_push_toast(
                        &store,
                        ToastSeverity::Success,
                        "Salida registrada",
                        format!("Documento {} generado", doc.documento),
                    );
                    lines.set(Vec::new());
                    vin_input.set(String::new());
                    work_order.set(String::new());
                }
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Salida por orden de trabajo",
                    err.user_message("No se pudo registrar la salida"),
                ),
            }
            set_busy.set(false);
        });
    };

    let reset = move |_| {
        lines.set(Vec::new());
        vin_input.set(String::new());
        work_order.set(String::new());
    };

    view! {
        <Menu title="Salida por Orden de Trabajo" />
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
                    label="Orden de trabajo"
                    options=order_options
                    value=work_order
                    placeholder="Seleccione orden"
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
                <button on:click=move |_| add_vin(vin_input.get_untracked())>"Agregar"</button>
                <button on:click=move |_| scanner_open.set(true)>"Escanear"</button>
            </section>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"VIN"</th>
                        <th>"Stock"</th>
                        <th>"Modelo"</th>
                        <th>"Color"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || lines.get()
                        key=|line| line.vin.clone()
                        children=move |line| {
                            let vin = line.vin.clone();
                            view! {
                                <tr>
                                    <td>{line.vin.clone()}</td>
                                    <td>{line.stock.clone()}</td>
                                    <td>{line.model.clone()}</td>
                                    <td>{line.color.clone()}</td>
                                    <td>
                                        <button class="row-remove" on:click=move |_| remove_line(&vin)>
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
                    {move || if busy.get() { "Guardando..." } else { "Registrar salida" }}
                </button>
                <button on:click=reset>"Reiniciar"</button>
            </div>
        </main>

        <ScannerModal
            open=scanner_open
            on_code=move |code: String| vin_input.set(code)
        />
    }
}
