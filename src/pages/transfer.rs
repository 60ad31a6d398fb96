//! Inter-Branch Transfer Page
//!
//! Moves scanned products from an origin warehouse to a destination
//! warehouse, possibly in another branch. Origin and destination carry
//! independent branch/warehouse cascades over the same catalogs.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{CatalogSelect, Menu, ScannerModal};
use crate::dates;
use crate::models::{all_present, push_unique, CatalogOption, MovementLine, ProductLine};
use crate::store::{store_push_toast, use_app_store, ToastSeverity};

#[component]
pub fn TransferPage() -> impl IntoView {
    let store = use_app_store();

    let origin_branch = RwSignal::new(String::new());
    let origin_warehouse = RwSignal::new(String::new());
    let dest_branch = RwSignal::new(String::new());
    let dest_warehouse = RwSignal::new(String::new());
    let date = RwSignal::new(dates::format_ymd(dates::today()));
    let code_input = RwSignal::new(String::new());
    let lines = RwSignal::new(Vec::<ProductLine>::new());
    let scanner_open = RwSignal::new(false);
    let (busy, set_busy) = signal(false);

    let (branch_options, set_branch_options) = signal(Vec::<CatalogOption>::new());
    let (origin_warehouse_options, set_origin_warehouse_options) = signal(Vec::<CatalogOption>::new());
    let (dest_warehouse_options, set_dest_warehouse_options) = signal(Vec::<CatalogOption>::new());

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

    // one cascade per side, same catalog underneath
    Effect::new(move |_| {
        let branch_id = origin_branch.get();
        origin_warehouse.set(String::new());
        set_origin_warehouse_options.set(Vec::new());
        if branch_id.is_empty() {
            return;
        }
        spawn_local(async move {
            if let Ok(list) = api::warehouses(&branch_id).await {
                set_origin_warehouse_options.set(
                    list.into_iter().map(|w| CatalogOption::new(w.name, w.id)).collect(),
                );
            }
        });
    });

    Effect::new(move |_| {
        let branch_id = dest_branch.get();
        dest_warehouse.set(String::new());
        set_dest_warehouse_options.set(Vec::new());
        if branch_id.is_empty() {
            return;
        }
        spawn_local(async move {
            if let Ok(list) = api::warehouses(&branch_id).await {
                set_dest_warehouse_options.set(
                    list.into_iter().map(|w| CatalogOption::new(w.name, w.id)).collect(),
                );
            }
        });
    });

    let add_code = move |code: String| {
        let code = code.trim().to_string();
        if code.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::product_by_code(&code).await {
                Ok(product) => {
                    let line = ProductLine {
                        product_id: if product.id.is_empty() { code } else { product.id },
                        name: product.name,
                        unit: product.unit,
                        quantity: 1,
                    };
                    let added = lines
                        .try_update(|list| push_unique(list, line, |l| &l.product_id))
                        .unwrap_or(false);
                    if added {
                        code_input.set(String::new());
                    } else {
                        store_push_toast(
                            &store,
                            ToastSeverity::Warn,
                            "Duplicado",
                            "El producto ya está en la lista",
                        );
                    }
                }
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Producto",
                    err.user_message("No se encontró el producto"),
                ),
            }
        });
    };

    let set_quantity = move |product_id: &str, raw: String| {
        let quantity = raw.parse::<u32>().unwrap_or(1).max(1);
        lines.update(|list| {
            if let Some(line) = list.iter_mut().find(|line| line.product_id == product_id) {
                line.quantity = quantity;
            }
        });
    };

    let remove_line = move |product_id: &str| {
        lines.update(|list| list.retain(|line| line.product_id != product_id));
    };

    let save = move |_| {
        let origin_branch_id = origin_branch.get_untracked();
        let origin_warehouse_id = origin_warehouse.get_untracked();
        let dest_branch_id = dest_branch.get_untracked();
        let dest_warehouse_id = dest_warehouse.get_untracked();
        let transfer_date = date.get_untracked();
        if !all_present(&[
            &origin_branch_id,
            &origin_warehouse_id,
            &dest_branch_id,
            &dest_warehouse_id,
            &transfer_date,
        ]) {
            store_push_toast(
                &store,
                ToastSeverity::Warn,
                "Campos incompletos",
                "Seleccione origen, destino y fecha",
            );
            return;
        }
        if origin_branch_id == dest_branch_id && origin_warehouse_id == dest_warehouse_id {
            store_push_toast(
                &store,
                ToastSeverity::Warn,
                "Destino no válido",
                "El destino debe ser distinto al origen",
            );
            return;
        }
        let movement: Vec<MovementLine> = lines
            .get_untracked()
            .iter()
            .map(|line| MovementLine {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
            })
            .collect();
        if movement.is_empty() {
            store_push_toast(&store, ToastSeverity::Warn, "Sin productos", "Agregue al menos un producto");
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            match api::register_transfer(
                &origin_branch_id,
                &origin_warehouse_id,
                &dest_branch_id,
                &dest_warehouse_id,
                &transfer_date,
                &movement,
            )
            .await
            {
                Ok(doc) => {
                    store_push_toast(
                        &store,
                        ToastSeverity::Success,
                        "Traslado registrado",
                        format!("Documento {} generado", doc.documento),
                    );
                    lines.set(Vec::new());
                    code_input.set(String::new());
                }
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Traslado",
                    err.user_message("No se pudo registrar el traslado"),
                ),
            }
            set_busy.set(false);
        });
    };

    view! {
        <Menu title="Traslado entre Establecimientos" />
        <main class="page">
            <section class="form-grid">
                <CatalogSelect
                    label="Sucursal origen"
                    options=branch_options
                    value=origin_branch
                    placeholder="Seleccione sucursal"
                />
                <CatalogSelect
                    label="Almacén origen"
                    options=origin_warehouse_options
                    value=origin_warehouse
                    placeholder="Seleccione almacén"
                />
                <CatalogSelect
                    label="Sucursal destino"
                    options=branch_options
                    value=dest_branch
                    placeholder="Seleccione sucursal"
                />
                <CatalogSelect
                    label="Almacén destino"
                    options=dest_warehouse_options
                    value=dest_warehouse
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
                    <span class="field-label">"Código de producto"</span>
                    <input
                        type="text"
                        prop:value=move || code_input.get()
                        on:input=move |ev| code_input.set(event_target_value(&ev))
                    />
                </label>
                <button on:click=move |_| add_code(code_input.get_untracked())>"Agregar"</button>
                <button on:click=move |_| scanner_open.set(true)>"Escanear"</button>
            </section>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Código"</th>
                        <th>"Descripción"</th>
                        <th>"Unidad"</th>
                        <th>"Cantidad"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || lines.get()
                        key=|line| line.product_id.clone()
                        children=move |line| {
                            let id_for_qty = line.product_id.clone();
                            let id_for_remove = line.product_id.clone();
                            view! {
                                <tr>
                                    <td>{line.product_id.clone()}</td>
                                    <td>{line.name.clone()}</td>
                                    <td>{line.unit.clone()}</td>
                                    <td>
                                        <input
                                            type="number"
                                            min="1"
                                            class="qty-input"
                                            prop:value=line.quantity.to_string()
                                            on:change=move |ev| {
                                                set_quantity(&id_for_qty, event_target_value(&ev))
                                            }
                                        />
                                    </td>
                                    <td>
                                        <button class="row-remove" on:click=move |_| remove_line(&id_for_remove)>
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
                    {move || if busy.get() { "Guardando..." } else { "Registrar traslado" }}
                </button>
            </div>
        </main>

        <ScannerModal
            open=scanner_open
            on_code=move |code: String| code_input.set(code)
        />
    }
}
