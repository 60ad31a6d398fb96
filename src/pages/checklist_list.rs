//! Checklist History Page
//!
//! Date-range listing of saved PDI checklists with optional branch and
//! warehouse filters plus a client-side text search. Inverted or
//! unparseable ranges never reach the API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::{CatalogSelect, Menu};
use crate::dates;
use crate::models::{CatalogOption, ChecklistRecord};
use crate::store::{store_push_toast, use_app_store, ToastSeverity};

#[component]
pub fn ChecklistListPage() -> impl IntoView {
    let store = use_app_store();

    let today = dates::today();
    let start_date = RwSignal::new(dates::format_ymd(dates::month_start(today)));
    let end_date = RwSignal::new(dates::format_ymd(dates::month_end(today)));
    let branch = RwSignal::new(String::new());
    let warehouse = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());
    let (records, set_records) = signal(Vec::<ChecklistRecord>::new());
    let (loading, set_loading) = signal(false);

    let (branch_options, set_branch_options) = signal(Vec::<CatalogOption>::new());
    let (warehouse_options, set_warehouse_options) = signal(Vec::<CatalogOption>::new());

    let load = move || {
        let start = start_date.get_untracked();
        let end = end_date.get_untracked();
        if !dates::range_valid(&start, &end) {
            store_push_toast(
                &store,
                ToastSeverity::Warn,
                "Rango de fechas no válido",
                "La fecha de inicio debe ser anterior o igual a la fecha de fin",
            );
            return;
        }
        let branch_id = branch.get_untracked();
        let warehouse_id = warehouse.get_untracked();
        set_loading.set(true);
        spawn_local(async move {
            match api::list_checklists(&start, &end, &branch_id, &warehouse_id).await {
                Ok(list) => set_records.set(list),
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Checklists",
                    err.user_message("No se pudo cargar el historial"),
                ),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(list) = api::branches().await {
                set_branch_options.set(
                    list.into_iter().map(|b| CatalogOption::new(b.name, b.id)).collect(),
                );
            }
        });
        load();
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

    let filtered = Memo::new(move |_| {
        let needle = search.get();
        records
            .get()
            .into_iter()
            .filter(|record| record.matches(&needle))
            .collect::<Vec<_>>()
    });

    let clear_filters = move |_| {
        let today = dates::today();
        start_date.set(dates::format_ymd(dates::month_start(today)));
        end_date.set(dates::format_ymd(dates::month_end(today)));
        branch.set(String::new());
        warehouse.set(String::new());
        search.set(String::new());
    };

    view! {
        <Menu title="Historial de Checklists" />
        <main class="page">
            <section class="form-grid">
                <label class="field">
                    <span class="field-label">"Desde"</span>
                    <input
                        type="date"
                        prop:value=move || start_date.get()
                        on:input=move |ev| start_date.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Hasta"</span>
                    <input
                        type="date"
                        prop:value=move || end_date.get()
                        on:input=move |ev| end_date.set(event_target_value(&ev))
                    />
                </label>
                <CatalogSelect
                    label="Sucursal"
                    options=branch_options
                    value=branch
                    placeholder="Todas las sucursales"
                />
                <CatalogSelect
                    label="Almacén"
                    options=warehouse_options
                    value=warehouse
                    placeholder="Todos los almacenes"
                />
                <label class="field">
                    <span class="field-label">"Buscar"</span>
                    <input
                        type="text"
                        placeholder="Stock, chasis, marca o modelo"
                        prop:value=move || search.get()
                        on:input=move |ev| search.set(event_target_value(&ev))
                    />
                </label>
            </section>

            <div class="action-row">
                <button class="primary" disabled=move || loading.get() on:click=move |_| load()>
                    {move || if loading.get() { "Buscando..." } else { "Buscar" }}
                </button>
                <button on:click=clear_filters>"Limpiar filtros"</button>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Stock"</th>
                        <th>"Chasis"</th>
                        <th>"Marca"</th>
                        <th>"Modelo"</th>
                        <th>"Sucursal"</th>
                        <th>"Fecha"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || filtered.get()
                        key=|record| record.id
                        children=move |record| {
                            let id = record.id;
                            let navigate = use_navigate();
                            view! {
                                <tr
                                    class="row-link"
                                    on:click=move |_| {
                                        navigate(&format!("/detallechecklist/{id}"), Default::default())
                                    }
                                >
                                    <td>{record.stock_number.clone()}</td>
                                    <td>{record.chassis_number.clone()}</td>
                                    <td>{record.brand_name.clone()}</td>
                                    <td>{record.model_name.clone()}</td>
                                    <td>{record.branch_name.clone()}</td>
                                    <td>{record.reception_date.clone()}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <Show when=move || !loading.get() && filtered.get().is_empty()>
                <p class="empty-state">"Sin resultados para los filtros actuales"</p>
            </Show>
        </main>
    }
}
