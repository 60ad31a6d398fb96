//! Checklist Detail Page
//!
//! Read-only view of one saved PDI record: header data, the resolved
//! equipment rows in two columns and the photo gallery from storage.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::api;
use crate::components::Menu;
use crate::equipment::{self, EquipmentEntry};
use crate::models::{ChecklistRecord, PhotoRef};
use crate::store::{store_push_toast, use_app_store, ToastSeverity};

#[component]
pub fn ChecklistDetailPage() -> impl IntoView {
    let store = use_app_store();
    let params = use_params_map();
    let navigate = use_navigate();

    let (record, set_record) = signal(None::<ChecklistRecord>);
    let (photos, set_photos) = signal(Vec::<PhotoRef>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let Some(id) = params.with(|p| p.get("id").and_then(|raw| raw.parse::<u32>().ok())) else {
            set_loading.set(false);
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            match api::checklist_by_id(id).await {
                Ok(found) => {
                    let folder = api::folder_for_stock(&found.stock_number);
                    set_record.set(Some(found));
                    if let Ok(gallery) = api::list_photos(&folder).await {
                        set_photos.set(gallery);
                    }
                }
                Err(err) => store_push_toast(
                    &store,
                    ToastSeverity::Error,
                    "Checklist",
                    err.user_message("No se pudo cargar el checklist"),
                ),
            }
            set_loading.set(false);
        });
    });

    let equipment_column = |entries: Vec<EquipmentEntry>| {
        entries
            .into_iter()
            .map(|entry| {
                view! {
                    <div class="equipment-row">
                        <span class="equipment-name">
                            {entry.descripcion.unwrap_or_else(|| entry.codigo.clone())}
                        </span>
                        <span class=format!("eq-value eq-{}", entry.valor.to_lowercase())>
                            {entry.valor.clone()}
                        </span>
                    </div>
                }
            })
            .collect_view()
    };

    let back = move |_| navigate("/listarchecklist", Default::default());

    view! {
        <Menu title="Detalle de Checklist" />
        <main class="page">
            <div class="action-row">
                <button on:click=back>"Volver al historial"</button>
            </div>

            {move || match record.get() {
                Some(record) => {
                    let resolved = equipment::resolve_detail(&record.detail);
                    let (left, right) = equipment::split_columns(&resolved);
                    view! {
                        <section class="detail-grid">
                            <div class="detail-item"><span>"Stock"</span><strong>{record.stock_number.clone()}</strong></div>
                            <div class="detail-item"><span>"Chasis"</span><strong>{record.chassis_number.clone()}</strong></div>
                            <div class="detail-item"><span>"Marca"</span><strong>{record.brand_name.clone()}</strong></div>
                            <div class="detail-item"><span>"Modelo"</span><strong>{record.model_name.clone()}</strong></div>
                            <div class="detail-item"><span>"Color"</span><strong>{record.color_name.clone()}</strong></div>
                            <div class="detail-item"><span>"Sucursal"</span><strong>{record.branch_name.clone()}</strong></div>
                            <div class="detail-item"><span>"Almacén"</span><strong>{record.warehouse_name.clone()}</strong></div>
                            <div class="detail-item"><span>"Kilometraje"</span><strong>{record.odometer.clone()}</strong></div>
                            <div class="detail-item"><span>"Nuevo"</span><strong>{if record.is_new { "Sí" } else { "No" }}</strong></div>
                            <div class="detail-item"><span>"Transportista"</span><strong>{record.carrier.clone()}</strong></div>
                            <div class="detail-item"><span>"Conductor"</span><strong>{record.driver.clone()}</strong></div>
                            <div class="detail-item"><span>"Técnico"</span><strong>{record.technician.clone()}</strong></div>
                            <div class="detail-item"><span>"Fecha de llegada"</span><strong>{record.arrival_date.clone()}</strong></div>
                            <div class="detail-item"><span>"Fecha de recepción"</span><strong>{record.reception_date.clone()}</strong></div>
                            <div class="detail-item field-wide"><span>"Observaciones"</span><strong>{record.observations.clone()}</strong></div>
                        </section>

                        <section class="equipment-section">
                            <h2>"Equipamiento"</h2>
                            <div class="equipment-columns">
                                <div class="equipment-column">{equipment_column(left)}</div>
                                <div class="equipment-column">{equipment_column(right)}</div>
                            </div>
                        </section>

                        <section class="photo-section">
                            <h2>"Fotos"</h2>
                            <div class="photo-grid">
                                {photos
                                    .get()
                                    .into_iter()
                                    .map(|photo| {
                                        view! {
                                            <a href=photo.url.clone() target="_blank" class="photo-thumb">
                                                <img src=photo.url.clone() alt=photo.name.clone() />
                                            </a>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            <Show when=move || photos.get().is_empty()>
                                <p class="empty-state">"Sin fotos registradas"</p>
                            </Show>
                        </section>
                    }
                    .into_any()
                }
                None => view! {
                    <p class="empty-state">
                        {move || if loading.get() { "Cargando..." } else { "Checklist no encontrado" }}
                    </p>
                }
                .into_any(),
            }}
        </main>
    }
}
