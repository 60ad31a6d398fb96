//! Photo Picker Component
//!
//! Collects checklist photos from the gallery or straight from the camera,
//! with local previews. Limits: 10 photos, 5 MB each, images only.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::models::PhotoAttachment;
use crate::store::{store_push_toast, use_app_store, ToastSeverity};

const MAX_PHOTOS: usize = 10;
const MAX_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

/// The cap must count reads already scheduled in this batch: FileReader
/// pushes land asynchronously, so the stored length alone undercounts
/// while a multi-selection is being staged.
fn at_capacity(stored: usize, staged: usize) -> bool {
    stored + staged >= MAX_PHOTOS
}

#[component]
pub fn PhotoPicker(photos: RwSignal<Vec<PhotoAttachment>>) -> impl IntoView {
    let store = use_app_store();
    let next_id = StoredValue::new(0u32);
    let gallery_ref = NodeRef::<leptos::html::Input>::new();
    let camera_ref = NodeRef::<leptos::html::Input>::new();

    let add_files = move |files: web_sys::FileList| {
        let mut staged = 0usize;
        for index in 0..files.length() {
            let Some(file) = files.get(index) else {
                continue;
            };
            if at_capacity(photos.get_untracked().len(), staged) {
                store_push_toast(
                    &store,
                    ToastSeverity::Warn,
                    "Límite de fotos",
                    format!("Máximo {MAX_PHOTOS} fotos por checklist"),
                );
                break;
            }
            if !file.type_().starts_with("image/") {
                store_push_toast(
                    &store,
                    ToastSeverity::Warn,
                    "Archivo no válido",
                    format!("{} no es una imagen", file.name()),
                );
                continue;
            }
            if file.size() > MAX_BYTES {
                store_push_toast(
                    &store,
                    ToastSeverity::Warn,
                    "Archivo muy grande",
                    format!("{} supera los 5 MB", file.name()),
                );
                continue;
            }
            let serial = next_id.get_value();
            next_id.set_value(serial + 1);
            let id = format!("local-{serial}");

            let Ok(reader) = web_sys::FileReader::new() else {
                continue;
            };
            staged += 1;
            let reader_handle = reader.clone();
            let file_handle = file.clone();
            let onloadend = Closure::<dyn FnMut()>::new(move || {
                let preview = reader_handle
                    .result()
                    .ok()
                    .and_then(|value| value.as_string())
                    .unwrap_or_default();
                photos.update(|list| {
                    list.push(PhotoAttachment {
                        id: id.clone(),
                        name: file_handle.name(),
                        preview,
                        file: file_handle.clone(),
                    });
                });
            });
            reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
            onloadend.forget();
            let _ = reader.read_as_data_url(&file);
        }
    };

    let on_pick = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(files) = input.files() {
            add_files(files);
        }
        // same file can be picked again later
        input.set_value("");
    };

    let remove = move |id: &str| {
        photos.update(|list| list.retain(|photo| photo.id != id));
    };

    view! {
        <div class="photo-picker">
            <div class="photo-actions">
                <button
                    type="button"
                    on:click=move |_| {
                        if let Some(input) = gallery_ref.get_untracked() {
                            input.click();
                        }
                    }
                >
                    "Agregar fotos"
                </button>
                <button
                    type="button"
                    on:click=move |_| {
                        if let Some(input) = camera_ref.get_untracked() {
                            input.click();
                        }
                    }
                >
                    "Tomar foto"
                </button>
            </div>
            <input
                node_ref=gallery_ref
                type="file"
                accept="image/*"
                multiple
                class="hidden"
                on:change=on_pick
            />
            <input
                node_ref=camera_ref
                type="file"
                accept="image/*"
                capture="environment"
                class="hidden"
                on:change=on_pick
            />
            <div class="photo-grid">
                <For
                    each=move || photos.get()
                    key=|photo| photo.id.clone()
                    children=move |photo| {
                        let id = photo.id.clone();
                        view! {
                            <figure class="photo-thumb">
                                <img src=photo.preview.clone() alt=photo.name.clone() />
                                <figcaption>{photo.name.clone()}</figcaption>
                                <button type="button" class="photo-remove" on:click=move |_| remove(&id)>
                                    "Quitar"
                                </button>
                            </figure>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_counts_staged_reads() {
        assert!(!at_capacity(0, 0));
        assert!(!at_capacity(9, 0));
        assert!(at_capacity(10, 0));
        // stored length alone is under the cap, staged reads fill it
        assert!(!at_capacity(4, 5));
        assert!(at_capacity(4, 6));
        assert!(at_capacity(0, 10));
    }

    #[test]
    fn test_oversized_selection_stages_up_to_limit() {
        let stored = 0usize;
        let mut staged = 0usize;
        for _ in 0..15 {
            if at_capacity(stored, staged) {
                break;
            }
            staged += 1;
        }
        assert_eq!(staged, MAX_PHOTOS);
    }

    #[test]
    fn test_partial_batch_respects_existing_photos() {
        let stored = 7usize;
        let mut staged = 0usize;
        for _ in 0..15 {
            if at_capacity(stored, staged) {
                break;
            }
            staged += 1;
        }
        assert_eq!(staged, 3);
    }
}
