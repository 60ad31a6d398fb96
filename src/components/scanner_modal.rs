//! Scanner Modal Component
//!
//! Hosts one leptos-scanner session: permission, device pick, decode loop,
//! torch and tap-to-focus. A matched code is emitted to the host form and
//! the scan surface is hidden rather than torn down, so "Escanear de nuevo"
//! can reuse the live stream; the camera is only released when the modal
//! closes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_scanner::{camera, pick_device, run_decode_loop, ScanGate, ScanMode, ScanPhase};

use crate::store::{store_push_toast, use_app_store, ToastSeverity};

#[component]
pub fn ScannerModal(
    open: RwSignal<bool>,
    /// Offer the 1D-barcode mode next to QR
    #[prop(optional)]
    allow_barcodes: bool,
    #[prop(into)] on_code: Callback<String>,
) -> impl IntoView {
    let store = use_app_store();
    let video_ref = NodeRef::<leptos::html::Video>::new();
    let phase = RwSignal::new(ScanPhase::Idle);
    let mode = RwSignal::new(ScanMode::Qr);
    let torch = RwSignal::new(false);
    let last_code = RwSignal::new(String::new());
    // bumping the generation cancels whatever loop is running
    let (generation, set_generation) = signal(0u32);
    let gate = StoredValue::new(ScanGate::new());

    let start_loop = move || {
        let Some(video) = video_ref.get_untracked() else {
            return;
        };
        let current = generation.get_untracked() + 1;
        set_generation.set(current);
        phase.set(ScanPhase::Scanning);
        spawn_local(async move {
            let outcome =
                run_decode_loop(video, mode.get_untracked(), gate, current, generation, move |code| {
                    last_code.set(code.clone());
                    phase.set(ScanPhase::Matched);
                    on_code.run(code);
                })
                .await;
            if let Err(err) = outcome {
                // a newer session owns the phase signal once the generation moved on
                if generation.get_untracked() != current {
                    return;
                }
                leptos::logging::error!("decodificador: {err}");
                store_push_toast(&store, ToastSeverity::Error, "Error de escaneo", err.to_string());
                phase.set(ScanPhase::Failed(err.to_string()));
            }
        });
    };

    let start_session = move || {
        let Some(video) = video_ref.get_untracked() else {
            return;
        };
        phase.set(ScanPhase::RequestingPermission);
        gate.set_value(ScanGate::new());
        let scan_mode = mode.get_untracked();
        spawn_local(async move {
            if let Err(err) = camera::request_permission().await {
                leptos::logging::error!("cámara: {err}");
                store_push_toast(&store, ToastSeverity::Error, "Error de cámara", err.user_message());
                phase.set(ScanPhase::Failed(err.user_message().to_string()));
                return;
            }
            let device = match camera::list_video_inputs().await {
                Ok(devices) => pick_device(&devices),
                Err(_) => None,
            };
            let (width, height) = scan_mode.ideal_resolution();
            match camera::open_stream(&video, device.as_deref(), width, height).await {
                Ok(stream) => {
                    camera::apply_quality_constraints(&stream, None).await;
                    start_loop();
                }
                Err(err) => {
                    leptos::logging::error!("cámara: {err}");
                    store_push_toast(&store, ToastSeverity::Error, "Error de cámara", err.user_message());
                    phase.set(ScanPhase::Failed(err.user_message().to_string()));
                }
            }
        });
    };

    let stop_session = move || {
        set_generation.set(generation.get_untracked() + 1);
        if let Some(video) = video_ref.get_untracked() {
            camera::close_stream(&video);
        }
        torch.set(false);
        phase.set(ScanPhase::Idle);
    };

    // the modal markup is always mounted (hidden when closed) so the video
    // node exists before the session starts
    Effect::new(move |_| {
        if open.get() {
            start_session();
        } else {
            stop_session();
        }
    });

    let switch_mode = move |new_mode: ScanMode| {
        if mode.get_untracked() == new_mode {
            return;
        }
        mode.set(new_mode);
        if open.get_untracked() {
            stop_session();
            start_session();
        }
    };

    let toggle_torch = move |_| {
        let enable = !torch.get_untracked();
        torch.set(enable);
        let Some(stream) = video_ref.get_untracked().and_then(|video| video.src_object()) else {
            return;
        };
        spawn_local(async move {
            camera::apply_quality_constraints(&stream, Some(enable)).await;
        });
    };

    let on_tap = move |ev: web_sys::MouseEvent| {
        let Some(video) = video_ref.get_untracked() else {
            return;
        };
        let rect = video.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let norm_x = (ev.client_x() as f64 - rect.left()) / rect.width();
        let norm_y = (ev.client_y() as f64 - rect.top()) / rect.height();
        let Some(stream) = video.src_object() else {
            return;
        };
        spawn_local(async move {
            camera::tap_to_focus(&stream, norm_x, norm_y).await;
        });
    };

    view! {
        <div class=move || if open.get() { "modal-backdrop" } else { "modal-backdrop hidden" }>
            <div class="modal scanner-modal">
                <div class="modal-header">
                    <h2>"Escanear código"</h2>
                    <button class="close-btn" on:click=move |_| open.set(false)>"×"</button>
                </div>

                <Show when=move || allow_barcodes>
                    <div class="mode-switch">
                        <button
                            class=move || if mode.get() == ScanMode::Qr { "mode-btn active" } else { "mode-btn" }
                            on:click=move |_| switch_mode(ScanMode::Qr)
                        >
                            "QR"
                        </button>
                        <button
                            class=move || if mode.get() == ScanMode::Barcode1D { "mode-btn active" } else { "mode-btn" }
                            on:click=move |_| switch_mode(ScanMode::Barcode1D)
                        >
                            "Código de barras"
                        </button>
                    </div>
                </Show>

                <div class=move || {
                    if phase.get() == ScanPhase::Matched { "scan-surface hidden" } else { "scan-surface" }
                }>
                    <video node_ref=video_ref autoplay muted on:click=on_tap></video>
                    <div class="viewfinder"></div>
                </div>

                {move || match phase.get() {
                    ScanPhase::RequestingPermission => Some(view! {
                        <p class="scan-status">"Solicitando acceso a la cámara..."</p>
                    }.into_any()),
                    ScanPhase::Failed(message) => Some(view! {
                        <p class="scan-status scan-error">{message}</p>
                    }.into_any()),
                    ScanPhase::Matched => Some(view! {
                        <div class="scan-result">
                            <p>"Código: " <strong>{last_code.get()}</strong></p>
                            <button on:click=move |_| start_loop()>"Escanear de nuevo"</button>
                        </div>
                    }.into_any()),
                    _ => None,
                }}

                <div class="modal-footer">
                    <button class="torch-btn" on:click=toggle_torch>
                        {move || if torch.get() { "Apagar linterna" } else { "Encender linterna" }}
                    </button>
                    <button on:click=move |_| open.set(false)>"Cerrar"</button>
                </div>
            </div>
        </div>
    }
}
