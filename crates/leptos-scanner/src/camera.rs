//! Camera Stream Control
//!
//! Permission negotiation, device enumeration and the advisory quality
//! constraints browsers may or may not honor. Focus/zoom/torch dictionary
//! fields are not standardized yet, so they go through `Reflect` instead of
//! typed web-sys setters.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    HtmlVideoElement, MediaDeviceInfo, MediaDeviceKind, MediaStream, MediaStreamConstraints,
    MediaStreamTrack, MediaTrackConstraints,
};

/// How long a single-shot focus keeps control before continuous mode returns
const FOCUS_REVERT_MS: u32 = 400;
/// Modest digital zoom target, clamped into the device range
const ZOOM_TARGET: f64 = 1.25;

/// Camera failures classified from the DOM exception name
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    #[error("permiso de cámara denegado")]
    PermissionDenied,
    #[error("no se encontró ninguna cámara")]
    NotFound,
    #[error("la cámara está en uso")]
    InUse,
    #[error("configuración de cámara no soportada")]
    Unsupported,
    #[error("fallo de cámara: {0}")]
    Other(String),
}

impl CameraError {
    /// Toast wording for each failure class
    pub fn user_message(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied => "Permiso de cámara denegado por el usuario",
            CameraError::NotFound => "No se encontró ninguna cámara en el dispositivo",
            CameraError::InUse => "La cámara está siendo usada por otra aplicación",
            CameraError::Unsupported => "La cámara no soporta la configuración solicitada",
            CameraError::Other(_) => "No se pudo acceder a la cámara",
        }
    }

    fn classify(err: JsValue) -> Self {
        let name = Reflect::get(&err, &JsValue::from_str("name"))
            .ok()
            .and_then(|name| name.as_string())
            .unwrap_or_default();
        match name.as_str() {
            "NotAllowedError" | "PermissionDeniedError" => CameraError::PermissionDenied,
            "NotFoundError" | "DevicesNotFoundError" => CameraError::NotFound,
            "NotReadableError" | "TrackStartError" => CameraError::InUse,
            "OverconstrainedError" | "ConstraintNotSatisfiedError" => CameraError::Unsupported,
            _ => CameraError::Other(name),
        }
    }
}

fn media_devices() -> Result<web_sys::MediaDevices, CameraError> {
    web_sys::window()
        .and_then(|win| win.navigator().media_devices().ok())
        .ok_or_else(|| CameraError::Other("mediaDevices no disponible".to_string()))
}

/// Ask for camera access once, so device labels become readable.
///
/// The probe stream only exists to trigger the permission prompt and is
/// released immediately.
pub async fn request_permission() -> Result<(), CameraError> {
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    constraints.set_audio(&JsValue::FALSE);
    let promise = media_devices()?
        .get_user_media_with_constraints(&constraints)
        .map_err(CameraError::classify)?;
    let stream = JsFuture::from(promise).await.map_err(CameraError::classify)?;
    if let Ok(stream) = stream.dyn_into::<MediaStream>() {
        stop_tracks(&stream);
    }
    Ok(())
}

/// Video input devices as (label, device_id) pairs.
/// Labels are empty until the user has granted permission at least once.
pub async fn list_video_inputs() -> Result<Vec<(String, String)>, CameraError> {
    let promise = media_devices()?.enumerate_devices().map_err(CameraError::classify)?;
    let list = JsFuture::from(promise).await.map_err(CameraError::classify)?;
    let mut inputs = Vec::new();
    for entry in Array::from(&list).iter() {
        if let Ok(info) = entry.dyn_into::<MediaDeviceInfo>() {
            if info.kind() == MediaDeviceKind::Videoinput {
                inputs.push((info.label(), info.device_id()));
            }
        }
    }
    Ok(inputs)
}

/// Open a stream on the given device and attach it to the video element.
///
/// Without a device id the browser is asked for any environment-facing
/// camera. Resolution is a hint, not a requirement.
pub async fn open_stream(
    video: &HtmlVideoElement,
    device_id: Option<&str>,
    ideal_width: u32,
    ideal_height: u32,
) -> Result<MediaStream, CameraError> {
    let track_constraints = MediaTrackConstraints::new();
    match device_id {
        Some(id) => track_constraints.set_device_id(&keyed("exact", &JsValue::from_str(id))),
        None => track_constraints.set_facing_mode(&keyed("ideal", &JsValue::from_str("environment"))),
    }
    track_constraints.set_width(&keyed("ideal", &JsValue::from_f64(ideal_width as f64)));
    track_constraints.set_height(&keyed("ideal", &JsValue::from_f64(ideal_height as f64)));

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(track_constraints.as_ref());
    constraints.set_audio(&JsValue::FALSE);

    let promise = media_devices()?
        .get_user_media_with_constraints(&constraints)
        .map_err(CameraError::classify)?;
    let stream: MediaStream = JsFuture::from(promise)
        .await
        .map_err(CameraError::classify)?
        .dyn_into()
        .map_err(|_| CameraError::Other("stream no válido".to_string()))?;

    video.set_src_object(Some(&stream));
    // iOS refuses to play inline without this attribute
    let _ = video.set_attribute("playsinline", "true");
    if let Ok(playing) = video.play() {
        let _ = JsFuture::from(playing).await;
    }
    Ok(stream)
}

/// Stop every track and detach the stream from the element.
pub fn close_stream(video: &HtmlVideoElement) {
    if let Some(stream) = video.src_object() {
        stop_tracks(&stream);
    }
    video.set_src_object(None);
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// Best-effort focus/exposure/zoom/torch tuning.
///
/// Each capability is probed before it is requested; anything the hardware
/// does not offer is skipped silently. `torch` of `None` leaves the lamp
/// untouched.
pub async fn apply_quality_constraints(stream: &MediaStream, torch: Option<bool>) {
    let Some(track) = first_video_track(stream) else {
        return;
    };
    let capabilities = track_capabilities(&track);
    let advanced = Array::new();

    for mode_field in ["focusMode", "exposureMode", "whiteBalanceMode"] {
        if capability_has(&capabilities, mode_field, "continuous") {
            advanced.push(&keyed(mode_field, &JsValue::from_str("continuous")));
        }
    }
    if let Some(zoom) = clamped_zoom(&capabilities) {
        advanced.push(&keyed("zoom", &JsValue::from_f64(zoom)));
    }
    if let Some(lamp) = torch {
        if capability_flag(&capabilities, "torch") {
            advanced.push(&keyed("torch", &JsValue::from_bool(lamp)));
        }
    }
    if advanced.length() == 0 {
        return;
    }
    apply_advanced(&track, &advanced).await;
}

/// Focus once at the tapped point, then hand control back to continuous.
///
/// Coordinates are normalized over the video surface (0..1).
pub async fn tap_to_focus(stream: &MediaStream, norm_x: f64, norm_y: f64) {
    let Some(track) = first_video_track(stream) else {
        return;
    };
    let capabilities = track_capabilities(&track);
    let single_shot = capability_has(&capabilities, "focusMode", "single-shot");
    let manual = capability_has(&capabilities, "focusMode", "manual");
    if !single_shot && !manual {
        return;
    }

    let point = Object::new();
    let _ = Reflect::set(&point, &"x".into(), &JsValue::from_f64(norm_x.clamp(0.0, 1.0)));
    let _ = Reflect::set(&point, &"y".into(), &JsValue::from_f64(norm_y.clamp(0.0, 1.0)));

    let step = Object::new();
    let mode = if single_shot { "single-shot" } else { "manual" };
    let _ = Reflect::set(&step, &"focusMode".into(), &JsValue::from_str(mode));
    let _ = Reflect::set(&step, &"pointsOfInterest".into(), Array::of1(&point).as_ref());

    let advanced = Array::of1(&step);
    apply_advanced(&track, &advanced).await;

    gloo_timers::future::TimeoutFuture::new(FOCUS_REVERT_MS).await;
    if capability_has(&capabilities, "focusMode", "continuous") {
        let revert = Array::of1(&keyed("focusMode", &JsValue::from_str("continuous")));
        apply_advanced(&track, &revert).await;
    }
}

fn first_video_track(stream: &MediaStream) -> Option<MediaStreamTrack> {
    stream.get_video_tracks().get(0).dyn_into::<MediaStreamTrack>().ok()
}

/// getCapabilities is missing on some engines, so it is looked up dynamically.
fn track_capabilities(track: &MediaStreamTrack) -> JsValue {
    let getter = Reflect::get(track.as_ref(), &"getCapabilities".into())
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    match getter {
        Some(getter) => getter.call0(track.as_ref()).unwrap_or(JsValue::UNDEFINED),
        None => JsValue::UNDEFINED,
    }
}

fn capability_has(capabilities: &JsValue, field: &str, wanted: &str) -> bool {
    Reflect::get(capabilities, &JsValue::from_str(field))
        .map(|values| {
            Array::from(&values)
                .iter()
                .any(|value| value.as_string().as_deref() == Some(wanted))
        })
        .unwrap_or(false)
}

fn capability_flag(capabilities: &JsValue, field: &str) -> bool {
    Reflect::get(capabilities, &JsValue::from_str(field))
        .ok()
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

fn clamped_zoom(capabilities: &JsValue) -> Option<f64> {
    let range = Reflect::get(capabilities, &JsValue::from_str("zoom")).ok()?;
    let min = Reflect::get(&range, &"min".into()).ok()?.as_f64()?;
    let max = Reflect::get(&range, &"max".into()).ok()?.as_f64()?;
    if !(min < max) {
        return None;
    }
    Some(ZOOM_TARGET.clamp(min, max))
}

/// `{ key: value }` constraint dictionary
fn keyed(key: &str, value: &JsValue) -> JsValue {
    let obj = Object::new();
    let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
    obj.into()
}

async fn apply_advanced(track: &MediaStreamTrack, advanced: &Array) {
    let constraints = MediaTrackConstraints::new();
    let _ = Reflect::set(constraints.as_ref(), &"advanced".into(), advanced.as_ref());
    if let Ok(promise) = track.apply_constraints_with_constraints(&constraints) {
        let _ = JsFuture::from(promise).await;
    }
}
