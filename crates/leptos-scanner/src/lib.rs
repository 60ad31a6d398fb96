//! Leptos Scanner Utilities
//!
//! Drives a live camera stream into a QR/barcode decode loop and hands
//! accepted codes to the host component. Duplicate suppression and payload
//! normalization live here so every form scans the same way.

pub mod camera;
pub mod decode;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use web_sys::HtmlVideoElement;

pub use camera::CameraError;
pub use decode::{DecodeError, DecoderKind};

/// Lifecycle of one scan session
#[derive(Clone, Debug, PartialEq)]
pub enum ScanPhase {
    Idle,
    RequestingPermission,
    Scanning,
    Matched,
    /// User-facing message of the camera or decoder failure
    Failed(String),
}

/// What the session is looking for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanMode {
    Qr,
    Barcode1D,
}

impl ScanMode {
    /// Delay between decode attempts on the library path
    pub fn library_tick_ms(self) -> u32 {
        match self {
            ScanMode::Qr => 180,
            ScanMode::Barcode1D => 150,
        }
    }

    /// Delay between native detector polls
    pub fn native_tick_ms(self) -> u32 {
        120
    }

    /// Capture resolution to request for this mode (width, height)
    pub fn ideal_resolution(self) -> (u32, u32) {
        match self {
            ScanMode::Qr => (1280, 720),
            ScanMode::Barcode1D => (1920, 1080),
        }
    }
}

/// Suppression window for byte-identical raw payloads
const DUPLICATE_WINDOW_MS: f64 = 1000.0;
/// Shortest raw payload worth accepting
const MIN_CODE_LEN: usize = 5;

/// Canonical form of a raw decode payload.
///
/// Whitespace runs collapse to single spaces and the result is trimmed.
/// When a space survives, the second token is the identifier (printed labels
/// carry a prefix token before the real code).
pub fn normalize_code(raw: &str) -> String {
    let mut tokens = raw.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(_), Some(second)) => second.to_string(),
        (Some(only), None) => only.to_string(),
        _ => String::new(),
    }
}

/// Accept/reject filter applied to every raw decode result.
///
/// Rejects payloads shorter than 5 characters after trimming, and repeats of
/// the previously accepted payload inside a 1 s window, so a code held in
/// front of the camera does not enqueue once per decode tick.
#[derive(Clone, Debug, Default)]
pub struct ScanGate {
    last_raw: Option<String>,
    last_at_ms: f64,
}

impl ScanGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw decode result; answers the normalized code when accepted.
    pub fn accept(&mut self, raw: &str, now_ms: f64) -> Option<String> {
        if raw.trim().len() < MIN_CODE_LEN {
            return None;
        }
        if let Some(last) = &self.last_raw {
            if last == raw && now_ms - self.last_at_ms < DUPLICATE_WINDOW_MS {
                return None;
            }
        }
        self.last_raw = Some(raw.to_string());
        self.last_at_ms = now_ms;
        Some(normalize_code(raw))
    }
}

/// Label markers that identify a rear camera, checked case-insensitively
const REAR_MARKERS: &[&str] = &["back", "rear", "environment", "trasera"];

/// Device id to open, preferring labels that look like a rear camera.
/// `devices` holds (label, device_id) pairs as enumerated by the browser.
pub fn pick_device(devices: &[(String, String)]) -> Option<String> {
    devices
        .iter()
        .find(|(label, _)| {
            let label = label.to_lowercase();
            REAR_MARKERS.iter().any(|marker| label.contains(marker))
        })
        .or_else(|| devices.first())
        .map(|(_, id)| id.clone())
}

/// Drive the decode loop until a code is accepted or the session is stale.
///
/// `generation` is compared against `current` on every tick; a mismatch means
/// the host started a newer session (or closed the modal) and this loop exits
/// silently with `Ok(())`. A native-detector throw switches to the library
/// path for the rest of the session; when no decoder can be prepared at all
/// the error is returned so the host can surface it instead of leaving a
/// live camera with nothing reading it.
pub async fn run_decode_loop<F>(
    video: HtmlVideoElement,
    mode: ScanMode,
    gate: StoredValue<ScanGate>,
    generation: u32,
    current: ReadSignal<u32>,
    on_code: F,
) -> Result<(), DecodeError>
where
    F: Fn(String) + 'static,
{
    let mut decoder = DecoderKind::select(mode)?;
    loop {
        TimeoutFuture::new(decoder.tick_ms(mode)).await;
        if current.get_untracked() != generation {
            return Ok(());
        }
        match decoder.decode_frame(&video).await {
            Ok(Some(raw)) => {
                let accepted = gate
                    .try_update_value(|gate| gate.accept(&raw, js_sys::Date::now()))
                    .flatten();
                if let Some(code) = accepted {
                    on_code(code);
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(DecodeError::NativeFailed) => {
                decoder.fall_back(mode)?;
            }
            Err(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_collapses() {
        assert_eq!(normalize_code("  VIN12345  "), "VIN12345");
        assert_eq!(normalize_code("VIN12345"), "VIN12345");
    }

    #[test]
    fn test_normalize_keeps_token_after_first_space() {
        assert_eq!(normalize_code("PREFIX 8GGH45KL0123456"), "8GGH45KL0123456");
        assert_eq!(normalize_code("PREFIX   8GGH45KL0123456"), "8GGH45KL0123456");
    }

    #[test]
    fn test_normalize_with_three_tokens_keeps_second() {
        assert_eq!(normalize_code("LOT 12345678 EXTRA"), "12345678");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_code("   "), "");
    }

    #[test]
    fn test_gate_rejects_short_payloads() {
        let mut gate = ScanGate::new();
        assert_eq!(gate.accept("abcd", 0.0), None);
        assert_eq!(gate.accept("  ab  ", 0.0), None);
        // length is measured after trimming
        assert!(gate.accept("  abcde  ", 0.0).is_some());
    }

    #[test]
    fn test_gate_suppresses_identical_within_window() {
        let mut gate = ScanGate::new();
        assert_eq!(gate.accept("VIN12345", 0.0), Some("VIN12345".to_string()));
        assert_eq!(gate.accept("VIN12345", 500.0), None);
        assert_eq!(gate.accept("VIN12345", 999.0), None);
    }

    #[test]
    fn test_gate_accepts_identical_after_window() {
        let mut gate = ScanGate::new();
        assert!(gate.accept("VIN12345", 0.0).is_some());
        assert!(gate.accept("VIN12345", 1000.0).is_some());
    }

    #[test]
    fn test_gate_rejection_does_not_extend_window() {
        let mut gate = ScanGate::new();
        assert!(gate.accept("VIN12345", 0.0).is_some());
        // seen again mid-window, still suppressed
        assert_eq!(gate.accept("VIN12345", 900.0), None);
        // window is anchored at the accepted scan, not the suppressed one
        assert!(gate.accept("VIN12345", 1100.0).is_some());
    }

    #[test]
    fn test_gate_accepts_different_content_within_window() {
        let mut gate = ScanGate::new();
        assert!(gate.accept("VIN12345", 0.0).is_some());
        assert!(gate.accept("VIN99999", 100.0).is_some());
    }

    #[test]
    fn test_failed_phase_carries_decoder_message() {
        let phase = ScanPhase::Failed(DecodeError::Unavailable.to_string());
        assert_eq!(
            phase,
            ScanPhase::Failed("no se pudo preparar el decodificador".to_string())
        );
        assert_ne!(phase, ScanPhase::Scanning);
    }

    #[test]
    fn test_pick_device_prefers_rear_labels() {
        let devices = vec![
            ("Front Camera".to_string(), "front".to_string()),
            ("Back Camera".to_string(), "back-1".to_string()),
        ];
        assert_eq!(pick_device(&devices), Some("back-1".to_string()));
    }

    #[test]
    fn test_pick_device_matches_spanish_label() {
        let devices = vec![
            ("Cámara frontal".to_string(), "0".to_string()),
            ("Cámara Trasera".to_string(), "1".to_string()),
        ];
        assert_eq!(pick_device(&devices), Some("1".to_string()));
    }

    #[test]
    fn test_pick_device_falls_back_to_first() {
        let devices = vec![
            ("Webcam A".to_string(), "a".to_string()),
            ("Webcam B".to_string(), "b".to_string()),
        ];
        assert_eq!(pick_device(&devices), Some("a".to_string()));
        assert_eq!(pick_device(&[]), None);
    }
}
