//! Frame Decoders
//!
//! Two decode strategies behind one enum: the browser's own BarcodeDetector
//! polled against the live video element, and rxing fed with luma frames
//! grabbed through a canvas. The strategy is fixed when the session starts;
//! a native throw demotes the session to the library path for good.

use std::collections::HashSet;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement};

use crate::ScanMode;

#[wasm_bindgen]
extern "C" {
    /// Shape detection API; not exposed through web-sys yet
    type BarcodeDetector;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<BarcodeDetector, JsValue>;

    #[wasm_bindgen(method)]
    fn detect(this: &BarcodeDetector, source: &JsValue) -> js_sys::Promise;
}

#[derive(serde::Serialize)]
struct DetectorOptions<'a> {
    formats: &'a [&'a str],
}

#[derive(Debug, serde::Deserialize)]
struct DetectedBarcode {
    #[serde(rename = "rawValue")]
    raw_value: String,
}

/// Decode-path failures that matter to the session loop
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The native detector threw; the session must fall back to the library
    #[error("el detector nativo falló")]
    NativeFailed,
    /// The video element has no usable frame yet
    #[error("sin imagen de la cámara")]
    NoFrame,
    /// The decoder itself could not be prepared
    #[error("no se pudo preparar el decodificador")]
    Unavailable,
}

impl ScanMode {
    fn native_formats(self) -> &'static [&'static str] {
        match self {
            ScanMode::Qr => &["qr_code"],
            ScanMode::Barcode1D => &["code_128", "code_39", "ean_13", "upc_a", "itf"],
        }
    }

    fn library_formats(self) -> HashSet<rxing::BarcodeFormat> {
        use rxing::BarcodeFormat::*;
        match self {
            ScanMode::Qr => HashSet::from([QR_CODE]),
            ScanMode::Barcode1D => HashSet::from([CODE_128, CODE_39, EAN_13, UPC_A, ITF]),
        }
    }
}

/// Polling wrapper over the browser's BarcodeDetector
pub struct NativeDetector {
    inner: BarcodeDetector,
}

impl NativeDetector {
    /// None when this browser has no BarcodeDetector global or rejects the
    /// requested format set.
    fn try_create(mode: ScanMode) -> Option<Self> {
        let has_global = Reflect::has(&js_sys::global(), &JsValue::from_str("BarcodeDetector"));
        if !has_global.unwrap_or(false) {
            return None;
        }
        let options = serde_wasm_bindgen::to_value(&DetectorOptions {
            formats: mode.native_formats(),
        })
        .ok()?;
        BarcodeDetector::new(&options).ok().map(|inner| Self { inner })
    }

    /// One detect pass straight over the live video element.
    async fn detect_frame(&self, video: &HtmlVideoElement) -> Result<Option<String>, DecodeError> {
        let promise = self.inner.detect(video.as_ref());
        let detected = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|_| DecodeError::NativeFailed)?;
        let barcodes: Vec<DetectedBarcode> =
            serde_wasm_bindgen::from_value(detected).map_err(|_| DecodeError::NativeFailed)?;
        Ok(barcodes.into_iter().map(|b| b.raw_value).find(|v| !v.is_empty()))
    }
}

use js_sys::Reflect;

/// rxing decoder fed from canvas frame grabs
pub struct LibraryDecoder {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    formats: HashSet<rxing::BarcodeFormat>,
}

impl LibraryDecoder {
    fn create(mode: ScanMode) -> Result<Self, DecodeError> {
        let document = web_sys::window()
            .and_then(|win| win.document())
            .ok_or(DecodeError::Unavailable)?;
        let canvas = document
            .create_element("canvas")
            .map_err(|_| DecodeError::Unavailable)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DecodeError::Unavailable)?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(DecodeError::Unavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DecodeError::Unavailable)?;
        Ok(Self {
            canvas,
            context,
            formats: mode.library_formats(),
        })
    }

    /// One decode attempt over the current frame.
    /// A miss is `Ok(None)`; the loop simply ticks again.
    fn decode_frame(&self, video: &HtmlVideoElement) -> Result<Option<String>, DecodeError> {
        let width = video.video_width();
        let height = video.video_height();
        if width == 0 || height == 0 {
            return Err(DecodeError::NoFrame);
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.context
            .draw_image_with_html_video_element(video, 0.0, 0.0)
            .map_err(|_| DecodeError::NoFrame)?;
        let image = self
            .context
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .map_err(|_| DecodeError::NoFrame)?;
        let luma = rgba_to_luma(&image.data().0);

        let mut hints = rxing::DecodeHints {
            TryHarder: Some(true),
            AlsoInverted: Some(true),
            PossibleFormats: Some(self.formats.clone()),
            ..Default::default()
        };
        match rxing::helpers::detect_in_luma_with_hints(luma, height, width, None, &mut hints) {
            Ok(found) => Ok(Some(found.getText().to_owned())),
            Err(_) => Ok(None),
        }
    }
}

/// ITU-R BT.601 luma from an RGBA canvas readback
fn rgba_to_luma(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .map(|px| ((299 * px[0] as u32 + 587 * px[1] as u32 + 114 * px[2] as u32) / 1000) as u8)
        .collect()
}

/// Decode strategy fixed at session start
pub enum DecoderKind {
    Native(NativeDetector),
    Library(LibraryDecoder),
}

impl DecoderKind {
    /// Pick the strategy for this mode on this browser. QR always uses the
    /// library; 1D prefers the native detector when one exists.
    pub fn select(mode: ScanMode) -> Result<Self, DecodeError> {
        if mode == ScanMode::Barcode1D {
            if let Some(native) = NativeDetector::try_create(mode) {
                return Ok(DecoderKind::Native(native));
            }
        }
        LibraryDecoder::create(mode).map(DecoderKind::Library)
    }

    pub fn tick_ms(&self, mode: ScanMode) -> u32 {
        match self {
            DecoderKind::Native(_) => mode.native_tick_ms(),
            DecoderKind::Library(_) => mode.library_tick_ms(),
        }
    }

    /// Decode one frame; `Err(NativeFailed)` asks the caller to fall back.
    pub async fn decode_frame(&self, video: &HtmlVideoElement) -> Result<Option<String>, DecodeError> {
        match self {
            DecoderKind::Native(native) => native.detect_frame(video).await,
            DecoderKind::Library(library) => library.decode_frame(video),
        }
    }

    /// Permanent switch to the library path after a native failure.
    pub fn fall_back(&mut self, mode: ScanMode) -> Result<(), DecodeError> {
        if matches!(self, DecoderKind::Native(_)) {
            *self = DecoderKind::Library(LibraryDecoder::create(mode)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_conversion_extremes() {
        // black, white, pure red with full alpha
        let rgba = [0u8, 0, 0, 255, 255, 255, 255, 255, 255, 0, 0, 255];
        assert_eq!(rgba_to_luma(&rgba), vec![0, 255, 76]);
    }

    #[test]
    fn test_luma_ignores_trailing_partial_pixel() {
        let rgba = [10u8, 10, 10, 255, 9, 9];
        assert_eq!(rgba_to_luma(&rgba).len(), 1);
    }

    #[test]
    fn test_decode_error_messages_are_user_facing() {
        // these strings end up in the session's failed state verbatim
        assert_eq!(DecodeError::Unavailable.to_string(), "no se pudo preparar el decodificador");
        assert_eq!(DecodeError::NoFrame.to_string(), "sin imagen de la cámara");
        assert_eq!(DecodeError::NativeFailed.to_string(), "el detector nativo falló");
    }

    #[test]
    fn test_mode_format_sets() {
        assert!(ScanMode::Qr.library_formats().contains(&rxing::BarcodeFormat::QR_CODE));
        assert_eq!(ScanMode::Barcode1D.library_formats().len(), 5);
        assert_eq!(ScanMode::Qr.native_formats(), &["qr_code"]);
    }
}
