//! Shared UI Components

mod catalog_select;
mod menu;
mod photo_picker;
mod scanner_modal;
mod toast;

pub use catalog_select::*;
pub use menu::*;
pub use photo_picker::*;
pub use scanner_modal::*;
pub use toast::*;
