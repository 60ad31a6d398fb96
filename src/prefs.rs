//! UI Preference Persistence
//!
//! localStorage keys for the last-used branch/warehouse and the dark-mode
//! flag. Keys keep their original Spanish names so existing installs carry
//! their selections over.

const BRANCH_KEY: &str = "cbSucursal";
const WAREHOUSE_KEY: &str = "cbAlmacen";
const THEME_KEY: &str = "theme";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn read(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

fn write(key: &str, value: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(key, value);
    }
}

pub fn saved_branch() -> Option<String> {
    read(BRANCH_KEY)
}

pub fn save_branch(id: &str) {
    write(BRANCH_KEY, id);
}

pub fn saved_warehouse() -> Option<String> {
    read(WAREHOUSE_KEY)
}

pub fn save_warehouse(id: &str) {
    write(WAREHOUSE_KEY, id);
}

pub fn clear_warehouse() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(WAREHOUSE_KEY);
    }
}

pub fn dark_mode() -> bool {
    read(THEME_KEY).as_deref() == Some("dark")
}

pub fn set_dark_mode(enabled: bool) {
    write(THEME_KEY, if enabled { "dark" } else { "light" });
    apply_theme_class(enabled);
}

/// Re-apply the persisted theme on startup.
pub fn apply_saved_theme() {
    apply_theme_class(dark_mode());
}

fn apply_theme_class(dark: bool) {
    let Some(root) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.document_element())
    else {
        return;
    };
    let class_list = root.class_list();
    let _ = if dark {
        class_list.add_1("dark")
    } else {
        class_list.remove_1("dark")
    };
}
