use polyzone_core::{LayoutStore, ZoneError, ZoneResult};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Layout persistence in `window.localStorage` under a single key.
pub(crate) struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub(crate) fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> ZoneResult<Storage> {
        let window =
            web_sys::window().ok_or_else(|| ZoneError::Storage("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|err| storage_error("local storage unavailable", err))?
            .ok_or_else(|| ZoneError::Storage("local storage disabled".to_string()))
    }
}

fn storage_error(context: &str, err: JsValue) -> ZoneError {
    let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    ZoneError::Storage(format!("{context}: {detail}"))
}

impl LayoutStore for LocalStorageStore {
    fn load_raw(&self) -> ZoneResult<Option<String>> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|err| storage_error("read failed", err))
    }

    fn save_raw(&self, raw: &str) -> ZoneResult<()> {
        self.storage()?
            .set_item(&self.key, raw)
            .map_err(|err| storage_error("write failed", err))
    }

    fn clear(&self) -> ZoneResult<()> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|err| storage_error("remove failed", err))
    }
}
