use polyzone_core::{EditorConfig, OVERRIDE_KEYS};
use web_sys::UrlSearchParams;

/// Editor settings for this page load: defaults plus any `?cell=..&zoom_max=..`
/// overrides from the address bar.
pub(crate) fn editor_config_from_location() -> EditorConfig {
    let mut config = EditorConfig::default();
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    let applied = apply_query(&mut config, &search);
    if !applied.is_empty() {
        gloo::console::log!("config: overrides", applied.join(","));
    }
    config
}

pub(crate) fn apply_query(config: &mut EditorConfig, search: &str) -> Vec<String> {
    let Ok(params) = UrlSearchParams::new_with_str(search) else {
        gloo::console::warn!("config: unreadable query", search.to_string());
        return Vec::new();
    };
    let pairs: Vec<(&str, String)> = OVERRIDE_KEYS
        .iter()
        .filter_map(|key| params.get(key).map(|value| (*key, value)))
        .collect();
    config.apply_overrides(pairs.iter().map(|(key, value)| (*key, value.as_str())))
}
