use std::sync::{Mutex, MutexGuard};

use paddock_core::Page;
use paddock_core::data::dataset_json;
use paddock_protocol::{Interaction, Viewport};
use wasm_bindgen::prelude::*;

/// Dropped pages leave a `None` behind so live handles keep their index.
static PAGES: Mutex<Vec<Option<Page>>> = Mutex::new(Vec::new());

fn pages() -> MutexGuard<'static, Vec<Option<Page>>> {
    PAGES.lock().unwrap_or_else(|e| e.into_inner())
}

fn to_js(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn with_page<T>(handle: usize, f: impl FnOnce(&mut Page) -> T) -> Result<T, JsError> {
    let mut pages = pages();
    let page = pages
        .get_mut(handle)
        .and_then(Option::as_mut)
        .ok_or_else(|| JsError::new("invalid page handle"))?;
    Ok(f(page))
}

/// Create a page with every section at its defaults. Returns a handle
/// (index) for later use. `now` is the host clock in seconds.
#[wasm_bindgen]
pub fn create_page(now: f64, reduced_motion: bool) -> usize {
    let mut pages = pages();
    pages.push(Some(Page::new(now).with_reduced_motion(reduced_motion)));
    pages.len() - 1
}

/// Release a page. Returns false when the handle was unknown or already
/// dropped.
#[wasm_bindgen]
pub fn drop_page(handle: usize) -> bool {
    pages()
        .get_mut(handle)
        .and_then(Option::take)
        .is_some()
}

/// Feed a JSON-encoded `Interaction` to a page. Returns whether anything
/// changed, so the host knows to re-render.
#[wasm_bindgen]
pub fn dispatch(handle: usize, interaction: &str, now: f64) -> Result<bool, JsError> {
    let interaction: Interaction = serde_json::from_str(interaction).map_err(to_js)?;
    with_page(handle, |page| page.dispatch(&interaction, now))
}

/// Render the whole page, returning `{ "commands": [...], "height": h }`
/// as JSON.
#[wasm_bindgen]
pub fn render_page(handle: usize, width: f64, height: f64, now: f64) -> Result<String, JsError> {
    let rendered = with_page(handle, |page| page.render(&Viewport::new(width, height), now))?;
    serde_json::to_string(&rendered).map_err(to_js)
}

/// Section offsets for in-page navigation, as JSON.
#[wasm_bindgen]
pub fn page_layout(handle: usize, width: f64, height: f64, now: f64) -> Result<String, JsError> {
    let slots = with_page(handle, |page| page.layout(&Viewport::new(width, height), now))?;
    serde_json::to_string(&slots).map_err(to_js)
}

/// Whether the host should keep scheduling frames.
#[wasm_bindgen]
pub fn is_animating(handle: usize, now: f64) -> Result<bool, JsError> {
    with_page(handle, |page| page.is_animating(now))
}

#[wasm_bindgen]
pub fn set_reduced_motion(handle: usize, reduced: bool) -> Result<(), JsError> {
    with_page(handle, |page| page.set_reduced_motion(reduced))
}

/// Reset one section (by name) to its defaults.
#[wasm_bindgen]
pub fn unmount_section(handle: usize, section: &str, now: f64) -> Result<(), JsError> {
    let section = section.parse().map_err(to_js)?;
    with_page(handle, |page| page.unmount(section, now))
}

/// A bundled dataset as JSON.
#[wasm_bindgen]
pub fn dataset(name: &str) -> Result<String, JsError> {
    let value = dataset_json(name).map_err(to_js)?;
    serde_json::to_string(&value).map_err(to_js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_through_a_handle() {
        let handle = create_page(0.0, true);
        let click = r#"{"Click":{"TeamTab":"mercedes"}}"#;
        assert!(dispatch(handle, click, 1.0).is_ok_and(|changed| changed));
        assert!(dispatch(handle, click, 2.0).is_ok_and(|changed| !changed));

        let json = render_page(handle, 1024.0, 768.0, 3.0).unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();
        assert!(value["height"].as_f64().is_some_and(|h| h > 0.0));
        assert!(json.contains("George Russell"));
    }

    #[test]
    fn layout_lists_sections_in_order() {
        let handle = create_page(0.0, false);
        let json = page_layout(handle, 1024.0, 768.0, 10.0).unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();
        let ids: Vec<&str> = value
            .as_array()
            .map(|a| a.iter().filter_map(|s| s["id"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(ids, ["hero", "basics", "machine", "grid", "circuits", "rules"]);
    }

    #[test]
    fn dropped_handles_stay_dropped() {
        let first = create_page(0.0, false);
        let second = create_page(0.0, false);
        assert!(drop_page(first));
        assert!(!drop_page(first));
        assert!(!drop_page(usize::MAX));

        let third = create_page(0.0, false);
        assert_ne!(third, first);
        assert!(is_animating(second, 1.0).is_ok());
        assert!(drop_page(second));
        assert!(drop_page(third));
    }

    #[test]
    fn datasets_serialize() {
        let teams = dataset("teams").unwrap_or_default();
        assert!(teams.contains("redbull"));
    }
}
