use crate::models::Theme;
use crate::storage::KeyValueStore;
use tracing::warn;

pub const THEME_KEY: &str = "theme";

pub fn load_theme<S: KeyValueStore>(storage: &S) -> Theme {
    storage
        .get(THEME_KEY)
        .and_then(|value| Theme::parse(&value))
        .unwrap_or_default()
}

pub fn toggle_theme<S: KeyValueStore>(storage: &S, current: Theme) -> Theme {
    let next = current.toggled();
    if let Err(err) = storage.set(THEME_KEY, next.as_str()) {
        warn!("failed to persist theme: {err}");
    }
    next
}
