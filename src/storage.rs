//! Local persistence. The only thing that survives a reload is the
//! committed day number; the in-memory session itself never does.

use crate::config;

pub fn get_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Persist the committed day. This is the explicit "commit" entry
/// point; `WorkoutSession::set_current_day` stays memory-only.
pub fn save_current_day(day: u8) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(config::STORAGE_KEY_DAY, &day.to_string());
    }
}

/// Day committed by a previous visit, if any. Garbled or out-of-range
/// values read as absent so startup falls back to day 1.
pub fn load_saved_day() -> Option<u8> {
    let raw = get_local_storage()?.get_item(config::STORAGE_KEY_DAY).ok()??;
    parse_saved_day(&raw)
}

fn parse_saved_day(raw: &str) -> Option<u8> {
    raw.trim()
        .parse()
        .ok()
        .filter(|day| (1..=config::TOTAL_DAYS).contains(day))
}
