//! Centralized application configuration: endpoint URL, storage keys,
//! unit set, cache manifest and the 4-day routine definition. All
//! static, loaded once at startup.

use crate::types::{DayRoutine, Exercise, WeightUnit};

/// Google Apps Script endpoint that receives the finished workout.
/// Replace the placeholder with the deployed script URL.
pub const API_URL: &str = "PEGA_AQUI_TU_URL_DE_GOOGLE_APPS_SCRIPT";

/// The unconfigured sentinel value of `API_URL`. Submission refuses to
/// touch the network while the endpoint still equals this.
pub const API_URL_PLACEHOLDER: &str = "PEGA_AQUI_TU_URL_DE_GOOGLE_APPS_SCRIPT";

/// localStorage key holding the committed day number.
pub const STORAGE_KEY_DAY: &str = "currentDay";

pub const TOTAL_DAYS: u8 = 4;

/// Allowed units, default first.
pub const UNITS: [WeightUnit; 2] = [WeightUnit::Kg, WeightUnit::Lbs];

pub const DEFAULT_UNIT: WeightUnit = UNITS[0];

/// Versioned cache bucket of the offline worker. Bumping the version
/// garbage-collects the previous bucket on activate.
pub const CACHE_NAME: &str = "fullbody-v1";

/// Shell resources pre-cached on install so the page loads offline.
pub const SHELL_RESOURCES: &[&str] = &[
    "/",
    "/index.html",
    "/styles.css",
    "/fullbody.js",
    "/manifest.json",
];

/// Cached document served when the network is down and the request has
/// no cached entry.
pub const OFFLINE_FALLBACK: &str = "/index.html";

/// Routine for the given day. Out-of-range days fall back to day 1.
pub fn day_routine(day: u8) -> DayRoutine {
    let day = if (1..=TOTAL_DAYS).contains(&day) { day } else { 1 };
    let exercises = match day {
        1 => vec![
            Exercise::new("French Press", 2),
            Exercise::new("Incline Curl", 2),
            Exercise::new("Cuadri Extencion", 2),
            Exercise::new("Incline smith Press", 2),
            Exercise::new("Bulgara", 2),
            Exercise::new("Laterar Raises", 3),
            Exercise::new("Tricep Ext", 2),
            Exercise::new("Incline Curl", 2),
            Exercise::new("Pulldown", 2),
            Exercise::new("PullOver", 2),
            Exercise::new("Dear Delt", 3),
        ],
        2 => vec![
            Exercise::new("Calves", 3),
            Exercise::new("Hammer Curl", 2),
            Exercise::new("Katana Press", 2),
            Exercise::new("Isquio Ext", 3),
            Exercise::new("Press Machine", 2),
            Exercise::new("Prensa", 2),
            Exercise::new("Lateral Raises", 3),
            Exercise::new("Abductores", 2),
            Exercise::new("Pec deck", 1),
            Exercise::new("Gironda Uni", 2),
            Exercise::new("Pullover", 1),
        ],
        3 => vec![
            Exercise::new("Calves", 3),
            Exercise::new("French Press", 2),
            Exercise::new("Incline Curl", 2),
            Exercise::new("Prensa", 2),
            Exercise::new("Press machine", 2),
            Exercise::new("Pulldown", 2),
            Exercise::new("Cuadri Ext", 2),
            Exercise::new("Pec Deck", 1),
            Exercise::new("Abductores", 2),
            Exercise::new("Pullover", 2),
            Exercise::new("Military Press", 2),
        ],
        _ => vec![
            Exercise::new("Calves", 3),
            Exercise::new("Incline Press", 2),
            Exercise::new("Predicador curl", 2),
            Exercise::new("Katana Press", 2),
            Exercise::new("Isquio Ext", 2),
            Exercise::new("Pec Deck", 2),
            Exercise::new("Hip Trust", 3),
            Exercise::new("Lateral Raises", 3),
            Exercise::new("Gironda Uni", 2),
            Exercise::new("Cuadri Ext", 1),
            Exercise::new("Pullover", 2),
            Exercise::new("Dear Delt", 2),
        ],
    };
    DayRoutine {
        day_number: day,
        exercises,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_day_has_exercises() {
        for day in 1..=TOTAL_DAYS {
            let routine = day_routine(day);
            assert_eq!(routine.day_number, day);
            assert!(!routine.exercises.is_empty());
            assert!(routine.exercises.iter().all(|e| e.sets >= 1));
        }
    }

    #[test]
    fn test_day_two_set_counts() {
        let routine = day_routine(2);
        let counts: Vec<u8> = routine.exercises.iter().map(|e| e.sets).collect();
        assert_eq!(counts, vec![3, 2, 2, 3, 2, 2, 3, 2, 1, 2, 1]);
        assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), 23);
    }

    #[test]
    fn test_out_of_range_day_falls_back_to_day_one() {
        assert_eq!(day_routine(0), day_routine(1));
        assert_eq!(day_routine(TOTAL_DAYS + 1), day_routine(1));
        assert_eq!(day_routine(0).day_number, 1);
    }

    #[test]
    fn test_default_unit_is_first_configured() {
        assert_eq!(DEFAULT_UNIT, UNITS[0]);
    }

    #[test]
    fn test_offline_fallback_is_a_shell_resource() {
        assert!(SHELL_RESOURCES.contains(&OFFLINE_FALLBACK));
    }
}
