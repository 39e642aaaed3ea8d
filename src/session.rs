//! Workout session state: the single owned store of per-set records
//! for the selected day, plus the derived progress counters, view
//! model and spreadsheet snapshot.
//!
//! The store never touches the DOM or localStorage. The UI reads it
//! through the view model and forwards user intents back through the
//! mutators; stale intents (after a day switch) fall through as no-ops.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use crate::config;
use crate::logging;
use crate::types::{ExerciseRow, Progress, SetEntry, SetKey, SetRow, SheetPayload, SheetSet, WeightUnit};

pub struct WorkoutSession {
    current_day: u8,
    entries: BTreeMap<SetKey, SetEntry>,
}

impl WorkoutSession {
    /// Session for the given day with a freshly initialized set map.
    pub fn new(day: u8) -> Self {
        let mut session = Self {
            current_day: 1,
            entries: BTreeMap::new(),
        };
        session.set_current_day(day);
        session.initialize_workout_data();
        session
    }

    pub fn current_day(&self) -> u8 {
        self.current_day
    }

    /// Set the current day in memory only. Out-of-range days are
    /// corrected to day 1 with a console warning, never surfaced.
    pub fn set_current_day(&mut self, day: u8) {
        if day < 1 || day > config::TOTAL_DAYS {
            logging::warn(&format!("Dia invalido: {}. Usando dia 1.", day));
            self.current_day = 1;
        } else {
            self.current_day = day;
        }
    }

    /// Rebuild the set map from the routine of the current day: every
    /// (exercise, set) pair gets a fresh entry, nothing else survives.
    pub fn initialize_workout_data(&mut self) {
        let routine = config::day_routine(self.current_day);
        self.entries.clear();
        for (exercise_index, exercise) in routine.exercises.iter().enumerate() {
            for set_number in 1..=exercise.sets {
                self.entries
                    .insert((exercise_index, set_number), SetEntry::default());
            }
        }
    }

    pub fn reset_workout_data(&mut self) {
        self.clear_workout_data();
    }

    /// Idempotent, safe on already-empty state.
    pub fn clear_workout_data(&mut self) {
        self.entries.clear();
    }

    pub fn update_set_weight(&mut self, exercise_index: usize, set_number: u8, weight: String) {
        if let Some(entry) = self.entries.get_mut(&(exercise_index, set_number)) {
            entry.weight = weight;
        }
    }

    pub fn update_set_unit(&mut self, exercise_index: usize, set_number: u8, unit: WeightUnit) {
        if let Some(entry) = self.entries.get_mut(&(exercise_index, set_number)) {
            entry.unit = unit;
        }
    }

    /// Flip the completed flag of one set and return the new value.
    /// Stale keys return `None` and change nothing.
    pub fn toggle_set_completed(&mut self, exercise_index: usize, set_number: u8) -> Option<bool> {
        let entry = self.entries.get_mut(&(exercise_index, set_number))?;
        entry.completed = !entry.completed;
        Some(entry.completed)
    }

    /// Total sets defined for the current day, from the routine.
    pub fn total_sets(&self) -> usize {
        config::day_routine(self.current_day)
            .exercises
            .iter()
            .map(|e| e.sets as usize)
            .sum()
    }

    pub fn completed_sets(&self) -> usize {
        self.entries.values().filter(|e| e.completed).count()
    }

    pub fn progress_percentage(&self) -> u8 {
        percentage(self.completed_sets(), self.total_sets())
    }

    pub fn progress(&self) -> Progress {
        let completed = self.completed_sets();
        let total = self.total_sets();
        Progress {
            completed,
            total,
            percentage: percentage(completed, total),
        }
    }

    /// Rows for the paint step, in routine order. Missing entries
    /// (never the case after initialization) render as defaults.
    pub fn view_model(&self) -> Vec<ExerciseRow> {
        let routine = config::day_routine(self.current_day);
        routine
            .exercises
            .iter()
            .enumerate()
            .map(|(exercise_index, exercise)| ExerciseRow {
                exercise_index,
                name: exercise.name.clone(),
                sets: (1..=exercise.sets)
                    .map(|set_number| {
                        let entry = self
                            .entries
                            .get(&(exercise_index, set_number))
                            .cloned()
                            .unwrap_or_default();
                        SetRow {
                            set_number,
                            weight: entry.weight,
                            unit: entry.unit,
                            completed: entry.completed,
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// Pure snapshot of the current day for the spreadsheet endpoint.
    /// Empty or unparsable weights go out as 0.
    pub fn sheet_payload(&self, date: NaiveDate) -> SheetPayload {
        let routine = config::day_routine(self.current_day);
        let mut ejercicios = Vec::with_capacity(self.total_sets());
        for (exercise_index, exercise) in routine.exercises.iter().enumerate() {
            for set_number in 1..=exercise.sets {
                let entry = self
                    .entries
                    .get(&(exercise_index, set_number))
                    .cloned()
                    .unwrap_or_default();
                ejercicios.push(SheetSet {
                    nombre: exercise.name.clone(),
                    serie: set_number,
                    peso: entry.weight.trim().parse().unwrap_or(0.0),
                    unidad: entry.unit,
                    completado: if entry.completed { "Si" } else { "No" }.to_string(),
                });
            }
        }
        SheetPayload {
            fecha: date.format("%Y-%m-%d").to_string(),
            dia: self.current_day,
            ejercicios,
        }
    }

    /// Snapshot stamped with today's date.
    pub fn prepare_sheet_data(&self) -> SheetPayload {
        self.sheet_payload(Utc::now().date_naive())
    }
}

/// Rounded completion percentage, 0 when there is nothing to complete.
fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed * 100) as f64 / total as f64).round() as u8
}

/// Header label for a day, "Dia N".
pub fn day_label(day: u8) -> String {
    format!("Dia {}", day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_initialize_creates_one_entry_per_set() {
        for day in 1..=config::TOTAL_DAYS {
            let session = WorkoutSession::new(day);
            let routine = config::day_routine(day);
            let expected: usize = routine.exercises.iter().map(|e| e.sets as usize).sum();
            assert_eq!(session.entries.len(), expected);
            for (exercise_index, exercise) in routine.exercises.iter().enumerate() {
                for set_number in 1..=exercise.sets {
                    let entry = session
                        .entries
                        .get(&(exercise_index, set_number))
                        .expect("entry for every routine set");
                    assert!(entry.weight.is_empty());
                    assert_eq!(entry.unit, config::DEFAULT_UNIT);
                    assert!(!entry.completed);
                }
            }
        }
    }

    #[test]
    fn test_day_switch_replaces_all_keys() {
        let mut session = WorkoutSession::new(1);
        session.update_set_weight(0, 1, "80".to_string());
        session.toggle_set_completed(0, 1);

        session.set_current_day(2);
        session.reset_workout_data();
        session.initialize_workout_data();

        let routine = config::day_routine(2);
        let expected: usize = routine.exercises.iter().map(|e| e.sets as usize).sum();
        assert_eq!(session.entries.len(), expected);
        assert_eq!(session.completed_sets(), 0);
        // Overlapping keys between the two days must come back fresh.
        assert!(session.entries.values().all(|e| e.weight.is_empty() && !e.completed));
    }

    #[test]
    fn test_set_current_day_clamps_out_of_range() {
        let mut session = WorkoutSession::new(1);
        session.set_current_day(0);
        assert_eq!(session.current_day(), 1);
        session.set_current_day(config::TOTAL_DAYS + 1);
        assert_eq!(session.current_day(), 1);
        session.set_current_day(3);
        assert_eq!(session.current_day(), 3);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut session = WorkoutSession::new(1);
        session.clear_workout_data();
        session.clear_workout_data();
        assert!(session.entries.is_empty());
        assert_eq!(session.completed_sets(), 0);
    }

    #[test]
    fn test_stale_mutations_are_ignored() {
        let mut session = WorkoutSession::new(1);
        let before = session.view_model();
        session.update_set_weight(99, 1, "100".to_string());
        session.update_set_unit(0, 99, WeightUnit::Lbs);
        assert_eq!(session.toggle_set_completed(99, 99), None);
        assert_eq!(session.view_model(), before);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut session = WorkoutSession::new(1);
        assert_eq!(session.toggle_set_completed(0, 1), Some(true));
        assert_eq!(session.toggle_set_completed(0, 1), Some(false));
        assert_eq!(session.completed_sets(), 0);
    }

    #[test]
    fn test_progress_percentage_bounds_and_rounding() {
        // Day 2: 23 sets. 5 completed -> round(21.739) = 22.
        let mut session = WorkoutSession::new(2);
        assert_eq!(session.total_sets(), 23);
        let keys: Vec<SetKey> = session.entries.keys().cloned().take(5).collect();
        for (exercise_index, set_number) in keys {
            session.toggle_set_completed(exercise_index, set_number);
        }
        assert_eq!(session.completed_sets(), 5);
        assert_eq!(session.progress_percentage(), 22);

        let progress = session.progress();
        assert_eq!(progress.completed, 5);
        assert_eq!(progress.total, 23);
        assert_eq!(progress.percentage, 22);
    }

    #[test]
    fn test_percentage_zero_when_total_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(0, 10), 0);
        assert_eq!(percentage(10, 10), 100);
    }

    #[test]
    fn test_sheet_payload_rows_match_routine() {
        let mut session = WorkoutSession::new(2);
        session.update_set_weight(0, 1, "42.5".to_string());
        session.update_set_unit(0, 1, WeightUnit::Lbs);
        session.toggle_set_completed(0, 1);

        let payload = session.sheet_payload(date());
        assert_eq!(payload.fecha, "2024-03-09");
        assert_eq!(payload.dia, 2);
        assert_eq!(payload.ejercicios.len(), 23);

        let first = &payload.ejercicios[0];
        assert_eq!(first.nombre, "Calves");
        assert_eq!(first.serie, 1);
        assert_eq!(first.peso, 42.5);
        assert_eq!(first.unidad, WeightUnit::Lbs);
        assert_eq!(first.completado, "Si");

        // Untouched sets: weight 0, default unit, not completed.
        let second = &payload.ejercicios[1];
        assert_eq!(second.serie, 2);
        assert_eq!(second.peso, 0.0);
        assert_eq!(second.unidad, config::DEFAULT_UNIT);
        assert_eq!(second.completado, "No");

        assert!(payload
            .ejercicios
            .iter()
            .all(|row| row.completado == "Si" || row.completado == "No"));
    }

    #[test]
    fn test_sheet_payload_wire_field_names() {
        let session = WorkoutSession::new(1);
        let value = serde_json::to_value(session.sheet_payload(date())).unwrap();
        assert!(value.get("fecha").is_some());
        assert!(value.get("dia").is_some());
        let rows = value.get("ejercicios").unwrap().as_array().unwrap();
        let row = rows.first().unwrap();
        for field in ["nombre", "serie", "peso", "unidad", "completado"] {
            assert!(row.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(row.get("unidad").unwrap(), "kg");
    }

    #[test]
    fn test_unparsable_weight_serializes_as_zero() {
        let mut session = WorkoutSession::new(1);
        session.update_set_weight(0, 1, "abc".to_string());
        let payload = session.sheet_payload(date());
        assert_eq!(payload.ejercicios[0].peso, 0.0);
    }

    #[test]
    fn test_view_model_mirrors_routine_order() {
        let session = WorkoutSession::new(3);
        let routine = config::day_routine(3);
        let rows = session.view_model();
        assert_eq!(rows.len(), routine.exercises.len());
        for (row, exercise) in rows.iter().zip(routine.exercises.iter()) {
            assert_eq!(row.name, exercise.name);
            assert_eq!(row.sets.len(), exercise.sets as usize);
            assert_eq!(row.sets.first().map(|s| s.set_number), Some(1));
        }
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(3), "Dia 3");
    }
}
