use serde::{Deserialize, Serialize};

/// Weight unit for a set. The allowed set and the default come from
/// the configuration (`config::UNITS`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    /// Parse the value of a unit `<select>`. Unknown strings map to
    /// `None` so a garbled DOM event cannot corrupt the store.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "kg" => Some(WeightUnit::Kg),
            "lbs" => Some(WeightUnit::Lbs),
            _ => None,
        }
    }
}

impl Default for WeightUnit {
    fn default() -> Self {
        crate::config::DEFAULT_UNIT
    }
}

/// One exercise of a day routine: name plus how many sets it is
/// trained for.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub sets: u8,
}

impl Exercise {
    pub fn new(name: &str, sets: u8) -> Self {
        Self {
            name: name.to_string(),
            sets,
        }
    }
}

/// The fixed ordered exercise list for one training day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DayRoutine {
    pub day_number: u8,
    pub exercises: Vec<Exercise>,
}

/// Key of one set in the current session: (exercise index, 1-based set
/// number within the exercise).
pub type SetKey = (usize, u8);

/// Mutable per-set record for the current day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    pub weight: String,
    pub unit: WeightUnit,
    pub completed: bool,
}

impl Default for SetEntry {
    fn default() -> Self {
        Self {
            weight: String::new(),
            unit: WeightUnit::default(),
            completed: false,
        }
    }
}

/// One row of the spreadsheet payload. Field names are the wire
/// contract of the Apps Script endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SheetSet {
    pub nombre: String,
    pub serie: u8,
    pub peso: f64,
    pub unidad: WeightUnit,
    pub completado: String,
}

/// Serialized snapshot of a finished day, POSTed to the spreadsheet
/// endpoint as JSON.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SheetPayload {
    pub fecha: String,
    pub dia: u8,
    pub ejercicios: Vec<SheetSet>,
}

/// Derived progress counters feeding the progress bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

/// View model of one set row. The paint step only walks these; it
/// never reads the store directly.
#[derive(Clone, Debug, PartialEq)]
pub struct SetRow {
    pub set_number: u8,
    pub weight: String,
    pub unit: WeightUnit,
    pub completed: bool,
}

/// View model of one exercise card with its set rows.
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseRow {
    pub exercise_index: usize,
    pub name: String,
    pub sets: Vec<SetRow>,
}

/// Kind of the transient status line under the finish button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Loading,
    Success,
    Error,
}

impl StatusKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            StatusKind::Info => "info",
            StatusKind::Loading => "loading",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn loading(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: StatusKind::Loading,
        }
    }

    pub fn success(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: String) -> Self {
        Self {
            text,
            kind: StatusKind::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parse_round_trip() {
        assert_eq!(WeightUnit::parse("kg"), Some(WeightUnit::Kg));
        assert_eq!(WeightUnit::parse("lbs"), Some(WeightUnit::Lbs));
        assert_eq!(WeightUnit::parse("stone"), None);
        assert_eq!(WeightUnit::parse(""), None);
    }

    #[test]
    fn test_unit_serializes_lowercase() {
        let json = serde_json::to_string(&WeightUnit::Kg).unwrap();
        assert_eq!(json, "\"kg\"");
        let json = serde_json::to_string(&WeightUnit::Lbs).unwrap();
        assert_eq!(json, "\"lbs\"");
    }

    #[test]
    fn test_set_entry_defaults() {
        let entry = SetEntry::default();
        assert!(entry.weight.is_empty());
        assert_eq!(entry.unit, crate::config::DEFAULT_UNIT);
        assert!(!entry.completed);
    }

    #[test]
    fn test_status_kind_class_names() {
        assert_eq!(StatusKind::Loading.class_name(), "loading");
        assert_eq!(StatusKind::Error.class_name(), "error");
    }
}
