//! Experiment constants merged into every table.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::columns::{AREA, CONSTANT, NHE, PH, RESISTANCE};
use crate::error::{CvkitError, Result};
use crate::input::Cell;

/// Per-experiment constants used by the reference correction and density stages.
///
/// Serialized with the column names as keys:
///
/// ```json
/// { "NHE": 0.0385, "pH": 13, "Constant": 0.059, "Area (cm^2)": 0.0385, "R": 8.2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentMetadata {
    /// Reference electrode potential versus NHE (V).
    #[serde(rename = "NHE", alias = "nhe")]
    pub nhe: f64,
    /// Electrolyte pH.
    #[serde(rename = "pH", alias = "ph")]
    pub ph: f64,
    /// Nernstian slope (V per pH unit).
    #[serde(rename = "Constant", alias = "constant")]
    pub constant: f64,
    /// Electrode area in cm^2.
    #[serde(rename = "Area (cm^2)", alias = "area")]
    pub area_cm2: f64,
    /// Uncompensated resistance (ohm).
    #[serde(rename = "R", alias = "resistance")]
    pub resistance: f64,
}

impl Default for ExperimentMetadata {
    fn default() -> Self {
        Self {
            nhe: 0.0385,
            ph: 13.0,
            constant: 0.059,
            area_cm2: 3.85E-02,
            resistance: 8.2,
        }
    }
}

impl ExperimentMetadata {
    pub fn with_nhe(mut self, nhe: f64) -> Self {
        self.nhe = nhe;
        self
    }

    pub fn with_ph(mut self, ph: f64) -> Self {
        self.ph = ph;
        self
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn with_area(mut self, area_cm2: f64) -> Self {
        self.area_cm2 = area_cm2;
        self
    }

    pub fn with_resistance(mut self, resistance: f64) -> Self {
        self.resistance = resistance;
        self
    }

    /// Load constants from a JSON file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CvkitError::io(path, e))?;
        let metadata: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            CvkitError::Config(format!(
                "Failed to parse metadata '{}': {}",
                path.display(),
                e
            ))
        })?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Reject non-finite constants and a zero electrode area.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.fields() {
            if !value.is_finite() {
                return Err(CvkitError::Config(format!(
                    "Metadata value '{}' must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.area_cm2 == 0.0 {
            return Err(CvkitError::Config(format!(
                "Metadata value '{}' must not be zero",
                AREA
            )));
        }
        Ok(())
    }

    /// The single metadata row, keyed by column name.
    pub fn to_row(&self) -> IndexMap<String, Cell> {
        self.fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), Cell::Float(value)))
            .collect()
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            (NHE, self.nhe),
            (PH, self.ph),
            (CONSTANT, self.constant),
            (AREA, self.area_cm2),
            (RESISTANCE, self.resistance),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_row_order() {
        let row = ExperimentMetadata::default().to_row();
        let names: Vec<&str> = row.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["NHE", "pH", "Constant", "Area (cm^2)", "R"]);
        assert_eq!(row["pH"], Cell::Float(13.0));
    }

    #[test]
    fn test_load_with_column_names() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"NHE": 0.2, "pH": 7, "Constant": 0.059, "Area (cm^2)": 1.0, "R": 0.5}}"#
        )
        .unwrap();

        let metadata = ExperimentMetadata::load(file.path()).unwrap();
        assert_eq!(metadata.nhe, 0.2);
        assert_eq!(metadata.ph, 7.0);
        assert_eq!(metadata.resistance, 0.5);
    }

    #[test]
    fn test_load_with_aliases() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"nhe": 0.2, "ph": 7, "constant": 0.059, "area": 1.0, "resistance": 0.5}}"#
        )
        .unwrap();

        let metadata = ExperimentMetadata::load(file.path()).unwrap();
        assert_eq!(metadata.area_cm2, 1.0);
    }

    #[test]
    fn test_load_incomplete_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"NHE": 0.2}}"#).unwrap();

        let err = ExperimentMetadata::load(file.path()).unwrap_err();
        assert!(matches!(err, CvkitError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let metadata = ExperimentMetadata::default().with_resistance(f64::NAN);
        assert!(metadata.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_area() {
        let err = ExperimentMetadata::default()
            .with_area(0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CvkitError::Config(_)));
        assert!(err.to_string().contains("Area (cm^2)"));
    }

    #[test]
    fn test_load_rejects_zero_area() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"NHE": 0.2, "pH": 7, "Constant": 0.059, "Area (cm^2)": 0, "R": 0.5}}"#
        )
        .unwrap();

        let err = ExperimentMetadata::load(file.path()).unwrap_err();
        assert!(matches!(err, CvkitError::Config(_)));
    }
}
