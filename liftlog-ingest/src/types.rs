use serde::{Deserialize, Deserializer, Serialize};

/// One set as written by the logging app into a session JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
    #[serde(rename = "Movement")]
    pub movement: String,
    #[serde(rename = "Load_kg")]
    pub load_kg: f64,
    #[serde(rename = "Reps", deserialize_with = "whole_reps")]
    pub reps: u32,
    #[serde(rename = "Intensity_RPE", default)]
    pub intensity_rpe: Option<f64>,
}

/// One row of the persisted CSV log.
///
/// `e1RM` is written for convenience; readers recompute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRow {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Movement")]
    pub movement: String,
    #[serde(rename = "Load_kg")]
    pub load_kg: f64,
    #[serde(rename = "Reps", deserialize_with = "whole_reps")]
    pub reps: u32,
    #[serde(rename = "Intensity_RPE")]
    pub intensity_rpe: Option<f64>,
    #[serde(rename = "e1RM")]
    pub e1rm: Option<f64>,
}

/// Rep counts written as `5` or `5.0`. Fractional counts and counts below one are rejected.
fn whole_reps<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || !(1.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(serde::de::Error::custom(format!(
            "reps must be a whole number, got {value}"
        )));
    }
    Ok(value as u32)
}
