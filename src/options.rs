use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("options must be a JSON object, got {0}")]
    NotAnObject(Value),

    #[error("invalid option value for {key}: {value}")]
    NotNumeric { key: &'static str, value: Value },
}

/// Tunables of the page analysis. Only `line_depth_factor` reaches the line
/// regions, and then only through [`PageOptions::line_height`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageOptions {
    pub min_black_pc: f32,
    /// Standoff around speckles.
    pub white_standoff: f32,
    /// Speckle size, margins only.
    pub speckle_size: f32,
    pub odd_shape: f32,
    /// Multiple of the measured line pitch used as line height.
    pub line_depth_factor: f32,
    pub blue_factor: f32,
    pub maximum_width: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            min_black_pc: 0.5,
            white_standoff: 0.02,
            speckle_size: 0.005,
            odd_shape: 4.0,
            line_depth_factor: 1.0,
            blue_factor: 0.3,
            maximum_width: 1200,
        }
    }
}

impl PageOptions {
    pub fn parse(json: &str) -> Result<Self, OptionsError> {
        Self::from_json(&serde_json::from_str(json)?)
    }

    /// Overlays the keys of a JSON object on the defaults. Unknown keys are ignored.
    pub fn from_json(value: &Value) -> Result<Self, OptionsError> {
        let map = value
            .as_object()
            .ok_or_else(|| OptionsError::NotAnObject(value.clone()))?;
        let mut options = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "minBlackPC" => options.min_black_pc = float("minBlackPC", value)?,
                "whiteStandoff" => options.white_standoff = float("whiteStandoff", value)?,
                "speckleSize" => options.speckle_size = float("speckleSize", value)?,
                "oddShape" => options.odd_shape = float("oddShape", value)?,
                "lineDepthFactor" => options.line_depth_factor = float("lineDepthFactor", value)?,
                "blueFactor" => options.blue_factor = float("blueFactor", value)?,
                "maximumWidth" => options.maximum_width = unsigned("maximumWidth", value)?,
                other => log::debug!("Ignoring unknown option {other}"),
            }
        }
        Ok(options)
    }

    /// Line height for a measured average line pitch, never less than one pixel.
    pub fn line_height(&self, average_pitch: f32) -> i32 {
        ((average_pitch * self.line_depth_factor) as i32).max(1)
    }
}

fn float(key: &'static str, value: &Value) -> Result<f32, OptionsError> {
    value
        .as_f64()
        .map(|value| value as f32)
        .ok_or_else(|| OptionsError::NotNumeric {
            key,
            value: value.clone(),
        })
}

fn unsigned(key: &'static str, value: &Value) -> Result<u32, OptionsError> {
    value
        .as_u64()
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| OptionsError::NotNumeric {
            key,
            value: value.clone(),
        })
}
