use derive_custom::balance_parameters;
use serde::Deserialize;
use serde::Serialize;

/// The per-item computation performed by the workers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ArgEnum)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// Sine of the value in radians.
    #[default]
    Sine,
    /// Sine of the value interpreted as an angle in degrees.
    SineOfDegrees,
    Cosine,
    Identity,
}

impl TransformKind {
    pub fn function(self) -> fn(f64) -> f64 {
        match self {
            TransformKind::Sine => f64::sin,
            TransformKind::SineOfDegrees => |x: f64| x.to_radians().sin(),
            TransformKind::Cosine => f64::cos,
            TransformKind::Identity => |x: f64| x,
        }
    }
}

#[balance_parameters("transform")]
#[derive(Default)]
pub struct TransformParameters {
    pub kind: TransformKind,
}

/// Applies `transform` to every value, preserving order and length.
pub fn apply_transform(values: &[f64], transform: impl Fn(f64) -> f64) -> Vec<f64> {
    values.iter().map(|value| transform(*value)).collect()
}
