//! Five-axis flavor profile and its normalization
//!
//! A tasting note rates acidity, sweetness, body, bitterness and aftertaste on
//! an integer scale of 1 to 5. Every profile that exists in memory is already
//! normalized: values arriving from the add-post form, from deserialized data
//! or from an assistant's JSON reply pass through [`normalize`] first.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Lowest legal axis value
pub const MIN_VALUE: u8 = 1;

/// Highest legal axis value (also the radar's outer ring)
pub const MAX_VALUE: u8 = 5;

/// Flavor axes in radar order (index 0 points up, then clockwise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlavorAxis {
    Acidity,
    Sweetness,
    Body,
    Bitterness,
    Aftertaste,
}

impl FlavorAxis {
    /// All axes in radar order
    pub const ALL: [FlavorAxis; 5] = [
        FlavorAxis::Acidity,
        FlavorAxis::Sweetness,
        FlavorAxis::Body,
        FlavorAxis::Bitterness,
        FlavorAxis::Aftertaste,
    ];

    /// Position of this axis around the radar
    pub fn index(self) -> usize {
        match self {
            FlavorAxis::Acidity => 0,
            FlavorAxis::Sweetness => 1,
            FlavorAxis::Body => 2,
            FlavorAxis::Bitterness => 3,
            FlavorAxis::Aftertaste => 4,
        }
    }

    /// Field name used in serialized profiles
    pub fn key(self) -> &'static str {
        match self {
            FlavorAxis::Acidity => "acidity",
            FlavorAxis::Sweetness => "sweetness",
            FlavorAxis::Body => "body",
            FlavorAxis::Bitterness => "bitterness",
            FlavorAxis::Aftertaste => "aftertaste",
        }
    }

    /// Value used when the axis was never rated
    ///
    /// Mid-scale for every axis except bitterness, which a fresh tasting
    /// form starts one notch lower.
    pub fn default_value(self) -> u8 {
        match self {
            FlavorAxis::Bitterness => 2,
            _ => 3,
        }
    }

    /// Parse an axis from its field name (case-insensitive)
    pub fn from_key(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "acidity" => Some(FlavorAxis::Acidity),
            "sweetness" => Some(FlavorAxis::Sweetness),
            "body" => Some(FlavorAxis::Body),
            "bitterness" => Some(FlavorAxis::Bitterness),
            "aftertaste" => Some(FlavorAxis::Aftertaste),
            _ => None,
        }
    }
}

impl std::fmt::Display for FlavorAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A profile whose axes may be missing or out of range
///
/// This is the shape of raw input: form state, hand-written JSON, or a
/// model's reply. Fractional values are accepted and rounded later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialProfile {
    pub acidity: Option<f64>,
    pub sweetness: Option<f64>,
    pub body: Option<f64>,
    pub bitterness: Option<f64>,
    pub aftertaste: Option<f64>,
}

impl PartialProfile {
    /// Read one axis
    pub fn get(&self, axis: FlavorAxis) -> Option<f64> {
        match axis {
            FlavorAxis::Acidity => self.acidity,
            FlavorAxis::Sweetness => self.sweetness,
            FlavorAxis::Body => self.body,
            FlavorAxis::Bitterness => self.bitterness,
            FlavorAxis::Aftertaste => self.aftertaste,
        }
    }

    /// Set one axis, returning the updated profile
    pub fn with(mut self, axis: FlavorAxis, value: f64) -> Self {
        let slot = match axis {
            FlavorAxis::Acidity => &mut self.acidity,
            FlavorAxis::Sweetness => &mut self.sweetness,
            FlavorAxis::Body => &mut self.body,
            FlavorAxis::Bitterness => &mut self.bitterness,
            FlavorAxis::Aftertaste => &mut self.aftertaste,
        };
        *slot = Some(value);
        self
    }

    /// Extract a profile from free text returned by a language model
    ///
    /// Models wrap JSON in prose or code fences, so only the span from the
    /// first `{` to the last `}` is parsed. Anything unparsable yields an
    /// empty profile, which normalizes to the defaults.
    pub fn from_model_output(text: &str) -> Self {
        let (start, end) = match (text.find('{'), text.rfind('}')) {
            (Some(start), Some(end)) if start < end => (start, end),
            _ => {
                warn!("No JSON object in model output, using default profile");
                return Self::default();
            }
        };

        match serde_json::from_str::<PartialProfile>(&text[start..=end]) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Unparsable flavor profile from model output: {}", e);
                Self::default()
            }
        }
    }
}

impl From<FlavorProfile> for PartialProfile {
    fn from(profile: FlavorProfile) -> Self {
        FlavorAxis::ALL
            .iter()
            .fold(PartialProfile::default(), |acc, &axis| {
                acc.with(axis, f64::from(profile.get(axis)))
            })
    }
}

/// A complete, validated flavor profile
///
/// All five axes are always present and always within
/// [`MIN_VALUE`]..=[`MAX_VALUE`]. Deserialization goes through
/// [`normalize`], so out-of-range input is clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PartialProfile")]
pub struct FlavorProfile {
    acidity: u8,
    sweetness: u8,
    body: u8,
    bitterness: u8,
    aftertaste: u8,
}

impl FlavorProfile {
    /// Build a profile from integer ratings, clamping each into range
    pub fn new(acidity: i32, sweetness: i32, body: i32, bitterness: i32, aftertaste: i32) -> Self {
        Self {
            acidity: clamp_rating(acidity),
            sweetness: clamp_rating(sweetness),
            body: clamp_rating(body),
            bitterness: clamp_rating(bitterness),
            aftertaste: clamp_rating(aftertaste),
        }
    }

    pub fn acidity(&self) -> u8 {
        self.acidity
    }

    pub fn sweetness(&self) -> u8 {
        self.sweetness
    }

    pub fn body(&self) -> u8 {
        self.body
    }

    pub fn bitterness(&self) -> u8 {
        self.bitterness
    }

    pub fn aftertaste(&self) -> u8 {
        self.aftertaste
    }

    /// Read one axis
    pub fn get(&self, axis: FlavorAxis) -> u8 {
        match axis {
            FlavorAxis::Acidity => self.acidity,
            FlavorAxis::Sweetness => self.sweetness,
            FlavorAxis::Body => self.body,
            FlavorAxis::Bitterness => self.bitterness,
            FlavorAxis::Aftertaste => self.aftertaste,
        }
    }

    /// Return a copy with one axis replaced (clamped)
    ///
    /// Used by the calibration sliders, which edit a single axis at a time.
    pub fn with_axis(mut self, axis: FlavorAxis, value: i32) -> Self {
        let value = clamp_rating(value);
        match axis {
            FlavorAxis::Acidity => self.acidity = value,
            FlavorAxis::Sweetness => self.sweetness = value,
            FlavorAxis::Body => self.body = value,
            FlavorAxis::Bitterness => self.bitterness = value,
            FlavorAxis::Aftertaste => self.aftertaste = value,
        }
        self
    }

    /// Axis values in radar order
    pub fn values(&self) -> [u8; 5] {
        [
            self.acidity,
            self.sweetness,
            self.body,
            self.bitterness,
            self.aftertaste,
        ]
    }
}

impl Default for FlavorProfile {
    /// Fresh tasting form: everything mid-scale, bitterness at 2
    fn default() -> Self {
        normalize(PartialProfile::default())
    }
}

impl From<PartialProfile> for FlavorProfile {
    fn from(partial: PartialProfile) -> Self {
        normalize(partial)
    }
}

/// Normalize a partial profile into a complete one
///
/// Present values are rounded to the nearest integer and clamped into
/// range; absent or non-finite values take the axis default. Total: never
/// fails, and `normalize(normalize(p).into()) == normalize(p)`.
pub fn normalize(partial: PartialProfile) -> FlavorProfile {
    let axis_value = |axis: FlavorAxis| match partial.get(axis) {
        Some(v) if v.is_finite() => {
            let clamped = v.round().clamp(f64::from(MIN_VALUE), f64::from(MAX_VALUE)) as u8;
            if f64::from(clamped) != v {
                debug!(axis = axis.key(), raw = v, clamped, "Flavor value adjusted");
            }
            clamped
        }
        _ => axis.default_value(),
    };

    FlavorProfile {
        acidity: axis_value(FlavorAxis::Acidity),
        sweetness: axis_value(FlavorAxis::Sweetness),
        body: axis_value(FlavorAxis::Body),
        bitterness: axis_value(FlavorAxis::Bitterness),
        aftertaste: axis_value(FlavorAxis::Aftertaste),
    }
}

fn clamp_rating(value: i32) -> u8 {
    value.clamp(i32::from(MIN_VALUE), i32::from(MAX_VALUE)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_axes() {
        let profile = normalize(PartialProfile::default());
        assert_eq!(profile.values(), [3, 3, 3, 2, 3]);
        assert_eq!(FlavorProfile::default(), profile);
    }

    #[test]
    fn test_clamps_every_integer_into_range() {
        for v in -20..=20 {
            for axis in FlavorAxis::ALL {
                let profile = normalize(PartialProfile::default().with(axis, v as f64));
                let expected = v.clamp(1, 5) as u8;
                assert_eq!(profile.get(axis), expected, "{:?} with raw {}", axis, v);
            }
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = PartialProfile {
            acidity: Some(9.0),
            sweetness: Some(-3.0),
            body: Some(2.6),
            bitterness: None,
            aftertaste: Some(f64::NAN),
        };
        let once = normalize(raw);
        let twice = normalize(once.into());
        assert_eq!(once, twice);
        assert_eq!(once.values(), [5, 1, 3, 2, 3]);
    }

    #[test]
    fn test_rounds_to_nearest() {
        let profile = normalize(PartialProfile {
            acidity: Some(1.49),
            sweetness: Some(1.5),
            body: Some(4.51),
            bitterness: Some(0.2),
            aftertaste: Some(5.4),
        });
        assert_eq!(profile.values(), [1, 2, 5, 1, 5]);
    }

    #[test]
    fn test_with_axis_clamps() {
        let profile = FlavorProfile::default()
            .with_axis(FlavorAxis::Body, 42)
            .with_axis(FlavorAxis::Acidity, 0);
        assert_eq!(profile.body(), 5);
        assert_eq!(profile.acidity(), 1);
        assert_eq!(profile.bitterness(), 2);
    }

    #[test]
    fn test_deserialize_clamps_out_of_range() {
        let profile: FlavorProfile =
            serde_json::from_str(r#"{"acidity": 7, "sweetness": 0, "body": 3}"#).unwrap();
        assert_eq!(profile.values(), [5, 1, 3, 2, 3]);
    }

    #[test]
    fn test_serialize_uses_field_names() {
        let json = serde_json::to_value(FlavorProfile::new(5, 1, 3, 1, 3)).unwrap();
        assert_eq!(json["acidity"], 5);
        assert_eq!(json["sweetness"], 1);
        assert_eq!(json["aftertaste"], 3);
    }

    #[test]
    fn test_from_model_output_strips_prose() {
        let text = "Sure! Here is the profile:\n```json\n{\"acidity\": 4, \"sweetness\": 3, \"body\": 2, \"bitterness\": 1, \"aftertaste\": 5}\n```";
        let profile = normalize(PartialProfile::from_model_output(text));
        assert_eq!(profile.values(), [4, 3, 2, 1, 5]);
    }

    #[test]
    fn test_from_model_output_garbage_falls_back() {
        assert_eq!(PartialProfile::from_model_output(""), PartialProfile::default());
        assert_eq!(PartialProfile::from_model_output("} no {"), PartialProfile::default());
        assert_eq!(
            PartialProfile::from_model_output("{ not json }"),
            PartialProfile::default()
        );
    }

    #[test]
    fn test_axis_keys_round_trip() {
        for axis in FlavorAxis::ALL {
            assert_eq!(FlavorAxis::from_key(axis.key()), Some(axis));
            assert_eq!(FlavorAxis::ALL[axis.index()], axis);
        }
        assert_eq!(FlavorAxis::from_key("BODY"), Some(FlavorAxis::Body));
        assert_eq!(FlavorAxis::from_key("umami"), None);
    }
}
