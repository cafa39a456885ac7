use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named mapping from a subset of morph channels to target values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub values: Vec<(String, f32)>,
}

impl Preset {
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(n, _)| n.as_str())
    }
}

/// Which preset was last applied and at what weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePreset {
    pub name: String,
    pub weight: f32,
}

/// JSON layout accepted by
/// [`ExpressionBoard::load_presets_json`](crate::expression::ExpressionBoard::load_presets_json):
///
/// ```json
/// { "expressions": { "smirk": { "mouthSmileLeft": 0.8 } },
///   "visemes": { "fv": { "mouthRollLower": 0.6 } } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetDocument {
    pub expressions: BTreeMap<String, BTreeMap<String, f32>>,
    pub visemes: BTreeMap<String, BTreeMap<String, f32>>,
}

impl PresetDocument {
    /// Splits the document into `(expressions, visemes)`.
    #[must_use]
    pub fn into_presets(self) -> (Vec<Preset>, Vec<Preset>) {
        let convert = |map: BTreeMap<String, BTreeMap<String, f32>>| {
            map.into_iter()
                .map(|(name, values)| Preset::new(name, values))
                .collect::<Vec<_>>()
        };
        (convert(self.expressions), convert(self.visemes))
    }
}

/// Built-in expressions over ARKit-style channel names.
#[must_use]
pub fn builtin_expressions() -> Vec<Preset> {
    vec![
        Preset::new("neutral", Vec::<(&str, f32)>::new()),
        Preset::new(
            "joy",
            [
                ("mouthSmileLeft", 1.0),
                ("mouthSmileRight", 1.0),
                ("cheekSquintLeft", 0.6),
                ("cheekSquintRight", 0.6),
                ("eyeSquintLeft", 0.4),
                ("eyeSquintRight", 0.4),
            ],
        ),
        Preset::new(
            "angry",
            [
                ("browDownLeft", 1.0),
                ("browDownRight", 1.0),
                ("noseSneerLeft", 0.5),
                ("noseSneerRight", 0.5),
                ("mouthPressLeft", 0.6),
                ("mouthPressRight", 0.6),
            ],
        ),
        Preset::new(
            "sorrow",
            [
                ("browInnerUp", 1.0),
                ("mouthFrownLeft", 0.8),
                ("mouthFrownRight", 0.8),
                ("mouthLowerDownLeft", 0.3),
                ("mouthLowerDownRight", 0.3),
            ],
        ),
        Preset::new(
            "fun",
            [
                ("mouthSmileLeft", 0.7),
                ("mouthSmileRight", 0.7),
                ("jawOpen", 0.2),
                ("browOuterUpLeft", 0.4),
                ("browOuterUpRight", 0.4),
            ],
        ),
        Preset::new(
            "surprised",
            [
                ("browInnerUp", 0.8),
                ("browOuterUpLeft", 1.0),
                ("browOuterUpRight", 1.0),
                ("eyeWideLeft", 1.0),
                ("eyeWideRight", 1.0),
                ("jawOpen", 0.5),
            ],
        ),
    ]
}

/// Built-in mouth shapes for lip-sync.
#[must_use]
pub fn builtin_visemes() -> Vec<Preset> {
    vec![
        Preset::new("sil", [("mouthClose", 0.0), ("jawOpen", 0.0)]),
        Preset::new("aa", [("jawOpen", 0.8), ("mouthFunnel", 0.1)]),
        Preset::new(
            "ih",
            [("jawOpen", 0.3), ("mouthStretchLeft", 0.5), ("mouthStretchRight", 0.5)],
        ),
        Preset::new("ou", [("jawOpen", 0.2), ("mouthPucker", 0.9), ("mouthFunnel", 0.4)]),
        Preset::new(
            "ee",
            [
                ("jawOpen", 0.2),
                ("mouthSmileLeft", 0.4),
                ("mouthSmileRight", 0.4),
                ("mouthStretchLeft", 0.6),
                ("mouthStretchRight", 0.6),
            ],
        ),
        Preset::new("oh", [("jawOpen", 0.5), ("mouthFunnel", 0.8)]),
    ]
}
