use serde::{Deserialize, Serialize};

/// Interchange formats the viewer can load characters from.
///
/// Format adapters only hand the core a skeleton, morph channel names and
/// clips; the variant is kept so naming conventions that differ per exporter
/// (blink channels, torso bones) resolve through one exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Gltf,
    Vrm,
    Pmx,
    Fbx,
}

impl ModelFormat {
    pub const ALL: [ModelFormat; 4] = [Self::Gltf, Self::Vrm, Self::Pmx, Self::Fbx];

    /// Resolves a format from a file extension (with or without the dot).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "gltf" | "glb" => Some(Self::Gltf),
            "vrm" => Some(Self::Vrm),
            "pmx" | "pmd" => Some(Self::Pmx),
            "fbx" => Some(Self::Fbx),
            _ => None,
        }
    }

    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Gltf => &["gltf", "glb"],
            Self::Vrm => &["vrm"],
            Self::Pmx => &["pmx", "pmd"],
            Self::Fbx => &["fbx"],
        }
    }

    /// Conventional `(left, right)` eye-blink channel names.
    #[must_use]
    pub fn blink_channels(self) -> (&'static str, &'static str) {
        match self {
            Self::Gltf | Self::Fbx => ("eyeBlinkLeft", "eyeBlinkRight"),
            Self::Vrm => ("blinkLeft", "blinkRight"),
            // MMD models carry a single symmetric "blink" morph (まばたき) and
            // one-eyed winks; the winks are the closest per-eye pair.
            Self::Pmx => ("ウィンク", "ウィンク右"),
        }
    }

    /// Candidate names for the upper-torso bone that breathing pitches.
    #[must_use]
    pub fn chest_bones(self) -> &'static [&'static str] {
        match self {
            Self::Gltf | Self::Fbx => &["Chest", "UpperChest", "Spine2", "mixamorig:Spine2", "spine.003"],
            Self::Vrm => &["J_Bip_C_UpperChest", "J_Bip_C_Chest", "upperChest", "chest"],
            Self::Pmx => &["上半身2", "上半身"],
        }
    }

    /// Candidate `(left, right)` shoulder bone names.
    #[must_use]
    pub fn shoulder_bones(self) -> (&'static [&'static str], &'static [&'static str]) {
        match self {
            Self::Gltf | Self::Fbx => (
                &["LeftShoulder", "mixamorig:LeftShoulder", "shoulder.L"],
                &["RightShoulder", "mixamorig:RightShoulder", "shoulder.R"],
            ),
            Self::Vrm => (
                &["J_Bip_L_Shoulder", "leftShoulder"],
                &["J_Bip_R_Shoulder", "rightShoulder"],
            ),
            Self::Pmx => (&["左肩"], &["右肩"]),
        }
    }
}
