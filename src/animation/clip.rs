use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;

#[derive(Debug, Clone)]
pub struct TrackMeta {
    pub bone_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            TrackData::Vector3(t) => t.end_time(),
            TrackData::Quaternion(t) => t.end_time(),
        }
    }

    /// Whether the value type can drive `target`.
    #[must_use]
    pub fn matches(&self, target: TargetPath) -> bool {
        matches!(
            (self, target),
            (TrackData::Vector3(_), TargetPath::Translation | TargetPath::Scale)
                | (TrackData::Quaternion(_), TargetPath::Rotation)
        )
    }
}

/// A keyframe track plus the bone property it drives.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

impl Track {
    #[must_use]
    pub fn rotation(bone_name: impl Into<String>, track: KeyframeTrack<Quat>) -> Self {
        Self {
            meta: TrackMeta {
                bone_name: bone_name.into(),
                target: TargetPath::Rotation,
            },
            data: TrackData::Quaternion(track),
        }
    }

    #[must_use]
    pub fn translation(bone_name: impl Into<String>, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            meta: TrackMeta {
                bone_name: bone_name.into(),
                target: TargetPath::Translation,
            },
            data: TrackData::Vector3(track),
        }
    }

    #[must_use]
    pub fn scale(bone_name: impl Into<String>, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            meta: TrackMeta {
                bone_name: bone_name.into(),
                target: TargetPath::Scale,
            },
            data: TrackData::Vector3(track),
        }
    }
}

/// Immutable, fixed-duration set of keyframe tracks.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Duration is the latest keyframe time across all tracks.
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }

    /// Uses an explicit duration (clips may hold their last pose past the final key).
    #[must_use]
    pub fn with_duration(name: impl Into<String>, duration: f32, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
            tracks,
        }
    }
}
