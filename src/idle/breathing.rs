use std::f32::consts::TAU;

use glam::Quat;
use smallvec::SmallVec;

use crate::character::{BoneHandle, ModelFormat, Skeleton};
use crate::idle::config::BreathingConfig;

/// How a breathing bone moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingRole {
    /// Pitches back about local X by the chest offset.
    Chest,
    /// Rolls up about local +Z by the shoulder offset.
    LeftShoulder,
    /// Rolls up about local -Z by the shoulder offset.
    RightShoulder,
}

#[derive(Debug, Clone, Copy)]
pub struct BaselineBone {
    pub bone: BoneHandle,
    pub role: BreathingRole,
    pub rotation: Quat,
}

/// Rotations of the breathing bones captured once at initialization.
///
/// Offsets are always composed onto these rotations, never onto a bone's
/// current rotation, so repeated ticks cannot drift.
#[derive(Debug, Clone, Default)]
pub struct BaselinePose {
    bones: SmallVec<[BaselineBone; 4]>,
}

impl BaselinePose {
    /// Finds the chest and shoulder bones by the format's naming conventions
    /// (falling back to other formats' names) and snapshots their rotations.
    #[must_use]
    pub fn capture(skeleton: &Skeleton, format: ModelFormat) -> Self {
        let formats: SmallVec<[ModelFormat; 4]> = std::iter::once(format)
            .chain(ModelFormat::ALL.into_iter().filter(|f| *f != format))
            .collect();

        let find = |names: fn(ModelFormat) -> &'static [&'static str]| {
            formats
                .iter()
                .flat_map(|f| names(*f).iter())
                .find_map(|name| skeleton.find_ignore_case(name))
        };

        let roles: [(BreathingRole, Option<BoneHandle>); 3] = [
            (BreathingRole::Chest, find(ModelFormat::chest_bones)),
            (BreathingRole::LeftShoulder, find(|f: ModelFormat| f.shoulder_bones().0)),
            (BreathingRole::RightShoulder, find(|f: ModelFormat| f.shoulder_bones().1)),
        ];

        let bones = roles
            .into_iter()
            .filter_map(|(role, handle)| {
                let handle = handle?;
                let rotation = skeleton.bone(handle)?.transform.rotation;
                Some(BaselineBone {
                    bone: handle,
                    role,
                    rotation,
                })
            })
            .collect();

        Self { bones }
    }

    #[must_use]
    pub fn bones(&self) -> &[BaselineBone] {
        &self.bones
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    #[must_use]
    pub fn rotation_of(&self, bone: BoneHandle) -> Option<Quat> {
        self.bones.iter().find(|b| b.bone == bone).map(|b| b.rotation)
    }

    /// Writes `baseline × offset(role)` to every breathing bone.
    pub fn apply(&self, skeleton: &mut Skeleton, phase: f32, config: &BreathingConfig) {
        for b in &self.bones {
            let Some(node) = skeleton.bone_mut(b.bone) else {
                continue;
            };
            node.transform.rotation = b.rotation * offset_rotation(b.role, phase, config);
            node.transform.mark_dirty();
        }
    }

    /// Writes the captured rotations back unchanged.
    pub fn restore(&self, skeleton: &mut Skeleton) {
        for b in &self.bones {
            if let Some(node) = skeleton.bone_mut(b.bone) {
                node.transform.rotation = b.rotation;
                node.transform.mark_dirty();
            }
        }
    }
}

/// `(sin(t / period · 2π) + 1) / 2`, or 0 when the rate is zero.
#[must_use]
pub fn breathing_phase(time: f32, config: &BreathingConfig) -> f32 {
    match config.period() {
        Some(period) => ((time / period * TAU).sin() + 1.0) * 0.5,
        None => 0.0,
    }
}

/// Offset angle in radians for a role at `phase`.
#[must_use]
pub fn offset_angle(role: BreathingRole, phase: f32, config: &BreathingConfig) -> f32 {
    let amplitude = match role {
        BreathingRole::Chest => config.chest_expansion,
        BreathingRole::LeftShoulder | BreathingRole::RightShoulder => config.shoulder_movement,
    };
    phase * config.depth * amplitude
}

fn offset_rotation(role: BreathingRole, phase: f32, config: &BreathingConfig) -> Quat {
    let angle = offset_angle(role, phase, config);
    match role {
        BreathingRole::Chest => Quat::from_rotation_x(-angle),
        BreathingRole::LeftShoulder => Quat::from_rotation_z(angle),
        BreathingRole::RightShoulder => Quat::from_rotation_z(-angle),
    }
}
