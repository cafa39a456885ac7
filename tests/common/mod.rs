//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use glam::{Quat, Vec3};
use myth_character::animation::{AnimationClip, InterpolationMode, KeyframeTrack, Track};
use myth_character::character::{Character, ModelFormat, MorphChannelStore, Skeleton, Transform};

pub const EPSILON: f32 = 1e-5;

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

pub fn approx_eps(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

pub fn quat_approx(a: Quat, b: Quat) -> bool {
    // q and -q are the same rotation
    a.dot(b).abs() > 1.0 - 1e-6
}

/// Rotation angle of `from⁻¹ · to`, computed with atan2 for precision at
/// small angles.
pub fn angle_from(from: Quat, to: Quat) -> f32 {
    let d = from.inverse() * to;
    let d = if d.w < 0.0 { -d } else { d };
    2.0 * Vec3::new(d.x, d.y, d.z).length().atan2(d.w)
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub const MORPHS: &[&str] = &[
    "eyeBlinkLeft",
    "eyeBlinkRight",
    "mouthSmileLeft",
    "mouthSmileRight",
    "cheekSquintLeft",
    "cheekSquintRight",
    "browInnerUp",
    "mouthFrownLeft",
    "mouthFrownRight",
    "jawOpen",
    "mouthFunnel",
    "mouthPucker",
];

/// Hips → Spine → Chest → {LeftShoulder, RightShoulder, Neck → Head}.
///
/// The chest carries a non-identity rest rotation so baseline tests can tell
/// "restored" from "reset to identity".
pub fn humanoid_skeleton() -> Skeleton {
    let mut s = Skeleton::new();
    let hips = s.add_bone("Hips", None, Transform::from_trs(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY, Vec3::ONE));
    let spine = s.add_bone("Spine", Some(hips), Transform::from_trs(Vec3::new(0.0, 0.1, 0.0), Quat::IDENTITY, Vec3::ONE));
    let chest = s.add_bone(
        "Chest",
        Some(spine),
        Transform::from_trs(Vec3::new(0.0, 0.15, 0.0), Quat::from_rotation_x(0.1), Vec3::ONE),
    );
    s.add_bone(
        "LeftShoulder",
        Some(chest),
        Transform::from_trs(Vec3::new(0.05, 0.1, 0.0), Quat::from_rotation_z(0.05), Vec3::ONE),
    );
    s.add_bone(
        "RightShoulder",
        Some(chest),
        Transform::from_trs(Vec3::new(-0.05, 0.1, 0.0), Quat::from_rotation_z(-0.05), Vec3::ONE),
    );
    let neck = s.add_bone("Neck", Some(chest), Transform::from_trs(Vec3::new(0.0, 0.2, 0.0), Quat::IDENTITY, Vec3::ONE));
    s.add_bone("Head", Some(neck), Transform::from_trs(Vec3::new(0.0, 0.1, 0.0), Quat::IDENTITY, Vec3::ONE));
    s
}

/// Head yaw from 0 to `angle` over `duration` seconds.
pub fn head_turn_clip(name: &str, duration: f32, angle: f32) -> AnimationClip {
    AnimationClip::new(
        name,
        vec![Track::rotation(
            "Head",
            KeyframeTrack::new(
                vec![0.0, duration],
                vec![Quat::IDENTITY, Quat::from_rotation_y(angle)],
                InterpolationMode::Linear,
            ),
        )],
    )
}

/// Head held at a constant yaw for `duration` seconds.
pub fn head_hold_clip(name: &str, duration: f32, angle: f32) -> AnimationClip {
    AnimationClip::new(
        name,
        vec![Track::rotation(
            "Head",
            KeyframeTrack::new(
                vec![0.0, duration],
                vec![Quat::from_rotation_y(angle), Quat::from_rotation_y(angle)],
                InterpolationMode::Step,
            ),
        )],
    )
}

pub fn humanoid() -> Character {
    Character::new("tester", ModelFormat::Gltf)
        .with_skeleton(humanoid_skeleton())
        .with_morphs(MorphChannelStore::from_names(MORPHS.iter().copied()))
}
