//! Animation System Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step/cubic interpolation
//! - KeyframeCursor O(1) optimization and binary search fallback
//! - AnimationClip duration auto-computation and Binder track resolution
//! - ClipPlayer playback state, crossfades, stop/seek/speed/loop
//! - Layered pose blending (Base, Overlay, Additive)

mod common;

use std::f32::consts::PI;

use glam::{Quat, Vec3};

use common::{approx, head_hold_clip, head_turn_clip, humanoid, humanoid_skeleton, init_logger, quat_approx};
use myth_character::{PlaybackState, RigError};
use myth_character::animation::{
    ActionState, AnimationClip, Binder, ClipLayer, ClipPlayer, ClipSettings, InterpolationMode,
    KeyframeCursor, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta,
};
use myth_character::animation::values::Interpolatable;

fn settings(layer: ClipLayer, weight: f32, fade_in: f32, fade_out: f32) -> ClipSettings {
    ClipSettings {
        layer,
        weight,
        fade_in,
        fade_out,
    }
}

// ============================================================================
// KeyframeTrack: Linear / Step / Cubic
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_linear_f32_clamps_outside_range() {
    let track = KeyframeTrack::new(vec![1.0, 2.0], vec![10.0_f32, 20.0], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor).unwrap(), 10.0));
    assert!(approx(track.sample_with_cursor(5.0, &mut cursor).unwrap(), 20.0));
}

#[test]
fn track_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor).unwrap(), 0.0));
    assert!(approx(track.sample_with_cursor(0.99, &mut cursor).unwrap(), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor).unwrap(), 100.0));
    assert!(approx(track.sample_with_cursor(1.5, &mut cursor).unwrap(), 100.0));
}

#[test]
fn track_linear_quat_slerp() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(PI / 2.0);
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![q0, q1], InterpolationMode::Linear);

    let val = track.sample(0.5).unwrap();
    assert!(quat_approx(val, q0.slerp(q1, 0.5)));
}

#[test]
fn track_cubic_f32_endpoints() {
    // values = [in_tangent0, value0, out_tangent0, in_tangent1, value1, out_tangent1]
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 0.0, 1.0, 1.0, 10.0, 0.0],
        InterpolationMode::CubicSpline,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor).unwrap(), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor).unwrap(), 10.0));
}

#[test]
fn track_cubic_zero_tangents_is_smoothstep() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 0.0, 0.0, 0.0, 10.0, 0.0],
        InterpolationMode::CubicSpline,
    );
    // Hermite with zero tangents: 3t² - 2t³
    assert!(approx(track.sample(0.5).unwrap(), 5.0));
    assert!(approx(track.sample(0.25).unwrap(), 10.0 * (3.0 * 0.0625 - 2.0 * 0.015_625)));
}

#[test]
fn track_empty_or_short_values_is_none() {
    let empty: KeyframeTrack<f32> = KeyframeTrack::new(vec![], vec![], InterpolationMode::Linear);
    assert!(empty.sample(0.0).is_none());

    let short = KeyframeTrack::new(vec![0.0, 1.0], vec![1.0_f32, 2.0], InterpolationMode::CubicSpline);
    let mut cursor = KeyframeCursor::default();
    assert!(short.sample_with_cursor(0.5, &mut cursor).is_none());
}

#[test]
fn sample_matches_cursor_across_all_times() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 5.0, 20.0, 15.0],
        InterpolationMode::Linear,
    );
    let mut cursor = KeyframeCursor::default();
    for i in 0..=40 {
        let t = i as f32 * 0.1;
        let a = track.sample(t).unwrap();
        let b = track.sample_with_cursor(t, &mut cursor).unwrap();
        assert!(approx(a, b), "t={t}: sample()={a} != sample_with_cursor()={b}");
    }
}

#[test]
fn cursor_forward_then_jump_back() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        vec![0.0_f32, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(5.5, &mut cursor).unwrap(), 55.0));
    assert_eq!(cursor.last_index, 5);

    // Beyond the scan window: binary search fallback
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor).unwrap(), 5.0));
    assert_eq!(cursor.last_index, 0);
}

#[test]
fn interpolatable_vec3_linear() {
    let result = Vec3::interpolate_linear(Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0), 0.5);
    assert!(approx(result.x, 5.0) && approx(result.y, 10.0) && approx(result.z, 15.0));
}

// ============================================================================
// AnimationClip & Binder
// ============================================================================

#[test]
fn clip_duration_is_latest_keyframe() {
    let clip = AnimationClip::new(
        "mixed",
        vec![
            Track::rotation(
                "Head",
                KeyframeTrack::new(vec![0.0, 1.5], vec![Quat::IDENTITY; 2], InterpolationMode::Linear),
            ),
            Track::translation(
                "Hips",
                KeyframeTrack::new(vec![0.0, 2.5], vec![Vec3::ZERO; 2], InterpolationMode::Linear),
            ),
        ],
    );
    assert!(approx(clip.duration, 2.5));

    let explicit = AnimationClip::with_duration("long", 4.0, clip.tracks.clone());
    assert!(approx(explicit.duration, 4.0));
}

#[test]
fn binder_skips_missing_bones_and_mismatched_types() {
    let skeleton = humanoid_skeleton();
    let clip = AnimationClip::new(
        "partial",
        vec![
            Track::rotation(
                "Head",
                KeyframeTrack::new(vec![0.0], vec![Quat::IDENTITY], InterpolationMode::Step),
            ),
            Track::rotation(
                "Tail",
                KeyframeTrack::new(vec![0.0], vec![Quat::IDENTITY], InterpolationMode::Step),
            ),
            Track {
                meta: TrackMeta {
                    bone_name: "Neck".into(),
                    target: TargetPath::Rotation,
                },
                data: TrackData::Vector3(KeyframeTrack::new(
                    vec![0.0],
                    vec![Vec3::ZERO],
                    InterpolationMode::Step,
                )),
            },
        ],
    );

    let bindings = Binder::bind(&skeleton, &clip);
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].track_index, 0);
    assert_eq!(bindings[0].bone, skeleton.find("Head").unwrap());
}

// ============================================================================
// ClipPlayer: registration & errors
// ============================================================================

#[test]
fn add_clip_before_initialize_fails() {
    let mut player = ClipPlayer::new();
    let err = player.add_clip("wave", head_turn_clip("wave", 2.0, 1.0)).unwrap_err();
    assert!(matches!(err, RigError::NotInitialized(_)));
}

#[test]
fn play_unknown_clip_fails() {
    let mut player = ClipPlayer::new();
    player.initialize(&humanoid());
    let err = player.play("missing", 0.2).unwrap_err();
    assert!(matches!(err, RigError::ClipNotFound(ref id) if id == "missing"));
    assert!(!player.state().is_playing);
}

#[test]
fn initialize_registers_preloaded_clips() {
    init_logger();
    let character = humanoid().with_clip(head_turn_clip("idle_look", 3.0, 0.5));
    let mut player = ClipPlayer::new();
    player.initialize(&character);

    assert_eq!(player.clip_ids(), vec!["idle_look".to_string()]);
    let info = player.clip_info("idle_look").unwrap();
    assert!(approx(info.duration, 3.0));
    assert_eq!(info.bound_track_count, 1);
    assert_eq!(info.layer, ClipLayer::Base);
}

#[test]
fn re_registration_silently_overwrites() -> anyhow::Result<()> {
    let mut player = ClipPlayer::new();
    player.initialize(&humanoid());
    player.add_clip("wave", head_turn_clip("wave", 2.0, 1.0))?;
    player.add_clip_with("wave", head_turn_clip("wave_v2", 5.0, 1.0), settings(ClipLayer::Overlay, 0.5, 0.1, 0.1))?;

    let info = player.clip_info("wave").unwrap();
    assert_eq!(info.name, "wave_v2");
    assert!(approx(info.duration, 5.0));
    assert_eq!(info.layer, ClipLayer::Overlay);
    assert_eq!(player.clip_ids().len(), 1);
    Ok(())
}

#[test]
fn remove_current_clip_resets_state() -> anyhow::Result<()> {
    let mut player = ClipPlayer::new();
    player.initialize(&humanoid());
    player.add_clip("wave", head_turn_clip("wave", 2.0, 1.0))?;
    player.play("wave", 0.0)?;

    assert!(player.remove_clip("wave"));
    assert!(!player.remove_clip("wave"));
    assert!(player.current_clip().is_none());
    assert!(!player.state().is_playing);
    Ok(())
}

// ============================================================================
// ClipPlayer: playback state
// ============================================================================

#[test]
fn scenario_non_looping_clip_ends_paused_at_duration() -> anyhow::Result<()> {
    let mut character = humanoid();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip("wave", head_turn_clip("wave", 2.0, 1.0))?;
    player.set_loop(false);
    player.play("wave", 0.2)?;

    player.update(1.0, &mut character.skeleton);
    assert!(player.state().is_playing);
    assert!(approx(player.state().current_time, 1.0));

    player.update(1.0, &mut character.skeleton);
    player.update(1.0, &mut character.skeleton);

    let state = player.state();
    assert!(!state.is_playing);
    assert!(state.is_paused);
    assert_eq!(state.current_time, 2.0);
    // Held last pose, not stopped
    assert_eq!(player.clip_state("wave"), Some(ActionState::Active));
    Ok(())
}

#[test]
fn looping_state_time_matches_sampled_pose() -> anyhow::Result<()> {
    let mut character = humanoid();
    let head = character.skeleton.find("Head").unwrap();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip("wave", head_turn_clip("wave", 2.0, 1.0))?;
    player.set_loop(true);
    player.play("wave", 0.0)?;

    player.update(1.5, &mut character.skeleton);
    player.update(1.5, &mut character.skeleton);
    let state = player.state();
    assert!(state.is_playing);
    // 3.0s into a 2s loop: the remainder carries over
    assert!(approx(state.current_time, 1.0));

    // Head turn is linear over the clip, so the pose encodes the sample time
    let rotation = character.skeleton.bone(head).unwrap().transform.rotation;
    let expected = Quat::from_rotation_y(state.current_time / 2.0);
    assert!(quat_approx(rotation, expected));

    // Seeking from the reported time reproduces the same pose
    player.seek(state.current_time);
    player.update(0.0, &mut character.skeleton);
    assert!(quat_approx(character.skeleton.bone(head).unwrap().transform.rotation, expected));
    Ok(())
}

#[test]
fn looping_clip_landing_on_duration_wraps_to_zero() -> anyhow::Result<()> {
    let mut character = humanoid();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip("wave", head_turn_clip("wave", 2.0, 1.0))?;
    player.play("wave", 0.0)?;

    player.update(2.0, &mut character.skeleton);
    assert!(player.state().is_playing);
    assert_eq!(player.state().current_time, 0.0);
    Ok(())
}

#[test]
fn speed_scales_time_advance() -> anyhow::Result<()> {
    let mut character = humanoid();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip("wave", head_turn_clip("wave", 4.0, 1.0))?;
    player.play("wave", 0.0)?;
    player.set_speed(2.0);

    player.update(0.5, &mut character.skeleton);
    assert!(approx(player.state().current_time, 1.0));
    assert!(approx(player.state().speed, 2.0));
    Ok(())
}

#[test]
fn pause_resume_and_seek() -> anyhow::Result<()> {
    let mut character = humanoid();
    let mut player = ClipPlayer::new();
    player.initialize(&character);

    // No current clip: all no-ops
    player.pause();
    player.seek(1.0);
    assert_eq!(player.state(), PlaybackState::default());

    player.add_clip("wave", head_turn_clip("wave", 2.0, 1.0))?;
    player.play("wave", 0.0)?;
    player.update(0.5, &mut character.skeleton);

    player.pause();
    player.update(0.5, &mut character.skeleton);
    assert!(approx(player.state().current_time, 0.5));
    assert!(player.state().is_paused);

    player.resume();
    player.update(0.25, &mut character.skeleton);
    assert!(approx(player.state().current_time, 0.75));

    player.seek(10.0);
    assert_eq!(player.state().current_time, 2.0);
    player.seek(-3.0);
    assert_eq!(player.state().current_time, 0.0);
    Ok(())
}

#[test]
fn stop_reports_immediately_and_fades_deterministically() -> anyhow::Result<()> {
    let mut character = humanoid();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip("wave", head_turn_clip("wave", 2.0, 1.0))?;
    player.play("wave", 0.0)?;
    player.update(0.5, &mut character.skeleton);

    player.stop(0.4);
    let state = player.state();
    assert!(!state.is_playing);
    assert_eq!(state.current_time, 0.0);
    assert!(player.current_clip().is_none());
    assert_eq!(player.clip_state("wave"), Some(ActionState::Stopping));

    player.update(0.2, &mut character.skeleton);
    let mid = player.clip_weight("wave").unwrap();
    assert!(mid > 0.0 && mid < 1.0, "mid-fade weight {mid}");
    assert_eq!(player.clip_state("wave"), Some(ActionState::Stopping));

    player.update(0.25, &mut character.skeleton);
    assert_eq!(player.clip_weight("wave"), Some(0.0));
    assert_eq!(player.clip_state("wave"), Some(ActionState::Inactive));
    Ok(())
}

#[test]
fn stopped_clip_releases_bones_to_rest() -> anyhow::Result<()> {
    let mut character = humanoid();
    let head = character.skeleton.find("Head").unwrap();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip("look", head_hold_clip("look", 1.0, 1.0))?;
    player.play("look", 0.0)?;

    let dt = 1.0 / 60.0;
    player.update(dt, &mut character.skeleton);
    assert!(quat_approx(character.skeleton.bone(head).unwrap().transform.rotation, Quat::from_rotation_y(1.0)));

    player.stop(0.2);
    for _ in 0..60 {
        player.update(dt, &mut character.skeleton);
    }
    assert_eq!(player.clip_state("look"), Some(ActionState::Inactive));
    assert_eq!(character.skeleton.bone(head).unwrap().transform.rotation, Quat::IDENTITY);
    Ok(())
}

#[test]
fn stop_with_zero_fade_is_immediate() -> anyhow::Result<()> {
    let mut player = ClipPlayer::new();
    player.initialize(&humanoid());
    player.add_clip("wave", head_turn_clip("wave", 2.0, 1.0))?;
    player.play("wave", 0.0)?;
    player.stop(0.0);
    assert_eq!(player.clip_state("wave"), Some(ActionState::Inactive));
    Ok(())
}

// ============================================================================
// ClipPlayer: crossfades
// ============================================================================

#[test]
fn crossfade_weights_reach_targets_within_fade_times() -> anyhow::Result<()> {
    let mut character = humanoid();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip_with("a", head_hold_clip("a", 2.0, 0.0), settings(ClipLayer::Base, 1.0, 0.2, 0.5))?;
    player.add_clip_with("b", head_hold_clip("b", 2.0, 1.0), settings(ClipLayer::Base, 0.8, 0.2, 0.2))?;

    player.play("a", 0.0)?;
    player.update(0.1, &mut character.skeleton);
    assert_eq!(player.clip_weight("a"), Some(1.0));

    player.play("b", 0.3)?;
    assert_eq!(player.current_clip(), Some("b"));

    let dt = 0.05;
    let mut last_a = 1.0;
    for step in 1..=12 {
        player.update(dt, &mut character.skeleton);
        let a = player.clip_weight("a").unwrap();
        let b = player.clip_weight("b").unwrap();
        assert!(a <= last_a, "a must not rise during fade-out");
        last_a = a;

        let elapsed = step as f32 * dt;
        if elapsed >= 0.3 + dt {
            assert_eq!(b, 0.8, "b at {elapsed}s");
        }
        if elapsed >= 0.5 + dt {
            assert_eq!(a, 0.0, "a at {elapsed}s");
            assert_eq!(player.clip_state("a"), Some(ActionState::Inactive));
        }
    }
    Ok(())
}

#[test]
fn crossfade_releases_bones_the_incoming_clip_does_not_bind() -> anyhow::Result<()> {
    let mut character = humanoid();
    let head = character.skeleton.find("Head").unwrap();
    let neck = character.skeleton.find("Neck").unwrap();
    let neck_clip = AnimationClip::new(
        "nod",
        vec![Track::rotation(
            "Neck",
            KeyframeTrack::new(
                vec![0.0, 1.0],
                vec![Quat::from_rotation_x(0.3), Quat::from_rotation_x(0.3)],
                InterpolationMode::Step,
            ),
        )],
    );

    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip("look", head_hold_clip("look", 1.0, 1.0))?;
    player.add_clip("nod", neck_clip)?;
    player.play("look", 0.0)?;

    let dt = 1.0 / 60.0;
    player.update(dt, &mut character.skeleton);
    player.play("nod", 0.2)?;
    for _ in 0..60 {
        player.update(dt, &mut character.skeleton);
    }

    assert_eq!(player.clip_state("look"), Some(ActionState::Inactive));
    assert_eq!(character.skeleton.bone(head).unwrap().transform.rotation, Quat::IDENTITY);
    assert!(quat_approx(
        character.skeleton.bone(neck).unwrap().transform.rotation,
        Quat::from_rotation_x(0.3)
    ));
    Ok(())
}

#[test]
fn blend_applies_current_loop_setting() -> anyhow::Result<()> {
    let mut character = humanoid();
    let head = character.skeleton.find("Head").unwrap();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    // Registered while looping is on
    player.add_clip("a", head_hold_clip("a", 1.0, 0.0))?;
    player.add_clip("b", head_turn_clip("b", 1.0, 1.0))?;
    player.activate("a", 0.0)?;

    player.set_loop(false);
    player.blend("a", "b", 0.0)?;
    player.update(1.5, &mut character.skeleton);

    // Held on the last key instead of wrapping to 0.5s
    let rotation = character.skeleton.bone(head).unwrap().transform.rotation;
    assert!(quat_approx(rotation, Quat::from_rotation_y(1.0)));
    Ok(())
}

#[test]
fn blend_requires_both_clips() -> anyhow::Result<()> {
    let mut player = ClipPlayer::new();
    player.initialize(&humanoid());
    player.add_clip("a", head_hold_clip("a", 1.0, 0.0))?;

    assert!(matches!(player.blend("a", "nope", 0.5), Err(RigError::ClipNotFound(ref id)) if id == "nope"));
    assert!(matches!(player.blend("nope", "a", 0.5), Err(RigError::ClipNotFound(_))));
    Ok(())
}

#[test]
fn blend_crossfades_without_touching_current() -> anyhow::Result<()> {
    let mut character = humanoid();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip("a", head_hold_clip("a", 1.0, 0.0))?;
    player.add_clip("b", head_hold_clip("b", 1.0, 1.0))?;
    player.activate("a", 0.0)?;

    player.blend("a", "b", 0.4)?;
    assert!(player.current_clip().is_none());

    player.update(0.2, &mut character.skeleton);
    let a = player.clip_weight("a").unwrap();
    let b = player.clip_weight("b").unwrap();
    assert!(approx(a, 0.5) && approx(b, 0.5), "a={a} b={b}");

    player.update(0.25, &mut character.skeleton);
    assert_eq!(player.clip_state("a"), Some(ActionState::Inactive));
    assert_eq!(player.clip_weight("b"), Some(1.0));
    Ok(())
}

// ============================================================================
// Pose application
// ============================================================================

#[test]
fn playback_writes_sampled_rotation() -> anyhow::Result<()> {
    let mut character = humanoid();
    let head = character.skeleton.find("Head").unwrap();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip("turn", head_turn_clip("turn", 2.0, 1.0))?;
    player.play("turn", 0.0)?;

    player.update(1.0, &mut character.skeleton);
    let rotation = character.skeleton.bone(head).unwrap().transform.rotation;
    assert!(quat_approx(rotation, Quat::from_rotation_y(0.5)));
    Ok(())
}

#[test]
fn partial_weight_blends_toward_rest_pose() -> anyhow::Result<()> {
    let mut character = humanoid();
    let head = character.skeleton.find("Head").unwrap();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip_with("look", head_hold_clip("look", 1.0, 1.0), settings(ClipLayer::Base, 0.5, 0.0, 0.0))?;
    player.play("look", 0.0)?;

    player.update(0.1, &mut character.skeleton);
    let rotation = character.skeleton.bone(head).unwrap().transform.rotation;
    assert!(quat_approx(rotation, Quat::from_rotation_y(0.5)));
    Ok(())
}

#[test]
fn overlay_layer_blends_over_base() -> anyhow::Result<()> {
    let mut character = humanoid();
    let head = character.skeleton.find("Head").unwrap();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip_with("base", head_hold_clip("base", 1.0, 0.4), settings(ClipLayer::Base, 1.0, 0.0, 0.0))?;
    player.add_clip_with("look", head_hold_clip("look", 1.0, 1.0), settings(ClipLayer::Overlay, 0.5, 0.0, 0.0))?;

    player.play("base", 0.0)?;
    player.activate("look", 0.0)?;
    player.update(0.1, &mut character.skeleton);

    let rotation = character.skeleton.bone(head).unwrap().transform.rotation;
    assert!(quat_approx(rotation, Quat::from_rotation_y(0.7)));
    Ok(())
}

#[test]
fn additive_layer_adds_delta_from_rest() -> anyhow::Result<()> {
    let mut character = humanoid();
    let head = character.skeleton.find("Head").unwrap();
    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip_with("base", head_hold_clip("base", 1.0, 0.4), settings(ClipLayer::Base, 1.0, 0.0, 0.0))?;
    player.add_clip_with("nod", head_hold_clip("nod", 1.0, 0.2), settings(ClipLayer::Additive, 1.0, 0.0, 0.0))?;

    player.play("base", 0.0)?;
    player.activate("nod", 0.0)?;
    player.update(0.1, &mut character.skeleton);

    let rotation = character.skeleton.bone(head).unwrap().transform.rotation;
    assert!(quat_approx(rotation, Quat::from_rotation_y(0.6)));

    player.deactivate("nod")?;
    assert_eq!(player.clip_state("nod"), Some(ActionState::Inactive));
    Ok(())
}

#[test]
fn unbound_bones_are_left_alone() -> anyhow::Result<()> {
    let mut character = humanoid();
    let chest = character.skeleton.find("Chest").unwrap();
    let before = character.skeleton.bone(chest).unwrap().transform.rotation;

    let mut player = ClipPlayer::new();
    player.initialize(&character);
    player.add_clip("turn", head_turn_clip("turn", 2.0, 1.0))?;
    player.play("turn", 0.0)?;
    player.update(0.5, &mut character.skeleton);

    assert_eq!(character.skeleton.bone(chest).unwrap().transform.rotation, before);
    Ok(())
}
