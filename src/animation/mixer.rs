use glam::{Quat, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::animation::action::{AnimationAction, ClipLayer, TrackValue};
use crate::animation::binding::TargetPath;
use crate::animation::values::Interpolatable;
use crate::character::{BoneHandle, RestTransform, Skeleton};

type PropertyKey = (BoneHandle, TargetPath);

#[derive(Debug, Clone, Copy)]
enum PropertyValue {
    Vector3(Vec3),
    Quaternion(Quat),
}

impl PropertyValue {
    fn from_track(value: TrackValue) -> Self {
        match value {
            TrackValue::Vector3(v) => PropertyValue::Vector3(v),
            TrackValue::Quaternion(q) => PropertyValue::Quaternion(q),
        }
    }

    fn mix(self, other: Self, t: f32) -> Self {
        match (self, other) {
            (PropertyValue::Vector3(a), PropertyValue::Vector3(b)) => {
                PropertyValue::Vector3(Vec3::interpolate_linear(a, b, t))
            }
            (PropertyValue::Quaternion(a), PropertyValue::Quaternion(b)) => {
                PropertyValue::Quaternion(Quat::interpolate_linear(a, b, t))
            }
            // Bindings are type-checked, mismatches cannot reach here.
            (a, _) => a,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Accumulated {
    value: PropertyValue,
    weight: f32,
}

/// Blends sampled clip values into bone transforms.
///
/// Every property bound by an effective action is first reset to the rest
/// pose, then layers are applied in ascending priority. Within a layer the
/// actions' samples are weight-averaged; the layer result is blended over
/// the pose by the layer's total weight (capped at 1). A property written on
/// the previous tick that no effective action binds any more goes back to
/// rest; properties never bound are left untouched.
#[derive(Debug, Default)]
pub struct PoseMixer {
    rest: FxHashMap<BoneHandle, RestTransform>,
    layer: FxHashMap<PropertyKey, Accumulated>,
    /// Properties driven on the last tick.
    written: FxHashSet<PropertyKey>,
    bound: FxHashSet<PropertyKey>,
}

impl PoseMixer {
    #[must_use]
    pub fn new(rest: FxHashMap<BoneHandle, RestTransform>) -> Self {
        Self {
            rest,
            layer: FxHashMap::default(),
            written: FxHashSet::default(),
            bound: FxHashSet::default(),
        }
    }

    /// Writes the full rest TRS to every known bone.
    pub fn restore_rest(&self, skeleton: &mut Skeleton) {
        for (&bone, rest) in &self.rest {
            if let Some(node) = skeleton.bone_mut(bone) {
                node.transform.position = rest.position;
                node.transform.rotation = rest.rotation;
                node.transform.scale = rest.scale;
                node.transform.mark_dirty();
            }
        }
    }

    /// `actions` must be sorted by layer.
    pub fn apply(&mut self, actions: &mut [&mut AnimationAction], skeleton: &mut Skeleton) {
        self.bound.clear();
        for action in actions.iter().filter(|a| a.is_effective()) {
            for binding in &action.bindings {
                self.bound.insert((binding.bone, binding.target));
            }
        }

        // Bound properties start from rest; released ones (an action faded
        // out or was dropped) return to rest and stay there.
        for &(bone, target) in self.bound.union(&self.written) {
            if let Some(rest) = self.rest.get(&bone) {
                write_property(skeleton, bone, target, rest_value(rest, target));
            }
        }
        std::mem::swap(&mut self.written, &mut self.bound);

        let mut start = 0;
        while start < actions.len() {
            let layer = actions[start].settings().layer;
            let end = actions[start..]
                .iter()
                .position(|a| a.settings().layer != layer)
                .map_or(actions.len(), |offset| start + offset);

            if layer == ClipLayer::Additive {
                self.apply_additive(&mut actions[start..end], skeleton);
            } else {
                self.apply_layer(&mut actions[start..end], skeleton);
            }
            start = end;
        }
    }

    fn apply_layer(&mut self, actions: &mut [&mut AnimationAction], skeleton: &mut Skeleton) {
        self.layer.clear();

        for action in actions.iter_mut().filter(|a| a.is_effective()) {
            let weight = action.weight();
            for i in 0..action.bindings.len() {
                let binding = action.bindings[i];
                let Some(sample) = action.sample_track(binding.track_index) else {
                    continue;
                };
                let sample = PropertyValue::from_track(sample);

                self.layer
                    .entry((binding.bone, binding.target))
                    .and_modify(|acc| {
                        acc.weight += weight;
                        acc.value = acc.value.mix(sample, weight / acc.weight);
                    })
                    .or_insert(Accumulated {
                        value: sample,
                        weight,
                    });
            }
        }

        for (&(bone, target), acc) in &self.layer {
            let Some(current) = read_property(skeleton, bone, target) else {
                continue;
            };
            let blended = current.mix(acc.value, acc.weight.min(1.0));
            write_property(skeleton, bone, target, blended);
        }
    }

    fn apply_additive(&self, actions: &mut [&mut AnimationAction], skeleton: &mut Skeleton) {
        for action in actions.iter_mut().filter(|a| a.is_effective()) {
            let weight = action.weight().min(1.0);
            for i in 0..action.bindings.len() {
                let binding = action.bindings[i];
                let (Some(sample), Some(rest)) = (
                    action.sample_track(binding.track_index),
                    self.rest.get(&binding.bone),
                ) else {
                    continue;
                };
                let Some(current) = read_property(skeleton, binding.bone, binding.target) else {
                    continue;
                };

                let value = match (current, sample, binding.target) {
                    (PropertyValue::Quaternion(cur), TrackValue::Quaternion(q), _) => {
                        let delta = rest.rotation.inverse() * q;
                        PropertyValue::Quaternion(cur * Quat::IDENTITY.slerp(delta, weight))
                    }
                    (PropertyValue::Vector3(cur), TrackValue::Vector3(v), TargetPath::Translation) => {
                        PropertyValue::Vector3(cur + (v - rest.position) * weight)
                    }
                    (PropertyValue::Vector3(cur), TrackValue::Vector3(v), _) => {
                        let ratio = v / rest.scale.max(Vec3::splat(1e-6));
                        PropertyValue::Vector3(cur * Vec3::ONE.lerp(ratio, weight))
                    }
                    _ => continue,
                };
                write_property(skeleton, binding.bone, binding.target, value);
            }
        }
    }
}

fn rest_value(rest: &RestTransform, target: TargetPath) -> PropertyValue {
    match target {
        TargetPath::Translation => PropertyValue::Vector3(rest.position),
        TargetPath::Rotation => PropertyValue::Quaternion(rest.rotation),
        TargetPath::Scale => PropertyValue::Vector3(rest.scale),
    }
}

fn read_property(skeleton: &Skeleton, bone: BoneHandle, target: TargetPath) -> Option<PropertyValue> {
    let t = &skeleton.bone(bone)?.transform;
    Some(match target {
        TargetPath::Translation => PropertyValue::Vector3(t.position),
        TargetPath::Rotation => PropertyValue::Quaternion(t.rotation),
        TargetPath::Scale => PropertyValue::Vector3(t.scale),
    })
}

fn write_property(skeleton: &mut Skeleton, bone: BoneHandle, target: TargetPath, value: PropertyValue) {
    let Some(node) = skeleton.bone_mut(bone) else {
        return;
    };
    let t = &mut node.transform;
    match (target, value) {
        (TargetPath::Translation, PropertyValue::Vector3(v)) => t.position = v,
        (TargetPath::Scale, PropertyValue::Vector3(v)) => t.scale = v,
        (TargetPath::Rotation, PropertyValue::Quaternion(q)) => t.rotation = q,
        _ => return,
    }
    t.mark_dirty();
}
