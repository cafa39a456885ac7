use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::character::{BoneHandle, Skeleton};

pub struct Binder;

impl Binder {
    /// Resolves each track of `clip` to a bone in `skeleton`.
    ///
    /// Tracks naming a missing bone, or whose value type does not fit the
    /// target property, are skipped.
    #[must_use]
    pub fn bind(skeleton: &Skeleton, clip: &AnimationClip) -> Vec<PropertyBinding> {
        Self::bind_with(|name| skeleton.find(name), clip)
    }

    /// Same as [`Binder::bind`] over any name lookup.
    pub fn bind_with<F>(lookup: F, clip: &AnimationClip) -> Vec<PropertyBinding>
    where
        F: Fn(&str) -> Option<BoneHandle>,
    {
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_index, track) in clip.tracks.iter().enumerate() {
            let target = track.meta.target;
            if !track.data.matches(target) {
                log::warn!(
                    "Binder: clip '{}' track {track_index} has a value type unfit for {target:?}",
                    clip.name
                );
                continue;
            }

            match lookup(&track.meta.bone_name) {
                Some(bone) => bindings.push(PropertyBinding {
                    track_index,
                    bone,
                    target,
                }),
                None => log::debug!(
                    "Binder: clip '{}' targets missing bone '{}'",
                    clip.name,
                    track.meta.bone_name
                ),
            }
        }

        bindings
    }
}
