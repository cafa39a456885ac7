//! Character data model
//!
//! What a format adapter hands to the core:
//! - [`Skeleton`]: bone hierarchy with mutable local transforms
//! - [`MorphChannelStore`]: named morph channels the renderer reads
//! - [`AnimationClip`](crate::animation::AnimationClip)s preloaded from the asset
//! - [`ModelFormat`]: the interchange format the character came from

pub mod format;
pub mod morph;
pub mod skeleton;
pub mod transform;

use std::sync::Arc;

use slotmap::new_key_type;

use crate::animation::AnimationClip;

pub use format::ModelFormat;
pub use morph::MorphChannelStore;
pub use skeleton::{Bone, RestTransform, Skeleton};
pub use transform::Transform;

new_key_type! {
    pub struct BoneHandle;
}

/// A loaded skinned character.
#[derive(Debug, Clone)]
pub struct Character {
    pub name: String,
    pub format: ModelFormat,
    pub skeleton: Skeleton,
    pub morphs: MorphChannelStore,
    pub clips: Vec<Arc<AnimationClip>>,
}

impl Character {
    #[must_use]
    pub fn new(name: impl Into<String>, format: ModelFormat) -> Self {
        Self {
            name: name.into(),
            format,
            skeleton: Skeleton::new(),
            morphs: MorphChannelStore::new(),
            clips: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_skeleton(mut self, skeleton: Skeleton) -> Self {
        self.skeleton = skeleton;
        self
    }

    #[must_use]
    pub fn with_morphs(mut self, morphs: MorphChannelStore) -> Self {
        self.morphs = morphs;
        self
    }

    #[must_use]
    pub fn with_clip(mut self, clip: AnimationClip) -> Self {
        self.clips.push(Arc::new(clip));
        self
    }
}
