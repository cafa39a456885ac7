use glam::{Affine3A, Quat, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::character::BoneHandle;
use crate::character::transform::Transform;

/// A named joint in the character's rigid hierarchy.
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    pub parent: Option<BoneHandle>,
    pub children: Vec<BoneHandle>,
    pub transform: Transform,
}

/// Snapshot of one bone's local TRS at bind time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl From<&Transform> for RestTransform {
    fn from(t: &Transform) -> Self {
        Self {
            position: t.position,
            rotation: t.rotation,
            scale: t.scale,
        }
    }
}

/// Bone hierarchy of a loaded character.
///
/// Bones live in a slot map so handles stay valid for the lifetime of the
/// skeleton; a name index provides the lookup format adapters and clip
/// binding rely on. Names are unique: adding a bone under an existing name
/// re-points the index at the newer bone.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bones: SlotMap<BoneHandle, Bone>,
    by_name: FxHashMap<String, BoneHandle>,
    roots: Vec<BoneHandle>,
}

impl Skeleton {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bone under `parent` (or as a root) and returns its handle.
    pub fn add_bone(
        &mut self,
        name: impl Into<String>,
        parent: Option<BoneHandle>,
        transform: Transform,
    ) -> BoneHandle {
        let name = name.into();
        // A dangling parent handle degrades to a root rather than an orphan.
        let parent = parent.filter(|p| self.bones.contains_key(*p));

        let handle = self.bones.insert(Bone {
            name: name.clone(),
            parent,
            children: Vec::new(),
            transform,
        });

        match parent {
            Some(p) => self.bones[p].children.push(handle),
            None => self.roots.push(handle),
        }

        if self.by_name.insert(name.clone(), handle).is_some() {
            log::warn!("Skeleton: duplicate bone name '{name}', lookups now resolve to the newest bone");
        }
        handle
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    #[must_use]
    pub fn roots(&self) -> &[BoneHandle] {
        &self.roots
    }

    #[inline]
    #[must_use]
    pub fn find(&self, name: &str) -> Option<BoneHandle> {
        self.by_name.get(name).copied()
    }

    /// Case-insensitive lookup, used when matching conventional bone names
    /// across exporters that disagree on capitalisation.
    #[must_use]
    pub fn find_ignore_case(&self, name: &str) -> Option<BoneHandle> {
        self.find(name).or_else(|| {
            self.by_name
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, &h)| h)
        })
    }

    #[inline]
    #[must_use]
    pub fn bone(&self, handle: BoneHandle) -> Option<&Bone> {
        self.bones.get(handle)
    }

    #[inline]
    pub fn bone_mut(&mut self, handle: BoneHandle) -> Option<&mut Bone> {
        self.bones.get_mut(handle)
    }

    #[must_use]
    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.find(name).and_then(|h| self.bones.get(h))
    }

    /// Mutable transform handle for the named bone.
    pub fn transform_mut(&mut self, name: &str) -> Option<&mut Transform> {
        let handle = self.find(name)?;
        self.bones.get_mut(handle).map(|b| &mut b.transform)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoneHandle, &Bone)> {
        self.bones.iter()
    }

    /// Snapshot of every bone's local TRS.
    #[must_use]
    pub fn rest_pose(&self) -> FxHashMap<BoneHandle, RestTransform> {
        self.bones
            .iter()
            .map(|(h, b)| (h, RestTransform::from(&b.transform)))
            .collect()
    }

    /// Composes local matrices from `handle` up to its root.
    #[must_use]
    pub fn world_matrix(&self, handle: BoneHandle) -> Option<Affine3A> {
        let mut bone = self.bones.get(handle)?;
        let mut world = bone.transform.compute_local_matrix();
        while let Some(parent) = bone.parent {
            bone = self.bones.get(parent)?;
            world = bone.transform.compute_local_matrix() * world;
        }
        Some(world)
    }
}
