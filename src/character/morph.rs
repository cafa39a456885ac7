use rustc_hash::FxHashMap;

/// The character's declared morph channels and their live weights.
///
/// This is the store the renderer reads every frame. Channel order is the
/// declaration order from the source asset; names are unique.
#[derive(Debug, Clone, Default)]
pub struct MorphChannelStore {
    names: Vec<String>,
    weights: Vec<f32>,
    index: FxHashMap<String, usize>,
}

impl MorphChannelStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from declared channel names, skipping duplicates.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for name in names {
            store.declare(name);
        }
        store
    }

    /// Declares a channel with weight 0. Returns its index.
    pub fn declare(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(&i) = self.index.get(&name) {
            return i;
        }
        let i = self.names.len();
        self.index.insert(name.clone(), i);
        self.names.push(name);
        self.weights.push(0.0);
        i
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[inline]
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.index_of(name).map(|i| self.weights[i])
    }

    /// Writes a weight. Returns `false` if the character has no such channel.
    pub fn set(&mut self, name: &str, weight: f32) -> bool {
        match self.index_of(name) {
            Some(i) => {
                self.weights[i] = weight;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn set_at(&mut self, index: usize, weight: f32) {
        if let Some(w) = self.weights.get_mut(index) {
            *w = weight;
        }
    }
}
