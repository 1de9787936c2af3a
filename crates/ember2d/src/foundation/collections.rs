//! Specialized collection types

pub use slotmap::{DefaultKey, SlotMap};

/// Handle-based map using slot map for stable, generation-checked references
pub type HandleMap<T> = SlotMap<DefaultKey, T>;

/// Typed handle for type-safe resource references.
///
/// Wraps a slot-map key so that a handle into one pool cannot be used to
/// index another pool of a different element type. Stale handles (slot
/// reused after removal) fail the generation check on lookup instead of
/// aliasing the new occupant.
#[derive(Debug)]
pub struct TypedHandle<T> {
    key: DefaultKey,
    _phantom: std::marker::PhantomData<T>,
}

// Manual impls: handles are plain keys, so none of these may require the
// pointed-to `T` to implement the trait (a derive would add that bound).
impl<T> Clone for TypedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<T> {}

impl<T> PartialEq for TypedHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for TypedHandle<T> {}

impl<T> std::hash::Hash for TypedHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> TypedHandle<T> {
    /// Create a new typed handle from a key
    pub fn new(key: DefaultKey) -> Self {
        Self {
            key,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Get the underlying key
    pub fn key(&self) -> DefaultKey {
        self.key
    }
}
