//! Entity identifier

use slotmap::{Key, KeyData};

slotmap::new_key_type! {
    /// Opaque entity identifier.
    ///
    /// An entity owns no data itself; its existence is defined purely by
    /// the components associated with it in a [`crate::ecs::Registry`].
    /// The identifier carries a generation so a handle to a destroyed
    /// entity fails validity checks instead of aliasing a recycled slot.
    pub struct Entity;
}

impl Entity {
    /// Pack the identifier into 64 bits, e.g. to stash it in physics-body
    /// user data. Round-trips through [`Entity::from_bits`].
    pub fn to_bits(self) -> u64 {
        self.data().as_ffi()
    }

    /// Recover an identifier previously packed with [`Entity::to_bits`]
    pub fn from_bits(bits: u64) -> Self {
        KeyData::from_ffi(bits).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_round_trip() {
        let mut entities: slotmap::SlotMap<Entity, ()> = slotmap::SlotMap::with_key();
        let e = entities.insert(());
        assert_eq!(Entity::from_bits(e.to_bits()), e);
    }
}
