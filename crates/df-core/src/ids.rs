use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for a duct, fitting or piece of equipment.
///
/// The identity is owned by the external entity store; the core only carries
/// it around so results can be keyed back to the entity they describe.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<EntityId>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EntityId(NonZeroU32);

impl EntityId {
    /// Wrap a raw store identifier. Returns `None` for zero.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Create an id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Raw store identifier (always nonzero).
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.get())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_raw_agree() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = EntityId::from_index(i);
            assert_eq!(id.index(), i);
            assert_eq!(id.get(), i + 1);
            assert_eq!(EntityId::new(i + 1), Some(id));
        }
    }

    #[test]
    fn zero_is_not_an_id() {
        assert!(EntityId::new(0).is_none());
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<EntityId>(),
            core::mem::size_of::<Option<EntityId>>()
        );
    }

    #[test]
    fn display_uses_raw_value() {
        assert_eq!(EntityId::from_index(6).to_string(), "#7");
    }
}
