//! Item stacks produced by item-container transfers (filled bottles,
//! emptied buckets, ...).

/// An item identifier and a count. `count == 0` or an empty id is an
/// empty slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStack {
    /// Namespaced item identifier, e.g. `"minecraft:water_bucket"`.
    pub id: String,
    pub count: u16,
}

impl ItemStack {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(id: impl Into<String>, count: u16) -> Self {
        Self {
            id: id.into(),
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.id.is_empty() || self.id == "minecraft:air"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness() {
        assert!(ItemStack::empty().is_empty());
        assert!(ItemStack::new("minecraft:bucket", 0).is_empty());
        assert!(ItemStack::new("minecraft:air", 1).is_empty());
        assert!(!ItemStack::new("minecraft:bucket", 1).is_empty());
    }
}
