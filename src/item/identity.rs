use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Unique identifier for an item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ItemKind(pub u32);

impl ItemKind {
    /// Create a new ItemKind from a raw u32 value
    pub const fn new(id: u32) -> Self {
        ItemKind(id)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

/// A concrete stack as the host hands it over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub damage: u16,
    #[serde(default)]
    pub max_damage: Option<u16>,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl ItemStack {
    pub fn new(kind: ItemKind, damage: u16, count: u32) -> Self {
        Self {
            kind,
            damage,
            max_damage: None,
            count,
        }
    }

    pub fn damageable(kind: ItemKind, damage: u16, max_damage: u16, count: u32) -> Self {
        Self {
            kind,
            damage,
            max_damage: Some(max_damage),
            count,
        }
    }
}

/// Quantity-free identity of an item.
///
/// Equality and hashing cover `(kind, damage)` only. `max_damage` is carried
/// along for fuzzy comparisons and is a property of the kind, so it never
/// distinguishes two identities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemIdentity {
    kind: ItemKind,
    #[serde(default)]
    damage: u16,
    #[serde(default)]
    max_damage: Option<u16>,
}

impl ItemIdentity {
    /// Identity of a non-damageable variant
    pub const fn new(kind: ItemKind, damage: u16) -> Self {
        Self {
            kind,
            damage,
            max_damage: None,
        }
    }

    /// Identity of a damageable item with `max_damage` points of durability
    pub const fn damageable(kind: ItemKind, damage: u16, max_damage: u16) -> Self {
        Self {
            kind,
            damage,
            max_damage: Some(max_damage),
        }
    }

    pub fn from_stack(stack: &ItemStack) -> Self {
        Self {
            kind: stack.kind,
            damage: stack.damage,
            max_damage: stack.max_damage,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn damage(&self) -> u16 {
        self.damage
    }

    /// Sub-variant or damage value, depending on the kind
    pub fn secondary_attribute(&self) -> u16 {
        self.damage
    }

    pub fn max_damage(&self) -> Option<u16> {
        self.max_damage
    }

    /// A zero durability span counts as not damageable
    pub fn is_damageable(&self) -> bool {
        matches!(self.max_damage, Some(max) if max > 0)
    }

    /// Feed every field into `state`, including the tolerance tag.
    /// Used where a change in `max_damage` must also be observed.
    pub fn fingerprint<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.damage.hash(state);
        self.max_damage.hash(state);
    }
}

impl PartialEq for ItemIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.damage == other.damage
    }
}

impl Eq for ItemIdentity {}

impl Hash for ItemIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.damage.hash(state);
    }
}

impl From<&ItemStack> for ItemIdentity {
    fn from(stack: &ItemStack) -> Self {
        ItemIdentity::from_stack(stack)
    }
}

impl fmt::Display for ItemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_damage {
            Some(max) => write!(f, "{}@{}/{}", self.kind, self.damage, max),
            None => write!(f, "{}:{}", self.kind, self.damage),
        }
    }
}
