//! Item identity
//!
//! What kind of item something is, independent of how many there are.
//! Everything in the partition engine keys off [`ItemIdentity`].

mod identity;

pub use identity::{ItemIdentity, ItemKind, ItemStack};
