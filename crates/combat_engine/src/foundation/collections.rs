//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generation-checked handle identifying a live entity
    ///
    /// A handle to a destroyed entity never compares equal to the handle of
    /// whatever later occupies the same slot.
    pub struct EntityId;
}

/// Handle-based entity storage with stable references
pub type EntityMap<T> = SlotMap<EntityId, T>;
