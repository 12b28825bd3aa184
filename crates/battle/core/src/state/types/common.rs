//! Identifier aliases shared across the state model.
//!
//! Ids originate in the human-authored content tables and must survive JSON
//! round-trips verbatim, so they stay plain strings rather than interned
//! handles.

/// Identifier of a unit (party member or enemy).
pub type UnitId = String;

/// Identifier of an ability definition in the content tables.
pub type AbilityId = String;

/// Identifier of a Djinn definition in the content tables.
pub type DjinnId = String;

/// Identifier of an equipment definition in the content tables.
pub type EquipmentId = String;
