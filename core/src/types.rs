//! Shared primitive types used across the analytics core.

/// Stable identifier of a baseline segment ("seg-001" .. "seg-003").
pub type SegmentId = String;

/// Sequence-unique identifier of a synthetic user ("u-000042").
pub type UserId = String;
