//! Core types for the category taxonomy engine.

/// NodeIndex: position of a node in the store's pre-order arena
pub type NodeIndex = usize;

/// Depth: 0-based level of a node (roots are depth 0)
pub type Depth = usize;

/// Maximum depth accepted when building a store. The retail forest is 1-5
/// levels deep; anything past this ceiling is a malformed definition.
pub const MAX_DEPTH: Depth = 32;
