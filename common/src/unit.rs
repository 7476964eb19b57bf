//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity completion.
#[derive(Clone, Copy, Debug)]
pub struct Completion;

/// Marker type describing an entity deletion.
#[derive(Clone, Copy, Debug)]
pub struct Deletion;

/// Marker type describing an entity update.
#[derive(Clone, Copy, Debug)]
pub struct Update;
