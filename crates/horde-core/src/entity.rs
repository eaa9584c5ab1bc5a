use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque entity identifier.
///
/// Ids are handed out by a monotonically increasing counter in the
/// [`World`](crate::world::World) and are never reused, so ordering by id is
/// insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}
