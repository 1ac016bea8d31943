//! Entity and component error types.

use crate::component::ComponentKind;
use crate::entity::Entity;

/// Recoverable errors returned by entity manager operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    /// The entity was never created, or has already been destroyed.
    #[error("unknown entity {0}")]
    UnknownEntity(Entity),

    /// The entity is alive but does not own a component of this kind.
    #[error("{entity} has no {kind} component")]
    ComponentNotFound {
        /// The entity queried.
        entity: Entity,
        /// The missing component kind.
        kind: ComponentKind,
    },

    /// Every entity index is in use.
    #[error("entity limit of {0} reached")]
    EntityLimitReached(u32),

    /// No entity carries this tag.
    #[error("no entity tagged '{0}'")]
    TagNotFound(String),

    /// No entity belongs to this group.
    #[error("no entities in group '{0}'")]
    GroupNotFound(String),
}
