//! System registry: tracks registered systems and the entities they match.
//!
//! Each [`SystemKind`] is registered at most once. For every system the
//! registry keeps a *matched list*: the live entities whose signature is a
//! superset of the system's required signature. The list is maintained
//! incrementally from signature-change notifications sent by the entity
//! manager, so dispatch never scans the entity population.

use engine_component::{Components, Entity, Signature, SparseSet};
use engine_system::{RenderContext, System, SystemKind};
use tracing::{debug, info, warn};

use crate::error::EngineError;

/// A registered system together with its matched entities.
pub struct SystemEntry {
    system: Box<dyn System>,
    /// Cached from the system at registration.
    required: Signature,
    /// Matched entities; the payload is unused, only membership matters.
    matched: SparseSet<()>,
}

impl SystemEntry {
    /// The system's kind.
    #[must_use]
    pub fn kind(&self) -> SystemKind {
        self.system.kind()
    }

    /// The system's required signature.
    #[must_use]
    pub fn required(&self) -> Signature {
        self.required
    }

    /// Entities currently matching the required signature.
    #[must_use]
    pub fn matched(&self) -> &[Entity] {
        self.matched.entities()
    }

    /// Returns `true` if `entity` is in the matched list.
    #[must_use]
    pub fn is_matched(&self, entity: Entity) -> bool {
        self.matched.contains(entity)
    }

    /// The system itself.
    #[must_use]
    pub fn system(&self) -> &dyn System {
        self.system.as_ref()
    }

    fn reconcile(&mut self, entity: Entity, signature: Signature) {
        if signature.matches(self.required) {
            if !self.matched.contains(entity) {
                self.matched.insert(entity, ());
                debug!(%entity, system = %self.kind(), "entity joined system");
            }
        } else if self.matched.remove(entity).is_some() {
            debug!(%entity, system = %self.kind(), "entity left system");
        }
    }
}

impl std::fmt::Debug for SystemEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemEntry")
            .field("kind", &self.kind())
            .field("required", &self.required)
            .field("matched", &self.matched.len())
            .finish()
    }
}

/// Registry of all systems, in registration order.
#[derive(Debug, Default)]
pub struct SystemRegistry {
    entries: Vec<SystemEntry>,
}

impl SystemRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a system and match it against the given live population.
    ///
    /// If a system of the same kind is already registered it is replaced in
    /// place, keeping its position in the dispatch order.
    pub fn register<I>(&mut self, system: Box<dyn System>, population: I)
    where
        I: IntoIterator<Item = (Entity, Signature)>,
    {
        let kind = system.kind();
        let mut entry = SystemEntry {
            required: system.required(),
            system,
            matched: SparseSet::new(),
        };
        for (entity, signature) in population {
            entry.reconcile(entity, signature);
        }

        info!(
            system = %kind,
            required = %entry.required,
            matched = entry.matched.len(),
            "registered system"
        );

        match self.entries.iter().position(|e| e.kind() == kind) {
            Some(pos) => self.entries[pos] = entry,
            None => self.entries.push(entry),
        }
    }

    /// Unregister a system, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SystemNotFound`] if the kind is not registered.
    pub fn unregister(&mut self, kind: SystemKind) -> Result<Box<dyn System>, EngineError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.kind() == kind)
            .ok_or(EngineError::SystemNotFound(kind))?;
        info!(system = %kind, "unregistered system");
        Ok(self.entries.remove(pos).system)
    }

    /// Returns `true` if a system of this kind is registered.
    #[must_use]
    pub fn contains(&self, kind: SystemKind) -> bool {
        self.entries.iter().any(|e| e.kind() == kind)
    }

    /// The entry for a system kind.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SystemNotFound`] if the kind is not registered.
    pub fn get(&self, kind: SystemKind) -> Result<&SystemEntry, EngineError> {
        self.entries
            .iter()
            .find(|e| e.kind() == kind)
            .ok_or(EngineError::SystemNotFound(kind))
    }

    /// Returns an iterator over all entries in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &SystemEntry> {
        self.entries.iter()
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no systems are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-evaluate `entity` against every system after its signature changed.
    pub fn signature_changed(&mut self, entity: Entity, signature: Signature) {
        for entry in &mut self.entries {
            entry.reconcile(entity, signature);
        }
    }

    /// Drop `entity` from every matched list.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for entry in &mut self.entries {
            entry.matched.remove(entity);
        }
    }

    /// Run every system's update over its matched entities, in registration
    /// order. A failing system is logged and skipped.
    ///
    /// Returns the number of systems whose pass failed.
    pub fn update(&mut self, components: &mut Components, dt: f64) -> usize {
        let mut failed = 0;
        for entry in &mut self.entries {
            if let Err(err) = entry.system.update(entry.matched.entities(), components, dt) {
                warn!(system = %entry.system.kind(), error = %err, "system update failed");
                failed += 1;
            }
        }
        failed
    }

    /// Run every rendering system over its matched entities, in registration
    /// order. A failing system is logged and the remaining systems still run.
    ///
    /// Returns the number of systems whose pass failed.
    pub fn render(&self, components: &Components, ctx: &mut RenderContext<'_>) -> usize {
        let mut failed = 0;
        for entry in self.entries.iter().filter(|e| e.system.renders()) {
            if let Err(err) = entry.system.render(entry.matched.entities(), components, ctx) {
                warn!(system = %entry.kind(), error = %err, "system render failed");
                failed += 1;
            }
        }
        failed
    }
}
