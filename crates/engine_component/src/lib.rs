//! # engine_component
//!
//! The "E" and "C" in ECS: entity identity and component storage.
//!
//! This crate provides:
//!
//! - [`Entity`]: generational `(index, generation)` entity handles.
//! - [`EntityAllocator`]: index allocator with FIFO recycling.
//! - [`ComponentKind`] / [`Component`]: the closed set of component kinds and
//!   the trait binding each Rust type to its kind.
//! - [`Signature`]: bitset over component kinds.
//! - [`SparseSet`]: dense-array-plus-sparse-index storage for one kind.
//! - [`Components`]: the arena holding one [`SparseSet`] per kind.

pub mod builtin;
pub mod component;
pub mod entity;
pub mod error;
pub mod signature;
pub mod storage;

pub use builtin::{RigidBody, Sprite, Transform};
pub use component::{Component, ComponentKind, Components};
pub use entity::{Entity, EntityAllocator};
pub use error::EcsError;
pub use signature::Signature;
pub use storage::SparseSet;
