//! Type and function storage for the cxxsema engine.
//!
//! This crate provides [`TypeRegistry`], the hash-keyed store of type and
//! function entries that the conversion engine queries. It plays the role
//! of the external type system in the engine's contract: it knows what a
//! type *is* (class, enum, builtin), which classes derive from which, and
//! which user-defined conversion members a class declares.

mod registry;

pub use registry::TypeRegistry;
