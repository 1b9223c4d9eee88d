//! TypeRegistry - unified type and function storage.
//!
//! All type entries are stored in a single map keyed by [`TypeHash`], and
//! all functions (free functions, methods, constructors, conversion
//! operators) in a second map. Class entries reference their member
//! functions by hash into the function map.
//!
//! # Thread Safety
//!
//! `TypeRegistry` is not thread-safe by design. The usage pattern is a
//! registration phase (single-threaded population) followed by a read-only
//! query phase during analysis. An analysis pass owns its registry; nothing
//! is shared between concurrent passes.

use rustc_hash::{FxHashMap, FxHashSet};

use cxxsema_core::{
    BasicEntry, BasicKind, FunctionEntry, RegistrationError, TypeEntry, TypeHash, builtins,
};

/// Unified type and function registry.
///
/// # Example
///
/// ```
/// use cxxsema_registry::TypeRegistry;
/// use cxxsema_core::{ClassEntry, builtins};
///
/// let mut registry = TypeRegistry::with_builtins();
/// assert!(registry.get_type(builtins::INT).is_some());
///
/// let shape = ClassEntry::new("Shape");
/// let shape_hash = shape.type_hash;
/// registry.register_type(shape.into()).unwrap();
/// assert!(registry.get_type(shape_hash).is_some());
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Types by hash.
    types: FxHashMap<TypeHash, TypeEntry>,
    /// Functions by hash.
    functions: FxHashMap<TypeHash, FunctionEntry>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the C++ fundamental types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_all_builtins();
        registry
    }

    /// Register every fundamental type. Idempotent only on a fresh registry.
    pub fn register_all_builtins(&mut self) {
        let entries: [(&str, TypeHash, Option<BasicKind>); 17] = [
            ("void", builtins::VOID, None),
            ("bool", builtins::BOOL, Some(BasicKind::Bool)),
            ("char", builtins::CHAR, Some(BasicKind::Char)),
            ("signed char", builtins::SCHAR, Some(BasicKind::SignedChar)),
            ("unsigned char", builtins::UCHAR, Some(BasicKind::UnsignedChar)),
            ("short", builtins::SHORT, Some(BasicKind::Short)),
            ("unsigned short", builtins::USHORT, Some(BasicKind::UnsignedShort)),
            ("int", builtins::INT, Some(BasicKind::Int)),
            ("unsigned int", builtins::UINT, Some(BasicKind::UnsignedInt)),
            ("long", builtins::LONG, Some(BasicKind::Long)),
            ("unsigned long", builtins::ULONG, Some(BasicKind::UnsignedLong)),
            ("long long", builtins::LONG_LONG, Some(BasicKind::LongLong)),
            (
                "unsigned long long",
                builtins::ULONG_LONG,
                Some(BasicKind::UnsignedLongLong),
            ),
            ("float", builtins::FLOAT, Some(BasicKind::Float)),
            ("double", builtins::DOUBLE, Some(BasicKind::Double)),
            ("long double", builtins::LONG_DOUBLE, Some(BasicKind::LongDouble)),
            ("std::nullptr_t", builtins::NULLPTR, None),
        ];
        for (name, hash, kind) in entries {
            self.types
                .insert(hash, BasicEntry::new(name, hash, kind).into());
        }
    }

    /// Register a type entry.
    pub fn register_type(&mut self, entry: TypeEntry) -> Result<TypeHash, RegistrationError> {
        let hash = entry.type_hash();
        if self.types.contains_key(&hash) {
            return Err(RegistrationError::DuplicateType {
                name: entry.name().to_string(),
            });
        }
        self.types.insert(hash, entry);
        Ok(hash)
    }

    /// Register a function entry.
    pub fn register_function(
        &mut self,
        entry: FunctionEntry,
    ) -> Result<TypeHash, RegistrationError> {
        let hash = entry.def.func_hash;
        if self.functions.contains_key(&hash) {
            return Err(RegistrationError::DuplicateFunction {
                name: entry.def.name.clone(),
            });
        }
        self.functions.insert(hash, entry);
        Ok(hash)
    }

    /// Look up a type by hash.
    pub fn get_type(&self, hash: TypeHash) -> Option<&TypeEntry> {
        self.types.get(&hash)
    }

    /// Look up a function by hash.
    pub fn get_function(&self, hash: TypeHash) -> Option<&FunctionEntry> {
        self.functions.get(&hash)
    }

    /// Readable name for a type hash, falling back to the hash itself.
    pub fn type_name(&self, hash: TypeHash) -> String {
        self.get_type(hash)
            .map(|e| e.name().to_string())
            .unwrap_or_else(|| format!("{}", hash))
    }

    /// Base-class distance from `derived` to `base`.
    ///
    /// Breadth-first over the direct-base lists, so with multiple
    /// inheritance the shortest path wins. `Some(0)` when the hashes are
    /// equal, `Some(n)` for n inheritance hops, `None` when unrelated.
    pub fn inheritance_distance(&self, derived: TypeHash, base: TypeHash) -> Option<u16> {
        if derived == base {
            return Some(0);
        }
        let mut visited = FxHashSet::default();
        visited.insert(derived);
        let mut frontier = vec![derived];
        let mut distance: u16 = 0;
        while !frontier.is_empty() {
            distance = distance.checked_add(1)?;
            let mut next = Vec::new();
            for hash in frontier {
                let class = self.get_type(hash).and_then(|t| t.as_class());
                let Some(class) = class else { continue };
                for &parent in &class.bases {
                    if parent == base {
                        return Some(distance);
                    }
                    if visited.insert(parent) {
                        next.push(parent);
                    }
                }
            }
            frontier = next;
        }
        None
    }
}
