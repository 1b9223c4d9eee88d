//! Registry entry types.
//!
//! These are the records the external type system supplies: classes with
//! their base lists and user-defined-conversion members, unscoped enums with
//! their underlying type, builtin arithmetic types, and function signatures.
//! The conversion engine consumes them; it never builds or validates them.

use crate::{BasicKind, DataType, TypeHash};

/// A registered type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeEntry {
    Basic(BasicEntry),
    Class(ClassEntry),
    Enum(EnumEntry),
}

impl TypeEntry {
    pub fn type_hash(&self) -> TypeHash {
        match self {
            TypeEntry::Basic(e) => e.type_hash,
            TypeEntry::Class(e) => e.type_hash,
            TypeEntry::Enum(e) => e.type_hash,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Basic(e) => &e.name,
            TypeEntry::Class(e) => &e.name,
            TypeEntry::Enum(e) => &e.name,
        }
    }

    pub fn as_class(&self) -> Option<&ClassEntry> {
        match self {
            TypeEntry::Class(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumEntry> {
        match self {
            TypeEntry::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_basic(&self) -> Option<&BasicEntry> {
        match self {
            TypeEntry::Basic(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BasicEntry> for TypeEntry {
    fn from(e: BasicEntry) -> Self {
        TypeEntry::Basic(e)
    }
}

impl From<ClassEntry> for TypeEntry {
    fn from(e: ClassEntry) -> Self {
        TypeEntry::Class(e)
    }
}

impl From<EnumEntry> for TypeEntry {
    fn from(e: EnumEntry) -> Self {
        TypeEntry::Enum(e)
    }
}

/// Registry entry for a builtin fundamental type.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicEntry {
    /// Spelled name (`"unsigned long"`, not a token).
    pub name: String,
    pub type_hash: TypeHash,
    /// The arithmetic kind; `None` for `void` and `std::nullptr_t`.
    pub kind: Option<BasicKind>,
}

impl BasicEntry {
    pub fn new(name: impl Into<String>, type_hash: TypeHash, kind: Option<BasicKind>) -> Self {
        Self {
            name: name.into(),
            type_hash,
            kind,
        }
    }
}

/// Registry entry for a class type.
///
/// Only the members that matter to conversion ranking are recorded: the
/// direct base classes, the converting constructors, and the conversion
/// operators. Function hashes refer into the registry's function storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntry {
    /// Qualified name.
    pub name: String,
    /// Type hash for identity (computed from the qualified name).
    pub type_hash: TypeHash,
    /// Direct base classes, in declaration order.
    pub bases: Vec<TypeHash>,
    /// Constructor function hashes.
    pub constructors: Vec<TypeHash>,
    /// Conversion operator function hashes.
    pub conversion_operators: Vec<TypeHash>,
}

impl ClassEntry {
    /// Create a class entry; the hash is derived from the qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            bases: Vec::new(),
            constructors: Vec::new(),
            conversion_operators: Vec::new(),
        }
    }

    /// Add a direct base class.
    pub fn with_base(mut self, base: TypeHash) -> Self {
        self.bases.push(base);
        self
    }

    /// Add a constructor.
    pub fn with_constructor(mut self, ctor: TypeHash) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Add a conversion operator.
    pub fn with_conversion_operator(mut self, op: TypeHash) -> Self {
        self.conversion_operators.push(op);
        self
    }
}

/// Registry entry for an unscoped enum.
///
/// Scoped enums do not convert implicitly and never reach the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntry {
    pub name: String,
    pub type_hash: TypeHash,
    /// Hash of the underlying arithmetic type.
    pub underlying: TypeHash,
}

impl EnumEntry {
    pub fn new(name: impl Into<String>, underlying: TypeHash) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            underlying,
        }
    }
}

/// What kind of function an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Free,
    Method,
    Constructor,
    ConversionOperator,
}

/// One function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub data_type: DataType,
    pub has_default: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            has_default: false,
        }
    }

    /// A parameter with a default argument.
    pub fn with_default(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            has_default: true,
        }
    }
}

/// A function signature.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Identity hash.
    pub func_hash: TypeHash,
    /// Unqualified name (class name for constructors, `"operator"` for
    /// conversion operators).
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: DataType,
    /// Trailing C-style ellipsis (`...`).
    pub is_variadic: bool,
    /// Member cv-qualification (`void f() const`).
    pub is_const: bool,
    /// Owning class for members.
    pub owner: Option<TypeHash>,
}

impl FunctionDef {
    /// A free function.
    pub fn free(name: impl Into<String>, params: Vec<Param>, return_type: DataType) -> Self {
        let name = name.into();
        let param_hashes: Vec<_> = params.iter().map(|p| p.data_type.type_hash).collect();
        let func_hash = TypeHash::from_function(&name, &param_hashes);
        Self {
            func_hash,
            name,
            params,
            return_type,
            is_variadic: false,
            is_const: false,
            owner: None,
        }
    }

    /// A non-static member function.
    pub fn method(
        owner: TypeHash,
        name: impl Into<String>,
        params: Vec<Param>,
        return_type: DataType,
        is_const: bool,
    ) -> Self {
        let name = name.into();
        let param_hashes: Vec<_> = params.iter().map(|p| p.data_type.type_hash).collect();
        let func_hash = TypeHash::from_method(owner, &name, &param_hashes, is_const);
        Self {
            func_hash,
            name,
            params,
            return_type,
            is_variadic: false,
            is_const,
            owner: Some(owner),
        }
    }

    /// A constructor of `owner`.
    pub fn constructor(owner: TypeHash, owner_name: impl Into<String>, params: Vec<Param>) -> Self {
        let param_hashes: Vec<_> = params.iter().map(|p| p.data_type.type_hash).collect();
        let func_hash = TypeHash::from_constructor(owner, &param_hashes);
        Self {
            func_hash,
            name: owner_name.into(),
            params,
            return_type: DataType::simple(owner),
            is_variadic: false,
            is_const: false,
            owner: Some(owner),
        }
    }

    /// A conversion operator of `owner` yielding `result`.
    pub fn conversion_operator(owner: TypeHash, result: DataType, is_const: bool) -> Self {
        let func_hash = TypeHash::from_operator(owner, result.type_hash, is_const);
        Self {
            func_hash,
            name: "operator".to_string(),
            params: Vec::new(),
            return_type: result,
            is_variadic: false,
            is_const,
            owner: Some(owner),
        }
    }

    /// A copy marked variadic (trailing `...`).
    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    /// Number of parameters without default arguments.
    pub fn required_params(&self) -> usize {
        self.params.iter().filter(|p| !p.has_default).count()
    }
}

/// Registry entry for a function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntry {
    pub def: FunctionDef,
    pub kind: FunctionKind,
}

impl FunctionEntry {
    pub fn free(def: FunctionDef) -> Self {
        Self {
            def,
            kind: FunctionKind::Free,
        }
    }

    pub fn method(def: FunctionDef) -> Self {
        Self {
            def,
            kind: FunctionKind::Method,
        }
    }

    pub fn constructor(def: FunctionDef) -> Self {
        Self {
            def,
            kind: FunctionKind::Constructor,
        }
    }

    pub fn conversion_operator(def: FunctionDef) -> Self {
        Self {
            def,
            kind: FunctionKind::ConversionOperator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;

    #[test]
    fn class_entry_builder() {
        let base = TypeHash::from_name("Shape");
        let ctor = TypeHash::from_constructor(TypeHash::from_name("Circle"), &[builtins::DOUBLE]);
        let entry = ClassEntry::new("Circle").with_base(base).with_constructor(ctor);

        assert_eq!(entry.type_hash, TypeHash::from_name("Circle"));
        assert_eq!(entry.bases, vec![base]);
        assert_eq!(entry.constructors, vec![ctor]);
        assert!(entry.conversion_operators.is_empty());
    }

    #[test]
    fn type_entry_accessors() {
        let entry: TypeEntry = ClassEntry::new("Widget").into();
        assert!(entry.as_class().is_some());
        assert!(entry.as_enum().is_none());
        assert_eq!(entry.name(), "Widget");

        let e: TypeEntry = EnumEntry::new("Color", builtins::INT).into();
        assert!(e.as_enum().is_some());
        assert_eq!(e.as_enum().map(|e| e.underlying), Some(builtins::INT));
    }

    #[test]
    fn function_def_required_params() {
        let int_ty = DataType::simple(builtins::INT);
        let def = FunctionDef::free(
            "f",
            vec![Param::new("a", int_ty), Param::with_default("b", int_ty)],
            DataType::simple(builtins::VOID),
        );
        assert_eq!(def.required_params(), 1);
        assert_eq!(def.params.len(), 2);
        assert!(!def.is_variadic);
        assert!(def.variadic().is_variadic);
    }

    #[test]
    fn constructor_returns_owner_type() {
        let owner = TypeHash::from_name("Widget");
        let def = FunctionDef::constructor(owner, "Widget", vec![]);
        assert_eq!(def.return_type.type_hash, owner);
        assert_eq!(def.owner, Some(owner));
    }

    #[test]
    fn conversion_operator_identity() {
        let owner = TypeHash::from_name("Rational");
        let d1 = FunctionDef::conversion_operator(owner, DataType::simple(builtins::INT), true);
        let d2 = FunctionDef::conversion_operator(owner, DataType::simple(builtins::DOUBLE), true);
        assert_ne!(d1.func_hash, d2.func_hash);
        assert!(d1.params.is_empty());
    }
}
