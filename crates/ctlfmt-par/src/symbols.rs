//! Parser symbol table for user-defined type names.
//!
//! The grammar cannot tell a declaration `Foo x;` from two identifiers
//! without knowing that `Foo` names a type, and `A::B` is an enum access
//! or a class-static access depending on what `A` is. The parser records
//! every `enum`/`struct`/`class` name here as it parses; the table is read
//! in exactly two places (type parsing and double-colon access) and only
//! membership matters. Classes are registered before their body is parsed
//! so self-references inside methods resolve.

use std::hash::BuildHasherDefault;

use indexmap::IndexSet;
use rustc_hash::FxHasher;

type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// What kind of user type a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserTypeTag {
    Enum,
    Struct,
    Class,
}

impl UserTypeTag {
    /// Tag string used in AST dumps.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserTypeTag::Enum => "enum_type",
            UserTypeTag::Struct => "struct_type",
            UserTypeTag::Class => "class_type",
        }
    }
}

/// Registered user-defined type names, one keyed set per declaration kind.
/// Insertion order is preserved for stable dumps.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    enums: FxIndexSet<String>,
    structs: FxIndexSet<String>,
    classes: FxIndexSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enum name. Returns false if it was already present.
    pub fn register_enum(&mut self, name: impl Into<String>) -> bool {
        self.enums.insert(name.into())
    }

    pub fn register_struct(&mut self, name: impl Into<String>) -> bool {
        self.structs.insert(name.into())
    }

    pub fn register_class(&mut self, name: impl Into<String>) -> bool {
        self.classes.insert(name.into())
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    pub fn is_struct(&self, name: &str) -> bool {
        self.structs.contains(name)
    }

    pub fn is_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    /// Resolves a name to its tag. A name registered in several sets
    /// resolves in registration-priority order: class, then struct, then
    /// enum (the most recent kinds shadow nothing in practice; CTL names
    /// are unique per file).
    pub fn lookup(&self, name: &str) -> Option<UserTypeTag> {
        if self.classes.contains(name) {
            Some(UserTypeTag::Class)
        } else if self.structs.contains(name) {
            Some(UserTypeTag::Struct)
        } else if self.enums.contains(name) {
            Some(UserTypeTag::Enum)
        } else {
            None
        }
    }

    /// True if the name refers to any user-defined type.
    pub fn is_type(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}
