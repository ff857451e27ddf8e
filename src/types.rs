//! The type system: kinds, composition, and stringification.
//!
//! Types are immutable and hash-consed through a [`TypePool`], so structural
//! equality is a [`TypeId`] comparison. The base kinds are interned at fixed
//! ids when the pool is built; compound kinds dedup on construction.

use std::collections::HashMap;

/// Handle to an interned type. Two ids are equal iff the types are
/// structurally equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TypeId(u32);

impl TypeId {
    /// Sentinel for ill-typed nodes and failed runtime operations.
    pub const INVALID: TypeId = TypeId(0);
    pub const UNIT: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    pub const FLOAT: TypeId = TypeId(3);
    pub const BOOL: TypeId = TypeId(4);
    pub const STR: TypeId = TypeId(5);
    pub const FILE: TypeId = TypeId(6);

    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Type {
    Invalid,
    Unit,
    Int,
    Float,
    Bool,
    Str,
    File,
    /// Curried: multi-argument functions are `Fn(a, Fn(b, r))`.
    Fn { param: TypeId, result: TypeId },
    List(TypeId),
    Tuple(Vec<TypeId>),
}

pub struct TypePool {
    map: HashMap<Type, TypeId>,
    types: Vec<Type>,
}

impl TypePool {
    pub fn new() -> Self {
        let mut pool = TypePool {
            map: HashMap::new(),
            types: Vec::new(),
        };
        // Order fixes the TypeId constants above.
        for base in [
            Type::Invalid,
            Type::Unit,
            Type::Int,
            Type::Float,
            Type::Bool,
            Type::Str,
            Type::File,
        ] {
            pool.intern(base);
        }
        pool
    }

    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.map.get(&ty) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty.clone());
        self.map.insert(ty, id);
        id
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.0 as usize]
    }

    pub fn fn_type(&mut self, param: TypeId, result: TypeId) -> TypeId {
        self.intern(Type::Fn { param, result })
    }

    pub fn list_type(&mut self, element: TypeId) -> TypeId {
        self.intern(Type::List(element))
    }

    pub fn tuple_type(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.intern(Type::Tuple(elements))
    }

    pub fn is_list(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::List(_))
    }

    pub fn is_fn(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Fn { .. })
    }

    pub fn is_tuple(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Tuple(_))
    }

    pub fn is_file(&self, id: TypeId) -> bool {
        id == TypeId::FILE
    }

    pub fn is_str(&self, id: TypeId) -> bool {
        id == TypeId::STR
    }

    pub fn list_element(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            Type::List(element) => Some(*element),
            _ => None,
        }
    }

    pub fn tuple_fields(&self, id: TypeId) -> Option<&[TypeId]> {
        match self.get(id) {
            Type::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn fn_param(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            Type::Fn { param, .. } => Some(*param),
            _ => None,
        }
    }

    pub fn fn_result(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            Type::Fn { result, .. } => Some(*result),
            _ => None,
        }
    }

    /// True iff `id` is `() -> a`. Drives automatic application of nullary
    /// functions at the top level of display.
    pub fn unit_applies_to_fn(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Fn { param, .. } if *param == TypeId::UNIT)
    }

    /// True when the type is Invalid or any component of it is. The
    /// analyzer refuses to build further structure on such types.
    pub fn contains_invalid(&self, id: TypeId) -> bool {
        match self.get(id) {
            Type::Invalid => true,
            Type::Unit | Type::Int | Type::Float | Type::Bool | Type::Str | Type::File => false,
            Type::Fn { param, result } => {
                self.contains_invalid(*param) || self.contains_invalid(*result)
            }
            Type::List(element) => self.contains_invalid(*element),
            Type::Tuple(fields) => fields.iter().any(|f| self.contains_invalid(*f)),
        }
    }

    /// Human-readable rendering: `(a, b)` for tuples, `[e]` for lists, and
    /// right-associative `a -> b -> r` for functions. A function appearing
    /// in parameter position gets parentheses.
    pub fn name(&self, id: TypeId) -> String {
        match self.get(id) {
            Type::Invalid => "Invalid".to_string(),
            Type::Unit => "()".to_string(),
            Type::Int => "Int".to_string(),
            Type::Float => "Float".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::Str => "Str".to_string(),
            Type::File => "File".to_string(),
            Type::Fn { param, result } => {
                let param_str = if self.is_fn(*param) {
                    format!("({})", self.name(*param))
                } else {
                    self.name(*param)
                };
                format!("{} -> {}", param_str, self.name(*result))
            }
            Type::List(element) => format!("[{}]", self.name(*element)),
            Type::Tuple(fields) => {
                let inner: Vec<String> = fields.iter().map(|f| self.name(*f)).collect();
                format!("({})", inner.join(", "))
            }
        }
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}
