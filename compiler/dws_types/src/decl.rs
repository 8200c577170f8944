//! Declaration shapes consumed from the parser.
//!
//! These are the minimal facts about a routine that overload handling needs.
//! Bodies and expressions stay with the parser and evaluator.

use dws_ir::Position;
use smallvec::SmallVec;

use crate::TypeId;

/// How an argument is passed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParamMode {
    /// Passed by value.
    #[default]
    Value,
    /// `var` parameter: passed by reference, must be an lvalue.
    Var,
    /// `const` parameter: passed by reference, read-only.
    Const,
    /// `lazy` parameter: evaluated on each access.
    Lazy,
}

/// A declared parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeId,
    pub mode: ParamMode,
    /// Whether the parameter declares a default value.
    pub has_default: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Param {
            name: name.into(),
            ty,
            mode: ParamMode::Value,
            has_default: false,
        }
    }

    #[must_use]
    pub fn by_ref(mut self) -> Self {
        self.mode = ParamMode::Var;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ParamMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// A function or procedure declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: SmallVec<[Param; 4]>,
    /// Result type; `None` for procedures.
    pub ret: Option<TypeId>,
    /// Declared with the `overload` directive.
    pub is_overload: bool,
    /// Declared with the `forward` directive (body follows later).
    pub is_forward: bool,
    pub position: Position,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionDecl {
            name: name.into(),
            params: SmallVec::new(),
            ret: None,
            is_overload: false,
            is_forward: false,
            position: Position::BUILTIN,
        }
    }

    #[must_use]
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: TypeId) -> Self {
        self.ret = Some(ty);
        self
    }

    #[must_use]
    pub fn overload(mut self) -> Self {
        self.is_overload = true;
        self
    }

    #[must_use]
    pub fn forward(mut self) -> Self {
        self.is_forward = true;
        self
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Fewest arguments a call may pass: trailing defaulted parameters may
    /// be omitted.
    pub fn min_arity(&self) -> usize {
        self.params.len()
            - self
                .params
                .iter()
                .rev()
                .take_while(|p| p.has_default)
                .count()
    }

    /// Check if a call with `argc` arguments fits this declaration's arity.
    pub fn accepts_arity(&self, argc: usize) -> bool {
        (self.min_arity()..=self.arity()).contains(&argc)
    }

    pub fn param_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.params.iter().map(|p| p.ty)
    }
}
