//! Porting convention value objects
//!
//! A `PortingConvention` is pure data describing how a service's porting
//! function is called from the generated notebook. Per-service quirks live
//! here, never in the assembler's control flow.

/// How a parsed initial dataset is bound to a notebook variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionShape {
    /// Bind the parsed structure as a native Python literal (`dict`, `list`, ...)
    Native,
    /// Bind the canonical JSON text of the structure as a Python string
    JsonText,
}

/// One row field injected into the notebook under a variable name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Injection {
    /// Row column holding the JSON text
    pub field: &'static str,
    /// Variable name bound in the notebook
    pub variable: &'static str,
    /// Native structure or JSON text
    pub shape: InjectionShape,
}

impl Injection {
    pub const fn native(field: &'static str, variable: &'static str) -> Self {
        Self {
            field,
            variable,
            shape: InjectionShape::Native,
        }
    }

    pub const fn json_text(field: &'static str, variable: &'static str) -> Self {
        Self {
            field,
            variable,
            shape: InjectionShape::JsonText,
        }
    }
}

/// Calling convention of one service's porting function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortingConvention {
    /// Variables injected before the porting body
    pub injections: &'static [Injection],
    /// Alias lines emitted after the porting body
    pub pre_call: &'static [&'static str],
    /// Import lines the generated block needs (deduplicated per artifact)
    pub aux_imports: &'static [&'static str],
    /// Literal call expression
    pub call: &'static str,
}

impl PortingConvention {
    /// Variable names this convention binds, in injection order
    pub fn variables(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.injections.iter().map(|i| i.variable)
    }

    /// Whether the call expression references every injected or aliased variable
    ///
    /// Used by catalog tests: a call naming a variable that is never bound
    /// would fail at notebook run time.
    pub fn call_is_bound(&self) -> bool {
        let aliases = self
            .pre_call
            .iter()
            .filter_map(|line| line.split_once('=').map(|(lhs, _)| lhs.trim()));
        let bound: Vec<&str> = self.variables().chain(aliases).collect();
        let args = self
            .call
            .split_once('(')
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        args.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|tok| !tok.is_empty())
            .filter(|tok| tok.contains('_'))
            .all(|tok| bound.contains(&tok) || tok == "ensure_ascii")
    }
}
