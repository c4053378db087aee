//! Data models for declaration dumps.
//!
//! These types describe the public declaration surface of one or more units
//! (modules, targets) as handed over by a syntax-tree producer. Each variant
//! struct carries the fields that make up a declaration's own signature;
//! container declarations additionally carry their members.
//!
//! A dump is plain JSON:
//!
//! ```json
//! {
//!   "units": [
//!     {
//!       "name": "MyLib",
//!       "declarations": [
//!         { "kind": "struct", "name": "Point", "modifiers": ["public"],
//!           "members": [
//!             { "kind": "variable", "binding": "let", "name": "x",
//!               "type_annotation": "Swift.Int", "modifiers": ["public"] }
//!           ] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// A function, initializer or enum case parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterDef {
    /// External label; empty for unlabeled enum associated values.
    pub first_name: String,
    /// Internal name when it differs from the label.
    pub second_name: Option<String>,
    pub type_annotation: String,
    pub default_value: Option<String>,
    pub variadic: bool,
}

impl ParameterDef {
    pub fn new(first_name: &str, type_annotation: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            type_annotation: type_annotation.to_string(),
            ..Default::default()
        }
    }

    /// Label used in label signatures such as `f(_:with:)`.
    pub fn label(&self) -> &str {
        if self.first_name.is_empty() {
            "_"
        } else {
            &self.first_name
        }
    }

    /// Render as `first second: Type... = default`.
    pub fn description(&self) -> String {
        let mut s = String::new();
        if !self.first_name.is_empty() {
            s.push_str(&self.first_name);
            if let Some(ref second) = self.second_name {
                s.push(' ');
                s.push_str(second);
            }
            s.push_str(": ");
        }
        s.push_str(&self.type_annotation);
        if self.variadic {
            s.push_str("...");
        }
        if let Some(ref d) = self.default_value {
            s.push_str(" = ");
            s.push_str(d);
        }
        s
    }
}

/// A class, struct or enum.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDef {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub name: String,
    /// Generic parameter clause including brackets, e.g. `<T: Equatable>`.
    pub generic_parameters: Option<String>,
    pub inheritance: Vec<String>,
    /// Where clause without the `where` keyword.
    pub generic_where_clause: Option<String>,
}

impl TypeDef {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            modifiers: vec!["public".to_string()],
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolDef {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub name: String,
    /// Primary associated types including brackets, e.g. `<Element>`.
    pub primary_associated_types: Option<String>,
    pub inheritance: Vec<String>,
    pub generic_where_clause: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionDef {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub extended_type: String,
    pub inheritance: Vec<String>,
    pub generic_where_clause: Option<String>,
}

impl ExtensionDef {
    pub fn of(extended_type: &str) -> Self {
        Self {
            extended_type: extended_type.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionDef {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub name: String,
    pub generic_parameters: Option<String>,
    pub parameters: Vec<ParameterDef>,
    /// Effect specifiers such as `async`, `throws`, `rethrows`.
    pub effects: Vec<String>,
    pub return_type: Option<String>,
    pub generic_where_clause: Option<String>,
}

impl FunctionDef {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            modifiers: vec!["public".to_string()],
            ..Default::default()
        }
    }

    pub fn returning(mut self, return_type: &str) -> Self {
        self.return_type = Some(return_type.to_string());
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDef) -> Self {
        self.parameters.push(parameter);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitializerDef {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    /// `?` or `!` for failable initializers.
    pub optional_mark: Option<String>,
    pub generic_parameters: Option<String>,
    pub parameters: Vec<ParameterDef>,
    pub effects: Vec<String>,
    pub generic_where_clause: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableDef {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    /// `let` or `var`.
    pub binding: String,
    pub name: String,
    pub type_annotation: Option<String>,
    pub initializer: Option<String>,
    /// Accessor block, e.g. `{ get set }`.
    pub accessors: Option<String>,
}

impl Default for VariableDef {
    fn default() -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            binding: "var".to_string(),
            name: String::new(),
            type_annotation: None,
            initializer: None,
            accessors: None,
        }
    }
}

impl VariableDef {
    pub fn named(binding: &str, name: &str, type_annotation: &str) -> Self {
        Self {
            modifiers: vec!["public".to_string()],
            binding: binding.to_string(),
            name: name.to_string(),
            type_annotation: Some(type_annotation.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeAliasDef {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub name: String,
    pub generic_parameters: Option<String>,
    /// The aliased type.
    pub initializer: String,
    pub generic_where_clause: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociatedTypeDef {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub name: String,
    pub inheritance: Vec<String>,
    /// Default type.
    pub initializer: Option<String>,
    pub generic_where_clause: Option<String>,
}

/// An operator declaration. The fixity (`infix`, `prefix`, `postfix`) is a modifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorDef {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub name: String,
    pub precedence_group: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumCaseDef {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub name: String,
    pub associated_values: Option<Vec<ParameterDef>>,
    pub raw_value: Option<String>,
}

/// A container declaration together with its members.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDef<T> {
    #[serde(flatten)]
    pub declaration: T,
    #[serde(default)]
    pub members: Vec<DeclarationDef>,
}

/// One declaration as it appears in a dump.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationDef {
    Class(ContainerDef<TypeDef>),
    Struct(ContainerDef<TypeDef>),
    Enum(ContainerDef<TypeDef>),
    Protocol(ContainerDef<ProtocolDef>),
    Extension(ContainerDef<ExtensionDef>),
    Function(FunctionDef),
    Initializer(InitializerDef),
    Variable(VariableDef),
    TypeAlias(TypeAliasDef),
    AssociatedType(AssociatedTypeDef),
    Operator(OperatorDef),
    EnumCase(EnumCaseDef),
}

/// One comparable unit (module, target) of a dump.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDef {
    pub name: String,
    #[serde(default)]
    pub declarations: Vec<DeclarationDef>,
}

/// A complete declaration dump, one entry per unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDump {
    #[serde(default)]
    pub units: Vec<UnitDef>,
}

impl InterfaceDump {
    /// Look up a unit by name.
    pub fn unit(&self, name: &str) -> Option<&UnitDef> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name.as_str()).collect()
    }
}
