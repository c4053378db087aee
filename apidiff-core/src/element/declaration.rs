//! Declaration variants and their single-line rendering.

use serde::{Deserialize, Serialize};

use crate::types::{
    AssociatedTypeDef, EnumCaseDef, ExtensionDef, FunctionDef, InitializerDef, OperatorDef,
    ParameterDef, ProtocolDef, TypeAliasDef, TypeDef, VariableDef,
};

/// Kind of declaration, without its fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Root,
    Class,
    Struct,
    Enum,
    Protocol,
    Extension,
    Function,
    Initializer,
    Variable,
    TypeAlias,
    AssociatedType,
    Operator,
    EnumCase,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Root => "module",
            DeclarationKind::Class => "class",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Protocol => "protocol",
            DeclarationKind::Extension => "extension",
            DeclarationKind::Function => "function",
            DeclarationKind::Initializer => "initializer",
            DeclarationKind::Variable => "variable",
            DeclarationKind::TypeAlias => "typealias",
            DeclarationKind::AssociatedType => "associatedtype",
            DeclarationKind::Operator => "operator",
            DeclarationKind::EnumCase => "case",
        }
    }
}

/// One declaration's own fields, excluding its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    Root { name: String },
    Class(TypeDef),
    Struct(TypeDef),
    Enum(TypeDef),
    Protocol(ProtocolDef),
    Extension(ExtensionDef),
    Function(FunctionDef),
    Initializer(InitializerDef),
    Variable(VariableDef),
    TypeAlias(TypeAliasDef),
    AssociatedType(AssociatedTypeDef),
    Operator(OperatorDef),
    EnumCase(EnumCaseDef),
}

impl Declaration {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Root { .. } => DeclarationKind::Root,
            Declaration::Class(_) => DeclarationKind::Class,
            Declaration::Struct(_) => DeclarationKind::Struct,
            Declaration::Enum(_) => DeclarationKind::Enum,
            Declaration::Protocol(_) => DeclarationKind::Protocol,
            Declaration::Extension(_) => DeclarationKind::Extension,
            Declaration::Function(_) => DeclarationKind::Function,
            Declaration::Initializer(_) => DeclarationKind::Initializer,
            Declaration::Variable(_) => DeclarationKind::Variable,
            Declaration::TypeAlias(_) => DeclarationKind::TypeAlias,
            Declaration::AssociatedType(_) => DeclarationKind::AssociatedType,
            Declaration::Operator(_) => DeclarationKind::Operator,
            Declaration::EnumCase(_) => DeclarationKind::EnumCase,
        }
    }

    /// Render the declaration's own signature on a single line.
    pub fn description(&self) -> String {
        match self {
            Declaration::Root { name } => format!("module {}", name),
            Declaration::Class(t) => render_type("class", t),
            Declaration::Struct(t) => render_type("struct", t),
            Declaration::Enum(t) => render_type("enum", t),
            Declaration::Protocol(p) => {
                let mut line = Line::new(&p.attributes, &p.modifiers);
                line.word("protocol");
                line.word(&p.name);
                line.raw_opt(p.primary_associated_types.as_deref());
                line.inheritance(&p.inheritance);
                line.where_clause(p.generic_where_clause.as_deref());
                line.finish()
            }
            Declaration::Extension(e) => {
                let mut line = Line::new(&e.attributes, &e.modifiers);
                line.word("extension");
                line.word(&e.extended_type);
                line.inheritance(&e.inheritance);
                line.where_clause(e.generic_where_clause.as_deref());
                line.finish()
            }
            Declaration::Function(f) => {
                let mut line = Line::new(&f.attributes, &f.modifiers);
                line.word("func");
                line.word(&f.name);
                line.raw_opt(f.generic_parameters.as_deref());
                line.parameters(&f.parameters);
                line.words(&f.effects);
                if let Some(ref ret) = f.return_type {
                    line.word("->");
                    line.word(ret);
                }
                line.where_clause(f.generic_where_clause.as_deref());
                line.finish()
            }
            Declaration::Initializer(i) => {
                let mut line = Line::new(&i.attributes, &i.modifiers);
                line.word("init");
                line.raw_opt(i.optional_mark.as_deref());
                line.raw_opt(i.generic_parameters.as_deref());
                line.parameters(&i.parameters);
                line.words(&i.effects);
                line.where_clause(i.generic_where_clause.as_deref());
                line.finish()
            }
            Declaration::Variable(v) => {
                let mut line = Line::new(&v.attributes, &v.modifiers);
                line.word(&v.binding);
                line.word(&v.name);
                if let Some(ref ty) = v.type_annotation {
                    line.raw(": ");
                    line.raw(ty);
                }
                if let Some(ref init) = v.initializer {
                    line.word("=");
                    line.word(init);
                }
                line.word_opt(v.accessors.as_deref());
                line.finish()
            }
            Declaration::TypeAlias(t) => {
                let mut line = Line::new(&t.attributes, &t.modifiers);
                line.word("typealias");
                line.word(&t.name);
                line.raw_opt(t.generic_parameters.as_deref());
                line.word("=");
                line.word(&t.initializer);
                line.where_clause(t.generic_where_clause.as_deref());
                line.finish()
            }
            Declaration::AssociatedType(a) => {
                let mut line = Line::new(&a.attributes, &a.modifiers);
                line.word("associatedtype");
                line.word(&a.name);
                line.inheritance(&a.inheritance);
                if let Some(ref init) = a.initializer {
                    line.word("=");
                    line.word(init);
                }
                line.where_clause(a.generic_where_clause.as_deref());
                line.finish()
            }
            Declaration::Operator(o) => {
                let mut line = Line::new(&o.attributes, &o.modifiers);
                line.word("operator");
                line.word(&o.name);
                if let Some(ref group) = o.precedence_group {
                    line.word(":");
                    line.word(group);
                }
                line.finish()
            }
            Declaration::EnumCase(c) => {
                let mut line = Line::new(&c.attributes, &c.modifiers);
                line.word("case");
                line.word(&c.name);
                if let Some(ref values) = c.associated_values {
                    line.parameters(values);
                }
                if let Some(ref raw) = c.raw_value {
                    line.word("=");
                    line.word(raw);
                }
                line.finish()
            }
        }
    }

    /// Identity fragment used to build dotted parent paths.
    pub fn path_component_name(&self) -> &str {
        match self {
            Declaration::Root { name } => name,
            Declaration::Class(t) | Declaration::Struct(t) | Declaration::Enum(t) => &t.name,
            Declaration::Protocol(p) => &p.name,
            Declaration::Extension(e) => &e.extended_type,
            Declaration::Function(f) => &f.name,
            Declaration::Initializer(_) => "init",
            Declaration::Variable(v) => &v.name,
            Declaration::TypeAlias(t) => &t.name,
            Declaration::AssociatedType(a) => &a.name,
            Declaration::Operator(o) => &o.name,
            Declaration::EnumCase(c) => &c.name,
        }
    }

    /// Loosened identity key used for fallback matching.
    ///
    /// Functions and initializers are keyed by name plus parameter labels
    /// (`fetch(id:completion:)`), so a change to parameter types, effects or
    /// the return type still pairs the two versions. Every other variant is
    /// keyed by its path component.
    pub fn diffable_signature(&self) -> String {
        match self {
            Declaration::Function(f) => label_signature(&f.name, &f.parameters),
            Declaration::Initializer(i) => label_signature("init", &i.parameters),
            other => other.path_component_name().to_string(),
        }
    }

    /// Key used to pair an addition with a removal during consolidation.
    pub fn consolidatable_name(&self) -> String {
        match self {
            Declaration::Extension(e) => format!("extension {}", e.extended_type),
            other => other.path_component_name().to_string(),
        }
    }

    /// Whether `other` denotes the same declaration in another version.
    pub fn is_diffable_with(&self, other: &Declaration) -> bool {
        self.kind() == other.kind() && self.diffable_signature() == other.diffable_signature()
    }
}

fn render_type(keyword: &str, t: &TypeDef) -> String {
    let mut line = Line::new(&t.attributes, &t.modifiers);
    line.word(keyword);
    line.word(&t.name);
    line.raw_opt(t.generic_parameters.as_deref());
    line.inheritance(&t.inheritance);
    line.where_clause(t.generic_where_clause.as_deref());
    line.finish()
}

fn label_signature(name: &str, parameters: &[ParameterDef]) -> String {
    let labels: String = parameters.iter().map(|p| format!("{}:", p.label())).collect();
    format!("{}({})", name, labels)
}

/// Space-separated line builder.
struct Line {
    out: String,
}

impl Line {
    fn new(attributes: &[String], modifiers: &[String]) -> Self {
        let mut line = Line { out: String::new() };
        line.words(attributes);
        line.words(modifiers);
        line
    }

    fn word(&mut self, w: &str) {
        if w.is_empty() {
            return;
        }
        if !self.out.is_empty() {
            self.out.push(' ');
        }
        self.out.push_str(w);
    }

    fn words(&mut self, ws: &[String]) {
        for w in ws {
            self.word(w);
        }
    }

    fn word_opt(&mut self, w: Option<&str>) {
        if let Some(w) = w {
            self.word(w);
        }
    }

    fn raw(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn raw_opt(&mut self, s: Option<&str>) {
        if let Some(s) = s {
            self.raw(s);
        }
    }

    fn parameters(&mut self, params: &[ParameterDef]) {
        let rendered: Vec<String> = params.iter().map(ParameterDef::description).collect();
        self.out.push('(');
        self.out.push_str(&rendered.join(", "));
        self.out.push(')');
    }

    fn inheritance(&mut self, types: &[String]) {
        if !types.is_empty() {
            self.out.push_str(": ");
            self.out.push_str(&types.join(", "));
        }
    }

    fn where_clause(&mut self, clause: Option<&str>) {
        if let Some(clause) = clause {
            self.word("where");
            self.word(clause);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}
