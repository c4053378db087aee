//! Field-by-field comparison of two versions of one declaration.
//!
//! Each difference is a single human-readable line framed by a stable label,
//! e.g. ``return type changed from `String` to `String?` `` or
//! ``added attribute `@MainActor` ``.

use crate::element::declaration::Declaration;
use crate::types::{ParameterDef, TypeDef};

/// Itemize what changed from `old` to `new`.
///
/// Returns an empty list when the two declarations are of different kinds.
pub fn differences(old: &Declaration, new: &Declaration) -> Vec<String> {
    let mut diff = FieldDiff::default();

    match (old, new) {
        (Declaration::Root { name: a }, Declaration::Root { name: b }) => {
            diff.scalar("module name", a, b);
        }
        (Declaration::Class(a), Declaration::Class(b))
        | (Declaration::Struct(a), Declaration::Struct(b))
        | (Declaration::Enum(a), Declaration::Enum(b)) => type_differences(&mut diff, a, b),
        (Declaration::Protocol(a), Declaration::Protocol(b)) => {
            diff.list("attribute", &a.attributes, &b.attributes);
            diff.list("modifier", &a.modifiers, &b.modifiers);
            diff.optional(
                "primary associated types",
                a.primary_associated_types.as_deref(),
                b.primary_associated_types.as_deref(),
            );
            diff.list("conformance", &a.inheritance, &b.inheritance);
            diff.optional(
                "generic where clause",
                a.generic_where_clause.as_deref(),
                b.generic_where_clause.as_deref(),
            );
        }
        (Declaration::Extension(a), Declaration::Extension(b)) => {
            diff.list("attribute", &a.attributes, &b.attributes);
            diff.list("modifier", &a.modifiers, &b.modifiers);
            diff.list("conformance", &a.inheritance, &b.inheritance);
            diff.optional(
                "generic where clause",
                a.generic_where_clause.as_deref(),
                b.generic_where_clause.as_deref(),
            );
        }
        (Declaration::Function(a), Declaration::Function(b)) => {
            diff.list("attribute", &a.attributes, &b.attributes);
            diff.list("modifier", &a.modifiers, &b.modifiers);
            diff.optional(
                "generic parameter clause",
                a.generic_parameters.as_deref(),
                b.generic_parameters.as_deref(),
            );
            diff.parameters("parameter", &a.parameters, &b.parameters);
            diff.list("effect", &a.effects, &b.effects);
            diff.optional(
                "return type",
                a.return_type.as_deref(),
                b.return_type.as_deref(),
            );
            diff.optional(
                "generic where clause",
                a.generic_where_clause.as_deref(),
                b.generic_where_clause.as_deref(),
            );
        }
        (Declaration::Initializer(a), Declaration::Initializer(b)) => {
            diff.list("attribute", &a.attributes, &b.attributes);
            diff.list("modifier", &a.modifiers, &b.modifiers);
            diff.optional(
                "optionality",
                a.optional_mark.as_deref(),
                b.optional_mark.as_deref(),
            );
            diff.optional(
                "generic parameter clause",
                a.generic_parameters.as_deref(),
                b.generic_parameters.as_deref(),
            );
            diff.parameters("parameter", &a.parameters, &b.parameters);
            diff.list("effect", &a.effects, &b.effects);
            diff.optional(
                "generic where clause",
                a.generic_where_clause.as_deref(),
                b.generic_where_clause.as_deref(),
            );
        }
        (Declaration::Variable(a), Declaration::Variable(b)) => {
            diff.list("attribute", &a.attributes, &b.attributes);
            diff.list("modifier", &a.modifiers, &b.modifiers);
            diff.scalar("binding", &a.binding, &b.binding);
            diff.optional(
                "type",
                a.type_annotation.as_deref(),
                b.type_annotation.as_deref(),
            );
            diff.optional(
                "default value",
                a.initializer.as_deref(),
                b.initializer.as_deref(),
            );
            diff.optional("accessors", a.accessors.as_deref(), b.accessors.as_deref());
        }
        (Declaration::TypeAlias(a), Declaration::TypeAlias(b)) => {
            diff.list("attribute", &a.attributes, &b.attributes);
            diff.list("modifier", &a.modifiers, &b.modifiers);
            diff.optional(
                "generic parameter clause",
                a.generic_parameters.as_deref(),
                b.generic_parameters.as_deref(),
            );
            diff.scalar("assigned type", &a.initializer, &b.initializer);
            diff.optional(
                "generic where clause",
                a.generic_where_clause.as_deref(),
                b.generic_where_clause.as_deref(),
            );
        }
        (Declaration::AssociatedType(a), Declaration::AssociatedType(b)) => {
            diff.list("attribute", &a.attributes, &b.attributes);
            diff.list("modifier", &a.modifiers, &b.modifiers);
            diff.list("conformance", &a.inheritance, &b.inheritance);
            diff.optional(
                "default type",
                a.initializer.as_deref(),
                b.initializer.as_deref(),
            );
            diff.optional(
                "generic where clause",
                a.generic_where_clause.as_deref(),
                b.generic_where_clause.as_deref(),
            );
        }
        (Declaration::Operator(a), Declaration::Operator(b)) => {
            diff.list("attribute", &a.attributes, &b.attributes);
            diff.list("modifier", &a.modifiers, &b.modifiers);
            diff.optional(
                "precedence group",
                a.precedence_group.as_deref(),
                b.precedence_group.as_deref(),
            );
        }
        (Declaration::EnumCase(a), Declaration::EnumCase(b)) => {
            diff.list("attribute", &a.attributes, &b.attributes);
            diff.list("modifier", &a.modifiers, &b.modifiers);
            match (&a.associated_values, &b.associated_values) {
                (Some(old_values), Some(new_values)) => {
                    diff.parameters("associated value", old_values, new_values)
                }
                (None, Some(values)) => diff.push(format!(
                    "added associated values `{}`",
                    render_values(values)
                )),
                (Some(values), None) => diff.push(format!(
                    "removed associated values `{}`",
                    render_values(values)
                )),
                (None, None) => {}
            }
            diff.optional("raw value", a.raw_value.as_deref(), b.raw_value.as_deref());
        }
        _ => {}
    }

    diff.finish()
}

fn type_differences(diff: &mut FieldDiff, a: &TypeDef, b: &TypeDef) {
    diff.list("attribute", &a.attributes, &b.attributes);
    diff.list("modifier", &a.modifiers, &b.modifiers);
    diff.optional(
        "generic parameter clause",
        a.generic_parameters.as_deref(),
        b.generic_parameters.as_deref(),
    );
    diff.list("conformance", &a.inheritance, &b.inheritance);
    diff.optional(
        "generic where clause",
        a.generic_where_clause.as_deref(),
        b.generic_where_clause.as_deref(),
    );
}

fn render_values(values: &[ParameterDef]) -> String {
    let rendered: Vec<String> = values.iter().map(ParameterDef::description).collect();
    format!("({})", rendered.join(", "))
}

#[derive(Default)]
struct FieldDiff {
    out: Vec<String>,
}

impl FieldDiff {
    fn push(&mut self, line: String) {
        self.out.push(line);
    }

    fn list(&mut self, label: &str, old: &[String], new: &[String]) {
        let before = self.out.len();
        for item in old.iter().filter(|item| !new.contains(*item)) {
            self.push(format!("removed {} `{}`", label, item));
        }
        for item in new.iter().filter(|item| !old.contains(*item)) {
            self.push(format!("added {} `{}`", label, item));
        }
        // Same members, different arrangement.
        if self.out.len() == before && old != new {
            self.arrangement(label, &old.join(", "), &new.join(", "), old.len() == new.len());
        }
    }

    fn arrangement(&mut self, label: &str, old: &str, new: &str, same_len: bool) {
        let what = if same_len { "order" } else { "list" };
        self.push(format!("{} {} changed from `{}` to `{}`", label, what, old, new));
    }

    fn scalar(&mut self, label: &str, old: &str, new: &str) {
        if old != new {
            self.push(format!("{} changed from `{}` to `{}`", label, old, new));
        }
    }

    fn optional(&mut self, label: &str, old: Option<&str>, new: Option<&str>) {
        match (old, new) {
            (Some(a), Some(b)) => self.scalar(label, a, b),
            (None, Some(b)) => self.push(format!("added {} `{}`", label, b)),
            (Some(a), None) => self.push(format!("removed {} `{}`", label, a)),
            (None, None) => {}
        }
    }

    /// Parameters are paired by identical rendering first, then by label.
    fn parameters(&mut self, label: &str, old: &[ParameterDef], new: &[ParameterDef]) {
        let before = self.out.len();
        let mut remaining_old: Vec<&ParameterDef> = Vec::new();
        let mut remaining_new: Vec<&ParameterDef> = new.iter().collect();

        for param in old {
            match remaining_new.iter().position(|p| *p == param) {
                Some(pos) => {
                    remaining_new.remove(pos);
                }
                None => remaining_old.push(param),
            }
        }

        for param in remaining_old {
            match remaining_new.iter().position(|p| p.label() == param.label()) {
                Some(pos) => {
                    let other = remaining_new.remove(pos);
                    self.push(format!(
                        "{} `{}` changed from `{}` to `{}`",
                        label,
                        param.label(),
                        param.description(),
                        other.description()
                    ));
                }
                None => self.push(format!("removed {} `{}`", label, param.description())),
            }
        }

        for param in remaining_new {
            self.push(format!("added {} `{}`", label, param.description()));
        }

        if self.out.len() == before && old != new {
            self.arrangement(
                label,
                &render_values(old),
                &render_values(new),
                old.len() == new.len(),
            );
        }
    }

    fn finish(self) -> Vec<String> {
        self.out
    }
}
