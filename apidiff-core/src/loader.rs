//! Declaration dump loading.
//!
//! Turns the JSON dump handed over by a syntax-tree producer into one
//! [`DeclarationTree`] per unit. Conversion is deterministic: the same dump
//! always renders byte-identical descriptions.

use std::collections::HashSet;

use crate::element::{Declaration, DeclarationTree, NodeId};
use crate::error::{ApiDiffError, Result};
use crate::types::{DeclarationDef, InterfaceDump, UnitDef};

/// Parse a declaration dump from JSON text.
pub fn parse_dump(text: &str) -> Result<InterfaceDump> {
    Ok(serde_json::from_str(text)?)
}

/// Parse `text` and build the tree of the unit named `unit_name`.
pub fn load_unit(text: &str, unit_name: &str) -> Result<DeclarationTree> {
    let dump = parse_dump(text)?;
    ensure_unique_units(&dump)?;
    let unit = dump
        .unit(unit_name)
        .ok_or_else(|| ApiDiffError::UnitNotFound {
            name: unit_name.to_string(),
        })?;
    build_tree(unit)
}

/// Build trees for every unit in the dump, in dump order.
///
/// Units are matched by name, so a dump naming the same unit twice is rejected.
pub fn build_trees(dump: &InterfaceDump) -> Result<Vec<DeclarationTree>> {
    ensure_unique_units(dump)?;
    dump.units.iter().map(build_tree).collect()
}

fn ensure_unique_units(dump: &InterfaceDump) -> Result<()> {
    let mut seen = HashSet::new();
    for unit in &dump.units {
        if !seen.insert(unit.name.as_str()) {
            return Err(ApiDiffError::InvalidDeclaration {
                message: format!("unit `{}` appears more than once", unit.name),
            });
        }
    }
    Ok(())
}

/// Convert one unit into a declaration tree.
pub fn build_tree(unit: &UnitDef) -> Result<DeclarationTree> {
    if unit.name.trim().is_empty() {
        return Err(ApiDiffError::InvalidDeclaration {
            message: "unit without a name".to_string(),
        });
    }

    let mut tree = DeclarationTree::new(unit.name.as_str());
    let root = tree.root_id();
    for def in &unit.declarations {
        insert(&mut tree, root, def, &unit.name)?;
    }
    Ok(tree)
}

fn insert(
    tree: &mut DeclarationTree,
    parent: NodeId,
    def: &DeclarationDef,
    path: &str,
) -> Result<()> {
    let (declaration, members) = split(def);
    let name = declaration.path_component_name();
    if name.trim().is_empty() {
        return Err(ApiDiffError::InvalidDeclaration {
            message: format!("{} without a name in {}", declaration.kind().as_str(), path),
        });
    }

    let child_path = format!("{}.{}", path, name);
    let id = tree.add_child(parent, declaration);
    for member in members {
        insert(tree, id, member, &child_path)?;
    }
    Ok(())
}

fn split(def: &DeclarationDef) -> (Declaration, &[DeclarationDef]) {
    let leaf: &[DeclarationDef] = &[];
    match def {
        DeclarationDef::Class(c) => (Declaration::Class(c.declaration.clone()), &c.members[..]),
        DeclarationDef::Struct(c) => (Declaration::Struct(c.declaration.clone()), &c.members[..]),
        DeclarationDef::Enum(c) => (Declaration::Enum(c.declaration.clone()), &c.members[..]),
        DeclarationDef::Protocol(c) => {
            (Declaration::Protocol(c.declaration.clone()), &c.members[..])
        }
        DeclarationDef::Extension(c) => {
            (Declaration::Extension(c.declaration.clone()), &c.members[..])
        }
        DeclarationDef::Function(f) => (Declaration::Function(f.clone()), leaf),
        DeclarationDef::Initializer(i) => (Declaration::Initializer(i.clone()), leaf),
        DeclarationDef::Variable(v) => (Declaration::Variable(v.clone()), leaf),
        DeclarationDef::TypeAlias(t) => (Declaration::TypeAlias(t.clone()), leaf),
        DeclarationDef::AssociatedType(a) => (Declaration::AssociatedType(a.clone()), leaf),
        DeclarationDef::Operator(o) => (Declaration::Operator(o.clone()), leaf),
        DeclarationDef::EnumCase(c) => (Declaration::EnumCase(c.clone()), leaf),
    }
}
