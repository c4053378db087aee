//! Benchmark for diffing performance.

use apidiff_core::element::{Declaration, DeclarationTree};
use apidiff_core::types::{ExtensionDef, FunctionDef, ParameterDef, TypeDef, VariableDef};
use apidiff_core::{diff_unit, diff_units};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A unit with `types` structs, each holding a few members and an extension.
fn build_unit(name: &str, types: usize, revision: usize) -> DeclarationTree {
    let mut tree = DeclarationTree::new(name);
    let root = tree.root_id();

    for i in 0..types {
        let ty = tree.add_child(root, Declaration::Struct(TypeDef::named(&format!("Type{}", i))));
        tree.add_child(
            ty,
            Declaration::Variable(VariableDef::named("let", "id", "Swift.Int")),
        );

        // Every tenth type gets a new return type per revision.
        let returns = if i % 10 == 0 && revision > 0 {
            "Swift.String?"
        } else {
            "Swift.String"
        };
        tree.add_child(
            ty,
            Declaration::Function(
                FunctionDef::named("describe")
                    .with_parameter(ParameterDef::new("verbose", "Swift.Bool"))
                    .returning(returns),
            ),
        );

        let ext = tree.add_child(
            root,
            Declaration::Extension(ExtensionDef::of(&format!("Type{}", i))),
        );
        tree.add_child(ext, Declaration::Function(FunctionDef::named("reset")));
    }

    tree
}

fn bench_diff_identical(c: &mut Criterion) {
    let old = build_unit("MyLib", 500, 0);
    let new = build_unit("MyLib", 500, 0);

    c.bench_function("diff_identical_500_types", |b| {
        b.iter(|| black_box(diff_unit(&old, &new)))
    });
}

fn bench_diff_modified(c: &mut Criterion) {
    let old = build_unit("MyLib", 500, 0);
    let new = build_unit("MyLib", 500, 1);

    c.bench_function("diff_modified_500_types", |b| {
        b.iter(|| black_box(diff_unit(&old, &new)))
    });
}

fn bench_diff_many_units(c: &mut Criterion) {
    let old: Vec<DeclarationTree> = (0..16)
        .map(|i| build_unit(&format!("Unit{}", i), 100, 0))
        .collect();
    let new: Vec<DeclarationTree> = (0..16)
        .map(|i| build_unit(&format!("Unit{}", i), 100, 1))
        .collect();

    c.bench_function("diff_16_units_parallel", |b| {
        b.iter(|| black_box(diff_units(&old, &new)))
    });
}

criterion_group!(
    benches,
    bench_diff_identical,
    bench_diff_modified,
    bench_diff_many_units
);
criterion_main!(benches);
