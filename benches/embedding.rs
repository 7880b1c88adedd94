//! Benchmarks for the embedding process.
//!
//! Measures the paths a compiler hits while generating code:
//! - Members of regularly referenced types (pass-through)
//! - Repeated use of an already embedded member
//! - Embedding every method of a large COM interface
//! - Freezing and sorting a type set
//! - Materializing member lists with vtable gaps

extern crate nopia;

#[path = "../tests/common/mod.rs"]
mod common;

use std::{hint::black_box, sync::Arc};

use common::*;
use criterion::{criterion_group, criterion_main, Criterion};
use nopia::prelude::*;
use rayon::prelude::*;

fn wide_interface(assembly: &Arc<TestAssembly>, slots: usize) -> Arc<TestType> {
    let mut builder =
        TypeBuilder::com_interface("Interop", "IWide", "00020400-0000-0000-C000-000000000046");
    for index in 0..slots {
        builder = builder.slot(&format!("M{index}"));
    }
    builder.build(assembly)
}

/// Benchmark a member of a type that is not linked.
fn bench_passthrough(c: &mut Criterion) {
    let assembly = TestAssembly::referenced(1, "Office").into_arc();
    let ty = wide_interface(&assembly, 1);
    let manager = manager(&[&ty]);
    let method = ty.method("M0");
    let diagnostics = DiagnosticBag::new();

    c.bench_function("embed_passthrough", |b| {
        b.iter(|| {
            let reference = manager
                .embed_method_if_need_to(black_box(&method), &Location::None, &diagnostics)
                .unwrap();
            black_box(reference)
        });
    });
}

/// Benchmark the lookup of a method that is already embedded.
fn bench_embedded_lookup(c: &mut Criterion) {
    let assembly = TestAssembly::linked(1, "Interop.Office").into_arc();
    let ty = wide_interface(&assembly, 1);
    let manager = manager(&[&ty]);
    let method = ty.method("M0");
    let diagnostics = DiagnosticBag::new();
    manager
        .embed_method_if_need_to(&method, &Location::None, &diagnostics)
        .unwrap();

    c.bench_function("embed_existing_method", |b| {
        b.iter(|| {
            let reference = manager
                .embed_method_if_need_to(black_box(&method), &Location::None, &diagnostics)
                .unwrap();
            black_box(reference)
        });
    });
}

/// Benchmark embedding all 256 methods of an interface on a fresh manager.
fn bench_embed_interface(c: &mut Criterion) {
    let assembly = TestAssembly::linked(1, "Interop.Office").into_arc();
    let ty = wide_interface(&assembly, 256);

    c.bench_function("embed_interface_256", |b| {
        b.iter(|| {
            let manager = manager(&[&ty]);
            let diagnostics = DiagnosticBag::new();
            for method in ty.methods.iter().flatten() {
                manager
                    .embed_method_if_need_to(method, &Location::None, &diagnostics)
                    .unwrap();
            }
            black_box(manager)
        });
    });
}

/// Benchmark the same work spread over the rayon pool.
fn bench_embed_interface_parallel(c: &mut Criterion) {
    let assembly = TestAssembly::linked(1, "Interop.Office").into_arc();
    let ty = wide_interface(&assembly, 256);

    c.bench_function("embed_interface_256_parallel", |b| {
        b.iter(|| {
            let manager = manager(&[&ty]);
            let diagnostics = DiagnosticBag::new();
            ty.methods.par_iter().flatten().for_each(|method| {
                manager
                    .embed_method_if_need_to(method, &Location::None, &diagnostics)
                    .unwrap();
            });
            black_box(manager)
        });
    });
}

/// Benchmark freezing 200 value types from 4 assemblies.
fn bench_freeze(c: &mut Criterion) {
    let assemblies: Vec<_> = (1..=4)
        .map(|index| TestAssembly::linked(index, &format!("Interop.{index}")).into_arc())
        .collect();
    let types: Vec<_> = (0..200)
        .map(|index| {
            TypeBuilder::structure(&format!("Interop.N{}", index % 7), &format!("S{index}"))
                .field(FieldSpec::public("Value"))
                .build(&assemblies[index % assemblies.len()])
        })
        .collect();

    c.bench_function("get_types_200", |b| {
        b.iter(|| {
            let manager = manager(&[]);
            let diagnostics = DiagnosticBag::new();
            for ty in &types {
                manager
                    .embed_type_if_need_to(ty, false, &Location::None, &diagnostics)
                    .unwrap();
            }
            black_box(freeze(&manager, &diagnostics))
        });
    });
}

/// Benchmark building the slot list of a sparsely embedded interface.
fn bench_method_slots(c: &mut Criterion) {
    let assembly = TestAssembly::linked(1, "Interop.Office").into_arc();
    let ty = wide_interface(&assembly, 256);

    c.bench_function("method_slots_sparse_256", |b| {
        b.iter(|| {
            let manager = manager(&[&ty]);
            let diagnostics = DiagnosticBag::new();
            for method in ty.methods.iter().flatten().step_by(5) {
                manager
                    .embed_method_if_need_to(method, &Location::None, &diagnostics)
                    .unwrap();
            }
            let types = freeze(&manager, &diagnostics);
            black_box(types[0].methods().unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_passthrough,
    bench_embedded_lookup,
    bench_embed_interface,
    bench_embed_interface_parallel,
    bench_freeze,
    bench_method_slots,
);
criterion_main!(benches);
