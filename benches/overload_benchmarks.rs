//! Performance benchmarks for overload resolution.
//!
//! Measures the two hot paths of the engine: building a single implicit
//! conversion sequence, and resolving a call against a wide overload set
//! (the worst case a semantic analyzer hits on operator-heavy code).

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use cxxsema::prelude::*;

/// Registry with a class chain and a fan of `process` overloads across the
/// arithmetic types.
fn setup() -> (TypeRegistry, Vec<TypeHash>) {
    let mut registry = TypeRegistry::with_builtins();

    let entity = registry.register_type(ClassEntry::new("Entity").into()).unwrap();
    let character = registry
        .register_type(ClassEntry::new("Character").with_base(entity).into())
        .unwrap();
    registry
        .register_type(ClassEntry::new("Player").with_base(character).into())
        .unwrap();

    let param_types = [
        builtins::BOOL,
        builtins::SCHAR,
        builtins::SHORT,
        builtins::INT,
        builtins::UINT,
        builtins::LONG,
        builtins::ULONG,
        builtins::LONG_LONG,
        builtins::FLOAT,
        builtins::DOUBLE,
    ];
    let mut candidates = Vec::with_capacity(param_types.len());
    for ty in param_types {
        let def = FunctionDef::free(
            "process",
            vec![Param::new("v", DataType::simple(ty))],
            DataType::simple(builtins::VOID),
        );
        candidates.push(registry.register_function(FunctionEntry::free(def)).unwrap());
    }
    (registry, candidates)
}

fn conversion_sequence_benchmark(c: &mut Criterion) {
    let (registry, _) = setup();
    let arg = Argument::rvalue(DataType::simple(builtins::SHORT));
    let target = DataType::simple(builtins::DOUBLE);

    c.bench_function("implicit_conversion_sequence/short_to_double", |b| {
        b.iter(|| {
            black_box(implicit_conversion_sequence(
                black_box(&arg),
                black_box(&target),
                UdcMode::Allowed,
                &registry,
            ))
        })
    });

    let player = TypeHash::from_name("Player");
    let entity = TypeHash::from_name("Entity");
    let ptr_arg = Argument::lvalue(DataType::simple(player).pointer_to());
    let ptr_target = DataType::simple(entity).pointer_to();

    c.bench_function("implicit_conversion_sequence/derived_to_base_ptr", |b| {
        b.iter(|| {
            black_box(implicit_conversion_sequence(
                black_box(&ptr_arg),
                black_box(&ptr_target),
                UdcMode::Allowed,
                &registry,
            ))
        })
    });
}

fn overload_resolution_benchmark(c: &mut Criterion) {
    let (registry, candidates) = setup();
    let args = [Argument::rvalue(DataType::simple(builtins::INT))];

    c.bench_function("resolve_overload/ten_candidates_exact_hit", |b| {
        b.iter(|| {
            black_box(resolve_overload(
                black_box(&candidates),
                black_box(&args),
                &registry,
                Span::default(),
            ))
        })
    });
}

criterion_group!(
    benches,
    conversion_sequence_benchmark,
    overload_resolution_benchmark
);
criterion_main!(benches);
