use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rcore::ast::{Argument, BinaryOperator, Node, Symbol};
use rcore::runtime::values::Value;
use rcore::runtime::Frame;
use rcore::substitute::{duplicate, substitute, BindingSource};
use rcore::vector::IntVector;

fn nested_sum(depth: usize) -> Node {
    let mut node = Node::symbol("x");
    for _ in 0..depth {
        node = Node::binary(
            BinaryOperator::Add,
            node,
            Node::call("f", vec![Argument::positional(Node::symbol("y"))]),
        );
    }
    node
}

/// Benchmark substitution against duplication of the same tree
fn benchmark_substitution(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitution");

    let mut frame = Frame::new(Some(Symbol::new("caller")));
    frame.bind(&Symbol::new("x"), Value::double(1.0));
    frame.bind(
        &Symbol::new("y"),
        Value::promise(Node::call("g", vec![Argument::positional(Node::symbol("z"))]), None),
    );

    for depth in [4usize, 32, 256] {
        let tree = nested_sum(depth);
        group.bench_with_input(BenchmarkId::new("duplicate", depth), &tree, |b, tree| {
            b.iter(|| duplicate(black_box(tree)));
        });
        group.bench_with_input(BenchmarkId::new("frame", depth), &tree, |b, tree| {
            b.iter(|| substitute(black_box(tree), BindingSource::Frame(&frame)));
        });
    }

    group.finish();
}

/// Benchmark view element access against materialized storage
fn benchmark_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("views");

    let base = IntVector::sequence(1, 100_000, 1).unwrap();
    let index = IntVector::sequence(100_000, 1, -3).unwrap();
    let view = base.subset(&index).exclude(0).unwrap().as_double();

    group.bench_function("view_sum", |b| {
        b.iter(|| black_box(&view).iter().sum::<f64>());
    });
    group.bench_function("materialize", |b| {
        b.iter(|| black_box(&view).materialize());
    });
    let block = view.materialize();
    group.bench_function("block_sum", |b| {
        b.iter(|| black_box(&block).iter().sum::<f64>());
    });

    group.finish();
}

criterion_group!(benches, benchmark_substitution, benchmark_views);
criterion_main!(benches);
