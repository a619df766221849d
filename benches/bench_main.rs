#![allow(clippy::unwrap_used)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mathgate::lexer::tokenize;
use mathgate::{
    BinaryOp, Environment, ExprNode, FunctionArityTable, GrammarScanner, UnaryOp,
    UnivariateFunction,
};

const SIMPLE: &str = "x + 3";
const NESTED: &str = "sqrt(x^2 + 1) / ln(pi) - ctg(-(2 * x))";
const CALLS: &str = "max(max(a, b), clamp(sin(x), -1, max(c, d)))";

fn dialect() -> FunctionArityTable {
    FunctionArityTable::default()
        .with_function("max", 2)
        .unwrap()
        .with_function("clamp", 3)
        .unwrap()
}

fn bench_scanning(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scanning");
    let functions = dialect();
    let mut scanner = GrammarScanner::new(functions.clone());

    for (name, input) in [("Simple", SIMPLE), ("Nested", NESTED), ("Calls", CALLS)] {
        let tokens = tokenize(input, &functions).unwrap();

        group.bench_function(format!("Tokenize {}", name), |b| {
            b.iter(|| tokenize(black_box(input), &functions))
        });

        group.bench_function(format!("Scan {}", name), |b| {
            b.iter(|| scanner.scan(black_box(&tokens)))
        });
    }

    // a long flat sum, to show the scan is linear
    let long = vec!["x"; 1000].join(" + ");
    let long_tokens = tokenize(&long, &functions).unwrap();
    group.bench_function("Scan 1000 Terms", |b| {
        b.iter(|| scanner.scan(black_box(&long_tokens)))
    });

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Evaluation");

    // sqrt(x^2 + 1) / ln(pi)
    let tree = ExprNode::binary(
        BinaryOp::Divide,
        ExprNode::unary(
            UnaryOp::Sqrt,
            ExprNode::binary(
                BinaryOp::Add,
                ExprNode::binary(
                    BinaryOp::Power,
                    ExprNode::variable("x"),
                    ExprNode::number(2.0),
                ),
                ExprNode::number(1.0),
            ),
        ),
        ExprNode::unary(UnaryOp::Ln, ExprNode::constant("pi")),
    );
    let env = Environment::standard().with_binding("x", 0.5);

    group.bench_function("Eval Tree", |b| b.iter(|| black_box(&tree).evaluate(&env)));

    let f = UnivariateFunction::new(tree.clone(), "x", Environment::standard()).unwrap();
    group.bench_function("Eval Univariate", |b| {
        b.iter(|| f.evaluate(black_box(0.5)))
    });

    group.finish();
}

criterion_group!(benches, bench_scanning, bench_evaluation);
criterion_main!(benches);
