// Benchmark for the maintenance insertion pass
// Run with: cargo bench -p brushograph-optimizer

use brushograph_gcode::classify_all;
use brushograph_optimizer::Optimizer;
use brushograph_settings::Config;
use criterion::{criterion_group, criterion_main, Criterion};

fn plot_lines(strokes: usize) -> Vec<String> {
    let mut lines = vec!["M8".to_string(), ";Layer Green".to_string()];
    for i in 0..strokes {
        let base = (i % 50) as f64;
        lines.push(format!("G0 X{:.3} Y{:.3} F1200", base, base));
        lines.push("G1 Z0".to_string());
        for step in 1..=8 {
            lines.push(format!("G1 X{:.3} Y{:.3}", base + step as f64, base));
        }
        lines.push("G0 Z5".to_string());
        if i == strokes / 2 {
            lines.push("M8".to_string());
            lines.push(";Layer Blue".to_string());
        }
    }
    lines
}

fn bench_classify(c: &mut Criterion) {
    let lines = plot_lines(1_000);
    c.bench_function("classify 11k lines", |b| {
        b.iter(|| {
            let commands = classify_all(&lines);
            assert_eq!(commands.len(), lines.len());
        });
    });
}

fn bench_optimize(c: &mut Criterion) {
    let lines = plot_lines(1_000);
    let optimizer = Optimizer::new(&Config::default()).unwrap();
    c.bench_function("optimize 11k lines", |b| {
        b.iter(|| {
            let result = optimizer.optimize(&lines);
            assert!(result.report.total_pickups() > 0);
        });
    });

    let mut aggressive = Config::default();
    aggressive.optimizer.aggressive = true;
    let optimizer = Optimizer::new(&aggressive).unwrap();
    c.bench_function("optimize 11k lines (aggressive)", |b| {
        b.iter(|| optimizer.optimize(&lines));
    });
}

criterion_group!(benches, bench_classify, bench_optimize);
criterion_main!(benches);
