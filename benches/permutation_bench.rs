use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glyphmatch::{AnalysisConfig, Analyzer, CollectingSink, Dictionary, DictionaryLoad, PermutationMatcher};

/// Synthetic word list large enough to make membership tests realistic
fn synthetic_dictionary(size: usize) -> Dictionary {
    let alphabet: Vec<char> = "aeioulnrst".chars().collect();
    let words = (0..size).map(|mut n| {
        let mut word = String::new();
        loop {
            word.push(alphabet[n % alphabet.len()]);
            n /= alphabet.len();
            if n == 0 {
                break;
            }
        }
        word.push('z');
        word
    });
    Dictionary::from_lines("latin", words)
}

fn bench_token_lengths(c: &mut Criterion) {
    // WHY: the L^5 term dominates, so cost should jump once tokens pass the cap
    let dictionary = synthetic_dictionary(50_000);
    let matcher = PermutationMatcher::new();

    let mut group = c.benchmark_group("permutation_no_match");
    group.sample_size(10);
    for token in ["qok", "qokedy", "qokeedyshol", "chckhyqokaiinshedy"] {
        group.bench_with_input(BenchmarkId::from_parameter(token.len()), token, |b, token| {
            b.iter(|| black_box(matcher.match_token(black_box(token), &dictionary)))
        });
    }
    group.finish();
}

fn bench_analysis_sequential_vs_parallel(c: &mut Criterion) {
    let dictionaries: Vec<DictionaryLoad> = vec![Ok(synthetic_dictionary(50_000))];
    let lines: Vec<String> = (0..200)
        .map(|i| format!("qokedy.shedy daiin-{i} {{okal}} chedy.qokain"))
        .collect();

    let mut group = c.benchmark_group("analysis");
    group.sample_size(10);
    for parallel in [false, true] {
        let analyzer = Analyzer::new(AnalysisConfig {
            brute_force_language: Some("latin".to_string()),
            parallel,
            ..Default::default()
        })
        .expect("valid config");
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut sink = CollectingSink::new();
                black_box(analyzer.analyze(&lines, &dictionaries, &mut sink).expect("analysis"))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_token_lengths, bench_analysis_sequential_vs_parallel);
criterion_main!(benches);
