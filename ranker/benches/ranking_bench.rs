use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ranker::strategy::{DirichletPrior, OkapiBm25};
use ranker::{Document, MemoryIndex, RankingEngine, ScoringStrategy};

const WORDS: &[&str] = &[
    "index", "query", "rank", "term", "score", "posting", "corpus", "token", "length", "weight",
    "smooth", "prior", "model", "collection", "document", "retrieval", "frequency", "pivot",
];

fn synthetic_index(num_docs: usize) -> MemoryIndex {
    let mut idx = MemoryIndex::new();
    for d in 0..num_docs {
        let text: Vec<&str> =
            (0..40).map(|i| WORDS[(d * 7 + i * i + i / 3) % WORDS.len()]).collect();
        idx.insert(Document::from_text(text.join(" "))).expect("fresh id");
    }
    idx
}

fn bench_score(c: &mut Criterion) {
    let idx = synthetic_index(5_000);
    let strategies: [(&str, ScoringStrategy); 2] =
        [("bm25", OkapiBm25::default().into()), ("dirichlet", DirichletPrior::default().into())];
    for (name, strategy) in strategies {
        let engine = RankingEngine::new(strategy);
        c.bench_function(&format!("score_5k_docs_{name}"), |b| {
            b.iter(|| {
                let mut q = Document::from_text("ranking documents by term frequency");
                black_box(engine.score(&idx, &mut q))
            })
        });
    }
}

criterion_group!(benches, bench_score);
criterion_main!(benches);
