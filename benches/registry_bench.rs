use async_trait::async_trait;
use criterion::{Criterion, criterion_group, criterion_main};
use structex::api::{CallConfig, InferenceOptions, ProviderConfig, ScoredOutput};
use structex::error::Result;
use structex::registry::Registry;
use structex::traits::LanguageModel;
use tokio::runtime::Runtime;

// --- Bench Components ---

#[derive(Debug)]
struct BenchModel {
    config: ProviderConfig,
}

#[async_trait]
impl LanguageModel for BenchModel {
    fn backend(&self) -> &'static str {
        "bench"
    }
    fn config(&self) -> &ProviderConfig {
        &self.config
    }
    async fn infer_single(&self, prompt: &str, _call: &CallConfig) -> Result<ScoredOutput> {
        // pure overhead measurement
        Ok(ScoredOutput::new(prompt))
    }
}

fn bench_factory(config: ProviderConfig) -> Result<Box<dyn LanguageModel>> {
    Ok(Box::new(BenchModel { config }))
}

fn populated_registry() -> Registry {
    let registry = Registry::new();
    for (i, family) in ["alpha", "beta", "gamma", "delta", "epsilon"]
        .iter()
        .enumerate()
    {
        let pattern = format!("^{family}-");
        registry
            .register(&[pattern.as_str()], i as i32, bench_factory)
            .unwrap();
    }
    registry
}

// --- Benchmarks ---

fn bench_resolution(c: &mut Criterion) {
    let registry = populated_registry();

    c.bench_function("resolve_last_registered_family", |b| {
        b.iter(|| registry.resolve("epsilon-model-1").unwrap())
    });

    c.bench_function("resolve_miss", |b| {
        b.iter(|| registry.resolve("zeta-model-1").is_err())
    });
}

fn bench_batch_overhead(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let sequential = BenchModel {
        config: ProviderConfig::new("bench-1").with_max_workers(1),
    };
    let parallel = BenchModel {
        config: ProviderConfig::new("bench-1").with_max_workers(8),
    };
    let prompts: Vec<String> = (0..16).map(|i| format!("prompt-{i}")).collect();

    c.bench_function("batch_16_sequential_overhead", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = sequential
                .infer(&prompts, &InferenceOptions::default())
                .await
                .unwrap();
        })
    });

    c.bench_function("batch_16_parallel_overhead", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = parallel
                .infer(&prompts, &InferenceOptions::default())
                .await
                .unwrap();
        })
    });
}

criterion_group!(benches, bench_resolution, bench_batch_overhead);
criterion_main!(benches);
