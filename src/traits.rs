//! The uniform inference contract every backend adapter implements.

use crate::api::{CallConfig, InferenceOptions, ProviderConfig, ScoredOutput};
use crate::batch;
use crate::error::Result;
use async_trait::async_trait;

/// A language model backend usable for structured extraction.
///
/// Adapters implement the two required accessors plus [`infer_single`] — one
/// prompt, one remote round trip. The batch protocol ([`infer`]) is a provided
/// method so that override merging, the sequential/parallel branch, output
/// ordering, and fail-fast semantics are identical across every backend.
///
/// [`infer_single`]: LanguageModel::infer_single
/// [`infer`]: LanguageModel::infer
#[async_trait]
pub trait LanguageModel: std::fmt::Debug + Send + Sync {
    /// Short tag identifying the backend, used in errors, logs, and metrics
    /// (e.g. `"anthropic"`).
    fn backend(&self) -> &'static str;

    /// The instance configuration this model was constructed with.
    fn config(&self) -> &ProviderConfig;

    /// Execute exactly one remote call for `prompt` under the effective call
    /// configuration and return the scored result.
    ///
    /// Implementations must wrap every remote failure into
    /// [`ExtractError::Inference`](crate::error::ExtractError::Inference)
    /// tagged with [`backend`](LanguageModel::backend), preserving the
    /// original cause. No retries: a failing call fails.
    async fn infer_single(&self, prompt: &str, call: &CallConfig) -> Result<ScoredOutput>;

    /// Run inference over an ordered batch of prompts.
    ///
    /// Call-level `options` are merged onto the instance defaults once and
    /// applied uniformly to the whole batch. Batches larger than one prompt
    /// fan out over a bounded pool of `min(max_workers, batch_len)` concurrent
    /// requests when `max_workers > 1`; otherwise prompts run strictly
    /// sequentially in input order.
    ///
    /// Returns exactly one [`ScoredOutput`] per prompt, in input order,
    /// regardless of completion order. The first per-prompt failure aborts the
    /// whole call with no partial results.
    async fn infer(
        &self,
        prompts: &[String],
        options: &InferenceOptions,
    ) -> Result<Vec<ScoredOutput>> {
        let call = options.resolve(self.config());
        let max_workers = self.config().max_workers;

        tracing::debug!(
            backend = self.backend(),
            prompts = prompts.len(),
            max_workers,
            "running batch inference"
        );

        let start = std::time::Instant::now();
        let result = batch::run_batch(self.backend(), prompts, max_workers, |prompt| {
            self.infer_single(prompt, &call)
        })
        .await;

        metrics::histogram!("inference.duration_seconds").record(start.elapsed().as_secs_f64());
        match &result {
            Ok(outputs) => {
                metrics::counter!("inference.total", "status" => "success").increment(1);
                tracing::debug!(
                    backend = self.backend(),
                    outputs = outputs.len(),
                    "batch inference complete"
                );
            }
            Err(e) => {
                metrics::counter!("inference.total", "status" => "failure").increment(1);
                tracing::error!(backend = self.backend(), error = %e, "batch inference failed");
            }
        }

        result
    }
}
