//! Bounded-parallel execution of a prompt batch with input-order results.

use crate::api::ScoredOutput;
use crate::error::{ExtractError, Result};
use futures::StreamExt;
use futures::stream;
use std::future::Future;

/// Execute `call` for every prompt and return results in input order.
///
/// The parallel path is taken only when the batch has more than one prompt
/// *and* `max_workers > 1`; at most `min(max_workers, prompts.len())` calls
/// are in flight at once. Completion order under the pool is unconstrained,
/// so results are collected into an index-addressed buffer before being
/// returned.
///
/// Fail-fast: the first per-prompt failure is returned immediately and the
/// remaining in-flight futures are dropped. A result slot left unfilled after
/// the pool drains is reported as an inference error rather than yielding a
/// silent gap.
pub(crate) async fn run_batch<'a, F, Fut>(
    backend: &'static str,
    prompts: &'a [String],
    max_workers: usize,
    call: F,
) -> Result<Vec<ScoredOutput>>
where
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = Result<ScoredOutput>>,
{
    if prompts.len() > 1 && max_workers > 1 {
        let limit = max_workers.min(prompts.len());

        let mut slots: Vec<Option<ScoredOutput>> = Vec::with_capacity(prompts.len());
        slots.resize_with(prompts.len(), || None);

        let mut pending = Vec::with_capacity(prompts.len());
        for (index, prompt) in prompts.iter().enumerate() {
            let fut = call(prompt.as_str());
            pending.push(async move { (index, fut.await) });
        }
        let mut inflight = stream::iter(pending).buffer_unordered(limit);

        while let Some((index, result)) = inflight.next().await {
            match result {
                Ok(output) => slots[index] = Some(output),
                // Dropping the stream cancels whatever is still in flight.
                Err(e) => return Err(e),
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    ExtractError::inference_msg(
                        backend,
                        format!("missing result for prompt at index {index}"),
                    )
                })
            })
            .collect()
    } else {
        let mut results = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            results.push(call(prompt.as_str()).await?);
        }
        Ok(results)
    }
}
