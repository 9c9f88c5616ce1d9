use crate::{estimator::BYTES_PER_MB, models::ChunkPlan};
use anyhow::{anyhow, Context, Result};

/// Upper bound on the number of ranges a single plan may hold.
pub const MAX_PLAN_CHUNKS: u64 = 1_000_000;

/// Converts an advised chunk size to whole bytes, rounding down.
pub fn chunk_size_bytes(chunk_size_mb: f64) -> u64 {
    (chunk_size_mb * BYTES_PER_MB) as u64
}

/// Plans a file of `size_bytes`, refusing negative sizes and plans longer
/// than [`MAX_PLAN_CHUNKS`].
pub fn plan_chunks(size_bytes: i64, chunk_size: u64) -> Result<Vec<ChunkPlan>> {
    let total = u64::try_from(size_bytes)
        .with_context(|| format!("cannot plan a file of {size_bytes} bytes"))?;
    let chunk_size = chunk_size.max(1);
    let count = total.div_ceil(chunk_size);
    if count > MAX_PLAN_CHUNKS {
        return Err(anyhow!(
            "plan for {total} bytes needs {count} chunks, limit is {MAX_PLAN_CHUNKS}"
        ));
    }
    Ok(build_chunk_plan(total, chunk_size))
}

/// Splits `total` bytes into consecutive ranges of at most `chunk_size` bytes.
pub fn build_chunk_plan(total: u64, chunk_size: u64) -> Vec<ChunkPlan> {
    let chunk_size = chunk_size.max(1);
    let mut plans = Vec::new();
    let mut start = 0;
    let mut index = 0;

    while start < total {
        let end = start.saturating_add(chunk_size).min(total) - 1;
        plans.push(ChunkPlan {
            index,
            start,
            end_inclusive: end,
        });
        start = end + 1;
        index += 1;
    }

    plans
}
