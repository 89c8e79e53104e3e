//! Budget-aware search space for the BERT benchmark.

use tk_space::Space;
use tk_types::{TkResult, TuneArgs};
use tracing::debug;

/// Symbol holding the global batch size.
pub const BATCH_SIZE: &str = "batch_size";
/// Symbol holding the fraction of layers with gradient checkpointing.
pub const CKPT_RATIO: &str = "ckpt_ratio";

/// Batch sizes tried without any integration.
const PLAIN_BATCH_SIZES: [i64; 6] = [4, 8, 12, 16, 20, 24];
/// Batch sizes tried on a single GPU with an integration.
const SINGLE_GPU_BATCH_SIZES: [i64; 3] = [16, 20, 24];
const PER_GPU_BATCH: i64 = 16;
const REDUCED_PER_GPU_BATCH: i64 = 12;
/// Above this global batch size a smaller per-GPU batch is also tried.
const LARGE_BATCH_LIMIT: i64 = 100;
/// From this global batch size on, memory is tight.
const MEMORY_PRESSURE_BATCH: f64 = 96.0;

const NO_CHECKPOINT: f64 = 1.0;
const FINE_CKPT_RATIOS: [f64; 3] = [0.92, 0.84, 0.67];
const COARSE_CKPT_RATIOS: [f64; 3] = [0.5, 0.34, 0.25];

/// Populates a search space for one BERT trial configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceBuilder;

impl SpaceBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Creates `batch_size` (and `ckpt_ratio` when an integration is tuned)
    /// in `space` and hands the same space back.
    ///
    /// Fails if `args` has no valid GPU count or if `space` already holds one
    /// of the symbols.
    pub fn update_space<'s>(
        &self,
        args: &TuneArgs,
        space: &'s mut Space,
    ) -> TkResult<&'s mut Space> {
        let n_gpu = i64::from(args.gpus()?);
        let method = args.method();

        if !method.is_integration() {
            space.create_symbol(BATCH_SIZE, PLAIN_BATCH_SIZES)?;
            debug!(%method, n_gpu, "created plain batch size space");
            return Ok(space);
        }

        let batch_size = if n_gpu == 1 {
            space.create_symbol(BATCH_SIZE, SINGLE_GPU_BATCH_SIZES)?
        } else {
            space.create_symbol(BATCH_SIZE, [PER_GPU_BATCH * n_gpu])?
        };
        if PER_GPU_BATCH * n_gpu > LARGE_BATCH_LIMIT {
            batch_size.add(REDUCED_PER_GPU_BATCH * n_gpu);
        }

        let mut ckpt_ratios = vec![NO_CHECKPOINT];
        if batch_size.max_at_least(MEMORY_PRESSURE_BATCH) {
            ckpt_ratios.extend(FINE_CKPT_RATIOS);
        }
        ckpt_ratios.extend(COARSE_CKPT_RATIOS);
        let batch_candidates = batch_size.len();

        space.create_symbol(CKPT_RATIO, ckpt_ratios)?;
        debug!(
            %method,
            n_gpu,
            batch_candidates,
            grid_size = space.grid_size(),
            "created integration space"
        );
        Ok(space)
    }
}

/// Shorthand for [`SpaceBuilder::update_space`].
pub fn update_space<'s>(args: &TuneArgs, space: &'s mut Space) -> TkResult<&'s mut Space> {
    SpaceBuilder::new().update_space(args, space)
}
