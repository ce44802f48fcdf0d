//! Sequential batch stamping.

use tracing::{debug, info};

use crate::core::{InputImage, StampOptions, StampedImage, StampingProgress};
use crate::engine::EngineBinding;
use crate::utils::{file_stem, stamped_file_name, StamperError, StamperResult};

/// Applies the configured stamp to every image in the input list.
///
/// Files are processed strictly in order, one at a time, so progress
/// reporting stays deterministic and only one decoded image is resident at a
/// time. Absent entries are skipped silently. The batch is all-or-nothing:
/// the first per-file failure aborts the operation and already produced
/// results are discarded.
pub async fn apply_stamp_to_images<F>(
    binding: &EngineBinding,
    images: &[Option<InputImage>],
    options: &StampOptions,
    mut on_progress: F,
) -> StamperResult<Vec<StampedImage>>
where
    F: FnMut(&StampingProgress),
{
    let engine = binding.ready_engine()?;
    let resolved = options.resolve()?;

    let total = images.len();
    info!("Stamping batch of {} images", total);

    let mut results = Vec::with_capacity(total);
    let mut processed = 0usize;

    for image in images.iter().flatten() {
        on_progress(&StampingProgress {
            current: processed + 1,
            total,
            current_file_name: image.name.clone(),
        });

        let label = if resolved.add_filename {
            file_stem(&image.name).to_string()
        } else {
            String::new()
        };

        let bytes = engine
            .apply_stamp(
                &image.bytes,
                resolved.quality,
                resolved.format,
                &label,
                resolved.opacity,
            )
            .map_err(|e| StamperError::processing(&image.name, e.to_string()))?;

        debug!("Stamped {} ({} bytes out)", image.name, bytes.len());
        results.push(StampedImage {
            file_name: stamped_file_name(&image.name, resolved.format),
            mime_type: resolved.format.mime_type(),
            bytes,
            original_name: image.name.clone(),
        });
        processed += 1;
    }

    info!("Batch complete: {} images stamped", results.len());
    Ok(results)
}
