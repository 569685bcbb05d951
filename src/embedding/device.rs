use candle_core::Device;
use tracing::{debug, warn};

use super::error::EmbeddingError;

/// Picks the compute device for the embedder.
///
/// GPU backends are tried only when compiled in (`metal`, `cuda` features);
/// any failure falls back to the CPU.
pub fn select_device() -> Result<Device, EmbeddingError> {
    #[allow(unused_mut)]
    let mut failures: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                tracing::info!("Embedding on Metal GPU");
                return Ok(device);
            }
            Err(e) => failures.push(format!("metal: {e}")),
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                tracing::info!("Embedding on CUDA GPU");
                return Ok(device);
            }
            Err(e) => failures.push(format!("cuda: {e}")),
        }
    }

    if failures.is_empty() {
        debug!("No GPU backend compiled, embedding on CPU");
    } else {
        warn!(reason = %failures.join("; "), "GPU unavailable, embedding on CPU");
    }

    Ok(Device::Cpu)
}
