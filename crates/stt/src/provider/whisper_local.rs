use std::path::Path;
use std::sync::{Arc, Once};

use async_trait::async_trait;
use minutes_config::WhisperLocalConfig;
use tokio::sync::Semaphore;
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, install_logging_hooks,
};

use crate::{
    error::SttError,
    types::{TranscribeOptions, TranscriptSegment},
};

use super::{SegmentStream, TranscriptionEngine};

/// Sample rate whisper.cpp expects
const WHISPER_SAMPLE_RATE: u32 = 16_000;

static LOGGING_HOOKS_INSTALLED: Once = Once::new();

/// In-process whisper.cpp engine
///
/// The model is loaded once and shared; every call creates its own state,
/// so the context itself is never mutated. Parallel inference is bounded by
/// `workers`.
pub(crate) struct WhisperLocalEngine {
    context: Arc<WhisperContext>,
    permits: Arc<Semaphore>,
    threads: u16,
    name: String,
}

impl WhisperLocalEngine {
    pub fn new(name: String, config: &WhisperLocalConfig) -> crate::error::Result<Self> {
        LOGGING_HOOKS_INSTALLED.call_once(|| {
            install_logging_hooks();
        });

        if !config.model_path.exists() {
            return Err(SttError::ConfigError(format!(
                "whisper model not found at {}",
                config.model_path.display()
            )));
        }

        let model_path = config
            .model_path
            .to_str()
            .ok_or_else(|| SttError::ConfigError("Invalid UTF-8 in model path".to_string()))?;

        let context = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .map_err(|e| SttError::ConfigError(format!("Failed to load whisper model: {e}")))?;

        tracing::info!(
            engine = %name,
            model = %config.model_path.display(),
            threads = config.threads,
            workers = config.workers,
            "whisper model loaded"
        );

        Ok(Self {
            context: Arc::new(context),
            permits: Arc::new(Semaphore::new(usize::from(config.workers))),
            threads: config.threads,
            name,
        })
    }
}

#[async_trait]
impl TranscriptionEngine for WhisperLocalEngine {
    async fn transcribe(&self, path: &Path, options: &TranscribeOptions) -> crate::error::Result<SegmentStream> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| SttError::InferenceFailed(format!("worker pool closed: {e}")))?;

        let context = Arc::clone(&self.context);
        let path = path.to_path_buf();
        let options = options.clone();
        let threads = self.threads;

        tracing::debug!(engine = %self.name, path = %path.display(), "starting local inference");

        let segments = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let samples = load_wav(&path)?;
            run_inference(&context, &samples, &options, threads)
        })
        .await
        .map_err(|e| SttError::InferenceFailed(format!("inference task failed: {e}")))??;

        tracing::debug!(engine = %self.name, segments = segments.len(), "local inference complete");

        Ok(Box::pin(futures_util::stream::iter(segments.into_iter().map(Ok))))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
fn run_inference(
    context: &WhisperContext,
    samples: &[f32],
    options: &TranscribeOptions,
    threads: u16,
) -> crate::error::Result<Vec<TranscriptSegment>> {
    let mut state = context
        .create_state()
        .map_err(|e| SttError::InferenceFailed(format!("Failed to create whisper state: {e}")))?;

    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: options.beam_size as i32,
        patience: -1.0,
    });
    params.set_language(Some(&options.language));
    params.set_n_threads(i32::from(threads));
    params.set_no_context(!options.condition_on_previous_text);
    params.set_suppress_blank(options.vad_filter);
    if options.vad_filter {
        params.set_no_speech_thold(0.6);
    }
    if let Some(temperature) = options.temperature {
        params.set_temperature(temperature);
    }
    params.set_print_special(false);
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    state
        .full(params, samples)
        .map_err(|e| SttError::InferenceFailed(format!("whisper inference failed: {e}")))?;

    // Timestamps are in centiseconds
    Ok(state
        .as_iter()
        .map(|segment| {
            TranscriptSegment::new(
                segment.start_timestamp() as f64 / 100.0,
                segment.end_timestamp() as f64 / 100.0,
                segment.to_string(),
            )
        })
        .collect())
}

/// Decode a WAV file into 16 kHz mono samples in `[-1.0, 1.0]`
fn load_wav(path: &Path) -> crate::error::Result<Vec<f32>> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| SttError::InvalidAudio(format!("Failed to open WAV file {}: {e}", path.display())))?;

    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = f32::from(1u16 << (spec.bits_per_sample.clamp(1, 16) - 1));
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| int_sample_to_f32(v, spec.bits_per_sample, scale)))
                .collect::<Result<_, _>>()
        }
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>(),
    }
    .map_err(|e| SttError::InvalidAudio(format!("Failed to read WAV samples: {e}")))?;

    let mono = downmix(&samples, spec.channels);

    Ok(resample(&mono, spec.sample_rate, WHISPER_SAMPLE_RATE))
}

#[allow(clippy::cast_precision_loss)]
fn int_sample_to_f32(value: i32, bits: u16, scale: f32) -> f32 {
    // Wider than 16 bits: bring down to the 16-bit range first
    let value = if bits > 16 { value >> (bits - 16) } else { value };
    value as f32 / scale
}

#[allow(clippy::cast_precision_loss)]
fn downmix(samples: &[f32], channels: u16) -> Vec<f32> {
    let channels = usize::from(channels.max(1));
    if channels == 1 {
        return samples.to_vec();
    }

    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Linear interpolation resampling
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = f64::from(from_rate) / f64::from(to_rate);
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = (source_pos - source_idx as f64) as f32;

            match (samples.get(source_idx), samples.get(source_idx + 1)) {
                (Some(&left), Some(&right)) => (right - left).mul_add(fraction, left),
                (Some(&left), None) => left,
                _ => samples[samples.len() - 1],
            }
        })
        .collect()
}
