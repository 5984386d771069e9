//! Candle-backed image classifier adapter.
//!
//! Runs a ConvNeXt ImageNet classifier and maps its top predictions to
//! label evidence. The model is loaded eagerly at construction, so a
//! missing or corrupt weights file aborts the run instead of failing on
//! the first photo.

// Allow common ML code patterns
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use candle_core::{DType, Device, Module, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::{Func, VarBuilder};
use candle_transformers::models::convnext;
use candle_examples::imagenet::{CLASSES, IMAGENET_MEAN, IMAGENET_STD};
use image::imageops::FilterType;
use photo_pick_core::domain::{LabelScore, PhotoInfo, TOP_LABELS};
use photo_pick_core::ports::LabelProvider;
use safetensors::SafeTensors;
use tracing::{debug, info};

/// ConvNeXt input edge length.
const INPUT_SIZE: u32 = 224;

/// ImageNet classifier on candle.
///
/// Forward passes are serialized through a mutex; photo scoring stays
/// parallel around the classifier calls.
pub struct CandleClassifier {
    model: Mutex<Func<'static>>,
    device: Device,
}

impl CandleClassifier {
    /// Loads ConvNeXt weights from a safetensors file.
    ///
    /// # Errors
    ///
    /// Returns an error if the weights file cannot be read, parsed or
    /// assembled into the model.
    pub fn load(weights: impl AsRef<Path>) -> Result<Self> {
        let device = select_device();
        let vb = load_safetensors(weights.as_ref(), &device)?;
        let model = convnext::convnext(&convnext::Config::tiny(), CLASSES.len(), vb)
            .context("failed to build ConvNeXt model")?;
        info!("classifier ready ({} classes)", CLASSES.len());
        Ok(Self {
            model: Mutex::new(model),
            device,
        })
    }

    /// Converts a photo into a normalized `(1, 3, 224, 224)` input tensor.
    fn preprocess(&self, photo: &PhotoInfo) -> Result<Tensor> {
        let resized = photo
            .image
            .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
            .to_rgb8();
        let data = resized.into_raw();
        let input = Tensor::from_vec(
            data,
            (INPUT_SIZE as usize, INPUT_SIZE as usize, 3),
            &self.device,
        )?
        .permute((2, 0, 1))?
        .to_dtype(DType::F32)?
        .affine(1.0 / 255.0, 0.0)?;

        let mean = Tensor::new(&IMAGENET_MEAN, &self.device)?.reshape((3, 1, 1))?;
        let std = Tensor::new(&IMAGENET_STD, &self.device)?.reshape((3, 1, 1))?;
        Ok(input
            .broadcast_sub(&mean)?
            .broadcast_div(&std)?
            .unsqueeze(0)?)
    }
}

impl LabelProvider for CandleClassifier {
    fn classify(&self, photo: &PhotoInfo) -> Result<Vec<LabelScore>> {
        let input = self
            .preprocess(photo)
            .with_context(|| format!("failed to preprocess {}", photo.filename))?;

        let logits = {
            let model = self.model.lock().unwrap_or_else(PoisonError::into_inner);
            model
                .forward(&input)
                .with_context(|| format!("inference failed for {}", photo.filename))?
        };

        let probs = softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;
        let mut ranked: Vec<(usize, f32)> = probs.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let labels: Vec<LabelScore> = ranked
            .into_iter()
            .take(TOP_LABELS)
            .map(|(index, confidence)| LabelScore::new(CLASSES[index], confidence))
            .collect();
        debug!(
            "{}: top label {} ({:.3})",
            photo.filename,
            labels.first().map_or("none", |l| l.label.as_str()),
            labels.first().map_or(0.0, |l| l.confidence)
        );
        Ok(labels)
    }
}

/// Returns the best available device for inference.
///
/// Uses GPU (Metal on macOS, CUDA elsewhere) when the matching feature is
/// enabled and the device is available, falling back to CPU.
#[must_use]
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    {
        if let Ok(device) = Device::new_metal(0) {
            info!("using Metal device for inference");
            return device;
        }
    }

    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            info!("using CUDA device for inference");
            return device;
        }
    }

    info!("using CPU for inference");
    Device::Cpu
}

/// Loads a safetensors file and creates a `VarBuilder` for the model.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the safetensors data is
/// invalid.
pub fn load_safetensors(path: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    debug!("loading safetensors from {}", path.display());

    let data = std::fs::read(path)
        .with_context(|| format!("failed to read model file: {}", path.display()))?;
    let tensors = SafeTensors::deserialize(&data)
        .with_context(|| format!("failed to parse safetensors: {}", path.display()))?;

    let mut tensor_map: HashMap<String, Tensor> = HashMap::new();
    for name in tensors.names() {
        let view = tensors
            .tensor(name)
            .with_context(|| format!("failed to get tensor '{name}'"))?;
        let dtype = safetensors_dtype_to_candle(view.dtype())?;
        let shape: Vec<usize> = view.shape().to_vec();
        let tensor = Tensor::from_raw_buffer(view.data(), dtype, &shape, device)
            .with_context(|| format!("failed to create tensor '{name}'"))?;
        tensor_map.insert(name.clone(), tensor);
    }

    Ok(VarBuilder::from_tensors(tensor_map, DType::F32, device))
}

/// Converts safetensors dtype to candle dtype.
fn safetensors_dtype_to_candle(dtype: safetensors::Dtype) -> Result<DType> {
    use safetensors::Dtype as S;
    match dtype {
        S::F32 => Ok(DType::F32),
        S::F64 => Ok(DType::F64),
        S::F16 => Ok(DType::F16),
        S::BF16 => Ok(DType::BF16),
        S::I64 => Ok(DType::I64),
        S::U8 => Ok(DType::U8),
        S::U32 => Ok(DType::U32),
        other => anyhow::bail!("unsupported dtype: {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[allow(clippy::expect_used)]
    fn write_test_safetensors() -> NamedTempFile {
        use safetensors::serialize;
        use safetensors::tensor::TensorView;

        let data: Vec<f32> = vec![1.0, 2.0, 3.0, 4.0];
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        let tensor = TensorView::new(safetensors::Dtype::F32, vec![2, 2], &bytes)
            .expect("valid tensor view");
        let tensors = HashMap::from([("test_tensor".to_string(), tensor)]);
        let serialized = serialize(&tensors, &None).expect("serialize");

        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&serialized).expect("write");
        file
    }

    #[test]
    fn test_load_safetensors() {
        let file = write_test_safetensors();
        assert!(load_safetensors(file.path(), &Device::Cpu).is_ok());
    }

    #[test]
    fn test_load_safetensors_missing_file() {
        let result = load_safetensors(Path::new("/nonexistent/model.safetensors"), &Device::Cpu);
        assert!(result.is_err());
    }

    #[test]
    fn test_select_device_never_panics() {
        let _device = select_device();
    }
}
