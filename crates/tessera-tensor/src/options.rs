//! Options - Tensor Creation Configuration
//!
//! `TensorOptions` bundles the settings every constructor needs (dtype and
//! gradient flag) plus an optional seed for random initialization. Options
//! can be built in code or read from TOML text such as:
//!
//! ```toml
//! dtype = "float64"
//! requires_grad = true
//! seed = 1234
//! ```
//!
//! @version 0.1.0
//! @author Tessera Development Team

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use tessera_core::dtype::DType;
use tessera_core::error::{Error, Result};

use crate::creation;
use crate::tensor::Tensor;

// =============================================================================
// TensorOptions
// =============================================================================

/// Creation settings shared by a family of tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TensorOptions {
    /// Element dtype.
    pub dtype: DType,
    /// Whether to reserve a gradient buffer.
    pub requires_grad: bool,
    /// Seed for `rand`; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TensorOptions {
    fn default() -> Self {
        Self {
            dtype: DType::F32,
            requires_grad: false,
            seed: None,
        }
    }
}

/// On-disk form; dtype stays text so unknown names map to `InvalidDType`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOptions {
    dtype: Option<String>,
    requires_grad: Option<bool>,
    seed: Option<u64>,
}

impl TensorOptions {
    /// Returns the default options (float32, no gradient, unseeded).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dtype.
    #[must_use]
    pub const fn with_dtype(mut self, dtype: DType) -> Self {
        self.dtype = dtype;
        self
    }

    /// Sets whether a gradient buffer is reserved.
    #[must_use]
    pub const fn requires_grad(mut self, requires_grad: bool) -> Self {
        self.requires_grad = requires_grad;
        self
    }

    /// Fixes the seed used by [`TensorOptions::rand`].
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses options from TOML text; missing keys take their defaults.
    ///
    /// # Errors
    /// Returns `InvalidDType` for an unknown dtype name and `Config` for any
    /// other malformed input.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawOptions = toml::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        let defaults = Self::default();

        Ok(Self {
            dtype: match raw.dtype {
                Some(name) => name.parse()?,
                None => defaults.dtype,
            },
            requires_grad: raw.requires_grad.unwrap_or(defaults.requires_grad),
            seed: raw.seed,
        })
    }

    /// Renders the options as TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a tensor with undefined contents.
    pub fn empty(&self, dims: &[usize]) -> Result<Tensor> {
        creation::empty(dims, self.dtype, self.requires_grad)
    }

    /// Creates a tensor of zeros.
    pub fn zeros(&self, dims: &[usize]) -> Result<Tensor> {
        creation::zeros(dims, self.dtype, self.requires_grad)
    }

    /// Creates a tensor of ones.
    pub fn ones(&self, dims: &[usize]) -> Result<Tensor> {
        creation::ones(dims, self.dtype, self.requires_grad)
    }

    /// Creates a random tensor, seeded if `seed` is set.
    pub fn rand(&self, dims: &[usize]) -> Result<Tensor> {
        match self.seed {
            Some(seed) => creation::rand_seeded(dims, self.dtype, self.requires_grad, seed),
            None => {
                let mut rng = StdRng::from_entropy();
                creation::rand(dims, self.dtype, self.requires_grad, &mut rng)
            }
        }
    }

    /// Creates a tensor by copying bytes from `src`.
    pub fn from_data(&self, src: &[u8], dims: &[usize]) -> Result<Tensor> {
        creation::from_data(src, dims, self.dtype, self.requires_grad)
    }
}

// =============================================================================
// Tests
// =============================================================================
