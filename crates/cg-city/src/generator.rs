//! Fluent builder for a [`GenerationContext`].

use cg_core::{GenRng, GenerationConfig};

use crate::{CityLayout, CityResult, GenerationContext};

/// Fluent builder for [`GenerationContext`].
///
/// | Method      | Default                           |
/// |-------------|-----------------------------------|
/// | `.rng(r)`   | `GenRng::new(config.seed)`        |
///
/// # Example
///
/// ```
/// use cg_city::CityGenerator;
/// use cg_core::GenerationConfig;
///
/// let layout = CityGenerator::new(GenerationConfig::default()).generate().unwrap();
/// assert!(!layout.lots.is_empty());
/// ```
pub struct CityGenerator {
    config: GenerationConfig,
    rng: Option<GenRng>,
}

impl CityGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config, rng: None }
    }

    /// Draw from `rng` instead of a stream seeded from `config.seed`.
    pub fn rng(mut self, rng: GenRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate the configuration and return a context ready to run.
    pub fn build(self) -> CityResult<GenerationContext> {
        self.config.validate()?;
        let rng = self.rng.unwrap_or_else(|| GenRng::new(self.config.seed));
        Ok(GenerationContext::new(self.config, rng))
    }

    /// `build()` followed by [`GenerationContext::generate`].
    pub fn generate(self) -> CityResult<CityLayout> {
        self.build()?.generate()
    }
}
