//! Process-wide tuning parameters.
//!
//! None of these affect correctness: they bound how much work the engine
//! does before it gives up or switches strategy.

use std::sync::OnceLock;

static GLOBAL: OnceLock<QqbarConfig> = OnceLock::new();

/// Tuning parameters for the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QqbarConfig {
    /// Starting working precision in bits.
    pub default_prec: u32,
    /// Precision ceiling; operations needing more fail with
    /// `NoConvergence`.
    pub max_prec: u32,
    /// Newton rounds before refinement gives up.
    pub max_refine_rounds: usize,
    /// Stalled Newton rounds before refinement falls back to recomputing
    /// all roots.
    pub slow_convergence_rounds: usize,
    /// Comparisons switch to exact subtraction past
    /// `compare_cutoff_factor · default_prec` bits.
    pub compare_cutoff_factor: u32,
    /// Smallest common degree at which binary operations first try to
    /// guess a rational result.
    pub guess_min_degree: usize,
    /// Largest coefficient size, in bits, accepted from `guess`.
    pub guess_max_bits: usize,
    /// Largest degree of a composed polynomial.
    pub max_composed_degree: usize,
    /// Largest power-sum order used by `pow_ui` before it switches to the
    /// multiplication-matrix characteristic polynomial.
    pub max_power_sum_order: usize,
}

impl Default for QqbarConfig {
    fn default() -> Self {
        Self {
            default_prec: 128,
            max_prec: 1 << 16,
            max_refine_rounds: 40,
            slow_convergence_rounds: 4,
            compare_cutoff_factor: 4,
            guess_min_degree: 4,
            guess_max_bits: 64,
            max_composed_degree: 1024,
            max_power_sum_order: 2048,
        }
    }
}

impl QqbarConfig {
    /// Sets the starting precision.
    #[must_use]
    pub fn with_default_prec(mut self, prec: u32) -> Self {
        self.default_prec = prec;
        self
    }

    /// Sets the precision ceiling.
    #[must_use]
    pub fn with_max_prec(mut self, prec: u32) -> Self {
        self.max_prec = prec;
        self
    }

    /// Sets the Newton round limit.
    #[must_use]
    pub fn with_max_refine_rounds(mut self, rounds: usize) -> Self {
        self.max_refine_rounds = rounds;
        self
    }

    /// Sets the stall count that triggers the refinement fallback.
    #[must_use]
    pub fn with_slow_convergence_rounds(mut self, rounds: usize) -> Self {
        self.slow_convergence_rounds = rounds;
        self
    }

    /// Sets the comparison cutoff factor.
    #[must_use]
    pub fn with_compare_cutoff_factor(mut self, factor: u32) -> Self {
        self.compare_cutoff_factor = factor;
        self
    }

    /// Sets the degree at which rational results are guessed.
    #[must_use]
    pub fn with_guess_min_degree(mut self, degree: usize) -> Self {
        self.guess_min_degree = degree;
        self
    }

    /// Sets the coefficient size limit for `guess`.
    #[must_use]
    pub fn with_guess_max_bits(mut self, bits: usize) -> Self {
        self.guess_max_bits = bits;
        self
    }

    /// Sets the composed-polynomial degree limit.
    #[must_use]
    pub fn with_max_composed_degree(mut self, degree: usize) -> Self {
        self.max_composed_degree = degree;
        self
    }

    /// Sets the power-sum order limit.
    #[must_use]
    pub fn with_max_power_sum_order(mut self, order: usize) -> Self {
        self.max_power_sum_order = order;
        self
    }

    /// Installs this configuration for the whole process.
    ///
    /// Only the first call has an effect; later calls hand back the
    /// configuration they tried to install.
    ///
    /// # Errors
    ///
    /// Returns `self` if a configuration is already installed.
    pub fn install(self) -> Result<(), Self> {
        GLOBAL.set(self)
    }

    /// The installed configuration, or the default one.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::default)
    }

    /// Precision at which comparisons fall back to exact subtraction.
    #[must_use]
    pub fn compare_cutoff(&self) -> u32 {
        self.default_prec.saturating_mul(self.compare_cutoff_factor)
    }
}
