//! Strategies and the cumulative probability lottery over them.

use crate::MEMORY_LEN;

/// Added to each strategy's decayed sum so every lottery weight starts
/// positive (a full ring of `-1`s sums to at least `-10`).
pub const CPF_BIAS: f64 = 10.0;

/// Floor for a lottery weight.
pub const CPF_EPSILON: f64 = 1e-6;

/// Which slice of a station's memory a decision looks at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    /// All ten remembered outcomes.
    Thorough,
    /// The five most recent.
    Recent,
    /// The three most recent.
    Latest,
    /// None: every known station scores zero, so distance alone decides.
    Blind,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [Strategy::Thorough, Strategy::Recent, Strategy::Latest, Strategy::Blind];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of most-recent slots this strategy counts.
    #[inline]
    pub fn window(self) -> usize {
        match self {
            Strategy::Thorough => MEMORY_LEN,
            Strategy::Recent => 5,
            Strategy::Latest => 3,
            Strategy::Blind => 0,
        }
    }

    /// Mask dot decayed outcomes (most recent first).
    pub fn score(self, decayed: &[f64; MEMORY_LEN]) -> f64 {
        decayed[..self.window()].iter().sum()
    }
}

/// Cumulative probability function over [`Strategy::ALL`].
///
/// Nondecreasing, and the last bound is exactly `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cpf {
    bounds: [f64; Strategy::COUNT],
}

impl Default for Cpf {
    /// The uniform lottery.
    fn default() -> Self {
        Self { bounds: [0.25, 0.5, 0.75, 1.0] }
    }
}

impl Cpf {
    /// Build from one raw decayed sum per strategy.  Each weight is
    /// `max(sum + CPF_BIAS, CPF_EPSILON)`.
    pub fn from_sums(sums: [f64; Strategy::COUNT]) -> Self {
        let mut bounds = [0.0; Strategy::COUNT];
        let mut acc = 0.0;
        for (bound, sum) in bounds.iter_mut().zip(sums) {
            let w = sum + CPF_BIAS;
            acc += if w.is_nan() || w < CPF_EPSILON { CPF_EPSILON } else { w };
            *bound = acc;
        }
        for bound in &mut bounds {
            *bound /= acc;
        }
        bounds[Strategy::COUNT - 1] = 1.0;
        debug_assert!(bounds.windows(2).all(|w| w[0] <= w[1]));
        Self { bounds }
    }

    pub fn bounds(&self) -> &[f64; Strategy::COUNT] {
        &self.bounds
    }

    /// First strategy whose bound exceeds `u` (a draw from `[0, 1)`).
    pub fn choose(&self, u: f64) -> Strategy {
        Strategy::ALL
            .into_iter()
            .zip(self.bounds)
            .find(|&(_, bound)| u < bound)
            .map_or(Strategy::Blind, |(s, _)| s)
    }

    /// Probability mass assigned to `strategy`.
    pub fn probability(&self, strategy: Strategy) -> f64 {
        let i = strategy.index();
        if i == 0 { self.bounds[0] } else { self.bounds[i] - self.bounds[i - 1] }
    }
}
