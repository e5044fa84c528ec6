//! Offline generator for the committee z-table.
//!
//! Entry `i` is the cumulative binomial probability, scaled to `u64::MAX`,
//! of drawing at most `mean + z_i * std` committee seats when every unit of
//! the reference maximum stake is selected with probability
//! `committee_size / max_stake`. `z_i = round(i * max_z / size, 2)`. The
//! first entry is pinned to the midpoint of the range and the last to
//! `u64::MAX`, so every folded draw lands in exactly one bucket.

use oracle_common::committee::{HALF, Z_TABLE_MAX_Z, Z_TABLE_SIZE};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_MAX_STAKE: u64 = 10_000_000_000;
pub const DEFAULT_COMMITTEE_SIZE: u64 = 10_000;

/// Probability mass beyond this many standard deviations of the mode is
/// below f64 resolution.
const WINDOW_SIGMAS: f64 = 60.0;

/// 2^64, the scale applied to probabilities before truncating to u64.
const U64_SCALE: f64 = 18_446_744_073_709_551_616.0;

#[derive(Debug, Error)]
pub enum ZTableError {
    #[error("table size must be at least 2, got {0}")]
    TableTooSmall(usize),

    #[error("max z must be positive")]
    ZeroMaxZ,

    #[error("committee size {committee_size} must be positive and below max stake {max_stake}")]
    InvalidCommittee { committee_size: u64, max_stake: u64 },

    #[error("failed to encode table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reference model the table is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZTableConfig {
    pub size: usize,
    pub max_z: u64,
    pub max_stake: u64,
    pub committee_size: u64,
}

impl Default for ZTableConfig {
    fn default() -> Self {
        ZTableConfig {
            size: Z_TABLE_SIZE,
            max_z: Z_TABLE_MAX_Z,
            max_stake: DEFAULT_MAX_STAKE,
            committee_size: DEFAULT_COMMITTEE_SIZE,
        }
    }
}

impl ZTableConfig {
    pub fn validate(&self) -> Result<(), ZTableError> {
        if self.size < 2 {
            return Err(ZTableError::TableTooSmall(self.size));
        }
        if self.max_z == 0 {
            return Err(ZTableError::ZeroMaxZ);
        }
        if self.committee_size == 0 || self.committee_size >= self.max_stake {
            return Err(ZTableError::InvalidCommittee {
                committee_size: self.committee_size,
                max_stake: self.max_stake,
            });
        }
        Ok(())
    }

    pub fn selection_probability(&self) -> f64 {
        self.committee_size as f64 / self.max_stake as f64
    }

    /// z-score of bucket `index`, rounded to two decimals.
    pub fn z_score(&self, index: usize) -> f64 {
        let z = index as f64 / self.size as f64 * self.max_z as f64;
        (z * 100.0).round() / 100.0
    }
}

/// Binomial(n, p) distribution, tabulated over the window around its mode
/// that carries all representable probability mass.
#[derive(Debug, Clone)]
pub struct BinomialWindow {
    lo: u64,
    cumulative: Vec<f64>,
}

impl BinomialWindow {
    /// `p` must lie strictly between 0 and 1.
    pub fn new(n: u64, p: f64) -> Self {
        let mode = (((n as f64 + 1.0) * p).floor() as u64).min(n);
        let std = (n as f64 * p * (1.0 - p)).sqrt();
        let half_width = (WINDOW_SIGMAS * std).ceil() as u64 + 10;
        let lo = mode.saturating_sub(half_width);
        let hi = mode.saturating_add(half_width).min(n);

        // Unnormalized masses relative to the mode, filled outwards with
        // the ratio pmf(k + 1) / pmf(k) = (n - k) / (k + 1) * p / (1 - p).
        let odds = p / (1.0 - p);
        let mut masses = vec![0.0f64; (hi - lo + 1) as usize];
        let at = |k: u64| (k - lo) as usize;
        masses[at(mode)] = 1.0;

        let mut mass = 1.0;
        for k in mode..hi {
            mass *= (n - k) as f64 / (k + 1) as f64 * odds;
            masses[at(k + 1)] = mass;
        }
        let mut mass = 1.0;
        for k in (lo + 1..=mode).rev() {
            mass *= k as f64 / ((n - k + 1) as f64 * odds);
            masses[at(k - 1)] = mass;
        }

        let total: f64 = masses.iter().sum();
        let mut running = 0.0;
        let cumulative = masses
            .iter()
            .map(|m| {
                running += m / total;
                running.min(1.0)
            })
            .collect();

        BinomialWindow { lo, cumulative }
    }

    /// P(X <= k); non-integer `k` is floored.
    pub fn cdf(&self, k: f64) -> f64 {
        if k < self.lo as f64 {
            return 0.0;
        }
        let offset = (k.floor() as u64 - self.lo) as usize;
        match self.cumulative.get(offset) {
            Some(p) => *p,
            None => 1.0,
        }
    }

    /// Smallest `k` with `P(X <= k) >= q`.
    pub fn ppf(&self, q: f64) -> u64 {
        let offset = self.cumulative.partition_point(|&p| p < q);
        self.lo + offset.min(self.cumulative.len() - 1) as u64
    }
}

pub fn binomial_cdf(n: u64, p: f64, k: f64) -> f64 {
    BinomialWindow::new(n, p).cdf(k)
}

fn scale_probability(p: f64) -> u64 {
    // `as` saturates at u64::MAX
    (p.min(1.0) * U64_SCALE) as u64
}

pub fn generate(config: &ZTableConfig) -> Result<Vec<u64>, ZTableError> {
    config.validate()?;

    let n = config.max_stake;
    let p = config.selection_probability();
    let mean = p * n as f64;
    let std = (n as f64 * (1.0 - p) * p).sqrt();
    let window = BinomialWindow::new(n, p);

    let last = config.size - 1;
    let table = (0..config.size)
        .map(|i| match i {
            0 => HALF,
            i if i == last => u64::MAX,
            i => scale_probability(window.cdf(config.z_score(i) * std + mean)),
        })
        .collect();
    Ok(table)
}

#[derive(Debug, Serialize)]
struct ZTableDocument<'a> {
    #[serde(flatten)]
    config: &'a ZTableConfig,
    entries: &'a [u64],
}

pub fn render_json(config: &ZTableConfig, table: &[u64]) -> Result<String, ZTableError> {
    let document = ZTableDocument {
        config,
        entries: table,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Renders the table as the constant embedded in the contracts.
pub fn render_rust(table: &[u64]) -> String {
    let mut out = format!("pub const Z_TABLE: [u64; {}] = [\n", table.len());
    for entry in table {
        out.push_str(&format!("    {},\n", entry));
    }
    out.push_str("];\n");
    out
}
