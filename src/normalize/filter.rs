//! Inclusion criteria for candidate records

use crate::config::FilterConfig;
use crate::model::{CandidateRecord, LaptopRecord};
use crate::normalize::price::{parse_price, PriceError};
use chrono::NaiveDate;
use thiserror::Error;

/// Why a candidate was left out of the results
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("unparseable price: {0}")]
    UnparseablePrice(#[from] PriceError),

    #[error("price {price:.2} exceeds maximum {max:.2}")]
    OverBudget { price: f64, max: f64 },

    #[error("GPU '{gpu}' does not contain '{wanted}'")]
    GpuMismatch { gpu: String, wanted: String },

    #[error("CPU '{cpu}' does not contain '{wanted}'")]
    CpuMismatch { cpu: String, wanted: String },
}

impl Rejection {
    /// True if the record was broken rather than merely not wanted
    pub fn is_unparseable(&self) -> bool {
        matches!(self, Self::UnparseablePrice(_))
    }
}

/// Filter criteria, resolved from configuration once per run
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Required GPU substring; None disables the check
    pub target_gpu: Option<String>,

    /// Required CPU substring; None disables the check
    pub target_cpu: Option<String>,

    /// Inclusive price ceiling
    pub max_price: f64,
}

impl FilterCriteria {
    /// Builds criteria from config; empty target strings disable their check
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            target_gpu: non_empty(&config.target_gpu),
            target_cpu: non_empty(&config.target_cpu),
            max_price: config.max_price,
        }
    }

    /// Case-sensitive substring check against the GPU filter
    pub fn gpu_matches(&self, gpu: &str) -> bool {
        self.target_gpu
            .as_deref()
            .map_or(true, |wanted| gpu.contains(wanted))
    }

    /// Case-sensitive substring check against the CPU filter
    pub fn cpu_matches(&self, cpu: &str) -> bool {
        self.target_cpu
            .as_deref()
            .map_or(true, |wanted| cpu.contains(wanted))
    }

    /// True if the price is at or below the ceiling
    pub fn price_within_budget(&self, price: f64) -> bool {
        price <= self.max_price
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Converts a candidate into a final record, or says why it was rejected
///
/// The GPU, CPU and price predicates are independent, so the order they are
/// checked in only affects which rejection is reported.
///
/// # Arguments
///
/// * `candidate` - The scraped listing
/// * `criteria` - The run's filter criteria
/// * `date` - Capture date stamped on accepted records (the run date)
pub fn normalize_and_filter(
    candidate: CandidateRecord,
    criteria: &FilterCriteria,
    date: NaiveDate,
) -> Result<LaptopRecord, Rejection> {
    if !criteria.gpu_matches(&candidate.gpu) {
        return Err(Rejection::GpuMismatch {
            gpu: candidate.gpu,
            wanted: criteria.target_gpu.clone().unwrap_or_default(),
        });
    }

    if !criteria.cpu_matches(&candidate.cpu) {
        return Err(Rejection::CpuMismatch {
            cpu: candidate.cpu,
            wanted: criteria.target_cpu.clone().unwrap_or_default(),
        });
    }

    let price = parse_price(&candidate.price_text)?;

    if !criteria.price_within_budget(price) {
        return Err(Rejection::OverBudget {
            price,
            max: criteria.max_price,
        });
    }

    Ok(LaptopRecord::from_candidate(candidate, price, date))
}
