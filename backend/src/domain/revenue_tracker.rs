//! Revenue-by-lead-source domain logic for the marketing calendar.
//!
//! This module contains the tracker's business rules: cleaning the booking
//! counts typed into the form, aggregating them into a ranked per-channel
//! breakdown, and attaching a budget tip. The UI only collects raw text and
//! renders the resulting `AnalysisResult`.
//!
//! ## Business Rules
//!
//! - Every channel count is an integer between 0 and the configured maximum (99)
//! - Non-numeric input counts as 0; out-of-range input is clamped, never rejected
//! - Any change to a count discards previously calculated results
//! - Analysis requires at least one booking
//! - Each booking is worth a fixed amount of revenue (2000 by default)

use log::{debug, info, warn};
use shared::{
    AnalysisResult, ChannelBreakdown, LeadChannel, TrackerConfig, TrackerInputs, TrackerState,
    MAX_BOOKINGS_PER_CHANNEL,
};

use crate::domain::budget_tips;
use crate::domain::models::tracker::TrackerError;

/// Revenue tracker service that owns the tracker's calculation rules
#[derive(Debug, Clone)]
pub struct RevenueTrackerService {
    config: TrackerConfig,
}

impl RevenueTrackerService {
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
        }
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Clean a raw form value into a booking count.
    ///
    /// Reads the leading integer of the input (so `"12 events"` is 12 and
    /// `"3.9"` is 3), treats anything unreadable as 0, then clamps to the
    /// allowed range.
    pub fn parse_booking_count(&self, raw_value: &str) -> u32 {
        let max = i64::from(self.config.max_bookings_per_channel.min(MAX_BOOKINGS_PER_CHANNEL));
        match parse_leading_integer(raw_value) {
            Some(value) => value.clamp(0, max) as u32,
            None => 0,
        }
    }

    /// Record a channel's booking count and invalidate any stale results
    pub fn set_channel_count(
        &self,
        state: &mut TrackerState,
        channel: LeadChannel,
        raw_value: &str,
    ) -> TrackerInputs {
        let count = self.parse_booking_count(raw_value);
        debug!("📊 TRACKER: {} set to {} (raw input {:?})", channel.key(), count, raw_value);

        let mut inputs = *state.inputs();
        *inputs.slot_mut(channel) = count;
        state.replace_inputs(inputs);
        inputs
    }

    /// Aggregate the inputs into a ranked breakdown with a budget tip
    pub fn analyze(&self, inputs: &TrackerInputs) -> Result<AnalysisResult, TrackerError> {
        let total_bookings = inputs.total_bookings();
        if total_bookings == 0 {
            warn!("⚠️ TRACKER: Analysis requested with no bookings entered");
            return Err(TrackerError::EmptyInput);
        }

        let mut sorted_channels: Vec<ChannelBreakdown> = inputs
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(channel, count)| self.breakdown(channel, count, total_bookings))
            .collect();
        // Stable, so equal counts keep display order
        sorted_channels.sort_by(|a, b| b.bookings.cmp(&a.bookings));

        let top_channel = match sorted_channels.first() {
            Some(top) => top.clone(),
            None => return Err(TrackerError::EmptyInput),
        };

        let tip = budget_tips::generate_budget_tip(&top_channel, &sorted_channels);

        info!(
            "✅ TRACKER: {} bookings across {} channels, top channel {} at {:.1}% ({:?})",
            total_bookings,
            sorted_channels.len(),
            top_channel.name,
            top_channel.percentage,
            tip.rule
        );

        Ok(AnalysisResult {
            total_bookings,
            total_revenue: u64::from(total_bookings) * self.config.revenue_per_booking,
            top_channel,
            sorted_channels,
            budget_tip: tip.text,
            tip_rule: tip.rule,
        })
    }

    fn breakdown(&self, channel: LeadChannel, count: u32, total_bookings: u32) -> ChannelBreakdown {
        ChannelBreakdown {
            channel,
            name: channel.display_name().to_string(),
            bookings: count,
            percentage: f64::from(count) / f64::from(total_bookings) * 100.0,
            revenue: u64::from(count) * self.config.revenue_per_booking,
        }
    }

    /// Format revenue with the currency symbol and thousands separators
    pub fn format_revenue(&self, amount: u64) -> String {
        format_currency(&self.config.currency_symbol, amount)
    }

    pub fn get_config(&self) -> &TrackerConfig {
        &self.config
    }
}

impl Default for RevenueTrackerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a whole-unit amount such as `$20,000`
pub fn format_currency(symbol: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{}{}", symbol, grouped)
}

/// Leading-integer parse: optional whitespace and sign, then digits up to the
/// first non-digit. Saturates instead of overflowing.
fn parse_leading_integer(raw_value: &str) -> Option<i64> {
    let trimmed = raw_value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: Vec<i64> = rest
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .map(i64::from)
        .collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .iter()
        .fold(0i64, |acc, digit| acc.saturating_mul(10).saturating_add(*digit));
    Some(if negative { -magnitude } else { magnitude })
}
