//! Domain model for the calendar content file.
use serde::Deserialize;
use shared::{BudgetShare, MonthData, Quarter, Region, SocialPost};
use std::collections::HashMap;

/// Root of the embedded calendar YAML
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarContentFile {
    /// Twelve base months, January first
    pub base_months: Vec<MonthData>,
    /// Per-region overrides; entry `i` applies to base month `i`
    #[serde(default)]
    pub regions: HashMap<Region, Vec<MonthOverride>>,
}

/// Partial month data layered on top of a base month
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonthOverride {
    pub month: Option<String>,
    pub quarter: Option<Quarter>,
    pub season: Option<String>,
    pub activity_level: Option<u8>,
    pub marketing_budget_pct: Option<u32>,
    pub is_critical: Option<bool>,
    pub booking_priority: Option<String>,
    pub key_events: Option<Vec<String>>,
    pub target_audience: Option<Vec<String>>,
    pub content_themes: Option<Vec<String>>,
    pub marketing_actions: Option<Vec<String>>,
    pub social_posts: Option<Vec<SocialPost>>,
    pub email_subject: Option<String>,
    pub email_body: Option<String>,
    pub budget_breakdown: Option<Vec<BudgetShare>>,
    pub critical_notes: Option<Vec<String>>,
    pub pro_tip: Option<String>,
}

impl MonthOverride {
    /// Produce a month where every field set here replaces the base value
    pub fn apply(&self, base: &MonthData) -> MonthData {
        let mut month = base.clone();
        if let Some(value) = &self.month {
            month.month = value.clone();
        }
        if let Some(value) = self.quarter {
            month.quarter = value;
        }
        if let Some(value) = &self.season {
            month.season = value.clone();
        }
        if let Some(value) = self.activity_level {
            month.activity_level = value;
        }
        if let Some(value) = self.marketing_budget_pct {
            month.marketing_budget_pct = value;
        }
        if let Some(value) = self.is_critical {
            month.is_critical = value;
        }
        if let Some(value) = &self.booking_priority {
            month.booking_priority = value.clone();
        }
        if let Some(value) = &self.key_events {
            month.key_events = value.clone();
        }
        if let Some(value) = &self.target_audience {
            month.target_audience = value.clone();
        }
        if let Some(value) = &self.content_themes {
            month.content_themes = value.clone();
        }
        if let Some(value) = &self.marketing_actions {
            month.marketing_actions = value.clone();
        }
        if let Some(value) = &self.social_posts {
            month.social_posts = value.clone();
        }
        if let Some(value) = &self.email_subject {
            month.email_subject = value.clone();
        }
        if let Some(value) = &self.email_body {
            month.email_body = value.clone();
        }
        if let Some(value) = &self.budget_breakdown {
            month.budget_breakdown = value.clone();
        }
        if let Some(value) = &self.critical_notes {
            month.critical_notes = value.clone();
        }
        if let Some(value) = &self.pro_tip {
            month.pro_tip = value.clone();
        }
        month
    }
}

/// Errors raised while loading or querying calendar content
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Calendar data is malformed: {0}")]
    Malformed(#[from] serde_yaml::Error),
    #[error("Calendar data must contain 12 base months, found {0}")]
    WrongMonthCount(usize),
    #[error("Region {region} has {count} overrides but only 12 months exist")]
    TooManyOverrides { region: String, count: usize },
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
    #[error("Month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),
}
