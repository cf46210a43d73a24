//! Dashboard card logic for the marketing calendar.
//!
//! Builds the view-models behind the dashboard cards from a month's content
//! and, where a card reacts to it, the revenue tracker's latest results. The
//! clock is always passed in so the cards can be rendered for any date.

use chrono::{Datelike, NaiveDate, Weekday};
use log::debug;
use shared::{
    AnalysisResult, CurrentFocusCard, FocusStatus, MonthData, MonthSummary, MonthlyTipCard,
    PostPlatform, PostSuggestion,
};

use crate::domain::calendar_content::month_name;

/// Budget percent that fills the month card's budget bar
const BUDGET_BAR_FULL_PCT: f64 = 15.0;

/// Service that derives dashboard cards
#[derive(Debug, Clone, Default)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Critical months first, then busy months (activity above 3)
    pub fn focus_status(&self, month: &MonthData) -> FocusStatus {
        if month.is_critical {
            FocusStatus::Critical
        } else if month.activity_level > 3 {
            FocusStatus::Focus
        } else {
            FocusStatus::Maintain
        }
    }

    pub fn current_focus(&self, month: &MonthData) -> CurrentFocusCard {
        let status = self.focus_status(month);
        CurrentFocusCard {
            month: month.month.clone(),
            booking_priority: month.booking_priority.clone(),
            status,
            emoji: status.emoji().to_string(),
            label: status.label().to_string(),
        }
    }

    pub fn monthly_tip(&self, month: &MonthData) -> MonthlyTipCard {
        MonthlyTipCard {
            month: month.month.clone(),
            tip: month.pro_tip.clone(),
        }
    }

    /// Platform to post on today.
    ///
    /// Monday and Thursday have fixed picks; on other days the tracker's top
    /// channel decides, defaulting to Instagram.
    pub fn suggested_platform(&self, weekday: Weekday, results: Option<&AnalysisResult>) -> PostPlatform {
        match weekday {
            Weekday::Mon => return PostPlatform::Instagram,
            Weekday::Thu => return PostPlatform::LinkedIn,
            _ => {}
        }

        let top_channel = results.map(|r| r.top_channel.name.to_lowercase());
        match top_channel.as_deref() {
            Some(name) if name.contains("instagram") => PostPlatform::Instagram,
            Some(name) if name.contains("linkedin") => PostPlatform::LinkedIn,
            Some(name) if name.contains("tiktok") => PostPlatform::TikTok,
            _ => PostPlatform::Instagram,
        }
    }

    /// Post to publish today, or `None` when the month has no post templates
    pub fn what_to_post_today(
        &self,
        month: &MonthData,
        today: NaiveDate,
        results: Option<&AnalysisResult>,
    ) -> Option<PostSuggestion> {
        let weekday = today.weekday();
        let platform = self.suggested_platform(weekday, results);
        let post = month
            .social_posts
            .iter()
            .find(|post| post.platform == platform.name())
            .or_else(|| month.social_posts.first())?;

        debug!("📝 DASHBOARD: Suggesting {} post for {}", platform.name(), weekday_name(weekday));
        Some(PostSuggestion {
            platform,
            post: post.clone(),
            rationale: format!("{} has high engagement on this platform", weekday_name(weekday)),
        })
    }

    pub fn month_summary(&self, month: &MonthData, today: NaiveDate) -> MonthSummary {
        let fill = f64::from(month.marketing_budget_pct) / BUDGET_BAR_FULL_PCT * 100.0;
        MonthSummary {
            month: month.month.clone(),
            quarter: month.quarter,
            season: month.season.clone(),
            activity_level: month.activity_level,
            marketing_budget_pct: month.marketing_budget_pct,
            budget_bar_fill: fill.min(100.0),
            is_critical: month.is_critical,
            is_current_month: month_name(today.month()) == month.month,
            booking_priority: month.booking_priority.clone(),
        }
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
