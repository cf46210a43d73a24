//! # Domain Module
//!
//! This module contains the business logic of the marketing calendar. Each
//! service owns one concern and is free of I/O except where the concern is
//! I/O itself (plan export).
//!
//! ## Services
//!
//! - **revenue_tracker**: clamps booking counts and turns them into a ranked
//!   revenue breakdown
//! - **budget_tips**: picks the budget recommendation for a breakdown
//! - **calendar_content**: regional month-by-month guidance
//! - **dashboard**: card view-models for the current day and month
//! - **plan_export**: printable month plans written to disk
//!
//! ## Usage
//!
//! ```rust,ignore
//! use marketing_calendar::domain::RevenueTrackerService;
//!
//! let tracker = RevenueTrackerService::new();
//! let results = tracker.analyze(&inputs)?;
//! println!("{}", results.budget_tip);
//! ```

pub mod budget_tips;
pub mod calendar_content;
pub mod dashboard;
pub mod models;
pub mod plan_export;
pub mod revenue_tracker;

pub use budget_tips::{generate_budget_tip, BudgetTip};
pub use calendar_content::CalendarContentService;
pub use dashboard::DashboardService;
pub use models::content::ContentError;
pub use models::plan::ExportError;
pub use models::tracker::TrackerError;
pub use plan_export::PlanExportService;
pub use revenue_tracker::RevenueTrackerService;
