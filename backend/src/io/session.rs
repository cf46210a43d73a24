//! Dashboard session.
//!
//! A session owns the revenue tracker state for one user and the services
//! that read it. The `on_*` handlers are what a UI calls when a form value
//! changes or a button is pressed; everything else is read-only access for
//! rendering the dashboard cards and exporting plans.

use chrono::NaiveDate;
use log::{info, warn};
use shared::{
    AnalysisResult, CurrentFocusCard, ExportPlanRequest, ExportPlanResponse, LeadChannel,
    MonthData, MonthSummary, MonthlyTipCard, PostSuggestion, Region, TrackerInputs, TrackerState,
};

use crate::config::AppConfig;
use crate::domain::{
    CalendarContentService, ContentError, DashboardService, PlanExportService,
    RevenueTrackerService, TrackerError,
};

pub struct DashboardSession {
    state: TrackerState,
    region: Region,
    error_message: Option<String>,
    tracker_service: RevenueTrackerService,
    content_service: CalendarContentService,
    dashboard_service: DashboardService,
    export_service: PlanExportService,
}

impl DashboardSession {
    /// Start a session with empty tracker inputs
    pub fn new(config: &AppConfig, content_service: CalendarContentService) -> Self {
        Self {
            state: TrackerState::new(),
            region: config.default_region,
            error_message: None,
            tracker_service: RevenueTrackerService::with_config(config.tracker.clone()),
            content_service,
            dashboard_service: DashboardService::new(),
            export_service: PlanExportService::with_config(
                config.export.clone(),
                config.tracker.currency_symbol.clone(),
            ),
        }
    }

    /// A channel's input field changed
    pub fn on_channel_count_changed(&mut self, channel: LeadChannel, raw_value: &str) -> TrackerInputs {
        self.tracker_service.set_channel_count(&mut self.state, channel, raw_value)
    }

    /// The "Calculate" button was pressed
    pub fn on_calculate_requested(&mut self) -> Result<AnalysisResult, TrackerError> {
        match self.tracker_service.analyze(self.state.inputs()) {
            Ok(results) => {
                info!(
                    "📊 TRACKER: {} bookings analyzed, top channel {}",
                    results.total_bookings,
                    results.top_channel.channel.key()
                );
                self.error_message = None;
                self.state.store_results(results.clone());
                Ok(results)
            }
            Err(e) => {
                warn!("📊 TRACKER: Calculation rejected: {}", e);
                self.error_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn inputs(&self) -> &TrackerInputs {
        self.state.inputs()
    }

    pub fn results(&self) -> Option<&AnalysisResult> {
        self.state.results()
    }

    /// Message to show next to the calculate button, if the last attempt failed
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Switch region by its selector value, e.g. `pacific-nw`
    pub fn select_region(&mut self, slug: &str) -> Result<Region, ContentError> {
        let region = self.content_service.parse_region(slug)?;
        self.set_region(region);
        Ok(region)
    }

    pub fn set_region(&mut self, region: Region) {
        info!("🗓️ CONTENT: Region changed to {}", region.slug());
        self.region = region;
    }

    pub fn format_revenue(&self, amount: u64) -> String {
        self.tracker_service.format_revenue(amount)
    }

    /// Guidance for a month (1 = January) in the session's region
    pub fn month(&self, month: u32) -> Result<MonthData, ContentError> {
        self.content_service.month(self.region, month)
    }

    pub fn current_focus(&self, month: &MonthData) -> CurrentFocusCard {
        self.dashboard_service.current_focus(month)
    }

    pub fn monthly_tip(&self, month: &MonthData) -> MonthlyTipCard {
        self.dashboard_service.monthly_tip(month)
    }

    pub fn what_to_post_today(&self, month: &MonthData, today: NaiveDate) -> Option<PostSuggestion> {
        self.dashboard_service
            .what_to_post_today(month, today, self.state.results())
    }

    /// Summary cards for all twelve months of the session's region
    pub fn year_overview(&self, today: NaiveDate) -> Vec<MonthSummary> {
        self.content_service
            .calendar_for(self.region)
            .months
            .iter()
            .map(|month| self.dashboard_service.month_summary(month, today))
            .collect()
    }

    /// Export a month plan including the latest tracker results
    pub fn export_plan(&self, request: &ExportPlanRequest) -> ExportPlanResponse {
        self.export_service
            .export_to_path(request, &self.content_service, self.state.results())
    }

    pub fn export_service(&self) -> &PlanExportService {
        &self.export_service
    }
}
