//! Month plan export domain logic for the marketing calendar.
//!
//! This module lays out a printable marketing plan for one month: the month's
//! guidance, the action checklist with the user's progress, and the revenue
//! tracker's results when they exist. The plan is wrapped to a fixed page
//! width, split into pages and written to disk as text.

use chrono::{DateTime, Local, NaiveDate};
use log::{error, info};
use shared::{AnalysisResult, ExportPlanRequest, ExportPlanResponse, MonthData};
use std::fs;
use std::path::PathBuf;

use crate::config::ExportConfig;
use crate::domain::calendar_content::CalendarContentService;
use crate::domain::models::plan::{ExportError, PlanBlock, PlanDocument};
use crate::domain::revenue_tracker::format_currency;

const FOOTER_TEXT: &str = "Generated via Mobile Bar Marketing Calendar";
const PAGE_BREAK: &str = "\u{000C}";
const LIST_INDENT: usize = 2;

/// Service that builds and writes month plans
#[derive(Debug, Clone)]
pub struct PlanExportService {
    config: ExportConfig,
    currency_symbol: String,
}

impl PlanExportService {
    pub fn new() -> Self {
        Self::with_config(ExportConfig::default(), "$")
    }

    pub fn with_config(config: ExportConfig, currency_symbol: impl Into<String>) -> Self {
        Self {
            config,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Lay out the plan for a month
    pub fn build_plan(
        &self,
        month: &MonthData,
        region_name: &str,
        checklist: &[bool],
        results: Option<&AnalysisResult>,
        generated_at: DateTime<Local>,
    ) -> PlanDocument {
        let mut doc = PlanDocument::new(format!(
            "{}    {}",
            FOOTER_TEXT,
            generated_at.format("%m/%d/%Y, %I:%M:%S %p")
        ));

        doc.title(format!("{} Marketing Plan", month.month));
        doc.text(format!(
            "Region: {} | Generated: {}",
            region_name,
            generated_at.format("%m/%d/%Y")
        ));
        doc.spacer();
        doc.text(format!("Status: {}", month.booking_priority));
        doc.text(format!(
            "Activity Level: {}/5 | Budget: {}%",
            month.activity_level, month.marketing_budget_pct
        ));
        doc.spacer();

        doc.heading("KEY EVENTS & HOLIDAYS");
        for event in &month.key_events {
            doc.indented(format!("• {}", event), LIST_INDENT);
        }
        doc.spacer();

        doc.heading("TARGET AUDIENCE");
        for audience in &month.target_audience {
            doc.indented(format!("• {}", audience), LIST_INDENT);
        }
        doc.spacer();

        doc.heading("ACTION CHECKLIST");
        let completed = month
            .marketing_actions
            .iter()
            .enumerate()
            .filter(|(index, _)| checklist.get(*index).copied().unwrap_or(false))
            .count();
        doc.text(format!(
            "Progress: {}/{} completed",
            completed,
            month.marketing_actions.len()
        ));
        for (index, action) in month.marketing_actions.iter().enumerate() {
            let mark = if checklist.get(index).copied().unwrap_or(false) { "[x]" } else { "[ ]" };
            doc.indented(format!("{} {}", mark, action), LIST_INDENT);
        }
        doc.spacer();

        doc.heading("SOCIAL POSTS (Ready to Copy)");
        for post in &month.social_posts {
            doc.text(format!("{}:", post.platform));
            doc.indented(format!("\"{}\"", post.text), LIST_INDENT);
        }
        doc.spacer();

        doc.heading("EMAIL TEMPLATE");
        doc.text(format!("Subject: {}", month.email_subject));
        doc.text(month.email_body.clone());
        doc.spacer();

        if let Some(results) = results.filter(|r| r.total_bookings > 0) {
            doc.heading("REVENUE BY LEAD SOURCE");
            doc.text(format!("Total Bookings: {}", results.total_bookings));
            doc.text(format!(
                "Total Revenue: {}",
                format_currency(&self.currency_symbol, results.total_revenue)
            ));
            doc.text(format!(
                "Top Channel: {} ({}%)",
                results.top_channel.name,
                results.top_channel.percentage.round() as i64
            ));
            doc.text(format!("Budget Tip: {}", results.budget_tip));
            doc.spacer();
        }

        doc.heading("BUDGET ALLOCATION");
        for share in &month.budget_breakdown {
            doc.text(format!("{}: {}%", humanize_category(&share.category), share.percent));
        }
        doc.spacer();

        doc.heading("CRITICAL NOTES");
        for note in &month.critical_notes {
            doc.indented(note.clone(), LIST_INDENT);
        }

        doc
    }

    /// Wrap and paginate a plan; the footer closes the last page
    pub fn render_pages(&self, doc: &PlanDocument) -> Vec<String> {
        let mut lines = Vec::new();
        for block in &doc.blocks {
            match block {
                PlanBlock::Title(text) => {
                    let title = text.to_uppercase();
                    let underline = "=".repeat(title.chars().count().min(self.config.page_width));
                    lines.extend(wrap_text(&title, self.config.page_width, 0));
                    lines.push(underline);
                }
                PlanBlock::Heading(text) => {
                    lines.extend(wrap_text(text, self.config.page_width, 0));
                }
                PlanBlock::Text { text, indent } => {
                    lines.extend(wrap_text(text, self.config.page_width, *indent));
                }
                PlanBlock::Spacer => lines.push(String::new()),
            }
        }

        let per_page = self.config.lines_per_page.max(1);
        let mut pages: Vec<Vec<String>> = lines.chunks(per_page).map(|chunk| chunk.to_vec()).collect();

        // Footer needs a blank separator line above it
        let footer = wrap_text(&doc.footer, self.config.page_width, 0);
        match pages.last_mut() {
            Some(last) if last.len() + 1 + footer.len() <= per_page => {
                last.push(String::new());
                last.extend(footer);
            }
            _ => pages.push(footer),
        }

        pages.into_iter().map(|page| page.join("\n")).collect()
    }

    /// Single text document with pages separated by form feeds
    pub fn render_text(&self, doc: &PlanDocument) -> String {
        self.render_pages(doc).join(&format!("\n{}\n", PAGE_BREAK))
    }

    /// Export a month plan to disk, reporting failure in the response
    pub fn export_to_path(
        &self,
        request: &ExportPlanRequest,
        content: &CalendarContentService,
        results: Option<&AnalysisResult>,
    ) -> ExportPlanResponse {
        info!(
            "📁 EXPORT: Exporting {} plan for month {} - custom_path: {:?}",
            request.region.slug(),
            request.month,
            request.custom_path
        );

        let month = match content.month(request.region, request.month) {
            Ok(month) => month,
            Err(e) => {
                error!("❌ EXPORT: {}", e);
                return failed_response(e.to_string());
            }
        };

        let now = Local::now();
        let doc = self.build_plan(&month, request.region.label(), &request.checklist, results, now);
        let pages = self.render_pages(&doc);

        match self.write_plan(request.custom_path.as_deref(), &month, request.region.label(), now.date_naive(), &pages) {
            Ok(path) => {
                let file_path = path.to_string_lossy().to_string();
                info!("✅ EXPORT: Wrote {} pages to {}", pages.len(), file_path);
                ExportPlanResponse {
                    success: true,
                    message: format!("Exported {} marketing plan", month.month),
                    file_path,
                    page_count: pages.len(),
                }
            }
            Err(e) => {
                error!("❌ EXPORT: {}", e);
                failed_response(e.to_string())
            }
        }
    }

    fn write_plan(
        &self,
        custom_path: Option<&str>,
        month: &MonthData,
        region_name: &str,
        date: NaiveDate,
        pages: &[String],
    ) -> Result<PathBuf, ExportError> {
        let export_dir = self.resolve_export_dir(custom_path)?;
        fs::create_dir_all(&export_dir).map_err(|source| ExportError::CreateDirectory {
            path: export_dir.to_string_lossy().to_string(),
            source,
        })?;

        let path = export_dir.join(plan_filename(&month.month, region_name, date));
        let content = pages.join(&format!("\n{}\n", PAGE_BREAK));
        fs::write(&path, content).map_err(|source| ExportError::Write {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        Ok(path)
    }

    /// Requested directory, else configured directory, else Documents, else home
    pub fn resolve_export_dir(&self, custom_path: Option<&str>) -> Result<PathBuf, ExportError> {
        if let Some(custom_path) = custom_path.filter(|p| !p.trim().is_empty()) {
            return Ok(PathBuf::from(sanitize_path(custom_path)));
        }
        if let Some(directory) = &self.config.directory {
            return Ok(directory.clone());
        }
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or(ExportError::NoExportDirectory)
    }

    pub fn get_config(&self) -> &ExportConfig {
        &self.config
    }
}

impl Default for PlanExportService {
    fn default() -> Self {
        Self::new()
    }
}

fn failed_response(message: String) -> ExportPlanResponse {
    ExportPlanResponse {
        success: false,
        message,
        file_path: String::new(),
        page_count: 0,
    }
}

/// Strip surrounding quotes and whitespace pasted along with a path
fn sanitize_path(path: &str) -> String {
    path.trim().trim_matches(|c| c == '"' || c == '\'').trim().to_string()
}

/// `{Month}-{Region}-Marketing-Plan-{YYYY-MM-DD}.txt`, whitespace runs as `-`
pub fn plan_filename(month: &str, region_name: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}-Marketing-Plan-{}.txt",
        dash_whitespace(month),
        dash_whitespace(region_name),
        date.format("%Y-%m-%d")
    )
}

fn dash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join("-")
}

/// `socialAds` -> `Social Ads`
pub fn humanize_category(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (index, c) in key.chars().enumerate() {
        if index == 0 {
            label.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            label.push(' ');
            label.push(c);
        } else {
            label.push(c);
        }
    }
    label
}

/// Greedy word wrap; words longer than a line are split
fn wrap_text(text: &str, width: usize, indent: usize) -> Vec<String> {
    let available = width.saturating_sub(indent).max(1);
    let prefix = " ".repeat(indent);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > available {
                if current_len > 0 {
                    lines.push(format!("{}{}", prefix, current));
                    current.clear();
                    current_len = 0;
                }
                let rest = word.split_off(available);
                lines.push(format!("{}{}", prefix, word.iter().collect::<String>()));
                word = rest;
            }

            let word_len = word.len();
            if word_len == 0 {
                continue;
            }
            if current_len > 0 && current_len + 1 + word_len > available {
                lines.push(format!("{}{}", prefix, current));
                current.clear();
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word_len;
        }

        if current_len > 0 || paragraph.trim().is_empty() {
            lines.push(format!("{}{}", prefix, current).trim_end().to_string());
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::revenue_tracker::RevenueTrackerService;
    use chrono::TimeZone;
    use shared::{LeadChannel, Region, TrackerInputs};
    use tempfile::TempDir;

    fn content() -> CalendarContentService {
        CalendarContentService::load().unwrap()
    }

    fn generated_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
    }

    fn sample_results() -> AnalysisResult {
        let mut inputs = TrackerInputs::default();
        *inputs.slot_mut(LeadChannel::Instagram) = 8;
        *inputs.slot_mut(LeadChannel::Facebook) = 2;
        RevenueTrackerService::new().analyze(&inputs).unwrap()
    }

    fn all_lines(service: &PlanExportService, doc: &PlanDocument) -> Vec<String> {
        service
            .render_pages(doc)
            .iter()
            .flat_map(|page| page.lines().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn test_build_plan_sections() {
        let service = PlanExportService::new();
        let month = content().month(Region::Midwest, 1).unwrap();

        let doc = service.build_plan(&month, "Midwest", &[], None, generated_at());

        assert_eq!(doc.blocks[0], PlanBlock::Title("January Marketing Plan".to_string()));
        for heading in [
            "KEY EVENTS & HOLIDAYS",
            "TARGET AUDIENCE",
            "ACTION CHECKLIST",
            "SOCIAL POSTS (Ready to Copy)",
            "EMAIL TEMPLATE",
            "BUDGET ALLOCATION",
            "CRITICAL NOTES",
        ] {
            assert!(doc.has_heading(heading), "missing {}", heading);
        }
        assert!(!doc.has_heading("REVENUE BY LEAD SOURCE"));
    }

    #[test]
    fn test_build_plan_includes_tracker_results() {
        let service = PlanExportService::new();
        let month = content().month(Region::Midwest, 1).unwrap();
        let results = sample_results();

        let doc = service.build_plan(&month, "Midwest", &[], Some(&results), generated_at());
        let text = service.render_text(&doc);

        assert!(doc.has_heading("REVENUE BY LEAD SOURCE"));
        assert!(text.contains("Total Bookings: 10"));
        assert!(text.contains("Total Revenue: $20,000"));
        assert!(text.contains("Top Channel: Instagram (80%)"));
    }

    #[test]
    fn test_checklist_progress() {
        let service = PlanExportService::new();
        let month = content().month(Region::Midwest, 1).unwrap();
        let checklist = [true, false, true];

        let doc = service.build_plan(&month, "Midwest", &checklist, None, generated_at());
        let lines = all_lines(&service, &doc);

        assert!(lines.contains(&"Progress: 2/5 completed".to_string()));
        assert!(lines.contains(&"  [x] Launch wedding booking campaign for spring/summer".to_string()));
        assert!(lines.contains(&"  [ ] Email corporate event planners (Q1 budgets)".to_string()));
        assert!(lines.contains(&"  [ ] Create new year resolution content".to_string()));
    }

    #[test]
    fn test_header_and_budget_labels() {
        let service = PlanExportService::new();
        let month = content().month(Region::Midwest, 1).unwrap();

        let doc = service.build_plan(&month, "Midwest", &[], None, generated_at());
        let lines = all_lines(&service, &doc);

        assert_eq!(lines[0], "JANUARY MARKETING PLAN");
        assert!(lines.contains(&"Region: Midwest | Generated: 01/15/2025".to_string()));
        assert!(lines.contains(&"Activity Level: 2/5 | Budget: 14%".to_string()));
        assert!(lines.contains(&"Social Ads: 40%".to_string()));
        assert!(lines.contains(&"Email Marketing: 20%".to_string()));
    }

    #[test]
    fn test_render_pages_respects_page_size() {
        let service = PlanExportService::with_config(
            ExportConfig {
                directory: None,
                page_width: 40,
                lines_per_page: 20,
            },
            "$",
        );
        let month = content().month(Region::South, 1).unwrap();
        let doc = service.build_plan(&month, "South", &[], Some(&sample_results()), generated_at());

        let pages = service.render_pages(&doc);

        assert!(pages.len() > 1);
        for page in &pages {
            assert!(page.lines().count() <= 20);
            for line in page.lines() {
                assert!(line.chars().count() <= 40, "line too long: {:?}", line);
            }
        }
        assert!(pages.last().unwrap().contains("Generated via Mobile Bar Marketing"));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7, 0), vec!["one two", "three"]);
        assert_eq!(wrap_text("abcdefghij", 4, 0), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("a b", 10, 2), vec!["  a b"]);
        assert_eq!(wrap_text("first\n\nsecond", 20, 0), vec!["first", "", "second"]);
    }

    #[test]
    fn test_humanize_category() {
        assert_eq!(humanize_category("socialAds"), "Social Ads");
        assert_eq!(humanize_category("emailMarketing"), "Email Marketing");
        assert_eq!(humanize_category("bridalShows"), "Bridal Shows");
        assert_eq!(humanize_category("other"), "Other");
    }

    #[test]
    fn test_plan_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();

        assert_eq!(
            plan_filename("January", "Pacific Northwest", date),
            "January-Pacific-Northwest-Marketing-Plan-2025-03-09.txt"
        );
    }

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("  \"/tmp/plans\"  "), "/tmp/plans");
        assert_eq!(sanitize_path("'/tmp/my plans'"), "/tmp/my plans");
    }

    #[test]
    fn test_resolve_export_dir_prefers_request_then_config() {
        let configured = PathBuf::from("/configured/plans");
        let service = PlanExportService::with_config(
            ExportConfig {
                directory: Some(configured.clone()),
                ..ExportConfig::default()
            },
            "$",
        );

        assert_eq!(service.resolve_export_dir(Some("/requested")).unwrap(), PathBuf::from("/requested"));
        assert_eq!(service.resolve_export_dir(Some("   ")).unwrap(), configured);
        assert_eq!(service.resolve_export_dir(None).unwrap(), configured);
    }

    #[test]
    fn test_export_to_path_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let service = PlanExportService::new();
        let request = ExportPlanRequest {
            region: Region::Southwest,
            month: 1,
            checklist: vec![true],
            custom_path: Some(temp_dir.path().join("plans").to_string_lossy().to_string()),
        };
        let results = sample_results();

        let response = service.export_to_path(&request, &content(), Some(&results));

        assert!(response.success, "{}", response.message);
        assert!(response.page_count >= 1);
        let written = fs::read_to_string(&response.file_path).unwrap();
        assert!(written.starts_with("JANUARY MARKETING PLAN"));
        assert!(written.contains("Your Southwest Wedding Deserves a Stunning Mobile Bar"));
        assert!(written.contains("Total Revenue: $20,000"));
        assert!(response.file_path.contains("January-Southwest-Marketing-Plan-"));
    }

    #[test]
    fn test_export_to_path_rejects_bad_month() {
        let temp_dir = TempDir::new().unwrap();
        let service = PlanExportService::new();
        let request = ExportPlanRequest {
            region: Region::Midwest,
            month: 13,
            checklist: Vec::new(),
            custom_path: Some(temp_dir.path().to_string_lossy().to_string()),
        };

        let response = service.export_to_path(&request, &content(), None);

        assert!(!response.success);
        assert!(response.message.contains("between 1 and 12"));
        assert!(response.file_path.is_empty());
    }
}
