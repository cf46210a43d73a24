use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use log::{info, warn};
use shared::{AnalysisResult, ExportPlanRequest, LeadChannel, Region};

use marketing_calendar::{initialize_backend, AppConfig, DashboardSession};

#[derive(Parser)]
#[command(
    name = "marketing-calendar",
    about = "Revenue by lead source and regional marketing plans for a mobile bar"
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, default_value = "marketing-calendar.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze bookings per lead source
    Analyze {
        /// Booking count for a channel, e.g. `instagram=8`
        #[arg(long = "channel", value_name = "KEY=COUNT")]
        channels: Vec<String>,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print or export a month's marketing plan
    Plan {
        /// Region slug, e.g. `midwest`
        #[arg(long)]
        region: Option<String>,
        /// Month number, 1 = January
        #[arg(long)]
        month: u32,
        #[arg(long = "channel", value_name = "KEY=COUNT")]
        channels: Vec<String>,
        /// Zero-based index of a completed checklist action
        #[arg(long = "done", value_name = "INDEX")]
        done: Vec<usize>,
        /// Write the plan to this directory instead of printing it
        #[arg(long)]
        out: Option<String>,
    },
    /// Show today's dashboard cards
    Today {
        #[arg(long)]
        region: Option<String>,
        #[arg(long = "channel", value_name = "KEY=COUNT")]
        channels: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();
    info!("Starting marketing calendar");

    let mut state = initialize_backend(config)?;
    let session = &mut state.session;

    match cli.command {
        Commands::Analyze { channels, json } => {
            apply_channels(session, &channels)?;
            let results = session.on_calculate_requested()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_analysis(session, &results);
            }
        }
        Commands::Plan {
            region,
            month,
            channels,
            done,
            out,
        } => {
            select_region(session, region.as_deref())?;
            calculate_if_given(session, &channels)?;

            let month_data = session.month(month)?;
            let checklist = checklist_from_indices(&done, month_data.marketing_actions.len());
            match out {
                Some(directory) => {
                    let response = session.export_plan(&ExportPlanRequest {
                        region: session.region(),
                        month,
                        checklist,
                        custom_path: Some(directory),
                    });
                    if !response.success {
                        bail!("Export failed: {}", response.message);
                    }
                    println!("{} ({} pages): {}", response.message, response.page_count, response.file_path);
                }
                None => {
                    let exporter = session.export_service();
                    let doc = exporter.build_plan(
                        &month_data,
                        session.region().label(),
                        &checklist,
                        session.results(),
                        Local::now(),
                    );
                    println!("{}", exporter.render_text(&doc));
                }
            }
        }
        Commands::Today {
            region,
            channels,
            json,
        } => {
            select_region(session, region.as_deref())?;
            calculate_if_given(session, &channels)?;
            print_today(session, json)?;
        }
    }

    Ok(())
}

/// Feed `key=count` arguments through the tracker's input handler
fn apply_channels(session: &mut DashboardSession, channels: &[String]) -> Result<()> {
    for arg in channels {
        let (channel, raw_count) = parse_channel_arg(arg)?;
        session.on_channel_count_changed(channel, raw_count);
    }
    Ok(())
}

/// Split `key=count` into a channel and the raw count text
fn parse_channel_arg(arg: &str) -> Result<(LeadChannel, &str)> {
    let (key, raw_count) = arg
        .split_once('=')
        .with_context(|| format!("Expected KEY=COUNT, got {:?}", arg))?;
    match LeadChannel::from_key(key) {
        Some(channel) => Ok((channel, raw_count)),
        None => {
            let known: Vec<&str> = LeadChannel::ALL.iter().map(|c| c.key()).collect();
            bail!("Unknown channel {:?}; expected one of {}", key, known.join(", "))
        }
    }
}

fn calculate_if_given(session: &mut DashboardSession, channels: &[String]) -> Result<()> {
    if channels.is_empty() {
        return Ok(());
    }
    apply_channels(session, channels)?;
    if let Err(e) = session.on_calculate_requested() {
        warn!("Continuing without tracker results: {}", e);
    }
    Ok(())
}

fn select_region(session: &mut DashboardSession, slug: Option<&str>) -> Result<()> {
    if let Some(slug) = slug {
        session.select_region(slug).with_context(|| {
            let known: Vec<&str> = Region::ALL.iter().map(|r| r.slug()).collect();
            format!("Expected one of {}", known.join(", "))
        })?;
    }
    Ok(())
}

/// Completion flags for a month's actions; indices past the last action are ignored
fn checklist_from_indices(done: &[usize], action_count: usize) -> Vec<bool> {
    let mut checklist = vec![false; action_count];
    for index in done {
        match checklist.get_mut(*index) {
            Some(flag) => *flag = true,
            None => warn!("Ignoring checklist index {}; the month has {} actions", index, action_count),
        }
    }
    checklist
}

fn print_analysis(session: &DashboardSession, results: &AnalysisResult) {
    println!("Total Bookings: {}", results.total_bookings);
    println!("Total Revenue:  {}", session.format_revenue(results.total_revenue));
    println!(
        "Top Channel:    {} ({:.0}%)",
        results.top_channel.name, results.top_channel.percentage
    );
    println!();
    for entry in &results.sorted_channels {
        println!(
            "  {:<18} {:>3}  {:>5.1}%  {:>10}",
            entry.name,
            entry.bookings,
            entry.percentage,
            session.format_revenue(entry.revenue)
        );
    }
    println!();
    println!("💡 {}", results.budget_tip);
}

fn print_today(session: &DashboardSession, json: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let month = session.month(today.month())?;
    let focus = session.current_focus(&month);
    let tip = session.monthly_tip(&month);
    let post = session.what_to_post_today(&month, today);
    let summary = session
        .year_overview(today)
        .into_iter()
        .find(|m| m.is_current_month);

    if json {
        let cards = serde_json::json!({
            "region": session.region(),
            "currentFocus": focus,
            "monthlyTip": tip,
            "whatToPostToday": post,
            "monthSummary": summary,
            "revenue": session.results(),
        });
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    println!("{} {}", session.region().emoji(), session.region().label());
    println!();
    println!("{} {} - {}", focus.emoji, focus.label, focus.month);
    println!("   {}", focus.booking_priority);
    if let Some(summary) = summary {
        println!(
            "   {} {} | Activity {}/5 | Budget {}%",
            summary.quarter, summary.season, summary.activity_level, summary.marketing_budget_pct
        );
    }
    println!();
    println!("Pro tip: {}", tip.tip);
    if let Some(post) = post {
        println!();
        println!("What to post today: {}", post.platform.badge());
        println!("   {}", post.post.text);
        println!("   ({})", post.rationale);
    }
    if let Some(results) = session.results() {
        println!();
        println!(
            "Revenue: {} from {} bookings, top channel {}",
            session.format_revenue(results.total_revenue),
            results.total_bookings,
            results.top_channel.name
        );
        println!("💡 {}", results.budget_tip);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_arg() {
        let (channel, raw_count) = parse_channel_arg("instagram=8").unwrap();
        assert_eq!(channel, LeadChannel::Instagram);
        assert_eq!(raw_count, "8");

        let (channel, raw_count) = parse_channel_arg("DirectWebsite= 12 ").unwrap();
        assert_eq!(channel, LeadChannel::DirectWebsite);
        assert_eq!(raw_count, " 12 ");
    }

    #[test]
    fn test_parse_channel_arg_rejects_bad_input() {
        let missing_equals = parse_channel_arg("instagram8").unwrap_err();
        assert!(missing_equals.to_string().contains("Expected KEY=COUNT"));

        let unknown = parse_channel_arg("myspace=3").unwrap_err();
        assert!(unknown.to_string().contains("Unknown channel"));
        assert!(unknown.to_string().contains("eventAppearances"));
    }

    #[test]
    fn test_checklist_from_indices() {
        assert_eq!(checklist_from_indices(&[0, 2], 4), vec![true, false, true, false]);
        assert_eq!(checklist_from_indices(&[], 2), vec![false, false]);
    }

    #[test]
    fn test_checklist_ignores_out_of_range_indices() {
        let checklist = checklist_from_indices(&[1, usize::MAX, 7], 3);

        assert_eq!(checklist, vec![false, true, false]);
    }
}
