//! Calendar content domain logic for the marketing calendar.
//!
//! The month-by-month guidance ships inside the binary as YAML. Every region
//! starts from the same twelve base months; a region may override any field
//! of any month, and the override wins field by field.

use log::{debug, info};
use shared::{MonthData, Region, RegionOption, RegionalCalendar};

use crate::domain::models::content::{CalendarContentFile, ContentError};

const CALENDAR_YAML: &str = include_str!("../../data/calendar.yaml");

/// Service that serves regional calendar content
#[derive(Debug, Clone)]
pub struct CalendarContentService {
    content: CalendarContentFile,
}

impl CalendarContentService {
    /// Load the embedded calendar content
    pub fn load() -> Result<Self, ContentError> {
        Self::from_yaml(CALENDAR_YAML)
    }

    /// Load calendar content from a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, ContentError> {
        let content: CalendarContentFile = serde_yaml::from_str(yaml)?;

        if content.base_months.len() != 12 {
            return Err(ContentError::WrongMonthCount(content.base_months.len()));
        }
        for (region, overrides) in &content.regions {
            if overrides.len() > 12 {
                return Err(ContentError::TooManyOverrides {
                    region: region.slug().to_string(),
                    count: overrides.len(),
                });
            }
        }

        info!(
            "🗓️ CONTENT: Loaded {} base months with overrides for {} regions",
            content.base_months.len(),
            content.regions.len()
        );
        Ok(Self { content })
    }

    /// Full twelve-month calendar for a region with its overrides applied
    pub fn calendar_for(&self, region: Region) -> RegionalCalendar {
        let overrides = self.content.regions.get(&region);
        let months = self
            .content
            .base_months
            .iter()
            .enumerate()
            .map(|(index, base)| match overrides.and_then(|o| o.get(index)) {
                Some(month_override) => month_override.apply(base),
                None => base.clone(),
            })
            .collect();

        RegionalCalendar {
            region,
            region_name: region.label().to_string(),
            months,
        }
    }

    /// Guidance for a single month (1 = January)
    pub fn month(&self, region: Region, month: u32) -> Result<MonthData, ContentError> {
        if !(1..=12).contains(&month) {
            return Err(ContentError::MonthOutOfRange(month));
        }
        let index = (month - 1) as usize;
        debug!("🗓️ CONTENT: Month {} requested for {}", month, region.slug());

        let base = &self.content.base_months[index];
        let month_data = match self.content.regions.get(&region).and_then(|o| o.get(index)) {
            Some(month_override) => month_override.apply(base),
            None => base.clone(),
        };
        Ok(month_data)
    }

    /// Parse a region selector value
    pub fn parse_region(&self, slug: &str) -> Result<Region, ContentError> {
        Region::from_slug(slug).ok_or_else(|| ContentError::UnknownRegion(slug.to_string()))
    }

    /// Options for the region selector, in display order
    pub fn region_options(&self) -> Vec<RegionOption> {
        Region::ALL
            .iter()
            .map(|region| RegionOption {
                value: *region,
                label: region.label().to_string(),
                emoji: region.emoji().to_string(),
            })
            .collect()
    }
}

/// Human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}
