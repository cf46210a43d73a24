use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketing lead source a booking is attributed to.
///
/// The variant order is the order channels are shown in the tracker form and
/// the order used to break ties when ranking channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadChannel {
    Instagram,
    Facebook,
    Tiktok,
    Google,
    Referrals,
    DirectWebsite,
    Linkedin,
    EventAppearances,
    Other,
}

impl LeadChannel {
    /// All channels in display order
    pub const ALL: [LeadChannel; 9] = [
        LeadChannel::Instagram,
        LeadChannel::Facebook,
        LeadChannel::Tiktok,
        LeadChannel::Google,
        LeadChannel::Referrals,
        LeadChannel::DirectWebsite,
        LeadChannel::Linkedin,
        LeadChannel::EventAppearances,
        LeadChannel::Other,
    ];

    /// Stable key used in forms and serialized state
    pub fn key(&self) -> &'static str {
        match self {
            LeadChannel::Instagram => "instagram",
            LeadChannel::Facebook => "facebook",
            LeadChannel::Tiktok => "tiktok",
            LeadChannel::Google => "google",
            LeadChannel::Referrals => "referrals",
            LeadChannel::DirectWebsite => "directWebsite",
            LeadChannel::Linkedin => "linkedin",
            LeadChannel::EventAppearances => "eventAppearances",
            LeadChannel::Other => "other",
        }
    }

    /// Human-readable channel name
    pub fn display_name(&self) -> &'static str {
        match self {
            LeadChannel::Instagram => "Instagram",
            LeadChannel::Facebook => "Facebook",
            LeadChannel::Tiktok => "TikTok",
            LeadChannel::Google => "Google (Ads/SEO)",
            LeadChannel::Referrals => "Referrals",
            LeadChannel::DirectWebsite => "Direct Website",
            LeadChannel::Linkedin => "LinkedIn",
            LeadChannel::EventAppearances => "Event Apps",
            LeadChannel::Other => "Other",
        }
    }

    /// Look up a channel by its key (case-insensitive)
    pub fn from_key(key: &str) -> Option<LeadChannel> {
        let key = key.trim();
        LeadChannel::ALL
            .iter()
            .copied()
            .find(|channel| channel.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for LeadChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Booking counts per lead channel. Every channel always has a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerInputs {
    #[serde(default)]
    pub instagram: u32,
    #[serde(default)]
    pub facebook: u32,
    #[serde(default)]
    pub tiktok: u32,
    #[serde(default)]
    pub google: u32,
    #[serde(default)]
    pub referrals: u32,
    #[serde(default)]
    pub direct_website: u32,
    #[serde(default)]
    pub linkedin: u32,
    #[serde(default)]
    pub event_appearances: u32,
    #[serde(default)]
    pub other: u32,
}

impl TrackerInputs {
    /// Booking count recorded for a channel
    pub fn get(&self, channel: LeadChannel) -> u32 {
        match channel {
            LeadChannel::Instagram => self.instagram,
            LeadChannel::Facebook => self.facebook,
            LeadChannel::Tiktok => self.tiktok,
            LeadChannel::Google => self.google,
            LeadChannel::Referrals => self.referrals,
            LeadChannel::DirectWebsite => self.direct_website,
            LeadChannel::Linkedin => self.linkedin,
            LeadChannel::EventAppearances => self.event_appearances,
            LeadChannel::Other => self.other,
        }
    }

    /// Mutable slot for a channel's booking count
    pub fn slot_mut(&mut self, channel: LeadChannel) -> &mut u32 {
        match channel {
            LeadChannel::Instagram => &mut self.instagram,
            LeadChannel::Facebook => &mut self.facebook,
            LeadChannel::Tiktok => &mut self.tiktok,
            LeadChannel::Google => &mut self.google,
            LeadChannel::Referrals => &mut self.referrals,
            LeadChannel::DirectWebsite => &mut self.direct_website,
            LeadChannel::Linkedin => &mut self.linkedin,
            LeadChannel::EventAppearances => &mut self.event_appearances,
            LeadChannel::Other => &mut self.other,
        }
    }

    /// Channels paired with their counts, in display order
    pub fn iter(&self) -> impl Iterator<Item = (LeadChannel, u32)> + '_ {
        LeadChannel::ALL.iter().map(move |channel| (*channel, self.get(*channel)))
    }

    /// Sum of bookings across all channels, saturating at `u32::MAX`
    pub fn total_bookings(&self) -> u32 {
        self.iter().fold(0u32, |total, (_, count)| total.saturating_add(count))
    }
}

/// Per-channel slice of an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelBreakdown {
    #[serde(rename = "id")]
    pub channel: LeadChannel,
    pub name: String,
    pub bookings: u32,
    /// Share of total bookings, 0-100, full precision
    pub percentage: f64,
    pub revenue: u64,
}

/// Which budget heuristic produced a tip, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetRule {
    /// Top channel holds more than half of all bookings
    Dominant,
    /// Top channel holds 40-50% of bookings
    Strong,
    /// Referrals are above 20% and ranked in the top three
    ReferralsTopThree,
    /// Top three channels hold 80% or more
    TopThreeConcentration,
    /// No channel reaches 30% but the top three hold 60% or more
    Diversified,
    /// TikTok produces bookings without being the top channel
    TiktokUnderutilized,
    /// Nothing else matched
    BalancedMix,
}

/// Output of a tracker calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_bookings: u32,
    pub total_revenue: u64,
    pub top_channel: ChannelBreakdown,
    /// Channels with bookings, highest count first
    pub sorted_channels: Vec<ChannelBreakdown>,
    pub budget_tip: String,
    pub tip_rule: BudgetRule,
}

/// Revenue tracker state held by a dashboard session.
///
/// Inputs and results live together so that any write to the inputs drops
/// the results computed from the old values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    inputs: TrackerInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    results: Option<AnalysisResult>,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &TrackerInputs {
        &self.inputs
    }

    pub fn results(&self) -> Option<&AnalysisResult> {
        self.results.as_ref()
    }

    /// Replace the inputs; previously calculated results are always discarded
    pub fn replace_inputs(&mut self, inputs: TrackerInputs) {
        self.inputs = inputs;
        self.results = None;
    }

    /// Store the result of a successful calculation
    pub fn store_results(&mut self, results: AnalysisResult) {
        self.results = Some(results);
    }

    pub fn is_calculated(&self) -> bool {
        self.results.is_some()
    }
}

/// Upper bound of the booking count any channel can hold
pub const MAX_BOOKINGS_PER_CHANNEL: u32 = 99;

/// Revenue tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Revenue attributed to each booking, in whole currency units
    pub revenue_per_booking: u64,
    /// Largest booking count accepted for a single channel, at most
    /// `MAX_BOOKINGS_PER_CHANNEL`
    pub max_bookings_per_channel: u32,
    pub currency_symbol: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            revenue_per_booking: 2000,
            max_bookings_per_channel: MAX_BOOKINGS_PER_CHANNEL,
            currency_symbol: "$".to_string(),
        }
    }
}

/// Geographic market the calendar content is tailored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Midwest,
    Southwest,
    South,
    Northeast,
    PacificNw,
    California,
    Colorado,
}

impl Region {
    /// Regions in selector order
    pub const ALL: [Region; 7] = [
        Region::Midwest,
        Region::Southwest,
        Region::South,
        Region::Northeast,
        Region::PacificNw,
        Region::California,
        Region::Colorado,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Region::Midwest => "midwest",
            Region::Southwest => "southwest",
            Region::South => "south",
            Region::Northeast => "northeast",
            Region::PacificNw => "pacific-nw",
            Region::California => "california",
            Region::Colorado => "colorado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::Midwest => "Midwest",
            Region::Southwest => "Southwest",
            Region::South => "South",
            Region::Northeast => "Northeast",
            Region::PacificNw => "Pacific Northwest",
            Region::California => "California",
            Region::Colorado => "Colorado",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Region::Midwest => "🌾",
            Region::Southwest => "🌞",
            Region::South => "🏖️",
            Region::Northeast => "🏙️",
            Region::PacificNw => "🏔️",
            Region::California => "☀️",
            Region::Colorado => "⛰️",
        }
    }

    /// Parse a selector value such as `pacific-nw`
    pub fn from_slug(slug: &str) -> Option<Region> {
        let slug = slug.trim();
        Region::ALL
            .iter()
            .copied()
            .find(|region| region.slug().eq_ignore_ascii_case(slug))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Entry in the region selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionOption {
    pub value: Region,
    pub label: String,
    pub emoji: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        };
        write!(f, "{}", label)
    }
}

/// Ready-to-copy social media post template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform: String,
    pub text: String,
}

/// Share of the month's marketing budget for one spending category.
/// `category` is a camelCase key such as `socialAds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetShare {
    pub category: String,
    pub percent: u32,
}

/// Marketing guidance for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthData {
    pub month: String,
    pub quarter: Quarter,
    pub season: String,
    /// How busy the month usually is, 1 (slow) to 5 (peak)
    pub activity_level: u8,
    /// Recommended share of the annual marketing budget
    pub marketing_budget_pct: u32,
    #[serde(default)]
    pub is_critical: bool,
    pub booking_priority: String,
    pub key_events: Vec<String>,
    pub target_audience: Vec<String>,
    pub content_themes: Vec<String>,
    pub marketing_actions: Vec<String>,
    pub social_posts: Vec<SocialPost>,
    pub email_subject: String,
    pub email_body: String,
    pub budget_breakdown: Vec<BudgetShare>,
    pub critical_notes: Vec<String>,
    pub pro_tip: String,
}

/// Twelve months of guidance for a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalCalendar {
    pub region: Region,
    pub region_name: String,
    pub months: Vec<MonthData>,
}

/// Status shown on the current focus card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusStatus {
    Critical,
    Focus,
    Maintain,
}

impl FocusStatus {
    pub fn emoji(&self) -> &'static str {
        match self {
            FocusStatus::Critical => "🎯",
            FocusStatus::Focus => "⭐",
            FocusStatus::Maintain => "✅",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FocusStatus::Critical => "CRITICAL",
            FocusStatus::Focus => "FOCUS",
            FocusStatus::Maintain => "MAINTAIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentFocusCard {
    pub month: String,
    pub booking_priority: String,
    pub status: FocusStatus,
    pub emoji: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTipCard {
    pub month: String,
    pub tip: String,
}

/// Platforms the "what to post today" card can recommend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostPlatform {
    Instagram,
    TikTok,
    LinkedIn,
}

impl PostPlatform {
    pub fn name(&self) -> &'static str {
        match self {
            PostPlatform::Instagram => "Instagram",
            PostPlatform::TikTok => "TikTok",
            PostPlatform::LinkedIn => "LinkedIn",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            PostPlatform::Instagram => "📱 Instagram",
            PostPlatform::TikTok => "🎬 TikTok",
            PostPlatform::LinkedIn => "💼 LinkedIn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSuggestion {
    pub platform: PostPlatform,
    pub post: SocialPost,
    /// Why this platform was picked today
    pub rationale: String,
}

/// Compact month card for the calendar grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: String,
    pub quarter: Quarter,
    pub season: String,
    pub activity_level: u8,
    pub marketing_budget_pct: u32,
    /// Width of the budget bar, 0-100
    pub budget_bar_fill: f64,
    pub is_critical: bool,
    pub is_current_month: bool,
    pub booking_priority: String,
}

/// Request to export a month plan to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPlanRequest {
    pub region: Region,
    /// Month number, 1-12
    pub month: u32,
    /// Completion flag per marketing action, by index
    #[serde(default)]
    pub checklist: Vec<bool>,
    /// Target directory; the configured or default location is used when absent
    #[serde(default)]
    pub custom_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPlanResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub page_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_keys_round_trip() {
        for channel in LeadChannel::ALL {
            assert_eq!(LeadChannel::from_key(channel.key()), Some(channel));
        }
        assert_eq!(LeadChannel::from_key("DIRECTWEBSITE"), Some(LeadChannel::DirectWebsite));
        assert_eq!(LeadChannel::from_key("myspace"), None);
    }

    #[test]
    fn test_channel_serializes_as_key() {
        let json = serde_json::to_string(&LeadChannel::EventAppearances).unwrap();
        assert_eq!(json, "\"eventAppearances\"");
    }

    #[test]
    fn test_tracker_inputs_default_has_every_channel() {
        let inputs = TrackerInputs::default();
        assert_eq!(inputs.iter().count(), 9);
        assert_eq!(inputs.total_bookings(), 0);

        let json = serde_json::to_value(inputs).unwrap();
        assert_eq!(json["directWebsite"], 0);
        assert_eq!(json["eventAppearances"], 0);
    }

    #[test]
    fn test_tracker_inputs_slot_mut() {
        let mut inputs = TrackerInputs::default();
        *inputs.slot_mut(LeadChannel::Referrals) = 4;
        *inputs.slot_mut(LeadChannel::Other) = 2;

        assert_eq!(inputs.get(LeadChannel::Referrals), 4);
        assert_eq!(inputs.referrals, 4);
        assert_eq!(inputs.total_bookings(), 6);
    }

    #[test]
    fn test_total_bookings_saturates() {
        let mut inputs = TrackerInputs::default();
        for channel in LeadChannel::ALL {
            *inputs.slot_mut(channel) = u32::MAX;
        }

        assert_eq!(inputs.total_bookings(), u32::MAX);
    }

    #[test]
    fn test_tracker_state_replacing_inputs_drops_results() {
        let mut state = TrackerState::new();
        let breakdown = ChannelBreakdown {
            channel: LeadChannel::Instagram,
            name: "Instagram".to_string(),
            bookings: 1,
            percentage: 100.0,
            revenue: 2000,
        };
        state.store_results(AnalysisResult {
            total_bookings: 1,
            total_revenue: 2000,
            top_channel: breakdown.clone(),
            sorted_channels: vec![breakdown],
            budget_tip: "tip".to_string(),
            tip_rule: BudgetRule::Dominant,
        });
        assert!(state.is_calculated());

        let inputs = *state.inputs();
        state.replace_inputs(inputs);
        assert!(!state.is_calculated());
        assert!(state.results().is_none());
    }

    #[test]
    fn test_region_slugs() {
        assert_eq!(Region::from_slug("pacific-nw"), Some(Region::PacificNw));
        assert_eq!(Region::from_slug(" Midwest "), Some(Region::Midwest));
        assert_eq!(Region::from_slug("atlantis"), None);

        let json = serde_json::to_string(&Region::PacificNw).unwrap();
        assert_eq!(json, "\"pacific-nw\"");
    }

    #[test]
    fn test_focus_status_labels() {
        assert_eq!(FocusStatus::Critical.label(), "CRITICAL");
        assert_eq!(FocusStatus::Focus.emoji(), "⭐");
        assert_eq!(FocusStatus::Maintain.label(), "MAINTAIN");
    }
}
