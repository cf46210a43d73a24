//! Budget tip rules for the revenue tracker.
//!
//! Rules are checked in `RULE_ORDER` and the first one whose condition holds
//! writes the tip. Several conditions overlap (a 45% channel can also be part
//! of a top three above 80%), so the order decides which tip a given booking
//! mix gets and must not be rearranged.
//!
//! Percentages are rounded only when written into the tip text.

use shared::{BudgetRule, ChannelBreakdown, LeadChannel};

/// Evaluation order of the budget rules; first match wins
pub const RULE_ORDER: [BudgetRule; 7] = [
    BudgetRule::Dominant,
    BudgetRule::Strong,
    BudgetRule::ReferralsTopThree,
    BudgetRule::TopThreeConcentration,
    BudgetRule::Diversified,
    BudgetRule::TiktokUnderutilized,
    BudgetRule::BalancedMix,
];

/// Generated budget tip and the rule that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTip {
    pub rule: BudgetRule,
    pub text: String,
}

/// Figures the rules are evaluated against
struct TipContext<'a> {
    top: &'a ChannelBreakdown,
    sorted: &'a [ChannelBreakdown],
    top_three: &'a [ChannelBreakdown],
    top_three_share: f64,
}

impl<'a> TipContext<'a> {
    fn new(top: &'a ChannelBreakdown, sorted: &'a [ChannelBreakdown]) -> Self {
        let top_three = &sorted[..sorted.len().min(3)];
        let top_three_share = top_three.iter().map(|c| c.percentage).sum();
        Self {
            top,
            sorted,
            top_three,
            top_three_share,
        }
    }

    /// Position (0-based) and breakdown of a channel that has bookings
    fn find(&self, channel: LeadChannel) -> Option<(usize, &'a ChannelBreakdown)> {
        self.sorted
            .iter()
            .enumerate()
            .find(|(_, breakdown)| breakdown.channel == channel)
    }

    /// First channel, in display order, without any bookings
    fn first_untapped(&self) -> Option<LeadChannel> {
        LeadChannel::ALL
            .iter()
            .copied()
            .find(|channel| self.find(*channel).map_or(true, |(_, c)| c.bookings == 0))
    }
}

/// Pick the budget tip for an analysis
pub fn generate_budget_tip(top: &ChannelBreakdown, sorted: &[ChannelBreakdown]) -> BudgetTip {
    let context = TipContext::new(top, sorted);
    let rule = RULE_ORDER
        .iter()
        .copied()
        .find(|rule| matches(*rule, &context))
        .unwrap_or(BudgetRule::BalancedMix);

    BudgetTip {
        rule,
        text: render(rule, &context),
    }
}

fn matches(rule: BudgetRule, context: &TipContext<'_>) -> bool {
    let top_pct = context.top.percentage;
    match rule {
        BudgetRule::Dominant => top_pct > 50.0,
        BudgetRule::Strong => top_pct >= 40.0,
        BudgetRule::ReferralsTopThree => match context.find(LeadChannel::Referrals) {
            Some((rank, referrals)) => referrals.percentage > 20.0 && rank < 3,
            None => false,
        },
        BudgetRule::TopThreeConcentration => context.top_three_share >= 80.0,
        BudgetRule::Diversified => top_pct < 30.0 && context.top_three_share >= 60.0,
        BudgetRule::TiktokUnderutilized => match context.find(LeadChannel::Tiktok) {
            Some((_, tiktok)) => tiktok.bookings > 0 && context.top.channel != LeadChannel::Tiktok,
            None => false,
        },
        BudgetRule::BalancedMix => true,
    }
}

fn render(rule: BudgetRule, context: &TipContext<'_>) -> String {
    let top = context.top;
    match rule {
        BudgetRule::Dominant => {
            let mut tip = format!(
                "{} is your powerhouse at {}% of bookings. Allocate 60% of budget here. Why? Proven high ROI—you're converting at a higher rate on {}.",
                top.name,
                rounded(top.percentage),
                top.name
            );
            if let Some(untapped) = context.first_untapped() {
                tip.push_str(&format!(
                    " But test {} with 10-15% {}.",
                    untapped.display_name(),
                    untapped_reason(untapped)
                ));
            }
            tip
        }
        BudgetRule::Strong => format!(
            "{} dominates at {}% of bookings. Allocate 50% of budget here. Why? Higher ROI—you're spending less per booking on {}. Double down there.",
            top.name,
            rounded(top.percentage),
            top.name
        ),
        BudgetRule::ReferralsTopThree => {
            let (rank, percentage) = context
                .find(LeadChannel::Referrals)
                .map(|(rank, referrals)| (rank + 1, referrals.percentage))
                .unwrap_or((0, 0.0));
            format!(
                "Referrals are your #{} channel at {}% of bookings. Allocate 10% of budget here but prioritize asking happy clients to refer next time. Why? $0 ad spend, same conversions.",
                rank,
                rounded(percentage)
            )
        }
        BudgetRule::TopThreeConcentration => {
            let names: Vec<&str> = context.top_three.iter().map(|c| c.name.as_str()).collect();
            format!(
                "Your top 3 channels ({}) represent {}% of bookings. Focus 70% of budget here. Why? Proven winners. Maintain 30% for testing.",
                names.join(", "),
                rounded(context.top_three_share)
            )
        }
        BudgetRule::Diversified => "You're diversified. Allocate 25-30% to each top performer. Why? Reduces risk and tests each channel's potential. This is sustainable growth.".to_string(),
        BudgetRule::TiktokUnderutilized => {
            let percentage = context
                .find(LeadChannel::Tiktok)
                .map(|(_, tiktok)| tiktok.percentage)
                .unwrap_or(0.0);
            format!(
                "TikTok is generating bookings ({}%). This is underutilized in mobile bar space. Allocate more budget to grow this channel—less competition than Instagram.",
                rounded(percentage)
            )
        }
        BudgetRule::BalancedMix => "You have a balanced channel mix. Maintain even budget split (20-25% per top channel) to systematically reveal which scales best.".to_string(),
    }
}

fn untapped_reason(channel: LeadChannel) -> &'static str {
    match channel {
        LeadChannel::Linkedin => "to reach corporate planners",
        LeadChannel::Google => "for high-intent searches",
        _ => "to explore untapped potential",
    }
}

fn rounded(percentage: f64) -> i64 {
    percentage.round() as i64
}
