use serde::Serialize;

use crate::feedback::{FeedbackRecord, Sentiment};

pub const AI_ACCURACY: &str = "93%";
pub const SUMMARY_MAX_CHARS: usize = 120;
pub const RECENT_FEEDBACK_LIMIT: usize = 20;
pub const NO_DATA_INSIGHT: &str =
    "No data available yet. Collect more feedback to generate insights.";

/// Headline numbers for the admin overview cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackMetrics {
    pub total_feedback: usize,
    pub positive_sentiment: String,
    pub average_rating: f64,
    pub ai_accuracy: String,
}

impl FeedbackMetrics {
    #[must_use]
    pub fn from_records(records: &[FeedbackRecord]) -> Self {
        if records.is_empty() {
            return Self {
                total_feedback: 0,
                positive_sentiment: "0%".to_string(),
                average_rating: 0.0,
                ai_accuracy: "0%".to_string(),
            };
        }
        // Unrated submissions do not drag the average down.
        let rated = records
            .iter()
            .map(|record| record.rating)
            .filter(|rating| *rating > 0)
            .collect::<Vec<_>>();
        Self {
            total_feedback: records.len(),
            positive_sentiment: format!("{:.1}%", positive_percentage(records)),
            average_rating: round_one_decimal(mean(&rated)),
            ai_accuracy: AI_ACCURACY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

#[must_use]
pub fn sentiment_breakdown(records: &[FeedbackRecord]) -> SentimentBreakdown {
    records
        .iter()
        .fold(SentimentBreakdown::default(), |mut counts, record| {
            match record.sentiment() {
                Sentiment::Positive => counts.positive += 1,
                Sentiment::Neutral => counts.neutral += 1,
                Sentiment::Negative => counts.negative += 1,
            }
            counts
        })
}

#[must_use]
pub fn insights(records: &[FeedbackRecord]) -> Vec<&'static str> {
    if records.is_empty() {
        return vec![NO_DATA_INSIGHT];
    }

    let positive = positive_percentage(records);
    let satisfaction = if positive > 80.0 {
        "Customer satisfaction is excellent! Keep up the great service."
    } else if positive > 60.0 {
        "Customer satisfaction is good. Focus on addressing negative feedback."
    } else {
        "Customer satisfaction needs improvement. Review recent complaints."
    };

    let ratings = records.iter().map(|record| record.rating).collect::<Vec<_>>();
    let average = mean(&ratings);
    let rating = if average >= 4.5 {
        "Average rating is excellent. Customers are very satisfied."
    } else if average >= 3.5 {
        "Average rating is good. Continue improving service quality."
    } else {
        "Average rating is below expectations. Immediate action needed."
    };

    let volume = if records.len() > 10 {
        "You have sufficient feedback data for reliable analytics."
    } else {
        "Collect more feedback for more accurate insights."
    };

    vec![satisfaction, rating, volume]
}

/// First sentence of a comment, capped at [`SUMMARY_MAX_CHARS`] characters.
#[must_use]
pub fn summarize_comment(text: &str) -> String {
    let first = text.split('.').next().unwrap_or_default().trim();
    if first.chars().count() > SUMMARY_MAX_CHARS {
        let cut = first.chars().take(SUMMARY_MAX_CHARS).collect::<String>();
        format!("{cut}...")
    } else {
        first.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeedbackCategory {
    LpgAndRefills,
    PricingAndBilling,
    StationService,
    DeliveryAndLogistics,
    Complaints,
    Other,
}

impl FeedbackCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LpgAndRefills => "LPG & Refills",
            Self::PricingAndBilling => "Pricing & Billing",
            Self::StationService => "Station Service",
            Self::DeliveryAndLogistics => "Delivery & Logistics",
            Self::Complaints => "Complaints",
            Self::Other => "Other",
        }
    }
}

const CATEGORY_KEYWORDS: [(FeedbackCategory, &[&str]); 5] = [
    (FeedbackCategory::LpgAndRefills, &["lpg", "gas"]),
    (FeedbackCategory::PricingAndBilling, &["fuel", "price", "cost"]),
    (FeedbackCategory::StationService, &["station", "car wash"]),
    (FeedbackCategory::DeliveryAndLogistics, &["delivery", "truck"]),
    (FeedbackCategory::Complaints, &["complaint", "rude", "bad"]),
];

#[must_use]
pub fn categorize(text: &str) -> FeedbackCategory {
    let lower = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map_or(FeedbackCategory::Other, |(category, _)| *category)
}

/// One stored record as the dashboard's recent-feedback list shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackDigest {
    pub name: String,
    pub rating: u8,
    pub sentiment: Sentiment,
    pub category: FeedbackCategory,
    pub summary: String,
}

/// Newest records first, at most `limit` of them.
#[must_use]
pub fn recent_feedback(records: &[FeedbackRecord], limit: usize) -> Vec<FeedbackDigest> {
    records
        .iter()
        .rev()
        .take(limit)
        .map(|record| FeedbackDigest {
            name: record.name.clone(),
            rating: record.rating,
            sentiment: record.sentiment(),
            category: categorize(&record.comments),
            summary: summarize_comment(&record.comments),
        })
        .collect()
}

/// Static team figures for the dashboard's `team` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamPerformance {
    pub total_agents: u32,
    pub active_agents: u32,
    pub average_response_time: &'static str,
    pub customer_satisfaction: &'static str,
    pub agents: &'static [AgentPerformance],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentPerformance {
    pub name: &'static str,
    pub chats_handled: u32,
    pub satisfaction: &'static str,
}

const AGENT_PERFORMANCE: [AgentPerformance; 4] = [
    AgentPerformance {
        name: "Agent 1",
        chats_handled: 45,
        satisfaction: "94%",
    },
    AgentPerformance {
        name: "Agent 2",
        chats_handled: 38,
        satisfaction: "89%",
    },
    AgentPerformance {
        name: "Agent 3",
        chats_handled: 52,
        satisfaction: "95%",
    },
    AgentPerformance {
        name: "Agent 4",
        chats_handled: 41,
        satisfaction: "91%",
    },
];

#[must_use]
pub fn team_performance() -> TeamPerformance {
    TeamPerformance {
        total_agents: 5,
        active_agents: 4,
        average_response_time: "2.3 minutes",
        customer_satisfaction: "92%",
        agents: &AGENT_PERFORMANCE,
    }
}

fn positive_percentage(records: &[FeedbackRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let positive = records
        .iter()
        .filter(|record| record.sentiment() == Sentiment::Positive)
        .count();
    count_as_f64(positive) / count_as_f64(records.len()) * 100.0
}

fn mean(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum = ratings.iter().map(|rating| f64::from(*rating)).sum::<f64>();
    sum / count_as_f64(ratings.len())
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn count_as_f64(count: usize) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rating: u8, comments: &str) -> FeedbackRecord {
        FeedbackRecord {
            name: "Test".to_string(),
            email: "t@example.com".to_string(),
            service_type: "LPG".to_string(),
            rating,
            comments: comments.to_string(),
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn empty_list_reports_zeroes_and_no_data() {
        let metrics = FeedbackMetrics::from_records(&[]);
        assert_eq!(metrics.total_feedback, 0);
        assert_eq!(metrics.positive_sentiment, "0%");
        assert_eq!(metrics.ai_accuracy, "0%");
        assert_eq!(insights(&[]), vec![NO_DATA_INSIGHT]);
    }

    #[test]
    fn metrics_format_share_and_round_average() {
        let records = [record(5, "great"), record(4, "good"), record(2, "slow")];
        let metrics = FeedbackMetrics::from_records(&records);

        assert_eq!(metrics.total_feedback, 3);
        assert_eq!(metrics.positive_sentiment, "66.7%");
        assert!((metrics.average_rating - 3.7).abs() < 1e-9);
        assert_eq!(metrics.ai_accuracy, AI_ACCURACY);
        assert_eq!(
            sentiment_breakdown(&records),
            SentimentBreakdown {
                positive: 2,
                neutral: 0,
                negative: 1,
            }
        );
    }

    #[test]
    fn insights_pick_one_line_per_dimension() {
        let records = [record(5, "great"), record(4, "good"), record(2, "slow")];
        assert_eq!(
            insights(&records),
            vec![
                "Customer satisfaction is good. Focus on addressing negative feedback.",
                "Average rating is good. Continue improving service quality.",
                "Collect more feedback for more accurate insights.",
            ]
        );

        let many = vec![record(5, "great"); 11];
        assert_eq!(
            insights(&many),
            vec![
                "Customer satisfaction is excellent! Keep up the great service.",
                "Average rating is excellent. Customers are very satisfied.",
                "You have sufficient feedback data for reliable analytics.",
            ]
        );
    }

    #[test]
    fn summarize_keeps_first_sentence_and_caps_length() {
        assert_eq!(summarize_comment("  Fast refill. Friendly staff."), "Fast refill");
        let long = "a".repeat(130);
        let summary = summarize_comment(&long);
        assert_eq!(summary.len(), SUMMARY_MAX_CHARS + 3);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn categorize_uses_first_matching_category() {
        assert_eq!(categorize("Gas price went up"), FeedbackCategory::LpgAndRefills);
        assert_eq!(categorize("Fuel was cheap"), FeedbackCategory::PricingAndBilling);
        assert_eq!(categorize("The car wash was slow"), FeedbackCategory::StationService);
        assert_eq!(categorize("Truck arrived late"), FeedbackCategory::DeliveryAndLogistics);
        assert_eq!(categorize("Rude attendant"), FeedbackCategory::Complaints);
        assert_eq!(categorize("Nice day"), FeedbackCategory::Other);
    }

    #[test]
    fn recent_feedback_lists_newest_first() {
        let records = [
            record(5, "Quick LPG refill. Thanks."),
            record(2, "Rude attendant at the pump"),
            record(3, "Okay"),
        ];

        let recent = recent_feedback(&records, 2);

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].summary, "Okay");
        assert_eq!(recent[0].sentiment, Sentiment::Neutral);
        assert_eq!(recent[1].category, FeedbackCategory::Complaints);
        assert_eq!(recent[1].rating, 2);
        assert_eq!(recent_feedback(&records, 5)[2].summary, "Quick LPG refill");
    }

    #[test]
    fn team_performance_lists_active_agents() {
        let team = team_performance();
        assert_eq!(team.agents.len(), 4);
        assert_eq!(team.active_agents, 4);
        assert_eq!(team.agents[2].name, "Agent 3");
        assert_eq!(team.agents[2].chats_handled, 52);
        assert_eq!(team.average_response_time, "2.3 minutes");
    }
}
