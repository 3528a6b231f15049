//! Market research generator
//!
//! Ranked competitor reference table truncated to the requested count, plus
//! fixed trend and forecast tables.

use mpd_common::models::{
    Competitor, MarketResearch, ParameterSet, StrengthsWeaknesses, TrendForecast, TrendInsight,
};

/// (name, market share %, strengths, weaknesses), ranked by market share
const COMPETITORS: &[(&str, f64, &[&str], &[&str])] = &[
    ("Tanishq", 23.5, &["Brand trust", "Wide network"], &["Premium pricing"]),
    ("Malabar Gold", 18.2, &["Regional presence", "Pure gold"], &["Limited designs"]),
    ("Joyalukkas", 15.8, &["International presence", "Variety"], &["Competition"]),
    ("PC Jeweller", 12.3, &["Affordable luxury"], &["Brand perception"]),
    ("Senco Gold", 9.7, &["Eastern market"], &["Limited reach"]),
];

/// (trend, growth rate %, impact)
const TRENDS: &[(&str, f64, &str)] = &[
    ("Sustainable Jewelry", 25.3, "High"),
    ("Lab-grown Diamonds", 42.1, "Very High"),
    ("Personalized Designs", 18.7, "Medium"),
    ("Digital First Shopping", 35.2, "High"),
    ("Minimalist Jewelry", 22.9, "Medium"),
];

/// (forecast statement, confidence %)
const FORECASTS: &[(&str, u8)] = &[
    ("Digital adoption will accelerate", 89),
    ("Sustainable demand will grow", 92),
    ("Customization will become key", 78),
];

const BRAND_STRENGTHS: &[&str] = &["Brand heritage", "Quality"];
const MARKET_GAPS: &[&str] = &["Digital presence", "Gen-Z appeal"];

/// Number of entries in the competitor reference table
pub fn reference_competitor_count() -> usize {
    COMPETITORS.len()
}

pub fn generate(params: &ParameterSet) -> MarketResearch {
    // A count past the end of the table yields the whole table
    let take = usize::try_from(params.num_competitors).unwrap_or(usize::MAX);

    let competitors = COMPETITORS
        .iter()
        .take(take)
        .map(|(name, share, strengths, weaknesses)| Competitor {
            name: name.to_string(),
            market_share: *share,
            strengths: to_strings(strengths),
            weaknesses: to_strings(weaknesses),
        })
        .collect();

    let emerging_trends = TRENDS
        .iter()
        .map(|(trend, growth_rate, impact)| TrendInsight {
            trend: trend.to_string(),
            growth_rate: *growth_rate,
            impact: impact.to_string(),
        })
        .collect();

    let period = format!("Next {}", params.timeframe);
    let trend_forecast = FORECASTS
        .iter()
        .map(|(trend, confidence)| TrendForecast {
            period: period.clone(),
            trend: trend.to_string(),
            confidence: *confidence,
        })
        .collect();

    MarketResearch {
        competitors,
        emerging_trends,
        strengths_weaknesses: StrengthsWeaknesses {
            brand_strengths: to_strings(BRAND_STRENGTHS),
            market_gaps: to_strings(MARKET_GAPS),
        },
        trend_forecast,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_parameter_set;

    #[test]
    fn test_truncates_to_requested_count_in_rank_order() {
        let research = generate(&test_parameter_set(3, "30 days"));
        let names: Vec<_> = research.competitors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Tanishq", "Malabar Gold", "Joyalukkas"]);
    }

    #[test]
    fn test_count_beyond_table_returns_full_table() {
        let research = generate(&test_parameter_set(100, "30 days"));
        assert_eq!(research.competitors.len(), reference_competitor_count());
        assert_eq!(research.competitors.last().unwrap().name, "Senco Gold");
    }

    #[test]
    fn test_forecast_period_uses_timeframe() {
        let research = generate(&test_parameter_set(5, "6 months"));
        assert_eq!(research.trend_forecast.len(), 3);
        assert!(research
            .trend_forecast
            .iter()
            .all(|f| f.period == "Next 6 months"));
    }

    #[test]
    fn test_output_is_byte_identical_across_runs() {
        let params = test_parameter_set(4, "60 days");
        let first = serde_json::to_string(&generate(&params)).unwrap();
        let second = serde_json::to_string(&generate(&params)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_strengths_wire_keys() {
        let json = serde_json::to_value(generate(&test_parameter_set(2, "30 days"))).unwrap();
        let strengths = &json["strengths_weaknesses"];
        assert_eq!(strengths["kalyan_strengths"][0], "Brand heritage");
        assert_eq!(strengths["market_gaps"][1], "Gen-Z appeal");
        assert!(strengths.get("brand_strengths").is_none());
    }
}
