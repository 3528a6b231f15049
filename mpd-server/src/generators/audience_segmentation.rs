//! Audience segmentation generator
//!
//! Returns the fixed persona catalog regardless of the personas selected in
//! the parameter set.

use mpd_common::models::{
    AudienceSegmentation, BehavioralPattern, Demographics, ParameterSet, PersonaProfile,
};
use std::collections::BTreeMap;

/// (name, age range, income, behavior, drivers)
const PERSONAS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Traditional Buyer",
        "35-55",
        "₹8L-15L",
        "Festival purchases, gold investment",
        "Trust, tradition",
    ),
    (
        "Modern Millennial",
        "25-35",
        "₹5L-12L",
        "Online research, trendy designs",
        "Style, convenience",
    ),
    (
        "Gen-Z Shopper",
        "18-25",
        "₹3L-8L",
        "Social media influenced, budget conscious",
        "Trends, affordability",
    ),
    (
        "Luxury Enthusiast",
        "40-60",
        "₹20L+",
        "Premium purchases, brand loyalty",
        "Status, exclusivity",
    ),
    (
        "Investment Focused",
        "30-50",
        "₹10L-25L",
        "Gold as investment",
        "Returns, security",
    ),
    (
        "Wedding Shopper",
        "25-35",
        "₹6L-20L",
        "High-value purchases",
        "Occasions, family",
    ),
    (
        "Corporate Professional",
        "28-45",
        "₹8L-18L",
        "Workwear jewelry",
        "Professional image",
    ),
    (
        "Collector",
        "35-65",
        "₹15L+",
        "Unique pieces",
        "Craftsmanship, heritage",
    ),
    (
        "Gifting Segment",
        "25-55",
        "₹7L-15L",
        "Festival/occasion gifts",
        "Relationships, tradition",
    ),
    (
        "Bridal Market",
        "22-30",
        "₹10L+",
        "Wedding jewelry sets",
        "Tradition, family status",
    ),
];

const AGE_DISTRIBUTION: &[(&str, u8)] =
    &[("18-25", 15), ("26-35", 35), ("36-45", 25), ("46+", 25)];
const INCOME_DISTRIBUTION: &[(&str, u8)] =
    &[("<5L", 20), ("5-10L", 30), ("10-20L", 35), ("20L+", 15)];
const GEOGRAPHIC_SPREAD: &[(&str, u8)] = &[("Metro", 45), ("Tier-1", 30), ("Tier-2", 25)];

pub fn generate(_params: &ParameterSet) -> AudienceSegmentation {
    let personas = PERSONAS
        .iter()
        .map(|(name, age_range, income, behavior, drivers)| PersonaProfile {
            name: name.to_string(),
            age_range: age_range.to_string(),
            income: income.to_string(),
            behavior: behavior.to_string(),
            drivers: drivers.to_string(),
        })
        .collect();

    AudienceSegmentation {
        personas,
        demographics: Demographics {
            age_distribution: distribution(AGE_DISTRIBUTION),
            income_distribution: distribution(INCOME_DISTRIBUTION),
            geographic_spread: distribution(GEOGRAPHIC_SPREAD),
        },
        behavioral_patterns: behavioral_patterns(),
    }
}

fn distribution(buckets: &[(&str, u8)]) -> BTreeMap<String, u8> {
    buckets
        .iter()
        .map(|(label, share)| (label.to_string(), *share))
        .collect()
}

fn behavioral_patterns() -> Vec<BehavioralPattern> {
    vec![
        BehavioralPattern {
            pattern: "Festival season peaks".to_string(),
            impact: Some("300% sales increase".to_string()),
            percentage: None,
            months: ["Oct", "Nov", "Apr", "May"].iter().map(|m| m.to_string()).collect(),
            platform: None,
            channels: None,
        },
        BehavioralPattern {
            pattern: "Digital research before purchase".to_string(),
            impact: None,
            percentage: Some(78),
            months: Vec::new(),
            platform: Some("Google, Social Media".to_string()),
            channels: None,
        },
        BehavioralPattern {
            pattern: "Price comparison behavior".to_string(),
            impact: None,
            percentage: Some(65),
            months: Vec::new(),
            platform: None,
            channels: Some("Online vs Offline".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_parameter_set;

    #[test]
    fn test_catalog_ignores_selected_personas() {
        let mut narrow = test_parameter_set(3, "30 days");
        narrow.personas = vec!["Collector".to_string()];
        let wide = test_parameter_set(3, "30 days");

        assert_eq!(generate(&narrow), generate(&wide));
        assert_eq!(generate(&narrow).personas.len(), 10);
    }

    #[test]
    fn test_distributions_sum_to_one_hundred() {
        let segmentation = generate(&test_parameter_set(3, "30 days"));
        let demographics = &segmentation.demographics;
        for dist in [
            &demographics.age_distribution,
            &demographics.income_distribution,
            &demographics.geographic_spread,
        ] {
            assert_eq!(dist.values().map(|v| u32::from(*v)).sum::<u32>(), 100);
        }
    }

    #[test]
    fn test_festival_pattern_lists_months() {
        let segmentation = generate(&test_parameter_set(3, "30 days"));
        let festival = &segmentation.behavioral_patterns[0];
        assert_eq!(festival.months, vec!["Oct", "Nov", "Apr", "May"]);
        assert!(festival.percentage.is_none());
    }

    #[test]
    fn test_pattern_wire_keys() {
        let segmentation = generate(&test_parameter_set(3, "30 days"));
        let json = serde_json::to_value(&segmentation.behavioral_patterns).unwrap();

        assert_eq!(json[1]["platform"], "Google, Social Media");
        assert!(json[1].get("channels").is_none());
        assert_eq!(json[2]["channels"], "Online vs Offline");
        assert!(json[2].get("platform").is_none());
        assert!(json[0].get("months").is_some());
    }
}
