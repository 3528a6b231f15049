//! Brand positioning generator

use mpd_common::models::{
    Axes, BrandPositioning, CompetitorProfile, ParameterSet, PositioningMap, Quadrant,
};
use std::collections::BTreeMap;

/// Quadrant key for the brand's own position on the map
pub const BRAND_POSITION_KEY: &str = "kalyan_position";

/// (quadrant, brands, x, y)
const QUADRANTS: &[(&str, &[&str], f64, f64)] = &[
    ("high_price_traditional", &["Tanishq"], 8.2, 7.8),
    ("high_price_modern", &["Cartier", "Tiffany"], 8.8, 3.2),
    ("low_price_traditional", &["Local jewellers"], 3.5, 8.1),
    ("low_price_modern", &["BlueStone"], 4.2, 2.8),
];

/// (competitor, strength, weakness, market position)
const COMPETITOR_PROFILES: &[(&str, &str, &str, &str)] = &[
    ("tanishq", "Brand trust", "High pricing", "Leader"),
    ("malabar", "Pure gold focus", "Limited modern appeal", "Strong regional"),
    ("joyalukkas", "Variety", "Brand differentiation", "Growing"),
];

const MESSAGING_RECOMMENDATIONS: &[&str] = &[
    "Heritage meets Innovation - Position as bridge between tradition and modernity",
    "Trustworthy Craftsmanship - Emphasize quality and reliability",
    "Accessible Luxury - Premium but not exclusive pricing",
    "Family Legacy - Multi-generational appeal",
    "Digital Forward Traditional Brand - Online-offline integration",
];

pub fn generate(_params: &ParameterSet) -> BrandPositioning {
    let mut quadrants: BTreeMap<String, Quadrant> = QUADRANTS
        .iter()
        .map(|(name, brands, x, y)| {
            (
                name.to_string(),
                Quadrant {
                    brands: brands.iter().map(|b| b.to_string()).collect(),
                    position: [*x, *y],
                    description: None,
                },
            )
        })
        .collect();

    quadrants.insert(
        BRAND_POSITION_KEY.to_string(),
        Quadrant {
            brands: Vec::new(),
            position: [7.5, 6.5],
            description: Some("Premium traditional with modern appeal".to_string()),
        },
    );

    let competitor_analysis = COMPETITOR_PROFILES
        .iter()
        .map(|(name, strength, weakness, market_position)| {
            (
                name.to_string(),
                CompetitorProfile {
                    strength: strength.to_string(),
                    weakness: weakness.to_string(),
                    market_position: market_position.to_string(),
                },
            )
        })
        .collect();

    BrandPositioning {
        positioning_map: PositioningMap {
            quadrants,
            axes: Axes {
                x_axis: "Traditional ← → Modern".to_string(),
                y_axis: "Affordable ← → Premium".to_string(),
            },
        },
        competitor_analysis,
        messaging_recommendations: MESSAGING_RECOMMENDATIONS
            .iter()
            .map(|m| m.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_parameter_set;

    #[test]
    fn test_map_contains_brand_position() {
        let positioning = generate(&test_parameter_set(5, "90 days"));
        let quadrants = &positioning.positioning_map.quadrants;
        assert_eq!(quadrants.len(), 5);

        let own = &quadrants[BRAND_POSITION_KEY];
        assert_eq!(own.position, [7.5, 6.5]);
        assert!(own.brands.is_empty());
        assert!(own.description.is_some());
    }

    #[test]
    fn test_fixed_tables() {
        let positioning = generate(&test_parameter_set(1, "30 days"));
        assert_eq!(positioning.competitor_analysis.len(), 3);
        assert_eq!(positioning.competitor_analysis["tanishq"].market_position, "Leader");
        assert_eq!(positioning.messaging_recommendations.len(), 5);
    }

    #[test]
    fn test_serialization_is_stable() {
        let params = test_parameter_set(2, "30 days");
        assert_eq!(
            serde_json::to_vec(&generate(&params)).unwrap(),
            serde_json::to_vec(&generate(&params)).unwrap()
        );
    }

    #[test]
    fn test_own_position_wire_key() {
        let json = serde_json::to_value(generate(&test_parameter_set(2, "30 days"))).unwrap();
        let own = &json["positioning_map"]["quadrants"]["kalyan_position"];
        assert_eq!(own["position"][0], 7.5);
        assert_eq!(own["position"][1], 6.5);
        assert!(own.get("brands").is_none());
    }
}
