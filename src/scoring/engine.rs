use std::cmp::Ordering;

use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

use crate::domain::Prospect;
use crate::scoring::competition::{
    analyze_competition, default_competition, CompetitionAnalysis, Saturation,
};
use crate::scoring::fit::calculate_fit_score;
use crate::scoring::industry::{classify_industry, IndustryCategory, IndustryClassification};
use crate::scoring::opportunity::{calculate_opportunity_score, generate_opportunity_notes};

// Priority = (Fit x 0.3 + Opportunity x 0.5 + Competition x 0.2) x Industry Multiplier
//
// Fit: can we reach them? Opportunity: do they need help? (weighted
// highest) Competition: can we deliver results in that market?
const FIT_WEIGHT: f64 = 0.30;
const OPPORTUNITY_WEIGHT: f64 = 0.50;
const COMPETITION_WEIGHT: f64 = 0.20;

/// Complete scoring result for one prospect. Transient: built per call,
/// then copied onto the prospect via [`apply_scores_to_prospect`].
#[derive(Debug, Clone, Serialize)]
pub struct ProspectScore {
    pub fit_score: u32,
    pub opportunity_score: u32,
    pub competition_score: u32,
    pub priority_score: u32,

    pub industry_category: IndustryCategory,
    pub industry_multiplier: f64,

    pub market_saturation: Saturation,
    pub franchise_competition: bool,

    pub gbp_has_website: Option<bool>,
    pub gbp_website_missing_opportunity: bool,
    pub gbp_opportunity_boost: u32,

    pub opportunity_notes: String,
    pub competition_notes: String,
    pub industry_notes: String,
    pub summary: String,
}

/// Score a prospect with all factors combined.
///
/// Reads the prospect but never mutates it; `apply_scores_to_prospect`
/// performs the write-back. Without search results the competition
/// component degrades to the medium default.
pub fn score_prospect(
    prospect: &Prospect,
    search_results: Option<&Value>,
    search_query: &str,
    _search_location: &str,
) -> ProspectScore {
    let fit_score = calculate_fit_score(prospect);

    let base_opportunity_score = calculate_opportunity_score(prospect);
    let mut opportunity_notes = generate_opportunity_notes(prospect);

    // Boost comes from deserialized input, so guard the addition rather
    // than trust it to stay small.
    let gbp_boost = prospect.gbp_opportunity_boost;
    let opportunity_score = base_opportunity_score.saturating_add(gbp_boost).min(100);

    // GBP signals are the highest-priority explanation, so they lead.
    if !prospect.gbp_notes.is_empty() {
        let gbp_notes_str = prospect.gbp_notes.iter().join("; ");
        opportunity_notes = if opportunity_notes.is_empty() {
            format!("GBP: {}", gbp_notes_str)
        } else {
            format!("GBP: {}; {}", gbp_notes_str, opportunity_notes)
        };
    }

    // Any payload that was supplied gets analyzed, even an empty one;
    // only a missing payload means "no search context" and takes the
    // medium default.
    let comp_analysis = match search_results {
        Some(results) => analyze_competition(results),
        None => default_competition(),
    };
    let competition_score = comp_analysis.score;
    let competition_notes = comp_analysis.notes.iter().join("; ");

    // Classification prefers the query that surfaced the prospect over
    // its self-declared category.
    let business_type = if !search_query.is_empty() {
        search_query
    } else {
        prospect.category.as_deref().unwrap_or("")
    };
    let industry_class = classify_industry(business_type, Some(prospect.name.as_str()));

    let priority_score = calculate_priority_score(
        fit_score,
        opportunity_score,
        competition_score,
        industry_class.multiplier,
    );

    let summary = generate_summary(priority_score, &comp_analysis, &industry_class, prospect);

    ProspectScore {
        fit_score,
        opportunity_score,
        competition_score,
        priority_score,
        industry_category: industry_class.category,
        industry_multiplier: industry_class.multiplier,
        market_saturation: comp_analysis.saturation,
        franchise_competition: comp_analysis.has_major_franchise,
        gbp_has_website: prospect.gbp_has_website,
        gbp_website_missing_opportunity: prospect.gbp_website_missing_opportunity,
        gbp_opportunity_boost: gbp_boost,
        opportunity_notes,
        competition_notes,
        industry_notes: industry_class.notes.to_string(),
        summary,
    }
}

/// Weighted priority from pre-calculated component scores.
pub fn calculate_priority_score(
    fit_score: u32,
    opportunity_score: u32,
    competition_score: u32,
    industry_multiplier: f64,
) -> u32 {
    let raw = fit_score as f64 * FIT_WEIGHT
        + opportunity_score as f64 * OPPORTUNITY_WEIGHT
        + competition_score as f64 * COMPETITION_WEIGHT;
    let adjusted = raw * industry_multiplier;

    adjusted.clamp(0.0, 100.0) as u32
}

fn generate_summary(
    priority: u32,
    competition: &CompetitionAnalysis,
    industry: &IndustryClassification,
    prospect: &Prospect,
) -> String {
    let mut parts: Vec<String> = vec![];

    let tier = match priority {
        80.. => "HOT PROSPECT",
        60..=79 => "High priority",
        40..=59 => "Worth pursuing",
        _ => "Lower priority",
    };
    parts.push(tier.to_string());

    // A reviewed business with no website on its profile is the easiest
    // pitch there is.
    if prospect.gbp_website_missing_opportunity {
        parts.push("Easy win: No website on GBP".to_string());
    }

    match competition.saturation {
        Saturation::Low => parts.push("Low competition".to_string()),
        Saturation::Saturated => parts.push("Saturated market".to_string()),
        Saturation::Medium | Saturation::High => {}
    }

    match industry.category {
        IndustryCategory::Niche => parts.push(format!("Niche ({}x)", industry.multiplier)),
        IndustryCategory::Specialist => {
            parts.push(format!("Specialist ({}x)", industry.multiplier))
        }
        IndustryCategory::Commoditised => {
            parts.push(format!("Commoditised ({}x)", industry.multiplier))
        }
        IndustryCategory::Standard => {}
    }

    // Only confirmed-absent tracking is worth calling out.
    if let Some(signals) = &prospect.signals {
        if signals.has_google_analytics == Some(false) {
            parts.push("No analytics".to_string());
        }
        if signals.has_facebook_pixel == Some(false) {
            parts.push("No pixel".to_string());
        }
    }

    parts.join("; ")
}

/// Copy calculated scores onto a prospect in place.
///
/// GBP fields are deliberately untouched: they were set by the maps
/// extraction before scoring began and are inputs here, not outputs.
pub fn apply_scores_to_prospect(prospect: &mut Prospect, score: &ProspectScore) {
    prospect.fit_score = score.fit_score;
    prospect.opportunity_score = score.opportunity_score;
    prospect.priority_score = score.priority_score as f64;
    prospect.opportunity_notes = score.opportunity_notes.clone();

    prospect.competition_score = score.competition_score;
    prospect.market_saturation = score.market_saturation;
    prospect.franchise_competition = score.franchise_competition;
    prospect.industry_category = score.industry_category;
    prospect.industry_multiplier = score.industry_multiplier;
}

/// Order a batch by priority, best first. The sort is stable, so equal
/// priorities keep their original discovery order.
pub fn rank_prospects(prospects: &mut [Prospect]) {
    prospects.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn priority_formula_exact_case() {
        // 80*0.3 + 60*0.5 + 50*0.2 = 24 + 30 + 10 = 64
        assert_eq!(calculate_priority_score(80, 60, 50, 1.0), 64);
    }

    #[test]
    fn priority_is_clamped_by_multiplier() {
        assert_eq!(calculate_priority_score(100, 100, 100, 1.6), 100);
        assert_eq!(calculate_priority_score(0, 0, 0, 0.4), 0);
    }

    #[test]
    fn commoditised_multiplier_drags_priority_down() {
        // raw 64 * 0.6 = 38.4 -> 38
        assert_eq!(calculate_priority_score(80, 60, 50, 0.6), 38);
    }

    #[test]
    fn gbp_boost_is_clamped_at_100() {
        let prospect = Prospect {
            name: "Offline Plumbing".to_string(),
            // No website: base opportunity 80
            gbp_opportunity_boost: 25,
            ..Default::default()
        };

        let score = score_prospect(&prospect, None, "plumber", "");

        assert_eq!(score.opportunity_score, 100);
    }

    #[test]
    fn oversized_gbp_boost_does_not_overflow() {
        // The boost field is untrusted input straight from the request
        // body; an absurd value must still clamp to 100, not panic.
        let prospect = Prospect {
            name: "Offline Plumbing".to_string(),
            gbp_opportunity_boost: u32::MAX,
            ..Default::default()
        };

        let score = score_prospect(&prospect, None, "plumber", "");

        assert_eq!(score.opportunity_score, 100);
    }

    #[test]
    fn empty_search_results_are_analyzed_not_defaulted() {
        // An empty payload is a real observation of a wide-open market,
        // distinct from having no search context at all.
        let prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            ..Default::default()
        };
        let search_results = json!({});

        let score = score_prospect(&prospect, Some(&search_results), "plumber", "");

        assert_eq!(score.competition_score, 100);
        assert_eq!(score.market_saturation, Saturation::Low);
    }

    #[test]
    fn no_search_results_uses_default_competition() {
        let prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            ..Default::default()
        };

        let score = score_prospect(&prospect, None, "plumber", "");

        assert_eq!(score.competition_score, 50);
        assert_eq!(score.market_saturation, Saturation::Medium);
        assert_eq!(score.competition_notes, "No search context - using default");
    }

    #[test]
    fn gbp_notes_lead_the_opportunity_notes() {
        let prospect = Prospect {
            name: "Offline Plumbing".to_string(),
            gbp_notes: vec![
                "No website on GBP".to_string(),
                "45 reviews".to_string(),
            ],
            ..Default::default()
        };

        let score = score_prospect(&prospect, None, "plumber", "");

        assert_eq!(
            score.opportunity_notes,
            "GBP: No website on GBP; 45 reviews; No website - high-impact opportunity"
        );
    }

    #[test]
    fn classification_falls_back_to_prospect_category() {
        let prospect = Prospect {
            name: "Harbour Buyers Advocates".to_string(),
            category: Some("buyers agent".to_string()),
            ..Default::default()
        };

        let score = score_prospect(&prospect, None, "", "");

        assert_eq!(score.industry_category, IndustryCategory::Niche);
        assert_eq!(score.industry_multiplier, 1.4);
    }

    #[test]
    fn summary_lists_signals_in_fixed_order() {
        let prospect = Prospect {
            name: "Offline Plumbing".to_string(),
            gbp_website_missing_opportunity: true,
            gbp_opportunity_boost: 25,
            rating: Some(4.8),
            review_count: Some(60),
            found_in_maps: true,
            phone: Some("02 9000 0000".to_string()),
            ..Default::default()
        };
        // Empty SERP: wide-open market.
        let search_results = json!({});

        let score = score_prospect(&prospect, Some(&search_results), "plumber", "Sydney");

        // fit = 15+15+10+10 = 50; opportunity = min(100, 80+25) = 100;
        // competition = 100; raw = 15 + 50 + 20 = 85; x0.6 = 51
        assert_eq!(score.priority_score, 51);
        assert_eq!(
            score.summary,
            "Worth pursuing; Easy win: No website on GBP; Low competition; Commoditised (0.6x)"
        );
    }

    #[test]
    fn apply_copies_scores_but_not_gbp_fields() {
        let mut prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            gbp_has_website: Some(false),
            gbp_opportunity_boost: 25,
            gbp_notes: vec!["No website on GBP".to_string()],
            ..Default::default()
        };

        let score = score_prospect(&prospect.clone(), None, "plumber", "");
        apply_scores_to_prospect(&mut prospect, &score);

        assert_eq!(prospect.fit_score, score.fit_score);
        assert_eq!(prospect.opportunity_score, score.opportunity_score);
        assert_eq!(prospect.priority_score, score.priority_score as f64);
        assert_eq!(prospect.competition_score, score.competition_score);
        // GBP inputs survive untouched
        assert_eq!(prospect.gbp_has_website, Some(false));
        assert_eq!(prospect.gbp_opportunity_boost, 25);
        assert_eq!(prospect.gbp_notes.len(), 1);
    }

    #[test]
    fn rank_orders_by_priority_descending_and_is_stable() {
        let mut prospects = vec![
            Prospect {
                name: "Low".to_string(),
                priority_score: 20.0,
                ..Default::default()
            },
            Prospect {
                name: "High".to_string(),
                priority_score: 90.0,
                ..Default::default()
            },
            Prospect {
                name: "Tie A".to_string(),
                priority_score: 55.0,
                ..Default::default()
            },
            Prospect {
                name: "Tie B".to_string(),
                priority_score: 55.0,
                ..Default::default()
            },
        ];

        rank_prospects(&mut prospects);

        let names: Vec<&str> = prospects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Tie A", "Tie B", "Low"]);
    }
}
