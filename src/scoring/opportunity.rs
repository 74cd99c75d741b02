use crate::domain::Prospect;

// Marketing-gap points. Tracking signals only count when confirmed
// absent; unknown (`None`) earns nothing.
const OPP_NO_ANALYTICS: i32 = 15;
const OPP_NO_PIXEL: i32 = 10;
const OPP_NO_BOOKING: i32 = 15;
const OPP_NO_CONTACT: i32 = 10;
const OPP_WEAK_CMS: i32 = 10;
const OPP_SLOW_SITE: i32 = 10;
const OPP_RUNNING_ADS_PENALTY: i32 = -10;
const OPP_GOOD_TRACKING_PENALTY: i32 = -10;
const OPP_POOR_MAPS: i32 = 10;
const OPP_POOR_ORGANIC: i32 = 20;

const SLOW_SITE_MS: u32 = 3000;

/// Entry-level site builders that signal an easy upgrade pitch.
static WEAK_CMS: &[&str] = &["Wix", "Weebly", "GoDaddy Website Builder"];

/// Marketing-gap score: how much does this business need help?
pub fn calculate_opportunity_score(prospect: &Prospect) -> u32 {
    // No website at all is the single biggest opportunity.
    if prospect.website.is_none() {
        return 80;
    }

    let signals = match &prospect.signals {
        Some(signals) => signals,
        // Site exists but was never crawled; nothing to analyse.
        None => return 50,
    };

    let mut score: i32 = 0;

    if signals.has_google_analytics == Some(false) {
        score += OPP_NO_ANALYTICS;
    }
    if signals.has_facebook_pixel == Some(false) {
        score += OPP_NO_PIXEL;
    }
    if signals.has_booking_system == Some(false) {
        score += OPP_NO_BOOKING;
    }
    if signals.emails.is_empty() {
        score += OPP_NO_CONTACT;
    }
    if let Some(cms) = &signals.cms {
        if WEAK_CMS.contains(&cms.as_str()) {
            score += OPP_WEAK_CMS;
        }
    }
    if signals.load_time_ms.map_or(false, |ms| ms > SLOW_SITE_MS) {
        score += OPP_SLOW_SITE;
    }

    // Already-invested businesses are a harder sell.
    if prospect.found_in_ads {
        score += OPP_RUNNING_ADS_PENALTY;
    }
    if signals.has_google_analytics == Some(true) && signals.has_facebook_pixel == Some(true) {
        score += OPP_GOOD_TRACKING_PENALTY;
    }

    if prospect.found_in_maps && prospect.maps_position.map_or(false, |pos| pos > 1) {
        score += OPP_POOR_MAPS;
    }

    if !prospect.found_in_organic {
        score += OPP_POOR_ORGANIC;
    } else if prospect.organic_position.map_or(false, |pos| pos > 5) {
        score += OPP_POOR_ORGANIC;
    }

    score.clamp(0, 100) as u32
}

/// Human-readable explanation of the marketing gaps behind the score.
pub fn generate_opportunity_notes(prospect: &Prospect) -> String {
    if prospect.website.is_none() {
        return "No website - high-impact opportunity".to_string();
    }

    let signals = match &prospect.signals {
        Some(signals) => signals,
        None => return "Website not yet analysed".to_string(),
    };

    let mut parts: Vec<&str> = vec![];

    if signals.has_google_analytics == Some(false) {
        parts.push("No Google Analytics");
    }
    if signals.has_facebook_pixel == Some(false) {
        parts.push("No Facebook pixel");
    }
    if signals.has_booking_system == Some(false) {
        parts.push("No online booking");
    }
    if signals.emails.is_empty() {
        parts.push("No contact email on site");
    }
    if let Some(cms) = &signals.cms {
        if WEAK_CMS.contains(&cms.as_str()) {
            parts.push("Entry-level website builder");
        }
    }
    if signals.load_time_ms.map_or(false, |ms| ms > SLOW_SITE_MS) {
        parts.push("Slow site");
    }
    if !prospect.found_in_organic {
        parts.push("Not ranking organically");
    }

    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WebsiteSignals;

    #[test]
    fn no_website_scores_eighty() {
        let prospect = Prospect {
            name: "Offline Plumbing".to_string(),
            ..Default::default()
        };

        assert_eq!(calculate_opportunity_score(&prospect), 80);
        assert_eq!(
            generate_opportunity_notes(&prospect),
            "No website - high-impact opportunity"
        );
    }

    #[test]
    fn uncrawled_website_scores_fifty() {
        let prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            website: Some("https://abcplumbing.com.au".to_string()),
            ..Default::default()
        };

        assert_eq!(calculate_opportunity_score(&prospect), 50);
    }

    #[test]
    fn unknown_tracking_earns_no_gap_points() {
        // All tracking fields None = could not determine.
        let prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            website: Some("https://abcplumbing.com.au".to_string()),
            found_in_organic: true,
            organic_position: Some(2),
            signals: Some(WebsiteSignals {
                emails: vec!["info@abcplumbing.com.au".to_string()],
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(calculate_opportunity_score(&prospect), 0);
    }

    #[test]
    fn confirmed_gaps_add_up() {
        let prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            website: Some("https://abcplumbing.com.au".to_string()),
            signals: Some(WebsiteSignals {
                has_google_analytics: Some(false),
                has_facebook_pixel: Some(false),
                has_booking_system: Some(false),
                emails: vec![],
                cms: Some("Wix".to_string()),
                load_time_ms: Some(4500),
                ..Default::default()
            }),
            ..Default::default()
        };

        // 15 + 10 + 15 + 10 + 10 + 10 + 20 (no organic) = 90
        assert_eq!(calculate_opportunity_score(&prospect), 90);
    }

    #[test]
    fn invested_business_is_penalised() {
        let prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            website: Some("https://abcplumbing.com.au".to_string()),
            found_in_ads: true,
            found_in_organic: true,
            organic_position: Some(1),
            signals: Some(WebsiteSignals {
                has_google_analytics: Some(true),
                has_facebook_pixel: Some(true),
                emails: vec!["info@abcplumbing.com.au".to_string()],
                ..Default::default()
            }),
            ..Default::default()
        };

        // -10 ads, -10 full tracking, nothing else, clamped at 0
        assert_eq!(calculate_opportunity_score(&prospect), 0);
    }

    #[test]
    fn notes_list_confirmed_gaps_only() {
        let prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            website: Some("https://abcplumbing.com.au".to_string()),
            found_in_organic: true,
            organic_position: Some(3),
            signals: Some(WebsiteSignals {
                has_google_analytics: Some(false),
                emails: vec!["info@abcplumbing.com.au".to_string()],
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(generate_opportunity_notes(&prospect), "No Google Analytics");
    }
}
