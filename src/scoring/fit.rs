use crate::domain::Prospect;

// Reachability / presence weights. They sum past 100 on purpose; the
// total is capped.
const WEIGHT_WEBSITE: u32 = 15;
const WEIGHT_PHONE: u32 = 15;
const WEIGHT_EMAIL: u32 = 10;
const WEIGHT_MAPS_PRESENCE: u32 = 15;
const WEIGHT_GOOD_RATING: u32 = 10;
const WEIGHT_REVIEW_COUNT: u32 = 10;
const WEIGHT_ADS_PRESENCE: u32 = 10;
const WEIGHT_ORGANIC_TOP10: u32 = 15;

/// Business quality score: can we reach them, and are they established?
pub fn calculate_fit_score(prospect: &Prospect) -> u32 {
    let mut score: u32 = 0;

    if prospect.website.is_some() {
        score += WEIGHT_WEBSITE;
    }
    if prospect.phone.is_some() {
        score += WEIGHT_PHONE;
    }
    if !prospect.emails.is_empty() {
        score += WEIGHT_EMAIL;
    }
    if prospect.found_in_maps {
        score += WEIGHT_MAPS_PRESENCE;
    }
    if prospect.rating.unwrap_or(0.0) >= 4.0 {
        score += WEIGHT_GOOD_RATING;
    }
    if prospect.review_count.unwrap_or(0) >= 10 {
        score += WEIGHT_REVIEW_COUNT;
    }
    if prospect.found_in_ads {
        score += WEIGHT_ADS_PRESENCE;
    }
    if prospect.found_in_organic && prospect.organic_position.map_or(false, |pos| pos <= 10) {
        score += WEIGHT_ORGANIC_TOP10;
    }

    score.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_prospect_scores_zero() {
        let prospect = Prospect {
            name: "Mystery Business".to_string(),
            ..Default::default()
        };

        assert_eq!(calculate_fit_score(&prospect), 0);
    }

    #[test]
    fn fully_reachable_prospect_is_capped_at_100() {
        let prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            website: Some("https://abcplumbing.com.au".to_string()),
            phone: Some("02 9000 0000".to_string()),
            emails: vec!["info@abcplumbing.com.au".to_string()],
            found_in_maps: true,
            rating: Some(4.7),
            review_count: Some(120),
            found_in_ads: true,
            found_in_organic: true,
            organic_position: Some(3),
            ..Default::default()
        };

        assert_eq!(calculate_fit_score(&prospect), 100);
    }

    #[test]
    fn low_rating_and_deep_organic_earn_nothing() {
        let prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            rating: Some(3.2),
            review_count: Some(4),
            found_in_organic: true,
            organic_position: Some(14),
            ..Default::default()
        };

        assert_eq!(calculate_fit_score(&prospect), 0);
    }

    #[test]
    fn website_and_phone_score_thirty() {
        let prospect = Prospect {
            name: "ABC Plumbing".to_string(),
            website: Some("https://abcplumbing.com.au".to_string()),
            phone: Some("02 9000 0000".to_string()),
            ..Default::default()
        };

        assert_eq!(calculate_fit_score(&prospect), 30);
    }
}
