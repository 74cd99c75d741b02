use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Market crowding label derived from the competition score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Saturation {
    Low,
    Medium,
    High,
    Saturated,
}

impl Saturation {
    fn from_score(score: u32) -> Self {
        match score {
            76.. => Saturation::Low,
            51..=75 => Saturation::Medium,
            26..=50 => Saturation::High,
            _ => Saturation::Saturated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Saturation::Low => "low",
            Saturation::Medium => "medium",
            Saturation::High => "high",
            Saturation::Saturated => "saturated",
        }
    }
}

impl Default for Saturation {
    fn default() -> Self {
        Saturation::Medium
    }
}

/// Results of analysing one SERP payload for market competition.
///
/// Score is 0-100 where higher means less competition, i.e. more room
/// for a new entrant to compete.
#[derive(Debug, Clone, Serialize)]
pub struct CompetitionAnalysis {
    pub score: u32,
    pub saturation: Saturation,
    pub ads_count: u32,
    pub organic_count: u32,
    pub maps_count: u32,
    pub franchises_found: Vec<&'static str>,
    pub has_major_franchise: bool,
    pub notes: Vec<String>,
}

/// Known franchise names whose presence in a SERP signals an entrenched
/// market. Ordered pairs of (lowercase pattern, canonical display name);
/// matches are collected in table order.
#[rustfmt::skip]
static FRANCHISE_PATTERNS: &[(&str, &str)] = &[
    // Home services
    ("jim's", "Jim's Group"),
    ("hire a hubby", "Hire A Hubby"),
    ("fantastic", "Fantastic Services"),
    ("dyno", "Dyno"),
    ("metropolitan plumbing", "Metropolitan Plumbing"),
    ("fallon", "Fallon Solutions"),
    ("mr splash", "Mr Splash Plumbing"),
    ("same day", "Same Day"),
    ("service today", "Service Today"),
    // Real estate
    ("mcgrath", "McGrath"),
    ("ray white", "Ray White"),
    ("lj hooker", "LJ Hooker"),
    ("harcourts", "Harcourts"),
    ("century 21", "Century 21"),
    ("belle property", "Belle Property"),
    ("raine & horne", "Raine & Horne"),
    ("barry plant", "Barry Plant"),
    ("jellis craig", "Jellis Craig"),
    // Cleaning
    ("merry maids", "Merry Maids"),
    ("molly maid", "Molly Maid"),
    ("absolute domestics", "Absolute Domestics"),
    ("home clean heroes", "Home Clean Heroes"),
    // Automotive
    ("ultra tune", "Ultra Tune"),
    ("midas", "Midas"),
    ("kmart tyre", "Kmart Tyre & Auto"),
    ("beaurepaires", "Beaurepaires"),
    ("jax", "JAX Tyres"),
    ("mycar", "mycar"),
    // Fitness
    ("snap fitness", "Snap Fitness"),
    ("anytime fitness", "Anytime Fitness"),
    ("f45", "F45 Training"),
];

/// Directory/aggregator sites excluded from the organic competition count;
/// they are listings, not competing businesses.
#[rustfmt::skip]
static DIRECTORY_DOMAINS: &[&str] = &[
    "yellowpages", "truelocal", "hotfrog", "localsearch",
    "yelp", "airtasker", "hipages", "serviceseeking", "oneflare",
    "productreview", "wordofmouth", "brownbook", "cylex",
    "whitepages", "whereis", "startlocal", "businesslistings",
    "infobel", "aussieweb", "dlook", "localstore",
];

fn is_directory(url: &str) -> bool {
    let url_lower = url.to_lowercase();
    DIRECTORY_DOMAINS.iter().any(|d| url_lower.contains(d))
}

fn array_len(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map_or(0, |a| a.len())
}

/// Analyse a raw SERP payload and derive a room-to-compete score.
///
/// Never fails: any missing or malformed field degrades to an empty list.
/// The payload shape follows the search provider's response, with keys
/// `ads`, `organic_results`, `local_results` (list, or map with `places`)
/// and `local_ads`.
pub fn analyze_competition(search_results: &Value) -> CompetitionAnalysis {
    let mut notes: Vec<String> = vec![];

    let empty: Vec<Value> = vec![];
    let organic = search_results
        .get("organic_results")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    let ads_count = array_len(search_results.get("ads")) as u32;
    let local_services_count = array_len(search_results.get("local_ads")) as u32;
    let maps_count = match search_results.get("local_results") {
        Some(Value::Object(map)) => array_len(map.get("places")) as u32,
        Some(Value::Array(places)) => places.len() as u32,
        _ => 0,
    };

    let organic_count = organic
        .iter()
        .filter(|r| {
            let link = r
                .get("displayed_link")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .or_else(|| r.get("link").and_then(Value::as_str))
                .unwrap_or("");
            !is_directory(link)
        })
        .count() as u32;

    // Franchise detection works on the whole payload text so franchise
    // names are caught wherever they appear (ads, maps titles, snippets).
    let all_text = search_results.to_string().to_lowercase();
    let mut franchises_found: Vec<&'static str> = vec![];
    for &(pattern, name) in FRANCHISE_PATTERNS {
        if all_text.contains(pattern) && !franchises_found.contains(&name) {
            franchises_found.push(name);
        }
    }
    let has_major_franchise = !franchises_found.is_empty();

    // Start at 100 and subtract for each competition signal.
    let mut score: i32 = 100;

    // Ads are the strongest signal of commercial competition.
    if ads_count >= 4 {
        score -= 30;
        notes.push(format!("Heavy ads ({})", ads_count));
    } else if ads_count >= 2 {
        score -= 20;
        notes.push(format!("Moderate ads ({})", ads_count));
    } else if ads_count == 1 {
        score -= 10;
        notes.push("Some ad competition".to_string());
    } else {
        notes.push("No ads".to_string());
    }

    // Sparse organic results signal low competition, not low demand.
    if organic_count >= 10 {
        score -= 20;
        notes.push("Full organic results".to_string());
    } else if organic_count >= 7 {
        score -= 15;
    } else if organic_count >= 4 {
        score -= 10;
    } else if organic_count < 3 {
        score += 5;
        notes.push("Thin organic - ranking opportunity".to_string());
    }

    if maps_count >= 20 {
        score -= 15;
        notes.push("Crowded maps".to_string());
    } else if maps_count >= 10 {
        score -= 10;
    } else if maps_count < 5 {
        score += 5;
        notes.push("Few maps listings".to_string());
    }

    // Local services = "Google Guaranteed" placements.
    if local_services_count >= 5 {
        score -= 15;
        notes.push("Heavy Google Guaranteed".to_string());
    } else if local_services_count >= 2 {
        score -= 10;
    } else if local_services_count >= 1 {
        score -= 5;
    }

    if franchises_found.len() >= 3 {
        score -= 25;
        notes.push(format!(
            "Multiple franchises: {}",
            franchises_found.iter().take(2).join(", ")
        ));
    } else if !franchises_found.is_empty() {
        score -= 15;
        notes.push(format!("Franchise: {}", franchises_found[0]));
    }

    let score = score.clamp(0, 100) as u32;

    CompetitionAnalysis {
        score,
        saturation: Saturation::from_score(score),
        ads_count,
        organic_count,
        maps_count,
        franchises_found,
        has_major_franchise,
        notes,
    }
}

/// Default medium competition for prospects with no search context.
pub fn default_competition() -> CompetitionAnalysis {
    CompetitionAnalysis {
        score: 50,
        saturation: Saturation::Medium,
        ads_count: 0,
        organic_count: 0,
        maps_count: 0,
        franchises_found: vec![],
        has_major_franchise: false,
        notes: vec!["No search context - using default".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_with_ads(count: usize) -> Value {
        let ads: Vec<Value> = (0..count).map(|i| json!({"position": i + 1})).collect();
        json!({ "ads": ads })
    }

    #[test]
    fn score_in_range_for_malformed_payloads() {
        let payloads = [
            json!({}),
            json!({"ads": null}),
            json!({"ads": "not a list", "organic_results": 42}),
            json!({"local_results": {"places": "bogus"}}),
            json!({"local_results": null, "local_ads": {"nested": []}}),
            json!([1, 2, 3]),
            json!("just a string"),
        ];

        for payload in payloads {
            let analysis = analyze_competition(&payload);
            assert!(analysis.score <= 100, "score out of range for {}", payload);
        }
    }

    #[test]
    fn more_ads_never_raises_score() {
        let mut previous = u32::MAX;
        for ads in [0usize, 1, 2, 3, 4, 8] {
            let analysis = analyze_competition(&payload_with_ads(ads));
            assert!(
                analysis.score <= previous,
                "score rose from {} when ads went to {}",
                previous,
                ads
            );
            previous = analysis.score;
        }
    }

    #[test]
    fn empty_payload_is_a_wide_open_market() {
        let analysis = analyze_competition(&json!({}));

        // No ads, thin organic bonus, sparse maps bonus.
        assert_eq!(analysis.score, 100);
        assert_eq!(analysis.saturation, Saturation::Low);
        assert!(analysis.notes.contains(&"No ads".to_string()));
        assert!(analysis
            .notes
            .contains(&"Thin organic - ranking opportunity".to_string()));
    }

    #[test]
    fn directories_do_not_count_as_organic_competition() {
        let payload = json!({
            "organic_results": [
                {"displayed_link": "www.yellowpages.com.au/plumbers"},
                {"displayed_link": "www.hipages.com.au/find/plumbers"},
                {"displayed_link": "abcplumbing.com.au"},
                {"link": "https://www.yelp.com/sydney"},
            ]
        });

        let analysis = analyze_competition(&payload);

        assert_eq!(analysis.organic_count, 1);
    }

    #[test]
    fn franchise_detection_is_case_insensitive_substring() {
        let payload = json!({
            "organic_results": [
                {"title": "Jim's Plumbing was here", "link": "https://jimsplumbing.com.au"}
            ]
        });

        let analysis = analyze_competition(&payload);

        assert!(analysis.franchises_found.contains(&"Jim's Group"));
        assert!(analysis.has_major_franchise);
        assert!(analysis
            .notes
            .contains(&"Franchise: Jim's Group".to_string()));
    }

    #[test]
    fn multiple_franchises_note_names_first_two() {
        let payload = json!({
            "ads": [
                {"title": "Jim's Plumbing"},
                {"title": "Metropolitan Plumbing 24/7"},
                {"title": "Mr Splash Plumbing"},
            ]
        });

        let analysis = analyze_competition(&payload);

        assert_eq!(analysis.franchises_found.len(), 3);
        assert!(analysis
            .notes
            .contains(&"Multiple franchises: Jim's Group, Metropolitan Plumbing".to_string()));
    }

    #[test]
    fn saturated_market_maps_to_saturated_label() {
        let ads: Vec<Value> = (0..6).map(|i| json!({"title": format!("ad {}", i)})).collect();
        let organic: Vec<Value> = (0..12)
            .map(|i| json!({"displayed_link": format!("business{}.com.au", i)}))
            .collect();
        let places: Vec<Value> = (0..22).map(|i| json!({"position": i})).collect();
        let local_ads: Vec<Value> = (0..5).map(|i| json!({"position": i})).collect();
        let payload = json!({
            "ads": ads,
            "organic_results": organic,
            "local_results": {"places": places},
            "local_ads": local_ads,
            "snippet": "Jim's and Fantastic Services and Hire A Hubby",
        });

        let analysis = analyze_competition(&payload);

        // 100 - 30 - 20 - 15 - 15 - 25 = -5, clamped to 0
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.saturation, Saturation::Saturated);
    }

    #[test]
    fn local_results_accepts_both_shapes() {
        let as_list = json!({"local_results": [1, 2, 3]});
        let as_map = json!({"local_results": {"places": [1, 2, 3]}});

        assert_eq!(analyze_competition(&as_list).maps_count, 3);
        assert_eq!(analyze_competition(&as_map).maps_count, 3);
    }

    #[test]
    fn default_competition_is_medium() {
        let analysis = default_competition();

        assert_eq!(analysis.score, 50);
        assert_eq!(analysis.saturation, Saturation::Medium);
        assert_eq!(
            analysis.notes,
            vec!["No search context - using default".to_string()]
        );
    }
}
