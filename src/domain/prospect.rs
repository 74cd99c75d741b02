use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use strsim::jaro_winkler;
use url::Url;

use crate::scoring::{IndustryCategory, Saturation};

/// Two prospects with no shared domain are still considered the same
/// business when their names are this similar.
const NAME_SIMILARITY_THRESHOLD: f64 = 0.95;

/// Marketing signals extracted from a prospect's website by the crawler.
///
/// Tracking fields are three-valued: `None` means "could not determine"
/// (timeout, blocked page), never "confirmed absent".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebsiteSignals {
    pub url: String,
    pub reachable: bool,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub cms: Option<String>,
    pub has_google_analytics: Option<bool>,
    pub has_facebook_pixel: Option<bool>,
    pub has_google_ads: Option<bool>,
    pub has_booking_system: Option<bool>,
    pub load_time_ms: Option<u32>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub social_links: Vec<String>,
}

/// A candidate business lead with all data gathered so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prospect {
    pub name: String,
    pub website: Option<String>,
    pub domain: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,

    // SERP presence
    pub found_in_ads: bool,
    pub ad_position: Option<u32>,
    pub found_in_maps: bool,
    pub maps_position: Option<u32>,
    pub found_in_organic: bool,
    pub organic_position: Option<u32>,

    // Google Business Profile data
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub category: Option<String>,

    // Contact info
    pub emails: Vec<String>,

    // Crawler output
    pub signals: Option<WebsiteSignals>,

    // Scores
    pub fit_score: u32,
    pub opportunity_score: u32,
    #[serde(serialize_with = "two_decimals")]
    pub priority_score: f64,
    pub opportunity_notes: String,

    // Market context
    pub competition_score: u32,
    pub market_saturation: Saturation,
    pub franchise_competition: bool,
    pub ads_in_market: u32,

    // Industry classification
    pub industry_category: IndustryCategory,
    pub industry_multiplier: f64,

    // GBP signals. `gbp_has_website` is `None` when the prospect did not
    // come from a Maps listing.
    pub gbp_has_website: Option<bool>,
    pub gbp_website_missing_opportunity: bool,
    pub gbp_opportunity_boost: u32,
    pub gbp_notes: Vec<String>,

    // Metadata
    pub source: String,
    pub scraped_at: DateTime<Utc>,
}

impl Default for Prospect {
    fn default() -> Self {
        Prospect {
            name: String::new(),
            website: None,
            domain: None,
            phone: None,
            address: None,
            found_in_ads: false,
            ad_position: None,
            found_in_maps: false,
            maps_position: None,
            found_in_organic: false,
            organic_position: None,
            rating: None,
            review_count: None,
            category: None,
            emails: vec![],
            signals: None,
            fit_score: 0,
            opportunity_score: 0,
            priority_score: 0.0,
            opportunity_notes: String::new(),
            competition_score: 50,
            market_saturation: Saturation::Medium,
            franchise_competition: false,
            ads_in_market: 0,
            industry_category: IndustryCategory::Standard,
            industry_multiplier: 1.0,
            gbp_has_website: None,
            gbp_website_missing_opportunity: false,
            gbp_opportunity_boost: 0,
            gbp_notes: vec![],
            source: String::new(),
            scraped_at: Utc::now(),
        }
    }
}

impl Prospect {
    /// Merge data from another observation of the same business.
    ///
    /// `self` is the surviving record. Scalar fields are filled only when
    /// missing here; SERP presence flags are OR'd and the better (lower)
    /// position wins; emails are unioned preserving order.
    pub fn merge_from(&mut self, other: &Prospect) {
        if text_missing(&self.website) && !text_missing(&other.website) {
            self.website = other.website.clone();
            self.domain = other.domain.clone();
        }
        if text_missing(&self.phone) && !text_missing(&other.phone) {
            self.phone = other.phone.clone();
        }
        if text_missing(&self.address) && !text_missing(&other.address) {
            self.address = other.address.clone();
        }
        if self.rating.unwrap_or(0.0) == 0.0 && other.rating.unwrap_or(0.0) != 0.0 {
            self.rating = other.rating;
        }
        if self.review_count.unwrap_or(0) == 0 && other.review_count.unwrap_or(0) != 0 {
            self.review_count = other.review_count;
        }
        if text_missing(&self.category) && !text_missing(&other.category) {
            self.category = other.category.clone();
        }

        if other.found_in_ads {
            self.found_in_ads = true;
            self.ad_position = better_position(self.ad_position, other.ad_position);
        }
        if other.found_in_maps {
            self.found_in_maps = true;
            self.maps_position = better_position(self.maps_position, other.maps_position);
        }
        if other.found_in_organic {
            self.found_in_organic = true;
            self.organic_position = better_position(self.organic_position, other.organic_position);
        }

        for email in &other.emails {
            if !self.emails.contains(email) {
                self.emails.push(email.clone());
            }
        }
    }

    /// Fill in the bare domain from the website url when missing.
    pub fn ensure_domain(&mut self) {
        if text_missing(&self.domain) {
            if let Some(website) = &self.website {
                self.domain = domain_from_website(website);
            }
        }
    }
}

fn text_missing(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.is_empty())
}

/// Lower is better; an unset position (`None` or `Some(0)`) is replaced by
/// any position the other record supplies, an existing one only by a
/// strictly lower one.
fn better_position(current: Option<u32>, candidate: Option<u32>) -> Option<u32> {
    match (current, candidate) {
        (_, None) => current,
        (None, Some(c)) => Some(c),
        (Some(0), Some(c)) => Some(c),
        (Some(cur), Some(c)) if c < cur => Some(c),
        _ => current,
    }
}

/// Extract a bare lowercase domain from a website url.
pub fn domain_from_website(website: &str) -> Option<String> {
    let parsed = Url::parse(website).ok()?;
    match parsed.host_str() {
        Some("") => None,
        None => None,
        Some(host) => match host.strip_prefix("www.") {
            Some(h) => Some(h.to_lowercase()),
            None => Some(host.to_lowercase()),
        },
    }
}

fn same_business(a: &Prospect, b: &Prospect) -> bool {
    if let (Some(ad), Some(bd)) = (a.domain.as_deref(), b.domain.as_deref()) {
        if !ad.is_empty() && ad.eq_ignore_ascii_case(bd) {
            return true;
        }
    }
    !a.name.is_empty()
        && !b.name.is_empty()
        && jaro_winkler(&a.name.to_lowercase(), &b.name.to_lowercase()) >= NAME_SIMILARITY_THRESHOLD
}

/// Collapse duplicate observations of the same business into one record.
///
/// First-seen record survives; later duplicates are merged into it via
/// [`Prospect::merge_from`]. Original discovery order is preserved.
pub fn dedupe_prospects(prospects: Vec<Prospect>) -> Vec<Prospect> {
    let mut merged: Vec<Prospect> = Vec::new();

    for prospect in prospects {
        match merged.iter_mut().find(|m| same_business(m, &prospect)) {
            Some(existing) => existing.merge_from(&prospect),
            None => merged.push(prospect),
        }
    }

    merged
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}
