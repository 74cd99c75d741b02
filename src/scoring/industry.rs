use serde::{Deserialize, Serialize};

/// Value tier for a business category.
///
/// Commoditised trades are race-to-the-bottom markets; specialists are
/// rare, high-margin niches that justify premium rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndustryCategory {
    Commoditised,
    Standard,
    Niche,
    Specialist,
}

impl IndustryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndustryCategory::Commoditised => "commoditised",
            IndustryCategory::Standard => "standard",
            IndustryCategory::Niche => "niche",
            IndustryCategory::Specialist => "specialist",
        }
    }
}

impl Default for IndustryCategory {
    fn default() -> Self {
        IndustryCategory::Standard
    }
}

/// Industry classification result.
#[derive(Debug, Clone, Serialize)]
pub struct IndustryClassification {
    pub category: IndustryCategory,
    /// 0.4 - 1.6
    pub multiplier: f64,
    /// 0 - 1
    pub confidence: f64,
    pub matched_keywords: Vec<&'static str>,
    pub notes: &'static str,
}

struct IndustryRule {
    keywords: &'static [&'static str],
    category: IndustryCategory,
    multiplier: f64,
    notes: &'static str,
}

use IndustryCategory::{Commoditised, Niche, Specialist, Standard};

/// Ordered rule table. Order is load-bearing: on equal match scores the
/// earlier rule wins, so rules must stay a sequence, never a map.
#[rustfmt::skip]
static INDUSTRY_RULES: &[IndustryRule] = &[
    // === Commoditised (0.4-0.6): high volume, low margin ===
    IndustryRule { keywords: &["lawn mow", "mowing", "grass cut"], category: Commoditised, multiplier: 0.4, notes: "Highly commoditised, price war market" },
    IndustryRule { keywords: &["cleaner", "cleaning service", "house clean", "office clean", "domestic clean"], category: Commoditised, multiplier: 0.5, notes: "High competition, low margins" },
    IndustryRule { keywords: &["rubbish removal", "junk removal", "skip bin", "waste removal"], category: Commoditised, multiplier: 0.5, notes: "Price-driven commodity" },
    IndustryRule { keywords: &["plumber", "plumbing", "blocked drain", "gas fitter", "hot water"], category: Commoditised, multiplier: 0.6, notes: "Franchise-heavy market" },
    IndustryRule { keywords: &["electrician", "electrical", "sparky"], category: Commoditised, multiplier: 0.6, notes: "Commoditised trade" },
    IndustryRule { keywords: &["painter", "painting service", "house paint"], category: Commoditised, multiplier: 0.55, notes: "Low barrier to entry" },
    IndustryRule { keywords: &["handyman", "odd jobs", "home repair"], category: Commoditised, multiplier: 0.5, notes: "Gig economy competition" },
    IndustryRule { keywords: &["removalist", "moving service", "furniture remov"], category: Commoditised, multiplier: 0.55, notes: "Seasonal, price-sensitive" },
    IndustryRule { keywords: &["pest control", "termite", "exterminator"], category: Commoditised, multiplier: 0.6, notes: "Some franchise competition" },
    IndustryRule { keywords: &["carpet clean", "upholstery clean"], category: Commoditised, multiplier: 0.5, notes: "Low differentiation" },
    IndustryRule { keywords: &["pressure wash", "pressure clean"], category: Commoditised, multiplier: 0.5, notes: "Easy entry market" },
    IndustryRule { keywords: &["gutter clean", "roof clean"], category: Commoditised, multiplier: 0.55, notes: "Seasonal commodity" },
    IndustryRule { keywords: &["locksmith"], category: Commoditised, multiplier: 0.55, notes: "Emergency service commodity" },
    IndustryRule { keywords: &["towing", "tow truck"], category: Commoditised, multiplier: 0.55, notes: "Emergency service" },

    // === Standard (0.8-1.0): normal service businesses ===
    IndustryRule { keywords: &["accountant", "accounting", "bookkeeper", "tax agent", "bas agent"], category: Standard, multiplier: 0.9, notes: "Professional service" },
    IndustryRule { keywords: &["lawyer", "solicitor", "legal service"], category: Standard, multiplier: 1.0, notes: "Regulated profession" },
    IndustryRule { keywords: &["dentist", "dental"], category: Standard, multiplier: 0.95, notes: "Healthcare, location-dependent" },
    IndustryRule { keywords: &["physio", "physiotherap", "chiropractor", "osteopath"], category: Standard, multiplier: 0.9, notes: "Allied health" },
    IndustryRule { keywords: &["mechanic", "auto repair", "car service"], category: Standard, multiplier: 0.85, notes: "Established trade" },
    IndustryRule { keywords: &["hairdresser", "hair salon", "barber", "beauty salon"], category: Standard, multiplier: 0.85, notes: "Personal service" },
    IndustryRule { keywords: &["real estate agent", "property manager"], category: Standard, multiplier: 0.9, notes: "Franchise presence" },
    IndustryRule { keywords: &["mortgage broker", "finance broker"], category: Standard, multiplier: 0.95, notes: "Financial service" },
    IndustryRule { keywords: &["photographer", "videographer"], category: Standard, multiplier: 0.85, notes: "Creative, portfolio-driven" },
    IndustryRule { keywords: &["web design", "web develop", "website design"], category: Standard, multiplier: 0.9, notes: "Technical service" },
    IndustryRule { keywords: &["personal trainer", "fitness coach"], category: Standard, multiplier: 0.8, notes: "Personal service" },
    IndustryRule { keywords: &["florist", "flower shop"], category: Standard, multiplier: 0.85, notes: "Retail/service hybrid" },
    IndustryRule { keywords: &["vet", "veterinar"], category: Standard, multiplier: 0.9, notes: "Healthcare" },
    IndustryRule { keywords: &["optometrist", "optical"], category: Standard, multiplier: 0.9, notes: "Healthcare retail" },
    IndustryRule { keywords: &["psycholog", "counsell", "therapist"], category: Standard, multiplier: 0.95, notes: "Mental health professional" },
    IndustryRule { keywords: &["massage", "remedial massage"], category: Standard, multiplier: 0.85, notes: "Wellness service" },
    IndustryRule { keywords: &["podiatr", "foot clinic"], category: Standard, multiplier: 0.9, notes: "Allied health" },
    IndustryRule { keywords: &["baker", "bakery", "cake shop"], category: Standard, multiplier: 0.85, notes: "Food retail" },
    IndustryRule { keywords: &["restaurant", "cafe", "coffee shop"], category: Standard, multiplier: 0.8, notes: "Hospitality" },
    IndustryRule { keywords: &["caterer", "catering"], category: Standard, multiplier: 0.85, notes: "Event service" },

    // === Niche (1.2-1.4): specialised services, less competition ===
    IndustryRule { keywords: &["buyer's agent", "buyers agent", "buyer agent", "buyers advocate"], category: Niche, multiplier: 1.4, notes: "High-value property niche" },
    IndustryRule { keywords: &["architect", "architectural"], category: Niche, multiplier: 1.3, notes: "Professional design" },
    IndustryRule { keywords: &["interior design"], category: Niche, multiplier: 1.25, notes: "Design specialist" },
    IndustryRule { keywords: &["landscape architect", "landscape design", "garden design"], category: Niche, multiplier: 1.25, notes: "Outdoor design specialist" },
    IndustryRule { keywords: &["heritage", "restoration", "conservation"], category: Niche, multiplier: 1.4, notes: "Heritage specialist" },
    IndustryRule { keywords: &["migration agent", "immigration", "visa agent"], category: Niche, multiplier: 1.35, notes: "Specialist legal" },
    IndustryRule { keywords: &["financial planner", "wealth advis", "financial advis"], category: Niche, multiplier: 1.3, notes: "High-value professional" },
    IndustryRule { keywords: &["building certif", "building inspect", "pre-purchase inspect"], category: Niche, multiplier: 1.2, notes: "Specialist inspection" },
    IndustryRule { keywords: &["quantity survey", "cost estimat"], category: Niche, multiplier: 1.25, notes: "Construction specialist" },
    IndustryRule { keywords: &["town planner", "urban planner", "planning consult"], category: Niche, multiplier: 1.3, notes: "Development specialist" },
    IndustryRule { keywords: &["acoustic", "noise consult", "sound engineer"], category: Niche, multiplier: 1.35, notes: "Technical specialist" },
    IndustryRule { keywords: &["survey", "land survey", "cadastral"], category: Niche, multiplier: 1.25, notes: "Licensed specialist" },
    IndustryRule { keywords: &["arborist", "tree surgeon"], category: Niche, multiplier: 1.2, notes: "Specialist trade" },
    IndustryRule { keywords: &["pool build", "swimming pool construct"], category: Niche, multiplier: 1.2, notes: "Specialist construction" },
    IndustryRule { keywords: &["commercial fitout", "office fitout", "shopfitt"], category: Niche, multiplier: 1.3, notes: "Commercial specialist" },
    IndustryRule { keywords: &["strata manag", "body corporate"], category: Niche, multiplier: 1.35, notes: "Property management niche" },
    IndustryRule { keywords: &["customs broker", "freight forward"], category: Niche, multiplier: 1.3, notes: "Import/export specialist" },
    IndustryRule { keywords: &["ip lawyer", "patent attorney", "trademark"], category: Niche, multiplier: 1.4, notes: "Specialist legal" },
    IndustryRule { keywords: &["family law", "divorce lawyer"], category: Niche, multiplier: 1.25, notes: "Specialist legal" },
    IndustryRule { keywords: &["conveyancer", "conveyancing"], category: Niche, multiplier: 1.2, notes: "Property legal specialist" },
    IndustryRule { keywords: &["executive coach", "business coach", "leadership coach"], category: Niche, multiplier: 1.35, notes: "High-value consulting" },
    IndustryRule { keywords: &["hr consult", "recruitment agency"], category: Niche, multiplier: 1.25, notes: "Business service" },

    // === Specialist (1.4-1.6): very low competition ===
    IndustryRule { keywords: &["aviation", "aircraft", "helicopter", "pilot training"], category: Specialist, multiplier: 1.6, notes: "Highly specialised" },
    IndustryRule { keywords: &["marine survey", "boat survey", "vessel inspect"], category: Specialist, multiplier: 1.5, notes: "Marine specialist" },
    IndustryRule { keywords: &["marine engineer", "boat mechanic"], category: Specialist, multiplier: 1.45, notes: "Marine trade" },
    IndustryRule { keywords: &["medical equipment", "healthcare equipment"], category: Specialist, multiplier: 1.5, notes: "Medical industry" },
    IndustryRule { keywords: &["veterinary specialist", "animal surgeon", "equine vet"], category: Specialist, multiplier: 1.45, notes: "Specialist vet" },
    IndustryRule { keywords: &["mining consult", "resources consult", "geolog"], category: Specialist, multiplier: 1.5, notes: "Resources sector" },
    IndustryRule { keywords: &["environmental consult", "ecology", "contamination"], category: Specialist, multiplier: 1.4, notes: "Environmental specialist" },
    IndustryRule { keywords: &["elevator", "lift service", "escalator"], category: Specialist, multiplier: 1.45, notes: "Vertical transport" },
    IndustryRule { keywords: &["fire protection", "fire engineer", "sprinkler system"], category: Specialist, multiplier: 1.4, notes: "Fire safety specialist" },
    IndustryRule { keywords: &["data centre", "server room"], category: Specialist, multiplier: 1.5, notes: "IT infrastructure" },
    IndustryRule { keywords: &["ev charger", "electric vehicle charg"], category: Specialist, multiplier: 1.4, notes: "Emerging specialist" },
    IndustryRule { keywords: &["solar install", "solar panel"], category: Niche, multiplier: 1.2, notes: "Renewable energy (becoming commoditised)" },
    IndustryRule { keywords: &["cybersecurity", "penetration test", "security audit"], category: Specialist, multiplier: 1.5, notes: "IT security" },
    IndustryRule { keywords: &["forensic account", "fraud investigat"], category: Specialist, multiplier: 1.5, notes: "Specialist accounting" },
    IndustryRule { keywords: &["medical special", "surgeon", "cardiolog", "oncolog"], category: Specialist, multiplier: 1.5, notes: "Medical specialist" },
    IndustryRule { keywords: &["aerospace", "defence contractor"], category: Specialist, multiplier: 1.6, notes: "High-security sector" },
    IndustryRule { keywords: &["nuclear", "radiation"], category: Specialist, multiplier: 1.6, notes: "Regulated specialist" },
    IndustryRule { keywords: &["subsea", "offshore", "diving contractor"], category: Specialist, multiplier: 1.5, notes: "Marine/oil & gas" },
];

/// Classify a business into a value category.
///
/// Total: any input, including the empty string, resolves to a
/// classification (`standard` / 1.0x when nothing matches). Keywords are
/// matched as substrings on purpose - it tolerates compound words and
/// plural variants cheaply at the cost of occasional false positives.
pub fn classify_industry(
    business_type: &str,
    business_name: Option<&str>,
) -> IndustryClassification {
    let mut search_text = business_type.to_lowercase();
    if let Some(name) = business_name {
        search_text.push(' ');
        search_text.push_str(&name.to_lowercase());
    }

    let mut best_match: Option<&IndustryRule> = None;
    let mut best_match_score = 0.0_f64;
    let mut matched_keywords: Vec<&'static str> = vec![];

    for rule in INDUSTRY_RULES {
        let matches: Vec<&'static str> = rule
            .keywords
            .iter()
            .copied()
            .filter(|kw| search_text.contains(kw))
            .collect();

        if matches.is_empty() {
            continue;
        }

        // Longer matched keywords are more specific, so they break ties
        // between rules with the same match count.
        let longest = matches.iter().map(|m| m.len()).max().unwrap_or(0);
        let match_score = matches.len() as f64 + longest as f64 / 100.0;

        if match_score > best_match_score {
            best_match_score = match_score;
            best_match = Some(rule);
            matched_keywords = matches;
        }
    }

    match best_match {
        Some(rule) => IndustryClassification {
            category: rule.category,
            multiplier: rule.multiplier,
            confidence: (best_match_score * 0.4).min(1.0),
            matched_keywords,
            notes: rule.notes,
        },
        None => IndustryClassification {
            category: IndustryCategory::Standard,
            multiplier: 1.0,
            confidence: 0.2,
            matched_keywords: vec![],
            notes: "Unclassified - using default",
        },
    }
}
