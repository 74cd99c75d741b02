use serde_json::Value;

use crate::domain::Prospect;

/// Marketplace/directory domains that are never real businesses.
#[rustfmt::skip]
static AGGREGATORS: &[&str] = &[
    "yellowpages", "truelocal", "hotfrog", "yelp", "airtasker",
    "hipages", "oneflare", "serviceseeking", "visitorsguide",
    "localsearch", "startlocal", "dlook", "whitepages",
    "infobel", "cylex", "aussieweb", "findlocal",
];

/// Business types filtered out unless the search itself asks for them.
#[rustfmt::skip]
static IRRELEVANT_TYPES: &[&str] = &[
    "internet cafe", "cyber cafe", "gaming", "esports", "lan cafe",
    "restaurant", "cafe", "coffee", "bakery", "takeaway",
    "hotel", "motel", "hostel", "gym", "fitness", "yoga",
    "hairdresser", "barber", "beauty salon", "nail salon",
    "supermarket", "grocery", "convenience store",
    "fast food", "pizza", "burger", "kebab",
];

/// Synonym sets for strict-mode query matching. Ordered: the first base
/// term matching the query wins.
#[rustfmt::skip]
static SYNONYMS: &[(&str, &[&str])] = &[
    ("buyer's agent", &["buyer", "buyers", "advocate", "advocacy", "property buyer", "buyer agent"]),
    ("buyers agent", &["buyer", "buyers", "advocate", "advocacy", "property buyer", "buyer agent"]),
    ("plumber", &["plumber", "plumbing", "drain", "gas fitter", "gasfitter"]),
    ("electrician", &["electrician", "electrical", "sparky", "electric"]),
    ("accountant", &["accountant", "accounting", "bookkeeper", "tax", "cpa"]),
    ("real estate", &["real estate", "realestate", "property", "realtor"]),
    ("lawyer", &["lawyer", "solicitor", "attorney", "legal", "law firm"]),
    ("dentist", &["dentist", "dental", "orthodontist"]),
    ("doctor", &["doctor", "medical", "clinic", "gp", "physician"]),
    ("mechanic", &["mechanic", "automotive", "auto repair", "car service"]),
    ("builder", &["builder", "construction", "contractor", "building"]),
    ("painter", &["painter", "painting", "decorator"]),
    ("landscaper", &["landscaper", "landscaping", "garden", "lawn"]),
    ("cleaner", &["cleaner", "cleaning", "maid", "janitor"]),
    ("removalist", &["removalist", "removal", "moving", "mover"]),
    ("photographer", &["photographer", "photography", "photo studio"]),
    ("web developer", &["web developer", "web design", "website", "developer"]),
    ("marketing", &["marketing", "digital marketing", "seo", "advertising"]),
];

fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Synonym set for a query: the first base term whose name or any synonym
/// occurs in the query, degrading to the lowercased query itself.
pub fn synonyms_for_query(query: &str) -> Vec<String> {
    let query_lower = normalize_text(query);

    for (base_term, syns) in SYNONYMS {
        if query_lower.contains(base_term) || syns.iter().any(|s| query_lower.contains(s)) {
            let mut all: Vec<String> = syns.iter().map(|s| s.to_string()).collect();
            all.push(base_term.to_string());
            return all;
        }
    }

    vec![query_lower]
}

fn is_aggregator(domain: Option<&str>) -> bool {
    match domain {
        Some(domain) if !domain.is_empty() => {
            let domain_lower = normalize_text(domain);
            AGGREGATORS.iter().any(|agg| domain_lower.contains(agg))
        }
        _ => false,
    }
}

fn is_irrelevant_type(name: &str, business_type: Option<&str>, query: &str) -> bool {
    let query_lower = normalize_text(query);
    let name_lower = normalize_text(name);
    let type_lower = normalize_text(business_type.unwrap_or(""));

    IRRELEVANT_TYPES.iter().any(|irr_type| {
        // Searching for the type itself makes it relevant. This guard
        // checks the raw phrase only, not the query's synonym set.
        !query_lower.contains(irr_type)
            && (name_lower.contains(irr_type) || type_lower.contains(irr_type))
    })
}

fn matches_query_type(name: &str, domain: Option<&str>, query: &str) -> bool {
    let name_lower = normalize_text(name);
    let domain_lower = normalize_text(domain.unwrap_or(""));

    synonyms_for_query(query)
        .iter()
        .any(|syn| name_lower.contains(syn) || domain_lower.contains(syn))
}

/// Check whether a business belongs in the results for a search query.
///
/// Three checks in order, first failure wins: aggregator domain,
/// irrelevant business type, and (strict mode only) a positive synonym
/// match against the query.
pub fn is_relevant(
    name: &str,
    domain: Option<&str>,
    business_type: Option<&str>,
    search_query: &str,
    strict: bool,
) -> (bool, &'static str) {
    if is_aggregator(domain) {
        return (false, "Aggregator domain");
    }

    if is_irrelevant_type(name, business_type, search_query) {
        return (false, "Irrelevant business type");
    }

    if strict && !matches_query_type(name, domain, search_query) {
        return (false, "No match for query type");
    }

    (true, "Relevant")
}

/// Partition loosely-shaped prospect records into kept and removed.
///
/// Removed records are annotated with a `_filtered_reason` field.
pub fn filter_records(
    records: Vec<Value>,
    search_query: &str,
    strict: bool,
) -> (Vec<Value>, Vec<Value>) {
    let total = records.len();
    let mut kept: Vec<Value> = vec![];
    let mut removed: Vec<Value> = vec![];

    for mut record in records {
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let domain = record
            .get("domain")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let business_type = record
            .get("type")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| record.get("business_type").and_then(Value::as_str))
            .unwrap_or("")
            .to_string();

        let (relevant, reason) = is_relevant(
            &name,
            Some(&domain),
            Some(&business_type),
            search_query,
            strict,
        );

        if relevant {
            kept.push(record);
        } else {
            log::debug!("Filtered: {} - {}", name, reason);
            if let Value::Object(map) = &mut record {
                map.insert(
                    "_filtered_reason".to_string(),
                    Value::String(reason.to_string()),
                );
            }
            removed.push(record);
        }
    }

    if !removed.is_empty() {
        log::info!(
            "Filtered {} irrelevant records from {} total",
            removed.len(),
            total
        );
    }

    (kept, removed)
}

/// Filter typed prospects, dropping irrelevant ones without mutation.
pub fn filter_prospects(prospects: Vec<Prospect>, search_query: &str, strict: bool) -> Vec<Prospect> {
    let mut kept: Vec<Prospect> = vec![];

    for prospect in prospects {
        let (relevant, reason) = is_relevant(
            &prospect.name,
            prospect.domain.as_deref(),
            prospect.category.as_deref(),
            search_query,
            strict,
        );

        if relevant {
            kept.push(prospect);
        } else {
            log::debug!("Filtered prospect: {} - {}", prospect.name, reason);
        }
    }

    kept
}
