//! The eleven-stage threat scoring pipeline (§4.3).

use sentinel_core_rules::{context, exclusion, human_trafficking, trafficking_pattern, wildlife};
use sentinel_domain_models::{
    Detection, Listing, Platform, Price, ThreatAssessment, ThreatCategory, ThreatDomain,
    ThreatLevel,
};

/// A price numerically below this for a species/medicine/jewelry match
/// is implausible for genuine wildlife-product inventory (stage 7).
const IMPLAUSIBLY_LOW_PRICE: f64 = 5.0;

/// A price above this for a critical-species match is implausible for
/// a casual marketplace listing (stage 7) and itself a signal.
const IMPLAUSIBLY_HIGH_PRICE: f64 = 50_000.0;

/// Run all eleven stages against `listing`'s searchable text and
/// return a complete, deterministic assessment. Never fails.
pub fn assess(listing: &Listing, domain: ThreatDomain) -> ThreatAssessment {
    let text = listing.searchable_text();
    let mut indicators: Vec<String> = Vec::new();

    // Stage 1: exclusion pre-check.
    let exclusion_weight = exclusion::exclusion_weight(&text);
    let exclusion_weight = if exclusion_weight >= 2 { exclusion_weight } else { 0 };
    if exclusion_weight > 0 {
        indicators.push(format!("exclusion_weight={exclusion_weight}"));
    }

    // Stage 2: category detection.
    let wildlife_hits = wildlife::wildlife_indicator_table().matches(&text).len();
    let ht_hits = human_trafficking::ht_indicator_table().matches(&text).len();
    let category = match (wildlife_hits > 0, ht_hits > 0) {
        (true, true) => ThreatCategory::Both,
        (true, false) => ThreatCategory::Wildlife,
        (false, true) => ThreatCategory::HumanTrafficking,
        (false, false) => ThreatCategory::Safe,
    };

    // Stage 3: species/product scoring (wildlife path).
    let species_matches = wildlife::match_species(&text);
    let species_weight: i32 = species_matches.iter().map(|(_, w)| w).sum();
    let has_critical_species = species_matches
        .iter()
        .any(|(s, _)| s.priority == wildlife::SpeciesPriority::Critical);
    let product_weight = wildlife::product_type_table().total_weight(&text);
    if species_weight > 0 {
        indicators.push(format!("species_weight={species_weight}"));
    }
    if product_weight > 0 {
        indicators.push(format!("product_weight={product_weight}"));
    }

    // Stage 4: trafficking-pattern scoring (both paths).
    let pattern_weight = trafficking_pattern::trafficking_pattern_weight(&text);
    if pattern_weight > 0 {
        indicators.push(format!("pattern_weight={pattern_weight}"));
    }

    // Stage 5: human-trafficking indicator scoring (HT path).
    let age_concern_weight = human_trafficking::age_concern_table().total_weight(&text);
    let control_weight = human_trafficking::control_pattern_table().total_weight(&text);
    let financial_weight = human_trafficking::financial_exploitation_table().total_weight(&text);
    let coded_weight = human_trafficking::coded_language_table().total_weight(&text);
    let ht_weight = age_concern_weight + control_weight + financial_weight + coded_weight;
    let has_age_concern = age_concern_weight > 0;
    if ht_weight > 0 {
        indicators.push(format!("ht_weight={ht_weight}"));
    }

    // Stage 6: context modifiers.
    let context_weight = context::context_adjustment(&text);
    if context_weight != 0 {
        indicators.push(format!("context_weight={context_weight}"));
    }

    // Stage 7: price analysis.
    let price_weight = price_stage_weight(listing.price.as_ref(), product_weight > 0, has_critical_species);
    if price_weight > 0 {
        indicators.push(format!("price_weight={price_weight}"));
    }

    // Stage 8: platform risk multiplier.
    let multiplier = listing.platform.risk_multiplier();

    // Stage 9: aggregation.
    let stage_total = species_weight + product_weight + pattern_weight + ht_weight + price_weight;
    let raw = (stage_total as f64) * multiplier - (exclusion_weight as f64) + (context_weight as f64);
    let score = raw.round().clamp(0.0, 100.0) as i32;

    // Stage 10: level assignment with overrides.
    let mut level = ThreatLevel::from_score(score);
    if has_critical_species {
        level = level.max(ThreatLevel::High);
    }
    let mut requires_human_review = false;
    if has_age_concern {
        level = level.max(ThreatLevel::High);
        requires_human_review = true;
    }
    if category == ThreatCategory::Both {
        requires_human_review = true;
    }

    // Stage 11: confidence.
    let distinct_categories = [
        species_weight > 0 || product_weight > 0,
        ht_weight > 0,
        pattern_weight > 0,
        price_weight > 0,
    ]
    .iter()
    .filter(|&&matched| matched)
    .count();
    let confidence = (0.5 + 0.1 * (distinct_categories as f64) - 0.1 * (exclusion_weight as f64))
        .min(1.0)
        .max(0.0);

    let reasoning = format!(
        "domain={domain:?} category={category:?} stage_total={stage_total} multiplier={multiplier:.2} exclusion={exclusion_weight} context={context_weight} raw={raw:.1}"
    );

    ThreatAssessment {
        score,
        level,
        category,
        requires_human_review,
        confidence,
        reasoning,
        indicators,
    }
}

fn price_stage_weight(price: Option<&Price>, matched_product: bool, has_critical_species: bool) -> i32 {
    let Some(amount) = price.and_then(Price::numeric_amount) else {
        return 0;
    };
    let mut weight = 0;
    if matched_product && amount < IMPLAUSIBLY_LOW_PRICE {
        weight += 10;
    }
    if has_critical_species && amount > IMPLAUSIBLY_HIGH_PRICE {
        weight += 10;
    }
    weight
}

/// Build a persistence-ready `Detection` from a listing, its assessment,
/// and scan-run metadata.
pub fn to_detection(
    listing: &Listing,
    assessment: &ThreatAssessment,
    search_term: &str,
    backfill: bool,
) -> Detection {
    Detection {
        evidence_id: uuid::Uuid::new_v4().to_string(),
        observed_at: listing.observed_at,
        platform: listing.platform,
        listing_url: listing.url.clone(),
        listing_title: listing.title.clone(),
        listing_description: listing.description.clone(),
        listing_price: listing
            .price
            .as_ref()
            .map(price_display)
            .unwrap_or_default(),
        listing_location: listing.location.clone(),
        search_term: search_term.to_string(),
        threat_score: assessment.score,
        threat_level: assessment.level,
        threat_category: assessment.category,
        requires_human_review: assessment.requires_human_review,
        confidence_score: assessment.confidence,
        enhancement_notes: assessment.reasoning.clone(),
        vision_analyzed: false,
        backfill,
    }
}

fn price_display(price: &Price) -> String {
    match price {
        Price::Raw { text } => text.clone(),
        Price::Parsed { currency, amount } => match currency {
            Some(c) => format!("{amount:.2} {c}"),
            None => format!("{amount:.2}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn listing(title: &str, description: &str, price: Option<Price>) -> Listing {
        Listing {
            platform: Platform::Ebay,
            platform_id: None,
            title: title.to_string(),
            description: description.to_string(),
            price,
            url: "https://example.com/item/1".to_string(),
            location: String::new(),
            seller_info: BTreeMap::new(),
            image_url: None,
            observed_at: Utc::now(),
            search_term: "test".to_string(),
        }
    }

    #[test]
    fn critical_species_match_forces_high_or_above() {
        let l = listing("Rare elephant ivory carving", "traditional medicine, hand carved", None);
        let a = assess(&l, ThreatDomain::Wildlife);
        assert!(a.level >= ThreatLevel::High);
    }

    #[test]
    fn age_concern_forces_review_and_high() {
        let l = listing(
            "Companion available",
            "young new in town, cash only, housing provided",
            None,
        );
        let a = assess(&l, ThreatDomain::HumanTrafficking);
        assert!(a.requires_human_review);
        assert!(a.level >= ThreatLevel::High);
    }

    #[test]
    fn exclusion_heavy_toy_listing_scores_low() {
        let l = listing(
            "Toy elephant plush",
            "ivory colored toy elephant, plush, child safe",
            Some(Price::Parsed { currency: Some("USD".into()), amount: 9.99 }),
        );
        let a = assess(&l, ThreatDomain::Wildlife);
        assert_eq!(a.category, ThreatCategory::Safe);
        assert!(a.score < 25);
    }

    #[test]
    fn both_category_requires_review() {
        let l = listing(
            "Ivory and companionship package",
            "elephant ivory carving, new in town, 24/7 available",
            None,
        );
        let a = assess(&l, ThreatDomain::Wildlife);
        assert_eq!(a.category, ThreatCategory::Both);
        assert!(a.requires_human_review);
    }

    #[test]
    fn cites_certificate_lowers_confidence_penalty_not_score_floor() {
        let l = listing(
            "Antique ivory piece",
            "elephant ivory, CITES certificate #AB1234 included",
            None,
        );
        let a = assess(&l, ThreatDomain::Wildlife);
        // Context reduces the raw score but does not invalidate the assessment.
        assert!(a.score >= 0 && a.score <= 100);
    }
}
