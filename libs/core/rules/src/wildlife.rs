//! Wildlife keyword corpus, critical species table, and product-type
//! terms (§4.2).

use crate::matcher::{table, RuleTable, WeightedTerm};
use std::sync::OnceLock;

/// Species priority tiers (§4.3 stage 3). The scorer multiplies a
/// species term's base weight by the tier multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesPriority {
    Critical,
    High,
    Medium,
}

impl SpeciesPriority {
    pub fn multiplier(self) -> i32 {
        match self {
            SpeciesPriority::Critical => 3,
            SpeciesPriority::High => 2,
            SpeciesPriority::Medium => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SpeciesTerm {
    pub pattern: &'static str,
    pub priority: SpeciesPriority,
    pub base_weight: i32,
}

/// CRITICAL, HIGH, and MEDIUM priority species terms. A representative
/// subset of the named-species vocabulary, large enough to exercise
/// every tier; not a transcription of an external master list.
pub static SPECIES_TABLE: &[SpeciesTerm] = &[
    SpeciesTerm { pattern: "elephant ivory", priority: SpeciesPriority::Critical, base_weight: 25 },
    SpeciesTerm { pattern: "rhino horn", priority: SpeciesPriority::Critical, base_weight: 30 },
    SpeciesTerm { pattern: "tiger bone", priority: SpeciesPriority::Critical, base_weight: 28 },
    SpeciesTerm { pattern: "pangolin scales", priority: SpeciesPriority::Critical, base_weight: 26 },
    SpeciesTerm { pattern: "bear bile", priority: SpeciesPriority::Critical, base_weight: 24 },
    SpeciesTerm { pattern: "tiger skin", priority: SpeciesPriority::Critical, base_weight: 27 },
    SpeciesTerm { pattern: "ivory tusk", priority: SpeciesPriority::Critical, base_weight: 25 },
    SpeciesTerm { pattern: "turtle shell", priority: SpeciesPriority::High, base_weight: 14 },
    SpeciesTerm { pattern: "shark fin", priority: SpeciesPriority::High, base_weight: 15 },
    SpeciesTerm { pattern: "leopard fur", priority: SpeciesPriority::High, base_weight: 16 },
    SpeciesTerm { pattern: "python skin", priority: SpeciesPriority::High, base_weight: 12 },
    SpeciesTerm { pattern: "coral piece", priority: SpeciesPriority::Medium, base_weight: 6 },
    SpeciesTerm { pattern: "exotic feather", priority: SpeciesPriority::Medium, base_weight: 5 },
    SpeciesTerm { pattern: "snake skin", priority: SpeciesPriority::Medium, base_weight: 5 },
    SpeciesTerm { pattern: "pangolin scale powder", priority: SpeciesPriority::Critical, base_weight: 26 },
    SpeciesTerm { pattern: "rhinoceros horn carving", priority: SpeciesPriority::Critical, base_weight: 30 },
    SpeciesTerm { pattern: "saiga antelope horn", priority: SpeciesPriority::High, base_weight: 16 },
    SpeciesTerm { pattern: "clouded leopard pelt", priority: SpeciesPriority::High, base_weight: 17 },
    SpeciesTerm { pattern: "sea turtle shell", priority: SpeciesPriority::High, base_weight: 14 },
    SpeciesTerm { pattern: "hawksbill shell", priority: SpeciesPriority::High, base_weight: 15 },
    SpeciesTerm { pattern: "helmeted hornbill casque", priority: SpeciesPriority::Critical, base_weight: 28 },
    SpeciesTerm { pattern: "tortoiseshell comb", priority: SpeciesPriority::Medium, base_weight: 7 },
    SpeciesTerm { pattern: "seahorse dried", priority: SpeciesPriority::Medium, base_weight: 6 },
];

/// Product-type terms (§4.3 stage 3): medicine, jewelry, carving, raw
/// material kinds that co-occur with species terms.
pub static PRODUCT_TYPE_TERMS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "traditional medicine", weight: 8, tag: "product_medicine" },
    WeightedTerm { pattern: "carved figurine", weight: 6, tag: "product_carving" },
    WeightedTerm { pattern: "hand carved", weight: 5, tag: "product_carving" },
    WeightedTerm { pattern: "raw material", weight: 6, tag: "product_raw" },
    WeightedTerm { pattern: "powder form", weight: 7, tag: "product_medicine" },
    WeightedTerm { pattern: "necklace pendant", weight: 4, tag: "product_jewelry" },
    WeightedTerm { pattern: "estate sale", weight: 3, tag: "provenance" },
    WeightedTerm { pattern: "bangle bracelet", weight: 4, tag: "product_jewelry" },
    WeightedTerm { pattern: "tincture extract", weight: 7, tag: "product_medicine" },
    WeightedTerm { pattern: "capsules supplement", weight: 6, tag: "product_medicine" },
    WeightedTerm { pattern: "taxidermy mount", weight: 5, tag: "product_raw" },
    WeightedTerm { pattern: "inherited collection", weight: 3, tag: "provenance" },
];

/// Broad wildlife indicator corpus used only for category detection
/// (§4.3 stage 2) — does not feed the species/product scoring stage.
/// Spans representative entries across several language tags; the tag
/// is advisory (§4.2), never authoritative.
pub static WILDLIFE_INDICATOR_KEYWORDS: &[WeightedTerm] = &[
    // en
    WeightedTerm { pattern: "ivory", weight: 1, tag: "en" },
    WeightedTerm { pattern: "rhino horn", weight: 1, tag: "en" },
    WeightedTerm { pattern: "tiger bone", weight: 1, tag: "en" },
    WeightedTerm { pattern: "pangolin", weight: 1, tag: "en" },
    WeightedTerm { pattern: "elephant tusk", weight: 1, tag: "en" },
    WeightedTerm { pattern: "bear bile", weight: 1, tag: "en" },
    WeightedTerm { pattern: "shark fin", weight: 1, tag: "en" },
    WeightedTerm { pattern: "turtle shell", weight: 1, tag: "en" },
    // es
    WeightedTerm { pattern: "marfil", weight: 1, tag: "es" },
    WeightedTerm { pattern: "cuerno de rinoceronte", weight: 1, tag: "es" },
    WeightedTerm { pattern: "hueso de tigre", weight: 1, tag: "es" },
    WeightedTerm { pattern: "escamas de pangolín", weight: 1, tag: "es" },
    WeightedTerm { pattern: "colmillo de elefante", weight: 1, tag: "es" },
    WeightedTerm { pattern: "bilis de oso", weight: 1, tag: "es" },
    WeightedTerm { pattern: "aleta de tiburón", weight: 1, tag: "es" },
    WeightedTerm { pattern: "caparazón de tortuga", weight: 1, tag: "es" },
    // fr
    WeightedTerm { pattern: "ivoire", weight: 1, tag: "fr" },
    WeightedTerm { pattern: "corne de rhinocéros", weight: 1, tag: "fr" },
    WeightedTerm { pattern: "os de tigre", weight: 1, tag: "fr" },
    WeightedTerm { pattern: "écailles de pangolin", weight: 1, tag: "fr" },
    WeightedTerm { pattern: "défense d'éléphant", weight: 1, tag: "fr" },
    WeightedTerm { pattern: "bile d'ours", weight: 1, tag: "fr" },
    WeightedTerm { pattern: "aileron de requin", weight: 1, tag: "fr" },
    WeightedTerm { pattern: "carapace de tortue", weight: 1, tag: "fr" },
    // de
    WeightedTerm { pattern: "elfenbein", weight: 1, tag: "de" },
    WeightedTerm { pattern: "nashorn horn", weight: 1, tag: "de" },
    WeightedTerm { pattern: "tigerknochen", weight: 1, tag: "de" },
    WeightedTerm { pattern: "schuppentier schuppen", weight: 1, tag: "de" },
    WeightedTerm { pattern: "elefant stoßzahn", weight: 1, tag: "de" },
    WeightedTerm { pattern: "bärengalle", weight: 1, tag: "de" },
    WeightedTerm { pattern: "haifischflosse", weight: 1, tag: "de" },
    WeightedTerm { pattern: "schildkrötenpanzer", weight: 1, tag: "de" },
    // ru
    WeightedTerm { pattern: "слоновая кость", weight: 1, tag: "ru" },
    WeightedTerm { pattern: "рог носорога", weight: 1, tag: "ru" },
    WeightedTerm { pattern: "кость тигра", weight: 1, tag: "ru" },
    WeightedTerm { pattern: "чешуя панголина", weight: 1, tag: "ru" },
    WeightedTerm { pattern: "бивень слона", weight: 1, tag: "ru" },
    WeightedTerm { pattern: "медвежья желчь", weight: 1, tag: "ru" },
    WeightedTerm { pattern: "акулий плавник", weight: 1, tag: "ru" },
    WeightedTerm { pattern: "черепаший панцирь", weight: 1, tag: "ru" },
    // zh
    WeightedTerm { pattern: "象牙", weight: 1, tag: "zh" },
    WeightedTerm { pattern: "犀牛角", weight: 1, tag: "zh" },
    WeightedTerm { pattern: "虎骨", weight: 1, tag: "zh" },
    WeightedTerm { pattern: "穿山甲鳞片", weight: 1, tag: "zh" },
    WeightedTerm { pattern: "熊胆", weight: 1, tag: "zh" },
    WeightedTerm { pattern: "鱼翅", weight: 1, tag: "zh" },
    WeightedTerm { pattern: "龟壳", weight: 1, tag: "zh" },
    // ja
    WeightedTerm { pattern: "象牙彫刻", weight: 1, tag: "ja" },
    WeightedTerm { pattern: "サイの角", weight: 1, tag: "ja" },
    WeightedTerm { pattern: "虎の骨", weight: 1, tag: "ja" },
    WeightedTerm { pattern: "センザンコウの鱗", weight: 1, tag: "ja" },
    WeightedTerm { pattern: "熊の胆嚢", weight: 1, tag: "ja" },
    WeightedTerm { pattern: "ふかひれ", weight: 1, tag: "ja" },
    WeightedTerm { pattern: "亀の甲羅", weight: 1, tag: "ja" },
    // it
    WeightedTerm { pattern: "avorio", weight: 1, tag: "it" },
    WeightedTerm { pattern: "corno di rinoceronte", weight: 1, tag: "it" },
    WeightedTerm { pattern: "osso di tigre", weight: 1, tag: "it" },
    WeightedTerm { pattern: "squame di pangolino", weight: 1, tag: "it" },
    WeightedTerm { pattern: "zanna di elefante", weight: 1, tag: "it" },
    WeightedTerm { pattern: "bile d'orso", weight: 1, tag: "it" },
    WeightedTerm { pattern: "pinna di squalo", weight: 1, tag: "it" },
    // pt
    WeightedTerm { pattern: "marfim", weight: 1, tag: "pt" },
    WeightedTerm { pattern: "chifre de rinoceronte", weight: 1, tag: "pt" },
    WeightedTerm { pattern: "osso de tigre", weight: 1, tag: "pt" },
    WeightedTerm { pattern: "escamas de pangolim", weight: 1, tag: "pt" },
    WeightedTerm { pattern: "presa de elefante", weight: 1, tag: "pt" },
    WeightedTerm { pattern: "bile de urso", weight: 1, tag: "pt" },
    WeightedTerm { pattern: "barbatana de tubarão", weight: 1, tag: "pt" },
    // nl
    WeightedTerm { pattern: "ivoor", weight: 1, tag: "nl" },
    WeightedTerm { pattern: "neushoorn hoorn", weight: 1, tag: "nl" },
    WeightedTerm { pattern: "tijgerbot", weight: 1, tag: "nl" },
    WeightedTerm { pattern: "pangolijn schubben", weight: 1, tag: "nl" },
    WeightedTerm { pattern: "olifant slagtand", weight: 1, tag: "nl" },
    WeightedTerm { pattern: "haaienvin", weight: 1, tag: "nl" },
    // ar
    WeightedTerm { pattern: "عاج", weight: 1, tag: "ar" },
    WeightedTerm { pattern: "قرن وحيد القرن", weight: 1, tag: "ar" },
    WeightedTerm { pattern: "عظم النمر", weight: 1, tag: "ar" },
    WeightedTerm { pattern: "ناب الفيل", weight: 1, tag: "ar" },
    WeightedTerm { pattern: "زعنفة القرش", weight: 1, tag: "ar" },
    // hi
    WeightedTerm { pattern: "हाथीदांत", weight: 1, tag: "hi" },
    WeightedTerm { pattern: "गैंडे का सींग", weight: 1, tag: "hi" },
    WeightedTerm { pattern: "बाघ की हड्डी", weight: 1, tag: "hi" },
    WeightedTerm { pattern: "पैंगोलिन शल्क", weight: 1, tag: "hi" },
    WeightedTerm { pattern: "भालू पित्त", weight: 1, tag: "hi" },
    // vi
    WeightedTerm { pattern: "ngà voi", weight: 1, tag: "vi" },
    WeightedTerm { pattern: "sừng tê giác", weight: 1, tag: "vi" },
    WeightedTerm { pattern: "xương hổ", weight: 1, tag: "vi" },
    WeightedTerm { pattern: "vảy tê tê", weight: 1, tag: "vi" },
    WeightedTerm { pattern: "mật gấu", weight: 1, tag: "vi" },
    WeightedTerm { pattern: "vây cá mập", weight: 1, tag: "vi" },
    WeightedTerm { pattern: "mai rùa", weight: 1, tag: "vi" },
    // th
    WeightedTerm { pattern: "งาช้าง", weight: 1, tag: "th" },
    WeightedTerm { pattern: "เขาแรด", weight: 1, tag: "th" },
    WeightedTerm { pattern: "กระดูกเสือ", weight: 1, tag: "th" },
    WeightedTerm { pattern: "เกล็ดลิ่น", weight: 1, tag: "th" },
    WeightedTerm { pattern: "น้ำดีหมี", weight: 1, tag: "th" },
    WeightedTerm { pattern: "ครีบฉลาม", weight: 1, tag: "th" },
    WeightedTerm { pattern: "กระดองเต่า", weight: 1, tag: "th" },
    // ko
    WeightedTerm { pattern: "상아", weight: 1, tag: "ko" },
    WeightedTerm { pattern: "코뿔소 뿔", weight: 1, tag: "ko" },
    WeightedTerm { pattern: "호랑이 뼈", weight: 1, tag: "ko" },
    WeightedTerm { pattern: "천산갑 비늘", weight: 1, tag: "ko" },
    WeightedTerm { pattern: "곰 쓸개", weight: 1, tag: "ko" },
    WeightedTerm { pattern: "상어 지느러미", weight: 1, tag: "ko" },
    WeightedTerm { pattern: "거북 등딱지", weight: 1, tag: "ko" },
    // id
    WeightedTerm { pattern: "gading gajah", weight: 1, tag: "id" },
    WeightedTerm { pattern: "cula badak", weight: 1, tag: "id" },
    WeightedTerm { pattern: "tulang harimau", weight: 1, tag: "id" },
    WeightedTerm { pattern: "sisik trenggiling", weight: 1, tag: "id" },
    WeightedTerm { pattern: "empedu beruang", weight: 1, tag: "id" },
    WeightedTerm { pattern: "sirip hiu", weight: 1, tag: "id" },
    WeightedTerm { pattern: "cangkang kura-kura", weight: 1, tag: "id" },
];

/// Source-region terms whose presence bumps the trafficking-pattern
/// score in §4.3 stage 4 ("location/origin claims tied to known source
/// regions").
pub static SOURCE_REGION_TERMS: &[WeightedTerm] = &[
    WeightedTerm { pattern: "direct from africa", weight: 5, tag: "origin" },
    WeightedTerm { pattern: "imported from vietnam", weight: 5, tag: "origin" },
    WeightedTerm { pattern: "sourced in southeast asia", weight: 4, tag: "origin" },
];

static SPECIES_CELL: OnceLock<RuleTable> = OnceLock::new();
static SPECIES_PATTERNS: OnceLock<Vec<WeightedTerm>> = OnceLock::new();

fn species_as_weighted() -> &'static [WeightedTerm] {
    SPECIES_PATTERNS.get_or_init(|| {
        SPECIES_TABLE
            .iter()
            .map(|s| WeightedTerm { pattern: s.pattern, weight: s.base_weight * s.priority.multiplier(), tag: "species" })
            .collect()
    })
}

/// Matched species terms, each paired with its tier for the caller to
/// report which multiplier applied.
pub fn match_species(text: &str) -> Vec<(&'static SpeciesTerm, i32)> {
    let rt = table(&SPECIES_CELL, species_as_weighted());
    rt.matches(text)
        .into_iter()
        .filter_map(|w| {
            SPECIES_TABLE
                .iter()
                .find(|s| s.pattern == w.pattern)
                .map(|s| (s, w.weight))
        })
        .collect()
}

static PRODUCT_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn product_type_table() -> &'static RuleTable {
    table(&PRODUCT_CELL, PRODUCT_TYPE_TERMS)
}

static WILDLIFE_INDICATOR_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn wildlife_indicator_table() -> &'static RuleTable {
    table(&WILDLIFE_INDICATOR_CELL, WILDLIFE_INDICATOR_KEYWORDS)
}

static SOURCE_REGION_CELL: OnceLock<RuleTable> = OnceLock::new();
pub fn source_region_table() -> &'static RuleTable {
    table(&SOURCE_REGION_CELL, SOURCE_REGION_TERMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_species_outweighs_medium_species() {
        let matches = match_species("a beautiful elephant ivory carving with coral piece");
        let critical = matches.iter().find(|(s, _)| s.pattern == "elephant ivory").unwrap();
        let medium = matches.iter().find(|(s, _)| s.pattern == "coral piece").unwrap();
        assert!(critical.1 > medium.1);
    }

    #[test]
    fn wildlife_indicator_table_detects_non_english_terms() {
        assert!(wildlife_indicator_table().is_match("Vendo marfil antiguo"));
    }
}
