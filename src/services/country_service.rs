//! Static per-country tables: currency, haul classification, hub grouping,
//! and the emergency / visa / insurance block.

use crate::models::{extras::EmergencyInfo, itinerary_item::LocalizedText};

const LONG_HAUL_COUNTRIES: &[&str] = &[
    "GB", "FR", "IT", "DE", "ES", "NL", "CH", "AU", "NZ", "AE", "QA", "TR", "US", "CA",
];

const OTHER_KEY: &str = "Other";
const CONSULAR_HOTLINE: &str = "+86-10-12308";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubGroup {
    Europe,
    MiddleEast,
    Oceania,
    EastAsia,
    SoutheastAsia,
    Other,
}

struct Currency {
    country: &'static str,
    code: &'static str,
    /// Local units per one reference-zone unit (CNY).
    per_cny: f64,
}

const CURRENCIES: &[Currency] = &[
    Currency { country: "CN", code: "CNY", per_cny: 1.0 },
    Currency { country: "JP", code: "JPY", per_cny: 20.0 },
    Currency { country: "KR", code: "KRW", per_cny: 190.0 },
    Currency { country: "TH", code: "THB", per_cny: 5.0 },
    Currency { country: "SG", code: "SGD", per_cny: 0.19 },
    Currency { country: "HK", code: "HKD", per_cny: 1.1 },
    Currency { country: "TW", code: "TWD", per_cny: 4.5 },
    Currency { country: "AU", code: "AUD", per_cny: 0.21 },
    Currency { country: "AE", code: "AED", per_cny: 0.51 },
    Currency { country: "QA", code: "QAR", per_cny: 0.51 },
    Currency { country: "TR", code: "TRY", per_cny: 4.6 },
    Currency { country: "GB", code: "GBP", per_cny: 0.11 },
    Currency { country: "FR", code: "EUR", per_cny: 0.13 },
    Currency { country: "IT", code: "EUR", per_cny: 0.13 },
    Currency { country: "DE", code: "EUR", per_cny: 0.13 },
    Currency { country: "ES", code: "EUR", per_cny: 0.13 },
    Currency { country: OTHER_KEY, code: "USD", per_cny: 0.14 },
];

struct EmergencyEntry {
    country: &'static str,
    police: &'static str,
    ambulance: &'static str,
    visa_en: &'static str,
    visa_zh: &'static str,
    insurance_en: &'static str,
    insurance_zh: &'static str,
}

const EMERGENCY: &[EmergencyEntry] = &[
    EmergencyEntry {
        country: "JP",
        police: "110",
        ambulance: "119",
        visa_en: "Single-entry tourist visa required; apply 2-3 weeks ahead.",
        visa_zh: "需办理单次旅游签证，建议提前2-3周申请。",
        insurance_en: "Medical costs are high; cover of at least 300,000 CNY is advised.",
        insurance_zh: "当地医疗费用较高，建议保额不低于30万元。",
    },
    EmergencyEntry {
        country: "KR",
        police: "112",
        ambulance: "119",
        visa_en: "Tourist visa required; Jeju Island is visa-free.",
        visa_zh: "需办理旅游签证，济州岛免签。",
        insurance_en: "Standard travel medical cover is sufficient.",
        insurance_zh: "购买常规旅行医疗险即可。",
    },
    EmergencyEntry {
        country: "TH",
        police: "191",
        ambulance: "1669",
        visa_en: "Visa-free stays of up to 30 days.",
        visa_zh: "免签停留最长30天。",
        insurance_en: "Choose a plan that covers water sports and scooters.",
        insurance_zh: "建议选择包含水上项目和摩托车的保险。",
    },
    EmergencyEntry {
        country: "SG",
        police: "999",
        ambulance: "995",
        visa_en: "Visa-free stays of up to 30 days.",
        visa_zh: "免签停留最长30天。",
        insurance_en: "Private hospital costs are high; carry medical cover.",
        insurance_zh: "私立医院费用较高，请携带医疗保险。",
    },
    EmergencyEntry {
        country: "FR",
        police: "17",
        ambulance: "15",
        visa_en: "Schengen visa required; apply at least 15 days ahead.",
        visa_zh: "需办理申根签证，至少提前15天申请。",
        insurance_en: "Schengen rules require medical cover of at least 30,000 EUR.",
        insurance_zh: "申根签证要求医疗保额不低于3万欧元。",
    },
    EmergencyEntry {
        country: "IT",
        police: "113",
        ambulance: "118",
        visa_en: "Schengen visa required; apply at least 15 days ahead.",
        visa_zh: "需办理申根签证，至少提前15天申请。",
        insurance_en: "Schengen rules require medical cover of at least 30,000 EUR.",
        insurance_zh: "申根签证要求医疗保额不低于3万欧元。",
    },
    EmergencyEntry {
        country: "GB",
        police: "999",
        ambulance: "999",
        visa_en: "Standard visitor visa required; allow three weeks.",
        visa_zh: "需办理标准访客签证，预留三周时间。",
        insurance_en: "Visitors are not covered by the NHS; bring medical cover.",
        insurance_zh: "访客不享受NHS免费医疗，请购买医疗保险。",
    },
    EmergencyEntry {
        country: "AU",
        police: "000",
        ambulance: "000",
        visa_en: "Visitor visa (subclass 600) required.",
        visa_zh: "需办理600类访客签证。",
        insurance_en: "Cover for outdoor activities and sun exposure is advised.",
        insurance_zh: "建议投保户外活动相关保障。",
    },
    EmergencyEntry {
        country: "AE",
        police: "999",
        ambulance: "998",
        visa_en: "Visa-free stays of up to 30 days.",
        visa_zh: "免签停留最长30天。",
        insurance_en: "Standard travel medical cover is sufficient.",
        insurance_zh: "购买常规旅行医疗险即可。",
    },
    EmergencyEntry {
        country: OTHER_KEY,
        police: "112",
        ambulance: "112",
        visa_en: "Check entry requirements with the embassy before booking.",
        visa_zh: "预订前请向使领馆确认入境要求。",
        insurance_en: "Comprehensive travel insurance is recommended.",
        insurance_zh: "建议购买综合旅行保险。",
    },
];

fn normalize(country_code: &str) -> String {
    country_code.trim().to_ascii_uppercase()
}

pub fn is_long_haul(country_code: &str) -> bool {
    let code = normalize(country_code);
    LONG_HAUL_COUNTRIES.contains(&code.as_str())
}

pub fn hub_group(country_code: &str) -> HubGroup {
    match normalize(country_code).as_str() {
        "GB" | "FR" | "IT" | "DE" | "ES" | "NL" | "CH" => HubGroup::Europe,
        "AE" | "QA" | "TR" => HubGroup::MiddleEast,
        "AU" | "NZ" => HubGroup::Oceania,
        "JP" | "KR" | "TW" | "HK" => HubGroup::EastAsia,
        "TH" | "SG" | "MY" | "ID" | "VN" | "PH" => HubGroup::SoutheastAsia,
        _ => HubGroup::Other,
    }
}

fn currency_entry(country_code: &str) -> &'static Currency {
    let code = normalize(country_code);
    CURRENCIES
        .iter()
        .find(|c| c.country == code)
        .or_else(|| CURRENCIES.iter().find(|c| c.country == OTHER_KEY))
        .unwrap_or(&CURRENCIES[0])
}

pub fn currency_code(country_code: &str) -> &'static str {
    currency_entry(country_code).code
}

/// Converts a reference-currency amount into the destination currency,
/// rounded to whole units.
pub fn to_local(country_code: &str, cny: f64) -> f64 {
    (cny * currency_entry(country_code).per_cny).round()
}

pub fn emergency_info(country_code: &str) -> EmergencyInfo {
    let code = normalize(country_code);
    let entry = EMERGENCY
        .iter()
        .find(|e| e.country == code)
        .or_else(|| EMERGENCY.iter().find(|e| e.country == OTHER_KEY))
        .unwrap_or(&EMERGENCY[EMERGENCY.len() - 1]);
    if entry.country == OTHER_KEY {
        log::debug!("No emergency entry for '{}', using {} block", code, OTHER_KEY);
    }

    EmergencyInfo {
        country_code: entry.country.to_string(),
        police: entry.police.to_string(),
        ambulance: entry.ambulance.to_string(),
        consular_hotline: CONSULAR_HOTLINE.to_string(),
        visa: LocalizedText::new(entry.visa_en, entry.visa_zh),
        insurance: LocalizedText::new(entry.insurance_en, entry.insurance_zh),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haul_classification() {
        assert!(is_long_haul("fr"));
        assert!(is_long_haul("AU"));
        assert!(!is_long_haul("JP"));
        assert!(!is_long_haul("ZZ"));
    }

    #[test]
    fn test_currency_fallback() {
        assert_eq!(currency_code("JP"), "JPY");
        assert_eq!(currency_code("zz"), "USD");
        assert_eq!(to_local("JP", 100.0), 2000.0);
    }

    #[test]
    fn test_emergency_other_fallback() {
        let known = emergency_info("jp");
        assert_eq!(known.country_code, "JP");
        assert_eq!(known.police, "110");

        let unknown = emergency_info("ZZ");
        assert_eq!(unknown.country_code, "Other");
        assert!(!unknown.visa.en.is_empty());
        assert!(!unknown.insurance.zh.is_empty());
    }
}
