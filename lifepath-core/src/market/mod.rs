//! Labor-market fallback data.
//!
//! Static lookup tables substituted when the live data source is
//! unavailable. Resolution never fails: keys are normalized
//! (case-insensitive, whitespace-collapsed), exact-matched, and absent keys
//! resolve to a designated default row.

use serde::{Deserialize, Serialize};

/// Salary statistics for an occupation in a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryData {
    pub occupation: String,
    pub location: String,
    pub median_salary: u32,
    pub percentile_25: u32,
    pub percentile_75: u32,
    pub currency: String,
}

/// Cost-of-living indexes for a city (national average = 100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOfLivingData {
    pub city: String,
    pub state: String,
    pub overall_cost_index: u32,
    pub average_rent_1br: u32,
    pub groceries_index: u32,
    pub transportation_index: u32,
    pub utilities_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

/// Job-market statistics for an occupation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMarketData {
    pub occupation: String,
    pub openings: u32,
    pub growth_rate_pct: f32,
    pub competition: MarketLevel,
    pub demand: MarketLevel,
    pub top_skills: Vec<String>,
}

/// Normalize a lookup key: trim, lowercase, collapse inner whitespace.
fn normalize(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// =====================================================
// Salary: occupation base x location multiplier
// =====================================================

const SALARY_BASES: &[(&str, u32)] = &[
    ("software developer", 95_000),
    ("data scientist", 105_000),
    ("product manager", 115_000),
    ("registered nurse", 75_000),
    ("teacher", 52_000),
    ("marketing manager", 78_000),
    ("accountant", 62_000),
    ("electrician", 56_000),
    ("graphic designer", 50_000),
    ("chef", 48_000),
];

const DEFAULT_SALARY_BASE: u32 = 55_000;

const LOCATION_MULTIPLIERS: &[(&str, f64)] = &[
    ("san francisco", 1.4),
    ("new york", 1.35),
    ("seattle", 1.25),
    ("boston", 1.2),
    ("austin", 1.1),
    ("denver", 1.05),
    ("chicago", 1.05),
    ("portland", 1.0),
    ("minneapolis", 1.0),
    ("remote", 0.95),
];

/// Fallback salary row. Unknown occupations use the default base; unknown
/// locations a 1.0 multiplier. Percentiles derive from the median.
pub fn fallback_salary(occupation: &str, location: &str) -> SalaryData {
    let occ_key = normalize(occupation);
    let loc_key = normalize(location);

    let base = SALARY_BASES
        .iter()
        .find(|(k, _)| *k == occ_key)
        .map_or(DEFAULT_SALARY_BASE, |(_, v)| *v);
    let multiplier = LOCATION_MULTIPLIERS
        .iter()
        .find(|(k, _)| *k == loc_key)
        .map_or(1.0, |(_, v)| *v);

    let median = (base as f64 * multiplier).round() as u32;
    SalaryData {
        occupation: occupation.to_string(),
        location: location.to_string(),
        median_salary: median,
        percentile_25: (median as f64 * 0.8).round() as u32,
        percentile_75: (median as f64 * 1.3).round() as u32,
        currency: "USD".into(),
    }
}

// =====================================================
// Cost of living
// =====================================================

fn col_row(
    city: &str,
    state: &str,
    overall: u32,
    rent: u32,
    groceries: u32,
    transportation: u32,
    utilities: u32,
) -> CostOfLivingData {
    CostOfLivingData {
        city: city.into(),
        state: state.into(),
        overall_cost_index: overall,
        average_rent_1br: rent,
        groceries_index: groceries,
        transportation_index: transportation,
        utilities_index: utilities,
    }
}

fn cost_of_living_table() -> Vec<CostOfLivingData> {
    vec![
        col_row("San Francisco", "CA", 180, 3_300, 131, 142, 110),
        col_row("New York", "NY", 168, 3_100, 123, 148, 108),
        col_row("Seattle", "WA", 152, 2_100, 121, 130, 104),
        col_row("Boston", "MA", 148, 2_500, 115, 126, 112),
        col_row("Austin", "TX", 110, 1_500, 101, 104, 98),
        col_row("Denver", "CO", 112, 1_600, 103, 106, 95),
        col_row("Chicago", "IL", 107, 1_700, 102, 111, 97),
        col_row("Portland", "OR", 114, 1_500, 106, 109, 94),
        col_row("Minneapolis", "MN", 97, 1_400, 99, 101, 96),
    ]
}

/// Fallback cost-of-living row. Unrecognized cities resolve to the
/// Minneapolis row.
pub fn fallback_cost_of_living(city: &str, _state: &str) -> CostOfLivingData {
    let key = normalize(city);
    let table = cost_of_living_table();
    table
        .iter()
        .find(|row| normalize(&row.city) == key)
        .cloned()
        .unwrap_or_else(default_cost_of_living)
}

/// The designated default row (Minneapolis)
pub fn default_cost_of_living() -> CostOfLivingData {
    col_row("Minneapolis", "MN", 97, 1_400, 99, 101, 96)
}

// =====================================================
// Job market
// =====================================================

fn jm_row(
    occupation: &str,
    openings: u32,
    growth: f32,
    competition: MarketLevel,
    demand: MarketLevel,
    skills: &[&str],
) -> JobMarketData {
    JobMarketData {
        occupation: occupation.into(),
        openings,
        growth_rate_pct: growth,
        competition,
        demand,
        top_skills: skills.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn job_market_table() -> Vec<JobMarketData> {
    use MarketLevel::*;
    vec![
        jm_row("software developer", 150_000, 17.9, High, VeryHigh, &["JavaScript", "SQL", "cloud services"]),
        jm_row("data scientist", 60_000, 21.5, High, VeryHigh, &["Python", "statistics", "machine learning"]),
        jm_row("product manager", 45_000, 8.0, High, High, &["roadmapping", "analytics", "communication"]),
        jm_row("registered nurse", 200_000, 5.6, Low, VeryHigh, &["patient care", "charting", "triage"]),
        jm_row("teacher", 90_000, 1.0, Moderate, Moderate, &["curriculum design", "classroom management"]),
        jm_row("marketing manager", 35_000, 6.6, High, Moderate, &["SEO", "content strategy", "analytics"]),
        jm_row("accountant", 120_000, 4.4, Moderate, High, &["GAAP", "Excel", "auditing"]),
        jm_row("electrician", 80_000, 6.4, Low, High, &["wiring", "code compliance", "troubleshooting"]),
        jm_row("graphic designer", 25_000, 3.0, High, Moderate, &["typography", "Figma", "branding"]),
        jm_row("chef", 40_000, 5.0, Moderate, Moderate, &["menu design", "kitchen management"]),
    ]
}

/// Fallback job-market row. Unknown occupations resolve to a generic
/// moderate-market default, echoing the requested occupation.
pub fn fallback_job_market(occupation: &str) -> JobMarketData {
    let key = normalize(occupation);
    job_market_table()
        .iter()
        .find(|row| normalize(&row.occupation) == key)
        .cloned()
        .unwrap_or_else(|| {
            jm_row(
                occupation,
                40_000,
                4.0,
                MarketLevel::Moderate,
                MarketLevel::Moderate,
                &["communication", "problem solving"],
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_pinned_example() {
        let s = fallback_salary("software developer", "san francisco");
        assert_eq!(s.median_salary, 133_000);
        assert_eq!(s.percentile_25, 106_400);
        assert_eq!(s.percentile_75, 172_900);
        assert_eq!(s.currency, "USD");
    }

    #[test]
    fn test_salary_key_normalization() {
        let a = fallback_salary("  Software   Developer ", "San Francisco");
        let b = fallback_salary("software developer", "san francisco");
        assert_eq!(a.median_salary, b.median_salary);
    }

    #[test]
    fn test_salary_unknown_occupation_uses_default_base() {
        let s = fallback_salary("falconer", "portland");
        assert_eq!(s.median_salary, DEFAULT_SALARY_BASE);
        assert_eq!(s.occupation, "falconer", "echoes the request");
    }

    #[test]
    fn test_salary_unknown_location_uses_unit_multiplier() {
        let s = fallback_salary("teacher", "smallville");
        assert_eq!(s.median_salary, 52_000);
    }

    #[test]
    fn test_cost_of_living_unknown_city_is_minneapolis() {
        let c = fallback_cost_of_living("Gotham", "NJ");
        assert_eq!(c.city, "Minneapolis");
        assert_eq!(c.overall_cost_index, 97);
        assert_eq!(c.average_rent_1br, 1_400);
    }

    #[test]
    fn test_cost_of_living_known_city() {
        let c = fallback_cost_of_living("seattle", "WA");
        assert_eq!(c.city, "Seattle");
        assert_eq!(c.average_rent_1br, 2_100);
    }

    #[test]
    fn test_job_market_known_and_unknown() {
        let known = fallback_job_market("Registered Nurse");
        assert_eq!(known.demand, MarketLevel::VeryHigh);

        let unknown = fallback_job_market("falconer");
        assert_eq!(unknown.occupation, "falconer");
        assert_eq!(unknown.competition, MarketLevel::Moderate);
    }
}
