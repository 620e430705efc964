//! Life scenario records.
//!
//! A scenario is a concrete, named-field record (not a loose bag of
//! dynamic values) describing one possible life path. Scenarios are built
//! from questionnaire answers plus a market snapshot; the derivations are
//! small bounded heuristics, not simulations.

use serde::{Deserialize, Serialize};

use crate::market::{CostOfLivingData, JobMarketData, MarketLevel, SalaryData};

/// Answers collected by the onboarding questionnaire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireAnswers {
    pub occupation: String,
    pub location: String,
    /// What the user said matters most (family, adventure, stability, ...)
    #[serde(default)]
    pub priorities: Vec<String>,
}

/// Everything the market endpoints know about one occupation/location pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub salary: SalaryData,
    pub cost_of_living: CostOfLivingData,
    pub job_market: JobMarketData,
}

/// A life-path scenario presented to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub title: String,
    pub career: String,
    pub location: String,
    pub salary_range: String,
    pub work_life_balance: String,
    pub stress_level: String,
    pub description: String,
    pub image: String,
    pub living_space: String,
    pub social_life: String,
}

/// Format a dollar amount with thousands separators
fn fmt_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${out}")
}

fn slug(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Build a scenario from answers and market data.
pub fn build_scenario(answers: &QuestionnaireAnswers, market: &MarketSnapshot) -> Scenario {
    let salary_range = format!(
        "{} - {}",
        fmt_usd(market.salary.percentile_25),
        fmt_usd(market.salary.percentile_75)
    );

    let stress_level = match (
        market.job_market.competition,
        market.cost_of_living.overall_cost_index,
    ) {
        (MarketLevel::High | MarketLevel::VeryHigh, idx) if idx > 150 => "high",
        (MarketLevel::High | MarketLevel::VeryHigh, _) => "moderate",
        (_, idx) if idx > 150 => "moderate",
        _ => "low",
    };

    let work_life_balance = match market.job_market.demand {
        MarketLevel::VeryHigh if market.job_market.competition == MarketLevel::Low => "steady",
        MarketLevel::VeryHigh | MarketLevel::High => "demanding but flexible",
        _ => "balanced",
    };

    let living_space = match market.cost_of_living.average_rent_1br {
        rent if rent >= 2_500 => "compact city apartment",
        rent if rent >= 1_500 => "one-bedroom apartment",
        _ => "spacious apartment or small house",
    };

    let has_priority =
        |p: &str| answers.priorities.iter().any(|x| x.eq_ignore_ascii_case(p));
    let social_life = if has_priority("community") || has_priority("friends") {
        "active local community scene"
    } else if has_priority("family") {
        "family-centered, quieter evenings"
    } else {
        "flexible - as social as you make it"
    };

    let description = format!(
        "Life as a {} in {}: median pay around {}, day-to-day costs {} the \
         national average, and {} openings in the field.",
        answers.occupation,
        market.cost_of_living.city,
        fmt_usd(market.salary.median_salary),
        if market.cost_of_living.overall_cost_index >= 100 {
            "above"
        } else {
            "below"
        },
        market.job_market.openings,
    );

    Scenario {
        title: format!("{} in {}", answers.occupation, market.cost_of_living.city),
        career: answers.occupation.clone(),
        location: answers.location.clone(),
        salary_range,
        work_life_balance: work_life_balance.into(),
        stress_level: stress_level.into(),
        description,
        image: format!("scenario-{}-{}.jpg", slug(&answers.occupation), slug(&answers.location)),
        living_space: living_space.into(),
        social_life: social_life.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{fallback_cost_of_living, fallback_job_market, fallback_salary};

    fn snapshot(occupation: &str, city: &str) -> MarketSnapshot {
        MarketSnapshot {
            salary: fallback_salary(occupation, city),
            cost_of_living: fallback_cost_of_living(city, ""),
            job_market: fallback_job_market(occupation),
        }
    }

    #[test]
    fn test_fmt_usd() {
        assert_eq!(fmt_usd(950), "$950");
        assert_eq!(fmt_usd(52_000), "$52,000");
        assert_eq!(fmt_usd(1_234_567), "$1,234,567");
    }

    #[test]
    fn test_sf_developer_scenario() {
        let answers = QuestionnaireAnswers {
            occupation: "software developer".into(),
            location: "san francisco".into(),
            priorities: vec!["community".into()],
        };
        let s = build_scenario(&answers, &snapshot("software developer", "san francisco"));

        assert_eq!(s.title, "software developer in San Francisco");
        assert_eq!(s.salary_range, "$106,400 - $172,900");
        assert_eq!(s.stress_level, "high", "high competition + expensive city");
        assert_eq!(s.living_space, "compact city apartment");
        assert_eq!(s.social_life, "active local community scene");
        assert_eq!(s.image, "scenario-software-developer-san-francisco.jpg");
    }

    #[test]
    fn test_low_cost_low_competition_scenario() {
        let answers = QuestionnaireAnswers {
            occupation: "electrician".into(),
            location: "minneapolis".into(),
            priorities: vec!["family".into()],
        };
        let s = build_scenario(&answers, &snapshot("electrician", "minneapolis"));

        assert_eq!(s.stress_level, "low");
        assert_eq!(s.living_space, "spacious apartment or small house");
        assert_eq!(s.social_life, "family-centered, quieter evenings");
        assert!(s.description.contains("below"));
    }
}
