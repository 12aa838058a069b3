//! Day-by-day itinerary suggestions.

use city_explorer_city_models::CityGuideRecord;

/// Longest itinerary ever generated, in days.
pub const MAX_ITINERARY_DAYS: u32 = 7;

/// Safety advice returned with every itinerary.
pub const GENERAL_SAFETY_TIPS: [&str; 5] = [
    "Keep your belongings secure, especially in crowded areas",
    "Use registered transportation services",
    "Keep digital copies of important documents",
    "Learn basic local phrases",
    "Research local customs and dress appropriately",
];

const FALLBACK_MORNING: &str = "Explore local area";
const FALLBACK_AFTERNOON: &str = "Local cuisine exploration";
const FALLBACK_EVENING: &str = "Dinner and relaxation";
const FALLBACK_AREA: &str = "City center";

/// One itinerary day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    /// 1-based day number.
    pub day: u32,
    /// Morning attraction.
    pub morning: String,
    /// Afternoon attraction.
    pub afternoon: String,
    /// Evening plan, usually a neighborhood to explore.
    pub evening: String,
    /// Neighborhoods worth basing the day around.
    pub suggested_areas: Vec<String>,
}

/// A suggested itinerary with general safety advice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSuggestions {
    /// City display name.
    pub city: String,
    /// Days requested (the itinerary may be shorter).
    pub days: u32,
    /// One entry per planned day.
    pub itinerary: Vec<DayPlan>,
    /// General advice for any visitor.
    pub safety_tips: Vec<String>,
}

/// Builds an itinerary for up to [`MAX_ITINERARY_DAYS`] days.
///
/// Attractions and neighborhoods are cycled in guide order, starting from
/// the entry at index `day % len`.
#[must_use]
pub fn suggestions_for(guide: &CityGuideRecord, days: u32) -> TripSuggestions {
    let attractions: Vec<&str> = guide.attractions.values().map(|a| a.name.as_str()).collect();
    let neighborhoods: Vec<&str> = guide
        .neighborhoods
        .values()
        .map(|n| n.name.as_str())
        .collect();

    let itinerary = (1..=days.min(MAX_ITINERARY_DAYS))
        .map(|day| {
            let index = day as usize;
            let area = cycle(&neighborhoods, index);
            DayPlan {
                day,
                morning: cycle(&attractions, index)
                    .unwrap_or(FALLBACK_MORNING)
                    .to_string(),
                afternoon: cycle(&attractions, index + 1)
                    .unwrap_or(FALLBACK_AFTERNOON)
                    .to_string(),
                evening: area.map_or_else(
                    || FALLBACK_EVENING.to_string(),
                    |name| format!("Explore {name}"),
                ),
                suggested_areas: vec![area.unwrap_or(FALLBACK_AREA).to_string()],
            }
        })
        .collect();

    TripSuggestions {
        city: guide.name.clone(),
        days,
        itinerary,
        safety_tips: GENERAL_SAFETY_TIPS.iter().map(ToString::to_string).collect(),
    }
}

fn cycle<'a>(items: &[&'a str], index: usize) -> Option<&'a str> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()])
    }
}
