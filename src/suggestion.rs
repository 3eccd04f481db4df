//! Destination suggestions
//!
//! A static table of promotional destination records, keyword detection over
//! free text, and suggestions derived from a submitted trip form.

use crate::form::TravelFormData;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Image used when a suggestion has no record of its own
pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1503917988258-f87a78e3c995?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80";

/// Key of the record returned for unknown destinations
pub const FALLBACK_KEYWORD: &str = "paris";

/// A destination suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub destination: String,
    pub description: String,
    pub duration: String,
    pub when_to_go: String,
    pub for_whom: String,
    pub image_url: String,
}

struct Entry {
    keyword: &'static str,
    destination: &'static str,
    description: &'static str,
    duration: &'static str,
    when_to_go: &'static str,
    for_whom: &'static str,
    image_url: &'static str,
}

impl Entry {
    fn to_suggestion(&self) -> Suggestion {
        Suggestion {
            destination: self.destination.to_string(),
            description: self.description.to_string(),
            duration: self.duration.to_string(),
            when_to_go: self.when_to_go.to_string(),
            for_whom: self.for_whom.to_string(),
            image_url: self.image_url.to_string(),
        }
    }
}

// Order is detection precedence.
const TABLE: &[Entry] = &[
    Entry {
        keyword: "paris",
        destination: "Paris, France",
        description: "Experience the romance and charm of the City of Light with its iconic landmarks, world-class museums, and exquisite cuisine.",
        duration: "5-7 days",
        when_to_go: "April-June, Sept-Oct",
        for_whom: "Couples, Art Lovers",
        image_url: "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
    },
    Entry {
        keyword: "japan",
        destination: "Japan",
        description: "Discover the perfect blend of ancient traditions and ultramodern life in Japan, from serene temples to bustling metropolises.",
        duration: "10-14 days",
        when_to_go: "March-May, Oct-Nov",
        for_whom: "Culture Seekers, Foodies",
        image_url: "https://images.unsplash.com/photo-1528360983277-13d401cdc186?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
    },
    Entry {
        keyword: "tokyo",
        destination: "Tokyo, Japan",
        description: "Immerse yourself in the energetic pace of Tokyo, where cutting-edge technology meets ancient traditions in this sprawling metropolis.",
        duration: "4-6 days",
        when_to_go: "March-May, Sept-Nov",
        for_whom: "Urban Explorers, Tech Enthusiasts",
        image_url: "https://images.unsplash.com/photo-1503899036084-c55cdd92da26?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
    },
    Entry {
        keyword: "bali",
        destination: "Bali, Indonesia",
        description: "Find your balance on the Island of the Gods, with its stunning beaches, spiritual temples, and lush rice terraces.",
        duration: "7-10 days",
        when_to_go: "April-June, Sept-Oct",
        for_whom: "Beach Lovers, Spiritual Seekers",
        image_url: "https://images.unsplash.com/photo-1558005530-a7958896ec60?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
    },
    Entry {
        keyword: "hawaii",
        destination: "Hawaii, USA",
        description: "Experience paradise on Earth with Hawaii's spectacular beaches, volcanic landscapes, and rich Polynesian culture.",
        duration: "7-12 days",
        when_to_go: "April-June, Sept-Oct",
        for_whom: "Adventure Seekers, Beach Lovers",
        image_url: "https://images.unsplash.com/photo-1483168527879-c66136b56105?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
    },
    Entry {
        keyword: "maldives",
        destination: "Maldives",
        description: "Escape to the ultimate luxury getaway with overwater bungalows, pristine beaches, and unparalleled marine life.",
        duration: "5-7 days",
        when_to_go: "November-April",
        for_whom: "Luxury Travelers, Honeymooners",
        image_url: "https://images.unsplash.com/photo-1573843981267-be1999ff37cd?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
    },
    Entry {
        keyword: "italy",
        destination: "Italy",
        description: "Indulge in la dolce vita with Italy's artistic treasures, ancient ruins, remarkable cities, and delicious cuisine.",
        duration: "10-14 days",
        when_to_go: "April-June, Sept-Oct",
        for_whom: "History Buffs, Food Enthusiasts",
        image_url: "https://images.unsplash.com/photo-1516483638261-f4dbaf036963?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
    },
    Entry {
        keyword: "greece",
        destination: "Greece",
        description: "Step into ancient history while enjoying the spectacular Mediterranean landscapes, iconic islands, and vibrant culture.",
        duration: "7-10 days",
        when_to_go: "May-June, Sept-Oct",
        for_whom: "History Lovers, Island Hoppers",
        image_url: "https://images.unsplash.com/photo-1533105079780-92b9be482077?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
    },
];

/// Keywords in detection order
pub fn keywords() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|e| e.keyword)
}

fn entry(keyword: &str) -> Option<&'static Entry> {
    let key = keyword.trim().to_lowercase();
    TABLE.iter().find(|e| e.keyword == key)
}

/// Exact lookup by destination keyword
pub fn find_suggestion(keyword: &str) -> Option<Suggestion> {
    entry(keyword).map(Entry::to_suggestion)
}

/// Lookup by destination keyword
///
/// Unknown keywords get the Paris record. That default is long-standing
/// behavior rather than a recommendation; callers that need to know whether
/// anything matched should use [`find_suggestion`].
pub fn suggestion_for(keyword: &str) -> Suggestion {
    let record = entry(keyword).or_else(|| {
        warn!(keyword, "Unknown destination keyword, using fallback suggestion");
        entry(FALLBACK_KEYWORD)
    });
    // FALLBACK_KEYWORD is always present in TABLE.
    record.unwrap_or(&TABLE[0]).to_suggestion()
}

/// First table keyword (in table order) mentioned in `text`
pub fn detect_destination(text: &str) -> Option<&'static str> {
    let lowercase = text.to_lowercase();
    keywords().find(|k| lowercase.contains(k))
}

/// Suggestion describing a submitted trip
///
/// Destination comes from the form verbatim and duration from the date span.
/// Other fields come from the detected keyword's record; destinations outside
/// the table get a generic record instead of the Paris one.
pub fn suggestion_for_trip(form: &TravelFormData) -> Suggestion {
    let destination = form.destination.trim().to_string();
    // Same-day trips keep the record's duration.
    let span = form.trip_days().filter(|&days| days > 0).map(format_days);

    let suggestion = match detect_destination(&destination).and_then(entry) {
        Some(record) => {
            let mut s = record.to_suggestion();
            s.destination = destination;
            if let Some(span) = span {
                s.duration = span;
            }
            s
        }
        None => Suggestion {
            description: format!(
                "Your custom trip to {}, planned around your dates, budget and interests.",
                destination
            ),
            destination,
            duration: span.unwrap_or_else(|| "Flexible".to_string()),
            when_to_go: format!("{} to {}", form.start_date.trim(), form.end_date.trim()),
            for_whom: travelers_label(&form.travelers),
            image_url: DEFAULT_IMAGE_URL.to_string(),
        },
    };

    debug!(
        destination = %suggestion.destination,
        duration = %suggestion.duration,
        "Derived trip suggestion"
    );
    suggestion
}

fn format_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

fn travelers_label(travelers: &str) -> String {
    match travelers.trim() {
        "" => "Any traveler".to_string(),
        "1" => "1 traveler".to_string(),
        n => format!("{} travelers", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_resolves_to_its_record() {
        for keyword in keywords() {
            let s = suggestion_for(keyword);
            assert_eq!(Some(s.clone()), find_suggestion(keyword));
            assert!(
                s.destination.to_lowercase().contains(keyword)
                    || (keyword == "japan" && s.destination == "Japan"),
                "{} resolved to {}",
                keyword,
                s.destination
            );
        }
        assert_eq!(suggestion_for("tokyo").destination, "Tokyo, Japan");
        assert_eq!(suggestion_for("maldives").when_to_go, "November-April");
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(suggestion_for("GREECE").destination, "Greece");
    }

    #[test]
    fn test_unknown_keyword_falls_back_to_paris() {
        let s = suggestion_for("reykjavik");
        assert_eq!(s.destination, "Paris, France");
        assert!(find_suggestion("reykjavik").is_none());
    }

    #[test]
    fn test_fallback_keyword_is_in_table() {
        let fallback = find_suggestion(FALLBACK_KEYWORD).unwrap();
        assert_eq!(suggestion_for("atlantis"), fallback);
    }

    #[test]
    fn test_detect_destination_uses_table_order() {
        assert_eq!(detect_destination("Tokyo and the rest of Japan"), Some("japan"));
        assert_eq!(detect_destination("two weeks in Bali"), Some("bali"));
        assert_eq!(detect_destination("somewhere warm"), None);
    }

    #[test]
    fn test_trip_suggestion_for_known_destination() {
        let form = TravelFormData::new("New York", "Paris, France")
            .with_dates("2025-06-01", "2025-06-08")
            .with_budget("$3000")
            .with_travelers("2");
        let s = suggestion_for_trip(&form);
        assert_eq!(s.destination, "Paris, France");
        assert_eq!(s.duration, "7 days");
        assert_eq!(s.for_whom, "Couples, Art Lovers");
    }

    #[test]
    fn test_trip_suggestion_for_unknown_destination() {
        let form = TravelFormData::new("Delhi", "Hanoi, Vietnam")
            .with_dates("2025-03-06", "2025-03-07")
            .with_travelers("3");
        let s = suggestion_for_trip(&form);
        assert_eq!(s.destination, "Hanoi, Vietnam");
        assert_eq!(s.duration, "1 day");
        assert_eq!(s.for_whom, "3 travelers");
        assert_eq!(s.image_url, DEFAULT_IMAGE_URL);
        assert!(s.description.contains("Hanoi, Vietnam"));
    }

    #[test]
    fn test_trip_suggestion_keeps_record_duration_without_dates() {
        let form = TravelFormData::new("Rome", "Greece").with_dates("soon", "later");
        assert_eq!(suggestion_for_trip(&form).duration, "7-10 days");
    }

    #[test]
    fn test_same_day_trip_keeps_record_duration() {
        let form = TravelFormData::new("Naples", "Italy").with_dates("2025-07-04", "2025-07-04");
        assert_eq!(form.trip_days(), Some(0));
        assert_eq!(suggestion_for_trip(&form).duration, "10-14 days");

        let day_trip = TravelFormData::new("Lyon", "Annecy").with_dates("2025-07-04", "2025-07-04");
        assert_eq!(suggestion_for_trip(&day_trip).duration, "Flexible");
    }

    #[test]
    fn test_suggestion_wire_names() {
        let value = serde_json::to_value(suggestion_for("bali")).unwrap();
        assert!(value.get("whenToGo").is_some());
        assert!(value.get("forWhom").is_some());
        assert!(value.get("imageUrl").is_some());
    }
}
