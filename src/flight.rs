//! Flight search
//!
//! The [`FlightProvider`] trait is where a real flight-search integration plugs
//! in. [`MockFlightProvider`] answers every query with the same three Delhi to
//! Hanoi itineraries after a short artificial delay.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Default artificial latency of the mock provider
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1000);

/// Airport endpoint of a flight segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub id: String,
    pub time: String,
}

/// One flown segment of an itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSegment {
    pub departure_airport: Airport,
    pub arrival_airport: Airport,
    /// Minutes in the air
    pub duration: u32,
    pub airplane: String,
    pub airline: String,
    pub airline_logo: String,
    pub travel_class: String,
    pub flight_number: String,
    pub legroom: String,
    pub extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub overnight: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub often_delayed_by_over_30_min: bool,
}

/// Connection between two segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layover {
    /// Minutes on the ground
    pub duration: u32,
    pub name: String,
    pub id: String,
}

/// Emissions of an itinerary in grams of CO2
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarbonEmissions {
    pub this_flight: u32,
    pub typical_for_this_route: u32,
    pub difference_percent: i32,
}

/// A bookable itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOption {
    pub flights: Vec<FlightSegment>,
    pub layovers: Vec<Layover>,
    /// Door-to-door minutes
    pub total_duration: u32,
    pub carbon_emissions: CarbonEmissions,
    pub price: u32,
    #[serde(rename = "type")]
    pub trip_type: String,
    pub airline_logo: String,
    pub booking_token: String,
}

impl FlightOption {
    /// Flight numbers of every segment, comma separated
    pub fn flight_numbers(&self) -> String {
        self.flights
            .iter()
            .map(|f| f.flight_number.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Number of stops
    pub fn stops(&self) -> usize {
        self.layovers.len()
    }
}

/// Search for flights between two places on a date
#[async_trait]
pub trait FlightProvider: Send + Sync {
    async fn get_flights(
        &self,
        source: &str,
        destination: &str,
        date: &str,
    ) -> Result<Vec<FlightOption>>;

    /// Name of the provider
    fn name(&self) -> &str;
}

/// Flight provider that always returns the built-in fixture
#[derive(Debug, Clone)]
pub struct MockFlightProvider {
    delay: Duration,
}

impl MockFlightProvider {
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_MOCK_DELAY,
        }
    }

    /// Set the artificial delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockFlightProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlightProvider for MockFlightProvider {
    async fn get_flights(
        &self,
        source: &str,
        destination: &str,
        date: &str,
    ) -> Result<Vec<FlightOption>> {
        info!(source, destination, date, "Mock flight search");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(fixture())
    }

    fn name(&self) -> &str {
        "MockFlights"
    }
}

const BATIK_LOGO: &str = "https://www.gstatic.com/flights/airline_logos/70px/OD.png";
const INDIGO_LOGO: &str = "https://www.gstatic.com/flights/airline_logos/70px/6E.png";
const DEL: &str = "Indira Gandhi International Airport";
const KUL: &str = "Kuala Lumpur International Airport";
const CCU: &str = "Netaji Subhash Chandra Bose International Airport";
const HAN: &str = "Noi Bai International Airport";

fn airport(name: &str, id: &str, time: &str) -> Airport {
    Airport {
        name: name.to_string(),
        id: id.to_string(),
        time: time.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn segment(
    from: Airport,
    to: Airport,
    duration: u32,
    airplane: &str,
    airline: &str,
    logo: &str,
    flight_number: &str,
    legroom: &str,
    extensions: &[&str],
) -> FlightSegment {
    FlightSegment {
        departure_airport: from,
        arrival_airport: to,
        duration,
        airplane: airplane.to_string(),
        airline: airline.to_string(),
        airline_logo: logo.to_string(),
        travel_class: "Economy".to_string(),
        flight_number: flight_number.to_string(),
        legroom: legroom.to_string(),
        extensions: strings(extensions),
        overnight: false,
        often_delayed_by_over_30_min: false,
    }
}

fn layover(duration: u32, name: &str, id: &str) -> Layover {
    Layover {
        duration,
        name: name.to_string(),
        id: id.to_string(),
    }
}

fn indigo_ccu_han() -> FlightSegment {
    FlightSegment {
        overnight: true,
        ..segment(
            airport(CCU, "CCU", "2025-03-06 22:05"),
            airport(HAN, "HAN", "2025-03-07 02:10"),
            155,
            "Airbus A321neo",
            "IndiGo",
            INDIGO_LOGO,
            "6E 1631",
            "29 in",
            &[
                "Below average legroom (29 in)",
                "Carbon emissions estimate: 117 kg",
            ],
        )
    }
}

/// The fixed three-itinerary response
pub fn fixture() -> Vec<FlightOption> {
    let batik_ext = |kg: &str| {
        vec![
            "Above average legroom (32 in)".to_string(),
            "In-seat USB outlet".to_string(),
            "On-demand video".to_string(),
            format!("Carbon emissions estimate: {} kg", kg),
        ]
    };
    let indigo_ext = [
        "Below average legroom (29 in)",
        "Carbon emissions estimate: 92 kg",
    ];

    vec![
        FlightOption {
            flights: vec![
                FlightSegment {
                    extensions: batik_ext("328"),
                    overnight: true,
                    ..segment(
                        airport(DEL, "DEL", "2025-03-06 22:05"),
                        airport(KUL, "KUL", "2025-03-07 06:00"),
                        325,
                        "Boeing 737",
                        "Batik Air",
                        BATIK_LOGO,
                        "OD 206",
                        "32 in",
                        &[],
                    )
                },
                FlightSegment {
                    extensions: batik_ext("195"),
                    often_delayed_by_over_30_min: true,
                    ..segment(
                        airport(KUL, "KUL", "2025-03-07 11:10"),
                        airport(HAN, "HAN", "2025-03-07 13:30"),
                        200,
                        "Boeing 737",
                        "Batik Air",
                        BATIK_LOGO,
                        "OD 571",
                        "32 in",
                        &[],
                    )
                },
            ],
            layovers: vec![layover(310, KUL, "KUL")],
            total_duration: 835,
            carbon_emissions: CarbonEmissions {
                this_flight: 523_000,
                typical_for_this_route: 224_000,
                difference_percent: 133,
            },
            price: 324,
            trip_type: "One way".to_string(),
            airline_logo: BATIK_LOGO.to_string(),
            booking_token: "WyJDalJJZUZaaFJscHRUWHBwZURCQlFuSXhMV2RDUnkwdExTMHRMUzB0TFhaMGVta3pPVUZCUVVGQlIyWkpUVVZqUzNVMlExVkJFZ3RQUkRJd05ueFBSRFUzTVJvTENMcjhBUkFDR2dOVlUwUTRISEM2L0FFPSIsW1siREVMIiwiMjAyNS0wMy0wNiIsIktVTCIsbnVsbCwiT0QiLCIyMDYiXSxbIktVTCIsIjIwMjUtMDMtMDciLCJIQU4iLG51bGwsIk9EIiwiNTcxIl1dXQ==".to_string(),
        },
        FlightOption {
            flights: vec![
                segment(
                    airport(DEL, "DEL", "2025-03-06 15:00"),
                    airport(CCU, "CCU", "2025-03-06 17:10"),
                    130,
                    "Airbus A321neo",
                    "IndiGo",
                    INDIGO_LOGO,
                    "6E 543",
                    "29 in",
                    &indigo_ext,
                ),
                indigo_ccu_han(),
            ],
            layovers: vec![layover(295, CCU, "CCU")],
            total_duration: 580,
            carbon_emissions: CarbonEmissions {
                this_flight: 211_000,
                typical_for_this_route: 224_000,
                difference_percent: -6,
            },
            price: 394,
            trip_type: "One way".to_string(),
            airline_logo: INDIGO_LOGO.to_string(),
            booking_token: "WyJDalJJZUZaaFJscHRUWHBwZURCQlFuSXhMV2RDUnkwdExTMHRMUzB0TFhaMGVta3pPVUZCUVVGQlIyWkpUVVZqUzNVMlExVkJFZzQyUlRVME0zdzJSVEUyTXpFYUN3aTNzd0lRQWhvRFZWTkVPQnh3dDdNQyIsW1siREVMIiwiMjAyNS0wMy0wNiIsIkNDVSIsbnVsbCwiNkUiLCI1NDMiXSxbIkNDVSIsIjIwMjUtMDMtMDYiLCJIQU4iLG51bGwsIjZFIiwiMTYzMSJdXV0=".to_string(),
        },
        FlightOption {
            flights: vec![
                segment(
                    airport(DEL, "DEL", "2025-03-06 18:00"),
                    airport(CCU, "CCU", "2025-03-06 20:10"),
                    130,
                    "Airbus A321neo",
                    "IndiGo",
                    INDIGO_LOGO,
                    "6E 2057",
                    "29 in",
                    &indigo_ext,
                ),
                indigo_ccu_han(),
            ],
            layovers: vec![layover(115, CCU, "CCU")],
            total_duration: 400,
            carbon_emissions: CarbonEmissions {
                this_flight: 211_000,
                typical_for_this_route: 224_000,
                difference_percent: -6,
            },
            price: 401,
            trip_type: "One way".to_string(),
            airline_logo: INDIGO_LOGO.to_string(),
            booking_token: "WyJDalJJZUZaaFJscHRUWHBwZURCQlFuSXhMV2RDUnkwdExTMHRMUzB0TFhaMGVta3pPVUZCUVVGQlIyWkpUVVZqUzNVMlExVkJFZzAyUlRJd05UZDhOa1V4TmpNeEdnc0lpN2tDRUFJYUExVlRSRGdjY0l1NUFnPT0iLFtbIkRFTCIsIjIwMjUtMDMtMDYiLCJDQ1UiLG51bGwsIjZFIiwiMjA1NyJdLFsiQ0NVIiwiMjAyNS0wMy0wNiIsIkhBTiIsbnVsbCwiNkUiLCIxNjMxIl1dXQ==".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_fixture_regardless_of_arguments() {
        let provider = MockFlightProvider::new().with_delay(Duration::ZERO);

        let a = provider.get_flights("DEL", "HAN", "2025-03-06").await.unwrap();
        let b = provider.get_flights("", "nowhere", "not a date").await.unwrap();

        assert_eq!(a, b);
        let prices: Vec<u32> = a.iter().map(|f| f.price).collect();
        assert_eq!(prices, vec![324, 394, 401]);
    }

    #[tokio::test]
    async fn test_mock_waits_for_delay() {
        let provider = MockFlightProvider::new().with_delay(Duration::from_millis(20));
        let started = std::time::Instant::now();
        provider.get_flights("a", "b", "c").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(MockFlightProvider::default().delay(), DEFAULT_MOCK_DELAY);
    }

    #[test]
    fn test_fixture_shape() {
        let options = fixture();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].flight_numbers(), "OD 206, OD 571");
        assert_eq!(options[0].stops(), 1);
        assert!(options[0].flights[0].overnight);
        assert!(options[0].flights[1].often_delayed_by_over_30_min);
        assert_eq!(options[1].carbon_emissions.difference_percent, -6);
        assert_eq!(options[2].total_duration, 400);
    }

    #[test]
    fn test_fixture_wire_shape() {
        let value = serde_json::to_value(&fixture()[0]).unwrap();
        assert_eq!(value["type"], "One way");
        assert_eq!(value["flights"][0]["departure_airport"]["id"], "DEL");
        assert_eq!(value["flights"][0]["overnight"], true);
        assert!(value["flights"][0].get("often_delayed_by_over_30_min").is_none());
        assert_eq!(value["carbon_emissions"]["this_flight"], 523000);
    }
}
