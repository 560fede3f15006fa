//! EFA trip request response DTOs.
//!
//! These map the `rapidJSON` output of `XML_TRIP_REQUEST2`. Only the
//! fields needed to build a [`Journey`](crate::domain::Journey) are kept;
//! EFA omits fields freely, so nearly everything is optional.

use serde::Deserialize;

/// Top-level response of a trip request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    /// Alternative journeys, best first.
    #[serde(default)]
    pub journeys: Vec<JourneyDto>,

    /// Server diagnostics, e.g. "no trip found" codes.
    #[serde(default)]
    pub system_messages: Vec<SystemMessage>,
}

/// One journey alternative.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    #[serde(default)]
    pub legs: Vec<LegDto>,
}

/// One leg of a journey (a ride or a footpath).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    /// Leg duration in seconds.
    pub duration: Option<i64>,

    pub transportation: Option<TransportationDto>,
}

/// Line information for a leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationDto {
    /// Short line name, e.g. "S1".
    pub disassembled_name: Option<String>,

    /// Line number as printed on vehicles.
    pub number: Option<String>,

    pub product: Option<ProductDto>,
}

/// Means-of-transport product (S-Bahn, Bus, Fussweg, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDto {
    pub name: Option<String>,
}

/// Diagnostic message attached to a response.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemMessage {
    pub code: Option<i64>,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_trip_response() {
        let json = r#"{
            "version": "10.2.10.139",
            "journeys": [{
                "rating": 0,
                "interchanges": 1,
                "legs": [
                    {
                        "duration": 600,
                        "origin": {"id": "de:08111:6118", "name": "Hauptbahnhof"},
                        "destination": {"id": "de:08111:6056", "name": "Stadtmitte"},
                        "transportation": {
                            "name": "S-Bahn S1",
                            "disassembledName": "S1",
                            "number": "S1",
                            "product": {"class": 1, "name": "S-Bahn"}
                        }
                    },
                    {
                        "duration": 300,
                        "transportation": {"product": {"class": 100, "name": "Fussweg"}}
                    }
                ]
            }],
            "systemMessages": []
        }"#;

        let response: TripResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.journeys.len(), 1);

        let journey = &response.journeys[0];
        assert_eq!(journey.legs.len(), 2);
        assert_eq!(journey.legs[0].duration, Some(600));

        let transport = journey.legs[0].transportation.as_ref().unwrap();
        assert_eq!(transport.disassembled_name.as_deref(), Some("S1"));

        let walk = journey.legs[1].transportation.as_ref().unwrap();
        assert!(walk.disassembled_name.is_none());
        assert_eq!(
            walk.product.as_ref().and_then(|p| p.name.as_deref()),
            Some("Fussweg")
        );
    }

    #[test]
    fn deserialize_no_trip_response() {
        let json = r#"{
            "systemMessages": [
                {"type": "error", "module": "BROKER", "code": -4000, "text": ""}
            ]
        }"#;

        let response: TripResponse = serde_json::from_str(json).unwrap();
        assert!(response.journeys.is_empty());
        assert_eq!(response.system_messages[0].code, Some(-4000));
        assert_eq!(response.system_messages[0].text.as_deref(), Some(""));
    }
}
