//! Conversion from EFA DTOs to domain journeys.

use chrono::Duration;

use crate::domain::{Journey, Leg};

use super::types::{LegDto, SystemMessage, TransportationDto, TripResponse};

/// Error converting a trip response into a journey.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The response contains no journey at all
    #[error("no journeys in response{}", messages_suffix(.messages))]
    NoJourneys { messages: Vec<String> },

    /// The best journey has no legs
    #[error("journey has no legs")]
    NoLegs,

    /// A leg reports a negative duration
    #[error("leg {index} has negative duration {seconds}s")]
    NegativeDuration { index: usize, seconds: i64 },

    /// The leg durations do not fit in a journey duration
    #[error("journey duration out of range at leg {index}")]
    DurationOutOfRange { index: usize },
}

fn messages_suffix(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!(" ({})", messages.join("; "))
    }
}

/// `code: text` of a system message, whichever parts are present.
fn describe(message: &SystemMessage) -> Option<String> {
    let text = message.text.as_deref().map(str::trim).filter(|t| !t.is_empty());
    match (message.code, text) {
        (Some(code), Some(text)) => Some(format!("{code}: {text}")),
        (Some(code), None) => Some(code.to_string()),
        (None, Some(text)) => Some(text.to_string()),
        (None, None) => None,
    }
}

/// Convert the first journey of a trip response.
///
/// The journey duration is the sum of its leg durations; legs without a
/// duration count as zero.
pub fn convert_trip_response(response: &TripResponse) -> Result<Journey, ConversionError> {
    let journey = response
        .journeys
        .first()
        .ok_or_else(|| ConversionError::NoJourneys {
            messages: response.system_messages.iter().filter_map(describe).collect(),
        })?;

    if journey.legs.is_empty() {
        return Err(ConversionError::NoLegs);
    }

    let mut total_secs = 0i64;
    let mut legs = Vec::with_capacity(journey.legs.len());

    for (index, leg) in journey.legs.iter().enumerate() {
        let seconds = leg.duration.unwrap_or(0);
        if seconds < 0 {
            return Err(ConversionError::NegativeDuration { index, seconds });
        }
        total_secs = total_secs
            .checked_add(seconds)
            .ok_or(ConversionError::DurationOutOfRange { index })?;
        legs.push(Leg::new(line_name(leg)));
    }

    let duration = Duration::try_seconds(total_secs).ok_or(ConversionError::DurationOutOfRange {
        index: journey.legs.len() - 1,
    })?;

    Ok(Journey::new(duration, legs))
}

/// Short line name of a leg.
///
/// Prefers `disassembledName`, then `number`, then the product name
/// (footpaths only carry the latter).
fn line_name(leg: &LegDto) -> String {
    leg.transportation
        .as_ref()
        .and_then(transportation_name)
        .unwrap_or_default()
}

fn transportation_name(t: &TransportationDto) -> Option<String> {
    t.disassembled_name
        .clone()
        .or_else(|| t.number.clone())
        .or_else(|| t.product.as_ref().and_then(|p| p.name.clone()))
}
