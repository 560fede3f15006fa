//! Unit tests for the bounded dispatcher.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::*;
use crate::directions::{DirectionsError, DirectionsService, TripResponse, convert_trip_response};
use crate::domain::{Coordinates, Journey, Leg, Station, StationId};

fn id(s: &str) -> StationId {
    StationId::parse(s).unwrap()
}

fn station(s: &str) -> Station {
    Station::new(
        id(s),
        format!("Station {s}"),
        Coordinates::new(48.7, 9.1),
        vec!["1".to_string()],
    )
}

fn stations(n: usize) -> Vec<Station> {
    (0..n).map(|i| station(&format!("de:{i}"))).collect()
}

fn when() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 5, 3)
        .unwrap()
        .and_hms_opt(7, 30, 0)
        .unwrap()
}

fn journey(minutes: i64, lines: &[&str]) -> Journey {
    Journey::new(
        Duration::minutes(minutes),
        lines.iter().map(|l| Leg::new(*l)).collect(),
    )
}

/// Stub service with per-origin answers and delays.
///
/// Origins without an answer fail with `NoRoute`. Tracks how many
/// queries were in flight at once.
struct ScriptedService {
    answers: HashMap<StationId, Journey>,
    delays_ms: HashMap<StationId, u64>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedService {
    fn new() -> Self {
        Self {
            answers: HashMap::new(),
            delays_ms: HashMap::new(),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    fn answer(&mut self, origin: &str, journey: Journey) {
        self.answers.insert(id(origin), journey);
    }

    fn delay(&mut self, origin: &str, ms: u64) {
        self.delays_ms.insert(id(origin), ms);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn peak(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl DirectionsService for ScriptedService {
    async fn query(
        &self,
        origin: &StationId,
        _destination: &StationId,
        _when: NaiveDateTime,
    ) -> Result<Journey, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        match self.delays_ms.get(origin) {
            Some(&ms) => tokio::time::sleep(std::time::Duration::from_millis(ms)).await,
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.answers
            .get(origin)
            .cloned()
            .ok_or_else(|| DirectionsError::NoRoute(format!("no answer for {origin}")))
    }
}

#[tokio::test]
async fn one_result_per_origin_in_input_order() {
    let origins = stations(25);
    let mut service = ScriptedService::new();
    for (i, origin) in origins.iter().enumerate() {
        service.answer(origin.id.as_str(), journey(i as i64, &["S1"]));
    }

    let config = DispatchConfig::default();
    let results = Dispatcher::new(&service, &config)
        .dispatch(&origins, &id("de:dest"), when())
        .await;

    assert_eq!(results.len(), origins.len());
    for (i, (result, origin)) in results.iter().zip(&origins).enumerate() {
        assert_eq!(&result.station, origin);
        assert_eq!(result.duration, i as f64);
    }
    assert_eq!(service.calls(), 25);
}

#[tokio::test]
async fn slow_first_origin_keeps_its_slot() {
    let origins = stations(4);
    let mut service = ScriptedService::new();
    for (i, origin) in origins.iter().enumerate() {
        service.answer(origin.id.as_str(), journey(10 + i as i64, &["U6"]));
    }
    // Completion order is the reverse of input order.
    service.delay("de:0", 40);
    service.delay("de:1", 30);
    service.delay("de:2", 20);
    service.delay("de:3", 10);

    let config = DispatchConfig::default();
    let results = Dispatcher::new(&service, &config)
        .dispatch(&origins, &id("de:dest"), when())
        .await;

    let durations: Vec<f64> = results.iter().map(|r| r.duration).collect();
    assert_eq!(durations, vec![10.0, 11.0, 12.0, 13.0]);
}

#[tokio::test]
async fn failures_become_sentinels_not_gaps() {
    let origins = stations(5);
    let mut service = ScriptedService::new();
    service.answer("de:1", journey(30, &["S1", "U6"]));
    service.answer("de:3", journey(15, &["U14"]));

    let config = DispatchConfig::default();
    let results = Dispatcher::new(&service, &config)
        .dispatch(&origins, &id("de:dest"), when())
        .await;

    assert_eq!(results.len(), 5);
    let available: Vec<bool> = results.iter().map(|r| r.is_available()).collect();
    assert_eq!(available, vec![false, true, false, true, false]);

    for idx in [0, 2, 4] {
        assert_eq!(results[idx].duration, -1.0);
        assert_eq!(results[idx].changes, 0);
        assert!(results[idx].transportation.is_empty());
        assert_eq!(results[idx].station, origins[idx]);
    }
    assert_eq!(results[1].transportation, vec!["S1", "U6"]);
    assert_eq!(results[1].changes, 1);
}

#[tokio::test]
async fn in_flight_queries_are_bounded() {
    let origins = stations(20);
    let mut service = ScriptedService::new();
    for origin in &origins {
        service.delay(origin.id.as_str(), 5);
    }

    let config = DispatchConfig::new(3);
    let results = Dispatcher::new(&service, &config)
        .dispatch(&origins, &id("de:dest"), when())
        .await;

    assert_eq!(results.len(), 20);
    assert_eq!(service.peak(), 3);
}

#[tokio::test]
async fn single_worker_runs_serially() {
    let origins = stations(6);
    let mut service = ScriptedService::new();
    for origin in &origins {
        service.delay(origin.id.as_str(), 2);
    }

    let config = DispatchConfig::new(1);
    Dispatcher::new(&service, &config)
        .dispatch(&origins, &id("de:dest"), when())
        .await;

    assert_eq!(service.peak(), 1);
    assert_eq!(service.calls(), 6);
}

#[tokio::test]
async fn zero_concurrency_still_completes() {
    let origins = stations(3);
    let service = ScriptedService::new();

    let config = DispatchConfig::new(0);
    let results = Dispatcher::new(&service, &config)
        .dispatch(&origins, &id("de:dest"), when())
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(service.peak(), 1);
}

#[tokio::test]
async fn empty_origin_list_makes_no_queries() {
    let service = ScriptedService::new();

    let config = DispatchConfig::default();
    let results = Dispatcher::new(&service, &config)
        .dispatch(&[], &id("de:dest"), when())
        .await;

    assert!(results.is_empty());
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn success_then_failure_scenario() {
    let origins = vec![station("de:A"), station("de:B")];
    let mut service = ScriptedService::new();
    service.answer("de:A", journey(30, &["S1", "U6"]));

    let config = DispatchConfig::default();
    let results = Dispatcher::new(&service, &config)
        .dispatch(&origins, &id("D1"), when())
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].station, origins[0]);
    assert_eq!(results[0].duration, 30.0);
    assert_eq!(results[0].changes, 1);
    assert_eq!(results[1].station, origins[1]);
    assert_eq!(results[1].duration, -1.0);
}

/// Answers each origin by converting a canned EFA response body.
struct RecordedResponses {
    bodies: HashMap<StationId, &'static str>,
}

impl DirectionsService for RecordedResponses {
    async fn query(
        &self,
        origin: &StationId,
        _destination: &StationId,
        _when: NaiveDateTime,
    ) -> Result<Journey, DirectionsError> {
        tokio::task::yield_now().await;
        let body = self.bodies[origin];
        let response: TripResponse =
            serde_json::from_str(body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
                body: None,
            })?;
        Ok(convert_trip_response(&response)?)
    }
}

#[tokio::test]
async fn out_of_range_response_does_not_abort_the_batch() {
    let origins = stations(3);
    let ok = r#"{"journeys": [{"legs": [{"duration": 900, "transportation": {"disassembledName": "S1"}}]}]}"#;
    let huge = r#"{"journeys": [{"legs": [{"duration": 9300000000000000, "transportation": {"disassembledName": "S1"}}]}]}"#;
    let service = RecordedResponses {
        bodies: HashMap::from([(id("de:0"), ok), (id("de:1"), huge), (id("de:2"), ok)]),
    };

    let config = DispatchConfig::default();
    let results = Dispatcher::new(&service, &config)
        .dispatch(&origins, &id("de:dest"), when())
        .await;

    assert_eq!(results.len(), 3);
    let durations: Vec<f64> = results.iter().map(|r| r.duration).collect();
    assert_eq!(durations, vec![15.0, -1.0, 15.0]);
    assert!(results[1].transportation.is_empty());
    assert_eq!(results[1].station, origins[1]);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Randomized completion delays never change the output order
        #[test]
        fn order_survives_random_delays(
            delays in proptest::collection::vec(0u64..6, 1..24),
            concurrency in 1usize..10,
            fail_mask in proptest::collection::vec(any::<bool>(), 24),
        ) {
            let origins = stations(delays.len());
            let mut service = ScriptedService::new();
            for (i, origin) in origins.iter().enumerate() {
                service.delay(origin.id.as_str(), delays[i]);
                if !fail_mask[i] {
                    service.answer(origin.id.as_str(), journey(i as i64, &["S1"]));
                }
            }

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            let config = DispatchConfig::new(concurrency);
            let results = runtime.block_on(
                Dispatcher::new(&service, &config).dispatch(&origins, &id("de:dest"), when()),
            );

            prop_assert_eq!(results.len(), origins.len());
            for (i, result) in results.iter().enumerate() {
                prop_assert_eq!(&result.station, &origins[i]);
                if fail_mask[i] {
                    prop_assert_eq!(result.duration, -1.0);
                } else {
                    prop_assert_eq!(result.duration, i as f64);
                }
            }
            prop_assert!(service.peak() <= concurrency);
        }
    }
}
