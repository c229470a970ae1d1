//! Preferred-sensor history queries with failover.
//!
//! A boat's preferred movement sensor is not always the one that has been
//! recording. When the preferred sensor returns nothing, the position-capable
//! alternates are tried in order and the first one with data becomes the new
//! preference, so later queries go straight to it.
//!
//! Only an empty result triggers failover. A query that fails outright
//! stops the chain and the error goes back to the caller.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::types::{HistoryError, HistoryPoint, HistoryQuery};

/// Default per-attempt history query timeout.
pub const DEFAULT_HISTORY_TIMEOUT: Duration = Duration::from_secs(30);

/// Which sensor history queries should try first.
///
/// Lives for the session. Only a successful failover changes it, and that
/// requires `&mut`, so there is exactly one writer at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRoutingState {
    preferred_sensor_name: String,
}

impl QueryRoutingState {
    /// Routing state starting from `preferred` (may be empty).
    pub fn new(preferred: impl Into<String>) -> Self {
        Self {
            preferred_sensor_name: preferred.into(),
        }
    }

    pub fn preferred(&self) -> &str {
        &self.preferred_sensor_name
    }
}

/// Query the preferred sensor, then each alternate, until one has data.
///
/// 1. If a preferred sensor is set and returns data, that data is returned.
/// 2. Otherwise each alternate is queried in order; the first non-empty
///    result is returned and its sensor becomes the preferred one.
/// 3. If every attempt is empty, an empty result is returned.
///
/// Any `Err` from `query` is returned immediately and no further sensors
/// are tried. The routing state is left unchanged in that case.
pub async fn fetch_with_failover<T, E, F, Fut>(
    mut query: F,
    routing: &mut QueryRoutingState,
    alternates: &[String],
) -> Result<Vec<T>, E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    if !routing.preferred_sensor_name.is_empty() {
        let preferred = routing.preferred_sensor_name.clone();
        let res = query(preferred.clone()).await?;
        tracing::debug!(sensor = %preferred, points = res.len(), "Preferred sensor queried");
        if !res.is_empty() {
            return Ok(res);
        }
    }

    for name in alternates {
        let res = query(name.clone()).await?;
        tracing::debug!(sensor = %name, points = res.len(), "Alternate sensor queried");
        if !res.is_empty() {
            if routing.preferred_sensor_name != *name {
                tracing::info!(
                    from = %routing.preferred_sensor_name,
                    to = %name,
                    "History sensor switched"
                );
            }
            routing.preferred_sensor_name = name.clone();
            return Ok(res);
        }
    }

    Ok(Vec::new())
}

/// Owns the routing state and alternates for position-history queries.
#[derive(Debug)]
pub struct FailoverController<Q> {
    query: Q,
    routing: QueryRoutingState,
    alternates: Vec<String>,
    timeout: Option<Duration>,
}

impl<Q: HistoryQuery> FailoverController<Q> {
    /// Controller with no preference, no alternates and the default timeout.
    pub fn new(query: Q) -> Self {
        Self {
            query,
            routing: QueryRoutingState::default(),
            alternates: Vec::new(),
            timeout: Some(DEFAULT_HISTORY_TIMEOUT),
        }
    }

    pub fn with_preferred(mut self, name: impl Into<String>) -> Self {
        self.routing = QueryRoutingState::new(name);
        self
    }

    pub fn with_alternates(mut self, alternates: Vec<String>) -> Self {
        self.alternates = alternates;
        self
    }

    /// Per-attempt timeout (`None` waits indefinitely). A timed-out attempt
    /// is a failure, not an empty result.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the failover candidates.
    pub fn set_alternates(&mut self, alternates: Vec<String>) {
        self.alternates = alternates;
    }

    /// Replace the preferred sensor (e.g. after re-running selection).
    pub fn set_preferred(&mut self, name: impl Into<String>) {
        self.routing = QueryRoutingState::new(name);
    }

    pub fn routing(&self) -> &QueryRoutingState {
        &self.routing
    }

    pub fn alternates(&self) -> &[String] {
        &self.alternates
    }

    /// Fetch position history since `start`, failing over as needed.
    pub async fn fetch(
        &mut self,
        start: DateTime<Utc>,
    ) -> Result<Vec<HistoryPoint>, HistoryError> {
        let query = &self.query;
        let timeout = self.timeout;
        fetch_with_failover(
            |sensor| timed_query(query, sensor, start, timeout),
            &mut self.routing,
            &self.alternates,
        )
        .await
    }
}

async fn timed_query<Q: HistoryQuery>(
    query: &Q,
    sensor: String,
    start: DateTime<Utc>,
    timeout: Option<Duration>,
) -> Result<Vec<HistoryPoint>, HistoryError> {
    let started = std::time::Instant::now();
    let res = match timeout {
        Some(after) => tokio::time::timeout(after, query.position_history(&sensor, start))
            .await
            .map_err(|_| HistoryError::Timeout {
                sensor: sensor.clone(),
                after,
            })?,
        None => query.position_history(&sensor, start).await,
    };
    if let Ok(points) = &res {
        tracing::debug!(
            sensor = %sensor,
            points = points.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "History query completed"
        );
    }
    res
}

/// Cloneable handle that serializes failover calls.
///
/// Concurrent callers queue on an async mutex so the routing state sees one
/// failover at a time and no preference update is lost.
#[derive(Debug)]
pub struct SharedFailoverController<Q> {
    inner: Arc<Mutex<FailoverController<Q>>>,
}

impl<Q> Clone for SharedFailoverController<Q> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Q: HistoryQuery> SharedFailoverController<Q> {
    pub fn new(controller: FailoverController<Q>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    pub async fn fetch(&self, start: DateTime<Utc>) -> Result<Vec<HistoryPoint>, HistoryError> {
        self.inner.lock().await.fetch(start).await
    }

    /// Current preferred sensor name.
    pub async fn preferred(&self) -> String {
        self.inner.lock().await.routing().preferred().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    /// Scripted per-sensor answers; records call order.
    #[derive(Default)]
    struct ScriptedQuery {
        answers: HashMap<String, Result<Vec<HistoryPoint>, HistoryError>>,
        calls: StdMutex<Vec<String>>,
    }

    impl ScriptedQuery {
        fn answer(mut self, sensor: &str, res: Result<Vec<HistoryPoint>, HistoryError>) -> Self {
            self.answers.insert(sensor.to_string(), res);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl HistoryQuery for ScriptedQuery {
        async fn position_history(
            &self,
            sensor: &str,
            _start: DateTime<Utc>,
        ) -> Result<Vec<HistoryPoint>, HistoryError> {
            self.calls.lock().unwrap().push(sensor.to_string());
            self.answers.get(sensor).cloned().unwrap_or(Ok(Vec::new()))
        }
    }

    fn point(t: i64) -> HistoryPoint {
        HistoryPoint::new(DateTime::from_timestamp(t, 0).unwrap(), json!({ "t": t }))
    }

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_falls_over_to_first_non_empty_alternate() {
        let mut routing = QueryRoutingState::new("a");
        let mut calls = Vec::new();

        let res: Result<Vec<i32>, String> = fetch_with_failover(
            |name| {
                calls.push(name.clone());
                async move {
                    Ok(match name.as_str() {
                        "c" => vec![1],
                        _ => vec![],
                    })
                }
            },
            &mut routing,
            &names(&["b", "c"]),
        )
        .await;

        assert_eq!(res, Ok(vec![1]));
        assert_eq!(routing.preferred(), "c");
        assert_eq!(calls, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_preferred_with_data_skips_alternates() {
        let mut routing = QueryRoutingState::new("a");
        let mut calls = 0;

        let res: Result<Vec<i32>, String> = fetch_with_failover(
            |_| {
                calls += 1;
                async { Ok(vec![7]) }
            },
            &mut routing,
            &names(&["b"]),
        )
        .await;

        assert_eq!(res, Ok(vec![7]));
        assert_eq!(calls, 1);
        assert_eq!(routing.preferred(), "a");
    }

    #[tokio::test]
    async fn test_failure_propagates_without_trying_alternates() {
        let mut routing = QueryRoutingState::new("a");
        let mut calls = Vec::new();

        let res: Result<Vec<i32>, String> = fetch_with_failover(
            |name| {
                calls.push(name.clone());
                async move { Err(format!("{name} unreachable")) }
            },
            &mut routing,
            &names(&["b", "c"]),
        )
        .await;

        assert_eq!(res, Err("a unreachable".to_string()));
        assert_eq!(calls, vec!["a"]);
        assert_eq!(routing.preferred(), "a");
    }

    #[tokio::test]
    async fn test_all_empty_is_ok_and_keeps_preference() {
        let mut routing = QueryRoutingState::new("a");

        let res: Result<Vec<i32>, String> =
            fetch_with_failover(|_| async { Ok(vec![]) }, &mut routing, &names(&["b", "c"]))
                .await;

        assert_eq!(res, Ok(vec![]));
        assert_eq!(routing.preferred(), "a");
    }

    #[tokio::test]
    async fn test_empty_preferred_goes_straight_to_alternates() {
        let mut routing = QueryRoutingState::default();
        let mut calls = Vec::new();

        let res: Result<Vec<i32>, String> = fetch_with_failover(
            |name| {
                calls.push(name);
                async { Ok(vec![1]) }
            },
            &mut routing,
            &names(&["b"]),
        )
        .await;

        assert_eq!(res, Ok(vec![1]));
        assert_eq!(calls, vec!["b"]);
        assert_eq!(routing.preferred(), "b");
    }

    #[tokio::test]
    async fn test_controller_remembers_working_sensor() {
        let query = ScriptedQuery::default().answer("c", Ok(vec![point(1)]));
        let mut controller = FailoverController::new(query)
            .with_preferred("a")
            .with_alternates(names(&["b", "c"]));

        let first = controller.fetch(Utc::now()).await.unwrap();
        assert_eq!(first, vec![point(1)]);
        assert_eq!(controller.routing().preferred(), "c");

        controller.fetch(Utc::now()).await.unwrap();
        assert_eq!(controller.query.calls(), vec!["a", "b", "c", "c"]);
    }

    #[tokio::test]
    async fn test_controller_propagates_error() {
        let query = ScriptedQuery::default().answer("a", Err(HistoryError::Http("refused".into())));
        let mut controller = FailoverController::new(query)
            .with_preferred("a")
            .with_alternates(names(&["b"]));

        let err = controller.fetch(Utc::now()).await.unwrap_err();

        assert_eq!(err, HistoryError::Http("refused".into()));
        assert_eq!(controller.query.calls(), vec!["a"]);
    }

    struct HangingQuery;

    impl HistoryQuery for HangingQuery {
        async fn position_history(
            &self,
            _sensor: &str,
            _start: DateTime<Utc>,
        ) -> Result<Vec<HistoryPoint>, HistoryError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_failure() {
        let mut controller = FailoverController::new(HangingQuery)
            .with_preferred("a")
            .with_alternates(names(&["b"]))
            .with_timeout(Some(Duration::from_secs(2)));

        let err = controller.fetch(Utc::now()).await.unwrap_err();

        assert!(matches!(err, HistoryError::Timeout { ref sensor, .. } if sensor == "a"));
    }

    #[tokio::test]
    async fn test_shared_controller_updates_preference() {
        let query = ScriptedQuery::default().answer("b", Ok(vec![point(5)]));
        let shared = SharedFailoverController::new(
            FailoverController::new(query).with_alternates(names(&["b"])),
        );

        let other = shared.clone();
        let (x, y) = tokio::join!(shared.fetch(Utc::now()), other.fetch(Utc::now()));

        assert_eq!(x.unwrap().len(), 1);
        assert_eq!(y.unwrap().len(), 1);
        assert_eq!(shared.preferred().await, "b");
    }
}
