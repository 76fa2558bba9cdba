//! Database metrics collection.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Histogram of repository query latencies, labelled by query name.
pub const QUERY_DURATION_METRIC: &str = "matchmaker_db_query_duration_seconds";

pub fn record_query_duration(query_name: &'static str, duration_secs: f64) {
    histogram!(QUERY_DURATION_METRIC, "query" => query_name).record(duration_secs);
}

/// Publishes connection pool gauges. Called on every metrics scrape.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("matchmaker_db_connections_active").set(active as f64);
    gauge!("matchmaker_db_connections_idle").set(idle as f64);
    gauge!("matchmaker_db_connections_total").set(size as f64);
}

/// Times one repository query.
///
/// ```ignore
/// let timer = QueryTimer::new("find_match_by_id");
/// let result = sqlx::query_as::<_, MatchEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        record_query_duration(self.query_name, self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_keeps_name() {
        let timer = QueryTimer::new("search_matches");
        assert_eq!(timer.query_name, "search_matches");
    }

    #[test]
    fn test_record_without_recorder_is_noop() {
        QueryTimer::new("count_participations_by_state").record();
    }
}
