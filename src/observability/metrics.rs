use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub transitions_total: IntCounterVec,
    pub comparisons_total: IntCounterVec,
    pub orders_by_status: IntGaugeVec,
    pub similarity_score: Histogram,
    pub analyses_in_flight: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let transitions_total = IntCounterVec::new(
            Opts::new("transitions_total", "Lifecycle events by kind and outcome"),
            &["event", "outcome"],
        )
        .expect("valid transitions_total metric");

        let comparisons_total = IntCounterVec::new(
            Opts::new("comparisons_total", "Return comparisons by decision"),
            &["decision"],
        )
        .expect("valid comparisons_total metric");

        let orders_by_status = IntGaugeVec::new(
            Opts::new("orders_by_status", "Current number of orders per status"),
            &["status"],
        )
        .expect("valid orders_by_status metric");

        let similarity_score = Histogram::with_opts(
            HistogramOpts::new("similarity_score", "Similarity scores from return comparisons")
                .buckets(vec![50.0, 60.0, 70.0, 80.0, 90.0, 100.0]),
        )
        .expect("valid similarity_score metric");

        let analyses_in_flight = IntGauge::new(
            "analyses_in_flight",
            "Return photo analyses currently running",
        )
        .expect("valid analyses_in_flight metric");

        registry
            .register(Box::new(transitions_total.clone()))
            .expect("register transitions_total");
        registry
            .register(Box::new(comparisons_total.clone()))
            .expect("register comparisons_total");
        registry
            .register(Box::new(orders_by_status.clone()))
            .expect("register orders_by_status");
        registry
            .register(Box::new(similarity_score.clone()))
            .expect("register similarity_score");
        registry
            .register(Box::new(analyses_in_flight.clone()))
            .expect("register analyses_in_flight");

        Self {
            registry,
            transitions_total,
            comparisons_total,
            orders_by_status,
            similarity_score,
            analyses_in_flight,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
