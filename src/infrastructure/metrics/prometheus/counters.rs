use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

/// The canonical request counter set.
///
/// All three counters are registered together and incremented together;
/// there is no configuration that drops one of them.
pub struct RequestCounters {
    total_requests: IntCounter,
    page_views: IntCounterVec,
    user_accesses: IntCounterVec,
}

impl RequestCounters {
    /// Create the counters and register them with `registry`.
    pub fn register(registry: &Registry) -> prometheus::Result<Self> {
        // ---
        let total_requests = IntCounter::with_opts(Opts::new(
            "http_requests_total",
            "Total number of requests to the web server",
        ))?;
        let page_views = IntCounterVec::new(
            Opts::new("web_page_views_total", "Total number of page views"),
            &["path"],
        )?;
        let user_accesses = IntCounterVec::new(
            Opts::new(
                "web_user_access_total",
                "Total number of user accesses to the website",
            ),
            &["user_ip"],
        )?;

        registry.register(Box::new(total_requests.clone()))?;
        registry.register(Box::new(page_views.clone()))?;
        registry.register(Box::new(user_accesses.clone()))?;

        Ok(Self {
            total_requests,
            page_views,
            user_accesses,
        })
    }

    /// Count one request against every counter.
    pub fn increment(&self, route: &str, client_ip: &str) {
        self.total_requests.inc();
        self.page_views.with_label_values(&[route]).inc();
        self.user_accesses.with_label_values(&[client_ip]).inc();
    }
}
