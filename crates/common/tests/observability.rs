use common::config::LogFormat;
use metrics_exporter_prometheus::PrometheusBuilder;

// Exercises the public `common::observability` surface rather than private layers.

#[test]
fn tracing_error_events_counter_increments_on_error_event() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    metrics::with_local_recorder(&recorder, || {
        let (dispatch, _otel_guard) =
            common::observability::build_dispatch("test-tracker", "info", LogFormat::Json);

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::error!(wallet = "0xabc", "activity fetch failed");
        });
    });

    let rendered = handle.render();
    assert!(
        rendered.contains("tracing_error_events"),
        "expected tracing_error_events in rendered metrics, got:\n{rendered}"
    );
}

#[test]
fn warnings_do_not_count_as_errors() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    metrics::with_local_recorder(&recorder, || {
        let (dispatch, _otel_guard) =
            common::observability::build_dispatch("test-tracker", "info", LogFormat::Text);

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::warn!("balances unavailable, using zero snapshot");
        });
    });

    assert!(!handle.render().contains("tracing_error_events"));
}
