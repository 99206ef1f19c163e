//! NetLog demonstration
//!
//! Several worker threads simulate socket connections and log their
//! progress through a shared NetLog. A CapturingObserver records every
//! entry and a TracingObserver (enabled with `NETLOG_TRACE_ENTRIES=1`)
//! forwards them to the console as they happen.
//!
//! # Running the example
//!
//! ```bash
//! NETLOG_TRACE_ENTRIES=1 NETLOG_CAPTURE_MODE=include_socket_bytes \
//!     cargo run --example netlog_demo
//! ```

use netlog::config::NetLogConfig;
use netlog::net_log::{
    net_error, string_callback, BoundNetLog, CaptureMode, EventType, NetLog, SourceType,
};
use netlog::observers::{CapturedEntry, CapturingObserver};
use std::sync::Arc;
use std::thread;

fn simulate_connection(net_log: &NetLog, host: &str, succeed: bool) {
    let request = BoundNetLog::make(Some(net_log), SourceType::UrlRequest);
    request.begin_event_with_params(EventType::RequestAlive, &string_callback("url", host));

    let socket = BoundNetLog::make(Some(net_log), SourceType::Socket);
    let request_source = request.source();
    socket.begin_event_with_params(
        EventType::TcpConnect,
        &request_source.to_event_parameters_callback(),
    );

    if succeed {
        socket.end_event_with_net_error_code(EventType::TcpConnect, net_error::OK);
        let payload = format!("GET / HTTP/1.1\r\nHost: {host}\r\n\r\n");
        socket.add_byte_transfer_event(
            EventType::SocketBytesSent,
            payload.len(),
            payload.as_bytes(),
        );
    } else {
        socket.end_event_with_net_error_code(
            EventType::TcpConnect,
            net_error::ERR_CONNECTION_REFUSED,
        );
    }

    request.end_event(EventType::RequestAlive);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("netlog=debug")),
        )
        .init();

    let separator = "=".repeat(80);
    println!("{separator}");
    println!("NetLog Demonstration");
    println!("{separator}");
    println!();

    let config = NetLogConfig::from_env()?;
    let net_log = NetLog::new();

    let capturing = Arc::new(CapturingObserver::new());
    net_log.add_observer(capturing.clone(), config.capture_mode)?;
    let tracing_observer = config.attach_tracing_observer(&net_log)?;

    println!("Capture mode: {}", config.capture_mode);
    println!(
        "Forwarding to tracing: {}",
        if tracing_observer.is_some() { "yes" } else { "no" }
    );
    println!();

    let hosts = [
        ("example.com", true),
        ("example.org", true),
        ("unreachable.test", false),
        ("example.net", true),
    ];

    thread::scope(|scope| {
        for (host, succeed) in hosts {
            let net_log = &net_log;
            scope.spawn(move || simulate_connection(net_log, host, succeed));
        }
    });

    net_log.add_global_entry(EventType::NetworkChanged);

    println!("Captured {} entries", capturing.len());
    let is_failure = |entry: &CapturedEntry| entry.net_error_code().is_some();
    println!(
        "Failed connections: {}",
        capturing.count_entries(None, None, Some(&is_failure))
    );
    println!();

    println!("Last 5 entries:");
    for summary in capturing.last_n_summaries(5, None) {
        println!("{summary}");
    }
    println!();

    if config.capture_mode < CaptureMode::IncludeSocketBytes {
        println!("Set NETLOG_CAPTURE_MODE=include_socket_bytes to see payload bytes.");
    }

    if let Some(observer) = tracing_observer {
        net_log.remove_observer(&*observer)?;
    }
    net_log.remove_observer(&*capturing)?;

    Ok(())
}
