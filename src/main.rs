use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use ecowitt_ingest::config::IngestConfig;
use ecowitt_ingest::utils::format_datetime;
use ecowitt_ingest::{decode, DecodeOptions, DecodeOutcome, Payload};

/// Decode newline separated form-encoded payloads from stdin until EOF
async fn main_loop(config: IngestConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Reading station payloads from stdin");

    let options = config.decode_options();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut count = 0usize;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        count += 1;

        let outcome = decode_line(&line, &options);
        log_summary(count, &outcome);

        let json = if config.pretty {
            serde_json::to_string_pretty(&outcome)?
        } else {
            serde_json::to_string(&outcome)?
        };
        stdout.write_all(json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("Decoded {} payloads", count);
    Ok(())
}

fn decode_line(line: &str, options: &DecodeOptions) -> DecodeOutcome {
    decode(&Payload::from_form(line), options)
}

fn log_summary(count: usize, outcome: &DecodeOutcome) {
    let data = &outcome.data;
    let station = data
        .device_info
        .name
        .as_deref()
        .or(data.device_info.version.as_deref())
        .unwrap_or("unknown station");

    match data.device_info.observed_at {
        Some(observed_at) => info!(
            "Payload {} from {} at {}",
            count,
            station,
            format_datetime(&observed_at)
        ),
        None => info!("Payload {} from {}", count, station),
    }

    if let Some(temperature) = data.weather.temperature.as_ref() {
        if let Some(value) = temperature.number() {
            info!("  Temperature: {:.1}{}", value, temperature.unit);
        }
    }
    if let Some(humidity) = data.weather.humidity.as_ref().and_then(|h| h.number()) {
        info!("  Humidity: {:.0}%", humidity);
    }
    info!(
        "  {} channel readings, {} diagnostic sensors, {} IoT devices",
        data.channels.len(),
        data.diagnostics.len(),
        data.iot_devices.len()
    );

    for failure in &outcome.failures {
        warn!("  Failed: {}", failure);
    }
    if !outcome.unknown_keys.is_empty() {
        info!("  Ignored unknown keys: {}", outcome.unknown_keys.join(", "));
    }
    if !outcome.superseded_keys.is_empty() {
        info!("  Superseded keys: {}", outcome.superseded_keys.join(", "));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match IngestConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(());
            }
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    tokio::select! {
        result = main_loop(config) => {
            match result {
                Ok(_) => info!("Input exhausted, exiting"),
                Err(e) => error!("Fatal error: {}", e),
            }
        }
        _ = &mut rx => {
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    Ok(())
}
