use std::fs;
use std::time::{Duration, Instant};

use telefoniste_session::{Client, SessionConfig};
use tracing::debug;

use crate::cmd::CallArgs;
use crate::exit::{io_error, session_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_response, CallReport, OutputFormat};

pub fn run(args: CallArgs, format: OutputFormat) -> CliResult<i32> {
    let mut config = SessionConfig::new(&args.path);
    if let Some(timeout) = &args.timeout {
        config = config.with_timeout(parse_duration(timeout)?);
    }

    let payload = resolve_payload(&args)?;
    debug!(path = ?args.path, request_size = payload.len(), "calling");

    let started = Instant::now();
    let response = Client::new(config)
        .call(&payload)
        .map_err(|err| session_error("call failed", err))?;
    let elapsed_ms = (started.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0;

    print_response(
        &CallReport {
            endpoint: &args.path,
            request_size: payload.len(),
            response: response.as_ref(),
            elapsed_ms,
        },
        format,
    );
    Ok(SUCCESS)
}

fn resolve_payload(args: &CallArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Ok(Vec::new())
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, millis) = if let Some(num) = input.strip_suffix("ms") {
        (num, true)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, false)
    } else {
        (input, false)
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    if millis {
        Ok(Duration::from_millis(value))
    } else {
        Ok(Duration::from_secs(value))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args() -> CallArgs {
        CallArgs {
            path: PathBuf::from("/tmp/test.sock"),
            data: None,
            file: None,
            timeout: None,
        }
    }

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert_eq!(parse_duration("").unwrap_err().code, USAGE);
    }

    #[test]
    fn payload_defaults_to_empty() {
        assert!(resolve_payload(&args()).unwrap().is_empty());
    }

    #[test]
    fn payload_from_data_and_file() {
        let from_data = CallArgs {
            data: Some("hello".to_string()),
            ..args()
        };
        assert_eq!(resolve_payload(&from_data).unwrap(), b"hello");

        let file = std::env::temp_dir().join(format!(
            "telefoniste-payload-{}.bin",
            std::process::id()
        ));
        std::fs::write(&file, [0u8, 1, 2, 255]).unwrap();
        let from_file = CallArgs {
            file: Some(file.clone()),
            ..args()
        };
        assert_eq!(resolve_payload(&from_file).unwrap(), vec![0u8, 1, 2, 255]);
        let _ = std::fs::remove_file(&file);
    }

    #[test]
    fn missing_payload_file_is_reported() {
        let from_file = CallArgs {
            file: Some(PathBuf::from("/nonexistent/telefoniste/payload.bin")),
            ..args()
        };
        let err = resolve_payload(&from_file).unwrap_err();
        assert!(err.message.contains("failed reading"));
    }
}
