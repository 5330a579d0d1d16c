use std::io::{IsTerminal, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ResponseOutput<'a> {
    endpoint: String,
    request_size: usize,
    response_size: usize,
    response: String,
    elapsed_ms: f64,
    timestamp: &'a str,
}

/// Summary of one completed call.
pub struct CallReport<'a> {
    pub endpoint: &'a Path,
    pub request_size: usize,
    pub response: &'a [u8],
    pub elapsed_ms: f64,
}

pub fn print_response(report: &CallReport<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let timestamp = now_unix_seconds();
            let out = ResponseOutput {
                endpoint: report.endpoint.display().to_string(),
                request_size: report.request_size,
                response_size: report.response.len(),
                response: payload_preview(report.response),
                elapsed_ms: report.elapsed_ms,
                timestamp: &timestamp,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ENDPOINT", "SENT", "RECEIVED", "MS", "RESPONSE"])
                .add_row(vec![
                    report.endpoint.display().to_string(),
                    report.request_size.to_string(),
                    report.response.len().to_string(),
                    format!("{:.2}", report.elapsed_ms),
                    payload_preview(report.response),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "endpoint={} sent={} received={} ms={:.2} response={}",
                report.endpoint.display(),
                report.request_size,
                report.response.len(),
                report.elapsed_ms,
                payload_preview(report.response)
            );
        }
        OutputFormat::Raw => {
            print_raw(report.response);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_keeps_text_and_summarises_binary() {
        assert_eq!(payload_preview(b"hello"), "hello");
        assert_eq!(payload_preview(&[0xff, 0xfe, 0x00]), "<binary 3 bytes>");
        assert_eq!(payload_preview(b""), "");
    }
}
