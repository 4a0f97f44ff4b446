//! MME Session
//!
//! Drives one matrix engine over stdio, one JSON object per line.
//!
//! Request:  `{"id": 1, "op": "plus_rows", "a": 0, "b": 1, "mult": 2}`
//! Response: `{"id": 1, "ok": true, "outcome": {...}, "matrix": {...}, "history": 1, "capabilities": {...}}`
//!
//! Rejected operations answer with `"ok": false` and an error report; the
//! matrix is untouched. Engine settings come from `MME_ROWS`, `MME_COLS`
//! and `MME_HISTORY_CAPACITY`; log filtering from `RUST_LOG`.

use mme_core::{EngineConfig, ErrorReport};
use mme_matrix::{Capabilities, Matrix, MatrixEngine, Operation, Outcome};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
struct SessionResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<&'a Matrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capabilities: Option<Capabilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

impl<'a> SessionResponse<'a> {
    fn success(id: Option<JsonValue>, outcome: Outcome, engine: &'a MatrixEngine) -> Self {
        Self {
            id,
            ok: true,
            outcome: Some(outcome),
            matrix: Some(engine.matrix()),
            history: Some(engine.history_len()),
            capabilities: Some(engine.capabilities()),
            error: None,
        }
    }

    fn failure(id: Option<JsonValue>, error: ErrorReport) -> Self {
        Self {
            id,
            ok: false,
            outcome: None,
            matrix: None,
            history: None,
            capabilities: None,
            error: Some(error),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Handle one request line and produce the response line
fn handle_line(engine: &mut MatrixEngine, line: &str) -> String {
    let request: JsonValue = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            debug!("unparsable request: {}", e);
            return encode(&SessionResponse::failure(None, ErrorReport::parse_error(e.to_string())));
        }
    };

    let id = request.get("id").cloned();
    let op: Operation = match serde_json::from_value(request) {
        Ok(op) => op,
        Err(e) => {
            debug!("unknown operation: {}", e);
            return encode(&SessionResponse::failure(id, ErrorReport::parse_error(e.to_string())));
        }
    };

    debug!(op = op.name(), "processing");
    match engine.apply(&op) {
        Ok(outcome) => encode(&SessionResponse::success(id, outcome, engine)),
        Err(e) => encode(&SessionResponse::failure(id, e.report())),
    }
}

fn encode(response: &SessionResponse<'_>) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        error!("failed to encode response: {}", e);
        format!(r#"{{"ok":false,"error":{{"code":"INTERNAL","message":"{}"}}}}"#, e)
    })
}

fn main() -> ExitCode {
    init_tracing();

    let config = EngineConfig::from_env();
    let mut engine = match MatrixEngine::with_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        version = SERVER_VERSION,
        rows = config.initial_rows,
        cols = config.initial_cols,
        history = config.history_capacity,
        "MME session started"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("end of input");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let response = handle_line(&mut engine, line);
                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response).and_then(|_| stdout.flush()) {
                    error!("error writing response: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            Err(e) => {
                error!("error reading input: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    info!("session closed");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respond(engine: &mut MatrixEngine, line: &str) -> JsonValue {
        serde_json::from_str(&handle_line(engine, line)).unwrap()
    }

    #[test]
    fn test_successful_operation() {
        let mut engine = MatrixEngine::new(2, 2).unwrap();
        let r = respond(&mut engine, r#"{"id": 7, "op": "set_matrix", "rows": [[1, 2, 3], [4, 5]]}"#);
        assert_eq!(r["id"], 7);
        assert_eq!(r["ok"], true);
        assert_eq!(r["matrix"]["rows"], 2);
        assert_eq!(r["matrix"]["cols"], 3);
        assert_eq!(r["matrix"]["data"][1][2], 0.0);
        assert_eq!(r["history"], 1);
        assert_eq!(r["capabilities"]["mul_last_column"], true);
        assert_eq!(r["outcome"]["kind"], "changed");
        assert_eq!(r["outcome"]["value"]["right"], 3);
    }

    #[test]
    fn test_determinant_outcome() {
        let mut engine = MatrixEngine::new(2, 2).unwrap();
        respond(&mut engine, r#"{"op": "set_matrix", "rows": [[2, 0], [0, 3]]}"#);
        let r = respond(&mut engine, r#"{"id": "d", "op": "determinant"}"#);
        assert_eq!(r["id"], "d");
        assert_eq!(r["outcome"]["kind"], "determinant");
        assert_eq!(r["outcome"]["value"], 6.0);
    }

    #[test]
    fn test_engine_error() {
        let mut engine = MatrixEngine::new(2, 2).unwrap();
        let r = respond(&mut engine, r#"{"id": 1, "op": "swap_rows", "a": 0, "b": 5}"#);
        assert_eq!(r["ok"], false);
        assert_eq!(r["error"]["code"], "INDEX_OUT_OF_RANGE");
        assert!(r.get("matrix").is_none());
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_parse_errors() {
        let mut engine = MatrixEngine::new(2, 2).unwrap();
        let r = respond(&mut engine, "not json");
        assert_eq!(r["error"]["code"], "PARSE_ERROR");
        assert!(r.get("id").is_none());

        let r = respond(&mut engine, r#"{"id": 3, "op": "invert"}"#);
        assert_eq!(r["id"], 3);
        assert_eq!(r["error"]["code"], "PARSE_ERROR");
    }

    #[test]
    fn test_undo_roundtrip() {
        let mut engine = MatrixEngine::new(1, 2).unwrap();
        respond(&mut engine, r#"{"op": "plus_row", "c": 0, "x": 2.5}"#);
        let r = respond(&mut engine, r#"{"op": "undo"}"#);
        assert_eq!(r["matrix"]["data"][0][0], 0.0);
        assert_eq!(r["history"], 0);

        let r = respond(&mut engine, r#"{"op": "undo"}"#);
        assert_eq!(r["ok"], true);
        assert!(r["outcome"]["value"].is_null());
    }
}
