//! mindset CLI / JSON-RPC server
//!
//! Thin transport around the engine: parse input, call, print JSON.
//!
//! Run with: cargo run -- classify '{"q1":"A","q2":"B"}'

use anyhow::{bail, Context, Result};
use mindset_engine::{
    AnswerSet, ClassificationStrategy, Classifier, EngineConfig, EngineError, MindsetStyle,
    PersonalizationEngine,
};
use serde_json::{json, Value};
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = EngineConfig::load()?;

    match args.get(1).map(|s| s.as_str()) {
        Some("classify") => {
            // classify [--sum] <answers-json>
            let sum = args.iter().any(|a| a == "--sum");
            let raw = positional(&args[2..]).first().copied().context("Usage: classify [--sum] <answers-json>")?;
            run_classify(&config, raw, sum)
        }
        Some("select") => {
            let rest = positional(&args[2..]);
            let (Some(content_id), Some(mode)) = (rest.first(), rest.get(1)) else {
                bail!("Usage: select <content-id> <Short|Elaborate|Realistic>");
            };
            let engine = PersonalizationEngine::init(config)?;
            print_json(&engine.select_by_name(content_id, mode)?)
        }
        Some("personalize") => {
            let rest = positional(&args[2..]);
            let (Some(content_id), Some(raw)) = (rest.first(), rest.get(1)) else {
                bail!("Usage: personalize <content-id> <answers-json>");
            };
            let engine = PersonalizationEngine::init(config)?;
            print_json(&engine.personalize(&parse_answers(raw)?, content_id)?)
        }
        Some("--check-datasets") => {
            let engine = PersonalizationEngine::init(config)?;
            print_json(&engine.dataset_summary()?)
        }
        Some("--questions") => {
            let count = match args.get(2) {
                Some(n) => Some(n.parse::<usize>().context("question count must be a number")?),
                None => None,
            };
            let engine = PersonalizationEngine::init(config)?;
            print_json(&engine.questions(count)?)
        }
        Some("--profile") => {
            let style: MindsetStyle = args.get(2).context("Usage: --profile <style>")?.parse()?;
            print_json(&mindset_engine::tables::profile(style))
        }
        Some("--serve") => {
            let port: u16 = args
                .iter()
                .find_map(|a| a.strip_prefix("--port=").and_then(|p| p.parse().ok()))
                .unwrap_or(8000);
            // The accept loop and its handlers block, so keep them off the async workers
            tokio::task::spawn_blocking(move || run_http_server(config, port)).await?
        }
        Some("--config") => print_json(&config),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Usage: mindset <command>\n");
    println!("  classify [--sum] <answers-json>     Classify answers into a mindset style");
    println!("  select <content-id> <style>         Select content for a style");
    println!("  personalize <content-id> <json>     Classify, then select content");
    println!("  --check-datasets                    Row counts per dataset");
    println!("  --questions [n]                     Sample assessment questions (default 5)");
    println!("  --profile <style>                   Advice for a style");
    println!("  --serve [--port=N]                  JSON-RPC over HTTP (default port 8000)");
    println!("  --config                            Show the effective configuration");
}

fn positional(args: &[String]) -> Vec<&str> {
    args.iter()
        .filter(|a| !a.starts_with("--"))
        .map(|a| a.as_str())
        .collect()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_answers(raw: &str) -> Result<AnswerSet> {
    // Accept either inline JSON or a path to a JSON file
    let text = if Path::new(raw).is_file() {
        std::fs::read_to_string(raw).with_context(|| format!("Failed to read {}", raw))?
    } else {
        raw.to_string()
    };
    serde_json::from_str(&text).context("answers must be a JSON object of question id -> answer")
}

fn run_classify(config: &EngineConfig, raw: &str, sum: bool) -> Result<()> {
    let strategy = if sum { ClassificationStrategy::Sum } else { config.strategy };
    let classifier = strategy.with_policy(config.empty_answers);
    print_json(&classifier.classify(&parse_answers(raw)?)?)
}

// ============================================================================
// JSON-RPC OVER HTTP
// ============================================================================

/// Largest request body the server will read
const MAX_BODY_BYTES: usize = 1024 * 1024;

fn run_http_server(config: EngineConfig, port: u16) -> Result<()> {
    use std::net::TcpListener;

    let engine = Arc::new(PersonalizationEngine::init(config)?);
    let listener = TcpListener::bind(format!("127.0.0.1:{}", port))?;
    tracing::info!("Listening on http://localhost:{}/", port);

    for stream in listener.incoming() {
        let stream = stream?;
        let engine = Arc::clone(&engine);

        std::thread::spawn(move || {
            if let Err(e) = handle_http_request(stream, &engine) {
                tracing::warn!("Request error: {}", e);
            }
        });
    }

    Ok(())
}

fn handle_http_request(mut stream: std::net::TcpStream, engine: &PersonalizationEngine) -> Result<()> {
    use std::io::{BufReader, Write};

    let mut reader = BufReader::new(&stream);
    let response_body = match read_request_body(&mut reader)? {
        Ok(body) => rpc_response(engine, &body),
        Err(e) => json!({"jsonrpc": "2.0", "id": null, "error": {"code": e.code, "message": e.message}}),
    };

    let response_str = serde_json::to_string(&response_body)?;
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        response_str.len(),
        response_str
    );

    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

/// Read the request line and headers, then the body.
///
/// An oversized Content-Length is answered with a JSON-RPC error before
/// anything is allocated for it.
fn read_request_body<R: BufRead>(reader: &mut R) -> Result<std::result::Result<Vec<u8>, RpcError>> {
    use std::io::Read;

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut content_length: usize = 0;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    if content_length > MAX_BODY_BYTES {
        tracing::warn!(content_length, "Rejecting oversized request body");
        return Ok(Err(RpcError {
            code: -32600,
            message: format!("request body too large (limit {} bytes)", MAX_BODY_BYTES),
        }));
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;
    Ok(Ok(body))
}

fn rpc_response(engine: &PersonalizationEngine, body: &[u8]) -> Value {
    let json_req: Value = serde_json::from_slice(body).unwrap_or_else(|_| json!({}));
    let method = json_req.get("method").and_then(|m| m.as_str()).unwrap_or("");
    let params = json_req.get("params").cloned().unwrap_or_else(|| json!({}));
    let id = json_req.get("id").cloned().unwrap_or(json!(1));

    match dispatch(engine, method, &params) {
        Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        Err(e) => json!({"jsonrpc": "2.0", "id": id, "error": {"code": e.code, "message": e.message}}),
    }
}

#[derive(Debug)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: -32602, message: message.into() }
    }
}

impl From<EngineError> for RpcError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::NotFound(_) => Self { code: -32004, message: e.to_string() },
            e if e.is_client_error() => Self::invalid_params(e.to_string()),
            e => {
                tracing::error!("Engine failure: {}", e);
                Self { code: -32000, message: "internal error".to_string() }
            }
        }
    }
}

fn dispatch(engine: &PersonalizationEngine, method: &str, params: &Value) -> std::result::Result<Value, RpcError> {
    let to_value = |v: Result<Value, serde_json::Error>| {
        v.map_err(|e| {
            tracing::error!("Serialization failure: {}", e);
            RpcError { code: -32000, message: "internal error".to_string() }
        })
    };

    match method {
        "classify" => {
            let answers = answers_param(params)?;
            let classifier = match params.get("strategy") {
                Some(s) => serde_json::from_value::<ClassificationStrategy>(s.clone())
                    .map_err(|_| RpcError::invalid_params("strategy must be \"weighted\" or \"sum\""))?
                    .with_policy(engine.config().empty_answers),
                None => engine.config().strategy.with_policy(engine.config().empty_answers),
            };
            to_value(serde_json::to_value(classifier.classify(&answers)?))
        }
        "select" => {
            let content_id = str_param(params, "content_id")?;
            let mode = str_param(params, "mode")?;
            to_value(serde_json::to_value(engine.select_by_name(content_id, mode)?))
        }
        "personalize" => {
            let content_id = str_param(params, "content_id")?;
            let answers = answers_param(params)?;
            to_value(serde_json::to_value(engine.personalize(&answers, content_id)?))
        }
        "check_datasets" => to_value(serde_json::to_value(engine.dataset_summary()?)),
        "get_questions" => {
            let count = params.get("count").and_then(|c| c.as_u64()).map(|c| c as usize);
            to_value(serde_json::to_value(engine.questions(count)?))
        }
        _ => Err(RpcError { code: -32601, message: format!("Unknown method: {}", method) }),
    }
}

fn str_param<'a>(params: &'a Value, name: &str) -> std::result::Result<&'a str, RpcError> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params(format!("missing string param {:?}", name)))
}

fn answers_param(params: &Value) -> std::result::Result<AnswerSet, RpcError> {
    let raw = params.get("answers").cloned().unwrap_or_else(|| json!({}));
    serde_json::from_value(raw)
        .map_err(|e| RpcError::invalid_params(format!("answers must map question id -> answer: {}", e)))
}
