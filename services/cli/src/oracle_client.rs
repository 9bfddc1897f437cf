//! Qualification oracle backed by an OpenAI-compatible chat completion endpoint.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use recruit_ai::config::OracleConfig;
use recruit_ai::workflows::screening::{
    AdjudicationRequest, OracleFault, QualificationOracle, QualificationVerdict,
};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::prompts::{criteria_message, SCREENING_SYSTEM_PROMPT};

const RESPONSE_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking HTTP client; construct it on the thread that runs the screening loop.
pub(crate) struct HttpQualificationOracle {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

impl HttpQualificationOracle {
    pub(crate) fn new(config: &OracleConfig) -> Result<Self, OracleFault> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| OracleFault::Transport(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout: config.timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> OracleFault {
        if err.is_timeout() {
            OracleFault::Timeout(self.timeout)
        } else if err.is_decode() {
            OracleFault::Parse(err.to_string())
        } else {
            OracleFault::Transport(err.to_string())
        }
    }
}

impl QualificationOracle for HttpQualificationOracle {
    fn adjudicate(
        &self,
        request: &AdjudicationRequest<'_>,
    ) -> Result<QualificationVerdict, OracleFault> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| OracleFault::Transport("OPENAI_API_KEY is not set".to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request_body(&self.model, request))
            .send()
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OracleFault::Transport(format!(
                "HTTP {status}: {}",
                preview(&body)
            )));
        }

        let completion: ChatCompletion = response.json().map_err(|err| self.classify(err))?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OracleFault::Parse("response carried no message content".to_string()))?;
        debug!(model = %self.model, response = %preview(&content), "oracle answered");

        parse_verdict(&content)
    }
}

fn request_body(model: &str, request: &AdjudicationRequest<'_>) -> Value {
    let mut content = vec![json!({
        "type": "text",
        "text": criteria_message(request.criteria, &request.candidate.text),
    })];
    if let Some(image) = &request.candidate.image_png {
        content.push(json!({
            "type": "image_url",
            "image_url": { "url": format!("data:image/png;base64,{}", STANDARD.encode(image)) },
        }));
    }

    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": SCREENING_SYSTEM_PROMPT },
            { "role": "user", "content": content },
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "qualification_verdict",
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "reason": { "type": "string" },
                        "is_qualified": { "type": "boolean" },
                    },
                    "required": ["reason", "is_qualified"],
                    "additionalProperties": false,
                },
            },
        },
    })
}

/// Decode the verdict, tolerating code fences or prose around the JSON object.
fn parse_verdict(content: &str) -> Result<QualificationVerdict, OracleFault> {
    let cleaned = strip_code_fences(content);
    let value = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => value,
        Err(_) => extract_json_object(&cleaned).ok_or_else(|| {
            OracleFault::Parse(format!("no JSON object in response: {}", preview(content)))
        })?,
    };
    serde_json::from_value(value).map_err(|err| OracleFault::Parse(err.to_string()))
}

fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let mut lines: Vec<&str> = trimmed.lines().collect();
    if lines.first().is_some_and(|line| line.trim_start().starts_with("```")) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| line.trim_start().starts_with("```")) {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}

fn extract_json_object(raw: &str) -> Option<Value> {
    raw.char_indices()
        .filter(|(_, ch)| *ch == '{')
        .find_map(|(idx, _)| {
            let mut deserializer = serde_json::Deserializer::from_str(&raw[idx..]);
            Value::deserialize(&mut deserializer)
                .ok()
                .filter(Value::is_object)
        })
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(RESPONSE_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
