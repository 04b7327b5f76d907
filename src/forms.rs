use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::{ToastmastersMeeting, TBA};

/// Event text that marks a row as an evaluation slot. Any one marker found in
/// the event is enough; a row with neither is never an evaluation.
const EVALUATION_MARKERS: &[&str] = &["Evaluate speech", "Table Topics Evaluator"];
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Web-app endpoints that refresh the dropdown options of the feedback forms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormEndpoints {
    pub feedback_url: Option<String>,
    pub speaker_url: Option<String>,
    pub evaluator_url: Option<String>,
    pub table_topics_url: Option<String>,
    pub retries: u32,
    pub backoff_ms: u64,
    pub timeout_secs: u64,
}

impl Default for FormEndpoints {
    fn default() -> Self {
        FormEndpoints {
            feedback_url: None,
            speaker_url: None,
            evaluator_url: None,
            table_topics_url: None,
            retries: 3,
            backoff_ms: 500,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPayloads {
    pub speakers: Vec<String>,
    pub evaluators: Vec<String>,
}

#[derive(Serialize)]
struct Options<'a> {
    options: &'a [String],
}

fn is_assigned(name: &str) -> bool {
    !name.is_empty() && name != TBA
}

pub fn is_evaluation(event: &str) -> bool {
    EVALUATION_MARKERS.iter().any(|m| event.contains(m))
}

impl FormPayloads {
    pub fn from_meeting(meeting: &ToastmastersMeeting) -> Self {
        let speakers = meeting
            .speakers
            .iter()
            .map(|s| s.name.clone())
            .filter(|name| is_assigned(name))
            .collect();
        let evaluators = meeting
            .agenda_items
            .iter()
            .filter(|t| is_evaluation(&t.event) && is_assigned(&t.presenter))
            .map(|t| t.presenter.clone())
            .collect();
        FormPayloads { speakers, evaluators }
    }
}

pub fn client(endpoints: &FormEndpoints) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(endpoints.timeout_secs))
        .build()?)
}

/// Post every option list to its form. Returns how many forms were updated.
pub async fn submit(
    client: &reqwest::Client,
    endpoints: &FormEndpoints,
    payloads: &FormPayloads,
) -> Result<usize> {
    let feedback = required(&endpoints.feedback_url, "feedback")?;
    let speaker = required(&endpoints.speaker_url, "speaker")?;
    let evaluator = required(&endpoints.evaluator_url, "evaluator")?;

    let no_topics = vec!["None".to_string()];
    let mut jobs: Vec<(&str, &str, &[String])> = vec![
        ("feedback", feedback, payloads.speakers.as_slice()),
        ("speaker", speaker, payloads.speakers.as_slice()),
        ("evaluator", evaluator, payloads.evaluators.as_slice()),
    ];
    if let Some(url) = endpoints.table_topics_url.as_deref() {
        jobs.push(("table topics", url, no_topics.as_slice()));
    }

    for (form, url, options) in &jobs {
        post_with_retry(client, url, options, endpoints).await?;
        info!("{} form updated with {} options", form, options.len());
    }
    Ok(jobs.len())
}

fn required<'a>(url: &'a Option<String>, form: &'static str) -> Result<&'a str> {
    url.as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or(Error::EndpointNotConfigured(form))
}

async fn post_with_retry(
    client: &reqwest::Client,
    url: &str,
    options: &[String],
    endpoints: &FormEndpoints,
) -> Result<()> {
    let mut attempt = 0;
    loop {
        let response = client.post(url).json(&Options { options }).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let retryable = status.as_u16() == 429 || status.is_server_error();
        if !retryable || attempt >= endpoints.retries {
            return Err(Error::Endpoint {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let backoff = backoff_for(endpoints.backoff_ms, attempt);
        warn!(
            "{} answered {} (attempt {}/{}), backing off {:.1}s",
            url,
            status,
            attempt + 1,
            endpoints.retries,
            backoff.as_secs_f64()
        );
        tokio::time::sleep(backoff).await;
        attempt += 1;
    }
}

/// `base_ms * 2^attempt`, saturating and capped at `MAX_BACKOFF`.
fn backoff_for(base_ms: u64, attempt: u32) -> Duration {
    let ms = base_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(ms).min(MAX_BACKOFF)
}
