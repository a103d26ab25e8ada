//! `search` command: validates locally, posts to the server, renders results.

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use leadscout_core::{ErrorEnvelope, RawSearchRequest, SearchRequest, SearchResponse, ValidationError};
use serde_json::Value;

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Business category or keywords, e.g. "barber"
    #[arg(long)]
    pub query: String,

    /// Free-text area to search around, e.g. "Austin, TX"
    #[arg(long)]
    pub location: String,

    /// Search radius in metres (500 to 50000, default 5000)
    #[arg(long)]
    pub radius: Option<i64>,

    /// Maximum businesses to return (1 to 8, default 5)
    #[arg(long)]
    pub max_results: Option<i64>,

    /// Optional style hint for generated pitches
    #[arg(long)]
    pub vibe: Option<String>,

    /// Optional tone hint for generated pitches
    #[arg(long)]
    pub tone: Option<String>,

    /// Base URL of the leadscout server
    #[arg(long, env = "LEADSCOUT_SERVER_URL", default_value = "http://localhost:3000")]
    pub server: String,

    /// Print the raw JSON response instead of a listing
    #[arg(long)]
    pub json: bool,
}

/// Runs the same validation the server applies, so bad input never leaves
/// the machine.
pub(crate) fn build_request(args: &SearchArgs) -> Result<SearchRequest, ValidationError> {
    RawSearchRequest {
        query: Some(Value::from(args.query.clone())),
        location: Some(Value::from(args.location.clone())),
        radius: args.radius.map(Value::from),
        max_results: args.max_results.map(Value::from),
        vibe: args.vibe.clone().map(Value::from),
        tone: args.tone.clone().map(Value::from),
    }
    .validate()
}

pub(crate) fn search_url(server: &str) -> String {
    format!("{}/api/v1/search", server.trim_end_matches('/'))
}

/// Posts the request and returns the raw JSON body of a successful response.
///
/// # Errors
///
/// Returns an error on transport failure, or with the server's error
/// message (and field details) when it answers with an error envelope.
pub(crate) async fn send_search(
    client: &reqwest::Client,
    server: &str,
    request: &SearchRequest,
) -> anyhow::Result<Value> {
    let url = search_url(server);
    tracing::debug!(%url, "sending search request");

    let response = client
        .post(&url)
        .json(request)
        .send()
        .await
        .with_context(|| format!("failed to reach leadscout server at {server}"))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .context("failed to read server response")?;

    if !status.is_success() {
        return match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => Err(anyhow::anyhow!(render_error(&envelope))),
            Err(_) => Err(anyhow::anyhow!("server returned HTTP {status}")),
        };
    }

    serde_json::from_str(&body).context("server response is not valid JSON")
}

pub(crate) async fn run_search(args: SearchArgs) -> anyhow::Result<()> {
    let request = build_request(&args)
        .map_err(|e| anyhow::anyhow!("invalid search:\n{}", render_field_errors(&e)))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    let body = send_search(&client, &args.server, &request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let response: SearchResponse =
        serde_json::from_value(body).context("unexpected response shape from server")?;
    print!("{}", render_response(&response));
    Ok(())
}

fn render_field_errors(error: &ValidationError) -> String {
    let mut out = String::new();
    for (field, messages) in error.0.iter() {
        for message in messages {
            let _ = writeln!(out, "  {field}: {message}");
        }
    }
    out
}

pub(crate) fn render_error(envelope: &ErrorEnvelope) -> String {
    let mut out = envelope.error.clone();
    if let Some(details) = &envelope.details {
        for (field, messages) in details.iter() {
            for message in messages {
                let _ = write!(out, "\n  {field}: {message}");
            }
        }
    }
    out
}

pub(crate) fn render_response(response: &SearchResponse) -> String {
    let meta = &response.metadata;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} result(s) without a website for \"{}\" near {} ({} found, radius {} m)",
        meta.total_without_website, meta.query, meta.location, meta.total_found, meta.radius
    );
    if let Some(note) = &meta.note {
        let _ = writeln!(out, "note: {note}");
    }

    for (index, business) in response.businesses.iter().enumerate() {
        let details = &business.details;
        let _ = writeln!(out, "\n{}. {}", index + 1, details.name);
        if let Some(address) = &details.address {
            let _ = writeln!(out, "   address: {address}");
        }
        if let Some(phone) = details.phone.as_ref().or(details.international_phone.as_ref()) {
            let _ = writeln!(out, "   phone:   {phone}");
        }
        if let Some(rating) = details.rating {
            let reviews = details.user_ratings_total.unwrap_or(0);
            let _ = writeln!(out, "   rating:  {rating:.1} ({reviews} reviews)");
        }
        let _ = writeln!(out, "   maps:    {}", business.google_maps_url);
        if let Some(pitch) = &business.pitch {
            if !pitch.vibe_summary.is_empty() {
                let _ = writeln!(out, "   vibe:    {}", pitch.vibe_summary);
            }
            if !pitch.angle.is_empty() {
                let _ = writeln!(out, "   angle:   {}", pitch.angle);
            }
            let _ = writeln!(out, "   pitch:   {}", pitch.personalized_message);
        }
    }
    out
}
