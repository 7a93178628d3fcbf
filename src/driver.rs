//! Interactive comparison session.
//!
//! The session walks a fixed sequence of states: prompt for an API key
//! (validated by the source-catalog probe), prompt for two distinct
//! sources, fetch one baseline total per source, then loop on search terms
//! forever. Baselines are fetched exactly once and reused for every term;
//! a failed term lookup skips one iteration, a failed baseline ends the
//! program with a non-zero exit.
//!
//! Invalid input never recurses back into the prompt; every re-prompt is an
//! explicit loop so a hostile input stream cannot grow the call stack.
//!
//! End of input (EOF on stdin) ends the session cleanly at any prompt.

use crate::api::{FetchError, NewsApi};
use crate::catalog::SourceIndex;
use crate::request::SearchRequest;
use crate::utils::{is_valid_api_key, normalize, strip_enclosing_quotes};
use futures::future;
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

/// Run one interactive session to completion.
///
/// Returns `Ok(())` on clean termination (end of input), or an error for
/// the fatal paths: a failed baseline fetch or defective URL construction.
pub async fn run(
    api: &impl NewsApi,
    input: &mut (impl AsyncBufRead + Unpin),
) -> Result<(), Box<dyn Error>> {
    println!(
        "Welcome to Undercoverage!\nTo run Undercoverage, you must have a valid API key from https://newsapi.org/register."
    );

    let Some((api_key, index)) = prompt_for_api_key(api, input).await? else {
        return Ok(());
    };
    println!(
        "That key is valid! Using Undercoverage, you can compare the amount of coverage dedicated to different subjects by two different media outlets.\n"
    );

    let Some(first) = prompt_for_source(&index, input, 0, &[]).await? else {
        return Ok(());
    };
    let Some(second) = prompt_for_source(&index, input, 1, &[first.clone()]).await? else {
        return Ok(());
    };

    let first_name = index.display_name(&first).unwrap_or(&first).to_string();
    let second_name = index.display_name(&second).unwrap_or(&second).to_string();
    println!(
        "We will be comparing coverage by {} and {}. Given a term you input, we will tell you what percentage of both outlets' articles include that term.",
        first_name, second_name
    );

    // Baselines are fetched once per session and never refetched; every
    // later percentage is computed against these two totals.
    let first_total = fetch_baseline(api, &api_key, &first).await?;
    let second_total = fetch_baseline(api, &api_key, &second).await?;
    info!(first_total, second_total, "Baseline totals cached");

    loop {
        let Some(term) = prompt_for_term(input).await? else {
            return Ok(());
        };
        println!("Reading through news articles...");

        // The two lookups are independent; running them concurrently is a
        // pure optimization and each side fails or succeeds on its own.
        let (first_result, second_result) = future::join(
            api.total_results(&api_key, &SearchRequest::term_search(&term, &first)),
            api.total_results(&api_key, &SearchRequest::term_search(&term, &second)),
        )
        .await;

        match (first_result, second_result) {
            (Ok(first_hits), Ok(second_hits)) => {
                println!(
                    "{:.3}% of {} articles and {:.3}% of {} articles in the past month covered \"{}\".",
                    coverage_percent(first_hits, first_total),
                    first_name,
                    coverage_percent(second_hits, second_total),
                    second_name,
                    term
                );
            }
            (first_result, second_result) => {
                // Soft failure: report, skip this iteration, keep the session.
                let mut fatal = false;
                for error in [first_result.err(), second_result.err()]
                    .into_iter()
                    .flatten()
                {
                    report_fetch_error(&error);
                    fatal |= matches!(error, FetchError::Url(_));
                }
                if fatal {
                    return Err("request construction failed".into());
                }
            }
        }
    }
}

/// Baseline-normalized share of a source's articles matching a term.
pub fn coverage_percent(hits: u64, baseline: u64) -> f64 {
    hits as f64 / baseline as f64 * 100.0
}

/// Prompt until a well-formed, API-accepted key is entered. Returns the key
/// together with the source catalog the probe request fetched, or `None` at
/// end of input.
async fn prompt_for_api_key(
    api: &impl NewsApi,
    input: &mut (impl AsyncBufRead + Unpin),
) -> Result<Option<(String, SourceIndex)>, Box<dyn Error>> {
    loop {
        let Some(candidate) = prompt(input, "Please provide your API key:\n> ").await? else {
            return Ok(None);
        };

        if !is_valid_api_key(&candidate) {
            println!("That API key has invalid characters. Try again with a valid key.");
            continue;
        }

        match api.list_sources(&candidate).await {
            Ok(sources) => {
                let index = SourceIndex::from_sources(&sources);
                if index.is_empty() {
                    warn!("source catalog came back empty; no source will resolve");
                }
                info!(sources = index.len(), "API key accepted, catalog cached");
                return Ok(Some((candidate, index)));
            }
            Err(FetchError::Api(error)) => {
                println!(
                    "{} Try again with a different key.",
                    key_error_message(&error.code)
                );
            }
            Err(FetchError::Url(error)) => return Err(error.into()),
            Err(error) => {
                warn!(error = %error, "API key probe failed");
                println!("Error connecting to newsapi.org. Check your connection and try again.");
            }
        }
    }
}

/// User-facing message for an API key rejection code.
fn key_error_message(code: &str) -> String {
    match code {
        "apiKeyDisabled" => "That API key has been disabled.".to_string(),
        "apiKeyExhausted" => "That API key has been exhausted and is no longer valid.".to_string(),
        "apiKeyInvalid" => "That API key is invalid.".to_string(),
        "rateLimited" => {
            "That API key has been rate limited (it may be valid again soon).".to_string()
        }
        other => format!(
            "API key verification failed due to an unhandled reason ({}). Contact the developer if this problem persists.",
            other
        ),
    }
}

/// Prompt until the user names a catalog source that has not already been
/// chosen, by display name or raw id, case-insensitively. Duplicates are
/// rejected here, before any request is issued for the selection.
async fn prompt_for_source(
    index: &SourceIndex,
    input: &mut (impl AsyncBufRead + Unpin),
    position: usize,
    taken: &[String],
) -> Result<Option<String>, Box<dyn Error>> {
    let ordinal = if position == 0 { "first" } else { "second" };
    let text = format!(
        "Please enter the {} news source you want to analyze. You can either use the source's name or id on newsapi.org.\n> ",
        ordinal
    );
    loop {
        let Some(line) = prompt(input, &text).await? else {
            return Ok(None);
        };
        let wanted = normalize(&line);
        match index.resolve(&wanted) {
            Some(id) if taken.iter().any(|t| t == id) => {
                println!(
                    "You have already entered {}. Try again with a different source.",
                    index.display_name(id).unwrap_or(id)
                );
            }
            Some(id) => return Ok(Some(id.to_string())),
            None => {
                println!(
                    "Source not recognized. The spelling must be completely correct, look up your source on newsapi.org if you are unsure."
                );
            }
        }
    }
}

/// Prompt for a search term; one pair of enclosing double quotes is
/// stripped, anything else (empty input included) is sent verbatim.
async fn prompt_for_term(
    input: &mut (impl AsyncBufRead + Unpin),
) -> Result<Option<String>, Box<dyn Error>> {
    let line = prompt(input, "Look up a term:\n> ").await?;
    Ok(line.map(|line| strip_enclosing_quotes(&line).to_string()))
}

/// Fetch the no-term article total for one source. Failures here are fatal:
/// without a baseline no percentage can ever be computed.
async fn fetch_baseline(
    api: &impl NewsApi,
    api_key: &str,
    source_id: &str,
) -> Result<u64, Box<dyn Error>> {
    match api
        .total_results(api_key, &SearchRequest::for_source(source_id))
        .await
    {
        Ok(total) => Ok(total),
        Err(error) => {
            report_fetch_error(&error);
            Err(format!("could not fetch the baseline article total for {}", source_id).into())
        }
    }
}

/// Print the user-facing message for a failed article count.
fn report_fetch_error(error: &FetchError) {
    match error {
        FetchError::Api(api_error) => {
            eprintln!(
                "Error fetching data: \"{}\"\nTry again, and contact the developer if this problem persists.",
                api_error.message
            );
        }
        FetchError::Transport(_) | FetchError::Decode(_) => {
            eprintln!(
                "Error fetching data from newsapi.org. Check your internet connection and contact the developer if this problem persists."
            );
        }
        FetchError::Url(_) => {
            eprintln!("Error building request url. Contact the developer if this problem persists.");
        }
    }
}

/// Write `text`, flush, and read one trimmed line. `Ok(None)` at end of
/// input; an unreadable stdin is treated the same way.
async fn prompt(
    input: &mut (impl AsyncBufRead + Unpin),
    text: &str,
) -> Result<Option<String>, Box<dyn Error>> {
    print!("{}", text);
    std::io::stdout().flush()?;

    let mut line = String::new();
    match input.read_line(&mut line).await {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
        Err(error) => {
            warn!(error = %error, "failed reading from input; ending session");
            Ok(None)
        }
    }
}
