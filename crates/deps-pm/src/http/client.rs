//! Blocking HTTP client used by the resolver and the fetcher.
//!
//! A thin wrapper around `reqwest::blocking` with:
//! - a fixed User-Agent and connect timeout
//! - per-request deadlines, so a single wall-clock budget can span several requests
//! - streaming downloads through a fixed-size buffer with a progress callback
//!
//! Requests are never retried; every failure goes straight back to the caller.
//!
//! ```no_run
//! use deps_pm::http::{HttpClient, HttpClientConfig};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::with_config(
//!     HttpClientConfig::new().with_timeout(Duration::from_secs(10)),
//! )?;
//! let body = client.get_text("https://search.maven.org/solrsearch/select?q=okhttp&rows=1&wt=json", None)?;
//! println!("{}", body);
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::util::Deadline;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const COPY_BUFFER_SIZE: usize = 8 * 1024;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization error: {0}")]
    JsonParse(String),

    #[error("Deadline exceeded after {}ms", .elapsed.as_millis())]
    DeadlineExceeded { elapsed: Duration, budget: Duration },
}

pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent,
        })
    }

    /// Perform a GET request, failing on any non-success status.
    ///
    /// `deadline` bounds the request by the time left in a shared budget.
    pub fn get(&self, url: &str, deadline: Option<&Deadline>) -> Result<Response, HttpError> {
        let mut request = self.client.get(url);

        if let Some(deadline) = deadline {
            check_deadline(deadline)?;
            request = request.timeout(deadline.remaining());
        }

        let start = Instant::now();
        log::debug!("HTTP GET {}", url);

        let response = request
            .send()
            .map_err(|e| map_request_error(e, deadline))?;

        let status = response.status();
        log::debug!("HTTP {} {} in {:?}", status.as_u16(), url, start.elapsed());

        if !status.is_success() {
            return Err(HttpError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    /// GET and return the body as text
    pub fn get_text(&self, url: &str, deadline: Option<&Deadline>) -> Result<String, HttpError> {
        let response = self.get(url, deadline)?;
        response.text().map_err(|e| map_request_error(e, deadline))
    }

    /// GET JSON and deserialize
    pub fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        deadline: Option<&Deadline>,
    ) -> Result<T, HttpError> {
        let text = self.get_text(url, deadline)?;
        serde_json::from_str(&text).map_err(|e| HttpError::JsonParse(e.to_string()))
    }

    /// Stream a response body into `dest`, returning the number of bytes written.
    ///
    /// The deadline is checked after every buffered chunk, so an expired budget
    /// stops the transfer instead of being noticed only once it completes.
    /// `dest` is only created once the server has answered with a success
    /// status; if the transfer then fails, the partial file is removed again.
    pub fn download<F>(
        &self,
        url: &str,
        dest: &Path,
        deadline: Option<&Deadline>,
        progress: Option<F>,
    ) -> Result<u64, HttpError>
    where
        F: Fn(u64, u64),
    {
        let response = self.get(url, deadline)?;

        let file = File::create(dest)?;
        match write_body(response, file, deadline, progress.as_ref()) {
            Ok(downloaded) => {
                log::debug!("Wrote {} bytes to {}", downloaded, dest.display());
                Ok(downloaded)
            }
            Err(e) => {
                if let Err(remove_err) = std::fs::remove_file(dest) {
                    log::warn!("Failed to remove partial download {}: {}", dest.display(), remove_err);
                }
                Err(e)
            }
        }
    }

    /// Get the configured user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn write_body<F>(
    mut response: Response,
    file: File,
    deadline: Option<&Deadline>,
    progress: Option<&F>,
) -> Result<u64, HttpError>
where
    F: Fn(u64, u64),
{
    // Get total size from Content-Length header
    let total_size = response.content_length().unwrap_or(0);

    let mut file = BufWriter::new(file);
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut downloaded: u64 = 0;

    loop {
        let read = match response.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(map_read_error(e, deadline)),
        };

        file.write_all(&buffer[..read])?;
        downloaded += read as u64;

        if let Some(callback) = progress {
            callback(downloaded, total_size);
        }

        if let Some(deadline) = deadline {
            check_deadline(deadline)?;
        }
    }

    file.flush()?;
    Ok(downloaded)
}

fn check_deadline(deadline: &Deadline) -> Result<(), HttpError> {
    if deadline.is_expired() {
        return Err(HttpError::DeadlineExceeded {
            elapsed: deadline.elapsed(),
            budget: deadline.budget(),
        });
    }
    Ok(())
}

fn map_request_error(error: reqwest::Error, deadline: Option<&Deadline>) -> HttpError {
    match deadline {
        Some(deadline) if error.is_timeout() => HttpError::DeadlineExceeded {
            elapsed: deadline.elapsed(),
            budget: deadline.budget(),
        },
        _ => HttpError::Request(error),
    }
}

// Body reads surface reqwest timeouts as io::Error.
fn map_read_error(error: std::io::Error, deadline: Option<&Deadline>) -> HttpError {
    match deadline {
        Some(deadline) if error.kind() == std::io::ErrorKind::TimedOut || deadline.is_expired() => {
            HttpError::DeadlineExceeded {
                elapsed: deadline.elapsed(),
                budget: deadline.budget(),
            }
        }
        _ => HttpError::Io(error),
    }
}

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}
