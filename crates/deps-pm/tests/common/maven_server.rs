//! Minimal stand-in for the Maven Central search API and repository.
//!
//! `GET /select?...` answers with the configured search body; every other path
//! is looked up in the artifact table and answered with its bytes or 404.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tiny_http::{Header, Response, Server};

#[derive(Default)]
struct State {
    search_body: String,
    artifacts: HashMap<String, Vec<u8>>,
    artifact_delay: Option<Duration>,
    requests: Vec<String>,
}

pub struct MavenServer {
    server: Arc<Server>,
    state: Arc<Mutex<State>>,
    base: String,
}

impl MavenServer {
    pub fn start() -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind"));
        let port = server.server_addr().to_ip().expect("ip listener").port();
        let state = Arc::new(Mutex::new(State::default()));

        {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    let url = request.url().to_string();
                    let (body, delay) = {
                        let mut state = state.lock().unwrap();
                        state.requests.push(url.clone());
                        if url.starts_with("/select") {
                            (Some(state.search_body.clone().into_bytes()), None)
                        } else {
                            (state.artifacts.get(&url).cloned(), state.artifact_delay)
                        }
                    };

                    if let Some(delay) = delay {
                        thread::sleep(delay);
                    }

                    let _ = match body {
                        Some(bytes) => {
                            let content_type = if url.starts_with("/select") {
                                "application/json"
                            } else {
                                "application/octet-stream"
                            };
                            let header = Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes())
                                .unwrap();
                            request.respond(Response::from_data(bytes).with_header(header))
                        }
                        None => request.respond(Response::from_string("not found").with_status_code(404)),
                    };
                }
            });
        }

        Self {
            server,
            state,
            base: format!("http://127.0.0.1:{}", port),
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}/select", self.base)
    }

    pub fn repository_url(&self) -> String {
        format!("{}/maven2", self.base)
    }

    pub fn set_search_body(&self, body: impl Into<String>) {
        self.state.lock().unwrap().search_body = body.into();
    }

    /// Answer the search with a single document.
    pub fn set_search_hit(&self, group: &str, artifact: &str, version: &str) {
        self.set_search_body(format!(
            r#"{{"responseHeader":{{"status":0}},"response":{{"numFound":1,"start":0,"docs":[{{"id":"{g}:{a}","g":"{g}","a":"{a}","latestVersion":"{v}","p":"aar"}}]}}}}"#,
            g = group,
            a = artifact,
            v = version
        ));
    }

    pub fn set_search_empty(&self) {
        self.set_search_body(r#"{"response":{"numFound":0,"start":0,"docs":[]}}"#);
    }

    /// Serve `bytes` at the repository path of the coordinate's `.aar`.
    pub fn add_aar(&self, group: &str, artifact: &str, version: &str, bytes: Vec<u8>) {
        let path = format!(
            "/maven2/{}/{}/{}/{}-{}.aar",
            group.replace('.', "/"),
            artifact,
            version,
            artifact,
            version
        );
        self.state.lock().unwrap().artifacts.insert(path, bytes);
    }

    pub fn set_artifact_delay(&self, delay: Duration) {
        self.state.lock().unwrap().artifact_delay = Some(delay);
    }

    /// Paths (with query) requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl Drop for MavenServer {
    fn drop(&mut self) {
        self.server.unblock();
    }
}
