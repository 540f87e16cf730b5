//! In-process stand-in for the GitHub REST API
//!
//! Serves canned team memberships, repositories, comments and pull request
//! data, and records every request plus every comment body posted.

use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{Value, json};
use tiny_http::{Header, Method, Request, Response, Server};

/// Canned API state
#[derive(Default, Clone)]
pub struct Fixture {
    /// `(team, user)` -> membership state
    pub memberships: HashMap<(String, String), String>,
    /// `owner/name` -> private flag
    pub repositories: HashMap<String, bool>,
    /// Existing `(author, body)` comments on the pull request
    pub comments: Vec<(String, String)>,
    /// Pull request author, for API-driven discovery
    pub pr_author: Option<String>,
    /// Changed `(path, status)` pairs, for API-driven discovery
    pub pr_files: Vec<(String, String)>,
    /// File contents at the head commit
    pub contents: HashMap<String, String>,
    /// Status returned for membership lookups, overriding the table
    pub membership_status: Option<u16>,
    /// Status returned when creating comments
    pub comment_status: Option<u16>,
}

impl Fixture {
    pub fn member(mut self, team: &str, user: &str, state: &str) -> Self {
        self.memberships
            .insert((team.to_string(), user.to_string()), state.to_string());
        self
    }

    pub fn repository(mut self, full_name: &str, private: bool) -> Self {
        self.repositories.insert(full_name.to_string(), private);
        self
    }

    pub fn comment(mut self, author: &str, body: &str) -> Self {
        self.comments.push((author.to_string(), body.to_string()));
        self
    }
}

/// A running stub server
pub struct StubGitHub {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
    posted: Arc<Mutex<Vec<String>>>,
}

impl StubGitHub {
    pub fn start(fixture: Fixture) -> Self {
        let server = Server::http("127.0.0.1:0").expect("bind stub server");
        let port = server.server_addr().to_ip().expect("tcp listener").port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let posted = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        let bodies = Arc::clone(&posted);
        thread::spawn(move || {
            for request in server.incoming_requests() {
                handle(request, &fixture, &seen, &bodies);
            }
        });

        Self {
            url: format!("http://127.0.0.1:{port}"),
            requests,
            posted,
        }
    }

    /// Comment bodies posted so far
    pub fn posted(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }

    /// `METHOD /path` for every request served so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn comments_url(&self) -> String {
        format!("{}/repos/acme/namespaces/issues/7/comments", self.url)
    }
}

fn handle(
    mut request: Request,
    fixture: &Fixture,
    requests: &Mutex<Vec<String>>,
    posted: &Mutex<Vec<String>>,
) {
    let url = request.url().to_string();
    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
    let first_page = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .is_none_or(|page| page == "1");
    let is_post = *request.method() == Method::Post;
    requests
        .lock()
        .unwrap()
        .push(format!("{} {path}", request.method()));

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    let (status, body) = match segments.as_slice() {
        ["orgs", _, "teams", team, "memberships", user] => match fixture.membership_status {
            Some(status) => (status, json!({ "message": "Server Error" })),
            None => fixture
                .memberships
                .get(&((*team).to_string(), (*user).to_string()))
                .map_or_else(not_found, |state| (200, json!({ "state": state, "role": "member" }))),
        },
        ["repos", owner, name] => {
            let full_name = format!("{owner}/{name}");
            fixture.repositories.get(&full_name).map_or_else(not_found, |private| {
                (200, json!({ "full_name": full_name, "private": private }))
            })
        },
        ["repos", _, _, "issues", _, "comments"] if is_post => {
            let mut raw = String::new();
            request.as_reader().read_to_string(&mut raw).unwrap();
            let payload: Value = serde_json::from_str(&raw).unwrap();
            posted
                .lock()
                .unwrap()
                .push(payload["body"].as_str().unwrap_or_default().to_string());
            (fixture.comment_status.unwrap_or(201), json!({ "id": 1 }))
        },
        ["repos", _, _, "issues", _, "comments"] => {
            let comments: Vec<Value> = if first_page {
                fixture
                    .comments
                    .iter()
                    .map(|(author, body)| json!({ "user": { "login": author }, "body": body }))
                    .collect()
            } else {
                Vec::new()
            };
            (200, Value::Array(comments))
        },
        ["repos", _, _, "pulls", _] => match &fixture.pr_author {
            Some(author) => (200, json!({ "user": { "login": author }, "head": { "sha": "abc123" } })),
            None => not_found(),
        },
        ["repos", _, _, "pulls", _, "files"] => {
            let files: Vec<Value> = if first_page {
                fixture
                    .pr_files
                    .iter()
                    .map(|(filename, status)| json!({ "filename": filename, "status": status }))
                    .collect()
            } else {
                Vec::new()
            };
            (200, Value::Array(files))
        },
        ["repos", _, _, "contents", rest @ ..] => {
            return match fixture.contents.get(&rest.join("/")) {
                Some(content) => {
                    let _ = request.respond(Response::from_string(content.clone()));
                },
                None => {
                    let _ = request.respond(json_response(404, &json!({ "message": "Not Found" })));
                },
            };
        },
        _ => not_found(),
    };

    let _ = request.respond(json_response(status, &body));
}

fn not_found() -> (u16, Value) {
    (404, json!({ "message": "Not Found" }))
}

fn json_response(status: u16, body: &Value) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body.to_string())
        .with_status_code(status)
        .with_header(Header::from_bytes("Content-Type", "application/json").unwrap())
}
