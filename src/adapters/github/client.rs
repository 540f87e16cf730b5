//! Blocking GitHub REST client

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use crate::core::models::{
    IssueComment, PullRequestFile, PullRequestInfo, RepositoryInfo, TeamMembership,
};
use crate::core::ports::{ApiError, HostingApi};

use super::wire::{
    CommentRecord, FileRecord, MembershipRecord, NewComment, PullRecord, RepositoryRecord,
};

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Items requested per page on list endpoints (the API maximum)
pub const PAGE_SIZE: usize = 100;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";
const API_VERSION: &str = "2022-11-28";

/// [`HostingApi`] backed by the GitHub REST API
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for the API rooted at `api_url`
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ApiError> {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .user_agent(concat!("nsguard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport {
                url: api_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            api_url,
            token: token.into(),
        })
    }

    /// API root this client talks to
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Comments endpoint for pull request `number` of `repo`
    #[must_use]
    pub fn comments_url(&self, repo: &str, number: u64) -> String {
        self.url(&format!("/repos/{repo}/issues/{number}/comments"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    fn send(&self, request: RequestBuilder, url: &str, accept: &str) -> Result<Response, ApiError> {
        let response = request
            .bearer_auth(&self.token)
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .map_err(|e| ApiError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        log::debug!("{} {url}", response.status());
        Ok(response)
    }

    /// GET a JSON document; `Ok(None)` on 404
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, ApiError> {
        log::debug!("GET {url}");
        let response = self.send(self.http.get(url), url, JSON_MEDIA_TYPE)?;

        match response.status() {
            StatusCode::OK => response.json::<T>().map(Some).map_err(|e| ApiError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(unexpected(status, url)),
        }
    }

    /// GET a JSON document that must exist
    fn get_required<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.get_json(url)?
            .ok_or_else(|| unexpected(StatusCode::NOT_FOUND, url))
    }

    /// GET every page of a list endpoint
    fn get_paginated<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ApiError> {
        let separator = if url.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let page_url = format!("{url}{separator}per_page={PAGE_SIZE}&page={page}");
            let batch: Vec<T> = self.get_required(&page_url)?;
            let last = batch.len() < PAGE_SIZE;
            items.extend(batch);
            if last {
                return Ok(items);
            }
            page += 1;
        }
    }
}

fn unexpected(status: StatusCode, url: &str) -> ApiError {
    ApiError::Status {
        status: status.as_u16(),
        url: url.to_string(),
    }
}

impl HostingApi for GitHubClient {
    fn team_membership(
        &self,
        org: &str,
        team: &str,
        user: &str,
    ) -> Result<TeamMembership, ApiError> {
        let url = self.url(&format!("/orgs/{org}/teams/{team}/memberships/{user}"));
        let record: Option<MembershipRecord> = self.get_json(&url)?;
        Ok(record.map_or(TeamMembership::NotMember, TeamMembership::from))
    }

    fn repository(&self, owner: &str, name: &str) -> Result<Option<RepositoryInfo>, ApiError> {
        let url = self.url(&format!("/repos/{owner}/{name}"));
        let record: Option<RepositoryRecord> = self.get_json(&url)?;
        Ok(record.map(RepositoryInfo::from))
    }

    fn list_comments(&self, comments_url: &str) -> Result<Vec<IssueComment>, ApiError> {
        let records: Vec<CommentRecord> = self.get_paginated(comments_url)?;
        Ok(records.into_iter().map(IssueComment::from).collect())
    }

    fn post_comment(&self, comments_url: &str, body: &str) -> Result<(), ApiError> {
        log::debug!("POST {comments_url}");
        let request = self.http.post(comments_url).json(&NewComment { body });
        let response = self.send(request, comments_url, JSON_MEDIA_TYPE)?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            status => Err(unexpected(status, comments_url)),
        }
    }

    fn pull_request(&self, repo: &str, number: u64) -> Result<PullRequestInfo, ApiError> {
        let url = self.url(&format!("/repos/{repo}/pulls/{number}"));
        let record: PullRecord = self.get_required(&url)?;
        Ok(record.into())
    }

    fn pull_request_files(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<Vec<PullRequestFile>, ApiError> {
        let url = self.url(&format!("/repos/{repo}/pulls/{number}/files"));
        let records: Vec<FileRecord> = self.get_paginated(&url)?;
        Ok(records.into_iter().map(PullRequestFile::from).collect())
    }

    fn file_contents(&self, repo: &str, path: &str, git_ref: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&format!("/repos/{repo}/contents/{path}?ref={git_ref}"));
        log::debug!("GET {url}");
        let response = self.send(self.http.get(&url), &url, RAW_MEDIA_TYPE)?;

        match response.status() {
            StatusCode::OK => response
                .bytes()
                .map(|b| b.to_vec())
                .map_err(|e| ApiError::Decode {
                    url: url.clone(),
                    reason: e.to_string(),
                }),
            status => Err(unexpected(status, &url)),
        }
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
