//! Google Groups adapter over the Admin SDK Directory API

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::config::RemoteConfig;
use crate::domain::entities::MembershipSet;
use crate::domain::ports::{AddReport, AddStatus, RemoteError, RemoteGroup};
use crate::domain::value_objects::EmailAddress;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembersPage {
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Member {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewMember<'a> {
    email: &'a str,
    role: &'a str,
}

/// Directory API client bound to one access token
#[derive(Debug)]
pub struct GoogleGroups {
    http: Client,
    base_url: String,
    token: String,
    member_role: String,
    page_size: u32,
}

impl GoogleGroups {
    pub fn new(http: Client, config: &RemoteConfig, token: String) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            member_role: config.member_role.clone(),
            page_size: config.page_size.clamp(1, 200),
        }
    }

    /// Blocking HTTP client with the configured timeout
    pub fn http_client(config: &RemoteConfig) -> Result<Client, reqwest::Error> {
        Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("listsync/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    /// `{base}/groups/{list}/members[/{member}]`, each address as one
    /// percent-encoded path segment
    fn members_url(
        &self,
        list: &EmailAddress,
        member: Option<&EmailAddress>,
    ) -> Result<Url, RemoteError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| RemoteError::Unavailable(format!("invalid base URL: {}", e)))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RemoteError::Unavailable(format!("invalid base URL: {}", self.base_url))
            })?;
            segments
                .pop_if_empty()
                .extend(["groups", list.as_str(), "members"]);
            if let Some(member) = member {
                segments.push(member.as_str());
            }
        }
        Ok(url)
    }

    fn fetch_page(
        &self,
        list: &EmailAddress,
        page_token: Option<&str>,
    ) -> Result<MembersPage, RemoteError> {
        let mut request = self
            .http
            .get(self.members_url(list, None)?)
            .bearer_auth(&self.token)
            .query(&[("maxResults", self.page_size.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().map_err(transport_error)?;
        let response = check_status(list, response)?;
        response
            .json()
            .map_err(|e| RemoteError::Unavailable(format!("invalid members response: {}", e)))
    }

    fn add_one(&self, list: &EmailAddress, email: &EmailAddress) -> Result<AddStatus, RemoteError> {
        let body = NewMember {
            email: email.as_str(),
            role: &self.member_role,
        };
        let url = self.members_url(list, None)?;
        let response = match self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
        {
            Ok(response) => response,
            Err(e) => return Ok(AddStatus::Failed(e.to_string())),
        };

        let status = response.status();
        match status {
            s if s.is_success() => Ok(AddStatus::Added),
            StatusCode::CONFLICT => Ok(AddStatus::AlreadyMember),
            StatusCode::NOT_FOUND => Err(RemoteError::ListNotFound(list.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(status_error(list, status, &response.text().unwrap_or_default()))
            }
            _ => Ok(AddStatus::Failed(describe(
                status,
                &response.text().unwrap_or_default(),
            ))),
        }
    }

    fn remove_one(&self, list: &EmailAddress, email: &EmailAddress) -> Result<bool, RemoteError> {
        let url = self.members_url(list, Some(email))?;
        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::NOT_FOUND {
            // Member already gone
            return Ok(false);
        }
        Err(status_error(list, status, &response.text().unwrap_or_default()))
    }
}

impl RemoteGroup for GoogleGroups {
    fn list(&self, list: &EmailAddress) -> Result<MembershipSet, RemoteError> {
        let mut members = MembershipSet::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(list, page_token.as_deref())?;
            tracing::debug!(%list, page_members = page.members.len(), "fetched members page");
            members = members.union(&page_members(page.members));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(members)
    }

    fn add_members(
        &self,
        list: &EmailAddress,
        emails: &MembershipSet,
    ) -> Result<AddReport, RemoteError> {
        let mut report = AddReport::default();
        let mut pending = emails.iter();
        while let Some(email) = pending.next() {
            let status = match self.add_one(list, email) {
                Ok(status) => status,
                Err(e) if report.entries.is_empty() => return Err(e),
                Err(e) => {
                    // Addresses after the failure are not attempted
                    tracing::warn!(%list, error = %e, "stopping additions");
                    let reason = e.to_string();
                    report.record(email.clone(), AddStatus::Failed(reason.clone()));
                    for rest in pending.by_ref() {
                        report.record(rest.clone(), AddStatus::Failed(reason.clone()));
                    }
                    break;
                }
            };
            match &status {
                AddStatus::Added => tracing::info!(%list, %email, "added member"),
                AddStatus::AlreadyMember => tracing::debug!(%list, %email, "already a member"),
                AddStatus::Failed(reason) => {
                    tracing::warn!(%list, %email, reason = %reason, "failed to add member")
                }
            }
            report.record(email.clone(), status);
        }

        if report.has_failures() {
            return Err(RemoteError::PartialFailure(report));
        }
        Ok(report)
    }

    fn clear_members(&self, list: &EmailAddress) -> Result<usize, RemoteError> {
        let members = self.list(list)?;
        let mut removed = 0;
        for email in &members {
            match self.remove_one(list, email) {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) if removed == 0 => return Err(e),
                Err(e) => {
                    return Err(RemoteError::PartialClear {
                        removed,
                        reason: e.to_string(),
                    })
                }
            }
        }
        tracing::info!(%list, removed, "cleared list");
        Ok(removed)
    }
}

fn page_members(members: Vec<Member>) -> MembershipSet {
    members
        .into_iter()
        .filter_map(|m| m.email)
        .filter_map(|raw| match EmailAddress::parse(&raw) {
            Ok(email) => Some(email),
            Err(e) => {
                tracing::warn!(member = %raw, error = %e, "skipping unparsable member address");
                None
            }
        })
        .collect()
}

fn check_status(list: &EmailAddress, response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(status_error(list, status, &response.text().unwrap_or_default()))
}

fn status_error(list: &EmailAddress, status: StatusCode, body: &str) -> RemoteError {
    if status == StatusCode::NOT_FOUND {
        return RemoteError::ListNotFound(list.to_string());
    }
    RemoteError::Unavailable(describe(status, body))
}

fn describe(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());
    if message.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {}", status.as_u16(), message)
    }
}

fn transport_error(e: reqwest::Error) -> RemoteError {
    RemoteError::Unavailable(e.to_string())
}
