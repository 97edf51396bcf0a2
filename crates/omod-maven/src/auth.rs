//! Repository authentication using credentials from `omod.toml`.
//!
//! ```toml
//! [[repositories]]
//! name = "nexus"
//! url = "https://nexus.example.com/repository/maven-public"
//! username = "ci"
//! password = "secret"
//! ```
//!
//! A password without a username is sent as a bearer token.

use reqwest::RequestBuilder;

use crate::repository::MavenRepository;

/// Apply authentication to a request if the repository has credentials.
pub fn apply_auth(request: RequestBuilder, repo: &MavenRepository) -> RequestBuilder {
    match (&repo.username, &repo.password) {
        (Some(user), Some(pass)) => request.basic_auth(user, Some(pass)),
        (Some(user), None) => request.basic_auth(user, None::<&str>),
        (None, Some(token)) => request.bearer_auth(token),
        (None, None) => request,
    }
}
