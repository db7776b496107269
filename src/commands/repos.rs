use crate::display;
use crate::error::{FetchError, Result};
use crate::github::OrgSource;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    Found(Vec<String>),
    Empty,
    Failed(FetchError),
}

impl From<std::result::Result<Vec<String>, FetchError>> for RepoOutcome {
    fn from(result: std::result::Result<Vec<String>, FetchError>) -> Self {
        match result {
            Ok(names) if names.is_empty() => RepoOutcome::Empty,
            Ok(names) => RepoOutcome::Found(names),
            Err(e) => RepoOutcome::Failed(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgSection {
    pub org: String,
    pub outcome: RepoOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// A selector named exactly one organization.
    Single(OrgSection),
    /// One section per visible organization, in upstream order.
    All(Vec<OrgSection>),
    /// The organization listing failed or came back empty.
    NoOrganizations(Option<FetchError>),
}

impl Report {
    pub fn failures(&self) -> Vec<&FetchError> {
        match self {
            Report::Single(section) => section_failure(section).into_iter().collect(),
            Report::All(sections) => sections.iter().filter_map(section_failure).collect(),
            Report::NoOrganizations(err) => err.iter().collect(),
        }
    }

    /// False only when every request made during the run failed.
    pub fn any_fetch_succeeded(&self) -> bool {
        match self {
            Report::Single(section) => !matches!(section.outcome, RepoOutcome::Failed(_)),
            Report::All(_) => true,
            Report::NoOrganizations(err) => err.is_none(),
        }
    }
}

fn section_failure(section: &OrgSection) -> Option<&FetchError> {
    match &section.outcome {
        RepoOutcome::Failed(e) => Some(e),
        _ => None,
    }
}

/// Fetch one organization's repositories when a selector is given, otherwise
/// every visible organization's, one request at a time.
pub async fn collect<S: OrgSource + ?Sized>(source: &S, selector: Option<&str>) -> Report {
    if let Some(org) = selector {
        debug!(org, "listing repositories for selected organization");
        let outcome = source.list_repositories(org).await.into();
        return Report::Single(OrgSection {
            org: org.to_string(),
            outcome,
        });
    }

    let orgs = match source.list_organizations().await {
        Ok(orgs) if orgs.is_empty() => return Report::NoOrganizations(None),
        Ok(orgs) => orgs,
        Err(e) => return Report::NoOrganizations(Some(e)),
    };
    debug!(count = orgs.len(), "listing repositories for all organizations");

    let mut sections = Vec::with_capacity(orgs.len());
    for org in orgs {
        let outcome = source.list_repositories(&org).await.into();
        sections.push(OrgSection { org, outcome });
    }
    Report::All(sections)
}

pub fn render_text(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();
    match report {
        Report::Single(section) => match &section.outcome {
            RepoOutcome::Found(names) => {
                lines.push(header(&section.org));
                lines.extend(names.iter().cloned());
            }
            RepoOutcome::Empty | RepoOutcome::Failed(_) => lines.push(not_found(&section.org)),
        },
        Report::All(sections) => {
            lines.push("Fetching repositories for all organizations...".to_string());
            for section in sections {
                lines.push(String::new());
                lines.push(header(&section.org));
                match &section.outcome {
                    RepoOutcome::Found(names) => lines.extend(names.iter().cloned()),
                    RepoOutcome::Empty | RepoOutcome::Failed(_) => {
                        lines.push(not_found(&section.org))
                    }
                }
            }
        }
        Report::NoOrganizations(_) => lines.push("No organizations found.".to_string()),
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn header(org: &str) -> String {
    format!("Repositories for organization '{org}':")
}

fn not_found(org: &str) -> String {
    format!("No repositories found for organization '{org}'.")
}

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub organizations: Vec<JsonSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonSection {
    pub organization: String,
    pub repositories: Vec<String>,
    pub error: Option<String>,
}

impl From<&OrgSection> for JsonSection {
    fn from(section: &OrgSection) -> Self {
        let (repositories, error) = match &section.outcome {
            RepoOutcome::Found(names) => (names.clone(), None),
            RepoOutcome::Empty => (Vec::new(), None),
            RepoOutcome::Failed(e) => (Vec::new(), Some(e.to_string())),
        };
        Self {
            organization: section.org.clone(),
            repositories,
            error,
        }
    }
}

impl From<&Report> for JsonReport {
    fn from(report: &Report) -> Self {
        match report {
            Report::Single(section) => JsonReport {
                organizations: vec![section.into()],
                error: None,
            },
            Report::All(sections) => JsonReport {
                organizations: sections.iter().map(JsonSection::from).collect(),
                error: None,
            },
            Report::NoOrganizations(err) => JsonReport {
                organizations: Vec::new(),
                error: err.as_ref().map(|e| e.to_string()),
            },
        }
    }
}

/// Build the report, print it, and tell the caller whether anything succeeded.
pub async fn run<S: OrgSource + ?Sized>(
    source: &S,
    selector: Option<&str>,
    json: bool,
) -> Result<bool> {
    let report = collect(source, selector).await;

    for failure in report.failures() {
        display::warn(&failure.to_string());
    }

    display::output(json, &JsonReport::from(&report), |_| {
        print!("{}", render_text(&report));
    })?;

    Ok(report.any_fetch_succeeded())
}
