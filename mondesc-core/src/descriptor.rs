use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::{MonitoringError, Result};
use crate::pb;

/// Opaque identifier of the project that owns the descriptors.
///
/// Always non-empty; construct with [`ProjectId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(MonitoringError::InvalidArgument(
                "project ID must not be empty".into(),
            ));
        }
        Ok(ProjectId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The resource path the service expects: `projects/<id>`.
    pub fn resource_path(&self) -> String {
        format!("projects/{}", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which family of descriptors to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    Metric,
    MonitoredResource,
}

impl DescriptorKind {
    /// RPC method name on `google.monitoring.v3.MetricService`.
    pub fn method_name(&self) -> &'static str {
        match self {
            DescriptorKind::Metric => "ListMetricDescriptors",
            DescriptorKind::MonitoredResource => "ListMonitoredResourceDescriptors",
        }
    }

    /// Heading printed before a text listing.
    pub fn heading(&self) -> &'static str {
        match self {
            DescriptorKind::Metric => "Metric Descriptors:",
            DescriptorKind::MonitoredResource => "Monitored Resource Descriptors:",
        }
    }

    /// Lower-case plural used in messages, e.g. "metric descriptors".
    pub fn plural(&self) -> &'static str {
        match self {
            DescriptorKind::Metric => "metric descriptors",
            DescriptorKind::MonitoredResource => "monitored resource descriptors",
        }
    }
}

impl FromStr for DescriptorKind {
    type Err = MonitoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "metric" => Ok(DescriptorKind::Metric),
            "monitored-resource" | "resource" => Ok(DescriptorKind::MonitoredResource),
            other => Err(MonitoringError::InvalidArgument(format!(
                "unrecognized descriptor kind '{other}', expected 'metric' or 'monitored-resource'"
            ))),
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorKind::Metric => write!(f, "metric"),
            DescriptorKind::MonitoredResource => write!(f, "monitored-resource"),
        }
    }
}

/// One listing to perform: which descriptors, for which project, with the
/// optional server-side filter and page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    project: ProjectId,
    kind: DescriptorKind,
    filter: Option<String>,
    page_size: Option<u32>,
}

impl ListRequest {
    pub fn new(project: ProjectId, kind: DescriptorKind) -> Self {
        ListRequest {
            project,
            kind,
            filter: None,
            page_size: None,
        }
    }

    /// Restrict results with a monitoring filter expression, evaluated by
    /// the service. Empty strings are ignored.
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.is_empty());
        self
    }

    /// Maximum results per page. Zero leaves the choice to the service.
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size.filter(|&n| n > 0);
        self
    }

    pub fn project(&self) -> &ProjectId {
        &self.project
    }

    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }

    pub fn resource_path(&self) -> String {
        self.project.resource_path()
    }

    /// The request for one page, continuing from `page_token` if given.
    pub fn page(&self, page_token: Option<String>) -> PageRequest {
        PageRequest {
            resource_path: self.resource_path(),
            page_token,
            filter: self.filter.clone(),
            page_size: self.page_size,
        }
    }
}

/// Arguments to a single call of the remote listing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub resource_path: String,
    pub page_token: Option<String>,
    pub filter: Option<String>,
    pub page_size: Option<u32>,
}

/// A descriptor returned by the service.
///
/// Only [`Descriptor::name`] is interpreted; the wrapped record is otherwise
/// passed through as received.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Metric(pb::MetricDescriptor),
    MonitoredResource(pb::MonitoredResourceDescriptor),
}

impl Descriptor {
    pub fn name(&self) -> &str {
        match self {
            Descriptor::Metric(d) => &d.name,
            Descriptor::MonitoredResource(d) => &d.name,
        }
    }

    pub fn kind(&self) -> DescriptorKind {
        match self {
            Descriptor::Metric(_) => DescriptorKind::Metric,
            Descriptor::MonitoredResource(_) => DescriptorKind::MonitoredResource,
        }
    }
}

/// One page of results plus the token for the next one, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescriptorPage {
    pub items: Vec<Descriptor>,
    pub next_page_token: Option<String>,
}

impl DescriptorPage {
    /// Build a page from wire fields, where an empty token means "last page".
    pub fn new(items: Vec<Descriptor>, next_page_token: String) -> Self {
        DescriptorPage {
            items,
            next_page_token: Some(next_page_token).filter(|t| !t.is_empty()),
        }
    }
}

/// The remote capability that lists descriptors one page at a time.
///
/// [`crate::client::MetricServiceClient`] implements this over gRPC; tests
/// substitute scripted implementations.
#[async_trait]
pub trait DescriptorService: Send + Sync {
    /// Fetch a single page of descriptors of the given kind.
    async fn list_page(&self, kind: DescriptorKind, request: &PageRequest)
        -> Result<DescriptorPage>;
}
