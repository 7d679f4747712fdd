//! Wire messages for the subset of `google.monitoring.v3.MetricService`
//! (and the `google.api` records it returns) that mondesc calls.
//!
//! Field numbers follow the published `metric_service.proto`,
//! `metric.proto`, `monitored_resource.proto`, `label.proto` and
//! `launch_stage.proto`. Fields not declared here are skipped on decode.

/// Fully-qualified gRPC service name.
pub const METRIC_SERVICE: &str = "google.monitoring.v3.MetricService";

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListMetricDescriptorsRequest {
    /// `projects/[PROJECT_ID_OR_NUMBER]`
    #[prost(string, tag = "5")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub filter: String,
    #[prost(int32, tag = "3")]
    pub page_size: i32,
    #[prost(string, tag = "4")]
    pub page_token: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListMetricDescriptorsResponse {
    #[prost(message, repeated, tag = "1")]
    pub metric_descriptors: Vec<MetricDescriptor>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListMonitoredResourceDescriptorsRequest {
    #[prost(string, tag = "5")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub filter: String,
    #[prost(int32, tag = "3")]
    pub page_size: i32,
    #[prost(string, tag = "4")]
    pub page_token: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListMonitoredResourceDescriptorsResponse {
    #[prost(message, repeated, tag = "1")]
    pub resource_descriptors: Vec<MonitoredResourceDescriptor>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

/// `google.api.MetricDescriptor`
#[derive(Clone, PartialEq, prost::Message)]
pub struct MetricDescriptor {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "8")]
    pub r#type: String,
    #[prost(message, repeated, tag = "2")]
    pub labels: Vec<LabelDescriptor>,
    #[prost(enumeration = "MetricKind", tag = "3")]
    pub metric_kind: i32,
    #[prost(enumeration = "ValueType", tag = "4")]
    pub value_type: i32,
    #[prost(string, tag = "5")]
    pub unit: String,
    #[prost(string, tag = "6")]
    pub description: String,
    #[prost(string, tag = "7")]
    pub display_name: String,
    #[prost(enumeration = "LaunchStage", tag = "12")]
    pub launch_stage: i32,
    #[prost(string, repeated, tag = "13")]
    pub monitored_resource_types: Vec<String>,
}

/// `google.api.MonitoredResourceDescriptor`
#[derive(Clone, PartialEq, prost::Message)]
pub struct MonitoredResourceDescriptor {
    #[prost(string, tag = "5")]
    pub name: String,
    #[prost(string, tag = "1")]
    pub r#type: String,
    #[prost(string, tag = "2")]
    pub display_name: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(message, repeated, tag = "4")]
    pub labels: Vec<LabelDescriptor>,
    #[prost(enumeration = "LaunchStage", tag = "7")]
    pub launch_stage: i32,
}

/// `google.api.LabelDescriptor`
#[derive(Clone, PartialEq, prost::Message)]
pub struct LabelDescriptor {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(enumeration = "LabelValueType", tag = "2")]
    pub value_type: i32,
    #[prost(string, tag = "3")]
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum MetricKind {
    Unspecified = 0,
    Gauge = 1,
    Delta = 2,
    Cumulative = 3,
}

impl MetricKind {
    /// Name as it appears in the proto definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            MetricKind::Unspecified => "METRIC_KIND_UNSPECIFIED",
            MetricKind::Gauge => "GAUGE",
            MetricKind::Delta => "DELTA",
            MetricKind::Cumulative => "CUMULATIVE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ValueType {
    Unspecified = 0,
    Bool = 1,
    Int64 = 2,
    Double = 3,
    String = 4,
    Distribution = 5,
    Money = 6,
}

impl ValueType {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            ValueType::Unspecified => "VALUE_TYPE_UNSPECIFIED",
            ValueType::Bool => "BOOL",
            ValueType::Int64 => "INT64",
            ValueType::Double => "DOUBLE",
            ValueType::String => "STRING",
            ValueType::Distribution => "DISTRIBUTION",
            ValueType::Money => "MONEY",
        }
    }
}

/// `google.api.LabelDescriptor.ValueType`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum LabelValueType {
    String = 0,
    Bool = 1,
    Int64 = 2,
}

impl LabelValueType {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            LabelValueType::String => "STRING",
            LabelValueType::Bool => "BOOL",
            LabelValueType::Int64 => "INT64",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum LaunchStage {
    Unspecified = 0,
    Unimplemented = 6,
    Prelaunch = 7,
    EarlyAccess = 1,
    Alpha = 2,
    Beta = 3,
    Ga = 4,
    Deprecated = 5,
}

impl LaunchStage {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            LaunchStage::Unspecified => "LAUNCH_STAGE_UNSPECIFIED",
            LaunchStage::Unimplemented => "UNIMPLEMENTED",
            LaunchStage::Prelaunch => "PRELAUNCH",
            LaunchStage::EarlyAccess => "EARLY_ACCESS",
            LaunchStage::Alpha => "ALPHA",
            LaunchStage::Beta => "BETA",
            LaunchStage::Ga => "GA",
            LaunchStage::Deprecated => "DEPRECATED",
        }
    }
}
