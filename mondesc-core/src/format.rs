use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde_json::{json, Value};

use crate::descriptor::{Descriptor, DescriptorKind};
use crate::pb;

/// Output format for listed descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Heading plus one descriptor name per line.
    Text,
    /// One JSON object per descriptor per line.
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(Format::Json),
            "text" => Ok(Format::Text),
            other => Err(format!(
                "The --format option must be 'json' or 'text', got '{other}'."
            )),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Text => write!(f, "text"),
        }
    }
}

/// Receives each page of descriptors as soon as it arrives.
///
/// Output is streamed page by page, so lines written for earlier pages stay
/// written if a later page fails.
pub trait DescriptorSink: Send {
    fn write_page(&mut self, kind: DescriptorKind, items: &[Descriptor]) -> io::Result<()>;
}

/// Writes descriptor names, one per line.
///
/// With a heading enabled, the kind's heading line is written before the
/// first page, and only once a page has actually been received.
pub struct TextSink<W> {
    out: W,
    heading: bool,
    started: bool,
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(out: W) -> Self {
        TextSink {
            out,
            heading: false,
            started: false,
        }
    }

    pub fn with_heading(mut self) -> Self {
        self.heading = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> DescriptorSink for TextSink<W> {
    fn write_page(&mut self, kind: DescriptorKind, items: &[Descriptor]) -> io::Result<()> {
        if !self.started {
            self.started = true;
            if self.heading {
                writeln!(self.out, "{}", kind.heading())?;
            }
        }
        for item in items {
            writeln!(self.out, "{}", item.name())?;
        }
        self.out.flush()
    }
}

/// Writes each descriptor as a single-line JSON object.
pub struct JsonSink<W> {
    out: W,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(out: W) -> Self {
        JsonSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> DescriptorSink for JsonSink<W> {
    fn write_page(&mut self, _kind: DescriptorKind, items: &[Descriptor]) -> io::Result<()> {
        for item in items {
            serde_json::to_writer(&mut self.out, &descriptor_json(item))?;
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}

/// Create the sink for the chosen format. Text output includes the heading.
pub fn sink<W: Write + Send + 'static>(format: Format, out: W) -> Box<dyn DescriptorSink> {
    match format {
        Format::Text => Box::new(TextSink::new(out).with_heading()),
        Format::Json => Box::new(JsonSink::new(out)),
    }
}

/// JSON rendering of a descriptor using the proto's camelCase field names.
/// Enum values render by name; values this build does not know render as
/// their number.
pub fn descriptor_json(descriptor: &Descriptor) -> Value {
    match descriptor {
        Descriptor::Metric(d) => json!({
            "name": d.name,
            "type": d.r#type,
            "displayName": d.display_name,
            "description": d.description,
            "metricKind": enum_json(d.metric_kind, |k: pb::MetricKind| k.as_str_name()),
            "valueType": enum_json(d.value_type, |v: pb::ValueType| v.as_str_name()),
            "unit": d.unit,
            "labels": d.labels.iter().map(label_json).collect::<Vec<_>>(),
            "launchStage": enum_json(d.launch_stage, |s: pb::LaunchStage| s.as_str_name()),
            "monitoredResourceTypes": d.monitored_resource_types,
        }),
        Descriptor::MonitoredResource(d) => json!({
            "name": d.name,
            "type": d.r#type,
            "displayName": d.display_name,
            "description": d.description,
            "labels": d.labels.iter().map(label_json).collect::<Vec<_>>(),
            "launchStage": enum_json(d.launch_stage, |s: pb::LaunchStage| s.as_str_name()),
        }),
    }
}

fn label_json(label: &pb::LabelDescriptor) -> Value {
    json!({
        "key": label.key,
        "valueType": enum_json(label.value_type, |v: pb::LabelValueType| v.as_str_name()),
        "description": label.description,
    })
}

fn enum_json<E: TryFrom<i32>>(raw: i32, name: impl Fn(E) -> &'static str) -> Value {
    match E::try_from(raw) {
        Ok(known) => Value::from(name(known)),
        Err(_) => Value::from(raw),
    }
}
