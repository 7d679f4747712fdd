//! Core library for mondesc: list Cloud Monitoring metric descriptors and
//! monitored-resource descriptors for a project.
//!
//! The CLI binary wires these pieces together; they are usable on their own:
//!
//! - [`connection`] builds a tonic channel to the MetricService endpoint
//! - [`client::MetricServiceClient`] implements [`descriptor::DescriptorService`]
//!   over that channel
//! - [`commands::list::list_descriptors`] drives pagination to exhaustion and
//!   streams each page into a [`format::DescriptorSink`]

pub mod client;
pub mod codec;
pub mod commands;
pub mod connection;
pub mod descriptor;
pub mod error;
pub mod format;
pub mod metadata;
pub mod pb;
