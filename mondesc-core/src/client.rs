use async_trait::async_trait;
use http::uri::PathAndQuery;
use tonic::client::Grpc;
use tonic::metadata::{AsciiMetadataValue, MetadataMap};
use tonic::transport::Channel;

use crate::codec::MessageCodec;
use crate::descriptor::{Descriptor, DescriptorKind, DescriptorPage, DescriptorService, PageRequest};
use crate::error::{MonitoringError, Result};
use crate::metadata::REQUEST_PARAMS_HEADER;
use crate::pb;

/// [`DescriptorService`] backed by the `google.monitoring.v3.MetricService`
/// gRPC API.
///
/// Holds one channel for the lifetime of the process; every call clones the
/// cheap `Grpc` handle and attaches the configured metadata.
#[derive(Clone)]
pub struct MetricServiceClient {
    grpc: Grpc<Channel>,
    metadata: MetadataMap,
}

impl MetricServiceClient {
    pub fn new(channel: Channel) -> Self {
        MetricServiceClient {
            grpc: Grpc::new(channel).accept_compressed(tonic::codec::CompressionEncoding::Gzip),
            metadata: MetadataMap::new(),
        }
    }

    /// Metadata (credentials, user headers) sent with every call.
    pub fn with_metadata(mut self, metadata: MetadataMap) -> Self {
        self.metadata = metadata;
        self
    }

    async fn unary<Req, Resp>(
        &self,
        kind: DescriptorKind,
        resource_path: &str,
        message: Req,
    ) -> Result<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let path = method_path(kind)?;
        let request = build_request(message, &self.metadata, resource_path);

        let mut grpc = self.grpc.clone();
        grpc.ready().await.map_err(|e| {
            MonitoringError::RemoteUnavailable(format!("service not ready: {e}"))
        })?;

        let response = grpc
            .unary(request, path, MessageCodec::<Req, Resp>::new())
            .await?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl DescriptorService for MetricServiceClient {
    async fn list_page(
        &self,
        kind: DescriptorKind,
        request: &PageRequest,
    ) -> Result<DescriptorPage> {
        let page = match kind {
            DescriptorKind::Metric => {
                let resp: pb::ListMetricDescriptorsResponse = self
                    .unary(kind, &request.resource_path, metric_request(request))
                    .await?;
                DescriptorPage::new(
                    resp.metric_descriptors
                        .into_iter()
                        .map(Descriptor::Metric)
                        .collect(),
                    resp.next_page_token,
                )
            }
            DescriptorKind::MonitoredResource => {
                let resp: pb::ListMonitoredResourceDescriptorsResponse = self
                    .unary(kind, &request.resource_path, resource_request(request))
                    .await?;
                DescriptorPage::new(
                    resp.resource_descriptors
                        .into_iter()
                        .map(Descriptor::MonitoredResource)
                        .collect(),
                    resp.next_page_token,
                )
            }
        };
        Ok(page)
    }
}

/// `/google.monitoring.v3.MetricService/<Method>`
fn method_path(kind: DescriptorKind) -> Result<PathAndQuery> {
    format!("/{}/{}", pb::METRIC_SERVICE, kind.method_name())
        .parse()
        .map_err(|e| MonitoringError::InvalidArgument(format!("invalid method path: {e}")))
}

/// Wrap a message with the configured metadata plus the routing header
/// naming the target resource.
fn build_request<T>(msg: T, md: &MetadataMap, resource_path: &str) -> tonic::Request<T> {
    let mut req = tonic::Request::new(msg);
    *req.metadata_mut() = md.clone();
    match format!("name={resource_path}").parse::<AsciiMetadataValue>() {
        Ok(value) => {
            req.metadata_mut().insert(REQUEST_PARAMS_HEADER, value);
        }
        Err(_) => {
            tracing::warn!(%resource_path, "resource path is not valid metadata, routing header omitted");
        }
    }
    req
}

fn metric_request(request: &PageRequest) -> pb::ListMetricDescriptorsRequest {
    pb::ListMetricDescriptorsRequest {
        name: request.resource_path.clone(),
        filter: request.filter.clone().unwrap_or_default(),
        page_size: wire_page_size(request.page_size),
        page_token: request.page_token.clone().unwrap_or_default(),
    }
}

fn resource_request(request: &PageRequest) -> pb::ListMonitoredResourceDescriptorsRequest {
    pb::ListMonitoredResourceDescriptorsRequest {
        name: request.resource_path.clone(),
        filter: request.filter.clone().unwrap_or_default(),
        page_size: wire_page_size(request.page_size),
        page_token: request.page_token.clone().unwrap_or_default(),
    }
}

/// Clamp to the proto's `int32`; zero means "server default".
fn wire_page_size(page_size: Option<u32>) -> i32 {
    page_size
        .map(|n| i32::try_from(n).unwrap_or(i32::MAX))
        .unwrap_or(0)
}
