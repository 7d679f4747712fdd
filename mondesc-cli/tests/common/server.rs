// See mod.rs for why this is needed.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use mondesc_core::codec::MessageCodec;
use mondesc_core::metadata::REQUEST_PARAMS_HEADER;
use mondesc_core::pb;
use tokio::sync::oneshot;
use tonic::body::Body;
use tonic::codegen::{http, BoxFuture, Service};
use tonic::metadata::MetadataMap;
use tonic::server::{Grpc, NamedService, UnaryService};
use tonic::transport::server::TcpIncoming;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// One scripted answer: the descriptor names on the page plus the next page
/// token (empty on the last page), or the status to fail with.
pub type Reply = Result<(Vec<&'static str>, &'static str), Status>;

/// A page of descriptors followed by `next`.
pub fn page(names: &[&'static str], next: &'static str) -> Reply {
    Ok((names.to_vec(), next))
}

/// A request as the server received it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenRequest {
    pub method: &'static str,
    pub name: String,
    pub filter: String,
    pub page_size: i32,
    pub page_token: String,
    pub routing: Option<String>,
    pub authorization: Option<String>,
}

/// An in-process `google.monitoring.v3.MetricService` on an ephemeral port.
///
/// Answers both list methods from one queue of replies, in order, and records
/// every request. The server stops when this struct is dropped.
pub struct FakeMetricServer {
    pub addr: String,
    script: Arc<Script>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FakeMetricServer {
    /// Start serving `replies` on 127.0.0.1.
    ///
    /// The listener is bound before this returns, so clients may connect
    /// immediately.
    pub fn start(replies: Vec<Reply>) -> Self {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind ephemeral port");
        listener
            .set_nonblocking(true)
            .expect("failed to make listener non-blocking");
        let addr = listener
            .local_addr()
            .expect("listener has no local address")
            .to_string();

        let script = Arc::new(Script {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        });
        let service = FakeMetricService(script.clone());
        let (shutdown, stop) = oneshot::channel::<()>();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("failed to build server runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener)
                    .expect("failed to register listener");
                Server::builder()
                    .add_service(service)
                    .serve_with_incoming_shutdown(TcpIncoming::from(listener), async {
                        let _ = stop.await;
                    })
                    .await
                    .expect("fake MetricService failed");
            });
        });

        FakeMetricServer {
            addr,
            script,
            shutdown: Some(shutdown),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.script.seen.lock().unwrap().clone()
    }
}

impl Drop for FakeMetricServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

struct Script {
    replies: Mutex<VecDeque<Reply>>,
    seen: Mutex<Vec<SeenRequest>>,
}

impl Script {
    fn answer(&self, seen: SeenRequest) -> Result<(Vec<String>, String), Status> {
        self.seen.lock().unwrap().push(seen);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Status::internal("no scripted reply left")));
        reply.map(|(names, next)| {
            (
                names.into_iter().map(String::from).collect(),
                next.to_string(),
            )
        })
    }
}

fn header(metadata: &MetadataMap, key: &str) -> Option<String> {
    metadata
        .get(key)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

struct ListMetrics(Arc<Script>);

impl UnaryService<pb::ListMetricDescriptorsRequest> for ListMetrics {
    type Response = pb::ListMetricDescriptorsResponse;
    type Future = BoxFuture<Response<Self::Response>, Status>;

    fn call(&mut self, request: Request<pb::ListMetricDescriptorsRequest>) -> Self::Future {
        let script = self.0.clone();
        Box::pin(async move {
            let seen = SeenRequest {
                method: "ListMetricDescriptors",
                routing: header(request.metadata(), REQUEST_PARAMS_HEADER),
                authorization: header(request.metadata(), "authorization"),
                name: request.get_ref().name.clone(),
                filter: request.get_ref().filter.clone(),
                page_size: request.get_ref().page_size,
                page_token: request.get_ref().page_token.clone(),
            };
            let (names, next_page_token) = script.answer(seen)?;
            Ok(Response::new(pb::ListMetricDescriptorsResponse {
                metric_descriptors: names
                    .into_iter()
                    .map(|name| pb::MetricDescriptor {
                        name,
                        ..Default::default()
                    })
                    .collect(),
                next_page_token,
            }))
        })
    }
}

struct ListResources(Arc<Script>);

impl UnaryService<pb::ListMonitoredResourceDescriptorsRequest> for ListResources {
    type Response = pb::ListMonitoredResourceDescriptorsResponse;
    type Future = BoxFuture<Response<Self::Response>, Status>;

    fn call(
        &mut self,
        request: Request<pb::ListMonitoredResourceDescriptorsRequest>,
    ) -> Self::Future {
        let script = self.0.clone();
        Box::pin(async move {
            let seen = SeenRequest {
                method: "ListMonitoredResourceDescriptors",
                routing: header(request.metadata(), REQUEST_PARAMS_HEADER),
                authorization: header(request.metadata(), "authorization"),
                name: request.get_ref().name.clone(),
                filter: request.get_ref().filter.clone(),
                page_size: request.get_ref().page_size,
                page_token: request.get_ref().page_token.clone(),
            };
            let (names, next_page_token) = script.answer(seen)?;
            Ok(Response::new(pb::ListMonitoredResourceDescriptorsResponse {
                resource_descriptors: names
                    .into_iter()
                    .map(|name| pb::MonitoredResourceDescriptor {
                        name,
                        ..Default::default()
                    })
                    .collect(),
                next_page_token,
            }))
        })
    }
}

/// Routes the two list methods; everything else is UNIMPLEMENTED.
#[derive(Clone)]
struct FakeMetricService(Arc<Script>);

impl NamedService for FakeMetricService {
    const NAME: &'static str = pb::METRIC_SERVICE;
}

impl Service<http::Request<Body>> for FakeMetricService {
    type Response = http::Response<Body>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<Body>) -> Self::Future {
        let script = self.0.clone();
        let prefix = format!("/{}/", pb::METRIC_SERVICE);
        let method = req
            .uri()
            .path()
            .strip_prefix(prefix.as_str())
            .unwrap_or_default()
            .to_string();

        match method.as_str() {
            "ListMetricDescriptors" => Box::pin(async move {
                let mut grpc = Grpc::new(MessageCodec::<
                    pb::ListMetricDescriptorsResponse,
                    pb::ListMetricDescriptorsRequest,
                >::new());
                Ok(grpc.unary(ListMetrics(script), req).await)
            }),
            "ListMonitoredResourceDescriptors" => Box::pin(async move {
                let mut grpc = Grpc::new(MessageCodec::<
                    pb::ListMonitoredResourceDescriptorsResponse,
                    pb::ListMonitoredResourceDescriptorsRequest,
                >::new());
                Ok(grpc.unary(ListResources(script), req).await)
            }),
            _ => Box::pin(async move {
                Ok(Status::unimplemented(format!("unknown method {method:?}")).into_http())
            }),
        }
    }
}
