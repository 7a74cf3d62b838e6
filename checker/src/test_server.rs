//! Canned-response HTTP server for exercising the API client and page checker in tests.

use bytes::Bytes;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode, body};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Route {
    status: StatusCode,
    body: String,
}

/// Serves fixed bodies by exact path and records every request it sees.
#[derive(Debug)]
pub(crate) struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<(String, String)>>>,
    task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub(crate) async fn start<P, B>(routes: impl IntoIterator<Item = (P, StatusCode, B)>) -> Self
    where
        P: Into<String>,
        B: Into<String>,
    {
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, status, body)| {
                    (
                        path.into(),
                        Route {
                            status,
                            body: body.into(),
                        },
                    )
                })
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("get local address");

        let recorded = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            loop {
                let Ok((conn, _)) = listener.accept().await else {
                    return;
                };
                let conn = hyper_util::rt::TokioIo::new(conn);
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                let service = service_fn(move |req: Request<body::Incoming>| {
                    let routes = Arc::clone(&routes);
                    let recorded = Arc::clone(&recorded);
                    async move {
                        let path = req.uri().path().to_string();
                        let query = req.uri().query().unwrap_or("").to_string();
                        recorded.lock().unwrap().push((path.clone(), query));
                        let response = match routes.get(&path) {
                            Some(route) => {
                                let mut response =
                                    Response::new(Full::<Bytes>::from(route.body.clone()));
                                *response.status_mut() = route.status;
                                response
                            }
                            None => {
                                let mut response = Response::new(Full::<Bytes>::from("not found"));
                                *response.status_mut() = StatusCode::NOT_FOUND;
                                response
                            }
                        };
                        Ok::<_, Infallible>(response)
                    }
                });
                tokio::spawn(async move {
                    let _ = hyper::server::conn::http1::Builder::new()
                        .serve_connection(conn, service)
                        .await;
                });
            }
        });

        Self {
            addr,
            requests,
            task,
        }
    }

    pub(crate) fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests received for `path`.
    pub(crate) fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }

    /// Query strings of the requests received for `path`, in arrival order.
    pub(crate) fn queries(&self, path: &str) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
            .collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
