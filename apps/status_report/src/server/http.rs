//! hyper glue: one task per connection, every request dispatched through the router.

use bytes::Bytes;
use http::{Method, Request, Response, StatusCode, header};
use http_body_util::{BodyExt, Empty, Full};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use moj_router::{Reply, ServerRouter};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::ServerError;

pub type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

fn full<T: Into<Bytes>>(chunk: T) -> BoxBody {
    Full::new(chunk.into())
        .map_err(|never| match never {})
        .boxed()
}

fn empty() -> BoxBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

fn plain(status: StatusCode, text: &'static str) -> Response<BoxBody> {
    let mut response = Response::new(full(text));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// Turn a router [`Reply`] into a hyper response. `HEAD` keeps headers only.
pub fn into_response(reply: Reply, head_only: bool) -> Response<BoxBody> {
    let mut builder = Response::builder()
        .status(reply.status)
        .header(header::CONTENT_TYPE, reply.content_type);

    for (name, value) in &reply.headers {
        builder = builder.header(*name, value.as_str());
    }

    let body = if head_only {
        builder = builder.header(header::CONTENT_LENGTH, reply.body.len());
        empty()
    } else {
        full(reply.body)
    };

    match builder.body(body) {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "invalid response");
            plain(StatusCode::INTERNAL_SERVER_ERROR, "Error building response")
        }
    }
}

fn method_not_allowed() -> Response<BoxBody> {
    let mut response = plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    response
        .headers_mut()
        .insert(header::ALLOW, header::HeaderValue::from_static("GET, HEAD"));
    response
}

/// Answer one request. Only `GET` and `HEAD` are routed; every response is logged.
pub async fn handle_request<B>(
    req: Request<B>,
    router: Arc<ServerRouter>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method();
    let path = req.uri().path();

    let response = match *method {
        Method::GET | Method::HEAD => {
            let reply = router.handle_request(path).await.unwrap_or_else(Reply::not_found);
            into_response(reply, *method == Method::HEAD)
        }
        _ => method_not_allowed(),
    };

    tracing::info!(
        status = response.status().as_u16(),
        method = %method,
        path = %path,
        route = %router.matched_pattern(path).unwrap_or("-"),
        "returned"
    );

    Ok(response)
}

/// Accept connections on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    router: Arc<ServerRouter>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => accepted?,
            () = &mut shutdown => {
                tracing::info!("shutting down");
                return Ok(());
            }
        };

        let io = TokioIo::new(stream);
        let router = Arc::clone(&router);

        tokio::task::spawn(async move {
            let service = service_fn(move |req| handle_request(req, Arc::clone(&router)));

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                tracing::warn!(%peer, error = ?err, "error serving connection");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn router() -> Arc<ServerRouter> {
        Arc::new(
            ServerRouter::new()
                .route("/api/status/users", |_| async {
                    Reply::json(200, &serde_json::json!({ "count": 42 }))
                        .with_header("Access-Control-Allow-Origin", "*")
                })
                .unwrap(),
        )
    }

    async fn body_of(response: Response<BoxBody>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn routes_get_requests() {
        let req = Request::get("/api/status/users").body(()).unwrap();
        let response = handle_request(req, router()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(body_of(response).await.as_ref(), br#"{"count":42}"#);
    }

    #[tokio::test]
    async fn head_requests_have_no_body() {
        let req = Request::head("/api/status/users").body(()).unwrap();
        let response = handle_request(req, router()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "12");
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn unknown_paths_are_404() {
        let req = Request::get("/api/status/comments").body(()).unwrap();
        let response = handle_request(req, router()).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn other_methods_are_405() {
        let req = Request::post("/api/status/users").body(()).unwrap();
        let response = handle_request(req, router()).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, HEAD");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    #[tokio::test]
    async fn every_response_is_logged_with_status() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        for req in [
            Request::get("/api/status/users").body(()).unwrap(),
            Request::get("/api/status/comments").body(()).unwrap(),
            Request::post("/api/status/users").body(()).unwrap(),
        ] {
            handle_request(req, router()).await.unwrap();
        }

        let lines = captured.lines();
        assert_eq!(lines.len(), 3);

        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("returned"));
        assert!(lines[0].contains("status=200 method=GET path=/api/status/users route=/api/status/users"));
        assert!(lines[1].contains("status=404 method=GET path=/api/status/comments route=-"));
        assert!(lines[2].contains("status=405 method=POST path=/api/status/users"));
    }
}
