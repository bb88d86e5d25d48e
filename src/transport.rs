//! gloo-net Transport
//!
//! Sends core `ApiRequest`s through `fetch`, and sleeps with gloo-timers.

use gloo_net::http::{Request, RequestBuilder};
use taskboard_core::transport::Body;
use taskboard_core::{ApiRequest, Method, RawResponse, Sleep, Transport, TransportError};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

fn network_error(error: gloo_net::Error) -> TransportError {
    TransportError(error.to_string())
}

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    }
}

impl Transport for GlooTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = builder(request.method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let response = match &request.body {
            Some(body) => {
                builder
                    .header("Content-Type", body.content_type())
                    .body(body.as_str().to_string())
                    .map_err(network_error)?
                    .send()
                    .await
            }
            None => builder.send().await,
        }
        .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        Ok(RawResponse::new(status, body))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooSleep;

impl Sleep for GlooSleep {
    async fn sleep(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}
