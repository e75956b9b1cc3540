//! Backend HTTP adapter.
//!
//! Uses browser `fetch()` via gloo-net. Every status, including 4xx/5xx,
//! is handed back to the core as an `HttpResponse`; only transport
//! failures become errors.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};

use nova_core::ports::*;
use nova_types::{NovaError, Result, config::ApiConfig};

pub struct GlooHttp {
    api: ApiConfig,
}

impl GlooHttp {
    pub fn new(api: ApiConfig) -> Self {
        Self { api }
    }

    /// Absolute URL of `req`, query string included.
    pub fn endpoint(&self, req: &HttpRequest) -> String {
        let url = self.api.url(&req.path);
        if req.query.is_empty() {
            return url;
        }
        let query: Vec<String> = req
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect();
        format!("{}?{}", url, query.join("&"))
    }

    fn builder(&self, req: &HttpRequest) -> RequestBuilder {
        let url = self.endpoint(req);
        let builder = match req.method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        };
        let builder = builder.header("Accept", "application/json");
        match req.bearer {
            Some(ref token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }
}

fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

#[async_trait(?Send)]
impl HttpPort for GlooHttp {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let builder = self.builder(&req);
        let request = match req.body {
            Some(ref body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| NovaError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| NovaError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NovaError::Network(e.to_string()))?;
        log::debug!("{} {} -> {}", req.method.as_str(), req.path, status);

        Ok(HttpResponse::new(status, body))
    }
}
