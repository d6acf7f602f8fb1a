//! HTTP transport collaborator.
//!
//! The gateway describes one outbound request (absolute URL, method, headers,
//! body, timeout) and expects back either a transport failure or a status code
//! plus body. Hosts that are not plain HTTP (the mini-program bridge) supply
//! their own implementation; `HttpTransport` is the reqwest-backed production
//! one.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Resolves once a response arrives; any error means no response reached
    /// the client (network failure or timeout).
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }
}

/// Flatten a JSON object into query pairs; scalars stringify, nulls drop.
fn query_pairs(body: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    if let Some(map) = body.as_object() {
        for (k, v) in map {
            match v {
                Value::Null => {}
                Value::String(s) => out.push((k.clone(), s.clone())),
                other => out.push((k.clone(), other.to_string())),
            }
        }
    }
    out
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse> {
        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut headers = HeaderMap::new();
        for (k, v) in &req.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .with_context(|| format!("invalid header name '{}'", k))?;
            let value = HeaderValue::from_str(v)
                .with_context(|| format!("invalid header value for '{}'", k))?;
            headers.insert(name, value);
        }

        let mut builder = self
            .client
            .request(method, &req.url)
            .headers(headers)
            .timeout(req.timeout);

        if let Some(body) = &req.body {
            // GET payloads travel as query parameters, matching the
            // mini-program bridge; everything else sends a JSON body.
            if req.method == Method::Get {
                builder = builder.query(&query_pairs(body));
            } else {
                builder = builder.json(body);
            }
        }

        let resp = builder.send().await.context("request dispatch failed")?;
        let status = resp.status().as_u16();
        // A body that isn't JSON still yields a classifiable response
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        Ok(TransportResponse { status, body })
    }
}
