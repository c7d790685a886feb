//! # max-client
//!
//! Transport-agnostic client for the Max Bot API.
//!
//! ## Features
//! - [`Serializer`] facade over serde_json with a single error kind
//! - Typed API calls ([`calls`]) whose responses decode to `max-types` objects
//! - [`Client::encode`] builds a ready-to-send [`http::Request`]
//! - [`Client::decode`] turns a status + body into the typed response or an
//!   [`ClientError::Api`] carrying the platform's error body
//! - Webhook delivery validation and decoding ([`WebhookReceiver`])
//! - Long-polling marker tracking ([`UpdateCursor`])
//!
//! The crate never opens a connection. Send the encoded request with any HTTP
//! client and feed the response back:
//!
//! ```rust
//! use max_client::{Client, Config, calls::GetMyInfo};
//! use http::StatusCode;
//!
//! let client = Client::new(Config::with_token("token"))?;
//! let request = client.encode(&GetMyInfo)?;
//! assert_eq!(request.uri(), "https://platform-api.max.ru/me");
//!
//! // …send `request`, receive a status and body…
//! let body = br#"{"user_id":1,"first_name":"Echo","is_bot":true}"#;
//! let me = client.decode::<GetMyInfo>(StatusCode::OK, body)?;
//! assert!(me.user.is_bot);
//! # Ok::<(), max_client::ClientError>(())
//! ```

#![deny(unsafe_code)]

mod errors;
pub mod calls;
pub mod config;
pub mod cursor;
pub mod serializer;
pub mod webhook;

pub use calls::ApiCall;
pub use config::Config;
pub use cursor::{MarkerCheck, UpdateCursor};
pub use errors::{ClientError, SerializationError, WebhookError};
pub use serializer::{JsonSerializer, Serializer};
pub use webhook::{WebhookReceiver, parse_update};

pub use http;
pub use max_types as types;

use http::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::{Request, Response, StatusCode};
use max_types::ApiError;
use url::Url;

const USER_AGENT_VALUE: &str = concat!("max-client/", env!("CARGO_PKG_VERSION"));

// ─── Client ───────────────────────────────────────────────────────────────────

/// Encodes API calls and decodes their responses.
///
/// Cheap to clone; holds no connection state.
#[derive(Clone, Debug)]
pub struct Client<S = JsonSerializer> {
    config:     Config,
    base:       Url,
    serializer: S,
}

impl Client<JsonSerializer> {
    /// Create a client using the JSON serializer.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        Self::with_serializer(config, JsonSerializer::new())
    }

    /// [`Client::new`] with [`Config::from_env`].
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(Config::from_env()?)
    }
}

impl<S: Serializer> Client<S> {
    pub fn with_serializer(config: Config, serializer: S) -> Result<Self, ClientError> {
        if config.access_token.is_empty() {
            return Err(ClientError::Config("access_token"));
        }
        let base = Url::parse(&config.base_url)?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }
        tracing::debug!("[max] client ready for {base}");
        Ok(Self { config, base, serializer })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Absolute URL of `call`, query parameters included.
    pub fn url_for<C: ApiCall>(&self, call: &C) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.config.base_url.clone()))?;
            segments.pop_if_empty();
            for segment in call.path() {
                segments.push(&segment);
            }
        }

        let mut query = call.query();
        if let Some(v) = &self.config.api_version {
            query.push(("v", v.clone()));
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Build the HTTP request for `call`.
    ///
    /// The token travels in the `Authorization` header; the body, if any, is
    /// JSON produced by this client's serializer.
    pub fn encode<C: ApiCall>(&self, call: &C) -> Result<Request<Vec<u8>>, ClientError> {
        let url = self.url_for(call)?;
        let body = self.serializer.serialize(call.body())?;

        tracing::debug!("[max] {} {}", C::METHOD, url.path());

        let mut builder = Request::builder()
            .method(C::METHOD)
            .uri(url.as_str())
            .header(AUTHORIZATION, self.config.access_token.as_str())
            .header(USER_AGENT, USER_AGENT_VALUE);
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        Ok(builder.body(body.unwrap_or_default())?)
    }

    /// Decode the response to `C` from its status and raw body.
    pub fn decode<C: ApiCall>(&self, status: StatusCode, body: &[u8]) -> Result<C::Response, ClientError> {
        if status.is_success() {
            return self
                .serializer
                .deserialize_bytes::<C::Response>(Some(body))?
                .ok_or(ClientError::EmptyResponse(status));
        }

        let error = match self.serializer.deserialize_bytes::<ApiError>(Some(body)) {
            Ok(Some(error)) => error,
            // Proxies and gateways answer with HTML or nothing at all.
            Ok(None) | Err(_) => ApiError {
                code:    format!("http.{}", status.as_u16()),
                message: String::from_utf8_lossy(body).into_owned(),
            },
        };
        tracing::warn!("[max] {} failed: HTTP {status}: {error}", C::METHOD);
        Err(ClientError::Api { status, error })
    }

    /// [`decode`](Self::decode) taking an [`http::Response`].
    pub fn decode_response<C: ApiCall, B: AsRef<[u8]>>(
        &self,
        response: &Response<B>,
    ) -> Result<C::Response, ClientError> {
        self.decode::<C>(response.status(), response.body().as_ref())
    }
}

impl<S: Serializer + Clone> Client<S> {
    /// A webhook receiver sharing this client's serializer and configured secret.
    pub fn webhook_receiver(&self) -> WebhookReceiver<S> {
        WebhookReceiver::with_serializer(self.serializer.clone(), self.config.webhook_secret.clone())
    }
}
