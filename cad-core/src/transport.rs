//! The HTTP seam: a raw GET response and the trait that produces one.
//!
//! The browser build implements [`Transport`] over `fetch`, the command line
//! tool over `reqwest` (see [`crate::client`], feature `api`).

use crate::cases::{normalize_cases, CasePerState};
use crate::error::FetchError;
use crate::image::{ImageArtifact, ObjectUrls};

/// Value sent in the `accept` header of every request, including the ones
/// that answer with image bytes.
pub const ACCEPT: &str = "application/json";

/// Status, content type and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn ok(body: impl Into<Vec<u8>>, content_type: Option<&str>) -> Self {
        Self {
            status: 200,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a GET with `accept: application/json` and returns the raw response.
///
/// Non-2xx statuses are returned as responses, not errors; only failures to
/// obtain a response at all are errors.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

/// Turns a successful response body into a panel's data.
pub trait Decode: Clone {
    type Output;

    fn decode(&self, response: RawResponse) -> Result<Self::Output, FetchError>;
}

/// Wraps image bytes into an owned handle from `S`.
#[derive(Clone)]
pub struct ImageDecoder<S: ObjectUrls> {
    store: S,
}

impl<S: ObjectUrls> ImageDecoder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ObjectUrls> Decode for ImageDecoder<S> {
    type Output = ImageArtifact<S>;

    fn decode(&self, response: RawResponse) -> Result<Self::Output, FetchError> {
        ImageArtifact::create(&self.store, &response.body, response.content_type.as_deref())
    }
}

/// Normalizes a cases-per-state JSON body into rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CasesDecoder;

impl Decode for CasesDecoder {
    type Output = Vec<CasePerState>;

    fn decode(&self, response: RawResponse) -> Result<Self::Output, FetchError> {
        normalize_cases(&response.body)
    }
}
