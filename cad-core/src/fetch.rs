//! Per-panel fetch state machine.
//!
//! A [`Panel`] moves between Idle, Loading, Success and Failed. Every
//! parameter change that leads to a new request bumps the panel's
//! generation; a [`Completion`] is only applied if it carries the current
//! generation, so a slow response to superseded parameters can never
//! overwrite newer state. Discarded and replaced data is dropped, which
//! releases any image handle it owns.

use crate::error::FetchError;
use crate::params::{ArtifactRequest, Endpoint, ParamBundle};
use crate::transport::{Decode, Transport};

/// What a panel currently holds.
#[derive(Debug, Default, PartialEq)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Banner text for a failed fetch.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }
}

/// Permission to run one request, tied to the generation that issued it.
#[derive(Debug, Clone)]
pub struct Ticket<D> {
    generation: u64,
    request: ArtifactRequest,
    decoder: D,
}

/// Result of a ticket, to be handed back to [`Panel::complete`].
#[derive(Debug)]
pub struct Completion<T> {
    pub generation: u64,
    pub endpoint: Endpoint,
    pub result: Result<T, FetchError>,
}

impl<D: Decode> Ticket<D> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &ArtifactRequest {
        &self.request
    }

    /// Issue the request and decode the response.
    pub async fn run<T: Transport>(self, transport: &T, base_url: &str) -> Completion<D::Output> {
        let endpoint = self.request.endpoint;
        let url = self.request.url(base_url);
        log::info!("fetching {} (generation {}): {}", endpoint, self.generation, url);

        let result = match transport.get(&url).await {
            Ok(response) if !response.is_success() => {
                log::warn!("{} answered with status {}", endpoint, response.status);
                Err(FetchError::Status(response.status))
            }
            Ok(response) => {
                log::debug!("{} answered with {} bytes", endpoint, response.body.len());
                self.decoder.decode(response)
            }
            Err(e) => Err(e),
        };

        Completion {
            generation: self.generation,
            endpoint,
            result,
        }
    }
}

/// Fetch lifecycle of one visualization.
pub struct Panel<D: Decode> {
    endpoint: Endpoint,
    decoder: D,
    state: FetchState<D::Output>,
    generation: u64,
    active: Option<ArtifactRequest>,
}

impl<D: Decode> Panel<D> {
    pub fn new(endpoint: Endpoint, decoder: D) -> Self {
        Self {
            endpoint,
            decoder,
            state: FetchState::Idle,
            generation: 0,
            active: None,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn state(&self) -> &FetchState<D::Output> {
        &self.state
    }

    /// Consume the panel, keeping only its final state.
    pub fn into_state(self) -> FetchState<D::Output> {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The request the current state belongs to, if any.
    pub fn active_request(&self) -> Option<&ArtifactRequest> {
        self.active.as_ref()
    }

    /// Feed new parameters in.
    ///
    /// - no bundle, or one missing a field this endpoint needs: back to Idle,
    ///   no request;
    /// - the same request as the active one: nothing changes;
    /// - a new request: previous data and error are cleared, state becomes
    ///   Loading and a [`Ticket`] for exactly one request is returned.
    pub fn update(&mut self, bundle: Option<&ParamBundle>) -> Option<Ticket<D>> {
        let request = bundle.and_then(|b| self.endpoint.request(b));
        match request {
            None => {
                if !self.state.is_idle() || self.active.is_some() {
                    log::debug!("{} deactivated", self.endpoint);
                }
                self.reset();
                None
            }
            Some(request) if self.active.as_ref() == Some(&request) => None,
            Some(request) => {
                self.generation += 1;
                self.state = FetchState::Loading;
                self.active = Some(request.clone());
                Some(Ticket {
                    generation: self.generation,
                    request,
                    decoder: self.decoder.clone(),
                })
            }
        }
    }

    /// Apply a finished request. Returns `false` when the completion belongs
    /// to a superseded generation and was discarded.
    pub fn complete(&mut self, completion: Completion<D::Output>) -> bool {
        if completion.generation != self.generation || !self.state.is_loading() {
            log::info!(
                "discarding stale {} response (generation {}, current {})",
                completion.endpoint,
                completion.generation,
                self.generation
            );
            return false;
        }
        self.state = match completion.result {
            Ok(data) => FetchState::Success(data),
            Err(e) => {
                log::error!("error fetching {}: {}", completion.endpoint, e);
                FetchState::Failed(e)
            }
        };
        true
    }

    /// Drop all state and invalidate any request still in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.active = None;
        self.state = FetchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::CasePerState;
    use crate::filters::{FilterState, TableType};
    use crate::image::MemoryUrls;
    use crate::transport::{CasesDecoder, ImageDecoder, RawResponse};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Answers GETs from a queue and records every URL it was asked for.
    #[derive(Default)]
    struct FakeTransport {
        responses: RefCell<VecDeque<Result<RawResponse, FetchError>>>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        fn with(responses: Vec<Result<RawResponse, FetchError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                requested: RefCell::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requested.borrow().len()
        }
    }

    impl Transport for FakeTransport {
        async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::transport("no response queued")))
        }
    }

    fn png() -> Result<RawResponse, FetchError> {
        Ok(RawResponse::ok(b"\x89PNG".to_vec(), Some("image/png")))
    }

    fn bundle_for(start_year: u16) -> ParamBundle {
        let mut filters = FilterState::default();
        filters.set_start_year(start_year);
        ParamBundle::from(&filters)
    }

    #[tokio::test]
    async fn test_image_activation_success() {
        let store = MemoryUrls::new();
        let transport = FakeTransport::with(vec![png()]);
        let mut panel = Panel::new(Endpoint::IndiaMap, ImageDecoder::new(store.clone()));

        let ticket = panel.update(Some(&bundle_for(2020))).unwrap();
        assert!(panel.state().is_loading());

        let completion = ticket.run(&transport, "http://svc").await;
        assert!(panel.complete(completion));

        let artifact = panel.state().data().unwrap();
        assert_eq!(store.bytes(artifact.image_url()), Some(b"\x89PNG".to_vec()));
        assert_eq!(
            transport.requested.borrow()[0],
            "http://svc/api/india_map?table=by&start_year=2020&end_year=2023"
        );
    }

    #[tokio::test]
    async fn test_at_most_one_live_handle_across_activations() {
        let store = MemoryUrls::new();
        let transport = FakeTransport::with((0..6).map(|_| png()).collect());
        let mut panel = Panel::new(Endpoint::WordCloud, ImageDecoder::new(store.clone()));

        for start in 2010..2016 {
            let ticket = panel.update(Some(&bundle_for(start))).unwrap();
            // Activation already released the previous image
            assert_eq!(store.live_count(), 0);
            let completion = ticket.run(&transport, "").await;
            panel.complete(completion);
            assert_eq!(store.live_count(), 1);
        }

        assert_eq!(store.high_water(), 1);
        assert_eq!(store.created_count(), 6);
        assert_eq!(store.revoked_count(), 5);

        panel.reset();
        assert_eq!(store.live_count(), 0);
        assert_eq!(store.revoked_count(), 6);
    }

    #[tokio::test]
    async fn test_teardown_releases_handle() {
        let store = MemoryUrls::new();
        let transport = FakeTransport::with(vec![png()]);
        let mut panel = Panel::new(Endpoint::CdfLinePlot, ImageDecoder::new(store.clone()));
        let ticket = panel.update(Some(&bundle_for(2019))).unwrap();
        panel.complete(ticket.run(&transport, "").await);
        assert_eq!(store.live_count(), 1);

        drop(panel);
        assert_eq!(store.live_count(), 0);
        assert_eq!(store.revoked_count(), 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded_and_released() {
        let store = MemoryUrls::new();
        let transport = FakeTransport::with(vec![png(), png()]);
        let mut panel = Panel::new(Endpoint::StackedHistogram, ImageDecoder::new(store.clone()));

        let first = panel.update(Some(&bundle_for(2001))).unwrap();
        let second = panel.update(Some(&bundle_for(2002))).unwrap();
        assert!(second.generation() > first.generation());

        // Newer request resolves first
        let newer = second.run(&transport, "").await;
        let older = first.run(&transport, "").await;
        assert!(panel.complete(newer));
        let live_url = panel.state().data().unwrap().image_url().to_string();

        assert!(!panel.complete(older));
        assert_eq!(panel.state().data().unwrap().image_url(), live_url);
        assert_eq!(store.live_count(), 1);
        assert_eq!(store.revoked_count(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_bundle_never_requests() {
        let transport = FakeTransport::default();
        let mut panel = Panel::new(Endpoint::CasesPerState, CasesDecoder);

        let mut bundle = ParamBundle {
            start_year: Some(2020),
            ..ParamBundle::default()
        };
        assert!(panel.update(Some(&bundle)).is_none());
        assert!(panel.update(None).is_none());
        assert_eq!(panel.state(), &FetchState::Idle);
        assert_eq!(transport.request_count(), 0);

        bundle.end_year = Some(2021);
        bundle.table_type = Some(TableType::Against);
        assert!(panel.update(Some(&bundle)).is_some());
    }

    #[tokio::test]
    async fn test_deactivating_returns_to_idle_and_drops_late_result() {
        let transport = FakeTransport::with(vec![Ok(RawResponse::ok(
            br#"[{"state":"A","count":1}]"#.to_vec(),
            None,
        ))]);
        let mut panel = Panel::new(Endpoint::CasesPerState, CasesDecoder);
        let ticket = panel.update(Some(&bundle_for(2020))).unwrap();

        panel.update(None);
        assert!(panel.state().is_idle());

        let completion = ticket.run(&transport, "").await;
        assert!(!panel.complete(completion));
        assert!(panel.state().is_idle());
    }

    #[tokio::test]
    async fn test_status_failure_then_new_activation_clears() {
        let transport = FakeTransport::with(vec![
            Ok(RawResponse::ok(br#"{"data":[{"state":"A","count":5}]}"#.to_vec(), None)),
            Ok(RawResponse::with_status(500)),
        ]);
        let mut panel = Panel::new(Endpoint::CasesPerState, CasesDecoder);

        let ticket = panel.update(Some(&bundle_for(2018))).unwrap();
        panel.complete(ticket.run(&transport, "").await);
        assert_eq!(
            panel.state().data(),
            Some(&vec![CasePerState::new(Some("A"), 5)])
        );

        let ticket = panel.update(Some(&bundle_for(2019))).unwrap();
        // Prior data is gone before the new result arrives
        assert_eq!(panel.state(), &FetchState::Loading);
        assert!(panel.state().data().is_none());

        panel.complete(ticket.run(&transport, "").await);
        assert_eq!(
            panel.state().error_message().as_deref(),
            Some("HTTP error! status: 500")
        );
        assert!(panel.state().data().is_none());
        assert!(!panel.state().is_loading());
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_message() {
        let transport = FakeTransport::with(vec![Err(FetchError::transport("connection reset"))]);
        let store = MemoryUrls::new();
        let mut panel = Panel::new(Endpoint::CdfLinePlotByState, ImageDecoder::new(store.clone()));
        let ticket = panel.update(Some(&bundle_for(2015))).unwrap();
        panel.complete(ticket.run(&transport, "").await);

        assert_eq!(panel.state().error_message().as_deref(), Some("connection reset"));
        assert_eq!(store.created_count(), 0);
    }

    #[tokio::test]
    async fn test_same_parameters_do_not_refetch() {
        let transport = FakeTransport::with(vec![png()]);
        let mut panel = Panel::new(Endpoint::IndiaMap, ImageDecoder::new(MemoryUrls::new()));
        let bundle = bundle_for(2012);
        let ticket = panel.update(Some(&bundle)).unwrap();
        panel.complete(ticket.run(&transport, "").await);

        assert!(panel.update(Some(&bundle)).is_none());
        assert!(panel.state().data().is_some());

        // Fields this endpoint ignores do not count as a change
        let mut other = bundle.clone();
        other.state = Some("Goa".to_string());
        assert!(panel.update(Some(&other)).is_none());
    }
}
