//! Dioxus hooks binding the core state machines to signals and tasks.

use crate::state::AppState;
use crate::web_fetch::{now, WebTransport};
use cad_core::controls::{FetchPolicy, PanelControls};
use cad_core::debounce::Debouncer;
use cad_core::transport::Decode;
use cad_core::{Endpoint, Panel, ParamBundle};
use dioxus::core::Task;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use std::time::Duration;

/// Follows `input`, but only after it has stopped changing for `quiet`.
///
/// Each change cancels the pending timer and starts a new one, so at most
/// one timer is outstanding and none outlives the component.
pub fn use_debounced<T>(input: Memo<T>, quiet: Duration) -> Signal<T>
where
    T: Clone + PartialEq + 'static,
{
    let mut debouncer = use_signal(|| Debouncer::new(input.peek().clone(), quiet));
    let mut output = use_signal(|| input.peek().clone());
    let mut timer = use_signal(|| None::<Task>);

    use_effect(move || {
        let value = input();
        debouncer.write().push(value, now());

        if let Some(previous) = timer.write().take() {
            previous.cancel();
        }

        let task = spawn(async move {
            // Date.now() has millisecond resolution; wait again if woken early.
            loop {
                let remaining = debouncer.peek().deadline().map(|d| d.saturating_sub(now()));
                match remaining {
                    Some(wait) if !wait.is_zero() => {
                        TimeoutFuture::new(wait.as_millis().min(u32::MAX as u128) as u32).await
                    }
                    _ => break,
                }
            }
            if let Some(settled) = debouncer.write().poll(now()) {
                output.set(settled);
            }
        });
        timer.set(Some(task));
    });

    use_drop(move || {
        if let Ok(mut t) = timer.try_write() {
            if let Some(task) = t.take() {
                task.cancel();
            }
        }
    });

    output
}

/// Keeps a [`Panel`] in step with `bundle`.
///
/// Every new request spawns one fetch. A completion is applied only when its
/// generation still matches; anything older is dropped together with the
/// artifact it carries.
pub fn use_panel<D>(
    endpoint: Endpoint,
    decoder: impl FnOnce() -> D + 'static,
    bundle: Memo<Option<ParamBundle>>,
) -> Signal<Panel<D>>
where
    D: Decode + 'static,
    D::Output: 'static,
{
    let app = use_context::<AppState>();
    let mut panel = use_signal(move || Panel::new(endpoint, decoder()));

    use_effect(move || {
        let bundle = bundle();
        let ticket = panel.write().update(bundle.as_ref());
        let Some(ticket) = ticket else {
            return;
        };

        let base_url = app.config.peek().api_base_url.clone();
        spawn(async move {
            let completion = ticket.run(&WebTransport, &base_url).await;
            match panel.try_write() {
                Ok(mut p) => {
                    p.complete(completion);
                }
                Err(_) => log::debug!("[CAD] {} unmounted before completion", endpoint),
            }
        });
    });

    use_drop(move || {
        if let Ok(mut p) = panel.try_write() {
            p.reset();
        }
    });

    panel
}

/// Controls plus fetch for one panel.
///
/// Auto panels fetch once their filters have settled for the configured
/// debounce period; manual panels fetch when "Generate" arms them.
pub fn use_panel_fetch<D>(
    endpoint: Endpoint,
    decoder: impl FnOnce() -> D + 'static,
    controls: Signal<PanelControls>,
) -> Signal<Panel<D>>
where
    D: Decode + 'static,
    D::Output: 'static,
{
    let app = use_context::<AppState>();
    let quiet = app.config.peek().debounce;
    let policy = controls.peek().policy();

    let requested = use_memo(move || controls.read().bundle());
    let settled = use_debounced(requested, quiet);
    let bundle = use_memo(move || match policy {
        FetchPolicy::Auto => settled(),
        FetchPolicy::Manual => requested(),
    });

    use_panel(endpoint, decoder, bundle)
}
