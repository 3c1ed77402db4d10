//! A container that shows the view for whatever view model it is given.
//!
//! The host combines three inputs: the view model, the latest value of the
//! current contract stream, and an optional default content shown while there
//! is no view model or no resolved view. Each change runs the resolution
//! pipeline synchronously:
//!
//! - no view model: show the default content if one is configured, otherwise
//!   keep whatever is displayed
//! - view model set, caching on, and the displayed view was resolved by this
//!   host under the same contract for a view model of the same runtime type:
//!   push the new view model into that view
//! - otherwise: ask the locator for a new view and install it
//!
//! Resolution errors go to the host's [`ErrorSink`]; the previous content
//! stays on screen. Changes made from inside a content observer are applied
//! after the running evaluation finishes.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};

use super::control::{Content, Control, ViewContract, ViewFor, ViewModel};
use super::locator::{self, ViewLocator};
use crate::core::error::{BindingError, Result};
use crate::core::error_sink::{self, ErrorSink};
use crate::core::reactive::{CompositeSubscription, Observable, Property, Subscription};

static DEFAULT_CACHE_VIEWS: AtomicBool = AtomicBool::new(false);

/// Initial `cache_views` for hosts created without an explicit setting.
pub fn default_cache_views() -> bool {
    DEFAULT_CACHE_VIEWS.load(Ordering::Relaxed)
}

pub fn set_default_cache_views(enabled: bool) {
    DEFAULT_CACHE_VIEWS.store(enabled, Ordering::Relaxed);
}

/// Realizes installed content in the UI tree.
pub trait ContentPresenter {
    /// `previous` has already been released when it was owned by the host.
    fn present(&self, previous: Option<&Content>, next: Option<&Content>);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl ContentPresenter for NullPresenter {
    fn present(&self, _previous: Option<&Content>, _next: Option<&Content>) {}
}

#[derive(Default)]
pub struct HostOptions {
    /// Falls back to [`locator::current`] at resolution time.
    pub locator: Option<Rc<dyn ViewLocator>>,
    /// Falls back to [`error_sink::default_sink`] at construction.
    pub error_sink: Option<Rc<dyn ErrorSink>>,
    pub presenter: Option<Rc<dyn ContentPresenter>>,
    /// Falls back to [`default_cache_views`].
    pub cache_views: Option<bool>,
}

impl HostOptions {
    pub fn with_locator(mut self, locator: Rc<dyn ViewLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    pub fn with_error_sink(mut self, sink: Rc<dyn ErrorSink>) -> Self {
        self.error_sink = Some(sink);
        self
    }

    pub fn with_presenter(mut self, presenter: Rc<dyn ContentPresenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn with_cache_views(mut self, enabled: bool) -> Self {
        self.cache_views = Some(enabled);
        self
    }
}

/// The view this host resolved last and the contract it was resolved under.
struct Resolved {
    content: Content,
    contract: Option<ViewContract>,
}

struct HostState {
    view_model: Property<Option<ViewModel>>,
    contract_observable: Property<Observable<Option<ViewContract>>>,
    default_content: Property<Option<Content>>,
    content: Property<Option<Content>>,
    cache_views: Cell<bool>,
    locator: RefCell<Option<Rc<dyn ViewLocator>>>,
    error_sink: Rc<dyn ErrorSink>,
    presenter: Rc<dyn ContentPresenter>,
    resolved: RefCell<Option<Resolved>>,
    /// Whether the displayed content was built by this host.
    owns_content: Cell<bool>,
}

impl HostState {
    fn evaluate(&self, view_model: Option<ViewModel>, contract: Option<ViewContract>) {
        let Some(view_model) = view_model else {
            if let Some(default) = self.default_content.get() {
                self.resolved.replace(None);
                self.install(Some(default), false);
            }
            return;
        };

        if self.cache_views.get() && self.try_reuse(&view_model, contract.as_ref()) {
            return;
        }

        match self.resolve(&view_model, contract.as_deref()) {
            Ok(view) => {
                self.resolved.replace(Some(Resolved {
                    content: view.clone(),
                    contract,
                }));
                self.install(Some(view), true);
            }
            Err(error) => self.error_sink.handle(&error),
        }
    }

    fn try_reuse(&self, view_model: &ViewModel, contract: Option<&ViewContract>) -> bool {
        let Some(displayed) = self.content.get() else {
            return false;
        };
        let reusable = match &*self.resolved.borrow() {
            Some(resolved) => resolved.content == displayed && resolved.contract.as_ref() == contract,
            None => false,
        };
        if !reusable {
            return false;
        }
        let same_type = displayed
            .view_model()
            .is_some_and(|current| current.runtime_type() == view_model.runtime_type());
        if !same_type {
            return false;
        }

        tracing::debug!(
            view_model_type = view_model.type_name(),
            view_type = displayed.type_name(),
            "reusing displayed view"
        );
        displayed.set_view_model(Some(view_model.clone()));
        true
    }

    fn resolve(&self, view_model: &ViewModel, contract: Option<&str>) -> Result<Content> {
        let locator = self.locator.borrow().clone().unwrap_or_else(locator::current);
        let view = locator.resolve_view(view_model, contract)?;
        if !view.set_view_model(Some(view_model.clone())) {
            view.release();
            return Err(BindingError::NotAView {
                type_name: view.type_name(),
            });
        }
        tracing::debug!(
            view_model_type = view_model.type_name(),
            view_type = view.type_name(),
            contract = contract.unwrap_or(""),
            "resolved view"
        );
        Ok(view)
    }

    /// Replaces the displayed content, releasing the previous one when the
    /// host built it.
    fn install(&self, next: Option<Content>, owned: bool) {
        let previous = self.content.get();
        if previous == next {
            return;
        }
        self.release_owned();
        self.owns_content.set(owned);
        self.content.set(next.clone());
        self.presenter.present(previous.as_ref(), next.as_ref());
    }

    fn release_owned(&self) {
        if self.owns_content.replace(false) {
            if let Some(content) = self.content.get() {
                content.release();
            }
        }
    }
}

/// Hosts the view for a view model, re-resolving whenever the view model or
/// the contract changes.
pub struct ViewHost {
    state: Rc<HostState>,
    subscriptions: CompositeSubscription,
}

impl ViewHost {
    pub fn new() -> Self {
        Self::with_options(HostOptions::default())
    }

    pub fn with_options(options: HostOptions) -> Self {
        let state = Rc::new(HostState {
            view_model: Property::new(None),
            contract_observable: Property::new(Observable::just(None)),
            default_content: Property::new(None),
            content: Property::new(None),
            cache_views: Cell::new(options.cache_views.unwrap_or_else(default_cache_views)),
            locator: RefCell::new(options.locator),
            error_sink: options.error_sink.unwrap_or_else(error_sink::default_sink),
            presenter: options.presenter.unwrap_or_else(|| Rc::new(NullPresenter)),
            resolved: RefCell::new(None),
            owns_content: Cell::new(false),
        });

        let mut subscriptions = CompositeSubscription::new();
        subscriptions.add(Self::watch_default_content(&state));
        subscriptions.add(Self::watch_view_model(&state));

        Self {
            state,
            subscriptions,
        }
    }

    fn watch_default_content(state: &Rc<HostState>) -> Subscription {
        let weak: Weak<HostState> = Rc::downgrade(state);
        state.default_content.changed().subscribe(move |default| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            // A resolved view stays; otherwise the new default is shown.
            if default.is_some() && !state.owns_content.get() {
                state.install(default.clone(), false);
            }
        })
    }

    fn watch_view_model(state: &Rc<HostState>) -> Subscription {
        let weak: Weak<HostState> = Rc::downgrade(state);
        let contract = state.contract_observable.observable().switch_latest();
        state
            .view_model
            .observable()
            .combine_latest(&contract)
            .subscribe(move |(view_model, contract)| {
                if let Some(state) = weak.upgrade() {
                    state.evaluate(view_model.clone(), contract.clone());
                }
            })
    }

    pub fn view_model(&self) -> Option<ViewModel> {
        self.state.view_model.get()
    }

    pub fn set_view_model(&self, view_model: Option<ViewModel>) {
        self.state.view_model.set(view_model);
    }

    /// Currently displayed content, a resolved view or the default content.
    pub fn content(&self) -> Option<Content> {
        self.state.content.get()
    }

    /// The displayed content when it accepts a view model.
    pub fn current_view(&self) -> Option<Content> {
        self.content().filter(Content::is_view)
    }

    /// Publishes every installed content.
    pub fn content_changed(&self) -> Observable<Option<Content>> {
        self.state.content.changed()
    }

    pub fn default_content(&self) -> Option<Content> {
        self.state.default_content.get()
    }

    pub fn set_default_content(&self, content: Option<Content>) {
        self.state.default_content.set(content);
    }

    pub fn cache_views(&self) -> bool {
        self.state.cache_views.get()
    }

    /// Affects later resolutions only.
    pub fn set_cache_views(&self, enabled: bool) {
        self.state.cache_views.set(enabled);
    }

    pub fn view_contract_observable(&self) -> Observable<Option<ViewContract>> {
        self.state.contract_observable.get()
    }

    /// Switches to `contracts`; its latest value selects the view from now on.
    pub fn set_view_contract_observable(&self, contracts: Observable<Option<ViewContract>>) {
        self.state.contract_observable.set(contracts);
    }

    /// Uses a fixed contract.
    pub fn set_view_contract(&self, contract: Option<&str>) {
        self.set_view_contract_observable(Observable::just(contract.map(ViewContract::from)));
    }

    pub fn view_locator(&self) -> Option<Rc<dyn ViewLocator>> {
        self.state.locator.borrow().clone()
    }

    /// `None` restores the process locator.
    pub fn set_view_locator(&self, locator: Option<Rc<dyn ViewLocator>>) {
        self.state.locator.replace(locator);
    }

    /// Stops the pipeline. Displayed content is left in place.
    pub fn dispose(&mut self) {
        if !self.subscriptions.is_disposed() {
            tracing::debug!("view host disposed");
        }
        self.subscriptions.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.subscriptions.is_disposed()
    }
}

impl Default for ViewHost {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHost")
            .field("view_model", &self.view_model())
            .field("content", &self.content())
            .field("cache_views", &self.cache_views())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl Drop for ViewHost {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl Control for ViewHost {
    fn release(&mut self) {
        self.dispose();
        self.state.release_owned();
    }
}

impl ViewFor for ViewHost {
    fn view_model(&self) -> Option<ViewModel> {
        ViewHost::view_model(self)
    }

    fn set_view_model(&mut self, view_model: Option<ViewModel>) {
        ViewHost::set_view_model(self, view_model);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/host.rs"]
mod tests;
