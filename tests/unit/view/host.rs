use super::*;
use crate::core::error_sink::ObservableErrorSink;
use crate::core::reactive::Subject;
use crate::view::locator::DefaultViewLocator;

struct Page(u32);
struct Profile;
struct Unmapped;

struct PageView {
    layout: &'static str,
    view_model: Option<ViewModel>,
    released: Rc<Cell<u32>>,
}

impl Control for PageView {
    fn release(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

impl ViewFor for PageView {
    fn view_model(&self) -> Option<ViewModel> {
        self.view_model.clone()
    }

    fn set_view_model(&mut self, view_model: Option<ViewModel>) {
        self.view_model = view_model;
    }
}

struct Placeholder {
    released: Rc<Cell<u32>>,
}

impl Control for Placeholder {
    fn release(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

struct CountingLocator {
    inner: DefaultViewLocator,
    calls: Cell<u32>,
    released: Rc<Cell<u32>>,
}

impl CountingLocator {
    fn new() -> Rc<Self> {
        let released = Rc::new(Cell::new(0));
        let mut inner = DefaultViewLocator::new();
        for (contract, layout) in [(None, "default"), (Some("tablet"), "tablet")] {
            let released = Rc::clone(&released);
            inner.register::<Page, _>(contract, move || PageView {
                layout,
                view_model: None,
                released: Rc::clone(&released),
            });
        }
        let profile_released = Rc::clone(&released);
        inner.register::<Profile, _>(None, move || PageView {
            layout: "profile",
            view_model: None,
            released: Rc::clone(&profile_released),
        });
        Rc::new(Self {
            inner,
            calls: Cell::new(0),
            released,
        })
    }
}

impl ViewLocator for CountingLocator {
    fn resolve_view(&self, view_model: &ViewModel, contract: Option<&str>) -> Result<Content> {
        self.calls.set(self.calls.get() + 1);
        self.inner.resolve_view(view_model, contract)
    }
}

fn host(locator: &Rc<CountingLocator>, cache_views: bool) -> ViewHost {
    ViewHost::with_options(
        HostOptions::default()
            .with_locator(Rc::clone(locator) as Rc<dyn ViewLocator>)
            .with_cache_views(cache_views),
    )
}

fn layout(host: &ViewHost) -> Option<&'static str> {
    host.content()?.with::<PageView, _>(|v| v.layout)
}

fn placeholder() -> (Content, Rc<Cell<u32>>) {
    let released = Rc::new(Cell::new(0));
    let content = Content::control(Placeholder {
        released: Rc::clone(&released),
    });
    (content, released)
}

#[test]
fn test_same_type_reuses_view_without_locator() {
    let locator = CountingLocator::new();
    let host = host(&locator, true);
    let first = ViewModel::new(Page(1));
    let second = ViewModel::new(Page(2));

    host.set_view_model(Some(first));
    let view = host.content().unwrap();
    host.set_view_model(Some(second.clone()));

    assert_eq!(locator.calls.get(), 1);
    assert_eq!(host.content(), Some(view.clone()));
    assert_eq!(view.view_model(), Some(second));
    assert_eq!(locator.released.get(), 0);
}

#[test]
fn test_type_switch_resolves_and_releases_previous() {
    let locator = CountingLocator::new();
    let host = host(&locator, true);

    host.set_view_model(Some(ViewModel::new(Page(1))));
    let page_view = host.content().unwrap();
    let profile = ViewModel::new(Profile);
    host.set_view_model(Some(profile.clone()));

    assert_eq!(locator.calls.get(), 2);
    assert_ne!(host.content(), Some(page_view));
    assert_eq!(layout(&host), Some("profile"));
    assert_eq!(host.content().unwrap().view_model(), Some(profile));
    assert_eq!(locator.released.get(), 1);
}

#[test]
fn test_without_caching_every_change_resolves() {
    let locator = CountingLocator::new();
    let host = host(&locator, false);

    host.set_view_model(Some(ViewModel::new(Page(1))));
    let first = host.content().unwrap();
    host.set_view_model(Some(ViewModel::new(Page(2))));

    assert_eq!(locator.calls.get(), 2);
    assert_ne!(host.content(), Some(first));
}

#[test]
fn test_toggling_cache_affects_later_resolutions_only() {
    let locator = CountingLocator::new();
    let host = host(&locator, false);

    host.set_view_model(Some(ViewModel::new(Page(1))));
    let view = host.content().unwrap();
    host.set_cache_views(true);
    assert_eq!(host.content(), Some(view.clone()));

    host.set_view_model(Some(ViewModel::new(Page(2))));
    assert_eq!(locator.calls.get(), 1);
    assert_eq!(host.content(), Some(view));
}

#[test]
fn test_null_view_model_shows_default_content() {
    let locator = CountingLocator::new();
    let host = host(&locator, true);
    let (default, default_released) = placeholder();
    host.set_default_content(Some(default.clone()));
    assert_eq!(host.content(), Some(default.clone()));
    assert!(host.current_view().is_none());

    let vm = ViewModel::new(Page(1));
    host.set_view_model(Some(vm.clone()));
    assert!(host.current_view().is_some());
    assert_eq!(default_released.get(), 0);

    host.set_view_model(None);
    assert_eq!(host.content(), Some(default));
    assert_eq!(locator.released.get(), 1);

    host.set_view_model(Some(vm));
    assert_eq!(locator.calls.get(), 2);
    assert_eq!(layout(&host), Some("default"));
    assert_eq!(default_released.get(), 0);
}

#[test]
fn test_null_without_default_keeps_content() {
    let locator = CountingLocator::new();
    let host = host(&locator, true);

    host.set_view_model(Some(ViewModel::new(Page(1))));
    let view = host.content();
    host.set_view_model(None);

    assert_eq!(host.content(), view);
    assert_eq!(locator.released.get(), 0);
}

#[test]
fn test_late_default_content_replaces_previous_default() {
    let locator = CountingLocator::new();
    let host = host(&locator, true);
    let (first, first_released) = placeholder();
    let (second, _) = placeholder();

    host.set_default_content(Some(first));
    host.set_default_content(Some(second.clone()));

    assert_eq!(host.content(), Some(second));
    assert_eq!(first_released.get(), 0);
}

#[test]
fn test_default_change_ignored_while_view_displayed() {
    let locator = CountingLocator::new();
    let host = host(&locator, true);
    host.set_view_model(Some(ViewModel::new(Page(1))));
    let view = host.content();

    let (default, _) = placeholder();
    host.set_default_content(Some(default));
    assert_eq!(host.content(), view);
}

#[test]
fn test_default_shown_when_resolution_failed() {
    let locator = CountingLocator::new();
    let host = host(&locator, true);
    host.set_view_model(Some(ViewModel::new(Unmapped)));
    assert!(host.content().is_none());

    let (default, _) = placeholder();
    host.set_default_content(Some(default.clone()));
    assert_eq!(host.content(), Some(default));

    // A view resolved later replaces the default without releasing it.
    host.set_view_model(Some(ViewModel::new(Page(1))));
    assert_eq!(layout(&host), Some("default"));
}

#[test]
fn test_contract_change_forces_resolution() {
    let locator = CountingLocator::new();
    let host = host(&locator, true);

    host.set_view_model(Some(ViewModel::new(Page(1))));
    host.set_view_contract(Some("tablet"));
    assert_eq!(locator.calls.get(), 2);
    assert_eq!(layout(&host), Some("tablet"));

    // Same contract again is a cache hit.
    host.set_view_contract(Some("tablet"));
    host.set_view_model(Some(ViewModel::new(Page(2))));
    assert_eq!(locator.calls.get(), 2);
    assert_eq!(layout(&host), Some("tablet"));
}

#[test]
fn test_follows_latest_contract_stream() {
    let locator = CountingLocator::new();
    let host = host(&locator, true);
    let first = Subject::<Option<ViewContract>>::new();
    let second = Subject::<Option<ViewContract>>::new();

    host.set_view_model(Some(ViewModel::new(Page(1))));
    host.set_view_contract_observable(first.observable());
    first.next(&Some(ViewContract::from("tablet")));
    assert_eq!(layout(&host), Some("tablet"));

    let contracts = second.observable();
    host.set_view_contract_observable(contracts.clone());
    assert_eq!(host.view_contract_observable(), contracts);
    assert_eq!(first.observer_count(), 0);
    first.next(&None);
    assert_eq!(layout(&host), Some("tablet"));

    second.next(&None);
    assert_eq!(layout(&host), Some("default"));
}

#[test]
fn test_dispose_stops_content_changes() {
    let locator = CountingLocator::new();
    let mut host = host(&locator, true);
    host.set_view_model(Some(ViewModel::new(Page(1))));
    let view = host.content();

    host.dispose();
    host.dispose();
    assert!(host.is_disposed());

    host.set_view_model(Some(ViewModel::new(Profile)));
    host.set_view_contract(Some("tablet"));
    assert_eq!(host.content(), view);
    assert_eq!(locator.calls.get(), 1);
}

#[test]
fn test_resolution_error_goes_to_sink() {
    let locator = CountingLocator::new();
    let sink = Rc::new(ObservableErrorSink::new());
    let errors = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let errors = Rc::clone(&errors);
        sink.thrown_errors()
            .subscribe(move |e: &BindingError| errors.borrow_mut().push(e.clone()))
    };
    let host = ViewHost::with_options(
        HostOptions::default()
            .with_locator(Rc::clone(&locator) as Rc<dyn ViewLocator>)
            .with_error_sink(sink as Rc<dyn ErrorSink>),
    );

    host.set_view_model(Some(ViewModel::new(Page(1))));
    let view = host.content();
    host.set_view_model(Some(ViewModel::new(Unmapped)));

    assert_eq!(host.content(), view);
    assert_eq!(errors.borrow().len(), 1);
    assert!(matches!(
        &errors.borrow()[0],
        BindingError::NoViewRegistered { view_model_type, .. } if view_model_type.ends_with("Unmapped")
    ));

    // The pipeline survives the failure.
    host.set_view_model(Some(ViewModel::new(Profile)));
    assert_eq!(layout(&host), Some("profile"));
}

struct PlainLocator {
    released: Rc<Cell<u32>>,
}

impl ViewLocator for PlainLocator {
    fn resolve_view(&self, _view_model: &ViewModel, _contract: Option<&str>) -> Result<Content> {
        Ok(Content::control(Placeholder {
            released: Rc::clone(&self.released),
        }))
    }
}

#[test]
fn test_locator_returning_plain_control_is_rejected() {
    let sink = Rc::new(ObservableErrorSink::new());
    let seen = Rc::new(Cell::new(false));
    let _sub = {
        let seen = Rc::clone(&seen);
        sink.thrown_errors().subscribe(move |e: &BindingError| {
            seen.set(matches!(e, BindingError::NotAView { .. }));
        })
    };
    let released = Rc::new(Cell::new(0));
    let host = ViewHost::with_options(
        HostOptions::default()
            .with_locator(Rc::new(PlainLocator {
                released: Rc::clone(&released),
            }))
            .with_error_sink(sink),
    );

    host.set_view_model(Some(ViewModel::new(Page(1))));
    assert!(seen.get());
    assert!(host.content().is_none());
    assert_eq!(released.get(), 1);
}

#[derive(Default)]
struct RecordingPresenter {
    calls: RefCell<Vec<(Option<Content>, Option<Content>)>>,
}

impl ContentPresenter for RecordingPresenter {
    fn present(&self, previous: Option<&Content>, next: Option<&Content>) {
        self.calls
            .borrow_mut()
            .push((previous.cloned(), next.cloned()));
    }
}

#[test]
fn test_presenter_and_stream_see_each_install() {
    let locator = CountingLocator::new();
    let presenter = Rc::new(RecordingPresenter::default());
    let host = ViewHost::with_options(
        HostOptions::default()
            .with_locator(Rc::clone(&locator) as Rc<dyn ViewLocator>)
            .with_presenter(Rc::clone(&presenter) as Rc<dyn ContentPresenter>)
            .with_cache_views(true),
    );
    let published = Rc::new(Cell::new(0));
    let _sub = {
        let published = Rc::clone(&published);
        host.content_changed()
            .subscribe(move |_| published.set(published.get() + 1))
    };

    host.set_view_model(Some(ViewModel::new(Page(1))));
    let first = host.content();
    host.set_view_model(Some(ViewModel::new(Page(2))));
    host.set_view_model(Some(ViewModel::new(Profile)));

    let calls = presenter.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], (None, first.clone()));
    assert_eq!(calls[1], (first, host.content()));
    assert_eq!(published.get(), 2);
}

#[test]
fn test_view_model_set_by_content_observer_is_applied() {
    let locator = CountingLocator::new();
    let host = Rc::new(host(&locator, true));
    let profile = ViewModel::new(Profile);
    let _sub = {
        let weak = Rc::downgrade(&host);
        let profile = profile.clone();
        let redirected = Cell::new(false);
        host.content_changed().subscribe(move |_| {
            if redirected.replace(true) {
                return;
            }
            if let Some(host) = weak.upgrade() {
                host.set_view_model(Some(profile.clone()));
            }
        })
    };

    host.set_view_model(Some(ViewModel::new(Page(1))));

    assert_eq!(host.view_model(), Some(profile.clone()));
    assert_eq!(host.content().and_then(|c| c.view_model()), Some(profile));
    assert_eq!(layout(&host), Some("profile"));
    assert_eq!(locator.calls.get(), 2);
}

#[test]
fn test_drop_releases_upstream_streams() {
    let locator = CountingLocator::new();
    let contracts = Subject::<Option<ViewContract>>::new();
    let host = host(&locator, true);
    host.set_view_contract_observable(contracts.observable());
    assert_eq!(contracts.observer_count(), 1);

    drop(host);
    assert_eq!(contracts.observer_count(), 0);
}

#[test]
fn test_host_is_a_view() {
    let locator = CountingLocator::new();
    let mut host = host(&locator, true);
    let vm = ViewModel::new(Page(3));

    ViewFor::set_view_model(&mut host, Some(vm.clone()));
    assert_eq!(ViewFor::view_model(&host), Some(vm));
    assert_eq!(layout(&host), Some("default"));

    Control::release(&mut host);
    assert!(host.is_disposed());
    assert_eq!(locator.released.get(), 1);
}

#[test]
fn test_process_default_cache_flag() {
    let previous = default_cache_views();
    set_default_cache_views(true);
    let enabled = ViewHost::new().cache_views();
    set_default_cache_views(previous);

    assert!(enabled);
}
