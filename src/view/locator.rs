//! Maps a view model (plus an optional contract) to a freshly built view.

use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::control::{Content, ViewContract, ViewFor, ViewModel};
use crate::core::error::{BindingError, Result};

/// Produces a view for a view model.
///
/// Implementations must fail with [`BindingError::NoViewRegistered`] when no
/// mapping exists. Resolution runs synchronously on the UI thread, so a
/// locator that blocks on I/O stalls every host that uses it.
pub trait ViewLocator {
    fn resolve_view(&self, view_model: &ViewModel, contract: Option<&str>) -> Result<Content>;
}

type ViewFactory = Box<dyn Fn() -> Content>;

/// Registration-based locator.
///
/// A lookup with a contract falls back to the contract-less registration for
/// the same view-model type.
#[derive(Default)]
pub struct DefaultViewLocator {
    factories: FxHashMap<(TypeId, Option<ViewContract>), ViewFactory>,
}

impl DefaultViewLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` for view models of type `VM`. A later registration
    /// for the same key replaces the earlier one.
    pub fn register<VM, V>(&mut self, contract: Option<&str>, factory: impl Fn() -> V + 'static)
    where
        VM: Any,
        V: ViewFor,
    {
        let key = (TypeId::of::<VM>(), contract.map(ViewContract::from));
        tracing::debug!(
            view_model_type = type_name::<VM>(),
            view_type = type_name::<V>(),
            contract = contract.unwrap_or(""),
            "registered view"
        );
        self.factories
            .insert(key, Box::new(move || Content::view(factory())));
    }

    pub fn is_registered<VM: Any>(&self, contract: Option<&str>) -> bool {
        self.lookup(TypeId::of::<VM>(), contract).is_some()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    fn lookup(&self, view_model_type: TypeId, contract: Option<&str>) -> Option<&ViewFactory> {
        contract
            .and_then(|c| {
                self.factories
                    .get(&(view_model_type, Some(ViewContract::from(c))))
            })
            .or_else(|| self.factories.get(&(view_model_type, None)))
    }
}

impl ViewLocator for DefaultViewLocator {
    fn resolve_view(&self, view_model: &ViewModel, contract: Option<&str>) -> Result<Content> {
        let factory = self
            .lookup(view_model.runtime_type(), contract)
            .ok_or_else(|| BindingError::NoViewRegistered {
                view_model_type: view_model.type_name(),
                contract: contract.map(str::to_owned),
            })?;
        Ok(factory())
    }
}

thread_local! {
    static CURRENT: RefCell<Rc<dyn ViewLocator>> = RefCell::new(Rc::new(DefaultViewLocator::new()));
}

/// The locator hosts use when they were not given one.
pub fn current() -> Rc<dyn ViewLocator> {
    CURRENT.with(|locator| Rc::clone(&locator.borrow()))
}

/// Replaces the process locator, returning the previous one.
pub fn set_current(locator: Rc<dyn ViewLocator>) -> Rc<dyn ViewLocator> {
    CURRENT.with(|current| current.replace(locator))
}

#[cfg(test)]
#[path = "../../tests/unit/view/locator.rs"]
mod tests;
