use std::rc::Rc;

use crate::core::command::{Command, Parameter};
use crate::core::error::{BindingError, Result};
use crate::core::reactive::{Observable, Subscription};

use super::affinity::Affinity;
use super::event::EventBindingProvider;
use super::target::{BindingRequest, BindingTarget};

/// A strategy that wires a command's execution to a UI trigger.
pub trait BindingProvider {
    fn name(&self) -> &'static str;

    fn affinity(&self, request: &BindingRequest) -> Affinity;

    /// Releasing the returned subscription undoes the binding.
    fn bind(
        &self,
        command: Rc<dyn Command>,
        target: &dyn BindingTarget,
        parameter: &Observable<Parameter>,
        event: Option<&str>,
    ) -> Result<Subscription>;
}

/// Ordered set of binding providers.
///
/// Filled at configuration time, read-only while resolving.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn BindingProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the generic [`EventBindingProvider`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(EventBindingProvider::new());
        registry
    }

    pub fn register<P: BindingProvider + 'static>(&mut self, provider: P) {
        tracing::debug!(provider = provider.name(), "binding provider registered");
        self.providers.push(Box::new(provider));
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.iter().map(|p| p.name())
    }

    /// Highest affinity wins; on a tie the earliest registration wins.
    pub fn resolve(&self, request: &BindingRequest) -> Result<&dyn BindingProvider> {
        let mut best: Option<(&dyn BindingProvider, Affinity)> = None;
        for provider in &self.providers {
            let affinity = provider.affinity(request);
            if !affinity.is_capable() {
                continue;
            }
            let better = best.map_or(true, |(_, current)| affinity > current);
            if better {
                best = Some((provider.as_ref(), affinity));
            }
        }

        match best {
            Some((provider, affinity)) => {
                tracing::debug!(
                    provider = provider.name(),
                    %affinity,
                    target_type = request.target.type_name(),
                    "binding provider selected"
                );
                Ok(provider)
            }
            None => Err(BindingError::NoProviderFound {
                target_type: request.target.type_name(),
            }),
        }
    }

    pub fn bind_command(
        &self,
        command: Rc<dyn Command>,
        target: &dyn BindingTarget,
        parameter: &Observable<Parameter>,
        event: Option<&str>,
    ) -> Result<Subscription> {
        let request = BindingRequest::for_target(target, event);
        self.resolve(&request)?
            .bind(command, target, parameter, event)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/registry.rs"]
mod tests;
