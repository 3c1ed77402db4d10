//! Command capability consumed by binding providers.
//!
//! A command pairs a `can_execute` predicate with an `execute` action, both
//! taking the most recent command parameter (if any).

use std::any::Any;
use std::fmt;
use std::rc::Rc;

pub type Parameter = Rc<dyn Any>;

pub trait Command {
    fn can_execute(&self, parameter: Option<&Parameter>) -> bool;

    fn execute(&self, parameter: Option<&Parameter>);
}

type CanExecuteFn = Box<dyn Fn(Option<&Parameter>) -> bool>;
type ExecuteFn = Box<dyn Fn(Option<&Parameter>)>;

/// Closure-backed [`Command`]; always executable unless a predicate is set.
pub struct DelegateCommand {
    can_execute: CanExecuteFn,
    execute: ExecuteFn,
}

impl DelegateCommand {
    pub fn new(execute: impl Fn(Option<&Parameter>) + 'static) -> Self {
        Self {
            can_execute: Box::new(|_| true),
            execute: Box::new(execute),
        }
    }

    pub fn with_can_execute(
        mut self,
        can_execute: impl Fn(Option<&Parameter>) -> bool + 'static,
    ) -> Self {
        self.can_execute = Box::new(can_execute);
        self
    }
}

impl Command for DelegateCommand {
    fn can_execute(&self, parameter: Option<&Parameter>) -> bool {
        (self.can_execute)(parameter)
    }

    fn execute(&self, parameter: Option<&Parameter>) {
        (self.execute)(parameter)
    }
}

impl fmt::Debug for DelegateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateCommand").finish_non_exhaustive()
    }
}
