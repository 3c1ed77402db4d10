//! Displayable elements and the view-model handles they carry.

use std::any::{type_name, Any, TypeId};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use compact_str::CompactString;

/// An opaque view-model reference.
///
/// Equality is identity; [`ViewModel::runtime_type`] is the concrete type of
/// the referenced value.
#[derive(Clone)]
pub struct ViewModel {
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl ViewModel {
    pub fn new<T: Any>(value: T) -> Self {
        Self::from_rc(Rc::new(value))
    }

    pub fn from_rc<T: Any>(value: Rc<T>) -> Self {
        Self {
            value,
            type_name: type_name::<T>(),
        }
    }

    pub fn runtime_type(&self) -> TypeId {
        (*self.value).type_id()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn downcast_rc<T: Any>(&self) -> Option<Rc<T>> {
        Rc::clone(&self.value).downcast::<T>().ok()
    }
}

impl PartialEq for ViewModel {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl Eq for ViewModel {}

impl fmt::Debug for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewModel")
            .field(&self.type_name)
            .field(&Rc::as_ptr(&self.value).cast::<()>())
            .finish()
    }
}

/// Tag choosing between several views for one view-model type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewContract(CompactString);

impl ViewContract {
    pub fn new(contract: impl AsRef<str>) -> Self {
        Self(CompactString::new(contract.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for ViewContract {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for ViewContract {
    fn from(contract: &str) -> Self {
        Self::new(contract)
    }
}

impl fmt::Display for ViewContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything a host can display.
pub trait Control: Any {
    /// Called once when the host replaces this element.
    fn release(&mut self) {}
}

/// A control bound to a view model.
pub trait ViewFor: Control {
    fn view_model(&self) -> Option<ViewModel>;

    fn set_view_model(&mut self, view_model: Option<ViewModel>);
}

impl dyn Control {
    pub fn downcast_ref<T: Control>(&self) -> Option<&T> {
        if self.type_id() == TypeId::of::<T>() {
            // SAFETY: the concrete type was just checked; the cast only drops
            // the vtable half of the fat pointer.
            unsafe { Some(&*(self as *const dyn Control as *const T)) }
        } else {
            None
        }
    }
}

impl dyn ViewFor {
    pub fn downcast_ref<T: Control>(&self) -> Option<&T> {
        if self.type_id() == TypeId::of::<T>() {
            // SAFETY: as above.
            unsafe { Some(&*(self as *const dyn ViewFor as *const T)) }
        } else {
            None
        }
    }
}

#[derive(Clone)]
enum Slot {
    View(Rc<RefCell<dyn ViewFor>>),
    Plain(Rc<RefCell<dyn Control>>),
}

/// Shared handle to a displayed element. Equality is identity.
#[derive(Clone)]
pub struct Content {
    slot: Slot,
    type_name: &'static str,
}

impl Content {
    /// A view that accepts a view model.
    pub fn view<V: ViewFor>(view: V) -> Self {
        Self {
            slot: Slot::View(Rc::new(RefCell::new(view))),
            type_name: type_name::<V>(),
        }
    }

    /// A plain element such as a placeholder.
    pub fn control<C: Control>(control: C) -> Self {
        Self {
            slot: Slot::Plain(Rc::new(RefCell::new(control))),
            type_name: type_name::<C>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is_view(&self) -> bool {
        matches!(self.slot, Slot::View(_))
    }

    /// `None` for plain controls and for views without a view model.
    pub fn view_model(&self) -> Option<ViewModel> {
        match &self.slot {
            Slot::View(view) => view.borrow().view_model(),
            Slot::Plain(_) => None,
        }
    }

    /// Returns `false` when the content is not a view.
    pub fn set_view_model(&self, view_model: Option<ViewModel>) -> bool {
        match &self.slot {
            Slot::View(view) => {
                view.borrow_mut().set_view_model(view_model);
                true
            }
            Slot::Plain(_) => false,
        }
    }

    pub fn release(&self) {
        match &self.slot {
            Slot::View(view) => view.borrow_mut().release(),
            Slot::Plain(control) => control.borrow_mut().release(),
        }
    }

    pub fn as_view(&self) -> Option<Ref<'_, dyn ViewFor>> {
        match &self.slot {
            Slot::View(view) => Some(view.borrow()),
            Slot::Plain(_) => None,
        }
    }

    pub fn as_view_mut(&self) -> Option<RefMut<'_, dyn ViewFor>> {
        match &self.slot {
            Slot::View(view) => Some(view.borrow_mut()),
            Slot::Plain(_) => None,
        }
    }

    /// Runs `f` against the concrete element when it is a `T`.
    pub fn with<T: Control, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        match &self.slot {
            Slot::View(view) => {
                let view = view.borrow();
                view.downcast_ref::<T>().map(f)
            }
            Slot::Plain(control) => {
                let control = control.borrow();
                control.downcast_ref::<T>().map(f)
            }
        }
    }

    pub fn ptr_eq(&self, other: &Content) -> bool {
        self == other
    }

    fn addr(&self) -> *const () {
        match &self.slot {
            Slot::View(view) => Rc::as_ptr(view).cast::<()>(),
            Slot::Plain(control) => Rc::as_ptr(control).cast::<()>(),
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }
}

impl Eq for Content {}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("type", &self.type_name)
            .field("view", &self.is_view())
            .field("addr", &self.addr())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/control.rs"]
mod tests;
