//! View resolution: view-model handles, the locator that maps them to views,
//! and the host that keeps the right view on screen.

pub mod control;
pub mod host;
pub mod locator;

pub use control::{Content, Control, ViewContract, ViewFor, ViewModel};
pub use host::{
    default_cache_views, set_default_cache_views, ContentPresenter, HostOptions, NullPresenter,
    ViewHost,
};
pub use locator::{DefaultViewLocator, ViewLocator};
