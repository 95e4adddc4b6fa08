//! Teams domain state

use orgweb_notices::NoticeService;
use orgweb_registry::RegistryService;
use orgweb_views::ViewRenderer;
use std::sync::Arc;

pub use orgweb_common::RequestContext;

/// Application state for the Teams domain
#[derive(Clone)]
pub struct TeamsState {
    pub registry: Arc<dyn RegistryService>,
    pub notices: Arc<dyn NoticeService>,
    pub views: Arc<dyn ViewRenderer>,
}
