//! Recording renderer for tests
//!
//! Captures every view it is asked to render and emits a small marker
//! document instead of real HTML. Can be switched to fail.

use std::sync::{Arc, Mutex, RwLock};

use crate::{View, ViewError, ViewRenderer};

#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    rendered: Arc<Mutex<Vec<View>>>,
    fail: Arc<RwLock<bool>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent render fail
    pub fn set_fail(&self, fail: bool) {
        *self.fail.write().unwrap() = fail;
    }

    /// Views rendered so far, in order
    pub fn rendered(&self) -> Vec<View> {
        self.rendered.lock().unwrap().clone()
    }

    /// The most recently rendered view
    pub fn last(&self) -> Option<View> {
        self.rendered.lock().unwrap().last().cloned()
    }
}

impl ViewRenderer for RecordingRenderer {
    fn render(&self, view: &View) -> Result<String, ViewError> {
        if *self.fail.read().unwrap() {
            return Err(ViewError::Template(format!(
                "mock render failure for {}",
                view.name()
            )));
        }
        self.rendered.lock().unwrap().push(view.clone());
        Ok(format!("<!-- {} -->\n{}", view.name(), view.context()?))
    }
}
