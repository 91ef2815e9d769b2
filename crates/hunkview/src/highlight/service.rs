//! Owned highlighter with an explicit initialisation lifecycle.

use super::highlighter::DiffHighlighter;
use std::sync::{Mutex, MutexGuard, PoisonError};

type ReadyCallback = Box<dyn FnOnce() + Send>;

/// Readiness of a [`HighlighterService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlighterState {
    /// Syntaxes and theme are not loaded yet.
    Loading,
    /// Highlighting is available.
    Ready,
}

/// Holds one [`DiffHighlighter`] for the render layer.
///
/// Created once at startup and shared by reference. Loading syntect's
/// syntaxes is slow, so [`initialize`](Self::initialize) is meant to run on
/// a worker thread while the view renders unhighlighted lines; listeners
/// registered with [`on_ready`](Self::on_ready) fire once it completes.
pub struct HighlighterService {
    theme: String,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    highlighter: Option<DiffHighlighter>,
    listeners: Vec<ReadyCallback>,
}

impl std::fmt::Debug for HighlighterService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlighterService")
            .field("theme", &self.theme)
            .field("state", &self.state())
            .finish()
    }
}

impl HighlighterService {
    /// Create a service that will load `theme` on initialisation.
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> HighlighterState {
        if self.lock().highlighter.is_some() {
            HighlighterState::Ready
        } else {
            HighlighterState::Loading
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == HighlighterState::Ready
    }

    /// Run `callback` once the highlighter is ready (immediately if it is).
    pub fn on_ready<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut inner = self.lock();
        if inner.highlighter.is_some() {
            drop(inner);
            callback();
        } else {
            inner.listeners.push(Box::new(callback));
        }
    }

    /// Load syntaxes and theme, then notify listeners. Later calls are no-ops.
    pub fn initialize(&self) {
        if self.is_ready() {
            return;
        }

        let highlighter = DiffHighlighter::new(&self.theme);
        let listeners = {
            let mut inner = self.lock();
            if inner.highlighter.is_some() {
                return;
            }
            inner.highlighter = Some(highlighter);
            std::mem::take(&mut inner.listeners)
        };

        log::debug!(
            "Highlighter ready ({} theme), notifying {} listeners",
            self.theme,
            listeners.len()
        );
        for listener in listeners {
            listener();
        }
    }

    /// Run `f` against the highlighter, or return `None` while loading.
    pub fn with_highlighter<R>(&self, f: impl FnOnce(&mut DiffHighlighter) -> R) -> Option<R> {
        let mut inner = self.lock();
        inner.highlighter.as_mut().map(f)
    }
}
