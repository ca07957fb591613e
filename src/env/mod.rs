//! Environment sensors: the engine's only view of the host page.

pub mod device;
pub mod signal;

use crate::foundation::error::{FlourishError, FlourishResult};

pub use device::{DeviceHints, NetworkType};
pub use signal::{Constant, Signal, SignalCell, Watch};

/// Ambient color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn parse(s: &str) -> FlourishResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(FlourishError::validation(format!("unknown theme '{other}'"))),
        }
    }
}

/// Injected input signals.
pub struct Environment {
    pub reduced_motion: Box<dyn Signal<bool>>,
    /// Whether the engine's output intersects the viewport.
    pub visible: Box<dyn Signal<bool>>,
    /// Whether the document is in the foreground.
    pub document_visible: Box<dyn Signal<bool>>,
    pub theme: Box<dyn Signal<Theme>>,
    /// Scroll progress in `[0, 1]`, drives the vine reveal.
    pub scroll_progress: Box<dyn Signal<f64>>,
    pub device: DeviceHints,
}

impl Environment {
    /// Constant signals: visible, foregrounded, fully scrolled, no motion preference.
    pub fn fixed(theme: Theme, device: DeviceHints) -> Self {
        Self {
            reduced_motion: Box::new(Constant(false)),
            visible: Box::new(Constant(true)),
            document_visible: Box::new(Constant(true)),
            theme: Box::new(Constant(theme)),
            scroll_progress: Box::new(Constant(1.0)),
            device,
        }
    }

    pub fn with_reduced_motion(mut self, signal: impl Signal<bool> + 'static) -> Self {
        self.reduced_motion = Box::new(signal);
        self
    }

    pub fn with_visible(mut self, signal: impl Signal<bool> + 'static) -> Self {
        self.visible = Box::new(signal);
        self
    }

    pub fn with_document_visible(mut self, signal: impl Signal<bool> + 'static) -> Self {
        self.document_visible = Box::new(signal);
        self
    }

    pub fn with_theme(mut self, signal: impl Signal<Theme> + 'static) -> Self {
        self.theme = Box::new(signal);
        self
    }

    pub fn with_scroll_progress(mut self, signal: impl Signal<f64> + 'static) -> Self {
        self.scroll_progress = Box::new(signal);
        self
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("reduced_motion", &self.reduced_motion.current())
            .field("visible", &self.visible.current())
            .field("document_visible", &self.document_visible.current())
            .field("theme", &self.theme.current())
            .field("scroll_progress", &self.scroll_progress.current())
            .field("device", &self.device)
            .finish()
    }
}
