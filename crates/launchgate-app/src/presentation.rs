//! Presentation model
//!
//! Purely derived from gate state; hosts render it and never mutate it.

use launchgate_core::LaunchMode;
use url::Url;

/// Main content under the loading overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// The native interface.
    Native,
    /// The embedded web surface.
    Surface {
        /// Point the surface was asked to load first.
        start_point: Url,
        /// Whether the surface is visible (it loads hidden behind the
        /// overlay).
        visible: bool,
    },
}

/// What the host should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Gate mode.
    pub mode: LaunchMode,
    /// Main content.
    pub content: Content,
    /// Whether the loading overlay covers the content.
    pub loading_overlay: bool,
}

impl Presentation {
    /// Initial presentation: hidden surface under the loading overlay.
    pub fn loading(start_point: Url) -> Self {
        Self {
            mode: LaunchMode::Checking,
            content: Content::Surface { start_point, visible: false },
            loading_overlay: true,
        }
    }

    /// Whether the native interface is on screen.
    pub fn is_native(&self) -> bool {
        matches!(self.content, Content::Native)
    }
}
