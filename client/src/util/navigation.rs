//! Location access for code that runs outside the router tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rejection handling fires from inside network callbacks, where router hooks
//! are unavailable, so the session manager navigates through this seam.

/// Reads and changes the current browser location.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// Navigator over `window.location`. Navigation is a full page load.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn navigate(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(path);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    }
}
