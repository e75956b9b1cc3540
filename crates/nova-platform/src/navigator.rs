//! Hash-based navigation (`#/dashboard`, `#/login`, ...).

use std::cell::Cell;
use nova_core::ports::NavigatorPort;
use nova_types::event::Route;

pub struct HashNavigator {
    last: Cell<Route>,
}

impl HashNavigator {
    /// Start from whatever route the page was opened on.
    pub fn new() -> Self {
        Self {
            last: Cell::new(read_hash().unwrap_or_default()),
        }
    }
}

impl Default for HashNavigator {
    fn default() -> Self {
        Self::new()
    }
}

fn read_hash() -> Option<Route> {
    let hash = gloo_utils::window().location().hash().ok()?;
    Route::from_path(&hash)
}

impl NavigatorPort for HashNavigator {
    fn navigate(&self, route: Route) {
        self.last.set(route);
        if let Err(e) = gloo_utils::window().location().set_hash(route.path()) {
            log::warn!("Could not update location hash: {:?}", e);
        }
    }

    /// The hash wins if the user edited it by hand.
    fn current(&self) -> Route {
        read_hash().unwrap_or_else(|| self.last.get())
    }
}
