/// Quick link controller: keeps the saved collection and the injected chips in step
///
/// Every page interaction arrives as a [`PageEvent`] and is handled to
/// completion before the next one starts, so same-page operations never
/// interleave. Tabs sharing the profile still race on read-modify-write;
/// the storage service has no compare-and-swap to prevent that.

use crate::analytics::EventReporter;
use crate::config::ContentConfig;
use crate::error::ControllerError;
use crate::language_pair::LanguagePair;
use crate::operations::{append_unique, remove_pair};
use crate::storage::{ItemStore, KeyValueStore};
use std::cell::RefCell;

/// Host page collaborator. The DOM implementation lives in `ui::dom`.
pub trait PageView {
    /// Current document URL
    fn current_url(&self) -> Option<String>;

    /// Load `url` (the host router decides between same-document and full navigation)
    fn navigate(&self, url: &str);

    /// Replace the chip container with one built from `items`.
    /// Fails with `MissingAnchor` when the page has no landmark to attach to.
    fn mount(&self, items: &[LanguagePair]) -> Result<(), ControllerError>;

    /// User-visible notice
    fn notify(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Document finished loading (or already had when the script started)
    Ready,
    /// Same-document navigation replaced the page content
    Navigated,
    /// Save the pair in the current URL
    Save,
    /// Switch the page to a saved pair
    Select(LanguagePair),
    /// Delete a saved pair
    Remove(LanguagePair),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Uninitialized,
    Rendered,
}

/// Per-page state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub render: RenderState,
    /// Collection as of the last successful render
    pub items: Vec<LanguagePair>,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            render: RenderState::Uninitialized,
            items: Vec::new(),
        }
    }
}

pub struct SyncController<S, P, R> {
    store: ItemStore<S>,
    page: P,
    reporter: R,
    config: ContentConfig,
    state: RefCell<AppState>,
}

impl<S: KeyValueStore, P: PageView, R: EventReporter> SyncController<S, P, R> {
    pub fn new(store: S, page: P, reporter: R, config: ContentConfig) -> Self {
        SyncController {
            store: ItemStore::new(store, &config.storage_key),
            page,
            reporter,
            config,
            state: RefCell::new(AppState::default()),
        }
    }

    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Save `candidate` unless the same `(sl, tl)` is already stored
    pub async fn add_item(&self, candidate: LanguagePair) -> Result<(), ControllerError> {
        let items = self.store.get_items().await?;
        let items = append_unique(items, candidate)?;
        self.store.set_items(&items).await?;
        Ok(())
    }

    /// Delete every stored entry equal to `target`; returns how many went
    pub async fn remove_item(&self, target: &LanguagePair) -> Result<usize, ControllerError> {
        let items = self.store.get_items().await?;
        let (items, removed) = remove_pair(items, target);
        self.store.set_items(&items).await?;
        Ok(removed)
    }

    /// Rebuild the chip container from the stored collection
    pub async fn render(&self) -> Result<(), ControllerError> {
        let items = self.store.get_items().await?;
        self.page.mount(&items)?;

        let mut state = self.state.borrow_mut();
        state.items = items;
        state.render = RenderState::Rendered;
        Ok(())
    }

    /// Save the pair named by the current URL's query parameters
    pub async fn save_current(&self) -> Result<LanguagePair, ControllerError> {
        let candidate = self
            .page
            .current_url()
            .and_then(|url| LanguagePair::from_url(&url))
            .unwrap_or(LanguagePair { sl: None, tl: None });

        self.add_item(candidate.clone()).await?;
        Ok(candidate)
    }

    /// Page boundary: runs one event. Failed saves and removals become
    /// notices; renders only log, since they run on every navigation.
    pub async fn handle(&self, event: PageEvent) {
        log::debug!("Handling {:?}", event);

        match event {
            PageEvent::Ready | PageEvent::Navigated => {
                self.rerender().await;
            }
            PageEvent::Save => {
                match self.save_current().await {
                    Ok(pair) => self.track("save", &pair),
                    Err(e) => self.report_failure("save", e),
                }
                self.rerender().await;
            }
            PageEvent::Remove(pair) => {
                match self.remove_item(&pair).await {
                    Ok(_) => self.track("remove", &pair),
                    Err(e) => self.report_failure("remove", e),
                }
                self.rerender().await;
            }
            PageEvent::Select(pair) => {
                let Some(url) = self.page.current_url().and_then(|url| pair.apply_to_url(&url)) else {
                    log::warn!("Cannot rewrite current URL for {}", pair.label());
                    return;
                };
                self.track("select", &pair);
                self.page.navigate(&url);
            }
        }
    }

    async fn rerender(&self) {
        match self.render().await {
            Ok(()) => {}
            Err(ControllerError::MissingAnchor) => {
                log::debug!("Skipping render: navigation landmark not found");
            }
            Err(e) => log::error!("Error during render: {}", e),
        }
    }

    fn report_failure(&self, operation: &str, error: ControllerError) {
        match &error {
            ControllerError::MissingAnchor => {
                log::debug!("Skipping {}: {}", operation, error);
            }
            ControllerError::DuplicateItem(pair) => {
                log::info!("Not saving {}: already exists", pair.label());
                self.page.notify(&format!("{} is already saved", pair.label()));
            }
            ControllerError::Dom(e) => {
                log::error!("Error during {}: {}", operation, e);
            }
            ControllerError::Storage(e) => {
                log::error!("Error during {}: {}", operation, e);
                self.page.notify(&format!("Could not {} quick links: {}", operation, e));
            }
        }
    }

    fn track(&self, action: &str, pair: &LanguagePair) {
        self.reporter.report(
            &self.config.analytics_category,
            &format!("{}:{}", action, pair.label()),
        );
    }
}
