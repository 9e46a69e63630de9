//! Lifecycle controller
//!
//! Ties the engine to page transitions. `init` discovers animated elements,
//! applies their parameters and starts watching them; `destroy` releases
//! every watcher and restores the page so a following `init` starts fresh.
//!
//! Initialization runs in two passes:
//!
//! 1. Stagger parents, in document order. Their direct animated children get
//!    staggered delays and are claimed by the group.
//! 2. Every remaining animated element, each on the shared observer for its
//!    threshold.
//!
//! A marker attribute on the root records a completed initialization so that
//! a page-load event and the bootstrap call cannot both initialize.

use inview_dom::{ElementId, Host};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::apply::{apply_animation_properties, clear_animation_properties};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::events::AnimationEvent;
use crate::parse::{attrs, parse_animate_config, parse_stagger_config};
use crate::pool::{WatchState, WatcherPool};

/// What an [`AnimationController::init`] call did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    /// The ready marker was already set; nothing changed
    AlreadyInitialized,
    /// The user prefers reduced motion; `forced` elements were made visible
    /// and nothing is watched
    ReducedMotion { forced: usize },
    /// Watchers are running
    Initialized {
        /// Stagger groups with at least one child
        groups: usize,
        /// Solo elements on shared observers
        elements: usize,
    },
}

/// Owns the watcher pool and drives it through page lifecycles
#[derive(Debug)]
pub struct AnimationController {
    config: EngineConfig,
    pool: WatcherPool,
}

impl AnimationController {
    pub fn new(config: EngineConfig) -> Self {
        let pool = WatcherPool::new(config.animating_class.clone(), config.stagger.threshold);
        Self { config, pool }
    }

    /// Build a controller from a TOML engine config
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(Self::new(EngineConfig::from_toml_str(source)?))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pool(&self) -> &WatcherPool {
        &self.pool
    }

    /// Whether the host carries this controller's ready marker
    pub fn is_initialized<H: Host + ?Sized>(&self, host: &H) -> bool {
        host.has_attribute(host.root(), &self.config.ready_attribute)
    }

    /// Discover, configure and start watching every animated element
    pub fn init<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<InitOutcome> {
        if self.is_initialized(&*host) {
            debug!("animations already initialized");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        if host.prefers_reduced_motion() {
            let forced = force_visible(host)?;
            debug!(forced, "reduced motion preferred, animations disabled");
            return Ok(InitOutcome::ReducedMotion { forced });
        }

        match self.configure(host) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.rollback(host);
                debug!(%err, "animation init failed, rolled back");
                Err(err)
            }
        }
    }

    /// Both configuration passes, then the ready marker
    fn configure<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<InitOutcome> {
        let mut claimed: FxHashSet<ElementId> = FxHashSet::default();
        let mut groups = 0;

        for parent in host.query_all(attrs::STAGGER) {
            let Some(stagger) = parse_stagger_config(&*host, parent, &self.config.stagger) else {
                continue;
            };
            let children = host.children_with_attribute(parent, attrs::ANIMATE);
            let total = children.len();

            for (index, &child) in children.iter().enumerate() {
                let config = parse_animate_config(&*host, child, &self.config.defaults);
                let extra_delay = stagger.delay_for_index(index, total);
                apply_animation_properties(host, child, config.as_ref(), extra_delay)?;
            }

            if self
                .pool
                .register_stagger_group(host, parent, children.iter().copied())?
                .is_some()
            {
                groups += 1;
            }
            claimed.extend(children);
        }

        let mut elements = 0;
        for element in host.query_all(attrs::ANIMATE) {
            if claimed.contains(&element) {
                continue;
            }
            let Some(config) = parse_animate_config(&*host, element, &self.config.defaults) else {
                continue;
            };
            apply_animation_properties(host, element, Some(&config), 0.0)?;
            self.pool.observe(host, element, &config)?;
            elements += 1;
        }

        let root = host.root();
        host.set_attribute(root, &self.config.ready_attribute, "")?;

        debug!(
            groups,
            elements,
            observers = self.pool.observer_count(),
            "animations initialized"
        );
        Ok(InitOutcome::Initialized { groups, elements })
    }

    /// Undo a partial `configure` so a retried init starts from nothing
    ///
    /// Best effort: the host already failed once, so further errors are
    /// logged and skipped.
    fn rollback<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.pool.disconnect_all(host);
        for element in host.query_all(attrs::ANIMATE) {
            if let Err(err) = clear_animation_properties(host, element) {
                tracing::trace!(?element, %err, "rollback skipped element");
            }
        }
    }

    /// Release every watcher and restore all animated elements
    ///
    /// Inline styles forced by the reduced-motion path are left in place.
    pub fn destroy<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let observers = self.pool.observer_count();
        self.pool.disconnect_all(host);

        let mut restored = 0;
        for element in host.query_all(attrs::ANIMATE) {
            host.remove_class(element, &self.config.animating_class)?;
            clear_animation_properties(host, element)?;
            restored += 1;
        }

        let root = host.root();
        host.remove_attribute(root, &self.config.ready_attribute)?;

        debug!(observers, restored, "animations destroyed");
        Ok(())
    }

    /// Initialize on a load that no navigation event announced
    ///
    /// Guarded by the ready marker, so a later [`AnimationEvent::PageLoad`]
    /// for the same page is a no-op.
    pub fn bootstrap<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<InitOutcome> {
        self.init(host)
    }

    /// Dispatch one event from the host
    pub fn handle_event<H: Host + ?Sized>(&mut self, host: &mut H, event: AnimationEvent) -> Result<()> {
        match event {
            AnimationEvent::PageLoad => {
                self.init(host)?;
            }
            AnimationEvent::BeforeSwap => self.destroy(host)?,
            AnimationEvent::Intersection(batch) => self.pool.handle_intersection(host, &batch),
            AnimationEvent::AnimationEnd(element) => {
                if !self.pool.handle_animation_end(host, element) {
                    tracing::trace!(?element, "animation end without armed listener");
                }
            }
        }
        Ok(())
    }

    /// Lifecycle state of an element
    pub fn state<H: Host + ?Sized>(&self, host: &H, element: ElementId) -> WatchState {
        self.pool.state(host, element)
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Make every animated element visible without animating it
fn force_visible<H: Host + ?Sized>(host: &mut H) -> Result<usize> {
    let elements = host.query_all(attrs::ANIMATE);
    for &element in &elements {
        host.set_style_property(element, "opacity", "1")?;
        host.set_style_property(element, "transform", "none")?;
    }
    Ok(elements.len())
}
