//! controller.rs: owns the map session and wires filter controls to it.

use tracing::{debug, error, info, warn};

use crate::{
    config::MapConfig,
    filter::{Filter, FilterGroup, FilterUi, UiEvent},
    geo::MapView,
    icon::IconFactory,
    points::{validate_points, PointsSource},
    registry::{FilterOutcome, MarkerRegistry},
    surface::{MapSurface, RenderBackend},
};

/// Everything that lives as long as one map on the page.
#[derive(Debug)]
pub struct MapSession<S> {
    surface: Option<S>,
    registry: MarkerRegistry,
    icons: IconFactory,
    filter: Filter,
}

impl<S: MapSurface> MapSession<S> {
    pub fn new(surface: Option<S>) -> Self {
        Self {
            surface,
            registry: MarkerRegistry::new(),
            icons: IconFactory::new(),
            filter: Filter::All,
        }
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn visible_count(&self) -> usize {
        self.surface
            .as_ref()
            .map_or(0, |s| self.registry.visible_count(s))
    }

    pub fn visible_names(&self) -> Vec<&str> {
        match &self.surface {
            Some(s) => self.registry.visible_names(s),
            None => Vec::new(),
        }
    }

    fn set_filter(&mut self, filter: Filter) -> FilterOutcome {
        self.filter = filter;
        match self.surface.as_mut() {
            Some(s) => self.registry.apply_filter(s, &self.filter),
            None => FilterOutcome::default(),
        }
    }
}

pub struct MapController<B: RenderBackend> {
    session: MapSession<B::Surface>,
    buttons: FilterGroup,
}

impl<B: RenderBackend> MapController<B> {
    /// Create the surface, set its view and lay down the tiles.
    ///
    /// A backend that cannot provide a surface leaves the controller in a
    /// degraded state where every operation is a no-op.
    pub fn new(backend: &B, config: &MapConfig) -> Self {
        let view = MapView {
            center: config.center,
            zoom: config.zoom,
            zoom_control: config.zoom_control,
        };
        let surface = match backend.create_surface(&config.container, view) {
            Ok(mut s) => {
                s.add_tile_layer(&config.tiles);
                Some(s)
            }
            Err(e) => {
                error!(error = %e, container = %config.container, "map disabled");
                None
            }
        };
        Self {
            session: MapSession::new(surface),
            buttons: FilterGroup::default(),
        }
    }

    pub fn session(&self) -> &MapSession<B::Surface> {
        &self.session
    }

    pub fn buttons(&self) -> &FilterGroup {
        &self.buttons
    }

    /// Fetch the feed once and place its points. An unreachable feed means an
    /// empty map, not an error.
    pub fn load(&mut self, source: &dyn PointsSource) -> usize {
        let raw = match source.fetch_points() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "could not load points; showing empty map");
                Vec::new()
            }
        };
        let points = validate_points(raw);
        if points.is_empty() {
            info!(source = %source.describe(), "no points to show");
        }

        let session = &mut self.session;
        let Some(surface) = session.surface.as_mut() else {
            return 0;
        };
        session.registry.initialize(surface, points, &mut session.icons);
        // A filter picked while the feed was loading still applies.
        session.registry.apply_filter(surface, &session.filter);
        info!(markers = session.registry.len(), "map ready");
        session.registry.len()
    }

    /// Take over the filter triggers exposed by `ui`.
    pub fn bind_filters(&mut self, ui: &mut impl FilterUi) {
        self.buttons = FilterGroup::new(ui.filter_tokens());
        self.buttons.sync(ui);
        if let Some(filter) = self.buttons.active_filter() {
            self.session.set_filter(filter);
        }
        debug!(buttons = self.buttons.len(), "filter controls bound");
    }

    pub fn handle(&mut self, event: UiEvent, ui: &mut impl FilterUi) -> FilterOutcome {
        match event {
            UiEvent::FilterActivated(index) => match self.buttons.activate(index) {
                Some(filter) => {
                    self.buttons.sync(ui);
                    self.session.set_filter(filter)
                }
                None => {
                    debug!(index, "ignoring activation of unknown filter control");
                    FilterOutcome::default()
                }
            },
        }
    }

    /// Activate the control carrying `token`, if there is one.
    pub fn activate_token(&mut self, token: &str, ui: &mut impl FilterUi) -> Option<FilterOutcome> {
        let index = self.buttons.position(token)?;
        Some(self.handle(UiEvent::FilterActivated(index), ui))
    }
}
