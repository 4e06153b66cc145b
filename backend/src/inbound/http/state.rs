//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::RobotCatalogueService;
use crate::domain::ports::{RobotRepository, RobotsCommand, RobotsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub robots_query: Arc<dyn RobotsQuery>,
    pub robots_command: Arc<dyn RobotsCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(robots_query: Arc<dyn RobotsQuery>, robots_command: Arc<dyn RobotsCommand>) -> Self {
        Self {
            robots_query,
            robots_command,
        }
    }

    /// Serve both ports from one catalogue service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use robots_backend::domain::RobotCatalogueService;
    /// use robots_backend::inbound::http::state::HttpState;
    /// use robots_backend::outbound::memory::InMemoryRobotRepository;
    ///
    /// let service = RobotCatalogueService::new(Arc::new(InMemoryRobotRepository::new()));
    /// let _state = HttpState::from_service(service);
    /// ```
    pub fn from_service<R>(service: RobotCatalogueService<R>) -> Self
    where
        R: RobotRepository + ?Sized + 'static,
    {
        let service = Arc::new(service);
        Self {
            robots_query: service.clone(),
            robots_command: service,
        }
    }
}
