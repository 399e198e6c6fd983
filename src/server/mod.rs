//! SVG optimization server.
//!
//! A single dispatcher thread drains `tiny_http`'s request queue and runs
//! each handler to completion, so handlers share nothing mutable.
//!
//! # Lifecycle
//!
//! ```text
//! Stopped ──start()──► Starting ──bound──► Listening ──stop()──► Stopping ──► Stopped
//!                          └──address in use──► Stopped
//! ```

mod protocol;
mod response;
mod routes;
mod service;

pub use protocol::{
    BatchFile, BatchRequest, BatchResponse, BatchResult, HealthResponse, OptimizeRequest,
    PluginsResponse,
};
pub use service::OptimizationService;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tiny_http::Server;

use crate::log;

/// Server lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Stopped,
    Starting,
    Listening,
    Stopping,
}

#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address is already bound, by this or another server.
    #[error("Port {port} is already in use")]
    PortInUse { port: u16 },

    #[error("failed to bind {addr}: {message}")]
    Bind { addr: SocketAddr, message: String },

    #[error("failed to spawn server thread")]
    Io(#[from] io::Error),
}

/// Listening socket and its dispatcher.
struct Running {
    server: Arc<Server>,
    local_addr: SocketAddr,
    handle: JoinHandle<()>,
}

/// Owned handle to one optimization server.
///
/// Dropping the handle stops the server.
pub struct OptimizationServer {
    service: OptimizationService,
    addr: SocketAddr,
    state: ServerState,
    running: Option<Running>,
}

impl OptimizationServer {
    pub fn new(service: OptimizationService, addr: SocketAddr) -> Self {
        Self {
            service,
            addr,
            state: ServerState::Stopped,
            running: None,
        }
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ServerState::Listening
    }

    /// Bound address while listening. Resolves port 0 to the real port.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.local_addr)
    }

    /// Port in use, or the configured one when stopped.
    pub fn port(&self) -> u16 {
        self.local_addr().unwrap_or(self.addr).port()
    }

    /// Bind and start dispatching.
    ///
    /// Fails with [`ServerError::PortInUse`] when already listening (state
    /// stays `Listening`) or when the address is bound elsewhere (state
    /// returns to `Stopped`).
    pub fn start(&mut self) -> Result<SocketAddr, ServerError> {
        if let Some(running) = &self.running {
            return Err(ServerError::PortInUse {
                port: running.local_addr.port(),
            });
        }

        self.state = ServerState::Starting;
        match self.spawn() {
            Ok(running) => {
                let addr = running.local_addr;
                self.running = Some(running);
                self.state = ServerState::Listening;
                log!("serve"; "http://{}", addr);
                Ok(addr)
            }
            Err(e) => {
                self.state = ServerState::Stopped;
                Err(e)
            }
        }
    }

    fn spawn(&self) -> Result<Running, ServerError> {
        let server = Server::http(self.addr).map_err(|e| bind_error(self.addr, e.as_ref()))?;
        let local_addr = server.server_addr().to_ip().unwrap_or(self.addr);
        let server = Arc::new(server);

        let handle = thread::Builder::new().name("svg2tsx-serve".into()).spawn({
            let server = Arc::clone(&server);
            let service = self.service.clone();
            move || run_request_loop(&server, &service)
        })?;

        Ok(Running {
            server,
            local_addr,
            handle,
        })
    }

    /// Stop dispatching and release the socket. No-op when stopped.
    pub fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            self.state = ServerState::Stopped;
            return;
        };

        self.state = ServerState::Stopping;
        running.server.unblock();
        if running.handle.join().is_err() {
            log!("serve"; "dispatcher thread panicked");
        }
        self.state = ServerState::Stopped;
        log!("serve"; "stopped");
    }
}

impl Drop for OptimizationServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn bind_error(addr: SocketAddr, err: &(dyn std::error::Error + Send + Sync + 'static)) -> ServerError {
    match err.downcast_ref::<io::Error>() {
        Some(io) if io.kind() == io::ErrorKind::AddrInUse => ServerError::PortInUse { port: addr.port() },
        _ => ServerError::Bind {
            addr,
            message: err.to_string(),
        },
    }
}

fn run_request_loop(server: &Server, service: &OptimizationService) {
    for request in server.incoming_requests() {
        if let Err(e) = routes::handle_request(request, service) {
            log!("serve"; "request error: {e}");
        }
    }
}
