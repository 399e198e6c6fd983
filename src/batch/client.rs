//! Clients that submit markup for optimization.

use std::time::Duration;

use url::Url;

use crate::optimize::{OptimizationOutcome, OptimizeError, RuleSet};
use crate::server::{HealthResponse, OptimizationService, OptimizeRequest};

/// Something that can optimize one markup string.
pub trait OptimizeClient {
    /// Optimize `svg` under the server baseline merged with `rules`.
    ///
    /// `Ok` always carries a successful outcome with data.
    fn optimize(&self, svg: &str, rules: Option<&RuleSet>) -> Result<OptimizationOutcome, OptimizeError>;

    /// Verify the optimizer is reachable before a run.
    fn check_health(&self) -> Result<(), OptimizeError> {
        Ok(())
    }
}

/// Client for a running optimization server.
pub struct HttpClient {
    agent: ureq::Agent,
    url: String,
}

impl HttpClient {
    /// Client for the optimize endpoint at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(Duration::from_secs(5)))
            .build()
            .into();
        Self {
            agent,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `/health` on the same origin as the optimize endpoint.
    pub fn health_url(&self) -> Result<String, OptimizeError> {
        let base = Url::parse(&self.url).map_err(|e| self.unreachable(format!("invalid URL: {e}")))?;
        let health = base
            .join("/health")
            .map_err(|e| self.unreachable(format!("invalid URL: {e}")))?;
        Ok(health.into())
    }

    fn unreachable(&self, reason: impl Into<String>) -> OptimizeError {
        OptimizeError::OptimizerUnavailable {
            url: self.url.clone(),
            reason: reason.into(),
        }
    }

    fn classify(&self, err: ureq::Error) -> OptimizeError {
        match err {
            ureq::Error::Io(_)
            | ureq::Error::ConnectionFailed
            | ureq::Error::HostNotFound
            | ureq::Error::Timeout(_) => self.unreachable(err.to_string()),
            other => OptimizeError::failure(format!("request to {} failed: {other}", self.url)),
        }
    }
}

impl OptimizeClient for HttpClient {
    fn optimize(&self, svg: &str, rules: Option<&RuleSet>) -> Result<OptimizationOutcome, OptimizeError> {
        let body = OptimizeRequest {
            svg_string: Some(svg.to_string()),
            config: rules.cloned(),
        };
        let mut resp = self
            .agent
            .post(self.url.as_str())
            .send_json(&body)
            .map_err(|e| self.classify(e))?;

        let status = resp.status().as_u16();
        let outcome: OptimizationOutcome = resp.body_mut().read_json().map_err(|e| {
            OptimizeError::failure(format!(
                "unexpected response from optimization server (HTTP {status}): {e}"
            ))
        })?;

        interpret_response(status, outcome)
    }

    fn check_health(&self) -> Result<(), OptimizeError> {
        let url = self.health_url()?;
        let mut resp = self.agent.get(url.as_str()).call().map_err(|e| self.classify(e))?;
        let status = resp.status().as_u16();
        match resp.body_mut().read_json::<HealthResponse>() {
            Ok(health) if status == 200 && health.status == "ok" => Ok(()),
            Ok(health) => Err(self.unreachable(format!("health check answered {status} {}", health.status))),
            Err(e) => Err(self.unreachable(format!("health check answered {status}: {e}"))),
        }
    }
}

/// Map an HTTP status and decoded body to the client contract.
fn interpret_response(status: u16, outcome: OptimizationOutcome) -> Result<OptimizationOutcome, OptimizeError> {
    if (200..300).contains(&status) && outcome.markup().is_some() {
        return Ok(outcome);
    }
    let message = outcome
        .error
        .clone()
        .unwrap_or_else(|| format!("optimization server answered HTTP {status}"));
    if status == 400 {
        return Err(OptimizeError::InvalidInputShape(message));
    }
    Err(OptimizeError::OptimizerFailure {
        message,
        diagnostic: if outcome.success { None } else { outcome.data },
    })
}

/// Client that calls the optimization service in-process.
pub struct LocalClient {
    service: OptimizationService,
}

impl LocalClient {
    pub fn new(service: OptimizationService) -> Self {
        Self { service }
    }
}

impl OptimizeClient for LocalClient {
    fn optimize(&self, svg: &str, rules: Option<&RuleSet>) -> Result<OptimizationOutcome, OptimizeError> {
        self.service.optimize(Some(svg), rules)
    }
}
