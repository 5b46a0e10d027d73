use crate::wire::HealthRes;

/// Health service shared by the standalone REST binary and the workspace runner.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Report liveness.
    ///
    /// The triage core is pure and the model is only reached per request, so liveness does not
    /// depend on the model endpoint being up.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Triage assistant is alive".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_alive() {
        let res = HealthService::check_health();
        assert!(res.ok);
        assert!(res.message.contains("alive"));
    }
}
