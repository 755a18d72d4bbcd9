//! Shared-secret check for identity provider hooks and scheduled jobs.

use std::{fmt, sync::Arc};

use salvo::prelude::*;

use crate::{extensions::*, state::State};

pub(crate) const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Secret callers of webhook routes must present.
#[derive(Clone)]
pub(crate) struct WebhookSecret(Arc<str>);

impl WebhookSecret {
    pub(crate) fn new(secret: &str) -> Self {
        Self(Arc::from(secret))
    }

    /// Compare without short-circuiting on the first differing byte.
    pub(crate) fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();

        if expected.is_empty() || expected.len() != candidate.len() {
            return false;
        }

        expected
            .iter()
            .zip(candidate)
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(<redacted>)")
    }
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let presented = req.header::<String>(WEBHOOK_SECRET_HEADER);

    if !presented.is_some_and(|secret| state.webhook_secret.matches(&secret)) {
        res.render(StatusError::unauthorized().brief("Missing or invalid webhook secret"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_WEBHOOK_SECRET, state_with};

    use super::*;

    #[salvo::handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with(Mocks::strict())))
                .hoop(handler)
                .push(Router::new().post(ok)),
        )
    }

    #[test]
    fn secret_comparison() {
        let secret = WebhookSecret::new("s3cret");

        assert!(secret.matches("s3cret"), "identical secret");
        assert!(!secret.matches("s3creT"), "different byte");
        assert!(!secret.matches("s3cret-longer"), "different length");
        assert!(!secret.matches(""), "empty candidate");
        assert!(!WebhookSecret::new("").matches(""), "empty secret never matches");
    }

    #[test]
    fn debug_output_is_redacted() {
        let rendered = format!("{:?}", WebhookSecret::new("s3cret"));

        assert!(!rendered.contains("s3cret"), "secret leaked: {rendered}");
    }

    #[tokio::test]
    async fn test_missing_secret_returns_401() -> TestResult {
        let res = TestClient::post("http://example.com")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_secret_returns_401() -> TestResult {
        let res = TestClient::post("http://example.com")
            .add_header(WEBHOOK_SECRET_HEADER, "guess", true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_matching_secret_passes_through() -> TestResult {
        let res = TestClient::post("http://example.com")
            .add_header(WEBHOOK_SECRET_HEADER, TEST_WEBHOOK_SECRET, true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
