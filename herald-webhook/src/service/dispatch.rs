//! Dispatch entry points
//!
//! Turns one inbound event into one submission: normalize, resolve the
//! template, generate resources, submit. Callers get nothing back; every
//! outcome is reported through the log.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use herald_core::config::DispatchConfig;
use herald_core::event::{EventKind, TriggerEvent};
use herald_core::factory;
use herald_core::normalize::normalize;

use crate::backend::PipelineBackend;
use crate::service::error::DispatchError;
use crate::service::resolver;
use crate::service::submitter::{self, SubmissionReport};

/// Stateless dispatcher shared by all request handlers
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn PipelineBackend>,
    config: Arc<DispatchConfig>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn PipelineBackend>, config: DispatchConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }

    /// Handle a webhook event
    ///
    /// `classification` is the raw event header value, if the request had one.
    pub async fn dispatch(&self, classification: Option<&str>, payload: &[u8]) {
        let result = self.try_dispatch(classification, payload, Utc::now()).await;
        report(result);
    }

    /// Handle a manually submitted build request
    pub async fn dispatch_manual(&self, payload: &[u8]) {
        let result = self.try_dispatch_manual(payload, Utc::now()).await;
        report(result);
    }

    pub(crate) async fn try_dispatch(
        &self,
        classification: Option<&str>,
        payload: &[u8],
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReport, DispatchError> {
        let kind = EventKind::classify(classification)?;
        tracing::debug!("Handling a {} event...", kind);

        let event = TriggerEvent::decode(kind, payload)?;
        self.process(&event, submitted_at).await
    }

    pub(crate) async fn try_dispatch_manual(
        &self,
        payload: &[u8],
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReport, DispatchError> {
        tracing::debug!("Handling a manual build request...");

        let event = TriggerEvent::decode_manual(payload)?;
        self.process(&event, submitted_at).await
    }

    /// Run a decoded event through the submission flow
    pub async fn process(
        &self,
        event: &TriggerEvent,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReport, DispatchError> {
        let coordinate = normalize(event, submitted_at)?;
        tracing::debug!(
            "Build information for repository {}:{} ({} event, revision {}, timestamp {})",
            coordinate.repository_url,
            coordinate.short_id,
            event.label(),
            coordinate.commit_id,
            coordinate.timestamp
        );

        let template = resolver::resolve(
            self.backend.as_ref(),
            &self.config.template_name,
            &self.config.template_namespace,
        )
        .await?;

        let resources = factory::build_resources(&self.config, &coordinate);

        submitter::submit(
            self.backend.as_ref(),
            &self.config,
            &coordinate,
            &template,
            &resources,
        )
        .await
    }
}

fn report(result: Result<SubmissionReport, DispatchError>) {
    match result {
        Ok(report) if report.image_created && report.source_created => {
            tracing::info!("Submitted PipelineRun {}", report.run_name);
        }
        Ok(report) => {
            tracing::warn!(
                "Submitted PipelineRun {} with missing resources (image created: {}, source created: {})",
                report.run_name,
                report.image_created,
                report.source_created
            );
        }
        Err(err @ DispatchError::RunCreationFailed { .. }) if collided(&err) => {
            tracing::error!(
                "Submission did not complete: {} (an earlier submission in the same second already used these names)",
                err
            );
        }
        Err(DispatchError::MalformedEvent(err)) => {
            tracing::error!("No action will be taken for this event: {}", err);
        }
        Err(err) => {
            tracing::error!("Submission did not complete: {}", err);
        }
    }
}

fn collided(err: &DispatchError) -> bool {
    matches!(err, DispatchError::RunCreationFailed { source, .. } if source.is_already_exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingBackend};
    use chrono::TimeZone;
    use herald_core::NamingPolicy;
    use herald_core::domain::resource::ResourceKind;
    use herald_core::domain::run::{DOCKER_IMAGE_ROLE, GIT_SOURCE_ROLE, TriggerType};

    const PUSH: &[u8] = br#"{
        "ref": "refs/heads/main",
        "repository": { "name": "app", "url": "https://git.example/org/app" },
        "head_commit": { "id": "abcdef1234567" }
    }"#;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn dispatcher(backend: &Arc<RecordingBackend>) -> Dispatcher {
        Dispatcher::new(backend.clone(), DispatchConfig::new("registry.local:5000"))
    }

    #[tokio::test]
    async fn test_push_event_end_to_end() {
        let backend = Arc::new(RecordingBackend::new());
        let report = dispatcher(&backend)
            .try_dispatch(Some("push"), PUSH, at(1_700_000_000))
            .await
            .unwrap();

        assert_eq!(report.run_name, "devops-pipeline-run-1700000000");

        let resources = backend.resources();
        let image = resources.iter().find(|r| r.kind == ResourceKind::Image).unwrap();
        assert_eq!(image.name, "docker-image-1700000000");
        assert_eq!(image.param("url"), Some("registry.local:5000/app:abcdef1"));

        let source = resources.iter().find(|r| r.kind == ResourceKind::Git).unwrap();
        assert_eq!(source.name, "git-source-1700000000");
        assert_eq!(source.param("revision"), Some("abcdef1234567"));
        assert_eq!(source.param("url"), Some("https://git.example/org/app"));

        let run = &backend.runs()[0];
        assert_eq!(run.trigger, TriggerType::Manual);
        assert_eq!(
            run.binding(DOCKER_IMAGE_ROLE).map(|r| r.name.as_str()),
            Some(image.name.as_str())
        );
        assert_eq!(
            run.binding(GIT_SOURCE_ROLE).map(|r| r.name.as_str()),
            Some(source.name.as_str())
        );
    }

    #[tokio::test]
    async fn test_template_is_resolved_first() {
        let backend = Arc::new(RecordingBackend::new());
        dispatcher(&backend)
            .try_dispatch(Some("push"), PUSH, at(1))
            .await
            .unwrap();

        assert_eq!(
            backend.calls()[0],
            Call::GetTemplate {
                name: "simple-pipeline".to_string(),
                namespace: "default".to_string(),
            }
        );
        assert_eq!(backend.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_unrecognised_event_makes_no_calls() {
        let backend = Arc::new(RecordingBackend::new());
        let err = dispatcher(&backend)
            .try_dispatch(Some("issue_comment"), PUSH, at(1))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::MalformedEvent(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_header_makes_no_calls() {
        let backend = Arc::new(RecordingBackend::new());
        dispatcher(&backend).dispatch(None, PUSH).await;
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_payload_makes_no_calls() {
        let backend = Arc::new(RecordingBackend::new());
        let err = dispatcher(&backend)
            .try_dispatch(Some("pull_request"), b"{", at(1))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::MalformedEvent(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_template_stops_before_creation() {
        let backend = Arc::new(RecordingBackend::new().without_template());
        let err = dispatcher(&backend)
            .try_dispatch(Some("push"), PUSH, at(1))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::TemplateNotFound { .. }));
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_backend_stops_before_creation() {
        let backend = Arc::new(RecordingBackend::new().unavailable());
        let err = dispatcher(&backend)
            .try_dispatch(Some("push"), PUSH, at(1))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::BackendUnavailable(_)));
        assert_eq!(backend.calls().len(), 1);
        assert!(backend.resources().is_empty());
        assert!(backend.runs().is_empty());
    }

    #[tokio::test]
    async fn test_image_failure_still_attempts_source_and_run() {
        let backend = Arc::new(RecordingBackend::new().failing_resource(ResourceKind::Image));
        let report = dispatcher(&backend)
            .try_dispatch(Some("push"), PUSH, at(1))
            .await
            .unwrap();

        assert!(!report.image_created);
        let calls = backend.calls();
        assert!(matches!(calls[2], Call::CreateResource(ref name) if name.starts_with("git-source-")));
        assert!(matches!(calls[3], Call::CreateRun(_)));
    }

    #[tokio::test]
    async fn test_same_second_submissions_collide() {
        let backend = Arc::new(RecordingBackend::new());
        let dispatcher = dispatcher(&backend);

        dispatcher.try_dispatch(Some("push"), PUSH, at(42)).await.unwrap();
        let second = dispatcher.try_dispatch(Some("push"), PUSH, at(42)).await;

        assert!(matches!(
            second,
            Err(DispatchError::RunCreationFailed { ref source, .. }) if source.is_already_exists()
        ));
        assert_eq!(backend.resources().len(), 2);
        assert_eq!(backend.runs().len(), 1);
    }

    #[tokio::test]
    async fn test_salted_names_avoid_collisions() {
        let backend = Arc::new(RecordingBackend::new());
        let config = DispatchConfig::new("r").with_naming(NamingPolicy::Salted);
        let dispatcher = Dispatcher::new(backend.clone(), config);

        dispatcher.try_dispatch(Some("push"), PUSH, at(42)).await.unwrap();
        dispatcher.try_dispatch(Some("push"), PUSH, at(42)).await.unwrap();

        assert_eq!(backend.resources().len(), 4);
        assert_eq!(backend.runs().len(), 2);
    }

    #[tokio::test]
    async fn test_manual_branch_build() {
        let backend = Arc::new(RecordingBackend::new());
        let body = br#"{"repourl":"https://git.example/org/app","reponame":"app","branch":"main"}"#;
        dispatcher(&backend)
            .try_dispatch_manual(body, at(7))
            .await
            .unwrap();

        let resources = backend.resources();
        let image = resources.iter().find(|r| r.kind == ResourceKind::Image).unwrap();
        assert_eq!(image.param("url"), Some("registry.local:5000/app:latest"));
        let source = resources.iter().find(|r| r.kind == ResourceKind::Git).unwrap();
        assert_eq!(source.param("revision"), Some("main"));
        assert_eq!(backend.runs()[0].trigger, TriggerType::Manual);
    }
}
