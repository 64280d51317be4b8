//! Orchestration API backed store.

use super::{EntityRef, EntityStore};
use crate::error::{Error, Result};
use crate::labels::LabelSet;
use crate::patch::PatchDocument;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::api::{Api, Patch, PatchParams};
use kube::Client;
use tracing::debug;

/// KubeStore reads nodes and pods, and patches pods, through a [`Client`].
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        KubeStore { client }
    }

    /// Connects with the inferred configuration: the in-cluster service
    /// account when running in a pod, the local kubeconfig otherwise.
    pub async fn connect() -> Result<Self> {
        let client = Client::try_default()
            .await
            .map_err(|e| Error::Connectivity(format!("cannot configure client: {}", e)))?;
        Ok(KubeStore::new(client))
    }
}

#[async_trait]
impl EntityStore for KubeStore {
    async fn get(&self, entity: &EntityRef) -> Result<LabelSet> {
        debug!(kind = %entity.kind(), entity = %entity, "fetching labels");
        let labels = match entity {
            EntityRef::Node { name } => {
                let nodes: Api<Node> = Api::all(self.client.clone());
                nodes.get(name).await.map_err(|e| read_error(e, entity))?.metadata.labels
            }
            EntityRef::Pod { namespace, name } => {
                let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
                pods.get(name).await.map_err(|e| read_error(e, entity))?.metadata.labels
            }
        };
        Ok(LabelSet::from(labels))
    }

    async fn patch(&self, pod: &EntityRef, document: &PatchDocument) -> Result<()> {
        let EntityRef::Pod { namespace, name } = pod else {
            return Err(Error::Apply(format!("cannot patch {} '{}'", pod.kind(), pod)));
        };
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        pods.patch(name, &PatchParams::default(), &Patch::Merge(document))
            .await
            .map_err(|e| write_error(e, pod))?;
        Ok(())
    }
}

fn read_error(err: kube::Error, entity: &EntityRef) -> Error {
    match err {
        kube::Error::Api(resp) if resp.code == 404 => {
            Error::not_found(entity.kind().as_str(), entity.to_string())
        }
        kube::Error::Api(resp) if resp.code == 401 || resp.code == 403 => {
            Error::Connectivity(format!(
                "unauthorized to read {} '{}': {}",
                entity.kind(),
                entity,
                resp.message
            ))
        }
        other => Error::Connectivity(format!(
            "cannot read {} '{}': {}",
            entity.kind(),
            entity,
            other
        )),
    }
}

fn write_error(err: kube::Error, pod: &EntityRef) -> Error {
    match err {
        kube::Error::Api(resp) if resp.code == 404 => {
            Error::not_found(pod.kind().as_str(), pod.to_string())
        }
        kube::Error::Api(resp) => Error::Apply(format!(
            "{} '{}' rejected patch ({} {}): {}",
            pod.kind(),
            pod,
            resp.code,
            resp.reason,
            resp.message
        )),
        other => Error::Connectivity(format!(
            "cannot patch {} '{}': {}",
            pod.kind(),
            pod,
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api_error(code: u16, reason: &str) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("{} from api server", reason),
            reason: reason.to_string(),
            code,
        })
    }

    fn transport_error() -> kube::Error {
        kube::Error::Service("connection refused".into())
    }

    #[test]
    fn test_read_error_classification() {
        let node = EntityRef::node("worker-1");

        let err = read_error(api_error(404, "NotFound"), &node);
        assert!(matches!(err, Error::NotFound { kind: "node", .. }), "{}", err);

        for code in [401, 403] {
            let err = read_error(api_error(code, "Forbidden"), &node);
            assert!(matches!(err, Error::Connectivity(_)), "{}: {}", code, err);
            assert!(err.to_string().contains("unauthorized"), "{}", err);
        }

        let err = read_error(api_error(500, "InternalError"), &node);
        assert!(matches!(err, Error::Connectivity(_)), "{}", err);

        let err = read_error(transport_error(), &node);
        assert!(matches!(err, Error::Connectivity(_)), "{}", err);
    }

    #[test]
    fn test_write_error_classification() {
        let pod = EntityRef::pod("shop", "web-0");

        let err = write_error(api_error(404, "NotFound"), &pod);
        assert!(matches!(err, Error::NotFound { kind: "pod", .. }), "{}", err);

        for (code, reason) in [(403, "Forbidden"), (409, "Conflict"), (422, "Invalid")] {
            let err = write_error(api_error(code, reason), &pod);
            assert!(matches!(err, Error::Apply(_)), "{}: {}", code, err);
            assert!(err.to_string().contains(reason), "{}", err);
        }

        let err = write_error(transport_error(), &pod);
        assert!(matches!(err, Error::Connectivity(_)), "{}", err);
    }
}
