//! Mock repositories shared by the service and bootstrap tests

use async_trait::async_trait;
use bytes::Bytes;
use ecs_bootstrap_client::{AgentResponse, ClientError, Result};
use ecs_bootstrap_core::domain::task::{Placement, PlacementFailure, StartTask, TaskHandle};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::repository::{AgentRepository, TaskRepository, TaskRepositoryFactory};

pub const INSTANCE_ARN: &str =
    "arn:aws:ecs:us-east-1:123456789012:container-instance/60693afc-e694-4da9-92d6-c27dcb27d182";

pub const CLUSTER: &str = "ecs-cluster-testing";

pub fn valid_metadata() -> String {
    format!(r#"{{"ContainerInstanceArn":"{INSTANCE_ARN}","Cluster":"{CLUSTER}"}}"#)
}

type Reply<T> = Box<dyn Fn(u32) -> Result<T> + Send + Sync>;

/// Agent whose replies are computed from the 1-based call number
pub struct MockAgent {
    reply: Reply<AgentResponse>,
    calls: AtomicU32,
}

impl MockAgent {
    pub fn new(reply: impl Fn(u32) -> Result<AgentResponse> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            calls: AtomicU32::new(0),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self::new(move |_| Ok(AgentResponse::new(status, futures::stream::empty())))
    }

    pub fn with_chunks(chunks: &[&'static str]) -> Self {
        let chunks = chunks.to_vec();
        Self::new(move |_| Ok(chunked(200, &chunks)))
    }

    pub fn with_stream_error(message: &'static str) -> Self {
        Self::new(move |_| {
            let body = vec![
                Ok(Bytes::from_static(b"{\"Clus")),
                Err(ClientError::Stream(message.to_string())),
            ];
            Ok(AgentResponse::new(200, futures::stream::iter(body)))
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn chunked(status: u16, chunks: &[&'static str]) -> AgentResponse {
    let body: Vec<Result<Bytes>> = chunks
        .iter()
        .copied()
        .map(|chunk| Ok(Bytes::from_static(chunk.as_bytes())))
        .collect();
    AgentResponse::new(status, futures::stream::iter(body))
}

#[async_trait]
impl AgentRepository for MockAgent {
    async fn get_metadata(&self) -> Result<AgentResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        (self.reply)(call)
    }
}

/// Orchestrator that records every call
pub struct MockTasks {
    region: String,
    start: Reply<Placement>,
    wait: Reply<()>,
    pub started: Mutex<Vec<StartTask>>,
    pub waited: Mutex<Vec<(TaskHandle, String)>>,
}

impl MockTasks {
    pub fn new(
        start: impl Fn(u32) -> Result<Placement> + Send + Sync + 'static,
        wait: impl Fn(u32) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            region: "us-east-1".to_string(),
            start: Box::new(start),
            wait: Box::new(wait),
            started: Mutex::new(Vec::new()),
            waited: Mutex::new(Vec::new()),
        }
    }

    /// Places `task` on every call and confirms it
    pub fn running(task: &'static str) -> Self {
        Self::new(move |_| Ok(placed(task)), |_| Ok(()))
    }

    pub fn start_calls(&self) -> usize {
        self.started.lock().unwrap().len()
    }

    pub fn wait_calls(&self) -> usize {
        self.waited.lock().unwrap().len()
    }
}

pub fn placed(task: &str) -> Placement {
    Placement {
        tasks: vec![TaskHandle::new(task)],
        failures: vec![],
    }
}

pub fn rejected(reason: &str) -> Placement {
    Placement {
        tasks: vec![],
        failures: vec![PlacementFailure {
            arn: Some(INSTANCE_ARN.to_string()),
            reason: Some(reason.to_string()),
        }],
    }
}

#[async_trait]
impl TaskRepository for MockTasks {
    fn region(&self) -> &str {
        &self.region
    }

    async fn start_task(&self, request: &StartTask) -> Result<Placement> {
        let call = {
            let mut started = self.started.lock().unwrap();
            started.push(request.clone());
            started.len() as u32
        };
        (self.start)(call)
    }

    async fn wait_until_running(&self, task: &TaskHandle, cluster: &str) -> Result<()> {
        let call = {
            let mut waited = self.waited.lock().unwrap();
            waited.push((task.clone(), cluster.to_string()));
            waited.len() as u32
        };
        (self.wait)(call)
    }
}

/// Factory handing out one shared mock and recording requested regions
pub struct RecordingFactory {
    tasks: Arc<MockTasks>,
    pub regions: Mutex<Vec<String>>,
}

impl RecordingFactory {
    pub fn new(tasks: Arc<MockTasks>) -> Self {
        Self {
            tasks,
            regions: Mutex::new(Vec::new()),
        }
    }

    pub fn regions(&self) -> Vec<String> {
        self.regions.lock().unwrap().clone()
    }
}

impl TaskRepositoryFactory for RecordingFactory {
    fn for_region(&self, region: &str) -> Arc<dyn TaskRepository> {
        self.regions.lock().unwrap().push(region.to_string());
        self.tasks.clone()
    }
}
