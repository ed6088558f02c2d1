use tokio::sync::{broadcast, mpsc, oneshot};

use broker_types::{Config, RequestId};

use super::command::{EngineCommand, RequestOutcome};
use super::error::EngineError;

/// Cloneable handle for submitting messages to the admission-engine actor.
/// Every transport connection task holds one of these; none of them ever
/// touch engine state directly.
#[derive(Clone, Debug)]
pub struct EngineHandle {
	commands: mpsc::Sender<EngineCommand>,
	publishes: broadcast::Sender<String>,
}

impl EngineHandle {
	pub(crate) fn new(commands: mpsc::Sender<EngineCommand>, publishes: broadcast::Sender<String>) -> Self {
		Self { commands, publishes }
	}

	/// Subscribe to grant-notification lines for a new `PUB_EP` connection.
	/// Subscribing never goes through the actor — `broadcast::Sender` hands
	/// out receivers independently.
	#[must_use]
	pub fn subscribe_publishes(&self) -> broadcast::Receiver<String> {
		self.publishes.subscribe()
	}

	pub async fn request(&self, resource: String, read: bool, numopts: u64, datasize: u64) -> Result<RequestOutcome, EngineError> {
		let (reply, rx) = oneshot::channel();
		self
			.commands
			.send(EngineCommand::Request {
				resource,
				read,
				numopts,
				datasize,
				reply,
			})
			.await
			.map_err(|_| EngineError::ActorUnavailable)?;
		rx.await.map_err(|_| EngineError::ActorUnavailable)
	}

	pub async fn hold(&self, id: RequestId) -> Result<(), EngineError> {
		let (reply, rx) = oneshot::channel();
		self.commands.send(EngineCommand::Hold { id, reply }).await.map_err(|_| EngineError::ActorUnavailable)?;
		rx.await.map_err(|_| EngineError::ActorUnavailable)?
	}

	pub async fn release(&self, id: RequestId) -> Result<(), EngineError> {
		let (reply, rx) = oneshot::channel();
		self.commands.send(EngineCommand::Release { id, reply }).await.map_err(|_| EngineError::ActorUnavailable)?;
		rx.await.map_err(|_| EngineError::ActorUnavailable)?
	}

	pub async fn set_config(&self, config: Config) -> Result<Config, EngineError> {
		let (reply, rx) = oneshot::channel();
		self.commands.send(EngineCommand::Config { config, reply }).await.map_err(|_| EngineError::ActorUnavailable)?;
		rx.await.map_err(|_| EngineError::ActorUnavailable)
	}

	pub async fn read_config(&self) -> Result<Config, EngineError> {
		let (reply, rx) = oneshot::channel();
		self.commands.send(EngineCommand::ReadConfig { reply }).await.map_err(|_| EngineError::ActorUnavailable)?;
		rx.await.map_err(|_| EngineError::ActorUnavailable)
	}
}
