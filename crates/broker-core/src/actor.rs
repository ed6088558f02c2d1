pub mod command;
pub mod error;
pub mod handle;

pub use command::{EngineCommand, RequestOutcome};
pub use error::EngineError;
pub use handle::EngineHandle;

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use broker_queue::{Admission, AdmissionState};
use broker_types::{Config, RequestId};

/// Re-publish interval for unacknowledged grants (§6c, GLOSSARY).
pub const PUBDELAY: Duration = Duration::from_millis(2000);

const COMMAND_BUFFER: usize = 256;
const PUBLISH_BUFFER: usize = 256;

fn publish_line(id: RequestId) -> String {
	format!("{id} 1")
}

/// The admission-engine actor: owns the one and only [`AdmissionState`] and
/// serializes every mutation to it behind `commands`. This is the single
/// loop described in §5 — no other task ever reads or writes `state`.
pub struct AdmissionEngine {
	state: AdmissionState,
	commands: mpsc::Receiver<EngineCommand>,
	publishes: broadcast::Sender<String>,
}

impl AdmissionEngine {
	/// Construct the engine and spawn its loop onto the current runtime,
	/// returning a cloneable handle for transport tasks to talk to it.
	pub fn spawn(config: Config) -> EngineHandle {
		let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
		let (publish_tx, _) = broadcast::channel(PUBLISH_BUFFER);

		let engine = Self {
			state: AdmissionState::new(config),
			commands: command_rx,
			publishes: publish_tx.clone(),
		};

		tokio::spawn(engine.run());

		EngineHandle::new(command_tx, publish_tx)
	}

	/// Run the event loop until every [`EngineHandle`] has been dropped.
	///
	/// Mirrors §4.3 step 1 exactly: block indefinitely on the next command
	/// when nothing is pending acknowledgement, otherwise wait at most
	/// `PUBDELAY` and republish every outstanding grant on timeout.
	pub async fn run(mut self) {
		loop {
			if self.state.has_pending_grants() {
				tokio::select! {
					command = self.commands.recv() => {
						match command {
							Some(command) => self.dispatch(command),
							None => break,
						}
					}
					() = tokio::time::sleep(PUBDELAY) => {
						self.republish();
					}
				}
			} else {
				match self.commands.recv().await {
					Some(command) => self.dispatch(command),
					None => break,
				}
			}
		}
		tracing::debug!("admission engine actor shutting down");
	}

	fn dispatch(&mut self, command: EngineCommand) {
		match command {
			EngineCommand::Request {
				resource,
				read,
				numopts,
				datasize,
				reply,
			} => {
				let outcome = self.state.submit(resource.clone(), read, numopts, datasize);
				match outcome {
					Admission::Admitted(id) => {
						tracing::info!(id, resource = %resource, read, "request admitted");
						let _ = reply.send(RequestOutcome::Admitted(id));
					}
					Admission::Queued(id) => {
						tracing::info!(id, resource = %resource, read, "request queued");
						let _ = reply.send(RequestOutcome::Queued(id));
					}
					Admission::Invalid(id) => {
						tracing::warn!(id, resource = %resource, read, numopts, datasize, "request infeasible under current config");
						let _ = reply.send(RequestOutcome::Invalid(id));
					}
				}
			}

			EngineCommand::Hold { id, reply } => {
				let result = self.state.hold(id);
				if let Err(ref error) = result {
					tracing::warn!(id, %error, "hold protocol violation");
				} else {
					tracing::debug!(id, "hold acknowledged");
				}
				let _ = reply.send(result.map_err(EngineError::from));
			}

			EngineCommand::Release { id, reply } => match self.state.release(id) {
				Ok(granted) => {
					tracing::info!(id, "released");
					for granted_id in granted {
						self.publish(granted_id);
					}
					let _ = reply.send(Ok(()));
				}
				Err(error) => {
					tracing::warn!(id, %error, "release protocol violation");
					let _ = reply.send(Err(EngineError::from(error)));
				}
			},

			EngineCommand::Config { config, reply } => {
				tracing::info!(?config, "config replaced");
				let granted = self.state.reconfigure(config);
				for granted_id in granted {
					self.publish(granted_id);
				}
				let _ = reply.send(config);
			}

			EngineCommand::ReadConfig { reply } => {
				let _ = reply.send(self.state.config());
			}
		}
	}

	fn publish(&self, id: RequestId) {
		// A broadcast send fails only when there are no receivers connected
		// to PUB_EP right now; the grant stays in PendingGrant and will be
		// retried on the next PUBDELAY tick regardless.
		let _ = self.publishes.send(publish_line(id));
	}

	fn republish(&self) {
		for id in self.state.pending_grant_ids() {
			self.publish(id);
		}
	}
}
