use std::collections::{HashMap, HashSet, VecDeque};

use broker_types::{Config, Request, RequestId, ResourceStats};

use crate::error::{QueueError, Result};

/// What to reply to a `request` message, decided by [`AdmissionState::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
	Admitted(RequestId),
	Queued(RequestId),
	Invalid(RequestId),
}

/// Owns every piece of mutable broker state named in the data model: the
/// config, per-resource running totals, the FIFO wait queue, the granted
/// set, and the pending-grant set. Pure logic, no I/O — meant to be driven
/// synchronously from inside a single owner (the admission-engine actor),
/// matching the "no locks required" guarantee: nothing here is `Sync` and
/// nothing needs to be.
#[derive(Debug)]
pub struct AdmissionState {
	config: Config,
	stats: HashMap<String, ResourceStats>,
	wait_queue: VecDeque<Request>,
	granted: HashMap<RequestId, Request>,
	pending_grant: HashSet<RequestId>,
	next_id: RequestId,
}

impl AdmissionState {
	#[must_use]
	pub fn new(config: Config) -> Self {
		Self {
			config,
			stats: HashMap::new(),
			wait_queue: VecDeque::new(),
			granted: HashMap::new(),
			pending_grant: HashSet::new(),
			next_id: 0,
		}
	}

	#[must_use]
	pub fn config(&self) -> Config {
		self.config
	}

	#[must_use]
	pub fn stats_for(&self, resource: &str) -> ResourceStats {
		self.stats.get(resource).copied().unwrap_or_default()
	}

	#[must_use]
	pub fn is_pending_grant(&self, id: RequestId) -> bool {
		self.pending_grant.contains(&id)
	}

	#[must_use]
	pub fn is_granted(&self, id: RequestId) -> bool {
		self.granted.contains_key(&id)
	}

	#[must_use]
	pub fn pending_grant_ids(&self) -> Vec<RequestId> {
		self.pending_grant.iter().copied().collect()
	}

	#[must_use]
	pub fn has_pending_grants(&self) -> bool {
		!self.pending_grant.is_empty()
	}

	/// A request can never be admitted under the current config regardless of
	/// current usage — distinct from momentary capacity exhaustion.
	#[must_use]
	pub fn is_valid(&self, resource: &str, read: bool, numopts: u64, datasize: u64) -> bool {
		let _ = resource;
		let (reqs_ceiling, data_ceiling) = self.config.ceiling_for(read);
		numopts <= reqs_ceiling && datasize <= data_ceiling
	}

	/// True iff committing `(numopts, datasize)` against `resource` keeps all
	/// four of that resource's counters within the config ceilings.
	#[must_use]
	pub fn admissible(&self, resource: &str, read: bool, numopts: u64, datasize: u64) -> bool {
		let current = self.stats_for(resource);
		current.projected(read, numopts, datasize).within(&self.config)
	}

	/// Handle a `request` message: assign an id, decide invalid / admit /
	/// queue, and mutate state accordingly.
	pub fn submit(&mut self, resource: String, read: bool, numopts: u64, datasize: u64) -> Admission {
		let id = self.next_id;
		self.next_id += 1;

		if !self.is_valid(&resource, read, numopts, datasize) {
			return Admission::Invalid(id);
		}

		let request = Request {
			id,
			resource: resource.clone(),
			read,
			numopts,
			datasize,
			priority: 0,
		};

		if self.admissible(&resource, read, numopts, datasize) {
			self.commit(&request);
			self.granted.insert(id, request);
			Admission::Admitted(id)
		} else {
			self.wait_queue.push_back(request);
			Admission::Queued(id)
		}
	}

	fn commit(&mut self, request: &Request) {
		self.stats.entry(request.resource.clone()).or_default().add(request.read, request.numopts, request.datasize);
	}

	/// Handle a `hold` message: acknowledge a previously-published grant.
	pub fn hold(&mut self, id: RequestId) -> Result<()> {
		if self.pending_grant.remove(&id) {
			Ok(())
		} else {
			Err(QueueError::UnknownPendingGrant { id })
		}
	}

	/// Handle a `release` message: free the resource, then drain the wait
	/// queue. Returns the ids newly granted by the drain, in the order they
	/// should be published on `PUB_EP`.
	pub fn release(&mut self, id: RequestId) -> Result<Vec<RequestId>> {
		let request = self.granted.remove(&id).ok_or(QueueError::UnknownGranted { id })?;
		if let Some(stats) = self.stats.get_mut(&request.resource) {
			stats.subtract(request.read, request.numopts, request.datasize);
		}
		Ok(self.drain())
	}

	/// Replace the active config and attempt a drain under the new ceilings.
	/// Already-granted holds are never revoked.
	pub fn reconfigure(&mut self, config: Config) -> Vec<RequestId> {
		self.config = config;
		self.drain()
	}

	/// Strict FIFO drain: repeatedly test the head of the wait queue. Stop at
	/// the first waiter that doesn't fit, even if a later one would.
	fn drain(&mut self) -> Vec<RequestId> {
		let mut granted_ids = Vec::new();
		while let Some(request) = self.wait_queue.pop_front() {
			if self.admissible(&request.resource, request.read, request.numopts, request.datasize) {
				self.commit(&request);
				let id = request.id;
				self.granted.insert(id, request);
				self.pending_grant.insert(id);
				granted_ids.push(id);
			} else {
				self.wait_queue.push_front(request);
				break;
			}
		}
		granted_ids
	}

	#[must_use]
	pub fn wait_queue_len(&self) -> usize {
		self.wait_queue.len()
	}

	#[must_use]
	pub fn wait_queue_ids(&self) -> Vec<RequestId> {
		self.wait_queue.iter().map(|r| r.id).collect()
	}
}
