use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

use broker_core::AdmissionEngine;
use broker_types::Config;

async fn spawn_broker(config: Config) -> (u16, u16, CancellationToken) {
	loop {
		let req_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let comm_port = req_listener.local_addr().unwrap().port();
		let pub_port = comm_port + 1;

		let Ok(pub_listener) = TcpListener::bind(("127.0.0.1", pub_port)).await else {
			continue;
		};

		let engine_handle = AdmissionEngine::spawn(config);
		let cancel = CancellationToken::new();

		let req_handle = engine_handle.clone();
		let req_cancel = cancel.clone();
		tokio::spawn(async move {
			broker_transport::req_rep::serve_req_rep(req_listener, req_handle, false, req_cancel).await;
		});

		let pub_cancel = cancel.clone();
		tokio::spawn(async move {
			broker_transport::publish::serve_pub(pub_listener, engine_handle, pub_cancel).await;
		});

		return (comm_port, pub_port, cancel);
	}
}

async fn connect(port: u16) -> TcpStream {
	TcpStream::connect(("127.0.0.1", port)).await.unwrap()
}

async fn send_recv(stream: &mut TcpStream, request: Value) -> Value {
	let mut line = request.to_string();
	line.push('\n');
	stream.write_all(line.as_bytes()).await.unwrap();
	stream.flush().await.unwrap();

	let (reader, _) = stream.split();
	let mut lines = BufReader::new(reader).lines();
	let reply = tokio::time::timeout(Duration::from_secs(2), lines.next_line()).await.unwrap().unwrap().unwrap();
	serde_json::from_str(&reply).unwrap()
}

#[tokio::test]
async fn s1_basic_admit_then_release_zeroes_stats() {
	let config = Config {
		read_reqs: 96,
		read_data: 200_000_000,
		write_reqs: 2,
		write_data: 150_000_000,
	};
	let (comm_port, _pub_port, _cancel) = spawn_broker(config).await;
	let mut client = connect(comm_port).await;

	let reply = send_recv(&mut client, json!({"type": "request", "resource": "R", "read": false, "numopts": 1, "datasize": 1000})).await;
	assert_eq!(reply, json!({"id": 0, "available": true}));

	let reply = send_recv(&mut client, json!({"type": "release", "id": 0})).await;
	assert_eq!(reply, json!({}));
}

#[tokio::test]
async fn s2_exclusive_serialization_wakes_queued_client_via_publish() {
	let config = Config {
		read_reqs: 96,
		read_data: 200_000_000,
		write_reqs: 1,
		write_data: 150_000_000,
	};
	let (comm_port, pub_port, _cancel) = spawn_broker(config).await;

	let mut client_a = connect(comm_port).await;
	let mut client_b = connect(comm_port).await;
	let mut subscriber = connect(pub_port).await;

	let reply_a = send_recv(&mut client_a, json!({"type": "request", "resource": "R", "read": false, "numopts": 1, "datasize": 10})).await;
	assert_eq!(reply_a, json!({"id": 0, "available": true}));

	let reply_b = send_recv(&mut client_b, json!({"type": "request", "resource": "R", "read": false, "numopts": 1, "datasize": 10})).await;
	assert_eq!(reply_b, json!({"id": 1, "available": false}));

	let release_reply = send_recv(&mut client_a, json!({"type": "release", "id": 0})).await;
	assert_eq!(release_reply, json!({}));

	let (sub_reader, _) = subscriber.split();
	let mut sub_lines = BufReader::new(sub_reader).lines();
	let published = tokio::time::timeout(Duration::from_secs(2), sub_lines.next_line()).await.unwrap().unwrap().unwrap();
	assert_eq!(published, "1 1");

	let hold_reply = send_recv(&mut client_b, json!({"type": "hold", "id": 1})).await;
	assert_eq!(hold_reply, json!({}));
}

#[tokio::test]
async fn s3_parallel_read_and_write_both_admit_immediately() {
	let config = Config {
		read_reqs: 1,
		read_data: 200_000_000,
		write_reqs: 1,
		write_data: 150_000_000,
	};
	let (comm_port, _pub_port, _cancel) = spawn_broker(config).await;

	let mut reader_client = connect(comm_port).await;
	let mut writer_client = connect(comm_port).await;

	let read_reply = send_recv(&mut reader_client, json!({"type": "request", "resource": "R", "read": true, "numopts": 1, "datasize": 10})).await;
	let write_reply = send_recv(&mut writer_client, json!({"type": "request", "resource": "R", "read": false, "numopts": 1, "datasize": 10})).await;

	assert_eq!(read_reply["available"], true);
	assert_eq!(write_reply["available"], true);
}

#[tokio::test]
async fn s4_infeasible_request_reports_invalid_and_never_queues() {
	let config = Config {
		read_reqs: 96,
		read_data: 100,
		write_reqs: 96,
		write_data: 150_000_000,
	};
	let (comm_port, _pub_port, _cancel) = spawn_broker(config).await;
	let mut client = connect(comm_port).await;

	let reply = send_recv(&mut client, json!({"type": "request", "resource": "R", "read": true, "numopts": 1, "datasize": 1000})).await;
	assert_eq!(reply, json!({"id": 0, "invalid": true}));
}

#[tokio::test]
async fn s5_live_reconfigure_round_trips_through_read_config() {
	let (comm_port, _pub_port, _cancel) = spawn_broker(Config::default()).await;
	let mut client = connect(comm_port).await;

	let new_config = json!({"read_reqs": 123, "read_data": 200_000_000, "write_reqs": 456, "write_data": 150_000_000});
	let echoed = send_recv(&mut client, json!({"type": "config", "config": new_config})).await;
	assert_eq!(echoed, new_config);

	let read_back = send_recv(&mut client, json!({"type": "read-config"})).await;
	assert_eq!(read_back["config"], new_config);
}

#[tokio::test]
async fn s6_republish_recovers_a_subscriber_that_connects_late() {
	let config = Config {
		read_reqs: 96,
		read_data: 200_000_000,
		write_reqs: 1,
		write_data: 150_000_000,
	};
	let (comm_port, pub_port, _cancel) = spawn_broker(config).await;

	let mut client_a = connect(comm_port).await;
	let mut client_b = connect(comm_port).await;

	send_recv(&mut client_a, json!({"type": "request", "resource": "R", "read": false, "numopts": 1, "datasize": 10})).await;
	send_recv(&mut client_b, json!({"type": "request", "resource": "R", "read": false, "numopts": 1, "datasize": 10})).await;

	// Subscriber connects only after the release, simulating a dropped first
	// publish: the broker must still re-publish on its own at PUBDELAY.
	send_recv(&mut client_a, json!({"type": "release", "id": 0})).await;
	let mut subscriber = connect(pub_port).await;

	let (sub_reader, _) = subscriber.split();
	let mut sub_lines = BufReader::new(sub_reader).lines();
	let published = tokio::time::timeout(Duration::from_secs(4), sub_lines.next_line()).await.unwrap().unwrap().unwrap();
	assert_eq!(published, "1 1");

	let hold_reply = send_recv(&mut client_b, json!({"type": "hold", "id": 1})).await;
	assert_eq!(hold_reply, json!({}));
}
