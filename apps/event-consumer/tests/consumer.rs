use analytics_events::{Event, EventEnvelope};
use event_consumer::{Consumer, ConsumerError, ConsumerSettings, EnvelopeLogger, MessageHandler, ReceiverConfig};
use event_queue::{InMemQueue, OutboundMessage, QueueClient, QueueMessage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

fn settings() -> ConsumerSettings {
	ConsumerSettings {
		receiver: ReceiverConfig {
			max_messages: 10,
			wait_time: Duration::from_millis(50),
			backoff: Duration::from_millis(10),
		},
		buffer_size: 2,
		workers: 2,
		shutdown_timeout: Duration::from_secs(2),
	}
}

async fn publish(queue: &InMemQueue, event_id: &str, event: Event) {
	let body = EventEnvelope::new(event_id, event).to_json().unwrap();
	queue.send(OutboundMessage::new(body)).await.unwrap();
}

async fn wait_until_settled(queue: &InMemQueue, in_flight: usize) {
	tokio::time::timeout(Duration::from_secs(5), async {
		while queue.pending().await > 0 || queue.in_flight().await != in_flight {
			tokio::time::sleep(Duration::from_millis(10)).await;
		}
	})
	.await
	.unwrap();
}

#[derive(Default)]
struct Recorder {
	seen: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl MessageHandler for Recorder {
	async fn handle(&self, message: &QueueMessage) -> Result<(), ConsumerError> {
		let envelope = EventEnvelope::from_json(&message.body)?;
		self.seen.lock().await.push(envelope.event_id);
		Ok(())
	}
}

#[tokio::test]
async fn test_consumes_and_acknowledges_published_events() {
	let queue = InMemQueue::new("inmem://events");
	for i in 0..25 {
		publish(&queue, &format!("evt-{i}"), Event::new("click", "web", i)).await;
	}

	let recorder = Arc::new(Recorder::default());
	let cancel = CancellationToken::new();
	let consumer = Consumer::new(Arc::new(queue.clone()), recorder.clone(), settings());
	let running = tokio::spawn(consumer.run(cancel.clone()));

	wait_until_settled(&queue, 0).await;
	cancel.cancel();
	tokio::time::timeout(Duration::from_secs(5), running).await.unwrap().unwrap();

	let mut seen = recorder.seen.lock().await.clone();
	seen.sort();
	let mut expected: Vec<_> = (0..25).map(|i| format!("evt-{i}")).collect();
	expected.sort();
	assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_undecodable_messages_stay_unacknowledged() {
	let queue = InMemQueue::new("inmem://events");
	publish(&queue, "evt-1", Event::new("click", "web", 1)).await;
	queue.send(OutboundMessage::new("{broken")).await.unwrap();

	let cancel = CancellationToken::new();
	let client: Arc<dyn QueueClient> = Arc::new(queue.clone());
	let running = tokio::spawn(Consumer::new(client, Arc::new(EnvelopeLogger), settings()).run(cancel.clone()));

	wait_until_settled(&queue, 1).await;
	cancel.cancel();
	tokio::time::timeout(Duration::from_secs(5), running).await.unwrap().unwrap();

	assert_eq!(queue.in_flight().await, 1);
}

#[tokio::test]
async fn test_stops_promptly_when_idle() {
	let queue = InMemQueue::new("inmem://events");
	let cancel = CancellationToken::new();
	let mut slow = settings();
	slow.receiver.wait_time = Duration::from_secs(20);
	let running = tokio::spawn(Consumer::new(Arc::new(queue), Arc::new(EnvelopeLogger), slow).run(cancel.clone()));

	tokio::time::sleep(Duration::from_millis(50)).await;
	cancel.cancel();

	tokio::time::timeout(Duration::from_secs(1), running).await.unwrap().unwrap();
}
