use std::sync::Arc;

use herdwatch_api_types::{FeedMode, Sample, TrendingEntry};
use tokio::sync::broadcast::channel;

pub type EventBus<T> = tokio::sync::broadcast::Receiver<EventType<Arc<T>>>;
pub type EventProducer<T> = tokio::sync::broadcast::Sender<EventType<Arc<T>>>;

#[derive(Clone, Debug, PartialEq)]
pub enum EventType<T> {
    Remove(T),
    Add(T),
    Update(T),
}

impl<T> AsRef<T> for EventType<T> {
    fn as_ref(&self) -> &T {
        match self {
            EventType::Remove(t) => t,
            EventType::Add(t) => t,
            EventType::Update(t) => t,
        }
    }
}

impl<T> EventType<Arc<T>> {
    pub fn removed(data: T) -> Self {
        EventType::Remove(Arc::new(data))
    }

    pub fn added(data: T) -> Self {
        EventType::Add(Arc::new(data))
    }

    pub fn updated(data: T) -> Self {
        EventType::Update(Arc::new(data))
    }
}

pub fn create_event_busses() -> (FeedSenders, FeedReceivers) {
    let (sample_sender, sample_receiver) = channel(64);
    let (trending_sender, trending_receiver) = channel(16);
    let (mode_sender, mode_receiver) = channel(8);
    (
        FeedSenders {
            samples: sample_sender,
            trending: trending_sender,
            mode: mode_sender,
        },
        FeedReceivers {
            samples: sample_receiver,
            trending: trending_receiver,
            mode: mode_receiver,
        },
    )
}

/// Sending never fails loudly: a feed with nobody listening is still a valid feed
#[derive(Clone, Debug)]
pub struct FeedSenders {
    pub samples: EventProducer<Sample>,
    pub trending: EventProducer<TrendingEntry>,
    pub mode: EventProducer<FeedMode>,
}

/// Per-item change notifications, for consumers that would rather not diff snapshots
#[derive(Debug)]
pub struct FeedReceivers {
    pub samples: EventBus<Sample>,
    pub trending: EventBus<TrendingEntry>,
    pub mode: EventBus<FeedMode>,
}

impl Clone for FeedReceivers {
    fn clone(&self) -> Self {
        Self {
            samples: self.samples.resubscribe(),
            trending: self.trending.resubscribe(),
            mode: self.mode.resubscribe(),
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use herdwatch_api_types::FeedMode;

    use super::{create_event_busses, EventType};

    #[test]
    fn test_event_payload_access() {
        let event = EventType::updated(FeedMode::Paused);
        assert_eq!(**event.as_ref(), FeedMode::Paused);
        assert!(matches!(EventType::added(1), EventType::Add(_)));
        assert!(matches!(EventType::removed(1), EventType::Remove(_)));
    }

    #[tokio::test]
    async fn test_cloned_receivers_see_new_events() {
        let (senders, receivers) = create_event_busses();
        let mut cloned = receivers.clone();
        senders
            .mode
            .send(EventType::Update(Arc::new(FeedMode::Paused)))
            .unwrap();
        let event = cloned.mode.recv().await.unwrap();
        assert_eq!(event, EventType::Update(Arc::new(FeedMode::Paused)));
    }
}
