//! FIFO queue of pending documents
//!
//! The queue is an owned object whose items move `Queued -> Processing ->
//! {Completed | Error}`. At most one item is in flight at a time, and only
//! the owning driver advances it - there is no shared mutable state.

use uuid::Uuid;

/// State of one queued document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueItemState {
    /// Waiting to be processed
    Queued,
    /// Currently in flight
    Processing,
    /// Processed successfully
    Completed,
    /// Processing recorded an error (queue continues regardless)
    Error,
}

/// One submitted document awaiting processing
#[derive(Debug, Clone)]
pub struct QueueItem {
    /// Queue item identifier
    pub id: String,
    /// Origin label for the eventual entry
    pub source_name: String,
    /// Raw text to process
    pub text: String,
    /// Current state
    pub state: QueueItemState,
    /// Failure reason when `state == Error`
    pub error: Option<String>,
}

/// Owned FIFO queue of pending documents
#[derive(Debug, Default)]
pub struct ProcessingQueue {
    items: Vec<QueueItem>,
}

impl ProcessingQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document, returning the queue item id
    pub fn enqueue(&mut self, text: impl Into<String>, source_name: impl Into<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.items.push(QueueItem {
            id: id.clone(),
            source_name: source_name.into(),
            text: text.into(),
            state: QueueItemState::Queued,
            error: None,
        });
        id
    }

    /// All items, in submission order
    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    /// Whether an item is currently in flight
    pub fn has_in_flight(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.state == QueueItemState::Processing)
    }

    /// Number of items still waiting
    pub fn pending_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.state == QueueItemState::Queued)
            .count()
    }

    /// Discard all queued items; an in-flight item is unaffected and will
    /// still finish. Returns the number of discarded items.
    pub fn clear_pending(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.state != QueueItemState::Queued);
        before - self.items.len()
    }

    /// Move the next queued item into `Processing`, if nothing is in
    /// flight. Returns its index.
    pub(crate) fn begin_next(&mut self) -> Option<usize> {
        if self.has_in_flight() {
            return None;
        }
        let index = self
            .items
            .iter()
            .position(|item| item.state == QueueItemState::Queued)?;
        self.items[index].state = QueueItemState::Processing;
        Some(index)
    }

    pub(crate) fn complete(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.state = QueueItemState::Completed;
        }
    }

    pub(crate) fn fail(&mut self, index: usize, message: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            item.state = QueueItemState::Error;
            item.error = Some(message.into());
        }
    }
}
