/// User-facing notifications
///
/// Errors stay on screen until the user dismisses them. Info notifications
/// dismiss themselves after a few seconds, driven by a `Tick` from the
/// application subscription.
use iced::widget::{button, container, row, text, Column};
use iced::{alignment, Element, Length};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::palette;

/// Maximum number of notifications visible at once
const MAX_VISIBLE: usize = 3;

/// How long info notifications stay up
const INFO_DURATION: Duration = Duration::from_secs(4);

/// Unique identifier for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    /// Manual dismiss required
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: String,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn is_expired(&self, now: Instant) -> bool {
        match self.severity {
            Severity::Info => now.duration_since(self.created_at) >= INFO_DURATION,
            Severity::Error => false,
        }
    }
}

/// Messages for notification state changes
#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    /// Periodic check for expired info notifications
    Tick,
}

/// Queues notifications and tracks which ones are on screen
#[derive(Debug, Default)]
pub struct Manager {
    /// Newest first
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
}

impl Manager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `notification`, or queue it if the screen is full
    pub fn push(&mut self, notification: Notification) {
        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Remove a notification; returns `true` if it was found
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }

        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }

        false
    }

    /// Drop expired info notifications
    pub fn tick(&mut self, now: Instant) {
        let expired: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|n| n.is_expired(now))
            .map(Notification::id)
            .collect();

        for id in expired {
            self.dismiss(id);
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => self.tick(Instant::now()),
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether a timer is needed to expire anything on screen
    pub fn needs_tick(&self) -> bool {
        self.visible.iter().any(|n| n.severity() == Severity::Info)
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            match self.queue.pop_front() {
                Some(notification) => self.visible.push_back(notification),
                None => break,
            }
        }
    }
}

/// Render visible notifications as a stack of cards
pub fn view(manager: &Manager) -> Element<'_, Message> {
    let cards = manager.visible().map(|notification| {
        let color = match notification.severity() {
            Severity::Info => palette::INFO,
            Severity::Error => palette::ERROR,
        };

        let content = row![
            container(text(notification.message()).color(color)).width(Length::Fill),
            button(text("Dismiss").size(14))
                .on_press(Message::Dismiss(notification.id()))
                .padding(6),
        ]
        .spacing(12)
        .align_y(alignment::Vertical::Center);

        container(content)
            .width(Length::Fixed(560.0))
            .padding(12)
            .style(container::rounded_box)
            .into()
    });

    let mut stack = Column::with_children(cards);
    if manager.queued_count() > 0 {
        stack = stack.push(text(format!("+{} more", manager.queued_count())).size(12).color(palette::MUTED));
    }

    stack
        .spacing(8)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .into()
}
