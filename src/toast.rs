use std::{
    fmt,
    sync::{
        Arc, Weak,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use serde::Serialize;
use tokio::sync::watch;

/// success / warning / info 的默认显示时长（毫秒）
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// error 的默认显示时长（毫秒）
pub const ERROR_DURATION_MS: u64 = 8000;

/// 通知标识，在队列生命周期内唯一且不复用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ToastId(u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    /// 未显式指定时长时使用的默认值
    pub fn default_duration(self) -> u64 {
        match self {
            ToastKind::Error => ERROR_DURATION_MS,
            _ => DEFAULT_DURATION_MS,
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        };
        f.write_str(s)
    }
}

/// 一条通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastMessage {
    pub id: ToastId,
    pub kind: ToastKind,
    pub text: String,
    /// 显示时长（毫秒），0 表示直到手动移除
    pub duration: u64,
}

/// 通知队列
///
/// 按插入顺序保存当前显示的通知，每条通知到期后自动移除。
/// 订阅者通过 [`ToastQueue::subscribe`] 在每次变化时拿到完整序列。
///
/// 队列由调用方显式创建并传递，克隆得到的是同一个队列。
/// 自动移除依赖 tokio 定时器，[`ToastQueue::add`] 必须在 tokio 运行时中调用。
#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<Inner>,
}

struct Inner {
    next_id: AtomicU64,
    toasts: watch::Sender<Vec<ToastMessage>>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    pub fn new() -> Self {
        let (toasts, _) = watch::channel(Vec::new());

        Self {
            inner: Arc::new(Inner {
                next_id: AtomicU64::new(1),
                toasts,
            }),
        }
    }

    /// 订阅通知序列，接收端总能读到最新的完整序列
    pub fn subscribe(&self) -> watch::Receiver<Vec<ToastMessage>> {
        self.inner.toasts.subscribe()
    }

    /// 当前序列的副本
    pub fn snapshot(&self) -> Vec<ToastMessage> {
        self.inner.toasts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.toasts.borrow().is_empty()
    }

    /// 追加一条通知并返回其标识
    ///
    /// `duration` 为空时使用该类型的默认时长；为 `Some(0)` 时不会自动移除。
    pub fn add(&self, kind: ToastKind, text: impl Into<String>, duration: Option<u64>) -> ToastId {
        let id = ToastId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let duration = duration.unwrap_or_else(|| kind.default_duration());

        self.inner.toasts.send_modify(|toasts| {
            toasts.push(ToastMessage {
                id,
                kind,
                text: text.into(),
                duration,
            })
        });
        tracing::debug!(%id, %kind, duration, "toast added");

        if duration != 0 {
            self.schedule_removal(id, Duration::from_millis(duration));
        }

        id
    }

    /// 移除指定通知，不存在时什么也不做
    ///
    /// 只有序列确实变化时才通知订阅者。
    pub fn remove(&self, id: ToastId) {
        let removed = self.inner.toasts.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        });

        if removed {
            tracing::debug!(%id, "toast removed");
        }
    }

    /// 清空全部通知，已排期的定时器到期后不会产生任何效果
    pub fn clear(&self) {
        self.inner.toasts.send_if_modified(|toasts| {
            let changed = !toasts.is_empty();
            toasts.clear();
            changed
        });
    }

    pub fn success(&self, text: impl Into<String>, duration: Option<u64>) -> ToastId {
        self.add(ToastKind::Success, text, duration)
    }

    pub fn error(&self, text: impl Into<String>, duration: Option<u64>) -> ToastId {
        self.add(ToastKind::Error, text, duration)
    }

    pub fn warning(&self, text: impl Into<String>, duration: Option<u64>) -> ToastId {
        self.add(ToastKind::Warning, text, duration)
    }

    pub fn info(&self, text: impl Into<String>, duration: Option<u64>) -> ToastId {
        self.add(ToastKind::Info, text, duration)
    }

    /// 一次性定时器，只持有弱引用，队列释放后定时器空转结束
    fn schedule_removal(&self, id: ToastId, after: Duration) {
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            tokio::time::sleep(after).await;

            if let Some(inner) = inner.upgrade() {
                ToastQueue { inner }.remove(id);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_insertion_order_and_unique_ids() {
        let queue = ToastQueue::new();

        let a = queue.error("first", None);
        let b = queue.success("second", None);
        let c = queue.info("third", Some(0));

        let texts: Vec<_> = queue.snapshot().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert!(a != b && b != c && a != c);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_durations() {
        let queue = ToastQueue::new();
        queue.success("ok", None);
        queue.warning("careful", None);
        queue.error("bad", None);
        queue.info("fyi", Some(1200));

        let durations: Vec<_> = queue.snapshot().iter().map(|t| t.duration).collect();
        assert_eq!(durations, vec![5000, 5000, 8000, 1200]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_outlives_success() {
        let queue = ToastQueue::new();
        queue.error("Save failed", None);

        sleep(ms(7999)).await;
        assert_eq!(queue.len(), 1, "error toast should still be visible");

        sleep(ms(2)).await;
        assert!(queue.is_empty(), "error toast should expire after 8000ms");
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_expires_after_default() {
        let queue = ToastQueue::new();
        queue.success("Saved", None);

        sleep(ms(4999)).await;
        assert_eq!(queue.len(), 1);

        sleep(ms(2)).await;
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_remove_then_late_timer_is_noop() {
        let queue = ToastQueue::new();
        let mut rx = queue.subscribe();

        let id = queue.success("Saved", None);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        queue.remove(id);
        assert!(queue.is_empty());
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        sleep(ms(6000)).await;
        assert!(queue.is_empty());
        assert!(
            !rx.has_changed().unwrap(),
            "late timer must not notify subscribers"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_persists() {
        let queue = ToastQueue::new();
        let id = queue.add(ToastKind::Warning, "Unsaved changes", Some(0));

        sleep(Duration::from_secs(24 * 3600)).await;
        assert_eq!(queue.len(), 1);

        queue.remove(id);
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_timers_are_independent() {
        let queue = ToastQueue::new();
        queue.info("short", Some(1000));
        queue.info("long", Some(3000));
        queue.info("middle", Some(2000));

        sleep(ms(1500)).await;
        let texts: Vec<_> = queue.snapshot().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["long", "middle"]);

        sleep(ms(1000)).await;
        let texts: Vec<_> = queue.snapshot().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["long"]);

        sleep(ms(1000)).await;
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_unknown_id_is_noop() {
        let queue = ToastQueue::new();
        let id = queue.info("x", Some(0));
        queue.remove(id);
        queue.remove(id);
        queue.remove(ToastId(999));
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_full_sequence() {
        let queue = ToastQueue::new();
        let mut rx = queue.subscribe();

        queue.info("a", Some(0));
        queue.info("b", Some(0));

        rx.changed().await.unwrap();
        let seen: Vec<_> = rx.borrow_and_update().iter().map(|t| t.text.clone()).collect();
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_after_queue_dropped() {
        let queue = ToastQueue::new();
        queue.success("bye", None);
        drop(queue);

        sleep(ms(6000)).await;
    }
}
