use crate::domain::TaskId;
use std::time::{Duration, Instant};

/// Event-loop poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// A running work timer for one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTimer {
    pub task_id: TaskId,
    pub started: Instant,
}

impl ActiveTimer {
    pub fn start(task_id: TaskId) -> Self {
        Self {
            task_id,
            started: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started).as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_elapsed_ms() {
        let timer = ActiveTimer::start(Uuid::new_v4());
        assert_eq!(timer.elapsed_ms(timer.started + Duration::from_millis(1500)), 1500);
        assert_eq!(timer.elapsed_ms(timer.started), 0);
    }
}
