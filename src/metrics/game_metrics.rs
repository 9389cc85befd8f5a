use tokio::time::{Duration, Instant};

/// Play-time and session bookkeeping
///
/// Elapsed time counts whole seconds of running play. Pausing freezes it;
/// resuming shifts the start instant so the count carries on from where it
/// stopped instead of including the pause.
#[derive(Debug, Clone)]
pub struct GameMetrics {
    start_time: Option<Instant>,
    elapsed_secs: u64,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed_secs: 0,
            games_played: 0,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Whether the play clock is counting
    pub fn is_counting(&self) -> bool {
        self.start_time.is_some()
    }

    /// Refresh elapsed seconds from the running clock
    pub fn update(&mut self, now: Instant) {
        if let Some(start) = self.start_time {
            self.elapsed_secs = now.saturating_duration_since(start).as_secs();
        }
    }

    pub fn on_game_start(&mut self, now: Instant) {
        self.start_time = Some(now);
        self.elapsed_secs = 0;
    }

    pub fn on_pause(&mut self, now: Instant) {
        self.update(now);
        self.start_time = None;
    }

    pub fn on_resume(&mut self, now: Instant) {
        let played = Duration::from_secs(self.elapsed_secs);
        self.start_time = Some(now.checked_sub(played).unwrap_or(now));
    }

    pub fn on_game_over(&mut self, now: Instant) {
        self.update(now);
        self.start_time = None;
        self.games_played += 1;
    }

    /// Back to zero for a new session; `games_played` is kept
    pub fn reset(&mut self) {
        self.start_time = None;
        self.elapsed_secs = 0;
    }

    pub fn format_time(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// `MM:SS`, minutes are not capped at 59
pub fn format_elapsed(total_secs: u64) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_elapsed(125), "02:05");
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(3661), "61:01");
    }

    #[test]
    fn test_elapsed_counts_whole_seconds() {
        let t0 = Instant::now();
        let mut metrics = GameMetrics::new();
        metrics.on_game_start(t0);

        metrics.update(t0 + Duration::from_millis(2_999));
        assert_eq!(metrics.elapsed_secs(), 2);
        assert_eq!(metrics.format_time(), "00:02");
    }

    #[test]
    fn test_pause_gap_not_counted() {
        let t0 = Instant::now();
        let mut metrics = GameMetrics::new();
        metrics.on_game_start(t0);

        metrics.on_pause(t0 + Duration::from_secs(5));
        assert_eq!(metrics.elapsed_secs(), 5);

        // Updates while paused change nothing
        metrics.update(t0 + Duration::from_secs(50));
        assert_eq!(metrics.elapsed_secs(), 5);

        metrics.on_resume(t0 + Duration::from_secs(105));
        metrics.update(t0 + Duration::from_secs(106));
        assert_eq!(metrics.elapsed_secs(), 6);
    }

    #[test]
    fn test_game_over_counts_games_and_stops_clock() {
        let t0 = Instant::now();
        let mut metrics = GameMetrics::new();
        metrics.on_game_start(t0);
        metrics.on_game_over(t0 + Duration::from_secs(9));

        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.elapsed_secs(), 9);
        assert!(!metrics.is_counting());

        metrics.update(t0 + Duration::from_secs(30));
        assert_eq!(metrics.elapsed_secs(), 9);
    }

    #[test]
    fn test_reset_keeps_games_played() {
        let t0 = Instant::now();
        let mut metrics = GameMetrics::new();
        metrics.on_game_start(t0);
        metrics.on_game_over(t0 + Duration::from_secs(3));
        metrics.reset();

        assert_eq!(metrics.elapsed_secs(), 0);
        assert_eq!(metrics.games_played, 1);
    }
}
