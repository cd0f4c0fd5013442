//! Skips redrawing frames that would look identical.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    /// Redraw at least this often even when nothing changed (terminal
    /// resizes and stray output get repaired this way)
    refresh_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: Option<u64>,
}

impl RenderThrottle {
    pub fn new(refresh_interval_ms: u64) -> Self {
        Self {
            refresh_interval_ms,
            last_render_ms: 0,
            last_fingerprint: None,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// Renders the first frame, any frame whose fingerprint differs from the
    /// last rendered one, and otherwise at most once per refresh interval.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.refresh_interval_ms;
        if !changed && !stale {
            return false;
        }
        self.last_render_ms = now_ms;
        self.last_fingerprint = Some(fingerprint);
        true
    }

    /// Forget the last frame so the next call renders.
    pub fn reset(&mut self) {
        self.last_fingerprint = None;
    }
}
