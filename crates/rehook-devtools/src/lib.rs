use rehook_core::{Handle, Instance};

/// Per-frame readout of a mounted component's slots.
pub struct Hud {
    pub inspector_enabled: bool,
    frame_count: u64,
    pub metrics: Option<Metrics>,
    history: Vec<String>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            inspector_enabled: true,
            frame_count: 0,
            metrics: None,
            history: Vec::new(),
        }
    }

    pub fn toggle_inspector(&mut self) {
        self.inspector_enabled = !self.inspector_enabled;
    }

    pub fn overlay<I: Instance>(&mut self, handle: &Handle<I>) -> String {
        self.frame_count += 1;

        let stats = handle.stats();
        let metrics = Metrics {
            passes: stats.passes,
            slots: stats.slots,
            last_pass_ms: stats.last_pass.as_secs_f32() * 1000.0,
        };
        let hooks = format!("hooks: {}", handle.snapshot());

        let lines = [
            format!("frame: {}", self.frame_count),
            format!("passes: {}", metrics.passes),
            format!("slots: {}", metrics.slots),
            hooks.clone(),
        ];
        log::debug!("inspector: last pass took {:.3} ms", metrics.last_pass_ms);

        self.metrics = Some(metrics);
        self.history.push(hooks);
        lines.join("  |  ")
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    pub passes: u64,
    pub slots: usize,
    pub last_pass_ms: f32,
}

pub struct Inspector {
    pub hud: Hud,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self { hud: Hud::new() }
    }

    /// Samples `handle`; returns the overlay line, or an empty string while
    /// the inspector is switched off.
    pub fn frame<I: Instance>(&mut self, handle: &Handle<I>) -> String {
        if self.hud.inspector_enabled {
            self.hud.overlay(handle)
        } else {
            String::new()
        }
    }

    /// Every `hooks: [...]` line sampled so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.hud.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehook_core::prelude::*;

    struct Toggle {
        on: bool,
        set_on: Setter<bool>,
    }

    impl Instance for Toggle {
        fn render(&self) {}
    }

    fn toggle() -> Result<Toggle, HookError> {
        let (on, set_on) = use_state(false)?;
        use_effect(|| {}, deps![on])?;
        Ok(Toggle { on, set_on })
    }

    #[test]
    fn test_frame_records_hooks_trace() {
        let handle = render(toggle).unwrap();
        let mut inspector = Inspector::new();

        let line = inspector.frame(&handle);
        assert_eq!(line, "frame: 1  |  passes: 1  |  slots: 2  |  hooks: [false, [false]]");

        let on = handle.instance().on;
        handle.instance().set_on.set(!on).unwrap();
        inspector.frame(&handle);

        assert_eq!(
            inspector.history(),
            ["hooks: [false, [false]]", "hooks: [true, [true]]"]
        );
        assert_eq!(inspector.hud.metrics.as_ref().map(|m| m.passes), Some(2));
    }

    #[test]
    fn test_disabled_inspector_records_nothing() {
        let handle = render(toggle).unwrap();
        let mut inspector = Inspector::new();
        inspector.hud.toggle_inspector();

        assert_eq!(inspector.frame(&handle), "");
        assert!(inspector.history().is_empty());
        assert!(inspector.hud.metrics.is_none());
    }
}
