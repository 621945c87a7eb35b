use crate::game::FrameInput;

/// Keyboard/pointer state collected between frames by the browser listeners.
#[derive(Default, Debug)]
pub struct InputState {
    left: bool,
    right: bool,
    action_pending: bool,
}

impl InputState {
    /// Returns true when the key is one the game listens to.
    pub fn handle_keydown(&mut self, key: &str, repeat: bool) -> bool {
        match key {
            "ArrowLeft" | "a" | "A" => { self.left = true; true },
            "ArrowRight" | "d" | "D" => { self.right = true; true },
            "Enter" => {
                // Held Enter would otherwise toggle pause on every auto-repeat.
                if !repeat {
                    self.action_pending = true;
                }
                true
            },
            _ => false,
        }
    }

    pub fn handle_keyup(&mut self, key: &str) {
        match key {
            "ArrowLeft" | "a" | "A" => self.left = false,
            "ArrowRight" | "d" | "D" => self.right = false,
            _ => {}
        }
    }

    pub fn press_action(&mut self) {
        self.action_pending = true;
    }

    /// Snapshot for one frame. The action fires at most once per press.
    pub fn sample(&mut self, now_ms: f64) -> FrameInput {
        let action = std::mem::take(&mut self.action_pending);
        FrameInput {
            left: self.left,
            right: self.right,
            action,
            now_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_persist_until_released() {
        let mut input = InputState::default();
        assert!(input.handle_keydown("ArrowLeft", false));
        assert!(input.sample(0.0).left);
        assert!(input.sample(16.0).left);
        input.handle_keyup("ArrowLeft");
        assert!(!input.sample(32.0).left);
    }

    #[test]
    fn action_is_consumed_by_one_sample() {
        let mut input = InputState::default();
        input.handle_keydown("Enter", false);
        assert!(input.sample(0.0).action);
        assert!(!input.sample(16.0).action);
    }

    #[test]
    fn auto_repeat_enter_is_ignored() {
        let mut input = InputState::default();
        assert!(input.handle_keydown("Enter", true));
        assert!(!input.sample(0.0).action);
    }

    #[test]
    fn unknown_keys_are_not_handled() {
        let mut input = InputState::default();
        assert!(!input.handle_keydown("q", false));
        input.press_action();
        let frame = input.sample(5.0);
        assert!(frame.action);
        assert!(!frame.left && !frame.right);
    }
}
