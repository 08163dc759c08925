/// Keys the game reacts to. Front-ends map their own key codes onto these
/// and drop everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    SteerLeft,
    SteerRight,
    Pause,
    Resume,
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
}

/// One-shot signals, fired on key release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Pause,
    Resume,
    Restart,
}

/// Held state of the two steering keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    left: bool,
    right: bool,
}

impl InputState {
    /// Applies one event. Returns the trigger a release produced, if any;
    /// whether it takes effect is up to the session.
    pub fn dispatch(&mut self, event: InputEvent) -> Option<Trigger> {
        match event {
            InputEvent::Pressed(Key::SteerLeft) => self.left = true,
            InputEvent::Pressed(Key::SteerRight) => self.right = true,
            InputEvent::Pressed(_) => {}
            InputEvent::Released(key) => match key {
                Key::SteerLeft => self.left = false,
                Key::SteerRight => self.right = false,
                Key::Pause => return Some(Trigger::Pause),
                Key::Resume => return Some(Trigger::Resume),
                Key::Restart => return Some(Trigger::Restart),
            },
        }
        None
    }

    pub fn left_held(&self) -> bool {
        self.left
    }

    pub fn right_held(&self) -> bool {
        self.right
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
