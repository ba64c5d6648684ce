/// Active key layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardMode {
    #[default]
    Letters,
    Symbols,
    Numbers,
}

impl KeyboardMode {
    /// Next mode in the fixed cycle Letters → Symbols → Numbers → Letters
    pub fn next(self) -> Self {
        match self {
            KeyboardMode::Letters => KeyboardMode::Symbols,
            KeyboardMode::Symbols => KeyboardMode::Numbers,
            KeyboardMode::Numbers => KeyboardMode::Letters,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyboardMode::Letters => "ABC",
            KeyboardMode::Symbols => "#+=",
            KeyboardMode::Numbers => "123",
        }
    }

    /// Stable name used in analytics params
    pub fn as_str(self) -> &'static str {
        match self {
            KeyboardMode::Letters => "letters",
            KeyboardMode::Symbols => "symbols",
            KeyboardMode::Numbers => "numbers",
        }
    }
}

/// Shift modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftState {
    #[default]
    Off,
    /// Upper case for the next character only
    Shifted,
    /// Upper case until shift is tapped again
    CapsLocked,
}

impl ShiftState {
    pub fn is_upper(self) -> bool {
        !matches!(self, ShiftState::Off)
    }

    pub fn label(self) -> &'static str {
        match self {
            ShiftState::Off => "shift",
            ShiftState::Shifted => "SHIFT",
            ShiftState::CapsLocked => "CAPS",
        }
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod mode_tests;
