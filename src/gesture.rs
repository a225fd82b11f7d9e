//! Touch gestures reported by the platform accessibility layer

/// Gesture recognized from a touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    None,
    SwipeLeft,
    SwipeRight,
    DoubleTap,
}

impl Gesture {
    /// Map the code returned by the managed gesture detector
    ///
    /// Unknown codes are treated as no gesture.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Gesture::SwipeLeft,
            2 => Gesture::SwipeRight,
            3 => Gesture::DoubleTap,
            _ => Gesture::None,
        }
    }
}

/// A single touch sample forwarded to the gesture detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Android `MotionEvent` action code
    pub action: i32,
    pub x: f32,
    pub y: f32,
    /// Event timestamp in milliseconds
    pub time_ms: i64,
}

impl TouchEvent {
    pub fn new(action: i32, x: f32, y: f32, time_ms: i64) -> Self {
        Self {
            action,
            x,
            y,
            time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(Gesture::from_code(0), Gesture::None);
        assert_eq!(Gesture::from_code(1), Gesture::SwipeLeft);
        assert_eq!(Gesture::from_code(2), Gesture::SwipeRight);
        assert_eq!(Gesture::from_code(3), Gesture::DoubleTap);
    }

    #[test]
    fn test_unknown_codes_are_none() {
        assert_eq!(Gesture::from_code(-1), Gesture::None);
        assert_eq!(Gesture::from_code(42), Gesture::None);
    }
}
