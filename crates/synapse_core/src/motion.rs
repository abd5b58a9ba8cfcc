//! Reduced-motion preference signal

/// Platform signal for a user preference toward minimized animation
pub trait MotionPreference: Send + Sync {
    fn prefers_reduced_motion(&self) -> bool;
}

/// A fixed preference, for hosts that read it once up front
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedMotion(pub bool);

impl MotionPreference for FixedMotion {
    fn prefers_reduced_motion(&self) -> bool {
        self.0
    }
}

/// Reads `SYNAPSE_REDUCED_MOTION` (`1`, `true`, `yes` or `reduce`)
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvMotion;

/// Environment variable checked by [`EnvMotion`]
pub const REDUCED_MOTION_ENV: &str = "SYNAPSE_REDUCED_MOTION";

impl MotionPreference for EnvMotion {
    fn prefers_reduced_motion(&self) -> bool {
        std::env::var(REDUCED_MOTION_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "reduce"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" Reduce "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("no-preference"));
    }

    #[test]
    fn test_fixed_motion() {
        assert!(FixedMotion(true).prefers_reduced_motion());
        assert!(!FixedMotion::default().prefers_reduced_motion());
    }
}
