use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the Unix timestamp (seconds) embedded in signed requests.
pub trait Clock: Send + Sync {
    fn unix_seconds(&self) -> u64;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> u64 {
        // A clock before 1970 is treated as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Clock pinned to one instant. Used to reproduce a signed request exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemClock.unix_seconds() > 1_577_836_800);
    }

    #[test]
    fn fixed_clock_never_moves() {
        let clock = FixedClock(1_700_000_000);
        assert_eq!(clock.unix_seconds(), clock.unix_seconds());
        assert_eq!(clock.unix_seconds(), 1_700_000_000);
    }
}
