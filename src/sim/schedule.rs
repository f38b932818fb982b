//! Time-indexed deceleration schedule for the reveal.

/// Speed and radius growth applied to particles for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Velocity magnitude handed to recycling particles.
    pub speed: f32,
    /// Radius delta per tick.
    pub growth_rate: f32,
}

/// Map elapsed animation time to the current step.
///
/// Thresholds are checked from the latest backwards; the first match wins.
/// Particles start fast with slow growth and end motionless with fast
/// growth/decay, which lets the field settle.
pub fn step_for(total_ms: u64, elapsed_ms: u64) -> Step {
    if elapsed_ms > total_ms + 850 {
        Step {
            speed: 0.0,
            growth_rate: 0.6,
        }
    } else if elapsed_ms > total_ms + 750 {
        Step {
            speed: 1.0,
            growth_rate: 0.5,
        }
    } else if elapsed_ms > total_ms + 550 {
        Step {
            speed: 2.0,
            growth_rate: 0.4,
        }
    } else if elapsed_ms > total_ms + 350 {
        Step {
            speed: 3.0,
            growth_rate: 0.4,
        }
    } else {
        Step {
            speed: 4.0,
            growth_rate: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTAL: u64 = 10_000;

    #[test]
    fn table_matches_at_every_threshold() {
        let expected = [
            (TOTAL + 349, 4.0, 0.1),
            (TOTAL + 350, 4.0, 0.1),
            (TOTAL + 351, 3.0, 0.4),
            (TOTAL + 549, 3.0, 0.4),
            (TOTAL + 550, 3.0, 0.4),
            (TOTAL + 551, 2.0, 0.4),
            (TOTAL + 749, 2.0, 0.4),
            (TOTAL + 750, 2.0, 0.4),
            (TOTAL + 751, 1.0, 0.5),
            (TOTAL + 849, 1.0, 0.5),
            (TOTAL + 850, 1.0, 0.5),
            (TOTAL + 851, 0.0, 0.6),
        ];
        for (elapsed, speed, growth_rate) in expected {
            let step = step_for(TOTAL, elapsed);
            assert_eq!(step.speed, speed, "speed at {}", elapsed);
            assert_eq!(step.growth_rate, growth_rate, "growth at {}", elapsed);
        }
    }

    #[test]
    fn starts_at_full_speed() {
        assert_eq!(
            step_for(TOTAL, 0),
            Step {
                speed: 4.0,
                growth_rate: 0.1
            }
        );
    }

    #[test]
    fn speed_never_increases_over_time() {
        let mut last = f32::MAX;
        for elapsed in (0..TOTAL + 2_000).step_by(10) {
            let step = step_for(TOTAL, elapsed);
            assert!(step.speed <= last, "speed rose at {} ms", elapsed);
            last = step.speed;
        }
    }
}
