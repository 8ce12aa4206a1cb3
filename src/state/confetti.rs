// Confetti particle state for the win celebration (canvas-side, not part of the round reducer)

pub const CONFETTI_COUNT: usize = 180;
pub const CONFETTI_COLORS: [&str; 5] = ["#FFC907", "#2E9DF7", "#4FCB53", "#FF902A", "#F5402C"];
/// The burst is cut off after this long even if particles remain.
pub const CONFETTI_LIFETIME_MS: f64 = 4000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiParticle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    pub rot: f64,
    pub rot_speed: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Confetti {
    pub particles: Vec<ConfettiParticle>,
    pub started_at_ms: f64,
}

impl Confetti {
    /// A fresh burst above a `width` px wide canvas; `rand` yields uniform values in `[0, 1)`.
    pub fn burst(width: f64, now_ms: f64, mut rand: impl FnMut() -> f64) -> Self {
        let particles = (0..CONFETTI_COUNT)
            .map(|_| {
                let x = rand() * width;
                let y = -10.0 - rand() * 200.0;
                let size = 5.0 + rand() * 6.0;
                let speed = 2.0 + rand() * 3.0;
                let rot = rand() * std::f64::consts::PI;
                let rot_speed = (rand() - 0.5) * 0.2;
                let ci = ((rand() * CONFETTI_COLORS.len() as f64) as usize).min(CONFETTI_COLORS.len() - 1);
                ConfettiParticle { x, y, size, speed, rot, rot_speed, color: CONFETTI_COLORS[ci] }
            })
            .collect();
        Self { particles, started_at_ms: now_ms }
    }

    /// Advances one frame and drops particles that fell past `height`.
    pub fn step(&mut self, height: f64) {
        for p in self.particles.iter_mut() {
            p.y += p.speed;
            p.rot += p.rot_speed;
        }
        self.particles.retain(|p| p.y < height + 20.0);
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.particles.is_empty() || now_ms - self.started_at_ms >= CONFETTI_LIFETIME_MS
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    fn seq() -> impl FnMut() -> f64 {
        let mut rng = Pcg32::seed_from_u64(7);
        move || rng.random::<f64>()
    }

    #[test]
    fn burst_respects_ranges() {
        let c = Confetti::burst(800.0, 0.0, seq());
        assert_eq!(c.particles.len(), CONFETTI_COUNT);
        for p in &c.particles {
            assert!((0.0..800.0).contains(&p.x));
            assert!((-210.0..=-10.0).contains(&p.y));
            assert!((5.0..11.0).contains(&p.size));
            assert!((2.0..5.0).contains(&p.speed));
            assert!(p.rot_speed.abs() <= 0.1);
            assert!(CONFETTI_COLORS.contains(&p.color));
        }
    }

    #[test]
    fn particles_leave_and_burst_finishes() {
        let mut c = Confetti::burst(300.0, 0.0, seq());
        let mut frames = 0;
        while !c.particles.is_empty() {
            c.step(200.0);
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(c.is_finished(16.0));
    }

    #[test]
    fn lifetime_cuts_off_a_live_burst() {
        let c = Confetti::burst(300.0, 1000.0, || 0.5);
        assert!(!c.is_finished(4999.0));
        assert!(c.is_finished(5000.0));
    }
}
