//! Short-lived visual effects driven by game feedback

use glam::Vec2;

use math_catcher::sim::{Feedback, POP_DURATION_MS, SHAKE_OFFSETS, SHAKE_STEP_MS};

#[derive(Debug, Clone, Copy)]
struct Pop {
    position: Vec2,
    started: f64,
}

/// Pop bursts and screen shake in progress
#[derive(Debug, Default)]
pub struct Effects {
    pops: Vec<Pop>,
    shake_started: Option<f64>,
    /// Last penalty message, e.g. "2 lives left"
    banner: Option<(String, f64)>,
}

impl Effects {
    pub fn absorb(&mut self, feedback: &[Feedback], now: f64) {
        for item in feedback {
            match *item {
                Feedback::Pop { position } => self.pops.push(Pop {
                    position,
                    started: now,
                }),
                Feedback::Shake => self.shake_started = Some(now),
                Feedback::LifeLost { lives } => {
                    let text = match lives {
                        1 => "1 life left".to_string(),
                        n => format!("{n} lives left"),
                    };
                    self.banner = Some((text, now));
                }
                Feedback::NewProblem => self.banner = Some(("Nice catch!".to_string(), now)),
                Feedback::GameOver { .. } => self.banner = None,
            }
        }
    }

    /// Horizontal shake offset in play-field units
    pub fn shake_offset(&self, now: f64) -> f32 {
        let Some(started) = self.shake_started else {
            return 0.0;
        };
        let elapsed = now - started;
        if elapsed < 0.0 {
            return 0.0;
        }
        SHAKE_OFFSETS
            .get((elapsed / SHAKE_STEP_MS) as usize)
            .copied()
            .unwrap_or(0.0)
    }

    /// Live pops with their progress in [0, 1)
    pub fn pops(&self, now: f64) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.pops.iter().filter_map(move |p| {
            let t = (now - p.started) / POP_DURATION_MS;
            (0.0..1.0).contains(&t).then_some((p.position, t as f32))
        })
    }

    pub fn banner(&self, now: f64) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|(_, at)| now - at < 1000.0)
            .map(|(text, _)| text.as_str())
    }

    /// Drop finished effects
    pub fn prune(&mut self, now: f64) {
        self.pops.retain(|p| now - p.started < POP_DURATION_MS);
        let shake_len = SHAKE_STEP_MS * SHAKE_OFFSETS.len() as f64;
        if self.shake_started.is_some_and(|s| now - s >= shake_len) {
            self.shake_started = None;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shake_sequence() {
        let mut effects = Effects::default();
        effects.absorb(&[Feedback::Shake], 1000.0);
        let offsets: Vec<f32> = [1000.0, 1150.0, 1250.0, 1350.0, 1400.0]
            .iter()
            .map(|&t| effects.shake_offset(t))
            .collect();
        assert_eq!(offsets, vec![10.0, -10.0, 10.0, 0.0, 0.0]);
        effects.prune(1400.0);
        assert_eq!(effects.shake_offset(1000.0), 0.0);
    }

    #[test]
    fn test_pop_expires() {
        let mut effects = Effects::default();
        let position = Vec2::new(10.0, 20.0);
        effects.absorb(&[Feedback::Pop { position }], 0.0);
        assert_eq!(effects.pops(150.0).collect::<Vec<_>>(), vec![(position, 0.5)]);
        assert_eq!(effects.pops(300.0).count(), 0);
        effects.prune(300.0);
        assert!(effects.pops.is_empty());
    }

    #[test]
    fn test_life_banner() {
        let mut effects = Effects::default();
        effects.absorb(&[Feedback::Shake, Feedback::LifeLost { lives: 1 }], 0.0);
        assert_eq!(effects.banner(500.0), Some("1 life left"));
        assert_eq!(effects.banner(1000.0), None);
    }
}
