//! Per-tick tank controls and the controllers that produce them

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Control state for one tank for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Turn left
    pub left: bool,
    /// Turn right
    pub right: bool,
    /// Drive forward
    pub forward: bool,
    /// Fire button held
    pub shoot: bool,
}

/// Produces controls for one tank, once per tick
pub trait Controller {
    /// Controls for the given tick
    fn next(&mut self, tick: u64) -> Controls;
}

/// Never touches the controls
#[derive(Debug, Default)]
pub struct Idle;

impl Controller for Idle {
    fn next(&mut self, _tick: u64) -> Controls {
        Controls::default()
    }
}

/// One step of a scripted control sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// How many ticks to hold these controls
    pub ticks: u32,
    /// Controls to hold
    #[serde(default)]
    pub controls: Controls,
}

/// Replays a fixed list of steps, looping forever
#[derive(Debug, Clone)]
pub struct Scripted {
    steps: Vec<ScriptStep>,
    cycle_length: u64,
}

impl Scripted {
    /// Create a controller from its steps
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        let cycle_length = steps.iter().map(|step| u64::from(step.ticks)).sum();
        Self { steps, cycle_length }
    }
}

impl Controller for Scripted {
    fn next(&mut self, tick: u64) -> Controls {
        if self.cycle_length == 0 {
            return Controls::default();
        }

        let mut offset = tick % self.cycle_length;
        for step in &self.steps {
            let ticks = u64::from(step.ticks);
            if offset < ticks {
                return step.controls;
            }
            offset -= ticks;
        }
        Controls::default()
    }
}

/// Seeded random walk: drives mostly forward, turns in bursts, fires now and then
#[derive(Debug, Clone)]
pub struct Wander {
    rng: StdRng,
    current: Controls,
    hold: u32,
}

impl Wander {
    /// Create a wandering controller from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            current: Controls::default(),
            hold: 0,
        }
    }
}

impl Controller for Wander {
    fn next(&mut self, _tick: u64) -> Controls {
        if self.hold == 0 {
            let turn = self.rng.gen_range(0..4);
            self.current = Controls {
                left: turn == 0,
                right: turn == 1,
                forward: self.rng.gen_bool(0.8),
                shoot: false,
            };
            self.hold = self.rng.gen_range(10..60);
        }
        self.hold -= 1;

        Controls {
            shoot: self.rng.gen_bool(0.02),
            ..self.current
        }
    }
}

/// Serializable controller selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControllerKind {
    /// See [`Idle`]
    Idle,
    /// See [`Scripted`]
    Scripted {
        /// Steps to loop through
        steps: Vec<ScriptStep>,
    },
    /// See [`Wander`]
    Wander {
        /// Random seed
        seed: u64,
    },
}

impl ControllerKind {
    /// Build the controller this selection describes
    pub fn build(&self) -> Box<dyn Controller> {
        match self {
            Self::Idle => Box::new(Idle),
            Self::Scripted { steps } => Box::new(Scripted::new(steps.clone())),
            Self::Wander { seed } => Box::new(Wander::new(*seed)),
        }
    }
}

/// Tracks a held button and reports the tick it went down
#[derive(Debug, Clone, Copy, Default)]
pub struct Trigger {
    held: bool,
}

impl Trigger {
    /// Feed this tick's state; true only on the first tick it is held
    pub fn just_pressed(&mut self, down: bool) -> bool {
        let pressed = down && !self.held;
        self.held = down;
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward() -> Controls {
        Controls { forward: true, ..Controls::default() }
    }

    fn shoot() -> Controls {
        Controls { shoot: true, ..Controls::default() }
    }

    #[test]
    fn test_scripted_loops() {
        let mut controller = Scripted::new(vec![
            ScriptStep { ticks: 2, controls: forward() },
            ScriptStep { ticks: 1, controls: shoot() },
        ]);

        let seen: Vec<Controls> = (0..6).map(|tick| controller.next(tick)).collect();
        assert_eq!(seen, vec![forward(), forward(), shoot(), forward(), forward(), shoot()]);
    }

    #[test]
    fn test_empty_script_is_idle() {
        let mut controller = Scripted::new(Vec::new());
        assert_eq!(controller.next(42), Controls::default());
    }

    #[test]
    fn test_wander_is_deterministic_per_seed() {
        let mut a = Wander::new(9);
        let mut b = Wander::new(9);

        for tick in 0..500 {
            assert_eq!(a.next(tick), b.next(tick));
        }
    }

    #[test]
    fn test_wander_never_turns_both_ways() {
        let mut controller = Wander::new(3);
        for tick in 0..1000 {
            let controls = controller.next(tick);
            assert!(!(controls.left && controls.right));
        }
    }

    #[test]
    fn test_trigger_fires_once_per_press() {
        let mut trigger = Trigger::default();
        let fired: Vec<bool> = [false, true, true, false, true]
            .into_iter()
            .map(|down| trigger.just_pressed(down))
            .collect();

        assert_eq!(fired, vec![false, true, false, false, true]);
    }
}
