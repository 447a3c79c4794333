/// triangle-wave clear color intensity.
///
/// every frame moves the intensity one step towards the current end; reaching 1 turns it around,
/// reaching 0 turns it around again and completes a cycle. the frame that completes the last cycle
/// is still yielded.
#[derive(Debug, Clone)]
pub struct Fade {
    step: f32,
    state: f32,
    reverse: bool,
    remaining: u32,
}

impl Fade {
    pub fn new(step: f32, cycles: u32) -> Self {
        assert!(step > 0.0 && step <= 1.0, "invalid step {step}");
        Self {
            step,
            state: 0.0,
            reverse: false,
            remaining: cycles,
        }
    }

    pub fn remaining_cycles(&self) -> u32 {
        self.remaining
    }
}

impl Iterator for Fade {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let state = if self.reverse {
            self.state - self.step
        } else {
            self.state + self.step
        };
        // NOTE: accumulated steps overshoot both ends by less than one step.
        self.state = state.clamp(0.0, 1.0);

        if self.state >= 1.0 {
            self.reverse = true;
        } else if self.state <= 0.0 {
            self.reverse = false;
            self.remaining -= 1;
        }

        Some(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_CYCLES, DEFAULT_STEP};

    // splits at the frames that complete a cycle (the only frames at 0).
    fn cycles(fade: Fade) -> Vec<Vec<f32>> {
        let mut ret = vec![];
        let mut current = vec![];
        for intensity in fade {
            current.push(intensity);
            if intensity == 0.0 {
                ret.push(std::mem::take(&mut current));
            }
        }
        assert!(current.is_empty(), "trailing partial cycle {current:?}");
        ret
    }

    #[test]
    fn exact_sequence() {
        let got: Vec<f32> = Fade::new(0.25, 2).collect();
        #[rustfmt::skip]
        let want = [
            0.25, 0.5, 0.75, 1.0, 0.75, 0.5, 0.25, 0.0,
            0.25, 0.5, 0.75, 1.0, 0.75, 0.5, 0.25, 0.0,
        ];
        assert_eq!(got, want);
    }

    #[test]
    fn full_step() {
        let got: Vec<f32> = Fade::new(1.0, 3).collect();
        assert_eq!(got, [1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn default_fade_runs_six_cycles() {
        let cycles = cycles(Fade::new(DEFAULT_STEP, DEFAULT_CYCLES));
        assert_eq!(cycles.len(), 6);
        // every cycle has the same shape.
        assert!(cycles.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn intensity_stays_in_unit_range() {
        for step in [0.016, 0.03, 0.1, 0.3, 0.7] {
            assert!(
                Fade::new(step, 4).all(|intensity| (0.0..=1.0).contains(&intensity)),
                "step {step}"
            );
        }
    }

    #[test]
    fn rises_then_falls_within_each_cycle() {
        for step in [0.016, 0.03, 0.1, 0.3] {
            for cycle in cycles(Fade::new(step, 3)) {
                let peak = cycle
                    .iter()
                    .position(|&intensity| intensity == 1.0)
                    .expect("cycle reaches full intensity");
                assert!(cycle[..=peak].windows(2).all(|w| w[0] < w[1]), "{cycle:?}");
                assert!(cycle[peak..].windows(2).all(|w| w[0] > w[1]), "{cycle:?}");
            }
        }
    }

    #[test]
    fn counts_down_remaining_cycles() {
        let mut fade = Fade::new(0.5, 2);
        assert_eq!(fade.remaining_cycles(), 2);
        assert_eq!(fade.by_ref().take(4).count(), 4);
        assert_eq!(fade.remaining_cycles(), 1);
        assert_eq!(fade.by_ref().count(), 4);
        assert_eq!(fade.remaining_cycles(), 0);
        assert_eq!(fade.next(), None);
    }
}
