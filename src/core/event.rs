use crate::core::particle::Phase;
use serde::{Deserialize, Serialize};

/// Things that can happen to a particle during one tick, beyond plain motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Gas particle crossed into the liquid and dissolved.
    Dissolved,
    /// Dissolved particle left the liquid as gas.
    Escaped,
    /// Dissolved particle consumed by the reaction.
    Reacted,
    /// Fresh gas particle appended to restore the target population.
    Replenished,
}

/// Gas and dissolved tallies for a population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCounts {
    pub gas: usize,
    pub dissolved: usize,
}

impl PhaseCounts {
    pub fn tally<'a, I>(phases: I) -> Self
    where
        I: IntoIterator<Item = &'a Phase>,
    {
        phases
            .into_iter()
            .fold(Self::default(), |mut acc, phase| {
                match phase {
                    Phase::Gas => acc.gas += 1,
                    Phase::Dissolved => acc.dissolved += 1,
                }
                acc
            })
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.gas + self.dissolved
    }
}

/// Summary of a completed tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Sequence number of this tick since construction or the last reset (first tick is 1).
    pub tick: u64,
    /// Delta time actually applied, after clamping.
    pub delta_time: f64,
    pub dissolved: u32,
    pub escaped: u32,
    pub reacted: u32,
    pub replenished: u32,
    /// Population after removals and refill.
    pub counts: PhaseCounts,
}

impl TickReport {
    pub(crate) fn new(tick: u64, delta_time: f64) -> Self {
        Self {
            tick,
            delta_time,
            ..Self::default()
        }
    }

    #[inline]
    pub(crate) fn record(&mut self, kind: EventKind) {
        let slot = match kind {
            EventKind::Dissolved => &mut self.dissolved,
            EventKind::Escaped => &mut self.escaped,
            EventKind::Reacted => &mut self.reacted,
            EventKind::Replenished => &mut self.replenished,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn count(&self, kind: EventKind) -> u32 {
        match kind {
            EventKind::Dissolved => self.dissolved,
            EventKind::Escaped => self.escaped,
            EventKind::Reacted => self.reacted,
            EventKind::Replenished => self.replenished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_each_phase() {
        let phases = [Phase::Gas, Phase::Dissolved, Phase::Gas];
        let c = PhaseCounts::tally(phases.iter());
        assert_eq!(c, PhaseCounts { gas: 2, dissolved: 1 });
        assert_eq!(c.total(), 3);
    }

    #[test]
    fn record_increments_matching_counter() {
        let mut r = TickReport::new(1, 1.0);
        r.record(EventKind::Reacted);
        r.record(EventKind::Reacted);
        r.record(EventKind::Replenished);
        assert_eq!(r.count(EventKind::Reacted), 2);
        assert_eq!(r.count(EventKind::Replenished), 1);
        assert_eq!(r.count(EventKind::Dissolved), 0);
        assert_eq!(r.count(EventKind::Escaped), 0);
    }
}
