//! CueScheduler: per-state lifecycle (enter → update* → exit) and the
//! crossing test that decides which cues are due on each playhead sample.
//!
//! On every update the scheduler compares the new sample against the
//! previous one. A cue is due when its target time, placed in the previous
//! sample's cycle or (after a wrap) in the current one, lies inside the
//! half-open interval the playhead just travelled. When the cycle index
//! changes, per-cycle marks are cleared so repeating cues re-arm, while
//! non-repeating cues stay spent until the next enter.
//!
//! Only the previous and current cycles are tested. A sample that jumps
//! across several whole cycles does not replay the skipped ones; cues that
//! must not be lost should set `always_trigger` and are caught on exit.

use log::{debug, trace, warn};

use crate::config::{FirstSampleMatch, SchedulerConfig};
use crate::definition::{CueDefinition, CueSet};
use crate::dispatch::CueDispatcher;
use crate::ids::{IdAllocator, RunId};
use crate::outputs::{CueOutputs, CueSlot, FiredCue};
use crate::runtime::{CueRuntimeState, RunContext};
use crate::sample::{time_range_contains, PlayheadSample};

/// Where a scheduler is in its enter/exit lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RunPhase {
    /// Never entered.
    #[default]
    Idle,
    /// Entered, no update yet.
    Entered,
    /// At least one update since the last enter.
    Playing,
    /// Exited; spent cues stay spent until the next enter.
    Exited,
}

/// Cue scheduler for one animating state instance.
#[derive(Debug)]
pub struct CueScheduler {
    cfg: SchedulerConfig,
    cues: CueSet,
    ids: IdAllocator,
    phase: RunPhase,
    run: Option<RunContext>,
    outputs: CueOutputs,
}

impl CueScheduler {
    pub fn new(cues: CueSet, cfg: SchedulerConfig) -> Self {
        Self {
            outputs: CueOutputs::with_capacity(cfg.fired_capacity),
            cfg,
            cues,
            ids: IdAllocator::new(),
            phase: RunPhase::Idle,
            run: None,
        }
    }

    #[inline]
    pub fn cues(&self) -> &CueSet {
        &self.cues
    }

    #[inline]
    pub fn config(&self) -> &SchedulerConfig {
        &self.cfg
    }

    #[inline]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// The current run, or the last one after `exit`. Only `enter` replaces it.
    #[inline]
    pub fn run(&self) -> Option<&RunContext> {
        self.run.as_ref()
    }

    /// Cues fired by the most recent lifecycle call.
    #[inline]
    pub fn outputs(&self) -> &CueOutputs {
        &self.outputs
    }

    pub fn resolve(&self, slot: CueSlot) -> Option<&CueDefinition> {
        match slot {
            CueSlot::Enter => Some(&self.cues.on_enter),
            CueSlot::Exit => Some(&self.cues.on_exit),
            CueSlot::Timed(i) => self.cues.cues.get(i),
        }
    }

    /// Start a fresh run, discarding any previous one, and fire the enter cue.
    pub fn enter(&mut self) -> &CueOutputs {
        self.outputs.clear();
        let id = self.ids.alloc_run();
        self.run = Some(RunContext::new(id, self.cues.len()));
        self.phase = RunPhase::Entered;
        self.outputs.push(FiredCue {
            run: id,
            slot: CueSlot::Enter,
            cycle: None,
            normalized_time: None,
            seconds_into_cycle: None,
        });
        &self.outputs
    }

    /// Advance the run to `sample` and collect the timed cues it crossed.
    pub fn update(&mut self, sample: PlayheadSample) -> &CueOutputs {
        self.outputs.clear();
        if self.phase == RunPhase::Exited {
            warn!("update called after exit; continuing the exited run without re-arming cues");
        }
        let first_sample = self.cfg.first_sample;
        let ids = &mut self.ids;
        let cue_count = self.cues.cues.len();
        let run = self.run.get_or_insert_with(|| {
            warn!("update called without an active run; opening one without an enter cue");
            RunContext::new(ids.alloc_run(), cue_count)
        });

        let cycle = sample.cycle();
        if let Some(last) = run.last_sample {
            let last_cycle = last.cycle();
            if cycle != last_cycle {
                if cycle.abs_diff(last_cycle) > 1 {
                    debug!(
                        "run {:?}: playhead jumped from {} to {}; cues in the cycles between are not replayed",
                        run.id, last.normalized_time, sample.normalized_time
                    );
                }
                trace!("run {:?}: cycle {} -> {}", run.id, last_cycle, cycle);
                run.clear_cycle_marks();
            }
        }

        let run_id = run.id;
        let last = run.last_sample;
        for (i, (def, state)) in self.cues.cues.iter().zip(run.states.iter_mut()).enumerate() {
            if due_on_update(def, state, last, sample, first_sample) {
                state.record_dispatch(cycle);
                self.outputs.push(fired(run_id, CueSlot::Timed(i), sample));
            }
        }

        run.last_sample = Some(sample);
        if self.phase != RunPhase::Exited {
            self.phase = RunPhase::Playing;
        }
        &self.outputs
    }

    /// End the run at `sample`: fire `always_trigger` cues that were missed,
    /// then the exit cue. The run context is kept so stray calls before the
    /// next `enter` cannot re-fire spent cues.
    pub fn exit(&mut self, sample: PlayheadSample) -> &CueOutputs {
        self.outputs.clear();
        if self.phase == RunPhase::Exited {
            warn!("exit called twice; re-evaluating the exited run without re-arming cues");
        }
        let ids = &mut self.ids;
        let cue_count = self.cues.cues.len();
        let run = self.run.get_or_insert_with(|| {
            warn!("exit called without an active run; evaluating a fresh run");
            RunContext::new(ids.alloc_run(), cue_count)
        });

        let cycle = sample.cycle();
        let run_id = run.id;
        for (i, (def, state)) in self.cues.cues.iter().zip(run.states.iter_mut()).enumerate() {
            if due_on_exit(def, state, cycle) {
                state.record_dispatch(cycle);
                self.outputs.push(fired(run_id, CueSlot::Timed(i), sample));
            }
        }
        self.outputs.push(fired(run_id, CueSlot::Exit, sample));

        self.phase = RunPhase::Exited;
        &self.outputs
    }

    /// Hand the cues fired by the last lifecycle call to `dispatcher`, in order.
    pub fn forward<D>(&self, dispatcher: &mut D)
    where
        D: CueDispatcher + ?Sized,
    {
        for fired in &self.outputs.fired {
            let Some(cue) = self.resolve(fired.slot) else {
                continue;
            };
            if cue.debug_log() {
                debug!("{}", cue.debug_label());
            }
            dispatcher.dispatch(cue);
        }
    }

    pub fn enter_with<D>(&mut self, dispatcher: &mut D)
    where
        D: CueDispatcher + ?Sized,
    {
        self.enter();
        self.forward(dispatcher);
    }

    pub fn update_with<D>(&mut self, sample: PlayheadSample, dispatcher: &mut D)
    where
        D: CueDispatcher + ?Sized,
    {
        self.update(sample);
        self.forward(dispatcher);
    }

    pub fn exit_with<D>(&mut self, sample: PlayheadSample, dispatcher: &mut D)
    where
        D: CueDispatcher + ?Sized,
    {
        self.exit(sample);
        self.forward(dispatcher);
    }
}

fn fired(run: RunId, slot: CueSlot, sample: PlayheadSample) -> FiredCue {
    FiredCue {
        run,
        slot,
        cycle: Some(sample.cycle()),
        normalized_time: Some(sample.normalized_time),
        seconds_into_cycle: Some(sample.seconds_into_cycle()),
    }
}

fn due_on_update(
    def: &CueDefinition,
    state: &CueRuntimeState,
    last: Option<PlayheadSample>,
    sample: PlayheadSample,
    first_sample: FirstSampleMatch,
) -> bool {
    if !def.is_repeat_on_loop() && state.dispatched_once {
        return false;
    }

    let Some(last) = last else {
        return first_sample.matches(sample.phase(), def.target_time());
    };

    let last_cycle = last.cycle();
    let cycle = sample.cycle();
    let (start, end) = (last.normalized_time, sample.normalized_time);

    if time_range_contains(last_cycle as f32 + def.target_time(), start, end) {
        return true;
    }
    cycle != last_cycle && time_range_contains(cycle as f32 + def.target_time(), start, end)
}

fn due_on_exit(def: &CueDefinition, state: &CueRuntimeState, cycle: i32) -> bool {
    if !def.is_always_trigger() {
        return false;
    }
    if !state.dispatched_once {
        return true;
    }
    def.is_repeat_on_loop() && state.last_dispatch_cycle != Some(cycle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(t: f32) -> PlayheadSample {
        PlayheadSample::new(t, 1.0)
    }

    #[test]
    fn spent_non_repeating_cue_is_never_due_on_update() {
        let def = CueDefinition::new("a", 0.5);
        let spent = CueRuntimeState {
            dispatched_once: true,
            last_dispatch_cycle: None,
        };
        assert!(!due_on_update(&def, &spent, Some(s(0.4)), s(0.6), FirstSampleMatch::Exact));
        assert!(due_on_update(
            &def,
            &CueRuntimeState::default(),
            Some(s(0.4)),
            s(0.6),
            FirstSampleMatch::Exact
        ));
    }

    #[test]
    fn second_candidate_only_after_a_wrap() {
        let def = CueDefinition::new("a", 0.2).repeat_on_loop(true);
        let fresh = CueRuntimeState::default();
        // 0.9 -> 1.3 wraps; 1.2 lies in (0.9, 1.3].
        assert!(due_on_update(&def, &fresh, Some(s(0.9)), s(1.3), FirstSampleMatch::Exact));
        // 0.9 -> 0.95 stays in cycle 0; 0.2 is behind the playhead.
        assert!(!due_on_update(&def, &fresh, Some(s(0.9)), s(0.95), FirstSampleMatch::Exact));
    }

    #[test]
    fn exit_rules() {
        let always = CueDefinition::new("a", 0.5).always_trigger(true);
        let never = CueDefinition::new("b", 0.5);
        let repeating = CueDefinition::new("c", 0.5)
            .always_trigger(true)
            .repeat_on_loop(true);
        let fired_in_1 = CueRuntimeState {
            dispatched_once: true,
            last_dispatch_cycle: Some(1),
        };

        assert!(due_on_exit(&always, &CueRuntimeState::default(), 0));
        assert!(!due_on_exit(&always, &fired_in_1, 2));
        assert!(!due_on_exit(&never, &CueRuntimeState::default(), 0));
        assert!(!due_on_exit(&repeating, &fired_in_1, 1));
        assert!(due_on_exit(&repeating, &fired_in_1, 2));
    }

    #[test]
    fn phase_tracks_lifecycle() {
        let mut sched = CueScheduler::new(CueSet::default(), SchedulerConfig::default());
        assert_eq!(sched.phase(), RunPhase::Idle);
        sched.enter();
        assert_eq!(sched.phase(), RunPhase::Entered);
        sched.update(s(0.1));
        assert_eq!(sched.phase(), RunPhase::Playing);
        sched.exit(s(0.2));
        assert_eq!(sched.phase(), RunPhase::Exited);
        assert!(sched.run().is_some());
        sched.update(s(0.3));
        assert_eq!(sched.phase(), RunPhase::Exited);
        sched.enter();
        assert_eq!(sched.phase(), RunPhase::Entered);
    }
}
