// Detector bookkeeping as a pure transition function

/// Where the detector is in its input cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing buffered.
    #[default]
    Idle,
    /// Collecting the characters of a word.
    Buffering,
    /// Running detection on a flushed word.
    Detecting,
    /// The caller is retyping a correction; input is ignored.
    Correcting,
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Character(char),
    DeleteLast,
    /// Word boundary reached. Carries the boundary text supplied by the
    /// caller, if any.
    Flush(Option<String>),
    Reset,
    BeginCorrection,
    EndCorrection,
}

/// Work the detector performs for a transition, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Push a character onto the word buffer.
    Append(char),
    /// Remove the last buffered character.
    Pop,
    /// Empty the word buffer.
    Clear,
    /// Run detection on the buffered word with the given external boundary.
    Detect(String),
    /// Forget a suppressed short correction.
    DropPending,
    /// Forget word history, the low-confidence counter and pending state.
    ResetContext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Phase,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(next: Phase, effects: Vec<Effect>) -> Self {
        Self { next, effects }
    }

    fn stay(phase: Phase) -> Self {
        Self::to(phase, Vec::new())
    }
}

/// Compute the next phase and the effects of `event`, given how many
/// characters are currently buffered.
pub fn transition(phase: Phase, event: &Event, buffered_len: usize) -> Transition {
    use Effect::*;

    if phase == Phase::Correcting {
        return match event {
            Event::EndCorrection => Transition::stay(Phase::Idle),
            Event::Reset => Transition::to(Phase::Idle, vec![Clear, ResetContext]),
            _ => Transition::stay(Phase::Correcting),
        };
    }

    match event {
        Event::Character(c) => Transition::to(Phase::Buffering, vec![Append(*c)]),
        Event::DeleteLast => match buffered_len {
            0 => Transition::to(Phase::Idle, vec![DropPending]),
            1 => Transition::to(Phase::Idle, vec![Pop]),
            _ => Transition::to(Phase::Buffering, vec![Pop]),
        },
        Event::Flush(_) if buffered_len == 0 => Transition::stay(phase),
        Event::Flush(boundary) => Transition::to(
            Phase::Detecting,
            vec![Detect(boundary.clone().unwrap_or_default()), Clear],
        ),
        Event::Reset => Transition::to(Phase::Idle, vec![Clear, ResetContext]),
        Event::BeginCorrection => Transition::to(Phase::Correcting, vec![Clear]),
        Event::EndCorrection => Transition::stay(phase),
    }
}
